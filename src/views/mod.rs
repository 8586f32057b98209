//! Read-only views derived from the chained datasets
//!
//! All functions here are pure: they are recomputed from the datasets and
//! the current selections whenever either changes.

mod ranking;
mod selection;
mod series;
mod snapshot;

pub use ranking::{rank_latest, rank_portfolios, total_return_pct, PortfolioRankingRow, RankingRow};
pub use selection::{apply_cap, Selection, ASSET_SELECTION_CAP, CITY_SELECTION_CAP};
pub use series::{chart_rows, portfolio_chart_rows, PortfolioPoint, SeriesPoint};
pub use snapshot::{latest_rows, latest_snapshot, LatestRow};
