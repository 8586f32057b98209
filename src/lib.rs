//! Index Dashboard - cumulative index and value series from monthly CSV snapshots
//!
//! This library provides:
//! - Period file discovery and parsing (70-city housing price index, asset returns)
//! - Chaining of monthly relative changes into absolute index/value series
//! - Pre-aggregated portfolio strategy values
//! - Chart, latest-month and ranking views with capped entity selection

pub mod baseline;
pub mod chain;
pub mod config;
pub mod dashboard;
pub mod error;
pub mod loader;
pub mod period;
pub mod portfolio;
pub mod records;
pub mod views;

// Re-export commonly used types
pub use baseline::Baseline;
pub use chain::ChainPolicy;
pub use config::DashboardConfig;
pub use dashboard::{Dashboard, View};
pub use error::{DashboardError, Result};
pub use period::PeriodKey;
pub use portfolio::{PortfolioRow, Strategy};
pub use records::{AssetMetrics, CityMetrics, Dataset, Metrics, PeriodRecord};
pub use views::Selection;
