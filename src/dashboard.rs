//! Session state: the loaded datasets plus the current selections
//!
//! Datasets are built once (both pipelines load in parallel) and then only
//! read. Views are recomputed from the datasets and selections on demand.

use crate::baseline::{
    Baseline, ASSETS, ASSET_INITIAL_INVESTMENT, CITIES, CITY_BASELINE_INDEX,
    PORTFOLIO_INITIAL_INVESTMENT,
};
use crate::config::DashboardConfig;
use crate::error::DashboardError;
use crate::loader::{assemble, DirectorySource, FileSource, TableSource, TextSource};
use crate::portfolio::{load_portfolio, PortfolioRow, Strategy};
use crate::records::{AssetMetrics, CityMetrics, Dataset};
use crate::views::{
    chart_rows, latest_rows, portfolio_chart_rows, rank_latest, rank_portfolios, LatestRow,
    PortfolioPoint, PortfolioRankingRow, RankingRow, Selection, SeriesPoint,
};
use std::fmt;
use std::str::FromStr;

/// The three dashboard views
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    Cities,
    Assets,
    Portfolios,
}

impl FromStr for View {
    type Err = DashboardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "cities" => Ok(View::Cities),
            "assets" => Ok(View::Assets),
            "portfolios" => Ok(View::Portfolios),
            other => Err(DashboardError::UnknownView(other.to_string())),
        }
    }
}

impl fmt::Display for View {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            View::Cities => "cities",
            View::Assets => "assets",
            View::Portfolios => "portfolios",
        };
        f.write_str(name)
    }
}

/// Loaded data and the user's current selections
#[derive(Debug, Clone)]
pub struct Dashboard {
    cities: Dataset<CityMetrics>,
    assets: Dataset<AssetMetrics>,
    portfolios: Vec<PortfolioRow>,
    city_selection: Selection<String>,
    asset_selection: Selection<String>,
    portfolio_selection: Selection<Strategy>,
}

impl Dashboard {
    /// Load everything from the configured paths
    pub fn load(config: &DashboardConfig) -> Self {
        Self::from_sources(
            &DirectorySource::new(&config.city_dir),
            &DirectorySource::new(&config.asset_dir),
            &FileSource::new(&config.portfolio_file),
            config,
        )
    }

    /// Load from arbitrary providers. Failed loads come back as empty data.
    pub fn from_sources<C, A, P>(cities: &C, assets: &A, portfolio: &P, config: &DashboardConfig) -> Self
    where
        C: TableSource + ?Sized,
        A: TableSource + ?Sized,
        P: TextSource + ?Sized,
    {
        let (cities, (assets, portfolios)) = rayon::join(
            || assemble::<CityMetrics, _>(cities, &Baseline::cities()),
            || {
                rayon::join(
                    || assemble::<AssetMetrics, _>(assets, &Baseline::assets()),
                    || load_portfolio(portfolio),
                )
            },
        );

        Self::from_parts(cities, assets, portfolios, config)
    }

    /// Wrap already-built datasets with the default selections
    pub fn from_parts(
        cities: Dataset<CityMetrics>,
        assets: Dataset<AssetMetrics>,
        portfolios: Vec<PortfolioRow>,
        config: &DashboardConfig,
    ) -> Self {
        Self {
            cities,
            assets,
            portfolios,
            city_selection: Selection::capped(
                config.city_cap,
                CITIES.iter().take(config.city_cap).map(|c| c.to_string()),
            ),
            asset_selection: Selection::capped(config.asset_cap, ASSETS.iter().map(|a| a.to_string())),
            portfolio_selection: Selection::uncapped(Strategy::ALL),
        }
    }

    pub fn cities(&self) -> &Dataset<CityMetrics> {
        &self.cities
    }

    pub fn assets(&self) -> &Dataset<AssetMetrics> {
        &self.assets
    }

    pub fn portfolios(&self) -> &[PortfolioRow] {
        &self.portfolios
    }

    /// True if nothing at all was loaded
    pub fn is_empty(&self) -> bool {
        self.cities.is_empty() && self.assets.is_empty() && self.portfolios.is_empty()
    }

    pub fn city_selection(&self) -> &Selection<String> {
        &self.city_selection
    }

    pub fn city_selection_mut(&mut self) -> &mut Selection<String> {
        &mut self.city_selection
    }

    pub fn asset_selection(&self) -> &Selection<String> {
        &self.asset_selection
    }

    pub fn asset_selection_mut(&mut self) -> &mut Selection<String> {
        &mut self.asset_selection
    }

    pub fn portfolio_selection(&self) -> &Selection<Strategy> {
        &self.portfolio_selection
    }

    pub fn portfolio_selection_mut(&mut self) -> &mut Selection<Strategy> {
        &mut self.portfolio_selection
    }

    pub fn city_chart(&self) -> Vec<SeriesPoint<CityMetrics>> {
        chart_rows(&self.cities, self.city_selection.items())
    }

    pub fn city_table(&self) -> Vec<LatestRow<CityMetrics>> {
        latest_rows(&self.cities, self.city_selection.items())
    }

    /// All tracked cities ranked by latest index; return is relative to 100
    pub fn city_ranking(&self) -> Vec<RankingRow> {
        rank_latest(&self.cities, &CITIES, CITY_BASELINE_INDEX)
    }

    pub fn asset_chart(&self) -> Vec<SeriesPoint<AssetMetrics>> {
        chart_rows(&self.assets, self.asset_selection.items())
    }

    pub fn asset_table(&self) -> Vec<LatestRow<AssetMetrics>> {
        latest_rows(&self.assets, self.asset_selection.items())
    }

    pub fn asset_ranking(&self) -> Vec<RankingRow> {
        rank_latest(&self.assets, &ASSETS, ASSET_INITIAL_INVESTMENT)
    }

    pub fn portfolio_chart(&self) -> Vec<PortfolioPoint> {
        portfolio_chart_rows(&self.portfolios, self.portfolio_selection.items())
    }

    pub fn portfolio_ranking(&self) -> Vec<PortfolioRankingRow> {
        rank_portfolios(
            &self.portfolios,
            self.portfolio_selection.items(),
            PORTFOLIO_INITIAL_INVESTMENT,
        )
    }
}
