//! Runtime configuration
//!
//! Defaults point at the bundled `data/` directory. Each field can be
//! overridden from the environment:
//!   DASHBOARD_CITY_DIR, DASHBOARD_ASSET_DIR, DASHBOARD_PORTFOLIO_FILE,
//!   DASHBOARD_CITY_CAP, DASHBOARD_ASSET_CAP

use crate::portfolio::COMBINED_FILE_NAME;
use crate::views::{ASSET_SELECTION_CAP, CITY_SELECTION_CAP};
use std::env;
use std::path::PathBuf;

/// Default directory of monthly city index files
pub const DEFAULT_CITY_DIR: &str = "data/cities";
/// Default directory of monthly asset return files (also holds the combined file)
pub const DEFAULT_ASSET_DIR: &str = "data/assets";

/// Where data lives and how many entities each chart may show
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardConfig {
    pub city_dir: PathBuf,
    pub asset_dir: PathBuf,
    pub portfolio_file: PathBuf,
    pub city_cap: usize,
    pub asset_cap: usize,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            city_dir: PathBuf::from(DEFAULT_CITY_DIR),
            asset_dir: PathBuf::from(DEFAULT_ASSET_DIR),
            portfolio_file: PathBuf::from(DEFAULT_ASSET_DIR).join(COMBINED_FILE_NAME),
            city_cap: CITY_SELECTION_CAP,
            asset_cap: ASSET_SELECTION_CAP,
        }
    }
}

impl DashboardConfig {
    /// Defaults with environment overrides applied.
    /// Caps that don't parse keep their default.
    pub fn from_env() -> Self {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Build from an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        Self {
            city_dir: lookup("DASHBOARD_CITY_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.city_dir),
            asset_dir: lookup("DASHBOARD_ASSET_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.asset_dir),
            portfolio_file: lookup("DASHBOARD_PORTFOLIO_FILE")
                .map(PathBuf::from)
                .unwrap_or(defaults.portfolio_file),
            city_cap: lookup("DASHBOARD_CITY_CAP")
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.city_cap),
            asset_cap: lookup("DASHBOARD_ASSET_CAP")
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.asset_cap),
        }
    }
}
