//! Pre-aggregated portfolio strategy values

mod data;
mod strategy;

pub use data::{load_portfolio, parse_portfolio, try_load_portfolio, PortfolioRow, COMBINED_FILE_NAME};
pub use strategy::Strategy;
