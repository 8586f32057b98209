//! The closed set of combined portfolio strategies

use super::data::PortfolioRow;
use crate::error::DashboardError;
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// A pre-aggregated portfolio strategy tracked in `combine.csv`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum Strategy {
    /// Lazy permanent portfolio: equal quarters of stocks, treasuries, cash, gold
    #[serde(rename = "lazy_permanent")]
    LazyPermanent,
    /// All-equity allocation
    #[serde(rename = "aggressive")]
    Aggressive,
    /// 60% stocks / 40% bonds
    #[serde(rename = "6040")]
    SixtyForty,
    /// Vanguard 500 index fund
    #[serde(rename = "vanguard_500")]
    Vanguard500,
}

impl Strategy {
    /// All strategies, in combined-file column order
    pub const ALL: [Strategy; 4] = [
        Strategy::LazyPermanent,
        Strategy::Aggressive,
        Strategy::SixtyForty,
        Strategy::Vanguard500,
    ];

    /// Identifier used by selectors and the CLI
    pub fn key(&self) -> &'static str {
        match self {
            Strategy::LazyPermanent => "lazy_permanent",
            Strategy::Aggressive => "aggressive",
            Strategy::SixtyForty => "6040",
            Strategy::Vanguard500 => "vanguard_500",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Strategy::LazyPermanent => "Lazy Permanent Portfolio",
            Strategy::Aggressive => "Aggressive Portfolio",
            Strategy::SixtyForty => "60/40 Portfolio",
            Strategy::Vanguard500 => "Vanguard 500",
        }
    }

    /// Pick this strategy's value out of a combined row
    pub fn value(&self, row: &PortfolioRow) -> f64 {
        match self {
            Strategy::LazyPermanent => row.lazy_permanent,
            Strategy::Aggressive => row.aggressive,
            Strategy::SixtyForty => row.sixty_forty,
            Strategy::Vanguard500 => row.vanguard_500,
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for Strategy {
    type Err = DashboardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Strategy::ALL
            .into_iter()
            .find(|strategy| strategy.key() == s)
            .ok_or_else(|| DashboardError::UnknownStrategy(s.to_string()))
    }
}
