//! Period records, the period-ordered dataset, and the CSV record parser

mod data;
mod dataset;
pub mod parser;

pub use data::{AssetMetrics, CityMetrics, Metrics, PeriodRecord};
pub use dataset::Dataset;
pub use parser::{parse_metric, parse_period};
