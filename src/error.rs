//! Error types for loading and interpreting dashboard data

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised on the load path and by identifier parsing
#[derive(Debug, Error)]
pub enum DashboardError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    #[error("data source not found: {}", .0.display())]
    MissingSource(PathBuf),

    #[error("invalid period key: {0}")]
    InvalidPeriodKey(String),

    #[error("unknown portfolio strategy: {0}")]
    UnknownStrategy(String),

    #[error("unknown view: {0}")]
    UnknownView(String),
}

pub type Result<T> = std::result::Result<T, DashboardError>;
