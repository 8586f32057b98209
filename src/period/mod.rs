//! Period identifiers and period-file naming

mod key;

pub use key::{PeriodKey, PERIOD_FILE_EXTENSION};
