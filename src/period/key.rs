//! Six-digit `YYYYMM` period keys

use crate::error::{DashboardError, Result};
use chrono::NaiveDate;
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// Extension carried by every period file
pub const PERIOD_FILE_EXTENSION: &str = "csv";

/// A calendar month identified by its zero-padded `YYYYMM` string.
///
/// Keys are always exactly six ASCII digits, so lexicographic order
/// equals chronological order and the derived `Ord` can be used to sort
/// periods.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct PeriodKey(String);

impl PeriodKey {
    /// Validate and wrap a `YYYYMM` string
    pub fn new(key: &str) -> Result<Self> {
        if key.len() == 6 && key.bytes().all(|b| b.is_ascii_digit()) {
            Ok(Self(key.to_string()))
        } else {
            Err(DashboardError::InvalidPeriodKey(key.to_string()))
        }
    }

    /// Wrap a compile-time constant key
    pub(crate) fn from_static(key: &'static str) -> Self {
        debug_assert!(Self::new(key).is_ok(), "bad constant period key {}", key);
        Self(key.to_string())
    }

    /// Extract the key from a period file name such as `202401.csv`.
    ///
    /// Any leading directory components are ignored. Returns `None` for
    /// names that don't match `^\d{6}\.csv$` (including `combine.csv`).
    pub fn from_file_name(name: &str) -> Option<Self> {
        let file_name = name.rsplit(['/', '\\']).next().unwrap_or(name);
        let (stem, extension) = file_name.split_once('.')?;
        if extension != PERIOD_FILE_EXTENSION {
            return None;
        }
        Self::new(stem).ok()
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Numeric interpretation, used for ascending chart ordering
    pub fn as_number(&self) -> u32 {
        // Six ASCII digits always fit
        self.0.parse().unwrap_or(0)
    }

    pub fn year(&self) -> i32 {
        self.0[..4].parse().unwrap_or(0)
    }

    pub fn month(&self) -> u32 {
        self.0[4..].parse().unwrap_or(0)
    }

    /// First day of the month, if the month digits are 01-12
    pub fn month_start(&self) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year(), self.month(), 1)
    }

    /// Display label in the `YYYY年MM月` form used by the latest-month tables.
    /// Keys with an out-of-range month fall back to the raw key.
    pub fn label(&self) -> String {
        match self.month_start() {
            Some(date) => date.format("%Y年%m月").to_string(),
            None => self.0.clone(),
        }
    }
}

impl fmt::Display for PeriodKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for PeriodKey {
    type Err = DashboardError;

    fn from_str(s: &str) -> Result<Self> {
        Self::new(s)
    }
}
