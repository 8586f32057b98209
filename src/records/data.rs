//! Metric types and per-period records

use crate::chain::ChainPolicy;
use serde::Serialize;
use std::collections::BTreeMap;

/// Per-entity metrics parsed from one period file.
///
/// Relative metrics come straight from the file. The absolute value is never
/// read from input: it starts unset and only the chainer fills it in.
pub trait Metrics: Clone + Default + Send + Sync {
    /// Formula used to carry the absolute value forward between periods
    const CHAIN_POLICY: ChainPolicy;

    /// Build from the numeric columns following the entity name.
    /// Missing columns are zero.
    fn from_fields(fields: &[f64]) -> Self;

    /// The percentage the chainer applies to the previous absolute value
    fn relative_change(&self) -> f64;

    fn absolute(&self) -> Option<f64>;

    fn set_absolute(&mut self, value: Option<f64>);

    /// Absolute value with "unset" read as zero
    fn absolute_or_zero(&self) -> f64 {
        self.absolute().unwrap_or(0.0)
    }
}

fn field(fields: &[f64], idx: usize) -> f64 {
    fields.get(idx).copied().unwrap_or(0.0)
}

/// Housing price index figures for one city in one month
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CityMetrics {
    /// Month-over-month index (previous month = 100)
    pub month_over_month: f64,
    /// Year-over-year index (same month last year = 100)
    pub year_over_year: f64,
    /// Chained index relative to the baseline month
    pub index: Option<f64>,
}

impl Metrics for CityMetrics {
    const CHAIN_POLICY: ChainPolicy = ChainPolicy::IndexChaining;

    fn from_fields(fields: &[f64]) -> Self {
        Self {
            month_over_month: field(fields, 0),
            year_over_year: field(fields, 1),
            index: None,
        }
    }

    fn relative_change(&self) -> f64 {
        self.month_over_month
    }

    fn absolute(&self) -> Option<f64> {
        self.index
    }

    fn set_absolute(&mut self, value: Option<f64>) {
        self.index = value;
    }
}

/// Return figures for one asset class in one month
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct AssetMetrics {
    /// Monthly return (%)
    pub monthly_return: f64,
    /// Trailing annual return (%)
    pub annual_return: f64,
    /// Year-to-date return (%)
    pub ytd_return: f64,
    /// Compounded dollar value of the position
    pub current_value: Option<f64>,
}

impl Metrics for AssetMetrics {
    const CHAIN_POLICY: ChainPolicy = ChainPolicy::ReturnCompounding;

    fn from_fields(fields: &[f64]) -> Self {
        Self {
            monthly_return: field(fields, 0),
            annual_return: field(fields, 1),
            ytd_return: field(fields, 2),
            current_value: None,
        }
    }

    fn relative_change(&self) -> f64 {
        self.monthly_return
    }

    fn absolute(&self) -> Option<f64> {
        self.current_value
    }

    fn set_absolute(&mut self, value: Option<f64>) {
        self.current_value = value;
    }
}

/// All entities reported in one period, keyed by exact entity name
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct PeriodRecord<M> {
    entries: BTreeMap<String, M>,
}

impl<M> Default for PeriodRecord<M> {
    fn default() -> Self {
        Self {
            entries: BTreeMap::new(),
        }
    }
}

impl<M> PeriodRecord<M> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or overwrite an entity's metrics (later rows win)
    pub fn insert(&mut self, entity: impl Into<String>, metrics: M) {
        self.entries.insert(entity.into(), metrics);
    }

    pub fn get(&self, entity: &str) -> Option<&M> {
        self.entries.get(entity)
    }

    pub fn contains(&self, entity: &str) -> bool {
        self.entries.contains_key(entity)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &M)> {
        self.entries.iter().map(|(name, m)| (name.as_str(), m))
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = (&str, &mut M)> {
        self.entries.iter_mut().map(|(name, m)| (name.as_str(), m))
    }

    pub fn entities(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }
}

impl<M, S: Into<String>> FromIterator<(S, M)> for PeriodRecord<M> {
    fn from_iter<I: IntoIterator<Item = (S, M)>>(iter: I) -> Self {
        let mut record = Self::new();
        for (entity, metrics) in iter {
            record.insert(entity, metrics);
        }
        record
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_fields_are_zero() {
        let city = CityMetrics::from_fields(&[101.2]);
        assert_eq!(city.month_over_month, 101.2);
        assert_eq!(city.year_over_year, 0.0);
        assert_eq!(city.index, None);

        let asset = AssetMetrics::from_fields(&[]);
        assert_eq!(asset, AssetMetrics::default());
        assert_eq!(asset.absolute_or_zero(), 0.0);
    }

    #[test]
    fn test_later_insert_overwrites() {
        let mut record = PeriodRecord::new();
        record.insert("A", CityMetrics::from_fields(&[1.0, 2.0]));
        record.insert("A", CityMetrics::from_fields(&[3.0, 4.0]));
        assert_eq!(record.len(), 1);
        assert_eq!(record.get("A").unwrap().month_over_month, 3.0);
    }
}
