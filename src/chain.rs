//! Cumulative-value chainer
//!
//! Rebuilds an absolute series from per-period relative changes by folding
//! over the periods in ascending key order. Each step sees only the previous
//! period's absolute values (or the baseline for the first period):
//!
//! - an entity present in the previous period gets `policy(prev, change)`
//! - an entity absent from the previous period stays unset this period
//! - entities missing from the current period are dropped from the carry
//!
//! Every step depends on the one before it, so this is strictly sequential.

use crate::baseline::Baseline;
use crate::period::PeriodKey;
use crate::records::{Dataset, Metrics, PeriodRecord};
use rust_decimal::{Decimal, RoundingStrategy};
use std::collections::BTreeMap;

/// How an absolute value is carried from one period to the next
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChainPolicy {
    /// Rebased index: the change is an index with the previous month = 100.
    /// `new = round(prev * change / 100, 3)`
    IndexChaining,
    /// Compounded value: the change is a percentage return.
    /// `new = round(prev * (1 + change / 100), 2)`
    ReturnCompounding,
}

impl ChainPolicy {
    /// Decimal places the chained value is rounded to
    pub fn decimals(self) -> u32 {
        match self {
            ChainPolicy::IndexChaining => 3,
            ChainPolicy::ReturnCompounding => 2,
        }
    }

    /// Absolute value for this period given last period's value
    pub fn next_value(self, previous: f64, change_pct: f64) -> f64 {
        let raw = match self {
            ChainPolicy::IndexChaining => previous * change_pct / 100.0,
            ChainPolicy::ReturnCompounding => previous * (1.0 + change_pct / 100.0),
        };
        round_to(raw, self.decimals())
    }
}

/// Round half away from zero to a fixed number of decimal places.
///
/// The tie is decided on the exact decimal expansion of `value`, so a double
/// stored just below a midpoint (`100.05 * 99 / 100` is `99.04949999..`)
/// rounds down.
/// Values with no decimal form (non-finite) are returned unchanged.
pub fn round_to(value: f64, decimals: u32) -> f64 {
    let Some(exact) = Decimal::from_f64_retain(value) else {
        return value;
    };
    let rounded = exact.round_dp_with_strategy(decimals, RoundingStrategy::MidpointAwayFromZero);
    // nearest double to the rounded decimal
    rounded.to_string().parse().unwrap_or(value)
}

/// Absolute values of the previous period, keyed by entity.
///
/// `Some(v)` is a chained value; `None` is an entity that was reported but
/// never received a value. Both count as "present" for the next step.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PreviousValues {
    values: BTreeMap<String, Option<f64>>,
}

impl PreviousValues {
    pub fn from_baseline(baseline: &Baseline) -> Self {
        Self {
            values: baseline
                .iter()
                .map(|(entity, value)| (entity.to_string(), Some(value)))
                .collect(),
        }
    }

    pub fn from_record<M: Metrics>(record: &PeriodRecord<M>) -> Self {
        Self {
            values: record
                .iter()
                .map(|(entity, metrics)| (entity.to_string(), metrics.absolute()))
                .collect(),
        }
    }

    /// `None` if the entity was absent; `Some(None)` if present but unset
    pub fn get(&self, entity: &str) -> Option<Option<f64>> {
        self.values.get(entity).copied()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Fill one period's absolute values from the previous period and return
/// the carry for the next period
pub fn chain_record<M: Metrics>(previous: &PreviousValues, record: &mut PeriodRecord<M>) -> PreviousValues {
    let policy = M::CHAIN_POLICY;

    for (entity, metrics) in record.iter_mut() {
        let value = match previous.get(entity) {
            Some(prev) => prev.map(|p| policy.next_value(p, metrics.relative_change())),
            None => None,
        };
        metrics.set_absolute(value);
    }

    PreviousValues::from_record(record)
}

/// Chain an already-ordered sequence of periods.
///
/// The slice is expected in ascending key order. Empty records take part in
/// the fold: they clear the carry for the period after them.
pub fn chain_periods<M: Metrics>(baseline: &Baseline, periods: &mut [(PeriodKey, PeriodRecord<M>)]) {
    debug_assert!(periods.windows(2).all(|w| w[0].0 <= w[1].0));

    periods
        .iter_mut()
        .fold(PreviousValues::from_baseline(baseline), |previous, (_, record)| {
            chain_record(&previous, record)
        });
}

/// Chain every period of a dataset in ascending key order
pub fn chain_dataset<M: Metrics>(baseline: &Baseline, dataset: &mut Dataset<M>) {
    dataset
        .iter_mut()
        .fold(PreviousValues::from_baseline(baseline), |previous, (_, record)| {
            chain_record(&previous, record)
        });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::records::{parse_period, AssetMetrics, CityMetrics};
    use approx::assert_abs_diff_eq;

    fn key(k: &str) -> PeriodKey {
        PeriodKey::new(k).unwrap()
    }

    fn city_dataset(periods: &[(&str, &str)]) -> Dataset<CityMetrics> {
        periods
            .iter()
            .map(|(k, text)| (key(k), parse_period::<CityMetrics>(text)))
            .collect()
    }

    #[test]
    fn test_index_chaining() {
        let baseline = Baseline::uniform(key("202205"), ["A"], 100.0);
        let mut dataset = city_dataset(&[("202206", "h\nA,102,0\n"), ("202207", "h\nA,98,0\n")]);

        chain_dataset(&baseline, &mut dataset);

        let first = dataset.get(&key("202206")).unwrap().get("A").unwrap().index.unwrap();
        let second = dataset.get(&key("202207")).unwrap().get("A").unwrap().index.unwrap();
        assert_abs_diff_eq!(first, 102.0, epsilon = 1e-9);
        assert_abs_diff_eq!(second, 99.96, epsilon = 1e-9);
    }

    #[test]
    fn test_return_compounding() {
        let baseline = Baseline::uniform(key("199912"), ["X"], 2500.0);
        let mut dataset: Dataset<AssetMetrics> = [
            (key("200001"), parse_period("h\nX,4,0,0\n")),
            (key("200002"), parse_period("h\nX,-1.5,0,0\n")),
        ]
        .into_iter()
        .collect();

        chain_dataset(&baseline, &mut dataset);

        let jan = dataset.get(&key("200001")).unwrap().get("X").unwrap();
        assert_abs_diff_eq!(jan.current_value.unwrap(), 2600.0, epsilon = 1e-9);
        // 2600 * 0.985 = 2561.0
        let feb = dataset.get(&key("200002")).unwrap().get("X").unwrap();
        assert_abs_diff_eq!(feb.current_value.unwrap(), 2561.0, epsilon = 1e-9);
    }

    #[test]
    fn test_rounding_precision() {
        assert_abs_diff_eq!(ChainPolicy::IndexChaining.next_value(100.0, 100.12345), 100.123, epsilon = 1e-12);
        assert_abs_diff_eq!(ChainPolicy::ReturnCompounding.next_value(1000.0, 0.12345), 1001.23, epsilon = 1e-12);
        assert_abs_diff_eq!(round_to(-1.23456, 2), -1.23, epsilon = 1e-12);
    }

    #[test]
    fn test_rounding_uses_exact_decimal_value() {
        // 100.05 * 99 / 100 is stored as 99.04949999.., below the midpoint
        assert_eq!(round_to(100.05 * 99.0 / 100.0, 3), 99.049);
        assert_eq!(round_to(1.005, 2), 1.0);
        // exact ties go away from zero
        assert_eq!(round_to(0.125, 2), 0.13);
        assert_eq!(round_to(-0.125, 2), -0.13);
        assert_eq!(round_to(2.5, 0), 3.0);
        assert!(round_to(f64::NAN, 3).is_nan());
    }

    #[test]
    fn test_chained_rounding_below_midpoint() {
        let baseline = Baseline::uniform(key("202205"), ["A"], 100.0);
        let mut dataset = city_dataset(&[("202206", "h\nA,100.05,0\n"), ("202207", "h\nA,99,0\n")]);

        chain_dataset(&baseline, &mut dataset);

        let june = dataset.get(&key("202206")).unwrap().get("A").unwrap().index.unwrap();
        let july = dataset.get(&key("202207")).unwrap().get("A").unwrap().index.unwrap();
        assert_eq!(june, 100.05);
        assert_eq!(july, 99.049);
    }

    #[test]
    fn test_new_entity_skipped_in_first_period() {
        let baseline = Baseline::uniform(key("202205"), ["A"], 100.0);
        let mut dataset = city_dataset(&[
            ("202206", "h\nA,101,0\nNEW,105,0\n"),
            ("202207", "h\nA,101,0\nNEW,105,0\n"),
        ]);

        chain_dataset(&baseline, &mut dataset);

        let june = dataset.get(&key("202206")).unwrap();
        assert!(june.get("A").unwrap().index.is_some());
        assert_eq!(june.get("NEW").unwrap().index, None);

        // Present last period but never valued: stays unset
        let july = dataset.get(&key("202207")).unwrap();
        assert_eq!(july.get("NEW").unwrap().index, None);
        assert_eq!(july.get("NEW").unwrap().absolute_or_zero(), 0.0);
    }

    #[test]
    fn test_missing_entity_not_carried_from_older_periods() {
        let baseline = Baseline::uniform(key("202205"), ["A", "B"], 100.0);
        let mut dataset = city_dataset(&[
            ("202206", "h\nA,101,0\nB,101,0\n"),
            ("202207", "h\nA,101,0\n"),
            ("202208", "h\nA,101,0\nB,101,0\n"),
        ]);

        chain_dataset(&baseline, &mut dataset);

        let aug = dataset.get(&key("202208")).unwrap();
        assert!(aug.get("A").unwrap().index.is_some());
        assert_eq!(aug.get("B").unwrap().index, None);
    }

    #[test]
    fn test_rerun_is_idempotent() {
        let baseline = Baseline::uniform(key("202205"), ["A", "B"], 100.0);
        let mut dataset = city_dataset(&[
            ("202206", "h\nA,100.4,0\nB,99.7,0\n"),
            ("202207", "h\nA,100.9,0\nB,99.1,0\n"),
            ("202208", "h\nA,99.8,0\nB,100.3,0\n"),
        ]);

        chain_dataset(&baseline, &mut dataset);
        let first = dataset.clone();
        chain_dataset(&baseline, &mut dataset);

        assert_eq!(first, dataset);
    }

    #[test]
    fn test_empty_period_clears_carry() {
        let baseline = Baseline::uniform(key("202205"), ["A"], 100.0);
        let mut periods = vec![
            (key("202206"), parse_period::<CityMetrics>("h\nA,101,0\n")),
            (key("202207"), parse_period::<CityMetrics>("h\n")),
            (key("202208"), parse_period::<CityMetrics>("h\nA,101,0\n")),
        ];

        chain_periods(&baseline, &mut periods);

        assert_abs_diff_eq!(periods[0].1.get("A").unwrap().index.unwrap(), 101.0, epsilon = 1e-9);
        assert_eq!(periods[2].1.get("A").unwrap().index, None);
    }

    #[test]
    fn test_previous_values_presence() {
        let mut record = parse_period::<CityMetrics>("h\nA,101,0\n");
        let carry = chain_record(&PreviousValues::default(), &mut record);
        assert_eq!(carry.len(), 1);
        assert_eq!(carry.get("A"), Some(None));
        assert_eq!(carry.get("B"), None);
    }
}
