//! Latest-period snapshot and the "current figures" table rows

use crate::period::PeriodKey;
use crate::records::{Dataset, Metrics, PeriodRecord};
use serde::Serialize;

/// Record at the greatest period key, if any
pub fn latest_snapshot<M>(dataset: &Dataset<M>) -> Option<(&PeriodKey, &PeriodRecord<M>)> {
    dataset.latest()
}

/// Latest figures for one selected entity
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LatestRow<M> {
    pub entity: String,
    pub period: PeriodKey,
    /// Month label, e.g. `2024年03月`
    pub month: String,
    pub value: f64,
    pub metrics: M,
}

/// One row per selected entity present in the latest period, in selection order
pub fn latest_rows<M: Metrics>(dataset: &Dataset<M>, selected: &[String]) -> Vec<LatestRow<M>> {
    let Some((period, record)) = latest_snapshot(dataset) else {
        return Vec::new();
    };
    let month = period.label();

    selected
        .iter()
        .filter_map(|entity| {
            let metrics = record.get(entity)?;
            Some(LatestRow {
                entity: entity.clone(),
                period: period.clone(),
                month: month.clone(),
                value: metrics.absolute_or_zero(),
                metrics: metrics.clone(),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::baseline::Baseline;
    use crate::chain::chain_dataset;
    use crate::records::{parse_period, AssetMetrics};
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_latest_rows() {
        let key = |k: &str| PeriodKey::new(k).unwrap();
        let mut dataset: Dataset<AssetMetrics> = [
            (key("200002"), parse_period("h\n股票,-2,8,1.9\n黄金,1,3,2.0\n")),
            (key("200001"), parse_period("h\n股票,4,10,4\n黄金,1,2,1\n")),
        ]
        .into_iter()
        .collect();
        chain_dataset(&Baseline::assets(), &mut dataset);

        let selected = vec!["黄金".to_string(), "现金".to_string(), "股票".to_string()];
        let rows = latest_rows(&dataset, &selected);

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].entity, "黄金");
        assert_eq!(rows[0].month, "2000年02月");
        assert_eq!(rows[1].entity, "股票");
        // 2500 * 1.04 * 0.98
        assert_abs_diff_eq!(rows[1].value, 2548.0, epsilon = 1e-9);
        assert_eq!(rows[1].metrics.annual_return, 8.0);
    }

    #[test]
    fn test_empty_dataset() {
        let dataset = Dataset::<AssetMetrics>::new();
        assert!(latest_snapshot(&dataset).is_none());
        assert!(latest_rows(&dataset, &["股票".to_string()]).is_empty());
    }
}
