//! Multi-series chart rows

use crate::period::PeriodKey;
use crate::portfolio::{PortfolioRow, Strategy};
use crate::records::{Dataset, Metrics};
use serde::Serialize;

/// One point of an entity's absolute series
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeriesPoint<M> {
    pub period: PeriodKey,
    pub entity: String,
    pub value: f64,
    pub metrics: M,
}

/// One point of a portfolio strategy's value series
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PortfolioPoint {
    pub date: String,
    pub strategy: Strategy,
    pub name: &'static str,
    pub value: f64,
}

/// Flatten every period's values for the selected entities.
///
/// Entities without a positive absolute value have no data yet and are
/// left out. Rows are ordered by the numeric period, then selection order.
pub fn chart_rows<M: Metrics>(dataset: &Dataset<M>, selected: &[String]) -> Vec<SeriesPoint<M>> {
    let mut rows: Vec<SeriesPoint<M>> = dataset
        .iter()
        .flat_map(|(period, record)| {
            selected.iter().filter_map(move |entity| {
                let metrics = record.get(entity)?;
                let value = metrics.absolute_or_zero();
                (value > 0.0).then(|| SeriesPoint {
                    period: period.clone(),
                    entity: entity.clone(),
                    value,
                    metrics: metrics.clone(),
                })
            })
        })
        .collect();

    rows.sort_by_key(|row| row.period.as_number());
    rows
}

/// Per-row values of the selected strategies, in file order.
/// Non-positive values are left out.
pub fn portfolio_chart_rows(rows: &[PortfolioRow], selected: &[Strategy]) -> Vec<PortfolioPoint> {
    rows.iter()
        .flat_map(|row| {
            selected.iter().filter_map(move |strategy| {
                let value = strategy.value(row);
                (value > 0.0).then(|| PortfolioPoint {
                    date: row.date.clone(),
                    strategy: *strategy,
                    name: strategy.display_name(),
                    value,
                })
            })
        })
        .collect()
}
