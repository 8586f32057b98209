//! Ranking tables: latest value against a fixed initial investment

use super::snapshot::latest_snapshot;
use crate::portfolio::{PortfolioRow, Strategy};
use crate::records::{Dataset, Metrics};
use serde::Serialize;

/// Percentage gain of `current` over `initial`
pub fn total_return_pct(current: f64, initial: f64) -> f64 {
    if initial == 0.0 {
        return 0.0;
    }
    (current - initial) / initial * 100.0
}

/// Latest value of one allow-listed entity
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankingRow {
    pub entity: String,
    pub current_value: f64,
    pub initial_investment: f64,
    pub total_return_pct: f64,
}

/// Latest value of one portfolio strategy
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PortfolioRankingRow {
    pub strategy: Strategy,
    pub name: &'static str,
    pub latest_value: f64,
    pub total_return_pct: f64,
}

/// Rank the allow-listed entities of the latest period by absolute value,
/// highest first. Entities missing from the latest period are left out;
/// unset values rank as zero.
pub fn rank_latest<M: Metrics>(
    dataset: &Dataset<M>,
    allow_list: &[&str],
    initial_investment: f64,
) -> Vec<RankingRow> {
    let Some((_, record)) = latest_snapshot(dataset) else {
        return Vec::new();
    };

    let mut rows: Vec<RankingRow> = allow_list
        .iter()
        .filter_map(|entity| {
            let current_value = record.get(entity)?.absolute_or_zero();
            Some(RankingRow {
                entity: entity.to_string(),
                current_value,
                initial_investment,
                total_return_pct: total_return_pct(current_value, initial_investment),
            })
        })
        .collect();

    rows.sort_by(|a, b| b.current_value.total_cmp(&a.current_value));
    rows
}

/// Rank the selected strategies by their value in the last row, highest
/// first. Strategies without a positive value are left out.
pub fn rank_portfolios(
    rows: &[PortfolioRow],
    selected: &[Strategy],
    initial_investment: f64,
) -> Vec<PortfolioRankingRow> {
    let Some(latest) = rows.last() else {
        return Vec::new();
    };

    let mut ranking: Vec<PortfolioRankingRow> = selected
        .iter()
        .filter_map(|strategy| {
            let latest_value = strategy.value(latest);
            (latest_value > 0.0).then(|| PortfolioRankingRow {
                strategy: *strategy,
                name: strategy.display_name(),
                latest_value,
                total_return_pct: total_return_pct(latest_value, initial_investment),
            })
        })
        .collect();

    ranking.sort_by(|a, b| b.latest_value.total_cmp(&a.latest_value));
    ranking
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::baseline::{Baseline, ASSETS, ASSET_INITIAL_INVESTMENT, PORTFOLIO_INITIAL_INVESTMENT};
    use crate::chain::chain_dataset;
    use crate::period::PeriodKey;
    use crate::records::{parse_period, AssetMetrics};
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_rank_latest_assets() {
        let mut dataset: Dataset<AssetMetrics> = [(
            PeriodKey::new("200001").unwrap(),
            parse_period("h\n股票,4,0,0\n国债,1,0,0\n现金,0.2,0,0\n黄金,-2,0,0\n比特币,50,0,0\n"),
        )]
        .into_iter()
        .collect();
        chain_dataset(&Baseline::assets(), &mut dataset);

        let rows = rank_latest(&dataset, &ASSETS, ASSET_INITIAL_INVESTMENT);

        let order: Vec<&str> = rows.iter().map(|r| r.entity.as_str()).collect();
        assert_eq!(order, vec!["股票", "国债", "现金", "黄金"]);
        assert_abs_diff_eq!(rows[0].current_value, 2600.0, epsilon = 1e-9);
        assert_abs_diff_eq!(rows[0].total_return_pct, 4.0, epsilon = 1e-9);
        assert_abs_diff_eq!(rows[3].total_return_pct, -2.0, epsilon = 1e-9);
    }

    #[test]
    fn test_rank_latest_missing_entity() {
        let mut dataset: Dataset<AssetMetrics> = [(
            PeriodKey::new("200001").unwrap(),
            parse_period("h\n黄金,1,0,0\n"),
        )]
        .into_iter()
        .collect();
        chain_dataset(&Baseline::assets(), &mut dataset);

        let rows = rank_latest(&dataset, &ASSETS, ASSET_INITIAL_INVESTMENT);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].entity, "黄金");
    }

    #[test]
    fn test_rank_portfolios() {
        let rows = vec![
            PortfolioRow {
                date: "2000-01".to_string(),
                lazy_permanent: 10_000.0,
                aggressive: 10_000.0,
                sixty_forty: 10_000.0,
                vanguard_500: 10_000.0,
            },
            PortfolioRow {
                date: "2024-12".to_string(),
                lazy_permanent: 35_000.0,
                aggressive: 52_000.0,
                sixty_forty: 0.0,
                vanguard_500: 48_000.0,
            },
        ];

        let ranking = rank_portfolios(&rows, &Strategy::ALL, PORTFOLIO_INITIAL_INVESTMENT);

        let order: Vec<Strategy> = ranking.iter().map(|r| r.strategy).collect();
        assert_eq!(
            order,
            vec![Strategy::Aggressive, Strategy::Vanguard500, Strategy::LazyPermanent]
        );
        assert_abs_diff_eq!(ranking[0].total_return_pct, 420.0, epsilon = 1e-9);
    }

    #[test]
    fn test_empty_inputs() {
        assert!(rank_latest(&Dataset::<AssetMetrics>::new(), &ASSETS, ASSET_INITIAL_INVESTMENT).is_empty());
        assert!(rank_portfolios(&[], &Strategy::ALL, PORTFOLIO_INITIAL_INVESTMENT).is_empty());
    }

    #[test]
    fn test_total_return() {
        assert_abs_diff_eq!(total_return_pct(2_750.0, 2_500.0), 10.0, epsilon = 1e-9);
        assert_eq!(total_return_pct(5.0, 0.0), 0.0);
    }
}
