//! Index Dashboard CLI
//!
//! Prints the chart series, latest-month table and ranking of one view.
//!
//! Usage:
//!   index_dashboard assets
//!   index_dashboard cities --select 北京,上海,深圳
//!   index_dashboard portfolios --select 6040,vanguard_500 --json

use anyhow::{bail, Context};
use clap::Parser;
use index_dashboard::views::{LatestRow, PortfolioPoint, PortfolioRankingRow, RankingRow, SeriesPoint};
use index_dashboard::{AssetMetrics, CityMetrics, Dashboard, DashboardConfig, Strategy, View};
use serde::Serialize;
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "index_dashboard", version, about = "Housing index and portfolio performance views")]
struct Args {
    /// View to print: cities, assets or portfolios
    #[arg(default_value = "assets")]
    view: View,

    /// Directory of monthly city index files (YYYYMM.csv)
    #[arg(long)]
    city_dir: Option<PathBuf>,

    /// Directory of monthly asset return files (YYYYMM.csv)
    #[arg(long)]
    asset_dir: Option<PathBuf>,

    /// Combined portfolio value file
    #[arg(long)]
    portfolio_file: Option<PathBuf>,

    /// Entities to chart, oldest first (city/asset names or strategy keys)
    #[arg(long, value_delimiter = ',')]
    select: Vec<String>,

    /// Print JSON instead of tables
    #[arg(long)]
    json: bool,
}

#[derive(Serialize)]
struct Report<P, T, R> {
    view: String,
    selection: Vec<String>,
    chart: Vec<P>,
    table: Vec<T>,
    ranking: Vec<R>,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let args = Args::parse();

    let mut config = DashboardConfig::from_env();
    if let Some(dir) = args.city_dir {
        config.city_dir = dir;
    }
    if let Some(dir) = args.asset_dir {
        config.asset_dir = dir;
    }
    if let Some(file) = args.portfolio_file {
        config.portfolio_file = file;
    }

    let mut dashboard = Dashboard::load(&config);
    if dashboard.is_empty() {
        bail!("no data found (run with RUST_LOG=error for load errors)");
    }

    if !args.select.is_empty() {
        match args.view {
            View::Cities => dashboard.city_selection_mut().replace(args.select.clone()),
            View::Assets => dashboard.asset_selection_mut().replace(args.select.clone()),
            View::Portfolios => {
                let strategies = args
                    .select
                    .iter()
                    .map(|key| key.parse::<Strategy>())
                    .collect::<Result<Vec<_>, _>>()
                    .context("invalid --select for portfolios")?;
                dashboard.portfolio_selection_mut().replace(strategies);
            }
        }
    }

    match args.view {
        View::Cities => {
            let report = Report {
                view: args.view.to_string(),
                selection: dashboard.city_selection().items().to_vec(),
                chart: dashboard.city_chart(),
                table: dashboard.city_table(),
                ranking: dashboard.city_ranking(),
            };
            if args.json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                print_city_chart(&report.chart);
                print_city_table(&report.table);
                print_ranking("Index vs May 2022 (=100)", &report.ranking);
            }
        }
        View::Assets => {
            let report = Report {
                view: args.view.to_string(),
                selection: dashboard.asset_selection().items().to_vec(),
                chart: dashboard.asset_chart(),
                table: dashboard.asset_table(),
                ranking: dashboard.asset_ranking(),
            };
            if args.json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                print_asset_chart(&report.chart);
                print_asset_table(&report.table);
                print_ranking("Current value / $2,500", &report.ranking);
            }
        }
        View::Portfolios => {
            let report = Report::<_, (), _> {
                view: args.view.to_string(),
                selection: dashboard
                    .portfolio_selection()
                    .items()
                    .iter()
                    .map(|s| s.key().to_string())
                    .collect(),
                chart: dashboard.portfolio_chart(),
                table: Vec::new(),
                ranking: dashboard.portfolio_ranking(),
            };
            if args.json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                print_portfolio_chart(&report.chart);
                print_portfolio_ranking(&report.ranking);
            }
        }
    }

    Ok(())
}

fn print_city_chart(points: &[SeriesPoint<CityMetrics>]) {
    println!("City index series ({} points):", points.len());
    println!("{:>7} {:<10} {:>10} {:>8} {:>8}", "Month", "City", "Index", "MoM", "YoY");
    println!("{}", "-".repeat(48));
    for p in points {
        println!("{:>7} {:<10} {:>10.3} {:>8.1} {:>8.1}",
            p.period, p.entity, p.value, p.metrics.month_over_month, p.metrics.year_over_year);
    }
    println!();
}

fn print_city_table(rows: &[LatestRow<CityMetrics>]) {
    println!("Latest month:");
    for row in rows {
        println!("  {:<10} {}  index {:.3}  MoM {:.1}  YoY {:.1}",
            row.entity, row.month, row.value, row.metrics.month_over_month, row.metrics.year_over_year);
    }
    println!();
}

fn print_asset_chart(points: &[SeriesPoint<AssetMetrics>]) {
    println!("Asset value series ({} points):", points.len());
    println!("{:>7} {:<6} {:>12} {:>9} {:>9} {:>9}", "Month", "Asset", "Value", "Monthly", "Annual", "YTD");
    println!("{}", "-".repeat(58));
    for p in points {
        println!("{:>7} {:<6} {:>12.2} {:>8.2}% {:>8.2}% {:>8.2}%",
            p.period, p.entity, p.value,
            p.metrics.monthly_return, p.metrics.annual_return, p.metrics.ytd_return);
    }
    println!();
}

fn print_asset_table(rows: &[LatestRow<AssetMetrics>]) {
    println!("Latest month:");
    for row in rows {
        println!("  {:<6} {}  monthly {:.2}%  annual {:.2}%  ytd {:.2}%  value ${:.2}",
            row.entity, row.month,
            row.metrics.monthly_return, row.metrics.annual_return, row.metrics.ytd_return,
            row.value);
    }
    println!();
}

fn print_ranking(title: &str, rows: &[RankingRow]) {
    println!("{}:", title);
    for (rank, row) in rows.iter().enumerate() {
        println!("  {:>2}. {:<10} {:>12.3} / {:<8} {:>8.2}%",
            rank + 1, row.entity, row.current_value, row.initial_investment, row.total_return_pct);
    }
}

fn print_portfolio_chart(points: &[PortfolioPoint]) {
    println!("Portfolio value series ({} points):", points.len());
    for p in points {
        println!("  {:<10} {:<26} ${:>12.2}", p.date, p.name, p.value);
    }
    println!();
}

fn print_portfolio_ranking(rows: &[PortfolioRankingRow]) {
    println!("Portfolios (initial $10,000):");
    for (rank, row) in rows.iter().enumerate() {
        println!("  {:>2}. {:<26} ${:>12.2} {:>9.2}%",
            rank + 1, row.name, row.latest_value, row.total_return_pct);
    }
}
