//! Export the chart series of one view as CSV
//!
//! Usage: cargo run --bin export_series -- cities --select 北京,深圳 -o series.csv
//!
//! Writes every selected entity's chained value per month (or every
//! strategy's value per row for portfolios). Data paths come from the
//! DASHBOARD_* environment variables.

use anyhow::Context;
use clap::Parser;
use index_dashboard::{Dashboard, DashboardConfig, Strategy, View};
use std::fs::File;
use std::io::{self, Write};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "export_series", about = "Write chained series to CSV")]
struct Args {
    /// View to export: cities, assets or portfolios
    view: View,

    /// Entities to export, oldest first (default: the view's default selection)
    #[arg(long, value_delimiter = ',')]
    select: Vec<String>,

    /// Output file (stdout if omitted)
    #[arg(short, long)]
    output: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let args = Args::parse();
    let config = DashboardConfig::from_env();
    let mut dashboard = Dashboard::load(&config);

    let out: Box<dyn Write> = match &args.output {
        Some(path) => Box::new(
            File::create(path).with_context(|| format!("creating {}", path.display()))?,
        ),
        None => Box::new(io::stdout()),
    };
    let mut writer = csv::Writer::from_writer(out);

    let rows = match args.view {
        View::Cities => {
            if !args.select.is_empty() {
                dashboard.city_selection_mut().replace(args.select.clone());
            }
            writer.write_record(["month", "city", "index", "month_over_month", "year_over_year"])?;
            let points = dashboard.city_chart();
            for p in &points {
                writer.write_record([
                    p.period.to_string(),
                    p.entity.clone(),
                    format!("{:.3}", p.value),
                    p.metrics.month_over_month.to_string(),
                    p.metrics.year_over_year.to_string(),
                ])?;
            }
            points.len()
        }
        View::Assets => {
            if !args.select.is_empty() {
                dashboard.asset_selection_mut().replace(args.select.clone());
            }
            writer.write_record(["month", "asset", "value", "monthly_return", "annual_return", "ytd_return"])?;
            let points = dashboard.asset_chart();
            for p in &points {
                writer.write_record([
                    p.period.to_string(),
                    p.entity.clone(),
                    format!("{:.2}", p.value),
                    p.metrics.monthly_return.to_string(),
                    p.metrics.annual_return.to_string(),
                    p.metrics.ytd_return.to_string(),
                ])?;
            }
            points.len()
        }
        View::Portfolios => {
            if !args.select.is_empty() {
                let strategies = args
                    .select
                    .iter()
                    .map(|key| key.parse::<Strategy>())
                    .collect::<Result<Vec<_>, _>>()
                    .context("invalid --select for portfolios")?;
                dashboard.portfolio_selection_mut().replace(strategies);
            }
            writer.write_record(["date", "strategy", "name", "value"])?;
            let points = dashboard.portfolio_chart();
            for p in &points {
                writer.write_record([
                    p.date.clone(),
                    p.strategy.key().to_string(),
                    p.name.to_string(),
                    format!("{:.2}", p.value),
                ])?;
            }
            points.len()
        }
    };

    writer.flush()?;
    log::info!("exported {} {} rows", rows, args.view);

    Ok(())
}
