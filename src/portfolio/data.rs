//! Combined portfolio value rows
//!
//! `combine.csv` holds already-absolute dollar values per strategy,
//! `date,lazy_permanent,aggressive,6040,vanguard_500`, so it never goes
//! through the chainer.

use crate::error::Result;
use crate::loader::TextSource;
use crate::records::parse_metric;
use csv::{ReaderBuilder, Trim};
use log::{error, info, warn};
use serde::Serialize;

/// File name of the combined portfolio file inside the asset directory
pub const COMBINED_FILE_NAME: &str = "combine.csv";

/// One dated row of strategy values
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PortfolioRow {
    pub date: String,
    pub lazy_permanent: f64,
    pub aggressive: f64,
    pub sixty_forty: f64,
    pub vanguard_500: f64,
}

/// Parse the combined file, keeping file order.
///
/// Rows without a date are skipped and malformed values read as zero.
pub fn parse_portfolio(text: &str) -> Vec<PortfolioRow> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(Trim::All)
        .from_reader(text.trim().as_bytes());

    let mut rows = Vec::new();
    for (line, result) in reader.records().enumerate() {
        let record = match result {
            Ok(record) => record,
            Err(e) => {
                warn!("skipping unreadable portfolio row {}: {}", line + 2, e);
                continue;
            }
        };

        let date = match record.get(0) {
            Some(date) if !date.is_empty() => date,
            _ => continue,
        };
        let value = |idx: usize| record.get(idx).map(parse_metric).unwrap_or(0.0);

        rows.push(PortfolioRow {
            date: date.to_string(),
            lazy_permanent: value(1),
            aggressive: value(2),
            sixty_forty: value(3),
            vanguard_500: value(4),
        });
    }

    rows
}

/// Same as [`load_portfolio`] but surfaces the load error
pub fn try_load_portfolio<S: TextSource + ?Sized>(source: &S) -> Result<Vec<PortfolioRow>> {
    let text = source.read_text()?;
    Ok(parse_portfolio(&text))
}

/// Load the combined portfolio file; on failure log and return no rows
pub fn load_portfolio<S: TextSource + ?Sized>(source: &S) -> Vec<PortfolioRow> {
    match try_load_portfolio(source) {
        Ok(rows) => {
            info!("loaded {} portfolio rows", rows.len());
            rows
        }
        Err(e) => {
            error!("error reading portfolio file: {}", e);
            Vec::new()
        }
    }
}
