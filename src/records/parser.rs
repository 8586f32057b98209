//! Parse one period file into a [`PeriodRecord`]
//!
//! Layout: a header line (ignored), then `entity,metric1,metric2,...` rows.
//! Parsing never fails: rows without an entity name are skipped and
//! malformed numbers read as zero.

use super::data::{Metrics, PeriodRecord};
use csv::{ReaderBuilder, StringRecord, Trim};
use log::warn;

/// Parse a numeric field from its longest leading number, so `100.5%`
/// reads as 100.5. Empty, non-numeric and non-finite values read as zero.
pub fn parse_metric(raw: &str) -> f64 {
    numeric_prefix(raw.trim())
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .unwrap_or(0.0)
}

/// Longest prefix of `s` shaped like `[+-]digits[.digits][e[+-]digits]`
fn numeric_prefix(s: &str) -> &str {
    let bytes = s.as_bytes();
    let digits_from = |start: usize| {
        bytes[start.min(bytes.len())..]
            .iter()
            .take_while(|b| b.is_ascii_digit())
            .count()
    };

    let mut end = usize::from(matches!(bytes.first(), Some(b'+' | b'-')));
    let int_digits = digits_from(end);
    end += int_digits;

    let mut frac_digits = 0;
    if bytes.get(end) == Some(&b'.') {
        frac_digits = digits_from(end + 1);
        if int_digits + frac_digits > 0 {
            end += 1 + frac_digits;
        }
    }
    if int_digits + frac_digits == 0 {
        return "";
    }

    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let mut exp = end + 1;
        if matches!(bytes.get(exp), Some(b'+' | b'-')) {
            exp += 1;
        }
        let exp_digits = digits_from(exp);
        if exp_digits > 0 {
            end = exp + exp_digits;
        }
    }

    &s[..end]
}

/// Parse raw CSV text into a record of entity -> metrics
pub fn parse_period<M: Metrics>(text: &str) -> PeriodRecord<M> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(Trim::All)
        .from_reader(text.trim().as_bytes());

    let mut record = PeriodRecord::new();

    for (line, result) in reader.records().enumerate() {
        let row = match result {
            Ok(row) => row,
            Err(e) => {
                warn!("skipping unreadable row {}: {}", line + 2, e);
                continue;
            }
        };

        if let Some((entity, metrics)) = parse_row::<M>(&row) {
            record.insert(entity, metrics);
        }
    }

    record
}

fn parse_row<M: Metrics>(row: &StringRecord) -> Option<(String, M)> {
    let entity = row.get(0).filter(|name| !name.is_empty())?;
    let fields: Vec<f64> = row.iter().skip(1).map(parse_metric).collect();
    Some((entity.to_string(), M::from_fields(&fields)))
}
