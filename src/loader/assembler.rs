//! Build a chained dataset from a set of period files
//!
//! Files are read and parsed in parallel, then put back into period order
//! before the (sequential) chainer runs. Any load failure is logged and
//! turned into an empty dataset so callers only ever see "no data".

use super::source::TableSource;
use crate::baseline::Baseline;
use crate::chain::chain_periods;
use crate::error::Result;
use crate::period::PeriodKey;
use crate::records::{parse_period, Dataset, Metrics, PeriodRecord};
use log::{debug, error, info};
use rayon::prelude::*;

/// Load, parse, order and chain every period file in `source`.
///
/// Never fails: on any error the problem is logged and an empty dataset
/// is returned.
pub fn assemble<M, S>(source: &S, baseline: &Baseline) -> Dataset<M>
where
    M: Metrics,
    S: TableSource + ?Sized,
{
    match try_assemble(source, baseline) {
        Ok(dataset) => {
            info!(
                "loaded {} periods ({} .. {})",
                dataset.len(),
                dataset.periods().next().map(|k| k.as_str()).unwrap_or("-"),
                dataset.latest().map(|(k, _)| k.as_str()).unwrap_or("-"),
            );
            dataset
        }
        Err(e) => {
            error!("error reading period files: {}", e);
            Dataset::new()
        }
    }
}

/// Same as [`assemble`] but surfaces the first load error
pub fn try_assemble<M, S>(source: &S, baseline: &Baseline) -> Result<Dataset<M>>
where
    M: Metrics,
    S: TableSource + ?Sized,
{
    let mut files: Vec<(PeriodKey, String)> = source
        .names()?
        .into_iter()
        .filter_map(|name| PeriodKey::from_file_name(&name).map(|key| (key, name)))
        .collect();
    files.sort();

    // Reads are independent; ordering is restored by collecting in file order
    let mut periods: Vec<(PeriodKey, PeriodRecord<M>)> = files
        .par_iter()
        .map(|(key, name)| -> Result<(PeriodKey, PeriodRecord<M>)> {
            let text = source.read(name)?;
            let record = parse_period::<M>(&text);
            debug!("parsed {}: {} entities", name, record.len());
            Ok((key.clone(), record))
        })
        .collect::<Result<_>>()?;

    chain_periods(baseline, &mut periods);

    Ok(periods
        .into_iter()
        .filter(|(_, record)| !record.is_empty())
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DashboardError;
    use crate::loader::source::{DirectorySource, MemorySource};
    use crate::records::{AssetMetrics, CityMetrics};
    use approx::assert_abs_diff_eq;
    use std::path::Path;

    fn key(k: &str) -> PeriodKey {
        PeriodKey::new(k).unwrap()
    }

    #[test]
    fn test_files_sorted_filtered_and_chained() {
        // Inserted out of order; names that aren't period files are ignored
        let source = MemorySource::new()
            .with_file("202207.csv", "city,hb,tb\nA,98,101\n")
            .with_file("combine.csv", "date,a,b,c,d\n2000-01,1,2,3,4\n")
            .with_file("202206.csv", "city,hb,tb\nA,102,103\n")
            .with_file("notes.txt", "ignored");
        let baseline = Baseline::uniform(key("202205"), ["A"], 100.0);

        let dataset: Dataset<CityMetrics> = assemble(&source, &baseline);

        assert_eq!(dataset.len(), 2);
        let periods: Vec<&str> = dataset.periods().map(|k| k.as_str()).collect();
        assert_eq!(periods, vec!["202206", "202207"]);
        let july = dataset.get(&key("202207")).unwrap().get("A").unwrap();
        assert_abs_diff_eq!(july.index.unwrap(), 99.96, epsilon = 1e-9);
        assert_eq!(july.year_over_year, 101.0);
    }

    #[test]
    fn test_empty_period_files_dropped() {
        let source = MemorySource::new()
            .with_file("202206.csv", "city,hb,tb\nA,102,0\n")
            .with_file("202207.csv", "city,hb,tb\n")
            .with_file("202208.csv", "city,hb,tb\nA,101,0\n");
        let baseline = Baseline::uniform(key("202205"), ["A"], 100.0);

        let dataset: Dataset<CityMetrics> = assemble(&source, &baseline);

        assert_eq!(dataset.len(), 2);
        assert!(dataset.get(&key("202207")).is_none());
        // The empty month still broke the chain
        assert_eq!(dataset.get(&key("202208")).unwrap().get("A").unwrap().index, None);
    }

    #[test]
    fn test_missing_directory_yields_empty_dataset() {
        let source = DirectorySource::new("no/such/period/dir");
        let dataset: Dataset<AssetMetrics> = assemble(&source, &Baseline::assets());
        assert!(dataset.is_empty());
        assert!(try_assemble::<AssetMetrics, _>(&source, &Baseline::assets()).is_err());
    }

    /// Serves `inner` but fails to read one named file
    struct FailingRead {
        inner: MemorySource,
        broken: &'static str,
    }

    impl TableSource for FailingRead {
        fn names(&self) -> Result<Vec<String>> {
            self.inner.names()
        }

        fn read(&self, name: &str) -> Result<String> {
            if name == self.broken {
                return Err(DashboardError::MissingSource(name.into()));
            }
            self.inner.read(name)
        }
    }

    #[test]
    fn test_one_failed_read_discards_whole_batch() {
        let source = FailingRead {
            inner: MemorySource::new()
                .with_file("202206.csv", "city,hb,tb\nA,102,0\n")
                .with_file("202207.csv", "city,hb,tb\nA,98,0\n")
                .with_file("202208.csv", "city,hb,tb\nA,101,0\n"),
            broken: "202207.csv",
        };
        let baseline = Baseline::uniform(key("202205"), ["A"], 100.0);

        let dataset: Dataset<CityMetrics> = assemble(&source, &baseline);
        assert!(dataset.is_empty());
        assert!(matches!(
            try_assemble::<CityMetrics, _>(&source, &baseline),
            Err(DashboardError::MissingSource(_))
        ));
    }

    #[test]
    fn test_bundled_city_data() {
        let dir = Path::new(env!("CARGO_MANIFEST_DIR")).join("data/cities");
        let dataset: Dataset<CityMetrics> = assemble(&DirectorySource::new(dir), &Baseline::cities());

        assert!(!dataset.is_empty());
        let (_, first) = dataset.iter().next().unwrap();
        let beijing = first.get("北京").unwrap();
        assert_abs_diff_eq!(
            beijing.index.unwrap(),
            beijing.month_over_month,
            epsilon = 1e-9
        );
    }

    #[test]
    fn test_bundled_asset_data() {
        let dir = Path::new(env!("CARGO_MANIFEST_DIR")).join("data/assets");
        let dataset: Dataset<AssetMetrics> = assemble(&DirectorySource::new(dir), &Baseline::assets());

        assert!(!dataset.is_empty());
        assert!(dataset.periods().all(|k| k.as_str() != "combine"));
        let (_, latest) = dataset.latest().unwrap();
        assert!(latest.get("股票").unwrap().current_value.unwrap() > 0.0);
    }
}
