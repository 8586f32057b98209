//! Period-ordered collection of records

use super::data::PeriodRecord;
use crate::period::PeriodKey;
use serde::Serialize;
use std::collections::BTreeMap;

/// Period records ordered by ascending period key
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Dataset<M> {
    periods: BTreeMap<PeriodKey, PeriodRecord<M>>,
}

impl<M> Default for Dataset<M> {
    fn default() -> Self {
        Self {
            periods: BTreeMap::new(),
        }
    }
}

impl<M> Dataset<M> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: PeriodKey, record: PeriodRecord<M>) {
        self.periods.insert(key, record);
    }

    pub fn get(&self, key: &PeriodKey) -> Option<&PeriodRecord<M>> {
        self.periods.get(key)
    }

    /// Record at the greatest period key
    pub fn latest(&self) -> Option<(&PeriodKey, &PeriodRecord<M>)> {
        self.periods.iter().next_back()
    }

    pub fn len(&self) -> usize {
        self.periods.len()
    }

    pub fn is_empty(&self) -> bool {
        self.periods.is_empty()
    }

    /// Periods in ascending key order
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = (&PeriodKey, &PeriodRecord<M>)> {
        self.periods.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = (&PeriodKey, &mut PeriodRecord<M>)> {
        self.periods.iter_mut()
    }

    pub fn periods(&self) -> impl Iterator<Item = &PeriodKey> {
        self.periods.keys()
    }
}

impl<M> FromIterator<(PeriodKey, PeriodRecord<M>)> for Dataset<M> {
    fn from_iter<I: IntoIterator<Item = (PeriodKey, PeriodRecord<M>)>>(iter: I) -> Self {
        Self {
            periods: iter.into_iter().collect(),
        }
    }
}
