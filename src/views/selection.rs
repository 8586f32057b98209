//! User-controlled entity selection with an optional size cap
//!
//! When a change would push the selection past its cap, the oldest entries
//! are dropped: the result is entries 2..=cap of the requested list followed
//! by the entry just added. This is a sliding window favouring the newest
//! pick, not LRU.

/// Most assets shown on the asset chart at once
pub const ASSET_SELECTION_CAP: usize = 4;
/// Most cities shown on the city chart at once
pub const CITY_SELECTION_CAP: usize = 5;

/// Apply the cap/eviction rule to a requested selection list
pub fn apply_cap<T: Clone>(values: Vec<T>, cap: usize) -> Vec<T> {
    if values.len() <= cap {
        return values;
    }
    if cap == 0 {
        return Vec::new();
    }

    let newest = values[values.len() - 1].clone();
    let mut kept = values[1..cap].to_vec();
    kept.push(newest);
    kept
}

/// Ordered selection of entities, oldest first
#[derive(Debug, Clone, PartialEq)]
pub struct Selection<T> {
    items: Vec<T>,
    cap: Option<usize>,
}

impl<T: Clone + PartialEq> Selection<T> {
    /// Selection limited to `cap` entries; `initial` is subject to the cap
    pub fn capped(cap: usize, initial: impl IntoIterator<Item = T>) -> Self {
        let mut selection = Self {
            items: Vec::new(),
            cap: Some(cap),
        };
        selection.replace(initial.into_iter().collect());
        selection
    }

    pub fn uncapped(initial: impl IntoIterator<Item = T>) -> Self {
        Self {
            items: initial.into_iter().collect(),
            cap: None,
        }
    }

    /// Set the selection to `values` (the selector's full new value list,
    /// newest last), evicting the oldest entries past the cap
    pub fn replace(&mut self, values: Vec<T>) {
        self.items = match self.cap {
            Some(cap) => apply_cap(values, cap),
            None => values,
        };
    }

    /// Append one entity; a no-op if it is already selected
    pub fn add(&mut self, item: T) {
        if self.items.contains(&item) {
            return;
        }
        let mut values = self.items.clone();
        values.push(item);
        self.replace(values);
    }

    /// Remove an entity, returning whether it was selected
    pub fn remove(&mut self, item: &T) -> bool {
        let before = self.items.len();
        self.items.retain(|selected| selected != item);
        self.items.len() != before
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn cap(&self) -> Option<usize> {
        self.cap
    }

    pub fn contains(&self, item: &T) -> bool {
        self.items.contains(item)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
