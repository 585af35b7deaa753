// Discount Card - core/store.rs
//
// The provider store seam. The session only ever asks two questions of the
// catalog, so the trait is exactly those two queries. The SQLite-backed
// implementation lives in the platform layer; `MemoryStore` here backs unit
// tests and programmatic use.

use crate::core::filter::{matches_all, Predicate};
use crate::core::model::{Dimension, ProviderRecord};
use crate::util::error::StoreError;

/// A read-only relation of provider records.
pub trait ProviderStore {
    /// Observed values of `dimension` among records matching `predicates`.
    ///
    /// Implementations exclude absent and empty values. Order and duplicates
    /// are unspecified; the caller sorts and de-duplicates.
    fn distinct_values(
        &self,
        dimension: Dimension,
        predicates: &[Predicate<'_>],
    ) -> Result<Vec<String>, StoreError>;

    /// All records matching `predicates`, in storage order.
    fn rows(&self, predicates: &[Predicate<'_>]) -> Result<Vec<ProviderRecord>, StoreError>;

    /// Short human-readable description of where the records come from.
    fn describe(&self) -> String;
}

/// Provider records held in memory, in insertion order.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    records: Vec<ProviderRecord>,
}

impl MemoryStore {
    pub fn new(records: Vec<ProviderRecord>) -> Self {
        Self { records }
    }
}

impl ProviderStore for MemoryStore {
    fn distinct_values(
        &self,
        dimension: Dimension,
        predicates: &[Predicate<'_>],
    ) -> Result<Vec<String>, StoreError> {
        let mut values: Vec<String> = self
            .records
            .iter()
            .filter(|r| matches_all(r, predicates))
            .filter_map(|r| r.attribute(dimension))
            .filter(|v| !v.is_empty())
            .map(str::to_string)
            .collect();
        values.sort_unstable();
        values.dedup();
        Ok(values)
    }

    fn rows(&self, predicates: &[Predicate<'_>]) -> Result<Vec<ProviderRecord>, StoreError> {
        Ok(self
            .records
            .iter()
            .filter(|r| matches_all(r, predicates))
            .cloned()
            .collect())
    }

    fn describe(&self) -> String {
        format!("in-memory catalog ({} providers)", self.records.len())
    }
}
