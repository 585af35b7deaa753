// Discount Card - app/session.rs
//
// The filter-and-search session: current selection, cached dropdown choices,
// and the search/export operations over one provider store.
//
// Cascade rules:
// - A dimension's choices depend only on pins strictly before it.
// - Pinning or clearing a dimension resets everything after it to "All" and
//   recomputes those choices in cascade order.
// - Each change is computed into temporaries and committed only when every
//   query succeeded, so a store failure never leaves a half-applied cascade.

use crate::core::export::{export_to_dir, ExportFormat, ExportOutcome};
use crate::core::filter::{build_choices, candidate_predicates, search_predicates};
use crate::core::model::{Choice, Dimension, ProviderRecord, Selection};
use crate::core::store::ProviderStore;
use crate::util::error::{ExportError, FilterError, StoreError};
use std::fmt;
use std::path::Path;

/// One filter-and-search session over a provider store.
pub struct FilterSession {
    store: Box<dyn ProviderStore>,
    selection: Selection,
    /// Dropdown contents, indexed by `Dimension::index`.
    choices: [Vec<Choice>; 5],
}

impl fmt::Debug for FilterSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FilterSession")
            .field("store", &self.store.describe())
            .field("selection", &self.selection)
            .field("choices", &self.choices)
            .finish()
    }
}

impl FilterSession {
    /// Start a session: every dimension unconstrained and every choice list
    /// loaded. Fails if the store cannot be queried.
    pub fn new(store: Box<dyn ProviderStore>) -> Result<Self, StoreError> {
        let mut session = Self {
            store,
            selection: Selection::default(),
            choices: Default::default(),
        };
        session.choices = session.compute_choices(&Selection::default(), &Dimension::ALL)?;

        tracing::info!(
            store = %session.store.describe(),
            governorates = session.choices[0].len() - 1,
            "Filter session started"
        );
        Ok(session)
    }

    /// Sorted choices for `dimension` under `selection`, "All" first.
    ///
    /// Only pins before `dimension` in the cascade constrain the result.
    pub fn distinct_values(
        &self,
        dimension: Dimension,
        selection: &Selection,
    ) -> Result<Vec<Choice>, StoreError> {
        let predicates = candidate_predicates(dimension, selection);
        let values = self.store.distinct_values(dimension, &predicates)?;
        Ok(build_choices(values))
    }

    /// Pin `dimension` to `choice` (or clear it with `Choice::All`), reset
    /// everything downstream and reload the downstream choices.
    ///
    /// The value must be one of the current choices for the dimension. On
    /// error nothing changes.
    pub fn set_selection(&mut self, dimension: Dimension, choice: Choice) -> Result<(), FilterError> {
        if let Choice::Value(ref value) = choice {
            if !self.choices[dimension.index()].contains(&choice) {
                return Err(FilterError::UnobservedValue {
                    dimension: dimension.label(),
                    value: value.clone(),
                });
            }
        }

        let mut next = self.selection.clone();
        next.set(dimension, choice.as_value().map(str::to_string));
        next.clear_downstream(dimension);

        let mut recomputed = self.compute_choices(&next, dimension.downstream())?;

        tracing::debug!(
            dimension = dimension.label(),
            value = choice.label(),
            reset = dimension.downstream().len(),
            "Selection changed"
        );
        self.selection = next;
        for d in dimension.downstream() {
            self.choices[d.index()] = std::mem::take(&mut recomputed[d.index()]);
        }
        Ok(())
    }

    /// Clear every dimension and reload all choice lists.
    pub fn reset(&mut self) -> Result<(), StoreError> {
        let fresh = Selection::default();
        let choices = self.compute_choices(&fresh, &Dimension::ALL)?;
        self.selection = fresh;
        self.choices = choices;
        tracing::debug!("Selection reset");
        Ok(())
    }

    /// All records matching every pin in `selection`, in store order.
    ///
    /// No match is an empty Vec, not an error.
    pub fn search(&self, selection: &Selection) -> Result<Vec<ProviderRecord>, StoreError> {
        let predicates = search_predicates(selection);
        let rows = self.store.rows(&predicates)?;
        tracing::info!(
            pinned = predicates.len(),
            rows = rows.len(),
            "Search completed"
        );
        Ok(rows)
    }

    /// `search` with the session's own selection.
    pub fn search_current(&self) -> Result<Vec<ProviderRecord>, StoreError> {
        self.search(&self.selection)
    }

    /// Write the displayed `rows` to a new, uniquely named file in `dir`.
    pub fn export(
        &self,
        rows: &[ProviderRecord],
        dir: &Path,
        format: ExportFormat,
    ) -> Result<ExportOutcome, ExportError> {
        export_to_dir(rows, dir, format)
    }

    /// Current dropdown contents for `dimension`.
    pub fn choices(&self, dimension: Dimension) -> &[Choice] {
        &self.choices[dimension.index()]
    }

    /// The current selection.
    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    /// Where the records come from, for status text and logs.
    pub fn store_description(&self) -> String {
        self.store.describe()
    }

    /// Choice lists for `dimensions` under `selection`, in the order given.
    /// Slots for dimensions not listed are left empty.
    fn compute_choices(
        &self,
        selection: &Selection,
        dimensions: &[Dimension],
    ) -> Result<[Vec<Choice>; 5], StoreError> {
        let mut out: [Vec<Choice>; 5] = Default::default();
        for &d in dimensions {
            out[d.index()] = self.distinct_values(d, selection)?;
        }
        Ok(out)
    }
}
