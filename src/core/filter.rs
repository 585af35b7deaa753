// Discount Card - core/filter.rs
//
// Cascade rules for the five filter dimensions.
// All predicates are AND-combined exact string equality.
// Core layer: pure logic, no I/O or UI dependencies.

use crate::core::model::{Choice, Dimension, ProviderRecord, Selection};

/// One equality constraint: `dimension = value`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Predicate<'a> {
    pub dimension: Dimension,
    pub value: &'a str,
}

/// Predicates that constrain the choices offered for `dimension`.
///
/// Only pins on dimensions *before* `dimension` in the cascade count. Pins on
/// the dimension itself or anything after it are ignored, so a downstream pin
/// never narrows an upstream dropdown.
pub fn candidate_predicates(dimension: Dimension, selection: &Selection) -> Vec<Predicate<'_>> {
    dimension
        .upstream()
        .iter()
        .filter_map(|&d| selection.get(d).map(|value| Predicate { dimension: d, value }))
        .collect()
}

/// Predicates for a search: every pinned dimension.
pub fn search_predicates(selection: &Selection) -> Vec<Predicate<'_>> {
    selection
        .pinned()
        .map(|(dimension, value)| Predicate { dimension, value })
        .collect()
}

/// True when `record` satisfies every predicate.
///
/// An absent attribute never equals a pinned value.
pub fn matches_all(record: &ProviderRecord, predicates: &[Predicate<'_>]) -> bool {
    predicates
        .iter()
        .all(|p| record.attribute(p.dimension) == Some(p.value))
}

/// Turn raw observed values into a dropdown list.
///
/// Empty strings are dropped, the rest sorted by code point and
/// de-duplicated, and the unconstrained sentinel is prepended.
pub fn build_choices<I>(values: I) -> Vec<Choice>
where
    I: IntoIterator<Item = String>,
{
    let mut values: Vec<String> = values.into_iter().filter(|v| !v.is_empty()).collect();
    values.sort_unstable();
    values.dedup();

    let mut choices = Vec::with_capacity(values.len() + 1);
    choices.push(Choice::All);
    choices.extend(values.into_iter().map(Choice::Value));
    choices
}
