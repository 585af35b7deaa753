// Discount Card - app/mod.rs
//
// Application layer: the filter-and-search session and GUI-facing state.
// Dependencies: core layer.
// Must NOT depend on: ui, platform specifics.

pub mod session;
pub mod state;
