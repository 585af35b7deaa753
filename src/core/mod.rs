// Discount Card - core/mod.rs
//
// Core business logic layer.
// Dependencies: util, serde, csv/serde_json/uuid for export.
// Must NOT depend on: ui, platform, app.

pub mod export;
pub mod filter;
pub mod model;
pub mod store;
