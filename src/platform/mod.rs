// Discount Card - platform/mod.rs
//
// Platform abstraction layer.
// Dependencies: core (store trait, export format), util, rusqlite, directories.
// Must NOT depend on: app, ui.

pub mod config;
pub mod sqlite;
