// Discount Card - util/constants.rs
//
// Single source of truth for all named constants, limits, and defaults.

// =============================================================================
// Application metadata
// =============================================================================

/// Application display name.
pub const APP_NAME: &str = "Discount Card Search";

/// Application identifier used for config/data directories.
pub const APP_ID: &str = "DiscountCardSearch";

/// Current application version (updated by release script).
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

// =============================================================================
// Provider store
// =============================================================================

/// Database file loaded when neither the CLI nor config.toml names one.
pub const DEFAULT_DATABASE_FILE: &str = "discount_card.db";

/// Name of the read-only lookup table holding provider records.
pub const PROVIDERS_TABLE: &str = "providers";

/// Label shown for the unconstrained choice in every dropdown.
pub const UNCONSTRAINED_LABEL: &str = "All";

// =============================================================================
// Export
// =============================================================================

/// File name prefix for exported result sets.
pub const EXPORT_FILE_PREFIX: &str = "filtered_discount_card_";

/// Number of hex digits taken from a random UUID for the export file suffix.
pub const EXPORT_SUFFIX_LEN: usize = 8;

/// Upper bound on fresh suffixes drawn when an export name already exists.
/// A collision on 32 random bits is already rare; this only guards the loop.
pub const MAX_EXPORT_NAME_ATTEMPTS: usize = 16;

/// Exported column headers, in output order.
pub const EXPORT_HEADERS: [&str; 5] = [
    "Provider Name",
    "Address",
    "Phone",
    "Hotline",
    "Agreed Prices",
];

/// Worksheet name used in Excel exports.
pub const EXPORT_SHEET_NAME: &str = "Providers";

/// UTF-8 byte-order mark written at the start of CSV exports so spreadsheet
/// applications pick the right encoding for non-Latin provider names.
pub const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

// =============================================================================
// UI defaults
// =============================================================================

/// Default UI body font size in points.
pub const DEFAULT_FONT_SIZE: f32 = 14.5;

/// Minimum user-configurable UI font size (points).
pub const MIN_FONT_SIZE: f32 = 10.0;

/// Maximum user-configurable UI font size (points).
pub const MAX_FONT_SIZE: f32 = 24.0;

/// Initial window size in logical pixels.
pub const WINDOW_INNER_SIZE: [f32; 2] = [1500.0, 600.0];

/// Smallest window that still fits the five dropdowns and the action buttons.
pub const WINDOW_MIN_SIZE: [f32; 2] = [1200.0, 400.0];

// =============================================================================
// Logging
// =============================================================================

/// Default log level.
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Log levels accepted in config.toml.
pub const VALID_LOG_LEVELS: [&str; 5] = ["error", "warn", "info", "debug", "trace"];

// =============================================================================
// Configuration
// =============================================================================

/// Configuration file name.
pub const CONFIG_FILE_NAME: &str = "config.toml";
