// Discount Card - util/error.rs
//
// Typed error hierarchy with context-preserving error chains.
// Every error keeps its cause so the operation boundary can log the full
// chain before turning it into a user-facing message.

use std::fmt;
use std::io;
use std::path::PathBuf;

/// Top-level error type for all Discount Card operations.
/// Errors are categorised by the subsystem that produced them.
#[derive(Debug)]
pub enum DiscountCardError {
    /// The provider store could not be opened or queried.
    Store(StoreError),

    /// A filter selection could not be applied.
    Filter(FilterError),

    /// Export operation failed.
    Export(ExportError),

    /// Configuration loading or validation failed.
    Config(ConfigError),
}

impl fmt::Display for DiscountCardError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Store(e) => write!(f, "Provider store error: {e}"),
            Self::Filter(e) => write!(f, "Filter error: {e}"),
            Self::Export(e) => write!(f, "Export error: {e}"),
            Self::Config(e) => write!(f, "Configuration error: {e}"),
        }
    }
}

impl std::error::Error for DiscountCardError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Store(e) => Some(e),
            Self::Filter(e) => Some(e),
            Self::Export(e) => Some(e),
            Self::Config(e) => Some(e),
        }
    }
}

// ---------------------------------------------------------------------------
// Store errors
// ---------------------------------------------------------------------------

/// Errors raised while opening or querying the provider store.
#[derive(Debug)]
pub enum StoreError {
    /// The database file could not be opened.
    Unreachable {
        path: PathBuf,
        source: rusqlite::Error,
    },

    /// The database opened but has no providers table.
    MissingTable { path: PathBuf, table: &'static str },

    /// A query against an open database failed.
    Query {
        path: PathBuf,
        source: rusqlite::Error,
    },
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unreachable { path, source } => {
                write!(f, "Cannot open database '{}': {source}", path.display())
            }
            Self::MissingTable { path, table } => write!(
                f,
                "Database '{}' has no '{table}' table",
                path.display()
            ),
            Self::Query { path, source } => {
                write!(f, "Query on '{}' failed: {source}", path.display())
            }
        }
    }
}

impl std::error::Error for StoreError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Unreachable { source, .. } => Some(source),
            Self::Query { source, .. } => Some(source),
            Self::MissingTable { .. } => None,
        }
    }
}

impl From<StoreError> for DiscountCardError {
    fn from(e: StoreError) -> Self {
        Self::Store(e)
    }
}

// ---------------------------------------------------------------------------
// Filter errors
// ---------------------------------------------------------------------------

/// Errors related to pinning or clearing a filter dimension.
#[derive(Debug)]
pub enum FilterError {
    /// Recomputing the downstream choice lists hit a store failure.
    Store(StoreError),

    /// The value is not among the current choices for the dimension.
    UnobservedValue {
        dimension: &'static str,
        value: String,
    },
}

impl fmt::Display for FilterError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Store(e) => write!(f, "{e}"),
            Self::UnobservedValue { dimension, value } => write!(
                f,
                "'{value}' is not an available {dimension} for the current filters"
            ),
        }
    }
}

impl std::error::Error for FilterError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Store(e) => Some(e),
            Self::UnobservedValue { .. } => None,
        }
    }
}

impl From<StoreError> for FilterError {
    fn from(e: StoreError) -> Self {
        Self::Store(e)
    }
}

impl From<FilterError> for DiscountCardError {
    fn from(e: FilterError) -> Self {
        Self::Filter(e)
    }
}

// ---------------------------------------------------------------------------
// Export errors
// ---------------------------------------------------------------------------

/// Errors related to export operations.
#[derive(Debug)]
pub enum ExportError {
    /// I/O error creating or writing the export file.
    Io { path: PathBuf, source: io::Error },

    /// Excel workbook serialisation error.
    Xlsx {
        path: PathBuf,
        source: rust_xlsxwriter::XlsxError,
    },

    /// CSV serialisation error.
    Csv { path: PathBuf, source: csv::Error },

    /// JSON serialisation error.
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },

    /// Export was requested with no displayed rows.
    NothingToExport,

    /// Every generated file name already existed in the target directory.
    NameExhausted { dir: PathBuf, attempts: usize },
}

impl fmt::Display for ExportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io { path, source } => {
                write!(f, "Export I/O error '{}': {source}", path.display())
            }
            Self::Xlsx { path, source } => {
                write!(f, "Excel export error '{}': {source}", path.display())
            }
            Self::Csv { path, source } => {
                write!(f, "CSV export error '{}': {source}", path.display())
            }
            Self::Json { path, source } => {
                write!(f, "JSON export error '{}': {source}", path.display())
            }
            Self::NothingToExport => write!(f, "No data to export"),
            Self::NameExhausted { dir, attempts } => write!(
                f,
                "Could not find an unused export file name in '{}' after {attempts} attempts",
                dir.display()
            ),
        }
    }
}

impl std::error::Error for ExportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Xlsx { source, .. } => Some(source),
            Self::Csv { source, .. } => Some(source),
            Self::Json { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl From<ExportError> for DiscountCardError {
    fn from(e: ExportError) -> Self {
        Self::Export(e)
    }
}

// ---------------------------------------------------------------------------
// Config errors
// ---------------------------------------------------------------------------

/// Errors related to configuration loading.
#[derive(Debug)]
pub enum ConfigError {
    /// TOML parsing failed.
    TomlParse {
        path: PathBuf,
        source: toml::de::Error,
    },

    /// A config value is out of the allowed range.
    ValueOutOfRange {
        field: String,
        value: String,
        expected: String,
    },

    /// I/O error reading config file.
    Io { path: PathBuf, source: io::Error },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TomlParse { path, source } => {
                write!(f, "Config parse error '{}': {source}", path.display())
            }
            Self::ValueOutOfRange {
                field,
                value,
                expected,
            } => write!(
                f,
                "Config '{field}' = '{value}' is out of range. Expected: {expected}"
            ),
            Self::Io { path, source } => {
                write!(f, "Config I/O error '{}': {source}", path.display())
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::TomlParse { source, .. } => Some(source),
            Self::Io { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl From<ConfigError> for DiscountCardError {
    fn from(e: ConfigError) -> Self {
        Self::Config(e)
    }
}

/// Convenience type alias for Discount Card results.
pub type Result<T> = std::result::Result<T, DiscountCardError>;
