// Discount Card - core/model.rs
//
// Core data types: provider records, filter dimensions, choices and the
// five-field selection. No I/O.

use crate::util::constants::UNCONSTRAINED_LABEL;
use serde::Serialize;
use std::fmt;

// =============================================================================
// Provider record
// =============================================================================

/// One row of the provider catalog.
///
/// Every attribute may be absent in the source table. Records are read-only:
/// the application never creates or mutates them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ProviderRecord {
    pub provider_name: Option<String>,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub hotline: Option<String>,
    pub agreed_prices: Option<String>,

    pub governorate: Option<String>,
    pub area: Option<String>,
    pub provider_type: Option<String>,
    pub main_specialty: Option<String>,
    pub sub_specialty: Option<String>,
}

impl ProviderRecord {
    /// The value this record holds for a filter dimension.
    pub fn attribute(&self, dimension: Dimension) -> Option<&str> {
        match dimension {
            Dimension::Governorate => self.governorate.as_deref(),
            Dimension::Area => self.area.as_deref(),
            Dimension::ProviderType => self.provider_type.as_deref(),
            Dimension::MainSpecialty => self.main_specialty.as_deref(),
            Dimension::SubSpecialty => self.sub_specialty.as_deref(),
        }
    }

    /// The five displayed/exported cells, absent values rendered as "".
    ///
    /// Order matches `constants::EXPORT_HEADERS`.
    pub fn display_cells(&self) -> [&str; 5] {
        [
            self.provider_name.as_deref().unwrap_or(""),
            self.address.as_deref().unwrap_or(""),
            self.phone.as_deref().unwrap_or(""),
            self.hotline.as_deref().unwrap_or(""),
            self.agreed_prices.as_deref().unwrap_or(""),
        ]
    }
}

// =============================================================================
// Dimension
// =============================================================================

/// A filterable provider attribute.
///
/// The declaration order is the cascade order: a dimension's choices depend
/// only on the dimensions declared before it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Dimension {
    Governorate,
    Area,
    ProviderType,
    MainSpecialty,
    SubSpecialty,
}

impl Dimension {
    /// All dimensions in cascade order.
    pub const ALL: [Dimension; 5] = [
        Dimension::Governorate,
        Dimension::Area,
        Dimension::ProviderType,
        Dimension::MainSpecialty,
        Dimension::SubSpecialty,
    ];

    /// Position in the cascade (0 = governorate).
    pub fn index(self) -> usize {
        self as usize
    }

    /// Column name in the providers table.
    pub fn column(self) -> &'static str {
        match self {
            Self::Governorate => "governorate",
            Self::Area => "area",
            Self::ProviderType => "provider_type",
            Self::MainSpecialty => "main_specialty",
            Self::SubSpecialty => "sub_specialty",
        }
    }

    /// Human-readable label for dropdowns and messages.
    pub fn label(self) -> &'static str {
        match self {
            Self::Governorate => "Governorate",
            Self::Area => "Area",
            Self::ProviderType => "Provider Type",
            Self::MainSpecialty => "Main Specialty",
            Self::SubSpecialty => "Sub Specialty",
        }
    }

    /// Dimensions strictly before this one.
    pub fn upstream(self) -> &'static [Dimension] {
        let all: &'static [Dimension; 5] = &Self::ALL;
        &all[..self.index()]
    }

    /// Dimensions strictly after this one.
    pub fn downstream(self) -> &'static [Dimension] {
        let all: &'static [Dimension; 5] = &Self::ALL;
        &all[self.index() + 1..]
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// =============================================================================
// Choice
// =============================================================================

/// One entry in a dimension's dropdown.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Choice {
    /// No filter on this dimension.
    All,
    /// Pin the dimension to this observed value.
    Value(String),
}

impl Choice {
    /// Text shown in the dropdown.
    pub fn label(&self) -> &str {
        match self {
            Self::All => UNCONSTRAINED_LABEL,
            Self::Value(v) => v,
        }
    }

    /// The pinned value, or None for the unconstrained sentinel.
    pub fn as_value(&self) -> Option<&str> {
        match self {
            Self::All => None,
            Self::Value(v) => Some(v),
        }
    }
}

impl From<Option<&str>> for Choice {
    fn from(value: Option<&str>) -> Self {
        match value {
            Some(v) => Self::Value(v.to_string()),
            None => Self::All,
        }
    }
}

// =============================================================================
// Selection
// =============================================================================

/// Current filter state: each dimension unconstrained (None) or pinned.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    pinned: [Option<String>; 5],
}

impl Selection {
    /// The value a dimension is pinned to, if any.
    pub fn get(&self, dimension: Dimension) -> Option<&str> {
        self.pinned[dimension.index()].as_deref()
    }

    /// Pin a dimension, or clear it with `None`. Other dimensions are
    /// untouched; the cascade lives in the session.
    pub fn set(&mut self, dimension: Dimension, value: Option<String>) {
        self.pinned[dimension.index()] = value;
    }

    /// Builder form of `set`, mostly for tests and fixtures.
    pub fn with(mut self, dimension: Dimension, value: &str) -> Self {
        self.set(dimension, Some(value.to_string()));
        self
    }

    /// Reset every dimension after `dimension` to unconstrained.
    pub fn clear_downstream(&mut self, dimension: Dimension) {
        for d in dimension.downstream() {
            self.pinned[d.index()] = None;
        }
    }

    /// True when no dimension is pinned.
    pub fn is_unconstrained(&self) -> bool {
        self.pinned.iter().all(Option::is_none)
    }

    /// Pinned dimensions in cascade order.
    pub fn pinned(&self) -> impl Iterator<Item = (Dimension, &str)> + '_ {
        Dimension::ALL
            .into_iter()
            .filter_map(|d| self.get(d).map(|v| (d, v)))
    }
}
