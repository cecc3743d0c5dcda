//! Error types for sheet loading and record reading

use sheetcfg_core::CellAddress;
use thiserror::Error;

/// Result type alias using [`SheetError`]
pub type Result<T> = std::result::Result<T, SheetError>;

/// Errors raised while loading a sheet or reading its records
///
/// Every variant is terminal for the sheet (or record) that raised it.
#[derive(Debug, Error)]
pub enum SheetError {
    /// Malformed or unrecognized meta directive
    #[error("Invalid meta attribute '{attribute}': {kind}")]
    InvalidMeta {
        attribute: String,
        kind: MetaErrorKind,
    },

    /// No rows after the meta row
    #[error("Sheet '{sheet}' has no rows")]
    EmptySheet { sheet: String },

    /// No header row to take field names from
    #[error("Sheet '{sheet}' has no field name row")]
    NoFieldsDefined { sheet: String },

    /// The header rows define no field at all
    #[error("Sheet '{sheet}' defines no columns")]
    NoColumnsDefined { sheet: String },

    /// Same title name claims two different column ranges
    #[error(
        "Duplicate title '{name}': columns {}..={} and {}..={}",
        .existing.0, .existing.1, .conflicting.0, .conflicting.1
    )]
    DuplicateTitle {
        name: String,
        existing: (usize, usize),
        conflicting: (usize, usize),
    },

    /// Requested field is absent from the title tree
    #[error("Missing column '{name}'")]
    MissingColumn { name: String },

    /// Single-row field carries data on a continuation row
    #[error("Field '{name}' is not a multi-row field, but {cell} has a value")]
    UnexpectedMultiRowValue { name: String, cell: CellAddress },

    /// Value stream read past its last cell
    #[error("Unexpected end of values{}", after(.location))]
    StreamExhausted { location: Option<CellAddress> },

    /// Raised by record decoders for values they cannot convert
    #[error("Cannot decode {}: {message}", at_or_record(.location))]
    Decode {
        location: Option<CellAddress>,
        message: String,
    },

    /// Core error
    #[error("Core error: {0}")]
    Core(#[from] sheetcfg_core::Error),
}

fn after(location: &Option<CellAddress>) -> String {
    location.map(|l| format!(" after {l}")).unwrap_or_default()
}

fn at_or_record(location: &Option<CellAddress>) -> String {
    location.map_or_else(|| "record".to_string(), |l| l.to_string())
}

impl SheetError {
    /// Create a decode error
    pub fn decode<S: Into<String>>(location: Option<CellAddress>, message: S) -> Self {
        SheetError::Decode {
            location,
            message: message.into(),
        }
    }

    pub(crate) fn invalid_meta<S: Into<String>>(attribute: S, kind: MetaErrorKind) -> Self {
        SheetError::InvalidMeta {
            attribute: attribute.into(),
            kind,
        }
    }

    /// True when the sheet simply does not start with a meta row
    pub fn is_missing_marker(&self) -> bool {
        matches!(
            self,
            SheetError::InvalidMeta {
                kind: MetaErrorKind::MissingMarker,
                ..
            }
        )
    }
}

/// Why a meta directive was rejected
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MetaErrorKind {
    /// Row 0 is absent, empty, or does not start with `##`
    #[error("meta row must start with '##'")]
    MissingMarker,

    /// Attribute is not a single `key:value` or `key=value` pair
    #[error("expected key:value or key=value")]
    MalformedAttribute,

    /// Unrecognized key
    #[error("unknown key '{0}', valid keys are orientation and title_rows")]
    UnknownKey(String),

    /// Orientation value outside both synonym sets
    #[error("orientation '{0}' must be row|r|landscape|l or column|c|portrait|p")]
    InvalidOrientation(String),

    /// title_rows value is not an integer
    #[error("title_rows '{0}' is not an integer")]
    InvalidTitleRows(String),

    /// title_rows value outside the allowed range
    #[error("title_rows {value} must be within [{min}, {max}]")]
    TitleRowsOutOfRange { value: i64, min: usize, max: usize },
}
