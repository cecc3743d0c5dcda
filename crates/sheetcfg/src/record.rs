//! Decoded records and the decoder seam

use crate::error::Result;
use crate::named_row::NamedRow;
use sheetcfg_core::CellAddress;

/// Turns one logical record into a typed value
///
/// Implemented for any `FnMut(&NamedRow) -> Result<T>`, so plain closures can
/// serve as decoders.
pub trait RecordDecoder {
    type Output;

    fn decode(&mut self, row: &NamedRow<'_>) -> Result<Self::Output>;
}

impl<T, F> RecordDecoder for F
where
    F: FnMut(&NamedRow<'_>) -> Result<T>,
{
    type Output = T;

    fn decode(&mut self, row: &NamedRow<'_>) -> Result<T> {
        self(row)
    }
}

/// A decoded record together with where it came from
#[derive(Debug, Clone, PartialEq)]
pub struct Record<T> {
    /// Decoded value
    pub data: T,
    /// Url of the sheet the record was read from
    pub source: String,
    /// Tag cell of the record's first physical row
    pub location: Option<CellAddress>,
    /// Record only exists in test builds
    pub is_test: bool,
}

impl<T> Record<T> {
    /// `url` or `url@A5`, for diagnostics
    pub fn source_location(&self) -> String {
        match self.location {
            Some(location) => format!("{}@{}", self.source, location),
            None => self.source.clone(),
        }
    }

    pub fn map<U, F: FnOnce(T) -> U>(self, f: F) -> Record<U> {
        Record {
            data: f(self.data),
            source: self.source,
            location: self.location,
            is_test: self.is_test,
        }
    }
}
