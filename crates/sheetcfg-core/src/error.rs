//! Errors raised by addresses and the in-memory worksheet

use crate::cell::CellRange;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    #[error("'{0}' is not an A1 cell address")]
    InvalidAddress(String),

    #[error("'{0}' is not an A1 range")]
    InvalidRange(String),

    #[error("Row {row} is past the last sheet row {max}")]
    RowOutOfBounds { row: u32, max: u32 },

    #[error("Column {col} is past the last sheet column {max}")]
    ColumnOutOfBounds { col: u32, max: u16 },

    /// Merged regions may not share a cell
    #[error("Range {range} overlaps merged region {existing}")]
    MergedCellConflict {
        range: CellRange,
        existing: CellRange,
    },
}
