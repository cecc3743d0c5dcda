//! Cell grid
//!
//! The grid holds every physical row after the meta row, normalized so that
//! records always run along rows: column-major sheets are transposed while
//! loading. Column 0 of every row is the tag column (comments, ignore and
//! test markers) and never carries field data.

use crate::meta::Orientation;
use sheetcfg_core::{CellAddress, CellRange, CellValue, SheetReader};
use std::fmt;

/// In header-only mode, row-major sheets are read no further than this row
pub const HEADER_SCAN_ROWS: usize = 10;

/// A grid cell: a value plus the address it was read from
#[derive(Debug, Clone, PartialEq)]
pub struct Cell {
    /// Source address (row 0 is the meta row)
    pub address: CellAddress,
    /// Cell value
    pub value: CellValue,
}

impl Cell {
    /// Indices past the last sheet row or column pin to it
    pub fn new(row: usize, col: usize, value: CellValue) -> Self {
        Self {
            address: CellAddress::clamped(row, col),
            value,
        }
    }

    /// Placeholder for a cell missing from a ragged row
    pub fn empty(row: usize, col: usize) -> Self {
        Self::new(row, col, CellValue::Empty)
    }

    pub fn is_blank(&self) -> bool {
        self.value.is_blank()
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.address, self.value)
    }
}

/// Rows of cells, possibly ragged
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Grid {
    rows: Vec<Vec<Cell>>,
}

impl Grid {
    /// Read the remaining rows of `reader`, then orient them
    ///
    /// The reader must already be positioned past the meta row.
    pub fn read<R: SheetReader + ?Sized>(
        reader: &mut R,
        orientation: Orientation,
        header_only: bool,
    ) -> Self {
        Self::from_rows(read_rows(reader, orientation, header_only), orientation)
    }

    /// Build a grid from physical rows in sheet order
    pub fn from_rows(rows: Vec<Vec<Cell>>, orientation: Orientation) -> Self {
        match orientation {
            Orientation::RowMajor => Self { rows },
            Orientation::ColumnMajor => Self {
                rows: transpose(&rows),
            },
        }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn rows(&self) -> &[Vec<Cell>] {
        &self.rows
    }

    pub fn row(&self, index: usize) -> Option<&[Cell]> {
        self.rows.get(index).map(Vec::as_slice)
    }

    /// Length of the longest row
    pub fn width(&self) -> usize {
        self.rows.iter().map(Vec::len).max().unwrap_or(0)
    }

    /// Drop up to `count` leading rows, returning how many were removed
    pub(crate) fn strip_leading(&mut self, count: usize) -> usize {
        let count = count.min(self.rows.len());
        self.rows.drain(..count);
        count
    }

    pub(crate) fn retain_rows<F>(&mut self, mut keep: F)
    where
        F: FnMut(&[Cell]) -> bool,
    {
        self.rows.retain(|row| keep(row));
    }
}

/// Read the remaining physical rows of `reader`, in sheet order
pub(crate) fn read_rows<R: SheetReader + ?Sized>(
    reader: &mut R,
    orientation: Orientation,
    header_only: bool,
) -> Vec<Vec<Cell>> {
    let mut rows = Vec::new();
    let mut row_index = 0;
    while reader.read() {
        row_index += 1;
        // Headers never extend past the first rows of a row-major sheet
        if header_only && orientation.is_row_major() && row_index >= HEADER_SCAN_ROWS {
            break;
        }
        let row = (0..reader.field_count())
            .map(|col| Cell::new(row_index, col, reader.value(col)))
            .collect();
        rows.push(row);
    }
    rows
}

/// Swap rows and columns, padding short rows with empty cells
///
/// Row `i` of the result is column `i` of the input; every result row has one
/// cell per input row.
pub fn transpose(rows: &[Vec<Cell>]) -> Vec<Vec<Cell>> {
    let width = rows.iter().map(Vec::len).max().unwrap_or(0);
    (0..width)
        .map(|col| {
            rows.iter()
                .enumerate()
                .map(|(j, row)| {
                    row.get(col)
                        .cloned()
                        .unwrap_or_else(|| Cell::empty(j + 1, col))
                })
                .collect()
        })
        .collect()
}

/// True when every cell after the tag column is blank
pub fn is_blank_row(row: &[Cell]) -> bool {
    row.iter().skip(1).all(Cell::is_blank)
}

/// True when every cell in `from..=to` is blank, ignoring the tag column
pub fn is_blank_range(row: &[Cell], from: usize, to: usize) -> bool {
    first_value_in(row, from, to).is_none()
}

/// First non-blank cell in `from..=to`, ignoring the tag column
pub(crate) fn first_value_in(row: &[Cell], from: usize, to: usize) -> Option<&Cell> {
    let from = from.max(1);
    if from > to {
        return None;
    }
    row.iter()
        .take(to.saturating_add(1))
        .skip(from)
        .find(|cell| !cell.is_blank())
}

/// Trimmed text of the tag column
pub fn row_tag(row: &[Cell]) -> Option<String> {
    row.first().and_then(|cell| cell.value.text())
}

/// A merged region in grid coordinates
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MergedRegion {
    pub first_row: usize,
    pub last_row: usize,
    pub first_col: usize,
    pub last_col: usize,
}

impl MergedRegion {
    /// Map a reader's merged range onto the oriented grid
    ///
    /// Corners may come in any order. Ranges that touch the meta row have no
    /// grid counterpart.
    pub fn from_sheet_range(range: &CellRange, orientation: Orientation) -> Option<Self> {
        let range = CellRange::new(range.start, range.end);
        if range.start.row == 0 {
            return None;
        }
        let (rows, cols) = (
            (range.start.row as usize - 1, range.end.row as usize - 1),
            (range.start.col as usize, range.end.col as usize),
        );
        let ((first_row, last_row), (first_col, last_col)) = match orientation {
            Orientation::RowMajor => (rows, cols),
            Orientation::ColumnMajor => (cols, rows),
        };
        Some(Self {
            first_row,
            last_row,
            first_col,
            last_col,
        })
    }

    /// Rows covered, whichever way round the row bounds are
    pub fn height(&self) -> usize {
        self.last_row.abs_diff(self.first_row) + 1
    }

    /// True when the region's columns lie inside `from..=to`
    pub fn within_columns(&self, from: usize, to: usize) -> bool {
        self.first_col >= from && self.last_col <= to
    }
}
