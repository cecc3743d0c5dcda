//! Raw sheet reader interface
//!
//! Format readers (xlsx, xls, csv, ...) live outside this workspace. They hand
//! a sheet over through [`SheetReader`]: forward-only row access, per-cell
//! values, and the sheet's merged regions.

use crate::cell::{CellRange, CellValue};

/// Forward-only access to the rows of one sheet
///
/// The reader starts positioned before the first row. Each call to
/// [`read`](SheetReader::read) advances to the next physical row; the first
/// row read is row 0, the meta directive row.
pub trait SheetReader {
    /// Name of the sheet being read
    fn name(&self) -> &str;

    /// Advance to the next row. Returns `false` once the sheet is exhausted.
    fn read(&mut self) -> bool;

    /// Number of fields in the current row
    fn field_count(&self) -> usize;

    /// Value of a field in the current row, `CellValue::Empty` past the end
    fn value(&self, column: usize) -> CellValue;

    /// Merged regions in sheet coordinates (row 0 is the meta row)
    fn merged_regions(&self) -> &[CellRange];
}

impl<R: SheetReader + ?Sized> SheetReader for &mut R {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn read(&mut self) -> bool {
        (**self).read()
    }

    fn field_count(&self) -> usize {
        (**self).field_count()
    }

    fn value(&self, column: usize) -> CellValue {
        (**self).value(column)
    }

    fn merged_regions(&self) -> &[CellRange] {
        (**self).merged_regions()
    }
}
