//! In-memory raw sheet and its [`SheetReader`]

use crate::cell::{CellAddress, CellRange, CellValue};
use crate::error::{Error, Result};
use crate::reader::SheetReader;
use crate::{MAX_COLS, MAX_ROWS};

/// Ragged rows of values plus merge geometry
///
/// This is what a format reader would produce after decoding a file, and what
/// tests build sheets from. Rows keep the length they were given and are
/// never padded past their last written cell.
#[derive(Debug, Clone, Default)]
pub struct Worksheet {
    name: String,
    rows: Vec<Vec<CellValue>>,
    // insertion order, sheet coordinates
    merged: Vec<CellRange>,
}

impl Worksheet {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Sheet from literal rows, the first of which is row 1 ("A1")
    ///
    /// ```
    /// use sheetcfg_core::{CellValue, Worksheet};
    ///
    /// let sheet = Worksheet::from_rows("items", vec![
    ///     vec!["##"],
    ///     vec!["#", "id", "name"],
    /// ]);
    /// assert_eq!(sheet.row_count(), 2);
    /// assert_eq!(sheet.get_value("C2").unwrap(), CellValue::string("name"));
    /// ```
    pub fn from_rows<S, I, R, V>(name: S, rows: I) -> Self
    where
        S: Into<String>,
        I: IntoIterator<Item = R>,
        R: IntoIterator<Item = V>,
        V: Into<CellValue>,
    {
        let rows = rows
            .into_iter()
            .map(|row| row.into_iter().map(Into::into).collect())
            .collect();
        Self {
            name: name.into(),
            rows,
            merged: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn row(&self, row: u32) -> Option<&[CellValue]> {
        self.rows.get(row as usize).map(Vec::as_slice)
    }

    /// Value at 0-based indices; cells never written read as `Empty`
    pub fn get_value_at(&self, row: u32, col: u16) -> CellValue {
        self.row(row)
            .and_then(|cells| cells.get(usize::from(col)))
            .cloned()
            .unwrap_or_default()
    }

    pub fn get_value(&self, address: &str) -> Result<CellValue> {
        let CellAddress { row, col } = address.parse::<CellAddress>()?;
        Ok(self.get_value_at(row, col))
    }

    pub fn set_cell_value(&mut self, address: &str, value: impl Into<CellValue>) -> Result<()> {
        let CellAddress { row, col } = address.parse::<CellAddress>()?;
        self.set_cell_value_at(row, col, value)
    }

    /// Write one cell, growing the sheet to reach it
    pub fn set_cell_value_at(
        &mut self,
        row: u32,
        col: u16,
        value: impl Into<CellValue>,
    ) -> Result<()> {
        if row >= MAX_ROWS {
            return Err(Error::RowOutOfBounds {
                row,
                max: MAX_ROWS - 1,
            });
        }
        if col >= MAX_COLS {
            return Err(Error::ColumnOutOfBounds {
                col: u32::from(col),
                max: MAX_COLS - 1,
            });
        }

        let (row, col) = (row as usize, usize::from(col));
        if row >= self.rows.len() {
            self.rows.resize_with(row + 1, Vec::new);
        }
        let cells = &mut self.rows[row];
        if col >= cells.len() {
            cells.resize(col + 1, CellValue::Empty);
        }
        cells[col] = value.into();
        Ok(())
    }

    /// Smallest range holding every non-blank cell
    pub fn used_range(&self) -> Option<CellRange> {
        let filled = self.rows.iter().enumerate().flat_map(|(r, row)| {
            row.iter()
                .enumerate()
                .filter(|(_, value)| !value.is_blank())
                .map(move |(c, _)| CellAddress::clamped(r, c))
        });
        filled.fold(None, |range: Option<CellRange>, cell| {
            Some(match range {
                None => CellRange::new(cell, cell),
                Some(r) => CellRange::from_indices(
                    r.start.row.min(cell.row),
                    r.start.col.min(cell.col),
                    r.end.row.max(cell.row),
                    r.end.col.max(cell.col),
                ),
            })
        })
    }

    pub fn merged_regions(&self) -> &[CellRange] {
        &self.merged
    }

    /// Record a merged region; it may not overlap one already recorded
    pub fn merge_cells(&mut self, range: &CellRange) -> Result<()> {
        if let Some(existing) = self.merged.iter().find(|m| m.overlaps(range)) {
            return Err(Error::MergedCellConflict {
                range: *range,
                existing: *existing,
            });
        }
        self.merged.push(*range);
        Ok(())
    }

    /// [`merge_cells`](Self::merge_cells) with an A1 range such as "C2:D2"
    pub fn merge(&mut self, range: &str) -> Result<()> {
        self.merge_cells(&range.parse::<CellRange>()?)
    }

    /// A reader positioned before the first row
    pub fn reader(&self) -> WorksheetReader<'_> {
        WorksheetReader {
            sheet: self,
            current: None,
        }
    }
}

/// [`SheetReader`] over a borrowed [`Worksheet`]
#[derive(Debug, Clone)]
pub struct WorksheetReader<'a> {
    sheet: &'a Worksheet,
    current: Option<usize>,
}

impl WorksheetReader<'_> {
    fn current_row(&self) -> &[CellValue] {
        self.current
            .and_then(|row| self.sheet.rows.get(row))
            .map_or(&[][..], Vec::as_slice)
    }
}

impl SheetReader for WorksheetReader<'_> {
    fn name(&self) -> &str {
        &self.sheet.name
    }

    fn read(&mut self) -> bool {
        let next = self.current.map_or(0, |row| row + 1);
        let total = self.sheet.rows.len();
        self.current = Some(next.min(total));
        next < total
    }

    fn field_count(&self) -> usize {
        self.current_row().len()
    }

    fn value(&self, column: usize) -> CellValue {
        self.current_row().get(column).cloned().unwrap_or_default()
    }

    fn merged_regions(&self) -> &[CellRange] {
        &self.sheet.merged
    }
}
