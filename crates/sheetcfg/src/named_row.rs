//! Title-bound views over physical rows

use crate::error::{Result, SheetError};
use crate::grid::{first_value_in, is_blank_range, Cell};
use crate::stream::CellStream;
use crate::title::TitleRef;

/// A title bound to the physical rows of one logical record
///
/// Decoders walk the title's children by name and pull value streams out of
/// the bound rows. Views borrow the sheet and are cheap to create.
#[derive(Debug, Clone)]
pub struct NamedRow<'s> {
    title: TitleRef<'s>,
    rows: Vec<&'s [Cell]>,
}

impl<'s> NamedRow<'s> {
    pub fn new(title: TitleRef<'s>, rows: Vec<&'s [Cell]>) -> Self {
        Self { title, rows }
    }

    pub fn single(title: TitleRef<'s>, row: &'s [Cell]) -> Self {
        Self::new(title, vec![row])
    }

    /// The title this view is bound to
    pub fn self_title(&self) -> TitleRef<'s> {
        self.title
    }

    pub fn rows(&self) -> &[&'s [Cell]] {
        &self.rows
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// First physical row of the record
    pub fn first_row(&self) -> &'s [Cell] {
        self.rows.first().copied().unwrap_or(&[])
    }

    /// Child titles, left to right
    pub fn titles(&self) -> impl ExactSizeIterator<Item = TitleRef<'s>> + 's {
        self.title.children()
    }

    pub fn title(&self, name: &str) -> Option<TitleRef<'s>> {
        self.title.child(name)
    }

    /// Value stream of a single-row field
    ///
    /// Fails with [`SheetError::MissingColumn`] when `name` is not a child
    /// title, and with [`SheetError::UnexpectedMultiRowValue`] when a
    /// continuation row has data inside the field's columns.
    pub fn column(&self, name: &str, separator: Option<&str>, named: bool) -> Result<CellStream> {
        let title = self.require(name)?;
        self.check_single_row(title)?;
        Ok(CellStream::new(columns_of(self.first_row(), title), separator, named))
    }

    /// View of a single-row sub-structure, bound to the first row
    pub fn sub_tree(&self, name: &str) -> Result<NamedRow<'s>> {
        let title = self.require(name)?;
        self.check_single_row(title)?;
        Ok(NamedRow::single(title, self.first_row()))
    }

    /// View of a multi-row sub-structure, bound to every row of the record
    pub fn sub_tree_rows(&self, name: &str) -> Result<NamedRow<'s>> {
        let title = self.require(name)?;
        Ok(NamedRow::new(title, self.rows.clone()))
    }

    /// One view per physical row that has data inside this title's columns
    pub fn expand_rows(&self) -> impl Iterator<Item = NamedRow<'s>> + '_ {
        let title = self.title;
        self.rows
            .iter()
            .copied()
            .filter(move |row| !is_blank_range(row, title.from_column(), title.to_column()))
            .map(move |row| NamedRow::single(title, row))
    }

    /// One value stream per physical row that has data inside the field
    pub fn column_across_rows(
        &self,
        name: &str,
        separator: Option<&str>,
    ) -> Result<Vec<CellStream>> {
        let title = self.require(name)?;
        Ok(self
            .rows
            .iter()
            .filter(|row| !is_blank_range(row, title.from_column(), title.to_column()))
            .map(|row| CellStream::new(columns_of(row, title), separator, false))
            .collect())
    }

    /// Non-blank cells of the field across every row, as one stream
    pub fn flattened_column(&self, name: &str, separator: Option<&str>) -> Result<CellStream> {
        let title = self.require(name)?;
        let cells = self
            .rows
            .iter()
            .flat_map(|row| columns_of(row, title))
            .filter(|cell| !cell.is_blank());
        Ok(CellStream::new(cells, separator, false))
    }

    fn require(&self, name: &str) -> Result<TitleRef<'s>> {
        self.title(name).ok_or_else(|| SheetError::MissingColumn {
            name: name.to_string(),
        })
    }

    fn check_single_row(&self, title: TitleRef<'_>) -> Result<()> {
        for row in self.rows.iter().skip(1) {
            if let Some(cell) = first_value_in(row, title.from_column(), title.to_column()) {
                return Err(SheetError::UnexpectedMultiRowValue {
                    name: title.name().to_string(),
                    cell: cell.address,
                });
            }
        }
        Ok(())
    }
}

fn columns_of<'r>(row: &'r [Cell], title: TitleRef<'_>) -> &'r [Cell] {
    let from = title.from_column().min(row.len());
    let to = title.to_column().saturating_add(1).min(row.len());
    &row[from..to.max(from)]
}
