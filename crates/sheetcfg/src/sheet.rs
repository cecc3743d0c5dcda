//! Sheet loading
//!
//! Loading runs in a fixed order: meta row, cell grid, title tree, then header
//! rows are stripped so that only body rows remain for the record cursor.

use crate::cursor::RecordCursor;
use crate::error::{Result, SheetError};
use crate::grid::{read_rows, row_tag, Cell, Grid, MergedRegion};
use crate::meta::{Meta, Orientation};
use crate::options::{LoadOptions, RowTagPolicy};
use crate::record::{Record, RecordDecoder};
use crate::title::{build_titles, TitleRef, TitleTree};
use sheetcfg_core::{CellValue, SheetReader};
use std::fmt;
use std::sync::Arc;

/// A loaded sheet: meta directives, title tree and body rows
///
/// A sheet is immutable once loaded. Records are read through
/// [`RecordCursor`]s, which borrow the sheet and keep their own position.
#[derive(Clone)]
pub struct Sheet {
    url: String,
    name: String,
    meta: Meta,
    grid: Grid,
    titles: TitleTree,
    header_rows: usize,
    header_only: bool,
    tags: Arc<dyn RowTagPolicy>,
}

impl Sheet {
    /// Load a sheet from a reader positioned before its first row
    ///
    /// Returns `Ok(None)` when the sheet does not start with a meta row; such
    /// sheets are not data sheets and should be skipped.
    ///
    /// ```
    /// use sheetcfg::{LoadOptions, Sheet};
    /// use sheetcfg_core::Worksheet;
    ///
    /// let raw = Worksheet::from_rows("items", vec![
    ///     vec!["##", "title_rows:2"],
    ///     vec!["#", "id", "name"],
    ///     vec!["", "key", "display name"],
    ///     vec!["", "1", "sword"],
    /// ]);
    /// let sheet = Sheet::load("items.xlsx", raw.reader(), &LoadOptions::default())
    ///     .unwrap()
    ///     .unwrap();
    /// let fields: Vec<_> = sheet.root_fields().map(|t| t.name()).collect();
    /// assert_eq!(fields, ["id", "name"]);
    /// assert_eq!(sheet.rows().len(), 1);
    /// ```
    pub fn load<R: SheetReader>(
        url: impl Into<String>,
        mut reader: R,
        options: &LoadOptions,
    ) -> Result<Option<Sheet>> {
        let url = url.into();
        let name = reader.name().to_string();

        let meta_row = reader.read().then(|| {
            (0..reader.field_count())
                .map(|col| reader.value(col))
                .collect::<Vec<CellValue>>()
        });
        let meta = match Meta::parse(meta_row.as_deref()) {
            Ok(meta) => meta,
            Err(e) if e.is_missing_marker() => {
                log::debug!("sheet '{name}' in {url} has no meta row, skipped");
                return Ok(None);
            }
            Err(e) => return Err(e),
        };

        let rows = read_rows(&mut reader, meta.orientation, options.header_only);
        if rows.is_empty() {
            return Err(SheetError::EmptySheet { sheet: name });
        }
        let mut grid = Grid::from_rows(rows, meta.orientation);

        let merges: Vec<MergedRegion> = reader
            .merged_regions()
            .iter()
            .filter_map(|range| MergedRegion::from_sheet_range(range, meta.orientation))
            .collect();
        let (titles, header_rows) = build_titles(&name, &grid, &merges)?;

        let strip = if options.header_only {
            header_rows
        } else {
            meta.title_rows + header_rows - 1
        };
        let stripped = grid.strip_leading(strip);
        if stripped < strip {
            log::warn!("sheet '{name}' is short: {stripped} of {strip} header rows");
        }
        if !options.header_only {
            let tags = &options.tags;
            grid.retain_rows(|row| !tags.is_ignored(row_tag(row).as_deref()));
        }

        log::debug!(
            "loaded sheet '{name}' ({:?}, header rows {header_rows}, title rows {}, body rows {})",
            meta.orientation,
            meta.title_rows,
            grid.len()
        );

        Ok(Some(Sheet {
            url,
            name,
            meta,
            grid,
            titles,
            header_rows,
            header_only: options.header_only,
            tags: Arc::clone(&options.tags),
        }))
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn meta(&self) -> &Meta {
        &self.meta
    }

    pub fn orientation(&self) -> Orientation {
        self.meta.orientation
    }

    /// Height of the header band the title tree was built from
    pub fn header_rows(&self) -> usize {
        self.header_rows
    }

    /// True when loaded in header-only mode
    pub fn is_header_only(&self) -> bool {
        self.header_only
    }

    pub fn title_tree(&self) -> &TitleTree {
        &self.titles
    }

    /// Top-level fields, left to right
    pub fn root_fields(&self) -> impl ExactSizeIterator<Item = TitleRef<'_>> + '_ {
        self.titles.root().children()
    }

    /// Rows left after the header rows were stripped
    ///
    /// In header-only mode these start with the description rows.
    pub fn rows(&self) -> &[Vec<Cell>] {
        self.grid.rows()
    }

    pub fn tags(&self) -> &dyn RowTagPolicy {
        self.tags.as_ref()
    }

    /// A fresh cursor over the body rows
    pub fn records(&self, multi_row: bool) -> RecordCursor<'_> {
        RecordCursor::new(self, multi_row)
    }

    /// Decode every record, stopping at the first error
    pub fn read_all<D: RecordDecoder>(
        &self,
        mut decoder: D,
        multi_row: bool,
    ) -> Result<Vec<Record<D::Output>>> {
        let mut cursor = self.records(multi_row);
        let mut records = Vec::new();
        while let Some(record) = cursor.read_one(&mut decoder)? {
            records.push(record);
        }
        Ok(records)
    }
}

impl fmt::Debug for Sheet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Sheet")
            .field("url", &self.url)
            .field("name", &self.name)
            .field("meta", &self.meta)
            .field("header_rows", &self.header_rows)
            .field("titles", &self.titles.root())
            .field("rows", &self.grid.len())
            .finish_non_exhaustive()
    }
}
