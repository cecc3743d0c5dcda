//! Meta directive row
//!
//! Row 0 of every sheet is a directive line: the literal marker `##` in the
//! first cell, followed by `key:value` (or `key=value`) attributes, one per
//! cell. Recognized keys are `orientation` and `title_rows`.

use crate::error::{MetaErrorKind, Result, SheetError};
use sheetcfg_core::CellValue;

/// Marker that must open the meta row
pub const META_MARKER: &str = "##";

/// Smallest accepted `title_rows`
pub const TITLE_MIN_ROWS: usize = 2;

/// Largest accepted `title_rows`
pub const TITLE_MAX_ROWS: usize = 10;

/// `title_rows` when the directive is absent: field names, description, comment
pub const TITLE_DEFAULT_ROWS: usize = 3;

/// Direction in which records are laid out
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Orientation {
    /// One record per row, fields across columns
    #[default]
    RowMajor,
    /// One record per column, fields down rows
    ColumnMajor,
}

impl Orientation {
    /// Parse an orientation token (case-insensitive)
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "row" | "r" | "landscape" | "l" => Some(Orientation::RowMajor),
            "column" | "c" | "portrait" | "p" => Some(Orientation::ColumnMajor),
            _ => None,
        }
    }

    pub fn is_row_major(&self) -> bool {
        matches!(self, Orientation::RowMajor)
    }
}

/// Directives parsed from the meta row
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Meta {
    /// Record direction
    pub orientation: Orientation,
    /// Header plus description rows that precede the data
    pub title_rows: usize,
}

impl Default for Meta {
    fn default() -> Self {
        Self {
            orientation: Orientation::RowMajor,
            title_rows: TITLE_DEFAULT_ROWS,
        }
    }
}

impl Meta {
    /// Parse the meta row
    ///
    /// `None` or an empty row, as well as a first cell other than `##`, fail
    /// with [`MetaErrorKind::MissingMarker`]. Blank attribute cells are skipped.
    ///
    /// ```
    /// use sheetcfg::{Meta, Orientation};
    /// use sheetcfg_core::CellValue;
    ///
    /// let row = vec![
    ///     CellValue::string("##"),
    ///     CellValue::string("orientation=Portrait"),
    ///     CellValue::string("title_rows:4"),
    /// ];
    /// let meta = Meta::parse(Some(row.as_slice())).unwrap();
    /// assert_eq!(meta.orientation, Orientation::ColumnMajor);
    /// assert_eq!(meta.title_rows, 4);
    /// ```
    pub fn parse(row: Option<&[CellValue]>) -> Result<Meta> {
        let row = match row {
            Some(row) if !row.is_empty() => row,
            _ => return Err(SheetError::invalid_meta("", MetaErrorKind::MissingMarker)),
        };

        if row[0].as_string() != Some(META_MARKER) {
            return Err(SheetError::invalid_meta(
                row[0].to_string(),
                MetaErrorKind::MissingMarker,
            ));
        }

        let mut meta = Meta::default();
        for attribute in row[1..].iter().filter_map(CellValue::text) {
            meta.apply(&attribute)?;
        }
        Ok(meta)
    }

    fn apply(&mut self, attribute: &str) -> Result<()> {
        let parts: Vec<&str> = attribute.split([':', '=']).collect();
        let (key, value) = match parts.as_slice() {
            [key, value] => (
                key.trim().to_lowercase(),
                value.trim().to_lowercase(),
            ),
            _ => {
                return Err(SheetError::invalid_meta(
                    attribute,
                    MetaErrorKind::MalformedAttribute,
                ))
            }
        };

        match key.as_str() {
            "orientation" => {
                self.orientation = Orientation::parse(&value).ok_or_else(|| {
                    SheetError::invalid_meta(attribute, MetaErrorKind::InvalidOrientation(value))
                })?;
            }
            "title_rows" => {
                let rows: i64 = value.parse().map_err(|_| {
                    let kind = MetaErrorKind::InvalidTitleRows(value.clone());
                    SheetError::invalid_meta(attribute, kind)
                })?;
                if rows < TITLE_MIN_ROWS as i64 || rows > TITLE_MAX_ROWS as i64 {
                    return Err(SheetError::invalid_meta(
                        attribute,
                        MetaErrorKind::TitleRowsOutOfRange {
                            value: rows,
                            min: TITLE_MIN_ROWS,
                            max: TITLE_MAX_ROWS,
                        },
                    ));
                }
                self.title_rows = rows as usize;
            }
            _ => {
                return Err(SheetError::invalid_meta(
                    attribute,
                    MetaErrorKind::UnknownKey(key),
                ))
            }
        }
        Ok(())
    }
}
