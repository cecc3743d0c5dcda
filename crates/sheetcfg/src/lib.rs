//! # sheetcfg
//!
//! Loads configuration tables authored as spreadsheets.
//!
//! A sheet starts with a meta row (`##` followed by `key:value` directives),
//! then header rows naming the fields, then description rows, then data. Merged
//! header cells group the header cells below them into nested fields. Records
//! usually take one row each; in multi-row mode a record continues over the
//! following rows as long as their main key column is blank.
//!
//! ## Features
//!
//! - Row-major and column-major sheets
//! - Nested field hierarchies from merged header cells
//! - Multi-row records and repeated sub-structures
//! - Caller-defined comment and test-only row tags
//!
//! ## Example
//!
//! ```rust
//! use sheetcfg::prelude::*;
//!
//! let mut raw = Worksheet::from_rows("items", vec![
//!     vec!["##", "title_rows:2"],
//!     vec!["", "id", "pos", "", "name"],
//!     vec!["", "", "x", "y", ""],
//!     vec!["", "key", "", "", "display name"],
//!     vec!["", "1", "3", "4", "sword"],
//!     vec!["##", "0", "0", "0", "commented out"],
//! ]);
//! raw.merge("A2:A3").unwrap();
//! raw.merge("C2:D2").unwrap();
//!
//! let sheet = Sheet::load("items.xlsx", raw.reader(), &LoadOptions::default())
//!     .unwrap()
//!     .expect("sheet has a meta row");
//!
//! let records = sheet
//!     .read_all(
//!         |row: &NamedRow<'_>| -> Result<(String, usize)> {
//!             let name = row.column("name", None, false)?.read()?.to_string();
//!             let pos = row.column("pos", None, false)?;
//!             Ok((name, pos.cells().len()))
//!         },
//!         false,
//!     )
//!     .unwrap();
//!
//! assert_eq!(records.len(), 1);
//! assert_eq!(records[0].data, ("sword".to_string(), 2));
//! ```

pub mod cursor;
pub mod error;
pub mod grid;
pub mod meta;
pub mod named_row;
pub mod options;
pub mod prelude;
pub mod record;
pub mod sheet;
pub mod stream;
pub mod title;

pub use cursor::{RecordCursor, MAIN_KEY_COLUMN};
pub use error::{MetaErrorKind, Result, SheetError};
pub use grid::{
    is_blank_range, is_blank_row, row_tag, transpose, Cell, Grid, MergedRegion, HEADER_SCAN_ROWS,
};
pub use meta::{Meta, Orientation, META_MARKER, TITLE_DEFAULT_ROWS, TITLE_MAX_ROWS, TITLE_MIN_ROWS};
pub use named_row::NamedRow;
pub use options::{LoadOptions, RowTagPolicy, TagConvention};
pub use record::{Record, RecordDecoder};
pub use sheet::Sheet;
pub use stream::CellStream;
pub use title::{build_titles, Title, TitleId, TitleRef, TitleTree, ROOT_TITLE_NAME};

// Re-export core types
pub use sheetcfg_core::{CellAddress, CellRange, CellValue, SheetReader, Worksheet};
