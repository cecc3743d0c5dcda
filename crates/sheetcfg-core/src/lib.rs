//! Leaf types shared by sheetcfg and the format readers that feed it.
//!
//! A reader decodes one sheet of a workbook into [`CellValue`]s and merged
//! [`CellRange`]s and exposes them through [`SheetReader`]. [`Worksheet`] is
//! the in-memory implementation used by tests and by callers that already
//! hold decoded rows.
//!
//! ```rust
//! use sheetcfg_core::{CellValue, SheetReader, Worksheet};
//!
//! let mut sheet = Worksheet::new("items");
//! sheet.set_cell_value("A1", "##").unwrap();
//! sheet.set_cell_value_at(1, 1, "pos").unwrap();
//! sheet.merge("B2:C2").unwrap();
//!
//! let mut reader = sheet.reader();
//! assert!(reader.read());
//! assert_eq!(reader.value(0), CellValue::string("##"));
//! assert_eq!(reader.merged_regions()[0].to_string(), "B2:C2");
//! ```

pub mod cell;
pub mod error;
pub mod reader;
pub mod worksheet;

pub use cell::{CellAddress, CellError, CellRange, CellValue, SharedString};
pub use error::{Error, Result};
pub use reader::SheetReader;
pub use worksheet::{Worksheet, WorksheetReader};

/// Last addressable row + 1
pub const MAX_ROWS: u32 = 1_048_576;

/// Last addressable column + 1 ("XFD")
pub const MAX_COLS: u16 = 16_384;
