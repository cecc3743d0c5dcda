//! Common imports for loading sheets and decoding records
//!
//! ```rust
//! use sheetcfg::prelude::*;
//! ```

// Loading
pub use crate::{LoadOptions, Meta, Orientation, RowTagPolicy, Sheet, TagConvention};

// Decoding
pub use crate::{CellStream, NamedRow, Record, RecordCursor, RecordDecoder, TitleRef};

// Errors
pub use crate::{Result, SheetError};

// Raw sheets
pub use crate::{CellAddress, CellValue, SheetReader, Worksheet};
