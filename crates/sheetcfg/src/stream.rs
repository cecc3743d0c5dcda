//! Value streams handed to record decoders

use crate::error::{Result, SheetError};
use crate::grid::Cell;
use sheetcfg_core::{CellAddress, CellValue};

/// Forward-only sequence of cell values for one field
///
/// With a separator, every string cell is split on any of the separator's
/// characters into trimmed, non-empty tokens that keep the cell's address. A
/// string cell without any token becomes a single blank value.
///
/// Blank values are skipped by [`read`](CellStream::read) unless the stream is
/// in named mode, where each cell stands for a declared field and a blank cell
/// is a value of its own.
#[derive(Debug, Clone)]
pub struct CellStream {
    cells: Vec<Cell>,
    named: bool,
    position: usize,
    last_read: Option<CellAddress>,
}

impl CellStream {
    pub fn new<'c, I>(cells: I, separator: Option<&str>, named: bool) -> Self
    where
        I: IntoIterator<Item = &'c Cell>,
    {
        let separator = separator.filter(|s| !s.is_empty());
        let mut tokens = Vec::new();
        for cell in cells {
            match (separator, cell.value.as_string()) {
                (Some(sep), Some(text)) => {
                    let before = tokens.len();
                    tokens.extend(
                        text.split(|c: char| sep.contains(c))
                            .map(str::trim)
                            .filter(|t| !t.is_empty())
                            .map(|t| Cell {
                                address: cell.address,
                                value: CellValue::string(t),
                            }),
                    );
                    if tokens.len() == before {
                        tokens.push(Cell {
                            address: cell.address,
                            value: CellValue::Empty,
                        });
                    }
                }
                _ => tokens.push(cell.clone()),
            }
        }
        Self {
            cells: tokens,
            named,
            position: 0,
            last_read: None,
        }
    }

    pub fn is_named(&self) -> bool {
        self.named
    }

    /// All cells of the stream, read or not
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Cells not read yet, blanks included
    pub fn remaining(&self) -> usize {
        self.cells.len() - self.position
    }

    /// Next value, failing with [`SheetError::StreamExhausted`] at the end
    pub fn read(&mut self) -> Result<CellValue> {
        self.read_cell().map(|cell| cell.value.clone())
    }

    /// Next cell, with the same skipping rules as [`read`](CellStream::read)
    pub fn read_cell(&mut self) -> Result<&Cell> {
        if !self.named {
            self.skip_blanks();
        }
        match self.cells.get(self.position) {
            Some(cell) => {
                self.position += 1;
                self.last_read = Some(cell.address);
                Ok(cell)
            }
            None => Err(SheetError::StreamExhausted {
                location: self.last_read,
            }),
        }
    }

    /// Skip blank values and report whether nothing is left
    pub fn try_read_eof(&mut self) -> bool {
        self.skip_blanks();
        self.position >= self.cells.len()
    }

    /// Address of the cell read last
    pub fn last_read_location(&self) -> Option<CellAddress> {
        self.last_read
    }

    fn skip_blanks(&mut self) {
        while self.cells.get(self.position).is_some_and(Cell::is_blank) {
            self.position += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn row(values: &[CellValue]) -> Vec<Cell> {
        values
            .iter()
            .enumerate()
            .map(|(c, v)| Cell::new(4, c, v.clone()))
            .collect()
    }

    #[test]
    fn test_read_skips_blanks() {
        let cells = row(&[
            CellValue::Number(1.0),
            CellValue::Empty,
            CellValue::string(" "),
            CellValue::string("a"),
        ]);
        let mut stream = CellStream::new(&cells, None, false);

        assert_eq!(stream.read().unwrap(), CellValue::Number(1.0));
        assert_eq!(stream.read().unwrap(), CellValue::string("a"));
        assert_eq!(stream.last_read_location(), Some(CellAddress::new(4, 3)));
        assert!(stream.try_read_eof());

        match stream.read() {
            Err(SheetError::StreamExhausted { location }) => {
                assert_eq!(location, Some(CellAddress::new(4, 3)))
            }
            other => panic!("expected StreamExhausted, got {:?}", other),
        }
    }

    #[test]
    fn test_named_mode_keeps_blanks() {
        let cells = row(&[CellValue::Empty, CellValue::Number(2.0)]);
        let mut stream = CellStream::new(&cells, None, true);

        assert!(stream.is_named());
        assert_eq!(stream.remaining(), 2);
        assert_eq!(stream.read().unwrap(), CellValue::Empty);
        assert_eq!(stream.read().unwrap(), CellValue::Number(2.0));
        assert_eq!(stream.remaining(), 0);
    }

    #[test]
    fn test_separator_splits_string_cells() {
        let cells = row(&[
            CellValue::string("1, 2;3"),
            CellValue::Number(4.0),
            CellValue::string(",,"),
        ]);
        let mut stream = CellStream::new(&cells, Some(",;"), false);

        let values: Vec<String> = std::iter::from_fn(|| stream.read().ok())
            .map(|v| v.to_string())
            .collect();
        assert_eq!(values, vec!["1", "2", "3", "4"]);
        assert_eq!(stream.cells().len(), 5);
        assert!(stream.cells()[4].is_blank());
        assert_eq!(stream.cells()[1].address, CellAddress::new(4, 0));
    }

    #[test]
    fn test_empty_separator_is_ignored() {
        let cells = row(&[CellValue::string("a,b")]);
        let mut stream = CellStream::new(&cells, Some(""), false);
        assert_eq!(stream.read().unwrap(), CellValue::string("a,b"));
        assert!(stream.try_read_eof());
    }
}
