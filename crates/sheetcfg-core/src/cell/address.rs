//! A1-style cell addresses and merge rectangles

use crate::error::{Error, Result};
use crate::{MAX_COLS, MAX_ROWS};
use std::fmt;
use std::str::FromStr;

/// Position of a cell, 0-based on both axes
///
/// Displays in A1 notation. Row 0 of a sheet is the meta directive row, so the
/// first header row of a sheet is "A2".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CellAddress {
    pub row: u32,
    pub col: u16,
}

impl CellAddress {
    pub fn new(row: u32, col: u16) -> Self {
        Self { row, col }
    }

    /// Address of grid indices, pinned to the last sheet row or column
    /// when an index lies past it
    pub fn clamped(row: usize, col: usize) -> Self {
        let (last_row, last_col) = (MAX_ROWS - 1, MAX_COLS - 1);
        let row = u32::try_from(row).map_or(last_row, |r| r.min(last_row));
        let col = u16::try_from(col).map_or(last_col, |c| c.min(last_col));
        Self { row, col }
    }

    /// Parse A1 notation; `$` anchors are ignored
    ///
    /// ```
    /// use sheetcfg_core::CellAddress;
    ///
    /// assert_eq!(CellAddress::parse("A1").unwrap(), CellAddress::new(0, 0));
    /// assert_eq!(CellAddress::parse("$B$2").unwrap(), CellAddress::new(1, 1));
    /// ```
    pub fn parse(s: &str) -> Result<Self> {
        let trimmed = s.trim();
        let bare: String = trimmed.chars().filter(|&c| c != '$').collect();
        let split = bare
            .find(|c: char| !c.is_ascii_alphabetic())
            .unwrap_or(bare.len());
        let (letters, digits) = bare.split_at(split);
        if letters.is_empty() || digits.is_empty() {
            return Err(Error::InvalidAddress(trimmed.to_string()));
        }

        let col = Self::letters_to_column(letters)?;
        let row = match digits.parse::<u32>() {
            Ok(n) if n >= 1 => n - 1,
            _ => return Err(Error::InvalidAddress(trimmed.to_string())),
        };
        if row >= MAX_ROWS {
            return Err(Error::RowOutOfBounds {
                row,
                max: MAX_ROWS - 1,
            });
        }
        Ok(Self { row, col })
    }

    /// Column letters of a 0-based index: 0 is "A", 26 is "AA"
    pub fn column_to_letters(col: u16) -> String {
        let mut letters = Vec::new();
        let mut n = u32::from(col) + 1;
        while n > 0 {
            let rem = (n - 1) % 26;
            letters.push(char::from(b'A' + rem as u8));
            n = (n - 1) / 26;
        }
        letters.iter().rev().collect()
    }

    /// 0-based index of column letters, case-insensitive
    pub fn letters_to_column(letters: &str) -> Result<u16> {
        if letters.is_empty() {
            return Err(Error::InvalidAddress(letters.to_string()));
        }
        let mut index: u32 = 0;
        for c in letters.chars() {
            if !c.is_ascii_alphabetic() {
                return Err(Error::InvalidAddress(letters.to_string()));
            }
            index = index * 26 + u32::from(c.to_ascii_uppercase() as u8 - b'A') + 1;
            if index > u32::from(MAX_COLS) {
                return Err(Error::ColumnOutOfBounds {
                    col: index - 1,
                    max: MAX_COLS - 1,
                });
            }
        }
        Ok((index - 1) as u16)
    }
}

impl fmt::Display for CellAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", Self::column_to_letters(self.col), self.row + 1)
    }
}

impl FromStr for CellAddress {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

/// Inclusive rectangle between two corners
///
/// Readers report merged regions with this type, in sheet coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CellRange {
    /// Top-left corner
    pub start: CellAddress,
    /// Bottom-right corner
    pub end: CellAddress,
}

impl CellRange {
    /// Range spanning two corners given in any order
    pub fn new(a: CellAddress, b: CellAddress) -> Self {
        Self {
            start: CellAddress::new(a.row.min(b.row), a.col.min(b.col)),
            end: CellAddress::new(a.row.max(b.row), a.col.max(b.col)),
        }
    }

    pub fn from_indices(start_row: u32, start_col: u16, end_row: u32, end_col: u16) -> Self {
        Self::new(
            CellAddress::new(start_row, start_col),
            CellAddress::new(end_row, end_col),
        )
    }

    /// Parse "B2:C3", or "B2" for a single cell
    pub fn parse(s: &str) -> Result<Self> {
        let mut corners = s.trim().split(':');
        let first = CellAddress::parse(corners.next().unwrap_or_default())?;
        let second = match corners.next() {
            Some(corner) => CellAddress::parse(corner)?,
            None => first,
        };
        if corners.next().is_some() {
            return Err(Error::InvalidRange(s.trim().to_string()));
        }
        Ok(Self::new(first, second))
    }

    /// Corners may be in any order on either range
    pub fn overlaps(&self, other: &CellRange) -> bool {
        let (this, other) = (
            Self::new(self.start, self.end),
            Self::new(other.start, other.end),
        );
        let rows = this.start.row <= other.end.row && other.start.row <= this.end.row;
        let cols = this.start.col <= other.end.col && other.start.col <= this.end.col;
        rows && cols
    }
}

impl fmt::Display for CellRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.start == self.end {
            write!(f, "{}", self.start)
        } else {
            write!(f, "{}:{}", self.start, self.end)
        }
    }
}

impl FromStr for CellRange {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_column_letters() {
        for (col, letters) in [(0, "A"), (25, "Z"), (26, "AA"), (701, "ZZ"), (702, "AAA")] {
            assert_eq!(CellAddress::column_to_letters(col), letters);
            assert_eq!(CellAddress::letters_to_column(letters).unwrap(), col);
        }
        assert_eq!(CellAddress::letters_to_column("ab").unwrap(), 27);
        assert!(CellAddress::letters_to_column("A1").is_err());
        assert!(CellAddress::letters_to_column("ZZZZ").is_err());
    }

    #[test]
    fn test_parse_address() {
        assert_eq!(CellAddress::parse("C12").unwrap(), CellAddress::new(11, 2));
        let anchored = CellAddress::parse(" $AB$3 ").unwrap();
        assert_eq!(anchored, CellAddress::new(2, 27));
        assert_eq!("F6".parse::<CellAddress>().unwrap(), CellAddress::new(5, 5));

        for bad in ["", "12", "A", "A0", "Ax", "A1B"] {
            assert!(CellAddress::parse(bad).is_err(), "{bad} should not parse");
        }
    }

    #[test]
    fn test_clamped_address() {
        assert_eq!(CellAddress::clamped(4, 2), CellAddress::new(4, 2));
        let wide = CellAddress::clamped(3, 70_000);
        assert_eq!(wide, CellAddress::new(3, MAX_COLS - 1));
        let deep = CellAddress::clamped(usize::MAX, 0);
        assert_eq!(deep, CellAddress::new(MAX_ROWS - 1, 0));
        assert_eq!(CellAddress::clamped(0, 20_000).to_string(), "XFD1");
    }

    #[test]
    fn test_display_address() {
        assert_eq!(CellAddress::new(0, 0).to_string(), "A1");
        assert_eq!(CellAddress::new(4, 1).to_string(), "B5");
    }

    #[test]
    fn test_parse_range_normalizes_corners() {
        let range = CellRange::parse("C3:A1").unwrap();
        assert_eq!(range, CellRange::from_indices(0, 0, 2, 2));
        assert_eq!(range.to_string(), "A1:C3");

        assert_eq!(CellRange::parse("B2").unwrap().to_string(), "B2");
        assert!(CellRange::parse("A1:B2:C3").is_err());
        assert!(CellRange::parse("A1:").is_err());
    }

    #[test]
    fn test_overlaps() {
        let range = CellRange::from_indices(1, 1, 3, 4);
        assert!(range.overlaps(&CellRange::from_indices(3, 4, 5, 5)));
        assert!(range.overlaps(&CellRange::from_indices(0, 0, 9, 9)));
        assert!(!range.overlaps(&CellRange::from_indices(4, 0, 5, 5)));
        assert!(!range.overlaps(&CellRange::from_indices(0, 5, 9, 9)));

        let swapped = CellRange {
            start: CellAddress::new(5, 5),
            end: CellAddress::new(3, 4),
        };
        assert!(range.overlaps(&swapped));
        assert!(swapped.overlaps(&range));
    }
}
