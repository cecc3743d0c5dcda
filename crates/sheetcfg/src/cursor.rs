//! Forward-only record cursor

use crate::error::Result;
use crate::grid::{is_blank_row, row_tag, Cell};
use crate::named_row::NamedRow;
use crate::record::{Record, RecordDecoder};
use crate::sheet::Sheet;

/// Column holding the main key; a blank main key marks a continuation row
pub const MAIN_KEY_COLUMN: usize = 1;

/// Scanner over the body rows of a [`Sheet`]
///
/// The cursor owns its position and only borrows the sheet, so any number of
/// cursors may walk the same sheet independently. In multi-row mode a record
/// is a run of rows: the first non-blank row plus every following row whose
/// main key is blank. Blank rows are skipped in both modes.
#[derive(Debug, Clone)]
pub struct RecordCursor<'s> {
    sheet: &'s Sheet,
    position: usize,
    multi_row: bool,
}

impl<'s> RecordCursor<'s> {
    pub(crate) fn new(sheet: &'s Sheet, multi_row: bool) -> Self {
        Self {
            sheet,
            position: 0,
            multi_row,
        }
    }

    /// Index of the next body row to inspect
    pub fn position(&self) -> usize {
        self.position
    }

    pub fn is_multi_row(&self) -> bool {
        self.multi_row
    }

    /// Next non-blank row
    pub fn next_record_row(&mut self) -> Option<&'s [Cell]> {
        let rows = self.sheet.rows();
        while let Some(row) = rows.get(self.position) {
            self.position += 1;
            if !is_blank_row(row) {
                return Some(row.as_slice());
            }
        }
        None
    }

    /// Next run of rows forming one multi-row record
    ///
    /// The row that starts the following record is peeked at, not consumed.
    pub fn next_record_rows(&mut self) -> Option<Vec<&'s [Cell]>> {
        let mut group = vec![self.next_record_row()?];
        let rows = self.sheet.rows();
        while let Some(row) = rows.get(self.position) {
            if !is_blank_row(row) {
                if has_main_key(row) {
                    break;
                }
                group.push(row.as_slice());
            }
            self.position += 1;
        }
        Some(group)
    }

    /// Decode the next record, or `None` once the body is exhausted
    pub fn read_one<D>(&mut self, decoder: &mut D) -> Result<Option<Record<D::Output>>>
    where
        D: RecordDecoder + ?Sized,
    {
        let Some(row) = self.next() else {
            return Ok(None);
        };
        let first = row.first_row();
        let is_test = self.sheet.tags().is_test(row_tag(first).as_deref());
        let data = decoder.decode(&row)?;
        Ok(Some(Record {
            data,
            source: self.sheet.url().to_string(),
            location: first.first().map(|cell| cell.address),
            is_test,
        }))
    }
}

impl<'s> Iterator for RecordCursor<'s> {
    type Item = NamedRow<'s>;

    fn next(&mut self) -> Option<NamedRow<'s>> {
        let root = self.sheet.title_tree().root();
        if self.multi_row {
            self.next_record_rows().map(|rows| NamedRow::new(root, rows))
        } else {
            self.next_record_row().map(|row| NamedRow::single(root, row))
        }
    }
}

fn has_main_key(row: &[Cell]) -> bool {
    row.get(MAIN_KEY_COLUMN).is_some_and(|cell| !cell.is_blank())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::LoadOptions;
    use pretty_assertions::assert_eq;
    use sheetcfg_core::{CellValue, Worksheet};

    // Header band of one row, no description rows
    fn sheet(body: &[&[&str]]) -> Sheet {
        let mut rows: Vec<Vec<&str>> = vec![
            vec!["##", "title_rows:2"],
            vec!["", "id", "item"],
            vec!["", "desc", "desc"],
        ];
        rows.extend(body.iter().map(|r| r.to_vec()));
        let raw = Worksheet::from_rows("t", rows);
        Sheet::load("t.xlsx", raw.reader(), &LoadOptions::default())
            .unwrap()
            .unwrap()
    }

    fn keys(rows: &[&[Cell]]) -> Vec<String> {
        rows.iter()
            .map(|row| row.get(2).map(|c| c.value.to_string()).unwrap_or_default())
            .collect()
    }

    #[test]
    fn test_single_row_mode_skips_blank_rows() {
        let sheet = sheet(&[&["", "1", "a"], &["note", "", " "], &[], &["", "2", "b"]]);
        let mut cursor = sheet.records(false);

        assert_eq!(keys(&[cursor.next_record_row().unwrap()]), vec!["a"]);
        assert_eq!(keys(&[cursor.next_record_row().unwrap()]), vec!["b"]);
        assert!(cursor.next_record_row().is_none());
        assert_eq!(cursor.position(), sheet.rows().len());
    }

    #[test]
    fn test_multi_row_groups_continuation_rows() {
        let sheet = sheet(&[&["", "A", "r1"], &["", "", "r2"], &["", "B", "r3"]]);
        let mut cursor = sheet.records(true);

        assert_eq!(keys(&cursor.next_record_rows().unwrap()), vec!["r1", "r2"]);
        assert_eq!(cursor.position(), 2);
        assert_eq!(keys(&cursor.next_record_rows().unwrap()), vec!["r3"]);
        assert!(cursor.next_record_rows().is_none());
    }

    #[test]
    fn test_multi_row_skips_blank_rows_inside_a_group() {
        let sheet = sheet(&[
            &["", "", "orphan"],
            &["", "A", "r1"],
            &["", "", ""],
            &["", "", "r2"],
            &["", ""],
        ]);
        let groups: Vec<Vec<String>> = sheet.records(true).map(|row| keys(row.rows())).collect();

        assert_eq!(groups, vec![vec!["orphan"], vec!["r1", "r2"]]);
    }

    #[test]
    fn test_read_one_decodes_and_tags() {
        let sheet = sheet(&[&["", "1", "a"], &["TEST", "2", "b"]]);
        let mut cursor = sheet.records(false);
        let mut decode = |row: &NamedRow<'_>| -> Result<CellValue> {
            row.column("item", None, false)?.read()
        };

        let first = cursor.read_one(&mut decode).unwrap().unwrap();
        assert_eq!(first.data.to_string(), "a");
        assert!(!first.is_test);
        assert_eq!(first.source_location(), "t.xlsx@A4");

        let second = cursor.read_one(&mut decode).unwrap().unwrap();
        assert!(second.is_test);
        assert!(cursor.read_one(&mut decode).unwrap().is_none());
    }

    #[test]
    fn test_cursors_are_independent() {
        let sheet = sheet(&[&["", "1", "a"], &["", "2", "b"]]);
        let mut first = sheet.records(false);
        first.next();

        assert_eq!(sheet.records(false).count(), 2);
        assert_eq!(first.count(), 1);
    }
}
