//! End-to-end tests for record reading (cursor -> named rows -> decoder)

use pretty_assertions::assert_eq;
use sheetcfg::prelude::*;

#[derive(Debug, Clone, PartialEq)]
struct Monster {
    id: String,
    name: String,
    drops: Vec<(String, f64)>,
    desc: Vec<String>,
}

fn monsters() -> Worksheet {
    let mut raw = Worksheet::from_rows(
        "monsters",
        vec![
            vec!["##", "title_rows:2"],
            vec!["", "id", "name", "drops", "", "desc"],
            vec!["", "", "", "item", "count", ""],
            vec!["", "key", "display", "", "", "text"],
            vec!["", "1", "slime", "gel", "2", "green"],
            vec!["", "", "", "coin", "5", "and wet"],
            vec!["", "2", "bat", "wing", "1", ""],
            vec!["", "", "", "", "", ""],
        ],
    );
    for range in ["B2:B3", "C2:C3", "D2:E2", "F2:F3"] {
        raw.merge(range).unwrap();
    }
    // Counts are numeric cells
    raw.set_cell_value("E5", 2.0).unwrap();
    raw.set_cell_value("E6", 5.0).unwrap();
    raw.set_cell_value("E7", 1.0).unwrap();
    raw
}

fn load(raw: &Worksheet) -> Sheet {
    Sheet::load("monsters.xlsx", raw.reader(), &LoadOptions::default())
        .unwrap()
        .unwrap()
}

fn decode_monster(row: &NamedRow<'_>) -> Result<Monster> {
    let id = row.column("id", None, false)?.read()?.to_string();
    let name = row.column("name", None, false)?.read()?.to_string();

    let mut drops = Vec::new();
    for drop in row.sub_tree_rows("drops")?.expand_rows() {
        let item = drop.column("item", None, false)?.read()?.to_string();
        let mut count = drop.column("count", None, false)?;
        let value = count.read()?;
        let Some(count) = value.as_number() else {
            let at = count.last_read_location();
            return Err(SheetError::decode(at, "count must be a number"));
        };
        drops.push((item, count));
    }

    let desc = row
        .flattened_column("desc", None)?
        .cells()
        .iter()
        .map(|c| c.value.to_string())
        .collect();

    Ok(Monster {
        id,
        name,
        drops,
        desc,
    })
}

#[test]
fn test_multi_row_records() {
    let sheet = load(&monsters());
    let records = sheet.read_all(decode_monster, true).unwrap();

    assert_eq!(
        records.iter().map(|r| r.data.clone()).collect::<Vec<_>>(),
        vec![
            Monster {
                id: "1".into(),
                name: "slime".into(),
                drops: vec![("gel".into(), 2.0), ("coin".into(), 5.0)],
                desc: vec!["green".into(), "and wet".into()],
            },
            Monster {
                id: "2".into(),
                name: "bat".into(),
                drops: vec![("wing".into(), 1.0)],
                desc: vec![],
            },
        ]
    );
    assert_eq!(records[0].source_location(), "monsters.xlsx@A5");
    assert_eq!(records[1].source_location(), "monsters.xlsx@A7");
}

#[test]
fn test_single_row_mode_reads_continuation_rows_as_records() {
    let sheet = load(&monsters());
    let names: Vec<String> = sheet
        .records(false)
        .map(|row| {
            row.flattened_column("drops", None)
                .unwrap()
                .cells()
                .first()
                .map(|c| c.value.to_string())
                .unwrap_or_default()
        })
        .collect();

    assert_eq!(names, vec!["gel", "coin", "wing"]);
}

#[test]
fn test_single_row_field_with_continuation_value() {
    let sheet = load(&monsters());
    let mut cursor = sheet.records(true);
    let record = cursor.next().unwrap();

    assert_eq!(record.row_count(), 2);
    match record.column("desc", None, false) {
        Err(SheetError::UnexpectedMultiRowValue { name, cell }) => {
            assert_eq!(name, "desc");
            assert_eq!(cell, CellAddress::new(5, 5));
        }
        other => panic!("expected UnexpectedMultiRowValue, got {:?}", other),
    }

    let per_row: Vec<Vec<String>> = record
        .column_across_rows("drops", None)
        .unwrap()
        .iter()
        .map(|s| s.cells().iter().map(|c| c.value.to_string()).collect())
        .collect();
    assert_eq!(per_row, vec![vec!["gel", "2"], vec!["coin", "5"]]);
}

#[test]
fn test_decoder_errors_stop_reading() {
    let sheet = load(&monsters());

    let err = sheet
        .read_all(
            |row: &NamedRow<'_>| -> Result<()> {
                row.column("level", None, false)?;
                Ok(())
            },
            true,
        )
        .unwrap_err();
    assert!(matches!(
        err,
        SheetError::MissingColumn { ref name } if name == "level"
    ));

    let err = sheet
        .read_all(
            |row: &NamedRow<'_>| -> Result<()> {
                let mut id = row.column("id", None, false)?;
                id.read()?;
                id.read()?;
                Ok(())
            },
            true,
        )
        .unwrap_err();
    assert_eq!(err.to_string(), "Unexpected end of values after B5");
}

#[test]
fn test_decode_error_carries_cell() {
    let mut raw = monsters();
    raw.set_cell_value("E6", "many").unwrap();
    let sheet = load(&raw);

    let err = sheet.read_all(decode_monster, true).unwrap_err();
    assert_eq!(err.to_string(), "Cannot decode E6: count must be a number");
}

#[test]
fn test_separated_and_named_streams() {
    let mut raw = Worksheet::from_rows(
        "t",
        vec![
            vec!["##", "title_rows:2"],
            vec!["", "id", "tags", "range", ""],
            vec!["", "key", "list", "min", "max"],
            vec!["", "1", "fire; ice|wind", "", "9"],
        ],
    );
    raw.merge("D2:E2").unwrap();
    let sheet = load(&raw);
    let record = sheet.records(false).next().unwrap();

    let tags: Vec<String> = {
        let mut stream = record.column("tags", Some(";|"), false).unwrap();
        std::iter::from_fn(|| stream.read().ok())
            .map(|v| v.to_string())
            .collect()
    };
    assert_eq!(tags, vec!["fire", "ice", "wind"]);

    let mut range = record.column("range", None, true).unwrap();
    assert!(range.is_named());
    assert_eq!(range.read().unwrap(), CellValue::string(""));
    assert_eq!(range.read().unwrap(), CellValue::string("9"));

    let mut range = record.column("range", None, false).unwrap();
    assert_eq!(range.read().unwrap(), CellValue::string("9"));
    assert!(range.try_read_eof());
}

#[test]
fn test_struct_decoder() {
    struct Ids(usize);

    impl RecordDecoder for Ids {
        type Output = String;

        fn decode(&mut self, row: &NamedRow<'_>) -> Result<String> {
            self.0 += 1;
            Ok(row.column("id", None, false)?.read()?.to_string())
        }
    }

    let sheet = load(&monsters());
    let mut decoder = Ids(0);
    let mut cursor = sheet.records(true);
    let mut ids = Vec::new();
    while let Some(record) = cursor.read_one(&mut decoder).unwrap() {
        ids.push(record.data);
    }

    assert_eq!(ids, vec!["1", "2"]);
    assert_eq!(decoder.0, 2);
}
