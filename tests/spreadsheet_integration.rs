use rust_xlsxwriter::Workbook;
use tempfile::TempDir;

use elab_batch_import::spreadsheet::{read_assignments, ColumnMap, ReadOptions};
use elab_batch_import::ImportError;

#[test]
fn test_reads_named_sheet_with_custom_columns() {
    let dir = TempDir::new().unwrap();
    let file = dir.path().join("members.xlsx");

    let mut workbook = Workbook::new();
    let notes = workbook.add_worksheet();
    notes.set_name("Notes").unwrap();
    notes.write_string(0, 0, "Nothing to see here").unwrap();

    let members = workbook.add_worksheet();
    members.set_name("Members").unwrap();
    members.write_string(0, 0, "Mailadresse").unwrap();
    members.write_string(0, 1, "Team").unwrap();
    members.write_string(0, 2, "Arbeitsgruppe").unwrap();
    members.write_string(1, 0, "alice@example.com").unwrap();
    members.write_string(1, 1, "Biology").unwrap();
    members.write_string(1, 2, "Lab A").unwrap();
    members.write_string(2, 0, "bob@example.com").unwrap();
    members.write_string(2, 1, "NA").unwrap();
    workbook.save(&file).unwrap();

    let options = ReadOptions {
        sheet: Some("Members".to_string()),
        columns: ColumnMap::with_overrides("email=Mailadresse,group=Arbeitsgruppe").unwrap(),
    };

    let rows = read_assignments(&file, &options).unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].email.as_deref(), Some("alice@example.com"));
    assert_eq!(rows[0].group.as_deref(), Some("Lab A"));
    assert_eq!(rows[1].row_number, 3);
    assert_eq!(rows[1].team, None);
}

#[test]
fn test_unknown_sheet_is_reported() {
    let dir = TempDir::new().unwrap();
    let file = dir.path().join("userlist.xlsx");

    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    sheet.write_string(0, 0, "E-Mail").unwrap();
    workbook.save(&file).unwrap();

    let options = ReadOptions {
        sheet: Some("2024".to_string()),
        ..ReadOptions::default()
    };

    match read_assignments(&file, &options) {
        Err(ImportError::Spreadsheet(msg)) => assert!(msg.contains("2024")),
        other => panic!("Expected spreadsheet error, got {:?}", other),
    }
}

#[test]
fn test_non_xlsx_file_is_fatal() {
    let dir = TempDir::new().unwrap();
    let file = dir.path().join("userlist.xlsx");
    std::fs::write(&file, "Nachname;Vorname;E-Mail\n").unwrap();

    let result = read_assignments(&file, &ReadOptions::default());
    assert!(matches!(result, Err(ImportError::Spreadsheet(_))));
}
