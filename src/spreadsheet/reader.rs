//! Read the user list from an XLSX workbook.
//!
//! The first row of the worksheet holds the column titles, every following
//! non-empty row becomes one [`AssignmentRow`].

use calamine::{open_workbook, Data, Reader, Xlsx};
use std::collections::HashMap;
use std::path::Path;

use crate::constants::NA_VALUES;
use crate::error::{ImportError, ImportResult};
use crate::logging::log_info;
use crate::models::AssignmentRow;
use crate::spreadsheet::columns::{ColumnMap, Field};

#[derive(Debug, Clone, Default)]
pub struct ReadOptions {
    /// Worksheet to read, the first one when unset
    pub sheet: Option<String>,
    pub columns: ColumnMap,
}

/// Read all assignment rows of the selected worksheet.
pub fn read_assignments<P: AsRef<Path>>(path: P, options: &ReadOptions) -> ImportResult<Vec<AssignmentRow>> {
    let path = path.as_ref();
    let mut workbook: Xlsx<_> = open_workbook(path).map_err(|e| {
        ImportError::Spreadsheet(format!("Failed to open {}: {}", path.display(), e))
    })?;

    let sheet_names = workbook.sheet_names();
    let sheet_name = match &options.sheet {
        Some(name) => sheet_names
            .iter()
            .find(|candidate| candidate.as_str() == name.as_str())
            .cloned()
            .ok_or_else(|| {
                ImportError::Spreadsheet(format!(
                    "Worksheet '{}' not found in {} (available: {})",
                    name,
                    path.display(),
                    sheet_names.join(", ")
                ))
            })?,
        None => sheet_names.first().cloned().ok_or_else(|| {
            ImportError::Spreadsheet(format!("{} contains no worksheets", path.display()))
        })?,
    };

    let range = workbook.worksheet_range(&sheet_name).map_err(|e| {
        ImportError::Spreadsheet(format!("Failed to read sheet '{}': {}", sheet_name, e))
    })?;

    let first_row = range.start().map(|(row, _)| row as usize).unwrap_or(0);
    let rows: Vec<Vec<Data>> = range.rows().map(|r| r.to_vec()).collect();

    let assignments = rows_to_assignments(&rows, first_row, &options.columns)?;
    log_info(&format!(
        "Read {} rows from sheet '{}' of {}",
        assignments.len(),
        sheet_name,
        path.display()
    ));

    Ok(assignments)
}

/// Turn raw worksheet rows into assignments. `first_row` is the zero-based
/// worksheet index of `rows[0]`, used to report spreadsheet line numbers.
pub fn rows_to_assignments(
    rows: &[Vec<Data>],
    first_row: usize,
    columns: &ColumnMap,
) -> ImportResult<Vec<AssignmentRow>> {
    let Some(header_row) = rows.first() else {
        return Err(ImportError::Spreadsheet("Worksheet is empty".to_string()));
    };

    let mut positions: HashMap<Field, usize> = HashMap::new();
    for (col_idx, cell) in header_row.iter().enumerate() {
        let Some(title) = cell_text(cell) else { continue };
        if let Some(field) = columns.field_for_header(&title) {
            positions.entry(field).or_insert(col_idx);
        }
    }

    if !positions.contains_key(&Field::Email) {
        return Err(ImportError::Spreadsheet(format!(
            "Required column '{}' not found in header row",
            columns.primary_header(Field::Email)
        )));
    }

    let mut assignments = Vec::new();

    for (offset, row) in rows.iter().enumerate().skip(1) {
        let value = |field: Field| {
            positions
                .get(&field)
                .and_then(|idx| row.get(*idx))
                .and_then(cell_text)
        };

        let assignment = AssignmentRow {
            row_number: first_row + offset + 1,
            email: value(Field::Email),
            team: value(Field::Team),
            group: value(Field::Group),
            firstname: value(Field::FirstName),
            lastname: value(Field::LastName),
        };

        // Skip empty rows
        if assignment.email.is_none()
            && assignment.team.is_none()
            && assignment.group.is_none()
            && assignment.firstname.is_none()
            && assignment.lastname.is_none()
        {
            continue;
        }

        assignments.push(assignment);
    }

    Ok(assignments)
}

/// Cell content as trimmed text; empty cells and NA markers yield `None`.
fn cell_text(cell: &Data) -> Option<String> {
    let text = match cell {
        Data::Empty | Data::Error(_) => return None,
        Data::String(s) => s.trim().to_string(),
        Data::Int(i) => i.to_string(),
        Data::Float(f) => {
            if f.fract() == 0.0 && *f >= i64::MIN as f64 && *f <= i64::MAX as f64 {
                (*f as i64).to_string()
            } else {
                f.to_string()
            }
        }
        Data::Bool(b) => b.to_string(),
        Data::DateTime(dt) => format!("{}", dt),
        Data::DateTimeIso(s) => s.trim().to_string(),
        Data::DurationIso(s) => s.trim().to_string(),
    };

    if text.is_empty() || NA_VALUES.contains(&text.as_str()) {
        None
    } else {
        Some(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn s(value: &str) -> Data {
        Data::String(value.to_string())
    }

    fn header() -> Vec<Data> {
        vec![s("Nachname"), s("Vorname"), s("E-Mail"), s("Team"), s("Gruppe")]
    }

    #[test]
    fn test_rows_are_trimmed_and_numbered() {
        let rows = vec![
            header(),
            vec![s("Doe"), s("Jane"), s("  jane@example.com "), s(" Biology"), s("Lab A ")],
        ];

        let assignments = rows_to_assignments(&rows, 0, &ColumnMap::default()).unwrap();
        assert_eq!(assignments.len(), 1);

        let row = &assignments[0];
        assert_eq!(row.row_number, 2);
        assert_eq!(row.email.as_deref(), Some("jane@example.com"));
        assert_eq!(row.team.as_deref(), Some("Biology"));
        assert_eq!(row.group.as_deref(), Some("Lab A"));
        assert_eq!(row.label(), "Jane Doe <jane@example.com>");
    }

    #[test]
    fn test_empty_and_na_cells_are_absent() {
        let rows = vec![
            header(),
            vec![s("Doe"), s("Jane"), s("jane@example.com"), s("Biology"), s("NA")],
            vec![s("Roe"), s("Rick"), s("rick@example.com"), Data::Empty, s("   ")],
        ];

        let assignments = rows_to_assignments(&rows, 0, &ColumnMap::default()).unwrap();
        assert_eq!(assignments[0].group, None);
        assert_eq!(assignments[1].team, None);
        assert_eq!(assignments[1].group, None);
        assert!(!assignments[1].has_work());
    }

    #[test]
    fn test_blank_rows_are_skipped() {
        let rows = vec![
            header(),
            vec![Data::Empty, Data::Empty, Data::Empty, Data::Empty, Data::Empty],
            vec![s("Doe"), s("Jane"), s("jane@example.com"), s("Biology"), Data::Empty],
        ];

        let assignments = rows_to_assignments(&rows, 0, &ColumnMap::default()).unwrap();
        assert_eq!(assignments.len(), 1);
        assert_eq!(assignments[0].row_number, 3);
    }

    #[test]
    fn test_short_rows_and_offset() {
        let rows = vec![
            vec![s("E-Mail"), s("Team")],
            vec![s("jane@example.com")],
        ];

        let assignments = rows_to_assignments(&rows, 4, &ColumnMap::default()).unwrap();
        assert_eq!(assignments[0].row_number, 6);
        assert_eq!(assignments[0].team, None);
    }

    #[test]
    fn test_numeric_cells_become_text() {
        let rows = vec![
            vec![s("E-Mail"), s("Team")],
            vec![s("jane@example.com"), Data::Float(42.0)],
        ];

        let assignments = rows_to_assignments(&rows, 0, &ColumnMap::default()).unwrap();
        assert_eq!(assignments[0].team.as_deref(), Some("42"));
    }

    #[test]
    fn test_missing_email_column_is_fatal() {
        let rows = vec![vec![s("Name"), s("Team")], vec![s("Jane"), s("Biology")]];

        match rows_to_assignments(&rows, 0, &ColumnMap::default()) {
            Err(ImportError::Spreadsheet(msg)) => assert!(msg.contains("E-Mail")),
            other => panic!("Expected spreadsheet error, got {:?}", other),
        }
    }

    #[test]
    fn test_empty_sheet_is_fatal() {
        assert!(matches!(
            rows_to_assignments(&[], 0, &ColumnMap::default()),
            Err(ImportError::Spreadsheet(_))
        ));
    }
}
