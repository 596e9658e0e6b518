//! Integration tests for loading survey files from disk.

use std::path::{Path, PathBuf};

use rust_xlsxwriter::Workbook;
use tempfile::TempDir;

use survey_ingest::{IngestError, load_columns};
use survey_model::{CellValue, ColumnName};

const PHYSICIAN: &str = "Do you have a primary care physician";
const GLUCOSE: &str = "Glucose Levels";

fn col(name: &str) -> ColumnName {
    ColumnName::new(name).unwrap()
}

fn write_survey_xlsx(dir: &Path) -> PathBuf {
    let path = dir.join("survey.xlsx");
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet.write_string(0, 0, "Name").unwrap();
    worksheet.write_string(0, 1, GLUCOSE).unwrap();
    worksheet.write_string(0, 2, PHYSICIAN).unwrap();

    worksheet.write_string(1, 0, "Ana").unwrap();
    worksheet.write_number(1, 1, 140.0).unwrap();
    worksheet
        .write_string(1, 2, "Yes, I do have a primary care physician")
        .unwrap();

    // Row 3 left blank on purpose.

    worksheet.write_string(3, 0, "Luis").unwrap();
    worksheet.write_string(3, 1, "high").unwrap();
    workbook.save(&path).unwrap();
    path
}

#[test]
fn loads_only_requested_xlsx_columns() {
    let dir = TempDir::new().unwrap();
    let path = write_survey_xlsx(dir.path());

    let dataset = load_columns(&path, &[col(GLUCOSE), col(PHYSICIAN)]).unwrap();

    assert_eq!(dataset.columns(), &[col(GLUCOSE), col(PHYSICIAN)]);
    assert_eq!(dataset.len(), 2);
    let first = &dataset.rows()[0];
    assert_eq!(first.number, 2);
    assert_eq!(first.get(GLUCOSE), &CellValue::Number(140.0));
    assert!(first.get("Name").is_missing());

    let second = &dataset.rows()[1];
    assert_eq!(second.number, 4);
    assert_eq!(second.get(GLUCOSE), &CellValue::Text("high".to_string()));
    assert!(second.get(PHYSICIAN).is_missing());
}

#[test]
fn missing_xlsx_column_is_schema_mismatch() {
    let dir = TempDir::new().unwrap();
    let path = write_survey_xlsx(dir.path());

    let err = load_columns(&path, &[col("Systolic"), col(GLUCOSE)]).unwrap_err();

    match err {
        IngestError::SchemaMismatch { missing, path: reported } => {
            assert_eq!(missing, vec!["Systolic".to_string()]);
            assert_eq!(reported, path);
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn nonexistent_path_is_file_not_found() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("missing.xlsx");

    let err = load_columns(&path, &[col(GLUCOSE)]).unwrap_err();

    assert!(matches!(err, IngestError::FileNotFound { .. }));
}

#[test]
fn directory_is_file_not_found() {
    let dir = TempDir::new().unwrap();

    let err = load_columns(dir.path(), &[col(GLUCOSE)]).unwrap_err();

    assert!(matches!(err, IngestError::FileNotFound { .. }));
}

#[test]
fn unsupported_extension_is_rejected() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("survey.txt");
    std::fs::write(&path, "Glucose Levels\n140\n").unwrap();

    let err = load_columns(&path, &[col(GLUCOSE)]).unwrap_err();

    assert!(matches!(err, IngestError::UnsupportedFormat { .. }));
}

#[test]
fn corrupt_workbook_is_workbook_error() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("broken.xlsx");
    std::fs::write(&path, b"not a zip archive").unwrap();

    let err = load_columns(&path, &[col(GLUCOSE)]).unwrap_err();

    assert!(matches!(err, IngestError::Workbook { .. }));
}

#[test]
fn loads_csv_with_bom_and_ragged_rows() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("survey.csv");
    std::fs::write(
        &path,
        "\u{feff}Glucose Levels,Notes\n130,ok\n\n99\n,\n",
    )
    .unwrap();

    let dataset = load_columns(&path, &[col(GLUCOSE)]).unwrap();

    let values: Vec<&CellValue> = dataset.iter().map(|row| row.get(GLUCOSE)).collect();
    assert_eq!(
        values,
        vec![
            &CellValue::Text("130".to_string()),
            &CellValue::Text("99".to_string())
        ]
    );
}

#[test]
fn empty_csv_is_empty_sheet() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("empty.csv");
    std::fs::write(&path, "").unwrap();

    let err = load_columns(&path, &[col(GLUCOSE)]).unwrap_err();

    assert!(matches!(err, IngestError::EmptySheet { .. }));
}
