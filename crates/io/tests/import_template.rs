//! End-to-end import against a real .xlsx fixture authored on the fly.

use amtest_io::{extract_metadata, extract_points, TemplateSchema, Workbook};
use rust_xlsxwriter::Workbook as XlsxWorkbook;
use tempfile::tempdir;

/// Write a minimal template-v1 workbook: header cells plus a few readings.
fn write_fixture(path: &std::path::Path, sheet_name: &str) {
    let mut workbook = XlsxWorkbook::new();
    let sheet = workbook.add_worksheet();
    sheet.set_name(sheet_name).unwrap();

    // Header block (template v1 addresses, zero-based coordinates)
    sheet.write_string(1, 1, "Dynamic Penetrometer Test").unwrap(); // B2
    sheet.write_string(3, 2, "Acme Civils Ltd").unwrap(); // C4
    sheet.write_string(4, 2, "Depot access road").unwrap(); // C5
    sheet.write_number(5, 2, 20417.0).unwrap(); // C6
    sheet.write_string(3, 6, "2026-07-30").unwrap(); // G4
    sheet.write_string(5, 6, "R. Patel").unwrap(); // G6
    sheet.write_string(15, 2, "x").unwrap(); // C16 cone flag
    sheet.write_string(15, 4, "good").unwrap(); // E16 cone status

    // Readings: row 19 first triplet, row 19 second triplet, row 20 first triplet
    sheet.write_number(18, 0, 1.0).unwrap(); // A19
    sheet.write_number(18, 1, 3.0).unwrap(); // B19
    sheet.write_number(18, 2, 20.0).unwrap(); // C19
    sheet.write_number(18, 4, 3.0).unwrap(); // E19
    sheet.write_number(18, 5, 4.0).unwrap(); // F19
    sheet.write_number(18, 6, 95.0).unwrap(); // G19
    sheet.write_number(19, 0, 2.0).unwrap(); // A20
    sheet.write_number(19, 1, 5.0).unwrap(); // B20
    sheet.write_number(19, 2, 40.0).unwrap(); // C20

    // A broken triplet: depth is text, must be skipped whole
    sheet.write_number(20, 0, 3.0).unwrap(); // A21
    sheet.write_number(20, 1, 6.0).unwrap(); // B21
    sheet.write_string(20, 2, "refused").unwrap(); // C21

    workbook.save(path).unwrap();
}

#[test]
fn imports_preferred_sheet_and_extracts() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("template.xlsx");
    write_fixture(&path, "WorkSheets");

    let schema = TemplateSchema::default();
    let workbook = Workbook::open(&path, &schema).unwrap();
    assert_eq!(workbook.sheet_name, "WorkSheets");

    let meta = extract_metadata(&workbook.range, &schema);
    assert_eq!(meta.title, "Dynamic Penetrometer Test");
    assert_eq!(meta.client, "Acme Civils Ltd");
    assert_eq!(meta.job_number, "20417");
    assert_eq!(meta.technician, "R. Patel");
    assert!(meta.cone_condition.checked);
    assert_eq!(meta.cone_condition.status, "good");
    assert_eq!(meta.report_ref, "-");

    let series = extract_points(&workbook.range, &schema);
    let depths: Vec<f64> = series.points().iter().map(|p| p.depth_mm).collect();
    assert_eq!(depths, vec![20.0, 40.0, 95.0]);
}

#[test]
fn falls_back_to_first_sheet() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("other.xlsx");
    write_fixture(&path, "Sheet1");

    let workbook = Workbook::open(&path, &TemplateSchema::default()).unwrap();
    assert_eq!(workbook.sheet_name, "Sheet1");
}

#[test]
fn empty_sheet_is_rejected() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("empty.xlsx");
    let mut workbook = XlsxWorkbook::new();
    workbook.add_worksheet().set_name("WorkSheets").unwrap();
    workbook.save(&path).unwrap();

    let err = Workbook::open(&path, &TemplateSchema::default()).unwrap_err();
    assert!(matches!(err, amtest_io::ImportError::EmptySheet { .. }));
}

#[test]
fn missing_file_is_an_open_error() {
    let err = Workbook::open(std::path::Path::new("/no/such/file.xlsx"), &TemplateSchema::default())
        .unwrap_err();
    assert!(matches!(err, amtest_io::ImportError::Open(_)));
}
