//! Full pipeline run against a workbook fixture authored on the fly.

use std::path::Path;

use amtest_cli::pipeline::{self, GenerateRequest};
use amtest_chart::ChartOptions;
use amtest_io::TemplateSchema;
use amtest_report::{DiskStorage, StorageLocation};
use rust_xlsxwriter::Workbook as XlsxWorkbook;
use tempfile::tempdir;

fn write_fixture(path: &Path) {
    let mut workbook = XlsxWorkbook::new();
    let sheet = workbook.add_worksheet();
    sheet.set_name("WorkSheets").unwrap();

    sheet.write_string(1, 1, "Dynamic Penetrometer Test").unwrap(); // B2
    sheet.write_string(3, 2, "Acme Civils Ltd").unwrap(); // C4
    sheet.write_string(5, 6, "R. Patel").unwrap(); // G6

    // Three readings in the first triplet, rows 19-21
    for (i, (blows, depth)) in [(3.0, 20.0), (5.0, 40.0), (4.0, 95.0)].iter().enumerate() {
        let row = 18 + i as u32;
        sheet.write_number(row, 0, (i + 1) as f64).unwrap();
        sheet.write_number(row, 1, *blows).unwrap();
        sheet.write_number(row, 2, *depth).unwrap();
    }

    workbook.save(path).unwrap();
}

fn storage(root: &Path, allow_shared: bool) -> DiskStorage {
    DiskStorage::with_roots(
        root.join("cache"),
        root.join("shared"),
        root.join("private"),
        allow_shared,
    )
}

#[test]
fn generates_report_into_shared_storage() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("survey.xlsx");
    write_fixture(&input);

    let request = GenerateRequest {
        input: input.clone(),
        schema: TemplateSchema::default(),
        chart: ChartOptions { width: 300, height: 200 },
        file_name: Some("report.pdf".into()),
        html_out: Some(dir.path().join("report.html")),
    };
    let outcome =
        pipeline::generate_with_storage(&request, &storage(dir.path(), true)).unwrap();

    assert_eq!(outcome.point_count, 3);
    assert_eq!(outcome.artifact.location, StorageLocation::SharedStore);
    assert_eq!(outcome.artifact.path, dir.path().join("shared/report.pdf"));

    let pdf = std::fs::read(&outcome.artifact.path).unwrap();
    assert!(pdf.starts_with(b"%PDF"));

    // Temp copy cleaned up after the final copy landed
    assert!(!dir.path().join("cache/report.pdf").exists());

    let html = std::fs::read_to_string(dir.path().join("report.html")).unwrap();
    assert!(html.contains("Dynamic Penetrometer Test"));
    assert!(html.contains("Acme Civils Ltd"));
    assert!(html.contains("data:image/png;base64,"));
}

#[test]
fn permission_denied_leaves_report_in_cache() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("survey.xlsx");
    write_fixture(&input);

    let request = GenerateRequest {
        input,
        schema: TemplateSchema::default(),
        chart: ChartOptions { width: 300, height: 200 },
        file_name: Some("report.pdf".into()),
        html_out: None,
    };
    let outcome =
        pipeline::generate_with_storage(&request, &storage(dir.path(), false)).unwrap();

    assert_eq!(outcome.artifact.location, StorageLocation::TempCache);
    assert!(outcome.artifact.status.contains("permission denied"));
    assert!(dir.path().join("cache/report.pdf").exists());
    assert!(!dir.path().join("shared").exists());
}

#[test]
fn inspect_reports_extraction_without_rendering() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("survey.xlsx");
    write_fixture(&input);

    let inspection = pipeline::inspect(&input, &TemplateSchema::default()).unwrap();
    assert_eq!(inspection.sheet_name, "WorkSheets");
    assert_eq!(inspection.meta.client, "Acme Civils Ltd");
    assert_eq!(inspection.raw_points.len(), 3);
    // Transform invariants: first y is the baseline, x accumulates
    assert_eq!(inspection.transformed[0].y, 0.0);
    assert_eq!(inspection.transformed[0].x, 3.0);
    assert_eq!(inspection.transformed[2].x, 12.0);
    assert_eq!(inspection.transformed[2].y, 75.0);
}

#[test]
fn missing_input_maps_to_input_error() {
    let err = pipeline::inspect(Path::new("/no/such.xlsx"), &TemplateSchema::default())
        .unwrap_err();
    assert_eq!(err.code, amtest_cli::exit_codes::EXIT_INPUT);
}
