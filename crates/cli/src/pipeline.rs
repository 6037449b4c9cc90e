//! The report-generation pipeline, end to end.
//!
//! Strictly sequential: import → extract → transform → chart capture →
//! assemble → PDF → persist. Each stage failure converts to one user-facing
//! [`CliError`]; nothing is retried.

use std::path::{Path, PathBuf};

use amtest_chart::{capture_chart, ChartOptions};
use amtest_core::{transform_points, RawPoint, TestMetadata, TransformedPoint};
use amtest_io::{extract_metadata, extract_points, ImportError, TemplateSchema, Workbook};
use amtest_report::{
    assemble, persist_report, render_html, render_pdf, DiskStorage, ReportArtifact, Storage,
};

use crate::exit_codes::{EXIT_CHART, EXIT_INPUT, EXIT_PDF, EXIT_SCHEMA, EXIT_STORAGE_FAILED};
use crate::CliError;

fn import_err(e: ImportError) -> CliError {
    let code = match e {
        ImportError::SchemaParse(_) | ImportError::SchemaValidation(_) | ImportError::BadAddress(_) => {
            EXIT_SCHEMA
        }
        _ => EXIT_INPUT,
    };
    CliError::new(code, e.to_string())
}

/// Load a template schema file, or the built-in template v1 when none given.
pub fn load_schema(path: Option<&Path>) -> Result<TemplateSchema, CliError> {
    let Some(path) = path else {
        return Ok(TemplateSchema::default());
    };
    let text = std::fs::read_to_string(path)
        .map_err(|e| CliError::new(EXIT_SCHEMA, format!("cannot read schema {}: {e}", path.display())))?;
    TemplateSchema::from_toml(&text).map_err(import_err)
}

// ---------------------------------------------------------------------------
// Inspection (shared by `inspect` and `points`)
// ---------------------------------------------------------------------------

/// Everything extracted from one workbook, before any rendering.
#[derive(Debug, serde::Serialize)]
pub struct Inspection {
    pub sheet_name: String,
    pub meta: TestMetadata,
    pub raw_points: Vec<RawPoint>,
    pub transformed: Vec<TransformedPoint>,
}

pub fn inspect(input: &Path, schema: &TemplateSchema) -> Result<Inspection, CliError> {
    let workbook = Workbook::open(input, schema).map_err(import_err)?;
    let meta = extract_metadata(&workbook.range, schema);
    let series = extract_points(&workbook.range, schema);
    let transformed = transform_points(&series);
    Ok(Inspection {
        sheet_name: workbook.sheet_name,
        meta,
        raw_points: series.points().to_vec(),
        transformed,
    })
}

/// Styled HTML preview of the selected worksheet.
pub fn preview(input: &Path, schema: &TemplateSchema) -> Result<String, CliError> {
    let workbook = Workbook::open(input, schema).map_err(import_err)?;
    Ok(amtest_io::preview::render_sheet_html(&workbook.sheet_name, &workbook.range))
}

// ---------------------------------------------------------------------------
// Generation
// ---------------------------------------------------------------------------

pub struct GenerateRequest {
    pub input: PathBuf,
    pub schema: TemplateSchema,
    pub chart: ChartOptions,
    /// Report file name; defaults to `test_report_<timestamp>.pdf`.
    pub file_name: Option<String>,
    /// Also write the HTML rendition here.
    pub html_out: Option<PathBuf>,
}

pub struct GenerateOutcome {
    pub artifact: ReportArtifact,
    pub html_path: Option<PathBuf>,
    pub point_count: usize,
}

/// Run the full pipeline against an explicit storage implementation.
pub fn generate_with_storage(
    req: &GenerateRequest,
    storage: &dyn Storage,
) -> Result<GenerateOutcome, CliError> {
    let workbook = Workbook::open(&req.input, &req.schema).map_err(import_err)?;
    log::info!("imported sheet '{}' from {}", workbook.sheet_name, req.input.display());

    let meta = extract_metadata(&workbook.range, &req.schema);
    let series = extract_points(&workbook.range, &req.schema);
    let transformed = transform_points(&series);
    drop(workbook); // extraction pass done

    let chart = capture_chart(&transformed, &req.chart)
        .map_err(|e| CliError::new(EXIT_CHART, e.to_string()))?;

    let document = assemble(meta, chart, transformed.len());

    let html_path = match &req.html_out {
        Some(path) => {
            std::fs::write(path, render_html(&document))
                .map_err(|e| CliError::other(format!("cannot write {}: {e}", path.display())))?;
            Some(path.clone())
        }
        None => None,
    };

    let pdf = render_pdf(&document).map_err(|e| CliError::new(EXIT_PDF, e.to_string()))?;

    let file_name = req
        .file_name
        .clone()
        .unwrap_or_else(|| format!("test_report_{}.pdf", chrono::Local::now().format("%Y%m%d_%H%M%S")));
    let artifact = persist_report(storage, &file_name, &pdf)
        .map_err(|e| CliError::new(EXIT_STORAGE_FAILED, e.to_string()))?;

    Ok(GenerateOutcome { artifact, html_path, point_count: transformed.len() })
}

/// Run the full pipeline against platform storage directories.
pub fn generate(
    req: &GenerateRequest,
    shared_dir_override: Option<&Path>,
    allow_shared: bool,
) -> Result<GenerateOutcome, CliError> {
    let mut storage = DiskStorage::from_platform(allow_shared)
        .map_err(|e| CliError::other(e.to_string()))?;
    if let Some(dir) = shared_dir_override {
        storage.shared_dir = dir.to_path_buf();
    }
    generate_with_storage(req, &storage)
}
