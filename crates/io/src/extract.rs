//! Fixed-address extraction: header cells into [`TestMetadata`], the point
//! window into a [`PointSeries`].

use amtest_core::{ConeCondition, PointSeries, RawPoint, TestMetadata, SENTINEL};
use calamine::{Data, Range};

use crate::schema::{parse_addr, parse_col, TemplateSchema};

/// Read one cell as display text. `None` for empty/missing/error cells.
fn cell_text(range: &Range<Data>, addr: &str) -> Option<String> {
    let addr = parse_addr(addr).ok()?;
    let cell = range.get_value((addr.row, addr.col))?;
    let text = match cell {
        Data::Empty | Data::Error(_) => return None,
        Data::String(s) => s.trim().to_string(),
        Data::Float(n) => {
            // Integers without decimals, matching how the template displays them
            if n.fract() == 0.0 && n.abs() < 1e15 {
                format!("{}", *n as i64)
            } else {
                format!("{n}")
            }
        }
        Data::Int(n) => format!("{n}"),
        Data::Bool(b) => if *b { "TRUE" } else { "FALSE" }.to_string(),
        // 1900-system serial; header dates are normally typed as text
        Data::DateTime(dt) => format!("{}", dt.as_f64()),
        Data::DateTimeIso(s) | Data::DurationIso(s) => s.clone(),
    };
    if text.is_empty() {
        None
    } else {
        Some(text)
    }
}

/// Read one cell as a finite number. `None` for anything non-numeric.
fn cell_number(range: &Range<Data>, row: u32, col: u32) -> Option<f64> {
    let value = match range.get_value((row, col))? {
        Data::Float(n) => *n,
        Data::Int(n) => *n as f64,
        Data::String(s) => s.trim().parse::<f64>().ok()?,
        _ => return None,
    };
    value.is_finite().then_some(value)
}

fn cell_or_sentinel(range: &Range<Data>, addr: &str) -> String {
    cell_text(range, addr).unwrap_or_else(|| SENTINEL.to_string())
}

/// Checkbox cells hold "x", "yes", TRUE or 1 when ticked.
fn cell_flag(range: &Range<Data>, addr: &str) -> bool {
    match cell_text(range, addr) {
        Some(text) => matches!(text.to_ascii_lowercase().as_str(), "x" | "yes" | "true" | "1"),
        None => false,
    }
}

/// Read the fixed header cells into a metadata record.
///
/// Never fails: a missing or empty cell degrades to the sentinel placeholder.
pub fn extract_metadata(range: &Range<Data>, schema: &TemplateSchema) -> TestMetadata {
    let cells = &schema.metadata;
    TestMetadata {
        title: cell_or_sentinel(range, &cells.title),
        client: cell_or_sentinel(range, &cells.client),
        site: cell_or_sentinel(range, &cells.site),
        job_number: cell_or_sentinel(range, &cells.job_number),
        report_ref: cell_or_sentinel(range, &cells.report_ref),
        core_sample_ref: cell_or_sentinel(range, &cells.core_sample_ref),
        test_date: cell_or_sentinel(range, &cells.test_date),
        report_date: cell_or_sentinel(range, &cells.report_date),
        technician: cell_or_sentinel(range, &cells.technician),
        checked_by: cell_or_sentinel(range, &cells.checked_by),
        equipment_ref: cell_or_sentinel(range, &cells.equipment_ref),
        hammer_mass: cell_or_sentinel(range, &cells.hammer_mass),
        drop_height: cell_or_sentinel(range, &cells.drop_height),
        cone_angle: cell_or_sentinel(range, &cells.cone_angle),
        test_method: cell_or_sentinel(range, &cells.test_method),
        surface_type: cell_or_sentinel(range, &cells.surface_type),
        material_description: cell_or_sentinel(range, &cells.material_description),
        weather: cell_or_sentinel(range, &cells.weather),
        water_table: cell_or_sentinel(range, &cells.water_table),
        notes: cell_or_sentinel(range, &cells.notes),
        cone_condition: ConeCondition {
            checked: cell_flag(range, &cells.cone_condition_flag),
            status: cell_or_sentinel(range, &cells.cone_condition_status),
        },
    }
}

/// Scan the point window and collect (blows, depth) pairs.
///
/// Each row carries up to three independent triplets. A triplet is taken only
/// when all three cells are present and numeric; anything else skips that
/// triplet silently — a partially filled row is expected, not an error. The
/// collected points are sorted ascending by depth.
pub fn extract_points(range: &Range<Data>, schema: &TemplateSchema) -> PointSeries {
    let window = &schema.points;
    let mut points = Vec::new();

    for display_row in window.first_row..=window.last_row {
        let row = display_row - 1;
        for triplet in &window.triplets {
            // Validated by the schema; a bad column letter cannot reach here.
            let Some(index_col) = parse_col(&triplet.index) else { continue };
            let Some(blows_col) = parse_col(&triplet.blows) else { continue };
            let Some(depth_col) = parse_col(&triplet.depth) else { continue };

            let index = cell_number(range, row, index_col);
            let blows = cell_number(range, row, blows_col);
            let depth = cell_number(range, row, depth_col);
            match (index, blows, depth) {
                (Some(_), Some(blows), Some(depth_mm)) => {
                    points.push(RawPoint { blows, depth_mm });
                }
                _ => {} // incomplete or non-numeric triplet
            }
        }
    }

    log::debug!(
        "extracted {} point(s) from rows {}..={}",
        points.len(),
        window.first_row,
        window.last_row
    );
    PointSeries::from_unsorted(points)
}
