//! Assembly of the fixed-structure report document.
//!
//! Purely templating: metadata, chart image and boilerplate slot into fixed
//! sections. Any conditional logic (cone checkbox, sentinel placeholders) was
//! resolved upstream during extraction.

use amtest_chart::ChartImage;
use amtest_core::TestMetadata;
use serde::Serialize;

/// Standing disclaimer carried on every report.
pub const DISCLAIMER: &str = "CBR values are estimated from penetration-rate \
correlation and are indicative only. Results relate solely to the location \
tested; verification against laboratory CBR testing is recommended for \
design-critical works.";

/// Depth bands of the gradient analysis summary. The estimates themselves
/// are produced by a separate analysis step, so they render as placeholders.
const GRADIENT_BANDS_MM: [(u32, u32); 3] = [(0, 300), (300, 600), (600, 900)];

/// One gradient-analysis summary box.
#[derive(Debug, Clone, Serialize)]
pub struct GradientBand {
    pub range_label: String,
    pub cbr_estimate: String,
}

/// One line in the signature block.
#[derive(Debug, Clone, Serialize)]
pub struct SignatureLine {
    pub role: &'static str,
    pub name: String,
}

/// The complete assembled report: everything the PDF and HTML renderers need.
#[derive(Debug, Clone, Serialize)]
pub struct ReportDocument {
    pub meta: TestMetadata,
    pub chart: ChartImage,
    /// Number of readings behind the chart, shown in the chart caption.
    pub point_count: usize,
    pub gradient_bands: Vec<GradientBand>,
    pub signatures: Vec<SignatureLine>,
    pub disclaimer: &'static str,
    /// RFC 3339 generation timestamp, shown in the footer.
    pub generated_at: String,
}

/// Interpolate metadata, chart and boilerplate into the report structure.
pub fn assemble(meta: TestMetadata, chart: ChartImage, point_count: usize) -> ReportDocument {
    let gradient_bands = GRADIENT_BANDS_MM
        .iter()
        .map(|(from, to)| GradientBand {
            range_label: format!("{from} \u{2013} {to} mm"),
            cbr_estimate: "-".to_string(),
        })
        .collect();

    let signatures = vec![
        SignatureLine { role: "Tested by", name: meta.technician.clone() },
        SignatureLine { role: "Checked by", name: meta.checked_by.clone() },
        SignatureLine { role: "Approved by", name: "-".to_string() },
    ];

    ReportDocument {
        meta,
        chart,
        point_count,
        gradient_bands,
        signatures,
        disclaimer: DISCLAIMER,
        generated_at: chrono::Utc::now().to_rfc3339(),
    }
}
