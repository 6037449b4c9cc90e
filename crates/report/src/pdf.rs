//! Fixed-layout PDF rendering of the assembled report.
//!
//! Works from the same [`ReportDocument`] as the HTML markup. Text is typeset
//! with PDF builtin fonts, so rendering has no system-font dependency; the
//! chart arrives as a pre-captured PNG and is embedded as-is.

use std::io::Cursor;

use printpdf::image_crate::codecs::png::PngDecoder;
use printpdf::{
    BuiltinFont, Color, Image, ImageTransform, IndirectFontRef, Line, Mm, PdfDocument,
    PdfLayerReference, Point, Rgb,
};

use crate::document::ReportDocument;
use crate::error::ReportError;

const PAGE_W: f32 = 210.0;
const PAGE_H: f32 = 297.0;
const MARGIN: f32 = 20.0;
const CHART_DPI: f32 = 150.0;

fn pdf_err(e: impl std::fmt::Display) -> ReportError {
    ReportError::Pdf(e.to_string())
}

fn rule(layer: &PdfLayerReference, x1: f32, x2: f32, y: f32) {
    let line = Line {
        points: vec![
            (Point::new(Mm(x1), Mm(y)), false),
            (Point::new(Mm(x2), Mm(y)), false),
        ],
        is_closed: false,
    };
    layer.add_line(line);
}

fn boxed(layer: &PdfLayerReference, x: f32, y: f32, w: f32, h: f32) {
    let line = Line {
        points: vec![
            (Point::new(Mm(x), Mm(y)), false),
            (Point::new(Mm(x + w), Mm(y)), false),
            (Point::new(Mm(x + w), Mm(y + h)), false),
            (Point::new(Mm(x), Mm(y + h)), false),
        ],
        is_closed: true,
    };
    layer.add_line(line);
}

/// Naive word wrap; builtin-font metrics are close enough for footer text.
fn wrap(text: &str, max_chars: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut line = String::new();
    for word in text.split_whitespace() {
        if !line.is_empty() && line.len() + 1 + word.len() > max_chars {
            lines.push(std::mem::take(&mut line));
        }
        if !line.is_empty() {
            line.push(' ');
        }
        line.push_str(word);
    }
    if !line.is_empty() {
        lines.push(line);
    }
    lines
}

fn gray(layer: &PdfLayerReference) {
    layer.set_fill_color(Color::Rgb(Rgb::new(0.4, 0.4, 0.4, None)));
}

fn black(layer: &PdfLayerReference) {
    layer.set_fill_color(Color::Rgb(Rgb::new(0.0, 0.0, 0.0, None)));
}

/// One label/value row of the metadata block.
fn meta_row(
    layer: &PdfLayerReference,
    bold: &IndirectFontRef,
    regular: &IndirectFontRef,
    x: f32,
    y: f32,
    label: &str,
    value: &str,
) {
    layer.use_text(label, 9.0, Mm(x), Mm(y), bold);
    layer.use_text(value, 9.0, Mm(x + 34.0), Mm(y), regular);
}

/// Render the assembled report to PDF bytes.
pub fn render_pdf(doc: &ReportDocument) -> Result<Vec<u8>, ReportError> {
    let m = &doc.meta;
    let (pdf, page1, layer1) =
        PdfDocument::new(&m.title, Mm(PAGE_W), Mm(PAGE_H), "report");
    let regular = pdf.add_builtin_font(BuiltinFont::Helvetica).map_err(pdf_err)?;
    let bold = pdf.add_builtin_font(BuiltinFont::HelveticaBold).map_err(pdf_err)?;

    // ---- page 1: header, metadata, chart, gradient summary ----
    let layer = pdf.get_page(page1).get_layer(layer1);

    layer.use_text(m.title.as_str(), 16.0, Mm(MARGIN), Mm(278.0), &bold);
    gray(&layer);
    layer.use_text("Penetrometer test report", 10.0, Mm(MARGIN), Mm(271.0), &regular);
    black(&layer);
    layer.set_outline_thickness(0.6);
    rule(&layer, MARGIN, PAGE_W - MARGIN, 268.0);

    let left: [(&str, &str); 8] = [
        ("Client", m.client.as_str()),
        ("Site", m.site.as_str()),
        ("Job number", m.job_number.as_str()),
        ("Report ref", m.report_ref.as_str()),
        ("Core sample ref", m.core_sample_ref.as_str()),
        ("Test method", m.test_method.as_str()),
        ("Surface type", m.surface_type.as_str()),
        ("Material", m.material_description.as_str()),
    ];
    let right: [(&str, &str); 8] = [
        ("Test date", m.test_date.as_str()),
        ("Report date", m.report_date.as_str()),
        ("Technician", m.technician.as_str()),
        ("Checked by", m.checked_by.as_str()),
        ("Equipment ref", m.equipment_ref.as_str()),
        ("Hammer mass", m.hammer_mass.as_str()),
        ("Drop height", m.drop_height.as_str()),
        ("Cone angle", m.cone_angle.as_str()),
    ];
    let mut y = 261.0;
    for (label, value) in left {
        meta_row(&layer, &bold, &regular, MARGIN, y, label, value);
        y -= 6.5;
    }
    let mut y = 261.0;
    for (label, value) in right {
        meta_row(&layer, &bold, &regular, 112.0, y, label, value);
        y -= 6.5;
    }

    let cone = format!(
        "Cone condition: {} ({})",
        if m.cone_condition.checked { "checked" } else { "not checked" },
        m.cone_condition.status
    );
    layer.use_text(cone, 9.0, Mm(MARGIN), Mm(204.0), &regular);

    // Chart image, centred, with typeset axis labels
    let png = doc.chart.png_bytes().map_err(pdf_err)?;
    let decoder = PngDecoder::new(Cursor::new(png.as_slice())).map_err(pdf_err)?;
    let image = Image::try_from(decoder).map_err(pdf_err)?;
    let chart_w_mm = doc.chart.width as f32 / CHART_DPI * 25.4;
    let chart_h_mm = doc.chart.height as f32 / CHART_DPI * 25.4;
    let chart_x = (PAGE_W - chart_w_mm) / 2.0;
    let chart_y = 196.0 - chart_h_mm;
    image.add_to_layer(
        layer.clone(),
        ImageTransform {
            translate_x: Some(Mm(chart_x)),
            translate_y: Some(Mm(chart_y)),
            dpi: Some(CHART_DPI),
            ..Default::default()
        },
    );
    gray(&layer);
    layer.use_text("Cumulative blows", 8.0, Mm(PAGE_W / 2.0 - 13.0), Mm(chart_y - 4.0), &regular);
    layer.use_text(
        format!("Penetration depth (mm), {} readings", doc.point_count),
        8.0,
        Mm(chart_x),
        Mm(chart_y - 9.0),
        &regular,
    );
    black(&layer);

    let bands_top = chart_y - 22.0;
    layer.use_text("Gradient analysis", 11.0, Mm(MARGIN), Mm(bands_top), &bold);
    let band_w = (PAGE_W - 2.0 * MARGIN - 12.0) / 3.0;
    layer.set_outline_thickness(0.4);
    for (i, band) in doc.gradient_bands.iter().enumerate() {
        let x = MARGIN + i as f32 * (band_w + 6.0);
        let y0 = bands_top - 18.0;
        boxed(&layer, x, y0, band_w, 14.0);
        layer.use_text(band.range_label.as_str(), 9.0, Mm(x + 3.0), Mm(y0 + 8.5), &bold);
        layer.use_text(
            format!("CBR estimate: {}", band.cbr_estimate),
            8.0,
            Mm(x + 3.0),
            Mm(y0 + 3.0),
            &regular,
        );
    }

    // ---- page 2: notes, signatures, disclaimer ----
    let (page2, layer2) = pdf.add_page(Mm(PAGE_W), Mm(PAGE_H), "report");
    let layer = pdf.get_page(page2).get_layer(layer2);

    layer.use_text("Notes", 11.0, Mm(MARGIN), Mm(272.0), &bold);
    let mut y = 265.0;
    for line in wrap(&m.notes, 95) {
        layer.use_text(line, 9.0, Mm(MARGIN), Mm(y), &regular);
        y -= 4.5;
    }

    layer.use_text("Signatures", 11.0, Mm(MARGIN), Mm(245.0), &bold);
    let mut y = 234.0;
    layer.set_outline_thickness(0.4);
    for sig in &doc.signatures {
        layer.use_text(sig.role, 9.0, Mm(MARGIN), Mm(y), &bold);
        layer.use_text(sig.name.as_str(), 9.0, Mm(MARGIN + 30.0), Mm(y), &regular);
        rule(&layer, 110.0, PAGE_W - MARGIN, y - 1.0);
        y -= 14.0;
    }

    gray(&layer);
    let mut y = 44.0;
    for line in wrap(doc.disclaimer, 110) {
        layer.use_text(line, 7.5, Mm(MARGIN), Mm(y), &regular);
        y -= 3.8;
    }
    layer.use_text(
        format!("Generated {}", doc.generated_at),
        7.0,
        Mm(MARGIN),
        Mm(25.0),
        &regular,
    );
    black(&layer);

    pdf.save_to_bytes().map_err(pdf_err)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::assemble;
    use amtest_chart::{capture_chart, ChartOptions};
    use amtest_core::{TestMetadata, TransformedPoint};

    #[test]
    fn renders_pdf_bytes() {
        let points = [
            TransformedPoint { x: 3.0, y: 0.0 },
            TransformedPoint { x: 8.0, y: 20.0 },
        ];
        let chart = capture_chart(&points, &ChartOptions { width: 300, height: 200 }).unwrap();
        let mut meta = TestMetadata::default();
        meta.title = "DCP Test Report".into();

        let doc = assemble(meta, chart, points.len());
        let bytes = render_pdf(&doc).unwrap();
        assert!(bytes.starts_with(b"%PDF"));
        assert!(bytes.len() > 1000);
    }
}
