//! Self-contained HTML markup of the assembled report, with the chart
//! embedded as a data URI. Used for on-screen preview and sharing; the PDF
//! renderer works from the same [`ReportDocument`].

use crate::document::ReportDocument;

fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

fn meta_row(label: &str, value: &str) -> String {
    format!(
        "        <tr><th>{}</th><td>{}</td></tr>\n",
        escape(label),
        escape(value)
    )
}

/// Render the report as one self-contained HTML document.
pub fn render_html(doc: &ReportDocument) -> String {
    let m = &doc.meta;

    let mut left = String::new();
    left.push_str(&meta_row("Client", &m.client));
    left.push_str(&meta_row("Site", &m.site));
    left.push_str(&meta_row("Job number", &m.job_number));
    left.push_str(&meta_row("Report ref", &m.report_ref));
    left.push_str(&meta_row("Core sample ref", &m.core_sample_ref));
    left.push_str(&meta_row("Test method", &m.test_method));
    left.push_str(&meta_row("Surface type", &m.surface_type));
    left.push_str(&meta_row("Material", &m.material_description));

    let mut right = String::new();
    right.push_str(&meta_row("Test date", &m.test_date));
    right.push_str(&meta_row("Report date", &m.report_date));
    right.push_str(&meta_row("Technician", &m.technician));
    right.push_str(&meta_row("Checked by", &m.checked_by));
    right.push_str(&meta_row("Equipment ref", &m.equipment_ref));
    right.push_str(&meta_row("Hammer mass", &m.hammer_mass));
    right.push_str(&meta_row("Drop height", &m.drop_height));
    right.push_str(&meta_row("Cone angle", &m.cone_angle));

    let cone = format!(
        "Cone condition: {} ({})",
        if m.cone_condition.checked { "checked" } else { "not checked" },
        escape(&m.cone_condition.status)
    );

    let gradient_boxes: String = doc
        .gradient_bands
        .iter()
        .map(|band| {
            format!(
                "      <div class=\"band\"><div class=\"range\">{}</div><div class=\"cbr\">CBR estimate: {}</div></div>\n",
                escape(&band.range_label),
                escape(&band.cbr_estimate)
            )
        })
        .collect();

    let signature_rows: String = doc
        .signatures
        .iter()
        .map(|sig| {
            format!(
                "        <tr><th>{}</th><td>{}</td><td class=\"line\">&nbsp;</td></tr>\n",
                escape(sig.role),
                escape(&sig.name)
            )
        })
        .collect();

    format!(
        r#"<!DOCTYPE html>
<html>
  <head>
    <meta charset="utf-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{title}</title>
    <style>
      body {{ font-family: Arial, sans-serif; margin: 0; padding: 24px; color: #1a1a1a; }}
      h1 {{ font-size: 22px; margin: 0 0 4px 0; }}
      .subhead {{ color: #555; margin-bottom: 16px; }}
      .columns {{ display: flex; gap: 24px; }}
      table.meta {{ border-collapse: collapse; flex: 1; }}
      table.meta th {{ text-align: left; padding: 4px 10px 4px 0; color: #444; font-weight: 600; white-space: nowrap; }}
      table.meta td {{ padding: 4px 0; }}
      .chart {{ margin: 20px 0; text-align: center; }}
      .chart img {{ max-width: 100%; border: 1px solid #ccc; }}
      .chart .caption {{ color: #555; font-size: 12px; margin-top: 4px; }}
      .bands {{ display: flex; gap: 12px; margin: 16px 0; }}
      .band {{ border: 1px solid #bbb; border-radius: 4px; padding: 10px 14px; flex: 1; }}
      .band .range {{ font-weight: 600; }}
      .cone {{ margin: 12px 0; }}
      table.signatures {{ border-collapse: collapse; margin-top: 24px; width: 100%; }}
      table.signatures th {{ text-align: left; padding: 10px 12px 10px 0; width: 110px; }}
      table.signatures td.line {{ border-bottom: 1px solid #333; width: 45%; }}
      .disclaimer {{ font-size: 11px; color: #666; margin-top: 28px; }}
      .footer {{ font-size: 10px; color: #999; margin-top: 10px; }}
    </style>
  </head>
  <body>
    <h1>{title}</h1>
    <div class="subhead">Penetrometer test report</div>
    <div class="columns">
      <table class="meta">
{left}      </table>
      <table class="meta">
{right}      </table>
    </div>
    <div class="cone">{cone}</div>
    <div class="chart">
      <img src="{chart}" alt="Penetration chart">
      <div class="caption">Cumulative blows vs penetration depth ({points} readings)</div>
    </div>
    <h2>Gradient analysis</h2>
    <div class="bands">
{gradient}    </div>
    <div class="notes"><strong>Notes:</strong> {notes}</div>
    <table class="signatures">
{signatures}    </table>
    <div class="disclaimer">{disclaimer}</div>
    <div class="footer">Generated {generated}</div>
  </body>
</html>
"#,
        title = escape(&m.title),
        left = left,
        right = right,
        cone = cone,
        chart = doc.chart.data_uri(),
        points = doc.point_count,
        gradient = gradient_boxes,
        notes = escape(&m.notes),
        signatures = signature_rows,
        disclaimer = escape(doc.disclaimer),
        generated = escape(&doc.generated_at),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::assemble;
    use amtest_chart::ChartImage;
    use amtest_core::TestMetadata;

    fn doc() -> ReportDocument {
        let mut meta = TestMetadata::default();
        meta.title = "DCP Test <Report>".into();
        meta.client = "Acme & Sons".into();
        meta.core_sample_ref = "CS-042".into();
        let chart = ChartImage { width: 10, height: 10, png_base64: "aGVsbG8=".into() };
        assemble(meta, chart, 7)
    }

    #[test]
    fn interpolates_fields_and_escapes() {
        let html = render_html(&doc());
        assert!(html.contains("DCP Test &lt;Report&gt;"));
        assert!(html.contains("Acme &amp; Sons"));
        // The core sample ref renders as the single field, nothing else
        assert!(html.contains("<tr><th>Core sample ref</th><td>CS-042</td></tr>"));
        assert!(html.contains("data:image/png;base64,aGVsbG8="));
        assert!(html.contains("7 readings"));
        assert!(html.contains("CBR estimate: -"));
    }

    #[test]
    fn sentinel_fields_render_as_placeholder() {
        let html = render_html(&doc());
        // Untouched fields carry the sentinel straight through
        assert!(html.contains("<tr><th>Site</th><td>-</td></tr>"));
    }
}
