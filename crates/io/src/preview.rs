//! Styled HTML preview of the selected worksheet, for checking the uploaded
//! data before a report is generated.

use calamine::{Data, Range};

fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

fn cell_display(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::String(s) => escape(s),
        Data::Float(n) => {
            if n.fract() == 0.0 && n.abs() < 1e15 {
                format!("{}", *n as i64)
            } else {
                format!("{n}")
            }
        }
        Data::Int(n) => format!("{n}"),
        Data::Bool(b) => if *b { "TRUE" } else { "FALSE" }.to_string(),
        Data::Error(e) => format!("#{e:?}"),
        Data::DateTime(dt) => format!("{}", dt.as_f64()),
        Data::DateTimeIso(s) | Data::DurationIso(s) => escape(s),
    }
}

/// Render the worksheet as a self-contained HTML table.
pub fn render_sheet_html(sheet_name: &str, range: &Range<Data>) -> String {
    let mut rows = String::new();
    for row in range.rows() {
        rows.push_str("      <tr>");
        for cell in row {
            rows.push_str("<td>");
            rows.push_str(&cell_display(cell));
            rows.push_str("</td>");
        }
        rows.push_str("</tr>\n");
    }

    format!(
        r#"<!DOCTYPE html>
<html>
  <head>
    <meta charset="utf-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{title}</title>
    <style>
      body {{ font-family: Arial, sans-serif; margin: 0; padding: 10px; background-color: #f5f6fa; }}
      h2 {{ margin: 4px 0 10px 0; }}
      table {{ border-collapse: collapse; width: 100%; background-color: white; }}
      th, td {{ border: 1px solid #ddd; padding: 6px 8px; text-align: left; }}
      tr:nth-child(even) {{ background-color: #f9f9f9; }}
    </style>
  </head>
  <body>
    <h2>{title}</h2>
    <table>
{rows}    </table>
  </body>
</html>
"#,
        title = escape(sheet_name),
        rows = rows
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_cells_and_escapes_markup() {
        let mut range: Range<Data> = Range::new((0, 0), (1, 1));
        range.set_value((0, 0), Data::String("a<b".into()));
        range.set_value((0, 1), Data::Float(3.0));
        range.set_value((1, 0), Data::String("plain".into()));

        let html = render_sheet_html("WorkSheets", &range);
        assert!(html.contains("a&lt;b"));
        assert!(html.contains("<td>3</td>"));
        assert!(html.contains("<td>plain</td>"));
        assert!(html.contains("<title>WorkSheets</title>"));
    }
}
