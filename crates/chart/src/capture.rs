//! Capture: rasterize the chart and hand back a base64 PNG snapshot.

use amtest_core::TransformedPoint;
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use serde::{Deserialize, Serialize};

use crate::error::ChartError;
use crate::layout::{ChartLayout, ChartOptions};
use crate::render::render_chart;

/// Base64-encoded PNG snapshot of the rendered chart.
///
/// Produced exactly once per report generation and treated as opaque binary
/// data downstream.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChartImage {
    pub width: u32,
    pub height: u32,
    pub png_base64: String,
}

impl ChartImage {
    /// Inline `src` value for embedding in markup.
    pub fn data_uri(&self) -> String {
        format!("data:image/png;base64,{}", self.png_base64)
    }

    /// Decode back to raw PNG bytes (for PDF embedding).
    pub fn png_bytes(&self) -> Result<Vec<u8>, ChartError> {
        BASE64
            .decode(&self.png_base64)
            .map_err(|e| ChartError::Encode(format!("invalid base64 payload: {e}")))
    }
}

/// Render the series and capture the finished frame as a PNG snapshot.
pub fn capture_chart(
    points: &[TransformedPoint],
    options: &ChartOptions,
) -> Result<ChartImage, ChartError> {
    let layout = ChartLayout::from_points(points);
    let mut buf = vec![0u8; options.width as usize * options.height as usize * 3];
    render_chart(points, &layout, options, &mut buf)?;

    let img: image::RgbImage = image::ImageBuffer::from_raw(options.width, options.height, buf)
        .ok_or_else(|| ChartError::Encode("render buffer size mismatch".into()))?;
    let mut png = Vec::new();
    img.write_to(&mut std::io::Cursor::new(&mut png), image::ImageOutputFormat::Png)
        .map_err(|e| ChartError::Encode(e.to_string()))?;

    log::debug!("captured chart: {} points, {} PNG bytes", points.len(), png.len());
    Ok(ChartImage {
        width: options.width,
        height: options.height,
        png_base64: BASE64.encode(&png),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pts(pairs: &[(f64, f64)]) -> Vec<TransformedPoint> {
        pairs.iter().map(|&(x, y)| TransformedPoint { x, y }).collect()
    }

    #[test]
    fn captures_png_snapshot() {
        let points = pts(&[(3.0, 0.0), (8.0, 20.0), (14.0, 180.0)]);
        let image = capture_chart(&points, &ChartOptions::default()).unwrap();
        assert_eq!(image.width, 900);
        assert!(!image.png_base64.is_empty());

        let png = image.png_bytes().unwrap();
        assert_eq!(&png[..8], b"\x89PNG\r\n\x1a\n");
        assert!(image.data_uri().starts_with("data:image/png;base64,"));
    }

    #[test]
    fn empty_series_still_produces_an_image() {
        let image = capture_chart(&[], &ChartOptions { width: 300, height: 200 }).unwrap();
        let png = image.png_bytes().unwrap();
        assert_eq!(&png[..8], b"\x89PNG\r\n\x1a\n");
    }
}
