//! Scatter/line rendering of the transformed series into an RGB buffer.

use amtest_core::TransformedPoint;
use plotters::prelude::*;

use crate::error::ChartError;
use crate::layout::{ChartLayout, ChartOptions, X_TICK, Y_TICK};

const GRID: RGBColor = RGBColor(225, 225, 225);
const SERIES: RGBColor = RGBColor(25, 80, 180);

/// Draw the chart into `buf` (RGB, `width * height * 3` bytes).
///
/// The depth axis is inverted — depth grows downward, as on the field sheet.
/// Completion is deterministic: when this returns Ok the buffer holds the
/// finished frame, so the capture step needs no render-settle delay.
pub fn render_chart(
    points: &[TransformedPoint],
    layout: &ChartLayout,
    options: &ChartOptions,
    buf: &mut [u8],
) -> Result<(), ChartError> {
    let err = |e: &dyn std::fmt::Display| ChartError::Render(e.to_string());

    let root =
        BitMapBackend::with_buffer(buf, (options.width, options.height)).into_drawing_area();
    root.fill(&WHITE).map_err(|e| err(&e))?;

    let mut chart = ChartBuilder::on(&root)
        .margin(16)
        .x_label_area_size(0)
        .y_label_area_size(0)
        // y runs from y_max down to 0 so depth increases downward
        .build_cartesian_2d(0f64..layout.x_max, layout.y_max..0f64)
        .map_err(|e| err(&e))?;

    // Grid lines at the fixed tick steps
    let mut x = 0.0;
    while x <= layout.x_max {
        chart
            .draw_series(LineSeries::new([(x, 0.0), (x, layout.y_max)], &GRID))
            .map_err(|e| err(&e))?;
        x += X_TICK;
    }
    let mut y = 0.0;
    while y <= layout.y_max {
        chart
            .draw_series(LineSeries::new([(0.0, y), (layout.x_max, y)], &GRID))
            .map_err(|e| err(&e))?;
        y += Y_TICK;
    }

    // Axis frame
    chart
        .draw_series(std::iter::once(PathElement::new(
            vec![
                (0.0, 0.0),
                (layout.x_max, 0.0),
                (layout.x_max, layout.y_max),
                (0.0, layout.y_max),
                (0.0, 0.0),
            ],
            BLACK.stroke_width(1),
        )))
        .map_err(|e| err(&e))?;

    // Scatter series joined by a line
    chart
        .draw_series(LineSeries::new(
            points.iter().map(|p| (p.x, p.y)),
            SERIES.stroke_width(2),
        ))
        .map_err(|e| err(&e))?;
    chart
        .draw_series(points.iter().map(|p| Circle::new((p.x, p.y), 4, SERIES.filled())))
        .map_err(|e| err(&e))?;

    root.present().map_err(|e| err(&e))?;
    Ok(())
}
