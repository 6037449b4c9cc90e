use amtest_core::TransformedPoint;
use serde::{Deserialize, Serialize};

/// Grid/tick step along the blows axis.
pub const X_TICK: f64 = 5.0;
/// Grid/tick step along the depth axis.
pub const Y_TICK: f64 = 50.0;

/// Floor for the blows axis so an empty series still yields a drawable chart.
pub const MIN_X_MAX: f64 = 10.0;
/// Floor for the depth axis.
pub const MIN_Y_MAX: f64 = 100.0;

/// Raster dimensions of the captured chart.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartOptions {
    pub width: u32,
    pub height: u32,
}

impl Default for ChartOptions {
    fn default() -> Self {
        Self { width: 900, height: 600 }
    }
}

/// Axis bounds computed from the data.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChartLayout {
    /// Blows axis upper bound: next multiple of 10 above the data maximum.
    pub x_max: f64,
    /// Depth axis upper bound: next multiple of 100 above the data maximum.
    pub y_max: f64,
}

/// Round `value` up to the next multiple of `step`.
fn round_up(value: f64, step: f64) -> f64 {
    (value / step).ceil() * step
}

impl ChartLayout {
    pub fn from_points(points: &[TransformedPoint]) -> Self {
        let data_x_max = points.iter().map(|p| p.x).fold(0.0, f64::max);
        let data_y_max = points.iter().map(|p| p.y).fold(0.0, f64::max);
        Self {
            x_max: round_up(data_x_max, 10.0).max(MIN_X_MAX),
            y_max: round_up(data_y_max, 100.0).max(MIN_Y_MAX),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pts(pairs: &[(f64, f64)]) -> Vec<TransformedPoint> {
        pairs.iter().map(|&(x, y)| TransformedPoint { x, y }).collect()
    }

    #[test]
    fn rounds_up_to_next_multiples() {
        let layout = ChartLayout::from_points(&pts(&[(12.0, 230.0), (37.0, 595.0)]));
        assert_eq!(layout.x_max, 40.0);
        assert_eq!(layout.y_max, 600.0);
    }

    #[test]
    fn exact_multiples_are_kept() {
        let layout = ChartLayout::from_points(&pts(&[(40.0, 600.0)]));
        assert_eq!(layout.x_max, 40.0);
        assert_eq!(layout.y_max, 600.0);
    }

    #[test]
    fn empty_series_clamps_to_minimum_bounds() {
        let layout = ChartLayout::from_points(&[]);
        assert_eq!(layout.x_max, MIN_X_MAX);
        assert_eq!(layout.y_max, MIN_Y_MAX);
    }

    #[test]
    fn small_data_clamps_to_minimum_bounds() {
        let layout = ChartLayout::from_points(&pts(&[(2.0, 15.0)]));
        assert_eq!(layout.x_max, MIN_X_MAX);
        assert_eq!(layout.y_max, MIN_Y_MAX);
    }
}
