use crate::model::{PointSeries, TransformedPoint};

/// Convert a depth-sorted series into chart coordinates.
///
/// For index i: x = sum of blow counts 0..=i, y = depth[i] − depth[0].
/// Empty in → empty out; the first output point always has y = 0.
pub fn transform_points(series: &PointSeries) -> Vec<TransformedPoint> {
    let points = series.points();
    let Some(first) = points.first() else {
        return Vec::new();
    };

    let baseline = first.depth_mm;
    let mut cumulative = 0.0;
    points
        .iter()
        .map(|p| {
            cumulative += p.blows;
            TransformedPoint { x: cumulative, y: p.depth_mm - baseline }
        })
        .collect()
}
