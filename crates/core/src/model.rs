use serde::{Deserialize, Serialize};

/// Placeholder written into every metadata field whose source cell is empty
/// or absent. A valid, expected value — not an error marker.
pub const SENTINEL: &str = "-";

// ---------------------------------------------------------------------------
// Metadata
// ---------------------------------------------------------------------------

/// Condition of the penetrometer cone at the time of the test.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConeCondition {
    /// Whether the condition checkbox on the worksheet was ticked.
    pub checked: bool,
    /// Free-text status next to the checkbox ("good", "worn", ...).
    pub status: String,
}

impl Default for ConeCondition {
    fn default() -> Self {
        Self { checked: false, status: SENTINEL.to_string() }
    }
}

/// Flat record of the fixed-address header cells of one test worksheet.
///
/// Every field degrades to [`SENTINEL`] when the source cell is missing, so a
/// fully blank worksheet still produces a complete (if uninformative) record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TestMetadata {
    pub title: String,
    pub client: String,
    pub site: String,
    pub job_number: String,
    pub report_ref: String,
    pub core_sample_ref: String,
    pub test_date: String,
    pub report_date: String,
    pub technician: String,
    pub checked_by: String,
    pub equipment_ref: String,
    pub hammer_mass: String,
    pub drop_height: String,
    pub cone_angle: String,
    pub test_method: String,
    pub surface_type: String,
    pub material_description: String,
    pub weather: String,
    pub water_table: String,
    pub notes: String,
    pub cone_condition: ConeCondition,
}

impl Default for TestMetadata {
    fn default() -> Self {
        let s = || SENTINEL.to_string();
        Self {
            title: s(),
            client: s(),
            site: s(),
            job_number: s(),
            report_ref: s(),
            core_sample_ref: s(),
            test_date: s(),
            report_date: s(),
            technician: s(),
            checked_by: s(),
            equipment_ref: s(),
            hammer_mass: s(),
            drop_height: s(),
            cone_angle: s(),
            test_method: s(),
            surface_type: s(),
            material_description: s(),
            weather: s(),
            water_table: s(),
            notes: s(),
            cone_condition: ConeCondition::default(),
        }
    }
}

// ---------------------------------------------------------------------------
// Points
// ---------------------------------------------------------------------------

/// One (blow count, penetration depth) pair read from a worksheet triplet.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RawPoint {
    /// Drop-hammer blows applied for this increment.
    pub blows: f64,
    /// Cumulative probe depth in millimetres.
    pub depth_mm: f64,
}

/// Ordered sequence of raw points, sorted ascending by depth.
///
/// The depth ordering is a precondition of the cumulative transform, so the
/// only way to build a series is through [`PointSeries::from_unsorted`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PointSeries {
    points: Vec<RawPoint>,
}

impl PointSeries {
    /// Sort the collected points by depth and wrap them.
    pub fn from_unsorted(mut points: Vec<RawPoint>) -> Self {
        points.sort_by(|a, b| {
            a.depth_mm.partial_cmp(&b.depth_mm).unwrap_or(std::cmp::Ordering::Equal)
        });
        Self { points }
    }

    pub fn points(&self) -> &[RawPoint] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

/// Chart-ready coordinate: x = cumulative blows, y = baseline-relative depth.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TransformedPoint {
    pub x: f64,
    pub y: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_metadata_is_all_sentinel() {
        let meta = TestMetadata::default();
        assert_eq!(meta.title, SENTINEL);
        assert_eq!(meta.core_sample_ref, SENTINEL);
        assert_eq!(meta.notes, SENTINEL);
        assert!(!meta.cone_condition.checked);
        assert_eq!(meta.cone_condition.status, SENTINEL);
    }

    #[test]
    fn series_sorts_by_depth() {
        let series = PointSeries::from_unsorted(vec![
            RawPoint { blows: 5.0, depth_mm: 40.0 },
            RawPoint { blows: 3.0, depth_mm: 20.0 },
            RawPoint { blows: 2.0, depth_mm: 30.0 },
        ]);
        let depths: Vec<f64> = series.points().iter().map(|p| p.depth_mm).collect();
        assert_eq!(depths, vec![20.0, 30.0, 40.0]);
    }
}
