//! `amtest-core` — Penetrometer test domain model and point transform.
//!
//! Pure crate: receives worksheet data already extracted elsewhere, returns
//! chart-ready coordinates. No I/O dependencies.

pub mod model;
pub mod transform;

pub use model::{ConeCondition, PointSeries, RawPoint, TestMetadata, TransformedPoint, SENTINEL};
pub use transform::transform_points;
