//! `amtest-chart` — Penetration chart rendering and capture.
//!
//! Lays out a scatter/line chart of cumulative blows against
//! baseline-relative depth (depth increasing downward), rasterizes it
//! in-process and captures the result as a base64 PNG. Axis text is
//! deliberately not drawn here — the report layer typesets labels around the
//! captured image, so rendering needs no system fonts.

pub mod capture;
pub mod error;
pub mod layout;
pub mod render;

pub use capture::{capture_chart, ChartImage};
pub use error::ChartError;
pub use layout::{ChartLayout, ChartOptions};
