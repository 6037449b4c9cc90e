//! `amtest-io` — Workbook import and worksheet data extraction.
//!
//! Opens a spreadsheet file, selects the test worksheet, and reads the
//! fixed-address cells defined by a [`schema::TemplateSchema`] into the
//! domain records from `amtest-core`. One-way import only; workbooks are
//! never written back.

pub mod error;
pub mod extract;
pub mod preview;
pub mod schema;
pub mod workbook;

pub use error::ImportError;
pub use extract::{extract_metadata, extract_points};
pub use schema::TemplateSchema;
pub use workbook::Workbook;
