//! `amtest-report` — Report assembly, PDF rendering and persistence.
//!
//! Takes the extracted metadata and the captured chart, interpolates them
//! into the fixed report structure, renders a PDF and walks the storage
//! fallback chain (temp cache → shared store → private store).

pub mod document;
pub mod error;
pub mod html;
pub mod pdf;
pub mod persist;

pub use document::{assemble, GradientBand, ReportDocument, SignatureLine};
pub use error::ReportError;
pub use html::render_html;
pub use pdf::render_pdf;
pub use persist::{persist_report, DiskStorage, ReportArtifact, Storage, StorageLocation};
