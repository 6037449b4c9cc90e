use std::fmt;

#[derive(Debug)]
pub enum ReportError {
    /// PDF rendering failure (font registration, image embed, serialization).
    Pdf(String),
    /// The artifact could not be written anywhere, including the fallbacks.
    Persist(String),
    /// Platform storage directories are unavailable.
    Storage(String),
}

impl fmt::Display for ReportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pdf(msg) => write!(f, "PDF render error: {msg}"),
            Self::Persist(msg) => write!(f, "persist error: {msg}"),
            Self::Storage(msg) => write!(f, "storage error: {msg}"),
        }
    }
}

impl std::error::Error for ReportError {}
