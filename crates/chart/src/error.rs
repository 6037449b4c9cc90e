use std::fmt;

#[derive(Debug)]
pub enum ChartError {
    /// Drawing backend failure while rasterizing.
    Render(String),
    /// PNG encoding of the rendered buffer failed.
    Encode(String),
}

impl fmt::Display for ChartError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Render(msg) => write!(f, "chart render error: {msg}"),
            Self::Encode(msg) => write!(f, "chart encode error: {msg}"),
        }
    }
}

impl std::error::Error for ChartError {}
