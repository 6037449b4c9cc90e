use std::fmt;

#[derive(Debug)]
pub enum ImportError {
    /// Workbook could not be opened or parsed at all.
    Open(String),
    /// Workbook parsed but contains no worksheets.
    NoSheets,
    /// Named worksheet could not be read.
    SheetRead { sheet: String, message: String },
    /// Selected worksheet has no usable cells.
    EmptySheet { sheet: String },
    /// Template schema TOML failed to parse.
    SchemaParse(String),
    /// Template schema parsed but is internally inconsistent.
    SchemaValidation(String),
    /// A cell address in the schema is not a valid A1 reference.
    BadAddress(String),
    /// File read error (schema file, etc.).
    Io(String),
}

impl fmt::Display for ImportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Open(msg) => write!(f, "failed to open workbook: {msg}"),
            Self::NoSheets => write!(f, "no worksheets found in the workbook"),
            Self::SheetRead { sheet, message } => {
                write!(f, "failed to read sheet '{sheet}': {message}")
            }
            Self::EmptySheet { sheet } => {
                write!(f, "the worksheet '{sheet}' is empty or invalid")
            }
            Self::SchemaParse(msg) => write!(f, "schema parse error: {msg}"),
            Self::SchemaValidation(msg) => write!(f, "schema validation error: {msg}"),
            Self::BadAddress(addr) => write!(f, "invalid cell address '{addr}'"),
            Self::Io(msg) => write!(f, "IO error: {msg}"),
        }
    }
}

impl std::error::Error for ImportError {}
