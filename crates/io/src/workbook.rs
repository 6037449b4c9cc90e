use std::path::Path;

use calamine::{open_workbook_auto, Data, Range, Reader, Sheets};

use crate::error::ImportError;
use crate::schema::TemplateSchema;

/// One opened workbook with its selected worksheet range.
///
/// Owned for the duration of a single extraction pass; dropped once the
/// metadata and point series have been copied out.
#[derive(Debug)]
pub struct Workbook {
    pub sheet_name: String,
    pub range: Range<Data>,
}

impl Workbook {
    /// Open a workbook (xlsx, xls, xlsb, ods) and select the test worksheet.
    ///
    /// Prefers the schema's `preferred_sheet` when present, otherwise falls
    /// back to the first sheet — matching the source template convention.
    pub fn open(path: &Path, schema: &TemplateSchema) -> Result<Self, ImportError> {
        let mut workbook: Sheets<_> =
            open_workbook_auto(path).map_err(|e| ImportError::Open(e.to_string()))?;

        let sheet_names: Vec<String> = workbook.sheet_names().to_vec();
        if sheet_names.is_empty() {
            return Err(ImportError::NoSheets);
        }

        let sheet_name = if sheet_names.iter().any(|n| n == &schema.preferred_sheet) {
            schema.preferred_sheet.clone()
        } else {
            sheet_names[0].clone()
        };
        log::debug!("using sheet '{sheet_name}'");

        let range = workbook
            .worksheet_range(&sheet_name)
            .map_err(|e| ImportError::SheetRead { sheet: sheet_name.clone(), message: e.to_string() })?;

        let (height, width) = range.get_size();
        if height == 0 || width == 0 {
            return Err(ImportError::EmptySheet { sheet: sheet_name });
        }

        Ok(Self { sheet_name, range })
    }
}
