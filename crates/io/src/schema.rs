//! Versioned template schema: logical field name → worksheet cell address.
//!
//! The fixed cell layout of the field worksheet is an implicit contract with
//! the spreadsheet template. It lives here as data (TOML-overridable) rather
//! than as literals inside the extraction code, so a template revision is a
//! schema file change, not a code change.

use serde::{Deserialize, Serialize};

use crate::error::ImportError;

/// Zero-based worksheet coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellAddr {
    pub row: u32,
    pub col: u32,
}

/// Parse an A1-style reference ("C4", "AB12") into a zero-based coordinate.
pub fn parse_addr(addr: &str) -> Result<CellAddr, ImportError> {
    let addr = addr.trim();
    let split = addr.find(|c: char| c.is_ascii_digit());
    let Some(split) = split else {
        return Err(ImportError::BadAddress(addr.to_string()));
    };
    let (letters, digits) = addr.split_at(split);
    let col = parse_col(letters).ok_or_else(|| ImportError::BadAddress(addr.to_string()))?;
    let row: u32 = digits
        .parse()
        .ok()
        .filter(|r| *r >= 1)
        .ok_or_else(|| ImportError::BadAddress(addr.to_string()))?;
    Ok(CellAddr { row: row - 1, col })
}

/// Parse column letters ("A", "C", "AB") into a zero-based column index.
pub fn parse_col(letters: &str) -> Option<u32> {
    if letters.is_empty() {
        return None;
    }
    let mut col: u32 = 0;
    for c in letters.chars() {
        if !c.is_ascii_alphabetic() {
            return None;
        }
        col = col * 26 + (c.to_ascii_uppercase() as u32 - 'A' as u32 + 1);
    }
    Some(col - 1)
}

// ---------------------------------------------------------------------------
// Metadata cell map
// ---------------------------------------------------------------------------

/// Addresses of the header cells, one per [`amtest_core::TestMetadata`] field.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MetadataCells {
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
    pub cone_condition_flag: String,
    pub cone_condition_status: String,
}

impl Default for MetadataCells {
    fn default() -> Self {
        // Template v1 layout: two label/value columns in the header block,
        // equipment details below, free-text notes and the cone checkbox last.
        Self {
            title: "B2".into(),
            client: "C4".into(),
            site: "C5".into(),
            job_number: "C6".into(),
            report_ref: "C7".into(),
            core_sample_ref: "C8".into(),
            test_date: "G4".into(),
            report_date: "G5".into(),
            technician: "G6".into(),
            checked_by: "G7".into(),
            equipment_ref: "G8".into(),
            hammer_mass: "C10".into(),
            drop_height: "C11".into(),
            cone_angle: "C12".into(),
            test_method: "C13".into(),
            surface_type: "G10".into(),
            material_description: "G11".into(),
            weather: "G12".into(),
            water_table: "G13".into(),
            notes: "B15".into(),
            cone_condition_flag: "C16".into(),
            cone_condition_status: "E16".into(),
        }
    }
}

impl MetadataCells {
    /// All (field name, address) pairs, for validation and diagnostics.
    pub fn entries(&self) -> Vec<(&'static str, &str)> {
        vec![
            ("title", &self.title),
            ("client", &self.client),
            ("site", &self.site),
            ("job_number", &self.job_number),
            ("report_ref", &self.report_ref),
            ("core_sample_ref", &self.core_sample_ref),
            ("test_date", &self.test_date),
            ("report_date", &self.report_date),
            ("technician", &self.technician),
            ("checked_by", &self.checked_by),
            ("equipment_ref", &self.equipment_ref),
            ("hammer_mass", &self.hammer_mass),
            ("drop_height", &self.drop_height),
            ("cone_angle", &self.cone_angle),
            ("test_method", &self.test_method),
            ("surface_type", &self.surface_type),
            ("material_description", &self.material_description),
            ("weather", &self.weather),
            ("water_table", &self.water_table),
            ("notes", &self.notes),
            ("cone_condition_flag", &self.cone_condition_flag),
            ("cone_condition_status", &self.cone_condition_status),
        ]
    }
}

// ---------------------------------------------------------------------------
// Point window
// ---------------------------------------------------------------------------

/// Column letters of one (index, blows, depth) triplet.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TripletColumns {
    pub index: String,
    pub blows: String,
    pub depth: String,
}

/// Row window and column triplets holding the penetration readings.
///
/// Row numbers are 1-based, matching the worksheet display.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PointWindow {
    pub first_row: u32,
    pub last_row: u32,
    pub triplets: Vec<TripletColumns>,
}

impl Default for PointWindow {
    fn default() -> Self {
        let triplet = |index: &str, blows: &str, depth: &str| TripletColumns {
            index: index.into(),
            blows: blows.into(),
            depth: depth.into(),
        };
        Self {
            first_row: 19,
            last_row: 48,
            triplets: vec![triplet("A", "B", "C"), triplet("E", "F", "G"), triplet("I", "J", "K")],
        }
    }
}

// ---------------------------------------------------------------------------
// Top-level schema
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TemplateSchema {
    pub version: u32,
    /// Sheet to prefer when present; otherwise the first sheet is used.
    pub preferred_sheet: String,
    pub metadata: MetadataCells,
    pub points: PointWindow,
}

impl Default for TemplateSchema {
    fn default() -> Self {
        Self {
            version: 1,
            preferred_sheet: "WorkSheets".into(),
            metadata: MetadataCells::default(),
            points: PointWindow::default(),
        }
    }
}

impl TemplateSchema {
    pub fn from_toml(text: &str) -> Result<Self, ImportError> {
        let schema: Self =
            toml::from_str(text).map_err(|e| ImportError::SchemaParse(e.to_string()))?;
        schema.validate()?;
        Ok(schema)
    }

    pub fn to_toml(&self) -> String {
        // Serialization of a validated schema cannot fail.
        toml::to_string_pretty(self).unwrap_or_default()
    }

    pub fn validate(&self) -> Result<(), ImportError> {
        for (field, addr) in self.metadata.entries() {
            parse_addr(addr).map_err(|_| {
                ImportError::SchemaValidation(format!("field '{field}': bad address '{addr}'"))
            })?;
        }
        if self.points.first_row < 1 || self.points.first_row > self.points.last_row {
            return Err(ImportError::SchemaValidation(format!(
                "point window rows {}..{} are not a valid range",
                self.points.first_row, self.points.last_row
            )));
        }
        if self.points.triplets.is_empty() {
            return Err(ImportError::SchemaValidation("no point triplets defined".into()));
        }
        for (i, t) in self.points.triplets.iter().enumerate() {
            for (name, letters) in [("index", &t.index), ("blows", &t.blows), ("depth", &t.depth)] {
                if parse_col(letters).is_none() {
                    return Err(ImportError::SchemaValidation(format!(
                        "triplet {}: bad {name} column '{letters}'",
                        i + 1
                    )));
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_simple_addresses() {
        assert_eq!(parse_addr("A1").unwrap(), CellAddr { row: 0, col: 0 });
        assert_eq!(parse_addr("C4").unwrap(), CellAddr { row: 3, col: 2 });
        assert_eq!(parse_addr("AB12").unwrap(), CellAddr { row: 11, col: 27 });
    }

    #[test]
    fn rejects_malformed_addresses() {
        for bad in ["", "4", "C", "C0", "4C", "C-4"] {
            assert!(parse_addr(bad).is_err(), "accepted '{bad}'");
        }
    }

    #[test]
    fn default_schema_validates() {
        TemplateSchema::default().validate().unwrap();
    }

    #[test]
    fn toml_round_trip() {
        let schema = TemplateSchema::default();
        let reparsed = TemplateSchema::from_toml(&schema.to_toml()).unwrap();
        assert_eq!(reparsed.version, 1);
        assert_eq!(reparsed.preferred_sheet, "WorkSheets");
        assert_eq!(reparsed.metadata.client, "C4");
        assert_eq!(reparsed.points.triplets.len(), 3);
    }

    #[test]
    fn partial_toml_fills_defaults() {
        let schema = TemplateSchema::from_toml("version = 2\n[metadata]\nclient = \"D4\"\n").unwrap();
        assert_eq!(schema.version, 2);
        assert_eq!(schema.metadata.client, "D4");
        // Untouched fields keep template v1 addresses.
        assert_eq!(schema.metadata.site, "C5");
        assert_eq!(schema.points.first_row, 19);
    }

    #[test]
    fn bad_address_fails_validation() {
        let err = TemplateSchema::from_toml("[metadata]\nclient = \"nope\"\n").unwrap_err();
        assert!(matches!(err, ImportError::SchemaValidation(_)));
    }

    #[test]
    fn inverted_row_window_fails_validation() {
        let err = TemplateSchema::from_toml("[points]\nfirst_row = 30\nlast_row = 20\n").unwrap_err();
        assert!(matches!(err, ImportError::SchemaValidation(_)));
    }
}
