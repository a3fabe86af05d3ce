//! Configuration for the extraction pipeline.

use serde::{Deserialize, Serialize};

use crate::error::{InvexError, Result};

/// Configuration for tokenization, resolution and pattern detection.
///
/// Every field has a sensible default drawn from real commercial
/// invoices; overriding the vocabularies lets callers adapt the
/// classifier to a new supplier base without touching code.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractorConfig {
    /// Country names recognized as origin markers (case-insensitive).
    pub countries: Vec<String>,

    /// Unit-of-measure vocabulary (case-insensitive, trailing dot ignored).
    pub units: Vec<String>,

    /// Regex for administrative "class codes" that are never real part
    /// numbers (e.g. C153) and must be excluded from candidates.
    pub class_code_denylist: String,

    /// Minimum lines sharing a signature before it counts as a pattern.
    pub min_frequency: usize,

    /// Upper sanity bound on quantities; larger integers are assumed to
    /// be PO/invoice codes mistaken for a count.
    pub max_quantity: u64,

    /// Maximum description length kept on a line item.
    pub max_description_len: usize,

    /// Lines shorter than this are never line items.
    pub min_line_len: usize,

    /// How many leading lines to scan for a supplier name.
    pub supplier_scan_lines: usize,
}

impl Default for ExtractorConfig {
    fn default() -> Self {
        Self {
            countries: default_countries(),
            units: default_units(),
            class_code_denylist: r"^C\d{2,3}$".to_string(),
            min_frequency: 2,
            max_quantity: 100_000,
            max_description_len: 100,
            min_line_len: 15,
            supplier_scan_lines: 15,
        }
    }
}

impl ExtractorConfig {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &std::path::Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        serde_json::from_str(&content).map_err(InvexError::from)
    }

    /// Save configuration to a JSON file.
    pub fn save(&self, path: &std::path::Path) -> Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}

fn default_countries() -> Vec<String> {
    [
        "CHINA", "INDIA", "INDONESIA", "BRAZIL", "MEXICO", "VIETNAM", "TAIWAN", "KOREA", "JAPAN",
        "GERMANY", "ITALY", "SPAIN", "CZECH REPUBLIC", "POLAND", "TURKEY", "USA", "CANADA",
        "UNITED STATES", "UNITED KINGDOM", "UK", "THAILAND", "MALAYSIA",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}

fn default_units() -> Vec<String> {
    [
        "PCS", "PC", "UNITS", "UNIT", "EA", "EACH", "NOS", "NO", "KG", "KGS", "LB", "LBS", "G",
        "GM", "KS", "M", "MTR", "METER", "METERS", "FT", "FEET", "SET", "SETS", "PAIR", "PAIRS",
        "BOX", "BOXES", "CTN", "CARTON", "CARTONS", "PKG", "PACKAGE", "DOZ", "DOZEN", "GROSS",
        "ROLL", "ROLLS",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}
