//! Extracted line items and the per-document result aggregate.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// One resolved invoice row. Immutable once emitted.
///
/// A `LineItem` only exists when a part number and at least one price
/// were found; everything else degrades to an absent field.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LineItem {
    /// The authoritative identifier chosen for this row.
    pub part_number: String,

    /// Parsed quantity; defaults to 1 when no integer token qualified.
    pub quantity: u64,

    /// Concatenated descriptive text, including demoted candidate codes.
    pub description: String,

    /// Per-unit price, kept as a decimal string to preserve source digits.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unit_price: Option<String>,

    /// Line total, kept as a decimal string to preserve source digits.
    pub total_price: String,

    /// The raw line this item was resolved from.
    pub raw_line: String,

    /// Heuristic evidence score (0.0 - 1.0).
    pub confidence: f32,
}

impl LineItem {
    /// Dedup key: the same part/quantity/total triple is the same item.
    pub fn dedup_key(&self) -> String {
        format!("{}|{}|{}", self.part_number, self.quantity, self.total_price)
    }
}

/// Aggregated output of one extraction run over a document.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExtractionResult {
    /// Invoice number from the document header, if found.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub invoice_number: Option<String>,

    /// Distinct purchase order numbers found anywhere in the text.
    #[serde(default, skip_serializing_if = "BTreeSet::is_empty")]
    pub po_numbers: BTreeSet<String>,

    /// Supplier name guessed from the document header, if found.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub supplier_name: Option<String>,

    /// Resolved line items in document order, de-duplicated.
    pub line_items: Vec<LineItem>,

    /// How many emitted items carried an identifier verified against the
    /// known-identifier set.
    pub known_matches: usize,

    /// Wall-clock time spent in this run, in milliseconds.
    pub processing_time_ms: u64,
}
