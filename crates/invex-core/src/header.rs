//! Document-level header field extraction.
//!
//! Runs once over the whole text with keyword-anchored patterns; no
//! disambiguation beyond first match is needed here.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::token::patterns::{INVOICE_NUMBER_PATTERNS, LEGAL_SUFFIX, PO_NUMBER};

/// Singleton fields found in the document header.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HeaderFields {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub invoice_number: Option<String>,

    #[serde(default, skip_serializing_if = "BTreeSet::is_empty")]
    pub po_numbers: BTreeSet<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub supplier_name: Option<String>,
}

/// Extract header fields from the full document text. `supplier_scan_lines`
/// bounds how far down the supplier-name scan looks.
pub fn extract_header_fields(text: &str, supplier_scan_lines: usize) -> HeaderFields {
    HeaderFields {
        invoice_number: extract_invoice_number(text),
        po_numbers: extract_po_numbers(text),
        supplier_name: extract_supplier_name(text, supplier_scan_lines),
    }
}

fn extract_invoice_number(text: &str) -> Option<String> {
    for pattern in INVOICE_NUMBER_PATTERNS.iter() {
        if let Some(caps) = pattern.captures(text) {
            return Some(caps[1].trim().to_string());
        }
    }
    None
}

fn extract_po_numbers(text: &str) -> BTreeSet<String> {
    PO_NUMBER
        .captures_iter(text)
        .map(|caps| caps[1].to_string())
        .collect()
}

/// The supplier name is usually an early line carrying a legal-entity
/// suffix (LTD, LLC, INC, ...).
fn extract_supplier_name(text: &str, scan_lines: usize) -> Option<String> {
    text.lines()
        .take(scan_lines)
        .map(str::trim)
        .find(|line| LEGAL_SUFFIX.is_match(line) && line.len() > 5 && line.len() < 80)
        .map(|line| line.to_string())
}
