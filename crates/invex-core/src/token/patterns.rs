//! Regex tables for token classification and header field extraction.

use lazy_static::lazy_static;
use regex::Regex;

use super::TokenType;

lazy_static! {
    /// Shape rules evaluated in order; the first match wins. Most specific
    /// shapes come first so the generic numeric rules cannot swallow a
    /// price, date or HTS code.
    pub static ref SHAPE_RULES: Vec<(Regex, TokenType)> = vec![
        // Dates
        (Regex::new(r"^\d{4}-\d{2}-\d{2}$").unwrap(), TokenType::DateIso),
        (Regex::new(r"(?i)^\d{4}-\d{4}(?:-[A-Z]{2,3})?$").unwrap(), TokenType::DateCompact),
        (Regex::new(r"^\d{8}$").unwrap(), TokenType::DateCompact),
        (Regex::new(r"^\d{1,2}/\d{1,2}/\d{2,4}$").unwrap(), TokenType::DateUs),
        (Regex::new(r"^\d{1,2}\.\d{1,2}\.\d{2,4}$").unwrap(), TokenType::DateEu),

        // HTS codes (before generic decimals)
        (Regex::new(r"^\d{4}\.\d{2}\.\d{2,4}$").unwrap(), TokenType::HtsCode),
        (Regex::new(r"(?i)^HTS#?\d{10}$").unwrap(), TokenType::HtsCode),

        // European whole-number quantity (824,00 means 824 pcs), must be
        // checked before the money shapes below
        (Regex::new(r"^\d+,00$").unwrap(), TokenType::Integer),

        // Currency
        (Regex::new(r"^\$[\d,]+\.?\d*$").unwrap(), TokenType::Currency),
        (Regex::new(r"(?i)^USD\s*[\d,]+\.?\d*$").unwrap(), TokenType::Currency),
        (Regex::new(r"(?i)^[\d,]+\.?\d*\s*(?:USD|EUR)$").unwrap(), TokenType::Currency),
        (Regex::new(r"^€[\d,]+\.?\d*$").unwrap(), TokenType::Currency),
        // European format: 1.534,94
        (Regex::new(r"^\d{1,3}(?:\.\d{3})*,\d{2}$").unwrap(), TokenType::Currency),
        // Bare two-decimal numbers are treated as money
        (Regex::new(r"^[\d,]+\.\d{2}$").unwrap(), TokenType::Currency),
        // OCR-garbled prices: 6s.080 -> 65.080, 45S.56 -> 455.56
        (Regex::new(r"(?i)^[\d,]*[so][\d,so]*\.[\d,so]{2,3}$").unwrap(), TokenType::Currency),
        (Regex::new(r"(?i)^[\d,]+\.[\d,so]{0,2}[so][\d,so]{0,2}$").unwrap(), TokenType::Currency),

        // Percentage
        (Regex::new(r"^[\d.]+%$").unwrap(), TokenType::Percentage),

        // Bracketed codes
        (Regex::new(r"^\[[\w.\-/]+\]$").unwrap(), TokenType::BracketedCode),
        (Regex::new(r"^\([\w.\-/]+\)$").unwrap(), TokenType::BracketedCode),

        // Invoice codes
        (Regex::new(r"(?i)^[A-Z]{2,5}[-/]\d+[-/]\d+").unwrap(), TokenType::InvoiceCode),
        (Regex::new(r"(?i)^INV[-#]?\d+").unwrap(), TokenType::InvoiceCode),

        // PO numbers (fixed 400-prefix convention, optional -N suffix)
        (Regex::new(r"^400\d{5}(?:-\d+)?$").unwrap(), TokenType::PoNumber),
        (Regex::new(r"(?i)^PO[-#]?\d+$").unwrap(), TokenType::PoNumber),

        // Part codes
        (Regex::new(r"(?i)^[A-Z]{1,4}\d+[A-Z]?[-/]?\w*$").unwrap(), TokenType::PartCode),
        (Regex::new(r"^\d{2}-\d{5,7}$").unwrap(), TokenType::PartCode),
        (Regex::new(r"(?i)^[A-Z]+-[A-Z0-9]+").unwrap(), TokenType::PartCode),
        (Regex::new(r"(?i)^[A-Z]{2,}[\d\-.]+[A-Z]*$").unwrap(), TokenType::PartCode),
        (Regex::new(r"(?i)^HTS#\d+-\w+$").unwrap(), TokenType::PartCode),

        // Plain numbers last
        (Regex::new(r"^[\d,]+\.\d{3,}$").unwrap(), TokenType::Decimal),
        (Regex::new(r"^[\d,]+\.\d+$").unwrap(), TokenType::Decimal),
        (Regex::new(r"^[\d,]+$").unwrap(), TokenType::Integer),
    ];

    /// Word-shaped fallback: alphanumeric with internal dashes/dots.
    pub static ref WORD_SHAPE: Regex = Regex::new(r"^[\w\-.]+$").unwrap();

    /// Bracket or quote spans protected during column splitting.
    pub static ref PROTECTED_SPAN: Regex =
        Regex::new(r#"\[[^\]]+\]|\([^)]+\)|"[^"]+"|'[^']+'"#).unwrap();

    /// Column boundary: two or more spaces, or a tab.
    pub static ref COLUMN_SPLIT: Regex = Regex::new(r"[ ]{2,}|\t").unwrap();
}

lazy_static! {
    // Header field patterns

    /// Labeled invoice number, tried in order.
    pub static ref INVOICE_NUMBER_PATTERNS: Vec<Regex> = vec![
        Regex::new(r"(?i)Invoice\s*(?:No\.?|#|Number)[:\s]*([A-Z0-9][\w\-/]+)").unwrap(),
        Regex::new(r"(?i)INV[:\s#]*([A-Z0-9][\w\-/]+)").unwrap(),
        Regex::new(r"(?i)(?:Invoice|Inv)\s+n\.?\s*[:\s]*(\d+)").unwrap(),
    ];

    /// Purchase order numbers (400-prefixed 8-digit convention).
    pub static ref PO_NUMBER: Regex = Regex::new(r"\b(400\d{5})\b").unwrap();

    /// Legal-entity suffixes used to spot the supplier name.
    pub static ref LEGAL_SUFFIX: Regex =
        Regex::new(r"(?i)\b(LTD|LLC|INC|CORP|PVT|CO\.|S\.?R\.?O\.?)\b").unwrap();
}

#[cfg(test)]
mod tests {
    use super::*;

    fn first_match(value: &str) -> Option<TokenType> {
        SHAPE_RULES
            .iter()
            .find(|(re, _)| re.is_match(value))
            .map(|(_, t)| *t)
    }

    #[test]
    fn test_date_shapes() {
        assert_eq!(first_match("2025-01-15"), Some(TokenType::DateIso));
        assert_eq!(first_match("20250115"), Some(TokenType::DateCompact));
        assert_eq!(first_match("2025-0725"), Some(TokenType::DateCompact));
        assert_eq!(first_match("1/15/25"), Some(TokenType::DateUs));
        assert_eq!(first_match("15.01.2025"), Some(TokenType::DateEu));
    }

    #[test]
    fn test_price_shapes() {
        assert_eq!(first_match("$265.81"), Some(TokenType::Currency));
        assert_eq!(first_match("$12,758.88"), Some(TokenType::Currency));
        assert_eq!(first_match("265.81"), Some(TokenType::Currency));
        assert_eq!(first_match("1.534,94"), Some(TokenType::Currency));
        assert_eq!(first_match("6s.080"), Some(TokenType::Currency));
        assert_eq!(first_match("45S.56"), Some(TokenType::Currency));
        // 3+ decimal places stay DECIMAL (unit-price convention)
        assert_eq!(first_match("65.080"), Some(TokenType::Decimal));
    }

    #[test]
    fn test_euro_quantity_beats_currency() {
        assert_eq!(first_match("824,00"), Some(TokenType::Integer));
    }

    #[test]
    fn test_code_shapes() {
        assert_eq!(first_match("DMF124"), Some(TokenType::PartCode));
        assert_eq!(first_match("18-123456"), Some(TokenType::PartCode));
        assert_eq!(first_match("X-101-054"), Some(TokenType::PartCode));
        assert_eq!(first_match("NMS-V-004"), Some(TokenType::PartCode));
        assert_eq!(first_match("[MS840.03F]"), Some(TokenType::BracketedCode));
        assert_eq!(first_match("7325.10.00"), Some(TokenType::HtsCode));
        // Bare 8-digit runs hit the compact-date rule first; the PO shape
        // needs the dashed suffix form to win
        assert_eq!(first_match("40012345"), Some(TokenType::DateCompact));
        assert_eq!(first_match("40012345-7"), Some(TokenType::PoNumber));
        assert_eq!(first_match("EXP/626/25-26"), Some(TokenType::InvoiceCode));
    }
}
