//! Locale-aware numeric normalization with OCR-noise correction.

use std::str::FromStr;

use lazy_static::lazy_static;
use regex::Regex;
use rust_decimal::Decimal;

lazy_static! {
    /// European decimal format: 1.534,94 (dot thousands, comma decimal).
    static ref EUROPEAN_DECIMAL: Regex = Regex::new(r"^\d{1,3}(?:\.\d{3})*,\d{2}$").unwrap();
}

/// Normalize a price-shaped token into a plain decimal string.
///
/// Strips currency symbols and thousands separators, maps the common OCR
/// letter/digit confusions (`s`/`S` to `5`, `o`/`O` to `0`) and converts
/// a European decimal comma to a dot. Idempotent: normalizing an already
/// normalized value is a no-op.
pub fn normalize_ocr_number(raw: &str) -> String {
    let stripped = strip_currency(raw);

    let mapped: String = stripped
        .chars()
        .map(|c| match c {
            's' | 'S' => '5',
            'o' | 'O' => '0',
            c => c,
        })
        .collect();

    if EUROPEAN_DECIMAL.is_match(&mapped) {
        mapped.replace('.', "").replace(',', ".")
    } else {
        mapped.replace(',', "")
    }
}

/// Normalize and validate a price token. Returns the normalized decimal
/// string, or `None` when the cleaned value still fails to parse.
pub fn parse_price(raw: &str) -> Option<String> {
    let normalized = normalize_ocr_number(raw);
    Decimal::from_str(&normalized).ok()?;
    Some(normalized)
}

/// Parse a quantity token. A trailing `,00` is the European convention
/// for a whole-number quantity and is stripped before parsing; values at
/// or above `max` are rejected as codes mistaken for counts.
pub fn parse_quantity(raw: &str, max: u64) -> Option<u64> {
    let cleaned = raw.trim().strip_suffix(",00").unwrap_or(raw.trim());
    let cleaned = cleaned.replace(',', "");
    cleaned.parse::<u64>().ok().filter(|&v| v < max)
}

/// Strip `$`/`€` symbols and USD/EUR/CZK markers from either end.
fn strip_currency(raw: &str) -> &str {
    let mut s = raw.trim();
    loop {
        let mut changed = false;
        for word in ["USD", "EUR", "CZK"] {
            if let Some(prefix) = s.get(..word.len()) {
                if prefix.eq_ignore_ascii_case(word) {
                    s = s[word.len()..].trim_start();
                    changed = true;
                }
            }
            if s.len() >= word.len() {
                if let Some(suffix) = s.get(s.len() - word.len()..) {
                    if suffix.eq_ignore_ascii_case(word) {
                        s = s[..s.len() - word.len()].trim_end();
                        changed = true;
                    }
                }
            }
        }
        for sym in ['$', '€'] {
            if let Some(rest) = s.strip_prefix(sym) {
                s = rest.trim_start();
                changed = true;
            }
            if let Some(rest) = s.strip_suffix(sym) {
                s = rest.trim_end();
                changed = true;
            }
        }
        if !changed {
            return s;
        }
    }
}
