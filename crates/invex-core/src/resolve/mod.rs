//! Line-item resolution from classified tokens.

pub mod numeric;

pub use numeric::{normalize_ocr_number, parse_price, parse_quantity};

use regex::Regex;

use crate::error::Result;
use crate::known::KnownIdentifierSet;
use crate::models::config::ExtractorConfig;
use crate::models::item::LineItem;
use crate::token::{TokenType, TokenizedLine};

/// Characters stripped from bracketed codes; `l` and `I` cover OCR'd
/// bracket glyphs.
const BRACKET_CHARS: &[char] = &['[', ']', '(', ')', 'l', 'I'];

/// Resolves one tokenized line into at most one [`LineItem`].
///
/// Never fails on malformed input: an unparsable value is treated as an
/// absent field, and a line without the minimum evidence (an identifier
/// plus a price) resolves to `None`.
#[derive(Debug, Clone)]
pub struct CandidateResolver {
    class_code_deny: Regex,
    max_quantity: u64,
    max_description_len: usize,
}

impl CandidateResolver {
    pub fn new(config: &ExtractorConfig) -> Result<Self> {
        Ok(Self {
            class_code_deny: Regex::new(&format!("(?i){}", config.class_code_denylist))?,
            max_quantity: config.max_quantity,
            max_description_len: config.max_description_len,
        })
    }

    /// Resolve a line into a line item, disambiguating identifier
    /// candidates against the optional known-identifier set.
    pub fn resolve(
        &self,
        line: &TokenizedLine,
        known: Option<&KnownIdentifierSet>,
    ) -> Option<LineItem> {
        let part_number = self.select_identifier(line, known)?;

        // First qualifying integer wins; long numeric codes fail the
        // sanity bound and are passed over.
        let explicit_quantity = line
            .tokens
            .iter()
            .filter(|t| t.token_type == TokenType::Integer)
            .find_map(|t| parse_quantity(&t.value, self.max_quantity));
        let quantity = explicit_quantity.unwrap_or(1);

        let prices: Vec<String> = line
            .tokens
            .iter()
            .filter(|t| t.token_type.is_price())
            .filter_map(|t| parse_price(&t.value))
            .collect();

        // First price is the unit price, last is the line total; anything
        // in between is dropped as duplicated subtotal noise.
        let (unit_price, total_price) = match prices.len() {
            0 => return None,
            1 => (None, prices[0].clone()),
            _ => (Some(prices[0].clone()), prices[prices.len() - 1].clone()),
        };

        let description = self.build_description(line, &part_number);

        let mut confidence: f32 = 0.5;
        if !part_number.is_empty() && !total_price.is_empty() {
            // Quantity is always present here: a defaulted quantity earns
            // the same bonus as a parsed one (reference behavior).
            confidence += 0.3;
        }
        if unit_price.is_some() {
            confidence += 0.1;
        }
        if !description.is_empty() {
            confidence += 0.05;
        }
        if known.is_some_and(|k| k.contains(&part_number)) {
            confidence += 0.1;
        }
        let confidence = confidence.clamp(0.0, 1.0);

        Some(LineItem {
            part_number,
            quantity,
            description,
            unit_price,
            total_price,
            raw_line: line.raw_text.clone(),
            confidence,
        })
    }

    /// Pick the authoritative identifier for the line, or `None` when no
    /// candidate exists.
    fn select_identifier(
        &self,
        line: &TokenizedLine,
        known: Option<&KnownIdentifierSet>,
    ) -> Option<String> {
        // Bracketing is the strongest signal for the authoritative code.
        if let Some(token) = line
            .tokens
            .iter()
            .find(|t| t.token_type == TokenType::BracketedCode)
        {
            let cleaned = clean_bracketed(&token.value);
            if !cleaned.is_empty() {
                return Some(cleaned);
            }
        }

        let candidates: Vec<&str> = line
            .tokens
            .iter()
            .filter(|t| t.token_type == TokenType::PartCode)
            .map(|t| t.value.as_str())
            .filter(|v| !self.class_code_deny.is_match(v))
            .collect();

        if candidates.is_empty() {
            return None;
        }

        // A catalog match beats every heuristic, left to right.
        if let Some(known) = known {
            if let Some(hit) = candidates.iter().find(|c| known.contains(c)) {
                return Some(hit.to_string());
            }
        }

        // Prefer plain, short, dash-light codes.
        candidates
            .iter()
            .min_by_key(|c| (c.contains('+'), c.matches('-').count() > 1, c.len()))
            .map(|c| c.to_string())
    }

    /// Remaining text tokens plus every non-selected code, in original
    /// order, capped at the configured length.
    fn build_description(&self, line: &TokenizedLine, part_number: &str) -> String {
        let mut parts = Vec::new();
        for token in &line.tokens {
            match token.token_type {
                TokenType::Word | TokenType::Phrase => {
                    if token.value.chars().count() > 3 {
                        parts.push(token.value.as_str());
                    }
                }
                TokenType::PartCode => {
                    if token.value != part_number {
                        parts.push(token.value.as_str());
                    }
                }
                _ => {}
            }
        }

        let description = parts.join(" ");
        description
            .chars()
            .take(self.max_description_len)
            .collect()
    }
}

/// Strip brackets from a code, tolerating OCR'd `l`/`I` bracket glyphs.
fn clean_bracketed(value: &str) -> String {
    value.trim_matches(BRACKET_CHARS).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::token::Tokenizer;
    use pretty_assertions::assert_eq;

    fn resolver() -> CandidateResolver {
        CandidateResolver::new(&ExtractorConfig::default()).unwrap()
    }

    fn line(text: &str) -> TokenizedLine {
        Tokenizer::default().tokenize_line(text, 0)
    }

    #[test]
    fn test_plain_line_item() {
        let item = resolver()
            .resolve(&line("DMF124   48   $265.81   $12,758.88"), None)
            .unwrap();
        assert_eq!(item.part_number, "DMF124");
        assert_eq!(item.quantity, 48);
        assert_eq!(item.unit_price.as_deref(), Some("265.81"));
        assert_eq!(item.total_price, "12758.88");
        assert!((item.confidence - 0.9).abs() < 1e-6);
    }

    #[test]
    fn test_bracket_wins_and_ocr_noise_corrected() {
        let item = resolver()
            .resolve(&line("[MS840.03F]  824,00 ks  6s.080  45S.56"), None)
            .unwrap();
        assert_eq!(item.part_number, "MS840.03F");
        assert_eq!(item.quantity, 824);
        assert_eq!(item.unit_price.as_deref(), Some("65.080"));
        assert_eq!(item.total_price, "455.56");
    }

    #[test]
    fn test_class_code_demoted_and_quantity_defaulted() {
        let item = resolver()
            .resolve(&line("C153   X-101-054   $99.00"), None)
            .unwrap();
        assert_eq!(item.part_number, "X-101-054");
        assert_eq!(item.quantity, 1);
        assert_eq!(item.unit_price, None);
        assert_eq!(item.total_price, "99.00");
        assert!(item.description.contains("C153"));
    }

    #[test]
    fn test_known_set_beats_heuristic_ranking() {
        // Heuristics would pick the shorter NDZ04; the catalog says the
        // longer dashed code is the real identifier.
        let known = KnownIdentifierSet::new(["PWPF-C24-R18"]);
        let item = resolver()
            .resolve(&line("NDZ04   PWPF-C24-R18   4   $10.00   $40.00"), Some(&known))
            .unwrap();
        assert_eq!(item.part_number, "PWPF-C24-R18");
        assert!(item.description.contains("NDZ04"));
        // Verified identifier earns the extra bonus on top of a full house
        assert!((item.confidence - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_heuristic_prefers_plain_short_codes() {
        let item = resolver()
            .resolve(&line("NMS-V-004+X   DTK8   4   $10.00   $40.00"), None)
            .unwrap();
        assert_eq!(item.part_number, "DTK8");
    }

    #[test]
    fn test_no_price_no_item() {
        assert!(resolver().resolve(&line("DMF124   48   total due"), None).is_none());
    }

    #[test]
    fn test_no_code_no_item() {
        assert!(resolver().resolve(&line("subtotal   $1,234.56"), None).is_none());
    }

    #[test]
    fn test_middle_prices_dropped() {
        let item = resolver()
            .resolve(&line("DMF124  2  $5.00  $7.00  $10.00"), None)
            .unwrap();
        assert_eq!(item.unit_price.as_deref(), Some("5.00"));
        assert_eq!(item.total_price, "10.00");
    }

    #[test]
    fn test_confidence_bounds() {
        for text in [
            "DMF124   48   $265.81   $12,758.88",
            "C153   X-101-054   $99.00",
            "[MS840.03F]  824,00 ks  6s.080  45S.56",
        ] {
            if let Some(item) = resolver().resolve(&line(text), None) {
                assert!((0.0..=1.0).contains(&item.confidence));
            }
        }
    }
}
