//! Repeating-layout detection over tokenized lines.
//!
//! Lines sharing a coarsened type signature almost always come from the
//! same table layout, so grouping by simplified signature recovers the
//! document's line-item structure without knowing column positions.

use std::collections::BTreeMap;
use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::token::{SimpleType, TokenType, TokenizedLine};

/// Maximum sample lines retained per pattern.
const MAX_SAMPLES: usize = 10;

/// A repeating line layout detected in a document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DetectedPattern {
    /// Full type signature of the first member line.
    pub signature: String,
    /// Coarsened signature shared by every member line.
    pub simplified_signature: String,
    /// Up to [`MAX_SAMPLES`] member lines.
    pub sample_lines: Vec<TokenizedLine>,
    /// Exact number of lines sharing this signature, before sampling.
    pub frequency: usize,
    /// Pattern confidence in [0, 1].
    pub confidence: f32,
    /// Auto-derived token position to field name mapping. The only
    /// mutable part of a pattern: a reviewer may correct it after
    /// detection.
    pub field_mapping: BTreeMap<usize, String>,
}

/// Groups tokenized lines into repeating layout patterns.
pub struct PatternDetector<'a> {
    lines: &'a [TokenizedLine],
}

impl<'a> PatternDetector<'a> {
    pub fn new(lines: &'a [TokenizedLine]) -> Self {
        Self { lines }
    }

    /// Detect signatures shared by at least `min_frequency` lines,
    /// sorted by descending `(frequency, confidence)`.
    pub fn detect_patterns(&self, min_frequency: usize) -> Vec<DetectedPattern> {
        // Group by simplified signature, preserving first-seen order so
        // equal-score patterns come out in document order.
        let mut order: Vec<String> = Vec::new();
        let mut groups: HashMap<String, Vec<&TokenizedLine>> = HashMap::new();

        for line in self.lines {
            let sig = line.simplified_signature();
            if sig.split(' ').filter(|s| !s.is_empty()).count() < 2 {
                continue;
            }
            groups
                .entry(sig.clone())
                .or_insert_with(|| {
                    order.push(sig.clone());
                    Vec::new()
                })
                .push(line);
        }

        let mut patterns: Vec<DetectedPattern> = order
            .into_iter()
            .filter_map(|sig| {
                let members = &groups[&sig];
                if members.len() < min_frequency {
                    return None;
                }
                let confidence = score_group(members);
                debug!(
                    "Detected pattern '{}' x{} (confidence {:.2})",
                    sig,
                    members.len(),
                    confidence
                );
                Some(DetectedPattern {
                    signature: members[0].signature(),
                    simplified_signature: sig,
                    sample_lines: members.iter().take(MAX_SAMPLES).map(|l| (*l).clone()).collect(),
                    frequency: members.len(),
                    confidence,
                    field_mapping: auto_map_fields(members[0]),
                })
            })
            .collect();

        patterns.sort_by(|a, b| {
            b.frequency.cmp(&a.frequency).then(
                b.confidence
                    .partial_cmp(&a.confidence)
                    .unwrap_or(std::cmp::Ordering::Equal),
            )
        });

        patterns
    }
}

/// Confidence: token-count consistency, weighted with frequency and a
/// bonus for price-bearing groups.
fn score_group(members: &[&TokenizedLine]) -> f32 {
    if members.is_empty() {
        return 0.0;
    }

    let counts: Vec<f64> = members.iter().map(|l| l.tokens.len() as f64).collect();
    let mean = counts.iter().sum::<f64>() / counts.len() as f64;
    let variance = counts.iter().map(|c| (c - mean).powi(2)).sum::<f64>() / counts.len() as f64;

    let consistency_score = 1.0 / (1.0 + variance * 0.1);
    let frequency_score = (members.len() as f64 / 10.0).min(1.0);

    let has_prices = members
        .iter()
        .any(|l| l.tokens.iter().any(|t| t.token_type.is_price()));
    let price_bonus = if has_prices { 0.2 } else { 0.0 };

    (consistency_score * 0.5 + frequency_score * 0.3 + price_bonus).min(1.0) as f32
}

/// Derive a default position-to-field mapping from one sample line.
fn auto_map_fields(sample: &TokenizedLine) -> BTreeMap<usize, String> {
    let mut mapping = BTreeMap::new();

    let mut code_count = 0usize;
    let mut num_count = 0usize;
    let mut price_count = 0usize;

    for (i, token) in sample.tokens.iter().enumerate() {
        if token.token_type.is_structural() {
            continue;
        }

        let name = match token.token_type {
            TokenType::PartCode | TokenType::BracketedCode => {
                code_count += 1;
                if code_count == 1 {
                    "part_number".to_string()
                } else {
                    format!("code_{code_count}")
                }
            }
            TokenType::Integer => {
                num_count += 1;
                if num_count == 1 {
                    "quantity".to_string()
                } else {
                    format!("number_{num_count}")
                }
            }
            TokenType::Currency | TokenType::Decimal => {
                price_count += 1;
                match price_count {
                    1 => "unit_price".to_string(),
                    2 => "total_price".to_string(),
                    n => format!("price_{n}"),
                }
            }
            TokenType::HtsCode => "hts_code".to_string(),
            TokenType::PoNumber => "po_number".to_string(),
            t if t.simplified() == SimpleType::Date => "date".to_string(),
            TokenType::Country => "country_origin".to_string(),
            TokenType::Unit => "unit".to_string(),
            _ => continue,
        };

        mapping.insert(i, name);
    }

    mapping
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::token::Tokenizer;
    use pretty_assertions::assert_eq;

    fn tokenize(lines: &[&str]) -> Vec<TokenizedLine> {
        let text = lines.join("\n");
        Tokenizer::default().tokenize_text(&text)
    }

    #[test]
    fn test_min_frequency_filter() {
        let lines = tokenize(&[
            "DMF124   48   $265.81   $12,758.88",
            "DTK8   12   $10.00   $120.00",
            "NDZ04   4   $5.50   $22.00",
            "DFB1890   7   $1.00   $7.00",
            "NMS04   9   $2.00   $18.00",
            "AAA11   3   $9.99",
            "BBB22   5   $1.23",
        ]);

        let patterns = PatternDetector::new(&lines).detect_patterns(3);
        assert_eq!(patterns.len(), 1);
        assert_eq!(patterns[0].simplified_signature, "CODE NUM PRICE PRICE");
        assert_eq!(patterns[0].frequency, 5);
    }

    #[test]
    fn test_sorted_by_frequency_then_confidence() {
        let lines = tokenize(&[
            "DMF124   48   $265.81   $12,758.88",
            "DTK8   12   $10.00   $120.00",
            "NDZ04   4   $5.50   $22.00",
            "AAA11   3   $9.99",
            "BBB22   5   $1.23",
        ]);

        let patterns = PatternDetector::new(&lines).detect_patterns(2);
        assert_eq!(patterns.len(), 2);
        assert!(patterns[0].frequency >= patterns[1].frequency);
        assert_eq!(patterns[0].simplified_signature, "CODE NUM PRICE PRICE");
    }

    #[test]
    fn test_every_qualifying_line_in_exactly_one_group() {
        let lines = tokenize(&[
            "DMF124   48   $265.81   $12,758.88",
            "DTK8   12   $10.00   $120.00",
            "AAA11   3   $9.99",
            "BBB22   5   $1.23",
            "just some words",
        ]);

        // min_frequency of 1 keeps every group
        let patterns = PatternDetector::new(&lines).detect_patterns(1);
        let qualifying = lines
            .iter()
            .filter(|l| l.simplified_signature().split(' ').count() >= 2)
            .count();
        let grouped: usize = patterns.iter().map(|p| p.frequency).sum();
        assert_eq!(grouped, qualifying);
    }

    #[test]
    fn test_field_mapping() {
        let lines = tokenize(&[
            "DMF124   48   $265.81   $12,758.88   CHINA",
            "DTK8   12   $10.00   $120.00   INDIA",
        ]);

        let patterns = PatternDetector::new(&lines).detect_patterns(2);
        let mapping = &patterns[0].field_mapping;
        assert_eq!(mapping.get(&0).map(String::as_str), Some("part_number"));
        assert_eq!(mapping.get(&1).map(String::as_str), Some("quantity"));
        assert_eq!(mapping.get(&2).map(String::as_str), Some("unit_price"));
        assert_eq!(mapping.get(&3).map(String::as_str), Some("total_price"));
        assert_eq!(mapping.get(&4).map(String::as_str), Some("country_origin"));
    }

    #[test]
    fn test_confidence_in_bounds() {
        let lines = tokenize(&[
            "DMF124   48   $265.81   $12,758.88",
            "DTK8   12   $10.00   $120.00",
        ]);
        for p in PatternDetector::new(&lines).detect_patterns(2) {
            assert!((0.0..=1.0).contains(&p.confidence));
        }
    }
}
