//! Pure, deterministic token classification.

use std::collections::HashSet;

use super::patterns::{SHAPE_RULES, WORD_SHAPE};
use super::TokenType;
use crate::models::config::ExtractorConfig;

/// Characters treated as standalone column separators.
const SEPARATORS: &str = "|-:;";

/// Roughly where a single fragment stops being a word and becomes a phrase.
const MAX_WORD_LEN: usize = 30;

/// Classifies text fragments by data shape.
///
/// Classification is pure: the same input always yields the same type,
/// independent of the other tokens on the line. Closed-vocabulary lookups
/// (countries, units) run first, then the priority-ordered shape rules.
#[derive(Debug, Clone)]
pub struct TokenClassifier {
    countries: HashSet<String>,
    units: HashSet<String>,
}

impl TokenClassifier {
    /// Build a classifier from the configured vocabularies.
    pub fn new(config: &ExtractorConfig) -> Self {
        Self {
            countries: config.countries.iter().map(|c| c.to_uppercase()).collect(),
            units: config.units.iter().map(|u| u.to_uppercase()).collect(),
        }
    }

    /// Classify a single fragment by its shape.
    pub fn classify(&self, raw: &str) -> TokenType {
        let value = raw.trim();
        if value.is_empty() {
            return TokenType::Empty;
        }

        let upper = value.to_uppercase();
        if self.countries.contains(&upper) {
            return TokenType::Country;
        }
        // Units often carry a trailing period (PCS., KGS.)
        if self.units.contains(upper.trim_end_matches('.')) {
            return TokenType::Unit;
        }

        for (pattern, token_type) in SHAPE_RULES.iter() {
            if pattern.is_match(value) {
                return *token_type;
            }
        }

        if value.chars().count() == 1 && SEPARATORS.contains(value) {
            return TokenType::Separator;
        }

        if value.contains(' ') || value.chars().count() > MAX_WORD_LEN {
            return TokenType::Phrase;
        }

        if WORD_SHAPE.is_match(value) {
            return TokenType::Word;
        }

        TokenType::Unknown
    }
}

impl Default for TokenClassifier {
    fn default() -> Self {
        Self::new(&ExtractorConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_vocab_beats_shape_rules() {
        let c = TokenClassifier::default();
        assert_eq!(c.classify("CHINA"), TokenType::Country);
        assert_eq!(c.classify("china"), TokenType::Country);
        assert_eq!(c.classify("PCS"), TokenType::Unit);
        assert_eq!(c.classify("pcs."), TokenType::Unit);
        assert_eq!(c.classify("ks"), TokenType::Unit);
        // EA would otherwise be a WORD
        assert_eq!(c.classify("EA"), TokenType::Unit);
    }

    #[test]
    fn test_fallbacks() {
        let c = TokenClassifier::default();
        assert_eq!(c.classify(""), TokenType::Empty);
        assert_eq!(c.classify("   "), TokenType::Empty);
        assert_eq!(c.classify("|"), TokenType::Separator);
        assert_eq!(c.classify(":"), TokenType::Separator);
        assert_eq!(c.classify("hub"), TokenType::Word);
        assert_eq!(c.classify("stainless steel hub"), TokenType::Phrase);
        assert_eq!(
            c.classify("averyverylongunbrokenrunoftextwithnospaces"),
            TokenType::Phrase
        );
    }

    #[test]
    fn test_classification_is_pure() {
        let c = TokenClassifier::default();
        for s in ["DMF124", "$265.81", "824,00", "6s.080", "??!"] {
            let first = c.classify(s);
            for _ in 0..3 {
                assert_eq!(c.classify(s), first);
            }
        }
    }
}
