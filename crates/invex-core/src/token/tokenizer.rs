//! Line tokenization with protected bracket/quote spans.

use super::classifier::TokenClassifier;
use super::patterns::{COLUMN_SPLIT, PROTECTED_SPAN};
use super::{Token, TokenType, TokenizedLine};
use crate::models::config::ExtractorConfig;

/// Splits lines into classified tokens.
///
/// Runs of two or more spaces (or tabs) mark column boundaries in
/// OCR-flattened tables; remaining single spaces separate values within a
/// column. Bracketed and quoted spans are protected so their internal
/// whitespace never acts as a split point. Column groups that are empty
/// after trimming are kept as `Empty` position holders so signature
/// comparison can still line up short and long rows.
#[derive(Debug, Clone, Default)]
pub struct Tokenizer {
    classifier: TokenClassifier,
}

impl Tokenizer {
    pub fn new(config: &ExtractorConfig) -> Self {
        Self {
            classifier: TokenClassifier::new(config),
        }
    }

    /// Tokenize every line of a document.
    pub fn tokenize_text(&self, text: &str) -> Vec<TokenizedLine> {
        text.lines()
            .enumerate()
            .map(|(i, line)| self.tokenize_line(line, i))
            .collect()
    }

    /// Tokenize a single line.
    pub fn tokenize_line(&self, line: &str, line_number: usize) -> TokenizedLine {
        let mut tokens = Vec::new();

        for fragment in self.split_line(line) {
            let position = tokens.len();
            if fragment.is_empty() {
                tokens.push(Token::new("", TokenType::Empty, position));
            } else {
                let token_type = self.classifier.classify(&fragment);
                tokens.push(Token::new(fragment, token_type, position));
            }
        }

        TokenizedLine {
            line_number,
            raw_text: line.to_string(),
            tokens,
        }
    }

    /// Split one line into trimmed fragments, protecting bracket/quote
    /// spans and preserving empty columns as empty strings.
    fn split_line(&self, line: &str) -> Vec<String> {
        if line.is_empty() {
            return Vec::new();
        }

        let spans: Vec<String> = PROTECTED_SPAN
            .find_iter(line)
            .map(|m| m.as_str().to_string())
            .collect();

        let mut protected = line.to_string();
        for (i, span) in spans.iter().enumerate() {
            protected = protected.replace(span.as_str(), &placeholder(i));
        }

        let mut fragments = Vec::new();
        for group in COLUMN_SPLIT.split(&protected) {
            if group.trim().is_empty() {
                fragments.push(String::new());
                continue;
            }
            for piece in group.split_whitespace() {
                let mut restored = piece.to_string();
                for (i, span) in spans.iter().enumerate() {
                    restored = restored.replace(&placeholder(i), span);
                }
                let restored = restored.trim().to_string();
                if !restored.is_empty() {
                    fragments.push(restored);
                }
            }
        }

        fragments
    }
}

fn placeholder(i: usize) -> String {
    format!("__SPAN_{i}__")
}
