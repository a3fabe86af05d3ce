//! Tokenization and data-shape classification.
//!
//! Invoice text coming out of OCR/PDF extraction has no reliable column
//! layout, so fragments are classified by what the data *is* (a price, a
//! part code, a date) rather than where it sits on the line.

pub mod classifier;
pub mod patterns;
pub mod tokenizer;

pub use classifier::TokenClassifier;
pub use tokenizer::Tokenizer;

use serde::{Deserialize, Serialize};

/// Data-shape classification of a single token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TokenType {
    /// 2025-01-15
    DateIso,
    /// 01/15/2025, 1/15/25
    DateUs,
    /// 15.01.2025
    DateEu,
    /// 20250115, 2025-0115
    DateCompact,
    /// 100, 1,000
    Integer,
    /// 100.505, 1,234.5 (3-decimal values are a unit-price convention)
    Decimal,
    /// $100.50, USD 100.50, bare two-decimal numbers
    Currency,
    /// 15%, 15.5%
    Percentage,
    /// ABC-123, 18-123456, MS840.03F
    PartCode,
    /// [MS840.03F], (ABC123)
    BracketedCode,
    /// 7325.10.00, HTS#8481809050
    HtsCode,
    /// 40012345 (fixed 400-prefix convention), PO-12345
    PoNumber,
    /// INV-2025-001, EXP/626/25-26
    InvoiceCode,
    /// Single word
    Word,
    /// Multi-word or overlong text
    Phrase,
    /// PCS, KG, EA
    Unit,
    /// CHINA, INDIA, USA
    Country,
    /// |, -, :, ;
    Separator,
    /// Whitespace-only position holder
    Empty,
    Unknown,
}

impl TokenType {
    /// Name used in full line signatures.
    pub fn name(&self) -> &'static str {
        match self {
            TokenType::DateIso => "DATE_ISO",
            TokenType::DateUs => "DATE_US",
            TokenType::DateEu => "DATE_EU",
            TokenType::DateCompact => "DATE_COMPACT",
            TokenType::Integer => "INTEGER",
            TokenType::Decimal => "DECIMAL",
            TokenType::Currency => "CURRENCY",
            TokenType::Percentage => "PERCENTAGE",
            TokenType::PartCode => "PART_CODE",
            TokenType::BracketedCode => "BRACKETED_CODE",
            TokenType::HtsCode => "HTS_CODE",
            TokenType::PoNumber => "PO_NUMBER",
            TokenType::InvoiceCode => "INVOICE_CODE",
            TokenType::Word => "WORD",
            TokenType::Phrase => "PHRASE",
            TokenType::Unit => "UNIT",
            TokenType::Country => "COUNTRY",
            TokenType::Separator => "SEPARATOR",
            TokenType::Empty => "EMPTY",
            TokenType::Unknown => "UNKNOWN",
        }
    }

    /// Coarsened bucket used for layout pattern grouping.
    pub fn simplified(&self) -> SimpleType {
        match self {
            TokenType::DateIso
            | TokenType::DateUs
            | TokenType::DateEu
            | TokenType::DateCompact => SimpleType::Date,
            TokenType::Integer | TokenType::Decimal => SimpleType::Num,
            TokenType::Currency => SimpleType::Price,
            TokenType::PartCode | TokenType::BracketedCode => SimpleType::Code,
            TokenType::HtsCode => SimpleType::Hts,
            TokenType::PoNumber => SimpleType::Po,
            TokenType::InvoiceCode => SimpleType::Inv,
            TokenType::Word | TokenType::Phrase => SimpleType::Text,
            TokenType::Unit => SimpleType::Unit,
            TokenType::Country => SimpleType::Country,
            TokenType::Percentage
            | TokenType::Separator
            | TokenType::Empty
            | TokenType::Unknown => SimpleType::Other,
        }
    }

    /// True for the structural types excluded from signatures.
    pub fn is_structural(&self) -> bool {
        matches!(self, TokenType::Empty | TokenType::Separator)
    }

    /// True for either money-shaped type the resolver treats as a price.
    pub fn is_price(&self) -> bool {
        matches!(self, TokenType::Currency | TokenType::Decimal)
    }
}

/// Coarsened token bucket for simplified signatures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SimpleType {
    Date,
    Num,
    Price,
    Code,
    Hts,
    Po,
    Inv,
    Text,
    Unit,
    Country,
    Other,
}

impl SimpleType {
    pub fn name(&self) -> &'static str {
        match self {
            SimpleType::Date => "DATE",
            SimpleType::Num => "NUM",
            SimpleType::Price => "PRICE",
            SimpleType::Code => "CODE",
            SimpleType::Hts => "HTS",
            SimpleType::Po => "PO",
            SimpleType::Inv => "INV",
            SimpleType::Text => "TEXT",
            SimpleType::Unit => "UNIT",
            SimpleType::Country => "COUNTRY",
            SimpleType::Other => "OTHER",
        }
    }
}

/// A classified text fragment from one line. Immutable once created.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Token {
    /// Raw fragment text, trimmed.
    pub value: String,
    /// Data-shape classification.
    pub token_type: TokenType,
    /// Position within the line's token sequence.
    pub position: usize,
    /// Classification confidence (0.0 - 1.0).
    pub confidence: f32,
}

impl Token {
    pub fn new(value: impl Into<String>, token_type: TokenType, position: usize) -> Self {
        Self {
            value: value.into(),
            token_type,
            position,
            confidence: 1.0,
        }
    }
}

/// One line of text broken into classified tokens.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenizedLine {
    /// Zero-based line number in the source text.
    pub line_number: usize,
    /// Original line text.
    pub raw_text: String,
    /// Ordered tokens.
    pub tokens: Vec<Token>,
}

impl TokenizedLine {
    /// Full type signature, excluding structural tokens.
    pub fn signature(&self) -> String {
        self.tokens
            .iter()
            .filter(|t| !t.token_type.is_structural())
            .map(|t| t.token_type.name())
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Coarsened signature used for pattern grouping.
    pub fn simplified_signature(&self) -> String {
        self.tokens
            .iter()
            .filter(|t| !t.token_type.is_structural())
            .map(|t| t.token_type.simplified().name())
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// All tokens matching any of the given types.
    pub fn tokens_of_type(&self, types: &[TokenType]) -> Vec<&Token> {
        self.tokens
            .iter()
            .filter(|t| types.contains(&t.token_type))
            .collect()
    }
}
