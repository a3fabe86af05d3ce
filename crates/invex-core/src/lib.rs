//! Core library for shape-based invoice line item extraction.
//!
//! This crate provides:
//! - Tokenization of OCR/PDF-flattened invoice text into classified tokens
//! - Data-shape token classification (dates, prices, codes, quantities)
//! - Repeating-layout pattern detection across a document
//! - Line-item resolution with identifier disambiguation and OCR-noise
//!   correction
//! - Header field extraction (invoice number, PO numbers, supplier)

pub mod error;
pub mod extractor;
pub mod header;
pub mod known;
pub mod models;
pub mod pattern;
pub mod resolve;
pub mod token;

pub use error::{InvexError, Result};
pub use extractor::Extractor;
pub use header::{extract_header_fields, HeaderFields};
pub use known::KnownIdentifierSet;
pub use models::config::ExtractorConfig;
pub use models::item::{ExtractionResult, LineItem};
pub use pattern::{DetectedPattern, PatternDetector};
pub use resolve::{normalize_ocr_number, CandidateResolver};
pub use token::{Token, TokenClassifier, TokenType, TokenizedLine, Tokenizer};
