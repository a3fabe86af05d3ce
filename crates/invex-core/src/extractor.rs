//! Document extraction pipeline.

use std::collections::HashSet;
use std::time::Instant;

use tracing::{debug, info};

use crate::error::Result;
use crate::header::extract_header_fields;
use crate::known::KnownIdentifierSet;
use crate::models::config::ExtractorConfig;
use crate::models::item::ExtractionResult;
use crate::pattern::{DetectedPattern, PatternDetector};
use crate::resolve::CandidateResolver;
use crate::token::{Tokenizer, TokenizedLine};

/// Shape-based invoice extractor.
///
/// Classifies every fragment of a document by data shape, then resolves
/// line items from the type mix on each line instead of from column
/// positions. One extractor can be reused across documents; each call to
/// [`extract_from_text`](Self::extract_from_text) owns its own
/// de-duplication and telemetry state, so runs are independent.
#[derive(Debug, Clone)]
pub struct Extractor {
    config: ExtractorConfig,
    tokenizer: Tokenizer,
    resolver: CandidateResolver,
    known: Option<KnownIdentifierSet>,
}

impl Extractor {
    /// Create an extractor with default settings.
    pub fn new() -> Self {
        Self::with_config(ExtractorConfig::default())
            .expect("default configuration is always valid")
    }

    /// Create an extractor from a configuration.
    pub fn with_config(config: ExtractorConfig) -> Result<Self> {
        Ok(Self {
            tokenizer: Tokenizer::new(&config),
            resolver: CandidateResolver::new(&config)?,
            config,
            known: None,
        })
    }

    /// Attach a catalog of known identifiers used to disambiguate
    /// candidate codes.
    pub fn with_known_set(mut self, known: KnownIdentifierSet) -> Self {
        self.known = Some(known);
        self
    }

    pub fn config(&self) -> &ExtractorConfig {
        &self.config
    }

    /// Tokenize every line of a document.
    pub fn tokenize(&self, text: &str) -> Vec<TokenizedLine> {
        self.tokenizer.tokenize_text(text)
    }

    /// Detect repeating line layouts in a document.
    pub fn detect_patterns(&self, text: &str) -> Vec<DetectedPattern> {
        let lines = self.tokenize(text);
        PatternDetector::new(&lines).detect_patterns(self.config.min_frequency)
    }

    /// Extract header fields and line items from a document.
    ///
    /// Never fails on document content: bad lines are skipped and bad
    /// values become absent fields.
    pub fn extract_from_text(&self, text: &str) -> ExtractionResult {
        let start = Instant::now();
        let known = self.known.as_ref();

        info!("Extracting from {} characters of text", text.len());

        let header = extract_header_fields(text, self.config.supplier_scan_lines);

        let mut result = ExtractionResult {
            invoice_number: header.invoice_number,
            po_numbers: header.po_numbers,
            supplier_name: header.supplier_name,
            ..ExtractionResult::default()
        };

        let mut seen: HashSet<String> = HashSet::new();

        for (line_number, raw) in text.lines().enumerate() {
            if raw.trim().len() < self.config.min_line_len {
                continue;
            }

            let line = self.tokenizer.tokenize_line(raw, line_number);
            let Some(item) = self.resolver.resolve(&line, known) else {
                continue;
            };

            if !seen.insert(item.dedup_key()) {
                debug!("Skipping duplicate item {}", item.part_number);
                continue;
            }

            if known.is_some_and(|k| k.contains(&item.part_number)) {
                result.known_matches += 1;
            }
            result.line_items.push(item);
        }

        result.processing_time_ms = start.elapsed().as_millis() as u64;

        info!(
            "Extracted {} line items ({} catalog-verified) in {}ms",
            result.line_items.len(),
            result.known_matches,
            result.processing_time_ms
        );

        result
    }
}

impl Default for Extractor {
    fn default() -> Self {
        Self::new()
    }
}
