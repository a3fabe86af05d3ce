//! End-to-end extraction over a realistic mixed-supplier document.

use invex_core::{Extractor, KnownIdentifierSet, PatternDetector, TokenType, Tokenizer};

const DOCUMENT: &str = "\
NINGBO FASTENER MFG CO. LTD
Commercial Invoice
Invoice No: INV-2025-0441
Buyer order: 40012345

Part No      Qty    Unit Price   Amount
DMF124   48   $265.81   $12,758.88
[MS840.03F]  824,00 ks  6s.080  45S.56
C153   X-101-054   $99.00   stainless hub
DTK8   12   $10.00   $120.00
NDZ04   4   $5.50   $22.00

Total:   $13,454.44
";

#[test]
fn extracts_header_and_items() {
    let result = Extractor::new().extract_from_text(DOCUMENT);

    assert_eq!(result.invoice_number.as_deref(), Some("INV-2025-0441"));
    assert!(result.po_numbers.contains("40012345"));
    assert_eq!(
        result.supplier_name.as_deref(),
        Some("NINGBO FASTENER MFG CO. LTD")
    );
    let parts: Vec<&str> = result
        .line_items
        .iter()
        .map(|i| i.part_number.as_str())
        .collect();
    assert_eq!(
        parts,
        vec!["DMF124", "MS840.03F", "X-101-054", "DTK8", "NDZ04"]
    );
}

#[test]
fn mixed_layouts_resolve_by_shape_not_position() {
    let result = Extractor::new().extract_from_text(DOCUMENT);
    let items = &result.line_items;

    // US-format row
    assert_eq!(items[0].part_number, "DMF124");
    assert_eq!(items[0].quantity, 48);
    assert_eq!(items[0].unit_price.as_deref(), Some("265.81"));
    assert_eq!(items[0].total_price, "12758.88");

    // European row with OCR noise; the bracketed code wins
    assert_eq!(items[1].part_number, "MS840.03F");
    assert_eq!(items[1].quantity, 824);
    assert_eq!(items[1].unit_price.as_deref(), Some("65.080"));
    assert_eq!(items[1].total_price, "455.56");

    // Class code demoted to the description, quantity defaulted
    assert_eq!(items[2].part_number, "X-101-054");
    assert_eq!(items[2].quantity, 1);
    assert!(items[2].description.contains("C153"));
}

#[test]
fn known_set_overrides_candidate_ranking() {
    let known = KnownIdentifierSet::new(["X-101-054"]);
    let result = Extractor::new()
        .with_known_set(known)
        .extract_from_text(DOCUMENT);

    assert_eq!(result.known_matches, 1);
    let item = result
        .line_items
        .iter()
        .find(|i| i.part_number == "X-101-054")
        .unwrap();
    assert!(item.confidence >= 0.9);
}

#[test]
fn emitted_items_always_have_code_and_price() {
    let extractor = Extractor::new();
    for text in [DOCUMENT, "garbage   in\n$$$   ???\n", ""] {
        for item in extractor.extract_from_text(text).line_items {
            assert!(!item.part_number.is_empty());
            assert!(item.unit_price.is_some() || !item.total_price.is_empty());
            assert!((0.0..=1.0).contains(&item.confidence));
        }
    }
}

#[test]
fn pattern_detection_finds_dominant_layout() {
    let lines = Tokenizer::default().tokenize_text(DOCUMENT);
    let patterns = PatternDetector::new(&lines).detect_patterns(2);

    assert!(!patterns.is_empty());
    let top = &patterns[0];
    assert_eq!(top.simplified_signature, "CODE NUM PRICE PRICE");
    assert_eq!(top.frequency, 3);
    assert!(top.sample_lines.len() <= 10);
    assert!((0.0..=1.0).contains(&top.confidence));
    assert_eq!(
        top.field_mapping.get(&0).map(String::as_str),
        Some("part_number")
    );
}

#[test]
fn classification_is_stable_across_calls() {
    let tok = Tokenizer::default();
    let first: Vec<Vec<TokenType>> = tok
        .tokenize_text(DOCUMENT)
        .iter()
        .map(|l| l.tokens.iter().map(|t| t.token_type).collect())
        .collect();
    let second: Vec<Vec<TokenType>> = tok
        .tokenize_text(DOCUMENT)
        .iter()
        .map(|l| l.tokens.iter().map(|t| t.token_type).collect())
        .collect();
    assert_eq!(first, second);
}
