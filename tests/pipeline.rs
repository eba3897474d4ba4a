//! End-to-end pipeline tests
//!
//! These drive the full chain: normalization, detection, overlap
//! resolution, and placeholder rewriting. Inference is disabled so the
//! scenarios are hermetic; degradation with a live (unreachable) inference
//! endpoint is covered in tests/degradation.rs.

use verhul::{Anonymizer, Config, EntityKind};

fn engine_from_yaml(yaml: &str) -> Anonymizer {
    let config: Config = serde_yaml::from_str(yaml).unwrap();
    Anonymizer::from_config(&config).unwrap()
}

fn offline_engine() -> Anonymizer {
    engine_from_yaml("inference:\n  enabled: false\n")
}

#[tokio::test]
async fn test_phone_and_email_scenario() {
    let engine = offline_engine();
    let result = engine.anonymize("Bel 0612345678 of mail test@example.com.").await;
    assert_eq!(result.text, "Bel <TELEFOON> of mail <E-MAIL>.");
}

#[tokio::test]
async fn test_postal_code_without_space() {
    let engine = offline_engine();
    let result = engine.anonymize("1234AB").await;
    assert_eq!(result.text, "<POSTCODE>");
    assert_eq!(result.spans[0].kind, EntityKind::PostalCode);
}

#[tokio::test]
async fn test_postal_code_variants() {
    let engine = offline_engine();
    for input in ["5022GR", "6022 gr", "1234-AB"] {
        let result = engine.anonymize(input).await;
        assert_eq!(result.text, "<POSTCODE>", "input: {input}");
    }
}

#[tokio::test]
async fn test_overlapping_phone_patterns_collapse() {
    // The specific national format and the generic 10-digit pattern both
    // fire on these digits; exactly one placeholder must come out.
    let engine = offline_engine();
    let result = engine.anonymize("Piet is bereikbaar op 0687654321.").await;
    assert_eq!(result.text, "Piet is bereikbaar op <TELEFOON>.");
    assert_eq!(
        result.spans.iter().filter(|s| s.kind == EntityKind::PhoneNumber).count(),
        1
    );
}

#[tokio::test]
async fn test_phone_formats_with_separators() {
    let engine = offline_engine();
    for input in [
        "+31612345678",
        "06-14436857",
        "06 12456798",
        "010-1234567",
        "010 2145678",
    ] {
        let result = engine.anonymize(input).await;
        assert_eq!(result.text, "<TELEFOON>", "input: {input}");
    }
}

#[tokio::test]
async fn test_contextual_person_rules_without_inference() {
    let engine = offline_engine();
    let result = engine
        .anonymize("Hallo, ik ben Jan Jansen en mijn nummer is 0612345678.")
        .await;
    assert_eq!(
        result.text,
        "Hallo, ik ben <PERSOON> en mijn nummer is <TELEFOON>."
    );
}

#[tokio::test]
async fn test_pattern_person_strategy() {
    let engine = engine_from_yaml("person:\n  strategy: pattern\ninference:\n  enabled: false\n");
    let result = engine.anonymize("Mijn naam is Jan de Vries.").await;
    // "Mijn" is a stopword; the tussenvoegsel name matches as one span
    assert_eq!(result.text, "Mijn naam is <PERSOON>.");
}

#[tokio::test]
async fn test_street_address_detected() {
    let engine = offline_engine();
    let result = engine.anonymize("ik woon op Kalverstraat 123").await;
    assert_eq!(result.text, "ik woon op <ADRES>");
    assert_eq!(result.spans[0].kind, EntityKind::Address);
}

#[tokio::test]
async fn test_whitespace_normalized_before_detection() {
    let engine = offline_engine();
    let result = engine.anonymize("Bel\n\n0612345678   vandaag  ").await;
    assert_eq!(result.text, "Bel <TELEFOON> vandaag");
}

#[tokio::test]
async fn test_text_without_pii_passes_through_normalized() {
    let engine = offline_engine();
    let result = engine.anonymize("  dit is een  zin zonder gevoelige gegevens  ").await;
    assert_eq!(result.text, "dit is een zin zonder gevoelige gegevens");
    assert!(result.spans.is_empty());
}

#[tokio::test]
async fn test_analysis_reports_resolved_spans() {
    let engine = offline_engine();
    let analysis = engine.analyze("Bel 0612345678 of mail test@example.com.").await;

    assert_eq!(analysis.spans.len(), 2);
    // Ascending and non-overlapping
    for pair in analysis.spans.windows(2) {
        assert!(pair[0].end <= pair[1].start);
    }
    // Offsets are valid for the normalized text
    for span in &analysis.spans {
        assert!(span.start < span.end && span.end <= analysis.text.len());
    }
    assert_eq!(
        &analysis.text[analysis.spans[0].start..analysis.spans[0].end],
        "0612345678"
    );
}

#[tokio::test]
async fn test_placeholder_overrides_applied() {
    let engine = engine_from_yaml(
        "placeholders:\n  PHONE_NUMBER: \"[TELEFOONNUMMER]\"\ninference:\n  enabled: false\n",
    );
    let result = engine.anonymize("Bel 0612345678.").await;
    assert_eq!(result.text, "Bel [TELEFOONNUMMER].");
}

#[tokio::test]
async fn test_anonymize_is_deterministic() {
    let engine = offline_engine();
    let input = "Bel 0612345678 of mail test@example.com, ik ben Jan.";
    let first = engine.anonymize(input).await;
    let second = engine.anonymize(input).await;
    assert_eq!(first.text, second.text);
    assert_eq!(first.spans, second.spans);
}
