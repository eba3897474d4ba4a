//! Hybrid person-name detector.
//!
//! Combines context-trigger rules ("meneer <Naam>", "<Naam> zei", ...) with
//! an optional external inference service. Each trigger rule carries a
//! `name` capture group; only that sub-match becomes a span. Candidates
//! from both sources are merged locally before they reach the aggregator.

use async_trait::async_trait;
use regex::Regex;
use tracing::{debug, warn};

use crate::adapters::NameInference;
use crate::core::resolve::resolve_overlaps;
use crate::domain::{EntityKind, Span};

use super::{DetectError, Detector};

/// Fixed confidence for context-rule matches.
pub const CONTEXT_SCORE: f64 = 0.7;

/// Name of the capture group a trigger rule must define.
pub const NAME_GROUP: &str = "name";

/// Detector for person names using context rules plus optional inference.
pub struct ContextPersonDetector {
    rules: Vec<Regex>,
    inference: Option<Box<dyn NameInference>>,
}

impl ContextPersonDetector {
    /// Create a detector from trigger rules, each with a `name` group.
    ///
    /// Rule validation (group presence, pattern compilation) happens at
    /// config time, before any text is processed.
    pub fn new(rules: Vec<Regex>, inference: Option<Box<dyn NameInference>>) -> Self {
        Self { rules, inference }
    }

    fn rule_spans(&self, text: &str) -> Vec<Span> {
        let mut spans = Vec::new();
        for rule in &self.rules {
            for caps in rule.captures_iter(text) {
                if let Some(m) = caps.name(NAME_GROUP) {
                    spans.push(Span::new(EntityKind::Person, m.start(), m.end(), CONTEXT_SCORE));
                }
            }
        }
        spans
    }

    async fn inference_spans(&self, text: &str) -> Vec<Span> {
        let Some(service) = &self.inference else {
            return Vec::new();
        };

        let candidates = match service.suggest_names(text).await {
            Ok(candidates) => candidates,
            Err(e) => {
                warn!(
                    service = service.name(),
                    error = %e,
                    "name inference unavailable, continuing with context rules only"
                );
                return Vec::new();
            }
        };

        let mut spans = Vec::new();
        for candidate in candidates {
            let span = Span::new(
                EntityKind::Person,
                candidate.start,
                candidate.end,
                candidate.confidence,
            );
            if span.is_valid_for(text) {
                spans.push(span);
            } else {
                warn!(
                    name = %candidate.name,
                    start = candidate.start,
                    end = candidate.end,
                    "dropping inference candidate with invalid offsets"
                );
            }
        }
        spans
    }
}

#[async_trait]
impl Detector for ContextPersonDetector {
    fn name(&self) -> &str {
        "person"
    }

    async fn detect(&self, text: &str) -> Result<Vec<Span>, DetectError> {
        let mut candidates = self.rule_spans(text);
        candidates.extend(self.inference_spans(text).await);

        // Local merge: touching or overlapping candidates collapse into one
        // span covering min(start)..max(end) at the maximum score.
        candidates.sort_by_key(|s| s.start);
        let merged = resolve_overlaps(candidates);

        debug!(count = merged.len(), "person detection finished");
        Ok(merged)
    }
}

#[cfg(test)]
mod tests {
    use anyhow::Result;

    use crate::adapters::NameCandidate;

    use super::*;

    fn trigger_rules() -> Vec<Regex> {
        vec![
            Regex::new(r"(?i:\bik\s+ben\s+)(?P<name>[A-Z][a-z]+(?:\s+[A-Z][a-z]+)*)").unwrap(),
            Regex::new(r"(?i:\bmeneer\s+|\bmevrouw\s+)(?P<name>[A-Z][a-z]+(?:\s+[A-Z][a-z]+)*)")
                .unwrap(),
        ]
    }

    struct StaticInference(Vec<NameCandidate>);

    #[async_trait]
    impl NameInference for StaticInference {
        fn name(&self) -> &str {
            "static"
        }

        async fn suggest_names(&self, _text: &str) -> Result<Vec<NameCandidate>> {
            Ok(self.0.clone())
        }
    }

    struct FailingInference;

    #[async_trait]
    impl NameInference for FailingInference {
        fn name(&self) -> &str {
            "failing"
        }

        async fn suggest_names(&self, _text: &str) -> Result<Vec<NameCandidate>> {
            anyhow::bail!("connection refused")
        }
    }

    #[tokio::test]
    async fn test_trigger_captures_only_the_name() {
        let detector = ContextPersonDetector::new(trigger_rules(), None);
        let text = "Hallo, ik ben Jan Jansen en dit is een test.";
        let spans = detector.detect(text).await.unwrap();
        assert_eq!(spans.len(), 1);
        assert_eq!(&text[spans[0].start..spans[0].end], "Jan Jansen");
        assert_eq!(spans[0].score, CONTEXT_SCORE);
    }

    #[tokio::test]
    async fn test_overlapping_sources_merge_locally() {
        let text = "ik ben Jan Jansen";
        // Inference claims a wider range at higher confidence
        let inference = StaticInference(vec![NameCandidate {
            name: "Jan Jansen".to_string(),
            start: 7,
            end: 17,
            confidence: 0.9,
        }]);
        let detector = ContextPersonDetector::new(trigger_rules(), Some(Box::new(inference)));
        let spans = detector.detect(text).await.unwrap();
        assert_eq!(spans.len(), 1);
        assert_eq!((spans[0].start, spans[0].end), (7, 17));
        assert_eq!(spans[0].score, 0.9);
    }

    #[tokio::test]
    async fn test_invalid_inference_offsets_dropped() {
        let text = "ik ben Jan";
        let inference = StaticInference(vec![
            NameCandidate {
                name: "Jan".to_string(),
                start: 7,
                end: 999,
                confidence: 0.9,
            },
            NameCandidate {
                name: "Leeg".to_string(),
                start: 5,
                end: 5,
                confidence: 0.9,
            },
        ]);
        let detector = ContextPersonDetector::new(trigger_rules(), Some(Box::new(inference)));
        let spans = detector.detect(text).await.unwrap();
        // Only the context-rule span survives
        assert_eq!(spans.len(), 1);
        assert_eq!(&text[spans[0].start..spans[0].end], "Jan");
    }

    #[tokio::test]
    async fn test_inference_failure_degrades_to_rules() {
        let text = "ik ben Jan";
        let detector =
            ContextPersonDetector::new(trigger_rules(), Some(Box::new(FailingInference)));
        let spans = detector.detect(text).await.unwrap();
        assert_eq!(spans.len(), 1);
        assert_eq!(&text[spans[0].start..spans[0].end], "Jan");
    }
}
