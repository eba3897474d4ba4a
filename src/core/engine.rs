//! Main anonymization engine.
//!
//! Coordinates the pipeline: whitespace normalization, detector
//! aggregation, overlap resolution, and placeholder rewriting. The engine
//! holds no mutable state after construction and is safe to share across
//! concurrent text-processing calls.

use serde::Serialize;
use tracing::{debug, instrument, warn};

use crate::config::{Config, ConfigError};
use crate::detectors::Detector;
use crate::domain::{PlaceholderMap, Span};

use super::resolve::resolve_overlaps;
use super::rewrite::{collapse_whitespace, rewrite};

/// Detection report for one text.
///
/// `spans` refer to `text`, the whitespace-normalized form of the input.
#[derive(Debug, Clone, Serialize)]
pub struct Analysis {
    /// The normalized text the spans were detected in
    pub text: String,
    /// Resolved, non-overlapping spans in ascending order
    pub spans: Vec<Span>,
}

/// Result of anonymizing one text.
#[derive(Debug, Clone, Serialize)]
pub struct Anonymized {
    /// The anonymized text
    pub text: String,
    /// The spans that were replaced, relative to the normalized input
    pub spans: Vec<Span>,
}

/// The anonymization pipeline.
pub struct Anonymizer {
    /// Detectors in registration order; order is a priority signal on ties
    detectors: Vec<Box<dyn Detector>>,
    placeholders: PlaceholderMap,
}

impl Anonymizer {
    /// Build the engine from configuration.
    ///
    /// All patterns are compiled here; a malformed pattern is fatal before
    /// any text is processed.
    pub fn from_config(config: &Config) -> Result<Self, ConfigError> {
        Ok(Self {
            detectors: config.build_detectors()?,
            placeholders: config.placeholder_map(),
        })
    }

    /// Build the engine from explicit parts (custom detector sets).
    pub fn new(detectors: Vec<Box<dyn Detector>>, placeholders: PlaceholderMap) -> Self {
        Self {
            detectors,
            placeholders,
        }
    }

    /// Detect PII in `text` and return the resolved span set.
    ///
    /// Every detector runs; one failing contributes zero spans and the
    /// pipeline continues with partial results.
    #[instrument(skip(self, text))]
    pub async fn analyze(&self, text: &str) -> Analysis {
        let text = collapse_whitespace(text);

        let mut spans: Vec<Span> = Vec::new();
        for detector in &self.detectors {
            match detector.detect(&text).await {
                Ok(found) => {
                    debug!(detector = detector.name(), count = found.len(), "detector finished");
                    spans.extend(found);
                }
                Err(e) => {
                    warn!(
                        detector = detector.name(),
                        error = %e,
                        "detector failed, continuing without its results"
                    );
                }
            }
        }

        // Stable sort: start ascending, ties by descending score, further
        // ties keep detector registration order.
        spans.sort_by(|a, b| a.start.cmp(&b.start).then_with(|| b.score.total_cmp(&a.score)));

        Analysis {
            spans: resolve_overlaps(spans),
            text,
        }
    }

    /// Anonymize `text`: detect, resolve, and substitute placeholders.
    ///
    /// With no detections (including total detector failure) the normalized
    /// text is returned unchanged.
    pub async fn anonymize(&self, text: &str) -> Anonymized {
        let analysis = self.analyze(text).await;
        let text = rewrite(&analysis.text, &analysis.spans, &self.placeholders);
        Anonymized {
            text,
            spans: analysis.spans,
        }
    }
}
