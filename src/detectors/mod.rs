//! Detector interfaces for PII recognition.
//!
//! Detectors provide a unified capability for scanning one text and
//! emitting candidate spans. Variants range from pure pattern matching to
//! the hybrid person detector that consults an external inference service.

pub mod pattern;
pub mod person;

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::Span;

// Re-export the detector variants
pub use pattern::{PatternDetector, PatternSetDetector};
pub use person::ContextPersonDetector;

/// Error raised by a single detector.
///
/// Detector failures never escalate to pipeline failures: the engine logs
/// the error and continues with the remaining detectors' results.
#[derive(Debug, Error)]
pub enum DetectError {
    /// The external inference service could not produce results
    #[error("name inference failed: {0}")]
    Inference(anyhow::Error),
}

/// Trait for PII detectors.
///
/// `detect` must be pure with respect to `text`: no mutation, no state
/// carried between calls. Implementations that perform no external I/O
/// complete synchronously inside the async fn.
#[async_trait]
pub trait Detector: Send + Sync {
    /// Human-readable detector name (used in logs)
    fn name(&self) -> &str;

    /// Scan `text` and return candidate spans, unordered and undeduplicated.
    async fn detect(&self, text: &str) -> Result<Vec<Span>, DetectError>;
}
