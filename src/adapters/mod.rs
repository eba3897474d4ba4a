//! Adapter interfaces for external systems.
//!
//! Adapters provide a unified interface for the external inference service
//! that suggests person-name spans. The service is an untrusted
//! collaborator: its responses are parsed strictly and discarded on any
//! anomaly.

pub mod ollama;

use anyhow::Result;
use async_trait::async_trait;
use serde::Deserialize;

// Re-export the Ollama client
pub use ollama::OllamaClient;

/// One name-span candidate returned by the inference service.
///
/// Offsets are byte offsets into the prompt text and are validated against
/// that text by the consumer before use.
#[derive(Debug, Clone, Deserialize)]
pub struct NameCandidate {
    /// The name as the service saw it
    pub name: String,
    /// Start byte offset into the analyzed text
    pub start: usize,
    /// End byte offset into the analyzed text
    pub end: usize,
    /// Confidence in [0.0, 1.0]
    #[serde(default = "default_confidence")]
    pub confidence: f64,
}

fn default_confidence() -> f64 {
    0.8
}

/// Trait for external name-suggestion services.
#[async_trait]
pub trait NameInference: Send + Sync {
    /// Human-readable service name (used in logs)
    fn name(&self) -> &str;

    /// Ask the service for person-name candidates in `text`.
    ///
    /// An unreachable service, a timeout, or a protocol error is an `Err`;
    /// a reachable service with a malformed payload yields an empty list.
    async fn suggest_names(&self, text: &str) -> Result<Vec<NameCandidate>>;
}
