//! Ollama adapter for person-name inference.
//!
//! Talks to a local Ollama instance over its generate API. The model's
//! reply is expected to be a JSON list of name candidates; anything else is
//! discarded. Response content is data, never executed.

use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::Deserialize;
use tracing::warn;

use super::{NameCandidate, NameInference};

/// Default generate endpoint of a local Ollama install.
pub const DEFAULT_URL: &str = "http://localhost:11434/api/generate";

/// Ollama client for name suggestions
pub struct OllamaClient {
    /// Generate endpoint URL
    url: String,
    /// Model identifier (e.g. "mistral")
    model: String,
    /// Deadline for the whole request/response exchange
    timeout: Duration,
    /// HTTP client
    client: reqwest::Client,
}

/// Envelope returned by the generate API
#[derive(Debug, Deserialize)]
struct GenerateResponse {
    response: String,
}

impl OllamaClient {
    pub fn new(url: impl Into<String>, model: impl Into<String>, timeout: Duration) -> Self {
        Self {
            url: url.into(),
            model: model.into(),
            timeout,
            client: reqwest::Client::new(),
        }
    }

    fn build_prompt(text: &str) -> String {
        format!(
            "Analyze the following Dutch text and identify all potential person names, \
             including unconventional, uncommon, or non-Dutch names. Consider the context \
             and sentence structure. Only identify the exact name, not surrounding words.\n\n\
             Respond with a JSON list of objects, where each object has 'name', 'start', \
             and 'end' properties. The 'start' and 'end' should be character indices in \
             the original text. Provide a 'confidence' score between 0 and 1 for each \
             name, based on how certain you are that it's a name.\n\n\
             Text: {text}\n\nResponse:"
        )
    }

    /// Parse the model's reply into candidates.
    ///
    /// The reply is untrusted free text; only a well-formed JSON list of
    /// candidate objects survives. Confidence values are clamped to [0, 1].
    fn parse_reply(reply: &str) -> Vec<NameCandidate> {
        match serde_json::from_str::<Vec<NameCandidate>>(reply.trim()) {
            Ok(mut candidates) => {
                for candidate in &mut candidates {
                    candidate.confidence = candidate.confidence.clamp(0.0, 1.0);
                }
                candidates
            }
            Err(e) => {
                warn!(error = %e, "discarding malformed inference reply");
                Vec::new()
            }
        }
    }
}

#[async_trait]
impl NameInference for OllamaClient {
    fn name(&self) -> &str {
        "ollama"
    }

    async fn suggest_names(&self, text: &str) -> Result<Vec<NameCandidate>> {
        let request = self
            .client
            .post(&self.url)
            .json(&serde_json::json!({
                "model": self.model,
                "prompt": Self::build_prompt(text),
                "stream": false,
            }))
            .send();

        let response = tokio::time::timeout(self.timeout, request)
            .await
            .with_context(|| format!("inference request timed out after {:?}", self.timeout))?
            .context("failed to reach inference service")?;

        if !response.status().is_success() {
            anyhow::bail!("inference service returned status {}", response.status());
        }

        let envelope: GenerateResponse = tokio::time::timeout(self.timeout, response.json())
            .await
            .with_context(|| format!("inference response timed out after {:?}", self.timeout))?
            .context("failed to parse inference response envelope")?;

        Ok(Self::parse_reply(&envelope.response))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_reply_valid_list() {
        let reply = r#"[{"name": "Jan de Vries", "start": 13, "end": 25, "confidence": 0.9}]"#;
        let candidates = OllamaClient::parse_reply(reply);
        assert_eq!(candidates.len(), 1);
        assert_eq!(candidates[0].name, "Jan de Vries");
        assert_eq!(candidates[0].start, 13);
        assert_eq!(candidates[0].end, 25);
        assert_eq!(candidates[0].confidence, 0.9);
    }

    #[test]
    fn test_parse_reply_missing_confidence_defaults() {
        let reply = r#"[{"name": "Piet", "start": 0, "end": 4}]"#;
        let candidates = OllamaClient::parse_reply(reply);
        assert_eq!(candidates.len(), 1);
        assert_eq!(candidates[0].confidence, 0.8);
    }

    #[test]
    fn test_parse_reply_clamps_confidence() {
        let reply = r#"[{"name": "Piet", "start": 0, "end": 4, "confidence": 3.5}]"#;
        let candidates = OllamaClient::parse_reply(reply);
        assert_eq!(candidates[0].confidence, 1.0);
    }

    #[test]
    fn test_parse_reply_rejects_prose() {
        let reply = "Sure! The names I found are Jan and Piet.";
        assert!(OllamaClient::parse_reply(reply).is_empty());
    }

    #[test]
    fn test_parse_reply_rejects_wrong_shape() {
        // An object instead of a list, and a list of strings, both rejected
        assert!(OllamaClient::parse_reply(r#"{"name": "Jan"}"#).is_empty());
        assert!(OllamaClient::parse_reply(r#"["Jan", "Piet"]"#).is_empty());
    }

    #[tokio::test]
    async fn test_unreachable_service_is_error() {
        // Port 9 (discard) on localhost is not listening
        let client = OllamaClient::new(
            "http://127.0.0.1:9/api/generate",
            "mistral",
            Duration::from_millis(250),
        );
        let result = client.suggest_names("Ik ben Jan").await;
        assert!(result.is_err());
    }
}
