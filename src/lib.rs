//! verhul - Dutch PII detection and anonymization
//!
//! A pipeline that detects personally identifiable information in free-form
//! Dutch text and rewrites it with category-specific placeholder tokens.
//!
//! # Architecture
//!
//! Each text is processed independently and statelessly:
//! - Whitespace is normalized once, before detection
//! - Every configured detector scans the same normalized text
//! - Overlapping detections are merged into one non-overlapping span set
//! - Spans are replaced with placeholders in offset-safe order
//!
//! A failing detector (e.g. an unreachable inference service) contributes
//! zero spans; the pipeline always returns a result.
//!
//! # Modules
//!
//! - `adapters`: External inference integration (Ollama)
//! - `core`: Pipeline logic (Anonymizer, resolver, rewriter)
//! - `detectors`: Detector trait and its variants
//! - `domain`: Data structures (Span, EntityKind, PlaceholderMap)
//! - `cli`: Command-line interface
//!
//! # Usage
//!
//! ```bash
//! # Anonymize text
//! echo "Bel 0612345678" | verhul anonymize
//!
//! # Inspect detections
//! echo "Bel 0612345678" | verhul detect --json
//! ```

pub mod adapters;
pub mod cli;
pub mod config;
pub mod core;
pub mod detectors;
pub mod domain;

// Re-export main types at crate root for convenience
pub use config::{Config, ConfigError, PersonStrategy};
pub use core::{Analysis, Anonymized, Anonymizer};
pub use detectors::{DetectError, Detector};
pub use domain::{EntityKind, PlaceholderMap, Span};
