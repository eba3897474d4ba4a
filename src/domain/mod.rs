//! Domain types for the anonymization pipeline.
//!
//! This module contains the core data structures:
//! - Span: a scored byte range flagged as one PII category
//! - EntityKind: the closed set of recognized categories
//! - PlaceholderMap: category to replacement-token mapping

pub mod placeholder;
pub mod span;

// Re-export commonly used types
pub use placeholder::PlaceholderMap;
pub use span::{EntityKind, Span};
