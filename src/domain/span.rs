//! Span and entity types for PII detection.
//!
//! A `Span` is only meaningful relative to the exact text it was produced
//! from. Detection and rewriting always operate on the same normalized text,
//! so spans never cross a normalization boundary.

use serde::{Deserialize, Serialize};

/// The closed set of PII categories the pipeline recognizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EntityKind {
    /// A person's name
    Person,
    /// An e-mail address
    EmailAddress,
    /// A street address (Dutch street-name suffixes plus house number)
    Address,
    /// A phone number (Dutch national or international formats)
    PhoneNumber,
    /// A Dutch postal code (four digits plus two letters)
    PostalCode,
}

impl EntityKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            EntityKind::Person => "PERSON",
            EntityKind::EmailAddress => "EMAIL_ADDRESS",
            EntityKind::Address => "ADDRESS",
            EntityKind::PhoneNumber => "PHONE_NUMBER",
            EntityKind::PostalCode => "POSTAL_CODE",
        }
    }
}

impl std::fmt::Display for EntityKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A scored character range flagged as containing one PII category.
///
/// Offsets are UTF-8 byte offsets into one specific text, half-open:
/// `0 <= start < end <= text.len()`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Span {
    /// Detected PII category
    pub kind: EntityKind,
    /// Start byte offset (inclusive)
    pub start: usize,
    /// End byte offset (exclusive)
    pub end: usize,
    /// Confidence in [0.0, 1.0]
    pub score: f64,
}

impl Span {
    pub fn new(kind: EntityKind, start: usize, end: usize, score: f64) -> Self {
        Self {
            kind,
            start,
            end,
            score,
        }
    }

    /// Check the offset invariants against the text this span refers to.
    ///
    /// A span failing this check is dropped by its consumer, never applied.
    pub fn is_valid_for(&self, text: &str) -> bool {
        self.start < self.end
            && self.end <= text.len()
            && text.is_char_boundary(self.start)
            && text.is_char_boundary(self.end)
    }

    /// Whether `other` overlaps or touches this span.
    pub fn touches(&self, other: &Span) -> bool {
        other.start <= self.end && self.start <= other.end
    }
}
