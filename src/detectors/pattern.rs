//! Pattern-based detectors.
//!
//! These detectors scan with precompiled regexes and emit one span per
//! match at a fixed score. Overlapping matches, including matches produced
//! by different patterns of one `PatternSetDetector`, are left for the
//! global conflict resolver to reconcile.

use async_trait::async_trait;
use regex::Regex;

use crate::domain::{EntityKind, Span};

use super::{DetectError, Detector};

/// Fixed confidence for pattern matches.
pub const PATTERN_SCORE: f64 = 0.85;

/// Detector backed by a single compiled pattern.
pub struct PatternDetector {
    name: String,
    kind: EntityKind,
    pattern: Regex,
    /// Words that disqualify a match when they are its first word.
    /// Stands in for the lookahead exclusions of the pattern vocabulary.
    stopwords: Vec<String>,
}

impl PatternDetector {
    pub fn new(name: impl Into<String>, kind: EntityKind, pattern: Regex) -> Self {
        Self {
            name: name.into(),
            kind,
            pattern,
            stopwords: Vec::new(),
        }
    }

    /// Attach stopwords: a match whose first word equals one of these is
    /// dropped (e.g. possessives like "Mijn" in front of a name pattern).
    pub fn with_stopwords(mut self, stopwords: Vec<String>) -> Self {
        self.stopwords = stopwords;
        self
    }

    fn is_stopword_match(&self, matched: &str) -> bool {
        match matched.split_whitespace().next() {
            Some(first) => self.stopwords.iter().any(|w| w == first),
            None => true,
        }
    }
}

#[async_trait]
impl Detector for PatternDetector {
    fn name(&self) -> &str {
        &self.name
    }

    async fn detect(&self, text: &str) -> Result<Vec<Span>, DetectError> {
        let spans = self
            .pattern
            .find_iter(text)
            .filter(|m| self.stopwords.is_empty() || !self.is_stopword_match(m.as_str()))
            .map(|m| Span::new(self.kind, m.start(), m.end(), PATTERN_SCORE))
            .collect();
        Ok(spans)
    }
}

/// Detector backed by an ordered list of patterns sharing one kind.
///
/// Used for categories with several written forms, e.g. the Dutch phone
/// number formats. Duplicate matches across patterns are not deduplicated
/// here.
pub struct PatternSetDetector {
    name: String,
    kind: EntityKind,
    patterns: Vec<Regex>,
}

impl PatternSetDetector {
    pub fn new(name: impl Into<String>, kind: EntityKind, patterns: Vec<Regex>) -> Self {
        Self {
            name: name.into(),
            kind,
            patterns,
        }
    }
}

#[async_trait]
impl Detector for PatternSetDetector {
    fn name(&self) -> &str {
        &self.name
    }

    async fn detect(&self, text: &str) -> Result<Vec<Span>, DetectError> {
        let mut spans = Vec::new();
        for pattern in &self.patterns {
            for m in pattern.find_iter(text) {
                spans.push(Span::new(self.kind, m.start(), m.end(), PATTERN_SCORE));
            }
        }
        Ok(spans)
    }
}
