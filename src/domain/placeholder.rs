//! Placeholder tokens substituted for detected spans.

use std::collections::HashMap;

use super::span::EntityKind;

/// Mapping from entity kind to replacement token.
///
/// Loaded once at startup and read-only afterwards. Every kind has a
/// built-in Dutch default; config entries override per kind.
#[derive(Debug, Clone)]
pub struct PlaceholderMap {
    tokens: HashMap<EntityKind, String>,
}

impl Default for PlaceholderMap {
    fn default() -> Self {
        let tokens = [
            (EntityKind::Person, "<PERSOON>"),
            (EntityKind::EmailAddress, "<E-MAIL>"),
            (EntityKind::Address, "<ADRES>"),
            (EntityKind::PhoneNumber, "<TELEFOON>"),
            (EntityKind::PostalCode, "<POSTCODE>"),
        ]
        .into_iter()
        .map(|(kind, token)| (kind, token.to_string()))
        .collect();

        Self { tokens }
    }
}

impl PlaceholderMap {
    /// Build the map from defaults with config overrides applied on top.
    pub fn with_overrides(overrides: HashMap<EntityKind, String>) -> Self {
        let mut map = Self::default();
        map.tokens.extend(overrides);
        map
    }

    /// The replacement token for a kind.
    pub fn token_for(&self, kind: EntityKind) -> &str {
        // Default covers the whole closed kind set, so lookup cannot miss
        // unless overrides removed an entry; fall back to the static default.
        self.tokens
            .get(&kind)
            .map(String::as_str)
            .unwrap_or(default_token(kind))
    }
}

fn default_token(kind: EntityKind) -> &'static str {
    match kind {
        EntityKind::Person => "<PERSOON>",
        EntityKind::EmailAddress => "<E-MAIL>",
        EntityKind::Address => "<ADRES>",
        EntityKind::PhoneNumber => "<TELEFOON>",
        EntityKind::PostalCode => "<POSTCODE>",
    }
}
