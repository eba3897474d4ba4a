//! Configuration for the anonymization pipeline.
//!
//! Configuration sources (highest priority first):
//! 1. Explicit path (`--config`)
//! 2. Environment variable (VERHUL_CONFIG)
//! 3. Config file discovery (.verhul/config.yaml in cwd or parents)
//! 4. Built-in defaults (the Dutch pattern vocabulary below)
//!
//! Everything is loaded once per process. All patterns are compiled at
//! startup so a malformed pattern fails before any text is processed.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

use regex::Regex;
use serde::Deserialize;
use thiserror::Error;

use crate::adapters::{NameInference, OllamaClient};
use crate::detectors::person::NAME_GROUP;
use crate::detectors::{ContextPersonDetector, Detector, PatternDetector, PatternSetDetector};
use crate::domain::{EntityKind, PlaceholderMap};

/// Environment variable pointing at a config file.
pub const CONFIG_ENV: &str = "VERHUL_CONFIG";

/// Configuration-time error. Always fatal: the engine refuses to start on
/// a config it cannot fully compile.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config file {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("invalid {category} pattern '{pattern}': {source}")]
    Pattern {
        category: &'static str,
        pattern: String,
        #[source]
        source: Box<regex::Error>,
    },

    #[error("person trigger pattern '{pattern}' is missing a 'name' capture group")]
    MissingNameGroup { pattern: String },
}

/// Top-level configuration (matches the YAML structure).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    /// Placeholder token overrides, keyed by entity name (PERSON, ...)
    #[serde(default)]
    pub placeholders: HashMap<EntityKind, String>,

    /// Pattern vocabulary overrides
    #[serde(default)]
    pub patterns: PatternConfig,

    /// Person detection strategy and its parameters
    #[serde(default)]
    pub person: PersonConfig,

    /// External name-inference settings
    #[serde(default)]
    pub inference: InferenceConfig,
}

/// Regex vocabularies per category. These are configuration data, not
/// architecture; the defaults cover common Dutch notations.
#[derive(Debug, Clone, Deserialize)]
pub struct PatternConfig {
    #[serde(default = "default_email_pattern")]
    pub email: String,

    #[serde(default = "default_address_pattern")]
    pub address: String,

    /// Ordered list of phone formats, most specific first
    #[serde(default = "default_phone_patterns")]
    pub phone: Vec<String>,

    #[serde(default = "default_postal_code_pattern")]
    pub postal_code: String,
}

impl Default for PatternConfig {
    fn default() -> Self {
        Self {
            email: default_email_pattern(),
            address: default_address_pattern(),
            phone: default_phone_patterns(),
            postal_code: default_postal_code_pattern(),
        }
    }
}

/// How person names are detected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PersonStrategy {
    /// Lexical name pattern only
    Pattern,
    /// Context-trigger rules plus optional external inference
    Contextual,
}

/// Person detection configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct PersonConfig {
    #[serde(default = "default_person_strategy")]
    pub strategy: PersonStrategy,

    /// Lexical pattern for the `pattern` strategy
    #[serde(default = "default_person_pattern")]
    pub pattern: String,

    /// Match-initial words that disqualify a lexical match
    #[serde(default = "default_person_stopwords")]
    pub stopwords: Vec<String>,

    /// Trigger rules for the `contextual` strategy; each must define a
    /// `name` capture group holding the name sub-match
    #[serde(default = "default_context_triggers")]
    pub context_triggers: Vec<String>,
}

impl Default for PersonConfig {
    fn default() -> Self {
        Self {
            strategy: default_person_strategy(),
            pattern: default_person_pattern(),
            stopwords: default_person_stopwords(),
            context_triggers: default_context_triggers(),
        }
    }
}

/// External inference settings for the contextual person strategy.
#[derive(Debug, Clone, Deserialize)]
pub struct InferenceConfig {
    #[serde(default = "default_inference_enabled")]
    pub enabled: bool,

    #[serde(default = "default_inference_url")]
    pub url: String,

    #[serde(default = "default_inference_model")]
    pub model: String,

    /// Deadline for one inference exchange; on expiry the call counts as a
    /// failed detector input, not a stalled request
    #[serde(default = "default_inference_timeout")]
    pub timeout_seconds: u64,
}

impl Default for InferenceConfig {
    fn default() -> Self {
        Self {
            enabled: default_inference_enabled(),
            url: default_inference_url(),
            model: default_inference_model(),
            timeout_seconds: default_inference_timeout(),
        }
    }
}

fn default_email_pattern() -> String {
    r"\b[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}\b".to_string()
}

fn default_address_pattern() -> String {
    r"\b[A-Z][a-z]+(?:straat|weg|laan|plein|singel|kade|gracht)\s+\d+[a-zA-Z]?\b".to_string()
}

fn default_phone_patterns() -> Vec<String> {
    [
        // International format without spaces
        r"\+31\d{9}\b",
        // International format with optional spaces
        r"\+31\s?\d{2}\s?\d{7}\b",
        // National format without spaces
        r"0\d{9}\b",
        // National formats with optional separator
        r"0\d{2}[-\s]?\d{7}\b",
        r"0\d{3}[-\s]?\d{6}\b",
        // Any 10 digit combination with optional separators
        r"\b\d{2}[-\s]?\d{2}[-\s]?\d{2}[-\s]?\d{2}[-\s]?\d{2}\b",
    ]
    .into_iter()
    .map(String::from)
    .collect()
}

fn default_postal_code_pattern() -> String {
    r"\b\d{4}\s?[A-Za-z]{2}\b|\b\d{4}-[A-Za-z]{2}\b".to_string()
}

fn default_person_strategy() -> PersonStrategy {
    PersonStrategy::Contextual
}

fn default_person_pattern() -> String {
    r"\b(?:[A-Z][a-z]+(?:\s+(?:van|de|der|den|van der|van de|van den))?\s+)*[A-Z][a-z]+\b"
        .to_string()
}

fn default_person_stopwords() -> Vec<String> {
    vec!["Mijn".to_string(), "Je".to_string()]
}

fn default_context_triggers() -> Vec<String> {
    // Trigger context around the name group; triggers are case-insensitive,
    // the name itself stays capitalized
    const NAME: &str = r"(?P<name>[A-Z][a-z]+(?:\s+[A-Z][a-z]+)*)";
    [
        (r"(?i:\b(?:Mr|Mrs|Ms|Dr)\.\s+)", ""),
        (r"(?i:\b(?:meneer|mevrouw|dokter)\s+)", ""),
        (r"(?i:\b(?:sprak|praatte|overlegde|belde)\s+met\s+)", ""),
        (r"(?i:\bik\s+ben\s+)", ""),
        (r"(?i:\bhij\s+heet\s+)", ""),
        (r"(?i:\bzij\s+heet\s+)", ""),
        (r"(?i:\bmet\s+)", r"(?i:\s+gesproken\b)"),
        (r"(?i:\bwaarom\s+)", r"(?i:\s+geen\b)"),
        (r"(?i:\bkan\s+)", r"(?i:\s+niet\b)"),
        ("", r"(?i:\s+(?:zei|vertelde|sprak|belt)\b)"),
        ("", r"(?i:\s+heeft\s+(?:geen|wel)\b)"),
        ("", r"(?i:\s+kan\s+niet\b)"),
    ]
    .into_iter()
    .map(|(prefix, suffix)| format!("{prefix}{NAME}{suffix}"))
    .collect()
}

fn default_inference_enabled() -> bool {
    true
}

fn default_inference_url() -> String {
    "http://localhost:11434/api/generate".to_string()
}

fn default_inference_model() -> String {
    "mistral".to_string()
}

fn default_inference_timeout() -> u64 {
    10
}

/// Find a config file by searching the working directory and its parents.
fn find_config_file() -> Option<PathBuf> {
    let mut current = std::env::current_dir().ok()?;

    loop {
        let config_path = current.join(".verhul").join("config.yaml");
        if config_path.exists() {
            return Some(config_path);
        }

        if !current.pop() {
            break;
        }
    }

    None
}

impl Config {
    /// Load configuration from all sources.
    ///
    /// With no explicit path, no env var, and no discoverable file, the
    /// built-in defaults apply.
    pub fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        let path = explicit
            .map(Path::to_path_buf)
            .or_else(|| std::env::var(CONFIG_ENV).ok().map(PathBuf::from))
            .or_else(find_config_file);

        match path {
            Some(path) => Self::from_file(&path),
            None => Ok(Self::default()),
        }
    }

    /// Load and parse a config file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;

        serde_yaml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.display().to_string(),
            source,
        })
    }

    /// The placeholder map: built-in defaults with overrides applied.
    pub fn placeholder_map(&self) -> PlaceholderMap {
        PlaceholderMap::with_overrides(self.placeholders.clone())
    }

    /// Build the configured detector list, in registration order.
    ///
    /// Registration order is a priority signal on ties: person first, then
    /// email, address, phone, postal code, mirroring the reference
    /// configuration. All patterns compile here or not at all.
    pub fn build_detectors(&self) -> Result<Vec<Box<dyn Detector>>, ConfigError> {
        let mut detectors: Vec<Box<dyn Detector>> = Vec::new();

        match self.person.strategy {
            PersonStrategy::Pattern => {
                let pattern = compile("PERSON", &self.person.pattern)?;
                detectors.push(Box::new(
                    PatternDetector::new("person", EntityKind::Person, pattern)
                        .with_stopwords(self.person.stopwords.clone()),
                ));
            }
            PersonStrategy::Contextual => {
                let mut rules = Vec::with_capacity(self.person.context_triggers.len());
                for trigger in &self.person.context_triggers {
                    let rule = compile("PERSON", trigger)?;
                    if !rule.capture_names().flatten().any(|n| n == NAME_GROUP) {
                        return Err(ConfigError::MissingNameGroup {
                            pattern: trigger.clone(),
                        });
                    }
                    rules.push(rule);
                }
                detectors.push(Box::new(ContextPersonDetector::new(
                    rules,
                    self.inference_client(),
                )));
            }
        }

        detectors.push(Box::new(PatternDetector::new(
            "email",
            EntityKind::EmailAddress,
            compile("EMAIL_ADDRESS", &self.patterns.email)?,
        )));

        detectors.push(Box::new(PatternDetector::new(
            "address",
            EntityKind::Address,
            compile("ADDRESS", &self.patterns.address)?,
        )));

        let mut phone_patterns = Vec::with_capacity(self.patterns.phone.len());
        for pattern in &self.patterns.phone {
            phone_patterns.push(compile("PHONE_NUMBER", pattern)?);
        }
        detectors.push(Box::new(PatternSetDetector::new(
            "phone",
            EntityKind::PhoneNumber,
            phone_patterns,
        )));

        detectors.push(Box::new(PatternDetector::new(
            "postal_code",
            EntityKind::PostalCode,
            compile("POSTAL_CODE", &self.patterns.postal_code)?,
        )));

        Ok(detectors)
    }

    fn inference_client(&self) -> Option<Box<dyn NameInference>> {
        if !self.inference.enabled {
            return None;
        }
        Some(Box::new(OllamaClient::new(
            self.inference.url.clone(),
            self.inference.model.clone(),
            Duration::from_secs(self.inference.timeout_seconds),
        )))
    }
}

fn compile(category: &'static str, pattern: &str) -> Result<Regex, ConfigError> {
    Regex::new(pattern).map_err(|source| ConfigError::Pattern {
        category,
        pattern: pattern.to_string(),
        source: Box::new(source),
    })
}
