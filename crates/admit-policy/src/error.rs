// error.rs - Error types for the policy subsystem.
//
// Classification never fails. These errors only come from loading a rule
// set from disk or resolving a rule-set name.

use thiserror::Error;

/// Errors that can occur while loading or resolving rule sets.
#[derive(Debug, Error)]
pub enum PolicyError {
    /// A file I/O operation failed.
    #[error("I/O error at {path}: {source}")]
    IoError {
        path: String,
        source: std::io::Error,
    },

    /// A TOML rule-set file could not be parsed.
    #[error("invalid rule set TOML: {0}")]
    Toml(#[from] toml::de::Error),

    /// A YAML rule-set file could not be parsed.
    #[error("invalid rule set YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// No builtin rule set has this name.
    #[error("unknown rule set '{name}' (expected 'current' or 'legacy')")]
    UnknownRuleSet { name: String },
}
