// config.rs - Project configuration for the `admit` CLI.
//
// Read from `<project_root>/.admit/config.toml`. Every key is optional;
// a missing file means defaults. Command-line flags override the file.
//
//   [classifier]
//   ruleset = "current"        # "current", "legacy", or a path to a rule-set file
//
//   [output]
//   format = "text"            # "text" or "json"

use std::path::{Path, PathBuf};

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Top-level configuration from .admit/config.toml
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AdmitConfig {
    #[serde(default)]
    pub classifier: ClassifierConfig,

    #[serde(default)]
    pub output: OutputConfig,
}

/// Classifier configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassifierConfig {
    /// Builtin rule-set name or a path (relative paths are resolved against the project root)
    #[serde(default = "default_ruleset")]
    pub ruleset: String,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            ruleset: default_ruleset(),
        }
    }
}

fn default_ruleset() -> String {
    "current".to_string()
}

/// Output configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OutputConfig {
    #[serde(default)]
    pub format: OutputFormat,
}

/// How verdicts and tables are printed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

impl AdmitConfig {
    /// Standard config location for a project.
    pub fn path_for(project_root: &Path) -> PathBuf {
        project_root.join(".admit").join("config.toml")
    }

    /// Load config from a TOML file.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Load config, falling back to defaults if the file is absent or unreadable.
    pub fn load_or_default(path: &Path) -> Self {
        if !path.exists() {
            return Self::default();
        }
        match Self::load(path) {
            Ok(config) => {
                tracing::debug!(path = %path.display(), "loaded config");
                config
            }
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "ignoring invalid config");
                Self::default()
            }
        }
    }
}
