//! Configuration management with YAML support

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

use crate::context::{ContextAnalyzer, DEFAULT_NOTES_LIMIT};
use crate::error::{ChatleadError, Result};
use crate::extract::DEFAULT_WINDOW_SIZE;

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub extraction: ExtractionConfig,

    #[serde(default)]
    pub import: ImportConfig,

    #[serde(default)]
    pub output: OutputConfig,
}

/// Extraction and analysis settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractionConfig {
    /// Messages taken on each side of a match
    #[serde(default = "default_window_size")]
    pub window_size: usize,

    #[serde(default = "default_notes_limit")]
    pub notes_limit: usize,
}

/// Import preparation settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ImportConfig {
    /// Profile links already held in storage
    #[serde(default)]
    pub known_profiles: Vec<String>,
}

/// CLI output settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OutputConfig {
    #[serde(default)]
    pub format: OutputFormat,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Json,
    #[default]
    Text,
}

// Default value functions
fn default_window_size() -> usize {
    DEFAULT_WINDOW_SIZE
}

fn default_notes_limit() -> usize {
    DEFAULT_NOTES_LIMIT
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            window_size: default_window_size(),
            notes_limit: default_notes_limit(),
        }
    }
}

impl Config {
    /// Load configuration from a YAML file
    /// Searches in order:
    /// 1. Provided path
    /// 2. ./chatlead.yaml (current directory)
    /// 3. ~/.config/chatlead/chatlead.yaml
    pub fn load(path: &str) -> Result<Self> {
        let search_paths = vec![
            shellexpand::tilde(path).to_string(),
            "chatlead.yaml".to_string(),
            shellexpand::tilde("~/.config/chatlead/chatlead.yaml").to_string(),
        ];

        for search_path in &search_paths {
            if Path::new(search_path).exists() {
                let content = std::fs::read_to_string(search_path)?;
                return Self::from_yaml(&content);
            }
        }

        // No config file found, use defaults
        Ok(Config::default())
    }

    /// Parse and validate a YAML document
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let config: Config = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.extraction.notes_limit == 0 {
            return Err(ChatleadError::InvalidConfig(
                "extraction.notes_limit must be greater than 0".to_string(),
            ));
        }
        Ok(())
    }

    /// Analyzer configured with the notes limit
    pub fn analyzer(&self) -> ContextAnalyzer {
        ContextAnalyzer::new(self.extraction.notes_limit)
    }

    /// Known profile links as a lookup set
    pub fn known_profiles(&self) -> HashSet<String> {
        self.import.known_profiles.iter().cloned().collect()
    }
}
