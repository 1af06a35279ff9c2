//! Error types for the fallible edges of the crate
//!
//! Parsing, extraction and analysis are total functions and never fail.
//! Only configuration handling and reading input files can.

use thiserror::Error;

/// Errors raised while loading configuration or reading chat exports
#[derive(Error, Debug)]
pub enum ChatleadError {
    /// File could not be read
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration file is not valid YAML for [`crate::Config`]
    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// Configuration parsed but holds an unusable value
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

pub type Result<T> = std::result::Result<T, ChatleadError>;
