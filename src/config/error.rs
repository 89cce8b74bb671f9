//! Configuration loading errors.

use thiserror::Error;

/// Errors that can occur while reading or writing a machine configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Input was not a valid JSON machine configuration
    #[error("Failed to parse machine configuration: {0}")]
    Parse(String),

    /// Configuration could not be written as JSON
    #[error("Failed to serialize machine configuration: {0}")]
    Serialize(String),
}
