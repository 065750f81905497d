//! Error types for configuration loading and validation.

use std::fmt;

/// Errors produced while reading configuration from the environment or
/// validating the resulting values.
///
/// # Variants
///
/// - **Validation**: the assembled configuration breaks an internal
///   constraint (zero batch size, learning-rate floor above the start, a
///   class count that does not match the output layer). Fix the offending
///   value; the message names it.
/// - **EnvVar**: an environment variable exists but its contents could not
///   be read as Unicode. Re-export the variable with a clean value.
/// - **Parse**: an environment variable was read but could not be parsed
///   into the target type, e.g. `MICROMLP_BATCH_SIZE=abc`. The key and the
///   raw value are carried for the error message.
#[derive(Debug, Clone)]
pub enum ConfigError {
    /// A constraint violation in the assembled configuration.
    Validation(String),

    /// An environment variable could not be read.
    EnvVar {
        /// Full environment key, prefix included.
        key: String,
        /// Reason the read failed.
        message: String,
    },

    /// An environment variable held a value the target type rejects.
    Parse {
        /// Full environment key, prefix included.
        key: String,
        /// Raw value as read from the environment.
        value: String,
        /// Reason the parse failed.
        message: String,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Validation(message) => write!(f, "invalid configuration: {message}"),
            ConfigError::EnvVar { key, message } => {
                write!(f, "environment variable {key}: {message}")
            }
            ConfigError::Parse { key, value, message } => {
                write!(f, "environment variable {key}={value:?}: {message}")
            }
        }
    }
}

impl std::error::Error for ConfigError {}
