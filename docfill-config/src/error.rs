//! Error types for the Docfill configuration system

use thiserror::Error;

/// Result alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Configuration-related errors
#[derive(Error, Debug)]
pub enum ConfigError {
    /// A configuration source could not be parsed or extracted
    #[error("Failed to parse configuration: {source}")]
    Parse {
        #[source]
        source: Box<figment::Error>,
    },

    /// Configuration parsed but holds an unusable value
    #[error("Invalid configuration value for key '{key}': {message}")]
    Validation { key: String, message: String },
}

impl ConfigError {
    /// Create a validation error for the given dotted key
    pub fn validation(key: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation {
            key: key.into(),
            message: message.into(),
        }
    }
}

impl From<figment::Error> for ConfigError {
    fn from(error: figment::Error) -> Self {
        ConfigError::Parse {
            source: Box::new(error),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error_display() {
        let err = ConfigError::validation("merge.max_replacements", "must be greater than zero");
        assert_eq!(
            err.to_string(),
            "Invalid configuration value for key 'merge.max_replacements': must be greater than zero"
        );
    }

    #[test]
    fn test_figment_error_converts_to_parse() {
        let err: ConfigError = figment::Error::from("bad input".to_string()).into();
        assert!(matches!(err, ConfigError::Parse { .. }));
        assert!(err.to_string().contains("bad input"));
    }
}
