//! Error types and handling for `Skycast`

use thiserror::Error;

/// Main error type for the `Skycast` crate
#[derive(Error, Debug)]
pub enum SkycastError {
    /// Configuration-related errors
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// Catalog data that is missing or internally inconsistent
    #[error("Catalog error: {message}")]
    Catalog { message: String },

    /// A condition name outside the canonical set
    #[error("Unknown weather condition '{value}'. Expected one of: sunny, cloudy, rainy, snowy, foggy, sunset")]
    UnknownCondition { value: String },

    /// Input validation errors
    #[error("Invalid input: {message}")]
    Validation { message: String },

    /// I/O operation errors
    #[error("I/O error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },

    /// JSON decoding errors
    #[error("Parse error: {source}")]
    Parse {
        #[from]
        source: serde_json::Error,
    },
}

impl SkycastError {
    /// Create a new configuration error
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a new catalog error
    pub fn catalog<S: Into<String>>(message: S) -> Self {
        Self::Catalog {
            message: message.into(),
        }
    }

    /// Create a new unknown-condition error
    pub fn unknown_condition<S: Into<String>>(value: S) -> Self {
        Self::UnknownCondition {
            value: value.into(),
        }
    }

    /// Create a new validation error
    pub fn validation<S: Into<String>>(message: S) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Get a user-friendly error message
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            SkycastError::Config { .. } => {
                "Configuration error. Please check your config file and SKYCAST_ variables."
                    .to_string()
            }
            SkycastError::Catalog { message } => {
                format!("The place catalog could not be loaded: {message}")
            }
            SkycastError::UnknownCondition { value } => {
                format!("'{value}' is not a supported weather condition.")
            }
            SkycastError::Validation { message } => {
                format!("Invalid input: {message}")
            }
            SkycastError::Io { .. } => {
                "File operation failed. Please check file permissions.".to_string()
            }
            SkycastError::Parse { .. } => {
                "Input is not valid JSON for this command.".to_string()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_creation() {
        let config_err = SkycastError::config("bad level");
        assert!(matches!(config_err, SkycastError::Config { .. }));

        let catalog_err = SkycastError::catalog("dangling city");
        assert!(matches!(catalog_err, SkycastError::Catalog { .. }));

        let validation_err = SkycastError::validation("invalid coordinates");
        assert!(matches!(validation_err, SkycastError::Validation { .. }));
    }

    #[test]
    fn test_unknown_condition_names_value() {
        let err = SkycastError::unknown_condition("tornado");
        assert!(err.to_string().contains("'tornado'"));
        assert!(err.to_string().contains("sunset"));
        assert!(err.user_message().contains("tornado"));
    }

    #[test]
    fn test_user_messages() {
        let config_err = SkycastError::config("test");
        assert!(config_err.user_message().contains("Configuration error"));

        let catalog_err = SkycastError::catalog("missing seoul");
        assert!(catalog_err.user_message().contains("missing seoul"));

        let validation_err = SkycastError::validation("test input");
        assert!(validation_err.user_message().contains("test input"));
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: SkycastError = io_err.into();
        assert!(matches!(err, SkycastError::Io { .. }));
    }

    #[test]
    fn test_json_error_conversion() {
        let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err: SkycastError = json_err.into();
        assert!(matches!(err, SkycastError::Parse { .. }));
    }
}
