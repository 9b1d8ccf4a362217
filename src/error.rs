use colored::Colorize;
use std::fmt;

/// Errors that can occur during configuration loading
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// An environment variable is set but cannot be parsed into the field's type
    TypeConversion {
        key: String,
        value: String,
        expected: String,
        example: Option<String>,
    },
    /// A parsed value breaks a field rule
    Validation {
        key: String,
        value: String,
        description: String,
    },
    /// A configured path does not exist on disk
    MissingFile { key: String, path: String },
    /// The override file exists but could not be read or parsed
    OverrideFile { path: String, reason: String },
}

impl ConfigError {
    /// The environment variable this error is about, if any
    pub fn key(&self) -> Option<&str> {
        match self {
            ConfigError::TypeConversion { key, .. }
            | ConfigError::Validation { key, .. }
            | ConfigError::MissingFile { key, .. } => Some(key.as_str()),
            ConfigError::OverrideFile { .. } => None,
        }
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::TypeConversion {
                key,
                value,
                expected,
                example,
            } => {
                writeln!(
                    f,
                    "{}: Invalid value {}",
                    key.magenta().bold(),
                    format!("'{}'", value).red(),
                )?;
                writeln!(f, "\tExpected: {}", expected)?;
                if let Some(ex) = example {
                    writeln!(f, "\tExample: {}={}", key.magenta().bold(), ex.cyan())?;
                }
                Ok(())
            }
            ConfigError::Validation {
                key,
                value,
                description,
            } => {
                writeln!(f, "Invalid {}: {}", key.magenta().bold(), value.red())?;
                writeln!(f, "\tDescription: {}", description)
            }
            ConfigError::MissingFile { key, path } => {
                writeln!(
                    f,
                    "{}: File not found at {}",
                    key.magenta().bold(),
                    format!("'{}'", path).red(),
                )
            }
            ConfigError::OverrideFile { path, reason } => {
                writeln!(
                    f,
                    "Could not load override file {}: {}",
                    path.magenta().bold(),
                    reason
                )
            }
        }
    }
}

impl std::error::Error for ConfigError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_type_conversion_with_example() {
        colored::control::set_override(false);

        let error = ConfigError::TypeConversion {
            key: "CHECK_INTERVAL_SECONDS".to_string(),
            value: "abc".to_string(),
            expected: "u64".to_string(),
            example: Some("60".to_string()),
        };

        let output = error.to_string();
        assert!(output.contains("CHECK_INTERVAL_SECONDS: Invalid value 'abc'"));
        assert!(output.contains("Expected: u64"));
        assert!(output.contains("Example: CHECK_INTERVAL_SECONDS=60"));
    }

    #[test]
    fn test_type_conversion_without_example() {
        colored::control::set_override(false);

        let error = ConfigError::TypeConversion {
            key: "RISK_PERCENTAGE".to_string(),
            value: "lots".to_string(),
            expected: "f64".to_string(),
            example: None,
        };

        let output = error.to_string();
        assert!(output.contains("RISK_PERCENTAGE"));
        assert!(output.contains("Invalid value 'lots'"));
        assert!(!output.contains("Example:"));
    }

    #[test]
    fn test_validation_names_key_and_value() {
        colored::control::set_override(false);

        let error = ConfigError::Validation {
            key: "OLLAMA_BASE_URL".to_string(),
            value: "ftp://x".to_string(),
            description: "Must start with http:// or https://".to_string(),
        };

        let output = error.to_string();
        assert!(output.starts_with("Invalid OLLAMA_BASE_URL: ftp://x"));
        assert!(output.contains("Description: Must start with http:// or https://"));
    }

    #[test]
    fn test_missing_file() {
        colored::control::set_override(false);

        let error = ConfigError::MissingFile {
            key: "FIREBASE_CREDENTIALS_PATH".to_string(),
            path: "./firebase-credentials.json".to_string(),
        };

        let output = error.to_string();
        assert!(output.contains("File not found at './firebase-credentials.json'"));
        assert_eq!(error.key(), Some("FIREBASE_CREDENTIALS_PATH"));
    }

    #[test]
    fn test_override_file_has_no_key() {
        let error = ConfigError::OverrideFile {
            path: ".env".to_string(),
            reason: "Error parsing line".to_string(),
        };

        assert_eq!(error.key(), None);
    }

    #[test]
    fn test_clone() {
        let error1 = ConfigError::MissingFile {
            key: "TEST".to_string(),
            path: "missing.json".to_string(),
        };

        let error2 = error1.clone();

        assert_eq!(error1, error2);
        assert_eq!(error1.to_string(), error2.to_string());
    }

    #[test]
    fn test_debug_format() {
        let error = ConfigError::Validation {
            key: "ENV".to_string(),
            value: "test".to_string(),
            description: "Invalid environment".to_string(),
        };

        let debug_output = format!("{:?}", error);
        assert!(debug_output.contains("Validation"));
        assert!(debug_output.contains("ENV"));
    }
}
