use crate::{error::ConfigError, source};
use colored::Colorize;
use std::{fmt::Display, fs, path::Path, str::FromStr};

/// Metadata about a configuration field for documentation generation
#[derive(Debug, Clone)]
pub struct FieldMetadata {
    /// Environment variable key
    pub key: String,
    /// Human-readable description
    pub description: String,
    /// Default or example value as a string
    pub default_str: String,
}

/// Helper to format multiple configuration errors into a panic message
pub fn format_config_errors(errors: &[ConfigError]) -> String {
    let error_summary = errors
        .iter()
        .map(|e| format!("  - {}", e))
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        "Configuration failed with {} error(s):\n{}",
        errors.len().to_string().yellow().bold(),
        error_summary
    )
}

/// Loads configuration fields while collecting every error instead of
/// stopping at the first one
///
/// # Example
/// ```rust
/// use atin_config::ConfigBuilder;
///
/// let mut builder = ConfigBuilder::new();
/// let interval = builder.or_default::<u64>("ATIN_DOC_INTERVAL", "Polling cadence", 60);
///
/// assert_eq!(interval, 60);
/// assert!(builder.validate().is_ok());
/// ```
pub struct ConfigBuilder {
    errors: Vec<ConfigError>,
    fields: Vec<FieldMetadata>,
}

impl ConfigBuilder {
    pub fn new() -> Self {
        Self {
            errors: Vec::new(),
            fields: Vec::new(),
        }
    }

    /// Load a field, falling back to `default` if it is missing
    ///
    /// If the variable is set but cannot be parsed, the error is collected and
    /// the default is returned so loading can continue.
    pub fn or_default<T: FromStr + Display>(
        &mut self,
        key: &'static str,
        description: &'static str,
        default: T,
    ) -> T {
        let default_str = default.to_string();
        self.describe(key, description, default_str.as_str());

        match source::parse_var(key, Some(default_str.as_str())) {
            Ok(Some(value)) => value,
            Ok(None) => default,
            Err(e) => {
                self.errors.push(e);
                default
            }
        }
    }

    /// Load an optional field that may be None
    ///
    /// Collects an error if the environment variable is set but cannot be parsed.
    pub fn optional<T: FromStr>(
        &mut self,
        key: &'static str,
        description: &'static str,
        example: Option<&'static str>,
    ) -> Option<T> {
        self.describe(key, description, example.unwrap_or(""));

        match source::parse_var(key, example) {
            Ok(value) => value,
            Err(e) => {
                self.errors.push(e);
                None
            }
        }
    }

    /// Run a field rule against an already loaded value
    ///
    /// The value is returned either way; a failed rule is collected as a
    /// validation error.
    pub fn validated<T: Display>(
        &mut self,
        key: &'static str,
        value: T,
        check: impl FnOnce(&T) -> Result<(), String>,
    ) -> T {
        if let Err(description) = check(&value) {
            self.errors.push(ConfigError::Validation {
                key: key.to_string(),
                value: value.to_string(),
                description,
            });
        }
        value
    }

    /// Register a field for documentation without reading it
    pub fn describe(&mut self, key: &str, description: &str, default_str: &str) {
        self.fields.push(FieldMetadata {
            key: key.to_string(),
            description: description.to_string(),
            default_str: default_str.to_string(),
        });
    }

    pub fn fields(&self) -> &[FieldMetadata] {
        &self.fields
    }

    /// Validate that all configuration fields loaded successfully
    ///
    /// Unlike `finish()`, this doesn't consume the builder, allowing you to call
    /// `write_docs()` afterward.
    pub fn validate(&self) -> Result<(), Vec<ConfigError>> {
        if self.errors.is_empty() {
            Ok(())
        } else {
            Err(self.errors.clone())
        }
    }

    /// Finish building and return any errors that were collected
    pub fn finish(self) -> Result<(), Vec<ConfigError>> {
        if self.errors.is_empty() {
            Ok(())
        } else {
            Err(self.errors)
        }
    }

    /// Render a markdown table of every registered field
    pub fn render_docs(&self) -> String {
        let mut md = String::new();

        md.push_str("## Environment Variables Summary\n\n");
        md.push_str("| Variable | Description | Default/Example |\n");
        md.push_str("|----------|-------------|-----------------|\n");
        for field in &self.fields {
            let default_display = if field.default_str.is_empty() {
                "-"
            } else {
                field.default_str.as_str()
            };
            md.push_str(&format!(
                "| {} | {} | {} |\n",
                field.key, field.description, default_display
            ));
        }

        md
    }

    /// Write configuration documentation to a markdown file
    ///
    /// # Example
    /// ```no_run
    /// use atin_config::{Load, MasterConfig};
    ///
    /// MasterConfig::builder_for_docs().write_docs("CONFIG.md").unwrap();
    /// ```
    pub fn write_docs(&self, path: impl AsRef<Path>) -> std::io::Result<()> {
        fs::write(path, self.render_docs())
    }
}

impl Default for ConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}
