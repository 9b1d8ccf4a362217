//! Environment-driven configuration for the ATIN trading assistant.
//!
//! Records are declared with [`define_config!`] and loaded through [`Load`].
//! Applications call [`source::bootstrap`] once at start-up, build a
//! [`MasterConfig`] and pass it around, or use [`instance::get_instance`].

// Lets `define_config!` output refer to `::atin_config` from inside this crate
extern crate self as atin_config;

pub mod builder;
pub mod error;
pub mod field;
pub mod instance;
pub mod master;
pub mod records;
pub mod source;
pub mod validate;

// Re-export main types
pub use builder::{format_config_errors, ConfigBuilder};
pub use error::ConfigError;
pub use field::ConfigField;
pub use instance::get_instance;
pub use master::MasterConfig;
pub use records::{AlertConfig, LlmConfig, TradingConfig};

// Re-export macro
pub use atin_config_macros::define_config;

/// Trait for loading configuration from environment variables
pub trait Load: Sized {
    /// Read every field, collecting errors in `builder`
    ///
    /// Fields that fail to load fall back to their defaults so that all
    /// problems are reported together.
    fn load_fields(builder: &mut ConfigBuilder) -> Self;

    /// Load configuration from environment, returning every error found
    fn from_env() -> Result<Self, Vec<ConfigError>> {
        let mut builder = ConfigBuilder::new();
        let config = Self::load_fields(&mut builder);
        builder.finish()?;
        Ok(config)
    }

    /// Load configuration from environment, panicking on validation errors
    fn load() -> Self {
        match Self::from_env() {
            Ok(config) => config,
            Err(errors) => panic!("{}", format_config_errors(&errors)),
        }
    }

    /// Create a builder for documentation generation
    fn builder_for_docs() -> ConfigBuilder {
        let mut builder = ConfigBuilder::new();
        let _ = Self::load_fields(&mut builder);
        builder
    }
}
