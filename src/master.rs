use crate::{
    builder::ConfigBuilder,
    error::ConfigError,
    records::{AlertConfig, LlmConfig, TradingConfig},
    source, Load,
};
use std::{fmt, path::PathBuf};

pub const EXCHANGE_API_KEY: &str = "EXCHANGE_API_KEY";
pub const EXCHANGE_SECRET_KEY: &str = "EXCHANGE_SECRET_KEY";
pub const FIREBASE_CREDENTIALS_PATH: &str = "FIREBASE_CREDENTIALS_PATH";
pub const DEFAULT_FIREBASE_CREDENTIALS_PATH: &str = "./firebase-credentials.json";

/// Complete application configuration
///
/// Missing exchange credentials are not an error: the application then runs
/// in analysis-only mode and a warning is logged when the config is built.
#[derive(Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct MasterConfig {
    pub trading: TradingConfig,
    pub llm: LlmConfig,
    pub alerts: AlertConfig,
    #[cfg_attr(feature = "serde", serde(skip_serializing))]
    pub exchange_api_key: Option<String>,
    #[cfg_attr(feature = "serde", serde(skip_serializing))]
    pub exchange_secret: Option<String>,
}

impl MasterConfig {
    pub fn has_exchange_credentials(&self) -> bool {
        let present = |value: &Option<String>| value.as_deref().is_some_and(|v| !v.is_empty());
        present(&self.exchange_api_key) && present(&self.exchange_secret)
    }

    pub fn is_analysis_only(&self) -> bool {
        !self.has_exchange_credentials()
    }

    /// Path to the Firebase service account file
    ///
    /// Re-read from the environment and re-checked on disk on every call.
    pub fn firebase_credentials_path(&self) -> Result<PathBuf, ConfigError> {
        let path = source::get_path(FIREBASE_CREDENTIALS_PATH, DEFAULT_FIREBASE_CREDENTIALS_PATH);
        if path.exists() {
            Ok(path)
        } else {
            Err(ConfigError::MissingFile {
                key: FIREBASE_CREDENTIALS_PATH.to_string(),
                path: path.display().to_string(),
            })
        }
    }

    fn missing_credentials(&self) -> Vec<&'static str> {
        [
            (EXCHANGE_API_KEY, &self.exchange_api_key),
            (EXCHANGE_SECRET_KEY, &self.exchange_secret),
        ]
        .into_iter()
        .filter(|(_, value)| value.as_deref().map_or(true, str::is_empty))
        .map(|(key, _)| key)
        .collect()
    }
}

impl Load for MasterConfig {
    fn load_fields(builder: &mut ConfigBuilder) -> Self {
        let trading = TradingConfig::load_fields(builder);
        let llm = LlmConfig::load_fields(builder);
        let alerts = AlertConfig::load_fields(builder);
        let exchange_api_key = builder.optional(EXCHANGE_API_KEY, "Exchange API key", None);
        let exchange_secret = builder.optional(EXCHANGE_SECRET_KEY, "Exchange API secret", None);
        builder.describe(
            FIREBASE_CREDENTIALS_PATH,
            "Firebase service account file, must exist when read",
            DEFAULT_FIREBASE_CREDENTIALS_PATH,
        );

        Self {
            trading,
            llm,
            alerts,
            exchange_api_key,
            exchange_secret,
        }
    }

    fn from_env() -> Result<Self, Vec<ConfigError>> {
        let mut builder = ConfigBuilder::new();
        let config = Self::load_fields(&mut builder);
        builder.finish()?;

        let missing = config.missing_credentials();
        if !missing.is_empty() {
            tracing::warn!(
                missing = ?missing,
                "Exchange API credentials not found. Running in analysis-only mode."
            );
        }
        tracing::debug!(
            symbol = %config.trading.symbol.as_str(),
            model = %config.llm.model.as_str(),
            alerts = config.alerts.is_enabled(),
            "Configuration loaded"
        );

        Ok(config)
    }
}

impl fmt::Debug for MasterConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let redact = |value: &Option<String>| value.as_ref().map(|_| "<redacted>");
        f.debug_struct("MasterConfig")
            .field("trading", &self.trading)
            .field("llm", &self.llm)
            .field("alerts", &self.alerts)
            .field("exchange_api_key", &redact(&self.exchange_api_key))
            .field("exchange_secret", &redact(&self.exchange_secret))
            .finish()
    }
}
