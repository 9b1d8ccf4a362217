//! The independent configuration records: trading cadence, LLM endpoint and
//! alert delivery.

use crate::define_config;
use crate::validate::{http_url, positive};

define_config! {
    /// Which market to watch and how aggressively to size positions.
    #[derive(Debug, Clone, PartialEq)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize))]
    pub struct TradingConfig {
        #[field(env = "TRADING_SYMBOL", doc = "Exchange pair identifier", default = String::from("BTC/USDT"))]
        pub symbol: String,

        #[field(env = "CHECK_INTERVAL_SECONDS", doc = "Seconds between market checks", default = 60u64, validate = positive)]
        pub interval_seconds: u64,

        #[field(env = "RISK_PERCENTAGE", doc = "Share of the balance risked per trade, in percent", default = 2.0f64)]
        pub risk_percentage: f64,
    }
}

define_config! {
    /// Connection settings for the Ollama server.
    #[derive(Debug, Clone, PartialEq)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize))]
    pub struct LlmConfig {
        #[field(env = "OLLAMA_BASE_URL", doc = "Ollama server URL (http:// or https://)", default = String::from("http://localhost:11434"), validate = http_url)]
        pub base_url: String,

        #[field(env = "OLLAMA_MODEL", doc = "Model name", default = String::from("llama2"))]
        pub model: String,

        /// Request timeout in seconds
        #[field(env = "OLLAMA_TIMEOUT", doc = "Request timeout in seconds", default = 30u64, validate = positive)]
        pub timeout: u64,

        #[field(env = "OLLAMA_MAX_RETRIES", doc = "Retries per failed request", default = 3u32)]
        pub max_retries: u32,
    }
}

define_config! {
    /// Telegram alert delivery. Both fields unset means alerts are disabled.
    #[derive(Debug, Clone, PartialEq)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize))]
    pub struct AlertConfig {
        #[field(env = "TELEGRAM_BOT_TOKEN", doc = "Telegram bot token", optional, example = "123456:ABC-DEF")]
        pub telegram_token: Option<String>,

        #[field(env = "TELEGRAM_CHAT_ID", doc = "Telegram chat receiving alerts", optional, example = "-1001234567890")]
        pub telegram_chat_id: Option<String>,
    }
}

impl AlertConfig {
    /// True when both the bot token and chat id are set to non-empty values
    pub fn is_enabled(&self) -> bool {
        let present = |value: &Option<String>| value.as_deref().is_some_and(|v| !v.is_empty());
        present(&self.telegram_token.value) && present(&self.telegram_chat_id.value)
    }
}
