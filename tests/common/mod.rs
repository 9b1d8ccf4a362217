#![allow(dead_code)]

use std::sync::{Arc, Mutex};
use tracing::field::{Field, Visit};
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::layer::{Context, Layer};

/// Every variable the master configuration reads
pub const CONFIG_VARS: &[&str] = &[
    "TRADING_SYMBOL",
    "CHECK_INTERVAL_SECONDS",
    "RISK_PERCENTAGE",
    "OLLAMA_BASE_URL",
    "OLLAMA_MODEL",
    "OLLAMA_TIMEOUT",
    "OLLAMA_MAX_RETRIES",
    "TELEGRAM_BOT_TOKEN",
    "TELEGRAM_CHAT_ID",
    "EXCHANGE_API_KEY",
    "EXCHANGE_SECRET_KEY",
    "FIREBASE_CREDENTIALS_PATH",
];

/// Runs `f` with only `vars` set among the config variables; everything is
/// restored afterwards
pub fn with_env<R>(vars: &[(&str, &str)], f: impl FnOnce() -> R) -> R {
    let mut kvs: Vec<(&str, Option<&str>)> = CONFIG_VARS.iter().map(|key| (*key, None)).collect();
    for &(key, value) in vars {
        match kvs.iter_mut().find(|entry| entry.0 == key) {
            Some(entry) => entry.1 = Some(value),
            None => kvs.push((key, Some(value))),
        }
    }
    temp_env::with_vars(kvs, f)
}

/// Collects the message of every warning-level event
#[derive(Clone, Default)]
pub struct WarningCapture {
    messages: Arc<Mutex<Vec<String>>>,
}

impl WarningCapture {
    pub fn messages(&self) -> Vec<String> {
        self.messages.lock().unwrap().clone()
    }
}

struct MessageVisitor(String);

impl Visit for MessageVisitor {
    fn record_debug(&mut self, field: &Field, value: &dyn std::fmt::Debug) {
        if field.name() == "message" {
            self.0 = format!("{:?}", value);
        }
    }
}

impl<S: Subscriber> Layer<S> for WarningCapture {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        if *event.metadata().level() == Level::WARN {
            let mut visitor = MessageVisitor(String::new());
            event.record(&mut visitor);
            self.messages.lock().unwrap().push(visitor.0);
        }
    }
}

/// Runs `f` with a subscriber that records warnings
pub fn capture_warnings<R>(f: impl FnOnce() -> R) -> (R, Vec<String>) {
    use tracing_subscriber::layer::SubscriberExt;

    let capture = WarningCapture::default();
    let subscriber = tracing_subscriber::registry().with(capture.clone());
    let result = tracing::subscriber::with_default(subscriber, f);
    (result, capture.messages())
}
