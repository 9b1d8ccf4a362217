//! Process-wide access to the [`MasterConfig`].
//!
//! Prefer building a `MasterConfig` at start-up and passing it down. This
//! accessor exists for code that cannot be reached that way.

use crate::{error::ConfigError, master::MasterConfig, source, Load};
use std::sync::{Mutex, OnceLock, PoisonError};

static INSTANCE: OnceLock<MasterConfig> = OnceLock::new();
static INIT_LOCK: Mutex<()> = Mutex::new(());

/// Returns the process configuration, building it on first use
///
/// The first successful call applies the `.env` override file, reads the
/// environment and caches the result; later calls return the same instance
/// without touching the environment again. A failed build caches nothing, so
/// the next call tries again.
pub fn get_instance() -> Result<&'static MasterConfig, Vec<ConfigError>> {
    if let Some(config) = INSTANCE.get() {
        return Ok(config);
    }

    // Serialize the first build so racing callers never construct two configs
    let _guard = INIT_LOCK.lock().unwrap_or_else(PoisonError::into_inner);
    if let Some(config) = INSTANCE.get() {
        return Ok(config);
    }

    source::bootstrap();
    let config = MasterConfig::from_env()?;
    tracing::info!(
        analysis_only = config.is_analysis_only(),
        "Process configuration initialized"
    );
    Ok(INSTANCE.get_or_init(|| config))
}

/// Installs a configuration built elsewhere as the process instance
///
/// Returns the config back if an instance already exists.
pub fn install(config: MasterConfig) -> Result<&'static MasterConfig, MasterConfig> {
    let _guard = INIT_LOCK.lock().unwrap_or_else(PoisonError::into_inner);
    if INSTANCE.get().is_some() {
        return Err(config);
    }
    Ok(INSTANCE.get_or_init(|| config))
}

pub fn is_initialized() -> bool {
    INSTANCE.get().is_some()
}
