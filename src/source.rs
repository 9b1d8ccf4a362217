//! Environment lookup with defaults, numeric coercion and the optional
//! `.env` override file.
//!
//! Override files only fill gaps: a variable already present in the process
//! environment is never replaced by a file value.

use crate::error::ConfigError;
use std::{
    any::type_name,
    env,
    path::{Path, PathBuf},
    str::FromStr,
    sync::Once,
};

/// Reads a variable, treating unset as `None`
pub fn lookup(key: &str) -> Option<String> {
    match env::var(key) {
        Ok(value) => Some(value),
        Err(env::VarError::NotPresent) => None,
        Err(env::VarError::NotUnicode(raw)) => Some(raw.to_string_lossy().into_owned()),
    }
}

/// Parses an environment variable into a specific type
///
/// Returns `Ok(None)` when the variable is unset and an error when it is set
/// but cannot be parsed.
pub fn parse_var<T: FromStr>(key: &str, example: Option<&str>) -> Result<Option<T>, ConfigError> {
    match lookup(key) {
        Some(raw) => match raw.parse() {
            Ok(parsed) => Ok(Some(parsed)),
            Err(_) => Err(ConfigError::TypeConversion {
                key: key.to_string(),
                value: raw,
                expected: type_name::<T>().to_string(),
                example: example.map(|s| s.to_string()),
            }),
        },
        None => Ok(None),
    }
}

/// Parses an environment variable, falling back to `default` only when unset
pub fn get_parsed<T: FromStr + ToString>(key: &str, default: T) -> Result<T, ConfigError> {
    let example = default.to_string();
    Ok(parse_var(key, Some(example.as_str()))?.unwrap_or(default))
}

/// Reads a string variable, using `default` when unset
pub fn get_string(key: &str, default: &str) -> String {
    lookup(key).unwrap_or_else(|| default.to_string())
}

/// Reads an integer variable, using `default` when unset
pub fn get_int(key: &str, default: i64) -> Result<i64, ConfigError> {
    get_parsed(key, default)
}

/// Reads a floating point variable, using `default` when unset
pub fn get_float(key: &str, default: f64) -> Result<f64, ConfigError> {
    get_parsed(key, default)
}

/// Reads a filesystem path variable, using `default` when unset
///
/// The raw OS value is kept so paths that are not valid UTF-8 still resolve.
pub fn get_path(key: &str, default: &str) -> PathBuf {
    env::var_os(key)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(default))
}

/// Loads `KEY=value` pairs from `path` without overwriting variables that are
/// already set
///
/// Returns `Ok(false)` if the file does not exist. On a malformed line the
/// lines before it have already been applied when the error is returned.
pub fn load_override_from(path: impl AsRef<Path>) -> Result<bool, ConfigError> {
    let path = path.as_ref();
    match dotenvy::from_path(path) {
        Ok(()) => {
            tracing::debug!(path = %path.display(), "Loaded environment override file");
            Ok(true)
        }
        Err(err) if err.not_found() => Ok(false),
        Err(err) => Err(ConfigError::OverrideFile {
            path: path.display().to_string(),
            reason: err.to_string(),
        }),
    }
}

/// Loads the nearest `.env` file, searching from the working directory upward
pub fn load_override_file() -> Result<Option<PathBuf>, ConfigError> {
    match dotenvy::dotenv() {
        Ok(path) => {
            tracing::debug!(path = %path.display(), "Loaded environment override file");
            Ok(Some(path))
        }
        Err(err) if err.not_found() => Ok(None),
        Err(err) => Err(ConfigError::OverrideFile {
            path: ".env".to_string(),
            reason: err.to_string(),
        }),
    }
}

static BOOTSTRAP: Once = Once::new();

/// Applies the `.env` override file once per process
///
/// Call this at start-up before reading any configuration. Later calls do
/// nothing. An unreadable override file is logged at warn level; lines before
/// the error are applied, the rest of the file is skipped.
pub fn bootstrap() {
    BOOTSTRAP.call_once(|| {
        if let Err(err) = load_override_file() {
            tracing::warn!(error = %err, "Ignoring unreadable override file");
        }
    });
}
