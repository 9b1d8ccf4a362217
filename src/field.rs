use std::ops::Deref;

/// A configuration field with metadata and value
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ConfigField<T> {
    /// Environment variable key
    pub key: &'static str,
    /// Human-readable description of what this config does
    pub description: &'static str,
    /// Value used when the variable is unset (`None` for optional fields)
    pub default: T,
    /// The actual configuration value
    pub value: T,
}

impl<T> ConfigField<T> {
    pub fn new(key: &'static str, description: &'static str, default: T, value: T) -> Self {
        Self {
            key,
            description,
            default,
            value,
        }
    }

    pub fn into_inner(self) -> T {
        self.value
    }
}

impl<T: PartialEq> ConfigField<T> {
    /// Whether the loaded value is the same as the default
    pub fn is_default(&self) -> bool {
        self.value == self.default
    }
}

// Allow using ConfigField<T> as &T without writing .value
impl<T> Deref for ConfigField<T> {
    type Target = T;

    fn deref(&self) -> &Self::Target {
        &self.value
    }
}

impl<T> AsRef<T> for ConfigField<T> {
    fn as_ref(&self) -> &T {
        &self.value
    }
}
