//! Configuration values and their provenance.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A single configuration value.
///
/// Built-in keys map onto these two shapes; overlay `[extra]` entries may
/// use either.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(untagged)]
pub enum ConfigValue {
    /// Boolean flag (e.g. `debug`).
    Bool(bool),
    /// String value (paths are rendered with a trailing separator).
    Str(String),
}

impl ConfigValue {
    /// Borrow the string payload, if this is a string value.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Str(s) => Some(s),
            Self::Bool(_) => None,
        }
    }

    /// Get the boolean payload, if this is a boolean value.
    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            Self::Str(_) => None,
        }
    }
}

impl fmt::Display for ConfigValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool(b) => write!(f, "{b}"),
            Self::Str(s) => f.write_str(s),
        }
    }
}

impl From<bool> for ConfigValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<String> for ConfigValue {
    fn from(value: String) -> Self {
        Self::Str(value)
    }
}

impl From<&str> for ConfigValue {
    fn from(value: &str) -> Self {
        Self::Str(value.to_owned())
    }
}

/// Where a configuration value came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Origin {
    /// Built-in constant default.
    Default,
    /// Computed from the hosting environment.
    Detected,
    /// The ambient input was missing or could not be resolved; a degraded
    /// value is in use.
    Fallback,
    /// Set by the overlay file.
    Overlay,
    /// Set by CLI settings.
    Override,
}

impl Origin {
    /// Short lowercase label, as used in CLI output.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Default => "default",
            Self::Detected => "detected",
            Self::Fallback => "fallback",
            Self::Overlay => "overlay",
            Self::Override => "override",
        }
    }
}

impl fmt::Display for Origin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
