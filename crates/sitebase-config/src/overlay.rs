//! Declarative overlay file (`site.toml`).

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::detect::normalize_lexically;
use crate::expand::expand_env;
use crate::{ConfigError, ConfigValue};

/// Overlay as parsed from TOML. Every field is optional.
#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub(crate) struct Overlay {
    pub(crate) debug: Option<bool>,
    pub(crate) config_dir: Option<String>,
    pub(crate) base_dir: Option<String>,
    pub(crate) domain: Option<String>,
    pub(crate) local_part: Option<String>,
    pub(crate) base_url: Option<String>,
    /// Additional keys not known to the resolver.
    pub(crate) extra: BTreeMap<String, ConfigValue>,
}

impl Overlay {
    /// Read, parse and expand an overlay file.
    pub(crate) fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut overlay: Self = toml::from_str(&content)?;
        overlay.expand_env_vars()?;
        Ok(overlay)
    }

    /// Expand environment variable references in every string value.
    fn expand_env_vars(&mut self) -> Result<(), ConfigError> {
        let fields = [
            (&mut self.config_dir, "config_dir"),
            (&mut self.base_dir, "base_dir"),
            (&mut self.domain, "domain"),
            (&mut self.local_part, "local_part"),
            (&mut self.base_url, "base_url"),
        ];
        for (value, field) in fields {
            if let Some(v) = value {
                *v = expand_env(v, field)?;
            }
        }

        for (key, value) in &mut self.extra {
            if let ConfigValue::Str(s) = value {
                *s = expand_env(s, &format!("extra.{key}"))?;
            }
        }

        Ok(())
    }
}

/// Resolve an overlay path value against the directory holding the overlay.
///
/// The path is normalized lexically; it does not have to exist.
pub(crate) fn resolve_overlay_path(value: &str, overlay_dir: &Path) -> PathBuf {
    normalize_lexically(&overlay_dir.join(value))
}
