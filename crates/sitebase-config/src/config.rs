//! Resolved site configuration.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::detect::{
    compose_base_url, detect_domain, detect_local_part, dir_string, resolve_dir,
};
use crate::overlay::{Overlay, resolve_overlay_path};
use crate::{CliSettings, ConfigError, ConfigValue, Environment, Origin};

/// Overlay filename looked up in the config directory.
pub const OVERLAY_FILENAME: &str = "site.toml";

/// Built-in configuration keys, in resolution order.
pub const KEYS: [&str; 6] = [
    "debug",
    "config_dir",
    "base_dir",
    "domain",
    "local_part",
    "base_url",
];

/// Fully resolved site configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct SiteConfig {
    /// Debug mode flag.
    pub debug: bool,
    /// Directory holding the overlay file.
    pub config_dir: PathBuf,
    /// Project root directory.
    pub base_dir: PathBuf,
    /// Host name used in the base URL.
    pub domain: String,
    /// URL path prefix at which the site is mounted.
    pub local_part: String,
    /// Root URL used to build all links.
    pub base_url: String,
    /// Extra keys added by the overlay.
    pub extra: BTreeMap<String, ConfigValue>,
    /// Overlay file that was applied, if any.
    pub overlay_path: Option<PathBuf>,
    origins: BTreeMap<String, Origin>,
    /// Set once `base_url` was given explicitly, so it is no longer derived.
    base_url_pinned: bool,
}

impl SiteConfig {
    /// Resolve configuration from the environment, overlay and CLI settings.
    ///
    /// If `overlay_path` is given it must exist. Otherwise `site.toml` in the
    /// config directory is applied when present and skipped when absent.
    ///
    /// # Errors
    ///
    /// Returns an error if an explicit overlay is missing, the overlay cannot
    /// be read or parsed, the base directory lies outside the document root,
    /// or the final configuration fails validation.
    pub fn load(
        env: &Environment,
        overlay_path: Option<&Path>,
        cli_settings: Option<&CliSettings>,
    ) -> Result<Self, ConfigError> {
        let mut config = Self::detect(env)?;

        let overlay_path = if let Some(path) = overlay_path {
            if !path.exists() {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            Some(path.to_path_buf())
        } else {
            let candidate = config.config_dir.join(OVERLAY_FILENAME);
            if candidate.is_file() {
                Some(candidate)
            } else {
                tracing::debug!(path = %candidate.display(), "No overlay file, using defaults");
                None
            }
        };

        if let Some(path) = overlay_path {
            let overlay = Overlay::load(&path)?;
            let overlay_dir = path.parent().unwrap_or(Path::new("."));
            config.apply_overlay(overlay, overlay_dir);
            tracing::info!(path = %path.display(), "Applied overlay file");
            config.overlay_path = Some(path);
        }

        if let Some(settings) = cli_settings {
            config.apply_cli_settings(settings);
        }

        config.validate()?;
        Ok(config)
    }

    /// Compute defaults and detected values from the environment alone.
    pub(crate) fn detect(env: &Environment) -> Result<Self, ConfigError> {
        let (config_dir, config_dir_origin) = resolve_dir(&env.install_dir.join(".."));
        let (base_dir, base_dir_origin) = resolve_dir(&env.install_dir.join("..").join(".."));
        let (domain, domain_origin) = detect_domain(env.server_name.as_deref());
        let (local_part, local_part_origin) =
            detect_local_part(&base_dir, env.document_root.as_deref())?;
        let base_url = compose_base_url(&domain, &local_part);

        let base_url_origin =
            if domain_origin == Origin::Fallback || local_part_origin == Origin::Fallback {
                Origin::Fallback
            } else {
                Origin::Detected
            };

        let origins = [
            ("debug", Origin::Default),
            ("config_dir", config_dir_origin),
            ("base_dir", base_dir_origin),
            ("domain", domain_origin),
            ("local_part", local_part_origin),
            ("base_url", base_url_origin),
        ]
        .into_iter()
        .map(|(k, o)| (k.to_owned(), o))
        .collect();

        Ok(Self {
            debug: false,
            config_dir,
            base_dir,
            domain,
            local_part,
            base_url,
            extra: BTreeMap::new(),
            overlay_path: None,
            origins,
            base_url_pinned: false,
        })
    }

    /// Apply overlay values field by field.
    ///
    /// Relative directory values are resolved against `overlay_dir`. If the
    /// overlay changes `domain` or `local_part` without setting `base_url`,
    /// the base URL is recomputed.
    fn apply_overlay(&mut self, overlay: Overlay, overlay_dir: &Path) {
        if let Some(debug) = overlay.debug {
            self.debug = debug;
            self.set_origin("debug", Origin::Overlay);
        }
        if let Some(dir) = overlay.config_dir {
            self.config_dir = resolve_overlay_path(&dir, overlay_dir);
            self.set_origin("config_dir", Origin::Overlay);
        }
        if let Some(dir) = overlay.base_dir {
            self.base_dir = resolve_overlay_path(&dir, overlay_dir);
            self.set_origin("base_dir", Origin::Overlay);
        }

        let mut url_inputs_changed = false;
        if let Some(domain) = overlay.domain {
            self.domain = domain;
            self.set_origin("domain", Origin::Overlay);
            url_inputs_changed = true;
        }
        if let Some(local_part) = overlay.local_part {
            self.local_part = local_part;
            self.set_origin("local_part", Origin::Overlay);
            url_inputs_changed = true;
        }

        if let Some(base_url) = overlay.base_url {
            self.base_url = base_url;
            self.base_url_pinned = true;
            self.set_origin("base_url", Origin::Overlay);
        } else if url_inputs_changed {
            self.refresh_base_url(Origin::Overlay);
        }

        for (key, value) in overlay.extra {
            self.origins.insert(key.clone(), Origin::Overlay);
            self.extra.insert(key, value);
        }
    }

    /// Apply CLI settings on top of the configuration.
    fn apply_cli_settings(&mut self, settings: &CliSettings) {
        if let Some(debug) = settings.debug {
            self.debug = debug;
            self.set_origin("debug", Origin::Override);
        }
        if let Some(domain) = &settings.domain {
            self.domain.clone_from(domain);
            self.set_origin("domain", Origin::Override);
        }
        if let Some(base_url) = &settings.base_url {
            self.base_url.clone_from(base_url);
            self.base_url_pinned = true;
            self.set_origin("base_url", Origin::Override);
        } else if settings.domain.is_some() {
            self.refresh_base_url(Origin::Override);
        }
    }

    /// Recompute `base_url` from `domain` and `local_part` unless it was set
    /// explicitly.
    fn refresh_base_url(&mut self, origin: Origin) {
        if self.base_url_pinned {
            return;
        }
        self.base_url = compose_base_url(&self.domain, &self.local_part);
        self.set_origin("base_url", origin);
    }

    fn set_origin(&mut self, key: &str, origin: Origin) {
        self.origins.insert(key.to_owned(), origin);
    }

    /// Validate the resolved configuration.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if any check fails.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.local_part.starts_with('/') {
            return Err(ConfigError::Validation(format!(
                "local_part must start with /, got {:?}",
                self.local_part
            )));
        }

        require_non_empty(&self.base_url, "base_url")?;
        require_http_url(&self.base_url, "base_url")?;

        if let Some(key) = self.extra.keys().find(|k| KEYS.contains(&k.as_str())) {
            return Err(ConfigError::Validation(format!(
                "extra.{key} shadows a built-in key, set it at the top level instead"
            )));
        }

        Ok(())
    }

    /// Build an absolute URL by appending `relative` to the base URL.
    ///
    /// This is plain concatenation: nothing is encoded or normalized.
    #[must_use]
    pub fn url(&self, relative: &str) -> String {
        format!("{}{relative}", self.base_url)
    }

    /// Look up a value by key.
    ///
    /// Directory keys are rendered with a trailing separator.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<ConfigValue> {
        let value = match key {
            "debug" => ConfigValue::Bool(self.debug),
            "config_dir" => ConfigValue::Str(dir_string(&self.config_dir)),
            "base_dir" => ConfigValue::Str(dir_string(&self.base_dir)),
            "domain" => ConfigValue::Str(self.domain.clone()),
            "local_part" => ConfigValue::Str(self.local_part.clone()),
            "base_url" => ConfigValue::Str(self.base_url.clone()),
            _ => return self.extra.get(key).cloned(),
        };
        Some(value)
    }

    /// Where the value for `key` came from.
    #[must_use]
    pub fn origin(&self, key: &str) -> Option<Origin> {
        self.origins.get(key).copied()
    }

    /// All keys: built-in keys first, then extra keys in sorted order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        KEYS.iter()
            .copied()
            .chain(self.extra.keys().map(String::as_str))
    }

    /// `(key, value, origin)` for every key, in [`keys`](Self::keys) order.
    #[must_use]
    pub fn entries(&self) -> Vec<(String, ConfigValue, Origin)> {
        self.keys()
            .filter_map(|key| {
                let value = self.get(key)?;
                let origin = self.origin(key).unwrap_or(Origin::Default);
                Some((key.to_owned(), value, origin))
            })
            .collect()
    }
}

/// Require a string field to be non-empty.
fn require_non_empty(value: &str, field: &str) -> Result<(), ConfigError> {
    if value.is_empty() {
        return Err(ConfigError::Validation(format!("{field} cannot be empty")));
    }
    Ok(())
}

/// Require a URL field to use http:// or https:// scheme.
fn require_http_url(url: &str, field: &str) -> Result<(), ConfigError> {
    if !url.starts_with("http://") && !url.starts_with("https://") {
        return Err(ConfigError::Validation(format!(
            "{field} must start with http:// or https://"
        )));
    }
    Ok(())
}
