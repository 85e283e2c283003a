//! Initialize-once holder for the site configuration.

use std::path::PathBuf;
use std::sync::OnceLock;

use crate::{CliSettings, ConfigError, Environment, SiteConfig};

/// Site handle owning the ambient inputs and the resolved configuration.
///
/// The configuration is resolved on the first call to
/// [`initialize`](Self::initialize) (or any accessor that needs it) and then
/// kept for the lifetime of the handle. Pass the handle by reference to
/// everything that needs configuration.
#[derive(Debug)]
pub struct Site {
    env: Environment,
    overlay_path: Option<PathBuf>,
    cli_settings: CliSettings,
    config: OnceLock<SiteConfig>,
}

impl Site {
    /// Create an uninitialized site for the given environment.
    pub fn new(env: Environment) -> Self {
        Self {
            env,
            overlay_path: None,
            cli_settings: CliSettings::default(),
            config: OnceLock::new(),
        }
    }

    /// Use an explicit overlay file instead of `config_dir/site.toml`.
    #[must_use]
    pub fn with_overlay_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.overlay_path = Some(path.into());
        self
    }

    /// Apply CLI settings after the overlay.
    #[must_use]
    pub fn with_cli_settings(mut self, settings: CliSettings) -> Self {
        self.cli_settings = settings;
        self
    }

    /// Resolve the configuration, or return the one already resolved.
    ///
    /// A failed attempt stores nothing, so a later call tries again.
    ///
    /// # Errors
    ///
    /// Returns any error from [`SiteConfig::load`].
    pub fn initialize(&self) -> Result<&SiteConfig, ConfigError> {
        if let Some(config) = self.config.get() {
            return Ok(config);
        }

        let config = SiteConfig::load(
            &self.env,
            self.overlay_path.as_deref(),
            Some(&self.cli_settings),
        )?;
        tracing::debug!(base_url = %config.base_url, "Site configuration initialized");

        // A concurrent initializer may have won; its value is kept.
        Ok(self.config.get_or_init(|| config))
    }

    /// Whether [`initialize`](Self::initialize) has completed.
    pub fn is_initialized(&self) -> bool {
        self.config.get().is_some()
    }

    /// The resolved configuration, if initialized.
    pub fn config(&self) -> Option<&SiteConfig> {
        self.config.get()
    }

    /// Build an absolute URL, initializing first if needed.
    ///
    /// # Errors
    ///
    /// Returns any error from [`initialize`](Self::initialize).
    pub fn url(&self, relative: &str) -> Result<String, ConfigError> {
        Ok(self.initialize()?.url(relative))
    }
}
