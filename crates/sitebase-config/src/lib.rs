//! Site configuration resolver for sitebase.
//!
//! Works out where a website lives and how it is addressed:
//!
//! - `config_dir` and `base_dir`: one and two levels above the install
//!   directory, canonicalized
//! - `domain`: the request server name, with `localhost` mapped to `127.0.0.1`
//! - `local_part`: the URL path at which `base_dir` sits below the document root
//! - `base_url`: `http://` + domain + local part
//!
//! An optional `site.toml` overlay in the config directory may override any
//! of these and add keys of its own. CLI settings can be applied on top via
//! [`CliSettings`].
//!
//! ## Overlay Environment Variable Expansion
//!
//! String values in the overlay support environment variable expansion:
//!
//! - `${VAR}` - expands to the value of VAR, errors if unset
//! - `${VAR:-default}` - expands to VAR if set, otherwise uses default
//!
//! ## Degraded inputs
//!
//! Missing inputs never abort resolution. They show up as
//! [`Origin::Fallback`] on the affected keys instead:
//!
//! - directories that cannot be canonicalized keep their lexical path
//! - a missing server name gives an empty domain
//! - a missing document root mounts the site at `/`
//!
//! A base directory outside the document root is an error
//! ([`ConfigError::OutsideDocumentRoot`]).
//!
//! # Example
//!
//! ```no_run
//! # fn main() -> Result<(), sitebase_config::ConfigError> {
//! use sitebase_config::{Environment, Site};
//!
//! let site = Site::new(Environment::from_process()?);
//! let config = site.initialize()?;
//! println!("{}", config.url("css/site.css"));
//! # Ok(())
//! # }
//! ```

mod config;
mod detect;
mod environment;
mod expand;
mod overlay;
mod site;
mod value;

use std::path::PathBuf;

pub use config::{KEYS, OVERLAY_FILENAME, SiteConfig};
pub use environment::{DOCUMENT_ROOT_VAR, Environment, INSTALL_DIR_VAR, SERVER_NAME_VAR};
pub use site::Site;
pub use value::{ConfigValue, Origin};

/// CLI settings that override overlay values.
///
/// All fields are optional. Only non-None values override the loaded config.
#[derive(Debug, Clone, Default)]
pub struct CliSettings {
    /// Override debug flag.
    pub debug: Option<bool>,
    /// Override domain. `base_url` is recomputed unless set explicitly.
    pub domain: Option<String>,
    /// Override base URL.
    pub base_url: Option<String>,
}

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Explicit overlay file not found.
    #[error("Overlay file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
    /// Validation error.
    #[error("Configuration error: {0}")]
    Validation(String),
    /// Environment variable error during expansion.
    #[error("Environment variable error in {field}: {message}")]
    EnvVar {
        /// Overlay key (e.g., "`domain`").
        field: String,
        /// Error message (e.g., "${`SITE_DOMAIN`} not set").
        message: String,
    },
    /// Base directory is not below the document root.
    #[error(
        "Base directory {} is not inside document root {}",
        base_dir.display(),
        document_root.display()
    )]
    OutsideDocumentRoot {
        /// Resolved base directory.
        base_dir: PathBuf,
        /// Resolved document root.
        document_root: PathBuf,
    },
}
