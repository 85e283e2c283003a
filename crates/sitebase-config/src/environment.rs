//! Ambient inputs read from the hosting environment.

use std::path::{Path, PathBuf};

use crate::ConfigError;

/// Variable naming the resolver's install directory.
pub const INSTALL_DIR_VAR: &str = "SITEBASE_INSTALL_DIR";
/// CGI variable carrying the request's server host name.
pub const SERVER_NAME_VAR: &str = "SERVER_NAME";
/// CGI variable carrying the web server's document root.
pub const DOCUMENT_ROOT_VAR: &str = "DOCUMENT_ROOT";

/// Inputs the resolver reads but does not own.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Environment {
    /// Directory the resolver is installed in. The config directory is one
    /// level above it, the base directory two levels above.
    pub install_dir: PathBuf,
    /// Server host name declared by the request, if any.
    pub server_name: Option<String>,
    /// Web server document root, if known.
    pub document_root: Option<PathBuf>,
}

impl Environment {
    /// Create an environment with only the install directory set.
    pub fn new(install_dir: impl Into<PathBuf>) -> Self {
        Self {
            install_dir: install_dir.into(),
            server_name: None,
            document_root: None,
        }
    }

    /// Set the request server name.
    #[must_use]
    pub fn with_server_name(mut self, server_name: impl Into<String>) -> Self {
        self.server_name = Some(server_name.into());
        self
    }

    /// Set the document root.
    #[must_use]
    pub fn with_document_root(mut self, document_root: impl Into<PathBuf>) -> Self {
        self.document_root = Some(document_root.into());
        self
    }

    /// Read the environment of the current process.
    ///
    /// The install directory comes from `SITEBASE_INSTALL_DIR`, falling back
    /// to the directory of the running executable. Empty variables count as
    /// unset.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Io` if the executable path cannot be determined.
    pub fn from_process() -> Result<Self, ConfigError> {
        let install_dir = match non_empty_var(INSTALL_DIR_VAR) {
            Some(dir) => PathBuf::from(dir),
            None => {
                let exe = std::env::current_exe()?;
                exe.parent().unwrap_or(Path::new(".")).to_path_buf()
            }
        };

        Ok(Self {
            install_dir,
            server_name: non_empty_var(SERVER_NAME_VAR),
            document_root: non_empty_var(DOCUMENT_ROOT_VAR).map(PathBuf::from),
        })
    }
}

fn non_empty_var(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.is_empty())
}
