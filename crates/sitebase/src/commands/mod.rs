//! CLI command implementations.

pub(crate) mod get;
pub(crate) mod show;
pub(crate) mod url;

use std::path::PathBuf;

use clap::Args;
use sitebase_config::{CliSettings, Environment, Site};

use crate::error::CliError;

pub(crate) use get::GetArgs;
pub(crate) use show::ShowArgs;
pub(crate) use url::UrlArgs;

/// Arguments shared by every command: hosting environment and overrides.
#[derive(Args)]
pub(crate) struct SiteArgs {
    /// Path to overlay file (default: <config_dir>/site.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Directory the resolver is installed in
    /// (default: $SITEBASE_INSTALL_DIR, then the executable directory).
    #[arg(long)]
    install_dir: Option<PathBuf>,

    /// Server host name of the request (default: $SERVER_NAME).
    #[arg(long)]
    server_name: Option<String>,

    /// Web server document root (default: $DOCUMENT_ROOT).
    #[arg(long)]
    document_root: Option<PathBuf>,

    /// Enable debug mode (overrides overlay).
    #[arg(long)]
    debug: bool,

    /// Disable debug mode (overrides overlay).
    #[arg(long, conflicts_with = "debug")]
    no_debug: bool,

    /// Domain (overrides detection and overlay).
    #[arg(long)]
    domain: Option<String>,

    /// Base URL (overrides detection and overlay).
    #[arg(long)]
    base_url: Option<String>,

    /// Enable verbose output (show resolution logs).
    #[arg(short, long)]
    pub verbose: bool,
}

impl SiteArgs {
    /// Build the site handle from arguments.
    ///
    /// Flags take precedence over the process environment. Empty values
    /// count as unset, the same as empty environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if the install directory cannot be determined.
    pub(crate) fn into_site(self) -> Result<Site, CliError> {
        let debug = self.resolve_debug();
        let mut env = Environment::from_process()?;
        if let Some(dir) = self.install_dir.filter(|d| !d.as_os_str().is_empty()) {
            env.install_dir = dir;
        }
        if let Some(name) = self.server_name.filter(|n| !n.is_empty()) {
            env.server_name = Some(name);
        }
        if let Some(root) = self.document_root.filter(|r| !r.as_os_str().is_empty()) {
            env.document_root = Some(root);
        }

        let settings = CliSettings {
            debug,
            domain: self.domain,
            base_url: self.base_url,
        };

        let mut site = Site::new(env).with_cli_settings(settings);
        if let Some(path) = self.config {
            site = site.with_overlay_path(path);
        }
        Ok(site)
    }

    /// Resolve `debug` from --debug/--no-debug flags.
    fn resolve_debug(&self) -> Option<bool> {
        if self.no_debug {
            Some(false)
        } else {
            self.debug.then_some(true)
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use std::path::Path;

    use clap::Parser;
    use sitebase_config::Origin;
    use tempfile::TempDir;

    use super::*;

    #[derive(Parser)]
    struct TestCli {
        #[command(flatten)]
        site: SiteArgs,
    }

    /// Temporary layout with document root `www`, base dir `www/app`,
    /// config dir `www/app/inc` and install dir `www/app/inc/sb`.
    pub(crate) fn layout() -> (TempDir, PathBuf) {
        let tmp = tempfile::tempdir().unwrap();
        let root = tmp.path().canonicalize().unwrap();
        std::fs::create_dir_all(root.join("www/app/inc/sb")).unwrap();
        (tmp, root)
    }

    pub(crate) fn site_args(root: &Path, extra: &[&str]) -> SiteArgs {
        let install_dir = root.join("www/app/inc/sb");
        let document_root = root.join("www");
        let mut argv = vec![
            "test".to_owned(),
            "--install-dir".to_owned(),
            install_dir.display().to_string(),
            "--document-root".to_owned(),
            document_root.display().to_string(),
            "--server-name".to_owned(),
            "localhost".to_owned(),
        ];
        argv.extend(extra.iter().map(|s| (*s).to_owned()));
        TestCli::parse_from(argv).site
    }

    #[test]
    fn test_into_site_resolves() {
        let (_tmp, root) = layout();
        let site = site_args(&root, &[]).into_site().unwrap();
        let config = site.initialize().unwrap();

        assert_eq!(config.base_url, "http://127.0.0.1/app/");
        assert!(!config.debug);
    }

    #[test]
    fn test_empty_environment_variables_degrade() {
        let (_tmp, root) = layout();
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::set_var("SERVER_NAME", "");
            std::env::set_var("DOCUMENT_ROOT", "");
        }

        let install_dir = root.join("www/app/inc/sb");
        let args = TestCli::try_parse_from([
            "test",
            "--install-dir",
            install_dir.to_str().unwrap(),
        ])
        .unwrap()
        .site;
        let site = args.into_site().unwrap();
        let config = site.initialize().unwrap();

        assert_eq!(config.domain, "");
        assert_eq!(config.local_part, "/");
        assert_eq!(config.base_url, "http:///");
        assert_eq!(config.origin("local_part"), Some(Origin::Fallback));

        unsafe {
            std::env::remove_var("SERVER_NAME");
            std::env::remove_var("DOCUMENT_ROOT");
        }
    }

    #[test]
    fn test_empty_flags_count_as_unset() {
        let (_tmp, root) = layout();
        let install_dir = root.join("www/app/inc/sb");
        let args = TestCli::try_parse_from([
            "test",
            "--install-dir",
            install_dir.to_str().unwrap(),
            "--server-name",
            "",
            "--document-root",
            "",
        ])
        .unwrap()
        .site;
        assert_eq!(args.server_name.as_deref(), Some(""));

        let site = args.into_site().unwrap();
        let config = site.initialize().unwrap();
        assert_eq!(config.local_part, "/");
        assert_eq!(config.origin("local_part"), Some(Origin::Fallback));
    }

    #[test]
    fn test_debug_flags() {
        let (_tmp, root) = layout();
        assert_eq!(site_args(&root, &[]).resolve_debug(), None);
        assert_eq!(site_args(&root, &["--debug"]).resolve_debug(), Some(true));
        assert_eq!(site_args(&root, &["--no-debug"]).resolve_debug(), Some(false));
    }

    #[test]
    fn test_debug_flags_conflict() {
        let result = TestCli::try_parse_from(["test", "--debug", "--no-debug"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_overrides_applied() {
        let (_tmp, root) = layout();
        let site = site_args(&root, &["--domain", "example.com", "--debug"])
            .into_site()
            .unwrap();
        let config = site.initialize().unwrap();

        assert!(config.debug);
        assert_eq!(config.base_url, "http://example.com/app/");
    }

    #[test]
    fn test_explicit_config_path() {
        let (_tmp, root) = layout();
        let overlay = root.join("custom.toml");
        std::fs::write(&overlay, "base_url = \"https://example.org/\"\n").unwrap();

        let site = site_args(&root, &["--config", overlay.to_str().unwrap()])
            .into_site()
            .unwrap();
        assert_eq!(site.initialize().unwrap().base_url, "https://example.org/");
    }
}
