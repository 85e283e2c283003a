//! `sitebase get` command implementation.

use clap::Args;
use sitebase_config::{ConfigValue, SiteConfig};

use super::SiteArgs;
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the get command.
#[derive(Args)]
pub(crate) struct GetArgs {
    /// Configuration key (e.g. `base_url`, `base_dir`, or an overlay extra key).
    key: String,

    #[command(flatten)]
    pub site: SiteArgs,
}

impl GetArgs {
    /// Execute the get command.
    pub(crate) fn execute(self, output: &Output) -> Result<(), CliError> {
        let site = self.site.into_site()?;
        let value = lookup(site.initialize()?, &self.key)?;
        output.result(&value.to_string());
        Ok(())
    }
}

fn lookup(config: &SiteConfig, key: &str) -> Result<ConfigValue, CliError> {
    config
        .get(key)
        .ok_or_else(|| CliError::UnknownKey(key.to_owned()))
}
