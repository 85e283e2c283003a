//! `sitebase url` command implementation.

use clap::Args;

use super::SiteArgs;
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the url command.
#[derive(Args)]
pub(crate) struct UrlArgs {
    /// Relative part appended verbatim to the base URL.
    #[arg(default_value = "")]
    relative: String,

    #[command(flatten)]
    pub site: SiteArgs,
}

impl UrlArgs {
    /// Execute the url command.
    pub(crate) fn execute(self, output: &Output) -> Result<(), CliError> {
        let site = self.site.into_site()?;
        output.result(&site.url(&self.relative)?);
        Ok(())
    }
}
