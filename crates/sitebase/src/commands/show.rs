//! `sitebase show` command implementation.

use clap::Args;
use serde::Serialize;
use sitebase_config::{ConfigValue, Origin, SiteConfig};

use super::SiteArgs;
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the show command.
#[derive(Args)]
pub(crate) struct ShowArgs {
    #[command(flatten)]
    pub site: SiteArgs,

    /// Print JSON instead of `key = value` lines.
    #[arg(long)]
    json: bool,
}

/// One key in JSON output.
#[derive(Serialize)]
struct JsonEntry {
    key: String,
    value: ConfigValue,
    origin: Origin,
}

impl ShowArgs {
    /// Execute the show command.
    pub(crate) fn execute(self, output: &Output) -> Result<(), CliError> {
        let json = self.json;
        let site = self.site.into_site()?;
        let config = site.initialize()?;

        if json {
            output.result(&render_json(config)?);
        } else {
            for (key, value, origin) in config.entries() {
                output.entry(&key, &value.to_string(), origin.as_str());
            }
            if let Some(path) = &config.overlay_path {
                tracing::info!(path = %path.display(), "Overlay applied");
            }
        }

        Ok(())
    }
}

/// Render all entries as a pretty-printed JSON array.
fn render_json(config: &SiteConfig) -> Result<String, CliError> {
    let entries: Vec<JsonEntry> = config
        .entries()
        .into_iter()
        .map(|(key, value, origin)| JsonEntry { key, value, origin })
        .collect();
    Ok(serde_json::to_string_pretty(&entries)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::tests::{layout, site_args};
    use pretty_assertions::assert_eq;

    #[test]
    fn test_render_json() {
        let (_tmp, root) = layout();
        std::fs::write(
            root.join("www/app/inc/site.toml"),
            "[extra]\ntitle = \"Demo\"\n",
        )
        .unwrap();
        let site = site_args(&root, &[]).into_site().unwrap();
        let config = site.initialize().unwrap();

        let json: serde_json::Value = serde_json::from_str(&render_json(config).unwrap()).unwrap();
        let entries = json.as_array().unwrap();
        assert_eq!(entries.len(), 7);

        assert_eq!(entries[0]["key"], "debug");
        assert_eq!(entries[0]["value"], false);
        assert_eq!(entries[0]["origin"], "default");

        assert_eq!(entries[3]["key"], "domain");
        assert_eq!(entries[3]["value"], "127.0.0.1");
        assert_eq!(entries[3]["origin"], "detected");

        assert_eq!(entries[6]["key"], "title");
        assert_eq!(entries[6]["value"], "Demo");
        assert_eq!(entries[6]["origin"], "overlay");
    }
}
