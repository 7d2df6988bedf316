//! The `routes` command: print the enumerated route set.

use std::path::PathBuf;

use clap::Args;
use mdpress_config::CliSettings;
use mdpress_site::Fallback;

use crate::error::CliError;
use crate::output::Output;

use super::{load_config, site_from_config};

/// Arguments for `mdpress routes`.
#[derive(Args)]
pub(crate) struct RoutesArgs {
    /// Path to the configuration file.
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Directory containing post documents (overrides config).
    #[arg(long, value_name = "DIR")]
    source: Option<PathBuf>,

    /// Enable verbose logging.
    #[arg(long, short)]
    pub(crate) verbose: bool,
}

impl RoutesArgs {
    pub(crate) fn execute(self, output: &Output) -> Result<(), CliError> {
        let config = load_config(
            self.config.as_deref(),
            &CliSettings {
                source_dir: self.source,
                output_dir: None,
            },
        )?;

        let site = site_from_config(&config);
        let paths = site.static_paths()?;

        if paths.routes.is_empty() {
            output.warning("No posts found");
        } else {
            for route in &paths.routes {
                output.info(&route.path);
            }
        }
        match paths.fallback {
            Fallback::Disabled => output.info("Fallback: disabled"),
        }
        Ok(())
    }
}
