//! CLI commands.

mod build;
mod routes;

use std::path::Path;
use std::sync::Arc;

use mdpress_config::{CliSettings, Config};
use mdpress_site::{Site, SiteOptions};
use mdpress_storage::FsStore;

pub(crate) use build::BuildArgs;
pub(crate) use routes::RoutesArgs;

use crate::error::CliError;

/// Load configuration from an explicit path or by discovery, then apply
/// CLI overrides.
fn load_config(explicit: Option<&Path>, settings: &CliSettings) -> Result<Config, CliError> {
    let mut config = match explicit {
        Some(path) => Config::load(path)?,
        None => Config::discover(&std::env::current_dir()?)?,
    };
    config.apply_cli(settings);
    Ok(config)
}

/// Build a [`Site`] over the configured source directory.
fn site_from_config(config: &Config) -> Site {
    let store = Arc::new(FsStore::new(config.source_dir.clone()));
    Site::new(
        store,
        SiteOptions {
            title: config.title.clone(),
            home_link: config.home_link.clone(),
            route_prefix: config.route_prefix.clone(),
        },
    )
}
