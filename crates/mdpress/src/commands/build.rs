//! The `build` command: generate every post page into the output directory.

use std::fs;
use std::path::{Path, PathBuf};

use clap::Args;
use mdpress_config::{CliSettings, Config};

use crate::error::CliError;
use crate::output::Output;

use super::{load_config, site_from_config};

/// Arguments for `mdpress build`.
#[derive(Args)]
pub(crate) struct BuildArgs {
    /// Path to the configuration file.
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Directory containing post documents (overrides config).
    #[arg(long, value_name = "DIR")]
    source: Option<PathBuf>,

    /// Output directory for generated pages (overrides config).
    #[arg(long, value_name = "DIR")]
    out: Option<PathBuf>,

    /// Enable verbose logging.
    #[arg(long, short)]
    pub(crate) verbose: bool,
}

impl BuildArgs {
    pub(crate) fn execute(self, output: &Output) -> Result<(), CliError> {
        let config = load_config(
            self.config.as_deref(),
            &CliSettings {
                source_dir: self.source,
                output_dir: self.out,
            },
        )?;

        let written = build_site(&config)?;

        if written.is_empty() {
            output.warning("No posts found; nothing generated");
        } else {
            output.success(&format!(
                "Generated {} page(s) in {}",
                written.len(),
                config.output_dir.display()
            ));
        }
        Ok(())
    }
}

/// Render every enumerated route and write it under the output directory.
///
/// Each route `/posts/<slug>` becomes `<output_dir>/posts/<slug>/index.html`.
/// Returns the written file paths in generation order.
fn build_site(config: &Config) -> Result<Vec<PathBuf>, CliError> {
    let site = site_from_config(config);
    let paths = site.static_paths()?;

    let mut written = Vec::with_capacity(paths.routes.len());
    for route in &paths.routes {
        let page = site.render_page(&route.slug)?;
        let target = page_output_path(&config.output_dir, &page.route);
        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&target, &page.html)?;
        tracing::info!(route = %page.route, path = %target.display(), "wrote page");
        written.push(target);
    }
    Ok(written)
}

/// Map a route to its file path under the output directory.
fn page_output_path(output_dir: &Path, route: &str) -> PathBuf {
    let mut path = output_dir.to_path_buf();
    for segment in route.split('/').filter(|s| !s.is_empty()) {
        path.push(segment);
    }
    path.join("index.html")
}
