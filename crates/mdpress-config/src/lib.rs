//! Configuration management for mdpress.
//!
//! Parses `mdpress.toml` files with serde and provides auto-discovery in
//! parent directories. Every key is optional; the defaults reproduce the
//! fixed site contract (title "DIY Firestore", `posts/` sources, `/posts`
//! routes, `public/` output).
//!
//! Directory values support environment variable expansion (`$VAR` and
//! `${VAR}`); an unset variable is a configuration error.
//!
//! CLI settings can be applied after loading via [`CliSettings`].

use std::path::{Path, PathBuf};

use serde::Deserialize;

/// Configuration filename to search for.
const CONFIG_FILENAME: &str = "mdpress.toml";

/// Raw configuration as parsed from TOML (paths as strings).
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawConfig {
    site: SiteSection,
    content: ContentSection,
    build: BuildSection,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
struct SiteSection {
    title: String,
    home_link: String,
}

impl Default for SiteSection {
    fn default() -> Self {
        Self {
            title: "DIY Firestore".to_owned(),
            home_link: "/".to_owned(),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(default)]
struct ContentSection {
    source_dir: String,
    route_prefix: String,
}

impl Default for ContentSection {
    fn default() -> Self {
        Self {
            source_dir: "posts".to_owned(),
            route_prefix: "/posts".to_owned(),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(default)]
struct BuildSection {
    output_dir: String,
}

impl Default for BuildSection {
    fn default() -> Self {
        Self {
            output_dir: "public".to_owned(),
        }
    }
}

/// CLI settings that override configuration file values.
///
/// All fields are optional. Only non-`None` values override the loaded
/// config.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Override the post source directory.
    pub source_dir: Option<PathBuf>,
    /// Override the build output directory.
    pub output_dir: Option<PathBuf>,
}

/// Resolved application configuration.
///
/// Directory values are resolved against the directory containing the
/// config file (or the discovery start directory when no file exists).
#[derive(Debug)]
pub struct Config {
    /// Document title shared by every generated page.
    pub title: String,
    /// Destination of the navigation link in the page shell.
    pub home_link: String,
    /// Route prefix under which posts are published.
    pub route_prefix: String,
    /// Directory containing `<slug>.mdx` post documents.
    pub source_dir: PathBuf,
    /// Directory the build writes generated pages into.
    pub output_dir: PathBuf,
    /// Path to the config file, if one was loaded.
    pub config_path: Option<PathBuf>,
}

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The config file could not be read.
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The config file is not valid TOML.
    #[error("failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    /// An environment variable referenced in a directory value is unset.
    #[error("failed to expand `{field}`: {source}")]
    Expand {
        field: &'static str,
        #[source]
        source: shellexpand::LookupError<std::env::VarError>,
    },
}

impl Config {
    /// Load configuration from an explicit file path.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the file cannot be read, parsed, or its
    /// directory values expanded.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let raw: RawConfig = toml::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        let base = path.parent().unwrap_or(Path::new(".")).to_path_buf();
        Self::resolve(raw, &base, Some(path.to_path_buf()))
    }

    /// Discover and load configuration starting from `start_dir`.
    ///
    /// Walks `start_dir` and its ancestors for a `mdpress.toml`; when none
    /// exists, returns the defaults resolved against `start_dir`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if a discovered file fails to load.
    pub fn discover(start_dir: &Path) -> Result<Self, ConfigError> {
        for dir in start_dir.ancestors() {
            let candidate = dir.join(CONFIG_FILENAME);
            if candidate.is_file() {
                return Self::load(&candidate);
            }
        }
        Self::default_with_base(start_dir)
    }

    /// The default configuration resolved against `base`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Expand`] only if a default directory value
    /// fails expansion, which cannot happen for the built-in defaults.
    pub fn default_with_base(base: &Path) -> Result<Self, ConfigError> {
        Self::resolve(RawConfig::default(), base, None)
    }

    /// Apply CLI overrides on top of the loaded configuration.
    pub fn apply_cli(&mut self, settings: &CliSettings) {
        if let Some(source_dir) = &settings.source_dir {
            self.source_dir.clone_from(source_dir);
        }
        if let Some(output_dir) = &settings.output_dir {
            self.output_dir.clone_from(output_dir);
        }
    }

    fn resolve(
        raw: RawConfig,
        base: &Path,
        config_path: Option<PathBuf>,
    ) -> Result<Self, ConfigError> {
        let source_dir = resolve_dir(&raw.content.source_dir, base, "content.source_dir")?;
        let output_dir = resolve_dir(&raw.build.output_dir, base, "build.output_dir")?;

        Ok(Self {
            title: raw.site.title,
            home_link: raw.site.home_link,
            route_prefix: raw.content.route_prefix,
            source_dir,
            output_dir,
            config_path,
        })
    }
}

/// Expand environment variables in a directory value and resolve it against
/// the config base directory.
fn resolve_dir(value: &str, base: &Path, field: &'static str) -> Result<PathBuf, ConfigError> {
    let expanded = shellexpand::env(value)
        .map_err(|source| ConfigError::Expand { field, source })?
        .into_owned();
    let path = PathBuf::from(expanded);
    if path.is_absolute() {
        Ok(path)
    } else {
        Ok(base.join(path))
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_defaults_reproduce_fixed_contract() {
        let config = Config::default_with_base(Path::new("/project")).unwrap();

        assert_eq!(config.title, "DIY Firestore");
        assert_eq!(config.home_link, "/");
        assert_eq!(config.route_prefix, "/posts");
        assert_eq!(config.source_dir, PathBuf::from("/project/posts"));
        assert_eq!(config.output_dir, PathBuf::from("/project/public"));
        assert!(config.config_path.is_none());
    }

    #[test]
    fn test_load_full_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILENAME);
        std::fs::write(
            &path,
            r#"
[site]
title = "My Blog"
home_link = "/index"

[content]
source_dir = "articles"
route_prefix = "/articles"

[build]
output_dir = "dist"
"#,
        )
        .unwrap();

        let config = Config::load(&path).unwrap();

        assert_eq!(config.title, "My Blog");
        assert_eq!(config.home_link, "/index");
        assert_eq!(config.route_prefix, "/articles");
        assert_eq!(config.source_dir, dir.path().join("articles"));
        assert_eq!(config.output_dir, dir.path().join("dist"));
        assert_eq!(config.config_path.as_deref(), Some(path.as_path()));
    }

    #[test]
    fn test_load_partial_file_keeps_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILENAME);
        std::fs::write(&path, "[site]\ntitle = \"Custom\"\n").unwrap();

        let config = Config::load(&path).unwrap();

        assert_eq!(config.title, "Custom");
        assert_eq!(config.route_prefix, "/posts");
        assert_eq!(config.source_dir, dir.path().join("posts"));
    }

    #[test]
    fn test_load_missing_file_fails() {
        assert!(matches!(
            Config::load(Path::new("/nonexistent/mdpress.toml")),
            Err(ConfigError::Io { .. })
        ));
    }

    #[test]
    fn test_load_invalid_toml_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILENAME);
        std::fs::write(&path, "not = [valid").unwrap();

        assert!(matches!(
            Config::load(&path),
            Err(ConfigError::Parse { .. })
        ));
    }

    #[test]
    fn test_discover_in_parent_directory() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join(CONFIG_FILENAME),
            "[site]\ntitle = \"Found\"\n",
        )
        .unwrap();
        let nested = dir.path().join("a/b");
        std::fs::create_dir_all(&nested).unwrap();

        let config = Config::discover(&nested).unwrap();

        assert_eq!(config.title, "Found");
        assert_eq!(config.source_dir, dir.path().join("posts"));
    }

    #[test]
    fn test_discover_without_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();

        let config = Config::discover(dir.path()).unwrap();

        assert_eq!(config.title, "DIY Firestore");
        assert_eq!(config.source_dir, dir.path().join("posts"));
        assert!(config.config_path.is_none());
    }

    #[test]
    fn test_apply_cli_overrides() {
        let mut config = Config::default_with_base(Path::new("/project")).unwrap();
        config.apply_cli(&CliSettings {
            source_dir: Some(PathBuf::from("/elsewhere/posts")),
            output_dir: None,
        });

        assert_eq!(config.source_dir, PathBuf::from("/elsewhere/posts"));
        assert_eq!(config.output_dir, PathBuf::from("/project/public"));
    }

    #[test]
    fn test_env_expansion_in_source_dir() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILENAME);
        std::fs::write(&path, "[content]\nsource_dir = \"${MDPRESS_TEST_SRC}\"\n").unwrap();

        // SAFETY: test-local variable, no concurrent reader depends on it.
        unsafe { std::env::set_var("MDPRESS_TEST_SRC", "/expanded/posts") };
        let config = Config::load(&path).unwrap();

        assert_eq!(config.source_dir, PathBuf::from("/expanded/posts"));
    }

    #[test]
    fn test_env_expansion_unset_variable_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILENAME);
        std::fs::write(
            &path,
            "[content]\nsource_dir = \"${MDPRESS_TEST_UNSET_VAR}\"\n",
        )
        .unwrap();

        assert!(matches!(
            Config::load(&path),
            Err(ConfigError::Expand { .. })
        ));
    }
}
