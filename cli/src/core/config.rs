//! # Projection User Configuration
//!
//! File: cli/src/core/config.rs
//!
//! ## Overview
//!
//! Projection reads an optional per-user configuration file holding the
//! values people otherwise type for every new project (author, preferred
//! license, directory names) and the location of a template override
//! directory. This is unrelated to `.projection.toml`, which belongs to a
//! generated project (see `core::project`).
//!
//! ## Architecture
//!
//! Configuration sources, in order of precedence:
//! 1. Command-line options
//! 2. The user configuration file:
//!    - `$PROJECTION_CONFIG` if set, otherwise
//!    - `<user config dir>/projection/config.toml` (via `directories`)
//! 3. Built-in defaults (`src`, `doc`, `tests`, `mit`, current year)
//!
//! Loading expands `~` in paths and validates the result. A missing file is not
//! an error; an unreadable or malformed one is.
//!
//! ## Examples
//!
//! ```toml
//! [defaults]
//! author_name = "Jane Doe"
//! author_email = "jane@example.com"
//! license = "mit"
//! docs_dir = "docs"
//!
//! [templates]
//! directory = "~/.config/projection/templates"
//! ```
//!
use crate::core::error::{ProjectionError, Result};
use anyhow::{anyhow, Context};
use directories::ProjectDirs;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Environment variable pointing at an explicit user configuration file.
pub const CONFIG_PATH_ENV: &str = "PROJECTION_CONFIG";

/// Represents the user configuration file.
#[derive(Deserialize, Debug, Default, Clone, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default)]
    pub defaults: DefaultsConfig,
    #[serde(default)]
    pub templates: TemplatesConfig,
}

/// Default answers for `generate project`. Unset values fall back to the
/// built-in defaults.
#[derive(Deserialize, Debug, Default, Clone, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct DefaultsConfig {
    pub author_name: Option<String>,
    pub author_email: Option<String>,
    pub license: Option<String>,
    pub src_dir: Option<String>,
    pub docs_dir: Option<String>,
    pub tests_dir: Option<String>,
}

/// Where user-supplied templates live.
#[derive(Deserialize, Debug, Default, Clone, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct TemplatesConfig {
    /// Directory of template overrides (can use ~). Expanded on load.
    pub directory: Option<String>,
}

impl Config {
    /// The template override directory, if configured.
    pub fn template_directory(&self) -> Option<PathBuf> {
        self.templates.directory.as_ref().map(PathBuf::from)
    }
}

/// Loads, expands and validates the user configuration.
pub fn load_config() -> Result<Config> {
    let mut config = match user_config_path() {
        Some(path) if path.is_file() => {
            info!("Loading user configuration from: {}", path.display());
            load_config_from_path(&path)?
        }
        Some(path) => {
            debug!("User configuration file not found at {}", path.display());
            Config::default()
        }
        None => {
            warn!("Could not determine user config directory.");
            Config::default()
        }
    };
    expand_config_paths(&mut config);
    validate_config(&config).context("Configuration validation failed")?;
    debug!("Final loaded configuration: {:?}", config);
    Ok(config)
}

fn user_config_path() -> Option<PathBuf> {
    if let Some(explicit) = std::env::var_os(CONFIG_PATH_ENV) {
        return Some(PathBuf::from(explicit));
    }
    ProjectDirs::from("com", "Projection", "projection")
        .map(|dirs| dirs.config_dir().join("config.toml"))
}

fn load_config_from_path(path: &Path) -> Result<Config> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read configuration file: {}", path.display()))?;
    toml::from_str(&content)
        .with_context(|| format!("Failed to parse TOML from file: {}", path.display()))
}

fn expand_config_paths(config: &mut Config) {
    if let Some(directory) = config.templates.directory.as_mut() {
        *directory = shellexpand::tilde(directory.as_str()).into_owned();
        debug!("Expanded template directory: {}", directory);
    }
}

fn validate_config(config: &Config) -> Result<()> {
    if let Some(dir) = config.template_directory() {
        if !dir.exists() {
            warn!(
                "Configured template directory '{}' does not exist.",
                dir.display()
            );
        } else if !dir.is_dir() {
            return Err(anyhow!(ProjectionError::validation(format!(
                "Configured template path '{}' exists but is not a directory.",
                dir.display()
            ))));
        }
    }
    let defaults = &config.defaults;
    for (key, value) in [
        ("src_dir", &defaults.src_dir),
        ("docs_dir", &defaults.docs_dir),
        ("tests_dir", &defaults.tests_dir),
        ("author_name", &defaults.author_name),
    ] {
        if value.as_deref().is_some_and(|v| v.trim().is_empty()) {
            return Err(anyhow!(ProjectionError::validation(format!(
                "defaults.{} cannot be empty.",
                key
            ))));
        }
    }
    Ok(())
}
