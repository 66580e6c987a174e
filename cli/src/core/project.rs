//! # Projection Project Configuration
//!
//! File: cli/src/core/project.rs
//!
//! ## Overview
//!
//! A generated project remembers how it was created in a `.projection.toml`
//! file at its root. This module models that file ([`ProjectSettings`]) and the
//! project it belongs to ([`ProjectConfig`]): where the project lives, how its
//! settings are loaded and saved, and the source/tests directories derived from
//! the namespace.
//!
//! ## Architecture
//!
//! - Settings are an explicit record rather than a loose mapping. Disabled tests
//!   are `None` and are written as `tests = false`, so the file keeps the shape
//!   `tests = false | { dir = "..." }`.
//! - `load_from` only looks at the given root; `discover` walks up through
//!   ancestors (stopping at a `.git` directory) so commands can run from inside
//!   a project tree.
//! - `save` goes through a [`FileSystemWriter`], so progress reporting sees the
//!   config file like any other generated file.
//!
//! ## Examples
//!
//! ```toml
//! tests = false
//!
//! [project]
//! name = "Blog"
//! namespace = "Acme\\Blog"
//!
//! [author]
//! name = "Jane Doe"
//! email = "jane@example.com"
//!
//! [license]
//! type = "mit"
//! years = "2024"
//!
//! [src]
//! dir = "src"
//!
//! [docs]
//! dir = "doc"
//! ```
//!
use crate::common::fs::io::{self as fsio, FileSystemWriter};
use crate::core::error::{ProjectionError, ProjectionResult};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::{debug, info};

/// Name of the configuration file at the root of every generated project.
pub const PROJECT_CONFIG_FILENAME: &str = ".projection.toml";

/// Licenses a project can be released under.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LicenseKind {
    Mit,
    Gpl,
    Lgpl,
}

impl LicenseKind {
    pub const ALL: [LicenseKind; 3] = [LicenseKind::Gpl, LicenseKind::Mit, LicenseKind::Lgpl];

    pub fn as_str(&self) -> &'static str {
        match self {
            LicenseKind::Mit => "mit",
            LicenseKind::Gpl => "gpl",
            LicenseKind::Lgpl => "lgpl",
        }
    }

    /// Identifier of the license text template.
    pub fn template_id(&self) -> String {
        format!("licenses/{}.txt", self.as_str())
    }
}

impl fmt::Display for LicenseKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LicenseKind {
    type Err = ProjectionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        LicenseKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| {
                let valid = LicenseKind::ALL
                    .iter()
                    .map(LicenseKind::as_str)
                    .collect::<Vec<_>>()
                    .join(", ");
                ProjectionError::validation(format!(
                    "License \"{}\" is not valid. Valid licenses are: {}.",
                    s, valid
                ))
            })
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct ProjectSection {
    pub name: String,
    /// Backslash-delimited namespace, e.g. `Acme\Blog`.
    pub namespace: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct AuthorSection {
    pub name: String,
    pub email: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct LicenseSection {
    #[serde(rename = "type")]
    pub kind: LicenseKind,
    /// A single year (`2024`) or a range (`2020-2024`).
    pub years: String,
}

/// A `{ dir = "..." }` section.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct DirSection {
    pub dir: String,
}

/// Everything stored in `.projection.toml`.
///
/// `tests` is declared first so that `tests = false` serializes ahead of the
/// tables.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct ProjectSettings {
    #[serde(with = "tests_flag")]
    pub tests: Option<DirSection>,
    pub project: ProjectSection,
    pub author: AuthorSection,
    pub license: LicenseSection,
    pub src: DirSection,
    pub docs: DirSection,
}

/// `tests = false` or `[tests] dir = "..."`.
mod tests_flag {
    use super::*;
    use serde::de::Error as _;

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Repr {
        Flag(bool),
        Section(DirSection),
    }

    pub fn serialize<S: Serializer>(value: &Option<DirSection>, ser: S) -> Result<S::Ok, S::Error> {
        match value {
            Some(section) => section.serialize(ser),
            None => ser.serialize_bool(false),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(de: D) -> Result<Option<DirSection>, D::Error> {
        match Repr::deserialize(de)? {
            Repr::Flag(false) => Ok(None),
            Repr::Flag(true) => Err(D::Error::custom(
                "tests must be `false` or a table with a `dir` key",
            )),
            Repr::Section(section) => Ok(Some(section)),
        }
    }
}

impl ProjectSettings {
    /// Whether the project generates test stubs.
    pub fn tests_enabled(&self) -> bool {
        self.tests.is_some()
    }

    /// The namespace as a `/`-separated relative path.
    pub fn namespace_path(&self) -> String {
        namespace_as_path(&self.project.namespace)
    }

    #[cfg(test)]
    pub(crate) fn sample() -> Self {
        ProjectSettings {
            tests: Some(DirSection {
                dir: "tests".into(),
            }),
            project: ProjectSection {
                name: "Blog".into(),
                namespace: "Acme\\Blog".into(),
            },
            author: AuthorSection {
                name: "Jane Doe".into(),
                email: "jane@example.com".into(),
            },
            license: LicenseSection {
                kind: LicenseKind::Mit,
                years: "2024".into(),
            },
            src: DirSection { dir: "src".into() },
            docs: DirSection { dir: "doc".into() },
        }
    }
}

/// Converts a `\`-delimited namespace into a relative directory path.
pub fn namespace_as_path(namespace: &str) -> String {
    namespace
        .split(['\\', '/'])
        .filter(|segment| !segment.is_empty())
        .collect::<Vec<_>>()
        .join("/")
}

/// A project on disk: its root directory plus (once known) its settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectConfig {
    root: PathBuf,
    settings: Option<ProjectSettings>,
}

impl ProjectConfig {
    /// A project whose settings have not been populated yet.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            settings: None,
        }
    }

    pub fn with_settings(root: impl Into<PathBuf>, settings: ProjectSettings) -> Self {
        Self {
            root: root.into(),
            settings: Some(settings),
        }
    }

    /// Loads the project rooted exactly at `root`.
    pub fn load_from(root: &Path) -> ProjectionResult<Self> {
        let config_path = root.join(PROJECT_CONFIG_FILENAME);
        if !config_path.is_file() {
            return Err(ProjectionError::NotAProject {
                path: root.to_path_buf(),
                config_path,
            });
        }

        info!("Loading project configuration from: {}", config_path.display());
        let content =
            fsio::read_file_to_string(&config_path).map_err(|e| ProjectionError::InvalidConfig {
                path: config_path.clone(),
                reason: format!("{:#}", e),
            })?;
        let settings: ProjectSettings =
            toml::from_str(&content).map_err(|e| ProjectionError::InvalidConfig {
                path: config_path.clone(),
                reason: e.to_string().trim_end().to_string(),
            })?;
        debug!("Loaded project settings: {:?}", settings);

        Ok(Self::with_settings(root, settings))
    }

    /// Finds the nearest project at or above `start`.
    ///
    /// The search stops at the first directory containing `.git`; if no
    /// project is found the error refers to `start`.
    pub fn discover(start: &Path) -> ProjectionResult<Self> {
        let mut path = start;
        loop {
            if path.join(PROJECT_CONFIG_FILENAME).is_file() {
                return Self::load_from(path);
            }
            if path.join(".git").is_dir() {
                debug!(
                    "Found .git directory at {}, stopping project search.",
                    path.display()
                );
                break;
            }
            match path.parent() {
                Some(parent) => path = parent,
                None => break,
            }
        }
        Err(ProjectionError::NotAProject {
            path: start.to_path_buf(),
            config_path: start.join(PROJECT_CONFIG_FILENAME),
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn set_settings(&mut self, settings: ProjectSettings) {
        self.settings = Some(settings);
    }

    pub fn settings(&self) -> ProjectionResult<&ProjectSettings> {
        self.settings.as_ref().ok_or_else(|| {
            ProjectionError::MissingConfiguration(format!(
                "settings of the project at \"{}\" have not been set",
                self.root.display()
            ))
        })
    }

    /// `src.dir` followed by the namespace path, e.g. `src/Acme/Blog`.
    pub fn source_directory(&self) -> ProjectionResult<String> {
        let settings = self.settings()?;
        Ok(join_relative(&settings.src.dir, &settings.namespace_path()))
    }

    /// `tests.dir` followed by the namespace path and `Tests`.
    ///
    /// Fails with `MissingConfiguration` when tests are disabled.
    pub fn tests_directory(&self) -> ProjectionResult<String> {
        let settings = self.settings()?;
        let tests = settings.tests.as_ref().ok_or_else(|| {
            ProjectionError::MissingConfiguration(
                "tests.dir (tests are disabled for this project)".to_string(),
            )
        })?;
        let base = join_relative(&tests.dir, &settings.namespace_path());
        Ok(join_relative(&base, "Tests"))
    }

    /// Writes the settings to `.projection.toml` through `writer`.
    pub fn save(&self, writer: &mut dyn FileSystemWriter) -> ProjectionResult<()> {
        let settings = self.settings()?;
        let content = toml::to_string_pretty(settings)?;
        writer.write_file(PROJECT_CONFIG_FILENAME, &content)?;
        debug!("Saved project settings to {}", PROJECT_CONFIG_FILENAME);
        Ok(())
    }
}

fn join_relative(base: &str, rest: &str) -> String {
    let base = base.trim_end_matches('/');
    match (base.is_empty(), rest.is_empty()) {
        (true, _) => rest.to_string(),
        (_, true) => base.to_string(),
        _ => format!("{}/{}", base, rest),
    }
}
