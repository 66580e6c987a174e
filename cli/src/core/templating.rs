//! # Projection Template System
//!
//! File: cli/src/core/templating.rs
//!
//! ## Overview
//!
//! This module renders the named templates that make up a generated project
//! (README, license texts, class and test stubs). It wraps a single Tera
//! instance behind [`TemplateRenderer`], which resolves template identifiers
//! and renders them against a `tera::Context`.
//!
//! ## Architecture
//!
//! - The built-in templates live in `cli/templates/` and are embedded into the
//!   binary with `include_str!`, so the template root always travels with the
//!   executable.
//! - Identifiers are the template's path below `templates/` without the `.tera`
//!   suffix, e.g. `txt/README.md` or `licenses/mit.txt`.
//! - A user override directory (from the user configuration) can be layered on
//!   top. Every non-hidden file below it is registered under its relative path,
//!   replacing a built-in template with the same identifier.
//! - Autoescaping is disabled: the output is source code and plain text.
//!
//! The renderer is built once in `main`-driven command setup and then only read.
//!
//! ## Examples
//!
//! ```rust
//! let renderer = TemplateRenderer::builtin()?;
//! let mut context = tera::Context::new();
//! context.insert("config", &settings);
//! let readme = renderer.render("txt/README.md", &context)?;
//! ```
//!
use crate::core::error::{ProjectionError, ProjectionResult};
use anyhow::Context as _;
use std::fs;
use std::path::Path;
use tera::{Context, Tera};
use tracing::{debug, info, warn};
use walkdir::WalkDir;

/// Suffix stripped from template file names to form identifiers.
const TEMPLATE_SUFFIX: &str = ".tera";

/// The templates compiled into the binary, keyed by identifier.
const BUILTIN_TEMPLATES: &[(&str, &str)] = &[
    (
        "txt/README.md",
        include_str!("../../templates/txt/README.md.tera"),
    ),
    (
        "licenses/mit.txt",
        include_str!("../../templates/licenses/mit.txt.tera"),
    ),
    (
        "licenses/gpl.txt",
        include_str!("../../templates/licenses/gpl.txt.tera"),
    ),
    (
        "licenses/lgpl.txt",
        include_str!("../../templates/licenses/lgpl.txt.tera"),
    ),
    (
        "php/class.php",
        include_str!("../../templates/php/class.php.tera"),
    ),
    (
        "phpunit/phpunit.xml.dist",
        include_str!("../../templates/phpunit/phpunit.xml.dist.tera"),
    ),
    (
        "phpunit/TestCase.php",
        include_str!("../../templates/phpunit/TestCase.php.tera"),
    ),
    (
        "phpunit/test.php",
        include_str!("../../templates/phpunit/test.php.tera"),
    ),
];

/// Renders named templates against a variable context.
#[derive(Debug)]
pub struct TemplateRenderer {
    tera: Tera,
}

impl TemplateRenderer {
    /// Builds a renderer holding the embedded templates.
    pub fn builtin() -> ProjectionResult<Self> {
        Self::from_templates(BUILTIN_TEMPLATES.iter().copied())
    }

    /// Builds a renderer from `(identifier, source)` pairs.
    pub fn from_templates<'a, I>(templates: I) -> ProjectionResult<Self>
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let mut tera = Tera::default();
        tera.autoescape_on(vec![]);
        tera.add_raw_templates(templates)
            .map_err(|source| ProjectionError::Render {
                name: "<builtin>".to_string(),
                source,
            })?;
        debug!(
            "Registered {} template(s)",
            tera.get_template_names().count()
        );
        Ok(Self { tera })
    }

    /// Registers every non-hidden file below `directory`, replacing built-in
    /// templates that share an identifier.
    ///
    /// A missing directory is not an error (the user configuration already
    /// warned about it); unreadable files and syntax errors are.
    pub fn with_overrides(mut self, directory: &Path) -> anyhow::Result<Self> {
        if !directory.is_dir() {
            debug!(
                "Template override directory '{}' not found, using built-in templates only",
                directory.display()
            );
            return Ok(self);
        }

        let mut overrides = Vec::new();
        for entry_result in WalkDir::new(directory).sort_by_file_name() {
            let entry = match entry_result {
                Ok(e) => e,
                Err(e) => {
                    warn!(
                        "Failed to access entry during walk in '{}': {}",
                        directory.display(),
                        e
                    );
                    continue;
                }
            };
            let relative_path = match entry.path().strip_prefix(directory) {
                Ok(p) => p,
                Err(_) => continue,
            };
            if relative_path
                .components()
                .any(|comp| comp.as_os_str().to_string_lossy().starts_with('.'))
            {
                debug!("Skipping hidden path: {}", entry.path().display());
                continue;
            }
            if !entry.file_type().is_file() {
                continue;
            }

            let relative = relative_path
                .components()
                .map(|comp| comp.as_os_str().to_string_lossy().into_owned())
                .collect::<Vec<_>>()
                .join("/");
            let name = relative
                .strip_suffix(TEMPLATE_SUFFIX)
                .unwrap_or(&relative)
                .to_string();
            let source = fs::read_to_string(entry.path()).with_context(|| {
                format!("Failed to read template file '{}'", entry.path().display())
            })?;
            overrides.push((name, source));
        }

        if overrides.is_empty() {
            return Ok(self);
        }
        for (name, _) in &overrides {
            info!("Using template override '{}'", name);
        }
        self.tera
            .add_raw_templates(overrides.iter().map(|(n, s)| (n.as_str(), s.as_str())))
            .map_err(|source| ProjectionError::Render {
                name: directory.display().to_string(),
                source,
            })
            .context("Failed to register template overrides")?;
        Ok(self)
    }

    /// Whether `template_id` resolves to a registered template.
    pub fn has_template(&self, template_id: &str) -> bool {
        self.tera.get_template_names().any(|name| name == template_id)
    }

    /// Renders `template_id` with `context`.
    pub fn render(&self, template_id: &str, context: &Context) -> ProjectionResult<String> {
        if !self.has_template(template_id) {
            return Err(ProjectionError::TemplateNotFound {
                name: template_id.to_string(),
            });
        }
        self.tera
            .render(template_id, context)
            .map_err(|source| ProjectionError::Render {
                name: template_id.to_string(),
                source,
            })
    }
}
