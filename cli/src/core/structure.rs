//! # Projection Structure Materializer
//!
//! File: cli/src/core/structure.rs
//!
//! ## Overview
//!
//! A generated project is described declaratively as a [`Structure`]: an ordered
//! list of relative paths, each mapped either to a template identifier (a file
//! to render) or to nothing (a directory to create). The
//! [`StructureMaterializer`] turns such a description into real directories and
//! files through a [`FileSystemWriter`].
//!
//! ## Architecture
//!
//! For every entry, in declaration order:
//! 1. The item path is normalized and joined onto the normalized base path.
//! 2. Directory entries call `ensure_directory`; file entries are rendered with
//!    the shared context and written with `write_file`.
//! 3. The first failure is wrapped once in `ProjectionError::Item` (naming the
//!    item and the base) and returned. Later entries are not processed and
//!    earlier ones are left on disk.
//!
//! Re-running a structure is safe: existing directories are left alone and
//! files are rewritten with the same content.
//!
//! ## Examples
//!
//! ```rust
//! let structure = Structure::new()
//!     .directory("/docs")
//!     .file("/README.md", "txt/README.md");
//!
//! StructureMaterializer::new(&renderer).materialize(&mut writer, "/", &structure, &context)?;
//! ```
//!
use crate::common::fs::io::{normalize_relative, FileSystemWriter, DEFAULT_DIR_MODE};
use crate::core::error::{ProjectionError, ProjectionResult};
use crate::core::templating::TemplateRenderer;
use tera::Context;
use tracing::debug;

/// One path in a [`Structure`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StructureEntry {
    /// Path relative to the materialization base, `/`-separated.
    pub path: String,
    /// Template to render, or `None` for a plain directory.
    pub template: Option<String>,
}

/// An ordered set of directories and templated files.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Structure {
    entries: Vec<StructureEntry>,
}

impl Structure {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a directory entry.
    pub fn directory(mut self, path: impl Into<String>) -> Self {
        self.push(path, None);
        self
    }

    /// Appends a file entry rendered from `template`.
    pub fn file(mut self, path: impl Into<String>, template: impl Into<String>) -> Self {
        self.push(path, Some(template.into()));
        self
    }

    pub fn push(&mut self, path: impl Into<String>, template: Option<String>) {
        self.entries.push(StructureEntry {
            path: path.into(),
            template,
        });
    }

    pub fn entries(&self) -> &[StructureEntry] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FromIterator<(String, Option<String>)> for Structure {
    fn from_iter<I: IntoIterator<Item = (String, Option<String>)>>(iter: I) -> Self {
        let mut structure = Structure::new();
        for (path, template) in iter {
            structure.push(path, template);
        }
        structure
    }
}

/// Realizes [`Structure`]s with a template renderer.
pub struct StructureMaterializer<'a> {
    renderer: &'a TemplateRenderer,
}

impl<'a> StructureMaterializer<'a> {
    pub fn new(renderer: &'a TemplateRenderer) -> Self {
        Self { renderer }
    }

    /// Creates every entry of `structure` below `base_path`.
    ///
    /// Stops at the first failing entry and returns it wrapped in
    /// [`ProjectionError::Item`]. Entries already created stay on disk.
    pub fn materialize(
        &self,
        writer: &mut dyn FileSystemWriter,
        base_path: &str,
        structure: &Structure,
        context: &Context,
    ) -> ProjectionResult<()> {
        if structure.is_empty() {
            return Ok(());
        }
        let base = normalize_relative(base_path);
        debug!(
            "Materializing {} item(s) in '/{}' under {}",
            structure.entries().len(),
            base,
            writer.root().display()
        );

        for entry in structure.entries() {
            let item = normalize_relative(&entry.path);
            let item_path = join_item(&base, &item);

            self.materialize_entry(writer, &item_path, entry, context)
                .map_err(|source| ProjectionError::Item {
                    item: item.clone(),
                    base: format!("/{}", base),
                    source: Box::new(source),
                })?;
        }
        Ok(())
    }

    fn materialize_entry(
        &self,
        writer: &mut dyn FileSystemWriter,
        item_path: &str,
        entry: &StructureEntry,
        context: &Context,
    ) -> ProjectionResult<()> {
        match &entry.template {
            None => {
                let created = writer.ensure_directory(item_path, DEFAULT_DIR_MODE)?;
                debug!("Directory '{}' created: {}", item_path, created);
            }
            Some(template_id) => {
                let contents = self.renderer.render(template_id, context)?;
                writer.write_file(item_path, &contents)?;
                debug!("Rendered '{}' into '{}'", template_id, item_path);
            }
        }
        Ok(())
    }
}

fn join_item(base: &str, item: &str) -> String {
    match (base.is_empty(), item.is_empty()) {
        (true, _) => item.to_string(),
        (_, true) => base.to_string(),
        _ => format!("{}/{}", base, item),
    }
}
