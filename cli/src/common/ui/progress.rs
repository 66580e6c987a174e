//! # Projection Progress Reporting
//!
//! File: cli/src/common/ui/progress.rs
//!
//! ## Overview
//!
//! [`ReportingWriter`] decorates any [`FileSystemWriter`] and prints one line
//! per directory or file it actually creates:
//!
//! ```text
//! +dir  blog/src/Acme/Blog
//! +file blog/README.md
//! ```
//!
//! Paths are shown relative to the parent of the project root. Nothing is
//! printed for directories that already existed, for failed operations, or for
//! parent directories a file write creates implicitly. Failing to print never
//! changes the outcome of the underlying operation.
//!
use crate::common::fs::io::{normalize_relative, FileSystemWriter};
use crate::core::error::ProjectionResult;
use std::io::Write;
use std::path::Path;
use tracing::warn;

/// Marker printed before created directories.
const DIR_MARKER: &str = "+dir ";
/// Marker printed before written files.
const FILE_MARKER: &str = "+file";

/// A [`FileSystemWriter`] that reports successful creations to `out`.
pub struct ReportingWriter<W, O> {
    inner: W,
    out: O,
}

impl<W: FileSystemWriter, O: Write> ReportingWriter<W, O> {
    pub fn new(inner: W, out: O) -> Self {
        Self { inner, out }
    }

    /// Consumes the decorator, returning the wrapped writer and output sink.
    #[cfg(test)]
    pub fn into_parts(self) -> (W, O) {
        (self.inner, self.out)
    }

    fn readable_path(&self, path: &str) -> String {
        let root_name = self
            .inner
            .root()
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();
        let relative = normalize_relative(path);
        match (root_name.is_empty(), relative.is_empty()) {
            (_, true) => root_name,
            (true, false) => relative,
            (false, false) => format!("{}/{}", root_name, relative),
        }
    }

    fn report(&mut self, marker: &str, path: &str) {
        let line = format!("{} {}", marker, self.readable_path(path));
        if let Err(e) = writeln!(self.out, "{}", line) {
            warn!("Failed to report progress line '{}': {}", line, e);
        }
    }
}

impl<W: FileSystemWriter, O: Write> FileSystemWriter for ReportingWriter<W, O> {
    fn root(&self) -> &Path {
        self.inner.root()
    }

    fn ensure_directory(&mut self, path: &str, mode: u32) -> ProjectionResult<bool> {
        let created = self.inner.ensure_directory(path, mode)?;
        if created {
            self.report(DIR_MARKER, path);
        }
        Ok(created)
    }

    fn write_file(&mut self, path: &str, contents: &str) -> ProjectionResult<()> {
        self.inner.write_file(path, contents)?;
        self.report(FILE_MARKER, path);
        Ok(())
    }
}
