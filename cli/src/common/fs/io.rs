//! # Projection Filesystem I/O Operations
//!
//! File: cli/src/common/fs/io.rs
//!
//! ## Overview
//!
//! This module owns every write side effect Projection performs. It defines
//! the [`FileSystemWriter`] trait, the two primitive operations a generated
//! project is built from, and [`DiskWriter`], the implementation that applies
//! them below a project root on the real filesystem.
//!
//! ## Architecture
//!
//! - **`ensure_directory`**: Idempotent directory creation. Reports `false`
//!   without touching anything when the directory already exists, `true` after
//!   creating it along with any missing ancestors.
//! - **`write_file`**: Ensures the parent directory (through the writer's own
//!   `ensure_directory`, so decorators never see it) and then overwrites the
//!   file unconditionally.
//! - **`read_file_to_string`**: Small read helper with error context, used when
//!   loading configuration files.
//!
//! Paths handed to a writer are relative to its root and use `/` as the
//! separator. Leading, trailing and repeated separators are insignificant; an
//! empty path denotes the root itself. `.` and `..` segments are rejected.
//!
//! ## Usage
//!
//! ```rust
//! use crate::common::fs::io::{DiskWriter, FileSystemWriter, DEFAULT_DIR_MODE};
//!
//! let mut writer = DiskWriter::new("/home/me/code/blog");
//! writer.ensure_directory("/src/Acme/Blog/", DEFAULT_DIR_MODE)?;
//! writer.write_file("README.md", "# Blog\n")?;
//! ```
//!
use crate::core::error::{ProjectionError, ProjectionResult, Result};
use anyhow::Context;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Permission bits applied to directories created by the writer (before umask).
pub const DEFAULT_DIR_MODE: u32 = 0o775;

/// The write-side primitives used to materialize a project.
pub trait FileSystemWriter {
    /// Directory every relative path is resolved against.
    fn root(&self) -> &Path;

    /// Creates `path` (and missing ancestors) unless it already is a directory.
    ///
    /// Returns `Ok(true)` if something was created and `Ok(false)` if the
    /// directory already existed.
    fn ensure_directory(&mut self, path: &str, mode: u32) -> ProjectionResult<bool>;

    /// Writes `contents` to `path`, replacing any existing file.
    fn write_file(&mut self, path: &str, contents: &str) -> ProjectionResult<()>;
}

/// Strips leading, trailing and repeated `/` separators from a relative path.
pub fn normalize_relative(path: &str) -> String {
    path.split('/')
        .filter(|segment| !segment.is_empty())
        .collect::<Vec<_>>()
        .join("/")
}

/// Rejects `.` and `..` segments, which would let a path leave the root.
fn check_within_root(path: &str) -> io::Result<()> {
    if path.split('/').any(|segment| segment == "." || segment == "..") {
        return Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            "path must stay inside the root directory",
        ));
    }
    Ok(())
}

/// Parent of a normalized relative path (`""` for top-level entries).
fn parent_of(path: &str) -> &str {
    match path.rfind('/') {
        Some(idx) => &path[..idx],
        None => "",
    }
}

/// Writes below a fixed root directory on the local filesystem.
#[derive(Debug, Clone)]
pub struct DiskWriter {
    root: PathBuf,
}

impl DiskWriter {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Absolute location of a path relative to the root.
    pub fn resolve(&self, path: &str) -> PathBuf {
        let normalized = normalize_relative(path);
        if normalized.is_empty() {
            self.root.clone()
        } else {
            self.root.join(normalized)
        }
    }
}

impl FileSystemWriter for DiskWriter {
    fn root(&self) -> &Path {
        &self.root
    }

    fn ensure_directory(&mut self, path: &str, mode: u32) -> ProjectionResult<bool> {
        let directory = normalize_relative(path);
        check_within_root(&directory).map_err(|source| ProjectionError::DirectoryCreation {
            directory: directory.clone(),
            root: self.root.clone(),
            source,
        })?;
        let full_path = self.resolve(&directory);

        if full_path.is_dir() {
            debug!("Directory already exists: {}", full_path.display());
            return Ok(false);
        }

        create_dir_all_with_mode(&full_path, mode).map_err(|source| {
            ProjectionError::DirectoryCreation {
                directory: directory.clone(),
                root: self.root.clone(),
                source,
            }
        })?;
        info!("Created directory: {}", full_path.display());
        Ok(true)
    }

    fn write_file(&mut self, path: &str, contents: &str) -> ProjectionResult<()> {
        let relative = normalize_relative(path);
        check_within_root(&relative).map_err(|source| ProjectionError::FileWrite {
            path: relative.clone(),
            root: self.root.clone(),
            source,
        })?;
        let full_path = self.resolve(&relative);

        // Called on self, so decorators never see the parent directory.
        self.ensure_directory(parent_of(&relative), DEFAULT_DIR_MODE)
            .map_err(|err| match err {
                ProjectionError::DirectoryCreation { source, .. } => ProjectionError::FileWrite {
                    path: relative.clone(),
                    root: self.root.clone(),
                    source,
                },
                other => other,
            })?;

        fs::write(&full_path, contents).map_err(|source| ProjectionError::FileWrite {
            path: relative.clone(),
            root: self.root.clone(),
            source,
        })?;
        info!("Wrote file: {}", full_path.display());
        Ok(())
    }
}

#[cfg(unix)]
fn create_dir_all_with_mode(path: &Path, mode: u32) -> io::Result<()> {
    use std::os::unix::fs::DirBuilderExt;
    fs::DirBuilder::new().recursive(true).mode(mode).create(path)
}

#[cfg(not(unix))]
fn create_dir_all_with_mode(path: &Path, _mode: u32) -> io::Result<()> {
    fs::DirBuilder::new().recursive(true).create(path)
}

/// Reads the entire content of a file into a string, with the path in the
/// error context.
pub fn read_file_to_string(path: &Path) -> Result<String> {
    fs::read_to_string(path).with_context(|| format!("Failed to read file {:?}", path))
}

// --- Unit Tests ---
#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_normalize_relative() {
        assert_eq!(normalize_relative("/src/Acme/"), "src/Acme");
        assert_eq!(normalize_relative("//a//b"), "a/b");
        assert_eq!(normalize_relative("/"), "");
        assert_eq!(normalize_relative(""), "");
        assert_eq!(normalize_relative("README.md"), "README.md");
    }

    /// `ensure_directory` creates missing ancestors and reports the creation.
    #[test]
    fn test_ensure_directory_creates_new() -> Result<()> {
        let base_dir = tempdir()?;
        let mut writer = DiskWriter::new(base_dir.path());
        let created = writer.ensure_directory("/new/subdir/", DEFAULT_DIR_MODE)?;
        assert!(created);
        assert!(base_dir.path().join("new/subdir").is_dir());
        Ok(())
    }

    /// A second call is a no-op that reports `false`.
    #[test]
    fn test_ensure_directory_already_exists() -> Result<()> {
        let base_dir = tempdir()?;
        fs::create_dir(base_dir.path().join("existing"))?;
        let mut writer = DiskWriter::new(base_dir.path());
        assert!(!writer.ensure_directory("existing", DEFAULT_DIR_MODE)?);
        assert!(!writer.ensure_directory("", DEFAULT_DIR_MODE)?);
        Ok(())
    }

    /// The root itself is created when it does not exist yet.
    #[test]
    fn test_ensure_directory_creates_missing_root() -> Result<()> {
        let base_dir = tempdir()?;
        let mut writer = DiskWriter::new(base_dir.path().join("blog"));
        assert!(writer.ensure_directory("/", DEFAULT_DIR_MODE)?);
        assert!(base_dir.path().join("blog").is_dir());
        Ok(())
    }

    #[test]
    fn test_ensure_directory_path_is_file() -> Result<()> {
        let base_dir = tempdir()?;
        fs::write(base_dir.path().join("a_file.txt"), "hello")?;
        let mut writer = DiskWriter::new(base_dir.path());
        let err = writer
            .ensure_directory("a_file.txt/child", DEFAULT_DIR_MODE)
            .unwrap_err();
        match err {
            ProjectionError::DirectoryCreation { directory, .. } => {
                assert_eq!(directory, "a_file.txt/child")
            }
            other => panic!("unexpected error: {other}"),
        }
        Ok(())
    }

    #[cfg(unix)]
    #[test]
    fn test_ensure_directory_applies_mode() -> Result<()> {
        use std::os::unix::fs::PermissionsExt;
        let base_dir = tempdir()?;
        let mut writer = DiskWriter::new(base_dir.path());
        writer.ensure_directory("locked", 0o700)?;
        let mode = fs::metadata(base_dir.path().join("locked"))?
            .permissions()
            .mode();
        assert_eq!(mode & 0o777, 0o700);
        Ok(())
    }

    /// Writing creates parents, and a second write replaces the content.
    #[test]
    fn test_write_file_creates_parents_and_overwrites() -> Result<()> {
        let base_dir = tempdir()?;
        let mut writer = DiskWriter::new(base_dir.path());
        writer.write_file("/docs/guide/intro.md", "first")?;
        writer.write_file("docs/guide/intro.md", "second")?;
        let content = read_file_to_string(&base_dir.path().join("docs/guide/intro.md"))?;
        assert_eq!(content, "second");
        Ok(())
    }

    #[test]
    fn test_write_file_onto_directory_fails() -> Result<()> {
        let base_dir = tempdir()?;
        fs::create_dir(base_dir.path().join("taken"))?;
        let mut writer = DiskWriter::new(base_dir.path());
        let err = writer.write_file("taken", "contents").unwrap_err();
        assert!(matches!(err, ProjectionError::FileWrite { ref path, .. } if path == "taken"));
        Ok(())
    }

    #[test]
    fn test_write_file_under_file_fails() -> Result<()> {
        let base_dir = tempdir()?;
        fs::write(base_dir.path().join("LICENSE"), "text")?;
        let mut writer = DiskWriter::new(base_dir.path());
        let err = writer.write_file("LICENSE/inner.txt", "x").unwrap_err();
        assert!(matches!(err, ProjectionError::FileWrite { .. }));
        Ok(())
    }

    #[test]
    fn test_paths_leaving_the_root_are_rejected() -> Result<()> {
        let base_dir = tempdir()?;
        let mut writer = DiskWriter::new(base_dir.path().join("blog"));

        let err = writer.write_file("src/../../Evil.php", "<?php").unwrap_err();
        match err {
            ProjectionError::FileWrite { path, source, .. } => {
                assert_eq!(path, "src/../../Evil.php");
                assert_eq!(source.kind(), io::ErrorKind::InvalidInput);
            }
            other => panic!("unexpected error: {other}"),
        }
        let err = writer.ensure_directory("../outside", DEFAULT_DIR_MODE).unwrap_err();
        assert!(matches!(err, ProjectionError::DirectoryCreation { .. }));

        assert!(!base_dir.path().join("Evil.php").exists());
        assert!(!base_dir.path().join("outside").exists());
        assert!(!base_dir.path().join("blog").exists());
        Ok(())
    }

    #[test]
    fn test_read_file_not_found() -> Result<()> {
        let base_dir = tempdir()?;
        let result = read_file_to_string(&base_dir.path().join("nonexistent.txt"));
        assert!(result.is_err());
        Ok(())
    }
}
