//! # Projection Filesystem Utilities (`common::fs`)
//!
//! File: cli/src/common/fs/mod.rs
//!
//! ## Overview
//!
//! Filesystem access for Projection. All write side effects go through the
//! [`io::FileSystemWriter`] trait so that the structure materializer stays
//! independent of the disk and can be decorated (see `common::ui::progress`).
//!
//! ## Architecture
//!
//! - **`io`**: The `FileSystemWriter` trait, the rooted `DiskWriter`
//!   implementation, path normalization and a read helper.
//!
//! ```rust
//! use crate::common::fs::io::{DiskWriter, FileSystemWriter, DEFAULT_DIR_MODE};
//!
//! let mut writer = DiskWriter::new(project_root);
//! writer.ensure_directory("src", DEFAULT_DIR_MODE)?;
//! ```
//!

/// The writer trait, its disk implementation and I/O helpers.
pub mod io;
