//! # Projection UI Utilities Module (`common::ui`)
//!
//! File: cli/src/common/ui/mod.rs
//!
//! ## Overview
//!
//! Terminal-facing helpers used by the `generate` commands.
//!
//! - **`progress`**: `ReportingWriter`, a `FileSystemWriter` decorator that
//!   prints `+dir` / `+file` lines for every directory and file it creates.
//! - **`prompts`**: `Prompter`, the section banners, validated questions and
//!   confirmations used in interactive mode.
//!
//! ```rust
//! use crate::common::ui::{progress::ReportingWriter, prompts::Prompter};
//!
//! let mut writer = ReportingWriter::new(DiskWriter::new(root), std::io::stdout());
//! let mut prompter = Prompter::stdio();
//! if !prompter.confirm("Do you confirm generation", true)? {
//!     return Ok(Completion::Aborted);
//! }
//! ```
//!

/// Progress lines for created directories and files.
pub mod progress;
/// Interactive questions and confirmations.
pub mod prompts;
