//! # Projection Common Utilities (`common`)
//!
//! File: cli/src/common/mod.rs
//!
//! ## Overview
//!
//! Shared utilities used by the command handlers and the core components,
//! kept apart from command-specific logic (`commands::`) and from the core
//! domain (`core::`).
//!
//! - **`fs`**: The `FileSystemWriter` trait and its disk implementation. Every
//!   write side effect of the tool goes through it.
//! - **`ui`**: Terminal output: progress lines and interactive prompts.
//!

/// Filesystem writing and reading.
pub mod fs;
/// Progress reporting and prompts.
pub mod ui;
