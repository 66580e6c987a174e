//! # Projection Command Modules
//!
//! File: cli/src/commands/mod.rs
//!
//! ## Overview
//!
//! Aggregates the command groups of the Projection CLI so `main.rs` can route
//! to them.
//!
//! ## Command Groups
//!
//! - `generate`: Scaffolds PHP projects (`generate project`) and classes
//!   inside an existing project (`generate class`).
//!
//! Each group defines its own clap arguments and a handler function. Its
//! subcommands are declared in the group's own `mod.rs`, not here.
//!

/// Command group for generating projects and classes. Includes subcommands `project` and `class`.
pub mod generate;
