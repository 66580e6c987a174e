//! # Projection CLI Integration Test Common Helpers
//!
//! File: cli/tests/common.rs
//!
//! ## Overview
//!
//! Shared helpers for the integration tests in `cli/tests/`. Each test file
//! declares `mod common;` and builds its commands through [`projection_cmd`].
//!

// Different test files use different helpers.
#![allow(dead_code)]

pub use assert_cmd::Command;
use std::path::Path;

/// A `projection` command isolated from the user's real configuration.
///
/// `PROJECTION_CONFIG` points at a file that does not exist, so only the
/// built-in defaults apply.
pub fn projection_cmd() -> Command {
    let mut cmd = Command::cargo_bin("projection").expect("Failed to find projection binary for testing");
    cmd.env("PROJECTION_CONFIG", "/nonexistent/projection/config.toml")
        .env_remove("RUST_LOG");
    cmd
}

/// Like [`projection_cmd`], but running in `dir` with a given user configuration.
pub fn projection_cmd_with_config(dir: &Path, config_toml: &str) -> Command {
    let config_path = dir.join("projection-config.toml");
    std::fs::write(&config_path, config_toml).expect("Failed to write test configuration");
    let mut cmd = projection_cmd();
    cmd.env("PROJECTION_CONFIG", &config_path);
    cmd
}

/// Arguments generating the `Blog` project without prompts.
pub fn blog_project_args() -> Vec<&'static str> {
    vec![
        "-n",
        "generate",
        "project",
        "--name",
        "Blog",
        "--namespace",
        "Acme/Blog",
        "--author-name",
        "Jane Doe",
        "--author-email",
        "jane@example.com",
        "--license-years",
        "2024",
    ]
}
