//! # Projection Generate Command Integration Tests
//!
//! File: cli/tests/generate.rs
//!
//! ## Overview
//!
//! Runs the `projection` binary against temporary directories and checks the
//! generated layout, the progress lines, and the failure modes of
//! `generate project` and `generate class`. Every test passes `-n` (and stdin
//! is never a terminal under `assert_cmd`), so no prompt is shown.
//!

mod common;
use common::{blog_project_args, projection_cmd, projection_cmd_with_config};
use predicates::prelude::*;
use std::fs;
use tempfile::tempdir;

#[test]
fn test_generate_project_then_class() {
    let cwd = tempdir().unwrap();

    projection_cmd()
        .current_dir(cwd.path())
        .args(blog_project_args())
        .assert()
        .success()
        .stdout(predicate::str::contains("+dir  Blog/src/Acme/Blog"))
        .stdout(predicate::str::contains("+file Blog/.projection.toml"))
        .stdout(predicate::str::contains("+file Blog/tests/Acme/Blog/Tests/TestCase.php"))
        .stdout(predicate::str::contains("Project Blog created in Blog."));

    let root = cwd.path().join("Blog");
    for dir in ["src/Acme/Blog", "doc", "tests/Acme/Blog/Tests"] {
        assert!(root.join(dir).is_dir(), "missing directory {}", dir);
    }
    let config = fs::read_to_string(root.join(".projection.toml")).unwrap();
    assert!(config.contains("namespace = 'Acme\\Blog'") || config.contains("namespace = \"Acme\\\\Blog\""));
    assert!(config.contains("[tests]"));
    let license = fs::read_to_string(root.join("LICENSE")).unwrap();
    assert!(license.contains("Copyright (c) 2024 Jane Doe"));
    assert!(root.join("README.md").is_file());
    assert!(root.join("phpunit.xml.dist").is_file());

    projection_cmd()
        .current_dir(&root)
        .args(["-n", "g", "class", "--name", "Post/Repository"])
        .assert()
        .success()
        .stdout(predicate::str::contains("+file Blog/src/Acme/Blog/Post/Repository.php"))
        .stdout(predicate::str::contains(
            "Class Post\\Repository has been created in src/Acme/Blog/Post/Repository.php.",
        ));

    let class = fs::read_to_string(root.join("src/Acme/Blog/Post/Repository.php")).unwrap();
    assert!(class.contains("namespace Acme\\Blog\\Post;"));
    assert!(class.contains("class Repository"));
    let test = fs::read_to_string(root.join("tests/Acme/Blog/Tests/Post/RepositoryTest.php")).unwrap();
    assert!(test.contains("namespace Acme\\Blog\\Tests\\Post;"));
    assert!(test.contains("private $repository;"));
}

#[test]
fn test_generate_project_without_tests() {
    let cwd = tempdir().unwrap();
    let mut args = blog_project_args();
    args.extend(["--no-tests", "--dir", "blog-app", "--license", "gpl", "--docs-dir", "docs"]);

    projection_cmd()
        .current_dir(cwd.path())
        .args(args)
        .assert()
        .success()
        .stdout(predicate::str::contains("Project Blog created in blog-app."))
        .stdout(predicate::str::contains("phpunit").not());

    let root = cwd.path().join("blog-app");
    assert!(root.join("docs").is_dir());
    assert!(!root.join("doc").exists());
    assert!(!root.join("tests").exists());
    let config = fs::read_to_string(root.join(".projection.toml")).unwrap();
    assert!(config.contains("tests = false"));
    assert!(config.contains("type = \"gpl\""));

    projection_cmd()
        .current_dir(&root)
        .args(["-n", "generate", "class", "--name", "Post"])
        .assert()
        .success();
    assert!(root.join("src/Acme/Blog/Post.php").is_file());
    assert!(!root.join("tests").exists());
}

#[test]
fn test_invalid_email_fails_before_writing() {
    let cwd = tempdir().unwrap();

    projection_cmd()
        .current_dir(cwd.path())
        .args([
            "-n",
            "generate",
            "project",
            "--name",
            "Blog",
            "--author-name",
            "Jane Doe",
            "--author-email",
            "not-an-email",
        ])
        .assert()
        .code(1)
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("You must enter a valid email address."));

    assert_eq!(fs::read_dir(cwd.path()).unwrap().count(), 0);
}

#[test]
fn test_missing_required_option() {
    let cwd = tempdir().unwrap();

    projection_cmd()
        .current_dir(cwd.path())
        .args(["-n", "generate", "project", "--name", "Blog"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains(
            "The \"author-name\" option must be provided.",
        ));
}

#[test]
fn test_non_terminal_stdin_is_not_interactive() {
    let cwd = tempdir().unwrap();

    projection_cmd()
        .current_dir(cwd.path())
        .args(["generate", "project"])
        .write_stdin("Blog\n")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("The \"name\" option must be provided."));
}

#[test]
fn test_generate_class_outside_project() {
    let cwd = tempdir().unwrap();
    fs::create_dir(cwd.path().join(".git")).unwrap();

    projection_cmd()
        .current_dir(cwd.path())
        .args(["-n", "generate", "class", "--name", "Post"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("This is not a project directory."));
}

#[test]
fn test_regenerating_project_is_idempotent_for_directories() {
    let cwd = tempdir().unwrap();
    projection_cmd()
        .current_dir(cwd.path())
        .args(blog_project_args())
        .assert()
        .success();

    projection_cmd()
        .current_dir(cwd.path())
        .args(blog_project_args())
        .assert()
        .success()
        .stdout(predicate::str::contains("+dir").not())
        .stdout(predicate::str::contains("+file Blog/README.md"));
}

#[test]
fn test_user_config_defaults_and_template_overrides() {
    let cwd = tempdir().unwrap();
    let templates = cwd.path().join("templates/txt");
    fs::create_dir_all(&templates).unwrap();
    fs::write(
        templates.join("README.md.tera"),
        "# {{ config.project.name }} by {{ config.author.name }}\n",
    )
    .unwrap();
    let config = format!(
        "[defaults]\nauthor_name = \"Config Author\"\nauthor_email = \"config@example.com\"\nsrc_dir = \"lib\"\n\n[templates]\ndirectory = \"{}\"\n",
        cwd.path().join("templates").display()
    );

    projection_cmd_with_config(cwd.path(), &config)
        .current_dir(cwd.path())
        .args(["-n", "generate", "project", "--name", "Shop"])
        .assert()
        .success();

    let root = cwd.path().join("Shop");
    assert!(root.join("lib/Shop").is_dir());
    assert_eq!(
        fs::read_to_string(root.join("README.md")).unwrap(),
        "# Shop by Config Author\n"
    );
    let settings = fs::read_to_string(root.join(".projection.toml")).unwrap();
    assert!(settings.contains("config@example.com"));
}
