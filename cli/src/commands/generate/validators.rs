//! # Projection Parameter Validators
//!
//! File: cli/src/commands/generate/validators.rs
//!
//! ## Overview
//!
//! Syntactic checks for every value the `generate` commands accept. Each
//! validator returns the (possibly normalized) value or a
//! `ProjectionError::Validation` with a message meant for the user.
//!
//! [`Field`] names each parameter; [`validator_for`] maps a field to its
//! validation function. The non-interactive path calls the function directly,
//! the interactive path hands it to `Prompter::ask_and_validate` so invalid
//! answers are asked again.
//!
use crate::common::ui::prompts::Validator;
use crate::core::error::{ProjectionError, ProjectionResult};
use crate::core::project::LicenseKind;
use regex::Regex;
use std::sync::LazyLock;

static PROJECT_NAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9_-]+$").expect("project name pattern"));
static NAMESPACE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9_\\]+$").expect("namespace pattern"));
static EMAIL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(concat!(
        r"^[A-Za-z0-9_%+-]+(?:\.[A-Za-z0-9_%+-]+)*",
        r"@[A-Za-z0-9](?:[A-Za-z0-9-]*[A-Za-z0-9])?",
        r"(?:\.[A-Za-z0-9](?:[A-Za-z0-9-]*[A-Za-z0-9])?)+$",
    ))
    .expect("email pattern")
});
static LICENSE_YEARS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]{4}(?:-[0-9]{4})?$").expect("license years pattern"));
/// One segment of a class name: a PHP identifier.
static CLASS_SEGMENT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*$").expect("class segment pattern"));

/// Every user-supplied parameter that has a validation rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    ProjectName,
    Directory,
    Namespace,
    AuthorName,
    AuthorEmail,
    License,
    LicenseYears,
    ClassName,
}

impl Field {
    /// Name of the command-line option carrying this field.
    pub fn option_name(&self) -> &'static str {
        match self {
            Field::ProjectName | Field::ClassName => "name",
            Field::Directory => "dir",
            Field::Namespace => "namespace",
            Field::AuthorName => "author-name",
            Field::AuthorEmail => "author-email",
            Field::License => "license",
            Field::LicenseYears => "license-years",
        }
    }
}

/// The validation function for `field`.
pub fn validator_for(field: Field) -> Validator {
    match field {
        Field::ProjectName => validate_project_name,
        Field::Directory => validate_directory,
        Field::Namespace => validate_namespace,
        Field::AuthorName => validate_name,
        Field::AuthorEmail => validate_email,
        Field::License => validate_license,
        Field::LicenseYears => validate_license_years,
        Field::ClassName => validate_class_name,
    }
}

/// Validates `value` for `field`, or fails with `MissingOption` when absent.
pub fn require(field: Field, value: Option<&str>) -> ProjectionResult<String> {
    match value {
        Some(value) => validator_for(field)(value),
        None => Err(ProjectionError::MissingOption(
            field.option_name().to_string(),
        )),
    }
}

pub fn validate_project_name(name: &str) -> ProjectionResult<String> {
    if !PROJECT_NAME.is_match(name) {
        return Err(ProjectionError::validation(
            "A project's name can contain only alphanumeric characters, dashes and underscores.",
        ));
    }
    Ok(name.to_string())
}

/// Accepts `/` as a separator and normalizes it to `\`.
pub fn validate_namespace(namespace: &str) -> ProjectionResult<String> {
    let namespace = namespace.replace('/', "\\");
    if !NAMESPACE.is_match(&namespace) {
        return Err(ProjectionError::validation(
            "You must enter a valid PHP namespace.",
        ));
    }
    Ok(namespace)
}

pub fn validate_name(name: &str) -> ProjectionResult<String> {
    if name.trim().is_empty() {
        return Err(ProjectionError::validation(
            "You must enter the project author's name.",
        ));
    }
    Ok(name.to_string())
}

pub fn validate_email(email: &str) -> ProjectionResult<String> {
    if !EMAIL.is_match(email) {
        return Err(ProjectionError::validation(
            "You must enter a valid email address.",
        ));
    }
    Ok(email.to_string())
}

pub fn validate_license(license: &str) -> ProjectionResult<String> {
    license.parse::<LicenseKind>().map(|kind| kind.to_string())
}

/// A single year (`2024`) or a range (`2012-2024`).
pub fn validate_license_years(years: &str) -> ProjectionResult<String> {
    if !LICENSE_YEARS.is_match(years) {
        return Err(ProjectionError::validation(
            "License years must be a single year or a range.",
        ));
    }
    Ok(years.to_string())
}

pub fn validate_directory(directory: &str) -> ProjectionResult<String> {
    if directory.trim().is_empty() {
        return Err(ProjectionError::validation(
            "You must enter a valid directory name.",
        ));
    }
    Ok(directory.to_string())
}

/// Accepts `/` as a separator and normalizes it to `\`. Every segment must be
/// a PHP identifier, so the class path never leaves the source directory.
pub fn validate_class_name(class: &str) -> ProjectionResult<String> {
    let class = class.replace('/', "\\");
    if !class.split('\\').all(|segment| CLASS_SEGMENT.is_match(segment)) {
        return Err(ProjectionError::validation(
            "You must enter a valid class name.",
        ));
    }
    Ok(class)
}

// --- Unit Tests ---
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_project_name() {
        assert_eq!(validate_project_name("my-Blog_2").unwrap(), "my-Blog_2");
        assert!(validate_project_name("").is_err());
        assert!(validate_project_name("my blog").is_err());
        assert!(validate_project_name("blog!").is_err());
    }

    #[test]
    fn test_namespace_normalizes_slashes() {
        assert_eq!(validate_namespace("Acme/Blog").unwrap(), "Acme\\Blog");
        assert_eq!(validate_namespace("Acme\\Blog").unwrap(), "Acme\\Blog");
        assert!(validate_namespace("Acme Blog").is_err());
        assert!(validate_namespace("").is_err());
    }

    #[test]
    fn test_email() {
        assert!(validate_email("jane@example.com").is_ok());
        assert!(validate_email("jane.doe+php@mail.example.org").is_ok());
        assert!(validate_email("not-an-email").is_err());
        assert!(validate_email("jane@localhost").is_err());
        assert!(validate_email("@example.com").is_err());
        assert!(validate_email("jane@@example.com").is_err());
        assert!(validate_email("jane doe@example.com").is_err());
        assert!(validate_email("jane@example..com").is_err());
        assert!(validate_email("jane..doe@example.com").is_err());
        assert!(validate_email("jane@-example.com").is_err());
    }

    #[test]
    fn test_license() {
        assert_eq!(validate_license("lgpl").unwrap(), "lgpl");
        let err = validate_license("apache").unwrap_err();
        assert!(err.to_string().contains("gpl, mit, lgpl"));
    }

    #[test]
    fn test_license_years() {
        assert!(validate_license_years("2024").is_ok());
        assert!(validate_license_years("2012-2024").is_ok());
        assert!(validate_license_years("24").is_err());
        assert!(validate_license_years("2012-").is_err());
        assert!(validate_license_years("2012-2024-2025").is_err());
        assert!(validate_license_years("２０２４").is_err());
    }

    #[test]
    fn test_directory_and_author_name() {
        assert!(validate_directory("src").is_ok());
        assert!(validate_directory("").is_err());
        assert!(validate_name("Jane").is_ok());
        assert!(validate_name(" ").is_err());
    }

    #[test]
    fn test_class_name() {
        assert_eq!(validate_class_name("Post/Repository").unwrap(), "Post\\Repository");
        assert_eq!(validate_class_name("Post").unwrap(), "Post");
        assert!(validate_class_name("").is_err());
        assert!(validate_class_name("Post\\").is_err());
    }

    #[test]
    fn test_class_name_segments_must_be_identifiers() {
        assert_eq!(validate_class_name("_Internal/V2Post").unwrap(), "_Internal\\V2Post");
        for name in ["../../Evil", "Post/../../Evil", "./Post", "Foo Bar", "1Foo", "Post-Repo", "Post.php"] {
            assert!(validate_class_name(name).is_err(), "{name} should be rejected");
        }
    }

    #[test]
    fn test_table_and_require() {
        assert!(validator_for(Field::AuthorEmail)("not-an-email").is_err());
        assert_eq!(
            validator_for(Field::Namespace)("A/B").unwrap(),
            "A\\B"
        );
        let err = require(Field::AuthorEmail, None).unwrap_err();
        assert_eq!(
            err.to_string(),
            "The \"author-email\" option must be provided."
        );
        assert_eq!(require(Field::License, Some("mit")).unwrap(), "mit");
    }
}
