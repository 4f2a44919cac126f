#![allow(unused_assignments)]

//! Format checks for the naming and versioning parameters of `forge new`.
//!
//! Every check is a pure function of its input. [`validate_all`] runs the
//! checks relevant to a template flavor and returns every violation, never
//! just the first.

use std::fmt;
use std::sync::OnceLock;

use miette::Diagnostic;
use regex_lite::Regex;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// A mandatory value was left empty.
    Required,
    /// A value is present but does not match its format.
    InvalidFormat,
}

/// One violated parameter. Returned as a value so callers can batch them.
#[derive(Debug, Clone, PartialEq, Eq, Error, Diagnostic)]
#[error("{field}: {message}")]
pub struct ValidationError {
    pub field: Field,
    pub value: String,
    pub kind: ValidationErrorKind,
    pub message: String,
    #[help]
    pub help: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    ArtifactId,
    GroupId,
    Version,
    Package,
    Module,
}

impl Field {
    pub fn as_str(self) -> &'static str {
        match self {
            Field::ArtifactId => "artifact-id",
            Field::GroupId => "group-id",
            Field::Version => "version",
            Field::Package => "package",
            Field::Module => "module",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Validation profile selected by the template kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flavor {
    /// Archetype templates: a dotted group id is required, the package is optional.
    GroupAndPackage,
    /// File templates: an optional module path.
    ModulePath,
}

/// Which dotted identifier is being checked; selects the messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DottedField {
    GroupId,
    Package,
}

impl DottedField {
    fn field(self) -> Field {
        match self {
            DottedField::GroupId => Field::GroupId,
            DottedField::Package => Field::Package,
        }
    }

    fn label(self) -> &'static str {
        match self {
            DottedField::GroupId => "groupId",
            DottedField::Package => "package",
        }
    }

    fn help(self) -> &'static str {
        match self {
            DottedField::GroupId => "groupId must be a valid Maven groupId (e.g., com.example)",
            DottedField::Package => {
                "package must be a valid Java package name (e.g., com.example.project)"
            }
        }
    }
}

/// The parameter set shared by every flavor. Empty strings mean "not given".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParameterSet<'a> {
    pub artifact_id: &'a str,
    pub group_id: &'a str,
    pub version: &'a str,
    pub package: &'a str,
    pub module: &'a str,
}

fn artifact_id_pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[a-z][a-z0-9-]*$").expect("valid regex"))
}

fn dotted_identifier_pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[a-z][a-z0-9]*(\.[a-z][a-z0-9]*)*$").expect("valid regex"))
}

fn version_pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^[0-9]+\.[0-9]+\.[0-9]+(-[a-zA-Z0-9]+)?$").expect("valid regex")
    })
}

fn module_path_pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^[A-Za-z0-9][A-Za-z0-9._~-]*(/[A-Za-z0-9._~-]+)*$").expect("valid regex")
    })
}

fn invalid(field: Field, value: &str, message: String, help: &str) -> ValidationError {
    ValidationError {
        field,
        value: value.to_string(),
        kind: ValidationErrorKind::InvalidFormat,
        message,
        help: help.to_string(),
    }
}

fn required(field: Field, message: &str, help: &str) -> ValidationError {
    ValidationError {
        field,
        value: String::new(),
        kind: ValidationErrorKind::Required,
        message: message.to_string(),
        help: help.to_string(),
    }
}

/// The project name: lowercase letters, digits and hyphens, starting with a letter.
pub fn validate_artifact_id(value: &str) -> Result<(), ValidationError> {
    if value.is_empty() {
        return Err(required(
            Field::ArtifactId,
            "artifact-id is required",
            "Provide a project name using -a or --artifact-id",
        ));
    }
    if !artifact_id_pattern().is_match(value) {
        return Err(invalid(
            Field::ArtifactId,
            value,
            format!("invalid artifactId '{value}'"),
            "artifactId must be lowercase letters, numbers, and hyphens (e.g., my-project)",
        ));
    }
    Ok(())
}

/// Dot-separated lowercase segments (`com.example`).
///
/// An empty optional value is skipped; the caller fills it from a fallback.
pub fn validate_dotted_identifier(
    which: DottedField,
    value: &str,
    is_required: bool,
) -> Result<(), ValidationError> {
    if value.is_empty() {
        if !is_required {
            return Ok(());
        }
        return Err(match which {
            DottedField::GroupId => required(
                Field::GroupId,
                "group-id is required for Java templates",
                "Provide a Maven groupId using -g or --group-id",
            ),
            DottedField::Package => required(
                Field::Package,
                "package is required",
                "Provide a package using -p or --package",
            ),
        });
    }
    if !dotted_identifier_pattern().is_match(value) {
        return Err(invalid(
            which.field(),
            value,
            format!("invalid {} '{value}'", which.label()),
            which.help(),
        ));
    }
    Ok(())
}

/// `MAJOR.MINOR.PATCH` with an optional `-TAG`. Empty is accepted since a
/// default is applied downstream.
pub fn validate_version(value: &str) -> Result<(), ValidationError> {
    if value.is_empty() {
        return Ok(());
    }
    if !version_pattern().is_match(value) {
        return Err(invalid(
            Field::Version,
            value,
            format!("invalid version '{value}'"),
            "version must be in SemVer format (e.g., 1.0.0-SNAPSHOT)",
        ));
    }
    Ok(())
}

/// Slash-separated module path (`github.com/acme/my-api`). Empty defaults to
/// the artifact id.
pub fn validate_module_path(value: &str) -> Result<(), ValidationError> {
    if value.is_empty() {
        return Ok(());
    }
    if !module_path_pattern().is_match(value) {
        return Err(invalid(
            Field::Module,
            value,
            format!("invalid module path '{value}'"),
            "module must be a slash-separated path without spaces (e.g., github.com/example/my-service)",
        ));
    }
    Ok(())
}

/// Run every check relevant to `flavor` and collect all violations.
pub fn validate_all(params: &ParameterSet<'_>, flavor: Flavor) -> Vec<ValidationError> {
    let mut checks = vec![validate_artifact_id(params.artifact_id)];

    match flavor {
        Flavor::GroupAndPackage => {
            checks.push(validate_dotted_identifier(
                DottedField::GroupId,
                params.group_id,
                true,
            ));
            checks.push(validate_version(params.version));
            checks.push(validate_dotted_identifier(
                DottedField::Package,
                params.package,
                false,
            ));
        }
        Flavor::ModulePath => {
            checks.push(validate_version(params.version));
            checks.push(validate_module_path(params.module));
        }
    }

    checks.into_iter().filter_map(|r| r.err()).collect()
}
