#![allow(unused_assignments)]

use std::path::PathBuf;

use miette::Diagnostic;
use thiserror::Error;

use crate::validate::ValidationError;

#[derive(Debug, Error, Diagnostic)]
pub enum ForgeError {
    #[error("Validation failed with {} error(s)", errors.len())]
    #[diagnostic(help("For usage information, run: forge new --help"))]
    Validation {
        #[related]
        errors: Vec<ValidationError>,
    },

    #[error("Template '{name}' not found")]
    #[diagnostic(help("Run `forge templates` to see the available templates"))]
    TemplateNotFound { name: String, available: Vec<String> },

    #[error("Template '{name}' is invalid: {reason}")]
    #[diagnostic(help("Check the YAML syntax of the template's template.yaml"))]
    InvalidTemplate { name: String, reason: String },

    #[error("Target directory '{}' already exists and is not empty", path.display())]
    #[diagnostic(help("Choose another artifact id or output directory"))]
    TargetNotEmpty { path: PathBuf },

    #[error("{tool} is not installed or not in PATH")]
    #[diagnostic(help("Install {tool} and make sure it is on your PATH"))]
    ToolchainNotFound { tool: String },

    #[error("Template files directory not found: {}", path.display())]
    #[diagnostic(help("File templates keep their sources in a 'files/' subdirectory (see fileTemplate.filesDir)"))]
    TemplateFilesMissing { path: PathBuf },

    #[error("Failed to render template file {file}")]
    #[diagnostic(help("Check your Tera template syntax"))]
    RenderError {
        file: String,
        #[source]
        source: tera::Error,
    },

    #[error("IO error: {context}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },

    #[error("{step} failed: {message}")]
    ExternalProcess { step: String, message: String },

    #[error("Templates directory not found: {}", path.display())]
    #[diagnostic(help("Set FORGE_HOME or `home` in the forge config file"))]
    TemplatesDirUnavailable { path: PathBuf },

    #[error("No templates available in {}", path.display())]
    #[diagnostic(help("Add a template directory with a template.yaml, or pass --template"))]
    NoTemplates { path: PathBuf },

    #[error("Failed to parse forge config at {}", path.display())]
    #[diagnostic(help("Check the TOML syntax in your forge config file"))]
    UserConfigParse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Prompt cancelled by user")]
    PromptCancelled,

    #[error("Operation cancelled")]
    Cancelled,
}

pub type Result<T> = std::result::Result<T, ForgeError>;
