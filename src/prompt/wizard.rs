use std::fmt;
use std::path::PathBuf;

use inquire::validator::{ErrorMessage, Validation};
use inquire::{Confirm, CustomUserError, Select, Text};

use crate::config::{TemplateDescriptor, TemplateKind};
use crate::error::{ForgeError, Result};
use crate::generator::ProjectParams;
use crate::output::Printer;
use crate::template::TemplateRegistry;
use crate::validate::{
    validate_artifact_id, validate_dotted_identifier, validate_module_path, validate_version,
    DottedField, ValidationError,
};

/// Values pre-filled into the prompts, usually whatever was given on the command line.
#[derive(Debug, Clone, Default)]
pub struct WizardDefaults {
    pub template: String,
    pub params: ProjectParams,
}

#[derive(Debug, Clone)]
pub struct WizardAnswers {
    pub template: TemplateDescriptor,
    pub params: ProjectParams,
}

/// Whether `forge new` should fall back to the wizard.
pub fn needs_wizard(
    interactive: bool,
    stdin_is_terminal: bool,
    kind: Option<TemplateKind>,
    params: &ProjectParams,
) -> bool {
    if interactive {
        return true;
    }
    if !stdin_is_terminal {
        return false;
    }
    params.artifact_id.is_empty()
        || (kind == Some(TemplateKind::Archetype) && params.group_id.is_empty())
}

struct TemplateChoice {
    name: String,
    description: String,
}

impl fmt::Display for TemplateChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.description.is_empty() {
            write!(f, "{}", self.name)
        } else {
            write!(f, "{} - {}", self.name, self.description)
        }
    }
}

type Check = fn(&str) -> std::result::Result<(), ValidationError>;

fn validator(check: Check) -> impl Fn(&str) -> std::result::Result<Validation, CustomUserError> + Clone {
    move |input: &str| {
        Ok(match check(input) {
            Ok(()) => Validation::Valid,
            Err(e) => Validation::Invalid(ErrorMessage::Custom(e.message)),
        })
    }
}

fn ask(prompt: Text<'_>) -> Result<String> {
    prompt
        .prompt()
        .map(|answer| answer.trim().to_string())
        .map_err(|_| ForgeError::PromptCancelled)
}

/// Walk the user through template selection and every parameter the template needs.
pub fn run_wizard(
    registry: &TemplateRegistry,
    defaults: &WizardDefaults,
    printer: &Printer,
) -> Result<WizardAnswers> {
    let mut templates = registry.list()?;
    if templates.is_empty() {
        return Err(ForgeError::NoTemplates {
            path: registry.templates_dir().to_path_buf(),
        });
    }
    templates.sort_by(|a, b| a.name.cmp(&b.name));

    let choices: Vec<TemplateChoice> = templates
        .iter()
        .map(|t| TemplateChoice {
            name: t.name.clone(),
            description: t.description.clone(),
        })
        .collect();
    let cursor = choices
        .iter()
        .position(|c| c.name == defaults.template)
        .unwrap_or(0);
    let picked = Select::new("Select a template:", choices)
        .with_starting_cursor(cursor)
        .prompt()
        .map_err(|_| ForgeError::PromptCancelled)?;

    let template = templates
        .into_iter()
        .find(|t| t.name == picked.name)
        .ok_or_else(|| ForgeError::TemplateNotFound {
            name: picked.name.clone(),
            available: Vec::new(),
        })?;
    let kind = template.resolved_kind().unwrap_or(TemplateKind::FileTemplate);
    let given = &defaults.params;

    let artifact_id = ask(
        Text::new("Enter project name (artifact-id):")
            .with_default(&given.artifact_id)
            .with_help_message("Lowercase letters, numbers, and hyphens. Must start with a letter.")
            .with_validator(validator(validate_artifact_id)),
    )?;

    let mut params = ProjectParams {
        artifact_id,
        output_dir: given.output_dir.clone(),
        ..Default::default()
    };

    if kind == TemplateKind::Archetype {
        params.group_id = ask(
            Text::new("Enter group ID:")
                .with_default(&given.group_id)
                .with_help_message("Maven groupId (e.g., com.example)")
                .with_validator(validator(|s| {
                    validate_dotted_identifier(DottedField::GroupId, s, true)
                })),
        )?;
    }

    let default_version = if given.version.is_empty() {
        kind.default_version()
    } else {
        given.version.as_str()
    };
    params.version = ask(
        Text::new("Enter version:")
            .with_default(default_version)
            .with_help_message("SemVer format (e.g., 1.0.0-SNAPSHOT)")
            .with_validator(validator(validate_version)),
    )?;

    match kind {
        TemplateKind::Archetype => {
            let default_package = if given.package.is_empty() {
                params.group_id.clone()
            } else {
                given.package.clone()
            };
            params.package = ask(
                Text::new("Enter package:")
                    .with_default(&default_package)
                    .with_help_message("Java package name (defaults to groupId)")
                    .with_validator(validator(|s| {
                        validate_dotted_identifier(DottedField::Package, s, false)
                    })),
            )?;
        }
        TemplateKind::FileTemplate => {
            let default_module = if given.module.is_empty() {
                params.artifact_id.clone()
            } else {
                given.module.clone()
            };
            params.module = ask(
                Text::new("Enter module path:")
                    .with_default(&default_module)
                    .with_help_message("e.g. github.com/example/my-service")
                    .with_validator(validator(validate_module_path)),
            )?;
        }
    }

    let default_output = given.output_dir.display().to_string();
    let output = ask(
        Text::new("Enter output directory:")
            .with_default(&default_output)
            .with_help_message("Directory where the project will be created"),
    )?;
    params.output_dir = if output.is_empty() {
        given.output_dir.clone()
    } else {
        PathBuf::from(output)
    };

    print_summary(printer, &template.name, kind, &params);

    let proceed = Confirm::new("Proceed with project creation?")
        .with_default(true)
        .prompt()
        .map_err(|_| ForgeError::PromptCancelled)?;
    if !proceed {
        return Err(ForgeError::PromptCancelled);
    }

    Ok(WizardAnswers { template, params })
}

fn print_summary(printer: &Printer, template: &str, kind: TemplateKind, params: &ProjectParams) {
    printer.line("");
    printer.line("Summary:");
    printer.line(format!("  Template:    {template}"));
    printer.line(format!("  Project:     {}", params.artifact_id));
    if kind == TemplateKind::Archetype {
        printer.line(format!("  Group ID:    {}", params.group_id));
    }
    printer.line(format!("  Version:     {}", params.version));
    match kind {
        TemplateKind::Archetype => printer.line(format!("  Package:     {}", params.package)),
        TemplateKind::FileTemplate => printer.line(format!("  Module:      {}", params.module)),
    }
    printer.line(format!(
        "  Output:      {}",
        params.output_dir.join(&params.artifact_id).display()
    ));
    printer.line("");
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn params(artifact_id: &str, group_id: &str) -> ProjectParams {
        ProjectParams {
            artifact_id: artifact_id.into(),
            group_id: group_id.into(),
            ..Default::default()
        }
    }

    #[rstest]
    #[case(true, false, Some(TemplateKind::FileTemplate), "svc", "", true)]
    #[case(false, false, Some(TemplateKind::FileTemplate), "", "", false)]
    #[case(false, true, Some(TemplateKind::FileTemplate), "", "", true)]
    #[case(false, true, Some(TemplateKind::FileTemplate), "svc", "", false)]
    #[case(false, true, Some(TemplateKind::Archetype), "svc", "", true)]
    #[case(false, true, Some(TemplateKind::Archetype), "svc", "com.acme", false)]
    #[case(false, true, None, "svc", "", false)]
    fn wizard_trigger(
        #[case] interactive: bool,
        #[case] tty: bool,
        #[case] kind: Option<TemplateKind>,
        #[case] artifact_id: &str,
        #[case] group_id: &str,
        #[case] expected: bool,
    ) {
        assert_eq!(
            needs_wizard(interactive, tty, kind, &params(artifact_id, group_id)),
            expected
        );
    }

    #[test]
    fn validators_surface_the_validation_message() {
        let check = validator(validate_artifact_id);
        assert!(matches!(check("my-api"), Ok(Validation::Valid)));
        match check("My_Api") {
            Ok(Validation::Invalid(ErrorMessage::Custom(msg))) => assert!(!msg.is_empty()),
            _ => panic!("expected an invalid result"),
        }
    }

    #[test]
    fn choice_label_includes_description() {
        let choice = TemplateChoice {
            name: "go-service".into(),
            description: "Go HTTP service".into(),
        };
        assert_eq!(choice.to_string(), "go-service - Go HTTP service");
    }
}
