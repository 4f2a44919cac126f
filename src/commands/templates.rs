use console::style;
use forge::config::schema::ParameterDef;
use forge::{ForgeConfig, Printer, TemplateDescriptor, TemplateRegistry};
use miette::Result;

pub fn run(config: &ForgeConfig, printer: &Printer, long: bool) -> Result<()> {
    let registry = TemplateRegistry::new(&config.templates_dir);
    let mut templates = registry.list()?;
    templates.sort_by(|a, b| a.name.cmp(&b.name));

    if templates.is_empty() {
        printer.warning(format!(
            "No templates found in {}",
            registry.templates_dir().display()
        ));
        return Ok(());
    }

    let rows: Vec<Vec<String>> = templates
        .iter()
        .map(|t| {
            vec![
                t.name.clone(),
                t.kind_label().to_string(),
                t.description.clone(),
            ]
        })
        .collect();
    printer.table(&["NAME", "TYPE", "DESCRIPTION"], &rows);

    if long {
        for template in &templates {
            print_details(printer, template);
        }
    }
    Ok(())
}

fn print_details(printer: &Printer, template: &TemplateDescriptor) {
    printer.line("");
    let version = if template.version.is_empty() {
        String::new()
    } else {
        format!(" {}", style(format!("v{}", template.version)).dim())
    };
    printer.line(format!("{}{version}", style(&template.name).bold()));

    let stack = stack_summary(template);
    if !stack.is_empty() {
        printer.line(format!("  stack:      {stack}"));
    }

    for (label, params) in [
        ("required", &template.parameters.required),
        ("optional", &template.parameters.optional),
    ] {
        if params.is_empty() {
            continue;
        }
        printer.line(format!("  {label}:"));
        for param in params {
            printer.line(format!("    {}", describe_parameter(param)));
        }
    }

    if !template.modules.is_empty() {
        printer.line("  modules:");
        for module in &template.modules {
            if module.description.is_empty() {
                printer.line(format!("    {}", module.name));
            } else {
                printer.line(format!("    {:<16} {}", module.name, module.description));
            }
        }
    }
}

fn stack_summary(template: &TemplateDescriptor) -> String {
    let stack = &template.stack;
    let mut parts = Vec::new();
    if !stack.language.is_empty() {
        let runtime = if !stack.jdk.is_empty() {
            format!(" (JDK {})", stack.jdk)
        } else if !stack.go_version.is_empty() {
            format!(" {}", stack.go_version)
        } else {
            String::new()
        };
        parts.push(format!("{}{runtime}", stack.language));
    }
    if !stack.framework.is_empty() {
        let mut framework = stack.framework.clone();
        if !stack.framework_version.is_empty() {
            framework.push(' ');
            framework.push_str(&stack.framework_version);
        }
        parts.push(framework);
    }
    if !stack.build_tool.is_empty() {
        parts.push(stack.build_tool.clone());
    }
    parts.join(", ")
}

fn describe_parameter(param: &ParameterDef) -> String {
    let mut line = format!("{:<16}", param.name);
    if !param.description.is_empty() {
        line.push(' ');
        line.push_str(&param.description);
    }
    if !param.default.is_empty() {
        line.push_str(&format!(" [default: {}]", param.default));
    }
    if !param.pattern.is_empty() {
        line.push_str(&format!(" ({})", param.pattern));
    }
    line.trim_end().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stack_summary_joins_known_parts() {
        let template: TemplateDescriptor = serde_yaml::from_str(
            "name: j\nstack:\n  language: java\n  jdk: \"21\"\n  framework: spring-boot\n  frameworkVersion: 3.2.0\n  buildTool: maven\n",
        )
        .unwrap();
        assert_eq!(
            stack_summary(&template),
            "java (JDK 21), spring-boot 3.2.0, maven"
        );
    }

    #[test]
    fn parameter_line_shows_default_and_pattern() {
        let param = ParameterDef {
            name: "version".into(),
            description: "Project version".into(),
            pattern: String::new(),
            default: "1.0.0-SNAPSHOT".into(),
        };
        assert_eq!(
            describe_parameter(&param),
            "version          Project version [default: 1.0.0-SNAPSHOT]"
        );
    }
}
