use std::io::IsTerminal;

use console::style;
use forge::generator::archetype::{generate_args, install_args, MavenRunner};
use forge::generator::toolchain::SystemProbe;
use forge::prompt::{needs_wizard, run_wizard, WizardDefaults};
use forge::render::plan_render;
use forge::{
    CancelToken, ForgeConfig, ForgeError, Generator, PreparedGeneration, Printer, ProjectParams,
    TemplateDescriptor, TemplateKind, TemplateRegistry,
};
use miette::Result;

use crate::cli::NewArgs;

pub fn run(
    args: NewArgs,
    config: &ForgeConfig,
    printer: &Printer,
    cancel: CancelToken,
) -> Result<()> {
    let registry = TemplateRegistry::new(&config.templates_dir);
    let template_name = args
        .template
        .clone()
        .unwrap_or_else(|| config.default_template.clone());
    let params = params_from_args(&args);

    let lookup = registry.get(&template_name);
    let kind = lookup.as_ref().ok().and_then(TemplateDescriptor::resolved_kind);
    let wizard = needs_wizard(
        args.interactive,
        std::io::stdin().is_terminal(),
        kind,
        &params,
    );

    let (template, params) = if wizard {
        let defaults = WizardDefaults {
            template: template_name,
            params,
        };
        let answers = run_wizard(&registry, &defaults, printer)?;
        (answers.template, answers.params)
    } else {
        match lookup {
            Ok(template) => (template, params),
            Err(err) => {
                if let ForgeError::TemplateNotFound { available, .. } = &err {
                    print_available(printer, available);
                }
                return Err(err.into());
            }
        }
    };

    let probe = SystemProbe;
    let runner = MavenRunner::new(printer.is_quiet());
    let generator = Generator::new(&probe, &runner, printer, cancel.clone());

    if args.dry_run {
        let prepared = generator.prepare(template, params)?;
        print_dry_run(printer, &prepared, &cancel)?;
        return Ok(());
    }

    printer.info(format!(
        "Creating {} from template {}",
        style(&params.artifact_id).bold(),
        style(&template.name).cyan()
    ));
    generator.generate(template, params)?;
    Ok(())
}

fn params_from_args(args: &NewArgs) -> ProjectParams {
    let given = |value: &Option<String>| value.as_deref().unwrap_or("").trim().to_string();
    ProjectParams {
        artifact_id: given(&args.artifact_id),
        group_id: given(&args.group_id),
        version: given(&args.project_version),
        package: given(&args.package),
        module: given(&args.module),
        output_dir: args.output.clone(),
    }
}

fn print_available(printer: &Printer, available: &[String]) {
    if available.is_empty() {
        return;
    }
    printer.line("");
    printer.line("Available templates:");
    for name in available {
        printer.line(format!("  - {name}"));
    }
}

fn print_dry_run(
    printer: &Printer,
    prepared: &PreparedGeneration,
    cancel: &CancelToken,
) -> Result<()> {
    printer.line(format!(
        "\n{} Dry run: {} would be generated in {}",
        style("==>").cyan().bold(),
        style(&prepared.template.name).cyan(),
        style(prepared.project_dir.display()).cyan()
    ));

    match prepared.kind {
        TemplateKind::Archetype => {
            printer.line(format!(
                "  (in {}) mvn {}",
                prepared.template.path.display(),
                install_args().join(" ")
            ));
            printer.line(format!(
                "  mvn {}",
                generate_args(&prepared.archetype_request()).join(" ")
            ));
        }
        TemplateKind::FileTemplate => {
            let plan = plan_render(
                &prepared.template.files_path(),
                &prepared.render_context(),
                &prepared.template.file_template.template_suffix,
                cancel,
            )?;
            for file in &plan.files {
                let action = if file.is_copy { "copy  " } else { "create" };
                printer.line(format!(
                    "  {} {}",
                    style(action).green(),
                    file.relative_path.display()
                ));
            }
            let rendered = plan.files.iter().filter(|f| !f.is_copy).count();
            printer.line(format!(
                "\nSummary: {} rendered, {} copied",
                rendered,
                plan.files.len() - rendered
            ));
        }
    }

    printer.info("Dry run, no files written.");
    Ok(())
}
