pub mod archetype;
pub mod process;
pub mod toolchain;

use std::path::{Path, PathBuf};

use tracing::info;

use crate::cancel::CancelToken;
use crate::config::{TemplateDescriptor, TemplateKind};
use crate::error::{ForgeError, Result};
use crate::output::Printer;
use crate::render::{render_tree, GeneratedProject, RenderContext};
use crate::validate::{validate_all, ParameterSet};

use self::archetype::{ArchetypeRequest, ArchetypeRunner};
use self::toolchain::{required_tool, ToolchainProbe};

/// Project parameters as supplied by the CLI or the wizard. Empty strings mean "not given".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProjectParams {
    pub artifact_id: String,
    pub group_id: String,
    pub version: String,
    pub package: String,
    pub module: String,
    pub output_dir: PathBuf,
}

impl ProjectParams {
    /// Fill in the per-kind defaults: version, package from group, module from artifact.
    pub fn with_defaults(mut self, kind: TemplateKind) -> Self {
        if self.version.is_empty() {
            self.version = kind.default_version().to_string();
        }
        if self.package.is_empty() {
            self.package = self.group_id.clone();
        }
        if self.module.is_empty() {
            self.module = self.artifact_id.clone();
        }
        self
    }

    fn as_parameter_set(&self) -> ParameterSet<'_> {
        ParameterSet {
            artifact_id: &self.artifact_id,
            group_id: &self.group_id,
            version: &self.version,
            package: &self.package,
            module: &self.module,
        }
    }
}

/// A generation that passed every check but has not touched the project directory yet.
#[derive(Debug, Clone)]
pub struct PreparedGeneration {
    pub template: TemplateDescriptor,
    pub kind: TemplateKind,
    /// Parameters with defaults applied.
    pub params: ProjectParams,
    /// Absolute output directory, created by `execute`.
    pub output_dir: PathBuf,
    /// `output_dir/artifact_id`, absent or empty.
    pub project_dir: PathBuf,
}

impl PreparedGeneration {
    pub fn render_context(&self) -> RenderContext {
        RenderContext {
            project_name: self.params.artifact_id.clone(),
            module_name: self.params.module.clone(),
            version: self.params.version.clone(),
            runtime_version: self.template.file_template.min_runtime_version.clone(),
        }
    }

    pub fn archetype_request(&self) -> ArchetypeRequest {
        ArchetypeRequest {
            archetype: self.template.archetype.clone(),
            template_version: self.template.version.clone(),
            group_id: self.params.group_id.clone(),
            artifact_id: self.params.artifact_id.clone(),
            version: self.params.version.clone(),
            package: self.params.package.clone(),
            output_dir: self.output_dir.clone(),
        }
    }
}

/// Sequences toolchain check, validation, destination safety and dispatch.
pub struct Generator<'a> {
    probe: &'a dyn ToolchainProbe,
    archetype: &'a dyn ArchetypeRunner,
    printer: &'a Printer,
    cancel: CancelToken,
}

impl<'a> Generator<'a> {
    pub fn new(
        probe: &'a dyn ToolchainProbe,
        archetype: &'a dyn ArchetypeRunner,
        printer: &'a Printer,
        cancel: CancelToken,
    ) -> Self {
        Self {
            probe,
            archetype,
            printer,
            cancel,
        }
    }

    /// Run every check that happens before the first byte is generated. Writes nothing.
    pub fn prepare(
        &self,
        template: TemplateDescriptor,
        params: ProjectParams,
    ) -> Result<PreparedGeneration> {
        let kind = template
            .resolved_kind()
            .ok_or_else(|| ForgeError::InvalidTemplate {
                name: template.name.clone(),
                reason: "unknown template type (set `type` to archetype or file-template)"
                    .to_string(),
            })?;

        if let Some(tool) = required_tool(&template) {
            if !self.probe.is_available(&tool) {
                return Err(ForgeError::ToolchainNotFound {
                    tool: tool.name.to_string(),
                });
            }
        }
        self.cancel.check()?;

        // Derived values are only filled in once the user's own input is clean.
        let errors = validate_all(&params.as_parameter_set(), kind.flavor());
        if !errors.is_empty() {
            return Err(ForgeError::Validation { errors });
        }
        let params = params.with_defaults(kind);

        let output_dir = absolutize(&params.output_dir)?;
        ensure_target_empty(&output_dir, &params.artifact_id)?;
        let project_dir = output_dir.join(&params.artifact_id);

        info!(
            template = %template.name,
            kind = kind.as_str(),
            project = %project_dir.display(),
            "generation prepared"
        );

        Ok(PreparedGeneration {
            template,
            kind,
            params,
            output_dir,
            project_dir,
        })
    }

    pub fn execute(&self, prepared: &PreparedGeneration) -> Result<GeneratedProject> {
        self.cancel.check()?;
        resolve_output_dir(&prepared.output_dir, &prepared.params.artifact_id)?;

        let project = match prepared.kind {
            TemplateKind::Archetype => {
                self.archetype.install(&prepared.template.path, &self.cancel)?;
                self.cancel.check()?;
                self.archetype.generate(
                    &prepared.template.path,
                    &prepared.archetype_request(),
                    &self.cancel,
                )?;
                GeneratedProject {
                    project_dir: prepared.project_dir.clone(),
                    version: prepared.params.version.clone(),
                    files_created: Vec::new(),
                    files_copied: Vec::new(),
                }
            }
            TemplateKind::FileTemplate => render_tree(
                &prepared.template.files_path(),
                &prepared.project_dir,
                &prepared.render_context(),
                &prepared.template.file_template.template_suffix,
                &self.cancel,
            )?,
        };

        info!(project = %project.project_dir.display(), "generation finished");

        self.printer.project_created(
            prepared.kind,
            &prepared.template.stack.language,
            &project.project_dir,
            &prepared.params.artifact_id,
            &project.version,
        );
        Ok(project)
    }

    /// Generate a project from `template`.
    pub fn generate(
        &self,
        template: TemplateDescriptor,
        params: ProjectParams,
    ) -> Result<GeneratedProject> {
        let prepared = self.prepare(template, params)?;
        self.execute(&prepared)
    }
}

/// Absolutize and create `output_dir`, refusing when `output_dir/artifact_id`
/// already holds anything.
pub fn resolve_output_dir(output_dir: &Path, artifact_id: &str) -> Result<PathBuf> {
    let absolute = absolutize(output_dir)?;
    std::fs::create_dir_all(&absolute).map_err(|e| ForgeError::Io {
        context: format!("creating output directory {}", absolute.display()),
        source: e,
    })?;
    ensure_target_empty(&absolute, artifact_id)?;
    Ok(absolute)
}

fn absolutize(output_dir: &Path) -> Result<PathBuf> {
    if output_dir.is_absolute() {
        return Ok(output_dir.to_path_buf());
    }
    let cwd = std::env::current_dir().map_err(|e| ForgeError::Io {
        context: "getting current directory".into(),
        source: e,
    })?;
    if output_dir.as_os_str().is_empty() {
        Ok(cwd)
    } else {
        Ok(cwd.join(output_dir))
    }
}

/// A missing or empty target is fine; a file or a non-empty directory is not.
fn ensure_target_empty(output_dir: &Path, artifact_id: &str) -> Result<()> {
    let target = output_dir.join(artifact_id);
    if !target.exists() {
        return Ok(());
    }
    let has_contents = !target.is_dir()
        || std::fs::read_dir(&target)
            .map(|mut d| d.next().is_some())
            .unwrap_or(true);
    if has_contents {
        return Err(ForgeError::TargetNotEmpty { path: target });
    }
    Ok(())
}
