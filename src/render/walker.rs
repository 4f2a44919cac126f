use std::path::{Path, PathBuf};

use tracing::debug;
use walkdir::WalkDir;

use crate::cancel::CancelToken;
use crate::error::{ForgeError, Result};
use crate::render::context::RenderContext;
use crate::render::file::{is_template_file, render_file_content, transform_path};

#[derive(Debug)]
pub struct GeneratedProject {
    pub project_dir: PathBuf,
    pub version: String,
    pub files_created: Vec<PathBuf>,
    pub files_copied: Vec<PathBuf>,
}

/// A file that would be created during generation.
#[derive(Debug)]
pub struct PlannedFile {
    /// Path relative to the project directory.
    pub relative_path: PathBuf,
    /// Rendered template output or the verbatim source bytes.
    pub content: Vec<u8>,
    /// Whether this file was copied verbatim (true) or rendered from a template (false).
    pub is_copy: bool,
}

/// The result of planning a render without writing to disk.
#[derive(Debug)]
pub struct GenerationPlan {
    /// Every directory of the template, in walk order, after the path transform.
    pub directories: Vec<PathBuf>,
    pub files: Vec<PlannedFile>,
}

/// Walk `files_dir`, transform paths and render every template into memory.
///
/// Nothing is written; a template error aborts before the first byte hits disk.
/// `cancel` is checked before each entry.
pub fn plan_render(
    files_dir: &Path,
    context: &RenderContext,
    suffix: &str,
    cancel: &CancelToken,
) -> Result<GenerationPlan> {
    if !files_dir.is_dir() {
        return Err(ForgeError::TemplateFilesMissing {
            path: files_dir.to_path_buf(),
        });
    }

    let tera_context = context.to_tera();
    let mut directories = Vec::new();
    let mut files = Vec::new();

    for entry in WalkDir::new(files_dir).min_depth(1) {
        cancel.check()?;
        let entry = entry.map_err(|e| ForgeError::Io {
            context: format!("walking {}", files_dir.display()),
            source: e.into(),
        })?;
        let src_path = entry.path();
        let rel_path = src_path
            .strip_prefix(files_dir)
            .expect("entry must be under files_dir");
        let dest_rel = transform_path(rel_path, &context.project_name, suffix);

        if entry.file_type().is_dir() {
            directories.push(dest_rel);
            continue;
        }

        if is_template_file(src_path, suffix) {
            let content = std::fs::read_to_string(src_path).map_err(|e| ForgeError::Io {
                context: format!("reading {}", src_path.display()),
                source: e,
            })?;
            let template_name = rel_path.to_string_lossy();
            let rendered = render_file_content(&template_name, &content, &tera_context)?;
            files.push(PlannedFile {
                relative_path: dest_rel,
                content: rendered.into_bytes(),
                is_copy: false,
            });
        } else {
            let content = std::fs::read(src_path).map_err(|e| ForgeError::Io {
                context: format!("reading {}", src_path.display()),
                source: e,
            })?;
            files.push(PlannedFile {
                relative_path: dest_rel,
                content,
                is_copy: true,
            });
        }
    }

    Ok(GenerationPlan { directories, files })
}

/// Write a plan under `project_dir`. Not transactional: a failure leaves what
/// was already written.
pub fn execute_plan(
    plan: &GenerationPlan,
    project_dir: &Path,
    cancel: &CancelToken,
) -> Result<GeneratedProject> {
    cancel.check()?;
    create_dir(project_dir)?;
    for dir in &plan.directories {
        cancel.check()?;
        create_dir(&project_dir.join(dir))?;
    }

    let mut files_created = Vec::new();
    let mut files_copied = Vec::new();

    for file in &plan.files {
        cancel.check()?;
        let dest_path = project_dir.join(&file.relative_path);
        if let Some(parent) = dest_path.parent() {
            create_dir(parent)?;
        }
        std::fs::write(&dest_path, &file.content).map_err(|e| ForgeError::Io {
            context: format!("writing {}", dest_path.display()),
            source: e,
        })?;
        if file.is_copy {
            debug!(file = %file.relative_path.display(), "copied");
            files_copied.push(file.relative_path.clone());
        } else {
            debug!(file = %file.relative_path.display(), "rendered");
            files_created.push(file.relative_path.clone());
        }
    }

    Ok(GeneratedProject {
        project_dir: project_dir.to_path_buf(),
        version: String::new(),
        files_created,
        files_copied,
    })
}

/// Render `files_dir` into `project_dir` in one step.
pub fn render_tree(
    files_dir: &Path,
    project_dir: &Path,
    context: &RenderContext,
    suffix: &str,
    cancel: &CancelToken,
) -> Result<GeneratedProject> {
    let plan = plan_render(files_dir, context, suffix, cancel)?;
    let mut project = execute_plan(&plan, project_dir, cancel)?;
    project.version = context.version.clone();
    Ok(project)
}

fn create_dir(path: &Path) -> Result<()> {
    std::fs::create_dir_all(path).map_err(|e| ForgeError::Io {
        context: format!("creating directory {}", path.display()),
        source: e,
    })
}
