use std::path::{Path, PathBuf};

use tera::{Context, Tera};

use crate::error::{ForgeError, Result};
use crate::render::filters;

/// Literal token in template paths replaced by the project name.
pub const PROJECT_NAME_PLACEHOLDER: &str = "{{project_name}}";

/// Strip the template suffix from the last segment and substitute the
/// project-name placeholder everywhere in the path.
pub fn transform_path(rel_path: &Path, project_name: &str, suffix: &str) -> PathBuf {
    let mut path = rel_path.to_string_lossy().into_owned();
    if !suffix.is_empty() && path.ends_with(suffix) {
        path.truncate(path.len() - suffix.len());
    }
    PathBuf::from(path.replace(PROJECT_NAME_PLACEHOLDER, project_name))
}

pub fn is_template_file(path: &Path, suffix: &str) -> bool {
    !suffix.is_empty()
        && path
            .file_name()
            .is_some_and(|name| name.to_string_lossy().ends_with(suffix))
}

/// Parse `content` as a Tera template with the casing filters and render it.
pub fn render_file_content(template_name: &str, content: &str, context: &Context) -> Result<String> {
    let mut tera = Tera::default();
    tera.autoescape_on(vec![]);
    filters::register(&mut tera);

    tera.add_raw_template(template_name, content)
        .and_then(|_| tera.render(template_name, context))
        .map_err(|e| ForgeError::RenderError {
            file: template_name.to_string(),
            source: e,
        })
}
