use std::path::{Component, Path, PathBuf};

use tracing::{debug, warn};
use walkdir::WalkDir;

use crate::config::{descriptor_path, parse_descriptor, TemplateDescriptor};
use crate::error::{ForgeError, Result};

/// Templates on disk: one subdirectory per template, each with a `template.yaml`.
pub struct TemplateRegistry {
    templates_dir: PathBuf,
}

impl TemplateRegistry {
    pub fn new(templates_dir: impl Into<PathBuf>) -> Self {
        Self {
            templates_dir: templates_dir.into(),
        }
    }

    pub fn templates_dir(&self) -> &Path {
        &self.templates_dir
    }

    /// Every template that loads. Broken ones are skipped, not fatal.
    ///
    /// Order follows directory iteration and is not sorted.
    pub fn list(&self) -> Result<Vec<TemplateDescriptor>> {
        if !self.templates_dir.is_dir() {
            return Err(ForgeError::TemplatesDirUnavailable {
                path: self.templates_dir.clone(),
            });
        }

        let mut templates = Vec::new();
        for name in self.subdirectory_names()? {
            match self.load(&name) {
                Ok(descriptor) => templates.push(descriptor),
                Err(e) => debug!(template = %name, error = %e, "skipping template"),
            }
        }
        Ok(templates)
    }

    pub fn names(&self) -> Result<Vec<String>> {
        Ok(self.list()?.into_iter().map(|t| t.name).collect())
    }

    /// Load one template by directory name.
    pub fn get(&self, name: &str) -> Result<TemplateDescriptor> {
        self.load(name)
    }

    /// True only when the directory exists and its descriptor parses.
    pub fn exists(&self, name: &str) -> bool {
        self.load(name).is_ok()
    }

    fn load(&self, name: &str) -> Result<TemplateDescriptor> {
        if !is_plain_name(name) {
            return Err(self.not_found(name));
        }
        let template_dir = self.templates_dir.join(name);
        if !template_dir.is_dir() {
            return Err(self.not_found(name));
        }

        let Some(yaml_path) = descriptor_path(&template_dir) else {
            return Err(self.not_found(name));
        };

        let content = std::fs::read_to_string(&yaml_path).map_err(|e| {
            ForgeError::InvalidTemplate {
                name: name.to_string(),
                reason: format!("failed to read {}: {e}", yaml_path.display()),
            }
        })?;

        let mut descriptor =
            parse_descriptor(&content, name).map_err(|e| ForgeError::InvalidTemplate {
                name: name.to_string(),
                reason: format!("failed to parse {}: {e}", yaml_path.display()),
            })?;

        descriptor.path = template_dir;
        Ok(descriptor)
    }

    fn not_found(&self, name: &str) -> ForgeError {
        ForgeError::TemplateNotFound {
            name: name.to_string(),
            available: self.available_names(name),
        }
    }

    /// Names of the other templates that load, for "did you mean" listings.
    fn available_names(&self, excluding: &str) -> Vec<String> {
        let Ok(names) = self.subdirectory_names() else {
            return Vec::new();
        };
        names
            .into_iter()
            .filter(|n| n != excluding)
            .filter(|n| {
                let dir = self.templates_dir.join(n);
                descriptor_path(&dir)
                    .and_then(|p| std::fs::read_to_string(p).ok())
                    .is_some_and(|content| parse_descriptor(&content, n).is_ok())
            })
            .collect()
    }

    fn subdirectory_names(&self) -> Result<Vec<String>> {
        let mut names = Vec::new();
        for entry in WalkDir::new(&self.templates_dir).min_depth(1).max_depth(1) {
            let entry = entry.map_err(|e| ForgeError::Io {
                context: format!("reading templates directory {}", self.templates_dir.display()),
                source: e.into(),
            })?;
            if !entry.file_type().is_dir() {
                continue;
            }
            match entry.file_name().to_str() {
                Some(name) => names.push(name.to_string()),
                None => warn!(path = %entry.path().display(), "ignoring non-UTF-8 template directory"),
            }
        }
        Ok(names)
    }
}

/// A template name is a single directory entry under the templates root.
fn is_plain_name(name: &str) -> bool {
    let mut components = Path::new(name).components();
    matches!(
        (components.next(), components.next()),
        (Some(Component::Normal(_)), None)
    )
}
