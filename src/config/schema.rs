use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::validate::Flavor;

/// A template's `template.yaml`.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TemplateDescriptor {
    #[serde(default)]
    pub name: String,

    #[serde(default)]
    pub version: String,

    #[serde(default)]
    pub description: String,

    #[serde(rename = "type", default)]
    pub kind: Option<TemplateKind>,

    #[serde(default)]
    pub archetype: ArchetypeCoordinates,

    #[serde(default, alias = "goConfig")]
    pub file_template: FileTemplateConfig,

    #[serde(default)]
    pub parameters: ParameterConfig,

    #[serde(default)]
    pub modules: Vec<ModuleDef>,

    #[serde(default)]
    pub stack: StackConfig,

    /// Template directory. Set by the registry after loading, never read from YAML.
    #[serde(skip)]
    pub path: PathBuf,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum TemplateKind {
    /// Generated by an external build tool (`mvn archetype:generate`).
    #[serde(alias = "maven-archetype")]
    Archetype,
    /// Rendered in-process from a directory of files.
    #[serde(alias = "go-template")]
    FileTemplate,
}

impl TemplateKind {
    pub fn as_str(self) -> &'static str {
        match self {
            TemplateKind::Archetype => "archetype",
            TemplateKind::FileTemplate => "file-template",
        }
    }

    pub fn flavor(self) -> Flavor {
        match self {
            TemplateKind::Archetype => Flavor::GroupAndPackage,
            TemplateKind::FileTemplate => Flavor::ModulePath,
        }
    }

    /// Project version used when none is given.
    pub fn default_version(self) -> &'static str {
        match self {
            TemplateKind::Archetype => "1.0.0-SNAPSHOT",
            TemplateKind::FileTemplate => "0.1.0",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ArchetypeCoordinates {
    #[serde(default)]
    pub group_id: String,
    #[serde(default)]
    pub artifact_id: String,
    #[serde(default)]
    pub version: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FileTemplateConfig {
    #[serde(default = "default_files_dir")]
    pub files_dir: String,

    #[serde(default = "default_min_runtime_version", alias = "minGoVersion")]
    pub min_runtime_version: String,

    #[serde(default = "default_template_suffix")]
    pub template_suffix: String,
}

fn default_files_dir() -> String {
    "files".to_string()
}

fn default_min_runtime_version() -> String {
    "1.21".to_string()
}

fn default_template_suffix() -> String {
    ".tmpl".to_string()
}

impl Default for FileTemplateConfig {
    fn default() -> Self {
        Self {
            files_dir: default_files_dir(),
            min_runtime_version: default_min_runtime_version(),
            template_suffix: default_template_suffix(),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ParameterConfig {
    #[serde(default)]
    pub required: Vec<ParameterDef>,
    #[serde(default)]
    pub optional: Vec<ParameterDef>,
}

/// Documents a parameter. Listing only; the checks themselves live in
/// [`crate::validate`].
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ParameterDef {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub pattern: String,
    #[serde(default)]
    pub default: String,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ModuleDef {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StackConfig {
    #[serde(default)]
    pub language: String,
    #[serde(default)]
    pub jdk: String,
    #[serde(default)]
    pub go_version: String,
    #[serde(default)]
    pub framework: String,
    #[serde(default)]
    pub framework_version: String,
    #[serde(default)]
    pub build_tool: String,
}

impl TemplateDescriptor {
    /// The explicit `type`, else inferred from `stack.language`.
    pub fn resolved_kind(&self) -> Option<TemplateKind> {
        if let Some(kind) = self.kind {
            return Some(kind);
        }
        match self.stack.language.to_ascii_lowercase().as_str() {
            "java" => Some(TemplateKind::Archetype),
            "go" => Some(TemplateKind::FileTemplate),
            _ => None,
        }
    }

    /// Directory holding the sources of a file template.
    pub fn files_path(&self) -> PathBuf {
        self.path.join(&self.file_template.files_dir)
    }

    /// Short label for listings.
    pub fn kind_label(&self) -> &'static str {
        self.resolved_kind().map_or("unknown", TemplateKind::as_str)
    }
}
