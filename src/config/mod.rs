pub mod schema;
pub mod user;

use std::path::{Path, PathBuf};

pub use schema::{TemplateDescriptor, TemplateKind};
pub use user::{load_user_config, ForgeConfig, UserConfig};

/// Descriptor file names, in lookup order.
pub const DESCRIPTOR_FILES: [&str; 2] = ["template.yaml", "template.yml"];

/// Locate the descriptor file inside a template directory.
pub fn descriptor_path(template_dir: &Path) -> Option<PathBuf> {
    DESCRIPTOR_FILES
        .iter()
        .map(|name| template_dir.join(name))
        .find(|p| p.is_file())
}

/// Parse descriptor YAML. An empty name falls back to `dir_name`.
pub fn parse_descriptor(
    content: &str,
    dir_name: &str,
) -> std::result::Result<TemplateDescriptor, serde_yaml::Error> {
    let mut descriptor: TemplateDescriptor = serde_yaml::from_str(content)?;
    if descriptor.name.is_empty() {
        descriptor.name = dir_name.to_string();
    }
    Ok(descriptor)
}
