use serde::Serialize;
use tera::Context;

/// Substitution variables available to a file template.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct RenderContext {
    /// Directory/artifact name, e.g. `my-service`.
    pub project_name: String,
    /// Module path or group identifier, e.g. `github.com/example/my-service`.
    pub module_name: String,
    pub version: String,
    /// Minimum runtime version hint, e.g. `1.21`.
    pub runtime_version: String,
}

impl RenderContext {
    pub fn to_tera(&self) -> Context {
        let mut context = Context::new();
        context.insert("project_name", &self.project_name);
        context.insert("module_name", &self.module_name);
        context.insert("version", &self.version);
        context.insert("runtime_version", &self.runtime_version);
        context
    }
}
