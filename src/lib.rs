pub mod cancel;
pub mod config;
pub mod error;
pub mod generator;
pub mod output;
pub mod prompt;
pub mod render;
pub mod template;
pub mod validate;

pub use cancel::CancelToken;
pub use config::{ForgeConfig, TemplateDescriptor, TemplateKind};
pub use error::{ForgeError, Result};
pub use generator::{Generator, PreparedGeneration, ProjectParams};
pub use output::Printer;
pub use render::GeneratedProject;
pub use template::TemplateRegistry;
