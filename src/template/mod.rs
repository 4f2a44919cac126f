pub mod registry;

pub use registry::TemplateRegistry;
