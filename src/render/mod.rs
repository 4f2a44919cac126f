pub mod context;
pub mod file;
pub mod filters;
pub mod walker;

pub use context::RenderContext;
pub use file::{transform_path, PROJECT_NAME_PLACEHOLDER};
pub use walker::{
    execute_plan, plan_render, render_tree, GeneratedProject, GenerationPlan, PlannedFile,
};
