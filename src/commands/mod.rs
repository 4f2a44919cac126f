pub mod new;
pub mod templates;
pub mod version;
