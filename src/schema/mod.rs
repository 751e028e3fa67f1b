//! Schema system - entity file template generation

pub mod template;

pub use template::{TemplateContext, TemplateGenerator};
