//! Prompt templates with `{name}` placeholder substitution

mod template;

pub use template::{fill_template, missing_marker, PlaceholderValues, PromptTemplate};
