//! Prompt template parsing and rendering
//!
//! Placeholders use the syntax `{name}` where `name` is one or more word
//! characters. Rendering is a single pass over the original template:
//! - `{name}` with a value is replaced by that value
//! - `{name}` without a value is replaced by `[name not provided]`
//!
//! Substituted values are never re-scanned, so a value containing `{...}`
//! passes through literally. There is no escape for literal braces: any
//! `{word}` in the template text is treated as a placeholder.

use std::collections::{BTreeMap, HashMap, HashSet};

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

/// Regex to match placeholder patterns: {name}
static PLACEHOLDER_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\{(\w+)\}").unwrap());

/// Source of placeholder values
pub trait PlaceholderValues {
    fn value(&self, name: &str) -> Option<&str>;
}

impl PlaceholderValues for HashMap<String, String> {
    fn value(&self, name: &str) -> Option<&str> {
        self.get(name).map(String::as_str)
    }
}

impl PlaceholderValues for BTreeMap<String, String> {
    fn value(&self, name: &str) -> Option<&str> {
        self.get(name).map(String::as_str)
    }
}

/// Marker written in place of a placeholder that has no value
pub fn missing_marker(name: &str) -> String {
    format!("[{} not provided]", name)
}

/// A parsed prompt template
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptTemplate {
    /// Original template content
    content: String,
    /// Distinct placeholder names in order of first appearance
    placeholders: Vec<String>,
}

impl PromptTemplate {
    /// Parse a template string and collect its placeholders
    pub fn parse(content: impl Into<String>) -> Self {
        let content = content.into();
        let mut placeholders = Vec::new();
        let mut seen = HashSet::new();

        for cap in PLACEHOLDER_PATTERN.captures_iter(&content) {
            let name = &cap[1];

            if seen.insert(name.to_string()) {
                placeholders.push(name.to_string());
            }
        }

        Self {
            content,
            placeholders,
        }
    }

    /// Get the original template content
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Get the distinct placeholder names
    pub fn placeholders(&self) -> &[String] {
        &self.placeholders
    }

    /// Placeholder names that `values` cannot resolve
    pub fn unresolved<V: PlaceholderValues + ?Sized>(&self, values: &V) -> Vec<&str> {
        self.placeholders
            .iter()
            .map(String::as_str)
            .filter(|name| values.value(name).is_none())
            .collect()
    }

    /// Render the template. Never fails; unresolved placeholders become markers.
    pub fn render<V: PlaceholderValues + ?Sized>(&self, values: &V) -> String {
        PLACEHOLDER_PATTERN
            .replace_all(&self.content, |caps: &Captures| {
                let name = &caps[1];

                match values.value(name) {
                    Some(value) => value.to_string(),
                    None => missing_marker(name),
                }
            })
            .into_owned()
    }
}

/// Convenience function to render a template string directly
pub fn fill_template<V: PlaceholderValues + ?Sized>(template: &str, values: &V) -> String {
    PromptTemplate::parse(template).render(values)
}
