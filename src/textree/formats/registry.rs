//! Format registry for tree serialization
//!
//! Formats are pluggable: each implements [`Formatter`] and registers under
//! a name. Callers pick a format at runtime (the CLI exposes this directly).

use crate::textree::tree::Tree;
use std::collections::HashMap;
use std::fmt;

/// Error that can occur during formatting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormatError {
    /// No formatter registered under this name.
    FormatNotFound(String),
    /// The formatter itself failed.
    SerializationError(String),
}

impl fmt::Display for FormatError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FormatError::FormatNotFound(name) => write!(f, "format '{name}' not found"),
            FormatError::SerializationError(msg) => write!(f, "serialization error: {msg}"),
        }
    }
}

impl std::error::Error for FormatError {}

/// Serializes a finished tree to a string representation.
pub trait Formatter: Send + Sync {
    /// Registry name of this format (e.g. "tag", "treeviz").
    fn name(&self) -> &str;

    /// Serialize a tree to this format.
    fn serialize(&self, tree: &Tree) -> Result<String, FormatError>;

    /// Optional one-line description, shown by `list-formats`.
    fn description(&self) -> &str {
        ""
    }
}

/// Registry of tree formatters, looked up by name.
pub struct FormatRegistry {
    formatters: HashMap<String, Box<dyn Formatter>>,
}

impl FormatRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        FormatRegistry {
            formatters: HashMap::new(),
        }
    }

    /// Register a formatter, replacing any previous one with the same name.
    pub fn register<F: Formatter + 'static>(&mut self, formatter: F) {
        self.formatters
            .insert(formatter.name().to_string(), Box::new(formatter));
    }

    /// Look up a formatter by name.
    pub fn get(&self, name: &str) -> Option<&dyn Formatter> {
        self.formatters.get(name).map(|f| f.as_ref())
    }

    /// Serialize `tree` using the named format.
    pub fn serialize(&self, tree: &Tree, format: &str) -> Result<String, FormatError> {
        let formatter = self
            .get(format)
            .ok_or_else(|| FormatError::FormatNotFound(format.to_string()))?;
        formatter.serialize(tree)
    }

    /// All registered format names, sorted.
    pub fn list_formats(&self) -> Vec<String> {
        let mut names: Vec<_> = self.formatters.keys().cloned().collect();
        names.sort();
        names
    }

    /// A registry preloaded with the built-in formatters.
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register(super::TagFormatter);
        registry.register(super::TreevizFormatter);
        registry.register(super::JsonFormatter);
        registry
    }
}

impl Default for FormatRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct UpperFormatter;
    impl Formatter for UpperFormatter {
        fn name(&self) -> &str {
            "upper"
        }
        fn serialize(&self, tree: &Tree) -> Result<String, FormatError> {
            Ok(tree.node(tree.root()).tag().to_uppercase())
        }
    }

    #[test]
    fn defaults_cover_the_builtin_formats() {
        let registry = FormatRegistry::with_defaults();
        assert_eq!(registry.list_formats(), vec!["json", "tag", "treeviz"]);
    }

    #[test]
    fn custom_formatters_can_be_registered() {
        let mut registry = FormatRegistry::new();
        registry.register(UpperFormatter);
        let tree = Tree::new();
        assert_eq!(registry.serialize(&tree, "upper").unwrap(), "ROOT");
    }

    #[test]
    fn unknown_format_is_an_error() {
        let registry = FormatRegistry::new();
        let tree = Tree::new();
        assert_eq!(
            registry.serialize(&tree, "nope").unwrap_err(),
            FormatError::FormatNotFound("nope".to_string())
        );
    }
}
