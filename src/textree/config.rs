//! Declarative parser configuration
//!
//! A [`ParserConfig`] describes the level registry and attribute schema as
//! data, deserialized from YAML or JSON. Validation happens when the config
//! is turned into a [`LevelRegistry`]: conflicting priorities and duplicate
//! tags surface as configuration errors before any parsing starts.
//!
//! ```yaml
//! levels:
//!   - kind: chapter
//!     tag: Chapter
//!     priority: 0
//!   - kind: section
//!     tag: Section
//!     priority: 1
//! content:
//!   - class: leaf
//!     tag: Leaf
//!     priority: 2
//! attributes:
//!   Chapter: [title, number]
//! ```

use crate::textree::registry::{LevelRegistry, RegistryError};
use crate::textree::schema::AttributeSchema;
use serde::Deserialize;
use std::collections::HashMap;
use std::fmt;

/// Errors loading or validating a configuration.
#[derive(Debug)]
pub enum ConfigError {
    /// The document could not be deserialized.
    Parse(String),
    /// The tables are inconsistent (conflict or duplicate tag).
    Registry(RegistryError),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Parse(msg) => write!(f, "config parse error: {msg}"),
            ConfigError::Registry(err) => write!(f, "config is inconsistent: {err}"),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Registry(err) => Some(err),
            _ => None,
        }
    }
}

impl From<RegistryError> for ConfigError {
    fn from(err: RegistryError) -> Self {
        ConfigError::Registry(err)
    }
}

/// One structural level declaration.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct LevelEntry {
    pub kind: String,
    pub tag: String,
    pub priority: u32,
}

/// One content-class declaration (terminal tags).
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct ContentEntry {
    pub class: String,
    pub tag: String,
    pub priority: u32,
}

/// Registry and schema tables as declarative data.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct ParserConfig {
    #[serde(default)]
    pub levels: Vec<LevelEntry>,
    #[serde(default)]
    pub content: Vec<ContentEntry>,
    #[serde(default)]
    pub attributes: HashMap<String, Vec<String>>,
}

impl ParserConfig {
    pub fn from_yaml(source: &str) -> Result<Self, ConfigError> {
        serde_yaml::from_str(source).map_err(|err| ConfigError::Parse(err.to_string()))
    }

    pub fn from_json(source: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(source).map_err(|err| ConfigError::Parse(err.to_string()))
    }

    /// Build and validate the level registry described by this config.
    pub fn registry(&self) -> Result<LevelRegistry, ConfigError> {
        let mut registry = LevelRegistry::new();
        for level in &self.levels {
            registry.register_priority(&level.kind, level.priority)?;
            registry.register_level_tag(&level.kind, &level.tag)?;
        }
        for content in &self.content {
            registry.register_priority(&content.class, content.priority)?;
            registry.register_content_tag(&content.class, &content.tag)?;
        }
        Ok(registry)
    }

    /// Build the attribute schema described by this config.
    pub fn schema(&self) -> AttributeSchema {
        let mut schema = AttributeSchema::new();
        for (tag, names) in &self.attributes {
            schema.declare(tag, names.iter().cloned());
        }
        schema
    }
}
