//! Level registry
//!
//! The registry holds the two configuration tables consulted during placement:
//! the priority table (level kind -> priority, lower means closer to the
//! document root) and the tag tables (level kind -> output tag). Structural
//! levels and content classes live in distinct tag tables, but both are
//! consulted by the reverse lookups, so a tag must be owned by exactly one
//! level kind across the two tables.
//!
//! The registry is an explicit configuration object: it is fully populated
//! before a parse begins and passed by reference into the tree builder.

use std::collections::HashMap;
use std::fmt;

/// Errors raised while configuring or querying the registry.
///
/// All of these are configuration errors: they are detected eagerly, are
/// fatal, and are never retried.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegistryError {
    /// A level kind was re-registered with a different priority value.
    ConflictingPriority {
        level_kind: String,
        existing: u32,
        requested: u32,
    },
    /// A tag is already owned by a different level kind or content class.
    DuplicateTag {
        tag: String,
        owner: String,
        requested: String,
    },
    /// No level kind or content class owns the given tag.
    UnknownTag(String),
    /// A tag resolves to a level kind that has no priority registered.
    MissingPriority(String),
}

impl fmt::Display for RegistryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RegistryError::ConflictingPriority {
                level_kind,
                existing,
                requested,
            } => write!(
                f,
                "conflicting priority for level kind '{level_kind}': already {existing}, requested {requested}"
            ),
            RegistryError::DuplicateTag {
                tag,
                owner,
                requested,
            } => write!(
                f,
                "tag '{tag}' is already owned by '{owner}', cannot assign it to '{requested}'"
            ),
            RegistryError::UnknownTag(tag) => write!(f, "no level kind owns the tag '{tag}'"),
            RegistryError::MissingPriority(level_kind) => write!(
                f,
                "level kind '{level_kind}' has a tag but no registered priority"
            ),
        }
    }
}

impl std::error::Error for RegistryError {}

/// Priority and tag tables for level kinds and content classes.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LevelRegistry {
    priorities: HashMap<String, u32>,
    level_tags: HashMap<String, String>,
    content_tags: HashMap<String, String>,
}

impl LevelRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the priority of a level kind or content class.
    ///
    /// Re-registering with the same value is an idempotent no-op.
    /// Re-registering with a different value is a configuration error.
    pub fn register_priority(&mut self, level_kind: &str, priority: u32) -> Result<(), RegistryError> {
        match self.priorities.get(level_kind) {
            Some(&existing) if existing != priority => Err(RegistryError::ConflictingPriority {
                level_kind: level_kind.to_string(),
                existing,
                requested: priority,
            }),
            Some(_) => Ok(()),
            None => {
                self.priorities.insert(level_kind.to_string(), priority);
                Ok(())
            }
        }
    }

    /// Register the output tag of a structural level.
    ///
    /// Last write wins for a given level kind, but a tag already owned by a
    /// different key is rejected: the tag mapping must stay injective so that
    /// reverse lookups resolve to exactly one level kind.
    pub fn register_level_tag(&mut self, level_kind: &str, tag: &str) -> Result<(), RegistryError> {
        self.guard_tag(level_kind, tag)?;
        self.level_tags
            .insert(level_kind.to_string(), tag.to_string());
        Ok(())
    }

    /// Register the output tag of a content class.
    ///
    /// Content-class tags are terminal: nodes carrying them never receive
    /// children, and the tree builder does not push them onto its stack.
    pub fn register_content_tag(&mut self, content_class: &str, tag: &str) -> Result<(), RegistryError> {
        self.guard_tag(content_class, tag)?;
        self.content_tags
            .insert(content_class.to_string(), tag.to_string());
        Ok(())
    }

    /// Forward lookup: the tag for a level kind or content class, if any.
    pub fn tag_for(&self, level_kind: &str) -> Option<&str> {
        self.level_tags
            .get(level_kind)
            .or_else(|| self.content_tags.get(level_kind))
            .map(String::as_str)
    }

    /// Reverse lookup: the level kind or content class owning a tag.
    pub fn level_kind_of_tag(&self, tag: &str) -> Result<&str, RegistryError> {
        self.owner_of(tag)
            .ok_or_else(|| RegistryError::UnknownTag(tag.to_string()))
    }

    /// The priority of the level kind owning a tag.
    ///
    /// Searches both the structural and the content tag tables.
    pub fn priority_of_tag(&self, tag: &str) -> Result<u32, RegistryError> {
        let level_kind = self.level_kind_of_tag(tag)?;
        self.priorities
            .get(level_kind)
            .copied()
            .ok_or_else(|| RegistryError::MissingPriority(level_kind.to_string()))
    }

    /// The priority of a level kind, if registered.
    pub fn priority_of(&self, level_kind: &str) -> Option<u32> {
        self.priorities.get(level_kind).copied()
    }

    /// Whether a tag belongs to a content class (a terminal tag).
    pub fn is_terminal_tag(&self, tag: &str) -> bool {
        self.content_tags.values().any(|t| t == tag)
    }

    /// True while no tags have been registered at all.
    ///
    /// Used by the pipeline sanity check before a parse starts.
    pub fn is_empty(&self) -> bool {
        self.level_tags.is_empty() && self.content_tags.is_empty()
    }

    fn owner_of(&self, tag: &str) -> Option<&str> {
        self.level_tags
            .iter()
            .chain(self.content_tags.iter())
            .find(|(_, t)| t.as_str() == tag)
            .map(|(k, _)| k.as_str())
    }

    fn guard_tag(&self, requested: &str, tag: &str) -> Result<(), RegistryError> {
        match self.owner_of(tag) {
            Some(owner) if owner != requested => Err(RegistryError::DuplicateTag {
                tag: tag.to_string(),
                owner: owner.to_string(),
                requested: requested.to_string(),
            }),
            _ => Ok(()),
        }
    }
}
