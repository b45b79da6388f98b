//! Line classification
//!
//! Classification is the pluggable boundary between raw document text and
//! the tree builder. A [`Classifier`] turns one raw line into a
//! [`Classification`]: either `Skip` (no structural effect, e.g. a blank
//! line) or a `Line` carrying the level kind, the textual content and the
//! attribute map for the node to be placed.
//!
//! Classifiers must be total: a line the classifier cannot represent maps to
//! `Skip` rather than failing, so the builder's skip path applies uniformly.
//!
//! Any `Fn(&str) -> Classification` closure is a classifier. For outline
//! documents written with `#`-prefixed headings a ready-made
//! [`HeadingClassifier`] is provided.

use crate::textree::registry::{LevelRegistry, RegistryError};
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::BTreeMap;

/// Attribute name -> value mapping carried by one node.
///
/// Ordered so that serialized output is deterministic.
pub type AttributeMap = BTreeMap<String, String>;

/// The outcome of classifying one raw line.
#[derive(Debug, Clone, PartialEq)]
pub enum Classification {
    /// The line has no structural meaning; tree and stack stay untouched.
    Skip,
    /// The line produces one node at the given hierarchy position.
    Line {
        level_kind: String,
        content: Option<String>,
        attributes: AttributeMap,
    },
}

impl Classification {
    /// Convenience constructor for a content-bearing line without attributes.
    pub fn line(level_kind: &str, content: &str) -> Self {
        Classification::Line {
            level_kind: level_kind.to_string(),
            content: Some(content.to_string()),
            attributes: AttributeMap::new(),
        }
    }
}

/// Turns one raw input line into a [`Classification`].
pub trait Classifier {
    fn classify(&self, line: &str) -> Classification;
}

impl<F> Classifier for F
where
    F: Fn(&str) -> Classification,
{
    fn classify(&self, line: &str) -> Classification {
        self(line)
    }
}

static HEADING_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(#+)\s+(.*)$").expect("heading pattern is valid"));
static ATTRIBUTE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\s*\{([A-Za-z0-9_-]+)=([^}]*)\}\s*$").expect("attribute pattern is valid")
});

/// Classifier for `#`-prefixed outline documents.
///
/// Rules, in order:
/// - blank lines (whitespace only) classify as `Skip`
/// - `#`-prefixed lines classify as structural levels: the number of `#`
///   characters is the nesting depth, capped at `max_depth`, and the level
///   kind is `heading_<depth>`
/// - trailing `{name=value}` groups on a heading are stripped into the
///   attribute map
/// - every other line classifies as the content class (default `paragraph`)
///
/// [`HeadingClassifier::registry`] builds the matching level registry so the
/// classifier and the placement configuration cannot drift apart.
#[derive(Debug, Clone)]
pub struct HeadingClassifier {
    max_depth: usize,
    content_class: String,
}

impl HeadingClassifier {
    pub fn new() -> Self {
        Self {
            max_depth: 6,
            content_class: "paragraph".to_string(),
        }
    }

    /// Cap the heading depth; deeper headings classify at the cap.
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth.max(1);
        self
    }

    /// Rename the content class for non-heading lines.
    pub fn with_content_class(mut self, content_class: &str) -> Self {
        self.content_class = content_class.to_string();
        self
    }

    /// Build the registry matching this classifier's output.
    ///
    /// `heading_<n>` maps to tag `h<n>` with priority `n - 1`; the content
    /// class maps to tag `p` with priority `max_depth` (deepest, terminal).
    pub fn registry(&self) -> Result<LevelRegistry, RegistryError> {
        let mut registry = LevelRegistry::new();
        for depth in 1..=self.max_depth {
            let kind = format!("heading_{depth}");
            registry.register_priority(&kind, (depth - 1) as u32)?;
            registry.register_level_tag(&kind, &format!("h{depth}"))?;
        }
        registry.register_priority(&self.content_class, self.max_depth as u32)?;
        registry.register_content_tag(&self.content_class, "p")?;
        Ok(registry)
    }
}

impl Default for HeadingClassifier {
    fn default() -> Self {
        Self::new()
    }
}

impl Classifier for HeadingClassifier {
    fn classify(&self, line: &str) -> Classification {
        let line = line.trim_end_matches(['\n', '\r']);
        if line.trim().is_empty() {
            return Classification::Skip;
        }

        if let Some(caps) = HEADING_RE.captures(line) {
            let depth = caps[1].len().min(self.max_depth);
            let mut rest = caps[2].trim().to_string();
            let mut attributes = AttributeMap::new();
            while let Some(acaps) = ATTRIBUTE_RE.captures(&rest) {
                let start = acaps.get(0).map(|m| m.start()).unwrap_or(rest.len());
                attributes.insert(acaps[1].to_string(), acaps[2].to_string());
                rest.truncate(start);
            }
            return Classification::Line {
                level_kind: format!("heading_{depth}"),
                content: Some(rest.trim_end().to_string()),
                attributes,
            };
        }

        Classification::Line {
            level_kind: self.content_class.clone(),
            content: Some(line.trim().to_string()),
            attributes: AttributeMap::new(),
        }
    }
}
