//! Attribute schema
//!
//! Declares, per output tag, which attribute names a node of that tag is
//! expected to carry. The schema is pure metadata: actual attribute values
//! come from the classifier's per-line output, and placement never consults
//! the schema. The tree builder cross-checks nodes against it only to emit
//! diagnostics for declared-but-absent names.

use crate::textree::classify::AttributeMap;
use std::collections::HashMap;

/// Expected attribute names per output tag.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AttributeSchema {
    expected: HashMap<String, Vec<String>>,
}

impl AttributeSchema {
    /// Create an empty schema.
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare the ordered attribute-name list for a tag.
    ///
    /// Overwrites any previous declaration for the same tag.
    pub fn declare<I, S>(&mut self, tag: &str, names: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.expected
            .insert(tag.to_string(), names.into_iter().map(Into::into).collect());
    }

    /// The declared attribute names for a tag, in declaration order.
    pub fn expected_for(&self, tag: &str) -> Option<&[String]> {
        self.expected.get(tag).map(Vec::as_slice)
    }

    /// Declared names absent from an attribute map, for diagnostics.
    pub fn missing_for<'a>(&'a self, tag: &str, attributes: &AttributeMap) -> Vec<&'a str> {
        self.expected_for(tag)
            .map(|names| {
                names
                    .iter()
                    .filter(|name| !attributes.contains_key(name.as_str()))
                    .map(String::as_str)
                    .collect()
            })
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn declare_overwrites_previous_list() {
        let mut schema = AttributeSchema::new();
        schema.declare("Chapter", ["title", "number"]);
        schema.declare("Chapter", ["title"]);
        assert_eq!(
            schema.expected_for("Chapter"),
            Some(&["title".to_string()][..])
        );
    }

    #[test]
    fn missing_names_preserve_declaration_order() {
        let mut schema = AttributeSchema::new();
        schema.declare("Section", ["id", "title", "label"]);
        let mut attributes = AttributeMap::new();
        attributes.insert("title".to_string(), "Background".to_string());
        assert_eq!(schema.missing_for("Section", &attributes), vec!["id", "label"]);
    }

    #[test]
    fn undeclared_tag_has_nothing_missing() {
        let schema = AttributeSchema::new();
        assert!(schema.missing_for("Leaf", &AttributeMap::new()).is_empty());
    }
}
