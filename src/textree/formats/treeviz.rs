//! Treeviz formatter: one line per node
//!
//! A compact visual rendering of the tree for quick scanning. Nesting is
//! encoded as indentation (2 spaces per level), each line shows the tag and
//! the node's content truncated to 30 characters:
//!
//! ```text
//! root
//!   Chapter · Intro
//!     Section · Background
//!       Leaf · first point
//! ```

use crate::textree::formats::registry::{FormatError, Formatter};
use crate::textree::tree::{Node, NodeId, Tree, Visitor};

const MAX_LABEL_CHARS: usize = 30;

/// Formatter producing the one-line-per-node tree view.
pub struct TreevizFormatter;

impl Formatter for TreevizFormatter {
    fn name(&self) -> &str {
        "treeviz"
    }

    fn serialize(&self, tree: &Tree) -> Result<String, FormatError> {
        Ok(to_treeviz_str(tree))
    }

    fn description(&self) -> &str {
        "one line per node, indentation shows nesting"
    }
}

/// Render a tree as indented one-line-per-node text.
pub fn to_treeviz_str(tree: &Tree) -> String {
    let mut writer = TreevizWriter {
        out: String::new(),
        depth: 0,
    };
    tree.accept(&mut writer);
    writer.out
}

struct TreevizWriter {
    out: String,
    depth: usize,
}

impl Visitor for TreevizWriter {
    fn enter_node(&mut self, _tree: &Tree, _id: NodeId, node: &Node) {
        for _ in 0..self.depth {
            self.out.push_str("  ");
        }
        self.out.push_str(node.tag());
        if let Some(text) = node.content() {
            if !text.is_empty() {
                self.out.push_str(" · ");
                self.out.push_str(&truncate(text, MAX_LABEL_CHARS));
            }
        }
        self.out.push('\n');
        self.depth += 1;
    }

    fn leave_node(&mut self, _tree: &Tree, _id: NodeId, _node: &Node) {
        self.depth -= 1;
    }
}

fn truncate(s: &str, max_chars: usize) -> String {
    if s.chars().count() > max_chars {
        let mut truncated: String = s.chars().take(max_chars).collect();
        truncated.push('…');
        truncated
    } else {
        s.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::textree::classify::AttributeMap;

    #[test]
    fn indentation_follows_nesting() {
        let mut tree = Tree::new();
        let chapter = tree.append_child(
            tree.root(),
            Node::new("Chapter", Some("Intro".to_string()), AttributeMap::new()),
        );
        tree.append_child(
            chapter,
            Node::new("Leaf", Some("first point".to_string()), AttributeMap::new()),
        );
        assert_eq!(
            to_treeviz_str(&tree),
            "root\n  Chapter · Intro\n    Leaf · first point\n"
        );
    }

    #[test]
    fn long_content_is_truncated() {
        let long = "x".repeat(64);
        assert_eq!(truncate(&long, 30).chars().count(), 31);
        assert!(truncate(&long, 30).ends_with('…'));
    }
}
