//! Tag formatter: XML-like markup output
//!
//! Serializes the tree to indented markup, one element per node:
//!
//! ```text
//! <root>
//!   <Chapter title="Intro">Intro
//!     <Section>Background</Section>
//!   </Chapter>
//! </root>
//! ```
//!
//! Leaf nodes close on the same line; containers close on their own line
//! after their children. Attribute order follows the node's attribute map
//! (which is ordered), and text is minimally escaped.

use crate::textree::formats::registry::{FormatError, Formatter};
use crate::textree::tree::{Node, NodeId, Tree, Visitor};

/// Formatter producing XML-like tag markup.
pub struct TagFormatter;

impl Formatter for TagFormatter {
    fn name(&self) -> &str {
        "tag"
    }

    fn serialize(&self, tree: &Tree) -> Result<String, FormatError> {
        Ok(serialize_tag(tree))
    }

    fn description(&self) -> &str {
        "XML-like tag markup"
    }
}

/// Serialize a tree to tag markup.
pub fn serialize_tag(tree: &Tree) -> String {
    let mut writer = TagWriter {
        out: String::new(),
        depth: 0,
    };
    tree.accept(&mut writer);
    writer.out
}

struct TagWriter {
    out: String,
    depth: usize,
}

impl TagWriter {
    fn indent(&mut self) {
        for _ in 0..self.depth {
            self.out.push_str("  ");
        }
    }

    fn open_tag(&mut self, node: &Node) {
        self.out.push('<');
        self.out.push_str(node.tag());
        for (name, value) in node.attributes() {
            self.out.push(' ');
            self.out.push_str(name);
            self.out.push_str("=\"");
            self.out.push_str(&escape_attr(value));
            self.out.push('"');
        }
        self.out.push('>');
    }

    fn close_tag(&mut self, node: &Node) {
        self.out.push_str("</");
        self.out.push_str(node.tag());
        self.out.push_str(">\n");
    }
}

impl Visitor for TagWriter {
    fn enter_node(&mut self, _tree: &Tree, _id: NodeId, node: &Node) {
        self.indent();
        self.open_tag(node);
        if let Some(text) = node.content() {
            self.out.push_str(&escape_text(text));
        }
        if node.is_leaf() {
            self.close_tag(node);
        } else {
            self.out.push('\n');
            self.depth += 1;
        }
    }

    fn leave_node(&mut self, _tree: &Tree, _id: NodeId, node: &Node) {
        if !node.is_leaf() {
            self.depth -= 1;
            self.indent();
            self.close_tag(node);
        }
    }
}

fn escape_text(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

fn escape_attr(value: &str) -> String {
    escape_text(value).replace('"', "&quot;")
}
