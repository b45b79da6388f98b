//! Output format implementations for tree serialization
//!
//! Serialization is a collaborator of the core, not part of it: every
//! format implements the [`Formatter`] trait against the finished
//! [`crate::textree::tree::Tree`] and is looked up by name through the
//! [`FormatRegistry`].
//!
//! Built-in formats:
//! - `tag`: XML-like markup, the canonical output
//! - `treeviz`: one line per node, for quick visual inspection
//! - `json`: nested JSON objects

pub mod json;
pub mod registry;
pub mod tag;
pub mod treeviz;

pub use json::JsonFormatter;
pub use registry::{FormatError, FormatRegistry, Formatter};
pub use tag::{serialize_tag, TagFormatter};
pub use treeviz::{to_treeviz_str, TreevizFormatter};
