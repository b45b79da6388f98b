//! Main module for textree library functionality
//!
//! The parse flow is a single pass over classified lines:
//! 1. **Classification**: a [`classify::Classifier`] turns one raw line into a
//!    [`classify::Classification`] (level kind + content + attributes, or `Skip`)
//! 2. **Placement**: the [`builder::TreeBuilder`] resolves the correct parent for
//!    the new node against its active stack and appends it to the tree
//! 3. **Serialization**: a [`formats::Formatter`] renders the finished
//!    [`tree::Tree`] to a concrete output format
//!
//! The [`pipeline`] module wires the stages together; [`config`] builds the
//! level registry and attribute schema from declarative YAML/JSON files.

pub mod builder;
pub mod classify;
pub mod config;
pub mod formats;
pub mod pipeline;
pub mod registry;
pub mod schema;
pub mod tree;

pub use builder::{Anomaly, BuildError, BuildOutput, PlacementPolicy, SkippedLine, TreeBuilder};
pub use classify::{AttributeMap, Classification, Classifier, HeadingClassifier};
pub use config::{ConfigError, ParserConfig};
pub use pipeline::{Pipeline, PipelineError};
pub use registry::{LevelRegistry, RegistryError};
pub use schema::AttributeSchema;
pub use tree::{Node, NodeId, Tree, Visitor};
