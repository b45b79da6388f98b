//! Tree builder
//!
//! The builder owns the in-progress tree and the active node stack, and
//! resolves the correct parent for every classified line. The input is a
//! linear pre-order traversal of a tree that is only discovered
//! incrementally, so the stack approximates "the current path from root":
//! placement pops candidates until it finds a node whose priority is
//! strictly closer to the root than the new node's, then appends the new
//! node under it and pushes both back.
//!
//! Priorities may jump by more than one level (a document can skip a level),
//! which is why the pop-and-retry search exists: the nearest valid ancestor
//! adopts the node, and the jump is recorded as a non-fatal [`Anomaly`]
//! rather than an error. Candidates popped during the search can never be
//! ancestors of later nodes and are discarded for good.
//!
//! Stack invariant: the sentinel root sits at the base, appears exactly
//! once, and priorities strictly increase bottom to top.

use crate::textree::classify::Classification;
use crate::textree::registry::{LevelRegistry, RegistryError};
use crate::textree::schema::AttributeSchema;
use crate::textree::tree::{Node, NodeId, Tree};
use std::fmt;
use tracing::{debug, warn};

/// What to do when a line cannot be placed.
///
/// `Abort` reproduces the strict behavior: the first unresolvable line fails
/// the whole parse. `SkipLine` records the line as a diagnostic and carries
/// on with the tree and stack exactly as they were. An exhausted stack is
/// fatal under both policies: it means the root priority invariant is
/// broken, not that the input is malformed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PlacementPolicy {
    #[default]
    Abort,
    SkipLine,
}

/// Non-fatal structural anomaly: the resolved ancestor is more than one
/// priority step above the new node, i.e. the document skipped a level.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Anomaly {
    /// 1-based index of the classified line that triggered the anomaly.
    pub line: usize,
    /// Tag of the node being placed.
    pub tag: String,
    /// Tag of the ancestor that adopted it.
    pub ancestor_tag: String,
    /// Priority distance between the two (always > 1).
    pub gap: u32,
}

/// A line dropped under [`PlacementPolicy::SkipLine`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedLine {
    pub line: usize,
    pub level_kind: String,
    pub reason: String,
}

/// Errors that abort a parse.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BuildError {
    /// The classifier produced a level kind with no registered tag.
    UnknownLevelKind { line: usize, level_kind: String },
    /// A registry lookup failed during placement (configuration error).
    Registry(RegistryError),
    /// The stack emptied without reaching the root. Internal invariant
    /// violation; under a correct priority table the root always satisfies
    /// the ancestor test.
    StackExhausted { line: usize, tag: String },
}

impl fmt::Display for BuildError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BuildError::UnknownLevelKind { line, level_kind } => {
                write!(f, "line {line}: no tag registered for level kind '{level_kind}'")
            }
            BuildError::Registry(err) => write!(f, "registry error: {err}"),
            BuildError::StackExhausted { line, tag } => write!(
                f,
                "line {line}: active stack exhausted while placing '{tag}' (root priority invariant broken)"
            ),
        }
    }
}

impl std::error::Error for BuildError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            BuildError::Registry(err) => Some(err),
            _ => None,
        }
    }
}

impl From<RegistryError> for BuildError {
    fn from(err: RegistryError) -> Self {
        BuildError::Registry(err)
    }
}

/// Finished parse: the tree plus everything recorded along the way.
#[derive(Debug, Clone, PartialEq)]
pub struct BuildOutput {
    pub tree: Tree,
    pub anomalies: Vec<Anomaly>,
    pub skipped: Vec<SkippedLine>,
}

/// One-pass, append-only builder of the document tree.
///
/// Borrows its configuration; owns the tree until [`TreeBuilder::finish`]
/// moves it out. Feed classified lines through [`TreeBuilder::place`] in
/// document order.
pub struct TreeBuilder<'a> {
    registry: &'a LevelRegistry,
    schema: Option<&'a AttributeSchema>,
    policy: PlacementPolicy,
    tree: Tree,
    stack: Vec<NodeId>,
    anomalies: Vec<Anomaly>,
    skipped: Vec<SkippedLine>,
    line: usize,
}

impl<'a> TreeBuilder<'a> {
    pub fn new(registry: &'a LevelRegistry) -> Self {
        let tree = Tree::new();
        let root = tree.root();
        Self {
            registry,
            schema: None,
            policy: PlacementPolicy::default(),
            tree,
            stack: vec![root],
            anomalies: Vec::new(),
            skipped: Vec::new(),
            line: 0,
        }
    }

    pub fn with_policy(mut self, policy: PlacementPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Attach a schema to cross-check node attributes (diagnostics only).
    pub fn with_schema(mut self, schema: &'a AttributeSchema) -> Self {
        self.schema = Some(schema);
        self
    }

    /// The in-progress tree.
    pub fn tree(&self) -> &Tree {
        &self.tree
    }

    /// Anomalies recorded so far.
    pub fn anomalies(&self) -> &[Anomaly] {
        &self.anomalies
    }

    /// Lines skipped so far under [`PlacementPolicy::SkipLine`].
    pub fn skipped(&self) -> &[SkippedLine] {
        &self.skipped
    }

    /// Place one classified line.
    ///
    /// `Skip` classifications count as a processed line but leave the tree
    /// and the stack untouched. Everything else resolves a tag, finds the
    /// parent, appends the node, and updates the stack (terminal tags —
    /// content classes — are not pushed).
    pub fn place(&mut self, classification: Classification) -> Result<(), BuildError> {
        self.line += 1;
        let (level_kind, content, attributes) = match classification {
            Classification::Skip => {
                debug!(line = self.line, "skip line, stack untouched");
                return Ok(());
            }
            Classification::Line {
                level_kind,
                content,
                attributes,
            } => (level_kind, content, attributes),
        };

        let (tag, priority) = match self.resolve(&level_kind) {
            Ok(resolved) => resolved,
            Err(err) => return self.reject(level_kind, err),
        };

        let parent = self.find_parent(&tag, priority)?;

        if let Some(schema) = self.schema {
            let missing = schema.missing_for(&tag, &attributes);
            if !missing.is_empty() {
                warn!(line = self.line, tag = %tag, ?missing, "declared attributes absent");
            }
        }

        let id = self.tree.append_child(parent, Node::new(&tag, content, attributes));
        self.stack.push(parent);
        if self.registry.is_terminal_tag(&tag) {
            debug!(line = self.line, tag = %tag, "terminal tag placed, not pushed");
        } else {
            self.stack.push(id);
        }
        Ok(())
    }

    /// Hand the finished tree (and recorded diagnostics) to the caller.
    pub fn finish(self) -> BuildOutput {
        BuildOutput {
            tree: self.tree,
            anomalies: self.anomalies,
            skipped: self.skipped,
        }
    }

    /// Resolve level kind to (tag, priority) through the registry.
    fn resolve(&self, level_kind: &str) -> Result<(String, u32), BuildError> {
        let tag = self
            .registry
            .tag_for(level_kind)
            .ok_or_else(|| BuildError::UnknownLevelKind {
                line: self.line,
                level_kind: level_kind.to_string(),
            })?
            .to_string();
        let priority = self.registry.priority_of_tag(&tag)?;
        Ok((tag, priority))
    }

    /// Pop stack candidates until one qualifies as an ancestor.
    ///
    /// The returned id has been popped; the caller pushes it back together
    /// with the new node. Discarded candidates are gone for good: once a
    /// node at the same or deeper priority appears, nothing can attach under
    /// them anymore.
    fn find_parent(&mut self, tag: &str, priority: u32) -> Result<NodeId, BuildError> {
        loop {
            let candidate = self
                .stack
                .pop()
                .ok_or_else(|| BuildError::StackExhausted {
                    line: self.line,
                    tag: tag.to_string(),
                })?;
            if candidate == self.tree.root() {
                debug!(line = self.line, tag = %tag, "placed under root");
                return Ok(candidate);
            }
            let candidate_tag = self.tree.node(candidate).tag().to_string();
            let candidate_priority = self.registry.priority_of_tag(&candidate_tag)?;
            if candidate_priority < priority {
                let gap = priority - candidate_priority;
                if gap > 1 {
                    warn!(
                        line = self.line,
                        tag = %tag,
                        ancestor = %candidate_tag,
                        gap,
                        "level skipped in source document"
                    );
                    self.anomalies.push(Anomaly {
                        line: self.line,
                        tag: tag.to_string(),
                        ancestor_tag: candidate_tag,
                        gap,
                    });
                }
                return Ok(candidate);
            }
            debug!(
                line = self.line,
                candidate = %candidate_tag,
                "candidate at same or deeper level, discarded"
            );
        }
    }

    /// Apply the placement policy to an unresolvable line.
    fn reject(&mut self, level_kind: String, err: BuildError) -> Result<(), BuildError> {
        match self.policy {
            PlacementPolicy::Abort => Err(err),
            PlacementPolicy::SkipLine => {
                warn!(line = self.line, %level_kind, error = %err, "line skipped");
                self.skipped.push(SkippedLine {
                    line: self.line,
                    level_kind,
                    reason: err.to_string(),
                });
                Ok(())
            }
        }
    }

    /// Stack priorities bottom to top; the sentinel root reads as -1.
    #[cfg(test)]
    fn stack_priorities(&self) -> Vec<i64> {
        self.stack
            .iter()
            .map(|&id| {
                if id == self.tree.root() {
                    -1
                } else {
                    let tag = self.tree.node(id).tag();
                    i64::from(self.registry.priority_of_tag(tag).expect("stack tag is registered"))
                }
            })
            .collect()
    }
}
