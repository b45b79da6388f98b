//! Parse orchestration
//!
//! The pipeline is the outermost surface of the library: it wires a
//! classifier and a configured registry into a tree builder and drives one
//! sequential pass over the input lines. Classification of individual lines
//! is independent, but placement is inherently serial — every placement
//! depends on the stack state left by all previous ones — so the pipeline
//! never reorders or parallelizes the pass.

use crate::textree::builder::{BuildError, BuildOutput, PlacementPolicy, TreeBuilder};
use crate::textree::classify::Classifier;
use crate::textree::registry::LevelRegistry;
use crate::textree::schema::AttributeSchema;
use std::fmt;

/// Errors surfaced by a pipeline run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PipelineError {
    /// The registry holds no tags at all; nothing could ever be placed.
    NotConfigured,
    /// Placement failed (see [`BuildError`]).
    Build(BuildError),
}

impl fmt::Display for PipelineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PipelineError::NotConfigured => {
                write!(f, "no tags registered; configure the registry before parsing")
            }
            PipelineError::Build(err) => write!(f, "{err}"),
        }
    }
}

impl std::error::Error for PipelineError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            PipelineError::Build(err) => Some(err),
            _ => None,
        }
    }
}

impl From<BuildError> for PipelineError {
    fn from(err: BuildError) -> Self {
        PipelineError::Build(err)
    }
}

/// Classifier + configuration, ready to run over input lines.
pub struct Pipeline<'a, C: Classifier + ?Sized> {
    classifier: &'a C,
    registry: &'a LevelRegistry,
    schema: Option<&'a AttributeSchema>,
    policy: PlacementPolicy,
}

impl<'a, C: Classifier + ?Sized> Pipeline<'a, C> {
    pub fn new(classifier: &'a C, registry: &'a LevelRegistry) -> Self {
        Self {
            classifier,
            registry,
            schema: None,
            policy: PlacementPolicy::default(),
        }
    }

    pub fn with_schema(mut self, schema: &'a AttributeSchema) -> Self {
        self.schema = Some(schema);
        self
    }

    pub fn with_policy(mut self, policy: PlacementPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Run the pipeline over an ordered sequence of raw lines.
    pub fn run_lines<I, S>(&self, lines: I) -> Result<BuildOutput, PipelineError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        if self.registry.is_empty() {
            return Err(PipelineError::NotConfigured);
        }
        let mut builder = TreeBuilder::new(self.registry).with_policy(self.policy);
        if let Some(schema) = self.schema {
            builder = builder.with_schema(schema);
        }
        for line in lines {
            builder.place(self.classifier.classify(line.as_ref()))?;
        }
        Ok(builder.finish())
    }

    /// Run the pipeline over a whole source document.
    pub fn run_str(&self, source: &str) -> Result<BuildOutput, PipelineError> {
        self.run_lines(source.lines())
    }
}

/// One-shot convenience: classify and place every line of `source`.
pub fn parse_str<C: Classifier + ?Sized>(
    classifier: &C,
    registry: &LevelRegistry,
    source: &str,
) -> Result<BuildOutput, PipelineError> {
    Pipeline::new(classifier, registry).run_str(source)
}
