use thiserror::Error;

pub mod heuristic;
pub mod mock;
pub mod serialized;

pub use heuristic::HeuristicNer;
pub use mock::MockNer;
pub use serialized::{ExclusiveNer, SerializedNer};

/// Label attached to a recognized entity span.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntityLabel {
    Person,
    Organization,
    Location,
    Other(String),
}

impl EntityLabel {
    pub fn as_str(&self) -> &str {
        match self {
            EntityLabel::Person => "PERSON",
            EntityLabel::Organization => "ORG",
            EntityLabel::Location => "LOC",
            EntityLabel::Other(s) => s.as_str(),
        }
    }
}

/// A labeled span of text returned by a backend, in document order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entity {
    pub text: String,
    pub label: EntityLabel,
}

impl Entity {
    pub fn new(text: impl Into<String>, label: EntityLabel) -> Self {
        Self {
            text: text.into(),
            label,
        }
    }

    pub fn person(text: impl Into<String>) -> Self {
        Self::new(text, EntityLabel::Person)
    }
}

#[derive(Error, Debug)]
pub enum NerError {
    #[error("model failure: {0}")]
    Model(String),
    #[error("malformed model output: {0}")]
    MalformedOutput(String),
}

/// A named-entity recognition capability.
///
/// Implementations must be safe for concurrent read-only inference; a model
/// that needs exclusive access per call can be adapted with
/// [`SerializedNer`]. Backends are constructed once at startup and shared
/// behind an `Arc` for the lifetime of the process.
pub trait NerBackend: Send + Sync {
    /// Human-readable backend name, for logs.
    fn name(&self) -> &str;

    /// Return the labeled entity spans of `text`, in document order.
    fn annotate(&self, text: &str) -> Result<Vec<Entity>, NerError>;
}
