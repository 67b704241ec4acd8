use serde::Serialize;
use thiserror::Error;

pub mod correlate;
pub mod email;
pub mod pipeline;
pub mod pool;
pub mod resolve;
pub mod similar;
pub mod text;
pub mod tokenize;

// Re-export for convenience
pub use correlate::correlate;
pub use email::locate_email;
pub use pipeline::resolve_document;
pub use pool::{DocJob, ResolverPool, resolve_all};
pub use resolve::resolve;
pub use similar::ratio;
pub use tokenize::context_tokens;

/// A document handed to the engine by an extractor.
///
/// The engine does not care how the text was produced, only that it is
/// UTF-8 with line breaks preserved. Owned by one pipeline invocation and
/// discarded after resolution.
#[derive(Debug, Clone)]
pub struct Document {
    /// Filename, used as the document identifier in results and logs.
    pub id: String,
    pub raw_text: String,
    /// Positional hint: the first two words of the document body.
    pub first_two_words: String,
}

/// Where a name guess came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NameSource {
    /// The first-two-words positional heuristic.
    FirstWords,
    /// A PERSON span from the NER collaborator.
    Ner,
    /// The fuzzy name-email correlator.
    EmailCorrelated,
}

/// One independently produced name guess.
#[derive(Debug, Clone)]
pub struct NameCandidate {
    pub text: String,
    pub source: NameSource,
    pub weight: f64,
}

impl NameCandidate {
    pub fn new(text: impl Into<String>, source: NameSource) -> Self {
        Self {
            text: text.into(),
            source,
            weight: 1.0,
        }
    }
}

/// The primary email address of a document plus its surrounding context
/// window. At most one per document: the first match in document order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailCandidate {
    pub address: String,
    /// Up to three lines before the matched line, the matched line, and up
    /// to three lines after, clamped at document boundaries.
    pub context_lines: Vec<String>,
    /// Index of the matched line in the document.
    pub anchor_line_index: usize,
}

impl EmailCandidate {
    /// The line the address was found on.
    ///
    /// The window is clamped at the top of the document, so the anchor sits
    /// at `min(anchor_line_index, radius)` within it.
    pub fn anchor_line(&self) -> &str {
        self.context_lines
            .get(self.anchor_line_index.min(email::CONTEXT_RADIUS))
            .map(String::as_str)
            .unwrap_or("")
    }
}

/// The sole externally visible artifact of the engine: one per document.
///
/// `selected_name` is either empty or non-empty title-cased; `email` is
/// either empty or a syntactically valid address.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolutionResult {
    pub filename: String,
    pub selected_name: String,
    pub email: String,
}

/// Engine configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Worker-pool width for batch resolution.
    pub num_workers: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self { num_workers: 8 }
    }
}

#[derive(Error, Debug)]
pub enum ResolveError {
    #[error("NER annotation failed: {0}")]
    Ner(#[from] cvident_ner::NerError),
}

/// Progress events emitted while a batch runs.
#[derive(Debug, Clone)]
pub enum ProgressEvent {
    Resolving {
        index: usize,
        total: usize,
        filename: String,
    },
    Resolved {
        index: usize,
        total: usize,
        result: ResolutionResult,
    },
    /// The document failed and is omitted from the batch result.
    Failed {
        index: usize,
        total: usize,
        filename: String,
        message: String,
    },
}
