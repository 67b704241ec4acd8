//! Text extraction adapters.
//!
//! Each adapter turns one document format into a [`Document`]: an opaque
//! UTF-8 string with line breaks preserved, plus the first-two-words hint.
//! The resolution engine never sees how the text was produced, so adapters
//! are swappable per format.

use std::path::Path;

use thiserror::Error;

pub use cvident_core::Document;

pub mod doc;
pub mod docx;
#[cfg(feature = "mupdf")]
pub mod pdf;

#[derive(Error, Debug)]
pub enum ExtractError {
    #[error("failed to open document: {0}")]
    Open(String),
    #[error("failed to extract text: {0}")]
    Extraction(String),
    #[error("OCR fallback failed: {0}")]
    Ocr(String),
    #[error("unsupported file type: {0}")]
    UnsupportedFormat(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// First two whitespace-separated words of `text`, or the trimmed text when
/// fewer than two exist.
pub fn first_two_words(text: &str) -> String {
    let mut words = text.split_whitespace();
    match (words.next(), words.next()) {
        (Some(a), Some(b)) => format!("{} {}", a, b),
        _ => text.trim().to_string(),
    }
}

fn document_id(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| path.display().to_string())
}

fn extension_of(path: &Path) -> String {
    path.extension()
        .map(|e| e.to_string_lossy().to_lowercase())
        .unwrap_or_default()
}

/// Whether the batch scanner should pick this path up.
pub fn is_supported(path: &Path) -> bool {
    matches!(extension_of(path).as_str(), "pdf" | "docx" | "doc")
}

/// Extract a document, dispatching on the lowercased file extension.
///
/// Empty extracted text is not an error: the engine proceeds and produces
/// an empty result for the document.
pub fn extract_file(path: &Path) -> Result<Document, ExtractError> {
    match extension_of(path).as_str() {
        #[cfg(feature = "mupdf")]
        "pdf" => pdf::extract(path),
        #[cfg(not(feature = "mupdf"))]
        "pdf" => Err(ExtractError::UnsupportedFormat(
            "pdf support not compiled in".into(),
        )),
        "docx" => docx::extract(path),
        "doc" => doc::extract(path),
        other => Err(ExtractError::UnsupportedFormat(other.to_string())),
    }
}
