//! PDF extraction: embedded text layer first, OCR rasterization second.

use std::path::Path;
use std::process::Command;

use mupdf::TextPageFlags;

use crate::{Document, ExtractError, document_id, first_two_words};

/// Extract a PDF, falling back to OCR when the text layer is empty
/// (scanned resumes are common enough that the fallback earns its keep).
pub fn extract(path: &Path) -> Result<Document, ExtractError> {
    let mut text = extract_text_layer(path)?;
    if text.trim().is_empty() {
        tracing::info!(file = %path.display(), "empty text layer, falling back to OCR");
        text = ocr_text(path)?;
    }
    Ok(Document {
        id: document_id(path),
        first_two_words: first_two_words(&text),
        raw_text: text,
    })
}

/// Extract the embedded text layer using MuPDF.
///
/// Iterates blocks and lines per page so line breaks land where the layout
/// puts them, then joins pages with newlines.
pub fn extract_text_layer(path: &Path) -> Result<String, ExtractError> {
    let path_str = path
        .to_str()
        .ok_or_else(|| ExtractError::Open("invalid path encoding".into()))?;

    let document =
        mupdf::Document::open(path_str).map_err(|e| ExtractError::Open(e.to_string()))?;

    let mut pages_text = Vec::new();

    for page_result in document
        .pages()
        .map_err(|e| ExtractError::Extraction(e.to_string()))?
    {
        let page = page_result.map_err(|e| ExtractError::Extraction(e.to_string()))?;
        let text_page = page
            .to_text_page(TextPageFlags::empty())
            .map_err(|e| ExtractError::Extraction(e.to_string()))?;

        let mut page_text = String::new();
        for block in text_page.blocks() {
            for line in block.lines() {
                let line_text: String = line
                    .chars()
                    .map(|c| c.char().unwrap_or('\u{FFFD}'))
                    .collect();
                page_text.push_str(&line_text);
                page_text.push('\n');
            }
        }
        pages_text.push(page_text);
    }

    Ok(pages_text.join("\n"))
}

/// OCR fallback: rasterize pages with `pdftoppm`, recognize with
/// `tesseract`. A missing toolchain surfaces as a normal extraction error
/// for this one document, never a panic.
fn ocr_text(path: &Path) -> Result<String, ExtractError> {
    let scratch = tempfile::tempdir()?;
    let prefix = scratch.path().join("page");

    let status = Command::new("pdftoppm")
        .arg("-r")
        .arg("300")
        .arg("-png")
        .arg(path)
        .arg(&prefix)
        .status()
        .map_err(|e| ExtractError::Ocr(format!("pdftoppm unavailable: {e}")))?;
    if !status.success() {
        return Err(ExtractError::Ocr(format!("pdftoppm exited with {status}")));
    }

    let mut pages: Vec<_> = std::fs::read_dir(scratch.path())?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|p| p.extension().is_some_and(|e| e == "png"))
        .collect();
    pages.sort();

    let mut text = String::new();
    for page in &pages {
        let output = Command::new("tesseract")
            .arg(page)
            .arg("stdout")
            .output()
            .map_err(|e| ExtractError::Ocr(format!("tesseract unavailable: {e}")))?;
        if !output.status.success() {
            return Err(ExtractError::Ocr(
                String::from_utf8_lossy(&output.stderr).trim().to_string(),
            ));
        }
        text.push_str(&String::from_utf8_lossy(&output.stdout));
        text.push('\n');
    }

    tracing::debug!(file = %path.display(), pages = pages.len(), "OCR fallback complete");
    Ok(text)
}
