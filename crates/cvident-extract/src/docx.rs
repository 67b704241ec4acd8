//! DOCX extraction: ZIP container plus a paragraph walk over the
//! WordprocessingML parts.
//!
//! Body and table text both live in `w:p` elements of
//! `word/document.xml`, so one paragraph walk covers them in document
//! order; header parts (`word/header*.xml`) are appended afterwards.

use std::io::{BufRead, BufReader};
use std::path::Path;

use quick_xml::Reader;
use quick_xml::events::Event;

use crate::{Document, ExtractError, document_id, first_two_words};

pub fn extract(path: &Path) -> Result<Document, ExtractError> {
    let file = std::fs::File::open(path)?;
    let mut archive =
        zip::ZipArchive::new(file).map_err(|e| ExtractError::Open(e.to_string()))?;

    let body = {
        let entry = archive
            .by_name("word/document.xml")
            .map_err(|e| ExtractError::Open(format!("word/document.xml: {e}")))?;
        read_paragraphs(BufReader::new(entry))?
    };

    let mut header_names: Vec<String> = archive
        .file_names()
        .filter(|n| n.starts_with("word/header") && n.ends_with(".xml"))
        .map(str::to_string)
        .collect();
    header_names.sort();

    let mut headers = Vec::new();
    for name in header_names {
        match archive.by_name(&name) {
            Ok(entry) => headers.extend(read_paragraphs(BufReader::new(entry))?),
            Err(e) => tracing::warn!(part = %name, error = %e, "skipping unreadable header part"),
        }
    }

    let first_paragraph = body
        .iter()
        .find(|p| !p.trim().is_empty())
        .cloned()
        .unwrap_or_default();

    let mut text = String::new();
    for paragraph in body.iter().chain(headers.iter()) {
        text.push_str(paragraph);
        text.push('\n');
    }

    Ok(Document {
        id: document_id(path),
        first_two_words: first_two_words(&first_paragraph),
        raw_text: text,
    })
}

/// Collect the text of every `w:p` element, one entry per paragraph.
fn read_paragraphs<R: BufRead>(reader: R) -> Result<Vec<String>, ExtractError> {
    let mut xml_reader = Reader::from_reader(reader);

    let mut buf = Vec::new();
    let mut paragraphs = Vec::new();
    let mut paragraph = String::new();
    let mut in_text = false;

    loop {
        match xml_reader.read_event_into(&mut buf) {
            Ok(Event::Start(ref e)) => match e.name().as_ref() {
                b"w:t" => in_text = true,
                b"w:tab" => paragraph.push('\t'),
                _ => {}
            },
            Ok(Event::Empty(ref e)) => match e.name().as_ref() {
                b"w:tab" => paragraph.push('\t'),
                b"w:br" | b"w:cr" => paragraph.push('\n'),
                _ => {}
            },
            Ok(Event::Text(ref t)) if in_text => {
                let chunk = t
                    .unescape()
                    .map_err(|e| ExtractError::Extraction(e.to_string()))?;
                paragraph.push_str(&chunk);
            }
            Ok(Event::End(ref e)) => match e.name().as_ref() {
                b"w:t" => in_text = false,
                b"w:p" => {
                    paragraphs.push(std::mem::take(&mut paragraph));
                }
                _ => {}
            },
            Ok(Event::Eof) => break,
            Err(e) => return Err(ExtractError::Extraction(e.to_string())),
            _ => {}
        }
        buf.clear();
    }

    // Text outside any w:p (malformed producers) still counts
    if !paragraph.trim().is_empty() {
        paragraphs.push(paragraph);
    }

    Ok(paragraphs)
}
