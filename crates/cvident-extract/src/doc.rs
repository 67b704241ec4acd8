//! Legacy binary `.doc` extraction.
//!
//! A portable best-effort sieve rather than a full OLE compound-file
//! parser: Word 97 text streams are stored as CP-1252 single bytes or
//! UTF-16LE, and both survive as recoverable printable runs in the raw
//! bytes. Resolution quality degrades gracefully with extraction quality.

use std::path::Path;

use crate::{Document, ExtractError, document_id, first_two_words};

/// Minimum run length worth keeping; shorter runs are binary noise.
const MIN_RUN: usize = 4;

pub fn extract(path: &Path) -> Result<Document, ExtractError> {
    let bytes = std::fs::read(path)?;
    if !bytes.starts_with(&[0xD0, 0xCF, 0x11, 0xE0]) {
        tracing::debug!(file = %path.display(), "no OLE signature, sieving raw bytes anyway");
    }
    let text = sieve_text(&bytes);
    Ok(Document {
        id: document_id(path),
        first_two_words: first_two_words(&text),
        raw_text: text,
    })
}

/// Harvest printable text runs, preferring whichever encoding recovered
/// more characters.
fn sieve_text(bytes: &[u8]) -> String {
    let narrow = narrow_runs(bytes);
    let wide = utf16le_runs(bytes);
    if wide.chars().count() > narrow.chars().count() {
        wide
    } else {
        narrow
    }
}

fn printable(b: u8) -> bool {
    (0x20..=0x7e).contains(&b) || b == b'\n' || b == b'\r' || b == b'\t'
}

fn push_run(out: &mut String, run: &mut String) {
    if run.trim().len() >= MIN_RUN {
        if !out.is_empty() {
            out.push('\n');
        }
        out.push_str(run.trim_end());
    }
    run.clear();
}

/// Runs of single-byte printable characters.
fn narrow_runs(bytes: &[u8]) -> String {
    let mut out = String::new();
    let mut run = String::new();
    for &b in bytes {
        if printable(b) {
            run.push(if b == b'\r' { '\n' } else { b as char });
        } else {
            push_run(&mut out, &mut run);
        }
    }
    push_run(&mut out, &mut run);
    out
}

/// Runs of UTF-16LE printable characters (`XX 00` byte pairs). The scan
/// advances one byte on a mismatch so it self-aligns to the stream.
fn utf16le_runs(bytes: &[u8]) -> String {
    let mut out = String::new();
    let mut run = String::new();
    let mut i = 0;
    while i + 1 < bytes.len() {
        if printable(bytes[i]) && bytes[i + 1] == 0 {
            let b = bytes[i];
            run.push(if b == b'\r' { '\n' } else { b as char });
            i += 2;
        } else {
            push_run(&mut out, &mut run);
            i += 1;
        }
    }
    push_run(&mut out, &mut run);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recovers_single_byte_runs() {
        let mut bytes = vec![0xD0, 0xCF, 0x11, 0xE0, 0x00, 0x01];
        bytes.extend_from_slice(b"John Smith");
        bytes.extend_from_slice(&[0x00, 0x05, 0xFF]);
        bytes.extend_from_slice(b"j.smith@example.com");
        bytes.extend_from_slice(&[0x02, 0x03]);

        let text = sieve_text(&bytes);
        assert!(text.contains("John Smith"));
        assert!(text.contains("j.smith@example.com"));
    }

    #[test]
    fn recovers_utf16le_runs() {
        let mut bytes = vec![0xFF, 0xFE, 0x01];
        for b in "Alice Wong resume text".bytes() {
            bytes.push(b);
            bytes.push(0);
        }
        bytes.push(0x07);

        let text = sieve_text(&bytes);
        assert!(text.contains("Alice Wong resume text"));
    }

    #[test]
    fn short_runs_are_noise() {
        let bytes = [0x00, b'a', b'b', 0x00, 0x01, b'x', 0x02];
        assert_eq!(sieve_text(&bytes), "");
    }

    #[test]
    fn extract_sets_hint_and_id() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("legacy.doc");
        let mut bytes = vec![0xD0, 0xCF, 0x11, 0xE0];
        bytes.extend_from_slice(b"Mary Major\nConsultant");
        std::fs::write(&path, &bytes).unwrap();

        let doc = extract(&path).unwrap();
        assert_eq!(doc.id, "legacy.doc");
        assert_eq!(doc.first_two_words, "Mary Major");
        assert!(doc.raw_text.contains("Consultant"));
    }
}
