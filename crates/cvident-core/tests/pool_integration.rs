//! End-to-end batch resolution through the worker pool.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use cvident_core::{Config, Document, ProgressEvent, resolve_all};
use cvident_ner::{MockNer, NerBackend};

fn doc(id: &str, raw_text: &str, first_two_words: &str) -> Document {
    Document {
        id: id.to_string(),
        raw_text: raw_text.to_string(),
        first_two_words: first_two_words.to_string(),
    }
}

fn sample_batch() -> Vec<Document> {
    vec![
        doc(
            "smith.pdf",
            "John Smith\nEngineer\nEmail: j.smith@example.com",
            "John Smith",
        ),
        doc(
            "wong.docx",
            "Alice Wong\nDesigner\nalice.wong@studio.example",
            "Alice Wong",
        ),
        doc("blank.doc", "", ""),
    ]
}

#[tokio::test]
async fn resolves_whole_batch() {
    // No NER: smith.pdf resolves through email correlation (rule 2),
    // wong.docx through first-words/correlator corroboration (rule 1),
    // blank.doc to empty fields.
    let ner: Arc<dyn NerBackend> = Arc::new(MockNer::empty());
    let mut results = resolve_all(sample_batch(), ner, Config::default(), |_| {}).await;
    assert_eq!(results.len(), 3);

    results.sort_by(|a, b| a.filename.cmp(&b.filename));
    assert_eq!(results[0].filename, "blank.doc");
    assert_eq!(results[0].selected_name, "");
    assert_eq!(results[0].email, "");
    assert_eq!(results[1].filename, "smith.pdf");
    assert_eq!(results[1].selected_name, "Smith");
    assert_eq!(results[1].email, "j.smith@example.com");
    assert_eq!(results[2].selected_name, "Alice Wong");
    assert_eq!(results[2].email, "alice.wong@studio.example");
}

#[tokio::test]
async fn failed_document_is_omitted_not_fatal() {
    let mut batch = sample_batch();
    batch.push(doc("corrupt.pdf", "CORRUPT payload", "CORRUPT payload"));

    let ner: Arc<dyn NerBackend> =
        Arc::new(MockNer::with_persons(&["John Smith"]).failing_on("CORRUPT"));
    let failed = Arc::new(AtomicUsize::new(0));
    let failed_counter = failed.clone();

    let results = resolve_all(batch, ner, Config::default(), move |event| {
        if let ProgressEvent::Failed { filename, .. } = event {
            assert_eq!(filename, "corrupt.pdf");
            failed_counter.fetch_add(1, Ordering::SeqCst);
        }
    })
    .await;

    assert_eq!(results.len(), 3);
    assert!(results.iter().all(|r| r.filename != "corrupt.pdf"));
    assert_eq!(failed.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn single_worker_processes_everything() {
    let ner: Arc<dyn NerBackend> = Arc::new(MockNer::empty());
    let results = resolve_all(
        sample_batch(),
        ner,
        Config { num_workers: 1 },
        |_| {},
    )
    .await;
    assert_eq!(results.len(), 3);
}

#[tokio::test]
async fn progress_events_cover_every_document() {
    let ner: Arc<dyn NerBackend> = Arc::new(MockNer::empty());
    let resolved = Arc::new(AtomicUsize::new(0));
    let resolved_counter = resolved.clone();

    let _ = resolve_all(sample_batch(), ner, Config::default(), move |event| {
        if matches!(event, ProgressEvent::Resolved { .. }) {
            resolved_counter.fetch_add(1, Ordering::SeqCst);
        }
    })
    .await;

    assert_eq!(resolved.load(Ordering::SeqCst), 3);
}

#[tokio::test]
async fn empty_batch_returns_empty() {
    let ner: Arc<dyn NerBackend> = Arc::new(MockNer::empty());
    let results = resolve_all(vec![], ner, Config::default(), |_| {}).await;
    assert!(results.is_empty());
}
