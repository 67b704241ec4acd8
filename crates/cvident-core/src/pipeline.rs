//! One document's resolution flow, start to finish.

use cvident_ner::{EntityLabel, NerBackend};

use crate::{Document, ResolutionResult, ResolveError, correlate, email, resolve, tokenize};

/// Resolve a single document: NER annotation and email location run on the
/// raw text, their outputs converge in the correlator, and the resolver
/// picks the final name. The email locator must complete before the
/// correlator (data dependency); NER has no ordering constraint.
///
/// Pure with respect to process state; errors are returned to the caller,
/// which logs and omits the document rather than aborting the batch.
pub fn resolve_document(
    doc: &Document,
    ner: &dyn NerBackend,
) -> Result<ResolutionResult, ResolveError> {
    let ner_names: Vec<String> = ner
        .annotate(&doc.raw_text)?
        .into_iter()
        .filter(|e| e.label == EntityLabel::Person)
        .map(|e| e.text)
        .collect();

    let located = email::locate_email(&doc.raw_text);
    let (correlated_name, correlated_ratio, email_address) = match &located {
        Some(candidate) if !candidate.context_lines.is_empty() => {
            let window = candidate.context_lines.join("\n");
            let snippets = [
                doc.first_two_words.as_str(),
                window.as_str(),
                candidate.anchor_line(),
            ];
            let tokens = tokenize::context_tokens(&snippets);
            let (name, score) = correlate::correlate(&tokens, &candidate.address);
            (name, score, candidate.address.clone())
        }
        Some(candidate) => (String::new(), 0.0, candidate.address.clone()),
        None => (String::new(), 0.0, String::new()),
    };

    let selected_name = resolve::resolve(
        &doc.first_two_words,
        &ner_names,
        &correlated_name,
        correlated_ratio,
        &email_address,
    );

    Ok(ResolutionResult {
        filename: doc.id.clone(),
        selected_name,
        email: email_address,
    })
}
