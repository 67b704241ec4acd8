//! Candidate aggregation and consensus resolution.

use std::collections::HashMap;

use crate::similar::ratio;
use crate::text::normalize_name;
use crate::{NameCandidate, NameSource};

/// Pick the final name from all available guesses.
///
/// The priority order encodes a trust hierarchy: corroboration across
/// independent sources outranks any single heuristic; email correlation
/// outranks raw NER, which over-triggers on reference and organization
/// names; NER outranks the weak positional first-words guess.
///
/// 1. any normalized candidate occurring at least twice wins (most
///    frequent, first-seen on ties);
/// 2. else the correlated name, when non-empty with ratio above 0.5;
/// 3. else the NER name closest to the email local-part (sole name taken
///    as-is);
/// 4. else the first-two-words hint;
/// 5. else empty.
///
/// The result is always either empty or normalized title-case. Pure
/// function: identical inputs yield identical output.
pub fn resolve(
    first_two_words: &str,
    ner_names: &[String],
    correlated_name: &str,
    correlated_ratio: f64,
    email: &str,
) -> String {
    let mut candidates: Vec<NameCandidate> = Vec::with_capacity(ner_names.len() + 2);
    candidates.push(NameCandidate::new(first_two_words, NameSource::FirstWords));
    candidates.push(NameCandidate::new(
        correlated_name,
        NameSource::EmailCorrelated,
    ));
    for name in ner_names {
        candidates.push(NameCandidate::new(name.clone(), NameSource::Ner));
    }

    let normalized: Vec<String> = candidates
        .iter()
        .filter(|c| !c.text.trim().is_empty())
        .map(|c| normalize_name(&c.text))
        .collect();

    // Rule 1: corroboration. Duplicates from different sources converging
    // on the same value count.
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for name in &normalized {
        *counts.entry(name.as_str()).or_insert(0) += 1;
    }
    let mut top: Option<(&str, usize)> = None;
    for name in &normalized {
        let count = counts[name.as_str()];
        if top.map(|(_, best)| count > best).unwrap_or(true) {
            top = Some((name, count));
        }
    }
    if let Some((name, count)) = top
        && count >= 2
    {
        return name.to_string();
    }

    // Rule 2: email correlation above threshold.
    if !correlated_name.trim().is_empty() && correlated_ratio > 0.5 {
        return normalize_name(correlated_name);
    }

    // Rule 3: NER, tie-broken by similarity to the local-part (digits
    // retained, raw strings on both sides).
    if !ner_names.is_empty() {
        let local_part = email.split('@').next().unwrap_or("");
        let mut best = &ner_names[0];
        if ner_names.len() > 1 {
            let mut best_score = 0.0_f64;
            for name in ner_names {
                let score = ratio(local_part, name);
                if score > best_score {
                    best = name;
                    best_score = score;
                }
            }
        }
        return normalize_name(best);
    }

    // Rule 4: positional last resort.
    if !first_two_words.trim().is_empty() {
        return normalize_name(first_two_words);
    }

    // Rule 5: nothing to go on.
    String::new()
}
