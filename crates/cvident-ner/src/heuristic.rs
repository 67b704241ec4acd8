//! Rule-based NER tuned for resume text.
//!
//! Scans each line for runs of capitalized words and classifies the runs
//! with small fixed word tables. Person names are the primary target;
//! organization spans are labeled so callers can filter them out rather
//! than mistake them for people. No lexicon, no model files, fully
//! deterministic and reentrant.

use crate::{Entity, EntityLabel, NerBackend, NerError};

/// Words that never participate in an entity span.
const STOPWORDS: &[&str] = &[
    "the", "a", "an", "this", "that", "and", "or", "of", "in", "on", "at", "to", "for", "from",
    "by", "with", "as", "is", "are", "was", "were", "i", "my", "we",
];

/// Words that mark a capitalized span as a resume heading or contact label,
/// not a name.
const NON_NAME_WORDS: &[&str] = &[
    "curriculum",
    "vitae",
    "resume",
    "summary",
    "objective",
    "profile",
    "experience",
    "work",
    "employment",
    "education",
    "skills",
    "projects",
    "certifications",
    "references",
    "languages",
    "interests",
    "achievements",
    "contact",
    "phone",
    "mobile",
    "email",
    "address",
    "linkedin",
    "github",
    "page",
    // Job-title words: capitalized title lines are the most common false
    // positive right under the candidate's name.
    "software",
    "engineer",
    "developer",
    "programmer",
    "manager",
    "senior",
    "junior",
    "lead",
    "principal",
    "consultant",
    "analyst",
    "designer",
    "architect",
    "specialist",
    "assistant",
    "coordinator",
    "director",
    "officer",
    "intern",
    "accountant",
    "administrator",
    "supervisor",
    "technician",
    "scientist",
];

/// Suffixes that mark a span as an organization.
const ORG_SUFFIXES: &[&str] = &[
    "inc",
    "ltd",
    "llc",
    "corp",
    "plc",
    "gmbh",
    "limited",
    "corporation",
    "incorporated",
    "company",
    "co",
    "group",
    "holdings",
    "technologies",
    "solutions",
    "systems",
    "consulting",
    "university",
    "institute",
    "college",
    "school",
    "bank",
    "foundation",
    "agency",
];

/// Honorifics that strongly signal a following person name.
const PERSON_PREFIXES: &[&str] = &["mr", "ms", "mrs", "dr", "prof", "eng", "ir"];

/// Heuristic person/organization recognizer.
///
/// The default backend: loaded once at process start and shared read-only
/// across the worker pool. `annotate` is a pure function of its input.
#[derive(Debug, Clone, Default)]
pub struct HeuristicNer;

impl HeuristicNer {
    pub fn new() -> Self {
        Self
    }
}

impl NerBackend for HeuristicNer {
    fn name(&self) -> &str {
        "heuristic"
    }

    fn annotate(&self, text: &str) -> Result<Vec<Entity>, NerError> {
        let mut entities = Vec::new();
        for line in text.lines() {
            scan_line(line, &mut entities);
        }
        tracing::debug!(entities = entities.len(), "heuristic annotation complete");
        Ok(entities)
    }
}

/// Lowercased word with edge punctuation removed, for table lookups.
fn core_word(word: &str) -> String {
    word.trim_matches(|c: char| !c.is_alphanumeric())
        .to_lowercase()
}

fn starts_capitalized(word: &str) -> bool {
    word.trim_start_matches(|c: char| !c.is_alphanumeric())
        .chars()
        .next()
        .map(|c| c.is_uppercase())
        .unwrap_or(false)
}

/// Sentence-ending punctuation closes the current span unless the word is
/// an honorific abbreviation ("Dr.") or a middle initial ("J.").
fn closes_span(word: &str) -> bool {
    if !word.ends_with(['.', ',', ':', ';', '!', '?']) {
        return false;
    }
    let core = core_word(word);
    if PERSON_PREFIXES.contains(&core.as_str()) {
        return false;
    }
    !(word.ends_with('.') && core.chars().count() == 1)
}

/// Strip trailing punctuation from a span word, keeping single-initial dots.
fn clean_span_word(word: &str) -> &str {
    let trimmed = word.trim_end_matches([',', ':', ';', '!', '?']);
    if trimmed.ends_with('.') && core_word(trimmed).chars().count() > 1 {
        trimmed.trim_end_matches('.')
    } else {
        trimmed
    }
}

fn scan_line(line: &str, entities: &mut Vec<Entity>) {
    let words: Vec<&str> = line.split_whitespace().collect();
    let mut i = 0;
    while i < words.len() {
        let word = words[i];
        let core = core_word(word);
        if core.is_empty()
            || !starts_capitalized(word)
            || STOPWORDS.contains(&core.as_str())
            || PERSON_PREFIXES.contains(&core.as_str())
        {
            i += 1;
            continue;
        }

        // Collect a run of capitalized words.
        let start = i;
        while i < words.len() {
            let w = words[i];
            let w_core = core_word(w);
            if w_core.is_empty()
                || !starts_capitalized(w)
                || STOPWORDS.contains(&w_core.as_str())
            {
                break;
            }
            let closed = closes_span(w);
            i += 1;
            if closed {
                break;
            }
        }
        if i == start {
            i += 1;
            continue;
        }

        let span = &words[start..i];
        let prefix = start
            .checked_sub(1)
            .map(|p| PERSON_PREFIXES.contains(&core_word(words[p]).as_str()))
            .unwrap_or(false);
        if let Some(entity) = classify_span(span, prefix) {
            entities.push(entity);
        }
    }
}

fn classify_span(span: &[&str], has_person_prefix: bool) -> Option<Entity> {
    if span.len() < 2 || span.len() > 4 {
        return None;
    }
    // Names don't carry digits or address-like characters.
    if span
        .iter()
        .any(|w| w.chars().any(|c| c.is_ascii_digit()) || w.contains('@'))
    {
        return None;
    }

    let cores: Vec<String> = span.iter().map(|w| core_word(w)).collect();
    if cores
        .iter()
        .any(|c| ORG_SUFFIXES.contains(&c.as_str()))
    {
        let text = span
            .iter()
            .map(|w| clean_span_word(w))
            .collect::<Vec<_>>()
            .join(" ");
        return Some(Entity::new(text, EntityLabel::Organization));
    }
    if cores.iter().any(|c| NON_NAME_WORDS.contains(&c.as_str())) {
        return None;
    }
    // Every word must look like a name part: letters plus the usual
    // hyphen/apostrophe/initial-dot furniture.
    let name_like = span.iter().all(|w| {
        clean_span_word(w)
            .chars()
            .all(|c| c.is_alphabetic() || matches!(c, '-' | '\'' | '.'))
    });
    if !name_like && !has_person_prefix {
        return None;
    }

    let text = span
        .iter()
        .map(|w| clean_span_word(w))
        .collect::<Vec<_>>()
        .join(" ");
    Some(Entity::new(text, EntityLabel::Person))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn persons(text: &str) -> Vec<String> {
        HeuristicNer::new()
            .annotate(text)
            .unwrap()
            .into_iter()
            .filter(|e| e.label == EntityLabel::Person)
            .map(|e| e.text)
            .collect()
    }

    #[test]
    fn simple_name() {
        assert_eq!(persons("John Smith is a software engineer."), ["John Smith"]);
    }

    #[test]
    fn all_caps_header_name() {
        // Resume headers often shout the candidate's name
        assert_eq!(persons("JOHN SMITH\nSoftware Engineer"), ["JOHN SMITH"]);
    }

    #[test]
    fn honorific_prefix() {
        assert_eq!(persons("Dr. Maria Garcia\nCardiologist"), ["Maria Garcia"]);
    }

    #[test]
    fn middle_initial() {
        assert_eq!(persons("John Q. Public applied for the role."), [
            "John Q. Public"
        ]);
    }

    #[test]
    fn organization_not_person() {
        let ents = HeuristicNer::new()
            .annotate("Worked at Acme Technologies Inc. since 2019")
            .unwrap();
        assert!(ents.iter().all(|e| e.label != EntityLabel::Person));
        assert!(
            ents.iter()
                .any(|e| e.label == EntityLabel::Organization
                    && e.text.contains("Acme Technologies"))
        );
    }

    #[test]
    fn section_headings_rejected() {
        assert!(persons("Work Experience\nProfessional Summary\nContact Details").is_empty());
    }

    #[test]
    fn reference_names_found() {
        // Multiple names per document is normal; the resolver votes later.
        assert_eq!(
            persons("References: John Brown\nJane Doe, Acme Corp"),
            ["John Brown", "Jane Doe"]
        );
    }

    #[test]
    fn digits_and_emails_rejected() {
        assert!(persons("January 2020 Report\nContact J.Smith@example.com Now").is_empty());
    }

    #[test]
    fn single_word_spans_dropped() {
        assert!(persons("Paris\nExcellence\nMotivated").is_empty());
    }

    #[test]
    fn sentence_boundary_splits_spans() {
        assert_eq!(
            persons("Alice Wong. Bob Lee joined later."),
            ["Alice Wong", "Bob Lee"]
        );
    }

    #[test]
    fn empty_input() {
        assert!(persons("").is_empty());
    }
}
