//! Fixed-answer backend for tests.

use crate::{Entity, NerBackend, NerError};

/// Returns a canned entity list regardless of input. Optionally fails when
/// the input contains a trigger substring, to exercise per-document error
/// boundaries.
#[derive(Debug, Clone, Default)]
pub struct MockNer {
    answers: Vec<Entity>,
    fail_on: Option<String>,
}

impl MockNer {
    pub fn new(answers: Vec<Entity>) -> Self {
        Self {
            answers,
            fail_on: None,
        }
    }

    /// Backend that labels the given names as PERSON, in order.
    pub fn with_persons(names: &[&str]) -> Self {
        Self::new(names.iter().map(|n| Entity::person(*n)).collect())
    }

    pub fn empty() -> Self {
        Self::default()
    }

    /// Fail any `annotate` call whose input contains `trigger`.
    pub fn failing_on(mut self, trigger: impl Into<String>) -> Self {
        self.fail_on = Some(trigger.into());
        self
    }
}

impl NerBackend for MockNer {
    fn name(&self) -> &str {
        "mock"
    }

    fn annotate(&self, text: &str) -> Result<Vec<Entity>, NerError> {
        if let Some(trigger) = &self.fail_on
            && text.contains(trigger.as_str())
        {
            return Err(NerError::Model(format!(
                "mock failure triggered by {trigger:?}"
            )));
        }
        Ok(self.answers.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::EntityLabel;

    #[test]
    fn returns_canned_persons() {
        let ner = MockNer::with_persons(&["John Smith", "Jane Doe"]);
        let ents = ner.annotate("anything").unwrap();
        assert_eq!(ents.len(), 2);
        assert!(ents.iter().all(|e| e.label == EntityLabel::Person));
    }

    #[test]
    fn fails_on_trigger() {
        let ner = MockNer::empty().failing_on("CORRUPT");
        assert!(ner.annotate("fine text").is_ok());
        assert!(ner.annotate("this is CORRUPT data").is_err());
    }
}
