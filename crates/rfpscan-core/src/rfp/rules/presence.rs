//! Presence checks for compliance and deliverable phrases.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::models::report::{FOUND_MARKER, MISSING_MARKER};
use crate::rfp::vocabulary::PhraseRule;

/// One vocabulary phrase and whether the text mentions it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PresenceEntry {
    pub phrase: String,
    pub found: bool,
    /// Byte offset of the first match.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<usize>,
}

impl PresenceEntry {
    /// Found/missing marker for tables.
    pub fn marker(&self) -> &'static str {
        if self.found { FOUND_MARKER } else { MISSING_MARKER }
    }
}

/// Checks every phrase of a vocabulary against a text.
pub struct PresenceMatcher<'a> {
    phrases: &'a [PhraseRule],
}

impl<'a> PresenceMatcher<'a> {
    pub fn new(phrases: &'a [PhraseRule]) -> Self {
        Self { phrases }
    }

    /// One entry per phrase, in vocabulary order.
    pub fn check(&self, text: &str) -> Vec<PresenceEntry> {
        let entries: Vec<PresenceEntry> = self
            .phrases
            .iter()
            .map(|rule| {
                let position = rule.pattern.find(text).map(|m| m.start());
                PresenceEntry {
                    phrase: rule.phrase.clone(),
                    found: position.is_some(),
                    position,
                }
            })
            .collect();

        debug!(
            "{} of {} phrases found",
            entries.iter().filter(|e| e.found).count(),
            entries.len()
        );
        entries
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rfp::vocabulary::Vocabulary;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_dense_rows_for_empty_text() {
        let vocab = Vocabulary::oil_and_gas();
        let rows = PresenceMatcher::new(&vocab.deliverables).check("");

        assert_eq!(rows.len(), 6);
        assert!(rows.iter().all(|r| !r.found && r.position.is_none()));
        assert_eq!(rows[0].phrase, "bid form");
        assert_eq!(rows[5].phrase, "References");
    }

    #[test]
    fn test_case_insensitive() {
        let vocab = Vocabulary::oil_and_gas();
        let text = "Registration to iso 9001 and an EQUIPMENT LIST are required.";

        let compliance = PresenceMatcher::new(&vocab.compliance).check(text);
        assert!(compliance[4].found);
        assert_eq!(compliance[4].position, Some(16));

        let deliverables = PresenceMatcher::new(&vocab.deliverables).check(text);
        assert!(deliverables[3].found);
    }

    #[test]
    fn test_substring_matches_count() {
        let vocab = Vocabulary::oil_and_gas();
        let rows = PresenceMatcher::new(&vocab.compliance).check("Coinsurance terms apply.");
        let insurance = rows.iter().find(|r| r.phrase == "insurance").unwrap();
        assert!(insurance.found);
    }

    #[test]
    fn test_marker() {
        let vocab = Vocabulary::oil_and_gas();
        let rows = PresenceMatcher::new(&vocab.compliance).check("Bid Bond");
        assert_eq!(rows[7].marker(), "✓");
        assert_eq!(rows[0].marker(), "✗");
    }
}
