//! Rule-based finding extraction for solicitation text.

pub mod clarify;
pub mod dates;
pub mod patterns;
pub mod presence;

pub use clarify::{ClarificationHeuristic, ClarificationNote, QuantitativeAnchor, find_anchor};
pub use dates::{DateParser, DatedEvent, KeyDateExtractor, parse_date};
pub use presence::{PresenceEntry, PresenceMatcher};

use serde::{Deserialize, Serialize};

use super::vocabulary::{PhraseRule, Vocabulary};

/// Trait for field extractors.
pub trait FieldExtractor {
    /// The type of value this extractor produces.
    type Output;

    /// Extract the first occurrence of the field.
    fn extract(&self, text: &str) -> Option<Self::Output>;

    /// Extract all occurrences of the field, in document order.
    fn extract_all(&self, text: &str) -> Vec<Self::Output>;
}

/// A value found in the text, with where it was found.
#[derive(Debug, Clone)]
pub struct ExtractionMatch<T> {
    /// Extracted value.
    pub value: T,
    /// Byte range in the source text.
    pub position: Option<(usize, usize)>,
}

impl<T> ExtractionMatch<T> {
    pub fn new(value: T) -> Self {
        Self {
            value,
            position: None,
        }
    }

    pub fn with_position(mut self, start: usize, end: usize) -> Self {
        self.position = Some((start, end));
        self
    }
}

/// Everything the matcher finds in one text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Findings {
    pub key_dates: Vec<DatedEvent>,
    pub compliance: Vec<PresenceEntry>,
    pub deliverables: Vec<PresenceEntry>,
}

/// Run the date, compliance and deliverable matchers over `text`.
pub fn match_findings(text: &str, vocabulary: &Vocabulary) -> Findings {
    Findings {
        key_dates: KeyDateExtractor::new(&vocabulary.dates).extract(text),
        compliance: PresenceMatcher::new(&vocabulary.compliance).check(text),
        deliverables: PresenceMatcher::new(&vocabulary.deliverables).check(text),
    }
}

/// Clarification notes for found-but-vague compliance phrases, default window.
pub fn clarify(text: &str, compliance: &[PhraseRule], presence: &[PresenceEntry]) -> Vec<ClarificationNote> {
    ClarificationHeuristic::new().clarify(text, compliance, presence)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_counts_independent_of_content() {
        let vocab = Vocabulary::oil_and_gas();
        for text in ["", "nothing relevant here", "ISO 9001 and Bid Bond and bid form"] {
            let findings = match_findings(text, &vocab);
            assert_eq!(findings.compliance.len(), 11);
            assert_eq!(findings.deliverables.len(), 6);
        }
    }

    #[test]
    fn test_single_date_scenario() {
        let vocab = Vocabulary::oil_and_gas();
        let findings = match_findings("Proposal Submission Deadline: March 5, 2025", &vocab);

        assert_eq!(findings.key_dates.len(), 1);
        assert_eq!(findings.key_dates[0].label, "Proposal Submission Deadline");
        assert_eq!(findings.key_dates[0].value, "March 5, 2025");
    }

    #[test]
    fn test_iso_scenario() {
        let vocab = Vocabulary::oil_and_gas();
        let text = "Contractors shall hold ISO 9001 registration.";
        let findings = match_findings(text, &vocab);

        let iso = &findings.compliance[4];
        assert_eq!(iso.phrase, "ISO 9001");
        assert!(iso.found);

        let notes = clarify(text, &vocab.compliance, &findings.compliance);
        assert_eq!(notes.len(), 1);
        assert!(notes[0].question.contains("ISO 9001"));
    }

    #[test]
    fn test_idempotent() {
        let vocab = Vocabulary::oil_and_gas();
        let text = "Bid Bond: 5% of bid value.\nExpected Award Date: April 1, 2025";
        assert_eq!(match_findings(text, &vocab), match_findings(text, &vocab));
    }
}
