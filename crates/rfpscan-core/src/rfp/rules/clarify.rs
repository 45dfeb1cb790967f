//! Clarification questions for vague compliance mentions.
//!
//! A found compliance phrase is considered specific when the text right
//! after its first mention carries a date, a year, a percentage or any
//! number. Otherwise a clarification question is raised for it.

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use super::patterns::{ANCHOR_DATE, ANCHOR_DIGIT, ANCHOR_PERCENT, ANCHOR_YEAR};
use super::presence::PresenceEntry;
use crate::rfp::vocabulary::PhraseRule;

/// Default number of characters inspected after a phrase.
pub const DEFAULT_WINDOW_CHARS: usize = 120;

/// A question to send back to the issuer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClarificationNote {
    pub phrase: String,
    pub question: String,
}

impl ClarificationNote {
    pub fn for_phrase(phrase: &str) -> Self {
        Self {
            phrase: phrase.to_string(),
            question: format!(
                "Please provide more details regarding '{}' (specific standards, dates, or percentages).",
                phrase
            ),
        }
    }
}

/// Kind of quantitative token that makes a mention specific.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuantitativeAnchor {
    /// 12/31/2025, 1-2-25
    Date,
    /// A four digit number, usually a year.
    Year,
    Percent,
    /// Any other digit.
    Number,
}

/// First anchor kind present in `window`, checked from most to least specific.
pub fn find_anchor(window: &str) -> Option<QuantitativeAnchor> {
    if ANCHOR_DATE.is_match(window) {
        Some(QuantitativeAnchor::Date)
    } else if ANCHOR_YEAR.is_match(window) {
        Some(QuantitativeAnchor::Year)
    } else if ANCHOR_PERCENT.is_match(window) {
        Some(QuantitativeAnchor::Percent)
    } else if ANCHOR_DIGIT.is_match(window) {
        Some(QuantitativeAnchor::Number)
    } else {
        None
    }
}

/// Flags compliance phrases that are mentioned without specifics.
#[derive(Debug, Clone)]
pub struct ClarificationHeuristic {
    window_chars: usize,
}

impl ClarificationHeuristic {
    pub fn new() -> Self {
        Self {
            window_chars: DEFAULT_WINDOW_CHARS,
        }
    }

    /// Inspect `window_chars` characters after each phrase.
    pub fn with_window(mut self, window_chars: usize) -> Self {
        self.window_chars = window_chars;
        self
    }

    /// Text following the end of a match, bounded by the window or end of text.
    pub fn window<'t>(&self, text: &'t str, match_end: usize) -> &'t str {
        let rest = &text[match_end..];
        match rest.char_indices().nth(self.window_chars) {
            Some((end, _)) => &rest[..end],
            None => rest,
        }
    }

    /// One note per found phrase without a nearby anchor, in vocabulary order.
    ///
    /// A phrase counts as found only if `presence` has a found entry for it.
    pub fn clarify(
        &self,
        text: &str,
        phrases: &[PhraseRule],
        presence: &[PresenceEntry],
    ) -> Vec<ClarificationNote> {
        let notes: Vec<ClarificationNote> = phrases
            .iter()
            .filter(|rule| {
                presence
                    .iter()
                    .any(|entry| entry.found && entry.phrase == rule.phrase)
            })
            .filter_map(|rule| {
                let m = rule.pattern.find(text)?;
                let window = self.window(text, m.end());

                match find_anchor(window) {
                    Some(anchor) => {
                        trace!("'{}' anchored by {:?}", rule.phrase, anchor);
                        None
                    }
                    None => Some(ClarificationNote::for_phrase(&rule.phrase)),
                }
            })
            .collect();

        debug!("{} clarification notes", notes.len());
        notes
    }
}

impl Default for ClarificationHeuristic {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rfp::rules::presence::PresenceMatcher;
    use crate::rfp::vocabulary::Vocabulary;
    use pretty_assertions::assert_eq;

    fn notes_for(text: &str) -> Vec<ClarificationNote> {
        let vocab = Vocabulary::oil_and_gas();
        let presence = PresenceMatcher::new(&vocab.compliance).check(text);
        ClarificationHeuristic::new().clarify(text, &vocab.compliance, &presence)
    }

    #[test]
    fn test_find_anchor() {
        assert_eq!(find_anchor("due 12/31/2025"), Some(QuantitativeAnchor::Date));
        assert_eq!(find_anchor("revision 2015"), Some(QuantitativeAnchor::Year));
        assert_eq!(find_anchor("at least forty %"), Some(QuantitativeAnchor::Percent));
        assert_eq!(find_anchor("within 30 days"), Some(QuantitativeAnchor::Number));
        assert_eq!(find_anchor("as required"), None);
    }

    #[test]
    fn test_vague_mention_flagged() {
        let notes = notes_for("A Bid Bond shall accompany the proposal.");
        assert_eq!(
            notes,
            vec![ClarificationNote {
                phrase: "Bid Bond".to_string(),
                question: "Please provide more details regarding 'Bid Bond' \
                           (specific standards, dates, or percentages)."
                    .to_string(),
            }]
        );
    }

    #[test]
    fn test_phrase_digits_do_not_anchor() {
        let notes = notes_for("Registration to ISO 9001 is mandatory.");
        assert_eq!(notes.len(), 1);
        assert_eq!(notes[0].phrase, "ISO 9001");
    }

    #[test]
    fn test_anchors_suppress_note() {
        for text in [
            "Bid Bond of 5% of the bid price.",
            "Bid Bond valid until 12/31/2025.",
            "Bid Bond per the 2024 guidelines.",
            "Bid Bond within 30 days of award.",
        ] {
            assert!(notes_for(text).is_empty(), "unexpected note for {:?}", text);
        }
    }

    #[test]
    fn test_window_crosses_lines() {
        assert!(notes_for("Bid Bond required.\nSee clause 7.").is_empty());
    }

    #[test]
    fn test_anchor_beyond_window() {
        let text = format!("Bid Bond {} 10%", "x".repeat(130));
        assert_eq!(notes_for(&text).len(), 1);
    }

    #[test]
    fn test_window_is_char_bounded() {
        let heuristic = ClarificationHeuristic::new().with_window(3);
        let text = "Bid Bondéèêë9";
        assert_eq!(heuristic.window(text, 8), "éèê");
        assert_eq!(heuristic.window(text, text.len()), "");
    }

    #[test]
    fn test_presence_matched_by_phrase() {
        let vocab = Vocabulary::oil_and_gas();
        let text = "A Bid Bond and insurance are required.";
        let mut presence = PresenceMatcher::new(&vocab.compliance).check(text);
        presence.reverse();
        presence.truncate(3);

        let notes = ClarificationHeuristic::new().clarify(text, &vocab.compliance, &presence);
        let phrases: Vec<_> = notes.iter().map(|n| n.phrase.as_str()).collect();
        assert_eq!(phrases, vec!["insurance"]);
    }

    #[test]
    fn test_missing_phrases_never_flagged() {
        assert!(notes_for("Nothing relevant here.").is_empty());
    }

    #[test]
    fn test_notes_follow_vocabulary_order() {
        let notes = notes_for("insurance is required. Quality Assurance is required.");
        let phrases: Vec<_> = notes.iter().map(|n| n.phrase.as_str()).collect();
        assert_eq!(phrases, vec!["Quality Assurance", "insurance"]);
    }
}
