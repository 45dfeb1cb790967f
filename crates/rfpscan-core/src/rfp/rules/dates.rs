//! Key date extraction for labelled solicitation dates.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::trace;

use super::patterns::{DATE_DAY_MONTH_YEAR, DATE_ISO, DATE_MONTH_DAY_YEAR, DATE_US_NUMERIC};
use super::{ExtractionMatch, FieldExtractor};
use crate::rfp::vocabulary::DateRule;

/// A labelled date found in the text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatedEvent {
    /// Vocabulary label, e.g. "Expected Award Date".
    pub label: String,
    /// Captured text, trimmed. Free text, possibly not a date at all.
    pub value: String,
    /// Calendar date, when the value could be parsed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<NaiveDate>,
}

impl FieldExtractor for DateRule {
    type Output = ExtractionMatch<String>;

    fn extract(&self, text: &str) -> Option<Self::Output> {
        let caps = self.pattern.captures(text)?;
        capture_value(&caps)
    }

    fn extract_all(&self, text: &str) -> Vec<Self::Output> {
        self.pattern
            .captures_iter(text)
            .filter_map(|caps| capture_value(&caps))
            .collect()
    }
}

fn capture_value(caps: &regex::Captures<'_>) -> Option<ExtractionMatch<String>> {
    let group = caps.get(1)?;
    Some(
        ExtractionMatch::new(group.as_str().trim().to_string())
            .with_position(group.start(), group.end()),
    )
}

/// Extracts one value per date label. Labels without a match are skipped.
pub struct KeyDateExtractor<'a> {
    rules: &'a [DateRule],
}

impl<'a> KeyDateExtractor<'a> {
    pub fn new(rules: &'a [DateRule]) -> Self {
        Self { rules }
    }

    /// First match per label, in label order.
    pub fn extract(&self, text: &str) -> Vec<DatedEvent> {
        self.rules
            .iter()
            .filter_map(|rule| {
                let found = FieldExtractor::extract(rule, text)?;
                trace!("{} -> {:?}", rule.label, found.value);
                Some(DatedEvent {
                    label: rule.label.clone(),
                    date: parse_date(&found.value),
                    value: found.value,
                })
            })
            .collect()
    }
}

/// Calendar date parser for free-text date values.
pub struct DateParser;

impl DateParser {
    pub fn new() -> Self {
        Self
    }
}

impl Default for DateParser {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldExtractor for DateParser {
    type Output = ExtractionMatch<NaiveDate>;

    fn extract(&self, text: &str) -> Option<Self::Output> {
        let mut all = self.extract_all(text);
        all.sort_by_key(|m| m.position.map(|(start, _)| start));
        all.into_iter().next()
    }

    fn extract_all(&self, text: &str) -> Vec<Self::Output> {
        let mut results = Vec::new();

        // March 5, 2025
        for caps in DATE_MONTH_DAY_YEAR.captures_iter(text) {
            let month = month_to_number(&caps[1]);
            let day: u32 = caps[2].parse().unwrap_or(0);
            let year: i32 = caps[3].parse().unwrap_or(0);
            push_date(&mut results, &caps, NaiveDate::from_ymd_opt(year, month, day));
        }

        // 5 March 2025
        for caps in DATE_DAY_MONTH_YEAR.captures_iter(text) {
            let day: u32 = caps[1].parse().unwrap_or(0);
            let month = month_to_number(&caps[2]);
            let year: i32 = caps[3].parse().unwrap_or(0);
            push_date(&mut results, &caps, NaiveDate::from_ymd_opt(year, month, day));
        }

        // 2025-03-05
        for caps in DATE_ISO.captures_iter(text) {
            let year: i32 = caps[1].parse().unwrap_or(0);
            let month: u32 = caps[2].parse().unwrap_or(0);
            let day: u32 = caps[3].parse().unwrap_or(0);
            push_date(&mut results, &caps, NaiveDate::from_ymd_opt(year, month, day));
        }

        // 03/05/2025
        for caps in DATE_US_NUMERIC.captures_iter(text) {
            let month: u32 = caps[1].parse().unwrap_or(0);
            let day: u32 = caps[2].parse().unwrap_or(0);
            let year = parse_year(&caps[3]);
            push_date(&mut results, &caps, NaiveDate::from_ymd_opt(year, month, day));
        }

        results
    }
}

fn push_date(
    results: &mut Vec<ExtractionMatch<NaiveDate>>,
    caps: &regex::Captures<'_>,
    date: Option<NaiveDate>,
) {
    let (Some(date), Some(full_match)) = (date, caps.get(0)) else {
        return;
    };

    // Skip if already found
    if results.iter().any(|r| r.value == date) {
        return;
    }

    results.push(
        ExtractionMatch::new(date)
            .with_position(full_match.start(), full_match.end()),
    );
}

/// Parse the earliest calendar date mentioned in a value.
pub fn parse_date(value: &str) -> Option<NaiveDate> {
    DateParser::new().extract(value).map(|m| m.value)
}

fn parse_year(s: &str) -> i32 {
    let year: i32 = s.parse().unwrap_or(0);
    if year < 100 {
        // Two-digit year: assume 2000s for 00-50, 1900s for 51-99
        if year <= 50 {
            2000 + year
        } else {
            1900 + year
        }
    } else {
        year
    }
}

fn month_to_number(month: &str) -> u32 {
    match month.to_lowercase().get(..3) {
        Some("jan") => 1,
        Some("feb") => 2,
        Some("mar") => 3,
        Some("apr") => 4,
        Some("may") => 5,
        Some("jun") => 6,
        Some("jul") => 7,
        Some("aug") => 8,
        Some("sep") => 9,
        Some("oct") => 10,
        Some("nov") => 11,
        Some("dec") => 12,
        _ => 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rfp::vocabulary::Vocabulary;
    use pretty_assertions::assert_eq;

    fn ymd(y: i32, m: u32, d: u32) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(y, m, d)
    }

    #[test]
    fn test_first_occurrence_wins() {
        let vocab = Vocabulary::oil_and_gas();
        let text = "Expected Award Date: April 1, 2025\n\
                    Addendum 2\n\
                    Expected Award Date: April 15, 2025";

        let events = KeyDateExtractor::new(&vocab.dates).extract(text);
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].value, "April 1, 2025");
        assert_eq!(events[0].date, ymd(2025, 4, 1));
    }

    #[test]
    fn test_vocabulary_order_not_document_order() {
        let vocab = Vocabulary::oil_and_gas();
        let text = "Anticipated Project Start: June 2025\n\
                    Pre-Bid Meeting: 02/12/2025 10:00 AM";

        let events = KeyDateExtractor::new(&vocab.dates).extract(text);
        let labels: Vec<_> = events.iter().map(|e| e.label.as_str()).collect();
        assert_eq!(labels, vec!["Pre-Bid Meeting", "Anticipated Project Start"]);
        assert_eq!(events[0].value, "02/12/2025 10:00 AM");
        assert_eq!(events[0].date, ymd(2025, 2, 12));
        assert_eq!(events[1].date, None);
    }

    #[test]
    fn test_case_insensitive_label() {
        let vocab = Vocabulary::oil_and_gas();
        let events = KeyDateExtractor::new(&vocab.dates).extract("DEADLINE FOR QUESTIONS:   TBD  ");
        assert_eq!(events[0].label, "Deadline for Questions");
        assert_eq!(events[0].value, "TBD");
    }

    #[test]
    fn test_value_on_next_line() {
        let vocab = Vocabulary::oil_and_gas();
        let events = KeyDateExtractor::new(&vocab.dates)
            .extract("Expected Award Date:\n  2025-04-01\n");
        assert_eq!(events[0].value, "2025-04-01");
        assert_eq!(events[0].date, ymd(2025, 4, 1));
    }

    #[test]
    fn test_extract_all_occurrences() {
        let vocab = Vocabulary::oil_and_gas();
        let rule = &vocab.dates[0];
        let text = "Pre-Bid Meeting: Jan 5, 2025\nPre-Bid Meeting: cancelled";

        let all = rule.extract_all(text);
        let values: Vec<_> = all.iter().map(|m| m.value.as_str()).collect();
        assert_eq!(values, vec!["Jan 5, 2025", "cancelled"]);
    }

    #[test]
    fn test_parse_date_formats() {
        assert_eq!(parse_date("March 5, 2025"), ymd(2025, 3, 5));
        assert_eq!(parse_date("Mar. 5th 2025 at noon"), ymd(2025, 3, 5));
        assert_eq!(parse_date("5 March 2025"), ymd(2025, 3, 5));
        assert_eq!(parse_date("2025-03-05"), ymd(2025, 3, 5));
        assert_eq!(parse_date("03/05/25"), ymd(2025, 3, 5));
        assert_eq!(parse_date("Q2 2025"), None);
        assert_eq!(parse_date("February 30, 2025"), None);
    }
}
