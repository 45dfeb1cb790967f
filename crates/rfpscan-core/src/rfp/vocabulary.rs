//! Fixed vocabularies matched against solicitation text.

use regex::{Regex, RegexBuilder};

use crate::error::{Result, RfpError};
use crate::models::config::{DateLabelConfig, VocabularyConfig};

/// Key date labels of the built-in oil & gas vocabulary.
pub const DATE_LABELS: &[&str] = &[
    "Pre-Bid Meeting",
    "Deadline for Questions",
    "Proposal Submission Deadline",
    "Expected Award Date",
    "Anticipated Project Start",
];

/// Compliance requirements of the built-in oil & gas vocabulary.
pub const COMPLIANCE_ITEMS: &[&str] = &[
    "Health, Safety, and Environment",
    "Quality Assurance",
    "offshore oil and gas maintenance",
    "API certification",
    "ISO 9001",
    "ISO 14001",
    "Local Content",
    "Bid Bond",
    "insurance",
    "technical specifications",
    "project schedule",
];

/// Deliverables of the built-in oil & gas vocabulary.
pub const DELIVERABLES: &[&str] = &[
    "bid form",
    "Safety management plan",
    "Technical proposal",
    "equipment list",
    "Pricing schedule",
    "References",
];

/// A labelled date pattern. Capture group 1 holds the value.
#[derive(Debug, Clone)]
pub struct DateRule {
    pub label: String,
    pub pattern: Regex,
}

impl DateRule {
    /// `<label>:` followed by optional whitespace and the rest of the line.
    pub fn for_label(label: &str) -> Result<Self> {
        Self::with_pattern(label, &format!(r"{}:\s*(.+)", regex::escape(label)))
    }

    /// A custom pattern, matched case-insensitively.
    pub fn with_pattern(label: &str, pattern: &str) -> Result<Self> {
        let pattern = RegexBuilder::new(pattern)
            .case_insensitive(true)
            .build()
            .map_err(|e| RfpError::Config(format!("invalid pattern for '{}': {}", label, e)))?;

        if pattern.captures_len() < 2 {
            return Err(RfpError::Config(format!(
                "pattern for '{}' needs a capture group",
                label
            )));
        }

        Ok(Self {
            label: label.to_string(),
            pattern,
        })
    }

    fn from_config(config: &DateLabelConfig) -> Result<Self> {
        match &config.pattern {
            Some(pattern) => Self::with_pattern(&config.label, pattern),
            None => Self::for_label(&config.label),
        }
    }
}

/// A literal phrase, matched case-insensitively anywhere in the text.
///
/// No word boundaries: "insurance" also matches inside "coinsurance".
#[derive(Debug, Clone)]
pub struct PhraseRule {
    pub phrase: String,
    pub pattern: Regex,
}

impl PhraseRule {
    pub fn literal(phrase: &str) -> Result<Self> {
        if phrase.trim().is_empty() {
            return Err(RfpError::Config("vocabulary phrase is empty".to_string()));
        }

        let pattern = RegexBuilder::new(&regex::escape(phrase))
            .case_insensitive(true)
            .build()
            .map_err(|e| RfpError::Config(format!("invalid phrase '{}': {}", phrase, e)))?;

        Ok(Self {
            phrase: phrase.to_string(),
            pattern,
        })
    }
}

/// Compiled vocabularies. Iteration order is declaration order.
///
/// Dates are sparse (only matched labels are reported); compliance and
/// deliverables are dense (every phrase yields a row).
#[derive(Debug, Clone)]
pub struct Vocabulary {
    pub dates: Vec<DateRule>,
    pub compliance: Vec<PhraseRule>,
    pub deliverables: Vec<PhraseRule>,
}

impl Vocabulary {
    /// Compile a configured vocabulary.
    pub fn from_config(config: &VocabularyConfig) -> Result<Self> {
        Ok(Self {
            dates: config
                .dates
                .iter()
                .map(DateRule::from_config)
                .collect::<Result<_>>()?,
            compliance: config
                .compliance
                .iter()
                .map(|p| PhraseRule::literal(p))
                .collect::<Result<_>>()?,
            deliverables: config
                .deliverables
                .iter()
                .map(|p| PhraseRule::literal(p))
                .collect::<Result<_>>()?,
        })
    }

    /// The built-in oil & gas vocabulary.
    pub fn oil_and_gas() -> Self {
        Self::from_config(&VocabularyConfig::default())
            .expect("built-in vocabulary compiles")
    }

    /// A vocabulary with nothing to match.
    pub fn empty() -> Self {
        Self {
            dates: Vec::new(),
            compliance: Vec::new(),
            deliverables: Vec::new(),
        }
    }
}

impl Default for Vocabulary {
    fn default() -> Self {
        Self::oil_and_gas()
    }
}
