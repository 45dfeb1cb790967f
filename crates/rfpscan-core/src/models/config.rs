//! Configuration structures for the analysis pipeline.

use serde::{Deserialize, Serialize};

use crate::rfp::vocabulary::{COMPLIANCE_ITEMS, DATE_LABELS, DELIVERABLES};

/// Main configuration for the rfpscan pipeline.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RfpConfig {
    /// Text extraction configuration.
    pub extraction: ExtractionConfig,

    /// Clarification heuristic configuration.
    pub clarification: ClarificationConfig,

    /// Vocabularies matched against the document text.
    pub vocabulary: VocabularyConfig,
}

/// Text extraction configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionConfig {
    /// Maximum document size in bytes (0 = unlimited).
    pub max_bytes: usize,

    /// Largest share of invalid UTF-8 bytes the plain text fallback accepts (0.0 - 1.0).
    pub max_invalid_ratio: f64,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            max_bytes: 0,
            max_invalid_ratio: 1.0,
        }
    }
}

/// Clarification heuristic configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ClarificationConfig {
    /// Generate clarification questions at all.
    pub enabled: bool,

    /// Number of characters after a phrase inspected for a quantitative anchor.
    pub window_chars: usize,
}

impl Default for ClarificationConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            window_chars: 120,
        }
    }
}

/// A labelled key date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DateLabelConfig {
    /// Label reported for the date, e.g. "Expected Award Date".
    pub label: String,

    /// Custom regex with one capture group. Defaults to `<label>:\s*(.+)`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pattern: Option<String>,
}

/// Vocabulary configuration. Order is preserved in every report.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct VocabularyConfig {
    /// Key date labels, searched sparsely.
    pub dates: Vec<DateLabelConfig>,

    /// Compliance requirement phrases.
    pub compliance: Vec<String>,

    /// Deliverable phrases.
    pub deliverables: Vec<String>,
}

impl Default for VocabularyConfig {
    fn default() -> Self {
        Self {
            dates: DATE_LABELS
                .iter()
                .map(|label| DateLabelConfig {
                    label: label.to_string(),
                    pattern: None,
                })
                .collect(),
            compliance: COMPLIANCE_ITEMS.iter().map(|s| s.to_string()).collect(),
            deliverables: DELIVERABLES.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl RfpConfig {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &std::path::Path) -> Result<Self, std::io::Error> {
        let content = std::fs::read_to_string(path)?;
        serde_json::from_str(&content).map_err(|e| {
            std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string())
        })
    }

    /// Save configuration to a JSON file.
    pub fn save(&self, path: &std::path::Path) -> Result<(), std::io::Error> {
        let content = serde_json::to_string_pretty(self).map_err(|e| {
            std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string())
        })?;
        std::fs::write(path, content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_default_vocabulary_sizes() {
        let config = RfpConfig::default();
        assert_eq!(config.vocabulary.dates.len(), 5);
        assert_eq!(config.vocabulary.compliance.len(), 11);
        assert_eq!(config.vocabulary.deliverables.len(), 6);
        assert_eq!(config.clarification.window_chars, 120);
        assert_eq!(config.extraction.max_invalid_ratio, 1.0);
    }

    #[test]
    fn test_partial_config_keeps_defaults() {
        let config: RfpConfig =
            serde_json::from_str(r#"{"clarification": {"window_chars": 60}}"#).unwrap();
        assert_eq!(config.clarification.window_chars, 60);
        assert!(config.clarification.enabled);
        assert_eq!(config.vocabulary.compliance[0], "Health, Safety, and Environment");
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");

        let mut config = RfpConfig::default();
        config.vocabulary.deliverables = vec!["site survey".to_string()];
        config.save(&path).unwrap();

        let loaded = RfpConfig::from_file(&path).unwrap();
        assert_eq!(loaded.vocabulary.deliverables, vec!["site survey".to_string()]);
        assert_eq!(loaded.vocabulary.dates, config.vocabulary.dates);
    }

    #[test]
    fn test_from_file_invalid_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, "{ not json").unwrap();

        let err = RfpConfig::from_file(&path).unwrap_err();
        assert_eq!(err.kind(), std::io::ErrorKind::InvalidData);
    }
}
