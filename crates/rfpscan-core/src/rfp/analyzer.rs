//! The analysis pipeline: extract, match, clarify.

use tracing::{debug, info};

use super::DocumentAnalyzer;
use super::rules::{ClarificationHeuristic, match_findings};
use super::vocabulary::Vocabulary;
use crate::document::{Document, DocumentSource, ExtractedText, TextExtractor, TextOrigin};
use crate::error::Result;
use crate::models::config::{ExtractionConfig, RfpConfig};
use crate::models::report::AnalysisReport;

/// Stateless analyzer. Every run starts from the document bytes alone.
#[derive(Debug, Clone)]
pub struct RfpAnalyzer {
    vocabulary: Vocabulary,
    extractor: TextExtractor,
    clarifier: ClarificationHeuristic,
    clarify: bool,
}

impl RfpAnalyzer {
    /// Create an analyzer with the built-in oil & gas vocabulary.
    pub fn new() -> Self {
        Self {
            vocabulary: Vocabulary::oil_and_gas(),
            extractor: TextExtractor::new(),
            clarifier: ClarificationHeuristic::new(),
            clarify: true,
        }
    }

    /// Create an analyzer from configuration.
    pub fn from_config(config: &RfpConfig) -> Result<Self> {
        Ok(Self::new()
            .with_vocabulary(Vocabulary::from_config(&config.vocabulary)?)
            .with_extraction_config(config.extraction.clone())
            .with_window_chars(config.clarification.window_chars)
            .with_clarification(config.clarification.enabled))
    }

    /// Set the vocabulary.
    pub fn with_vocabulary(mut self, vocabulary: Vocabulary) -> Self {
        self.vocabulary = vocabulary;
        self
    }

    /// Set extraction limits.
    pub fn with_extraction_config(mut self, config: ExtractionConfig) -> Self {
        self.extractor = TextExtractor::new().with_config(config);
        self
    }

    /// Set the clarification window.
    pub fn with_window_chars(mut self, window_chars: usize) -> Self {
        self.clarifier = ClarificationHeuristic::new().with_window(window_chars);
        self
    }

    /// Enable or disable clarification questions.
    pub fn with_clarification(mut self, enabled: bool) -> Self {
        self.clarify = enabled;
        self
    }

    fn build_report(&self, source: DocumentSource, extracted: ExtractedText) -> AnalysisReport {
        let text = extracted.text.as_str();

        let findings = match_findings(text, &self.vocabulary);
        let clarifications = if self.clarify {
            self.clarifier
                .clarify(text, &self.vocabulary.compliance, &findings.compliance)
        } else {
            Vec::new()
        };

        let report = AnalysisReport {
            source,
            origin: extracted.origin,
            key_dates: findings.key_dates,
            compliance: findings.compliance,
            deliverables: findings.deliverables,
            clarifications,
        };

        let metrics = report.metrics();
        debug!(
            "Matched {} chars: {}/{} compliance items, {} key dates",
            text.len(),
            metrics.items_found,
            metrics.items_checked,
            metrics.key_dates_found
        );

        report
    }
}

impl Default for RfpAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

impl DocumentAnalyzer for RfpAnalyzer {
    fn analyze(&self, document: &Document) -> Result<AnalysisReport> {
        info!(
            "Analyzing {} ({} bytes, declared {:?})",
            document.source.name(),
            document.bytes.len(),
            document.kind
        );

        let extracted = self.extractor.extract(document)?;
        Ok(self.build_report(document.source.clone(), extracted))
    }

    fn analyze_text(&self, text: &str) -> AnalysisReport {
        let extracted = ExtractedText {
            text: text.to_string(),
            origin: TextOrigin::PlainText { dropped_bytes: 0 },
        };
        let source = DocumentSource::Uploaded {
            name: "text".to_string(),
        };
        self.build_report(source, extracted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{ExtractionError, RfpError};
    use crate::models::config::VocabularyConfig;
    use crate::models::report::Table;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_analyze_sample() {
        let report = RfpAnalyzer::new().analyze(&Document::sample()).unwrap();
        let metrics = report.metrics();

        assert_eq!(report.source, DocumentSource::Sample);
        assert_eq!(metrics.items_checked, 11);
        assert_eq!(metrics.items_found, 10);
        assert_eq!(metrics.items_missing, 1);
        assert_eq!(metrics.compliance_percent_label(), "91%");
        assert_eq!(metrics.key_dates_found, 5);

        let missing: Vec<_> = report.missing_compliance().map(|r| r.phrase.as_str()).collect();
        assert_eq!(missing, vec!["ISO 14001"]);
        assert!(report.deliverables.iter().all(|d| d.found));

        let flagged: Vec<_> = report.clarifications.iter().map(|n| n.phrase.as_str()).collect();
        assert_eq!(
            flagged,
            vec![
                "Quality Assurance",
                "Bid Bond",
                "insurance",
                "technical specifications",
                "project schedule",
            ]
        );
    }

    #[test]
    fn test_undecodable_document_halts() {
        let document = Document::uploaded("scan.bin", vec![0xff, 0xfe, 0x80, 0x81]);
        let result = RfpAnalyzer::new().analyze(&document);
        assert!(matches!(
            result,
            Err(RfpError::Extraction(ExtractionError::Undecodable { .. }))
        ));
    }

    #[test]
    fn test_idempotent_output() {
        let analyzer = RfpAnalyzer::new();
        let first = serde_json::to_string(&analyzer.analyze(&Document::sample()).unwrap()).unwrap();
        let second = serde_json::to_string(&analyzer.analyze(&Document::sample()).unwrap()).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_empty_text() {
        let report = RfpAnalyzer::new().analyze_text("");
        assert!(report.key_dates.is_empty());
        assert_eq!(report.compliance.len(), 11);
        assert_eq!(report.deliverables.len(), 6);
        assert!(report.clarifications.is_empty());
        assert_eq!(report.metrics().compliance_percent, 0.0);
    }

    #[test]
    fn test_empty_vocabulary() {
        let report = RfpAnalyzer::new()
            .with_vocabulary(Vocabulary::empty())
            .analyze_text("ISO 9001 Bid Bond");
        assert_eq!(report.metrics().compliance_percent_label(), "0%");
        assert_eq!(report.to_csv(Table::Compliance).unwrap(), "Requirement,Found\n");
    }

    #[test]
    fn test_clarification_disabled() {
        let report = RfpAnalyzer::new()
            .with_clarification(false)
            .analyze_text("A Bid Bond is required.");
        assert!(report.clarifications.is_empty());
    }

    #[test]
    fn test_custom_window() {
        let text = "Bid Bond required; see the amount in clause 7.";
        assert!(RfpAnalyzer::new().analyze_text(text).clarifications.is_empty());

        let narrow = RfpAnalyzer::new().with_window_chars(10).analyze_text(text);
        assert_eq!(narrow.clarifications.len(), 1);
    }

    #[test]
    fn test_from_config() {
        let mut config = RfpConfig::default();
        config.vocabulary = VocabularyConfig {
            dates: Vec::new(),
            compliance: vec!["H2S training".to_string()],
            deliverables: vec!["org chart".to_string()],
        };

        let analyzer = RfpAnalyzer::from_config(&config).unwrap();
        let report = analyzer.analyze_text("All crews need h2s training. Attach an Org Chart.");
        assert!(report.compliance[0].found);
        assert!(report.deliverables[0].found);
        assert_eq!(report.metrics().compliance_percent_label(), "100%");
    }
}
