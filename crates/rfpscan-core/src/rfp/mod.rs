//! RFP analysis: vocabularies, matching rules and the analysis pipeline.

mod analyzer;
pub mod rules;
pub mod vocabulary;

pub use analyzer::RfpAnalyzer;
pub use vocabulary::Vocabulary;

use crate::document::Document;
use crate::error::Result;
use crate::models::report::AnalysisReport;

/// Trait for document analyzers.
pub trait DocumentAnalyzer {
    /// Extract text from a document and analyze it.
    fn analyze(&self, document: &Document) -> Result<AnalysisReport>;

    /// Analyze text that was already extracted.
    fn analyze_text(&self, text: &str) -> AnalysisReport;
}
