//! Core library for RFP and contract analysis.
//!
//! This crate provides:
//! - Document text extraction (PDF first, UTF-8 plain text fallback)
//! - Key date extraction against a labelled date vocabulary
//! - Compliance and deliverable presence matrices
//! - Clarification questions for vague compliance mentions
//! - Analysis reports with metrics and CSV export

pub mod error;
pub mod models;
pub mod pdf;
pub mod document;
pub mod rfp;

pub use error::{ExtractionError, PdfError, RfpError, Result};
pub use models::config::RfpConfig;
pub use models::report::{AnalysisReport, ComplianceMetrics, Table};
pub use document::{Document, DocumentKind, DocumentSource, ExtractedText, TextExtractor, TextOrigin, extract_text};
pub use pdf::{PdfExtractor, PdfProcessor};
pub use rfp::{DocumentAnalyzer, RfpAnalyzer, Vocabulary};
pub use rfp::rules::{ClarificationNote, DatedEvent, Findings, PresenceEntry};
