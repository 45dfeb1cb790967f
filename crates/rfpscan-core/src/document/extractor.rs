//! Document bytes to text: structured PDF extraction with a UTF-8 fallback.

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use super::{Document, DocumentKind};
use crate::error::{ExtractionError, PdfError};
use crate::models::config::ExtractionConfig;
use crate::pdf::{PdfExtractor, PdfProcessor};

/// Which path produced the text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TextOrigin {
    /// Extracted from a PDF container.
    Pdf { pages: u32 },
    /// Decoded as UTF-8, with invalid byte sequences dropped.
    PlainText { dropped_bytes: usize },
}

/// Text extracted from a document.
#[derive(Debug, Clone, PartialEq)]
pub struct ExtractedText {
    pub text: String,
    pub origin: TextOrigin,
}

/// Turns document bytes into a single text blob.
#[derive(Debug, Clone, Default)]
pub struct TextExtractor {
    config: ExtractionConfig,
}

impl TextExtractor {
    /// Create an extractor with default limits.
    pub fn new() -> Self {
        Self::default()
    }

    /// Use the given extraction limits.
    pub fn with_config(mut self, config: ExtractionConfig) -> Self {
        self.config = config;
        self
    }

    /// Extract the text of a document.
    pub fn extract(&self, document: &Document) -> Result<ExtractedText, ExtractionError> {
        let bytes = &document.bytes;

        if self.config.max_bytes > 0 && bytes.len() > self.config.max_bytes {
            return Err(ExtractionError::TooLarge {
                size: bytes.len(),
                limit: self.config.max_bytes,
            });
        }

        match extract_pdf_text(bytes) {
            Ok((text, pages)) => {
                if document.kind != DocumentKind::Pdf {
                    debug!("Document declared as {:?} parsed as PDF", document.kind);
                }
                info!("Extracted {} chars from {} PDF pages", text.len(), pages);
                Ok(ExtractedText {
                    text,
                    origin: TextOrigin::Pdf { pages },
                })
            }
            Err(e) => {
                if document.kind == DocumentKind::Pdf {
                    warn!("PDF parsing failed ({}), falling back to plain text", e);
                } else {
                    debug!("Not a PDF ({}), decoding as plain text", e);
                }

                let (text, dropped_bytes) = decode_plain_text(bytes, self.config.max_invalid_ratio)?;
                info!("Decoded {} chars of plain text", text.len());
                Ok(ExtractedText {
                    text,
                    origin: TextOrigin::PlainText { dropped_bytes },
                })
            }
        }
    }
}

/// Extract text from raw bytes with default limits.
pub fn extract_text(bytes: &[u8]) -> Result<String, ExtractionError> {
    let document = Document {
        bytes: bytes.to_vec(),
        kind: DocumentKind::Text,
        source: super::DocumentSource::Uploaded {
            name: "document".to_string(),
        },
    };
    TextExtractor::new().extract(&document).map(|extracted| extracted.text)
}

/// Structured path: all page texts joined by a newline, in page order.
///
/// A well-formed PDF without pages yields empty text.
fn extract_pdf_text(bytes: &[u8]) -> Result<(String, u32), PdfError> {
    let mut extractor = PdfExtractor::new();
    match extractor.load(bytes) {
        Ok(()) => {}
        Err(PdfError::NoPages) => {
            debug!("PDF has no pages");
            return Ok((String::new(), 0));
        }
        Err(e) => return Err(e),
    }

    let pages = extractor.extract_pages()?;
    for (i, page) in pages.iter().enumerate() {
        debug!("Page {}: {} chars", i + 1, page.len());
    }

    Ok((pages.join("\n"), extractor.page_count()))
}

/// Fallback path: decode UTF-8, dropping invalid sequences.
///
/// Returns the text and the number of dropped bytes. Fails when the input is
/// non-empty but nothing printable survives, or when the dropped share
/// exceeds `max_invalid_ratio` (1.0 disables that check).
pub fn decode_plain_text(bytes: &[u8], max_invalid_ratio: f64) -> Result<(String, usize), ExtractionError> {
    let mut text = String::with_capacity(bytes.len());
    let mut dropped = 0;

    for chunk in bytes.utf8_chunks() {
        text.push_str(chunk.valid());
        dropped += chunk.invalid().len();
    }

    if bytes.is_empty() {
        return Ok((text, 0));
    }

    let has_printable = text.chars().any(|c| !c.is_control() && !c.is_whitespace());
    let invalid_ratio = dropped as f64 / bytes.len() as f64;

    if !has_printable || invalid_ratio > max_invalid_ratio {
        return Err(ExtractionError::Undecodable {
            dropped,
            total: bytes.len(),
        });
    }

    if dropped > 0 {
        warn!("Dropped {} undecodable bytes", dropped);
    }

    Ok((text, dropped))
}
