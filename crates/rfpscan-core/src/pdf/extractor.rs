//! PDF text extraction using lopdf and pdf-extract.

use std::panic;

use lopdf::Document;
use tracing::{debug, trace, warn};

use super::{PdfProcessor, Result};
use crate::error::PdfError;

/// PDF text extractor using lopdf for the container and pdf-extract for text.
pub struct PdfExtractor {
    document: Option<Document>,
    raw_data: Vec<u8>,
}

impl PdfExtractor {
    /// Create a new PDF extractor.
    pub fn new() -> Self {
        Self {
            document: None,
            raw_data: Vec::new(),
        }
    }

    fn document(&self) -> Result<&Document> {
        self.document
            .as_ref()
            .ok_or_else(|| PdfError::Parse("No document loaded".to_string()))
    }

    /// Per-page text via lopdf's content stream decoder.
    fn extract_pages_lopdf(&self, doc: &Document) -> Vec<String> {
        doc.get_pages()
            .keys()
            .map(|&page_num| match doc.extract_text(&[page_num]) {
                Ok(text) => text,
                Err(e) => {
                    trace!("No text on page {}: {}", page_num, e);
                    String::new()
                }
            })
            .collect()
    }
}

impl Default for PdfExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl PdfProcessor for PdfExtractor {
    fn load(&mut self, data: &[u8]) -> Result<()> {
        let mut doc = Document::load_mem(data).map_err(|e| PdfError::Parse(e.to_string()))?;

        // Handle PDFs with empty password encryption
        if doc.is_encrypted() {
            if doc.decrypt("").is_err() {
                return Err(PdfError::Encrypted);
            }
            debug!("Decrypted PDF with empty password");

            // pdf-extract needs the decrypted bytes
            let mut decrypted_data = Vec::new();
            doc.save_to(&mut decrypted_data)
                .map_err(|e| PdfError::Parse(format!("Failed to save decrypted PDF: {}", e)))?;
            self.raw_data = decrypted_data;
        } else {
            self.raw_data = data.to_vec();
        }

        let page_count = doc.get_pages().len();
        if page_count == 0 {
            return Err(PdfError::NoPages);
        }

        debug!("Loaded PDF with {} pages", page_count);
        self.document = Some(doc);
        Ok(())
    }

    fn page_count(&self) -> u32 {
        self.document
            .as_ref()
            .map(|doc| doc.get_pages().len() as u32)
            .unwrap_or(0)
    }

    fn extract_pages(&self) -> Result<Vec<String>> {
        let doc = self.document()?;
        let page_count = self.page_count() as usize;

        // pdf-extract panics on some loadable but malformed documents,
        // e.g. a Tf operator naming a font missing from the page resources.
        let raw_data = self.raw_data.as_slice();
        let extracted = panic::catch_unwind(|| pdf_extract::extract_text_from_mem_by_pages(raw_data));
        let Ok(extracted) = extracted else {
            warn!("pdf-extract panicked, using lopdf text");
            return Ok(self.extract_pages_lopdf(doc));
        };

        match extracted {
            Ok(pages) if pages.len() == page_count => {
                debug!("pdf-extract returned text for {} pages", pages.len());
                Ok(pages)
            }
            Ok(pages) => {
                warn!(
                    "pdf-extract returned {} pages, expected {}; using lopdf text",
                    pages.len(),
                    page_count
                );
                Ok(self.extract_pages_lopdf(doc))
            }
            Err(e) => {
                warn!("pdf-extract failed ({}), using lopdf text", e);
                Ok(self.extract_pages_lopdf(doc))
            }
        }
    }
}
