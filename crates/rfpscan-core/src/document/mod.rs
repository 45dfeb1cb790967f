//! Input documents and their text extraction.

mod extractor;

pub use extractor::{ExtractedText, TextExtractor, TextOrigin, decode_plain_text, extract_text};

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::models::embedded::{SAMPLE_RFP, SAMPLE_RFP_NAME};

/// Declared type of a document. A hint only: extraction always tries PDF first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentKind {
    Pdf,
    Text,
}

impl DocumentKind {
    /// Guess the kind from a file extension.
    pub fn from_extension(extension: &str) -> Self {
        if extension.eq_ignore_ascii_case("pdf") {
            DocumentKind::Pdf
        } else {
            DocumentKind::Text
        }
    }

    /// Guess the kind from a file path.
    pub fn from_path(path: &Path) -> Self {
        path.extension()
            .and_then(|e| e.to_str())
            .map(Self::from_extension)
            .unwrap_or(DocumentKind::Text)
    }
}

/// Provenance of a document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DocumentSource {
    /// Supplied by the user.
    Uploaded { name: String },
    /// The bundled sample solicitation.
    Sample,
}

impl DocumentSource {
    /// Display name for the source.
    pub fn name(&self) -> &str {
        match self {
            DocumentSource::Uploaded { name } => name,
            DocumentSource::Sample => SAMPLE_RFP_NAME,
        }
    }
}

/// A document to analyze. Owned by a single analysis run.
#[derive(Debug, Clone)]
pub struct Document {
    pub bytes: Vec<u8>,
    pub kind: DocumentKind,
    pub source: DocumentSource,
}

impl Document {
    /// A user supplied document. The kind is guessed from the name.
    pub fn uploaded(name: impl Into<String>, bytes: Vec<u8>) -> Self {
        let name = name.into();
        Self {
            kind: DocumentKind::from_path(Path::new(&name)),
            bytes,
            source: DocumentSource::Uploaded { name },
        }
    }

    /// Read a document from disk.
    pub fn from_path(path: &Path) -> Result<Self> {
        let bytes = std::fs::read(path)?;
        let name = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("document")
            .to_string();

        Ok(Self {
            bytes,
            kind: DocumentKind::from_path(path),
            source: DocumentSource::Uploaded { name },
        })
    }

    /// The bundled sample solicitation.
    pub fn sample() -> Self {
        Self {
            bytes: SAMPLE_RFP.as_bytes().to_vec(),
            kind: DocumentKind::Text,
            source: DocumentSource::Sample,
        }
    }
}
