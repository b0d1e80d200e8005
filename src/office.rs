//! Office-text extraction boundary. Minute analysis accepts uploaded office
//! documents; only plain text is extracted in-process, binary formats are a
//! collaborator concern and answer with an unsupported-format error.

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Declared kind of an uploaded document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OfficeKind {
    Docx,
    Doc,
    Xlsx,
    Xls,
    Pdf,
    Txt,
}

impl OfficeKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Docx => "docx",
            Self::Doc => "doc",
            Self::Xlsx => "xlsx",
            Self::Xls => "xls",
            Self::Pdf => "pdf",
            Self::Txt => "txt",
        }
    }
}

impl FromStr for OfficeKind {
    type Err = ExtractionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "docx" => Ok(Self::Docx),
            "doc" => Ok(Self::Doc),
            "xlsx" => Ok(Self::Xlsx),
            "xls" => Ok(Self::Xls),
            "pdf" => Ok(Self::Pdf),
            "txt" => Ok(Self::Txt),
            other => Err(ExtractionError::UnknownKind(other.to_string())),
        }
    }
}

#[derive(Error, Debug)]
pub enum ExtractionError {
    #[error("unknown document kind '{0}'")]
    UnknownKind(String),

    #[error("unsupported format '{0}': binary extraction is not available in-process")]
    UnsupportedFormat(&'static str),

    #[error("document is not valid UTF-8")]
    InvalidEncoding,
}

/// Extracts plain text from an uploaded document of a declared kind.
pub trait TextExtractor: Send + Sync {
    fn extract(&self, kind: OfficeKind, bytes: &[u8]) -> Result<String, ExtractionError>;
}

/// In-process extractor: plain text only. Every binary office format is
/// rejected with the kind named in the error.
pub struct PlainTextExtractor;

impl TextExtractor for PlainTextExtractor {
    fn extract(&self, kind: OfficeKind, bytes: &[u8]) -> Result<String, ExtractionError> {
        match kind {
            OfficeKind::Txt => String::from_utf8(bytes.to_vec())
                .map_err(|_| ExtractionError::InvalidEncoding),
            other => Err(ExtractionError::UnsupportedFormat(other.as_str())),
        }
    }
}
