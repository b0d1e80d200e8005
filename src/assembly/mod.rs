//! Document assembly: deterministic rendering of the final document from a
//! validated `FormRecord`. Form values are the structural source of truth;
//! generated prose supplies narrative paragraphs only.

pub mod assets;
pub mod builder;
pub mod numbering;
pub mod pdf;
pub mod render_text;

pub use assets::*;
pub use builder::*;
pub use pdf::*;
pub use render_text::*;

use thiserror::Error;

/// One node of the in-memory document tree. The tree is built synchronously
/// end-to-end, then serialized once.
#[derive(Debug, Clone, PartialEq)]
pub enum DocNode {
    Heading { level: u8, text: String },
    Paragraph(String),
    /// One numbered item; `level` 1..=3 selects the numbering style.
    Numbered { level: u8, text: String },
    Table { headers: Vec<String>, rows: Vec<Vec<String>> },
    Image { caption: String, png: Vec<u8> },
}

#[derive(Debug, Clone, PartialEq)]
pub struct DocumentTree {
    pub title: String,
    pub nodes: Vec<DocNode>,
}

/// Wireframe image could not be loaded. Logged and omitted; assembly
/// continues without the image block.
#[derive(Error, Debug)]
pub enum AssetError {
    #[error("unsupported wireframe source: {0}")]
    UnsupportedSource(String),

    #[error("cannot read wireframe file {path}: {reason}")]
    Read { path: String, reason: String },

    #[error("invalid base64 payload: {0}")]
    Base64(String),

    #[error("invalid image data: {0}")]
    Decode(String),
}

#[derive(Error, Debug)]
pub enum ExportError {
    #[error("PDF rendering error: {0}")]
    Pdf(String),
}
