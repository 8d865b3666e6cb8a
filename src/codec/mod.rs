//! Document codecs: bytes in, [`Document`] out, and back.
//!
//! # Example
//!
//! ```
//! use docpolish::codec::{CodecOptions, DocumentCodec, JsonCodec, JsonFormat};
//! use docpolish::model::{Document, Paragraph};
//!
//! let mut doc = Document::new();
//! doc.add_paragraph(Paragraph::with_text("Hello"));
//!
//! let codec = JsonCodec::new(CodecOptions::new().with_format(JsonFormat::Compact));
//! let bytes = codec.serialize(&doc)?;
//! assert_eq!(codec.parse(&bytes)?, doc);
//! # Ok::<(), docpolish::Error>(())
//! ```

mod docx;
mod json;

pub use docx::DocxCodec;
pub use json::JsonCodec;

use std::path::Path;

use crate::error::Result;
use crate::model::Document;

/// Default document size ceiling (16 MiB).
pub const DEFAULT_MAX_SIZE: usize = 16 * 1024 * 1024;

/// Leading bytes of a zip archive, and so of every DOCX package.
const ZIP_MAGIC: &[u8] = b"PK\x03\x04";

/// Converts between persisted bytes and the document model.
pub trait DocumentCodec: Send + Sync {
    /// Decode a document.
    fn parse(&self, data: &[u8]) -> Result<Document>;

    /// Encode a document.
    fn serialize(&self, document: &Document) -> Result<Vec<u8>>;

    /// File extension written by this codec.
    fn extension(&self) -> &'static str;
}

/// JSON output layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JsonFormat {
    /// Pretty-printed JSON with indentation
    #[default]
    Pretty,
    /// Compact JSON without extra whitespace
    Compact,
}

/// Options shared by codecs.
#[derive(Debug, Clone)]
pub struct CodecOptions {
    /// Largest accepted input, in bytes
    pub max_size: usize,

    /// JSON output layout
    pub format: JsonFormat,
}

impl Default for CodecOptions {
    fn default() -> Self {
        Self {
            max_size: DEFAULT_MAX_SIZE,
            format: JsonFormat::default(),
        }
    }
}

impl CodecOptions {
    /// Create default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the size ceiling in bytes.
    pub fn with_max_size(mut self, bytes: usize) -> Self {
        self.max_size = bytes;
        self
    }

    /// Set the JSON output layout.
    pub fn with_format(mut self, format: JsonFormat) -> Self {
        self.format = format;
        self
    }

    /// Emit compact JSON.
    pub fn compact(self) -> Self {
        self.with_format(JsonFormat::Compact)
    }
}

/// Pick the codec for a file by its extension: `.docx` is read and written as
/// a DOCX package, anything else as JSON.
pub fn for_path(path: impl AsRef<Path>, options: CodecOptions) -> Box<dyn DocumentCodec> {
    let docx = path
        .as_ref()
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("docx"));
    if docx {
        Box::new(DocxCodec::new(options))
    } else {
        Box::new(JsonCodec::new(options))
    }
}

/// Pick the codec for in-memory data: zip archives are DOCX, anything else JSON.
pub fn detect(data: &[u8], options: CodecOptions) -> Box<dyn DocumentCodec> {
    if data.starts_with(ZIP_MAGIC) {
        Box::new(DocxCodec::new(options))
    } else {
        Box::new(JsonCodec::new(options))
    }
}
