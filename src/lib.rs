//! # docpolish
//!
//! Structural analysis and heuristic formatting engine for editable documents.
//!
//! The engine reads a document (ordered paragraphs and tables plus page
//! sections), assigns every element a semantic role from its text shape and
//! position, applies a consistent academic style, and reports what was wrong
//! and what it changed.
//!
//! ## Quick Start
//!
//! ```no_run
//! use docpolish::{format_document, parse_file, to_bytes};
//!
//! fn main() -> docpolish::Result<()> {
//!     let mut doc = parse_file("report.json")?;
//!
//!     let report = format_document(&mut doc);
//!     for line in report.lines() {
//!         println!("{}", line);
//!     }
//!
//!     std::fs::write("report.formatted.json", to_bytes(&doc)?)?;
//!     Ok(())
//! }
//! ```
//!
//! ## Features
//!
//! - **Rule-table classification**: titles, headings, list items, body text, table cells
//! - **Consistent styling**: fonts, sizes, alignment, spacing, margins, named styles
//! - **Reports**: per-category summaries and per-element issues
//! - **Pluggable text improvement**: any service behind [`TextImprover`]

pub mod classify;
pub mod codec;
pub mod error;
pub mod format;
pub mod improve;
pub mod model;
pub mod pipeline;
pub mod report;

// Re-export commonly used types
pub use classify::{Classifier, ClassifierConfig, HeadingLevel, Position, SemanticRole};
pub use codec::{CodecOptions, DocumentCodec, DocxCodec, JsonCodec, JsonFormat};
pub use error::{Error, Result};
pub use format::{FormatStats, Formatter, StyleRules};
pub use improve::{improve_document, EditorRole, ImproveError, ImproveOutcome, TextImprover};
pub use model::{
    Alignment, Block, Color, Document, Length, Margins, Metadata, Paragraph, Run, Section,
    StyleCatalog, StyleDefinition, Table, TableAlignment, TableCell, TableRow, VerticalAlignment,
};
pub use pipeline::{Pipeline, PipelineResult};
pub use report::{Category, ChangeRecord, RecordKind, Report, Reporter, Snapshot};

use std::path::Path;

/// Parse a document from bytes with default codec options.
///
/// DOCX packages are recognized by their zip signature; anything else is
/// read as JSON.
///
/// # Example
///
/// ```
/// let doc = docpolish::parse_bytes(br#"{"blocks": []}"#).unwrap();
/// assert!(doc.is_empty());
/// ```
pub fn parse_bytes(data: &[u8]) -> Result<Document> {
    codec::detect(data, CodecOptions::default()).parse(data)
}

/// Parse a document file with default codec options, choosing the codec by
/// file extension (`.docx` or JSON).
///
/// # Example
///
/// ```no_run
/// let doc = docpolish::parse_file("report.json").unwrap();
/// println!("Paragraphs: {}", doc.paragraph_count());
/// ```
pub fn parse_file<P: AsRef<Path>>(path: P) -> Result<Document> {
    let data = std::fs::read(&path)?;
    codec::for_path(path, CodecOptions::default()).parse(&data)
}

/// Parse a document file asynchronously.
#[cfg(feature = "async")]
pub async fn parse_file_async<P: AsRef<Path>>(path: P) -> Result<Document> {
    let data = tokio::fs::read(&path).await?;
    codec::for_path(path, CodecOptions::default()).parse(&data)
}

/// Serialize a document as JSON with default codec options.
pub fn to_bytes(document: &Document) -> Result<Vec<u8>> {
    JsonCodec::default().serialize(document)
}

/// Format a document in place with the default rules and summarize the changes.
pub fn format_document(document: &mut Document) -> Report {
    let snapshot = Snapshot::capture(document);
    Formatter::default().format(document);
    Reporter::default().summarize(document, Some(&snapshot))
}

/// Analyze a document against the default rules without changing it.
pub fn analyze_document(document: &Document) -> Report {
    Reporter::default().analyze(document)
}

/// Builder for processing documents.
///
/// # Example
///
/// ```no_run
/// use docpolish::{Docpolish, StyleRules};
///
/// let result = Docpolish::new()
///     .with_rules(StyleRules::default().with_body_size(11.0))
///     .compact()
///     .process_file("report.json")?;
/// result.write_to("report.formatted.json")?;
/// # Ok::<(), docpolish::Error>(())
/// ```
pub struct Docpolish {
    rules: StyleRules,
    codec_options: CodecOptions,
    improver: Option<Box<dyn TextImprover>>,
    role: EditorRole,
}

impl Docpolish {
    /// Create a new builder with default rules and codec options.
    pub fn new() -> Self {
        Self {
            rules: StyleRules::default(),
            codec_options: CodecOptions::default(),
            improver: None,
            role: EditorRole::default(),
        }
    }

    /// Set the style rule table.
    pub fn with_rules(mut self, rules: StyleRules) -> Self {
        self.rules = rules;
        self
    }

    /// Set codec options.
    pub fn with_codec_options(mut self, options: CodecOptions) -> Self {
        self.codec_options = options;
        self
    }

    /// Set the input size ceiling in bytes.
    pub fn with_max_size(mut self, bytes: usize) -> Self {
        self.codec_options = self.codec_options.with_max_size(bytes);
        self
    }

    /// Write compact JSON.
    pub fn compact(mut self) -> Self {
        self.codec_options = self.codec_options.compact();
        self
    }

    /// Run the text-improvement phase with `improver`.
    pub fn with_improver(mut self, improver: impl TextImprover + 'static) -> Self {
        self.improver = Some(Box::new(improver));
        self
    }

    /// Set the editor role used for improvement.
    pub fn with_role(mut self, role: EditorRole) -> Self {
        self.role = role;
        self
    }

    /// Parse and process a document file, choosing the codec by file extension.
    pub fn process_file<P: AsRef<Path>>(&self, path: P) -> Result<DocpolishResult> {
        let data = std::fs::read(&path)?;
        let codec = codec::for_path(path, self.codec_options.clone());
        let document = codec.parse(&data)?;
        self.run(document, codec)
    }

    /// Parse and process document bytes, DOCX or JSON.
    pub fn process_bytes(&self, data: &[u8]) -> Result<DocpolishResult> {
        let codec = codec::detect(data, self.codec_options.clone());
        let document = codec.parse(data)?;
        self.run(document, codec)
    }

    /// Process an already parsed document. The result serializes as JSON.
    pub fn process(&self, document: Document) -> Result<DocpolishResult> {
        self.run(document, Box::new(JsonCodec::new(self.codec_options.clone())))
    }

    fn run(&self, document: Document, codec: Box<dyn DocumentCodec>) -> Result<DocpolishResult> {
        self.rules.validate()?;

        let mut pipeline = Pipeline::new(self.rules.clone()).with_role(self.role);
        if let Some(improver) = &self.improver {
            pipeline = pipeline.with_improver(&**improver);
        }

        Ok(DocpolishResult {
            result: pipeline.run(document),
            codec,
            options: self.codec_options.clone(),
        })
    }
}

impl Default for Docpolish {
    fn default() -> Self {
        Self::new()
    }
}

/// Result of processing a document with [`Docpolish`].
pub struct DocpolishResult {
    /// Pipeline output
    pub result: PipelineResult,
    codec: Box<dyn DocumentCodec>,
    options: CodecOptions,
}

impl DocpolishResult {
    /// Get the formatted document.
    pub fn document(&self) -> &Document {
        &self.result.document
    }

    /// Issues found before formatting.
    pub fn issues(&self) -> &Report {
        &self.result.issues
    }

    /// Changes made by formatting.
    pub fn changes(&self) -> &Report {
        &self.result.changes
    }

    /// Codec the input was read with.
    pub fn codec(&self) -> &dyn DocumentCodec {
        &*self.codec
    }

    /// Serialize the formatted document in the input's format.
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        self.codec.serialize(&self.result.document)
    }

    /// Write the formatted document to `path`, in the format its extension names.
    pub fn write_to<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let codec = codec::for_path(&path, self.options.clone());
        std::fs::write(path, codec.serialize(&self.result.document)?)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_docpolish_builder() {
        let polish = Docpolish::new().with_max_size(1024).compact();
        assert_eq!(polish.codec_options.max_size, 1024);
        assert_eq!(polish.codec_options.format, JsonFormat::Compact);
        assert!(polish.improver.is_none());
    }

    #[test]
    fn test_invalid_rules_rejected() {
        let polish = Docpolish::new().with_rules(StyleRules::default().with_body_size(0.0));
        let result = polish.process(Document::new());
        assert!(matches!(result, Err(Error::InvalidRules(_))));
    }

    #[test]
    fn test_parse_bytes_empty_data() {
        let data: [u8; 0] = [];
        assert!(matches!(parse_bytes(&data), Err(Error::MalformedDocument(_))));
    }

    #[test]
    fn test_process_bytes() {
        let mut doc = Document::new();
        doc.add_paragraph(Paragraph::with_text("My Research Report"));
        let data = to_bytes(&doc).unwrap();

        let result = Docpolish::new().process_bytes(&data).unwrap();
        let first = result.document().paragraphs().next().unwrap();
        assert_eq!(first.style_name(), Some("Title"));
        assert_eq!(parse_bytes(&result.to_bytes().unwrap()).unwrap(), *result.document());
    }

    #[test]
    fn test_process_docx_bytes() {
        let mut doc = Document::new();
        doc.add_section(Section::with_margins(Margins::uniform(Length::from_cm(3.0))));
        doc.add_paragraph(Paragraph::with_text("My Research Report"));
        let data = DocxCodec::default().serialize(&doc).unwrap();

        let result = Docpolish::new().process_bytes(&data).unwrap();
        assert_eq!(result.codec().extension(), "docx");
        assert!(result.document().sections[0]
            .margins
            .is_uniform(Length::from_inches(1.0)));

        let reread = parse_bytes(&result.to_bytes().unwrap()).unwrap();
        assert_eq!(reread.paragraphs().next().and_then(|p| p.style_name()), Some("Title"));
    }

    #[test]
    fn test_format_and_analyze_document() {
        let mut doc = Document::new();
        doc.add_paragraph(Paragraph::with_text("Report"));
        assert_eq!(analyze_document(&doc).issues().count(), 1);

        let report = format_document(&mut doc);
        assert!(!report.is_minimal());
        assert_eq!(analyze_document(&doc).issues().count(), 0);
    }

    #[cfg(feature = "async")]
    #[tokio::test]
    async fn test_parse_file_async() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("doc.json");
        std::fs::write(&path, b"{}").unwrap();
        let doc = parse_file_async(&path).await.unwrap();
        assert!(doc.is_empty());
    }
}
