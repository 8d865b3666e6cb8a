//! JSON persistence of the document model.

use super::{CodecOptions, DocumentCodec, JsonFormat};
use crate::error::{Error, Result};
use crate::model::Document;

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Reads and writes documents as JSON.
#[derive(Debug, Clone, Default)]
pub struct JsonCodec {
    options: CodecOptions,
}

impl JsonCodec {
    /// Create a codec with the given options.
    pub fn new(options: CodecOptions) -> Self {
        Self { options }
    }

    /// Get the codec options.
    pub fn options(&self) -> &CodecOptions {
        &self.options
    }
}

impl DocumentCodec for JsonCodec {
    fn parse(&self, data: &[u8]) -> Result<Document> {
        if data.len() > self.options.max_size {
            return Err(Error::DocumentTooLarge {
                size: data.len(),
                limit: self.options.max_size,
            });
        }

        let data = data.strip_prefix(UTF8_BOM).unwrap_or(data);
        let text = std::str::from_utf8(data)
            .map_err(|e| Error::MalformedDocument(format!("not valid UTF-8: {}", e)))?;
        if text.trim().is_empty() {
            return Err(Error::MalformedDocument("empty input".to_string()));
        }

        let document: Document = serde_json::from_str(text)
            .map_err(|e| Error::MalformedDocument(e.to_string()))?;
        log::debug!(
            "Parsed document with {} blocks and {} sections",
            document.blocks.len(),
            document.sections.len()
        );
        Ok(document)
    }

    fn serialize(&self, document: &Document) -> Result<Vec<u8>> {
        let result = match self.options.format {
            JsonFormat::Pretty => serde_json::to_vec_pretty(document),
            JsonFormat::Compact => serde_json::to_vec(document),
        };
        result.map_err(|e| Error::Serialize(format!("JSON serialization error: {}", e)))
    }

    fn extension(&self) -> &'static str {
        "json"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Paragraph;

    fn sample() -> Document {
        let mut doc = Document::new();
        doc.metadata.title = Some("Test".to_string());
        doc.add_paragraph(Paragraph::with_text("Hello"));
        doc
    }

    #[test]
    fn test_pretty_and_compact() {
        let pretty = JsonCodec::default().serialize(&sample()).unwrap();
        assert!(pretty.contains(&b'\n'));

        let compact = JsonCodec::new(CodecOptions::new().compact())
            .serialize(&sample())
            .unwrap();
        assert!(!compact.contains(&b'\n'));
    }

    #[test]
    fn test_bom_accepted() {
        let codec = JsonCodec::default();
        let mut data = UTF8_BOM.to_vec();
        data.extend(codec.serialize(&sample()).unwrap());
        assert_eq!(codec.parse(&data).unwrap(), sample());
    }

    #[test]
    fn test_rejects_bad_input() {
        let codec = JsonCodec::default();
        let inputs: [&[u8]; 5] = [b"", b"   ", b"\xFF\xFE\x00", b"{\"blocks\": 3}", b"not json"];
        for data in inputs {
            assert!(
                matches!(codec.parse(data), Err(Error::MalformedDocument(_))),
                "accepted {:?}",
                data
            );
        }
    }

    #[test]
    fn test_size_limit() {
        let codec = JsonCodec::new(CodecOptions::new().with_max_size(8));
        let err = codec.parse(b"{\"blocks\": []}").unwrap_err();
        assert!(matches!(err, Error::DocumentTooLarge { size: 14, limit: 8 }));
    }

    #[test]
    fn test_minimal_object() {
        let doc = JsonCodec::default().parse(b"{}").unwrap();
        assert!(doc.is_empty());
    }
}
