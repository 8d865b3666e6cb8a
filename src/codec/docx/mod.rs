//! DOCX (WordprocessingML package) persistence of the document model.
//!
//! Paragraphs, runs, named paragraph styles, tables, section margins,
//! default headers and footers, and core properties are mapped. Everything
//! else in the package (images, numbering, comments, fields) is not read and
//! is not written back.

mod reader;
mod writer;

use std::collections::HashMap;
use std::io::{Cursor, Read, Write};

use zip::result::ZipError;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipArchive, ZipWriter};

use super::{CodecOptions, DocumentCodec};
use crate::error::{Error, Result};
use crate::model::{Document, Paragraph, Section};

use self::writer::{HeaderFooterPart, SectionRefs, StyleIds};

const CONTENT_TYPES: &str = "[Content_Types].xml";
const PACKAGE_RELS: &str = "_rels/.rels";
const CORE_PROPERTIES: &str = "docProps/core.xml";
const DOCUMENT: &str = "word/document.xml";
const DOCUMENT_RELS: &str = "word/_rels/document.xml.rels";
const STYLES: &str = "word/styles.xml";

/// Reads and writes `.docx` packages.
#[derive(Debug, Clone, Default)]
pub struct DocxCodec {
    options: CodecOptions,
}

impl DocxCodec {
    /// Create a codec with the given options.
    pub fn new(options: CodecOptions) -> Self {
        Self { options }
    }

    /// Get the codec options.
    pub fn options(&self) -> &CodecOptions {
        &self.options
    }
}

/// Open zip archive with part lookup by name.
struct Package<'a> {
    archive: ZipArchive<Cursor<&'a [u8]>>,
    limit: usize,
}

impl<'a> Package<'a> {
    fn open(data: &'a [u8], limit: usize) -> Result<Self> {
        let archive = ZipArchive::new(Cursor::new(data))
            .map_err(|e| Error::MalformedDocument(format!("not a DOCX package: {}", e)))?;
        Ok(Self { archive, limit })
    }

    /// Read a part, `None` when the package does not have it.
    fn part(&mut self, name: &str) -> Result<Option<Vec<u8>>> {
        let mut file = match self.archive.by_name(name) {
            Ok(file) => file,
            Err(ZipError::FileNotFound) => return Ok(None),
            Err(e) => return Err(Error::MalformedDocument(format!("{}: {}", name, e))),
        };

        let size = usize::try_from(file.size()).unwrap_or(usize::MAX);
        if size > self.limit {
            return Err(Error::DocumentTooLarge {
                size,
                limit: self.limit,
            });
        }

        let mut content = Vec::with_capacity(size);
        file.read_to_end(&mut content)
            .map_err(|e| Error::MalformedDocument(format!("{}: {}", name, e)))?;
        Ok(Some(content))
    }

    fn require(&mut self, name: &str) -> Result<Vec<u8>> {
        self.part(name)?
            .ok_or_else(|| Error::MalformedDocument(format!("missing part {}", name)))
    }
}

/// Resolve a relationship target of `word/document.xml` to a part name.
fn part_name(target: &str) -> String {
    match target.strip_prefix('/') {
        Some(absolute) => absolute.to_string(),
        None => format!("word/{}", target),
    }
}

impl DocxCodec {
    fn read_header_footer(
        package: &mut Package<'_>,
        rels: &HashMap<String, String>,
        id: &str,
        styles: &HashMap<String, String>,
    ) -> Result<Vec<Paragraph>> {
        let Some(target) = rels.get(id) else {
            log::warn!("Unresolved header/footer relationship {}", id);
            return Ok(Vec::new());
        };
        let name = part_name(target);
        match package.part(&name)? {
            Some(xml) => Ok(reader::read_body(&xml, &name, styles)?.into_paragraphs()),
            None => {
                log::warn!("Header/footer part {} is missing", name);
                Ok(Vec::new())
            }
        }
    }
}

impl DocumentCodec for DocxCodec {
    fn parse(&self, data: &[u8]) -> Result<Document> {
        if data.len() > self.options.max_size {
            return Err(Error::DocumentTooLarge {
                size: data.len(),
                limit: self.options.max_size,
            });
        }
        if data.is_empty() {
            return Err(Error::MalformedDocument("empty input".to_string()));
        }

        let mut package = Package::open(data, self.options.max_size)?;
        let rels = match package.part(DOCUMENT_RELS)? {
            Some(xml) => reader::read_relationships(&xml, DOCUMENT_RELS)?,
            None => HashMap::new(),
        };
        let styles = match package.part(STYLES)? {
            Some(xml) => reader::read_styles(&xml, STYLES)?,
            None => reader::Styles::default(),
        };

        let mut document = Document::new();
        if let Some(xml) = package.part(CORE_PROPERTIES)? {
            document.metadata = reader::read_core_properties(&xml, CORE_PROPERTIES)?;
        }

        let body = reader::read_body(&package.require(DOCUMENT)?, DOCUMENT, &styles.names)?;
        document.blocks = body.blocks;
        for props in body.sections {
            let mut section = Section::with_margins(props.margins);
            if let Some(id) = &props.header {
                section.header = Self::read_header_footer(&mut package, &rels, id, &styles.names)?;
            }
            if let Some(id) = &props.footer {
                section.footer = Self::read_header_footer(&mut package, &rels, id, &styles.names)?;
            }
            document.add_section(section);
        }
        document.styles = styles.catalog;

        log::debug!(
            "Parsed DOCX with {} blocks, {} sections and {} styles",
            document.blocks.len(),
            document.sections.len(),
            document.styles.len()
        );
        Ok(document)
    }

    fn serialize(&self, document: &Document) -> Result<Vec<u8>> {
        let ids = StyleIds::new(&document.styles);

        let mut header_footer = Vec::new();
        let mut refs = Vec::with_capacity(document.sections.len());
        let mut part_xml = Vec::new();
        for section in &document.sections {
            let mut section_refs = SectionRefs::default();
            for (footer, paragraphs) in [(false, &section.header), (true, &section.footer)] {
                if paragraphs.is_empty() {
                    continue;
                }
                let kind = if footer { "footer" } else { "header" };
                let count = header_footer
                    .iter()
                    .filter(|p: &&HeaderFooterPart| p.footer == footer)
                    .count();
                let part = HeaderFooterPart {
                    file: format!("{}{}.xml", kind, count + 1),
                    // rId1 is the styles relationship.
                    id: format!("rId{}", header_footer.len() + 2),
                    footer,
                };
                if footer {
                    section_refs.footer = Some(part.id.clone());
                } else {
                    section_refs.header = Some(part.id.clone());
                }
                let root = if footer { "ftr" } else { "hdr" };
                part_xml.push((
                    format!("word/{}", part.file),
                    writer::header_footer_xml(root, paragraphs, &ids),
                ));
                header_footer.push(part);
            }
            refs.push(section_refs);
        }

        let mut parts = vec![
            (CONTENT_TYPES.to_string(), writer::content_types_xml(&header_footer)),
            (PACKAGE_RELS.to_string(), writer::package_rels_xml()),
            (
                CORE_PROPERTIES.to_string(),
                writer::core_properties_xml(&document.metadata),
            ),
            (DOCUMENT.to_string(), writer::document_xml(document, &ids, &refs)),
            (DOCUMENT_RELS.to_string(), writer::document_rels_xml(&header_footer)),
            (STYLES.to_string(), writer::styles_xml(&document.styles, &ids)),
        ];
        parts.extend(part_xml);

        let write_error = |e: ZipError| Error::Serialize(format!("DOCX write error: {}", e));
        let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
        let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);
        for (name, xml) in parts {
            zip.start_file(name, options).map_err(write_error)?;
            zip.write_all(xml.as_bytes())?;
        }
        Ok(zip.finish().map_err(write_error)?.into_inner())
    }

    fn extension(&self) -> &'static str {
        "docx"
    }
}
