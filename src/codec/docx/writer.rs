//! Document model to WordprocessingML parts.

use std::collections::{BTreeMap, BTreeSet};

use chrono::{DateTime, SecondsFormat, Utc};
use quick_xml::escape::escape;

use crate::model::{
    Alignment, Block, Color, Document, Length, Metadata, Paragraph, Run, Section,
    StyleCatalog, StyleDefinition, Table, TableAlignment, VerticalAlignment,
};

const XML_DECLARATION: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#;
const NS_W: &str = "http://schemas.openxmlformats.org/wordprocessingml/2006/main";
const NS_R: &str = "http://schemas.openxmlformats.org/officeDocument/2006/relationships";
const REL_BASE: &str = "http://schemas.openxmlformats.org/officeDocument/2006/relationships";
const CONTENT_BASE: &str = "application/vnd.openxmlformats-officedocument.wordprocessingml";

/// Letter-sized text width in twips, shared out between table columns.
const TEXT_WIDTH: u32 = 9360;

fn twips(length: Length) -> i64 {
    (length.points() * 20.0).round() as i64
}

fn half_points(size: f32) -> i64 {
    (size * 2.0).round() as i64
}

fn hex(color: Color) -> String {
    color.to_hex().trim_start_matches('#').to_string()
}

fn jc(alignment: Alignment) -> &'static str {
    match alignment {
        Alignment::Left => "left",
        Alignment::Center => "center",
        Alignment::Right => "right",
        Alignment::Justify => "both",
    }
}

fn table_jc(alignment: TableAlignment) -> &'static str {
    match alignment {
        TableAlignment::Left => "left",
        TableAlignment::Center => "center",
        TableAlignment::Right => "right",
    }
}

/// Style ids for the catalog's style names.
///
/// Ids are the names without spaces or punctuation. Names outside the
/// catalog are referenced verbatim so they read back unchanged.
pub(super) struct StyleIds {
    ids: BTreeMap<String, String>,
}

impl StyleIds {
    pub fn new(catalog: &StyleCatalog) -> Self {
        let mut used = BTreeSet::new();
        let mut ids = BTreeMap::new();
        for name in catalog.names() {
            let base: String = name.chars().filter(|c| c.is_ascii_alphanumeric()).collect();
            let base = if base.is_empty() { "Style".to_string() } else { base };
            let mut id = base.clone();
            let mut n = 1;
            while !used.insert(id.clone()) {
                n += 1;
                id = format!("{}{}", base, n);
            }
            ids.insert(name.to_string(), id);
        }
        Self { ids }
    }

    pub fn id<'a>(&'a self, name: &'a str) -> &'a str {
        self.ids.get(name).map(String::as_str).unwrap_or(name)
    }
}

fn run_properties(
    font: Option<&str>,
    bold: Option<bool>,
    color: Option<Color>,
    size: Option<f32>,
) -> String {
    let mut props = String::new();
    if let Some(font) = font {
        let font = escape(font);
        props.push_str(&format!(
            r#"<w:rFonts w:ascii="{0}" w:hAnsi="{0}" w:cs="{0}"/>"#,
            font
        ));
    }
    match bold {
        Some(true) => props.push_str("<w:b/>"),
        Some(false) => props.push_str(r#"<w:b w:val="0"/>"#),
        None => {}
    }
    if let Some(color) = color {
        props.push_str(&format!(r#"<w:color w:val="{}"/>"#, hex(color)));
    }
    if let Some(size) = size {
        props.push_str(&format!(r#"<w:sz w:val="{}"/>"#, half_points(size)));
    }
    props
}

fn write_run(run: &Run, out: &mut String) {
    out.push_str("<w:r>");
    let props = run_properties(run.font.as_deref(), run.bold, run.color, run.size);
    if !props.is_empty() {
        out.push_str("<w:rPr>");
        out.push_str(&props);
        out.push_str("</w:rPr>");
    }

    let mut rest = run.text.as_str();
    while !rest.is_empty() {
        let end = rest.find(|c: char| c == '\t' || c == '\n').unwrap_or(rest.len());
        if end > 0 {
            out.push_str(r#"<w:t xml:space="preserve">"#);
            out.push_str(&escape(&rest[..end]));
            out.push_str("</w:t>");
        }
        match rest[end..].chars().next() {
            Some('\t') => out.push_str("<w:tab/>"),
            Some('\n') => out.push_str("<w:br/>"),
            _ => {}
        }
        rest = rest.get(end + 1..).unwrap_or("");
    }
    out.push_str("</w:r>");
}

fn write_paragraph(paragraph: &Paragraph, ids: &StyleIds, out: &mut String) {
    let mut props = String::new();
    if let Some(style) = paragraph.style_name() {
        props.push_str(&format!(r#"<w:pStyle w:val="{}"/>"#, escape(ids.id(style))));
    }
    if let Some(spacing) = paragraph.line_spacing {
        props.push_str(&format!(
            r#"<w:spacing w:line="{}" w:lineRule="auto"/>"#,
            (spacing * 240.0).round() as i64
        ));
    }
    if let Some(alignment) = paragraph.alignment {
        props.push_str(&format!(r#"<w:jc w:val="{}"/>"#, jc(alignment)));
    }

    out.push_str("<w:p>");
    if !props.is_empty() {
        out.push_str("<w:pPr>");
        out.push_str(&props);
        out.push_str("</w:pPr>");
    }
    for run in &paragraph.runs {
        write_run(run, out);
    }
    out.push_str("</w:p>");
}

fn write_table(table: &Table, ids: &StyleIds, out: &mut String) {
    out.push_str(r#"<w:tbl><w:tblPr><w:tblW w:w="0" w:type="auto"/>"#);
    if let Some(alignment) = table.alignment {
        out.push_str(&format!(r#"<w:jc w:val="{}"/>"#, table_jc(alignment)));
    }
    out.push_str("</w:tblPr><w:tblGrid>");
    let columns = table.column_count().max(1) as u32;
    for _ in 0..columns {
        out.push_str(&format!(r#"<w:gridCol w:w="{}"/>"#, TEXT_WIDTH / columns));
    }
    out.push_str("</w:tblGrid>");

    for row in &table.rows {
        out.push_str("<w:tr>");
        for cell in &row.cells {
            out.push_str("<w:tc>");
            let valign = match cell.vertical_alignment {
                VerticalAlignment::Top => None,
                VerticalAlignment::Center => Some("center"),
                VerticalAlignment::Bottom => Some("bottom"),
            };
            if let Some(valign) = valign {
                out.push_str(&format!(r#"<w:tcPr><w:vAlign w:val="{}"/></w:tcPr>"#, valign));
            }
            // Every cell needs at least one paragraph.
            if cell.paragraphs.is_empty() {
                out.push_str("<w:p/>");
            }
            for paragraph in &cell.paragraphs {
                write_paragraph(paragraph, ids, out);
            }
            out.push_str("</w:tc>");
        }
        out.push_str("</w:tr>");
    }
    out.push_str("</w:tbl>");
}

/// Relationship ids of a section's header and footer parts.
#[derive(Debug, Default, Clone)]
pub(super) struct SectionRefs {
    pub header: Option<String>,
    pub footer: Option<String>,
}

fn write_section(section: &Section, refs: &SectionRefs, out: &mut String) {
    out.push_str("<w:sectPr>");
    if let Some(id) = &refs.header {
        out.push_str(&format!(r#"<w:headerReference w:type="default" r:id="{}"/>"#, id));
    }
    if let Some(id) = &refs.footer {
        out.push_str(&format!(r#"<w:footerReference w:type="default" r:id="{}"/>"#, id));
    }
    let m = &section.margins;
    out.push_str(&format!(
        r#"<w:pgSz w:w="12240" w:h="15840"/><w:pgMar w:top="{}" w:right="{}" w:bottom="{}" w:left="{}" w:header="708" w:footer="708" w:gutter="0"/>"#,
        twips(m.top),
        twips(m.right),
        twips(m.bottom),
        twips(m.left)
    ));
    out.push_str("</w:sectPr>");
}

/// `word/document.xml`. All sections but the last close with a run-less
/// section-break paragraph after the content; the last closes the body.
pub(super) fn document_xml(document: &Document, ids: &StyleIds, refs: &[SectionRefs]) -> String {
    let mut body = String::new();
    for block in &document.blocks {
        match block {
            Block::Paragraph(p) => write_paragraph(p, ids, &mut body),
            Block::Table(t) => write_table(t, ids, &mut body),
        }
    }

    let last = document.sections.len().saturating_sub(1);
    for (index, section) in document.sections.iter().enumerate() {
        let refs = refs.get(index).cloned().unwrap_or_default();
        if index < last {
            body.push_str("<w:p><w:pPr>");
            write_section(section, &refs, &mut body);
            body.push_str("</w:pPr></w:p>");
        } else {
            write_section(section, &refs, &mut body);
        }
    }

    format!(
        r#"{}<w:document xmlns:w="{}" xmlns:r="{}"><w:body>{}</w:body></w:document>"#,
        XML_DECLARATION, NS_W, NS_R, body
    )
}

/// `word/headerN.xml` or `word/footerN.xml` body.
pub(super) fn header_footer_xml(root: &str, paragraphs: &[Paragraph], ids: &StyleIds) -> String {
    let mut body = String::new();
    for paragraph in paragraphs {
        write_paragraph(paragraph, ids, &mut body);
    }
    format!(
        r#"{}<w:{root} xmlns:w="{}" xmlns:r="{}">{}</w:{root}>"#,
        XML_DECLARATION,
        NS_W,
        NS_R,
        body,
        root = root
    )
}

fn write_style(name: &str, id: &str, definition: &StyleDefinition, out: &mut String) {
    out.push_str(&format!(
        r#"<w:style w:type="paragraph" w:styleId="{}"><w:name w:val="{}"/>"#,
        escape(id),
        escape(name)
    ));
    if let Some(alignment) = definition.alignment {
        out.push_str(&format!(r#"<w:pPr><w:jc w:val="{}"/></w:pPr>"#, jc(alignment)));
    }
    let props = run_properties(
        definition.font.as_deref(),
        definition.bold,
        definition.color,
        definition.size,
    );
    if !props.is_empty() {
        out.push_str("<w:rPr>");
        out.push_str(&props);
        out.push_str("</w:rPr>");
    }
    out.push_str("</w:style>");
}

/// `word/styles.xml` with one paragraph style per catalog entry.
pub(super) fn styles_xml(catalog: &StyleCatalog, ids: &StyleIds) -> String {
    let mut styles = String::new();
    for (name, definition) in catalog.iter() {
        write_style(name, ids.id(name), definition, &mut styles);
    }
    format!(
        r#"{}<w:styles xmlns:w="{}">{}</w:styles>"#,
        XML_DECLARATION, NS_W, styles
    )
}

fn w3c_date(date: &DateTime<Utc>) -> String {
    date.to_rfc3339_opts(SecondsFormat::Secs, true)
}

/// `docProps/core.xml`.
pub(super) fn core_properties_xml(metadata: &Metadata) -> String {
    let mut props = String::new();
    if let Some(title) = &metadata.title {
        props.push_str(&format!("<dc:title>{}</dc:title>", escape(title.as_str())));
    }
    if let Some(author) = &metadata.author {
        props.push_str(&format!("<dc:creator>{}</dc:creator>", escape(author.as_str())));
    }
    if let Some(created) = &metadata.created {
        props.push_str(&format!(
            r#"<dcterms:created xsi:type="dcterms:W3CDTF">{}</dcterms:created>"#,
            w3c_date(created)
        ));
    }
    if let Some(modified) = &metadata.modified {
        props.push_str(&format!(
            r#"<dcterms:modified xsi:type="dcterms:W3CDTF">{}</dcterms:modified>"#,
            w3c_date(modified)
        ));
    }
    format!(
        concat!(
            "{}<cp:coreProperties",
            r#" xmlns:cp="http://schemas.openxmlformats.org/package/2006/metadata/core-properties""#,
            r#" xmlns:dc="http://purl.org/dc/elements/1.1/""#,
            r#" xmlns:dcterms="http://purl.org/dc/terms/""#,
            r#" xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance">{}</cp:coreProperties>"#
        ),
        XML_DECLARATION, props
    )
}

/// A header or footer part written next to `word/document.xml`.
pub(super) struct HeaderFooterPart {
    /// File name inside `word/`
    pub file: String,
    pub id: String,
    pub footer: bool,
}

/// `[Content_Types].xml`.
pub(super) fn content_types_xml(parts: &[HeaderFooterPart]) -> String {
    let mut overrides = String::new();
    for part in parts {
        let kind = if part.footer { "footer" } else { "header" };
        overrides.push_str(&format!(
            r#"<Override PartName="/word/{}" ContentType="{}.{}+xml"/>"#,
            part.file, CONTENT_BASE, kind
        ));
    }
    format!(
        concat!(
            "{decl}",
            r#"<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types">"#,
            r#"<Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/>"#,
            r#"<Default Extension="xml" ContentType="application/xml"/>"#,
            r#"<Override PartName="/word/document.xml" ContentType="{base}.document.main+xml"/>"#,
            r#"<Override PartName="/word/styles.xml" ContentType="{base}.styles+xml"/>"#,
            r#"<Override PartName="/docProps/core.xml" ContentType="application/vnd.openxmlformats-package.core-properties+xml"/>"#,
            "{overrides}</Types>"
        ),
        decl = XML_DECLARATION,
        base = CONTENT_BASE,
        overrides = overrides
    )
}

/// `_rels/.rels`.
pub(super) fn package_rels_xml() -> String {
    format!(
        concat!(
            "{}",
            r#"<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">"#,
            r#"<Relationship Id="rId1" Type="{}/officeDocument" Target="word/document.xml"/>"#,
            r#"<Relationship Id="rId2" Type="http://schemas.openxmlformats.org/package/2006/relationships/metadata/core-properties" Target="docProps/core.xml"/>"#,
            "</Relationships>"
        ),
        XML_DECLARATION, REL_BASE
    )
}

/// Id of the styles relationship in `word/_rels/document.xml.rels`.
pub(super) const STYLES_REL_ID: &str = "rId1";

/// `word/_rels/document.xml.rels`.
pub(super) fn document_rels_xml(parts: &[HeaderFooterPart]) -> String {
    let mut rels = format!(
        r#"<Relationship Id="{}" Type="{}/styles" Target="styles.xml"/>"#,
        STYLES_REL_ID, REL_BASE
    );
    for part in parts {
        let kind = if part.footer { "footer" } else { "header" };
        rels.push_str(&format!(
            r#"<Relationship Id="{}" Type="{}/{}" Target="{}"/>"#,
            part.id, REL_BASE, kind, part.file
        ));
    }
    format!(
        r#"{}<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">{}</Relationships>"#,
        XML_DECLARATION, rels
    )
}
