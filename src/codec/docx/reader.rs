//! WordprocessingML parts to the document model.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

use crate::error::{Error, Result};
use crate::model::{
    Alignment, Block, Color, Length, Margins, Metadata, Paragraph, Run, StyleCatalog,
    StyleDefinition, Table, TableAlignment, TableCell, TableRow, VerticalAlignment,
};

/// Elements whose content never reaches the model: drawings, embedded
/// objects, alternate content, deleted revisions and recorded property changes.
const SKIPPED: &[&[u8]] = &[
    b"drawing",
    b"pict",
    b"object",
    b"AlternateContent",
    b"del",
    b"rPrChange",
    b"pPrChange",
    b"tblPrChange",
    b"tcPrChange",
    b"sectPrChange",
];

/// Line spacing unit of `w:spacing w:line` with `w:lineRule="auto"`.
const LINE_UNITS: f32 = 240.0;

fn malformed(part: &str, e: impl std::fmt::Display) -> Error {
    Error::MalformedDocument(format!("{}: {}", part, e))
}

/// Value of the attribute with the given local name.
fn attr(e: &BytesStart<'_>, name: &[u8]) -> Option<String> {
    e.attributes()
        .flatten()
        .find(|a| a.key.local_name().as_ref() == name)
        .and_then(|a| a.unescape_value().ok().map(|v| v.into_owned()))
}

/// Toggle properties such as `w:b` are on unless `w:val` says otherwise.
fn on_off(e: &BytesStart<'_>) -> bool {
    !matches!(
        attr(e, b"val").as_deref(),
        Some("0" | "false" | "off" | "none")
    )
}

fn half_points(e: &BytesStart<'_>) -> Option<f32> {
    attr(e, b"val")?.parse::<f32>().ok().map(|hp| hp / 2.0)
}

fn twips(e: &BytesStart<'_>, name: &[u8]) -> Option<Length> {
    attr(e, name)?
        .parse::<f32>()
        .ok()
        .map(|tw| Length::from_points(tw / 20.0))
}

fn color(e: &BytesStart<'_>) -> Option<Color> {
    match attr(e, b"val")?.as_str() {
        "auto" => None,
        hex => hex.parse().ok(),
    }
}

fn font(e: &BytesStart<'_>) -> Option<String> {
    attr(e, b"ascii")
        .or_else(|| attr(e, b"hAnsi"))
        .or_else(|| attr(e, b"cs"))
}

fn paragraph_alignment(value: &str) -> Option<Alignment> {
    match value {
        "left" | "start" => Some(Alignment::Left),
        "center" => Some(Alignment::Center),
        "right" | "end" => Some(Alignment::Right),
        "both" | "distribute" => Some(Alignment::Justify),
        _ => None,
    }
}

fn table_alignment(value: &str) -> Option<TableAlignment> {
    match value {
        "left" | "start" => Some(TableAlignment::Left),
        "center" => Some(TableAlignment::Center),
        "right" | "end" => Some(TableAlignment::Right),
        _ => None,
    }
}

fn vertical_alignment(value: &str) -> Option<VerticalAlignment> {
    match value {
        "top" => Some(VerticalAlignment::Top),
        "center" => Some(VerticalAlignment::Center),
        "bottom" => Some(VerticalAlignment::Bottom),
        _ => None,
    }
}

/// Word stores built-in style names in lower case ("heading 1") and shows
/// them capitalized.
fn display_name(name: String) -> String {
    let builtin = matches!(name.as_str(), "normal" | "title" | "subtitle")
        || name.starts_with("heading ");
    if !builtin {
        return name;
    }
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => name,
    }
}

/// Section properties of the body, with header and footer still as
/// relationship ids.
#[derive(Debug, Default)]
pub(super) struct SectionProps {
    pub margins: Margins,
    pub header: Option<String>,
    pub footer: Option<String>,
}

impl SectionProps {
    fn set_margins(&mut self, e: &BytesStart<'_>) {
        if let Some(top) = twips(e, b"top") {
            self.margins.top = top;
        }
        if let Some(bottom) = twips(e, b"bottom") {
            self.margins.bottom = bottom;
        }
        if let Some(left) = twips(e, b"left") {
            self.margins.left = left;
        }
        if let Some(right) = twips(e, b"right") {
            self.margins.right = right;
        }
    }

    /// Keep the default reference, or the first one when there is no default.
    fn set_reference(slot: &mut Option<String>, e: &BytesStart<'_>) {
        let Some(id) = attr(e, b"id") else {
            return;
        };
        let default = matches!(attr(e, b"type").as_deref(), None | Some("default"));
        if default || slot.is_none() {
            *slot = Some(id);
        }
    }
}

/// Content of a body, header or footer part.
#[derive(Debug, Default)]
pub(super) struct Body {
    pub blocks: Vec<Block>,
    pub sections: Vec<SectionProps>,
}

impl Body {
    /// All paragraphs in order, table cell paragraphs flattened in.
    pub fn into_paragraphs(self) -> Vec<Paragraph> {
        self.blocks
            .into_iter()
            .flat_map(|block| match block {
                Block::Paragraph(p) => vec![p],
                Block::Table(t) => t
                    .rows
                    .into_iter()
                    .flat_map(|r| r.cells)
                    .flat_map(|c| c.paragraphs)
                    .collect(),
            })
            .collect()
    }
}

struct BodyState<'s> {
    styles: &'s HashMap<String, String>,
    body: Body,
    tables: Vec<Table>,
    paragraph: Option<Paragraph>,
    run: Option<Run>,
    section: Option<SectionProps>,
    section_break: bool,
    in_text: bool,
    in_paragraph_props: bool,
    in_table_props: bool,
    skip_depth: usize,
}

impl<'s> BodyState<'s> {
    fn new(styles: &'s HashMap<String, String>) -> Self {
        Self {
            styles,
            body: Body::default(),
            tables: Vec::new(),
            paragraph: None,
            run: None,
            section: None,
            section_break: false,
            in_text: false,
            in_paragraph_props: false,
            in_table_props: false,
            skip_depth: 0,
        }
    }

    fn current_cell(&mut self) -> Option<&mut TableCell> {
        self.tables.last_mut()?.rows.last_mut()?.cells.last_mut()
    }

    fn collecting_text(&self) -> bool {
        self.in_text && self.skip_depth == 0
    }

    fn push_text(&mut self, text: &str) {
        if let Some(run) = self.run.as_mut() {
            run.text.push_str(text);
        }
    }

    fn open(&mut self, e: &BytesStart<'_>) {
        let name = e.local_name();
        let name = name.as_ref();
        if self.skip_depth > 0 || SKIPPED.contains(&name) {
            self.skip_depth += 1;
            return;
        }

        match name {
            b"tbl" => self.tables.push(Table::new()),
            b"tblPr" => self.in_table_props = true,
            b"tr" => {
                if let Some(table) = self.tables.last_mut() {
                    table.add_row(TableRow::default());
                }
            }
            b"tc" => {
                if let Some(row) = self.tables.last_mut().and_then(|t| t.rows.last_mut()) {
                    row.cells.push(TableCell::default());
                }
            }
            b"vAlign" => {
                let value = attr(e, b"val").as_deref().and_then(vertical_alignment);
                if let (Some(value), Some(cell)) = (value, self.current_cell()) {
                    cell.vertical_alignment = value;
                }
            }
            b"p" => {
                self.paragraph = Some(Paragraph::new());
                self.section_break = false;
            }
            b"pPr" => self.in_paragraph_props = self.paragraph.is_some(),
            b"pStyle" if self.in_paragraph_props => {
                if let (Some(id), Some(p)) = (attr(e, b"val"), self.paragraph.as_mut()) {
                    p.style = Some(self.styles.get(&id).cloned().unwrap_or(id));
                }
            }
            b"spacing" if self.in_paragraph_props => {
                let auto = matches!(attr(e, b"lineRule").as_deref(), None | Some("auto"));
                let line = attr(e, b"line").and_then(|v| v.parse::<f32>().ok());
                if let (true, Some(line), Some(p)) = (auto, line, self.paragraph.as_mut()) {
                    p.line_spacing = Some(line / LINE_UNITS);
                }
            }
            b"jc" => {
                let Some(value) = attr(e, b"val") else {
                    return;
                };
                if self.in_paragraph_props {
                    if let Some(p) = self.paragraph.as_mut() {
                        p.alignment = paragraph_alignment(&value);
                    }
                } else if self.in_table_props {
                    if let Some(table) = self.tables.last_mut() {
                        table.alignment = table_alignment(&value);
                    }
                }
            }
            b"r" if self.paragraph.is_some() && !self.in_paragraph_props => {
                self.run = Some(Run::default());
            }
            b"rFonts" | b"b" | b"sz" | b"color" => {
                if let Some(run) = self.run.as_mut() {
                    match name {
                        b"rFonts" => run.font = font(e).or(run.font.take()),
                        b"b" => run.bold = Some(on_off(e)),
                        b"sz" => run.size = half_points(e),
                        _ => run.color = color(e),
                    }
                }
            }
            b"t" => self.in_text = self.run.is_some(),
            b"tab" => self.push_text("\t"),
            b"br" | b"cr" => self.push_text("\n"),
            b"sectPr" => self.section = Some(SectionProps::default()),
            b"pgMar" => {
                if let Some(section) = self.section.as_mut() {
                    section.set_margins(e);
                }
            }
            b"headerReference" => {
                if let Some(section) = self.section.as_mut() {
                    SectionProps::set_reference(&mut section.header, e);
                }
            }
            b"footerReference" => {
                if let Some(section) = self.section.as_mut() {
                    SectionProps::set_reference(&mut section.footer, e);
                }
            }
            _ => {}
        }
    }

    fn close(&mut self, name: &[u8]) {
        if self.skip_depth > 0 {
            self.skip_depth -= 1;
            return;
        }

        match name {
            b"t" => self.in_text = false,
            b"r" => {
                if let (Some(run), Some(p)) = (self.run.take(), self.paragraph.as_mut()) {
                    p.runs.push(run);
                }
            }
            b"pPr" => self.in_paragraph_props = false,
            b"p" => {
                if let Some(p) = self.paragraph.take() {
                    // A run-less paragraph carrying a section break only marks the break.
                    if !(self.section_break && p.runs.is_empty()) {
                        self.place(p);
                    }
                }
            }
            b"sectPr" => {
                if let Some(section) = self.section.take() {
                    self.body.sections.push(section);
                    self.section_break = self.paragraph.is_some();
                }
            }
            b"tblPr" => self.in_table_props = false,
            b"tbl" => {
                if let Some(table) = self.tables.pop() {
                    match self.current_cell() {
                        // Nested tables are flattened into the enclosing cell.
                        Some(cell) => cell.paragraphs.extend(
                            table
                                .rows
                                .into_iter()
                                .flat_map(|r| r.cells)
                                .flat_map(|c| c.paragraphs),
                        ),
                        None => self.body.blocks.push(Block::Table(table)),
                    }
                }
            }
            _ => {}
        }
    }

    fn place(&mut self, paragraph: Paragraph) {
        match self.current_cell() {
            Some(cell) => cell.paragraphs.push(paragraph),
            None => self.body.blocks.push(Block::Paragraph(paragraph)),
        }
    }
}

/// Read the blocks and section properties of a body, header or footer part.
pub(super) fn read_body(xml: &[u8], part: &str, styles: &HashMap<String, String>) -> Result<Body> {
    let mut reader = Reader::from_reader(xml);
    let mut state = BodyState::new(styles);

    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) => state.open(&e),
            Ok(Event::Empty(e)) => {
                state.open(&e);
                state.close(e.local_name().as_ref());
            }
            Ok(Event::End(e)) => state.close(e.local_name().as_ref()),
            Ok(Event::Text(e)) if state.collecting_text() => {
                let text = e.unescape().map_err(|e| malformed(part, e))?;
                state.push_text(&text);
            }
            Ok(Event::Eof) => break,
            Err(e) => return Err(malformed(part, e)),
            _ => {}
        }
    }

    if !state.tables.is_empty() || state.paragraph.is_some() {
        return Err(malformed(part, "unexpected end of part"));
    }
    Ok(state.body)
}

/// Paragraph styles of `word/styles.xml`.
#[derive(Debug, Default)]
pub(super) struct Styles {
    /// Style id to display name
    pub names: HashMap<String, String>,
    pub catalog: StyleCatalog,
}

struct PendingStyle {
    id: String,
    paragraph: bool,
    name: Option<String>,
    definition: StyleDefinition,
}

pub(super) fn read_styles(xml: &[u8], part: &str) -> Result<Styles> {
    let mut reader = Reader::from_reader(xml);
    let mut styles = Styles::default();
    let mut pending: Option<PendingStyle> = None;
    let mut skip_depth = 0usize;

    loop {
        let (e, empty) = match reader.read_event() {
            Ok(Event::Start(e)) => (e, false),
            Ok(Event::Empty(e)) => (e, true),
            Ok(Event::End(e)) => {
                if skip_depth > 0 {
                    skip_depth -= 1;
                } else if e.local_name().as_ref() == b"style" {
                    if let Some(style) = pending.take() {
                        finish_style(&mut styles, style);
                    }
                }
                continue;
            }
            Ok(Event::Eof) => break,
            Err(e) => return Err(malformed(part, e)),
            _ => continue,
        };

        let name = e.local_name();
        let name = name.as_ref();
        if skip_depth > 0 || SKIPPED.contains(&name) {
            if !empty {
                skip_depth += 1;
            }
            continue;
        }

        if name == b"style" {
            let style = PendingStyle {
                id: attr(&e, b"styleId").unwrap_or_default(),
                paragraph: matches!(attr(&e, b"type").as_deref(), None | Some("paragraph")),
                name: None,
                definition: StyleDefinition::default(),
            };
            if empty {
                finish_style(&mut styles, style);
            } else {
                pending = Some(style);
            }
            continue;
        }

        let Some(style) = pending.as_mut() else {
            continue;
        };
        let definition = &mut style.definition;
        match name {
            b"name" => style.name = attr(&e, b"val").map(display_name),
            b"rFonts" => definition.font = font(&e).or(definition.font.take()),
            b"b" => definition.bold = Some(on_off(&e)),
            b"sz" => definition.size = half_points(&e),
            b"color" => definition.color = color(&e),
            b"jc" => definition.alignment = attr(&e, b"val").as_deref().and_then(paragraph_alignment),
            _ => {}
        }
    }

    Ok(styles)
}

fn finish_style(styles: &mut Styles, style: PendingStyle) {
    if !style.paragraph || style.id.is_empty() {
        return;
    }
    let name = style.name.unwrap_or_else(|| style.id.clone());
    styles.names.insert(style.id, name.clone());
    styles.catalog.insert(name, style.definition);
}

/// Relationship id to target of a `.rels` part.
pub(super) fn read_relationships(xml: &[u8], part: &str) -> Result<HashMap<String, String>> {
    let mut reader = Reader::from_reader(xml);
    let mut targets = HashMap::new();

    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) | Ok(Event::Empty(e)) => {
                if e.local_name().as_ref() == b"Relationship" {
                    if let (Some(id), Some(target)) = (attr(&e, b"Id"), attr(&e, b"Target")) {
                        targets.insert(id, target);
                    }
                }
            }
            Ok(Event::Eof) => break,
            Err(e) => return Err(malformed(part, e)),
            _ => {}
        }
    }

    Ok(targets)
}

#[derive(Clone, Copy)]
enum CoreField {
    Title,
    Author,
    Created,
    Modified,
}

/// Title, author and dates of `docProps/core.xml`.
pub(super) fn read_core_properties(xml: &[u8], part: &str) -> Result<Metadata> {
    let mut reader = Reader::from_reader(xml);
    let mut metadata = Metadata::default();
    let mut field: Option<CoreField> = None;
    let mut text = String::new();

    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) => {
                field = match e.local_name().as_ref() {
                    b"title" => Some(CoreField::Title),
                    b"creator" => Some(CoreField::Author),
                    b"created" => Some(CoreField::Created),
                    b"modified" => Some(CoreField::Modified),
                    _ => None,
                };
                text.clear();
            }
            Ok(Event::Text(e)) if field.is_some() => {
                text.push_str(&e.unescape().map_err(|e| malformed(part, e))?);
            }
            Ok(Event::End(_)) => {
                if let Some(field) = field.take() {
                    let value = text.trim();
                    match field {
                        CoreField::Title => metadata.title = Some(value.to_string()),
                        CoreField::Author => metadata.author = Some(value.to_string()),
                        CoreField::Created => metadata.created = timestamp(value),
                        CoreField::Modified => metadata.modified = timestamp(value),
                    }
                }
            }
            Ok(Event::Eof) => break,
            Err(e) => return Err(malformed(part, e)),
            _ => {}
        }
    }

    Ok(metadata)
}

fn timestamp(value: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value)
        .ok()
        .map(|d| d.with_timezone(&Utc))
}

#[cfg(test)]
mod tests {
    use super::*;

    const W: &str = r#"xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main""#;

    fn body(inner: &str) -> Body {
        let xml = format!("<w:document {}><w:body>{}</w:body></w:document>", W, inner);
        read_body(xml.as_bytes(), "word/document.xml", &HashMap::new()).unwrap()
    }

    fn first_paragraph(body: &Body) -> &Paragraph {
        match &body.blocks[0] {
            Block::Paragraph(p) => p,
            Block::Table(_) => panic!("expected a paragraph"),
        }
    }

    #[test]
    fn test_run_properties() {
        let body = body(
            r#"<w:p><w:pPr><w:jc w:val="both"/><w:spacing w:after="120" w:line="360" w:lineRule="auto"/>
               <w:rPr><w:b/></w:rPr></w:pPr>
               <w:r><w:rPr><w:rFonts w:ascii="Arial" w:hAnsi="Arial"/><w:b w:val="0"/><w:color w:val="FF0000"/><w:sz w:val="21"/></w:rPr>
               <w:t xml:space="preserve">Fish &amp; chips </w:t><w:tab/><w:t>now</w:t></w:r></w:p>"#,
        );
        let p = first_paragraph(&body);
        assert_eq!(p.alignment, Some(Alignment::Justify));
        assert_eq!(p.line_spacing, Some(1.5));

        let run = &p.runs[0];
        assert_eq!(run.text, "Fish & chips \tnow");
        assert_eq!(run.font.as_deref(), Some("Arial"));
        assert_eq!(run.bold, Some(false));
        assert_eq!(run.color, Some(Color::rgb(255, 0, 0)));
        assert_eq!(run.size, Some(10.5));
    }

    #[test]
    fn test_drawings_and_deletions_skipped() {
        let body = body(
            r#"<w:p><w:r><w:t>kept</w:t></w:r>
               <w:del><w:r><w:delText>gone</w:delText></w:r></w:del>
               <w:r><w:drawing><w:txbxContent><w:p><w:r><w:t>box</w:t></w:r></w:p></w:txbxContent></w:drawing></w:r></w:p>"#,
        );
        assert_eq!(body.blocks.len(), 1);
        assert_eq!(first_paragraph(&body).plain_text(), "kept");
    }

    #[test]
    fn test_nested_table_flattened() {
        let body = body(
            r#"<w:tbl><w:tblPr><w:jc w:val="center"/></w:tblPr>
               <w:tr><w:tc><w:tcPr><w:vAlign w:val="bottom"/></w:tcPr><w:p><w:r><w:t>outer</w:t></w:r></w:p>
               <w:tbl><w:tr><w:tc><w:p><w:r><w:t>inner</w:t></w:r></w:p></w:tc></w:tr></w:tbl>
               </w:tc></w:tr></w:tbl>"#,
        );
        let Block::Table(table) = &body.blocks[0] else {
            panic!("expected a table");
        };
        assert_eq!(table.alignment, Some(TableAlignment::Center));
        assert_eq!(table.cell_count(), 1);
        let cell = &table.rows[0].cells[0];
        assert_eq!(cell.vertical_alignment, VerticalAlignment::Bottom);
        assert_eq!(cell.plain_text(), "outer inner");
    }

    #[test]
    fn test_section_break_paragraph() {
        let body = body(
            r#"<w:p><w:r><w:t>one</w:t></w:r></w:p>
               <w:p><w:pPr><w:sectPr><w:pgMar w:top="720" w:bottom="720" w:left="720" w:right="720"/></w:sectPr></w:pPr></w:p>
               <w:p><w:r><w:t>two</w:t></w:r></w:p>
               <w:sectPr><w:headerReference w:type="first" r:id="rId8"/><w:headerReference w:type="default" r:id="rId7"/>
               <w:pgMar w:top="1440" w:right="1800" w:bottom="1440" w:left="1800"/></w:sectPr>"#,
        );
        assert_eq!(body.blocks.len(), 2);
        assert_eq!(body.sections.len(), 2);
        assert!(body.sections[0].margins.is_uniform(Length::from_inches(0.5)));
        assert_eq!(body.sections[1].margins.left, Length::from_points(90.0));
        assert_eq!(body.sections[1].header.as_deref(), Some("rId7"));
        assert_eq!(body.sections[1].footer, None);
    }

    #[test]
    fn test_unclosed_body_rejected() {
        let xml = format!("<w:document {}><w:body><w:p><w:r>", W);
        assert!(matches!(
            read_body(xml.as_bytes(), "word/document.xml", &HashMap::new()),
            Err(Error::MalformedDocument(_))
        ));
    }

    #[test]
    fn test_styles() {
        let xml = format!(
            r#"<w:styles {}>
                 <w:docDefaults><w:rPrDefault><w:rPr><w:sz w:val="22"/></w:rPr></w:rPrDefault></w:docDefaults>
                 <w:style w:type="paragraph" w:styleId="Heading1"><w:name w:val="heading 1"/>
                   <w:pPr><w:jc w:val="center"/></w:pPr><w:rPr><w:b/><w:sz w:val="32"/></w:rPr></w:style>
                 <w:style w:type="character" w:styleId="Strong"><w:name w:val="Strong"/></w:style>
                 <w:style w:type="paragraph" w:styleId="Quote"><w:name w:val="Block Quote"/></w:style>
               </w:styles>"#,
            W
        );
        let styles = read_styles(xml.as_bytes(), "word/styles.xml").unwrap();
        assert_eq!(styles.names.get("Heading1").map(String::as_str), Some("Heading 1"));
        assert_eq!(styles.names.get("Quote").map(String::as_str), Some("Block Quote"));
        assert!(!styles.names.contains_key("Strong"));

        let heading = styles.catalog.get("Heading 1").unwrap();
        assert_eq!(heading.size, Some(16.0));
        assert_eq!(heading.bold, Some(true));
        assert_eq!(heading.alignment, Some(Alignment::Center));
        assert_eq!(styles.catalog.len(), 2);
    }

    #[test]
    fn test_core_properties() {
        let xml = r#"<cp:coreProperties xmlns:cp="http://schemas.openxmlformats.org/package/2006/metadata/core-properties"
              xmlns:dc="http://purl.org/dc/elements/1.1/" xmlns:dcterms="http://purl.org/dc/terms/">
              <dc:title>Annual &amp; Final</dc:title><dc:creator>Survey Team</dc:creator>
              <dcterms:created>2024-03-01T09:30:00Z</dcterms:created><dcterms:modified>not a date</dcterms:modified>
            </cp:coreProperties>"#;
        let metadata = read_core_properties(xml.as_bytes(), "docProps/core.xml").unwrap();
        assert_eq!(metadata.title.as_deref(), Some("Annual & Final"));
        assert_eq!(metadata.author.as_deref(), Some("Survey Team"));
        assert_eq!(
            metadata.created.map(|d| d.to_rfc3339()),
            Some("2024-03-01T09:30:00+00:00".to_string())
        );
        assert_eq!(metadata.modified, None);
    }

    #[test]
    fn test_relationships() {
        let xml = r#"<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">
              <Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/styles" Target="styles.xml"/>
              <Relationship Id="rId2" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/header" Target="header1.xml"/>
            </Relationships>"#;
        let rels = read_relationships(xml.as_bytes(), "word/_rels/document.xml.rels").unwrap();
        assert_eq!(rels.get("rId2").map(String::as_str), Some("header1.xml"));
        assert_eq!(rels.len(), 2);
    }
}
