//! Formatting snapshots taken before a pass, for change counting.

use crate::model::{
    Alignment, Color, Document, Margins, Paragraph, Section, Table, TableAlignment,
    VerticalAlignment,
};

#[derive(Debug, Clone, PartialEq)]
struct RunFormat {
    font: Option<String>,
    size: Option<f32>,
    bold: Option<bool>,
    color: Option<Color>,
}

#[derive(Debug, Clone, PartialEq)]
struct ParagraphFormat {
    style: Option<String>,
    alignment: Option<Alignment>,
    line_spacing: Option<f32>,
    runs: Vec<RunFormat>,
}

impl ParagraphFormat {
    fn of(paragraph: &Paragraph) -> Self {
        Self {
            style: paragraph.style.clone(),
            alignment: paragraph.alignment,
            line_spacing: paragraph.line_spacing,
            runs: paragraph
                .runs
                .iter()
                .map(|r| RunFormat {
                    font: r.font.clone(),
                    size: r.size,
                    bold: r.bold,
                    color: r.color,
                })
                .collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
struct TableFormat {
    alignment: Option<TableAlignment>,
    cells: Vec<(VerticalAlignment, Vec<ParagraphFormat>)>,
}

impl TableFormat {
    fn of(table: &Table) -> Self {
        Self {
            alignment: table.alignment,
            cells: table
                .cells()
                .map(|(_, _, cell)| {
                    (
                        cell.vertical_alignment,
                        cell.paragraphs.iter().map(ParagraphFormat::of).collect(),
                    )
                })
                .collect(),
        }
    }
}

/// Presentation attributes of a document, captured before formatting.
///
/// Elements are matched by position, so a snapshot is only meaningful for
/// the same document after a pass that kept its structure.
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    margins: Vec<Margins>,
    header_footer: Vec<Vec<ParagraphFormat>>,
    paragraphs: Vec<ParagraphFormat>,
    tables: Vec<TableFormat>,
}

impl Snapshot {
    /// Capture the formatting state of `document`.
    pub fn capture(document: &Document) -> Self {
        Self {
            margins: document.sections.iter().map(|s| s.margins).collect(),
            header_footer: document
                .sections
                .iter()
                .map(|s| s.header_footer().map(ParagraphFormat::of).collect())
                .collect(),
            paragraphs: document.paragraphs().map(ParagraphFormat::of).collect(),
            tables: document.tables().map(TableFormat::of).collect(),
        }
    }

    /// Check whether section `index` has different margins now.
    pub fn section_changed(&self, index: usize, section: &Section) -> bool {
        self.margins.get(index) != Some(&section.margins)
    }

    /// Number of non-empty header/footer paragraphs of section `index` that changed.
    pub fn header_footer_changed(&self, index: usize, section: &Section) -> usize {
        let before = self.header_footer.get(index);
        section
            .header_footer()
            .enumerate()
            .filter(|(_, p)| !p.is_empty())
            .filter(|(i, p)| before.and_then(|b| b.get(*i)) != Some(&ParagraphFormat::of(p)))
            .count()
    }

    /// Check whether top-level paragraph `index` has different formatting now.
    pub fn paragraph_changed(&self, index: usize, paragraph: &Paragraph) -> bool {
        self.paragraphs.get(index) != Some(&ParagraphFormat::of(paragraph))
    }

    /// Check whether top-level table `index` has different formatting now.
    pub fn table_changed(&self, index: usize, table: &Table) -> bool {
        self.tables.get(index) != Some(&TableFormat::of(table))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Length;

    #[test]
    fn test_unchanged_document() {
        let mut doc = Document::new();
        doc.add_paragraph(Paragraph::with_text("Hello"));
        doc.add_table(Table::from_rows([["A"]]));
        doc.add_section(Section::new());

        let snapshot = Snapshot::capture(&doc);
        let p = doc.paragraphs().next().unwrap();
        assert!(!snapshot.paragraph_changed(0, p));
        assert!(!snapshot.table_changed(0, doc.tables().next().unwrap()));
        assert!(!snapshot.section_changed(0, &doc.sections[0]));
    }

    #[test]
    fn test_detects_changes() {
        let mut doc = Document::new();
        doc.add_paragraph(Paragraph::with_text("Hello"));
        let mut section = Section::new();
        section.header.push(Paragraph::with_text("Header"));
        doc.add_section(section);
        let snapshot = Snapshot::capture(&doc);

        if let Some(p) = doc.paragraphs_mut().next() {
            p.alignment = Some(Alignment::Justify);
        }
        doc.sections[0].margins = Margins::uniform(Length::from_cm(2.0));
        doc.sections[0].header[0].runs[0].size = Some(12.0);

        assert!(snapshot.paragraph_changed(0, doc.paragraphs().next().unwrap()));
        assert!(snapshot.section_changed(0, &doc.sections[0]));
        assert_eq!(snapshot.header_footer_changed(0, &doc.sections[0]), 1);
        // Elements without a counterpart count as changed.
        assert!(snapshot.paragraph_changed(5, &Paragraph::new()));
    }
}
