//! Pre-formatting analysis of a document.

use super::{plural, Category, ChangeRecord, Report, Reporter};
use crate::classify::{Position, SemanticRole};
use crate::format::cell_alignment;
use crate::model::{Alignment, Document, Paragraph, VerticalAlignment};

impl Reporter {
    /// Inspect `document` before formatting and report what needs fixing.
    ///
    /// Each category gets a summary record followed by one issue record per
    /// detected problem. The tables category is omitted when the document
    /// has no tables.
    pub fn analyze(&self, document: &Document) -> Report {
        if document.is_structurally_empty() {
            return Report::minimal();
        }

        let mut report = Report::new();
        self.analyze_margins(document, &mut report);
        self.analyze_header_footer(document, &mut report);
        self.analyze_paragraphs(document, &mut report);
        self.analyze_headings(document, &mut report);
        self.analyze_tables(document, &mut report);
        report
    }

    fn analyze_margins(&self, document: &Document, report: &mut Report) {
        let off: Vec<usize> = document
            .sections
            .iter()
            .enumerate()
            .filter(|(_, s)| !s.margins.is_uniform(self.rules.margin))
            .map(|(i, _)| i)
            .collect();

        report.push(ChangeRecord::summary(
            Category::Margins,
            off.len(),
            format!(
                "{} of {} need margin normalization",
                off.len(),
                plural(document.sections.len(), "section")
            ),
        ));
        for index in off {
            report.push(ChangeRecord::issue(
                Category::Margins,
                format!(
                    "Section {}: margins are not {} on every side",
                    index + 1,
                    self.rules.margin
                ),
            ));
        }
    }

    fn analyze_header_footer(&self, document: &Document, report: &mut Report) {
        let count = document
            .sections
            .iter()
            .flat_map(|s| s.header_footer())
            .filter(|p| !p.is_empty() && !self.in_body_font(p))
            .count();

        report.push(ChangeRecord::summary(
            Category::HeadersFooters,
            count,
            format!(
                "{} not in {} {}pt",
                plural(count, "header/footer paragraph"),
                self.rules.body_font,
                self.rules.body_size
            ),
        ));
    }

    fn analyze_paragraphs(&self, document: &Document, report: &mut Report) {
        let count = document
            .paragraphs()
            .enumerate()
            .filter(|(_, p)| !p.is_empty())
            .filter(|(i, p)| self.role_of(*i, p) == SemanticRole::Body)
            .filter(|(_, p)| p.alignment != Some(Alignment::Justify))
            .count();

        report.push(ChangeRecord::summary(
            Category::Paragraphs,
            count,
            format!("{} not justified", plural(count, "body paragraph")),
        ));
    }

    fn analyze_headings(&self, document: &Document, report: &mut Report) {
        let mut issues = Vec::new();
        let title_style = self.rules.title_style_name();

        match document.paragraphs().next() {
            Some(first) if !first.is_empty() => {
                if first.style_name() != Some(title_style) {
                    issues.push(format!("First paragraph is not styled as {}", title_style));
                }
            }
            _ => issues.push("Title not detected at position 0".to_string()),
        }

        for (index, paragraph) in document.paragraphs().enumerate().skip(1) {
            if paragraph.is_empty() {
                continue;
            }
            let styled = paragraph
                .style_name()
                .is_some_and(|name| self.rules.is_heading_style(name));
            if self.role_of(index, paragraph).is_heading_like() && !styled {
                issues.push(format!(
                    "Paragraph {} looks like a heading but is not styled as one",
                    index + 1
                ));
            }
        }

        report.push(ChangeRecord::summary(
            Category::Headings,
            issues.len(),
            format!("{} heading issue(s) found", issues.len()),
        ));
        for message in issues {
            report.push(ChangeRecord::issue(Category::Headings, message));
        }
    }

    fn analyze_tables(&self, document: &Document, report: &mut Report) {
        let count = document.table_count();
        if count == 0 {
            return;
        }

        report.push(ChangeRecord::summary(
            Category::Tables,
            count,
            format!("Found {}", plural(count, "table")),
        ));
        for (t, table) in document.tables().enumerate() {
            for (row, col, cell) in table.cells() {
                let at = format!("Table {}, row {}, cell {}", t + 1, row + 1, col + 1);
                if cell.vertical_alignment != VerticalAlignment::Center {
                    report.push(ChangeRecord::issue(
                        Category::Tables,
                        format!("{}: vertical alignment is not centered", at),
                    ));
                }
                for paragraph in &cell.paragraphs {
                    let role = self.classifier.classify_cell(&paragraph.plain_text(), row);
                    let expected = cell_alignment(role);
                    if paragraph.alignment != Some(expected) {
                        report.push(ChangeRecord::issue(
                            Category::Tables,
                            format!("{}: text alignment should be {}", at, expected),
                        ));
                    }
                }
            }
        }
    }

    fn role_of(&self, index: usize, paragraph: &Paragraph) -> SemanticRole {
        self.classifier.classify(
            &paragraph.plain_text(),
            paragraph.style_name(),
            Position::Paragraph(index),
        )
    }

    fn in_body_font(&self, paragraph: &Paragraph) -> bool {
        paragraph.runs.iter().filter(|r| !r.is_empty()).all(|r| {
            r.font.as_deref() == Some(self.rules.body_font.as_str())
                && r.size == Some(self.rules.body_size)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::Classifier;
    use crate::format::{format_table, Formatter, StyleRules};
    use crate::model::{Length, Margins, Run, Section, Table};
    use crate::report::RecordKind;

    fn messages(report: &Report, category: Category) -> Vec<String> {
        report
            .category(category)
            .filter(|r| r.kind == RecordKind::Issue)
            .map(|r| r.message.clone())
            .collect()
    }

    #[test]
    fn test_heading_issues() {
        let mut doc = Document::new();
        doc.add_paragraph(Paragraph::with_text("My Research Report"));
        doc.add_paragraph(Paragraph::with_text("METHODS"));
        doc.add_paragraph(Paragraph::styled("RESULTS", "Heading 1"));
        doc.add_paragraph(Paragraph::with_text("we counted the birds every morning."));

        let report = Reporter::default().analyze(&doc);
        assert_eq!(
            messages(&report, Category::Headings),
            vec![
                "First paragraph is not styled as Title",
                "Paragraph 2 looks like a heading but is not styled as one",
            ]
        );
        assert_eq!(report.summary(Category::Headings).and_then(|r| r.count), Some(2));
        assert_eq!(report.summary(Category::Paragraphs).and_then(|r| r.count), Some(1));
    }

    #[test]
    fn test_missing_title() {
        let mut doc = Document::new();
        doc.add_paragraph(Paragraph::new());
        doc.add_paragraph(Paragraph::with_text("some text"));
        let report = Reporter::default().analyze(&doc);
        assert_eq!(
            messages(&report, Category::Headings),
            vec!["Title not detected at position 0"]
        );
    }

    #[test]
    fn test_margin_and_header_issues() {
        let mut doc = Document::new();
        doc.add_paragraph(Paragraph::with_text("Report"));
        doc.add_section(Section::new());
        let mut odd = Section::with_margins(Margins::uniform(Length::from_cm(3.0)));
        let mut footer = Paragraph::new();
        footer.add_run(Run::new("Page 1").with_font("Arial", 9.0));
        odd.footer.push(footer);
        doc.add_section(odd);

        let report = Reporter::default().analyze(&doc);
        assert_eq!(
            messages(&report, Category::Margins),
            vec!["Section 2: margins are not 1.00 in on every side"]
        );
        assert_eq!(report.summary(Category::HeadersFooters).and_then(|r| r.count), Some(1));
    }

    #[test]
    fn test_cell_issues_one_per_cell() {
        let mut doc = Document::new();
        doc.add_paragraph(Paragraph::with_text("Report"));
        doc.add_table(Table::from_rows([["A", "B"], ["1", "2"]]));

        let report = Reporter::default().analyze(&doc);
        let issues = messages(&report, Category::Tables);
        assert_eq!(issues.len(), 8);
        assert_eq!(
            issues[6],
            "Table 1, row 2, cell 2: vertical alignment is not centered"
        );
        assert_eq!(issues[7], "Table 1, row 2, cell 2: text alignment should be right");
    }

    #[test]
    fn test_misaligned_numeric_cell() {
        let mut doc = Document::new();
        doc.add_paragraph(Paragraph::with_text("Report"));
        let mut table = Table::from_rows([["Town", "Libraries"], ["Alder", "3"]]);
        format_table(&mut table, &Classifier::default(), &StyleRules::default());
        table.rows[1].cells[1].paragraphs[0].alignment = Some(Alignment::Left);
        doc.add_table(table);

        let report = Reporter::default().analyze(&doc);
        assert_eq!(
            messages(&report, Category::Tables),
            vec!["Table 1, row 2, cell 2: text alignment should be right"]
        );
    }

    #[test]
    fn test_formatted_document_has_no_issues() {
        let mut doc = Document::new();
        doc.add_section(Section::with_margins(Margins::uniform(Length::from_cm(2.0))));
        doc.add_paragraph(Paragraph::with_text("My Research Report"));
        doc.add_paragraph(Paragraph::with_text("INTRODUCTION"));
        doc.add_paragraph(Paragraph::with_text("body text goes here."));
        doc.add_table(Table::from_rows([["A"], ["1"]]));

        Formatter::default().format(&mut doc);
        let report = Reporter::default().analyze(&doc);
        assert_eq!(report.issues().count(), 0);
        assert!(report
            .records()
            .iter()
            .filter(|r| r.category != Category::Tables)
            .all(|r| r.count == Some(0)));
    }
}
