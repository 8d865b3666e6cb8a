//! Summaries of a formatted document.

use super::{plural, Category, ChangeRecord, Report, Reporter, Snapshot};
use crate::classify::{Position, SemanticRole};
use crate::model::Document;

/// Count of elements in a category, plus the changed subset when known.
#[derive(Default)]
struct Tally {
    total: usize,
    changed: usize,
}

impl Tally {
    fn add(&mut self, changed: bool) {
        self.total += 1;
        if changed {
            self.changed += 1;
        }
    }
}

fn with_changes(message: String, changed: Option<usize>) -> String {
    match changed {
        Some(changed) => format!("{}; {} changed", message, changed),
        None => message,
    }
}

impl Reporter {
    /// Summarize what formatting did to `document`.
    ///
    /// Emits one summary record per category, in category order. The tables
    /// record is omitted when the document has no tables. With a `before`
    /// snapshot, each message also names how many elements changed.
    pub fn summarize(&self, document: &Document, before: Option<&Snapshot>) -> Report {
        if document.is_structurally_empty() {
            return Report::minimal();
        }

        let mut report = Report::new();
        let known = before.is_some();
        let changed = |tally: &Tally| known.then_some(tally.changed);

        let mut margins = Tally::default();
        let mut header_footer = Tally::default();
        for (index, section) in document.sections.iter().enumerate() {
            margins.add(before.is_some_and(|s| s.section_changed(index, section)));

            let non_empty = section.header_footer().filter(|p| !p.is_empty()).count();
            header_footer.total += non_empty;
            if let Some(snapshot) = before {
                header_footer.changed += snapshot.header_footer_changed(index, section);
            }
        }
        report.push(ChangeRecord::summary(
            Category::Margins,
            margins.total,
            with_changes(
                format!(
                    "Normalized margins on {} to {}",
                    plural(margins.total, "section"),
                    self.rules.margin
                ),
                changed(&margins),
            ),
        ));
        report.push(ChangeRecord::summary(
            Category::HeadersFooters,
            header_footer.total,
            with_changes(
                format!(
                    "Formatted {} ({}, {}pt)",
                    plural(header_footer.total, "header/footer paragraph"),
                    self.rules.body_font,
                    self.rules.body_size
                ),
                changed(&header_footer),
            ),
        ));

        let mut body = Tally::default();
        let mut list_items = 0usize;
        let mut headings = Tally::default();
        let mut titles = 0usize;
        for (index, paragraph) in document.paragraphs().enumerate() {
            if paragraph.is_empty() {
                continue;
            }
            let role = self.classifier.classify(
                &paragraph.plain_text(),
                paragraph.style_name(),
                Position::Paragraph(index),
            );
            let was_changed = before.is_some_and(|s| s.paragraph_changed(index, paragraph));
            match role {
                SemanticRole::Title => {
                    titles += 1;
                    headings.add(was_changed);
                }
                SemanticRole::Heading(_) => headings.add(was_changed),
                SemanticRole::ListItem => {
                    list_items += 1;
                    body.add(was_changed);
                }
                _ => body.add(was_changed),
            }
        }
        report.push(ChangeRecord::summary(
            Category::Paragraphs,
            body.total,
            with_changes(
                format!(
                    "Formatted {} and {} ({})",
                    plural(body.total - list_items, "paragraph"),
                    plural(list_items, "list item"),
                    self.rules.body_summary()
                ),
                changed(&body),
            ),
        ));
        report.push(ChangeRecord::summary(
            Category::Headings,
            headings.total,
            with_changes(
                format!(
                    "Formatted {} and {} (center aligned, bold, color: {})",
                    plural(headings.total - titles, "heading"),
                    plural(titles, "title"),
                    self.rules.accent.to_hex()
                ),
                changed(&headings),
            ),
        ));

        if document.table_count() > 0 {
            let mut tables = Tally::default();
            for (index, table) in document.tables().enumerate() {
                tables.add(before.is_some_and(|s| s.table_changed(index, table)));
            }
            report.push(ChangeRecord::summary(
                Category::Tables,
                tables.total,
                with_changes(
                    format!(
                        "Formatted {} (center aligned, bold headers)",
                        plural(tables.total, "table")
                    ),
                    changed(&tables),
                ),
            ));
        }

        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::format::Formatter;
    use crate::model::{Paragraph, Section, Table};

    fn sample() -> Document {
        let mut doc = Document::new();
        doc.add_section(Section::new());
        doc.add_paragraph(Paragraph::with_text("My Research Report"));
        doc.add_paragraph(Paragraph::with_text("INTRODUCTION"));
        doc.add_paragraph(Paragraph::with_text(
            "this study looks at how people use libraries in small towns.",
        ));
        doc.add_table(Table::from_rows([["Town", "Visits"], ["Alder", "120"]]));
        doc
    }

    #[test]
    fn test_summary_categories_in_order() {
        let mut doc = sample();
        Formatter::default().format(&mut doc);
        let report = Reporter::default().summarize(&doc, None);

        let categories: Vec<_> = report.records().iter().map(|r| r.category).collect();
        assert_eq!(categories, Category::ORDER.to_vec());
        assert_eq!(report.summary(Category::Headings).and_then(|r| r.count), Some(2));
        assert_eq!(report.summary(Category::Paragraphs).and_then(|r| r.count), Some(1));
        assert_eq!(report.summary(Category::HeadersFooters).and_then(|r| r.count), Some(0));
        assert_eq!(
            report.summary(Category::Tables).map(|r| r.message.as_str()),
            Some("Formatted 1 table (center aligned, bold headers)")
        );
    }

    #[test]
    fn test_tables_omitted_without_tables() {
        let mut doc = Document::new();
        doc.add_paragraph(Paragraph::with_text("Notes"));
        let report = Reporter::default().summarize(&doc, None);
        assert_eq!(report.len(), 4);
        assert!(report.summary(Category::Tables).is_none());
    }

    #[test]
    fn test_snapshot_reports_changed_counts() {
        let mut doc = sample();
        let snapshot = Snapshot::capture(&doc);
        Formatter::default().format(&mut doc);
        let first = Reporter::default().summarize(&doc, Some(&snapshot));
        assert!(first
            .summary(Category::Headings)
            .is_some_and(|r| r.message.ends_with("; 2 changed")));

        let snapshot = Snapshot::capture(&doc);
        Formatter::default().format(&mut doc);
        let second = Reporter::default().summarize(&doc, Some(&snapshot));
        assert!(second.records().iter().all(|r| r.message.ends_with("; 0 changed")));
    }

    #[test]
    fn test_empty_document_is_minimal() {
        let mut doc = Document::new();
        doc.add_paragraph(Paragraph::with_text("  "));
        doc.add_section(Section::new());
        assert!(Reporter::default().summarize(&doc, None).is_minimal());
    }
}
