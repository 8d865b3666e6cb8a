//! Row- and content-aware table formatting.

use super::rules::StyleRules;
use crate::classify::{Classifier, SemanticRole};
use crate::model::{Alignment, Paragraph, Table, TableAlignment, VerticalAlignment};

/// Counts gathered while formatting one table.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TableStats {
    /// Cells visited
    pub cells: usize,
    /// Paragraphs in header cells
    pub header_paragraphs: usize,
    /// Paragraphs classified as numeric
    pub numeric_paragraphs: usize,
    /// Paragraphs classified as short text
    pub short_paragraphs: usize,
    /// Paragraphs classified as long text
    pub long_paragraphs: usize,
}

impl TableStats {
    fn record(&mut self, role: SemanticRole) {
        match role {
            SemanticRole::TableHeaderCell => self.header_paragraphs += 1,
            SemanticRole::NumericCell => self.numeric_paragraphs += 1,
            SemanticRole::ShortTextCell => self.short_paragraphs += 1,
            _ => self.long_paragraphs += 1,
        }
    }
}

/// Paragraph alignment expected for a cell role.
pub fn cell_alignment(role: SemanticRole) -> Alignment {
    match role {
        SemanticRole::NumericCell => Alignment::Right,
        SemanticRole::LongTextCell => Alignment::Justify,
        _ => Alignment::Center,
    }
}

/// Format a table in place.
///
/// The table is centered, every cell is vertically centered, and every
/// paragraph of every cell is aligned by its cell role. Every cell run takes
/// the body font and size, and header-row runs are also bold. Rows and cells
/// are never added or removed.
pub fn format_table(table: &mut Table, classifier: &Classifier, rules: &StyleRules) -> TableStats {
    let mut stats = TableStats::default();
    table.alignment = Some(TableAlignment::Center);

    for (row, _, cell) in table.cells_mut() {
        stats.cells += 1;
        cell.vertical_alignment = VerticalAlignment::Center;
        for paragraph in &mut cell.paragraphs {
            let role = classifier.classify_cell(&paragraph.plain_text(), row);
            apply_cell_style(paragraph, role, rules);
            stats.record(role);
        }
    }

    stats
}

fn apply_cell_style(paragraph: &mut Paragraph, role: SemanticRole, rules: &StyleRules) {
    paragraph.alignment = Some(cell_alignment(role));
    let header = role == SemanticRole::TableHeaderCell;
    for run in &mut paragraph.runs {
        run.font = Some(rules.body_font.clone());
        run.size = Some(rules.body_size);
        if header {
            run.bold = Some(true);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Run, TableCell, TableRow};

    const PROSE: &str = "Participants completed the survey online.";

    fn sample() -> Table {
        Table::from_rows([
            vec!["Item", "Count", "Notes"],
            vec!["Apples", "42", PROSE],
            vec!["Pears", "3.5", "Yes"],
        ])
    }

    fn alignment_at(table: &Table, row: usize, col: usize) -> Option<Alignment> {
        table.rows[row].cells[col].paragraphs[0].alignment
    }

    #[test]
    fn test_alignment_by_content() {
        let mut table = sample();
        let stats = format_table(&mut table, &Classifier::default(), &StyleRules::default());

        assert_eq!(table.alignment, Some(TableAlignment::Center));
        assert_eq!(alignment_at(&table, 1, 1), Some(Alignment::Right));
        assert_eq!(alignment_at(&table, 1, 0), Some(Alignment::Center));
        assert_eq!(alignment_at(&table, 1, 2), Some(Alignment::Justify));
        assert_eq!(alignment_at(&table, 2, 2), Some(Alignment::Center));

        assert_eq!(stats.cells, 9);
        assert_eq!(stats.header_paragraphs, 3);
        assert_eq!(stats.numeric_paragraphs, 2);
        assert_eq!(stats.short_paragraphs, 3);
        assert_eq!(stats.long_paragraphs, 1);
    }

    #[test]
    fn test_header_row() {
        let mut table = Table::from_rows([["42", PROSE]]);
        format_table(&mut table, &Classifier::default(), &StyleRules::default());

        for cell in &table.rows[0].cells {
            let p = &cell.paragraphs[0];
            assert_eq!(p.alignment, Some(Alignment::Center));
            assert!(p.runs.iter().all(|r| r.is_bold()));
            assert!(p.runs.iter().all(|r| r.font.as_deref() == Some("Times New Roman")));
            assert!(p.runs.iter().all(|r| r.size == Some(12.0)));
        }
    }

    #[test]
    fn test_data_cell_runs_take_body_font() {
        let mut cell = Paragraph::new();
        cell.add_run(Run::new("4").with_font("Arial", 9.0));
        cell.add_run(Run::new("2").with_font("Comic Sans MS", 20.0));
        let mut table = Table::from_rows([["Count"]]);
        table.add_row(TableRow::new(vec![TableCell::with_content(vec![cell])]));

        format_table(&mut table, &Classifier::default(), &StyleRules::default());

        let p = &table.rows[1].cells[0].paragraphs[0];
        assert_eq!(p.alignment, Some(Alignment::Right));
        assert!(p.runs.iter().all(|r| r.font.as_deref() == Some("Times New Roman")));
        assert!(p.runs.iter().all(|r| r.size == Some(12.0)));
        assert!(p.runs.iter().all(|r| !r.is_bold()));
    }

    #[test]
    fn test_every_cell_vertically_centered() {
        let mut table = sample();
        format_table(&mut table, &Classifier::default(), &StyleRules::default());
        assert!(table
            .cells()
            .all(|(_, _, c)| c.vertical_alignment == VerticalAlignment::Center));
    }

    #[test]
    fn test_multi_paragraph_cells() {
        let mut table = Table::from_rows([["Header"]]);
        table.add_row(TableRow::new(vec![TableCell::with_content(vec![
            Paragraph::with_text("7"),
            Paragraph::with_text(PROSE),
        ])]));

        format_table(&mut table, &Classifier::default(), &StyleRules::default());

        let cell = &table.rows[1].cells[0];
        assert_eq!(cell.paragraphs[0].alignment, Some(Alignment::Right));
        assert_eq!(cell.paragraphs[1].alignment, Some(Alignment::Justify));
    }

    #[test]
    fn test_shape_is_preserved() {
        let mut table = sample();
        let before = (table.row_count(), table.cell_count(), table.plain_text());
        format_table(&mut table, &Classifier::default(), &StyleRules::default());
        assert_eq!(
            (table.row_count(), table.cell_count(), table.plain_text()),
            before
        );
    }

    #[test]
    fn test_header_only_and_empty_tables() {
        let mut header_only = Table::from_rows([["A", "B"]]);
        let stats = format_table(&mut header_only, &Classifier::default(), &StyleRules::default());
        assert_eq!(stats.header_paragraphs, 2);

        let mut empty = Table::new();
        let stats = format_table(&mut empty, &Classifier::default(), &StyleRules::default());
        assert_eq!(stats, TableStats::default());
        assert_eq!(empty.alignment, Some(TableAlignment::Center));
    }
}
