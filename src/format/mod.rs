//! The deterministic formatting pass.
//!
//! [`Formatter`] runs the section formatter, classifies and styles every
//! top-level paragraph, then formats every table. It only changes
//! presentation attributes: blocks keep their order and text.
//!
//! # Example
//!
//! ```
//! use docpolish::format::{Formatter, StyleRules};
//! use docpolish::model::{Document, Paragraph};
//!
//! let mut doc = Document::new();
//! doc.add_paragraph(Paragraph::with_text("My Research Report"));
//! doc.add_paragraph(Paragraph::with_text("INTRODUCTION"));
//!
//! let stats = Formatter::new(StyleRules::default()).format(&mut doc);
//! assert_eq!(stats.titles, 1);
//! assert_eq!(stats.headings, 1);
//! ```

mod rules;
mod section;
mod style;
mod table;

pub use rules::{RoleStyle, StyleRules, RULES_VERSION};
pub use section::{format_sections, SectionStats};
pub use style::{apply_style, ensure_role_style};
pub use table::{cell_alignment, format_table, TableStats};

use crate::classify::{Classifier, Position, SemanticRole};
use crate::model::{Block, Document};

/// Counts gathered during one formatting pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormatStats {
    /// Section-level counts
    pub sections: SectionStats,
    /// Paragraphs styled as the title
    pub titles: usize,
    /// Paragraphs styled as headings
    pub headings: usize,
    /// Non-empty paragraphs styled as body text
    pub body_paragraphs: usize,
    /// Paragraphs styled as list items
    pub list_items: usize,
    /// Tables formatted
    pub tables: usize,
    /// Per-table counts, in block order
    pub table_stats: Vec<TableStats>,
    /// Named styles synthesized because the catalog lacked them
    pub synthesized_styles: Vec<String>,
}

/// Applies a [`StyleRules`] table to documents.
#[derive(Debug, Clone, Default)]
pub struct Formatter {
    rules: StyleRules,
    classifier: Classifier,
}

impl Formatter {
    /// Create a formatter for the given rule table.
    pub fn new(rules: StyleRules) -> Self {
        let classifier = Classifier::new(rules.classifier.clone());
        Self { rules, classifier }
    }

    /// Get the rule table.
    pub fn rules(&self) -> &StyleRules {
        &self.rules
    }

    /// Get the classifier built from the rule table.
    pub fn classifier(&self) -> &Classifier {
        &self.classifier
    }

    /// Format `document` in place.
    pub fn format(&self, document: &mut Document) -> FormatStats {
        let mut stats = FormatStats {
            sections: format_sections(document, &self.rules),
            ..Default::default()
        };

        let mut paragraph_index = 0usize;
        let mut used_roles = Vec::new();
        for block in &mut document.blocks {
            match block {
                Block::Paragraph(paragraph) => {
                    let (role, rule) = self.classifier.classify_with_rule(
                        &paragraph.plain_text(),
                        paragraph.style_name(),
                        Position::Paragraph(paragraph_index),
                    );
                    log::debug!(
                        "Paragraph {} classified as {} by rule '{}'",
                        paragraph_index,
                        role,
                        rule
                    );

                    apply_style(paragraph, role, &self.rules);
                    if !paragraph.is_empty() {
                        match role {
                            SemanticRole::Title => stats.titles += 1,
                            SemanticRole::Heading(_) => stats.headings += 1,
                            SemanticRole::ListItem => stats.list_items += 1,
                            _ => stats.body_paragraphs += 1,
                        }
                    }
                    if !used_roles.contains(&role) {
                        used_roles.push(role);
                    }
                    paragraph_index += 1;
                }
                Block::Table(table) => {
                    stats
                        .table_stats
                        .push(format_table(table, &self.classifier, &self.rules));
                    stats.tables += 1;
                }
            }
        }

        for role in used_roles {
            if let Some(name) = ensure_role_style(&mut document.styles, role, &self.rules) {
                stats.synthesized_styles.push(name.to_string());
            }
        }

        log::debug!(
            "Formatted {} paragraphs, {} tables, {} sections",
            paragraph_index,
            stats.tables,
            stats.sections.sections
        );
        stats
    }
}
