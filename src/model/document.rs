//! Document-level types.

use super::{Paragraph, Section, StyleCatalog, Table};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// An editable document: ordered blocks plus page sections and named styles.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Document {
    /// Document metadata (title, author, etc.)
    #[serde(default)]
    pub metadata: Metadata,

    /// Top-level content blocks in document order
    #[serde(default)]
    pub blocks: Vec<Block>,

    /// Page sections (margins, header, footer)
    #[serde(default)]
    pub sections: Vec<Section>,

    /// Named style catalog
    #[serde(default)]
    pub styles: StyleCatalog,
}

impl Document {
    /// Create a new empty document.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a paragraph block.
    pub fn add_paragraph(&mut self, paragraph: Paragraph) {
        self.blocks.push(Block::Paragraph(paragraph));
    }

    /// Add a table block.
    pub fn add_table(&mut self, table: Table) {
        self.blocks.push(Block::Table(table));
    }

    /// Add a section.
    pub fn add_section(&mut self, section: Section) {
        self.sections.push(section);
    }

    /// Iterate over top-level paragraphs in block order.
    pub fn paragraphs(&self) -> impl Iterator<Item = &Paragraph> {
        self.blocks.iter().filter_map(|b| match b {
            Block::Paragraph(p) => Some(p),
            Block::Table(_) => None,
        })
    }

    /// Iterate mutably over top-level paragraphs in block order.
    pub fn paragraphs_mut(&mut self) -> impl Iterator<Item = &mut Paragraph> {
        self.blocks.iter_mut().filter_map(|b| match b {
            Block::Paragraph(p) => Some(p),
            Block::Table(_) => None,
        })
    }

    /// Iterate over top-level tables in block order.
    pub fn tables(&self) -> impl Iterator<Item = &Table> {
        self.blocks.iter().filter_map(|b| match b {
            Block::Table(t) => Some(t),
            Block::Paragraph(_) => None,
        })
    }

    /// Iterate mutably over top-level tables in block order.
    pub fn tables_mut(&mut self) -> impl Iterator<Item = &mut Table> {
        self.blocks.iter_mut().filter_map(|b| match b {
            Block::Table(t) => Some(t),
            Block::Paragraph(_) => None,
        })
    }

    /// Number of top-level paragraphs.
    pub fn paragraph_count(&self) -> usize {
        self.paragraphs().count()
    }

    /// Number of top-level tables.
    pub fn table_count(&self) -> usize {
        self.tables().count()
    }

    /// Check if the document has no blocks at all.
    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// Check whether the document has no tables and no paragraph with text.
    pub fn is_structurally_empty(&self) -> bool {
        self.table_count() == 0 && self.paragraphs().all(Paragraph::is_empty)
    }

    /// Replace the whole top-level paragraph sequence.
    ///
    /// The block vector is rebuilt: `paragraphs` are placed where the first
    /// original paragraph stood (or at the start when there was none) and
    /// tables keep their relative order.
    pub fn replace_paragraphs(&mut self, paragraphs: Vec<Paragraph>) {
        let old = std::mem::take(&mut self.blocks);
        let insert_at = old.iter().position(Block::is_paragraph).unwrap_or(0);

        let mut blocks = Vec::with_capacity(old.len() + paragraphs.len());
        let mut replacement = Some(paragraphs);
        for (index, block) in old.into_iter().enumerate() {
            if index == insert_at {
                if let Some(new) = replacement.take() {
                    blocks.extend(new.into_iter().map(Block::Paragraph));
                }
            }
            if let Block::Table(t) = block {
                blocks.push(Block::Table(t));
            }
        }
        if let Some(new) = replacement {
            blocks.extend(new.into_iter().map(Block::Paragraph));
        }

        self.blocks = blocks;
    }

    /// Non-empty run texts in block order, table cells row by row.
    pub fn content_fingerprint(&self) -> Vec<String> {
        fn push_runs(out: &mut Vec<String>, paragraph: &Paragraph) {
            out.extend(
                paragraph
                    .runs
                    .iter()
                    .filter(|r| !r.text.is_empty())
                    .map(|r| r.text.clone()),
            );
        }

        let mut out = Vec::new();
        for block in &self.blocks {
            match block {
                Block::Paragraph(p) => push_runs(&mut out, p),
                Block::Table(t) => {
                    for (_, _, cell) in t.cells() {
                        for p in &cell.paragraphs {
                            push_runs(&mut out, p);
                        }
                    }
                }
            }
        }
        for section in &self.sections {
            for p in section.header_footer() {
                push_runs(&mut out, p);
            }
        }
        out
    }

    /// Get plain text content of the entire document.
    pub fn plain_text(&self) -> String {
        self.blocks
            .iter()
            .map(|block| match block {
                Block::Paragraph(p) => p.plain_text(),
                Block::Table(t) => t.plain_text(),
            })
            .collect::<Vec<_>>()
            .join("\n\n")
    }
}

/// A top-level content block.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Block {
    /// A paragraph of text
    Paragraph(Paragraph),

    /// A table
    Table(Table),
}

impl Block {
    /// Check if this block is a paragraph.
    pub fn is_paragraph(&self) -> bool {
        matches!(self, Block::Paragraph(_))
    }

    /// Check if this block is a table.
    pub fn is_table(&self) -> bool {
        matches!(self, Block::Table(_))
    }
}

/// Document metadata.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Metadata {
    /// Document title
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    /// Document author
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,

    /// Creation date
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created: Option<DateTime<Utc>>,

    /// Last modification date
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub modified: Option<DateTime<Utc>>,
}
