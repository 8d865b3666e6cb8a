//! Document model types for editable document content.
//!
//! This module is the adapter between persisted documents and the engine:
//! it gives the classifier and formatters a uniform view of sections,
//! paragraphs, runs and tables, independent of the codec that produced it.

mod document;
mod paragraph;
mod section;
mod style;
mod table;

pub use document::{Block, Document, Metadata};
pub use paragraph::{Alignment, Color, Paragraph, Run};
pub use section::{Length, Margins, Section};
pub use style::{StyleCatalog, StyleDefinition};
pub use table::{Table, TableAlignment, TableCell, TableRow, VerticalAlignment};
