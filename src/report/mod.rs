//! Change and issue reporting.
//!
//! A [`Report`] is an ordered list of [`ChangeRecord`]s grouped by
//! [`Category`], always in the order margins, headers/footers, paragraphs,
//! headings, tables. [`Reporter::summarize`] describes a formatted document;
//! [`Reporter::analyze`] inspects a document before formatting and adds one
//! issue record per detected problem.

mod analysis;
mod snapshot;
mod summary;

pub use snapshot::Snapshot;

use crate::classify::Classifier;
use crate::format::StyleRules;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Message used when a document has nothing to format.
pub const MINIMAL_MESSAGE: &str = "Document already minimal";

/// Report category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    /// Page margins
    Margins,
    /// Header and footer text
    HeadersFooters,
    /// Body paragraphs and list items
    Paragraphs,
    /// Titles and headings
    Headings,
    /// Tables
    Tables,
    /// Whole-document notices
    Document,
}

impl Category {
    /// Formatting categories in report order.
    pub const ORDER: [Category; 5] = [
        Category::Margins,
        Category::HeadersFooters,
        Category::Paragraphs,
        Category::Headings,
        Category::Tables,
    ];

    /// Human-readable label.
    pub fn label(&self) -> &'static str {
        match self {
            Category::Margins => "Margins",
            Category::HeadersFooters => "Headers/Footers",
            Category::Paragraphs => "Paragraphs",
            Category::Headings => "Headings",
            Category::Tables => "Tables",
            Category::Document => "Document",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Kind of report record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecordKind {
    /// Per-category count of affected elements
    Summary,
    /// One detected problem
    Issue,
    /// Whole-document remark
    Notice,
}

/// One reported category of detected issue or applied fix.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangeRecord {
    /// Category of the record
    pub category: Category,

    /// Record kind
    pub kind: RecordKind,

    /// Number of affected elements, for summaries
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub count: Option<usize>,

    /// Human-readable message
    pub message: String,
}

impl ChangeRecord {
    /// Create a summary record.
    pub fn summary(category: Category, count: usize, message: impl Into<String>) -> Self {
        Self {
            category,
            kind: RecordKind::Summary,
            count: Some(count),
            message: message.into(),
        }
    }

    /// Create an issue record.
    pub fn issue(category: Category, message: impl Into<String>) -> Self {
        Self {
            category,
            kind: RecordKind::Issue,
            count: None,
            message: message.into(),
        }
    }

    /// Create a document notice.
    pub fn notice(message: impl Into<String>) -> Self {
        Self {
            category: Category::Document,
            kind: RecordKind::Notice,
            count: None,
            message: message.into(),
        }
    }

    /// Check if this is an issue record.
    pub fn is_issue(&self) -> bool {
        self.kind == RecordKind::Issue
    }
}

impl fmt::Display for ChangeRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.category, self.message)
    }
}

/// An ordered list of change records.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Report {
    records: Vec<ChangeRecord>,
}

impl Report {
    /// Create an empty report.
    pub fn new() -> Self {
        Self::default()
    }

    /// The single-record report for a document with nothing in it.
    pub fn minimal() -> Self {
        Self {
            records: vec![ChangeRecord::notice(MINIMAL_MESSAGE)],
        }
    }

    /// Append a record.
    pub fn push(&mut self, record: ChangeRecord) {
        self.records.push(record);
    }

    /// All records in order.
    pub fn records(&self) -> &[ChangeRecord] {
        &self.records
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Check if the report has no records.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Check if this is the "already minimal" report.
    pub fn is_minimal(&self) -> bool {
        matches!(
            self.records.as_slice(),
            [record] if record.kind == RecordKind::Notice && record.message == MINIMAL_MESSAGE
        )
    }

    /// Records of one category.
    pub fn category(&self, category: Category) -> impl Iterator<Item = &ChangeRecord> {
        self.records.iter().filter(move |r| r.category == category)
    }

    /// The summary record of a category, if present.
    pub fn summary(&self, category: Category) -> Option<&ChangeRecord> {
        self.category(category)
            .find(|r| r.kind == RecordKind::Summary)
    }

    /// Issue records in order.
    pub fn issues(&self) -> impl Iterator<Item = &ChangeRecord> {
        self.records.iter().filter(|r| r.is_issue())
    }

    /// Records grouped by category, in category order; empty groups omitted.
    pub fn by_category(&self) -> Vec<(Category, Vec<&ChangeRecord>)> {
        Category::ORDER
            .iter()
            .chain(std::iter::once(&Category::Document))
            .filter_map(|&category| {
                let records: Vec<_> = self.category(category).collect();
                (!records.is_empty()).then_some((category, records))
            })
            .collect()
    }

    /// Human-readable lines, one per record.
    pub fn lines(&self) -> Vec<String> {
        self.records.iter().map(|r| r.to_string()).collect()
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for line in self.lines() {
            writeln!(f, "{}", line)?;
        }
        Ok(())
    }
}

/// Builds change and issue reports for documents.
#[derive(Debug, Clone, Default)]
pub struct Reporter {
    rules: StyleRules,
    classifier: Classifier,
}

impl Reporter {
    /// Create a reporter that judges documents against `rules`.
    pub fn new(rules: StyleRules) -> Self {
        let classifier = Classifier::new(rules.classifier.clone());
        Self { rules, classifier }
    }

    /// Get the rule table.
    pub fn rules(&self) -> &StyleRules {
        &self.rules
    }
}

/// `"1 table"`, `"3 tables"`.
fn plural(count: usize, noun: &str) -> String {
    if count == 1 {
        format!("{} {}", count, noun)
    } else {
        format!("{} {}s", count, noun)
    }
}
