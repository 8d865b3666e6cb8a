//! Structural classification of paragraphs and table cells.
//!
//! Classification is a pure function of a paragraph's text, its style name
//! and its position. Paragraph rules live in one ordered table so their
//! precedence can be tested on its own; the first rule that matches wins and
//! [`SemanticRole::Body`] is the fallback.
//!
//! # Example
//!
//! ```
//! use docpolish::classify::{Classifier, HeadingLevel, Position, SemanticRole};
//!
//! let classifier = Classifier::default();
//! assert_eq!(
//!     classifier.classify("INTRODUCTION", None, Position::Paragraph(3)),
//!     SemanticRole::Heading(HeadingLevel::Major)
//! );
//! assert_eq!(
//!     classifier.classify("42", None, Position::Cell { row: 2 }),
//!     SemanticRole::NumericCell
//! );
//! ```

mod shape;

pub use shape::TextShape;

use serde::{Deserialize, Serialize};
use std::fmt;

/// Heading importance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HeadingLevel {
    /// All-caps heading
    Major,
    /// Title-case heading
    Minor,
}

/// Semantic role assigned to a paragraph or table cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SemanticRole {
    /// Document title
    Title,
    /// Section heading
    Heading(HeadingLevel),
    /// List item
    ListItem,
    /// Body text
    Body,
    /// Cell in the header row
    TableHeaderCell,
    /// Cell holding a number
    NumericCell,
    /// Cell holding a short label
    ShortTextCell,
    /// Cell holding prose
    LongTextCell,
}

impl SemanticRole {
    /// Check if this is a title or heading.
    pub fn is_heading_like(&self) -> bool {
        matches!(self, SemanticRole::Title | SemanticRole::Heading(_))
    }
}

impl fmt::Display for SemanticRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SemanticRole::Title => "title",
            SemanticRole::Heading(HeadingLevel::Major) => "heading (major)",
            SemanticRole::Heading(HeadingLevel::Minor) => "heading (minor)",
            SemanticRole::ListItem => "list item",
            SemanticRole::Body => "body",
            SemanticRole::TableHeaderCell => "table header cell",
            SemanticRole::NumericCell => "numeric cell",
            SemanticRole::ShortTextCell => "short text cell",
            SemanticRole::LongTextCell => "long text cell",
        };
        f.write_str(name)
    }
}

/// Where the classified text sits in the document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Position {
    /// Top-level paragraph, indexed among top-level paragraphs
    Paragraph(usize),
    /// Paragraph inside a table cell on the given row
    Cell {
        /// Row index; row 0 is the header row
        row: usize,
    },
}

/// Thresholds and signals used by the classifier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassifierConfig {
    /// Maximum word count for a heading
    pub max_heading_words: usize,

    /// Cells shorter than this (in characters) are short text
    pub short_cell_max_chars: usize,

    /// Style name prefixes that mark list items (case-insensitive)
    pub list_style_prefixes: Vec<String>,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            max_heading_words: 6,
            short_cell_max_chars: 30,
            list_style_prefixes: vec!["List".to_string()],
        }
    }
}

/// Inputs visible to a paragraph rule.
struct RuleInput<'a> {
    shape: &'a TextShape,
    style: Option<&'a str>,
    index: usize,
}

/// One entry of the paragraph rule table.
struct ParagraphRule {
    name: &'static str,
    apply: fn(&ClassifierConfig, &RuleInput<'_>) -> Option<SemanticRole>,
}

/// Paragraph rules in priority order.
const PARAGRAPH_RULES: &[ParagraphRule] = &[
    ParagraphRule {
        name: "title",
        apply: title_rule,
    },
    ParagraphRule {
        name: "upper-heading",
        apply: upper_heading_rule,
    },
    ParagraphRule {
        name: "title-case-heading",
        apply: title_case_heading_rule,
    },
    ParagraphRule {
        name: "list-style",
        apply: list_style_rule,
    },
];

fn title_rule(_: &ClassifierConfig, input: &RuleInput<'_>) -> Option<SemanticRole> {
    (input.index == 0).then_some(SemanticRole::Title)
}

fn upper_heading_rule(config: &ClassifierConfig, input: &RuleInput<'_>) -> Option<SemanticRole> {
    (input.shape.is_upper() && input.shape.word_count() <= config.max_heading_words)
        .then_some(SemanticRole::Heading(HeadingLevel::Major))
}

fn title_case_heading_rule(
    config: &ClassifierConfig,
    input: &RuleInput<'_>,
) -> Option<SemanticRole> {
    (input.shape.is_title_case() && input.shape.word_count() <= config.max_heading_words)
        .then_some(SemanticRole::Heading(HeadingLevel::Minor))
}

fn list_style_rule(config: &ClassifierConfig, input: &RuleInput<'_>) -> Option<SemanticRole> {
    let style = input.style?.to_lowercase();
    config
        .list_style_prefixes
        .iter()
        .any(|prefix| style.starts_with(&prefix.to_lowercase()))
        .then_some(SemanticRole::ListItem)
}

/// Name reported when no paragraph rule matched.
pub const FALLBACK_RULE: &str = "body";

/// Name reported for empty paragraphs.
pub const EMPTY_RULE: &str = "empty";

/// Heuristic classifier for paragraphs and table cells.
#[derive(Debug, Clone, Default)]
pub struct Classifier {
    config: ClassifierConfig,
}

impl Classifier {
    /// Create a classifier with the given thresholds.
    pub fn new(config: ClassifierConfig) -> Self {
        Self { config }
    }

    /// Get the classifier configuration.
    pub fn config(&self) -> &ClassifierConfig {
        &self.config
    }

    /// Names of the paragraph rules in priority order.
    pub fn paragraph_rule_names() -> impl Iterator<Item = &'static str> {
        PARAGRAPH_RULES.iter().map(|r| r.name)
    }

    /// Assign a role to text at `position`.
    pub fn classify(&self, text: &str, style: Option<&str>, position: Position) -> SemanticRole {
        self.classify_with_rule(text, style, position).0
    }

    /// Assign a role and report the name of the rule that decided it.
    pub fn classify_with_rule(
        &self,
        text: &str,
        style: Option<&str>,
        position: Position,
    ) -> (SemanticRole, &'static str) {
        match position {
            Position::Paragraph(index) => self.classify_paragraph(text, style, index),
            Position::Cell { row } => (self.classify_cell(text, row), "cell"),
        }
    }

    fn classify_paragraph(
        &self,
        text: &str,
        style: Option<&str>,
        index: usize,
    ) -> (SemanticRole, &'static str) {
        let shape = TextShape::new(text);
        if shape.is_empty() {
            return (SemanticRole::Body, EMPTY_RULE);
        }

        let input = RuleInput {
            shape: &shape,
            style,
            index,
        };
        PARAGRAPH_RULES
            .iter()
            .find_map(|rule| (rule.apply)(&self.config, &input).map(|role| (role, rule.name)))
            .unwrap_or((SemanticRole::Body, FALLBACK_RULE))
    }

    /// Assign a cell role to the text of a cell paragraph on `row`.
    pub fn classify_cell(&self, text: &str, row: usize) -> SemanticRole {
        if row == 0 {
            return SemanticRole::TableHeaderCell;
        }
        let shape = TextShape::new(text);
        if shape.is_numeric() {
            SemanticRole::NumericCell
        } else if shape.char_count() < self.config.short_cell_max_chars {
            SemanticRole::ShortTextCell
        } else {
            SemanticRole::LongTextCell
        }
    }
}
