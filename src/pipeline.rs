//! Two-phase processing: optional text improvement, then formatting.

use crate::format::{FormatStats, Formatter, StyleRules};
use crate::improve::{improve_document, EditorRole, ImproveOutcome, TextImprover};
use crate::model::Document;
use crate::report::{Report, Reporter, Snapshot};
use chrono::Utc;

/// Everything produced by one pipeline run.
#[derive(Debug, Clone)]
pub struct PipelineResult {
    /// The formatted document
    pub document: Document,
    /// Issues found before anything was changed
    pub issues: Report,
    /// What formatting changed
    pub changes: Report,
    /// Formatting counts
    pub stats: FormatStats,
    /// Result of the improvement phase, when one ran
    pub improvement: Option<ImproveOutcome>,
}

/// Runs analysis, optional improvement and formatting in a fixed order.
///
/// Improvement always runs before styling, so paragraphs the service
/// rewrites are styled like any other.
pub struct Pipeline<'a> {
    formatter: Formatter,
    reporter: Reporter,
    improver: Option<&'a dyn TextImprover>,
    instruction: String,
}

impl<'a> Pipeline<'a> {
    /// Create a pipeline for the given rule table.
    pub fn new(rules: StyleRules) -> Self {
        Self {
            formatter: Formatter::new(rules.clone()),
            reporter: Reporter::new(rules),
            improver: None,
            instruction: EditorRole::default().instruction().to_string(),
        }
    }

    /// Enable the improvement phase.
    pub fn with_improver(mut self, improver: &'a dyn TextImprover) -> Self {
        self.improver = Some(improver);
        self
    }

    /// Set the instruction sent to the improver.
    pub fn with_instruction(mut self, instruction: impl Into<String>) -> Self {
        self.instruction = instruction.into();
        self
    }

    /// Use the instruction of an editor role.
    pub fn with_role(self, role: EditorRole) -> Self {
        self.with_instruction(role.instruction())
    }

    /// Get the formatter.
    pub fn formatter(&self) -> &Formatter {
        &self.formatter
    }

    /// Process `document`.
    pub fn run(&self, mut document: Document) -> PipelineResult {
        log::info!("Analyzing document");
        let issues = self.reporter.analyze(&document);

        let improvement = self.improver.map(|improver| {
            log::info!("Improving document text");
            improve_document(&mut document, improver, &self.instruction)
        });

        log::info!("Formatting document");
        let snapshot = Snapshot::capture(&document);
        let stats = self.formatter.format(&mut document);
        let changes = self.reporter.summarize(&document, Some(&snapshot));
        document.metadata.modified = Some(Utc::now());

        PipelineResult {
            document,
            issues,
            changes,
            stats,
            improvement,
        }
    }
}

impl Default for Pipeline<'_> {
    fn default() -> Self {
        Self::new(StyleRules::default())
    }
}
