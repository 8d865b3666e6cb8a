//! Text-improvement collaborator seam.
//!
//! The engine never talks to a network service itself. Callers plug in a
//! [`TextImprover`] and [`improve_document`] hands it the document's prose.
//! A failed or unusable reply leaves the document as it was.

use crate::model::{Document, Paragraph};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Errors reported by a text-improvement service.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ImproveError {
    /// The request could not be sent or the service returned an error status
    #[error("Text improvement request failed: {0}")]
    RequestFailed(String),

    /// The service refused the request because of rate limiting
    #[error("Text improvement service rate limit exceeded")]
    RateLimited,

    /// The reply could not be understood
    #[error("Invalid response from text improvement service: {0}")]
    InvalidResponse(String),

    /// The request did not complete in time
    #[error("Text improvement request timed out")]
    Timeout,
}

/// A service that rewrites prose according to an instruction.
pub trait TextImprover {
    /// Rewrite `text` following `instruction`.
    fn improve(&self, text: &str, instruction: &str) -> Result<String, ImproveError>;
}

impl<T: TextImprover + ?Sized> TextImprover for &T {
    fn improve(&self, text: &str, instruction: &str) -> Result<String, ImproveError> {
        (**self).improve(text, instruction)
    }
}

impl<T: TextImprover + ?Sized> TextImprover for Box<T> {
    fn improve(&self, text: &str, instruction: &str) -> Result<String, ImproveError> {
        (**self).improve(text, instruction)
    }
}

/// Editing persona that supplies the improvement instruction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EditorRole {
    /// General professional editing
    #[default]
    Professional,
    /// Academic register
    Academic,
    /// Business register
    Business,
    /// Shorter wording
    Concise,
}

impl EditorRole {
    /// All roles.
    pub const ALL: [EditorRole; 4] = [
        EditorRole::Professional,
        EditorRole::Academic,
        EditorRole::Business,
        EditorRole::Concise,
    ];

    /// Instruction sent with the text.
    pub fn instruction(&self) -> &'static str {
        match self {
            EditorRole::Professional => {
                "You are a professional document editor. Improve the following document by \
                 correcting grammar, enhancing clarity, and ensuring professional tone while \
                 preserving all key information and meaning."
            }
            EditorRole::Academic => {
                "You are an academic editor. Improve the following document for formal \
                 academic writing: correct grammar, use precise terminology and keep every \
                 claim and citation intact. Return one paragraph per line."
            }
            EditorRole::Business => {
                "You are a business communications editor. Improve the following document so \
                 it reads clearly to executives: correct grammar and keep a confident, \
                 professional tone without dropping any facts. Return one paragraph per line."
            }
            EditorRole::Concise => {
                "You are a copy editor. Shorten the following document by removing \
                 redundancy while keeping all key information and meaning. Return one \
                 paragraph per line."
            }
        }
    }

    /// Lower-case role name.
    pub fn as_str(&self) -> &'static str {
        match self {
            EditorRole::Professional => "professional",
            EditorRole::Academic => "academic",
            EditorRole::Business => "business",
            EditorRole::Concise => "concise",
        }
    }
}

impl fmt::Display for EditorRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EditorRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        EditorRole::ALL
            .into_iter()
            .find(|role| role.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unknown editor role '{}'", s))
    }
}

/// Result of one improvement attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImproveOutcome {
    /// Paragraphs were replaced
    Applied {
        /// Paragraphs sent to the service
        paragraphs_in: usize,
        /// Paragraphs written back
        paragraphs_out: usize,
    },
    /// There was no prose to send
    Skipped,
    /// The service failed; the document is unchanged
    Failed(ImproveError),
}

impl ImproveOutcome {
    /// Check if the document text was replaced.
    pub fn is_applied(&self) -> bool {
        matches!(self, ImproveOutcome::Applied { .. })
    }
}

/// Send the document's prose to `improver` and write the reply back.
///
/// Non-empty top-level paragraphs are joined with `'\n'`. On success every
/// top-level paragraph is replaced by one plain paragraph per non-empty
/// line of the reply; earlier run formatting is discarded. On failure, or
/// when the reply has no non-empty line, the document is left untouched.
pub fn improve_document(
    document: &mut Document,
    improver: &dyn TextImprover,
    instruction: &str,
) -> ImproveOutcome {
    let texts: Vec<String> = document
        .paragraphs()
        .filter(|p| !p.is_empty())
        .map(|p| p.plain_text())
        .collect();
    if texts.is_empty() {
        log::debug!("No paragraph text to improve");
        return ImproveOutcome::Skipped;
    }

    let reply = match improver.improve(&texts.join("\n"), instruction) {
        Ok(reply) => reply,
        Err(e) => {
            log::warn!("Text improvement failed, keeping original text: {}", e);
            return ImproveOutcome::Failed(e);
        }
    };

    let paragraphs: Vec<Paragraph> = reply
        .lines()
        .filter(|line| !line.trim().is_empty())
        .map(Paragraph::with_text)
        .collect();
    if paragraphs.is_empty() {
        let error = ImproveError::InvalidResponse("reply contains no text".to_string());
        log::warn!("Text improvement failed, keeping original text: {}", error);
        return ImproveOutcome::Failed(error);
    }

    let outcome = ImproveOutcome::Applied {
        paragraphs_in: texts.len(),
        paragraphs_out: paragraphs.len(),
    };
    document.replace_paragraphs(paragraphs);
    outcome
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Run, Table};
    use std::cell::RefCell;

    struct Echo {
        seen: RefCell<Vec<String>>,
        reply: Result<String, ImproveError>,
    }

    impl Echo {
        fn replying(reply: Result<&str, ImproveError>) -> Self {
            Self {
                seen: RefCell::new(Vec::new()),
                reply: reply.map(str::to_string),
            }
        }
    }

    impl TextImprover for Echo {
        fn improve(&self, text: &str, _instruction: &str) -> Result<String, ImproveError> {
            self.seen.borrow_mut().push(text.to_string());
            self.reply.clone()
        }
    }

    fn sample() -> Document {
        let mut doc = Document::new();
        let mut first = Paragraph::new();
        first.add_run(Run::bold("teh report"));
        doc.add_paragraph(first);
        doc.add_paragraph(Paragraph::new());
        doc.add_table(Table::from_rows([["A"]]));
        doc.add_paragraph(Paragraph::with_text("it have two part"));
        doc
    }

    #[test]
    fn test_joins_non_empty_paragraphs() {
        let mut doc = sample();
        let improver = Echo::replying(Ok("The report\n\nIt has two parts\n"));
        let outcome = improve_document(&mut doc, &improver, EditorRole::default().instruction());

        assert_eq!(improver.seen.borrow().as_slice(), ["teh report\nit have two part"]);
        assert_eq!(
            outcome,
            ImproveOutcome::Applied {
                paragraphs_in: 2,
                paragraphs_out: 2
            }
        );
        let texts: Vec<_> = doc.paragraphs().map(|p| p.plain_text()).collect();
        assert_eq!(texts, vec!["The report", "It has two parts"]);
        assert!(doc.paragraphs().all(|p| p.runs.iter().all(|r| r.bold.is_none())));
        assert_eq!(doc.table_count(), 1);
    }

    #[test]
    fn test_reply_lines_kept_verbatim() {
        let mut doc = sample();
        let improver = Echo::replying(Ok("  Indented opening\n   \nSecond line  "));
        improve_document(&mut doc, &improver, "edit");

        let texts: Vec<_> = doc.paragraphs().map(|p| p.plain_text()).collect();
        assert_eq!(texts, vec!["  Indented opening", "Second line  "]);
    }

    #[test]
    fn test_failure_leaves_document() {
        let mut doc = sample();
        let before = doc.clone();
        let improver = Echo::replying(Err(ImproveError::RateLimited));
        let outcome = improve_document(&mut doc, &improver, "edit");
        assert_eq!(outcome, ImproveOutcome::Failed(ImproveError::RateLimited));
        assert_eq!(doc, before);
    }

    #[test]
    fn test_blank_reply_is_invalid() {
        let mut doc = sample();
        let before = doc.clone();
        let outcome = improve_document(&mut doc, &Echo::replying(Ok(" \n\n")), "edit");
        assert!(matches!(
            outcome,
            ImproveOutcome::Failed(ImproveError::InvalidResponse(_))
        ));
        assert_eq!(doc, before);
    }

    #[test]
    fn test_nothing_to_improve() {
        let mut doc = Document::new();
        doc.add_paragraph(Paragraph::with_text("  "));
        let improver = Echo::replying(Ok("text"));
        assert_eq!(
            improve_document(&mut doc, &improver, "edit"),
            ImproveOutcome::Skipped
        );
        assert!(improver.seen.borrow().is_empty());
    }

    #[test]
    fn test_editor_roles() {
        assert!(EditorRole::Professional
            .instruction()
            .starts_with("You are a professional document editor."));
        assert_eq!("Academic".parse::<EditorRole>(), Ok(EditorRole::Academic));
        assert!("poet".parse::<EditorRole>().is_err());
        for role in EditorRole::ALL {
            assert_eq!(role.to_string().parse::<EditorRole>(), Ok(role));
        }
    }
}
