//! Text-shape measurements used by the classifier.

use regex::Regex;
use std::sync::OnceLock;
use unicode_normalization::UnicodeNormalization;

/// Words that stay lower-case inside a title-cased phrase.
const MINOR_WORDS: &[&str] = &[
    "a", "an", "and", "as", "at", "but", "by", "for", "in", "nor", "of", "on", "or", "per", "the",
    "to", "via", "vs", "with",
];

/// Shape of a paragraph's text, computed once per classification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextShape {
    text: String,
}

impl TextShape {
    /// Measure `text` (NFC-normalized and trimmed).
    pub fn new(text: &str) -> Self {
        Self {
            text: text.trim().nfc().collect(),
        }
    }

    /// The normalized, trimmed text.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Check if there is no visible text.
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Number of whitespace-separated words.
    pub fn word_count(&self) -> usize {
        self.text.split_whitespace().count()
    }

    /// Number of characters (not bytes).
    pub fn char_count(&self) -> usize {
        self.text.chars().count()
    }

    /// At least one cased letter and no lower-case letter.
    pub fn is_upper(&self) -> bool {
        let mut cased = false;
        for c in self.text.chars() {
            if c.is_lowercase() {
                return false;
            }
            if c.is_uppercase() {
                cased = true;
            }
        }
        cased
    }

    /// Every significant word is capitalized.
    ///
    /// Minor words after the first word are ignored, as are words without
    /// letters. A capitalized word may be an all-caps acronym.
    pub fn is_title_case(&self) -> bool {
        let mut significant = 0usize;
        for (index, word) in self.text.split_whitespace().enumerate() {
            let letters: Vec<char> = word.chars().filter(|c| c.is_alphabetic()).collect();
            let Some(&first) = letters.first() else {
                continue;
            };
            if index > 0 && is_minor_word(word) {
                continue;
            }
            if !first.is_uppercase() {
                return false;
            }
            let rest = &letters[1..];
            let rest_lower = rest.iter().all(|c| !c.is_uppercase());
            let rest_upper = rest.iter().all(|c| !c.is_lowercase());
            if !rest_lower && !rest_upper {
                return false;
            }
            significant += 1;
        }
        significant > 0
    }

    /// Only digits and decimal separators, with at least one digit.
    pub fn is_numeric(&self) -> bool {
        numeric_pattern().is_match(&self.text)
    }
}

fn numeric_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^[0-9.,]*[0-9][0-9.,]*$").unwrap())
}

fn is_minor_word(word: &str) -> bool {
    let bare: String = word
        .chars()
        .filter(|c| c.is_alphabetic())
        .flat_map(char::to_lowercase)
        .collect();
    MINOR_WORDS.contains(&bare.as_str())
}
