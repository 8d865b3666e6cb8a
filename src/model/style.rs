//! Named style catalog.

use super::{Alignment, Color};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A named paragraph style definition.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StyleDefinition {
    /// Font family name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font: Option<String>,

    /// Font size in points
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<f32>,

    /// Bold flag
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bold: Option<bool>,

    /// Text color
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<Color>,

    /// Paragraph alignment
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alignment: Option<Alignment>,
}

/// The document's catalog of named styles, keyed by style name.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StyleCatalog {
    styles: BTreeMap<String, StyleDefinition>,
}

impl StyleCatalog {
    /// Create an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a style definition.
    pub fn insert(&mut self, name: impl Into<String>, definition: StyleDefinition) {
        self.styles.insert(name.into(), definition);
    }

    /// Look up a style by name.
    pub fn get(&self, name: &str) -> Option<&StyleDefinition> {
        self.styles.get(name)
    }

    /// Check whether a style exists.
    pub fn contains(&self, name: &str) -> bool {
        self.styles.contains_key(name)
    }

    /// Insert the definition built by `make` when `name` is missing.
    ///
    /// Returns `true` if a definition was synthesized.
    pub fn ensure(&mut self, name: &str, make: impl FnOnce() -> StyleDefinition) -> bool {
        if self.styles.contains_key(name) {
            return false;
        }
        self.styles.insert(name.to_string(), make());
        true
    }

    /// Number of styles in the catalog.
    pub fn len(&self) -> usize {
        self.styles.len()
    }

    /// Check if the catalog is empty.
    pub fn is_empty(&self) -> bool {
        self.styles.is_empty()
    }

    /// Iterate over style names in sorted order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.styles.keys().map(String::as_str)
    }

    /// Iterate over styles in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &StyleDefinition)> {
        self.styles.iter().map(|(name, def)| (name.as_str(), def))
    }
}
