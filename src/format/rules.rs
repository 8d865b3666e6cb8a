//! The style rule table: one explicit, versionable description of how each
//! semantic role is presented.

use crate::classify::{ClassifierConfig, HeadingLevel, SemanticRole};
use crate::error::{Error, Result};
use crate::model::{Alignment, Color, Length, StyleDefinition};
use serde::{Deserialize, Serialize};

/// Current rule table schema version.
pub const RULES_VERSION: u32 = 1;

/// Presentation attributes applied for one role.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoleStyle {
    /// Font family, `None` for the body font
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font: Option<String>,

    /// Font size in points
    pub size: f32,

    /// Bold flag, `None` leaves runs untouched
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bold: Option<bool>,

    /// Whether runs receive the accent color
    #[serde(default)]
    pub accent: bool,

    /// Paragraph alignment, `None` keeps the inherited value
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alignment: Option<Alignment>,

    /// Line spacing multiplier, `None` leaves spacing untouched
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line_spacing: Option<f32>,

    /// Named style assigned to the paragraph
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub style_name: Option<String>,
}

impl RoleStyle {
    fn heading(size: f32, style_name: &str) -> Self {
        Self {
            font: None,
            size,
            bold: Some(true),
            accent: true,
            alignment: Some(Alignment::Center),
            line_spacing: None,
            style_name: Some(style_name.to_string()),
        }
    }

    fn text(size: f32, alignment: Option<Alignment>) -> Self {
        Self {
            font: None,
            size,
            bold: None,
            accent: false,
            alignment,
            line_spacing: Some(1.5),
            style_name: None,
        }
    }
}

/// Style rules for the whole formatting pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StyleRules {
    /// Schema version of this rule table
    pub version: u32,

    /// Font family used by every role unless overridden
    pub body_font: String,

    /// Body font size in points, also used for headers, footers and table headers
    pub body_size: f32,

    /// Accent color for titles and headings
    pub accent: Color,

    /// Normalized value for all four page margins
    pub margin: Length,

    /// Title style
    pub title: RoleStyle,

    /// All-caps heading style
    pub heading_major: RoleStyle,

    /// Title-case heading style
    pub heading_minor: RoleStyle,

    /// Body text style
    pub body: RoleStyle,

    /// List item style
    pub list_item: RoleStyle,

    /// Style name given to body paragraphs that carried a heading style
    pub normal_style_name: String,

    /// Style name prefix that marks a paragraph as styled as a heading
    pub heading_style_prefix: String,

    /// Classifier thresholds
    pub classifier: ClassifierConfig,
}

impl Default for StyleRules {
    fn default() -> Self {
        Self {
            version: RULES_VERSION,
            body_font: "Times New Roman".to_string(),
            body_size: 12.0,
            accent: Color::BLUE,
            margin: Length::from_inches(1.0),
            title: RoleStyle::heading(18.0, "Title"),
            heading_major: RoleStyle::heading(16.0, "Heading 1"),
            heading_minor: RoleStyle::heading(14.0, "Heading 2"),
            body: RoleStyle::text(12.0, Some(Alignment::Justify)),
            list_item: RoleStyle::text(12.0, None),
            normal_style_name: "Normal".to_string(),
            heading_style_prefix: "Heading".to_string(),
            classifier: ClassifierConfig::default(),
        }
    }
}

impl StyleRules {
    /// Create the default rule table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a rule table from JSON and validate it.
    pub fn from_json(json: &str) -> Result<Self> {
        let rules: StyleRules = serde_json::from_str(json)
            .map_err(|e| Error::InvalidRules(format!("cannot parse rule table: {}", e)))?;
        rules.validate()?;
        Ok(rules)
    }

    /// Serialize the rule table as pretty JSON.
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(|e| Error::Serialize(e.to_string()))
    }

    /// Set the body font family.
    pub fn with_body_font(mut self, font: impl Into<String>) -> Self {
        self.body_font = font.into();
        self
    }

    /// Set the body font size for body, list, header/footer and table text.
    pub fn with_body_size(mut self, size: f32) -> Self {
        self.body_size = size;
        self.body.size = size;
        self.list_item.size = size;
        self
    }

    /// Set the accent color.
    pub fn with_accent(mut self, color: Color) -> Self {
        self.accent = color;
        self
    }

    /// Set the normalized margin.
    pub fn with_margin(mut self, margin: Length) -> Self {
        self.margin = margin;
        self
    }

    /// Set the classifier thresholds.
    pub fn with_classifier(mut self, config: ClassifierConfig) -> Self {
        self.classifier = config;
        self
    }

    /// Reject tables that cannot be applied consistently.
    pub fn validate(&self) -> Result<()> {
        if self.version != RULES_VERSION {
            return Err(Error::InvalidRules(format!(
                "unsupported rule table version {} (expected {})",
                self.version, RULES_VERSION
            )));
        }
        if self.body_font.trim().is_empty() {
            return Err(Error::InvalidRules("body font must not be empty".to_string()));
        }
        if !(self.body_size > 0.0) {
            return Err(Error::InvalidRules(format!(
                "body size must be positive, got {}",
                self.body_size
            )));
        }
        if self.margin.points() < 0.0 {
            return Err(Error::InvalidRules(format!(
                "margin must not be negative, got {}",
                self.margin.points()
            )));
        }
        let roles = [
            ("title", &self.title),
            ("heading_major", &self.heading_major),
            ("heading_minor", &self.heading_minor),
            ("body", &self.body),
            ("list_item", &self.list_item),
        ];
        for (name, style) in roles {
            if !(style.size > 0.0) {
                return Err(Error::InvalidRules(format!(
                    "{} size must be positive, got {}",
                    name, style.size
                )));
            }
            if let Some(spacing) = style.line_spacing {
                if !(spacing > 0.0) {
                    return Err(Error::InvalidRules(format!(
                        "{} line spacing must be positive, got {}",
                        name, spacing
                    )));
                }
            }
        }
        if self.classifier.max_heading_words == 0 {
            return Err(Error::InvalidRules(
                "max heading words must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    /// The paragraph style for a paragraph role, `None` for cell roles.
    pub fn role_style(&self, role: SemanticRole) -> Option<&RoleStyle> {
        match role {
            SemanticRole::Title => Some(&self.title),
            SemanticRole::Heading(HeadingLevel::Major) => Some(&self.heading_major),
            SemanticRole::Heading(HeadingLevel::Minor) => Some(&self.heading_minor),
            SemanticRole::Body => Some(&self.body),
            SemanticRole::ListItem => Some(&self.list_item),
            _ => None,
        }
    }

    /// Effective font family of a role style.
    pub fn font_for<'a>(&'a self, style: &'a RoleStyle) -> &'a str {
        style.font.as_deref().unwrap_or(&self.body_font)
    }

    /// Name of the title style.
    pub fn title_style_name(&self) -> &str {
        self.title.style_name.as_deref().unwrap_or("Title")
    }

    /// Check whether `style` names a title or heading style.
    pub fn is_heading_style(&self, style: &str) -> bool {
        style.starts_with(&self.heading_style_prefix)
            || style == self.title_style_name()
            || [&self.heading_major, &self.heading_minor]
                .iter()
                .any(|s| s.style_name.as_deref() == Some(style))
    }

    /// Definition synthesized for a missing named style.
    pub fn definition_for(&self, style: &RoleStyle) -> StyleDefinition {
        StyleDefinition {
            font: Some(self.font_for(style).to_string()),
            size: Some(style.size),
            bold: style.bold,
            color: style.accent.then_some(self.accent),
            alignment: style.alignment,
        }
    }

    /// Short description of the body formatting, used in reports.
    pub fn body_summary(&self) -> String {
        let mut parts = vec![
            self.font_for(&self.body).to_string(),
            format!("{}pt", self.body.size),
        ];
        if let Some(alignment) = self.body.alignment {
            parts.push(alignment.to_string());
        }
        if let Some(spacing) = self.body.line_spacing {
            parts.push(format!("{} line spacing", spacing));
        }
        parts.join(", ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_policy() {
        let rules = StyleRules::default();
        assert_eq!(rules.title.size, 18.0);
        assert_eq!(rules.heading_major.size, 16.0);
        assert_eq!(rules.heading_minor.size, 14.0);
        assert_eq!(rules.body.alignment, Some(Alignment::Justify));
        assert_eq!(rules.body.line_spacing, Some(1.5));
        assert_eq!(rules.list_item.alignment, None);
        assert_eq!(rules.margin.points(), 72.0);
        assert!(rules.validate().is_ok());
    }

    #[test]
    fn test_json_round_trip() {
        let rules = StyleRules::default()
            .with_body_font("Calibri")
            .with_body_size(11.0)
            .with_accent(Color::rgb(0x1F, 0x4E, 0x79));
        let json = rules.to_json().unwrap();
        assert!(json.contains("\"#1F4E79\""));

        let back = StyleRules::from_json(&json).unwrap();
        assert_eq!(back, rules);
        assert_eq!(back.list_item.size, 11.0);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let rules = StyleRules::from_json(r#"{ "body_font": "Georgia" }"#).unwrap();
        assert_eq!(rules.body_font, "Georgia");
        assert_eq!(rules.title.size, 18.0);
    }

    #[test]
    fn test_validate_rejects_bad_tables() {
        let mut rules = StyleRules::default();
        rules.body_size = 0.0;
        assert!(matches!(rules.validate(), Err(Error::InvalidRules(_))));

        let mut rules = StyleRules::default();
        rules.heading_minor.size = -1.0;
        assert!(matches!(rules.validate(), Err(Error::InvalidRules(_))));

        let rules = StyleRules::default().with_margin(Length::from_points(-2.0));
        assert!(matches!(rules.validate(), Err(Error::InvalidRules(_))));

        assert!(StyleRules::from_json(r#"{ "version": 99 }"#).is_err());
        assert!(StyleRules::from_json("not json").is_err());
    }

    #[test]
    fn test_heading_style_names() {
        let rules = StyleRules::default();
        assert!(rules.is_heading_style("Heading 3"));
        assert!(rules.is_heading_style("Title"));
        assert!(!rules.is_heading_style("Normal"));
        assert!(!rules.is_heading_style("List Bullet"));
    }

    #[test]
    fn test_body_summary() {
        assert_eq!(
            StyleRules::default().body_summary(),
            "Times New Roman, 12pt, justified, 1.5 line spacing"
        );
    }
}
