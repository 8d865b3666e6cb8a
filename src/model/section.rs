//! Section (page region) types.

use super::Paragraph;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Points per inch.
const POINTS_PER_INCH: f32 = 72.0;

/// Points per centimeter.
const POINTS_PER_CM: f32 = 72.0 / 2.54;

/// A page-level region with its own margins and header/footer.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Section {
    /// Page margins
    #[serde(default)]
    pub margins: Margins,

    /// Header paragraphs
    #[serde(default)]
    pub header: Vec<Paragraph>,

    /// Footer paragraphs
    #[serde(default)]
    pub footer: Vec<Paragraph>,
}

impl Section {
    /// Create a new section with default (one inch) margins.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a section with the given margins.
    pub fn with_margins(margins: Margins) -> Self {
        Self {
            margins,
            ..Self::default()
        }
    }

    /// Iterate over header and footer paragraphs.
    pub fn header_footer(&self) -> impl Iterator<Item = &Paragraph> {
        self.header.iter().chain(self.footer.iter())
    }

    /// Iterate mutably over header and footer paragraphs.
    pub fn header_footer_mut(&mut self) -> impl Iterator<Item = &mut Paragraph> {
        self.header.iter_mut().chain(self.footer.iter_mut())
    }
}

/// The four page margins.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Margins {
    /// Top margin
    pub top: Length,
    /// Bottom margin
    pub bottom: Length,
    /// Left margin
    pub left: Length,
    /// Right margin
    pub right: Length,
}

impl Margins {
    /// All four margins set to the same length.
    pub fn uniform(length: Length) -> Self {
        Self {
            top: length,
            bottom: length,
            left: length,
            right: length,
        }
    }

    /// Check whether every margin equals `length`.
    pub fn is_uniform(&self, length: Length) -> bool {
        [self.top, self.bottom, self.left, self.right]
            .iter()
            .all(|m| m.approx_eq(length))
    }
}

impl Default for Margins {
    fn default() -> Self {
        Self::uniform(Length::from_inches(1.0))
    }
}

/// A length stored in points (1/72 inch).
#[derive(Debug, Clone, Copy, Default, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Length(f32);

impl Length {
    /// Create a length in points.
    pub const fn from_points(points: f32) -> Self {
        Self(points)
    }

    /// Create a length in inches.
    pub fn from_inches(inches: f32) -> Self {
        Self(inches * POINTS_PER_INCH)
    }

    /// Create a length in centimeters.
    pub fn from_cm(cm: f32) -> Self {
        Self(cm * POINTS_PER_CM)
    }

    /// Length in points.
    pub fn points(&self) -> f32 {
        self.0
    }

    /// Length in inches.
    pub fn inches(&self) -> f32 {
        self.0 / POINTS_PER_INCH
    }

    /// Compare with a tolerance of a hundredth of a point.
    pub fn approx_eq(&self, other: Length) -> bool {
        (self.0 - other.0).abs() < 0.01
    }
}

impl fmt::Display for Length {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2} in", self.inches())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_length_units() {
        assert_eq!(Length::from_inches(1.0).points(), 72.0);
        assert!(Length::from_cm(2.54).approx_eq(Length::from_inches(1.0)));
        assert_eq!(Length::from_points(36.0).to_string(), "0.50 in");
    }

    #[test]
    fn test_margins_uniform() {
        let inch = Length::from_inches(1.0);
        assert!(Margins::default().is_uniform(inch));

        let mut margins = Margins::uniform(inch);
        margins.left = Length::from_inches(1.25);
        assert!(!margins.is_uniform(inch));
    }

    #[test]
    fn test_header_footer_iteration() {
        let mut section = Section::new();
        assert_eq!(section.header_footer().count(), 0);

        section.header.push(Paragraph::with_text("Header"));
        section.footer.push(Paragraph::with_text("Page 1"));
        let texts: Vec<_> = section.header_footer().map(|p| p.plain_text()).collect();
        assert_eq!(texts, vec!["Header", "Page 1"]);
    }
}
