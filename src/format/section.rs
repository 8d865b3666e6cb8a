//! Page-level normalization: margins and header/footer text.

use super::rules::StyleRules;
use crate::model::{Document, Margins};

/// Counts gathered while formatting sections.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SectionStats {
    /// Sections whose margins were set
    pub sections: usize,
    /// Non-empty header/footer paragraphs styled
    pub header_footer_paragraphs: usize,
}

/// Normalize every section of `document`.
///
/// All four margins get `rules.margin`; every header/footer run gets the
/// body font and size. Empty headers and footers are left as they are.
pub fn format_sections(document: &mut Document, rules: &StyleRules) -> SectionStats {
    let mut stats = SectionStats::default();
    let margins = Margins::uniform(rules.margin);

    for section in &mut document.sections {
        section.margins = margins;
        stats.sections += 1;

        for paragraph in section.header_footer_mut() {
            for run in &mut paragraph.runs {
                run.font = Some(rules.body_font.clone());
                run.size = Some(rules.body_size);
            }
            if !paragraph.is_empty() {
                stats.header_footer_paragraphs += 1;
            }
        }
    }

    stats
}
