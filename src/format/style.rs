//! Role-driven paragraph styling.

use super::rules::StyleRules;
use crate::classify::SemanticRole;
use crate::model::{Paragraph, StyleCatalog};

/// Apply the style for `role` to `paragraph`.
///
/// Every run gets the role's font family and size. Titles and headings also
/// get bold runs in the accent color. Alignment, line spacing and the named
/// style follow the rule table. Cell roles are handled by the table
/// formatter and leave the paragraph untouched here. Text is never changed.
pub fn apply_style(paragraph: &mut Paragraph, role: SemanticRole, rules: &StyleRules) {
    let Some(style) = rules.role_style(role) else {
        return;
    };

    let font = rules.font_for(style);
    for run in &mut paragraph.runs {
        run.font = Some(font.to_string());
        run.size = Some(style.size);
        if let Some(bold) = style.bold {
            run.bold = Some(bold);
        }
        if style.accent {
            run.color = Some(rules.accent);
        }
    }

    if let Some(alignment) = style.alignment {
        paragraph.alignment = Some(alignment);
    }
    if let Some(spacing) = style.line_spacing {
        paragraph.line_spacing = Some(spacing);
    }

    match &style.style_name {
        Some(name) => paragraph.style = Some(name.clone()),
        None if role == SemanticRole::Body => {
            let demote = paragraph
                .style_name()
                .is_some_and(|name| rules.is_heading_style(name));
            if demote {
                paragraph.style = Some(rules.normal_style_name.clone());
            }
        }
        None => {}
    }
}

/// Make sure the named style used by `role` exists in `catalog`.
///
/// A missing definition is synthesized from the role's rule values. Returns
/// the name of the synthesized style, if any.
pub fn ensure_role_style<'a>(
    catalog: &mut StyleCatalog,
    role: SemanticRole,
    rules: &'a StyleRules,
) -> Option<&'a str> {
    let style = rules.role_style(role)?;
    let name = style.style_name.as_deref()?;
    if catalog.ensure(name, || rules.definition_for(style)) {
        log::debug!("Synthesized missing style definition '{}'", name);
        Some(name)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::HeadingLevel;
    use crate::model::{Alignment, Color, Run, StyleDefinition};

    fn mixed_paragraph(text: &[&str]) -> Paragraph {
        let mut p = Paragraph::new();
        for (i, t) in text.iter().enumerate() {
            let font = if i % 2 == 0 { "Arial" } else { "Comic Sans" };
            p.add_run(Run::new(*t).with_font(font, 9.0 + i as f32));
        }
        p
    }

    #[test]
    fn test_body_style() {
        let rules = StyleRules::default();
        let mut p = mixed_paragraph(&["Some ", "body ", "text."]);
        p.runs[1].bold = Some(true);

        apply_style(&mut p, SemanticRole::Body, &rules);

        assert!(p.has_uniform_font());
        assert_eq!(p.runs[0].font.as_deref(), Some("Times New Roman"));
        assert_eq!(p.runs[0].size, Some(12.0));
        assert_eq!(p.runs[1].bold, Some(true));
        assert_eq!(p.alignment, Some(Alignment::Justify));
        assert_eq!(p.line_spacing, Some(1.5));
        assert_eq!(p.plain_text(), "Some body text.");
    }

    #[test]
    fn test_heading_styles() {
        let rules = StyleRules::default();
        let cases = [
            (SemanticRole::Title, 18.0, "Title"),
            (SemanticRole::Heading(HeadingLevel::Major), 16.0, "Heading 1"),
            (SemanticRole::Heading(HeadingLevel::Minor), 14.0, "Heading 2"),
        ];
        for (role, size, style) in cases {
            let mut p = mixed_paragraph(&["Course ", "Objectives"]);
            apply_style(&mut p, role, &rules);

            assert!(p.has_uniform_font());
            assert!(p.runs.iter().all(|r| r.size == Some(size)));
            assert!(p.runs.iter().all(|r| r.bold == Some(true)));
            assert!(p.runs.iter().all(|r| r.color == Some(Color::BLUE)));
            assert_eq!(p.alignment, Some(Alignment::Center));
            assert_eq!(p.style_name(), Some(style));
        }
    }

    #[test]
    fn test_list_item_keeps_alignment_and_style() {
        let rules = StyleRules::default();
        let mut p = Paragraph::styled("first point", "List Bullet").align(Alignment::Left);

        apply_style(&mut p, SemanticRole::ListItem, &rules);

        assert_eq!(p.alignment, Some(Alignment::Left));
        assert_eq!(p.style_name(), Some("List Bullet"));
        assert_eq!(p.line_spacing, Some(1.5));
        assert_eq!(p.runs[0].size, Some(12.0));
    }

    #[test]
    fn test_body_demotes_heading_style() {
        let rules = StyleRules::default();
        let mut p = Paragraph::styled("a long sentence that is not a heading", "Heading 1");
        apply_style(&mut p, SemanticRole::Body, &rules);
        assert_eq!(p.style_name(), Some("Normal"));

        let mut q = Paragraph::styled("a quote", "Quote");
        apply_style(&mut q, SemanticRole::Body, &rules);
        assert_eq!(q.style_name(), Some("Quote"));
    }

    #[test]
    fn test_apply_twice_is_stable() {
        let rules = StyleRules::default();
        let mut p = mixed_paragraph(&["INTRO", "DUCTION"]);
        apply_style(&mut p, SemanticRole::Heading(HeadingLevel::Major), &rules);
        let once = p.clone();
        apply_style(&mut p, SemanticRole::Heading(HeadingLevel::Major), &rules);
        assert_eq!(p, once);
    }

    #[test]
    fn test_cell_roles_are_ignored() {
        let rules = StyleRules::default();
        let mut p = Paragraph::with_text("42");
        let before = p.clone();
        apply_style(&mut p, SemanticRole::NumericCell, &rules);
        assert_eq!(p, before);
    }

    #[test]
    fn test_missing_style_is_synthesized() {
        let rules = StyleRules::default();
        let mut catalog = StyleCatalog::new();

        assert_eq!(
            ensure_role_style(&mut catalog, SemanticRole::Title, &rules),
            Some("Title")
        );
        let title = catalog.get("Title").unwrap();
        assert_eq!(title.size, Some(18.0));
        assert_eq!(title.bold, Some(true));
        assert_eq!(title.color, Some(Color::BLUE));
        assert_eq!(title.font.as_deref(), Some("Times New Roman"));

        assert_eq!(ensure_role_style(&mut catalog, SemanticRole::Title, &rules), None);
        assert_eq!(ensure_role_style(&mut catalog, SemanticRole::Body, &rules), None);
    }

    #[test]
    fn test_existing_style_is_kept() {
        let rules = StyleRules::default();
        let mut catalog = StyleCatalog::new();
        let custom = StyleDefinition {
            size: Some(30.0),
            ..Default::default()
        };
        catalog.insert("Heading 1", custom.clone());

        let role = SemanticRole::Heading(HeadingLevel::Major);
        assert_eq!(ensure_role_style(&mut catalog, role, &rules), None);
        assert_eq!(catalog.get("Heading 1"), Some(&custom));
    }
}
