//! Turn page elements into styled terminal lines

use ratatui::{
    style::{Modifier, Style},
    text::{Line, Span},
};

use crate::dom::Element;
use crate::theme::Theme;

/// Heading of a card (its `h3`), or an empty string
pub fn card_title(card: &Element) -> String {
    card.find_by_tag("h3").map(|h| h.text_content()).unwrap_or_default()
}

/// Body lines of a card, everything except the heading
pub fn card_lines(card: &Element, theme: &Theme) -> Vec<Line<'static>> {
    card.children()
        .iter()
        .filter(|child| child.tag() != "h3")
        .filter_map(|child| element_line(child, theme))
        .collect()
}

/// One line for a single element, chosen by its class
pub fn element_line(el: &Element, theme: &Theme) -> Option<Line<'static>> {
    if el.has_class("cover") {
        let alt = el.attribute("alt")?;
        return Some(Line::from(vec![
            Span::styled("▣ ", Style::default().fg(theme.inactive)),
            Span::styled(alt.to_string(), Style::default().fg(theme.text_dim)),
        ]));
    }
    if el.has_class("tags") {
        return Some(tag_line(el, theme));
    }
    if el.has_class("updated") {
        return Some(Line::from(Span::styled(
            el.text_content(),
            Style::default().fg(theme.text_dim).add_modifier(Modifier::ITALIC),
        )));
    }
    if el.has_class("meta") {
        return Some(Line::from(Span::styled(el.text_content(), Style::default().fg(theme.text_dim))));
    }
    if el.has_class("no-results") || el.has_class("no-shows") {
        return Some(Line::from(Span::styled(el.text_content(), Style::default().fg(theme.danger))));
    }

    let text = el.text_content();
    if text.is_empty() {
        None
    } else {
        Some(Line::from(Span::styled(text, Style::default().fg(theme.text))))
    }
}

/// Tags of a container, side by side
pub fn tag_line(container: &Element, theme: &Theme) -> Line<'static> {
    let mut spans = Vec::new();
    for tag in container.children().iter().filter(|c| c.has_class("tag")) {
        if !spans.is_empty() {
            spans.push(Span::raw(" "));
        }
        spans.push(Span::styled(
            format!("[{}]", tag.text_content()),
            Style::default().fg(theme.tag),
        ));
    }
    Line::from(spans)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::card::create_card;
    use crate::catalog::tests::sample_catalog;
    use crate::catalog::{GenreMap, Item};
    use chrono::{TimeZone, Utc};

    fn plain(line: &Line<'_>) -> String {
        line.spans.iter().map(|s| s.content.as_ref()).collect()
    }

    #[test]
    fn test_card_lines() {
        let catalog = sample_catalog();
        let map = GenreMap::from_genres(&catalog.genres);
        let now = Utc.with_ymd_and_hms(2022, 11, 3, 9, 0, 0).unwrap();
        let card = create_card(Item::Podcast(&catalog.podcasts[0]), &map, now);
        let theme = Theme::default();

        assert_eq!(card_title(&card), "Night Shift");
        let lines: Vec<String> = card_lines(&card, &theme).iter().map(plain).collect();
        assert_eq!(
            lines,
            vec![
                "▣ Night Shift",
                "2 seasons",
                "[Personal Growth] [Investigative]",
                "Updated today",
            ]
        );
    }
}
