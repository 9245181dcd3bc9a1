mod nodes;

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use crate::app::{App, Popup, Tab};
use crate::grid::NO_ITEMS_TEXT;
use crate::theme::Theme;

/// Rows taken by one card, borders included
const CARD_HEIGHT: u16 = 8;

pub fn draw(f: &mut Frame, app: &App) {
    let area = f.area();

    let chunks = split(area);
    draw_info_line(f, app, chunks[0]);
    draw_grid(f, app, chunks[1]);
    draw_footer(f, app, chunks[2]);

    // Draw overlays on top
    match app.popup {
        Popup::None => {}
        Popup::GenreFilter => draw_genre_filter(f, app),
        Popup::Help => draw_help_popup(f, &app.theme),
    }
    if app.page.modal.is_open() {
        draw_modal(f, app);
    }
}

fn split(area: Rect) -> std::rc::Rc<[Rect]> {
    Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Info line
            Constraint::Min(CARD_HEIGHT), // Grid
            Constraint::Length(1), // Footer
        ])
        .split(area)
}

/// Area the card grid is drawn in
pub fn grid_area(area: Rect) -> Rect {
    split(area)[1]
}

/// Area of the detail modal's content box
pub fn modal_area(area: Rect) -> Rect {
    centered_rect(70, 70, area)
}

/// The `[x]` close control in the modal's top border
pub fn close_button_area(modal: Rect) -> Rect {
    Rect::new(modal.x + modal.width.saturating_sub(6), modal.y, 5, 1)
}

/// One-row slots for the genre modal's show entries, at the bottom of the
/// modal content and scrolled so that `selected` stays visible. The list
/// never takes more than half the content height.
pub fn show_entry_rects(modal: Rect, count: usize, selected: usize) -> Vec<(usize, Rect)> {
    let inner = Rect::new(
        modal.x + 1,
        modal.y + 1,
        modal.width.saturating_sub(2),
        modal.height.saturating_sub(2),
    );
    let rows = count.min((inner.height / 2) as usize);
    if rows == 0 {
        return Vec::new();
    }

    let first = selected.saturating_sub(rows - 1).min(count - rows);
    let top = inner.bottom() - rows as u16;
    (0..rows)
        .map(|row| (first + row, Rect::new(inner.x, top + row as u16, inner.width, 1)))
        .collect()
}

/// Positions of the cards that fit on screen, scrolled so that
/// `selected` stays visible
pub fn card_rects(area: Rect, columns: u16, count: usize, selected: usize) -> Vec<(usize, Rect)> {
    let columns = columns.max(1);
    let cols = columns as usize;
    let card_width = area.width / columns;
    let visible_rows = (area.height / CARD_HEIGHT).max(1) as usize;
    let first_row = (selected / cols).saturating_sub(visible_rows - 1);

    let mut rects = Vec::new();
    for row in 0..visible_rows {
        for col in 0..cols {
            let index = (first_row + row) * cols + col;
            if index >= count {
                return rects;
            }
            rects.push((
                index,
                Rect::new(
                    area.x + col as u16 * card_width,
                    area.y + row as u16 * CARD_HEIGHT,
                    card_width,
                    CARD_HEIGHT.min(area.height),
                ),
            ));
        }
    }
    rects
}

fn draw_info_line(f: &mut Frame, app: &App, area: Rect) {
    let theme = &app.theme;

    let tab_span = |tab: Tab, label: &'static str| {
        if app.tab == tab {
            Span::styled(label, Style::default().fg(theme.accent).add_modifier(Modifier::BOLD))
        } else {
            Span::styled(label, Style::default().fg(theme.inactive))
        }
    };

    let mut spans = vec![
        Span::raw(" "),
        tab_span(Tab::Podcasts, "Podcasts"),
        Span::styled(" │ ", Style::default().fg(theme.inactive)),
        tab_span(Tab::Genres, "Genres"),
        Span::styled(" │ ", Style::default().fg(theme.inactive)),
    ];

    if let Some(ref status) = app.status_message {
        spans.push(Span::styled(status.clone(), Style::default().fg(theme.accent)));
    } else if app.tab == Tab::Podcasts {
        spans.push(Span::styled(
            format!("{} · {} shows", app.filter_label(), app.card_count()),
            Style::default().fg(theme.text_dim),
        ));
    } else {
        spans.push(Span::styled(
            format!("{} genres", app.card_count()),
            Style::default().fg(theme.text_dim),
        ));
    }

    f.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn draw_grid(f: &mut Frame, app: &App, area: Rect) {
    let theme = &app.theme;
    let cards = app.page.grid.cards();

    if cards.is_empty() {
        let empty = Paragraph::new(Line::from(Span::styled(
            NO_ITEMS_TEXT,
            Style::default().fg(theme.danger),
        )))
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(theme.inactive)),
        );
        f.render_widget(empty, area);
        return;
    }

    for (index, rect) in card_rects(area, app.columns, cards.len(), app.selected_card) {
        let card = cards[index];
        let is_selected = index == app.selected_card;
        let border_color = if is_selected { theme.accent } else { theme.inactive };
        let title_style = if is_selected {
            Style::default().fg(theme.accent).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(theme.text).add_modifier(Modifier::BOLD)
        };

        let block = Block::default()
            .title(Span::styled(format!(" {} ", nodes::card_title(card)), title_style))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(border_color));

        let body = Paragraph::new(nodes::card_lines(card, theme))
            .block(block)
            .wrap(Wrap { trim: true });
        f.render_widget(body, rect);
    }
}

fn draw_footer(f: &mut Frame, app: &App, area: Rect) {
    let theme = &app.theme;
    let key = |k: &'static str| Span::styled(k, Style::default().fg(theme.accent));
    let hint = |h: &'static str| Span::styled(h, Style::default().fg(theme.text_dim));

    let line = if app.page.modal.is_open() {
        Line::from(vec![
            key(" ↑↓"),
            hint(" select show  "),
            key("Enter"),
            hint(" open  "),
            key("Esc"),
            hint(" close"),
        ])
    } else {
        Line::from(vec![
            key(" ←↑↓→"),
            hint(" move  "),
            key("Enter"),
            hint(" details  "),
            key("Tab"),
            hint(" podcasts/genres  "),
            key("g"),
            hint(" genre filter  "),
            key("a"),
            hint(" all  "),
            key("?"),
            hint(" help  "),
            key("q"),
            hint(" quit"),
        ])
    };

    f.render_widget(Paragraph::new(line), area);
}

fn draw_genre_filter(f: &mut Frame, app: &App) {
    let theme = &app.theme;
    let popup_area = centered_rect(40, 60, f.area());
    f.render_widget(Clear, popup_area);

    let current = app.page.grid.filter_value();
    let lines: Vec<Line> = app
        .page
        .grid
        .filter()
        .children()
        .iter()
        .enumerate()
        .map(|(i, option)| {
            let active = option.attribute("value") == Some(current);
            let marker = if active { "● " } else { "  " };
            let style = if i == app.selected_option {
                Style::default().bg(theme.bg_selected).fg(theme.text)
            } else {
                Style::default().fg(theme.text)
            };
            Line::from(vec![
                Span::styled(marker, Style::default().fg(theme.accent)),
                Span::styled(option.text_content(), style),
            ])
        })
        .collect();

    let list = Paragraph::new(lines).block(
        Block::default()
            .title(Span::styled(" Filter by genre ", Style::default().fg(theme.accent)))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme.accent)),
    );
    f.render_widget(list, popup_area);
}

fn draw_modal(f: &mut Frame, app: &App) {
    let theme = &app.theme;
    let regions = &app.page.modal;
    let popup_area = modal_area(f.area());
    f.render_widget(Clear, popup_area);

    let mut lines: Vec<Line> = Vec::new();

    if regions.cover.attribute("hidden").is_none() {
        if let Some(src) = regions.cover.attribute("src") {
            lines.push(Line::from(vec![
                Span::styled("▣ ", Style::default().fg(theme.inactive)),
                Span::styled(
                    regions.cover.attribute("alt").unwrap_or_default().to_string(),
                    Style::default().fg(theme.text_dim),
                ),
            ]));
            lines.push(Line::from(Span::styled(src.to_string(), Style::default().fg(theme.inactive))));
            lines.push(Line::from(""));
        }
    }

    lines.push(nodes::tag_line(&regions.genres, theme));
    let updated = regions.updated.text_content();
    if !updated.is_empty() {
        lines.push(Line::from(Span::styled(updated, Style::default().fg(theme.text_dim))));
    }
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        regions.description.text_content(),
        Style::default().fg(theme.text),
    )));
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        regions.section_title.text_content(),
        Style::default().fg(theme.accent).add_modifier(Modifier::BOLD),
    )));

    for entry in regions.seasons.children() {
        if entry.has_class("show-entry") {
            continue;
        }
        if let Some(line) = nodes::element_line(entry, theme) {
            lines.push(line);
        }
    }

    let block = Block::default()
        .title(Span::styled(
            format!(" {} ", regions.title.text_content()),
            Style::default().fg(theme.accent).add_modifier(Modifier::BOLD),
        ))
        .title_top(Line::from(Span::styled(" [x] ", Style::default().fg(theme.danger))).right_aligned())
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.accent));
    let inner = block.inner(popup_area);
    f.render_widget(block, popup_area);

    let entries = regions.seasons.find_all_by_class("show-entry");
    let entry_rects = show_entry_rects(popup_area, entries.len(), app.selected_show);

    let body_area = Rect {
        height: inner.height.saturating_sub(entry_rects.len() as u16),
        ..inner
    };
    f.render_widget(Paragraph::new(lines).wrap(Wrap { trim: false }), body_area);

    for (index, rect) in entry_rects {
        let style = if index == app.selected_show {
            Style::default().bg(theme.bg_selected).fg(theme.text)
        } else {
            Style::default().fg(theme.text)
        };
        let line = Line::from(vec![
            Span::styled("  • ", Style::default().fg(theme.accent)),
            Span::styled(entries[index].text_content(), style),
        ]);
        f.render_widget(Paragraph::new(line), rect);
    }
}

fn draw_help_popup(f: &mut Frame, theme: &Theme) {
    let popup_area = centered_rect(60, 60, f.area());
    f.render_widget(Clear, popup_area);

    let entry = |k: &'static str, desc: &'static str| {
        Line::from(vec![
            Span::styled(format!("  {:<12}", k), Style::default().fg(theme.accent)),
            Span::styled(desc, Style::default().fg(theme.text)),
        ])
    };

    let help_text = vec![
        Line::from(Span::styled("  Grid", Style::default().fg(theme.text_dim).add_modifier(Modifier::BOLD))),
        entry("←↑↓→ hjkl", "Move between cards"),
        entry("Enter", "Open details"),
        entry("Tab", "Switch podcasts / genres"),
        entry("g", "Choose a genre filter"),
        entry("a", "Show all genres"),
        entry("q", "Quit"),
        Line::from(""),
        Line::from(Span::styled("  Details", Style::default().fg(theme.text_dim).add_modifier(Modifier::BOLD))),
        entry("↑↓", "Select a show (genre view)"),
        entry("Enter", "Open the selected show"),
        entry("Esc x", "Close"),
        entry("click", "A show opens it, outside the box closes"),
        Line::from(""),
        Line::from(vec![
            Span::styled("  Press ", Style::default().fg(theme.text_dim)),
            Span::styled("?", Style::default().fg(theme.accent)),
            Span::styled("/", Style::default().fg(theme.text_dim)),
            Span::styled("Esc", Style::default().fg(theme.accent)),
            Span::styled(" to close", Style::default().fg(theme.text_dim)),
        ]),
    ];

    let help = Paragraph::new(help_text)
        .block(
            Block::default()
                .title(Span::styled(" podshelf Help ", Style::default().fg(theme.accent)))
                .borders(Borders::ALL)
                .border_style(Style::default().fg(theme.accent)),
        )
        .wrap(Wrap { trim: false });

    f.render_widget(help, popup_area);
}

fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
