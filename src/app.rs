use chrono::Utc;
use crossterm::event::{KeyCode, KeyEvent, MouseButton, MouseEvent, MouseEventKind};
use ratatui::layout::{Position, Rect};
use std::time::{Duration, Instant};

use crate::catalog::{Catalog, GenreMap, Variant};
use crate::config::AppConfig;
use crate::dom::Action;
use crate::grid::ALL_GENRES;
use crate::modal::ModalState;
use crate::page::Page;
use crate::theme::Theme;
use crate::ui;

/// How long a status message stays in the info line
const STATUS_TIMEOUT: Duration = Duration::from_secs(3);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tab {
    Podcasts,
    Genres,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Popup {
    None,
    GenreFilter,
    Help,
}

pub struct App {
    pub catalog: Catalog,
    pub genre_map: GenreMap,
    pub page: Page,
    pub modal: ModalState,

    pub tab: Tab,
    pub popup: Popup,

    // Grid selection
    pub selected_card: usize,
    pub columns: u16,

    // Genre filter popup selection (index into the select's options)
    pub selected_option: usize,

    // Show entry selection inside a genre modal
    pub selected_show: usize,

    pub theme: Theme,

    // Status message (shown in info line, auto-clears after timeout)
    pub status_message: Option<String>,
    pub status_message_time: Option<Instant>,
}

impl App {
    pub fn new(catalog: Catalog, config: &AppConfig, genre_token: &str) -> Self {
        let genre_map = GenreMap::from_genres(&catalog.genres);

        let mut app = Self {
            catalog,
            genre_map,
            page: Page::new(),
            modal: ModalState::new(),
            tab: Tab::Podcasts,
            popup: Popup::None,
            selected_card: 0,
            columns: config.grid_columns,
            selected_option: 0,
            selected_show: 0,
            theme: Theme::from_config(&config.theme),
            status_message: None,
            status_message_time: None,
        };

        app.page.grid.populate_genre_filter(&app.catalog.genres);
        app.page.grid.on_filter_change(genre_token, &app.catalog, &app.genre_map, Utc::now());
        tracing::info!(
            "Catalog ready: {} podcasts, {} genres",
            app.catalog.podcasts.len(),
            app.catalog.genres.len()
        );
        app
    }

    /// Set a status message (auto-clears after a few seconds)
    fn set_status(&mut self, msg: impl Into<String>) {
        self.status_message = Some(msg.into());
        self.status_message_time = Some(Instant::now());
    }

    /// True when no overlay is capturing keys
    pub fn is_idle(&self) -> bool {
        self.popup == Popup::None && !self.modal.is_open()
    }

    /// Title of the active genre filter, if any
    pub fn filter_label(&self) -> String {
        let value = self.page.grid.filter_value();
        if value == ALL_GENRES {
            return "All Genres".to_string();
        }
        self.page
            .grid
            .filter()
            .children()
            .iter()
            .find(|o| o.attribute("value") == Some(value))
            .map(|o| o.text_content())
            .unwrap_or_else(|| value.to_string())
    }

    pub fn card_count(&self) -> usize {
        self.page.grid.cards().len()
    }

    /// Apply an action handed back by an element listener
    pub fn apply(&mut self, action: Action) {
        match action {
            Action::OpenDetail(item) => {
                self.modal.open(item);
                self.selected_show = 0;
            }
            Action::CloseModal => self.modal.close(),
            Action::FilterChanged => {
                let token = self.page.grid.filter_value().to_string();
                self.tab = Tab::Podcasts;
                self.page
                    .grid
                    .on_filter_change(&token, &self.catalog, &self.genre_map, Utc::now());
                self.selected_card = 0;
                self.set_status(format!("{}: {} podcasts", self.filter_label(), self.card_count()));
            }
        }
        self.modal
            .render_into(&mut self.page.modal, &self.catalog, &self.genre_map);
    }

    /// Dispatch `click` on the card at `index`
    fn click_card(&mut self, index: usize) {
        let action = self
            .page
            .grid
            .cards()
            .get(index)
            .and_then(|card| card.dispatch("click"))
            .cloned();
        if let Some(action) = action {
            self.apply(action);
        }
    }

    /// Dispatch `click` on the selected show entry of a genre modal
    fn click_show(&mut self) {
        let action = self
            .page
            .modal
            .seasons
            .find_all_by_class("show-entry")
            .get(self.selected_show)
            .and_then(|entry| entry.dispatch("click"))
            .cloned();
        if let Some(action) = action {
            self.apply(action);
        }
    }

    fn close_modal(&mut self) {
        if let Some(action) = self.page.modal.close.dispatch("click").cloned() {
            self.apply(action);
        }
    }

    /// Set the select value and fire its `change` event
    fn choose_genre(&mut self, token: &str) {
        self.page.grid.set_filter_value(token);
        if let Some(action) = self.page.grid.filter().dispatch("change").cloned() {
            self.apply(action);
        }
    }

    fn switch_tab(&mut self, tab: Tab) {
        self.tab = tab;
        self.selected_card = 0;
        let now = Utc::now();
        match tab {
            Tab::Podcasts => {
                let token = self.page.grid.filter_value().to_string();
                self.page
                    .grid
                    .on_filter_change(&token, &self.catalog, &self.genre_map, now);
            }
            Tab::Genres => self.page.grid.show_genres(&self.catalog, &self.genre_map, now),
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent) {
        // The modal sits above everything else
        if self.modal.is_open() {
            self.handle_modal_key(key);
            return;
        }

        match self.popup {
            Popup::GenreFilter => self.handle_filter_key(key),
            Popup::Help => {
                if matches!(key.code, KeyCode::Esc | KeyCode::Char('?') | KeyCode::Enter | KeyCode::Char('q')) {
                    self.popup = Popup::None;
                }
            }
            Popup::None => self.handle_normal_key(key),
        }
    }

    fn handle_normal_key(&mut self, key: KeyEvent) {
        let count = self.card_count();
        let columns = self.columns.max(1) as usize;

        match key.code {
            KeyCode::Tab | KeyCode::BackTab => {
                let next = match self.tab {
                    Tab::Podcasts => Tab::Genres,
                    Tab::Genres => Tab::Podcasts,
                };
                self.switch_tab(next);
            }

            KeyCode::Right | KeyCode::Char('l') => {
                if self.selected_card + 1 < count {
                    self.selected_card += 1;
                }
            }
            KeyCode::Left | KeyCode::Char('h') => {
                self.selected_card = self.selected_card.saturating_sub(1);
            }
            KeyCode::Down | KeyCode::Char('j') => {
                if self.selected_card + columns < count {
                    self.selected_card += columns;
                }
            }
            KeyCode::Up | KeyCode::Char('k') => {
                if self.selected_card >= columns {
                    self.selected_card -= columns;
                }
            }

            KeyCode::Enter | KeyCode::Char(' ') => self.click_card(self.selected_card),

            KeyCode::Char('g') => {
                let value = self.page.grid.filter_value().to_string();
                self.selected_option = self
                    .page
                    .grid
                    .filter()
                    .children()
                    .iter()
                    .position(|o| o.attribute("value") == Some(value.as_str()))
                    .unwrap_or(0);
                self.popup = Popup::GenreFilter;
            }
            KeyCode::Char('a') => self.choose_genre(ALL_GENRES),

            KeyCode::Char('?') => self.popup = Popup::Help,

            _ => {}
        }
    }

    fn handle_filter_key(&mut self, key: KeyEvent) {
        let options = self.page.grid.filter().children().len();

        match key.code {
            KeyCode::Down | KeyCode::Char('j') => {
                if options > 0 {
                    self.selected_option = (self.selected_option + 1) % options;
                }
            }
            KeyCode::Up | KeyCode::Char('k') => {
                if options > 0 {
                    self.selected_option = self.selected_option.checked_sub(1).unwrap_or(options - 1);
                }
            }
            KeyCode::Enter => {
                let token = self
                    .page
                    .grid
                    .filter()
                    .children()
                    .get(self.selected_option)
                    .and_then(|o| o.attribute("value"))
                    .map(str::to_string);
                self.popup = Popup::None;
                if let Some(token) = token {
                    self.choose_genre(&token);
                }
            }
            KeyCode::Esc | KeyCode::Char('q') => self.popup = Popup::None,
            _ => {}
        }
    }

    fn handle_modal_key(&mut self, key: KeyEvent) {
        let shows = self.page.modal.seasons.find_all_by_class("show-entry").len();

        match key.code {
            KeyCode::Esc | KeyCode::Char('x') | KeyCode::Char('q') => self.close_modal(),
            KeyCode::Down | KeyCode::Char('j') if shows > 0 => {
                self.selected_show = (self.selected_show + 1) % shows;
            }
            KeyCode::Up | KeyCode::Char('k') if shows > 0 => {
                self.selected_show = self.selected_show.checked_sub(1).unwrap_or(shows - 1);
            }
            KeyCode::Enter if self.modal.variant() == Some(Variant::Genre) => self.click_show(),
            _ => {}
        }
    }

    /// Mouse clicks: cards and show entries open, the backdrop and the close
    /// control close
    pub fn handle_mouse(&mut self, event: MouseEvent, area: Rect) {
        if event.kind != MouseEventKind::Down(MouseButton::Left) {
            return;
        }
        let pos = Position::new(event.column, event.row);

        if self.modal.is_open() {
            let modal_area = ui::modal_area(area);
            if !modal_area.contains(pos) || ui::close_button_area(modal_area).contains(pos) {
                self.close_modal();
                return;
            }

            let shows = self.page.modal.seasons.find_all_by_class("show-entry").len();
            let hit = ui::show_entry_rects(modal_area, shows, self.selected_show)
                .into_iter()
                .find(|(_, rect)| rect.contains(pos))
                .map(|(index, _)| index);
            if let Some(index) = hit {
                self.selected_show = index;
                self.click_show();
            }
            return;
        }

        if self.popup != Popup::None {
            return;
        }

        let hit = ui::card_rects(ui::grid_area(area), self.columns, self.card_count(), self.selected_card)
            .into_iter()
            .find(|(_, rect)| rect.contains(pos))
            .map(|(index, _)| index);
        if let Some(index) = hit {
            self.selected_card = index;
            self.click_card(index);
        }
    }

    /// Periodic housekeeping
    pub fn tick(&mut self) {
        if let Some(time) = self.status_message_time {
            if time.elapsed() >= STATUS_TIMEOUT {
                self.status_message = None;
                self.status_message_time = None;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::tests::sample_catalog;
    use crate::catalog::{GenreId, ItemRef, ShowId};
    use crossterm::event::KeyModifiers;

    fn app() -> App {
        App::new(sample_catalog(), &AppConfig::default(), "all")
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn click(column: u16, row: u16) -> MouseEvent {
        MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column,
            row,
            modifiers: KeyModifiers::NONE,
        }
    }

    #[test]
    fn test_initial_render() {
        let app = app();
        assert_eq!(app.card_count(), 3);
        assert_eq!(app.page.grid.filter().children().len(), 4);
        assert!(app.is_idle());
    }

    #[test]
    fn test_initial_genre_token() {
        let app = App::new(sample_catalog(), &AppConfig::default(), "3");
        assert_eq!(app.card_count(), 1);
        assert_eq!(app.filter_label(), "Science");
    }

    #[test]
    fn test_enter_opens_and_escape_closes() {
        let mut app = app();
        app.handle_key(key(KeyCode::Right));
        app.handle_key(key(KeyCode::Enter));

        assert!(app.modal.is_open());
        assert_eq!(app.modal.current(), Some(&ItemRef::Podcast(ShowId::from(5))));
        assert_eq!(app.page.modal.title.text_content(), "Market Hours");

        app.handle_key(key(KeyCode::Esc));
        assert!(!app.modal.is_open());
        assert!(!app.page.modal.is_open());
    }

    #[test]
    fn test_genre_tab_and_show_navigation() {
        let mut app = app();
        app.handle_key(key(KeyCode::Tab));
        assert_eq!(app.tab, Tab::Genres);
        assert!(app.page.grid.cards().iter().all(|c| c.has_class("genre-card")));

        // Open the second genre, move to its second show and follow it
        app.handle_key(key(KeyCode::Right));
        app.handle_key(key(KeyCode::Enter));
        assert_eq!(app.modal.current(), Some(&ItemRef::Genre(GenreId::from(2))));

        app.handle_key(key(KeyCode::Down));
        app.handle_key(key(KeyCode::Enter));
        assert_eq!(app.modal.current(), Some(&ItemRef::Podcast(ShowId::from(5))));
        assert_eq!(app.page.modal.section_title.text_content(), "Seasons");
    }

    #[test]
    fn test_filter_popup() {
        let mut app = app();
        app.handle_key(key(KeyCode::Char('g')));
        assert_eq!(app.popup, Popup::GenreFilter);
        assert_eq!(app.selected_option, 0);

        // All Genres -> Personal Growth -> Investigative
        app.handle_key(key(KeyCode::Down));
        app.handle_key(key(KeyCode::Down));
        app.handle_key(key(KeyCode::Enter));

        assert_eq!(app.popup, Popup::None);
        assert_eq!(app.page.grid.filter_value(), "2");
        assert_eq!(app.card_count(), 2);
        assert_eq!(app.filter_label(), "Investigative");

        app.handle_key(key(KeyCode::Char('a')));
        assert_eq!(app.card_count(), 3);
    }

    #[test]
    fn test_backdrop_click_closes() {
        let mut app = app();
        let area = Rect::new(0, 0, 120, 40);

        app.apply(Action::OpenDetail(ItemRef::Genre(GenreId::from(1))));
        assert!(app.modal.is_open());

        // Inside the content area: stays open
        let modal = ui::modal_area(area);
        app.handle_mouse(click(modal.x + 2, modal.y + 2), area);
        assert!(app.modal.is_open());

        // Backdrop
        app.handle_mouse(click(0, 0), area);
        assert!(!app.modal.is_open());

        // Second close is a no-op
        app.apply(Action::CloseModal);
        assert!(!app.modal.is_open());
    }

    #[test]
    fn test_click_card_opens_modal() {
        let mut app = app();
        let area = Rect::new(0, 0, 120, 40);
        let rects = ui::card_rects(ui::grid_area(area), app.columns, app.card_count(), 0);
        let (index, rect) = rects[2];

        app.handle_mouse(click(rect.x + 1, rect.y + 1), area);
        assert_eq!(app.selected_card, index);
        assert_eq!(app.modal.current(), Some(&ItemRef::Podcast(ShowId::from(7))));
    }

    #[test]
    fn test_click_show_entry_opens_podcast() {
        let mut app = app();
        let area = Rect::new(0, 0, 120, 40);
        app.apply(Action::OpenDetail(ItemRef::Genre(GenreId::from(2))));

        let rects = ui::show_entry_rects(ui::modal_area(area), 2, app.selected_show);
        assert_eq!(rects.len(), 2);
        let (_, rect) = rects[1];

        app.handle_mouse(click(rect.x + 4, rect.y), area);
        assert!(app.modal.is_open());
        assert_eq!(app.modal.current(), Some(&ItemRef::Podcast(ShowId::from(5))));
        assert_eq!(app.page.modal.title.text_content(), "Market Hours");
    }

    #[test]
    fn test_modal_blocks_grid_keys() {
        let mut app = app();
        app.handle_key(key(KeyCode::Enter));
        app.handle_key(key(KeyCode::Char('g')));
        assert_eq!(app.popup, Popup::None);
        assert!(!app.is_idle());
    }
}
