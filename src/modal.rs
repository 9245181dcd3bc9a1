//! Detail modal: an explicit open/closed state plus a projection of that
//! state onto the modal regions of the page.

use crate::catalog::{Catalog, Genre, GenreMap, Item, ItemRef, Podcast, Variant};
use crate::dom::{create_element, Action, ElementOptions};
use crate::format::format_modal_date;
use crate::page::ModalRegions;

pub const NO_SHOWS_TEXT: &str = "No shows available for this genre.";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ModalState {
    current: Option<ItemRef>,
    visible: bool,
}

impl ModalState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Show an item, replacing whatever was shown before. No history is kept.
    pub fn open(&mut self, item: ItemRef) {
        tracing::debug!("Opening modal for {:?}", item);
        self.current = Some(item);
        self.visible = true;
    }

    /// Hide the modal. Closing an already closed modal does nothing.
    pub fn close(&mut self) {
        if self.visible {
            tracing::debug!("Closing modal");
            self.visible = false;
        }
    }

    pub fn is_open(&self) -> bool {
        self.visible
    }

    pub fn current(&self) -> Option<&ItemRef> {
        self.current.as_ref()
    }

    pub fn variant(&self) -> Option<Variant> {
        self.current().map(|item| match item {
            ItemRef::Podcast(_) => Variant::Podcast,
            ItemRef::Genre(_) => Variant::Genre,
        })
    }

    /// Write the current state into the modal regions.
    ///
    /// Every region is cleared first, so nothing from a previous item
    /// survives. An item that no longer resolves closes the modal.
    pub fn render_into(&mut self, regions: &mut ModalRegions, catalog: &Catalog, genre_map: &GenreMap) {
        if !self.visible {
            regions.overlay.remove_attribute("open");
            return;
        }

        let item = match self.current.as_ref().and_then(|r| catalog.resolve(r)) {
            Some(item) => item,
            None => {
                tracing::warn!("Modal item {:?} not found in catalog", self.current);
                self.close();
                regions.overlay.remove_attribute("open");
                return;
            }
        };

        clear_regions(regions);
        match item {
            Item::Podcast(podcast) => render_podcast(regions, podcast, genre_map),
            Item::Genre(genre) => render_genre(regions, genre, catalog, genre_map),
        }
        regions.overlay.set_attribute("open", "");
    }
}

fn clear_regions(regions: &mut ModalRegions) {
    regions.cover.remove_attribute("src");
    regions.cover.remove_attribute("alt");
    regions.cover.set_attribute("hidden", "");
    regions.title.clear();
    regions.description.clear();
    regions.genres.clear();
    regions.updated.clear();
    regions.seasons.clear();
    regions.section_title.clear();
}

fn render_podcast(regions: &mut ModalRegions, podcast: &Podcast, genre_map: &GenreMap) {
    if let Some(image) = podcast.image.as_deref().filter(|s| !s.is_empty()) {
        regions.cover.set_attribute("src", image);
        regions.cover.set_attribute("alt", format!("{} cover", podcast.title));
        regions.cover.remove_attribute("hidden");
    }

    regions.title.set_inner_html(&podcast.title);
    regions.description.set_inner_html(&podcast.description);

    for id in &podcast.genres {
        regions.genres.append_child(create_element(
            "span",
            ElementOptions::class("tag").text(genre_map.title(id)),
        ));
    }

    regions.updated.set_inner_html(format_modal_date(podcast.updated.as_deref()));

    regions.section_title.set_inner_html("Seasons");
    if let Some(seasons) = podcast.seasons {
        regions.seasons.append_child(create_element(
            "li",
            ElementOptions::class("season-count").text(format!("Seasons: {}", seasons)),
        ));
    }
}

fn render_genre(regions: &mut ModalRegions, genre: &Genre, catalog: &Catalog, genre_map: &GenreMap) {
    regions.title.set_inner_html(&genre.title);
    regions.description.set_inner_html(&genre.description);
    regions.genres.append_child(create_element(
        "span",
        ElementOptions::class("tag").text(genre_map.title(&genre.id)),
    ));

    regions.section_title.set_inner_html("Shows");

    let shows = catalog.shows_in(genre);
    if shows.is_empty() {
        regions.seasons.append_child(create_element(
            "p",
            ElementOptions::class("no-shows").text(NO_SHOWS_TEXT),
        ));
        return;
    }

    for show in shows {
        regions.seasons.append_child(create_element(
            "li",
            ElementOptions::class("show-entry")
                .attr("data-id", show.id.as_str())
                .text(&show.title)
                .on("click", Action::OpenDetail(ItemRef::Podcast(show.id.clone()))),
        ));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::tests::sample_catalog;
    use crate::catalog::{GenreId, ShowId};

    fn setup() -> (Catalog, GenreMap, ModalRegions, ModalState) {
        let catalog = sample_catalog();
        let map = GenreMap::from_genres(&catalog.genres);
        (catalog, map, ModalRegions::new(), ModalState::new())
    }

    fn tags(regions: &ModalRegions) -> Vec<String> {
        regions.genres.children().iter().map(|t| t.text_content()).collect()
    }

    #[test]
    fn test_starts_closed() {
        let state = ModalState::new();
        assert!(!state.is_open());
        assert!(state.current().is_none());
        assert!(state.variant().is_none());
    }

    #[test]
    fn test_open_podcast() {
        let (catalog, map, mut regions, mut state) = setup();
        state.open(ItemRef::Podcast(ShowId::from(3)));
        state.render_into(&mut regions, &catalog, &map);

        assert!(regions.is_open());
        assert_eq!(state.variant(), Some(Variant::Podcast));
        assert_eq!(regions.cover.attribute("src"), Some("https://img.example/3.jpg"));
        assert_eq!(regions.cover.attribute("alt"), Some("Night Shift cover"));
        assert!(regions.cover.attribute("hidden").is_none());
        assert_eq!(regions.title.text_content(), "Night Shift");
        assert_eq!(regions.description.text_content(), "Stories after dark");
        assert_eq!(tags(&regions), vec!["Personal Growth", "Investigative"]);
        assert_eq!(regions.updated.text_content(), "Last updated: November 3, 2022");
        assert_eq!(regions.section_title.text_content(), "Seasons");
        assert_eq!(regions.seasons.text_content(), "Seasons: 2");
    }

    #[test]
    fn test_podcast_missing_fields() {
        let (catalog, map, mut regions, mut state) = setup();
        state.open(ItemRef::Podcast(ShowId::from(5)));
        state.render_into(&mut regions, &catalog, &map);

        assert!(regions.cover.attribute("src").is_none());
        assert!(regions.cover.attribute("hidden").is_some());
        assert_eq!(regions.updated.text_content(), "");
        assert_eq!(tags(&regions), vec!["Investigative", "Genre 99"]);

        state.open(ItemRef::Podcast(ShowId::from(7)));
        state.render_into(&mut regions, &catalog, &map);
        assert!(regions.seasons.children().is_empty());
    }

    #[test]
    fn test_genre_replaces_podcast_entirely() {
        let (catalog, map, mut regions, mut state) = setup();
        state.open(ItemRef::Podcast(ShowId::from(3)));
        state.render_into(&mut regions, &catalog, &map);
        state.open(ItemRef::Genre(GenreId::from(2)));
        state.render_into(&mut regions, &catalog, &map);

        assert_eq!(state.variant(), Some(Variant::Genre));
        assert!(regions.cover.attribute("src").is_none());
        assert!(regions.cover.attribute("alt").is_none());
        assert_eq!(regions.title.text_content(), "Investigative");
        assert_eq!(regions.description.text_content(), "Dig");
        assert_eq!(tags(&regions), vec!["Investigative"]);
        assert_eq!(regions.updated.text_content(), "");
        assert_eq!(regions.section_title.text_content(), "Shows");
        assert!(!regions.seasons.text_content().contains("Seasons:"));
    }

    #[test]
    fn test_genre_show_list_matches_mixed_ids() {
        let (catalog, map, mut regions, mut state) = setup();
        state.open(ItemRef::Genre(GenreId::from(2)));
        state.render_into(&mut regions, &catalog, &map);

        let entries = regions.seasons.find_all_by_class("show-entry");
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].attribute("data-id"), Some("3"));
        assert_eq!(entries[1].attribute("data-id"), Some("5"));
        assert_eq!(entries[1].text_content(), "Market Hours");

        let action = entries[1].dispatch("click").cloned();
        assert_eq!(action, Some(Action::OpenDetail(ItemRef::Podcast(ShowId::from(5)))));

        // Following the entry replaces the genre view with the podcast
        if let Some(Action::OpenDetail(item)) = action {
            state.open(item);
        }
        state.render_into(&mut regions, &catalog, &map);
        assert_eq!(state.variant(), Some(Variant::Podcast));
        assert_eq!(regions.title.text_content(), "Market Hours");
        assert_eq!(regions.section_title.text_content(), "Seasons");
    }

    #[test]
    fn test_genre_without_shows() {
        let (catalog, map, mut regions, mut state) = setup();
        state.open(ItemRef::Genre(GenreId::from(3)));
        state.render_into(&mut regions, &catalog, &map);

        assert_eq!(regions.seasons.children().len(), 1);
        assert_eq!(regions.seasons.text_content(), NO_SHOWS_TEXT);
    }

    #[test]
    fn test_close_is_idempotent() {
        let (catalog, map, mut regions, mut state) = setup();
        state.open(ItemRef::Genre(GenreId::from(1)));
        state.render_into(&mut regions, &catalog, &map);
        assert!(regions.is_open());

        state.close();
        state.render_into(&mut regions, &catalog, &map);
        assert!(!state.is_open());
        assert!(!regions.is_open());

        let before = state.clone();
        state.close();
        state.render_into(&mut regions, &catalog, &map);
        assert_eq!(state, before);
        assert!(!regions.is_open());
    }

    #[test]
    fn test_unknown_item_closes() {
        let (catalog, map, mut regions, mut state) = setup();
        state.open(ItemRef::Podcast(ShowId::new("missing")));
        state.render_into(&mut regions, &catalog, &map);
        assert!(!state.is_open());
        assert!(!regions.is_open());
    }
}
