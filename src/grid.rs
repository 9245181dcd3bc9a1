use chrono::{DateTime, Utc};

use crate::card::create_card;
use crate::catalog::{Catalog, Genre, GenreId, GenreMap, Item, Podcast};
use crate::dom::{create_element, Element, ElementOptions};

/// Filter value meaning "no filtering"
pub const ALL_GENRES: &str = "all";

pub const NO_ITEMS_TEXT: &str = "No items found.";

/// Podcasts in the given genre, in input order.
///
/// `"all"` and tokens that are not numbers leave the input untouched. A
/// number is compared in its canonical form, so `"2.0"` selects genre `2`.
pub fn filter_by_genre<'a>(items: &'a [Podcast], token: &str) -> Vec<&'a Podcast> {
    if token == ALL_GENRES {
        return items.iter().collect();
    }

    let Some(number) = token.trim().parse::<f64>().ok().filter(|n| n.is_finite()) else {
        tracing::debug!("Ignoring non-numeric genre filter {:?}", token);
        return items.iter().collect();
    };

    let id = GenreId::from_number(number);
    items.iter().filter(|p| p.genres.contains(&id)).collect()
}

/// Owns the grid container and the genre select, and keeps both in sync
/// with the catalog
#[derive(Debug, Clone)]
pub struct GridController {
    container: Element,
    filter: Element,
}

impl GridController {
    pub fn new(container: Element, filter: Element) -> Self {
        Self { container, filter }
    }

    pub fn container(&self) -> &Element {
        &self.container
    }

    pub fn filter(&self) -> &Element {
        &self.filter
    }

    /// Rendered card nodes, in display order (excludes the placeholder)
    pub fn cards(&self) -> Vec<&Element> {
        self.container
            .children()
            .iter()
            .filter(|c| c.has_class("card"))
            .collect()
    }

    /// Current value of the genre select
    pub fn filter_value(&self) -> &str {
        self.filter.attribute("value").unwrap_or(ALL_GENRES)
    }

    pub fn set_filter_value(&mut self, token: &str) {
        self.filter.set_attribute("value", token);
    }

    /// Replace the grid contents with one card per item
    pub fn render_items(&mut self, items: &[Item<'_>], genre_map: &GenreMap, now: DateTime<Utc>) {
        self.container.clear();

        if items.is_empty() {
            self.container.append_child(create_element(
                "p",
                ElementOptions::class("no-results").text(NO_ITEMS_TEXT),
            ));
            return;
        }

        for item in items {
            self.container.append_child(create_card(*item, genre_map, now));
        }
    }

    /// Rebuild the select options: "All Genres" first, then each genre
    pub fn populate_genre_filter(&mut self, genres: &[Genre]) {
        self.filter.clear();
        self.filter.append_child(option(ALL_GENRES, "All Genres"));
        for genre in genres {
            self.filter.append_child(option(&genre.id.to_string(), &genre.title));
        }

        let current = self.filter_value().to_string();
        let known = self
            .filter
            .children()
            .iter()
            .any(|o| o.attribute("value") == Some(current.as_str()));
        if !known {
            self.filter.set_attribute("value", ALL_GENRES);
        }
    }

    /// Apply a new select value. Always filters the full podcast
    /// collection, so filters never stack.
    pub fn on_filter_change(
        &mut self,
        token: &str,
        catalog: &Catalog,
        genre_map: &GenreMap,
        now: DateTime<Utc>,
    ) {
        self.set_filter_value(token);

        let items: Vec<Item<'_>> = filter_by_genre(&catalog.podcasts, token)
            .into_iter()
            .map(Item::Podcast)
            .collect();
        tracing::info!("Genre filter {:?}: {} podcasts", token, items.len());
        self.render_items(&items, genre_map, now);
    }

    /// Render the genre collection as cards
    pub fn show_genres(&mut self, catalog: &Catalog, genre_map: &GenreMap, now: DateTime<Utc>) {
        self.render_items(&catalog.genre_items(), genre_map, now);
    }
}

fn option(value: &str, label: &str) -> Element {
    create_element("option", ElementOptions::default().attr("value", value).text(label))
}
