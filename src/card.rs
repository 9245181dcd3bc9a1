use chrono::{DateTime, Utc};

use crate::catalog::{Genre, GenreMap, Item, ItemRef, Podcast};
use crate::dom::{create_element, Action, Element, ElementOptions};
use crate::format::format_list_date;

/// Build the grid card for a podcast or genre.
///
/// Missing optional fields (image, seasons, updated) leave their node out
/// of the card; construction itself cannot fail.
pub fn create_card(item: Item<'_>, genre_map: &GenreMap, now: DateTime<Utc>) -> Element {
    match item {
        Item::Podcast(podcast) => podcast_card(podcast, genre_map, now),
        Item::Genre(genre) => genre_card(genre),
    }
}

fn podcast_card(podcast: &Podcast, genre_map: &GenreMap, now: DateTime<Utc>) -> Element {
    let mut options = ElementOptions::class("card").attr("data-id", podcast.id.as_str());

    if let Some(image) = podcast.image.as_deref().filter(|s| !s.is_empty()) {
        options = options.child(create_element(
            "img",
            ElementOptions::class("cover")
                .attr("src", image)
                .attr("alt", podcast.title.as_str()),
        ));
    }

    options = options.child(create_element("h3", ElementOptions::default().text(&podcast.title)));

    if let Some(seasons) = podcast.seasons {
        options = options.child(create_element(
            "p",
            ElementOptions::class("meta").text(season_label(seasons)),
        ));
    }

    let tags = podcast
        .genres
        .iter()
        .map(|id| create_element("span", ElementOptions::class("tag").text(genre_map.title(id))));
    options = options.child(create_element("div", ElementOptions::class("tags").children(tags)));

    let updated = format_list_date(podcast.updated.as_deref(), now);
    if !updated.is_empty() {
        options = options.child(create_element("p", ElementOptions::class("updated").text(updated)));
    }

    create_element(
        "div",
        options.on("click", Action::OpenDetail(ItemRef::Podcast(podcast.id.clone()))),
    )
}

fn genre_card(genre: &Genre) -> Element {
    create_element(
        "div",
        ElementOptions::class("card genre-card")
            .attr("data-id", genre.id.to_string())
            .child(create_element("h3", ElementOptions::default().text(&genre.title)))
            .child(create_element(
                "p",
                ElementOptions::class("description").text(&genre.description),
            ))
            .on("click", Action::OpenDetail(ItemRef::Genre(genre.id.clone()))),
    )
}

fn season_label(seasons: u32) -> String {
    if seasons == 1 {
        "1 season".to_string()
    } else {
        format!("{} seasons", seasons)
    }
}
