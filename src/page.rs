//! Host page structure.
//!
//! These are the structural elements the browser populates. Each carries a
//! stable id; the controllers never create or remove them.

use crate::dom::{create_element, Action, Element, ElementOptions};
use crate::grid::{GridController, ALL_GENRES};

pub const GRID_ID: &str = "podcastGrid";
pub const GENRE_FILTER_ID: &str = "genreFilter";
pub const MODAL_ID: &str = "modal";
pub const MODAL_COVER_ID: &str = "modalCover";
pub const MODAL_TITLE_ID: &str = "modalTitle";
pub const MODAL_DESCRIPTION_ID: &str = "modalDescription";
pub const MODAL_GENRES_ID: &str = "modalGenres";
pub const MODAL_UPDATED_ID: &str = "modalUpdated";
pub const MODAL_SEASONS_ID: &str = "modalSeasons";
pub const MODAL_SECTION_TITLE_ID: &str = "modalSectionTitle";
pub const CLOSE_MODAL_ID: &str = "closeModal";

fn region(tag: &str, id: &str) -> Element {
    create_element(tag, ElementOptions::default().attr("id", id))
}

pub fn grid_container() -> Element {
    create_element("div", ElementOptions::class("grid").attr("id", GRID_ID))
}

pub fn genre_select() -> Element {
    create_element(
        "select",
        ElementOptions::default()
            .attr("id", GENRE_FILTER_ID)
            .attr("value", ALL_GENRES)
            .on("change", Action::FilterChanged),
    )
}

/// Named regions of the detail modal
#[derive(Debug, Clone)]
pub struct ModalRegions {
    /// The overlay itself; carries the `open` attribute while shown
    pub overlay: Element,
    pub cover: Element,
    pub title: Element,
    pub description: Element,
    pub genres: Element,
    pub updated: Element,
    pub seasons: Element,
    pub section_title: Element,
    pub close: Element,
}

impl ModalRegions {
    pub fn new() -> Self {
        Self {
            overlay: create_element("dialog", ElementOptions::class("modal").attr("id", MODAL_ID)),
            cover: region("img", MODAL_COVER_ID),
            title: region("h2", MODAL_TITLE_ID),
            description: region("p", MODAL_DESCRIPTION_ID),
            genres: region("div", MODAL_GENRES_ID),
            updated: region("p", MODAL_UPDATED_ID),
            seasons: region("ul", MODAL_SEASONS_ID),
            section_title: create_element(
                "h4",
                ElementOptions::default().attr("id", MODAL_SECTION_TITLE_ID).text("Seasons"),
            ),
            close: create_element(
                "button",
                ElementOptions::default()
                    .attr("id", CLOSE_MODAL_ID)
                    .text("Close")
                    .on("click", Action::CloseModal),
            ),
        }
    }

    pub fn is_open(&self) -> bool {
        self.overlay.attribute("open").is_some()
    }
}

impl Default for ModalRegions {
    fn default() -> Self {
        Self::new()
    }
}

/// Everything the browser draws
#[derive(Debug, Clone)]
pub struct Page {
    pub grid: GridController,
    pub modal: ModalRegions,
}

impl Page {
    pub fn new() -> Self {
        Self {
            grid: GridController::new(grid_container(), genre_select()),
            modal: ModalRegions::new(),
        }
    }
}

impl Default for Page {
    fn default() -> Self {
        Self::new()
    }
}
