pub mod ids;

use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};
use thiserror::Error;

pub use ids::{GenreId, ShowId};

/// Catalog compiled into the binary, used when no data file is configured
const BUILTIN_CATALOG: &str = include_str!("../../data/catalog.json");

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to read catalog {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid catalog data: {0}")]
    Parse(#[from] serde_json::Error),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Podcast {
    pub id: ShowId,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seasons: Option<u32>,
    #[serde(default)]
    pub genres: Vec<GenreId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Genre {
    pub id: GenreId,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub shows: Vec<ShowId>,
}

/// Whether an item, card or modal view shows a podcast or a genre
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Variant {
    Podcast,
    Genre,
}

/// Borrowed catalog item together with its variant
#[derive(Debug, Clone, Copy)]
pub enum Item<'a> {
    Podcast(&'a Podcast),
    Genre(&'a Genre),
}

/// Owned handle to a catalog item, stored in event bindings and modal state
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ItemRef {
    Podcast(ShowId),
    Genre(GenreId),
}

/// The two immutable collections the browser works from
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Catalog {
    #[serde(default)]
    pub podcasts: Vec<Podcast>,
    #[serde(default)]
    pub genres: Vec<Genre>,
}

impl Catalog {
    pub fn from_json(content: &str) -> Result<Self, CatalogError> {
        let mut catalog: Catalog = serde_json::from_str(content)?;
        catalog.drop_duplicates();
        tracing::debug!(
            "Loaded catalog: {} podcasts, {} genres",
            catalog.podcasts.len(),
            catalog.genres.len()
        );
        Ok(catalog)
    }

    /// Load the catalog bundled with the binary
    pub fn builtin() -> Result<Self, CatalogError> {
        Self::from_json(BUILTIN_CATALOG)
    }

    /// Load a catalog from a JSON file
    pub async fn load(path: &Path) -> Result<Self, CatalogError> {
        let content = tokio::fs::read_to_string(path)
            .await
            .map_err(|source| CatalogError::Read {
                path: path.to_path_buf(),
                source,
            })?;
        Self::from_json(&content)
    }

    /// Keep the first occurrence of each id
    fn drop_duplicates(&mut self) {
        let mut seen = HashSet::new();
        self.podcasts.retain(|p| {
            let fresh = seen.insert(p.id.clone());
            if !fresh {
                tracing::warn!("Dropping duplicate podcast id {}", p.id);
            }
            fresh
        });

        let mut seen = HashSet::new();
        self.genres.retain(|g| {
            let fresh = seen.insert(g.id.clone());
            if !fresh {
                tracing::warn!("Dropping duplicate genre id {}", g.id);
            }
            fresh
        });
    }

    pub fn podcast(&self, id: &ShowId) -> Option<&Podcast> {
        self.podcasts.iter().find(|p| &p.id == id)
    }

    pub fn genre(&self, id: &GenreId) -> Option<&Genre> {
        self.genres.iter().find(|g| &g.id == id)
    }

    pub fn resolve(&self, item: &ItemRef) -> Option<Item<'_>> {
        match item {
            ItemRef::Podcast(id) => self.podcast(id).map(Item::Podcast),
            ItemRef::Genre(id) => self.genre(id).map(Item::Genre),
        }
    }

    /// Podcasts listed in a genre's `shows`, in podcast collection order
    pub fn shows_in(&self, genre: &Genre) -> Vec<&Podcast> {
        self.podcasts
            .iter()
            .filter(|p| genre.shows.contains(&p.id))
            .collect()
    }

    pub fn genre_items(&self) -> Vec<Item<'_>> {
        self.genres.iter().map(Item::Genre).collect()
    }
}

/// Genre id to title lookup, built once at startup
#[derive(Debug, Clone, Default)]
pub struct GenreMap {
    titles: HashMap<GenreId, String>,
}

impl GenreMap {
    pub fn from_genres(genres: &[Genre]) -> Self {
        Self {
            titles: genres.iter().map(|g| (g.id.clone(), g.title.clone())).collect(),
        }
    }

    /// Title for a genre id, or `Genre <id>` when the id is unknown
    pub fn title(&self, id: &GenreId) -> Cow<'_, str> {
        match self.titles.get(id) {
            Some(title) => Cow::Borrowed(title.as_str()),
            None => Cow::Owned(format!("Genre {}", id)),
        }
    }
}
