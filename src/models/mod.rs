use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct MediaItem {
    pub id: String,
    pub item_type: String,
    pub name: String,
    pub sort_name: Option<String>,
    pub year: Option<i32>,
    pub community_rating: Option<f64>,
    pub imdb_id: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct MediaSource {
    pub item_id: String,
    pub path: String,
    /// File size in bytes
    pub size: Option<i64>,
    /// Overall bitrate in bits per second
    pub bitrate: Option<i64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ItemType {
    Movie,
    Series,
    Episode,
}

impl ItemType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ItemType::Movie => "Movie",
            ItemType::Series => "Series",
            ItemType::Episode => "Episode",
        }
    }
}

/// A media item together with its media sources, primary source first
#[derive(Debug, Clone)]
pub struct LibraryItem {
    pub item: MediaItem,
    pub sources: Vec<MediaSource>,
}

impl LibraryItem {
    pub fn primary_source(&self) -> Option<&MediaSource> {
        self.sources.first()
    }

    pub fn bitrate(&self) -> Option<i64> {
        self.primary_source().and_then(|s| s.bitrate)
    }

    pub fn size(&self) -> Option<i64> {
        self.primary_source().and_then(|s| s.size)
    }

    /// IMDb identifier, ignoring blank values
    pub fn imdb_id(&self) -> Option<&str> {
        self.item
            .imdb_id
            .as_deref()
            .map(str::trim)
            .filter(|id| !id.is_empty())
    }
}
