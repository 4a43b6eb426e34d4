use serde::{Deserialize, Serialize};

pub const DEFAULT_CATEGORY: &str = "original";

/// Columns exposed to clients; the storage paths stay internal.
pub const SONG_COLUMNS: &str = "id, title, audio_url, cover_url, description, category";

fn default_category() -> Option<String> {
    Some(DEFAULT_CATEGORY.to_string())
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Song {
    pub id: String,
    pub title: String,
    pub audio_url: String,
    #[serde(default)]
    pub cover_url: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default = "default_category")]
    pub category: Option<String>,
}

/// Full `songs` row, including the object paths needed to replace or delete
/// the stored files.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SongRow {
    pub id: String,
    pub title: String,
    pub audio_path: Option<String>,
    pub cover_path: Option<String>,
    pub audio_url: String,
    pub cover_url: Option<String>,
    pub description: Option<String>,
    pub category: Option<String>,
}

impl From<SongRow> for Song {
    fn from(row: SongRow) -> Self {
        Song {
            id: row.id,
            title: row.title,
            audio_url: row.audio_url,
            cover_url: row.cover_url,
            description: row.description,
            category: row.category,
        }
    }
}

#[derive(Debug, Default, Serialize)]
pub struct SongChanges {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub audio_path: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub audio_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cover_path: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cover_url: Option<String>,
}

impl SongChanges {
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.category.is_none()
            && self.audio_path.is_none()
            && self.audio_url.is_none()
            && self.cover_path.is_none()
            && self.cover_url.is_none()
    }
}
