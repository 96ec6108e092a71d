/// Track domain type
use crate::error::{CoreError, Result};
use crate::types::TrackId;
use serde::{Deserialize, Serialize};

/// Artist credit: the catalog sends either a single name or a list
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Artists {
    /// Single credited artist
    One(String),
    /// Several credited artists, in billing order
    Many(Vec<String>),
}

impl Artists {
    /// Single artist credit
    pub fn one(name: impl Into<String>) -> Self {
        Self::One(name.into())
    }

    /// Multi-artist credit
    pub fn many<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::Many(names.into_iter().map(Into::into).collect())
    }

    /// Human-readable credit line ("A, B")
    pub fn display(&self) -> String {
        match self {
            Self::One(name) => name.clone(),
            Self::Many(names) => names.join(", "),
        }
    }

    /// Iterate over the credited names
    pub fn names(&self) -> Vec<&str> {
        match self {
            Self::One(name) => vec![name.as_str()],
            Self::Many(names) => names.iter().map(String::as_str).collect(),
        }
    }
}

impl Default for Artists {
    fn default() -> Self {
        Self::Many(Vec::new())
    }
}

/// Genre tag, same wire shape as [`Artists`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Genre {
    /// Single genre
    One(String),
    /// Several genres
    Many(Vec<String>),
}

impl Genre {
    /// Check whether the tag contains `name` (case-insensitive)
    pub fn contains(&self, name: &str) -> bool {
        match self {
            Self::One(g) => g.eq_ignore_ascii_case(name),
            Self::Many(gs) => gs.iter().any(|g| g.eq_ignore_ascii_case(name)),
        }
    }
}

/// Playable track descriptor supplied by the catalog
///
/// Read-only from the engine's point of view; it is cloned into playback
/// state but never modified.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Track {
    /// Catalog identifier (may be missing for ad-hoc files)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<TrackId>,

    /// Track title
    pub title: String,

    /// Credited artists
    #[serde(default)]
    pub artists: Artists,

    /// Audio file location, fetched with a plain GET
    pub file_url: String,

    /// Cover art location
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub artwork_url: Option<String>,

    /// Genre tag(s)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub genre: Option<Genre>,
}

impl Track {
    /// Create a track with an explicit catalog id
    pub fn new(
        id: impl Into<TrackId>,
        title: impl Into<String>,
        artists: Artists,
        file_url: impl Into<String>,
    ) -> Self {
        Self {
            id: Some(id.into()),
            title: title.into(),
            artists,
            file_url: file_url.into(),
            artwork_url: None,
            genre: None,
        }
    }

    /// Create a track known only by its file URL
    pub fn from_url(title: impl Into<String>, file_url: impl Into<String>) -> Self {
        Self {
            id: None,
            title: title.into(),
            artists: Artists::default(),
            file_url: file_url.into(),
            artwork_url: None,
            genre: None,
        }
    }

    /// Attach cover art
    #[must_use]
    pub fn with_artwork(mut self, url: impl Into<String>) -> Self {
        self.artwork_url = Some(url.into());
        self
    }

    /// Attach a genre tag
    #[must_use]
    pub fn with_genre(mut self, genre: Genre) -> Self {
        self.genre = Some(genre);
        self
    }

    /// Stable identity: the catalog id, or the file URL when the id is
    /// absent or empty
    pub fn identity(&self) -> TrackId {
        match &self.id {
            Some(id) if !id.is_empty() => id.clone(),
            _ => TrackId::new(self.file_url.clone()),
        }
    }

    /// Whether both descriptors point at the same audio file
    pub fn same_source(&self, other: &Track) -> bool {
        self.file_url == other.file_url
    }

    /// Reject descriptors the device could never load
    pub fn validate(&self) -> Result<()> {
        if self.file_url.trim().is_empty() {
            return Err(CoreError::InvalidTrack(format!(
                "'{}' has no file URL",
                self.title
            )));
        }
        Ok(())
    }
}
