//! Catalog files
//!
//! A catalog is a JSON array of track descriptors as the catalog service
//! returns them, optionally carrying a `duration` in seconds.

use anyhow::{bail, Context, Result};
use cadence_core::Track;
use serde::Deserialize;
use std::fs;
use std::path::Path;

#[derive(Deserialize)]
struct CatalogEntry {
    #[serde(flatten)]
    track: Track,

    #[serde(default)]
    duration: Option<f64>,
}

/// Read a catalog, skipping descriptors that could never be played
pub fn load(path: &Path) -> Result<Vec<(Track, Option<f64>)>> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("Failed to read catalog {}", path.display()))?;
    let entries: Vec<CatalogEntry> = serde_json::from_str(&raw)
        .with_context(|| format!("Malformed catalog {}", path.display()))?;

    let mut tracks = Vec::with_capacity(entries.len());
    for entry in entries {
        match entry.track.validate() {
            Ok(()) => tracks.push((entry.track, entry.duration)),
            Err(e) => tracing::warn!("Skipping catalog entry: {}", e),
        }
    }

    if tracks.is_empty() {
        bail!("Catalog {} has no playable tracks", path.display());
    }
    Ok(tracks)
}

/// Find a track by catalog id (or file URL for id-less tracks)
pub fn find<'a>(tracks: &'a [(Track, Option<f64>)], id: &str) -> Option<&'a Track> {
    tracks
        .iter()
        .map(|(track, _)| track)
        .find(|track| track.identity().as_str() == id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const CATALOG: &str = r#"[
        {"id": "a", "title": "First", "artists": "Solo", "fileUrl": "https://cdn/a.mp3", "duration": 12.5},
        {"id": "b", "title": "Second", "artists": ["X", "Y"], "fileUrl": "https://cdn/b.mp3"},
        {"title": "Broken", "fileUrl": ""}
    ]"#;

    #[test]
    fn loads_playable_entries_with_durations() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("catalog.json");
        fs::write(&path, CATALOG).unwrap();

        let tracks = load(&path).unwrap();

        assert_eq!(tracks.len(), 2);
        assert_eq!(tracks[0].1, Some(12.5));
        assert_eq!(tracks[1].1, None);
        assert_eq!(find(&tracks, "b").map(|t| t.title.as_str()), Some("Second"));
        assert!(find(&tracks, "zzz").is_none());
    }

    #[test]
    fn empty_catalog_is_rejected() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("catalog.json");
        fs::write(&path, "[]").unwrap();

        assert!(load(&path).is_err());
    }
}
