use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::path::PathBuf;

/// Read-only view of one album a photo belongs to.
pub trait AlbumRecord {
    fn title(&self) -> &str;

    /// Folder names from the library root down to the album's parent folder.
    fn folder_names(&self) -> &[String];

    /// Zero-based position of the photo in the album, or `None` when the album
    /// does not list it.
    fn photo_index(&self, photo_uuid: &str) -> Option<usize>;
}

/// Read-only view of a photo and its album memberships.
pub trait PhotoRecord {
    type Album: AlbumRecord;

    fn uuid(&self) -> &str;

    fn original_name(&self) -> &str;

    fn has_album_name(&self, name: &str) -> bool;

    /// Memberships in the order the library declares them.
    fn album_info(&self) -> &[Self::Album];
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AlbumInfo {
    pub title: String,
    #[serde(default)]
    pub folder_names: Vec<String>,
    #[serde(default)]
    pub photo_uuids: Vec<String>,
}

impl AlbumInfo {
    pub fn new(title: impl Into<String>, folder_names: &[&str], photo_uuids: &[&str]) -> Self {
        Self {
            title: title.into(),
            folder_names: folder_names.iter().map(|s| s.to_string()).collect(),
            photo_uuids: photo_uuids.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl AlbumRecord for AlbumInfo {
    fn title(&self) -> &str {
        &self.title
    }

    fn folder_names(&self) -> &[String] {
        &self.folder_names
    }

    fn photo_index(&self, photo_uuid: &str) -> Option<usize> {
        self.photo_uuids.iter().position(|uuid| uuid == photo_uuid)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PhotoInfo {
    pub uuid: String,
    pub original_name: String,
    #[serde(default)]
    pub albums: BTreeSet<String>,
    #[serde(default)]
    pub album_info: Vec<AlbumInfo>,
}

impl PhotoInfo {
    pub fn new(
        uuid: impl Into<String>,
        original_name: impl Into<String>,
        album_info: Vec<AlbumInfo>,
    ) -> Self {
        let albums = album_info.iter().map(|a| a.title.clone()).collect();
        Self {
            uuid: uuid.into(),
            original_name: original_name.into(),
            albums,
            album_info,
        }
    }
}

impl PhotoRecord for PhotoInfo {
    type Album = AlbumInfo;

    fn uuid(&self) -> &str {
        &self.uuid
    }

    fn original_name(&self) -> &str {
        &self.original_name
    }

    fn has_album_name(&self, name: &str) -> bool {
        self.albums.contains(name)
    }

    fn album_info(&self) -> &[AlbumInfo] {
        &self.album_info
    }
}

/// Rendering state handed over by the path template engine.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RenderContext {
    pub dest_path: Option<PathBuf>,
}

impl RenderContext {
    pub fn with_dest(dest_path: impl Into<PathBuf>) -> Self {
        Self {
            dest_path: Some(dest_path.into()),
        }
    }
}

/// Files touched by one export of one photo, grouped by what happened to them.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExportResults {
    #[serde(default)]
    pub exported: Vec<PathBuf>,
    #[serde(default)]
    pub new: Vec<PathBuf>,
    #[serde(default)]
    pub updated: Vec<PathBuf>,
    #[serde(default)]
    pub skipped: Vec<PathBuf>,
    #[serde(default)]
    pub missing: Vec<PathBuf>,
    #[serde(default)]
    pub error: Vec<(PathBuf, String)>,
}
