use crate::model::{AlbumRecord, PhotoRecord};
use crate::sanitize::sanitize_dirname;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Relative directory an album is exported to: every folder name sanitized on
/// its own, followed by the sanitized album title.
pub fn album_folder_path<A: AlbumRecord>(album: &A) -> PathBuf {
    let mut path: PathBuf = album
        .folder_names()
        .iter()
        .map(|name| sanitize_dirname(name))
        .collect();
    path.push(sanitize_dirname(album.title()));
    path
}

/// Finds the album whose folder path `dest_path` ends with.
///
/// Matching is done on whole path components rather than on the raw string,
/// so `/export/MyTrip` does not match an album titled `Trip` and
/// `/export/x2020/Trip` does not match folder `2020`. This is deliberate. When
/// several memberships match, the first one in the photo's declared order wins.
pub fn album_for_dest_path<'a, P: PhotoRecord>(
    photo: &'a P,
    dest_path: &Path,
) -> Option<&'a P::Album> {
    let found = photo
        .album_info()
        .iter()
        .find(|album| dest_path.ends_with(album_folder_path(*album)));

    if found.is_none() {
        debug!(
            photo = photo.uuid(),
            dest = %dest_path.display(),
            "no album folder matches destination"
        );
    }
    found
}

/// Finds the first membership titled exactly `name`.
pub fn album_for_title<'a, P: PhotoRecord>(photo: &'a P, name: &str) -> Option<&'a P::Album> {
    photo
        .album_info()
        .iter()
        .find(|album| album.title() == name)
}
