use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, SortOrderError>;

/// Failures the caller has to deal with. Unresolvable albums and photos
/// missing from an album's ordering are not errors and never show up here.
#[derive(Debug, Error)]
pub enum SortOrderError {
    #[error("album sequence start must be a non-negative integer, got {value:?}")]
    MalformedOffset { value: String },

    #[error("failed to write sort order file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// The album listed the photo as a member but its ordering does not contain it.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("photo {photo_uuid} is not in the ordered photo list of album {album}")]
pub struct NotAMember {
    pub album: String,
    pub photo_uuid: String,
}
