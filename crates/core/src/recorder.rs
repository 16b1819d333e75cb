use crate::error::{Result, SortOrderError};
use crate::model::{ExportResults, PhotoRecord};
use crate::ordering::index_of;
use crate::resolver::album_for_title;
use serde::{Deserialize, Serialize};
use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

pub const SORT_ORDER_SUFFIX: &str = "_sort_order.txt";

/// Sink for lines that should only be shown in verbose runs.
pub trait VerboseLog {
    fn emit(&self, line: &str);
}

/// Drops every line.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopVerbose;

impl VerboseLog for NoopVerbose {
    fn emit(&self, _line: &str) {}
}

/// Forwards lines to `tracing` at info level.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingVerbose;

impl VerboseLog for TracingVerbose {
    fn emit(&self, line: &str) {
        info!("{line}");
    }
}

impl<F: Fn(&str)> VerboseLog for F {
    fn emit(&self, line: &str) {
        self(line)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SortOrderEntry {
    pub file: PathBuf,
    pub sort_order_path: PathBuf,
    pub album: String,
    pub sort_order: usize,
}

/// Why a recorder call gave up before reaching the end of the exported files.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "reason", rename_all = "snake_case")]
pub enum StopReason {
    /// The file's parent directory is not named after any album of the photo.
    NotAlbumDirectory { file: PathBuf },
    /// No membership carries the parent directory's name as its title.
    NoMatchingAlbum { file: PathBuf, album: String },
    /// The album's ordering does not list the photo.
    NotAMember { file: PathBuf, album: String },
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct RecordOutcome {
    pub written: Vec<SortOrderEntry>,
    pub stopped: Option<StopReason>,
}

/// Companion file that holds the sort order of `file`.
pub fn sort_order_path(file: &Path) -> PathBuf {
    let mut raw = OsString::from(file.as_os_str());
    raw.push(SORT_ORDER_SUFFIX);
    PathBuf::from(raw)
}

/// Writes `<file>_sort_order.txt` next to every exported file of `photo`.
///
/// The album is taken from the name of each file's parent directory. The first
/// file that cannot be tied to an album ends the whole call, including files
/// after it that would have resolved. Nothing is rolled back: companions
/// written before the stop stay on disk. Must not be called for dry runs.
pub fn record_album_sort_order<P, V>(
    photo: &P,
    results: &ExportResults,
    verbose: &V,
) -> Result<RecordOutcome>
where
    P: PhotoRecord,
    V: VerboseLog + ?Sized,
{
    let mut outcome = RecordOutcome::default();

    for file in &results.exported {
        let album_dir = album_dir_name(file);
        if !photo.has_album_name(&album_dir) {
            debug!(photo = photo.uuid(), file = %file.display(), "not an album directory");
            outcome.stopped = Some(StopReason::NotAlbumDirectory { file: file.clone() });
            break;
        }

        let Some(album) = album_for_title(photo, &album_dir) else {
            debug!(photo = photo.uuid(), album = %album_dir, "no membership with this title");
            outcome.stopped = Some(StopReason::NoMatchingAlbum {
                file: file.clone(),
                album: album_dir,
            });
            break;
        };

        let sort_order = match index_of(album, photo) {
            Ok(index) => index,
            Err(err) => {
                debug!("{err}");
                outcome.stopped = Some(StopReason::NotAMember {
                    file: file.clone(),
                    album: album_dir,
                });
                break;
            }
        };

        verbose.emit(&format!(
            "Sort order for {} in album {} is {}",
            file.display(),
            album_dir,
            sort_order
        ));

        let sort_order_path = sort_order_path(file);
        fs::write(&sort_order_path, sort_order.to_string()).map_err(|source| {
            SortOrderError::Io {
                path: sort_order_path.clone(),
                source,
            }
        })?;

        outcome.written.push(SortOrderEntry {
            file: file.clone(),
            sort_order_path,
            album: album_dir,
            sort_order,
        });
    }

    Ok(outcome)
}

fn album_dir_name(file: &Path) -> String {
    file.parent()
        .and_then(Path::file_name)
        .map(|name| name.to_string_lossy().to_string())
        .unwrap_or_default()
}
