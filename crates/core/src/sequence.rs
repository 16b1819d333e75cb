use crate::config::sequence_start_from_env;
use crate::error::Result;
use crate::model::{PhotoRecord, RenderContext};
use crate::ordering::index_of;
use crate::resolver::album_for_dest_path;
use tracing::debug;

/// Album sequence number for the file being rendered into `ctx.dest_path`.
///
/// Returns an empty string when there is no destination, when the destination
/// is not one of the photo's album folders, or when the album's ordering does
/// not list the photo. The template engine treats empty as "omit".
pub fn render_album_sequence<P: PhotoRecord>(
    photo: &P,
    ctx: &RenderContext,
    start: u64,
) -> String {
    album_sequence_index(photo, ctx)
        .map(|index| format_sequence(index, start))
        .unwrap_or_default()
}

/// Same as [`render_album_sequence`], reading the start value from the
/// environment on every call. The value is only parsed once an album has been
/// resolved.
pub fn render_album_sequence_from_env<P: PhotoRecord>(
    photo: &P,
    ctx: &RenderContext,
) -> Result<String> {
    let Some(index) = album_sequence_index(photo, ctx) else {
        return Ok(String::new());
    };
    let start = sequence_start_from_env()?;
    Ok(format_sequence(index, start))
}

fn album_sequence_index<P: PhotoRecord>(photo: &P, ctx: &RenderContext) -> Option<usize> {
    let dest_path = ctx.dest_path.as_deref()?;
    if dest_path.as_os_str().is_empty() {
        return None;
    }

    let album = album_for_dest_path(photo, dest_path)?;
    match index_of(album, photo) {
        Ok(index) => Some(index),
        Err(err) => {
            debug!("{err}");
            None
        }
    }
}

// Summed as u128 so any u64 start plus any index fits.
fn format_sequence(index: usize, start: u64) -> String {
    (index as u128 + u128::from(start)).to_string()
}
