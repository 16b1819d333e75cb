use crate::error::NotAMember;
use crate::model::{AlbumRecord, PhotoRecord};

/// Zero-based position of `photo` in `album`'s ordered photo list.
pub fn index_of<A, P>(album: &A, photo: &P) -> Result<usize, NotAMember>
where
    A: AlbumRecord,
    P: PhotoRecord,
{
    album.photo_index(photo.uuid()).ok_or_else(|| NotAMember {
        album: album.title().to_string(),
        photo_uuid: photo.uuid().to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{AlbumInfo, PhotoInfo};

    #[test]
    fn returns_position_in_album() {
        let album = AlbumInfo::new("Trip", &[], &["a", "b", "p1"]);
        let photo = PhotoInfo::new("p1", "IMG_0001.jpg", vec![album.clone()]);
        assert_eq!(index_of(&album, &photo), Ok(2));
        assert_eq!(index_of(&album, &photo), Ok(2));
    }

    #[test]
    fn reports_missing_member() {
        let album = AlbumInfo::new("Trip", &[], &["a", "b"]);
        let photo = PhotoInfo::new("p1", "IMG_0001.jpg", vec![album.clone()]);
        let err = index_of(&album, &photo).expect_err("must fail");
        assert_eq!(err.album, "Trip");
        assert_eq!(err.photo_uuid, "p1");
    }
}
