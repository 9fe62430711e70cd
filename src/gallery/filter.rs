use std::collections::HashMap;

use crate::catalog::Category;
use crate::database::models::{Album, Photo};

/// Photos whose album belongs to `category`, in their original order.
/// `None` keeps every photo.
pub fn photos_in_category(
    photos: &[Photo],
    albums: &[Album],
    category: Option<Category>,
) -> Vec<Photo> {
    let Some(category) = category else {
        return photos.to_vec();
    };

    let album_categories: HashMap<&str, Option<Category>> = albums
        .iter()
        .map(|album| (album.id.as_str(), album.category()))
        .collect();

    photos
        .iter()
        .filter(|photo| {
            album_categories
                .get(photo.album_id.as_str())
                .copied()
                .flatten()
                == Some(category)
        })
        .cloned()
        .collect()
}

/// The `n` most recent photos, newest first
pub fn latest(photos: &[Photo], n: usize) -> Vec<Photo> {
    let mut sorted = photos.to_vec();
    sorted.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    sorted.truncate(n);
    sorted
}
