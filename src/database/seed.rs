//! Demo albums and photos for local development

use chrono::{Duration, Utc};
use tracing::info;

use super::models::{Album, Photo};
use super::{Database, DatabaseResult};

struct SeedAlbum {
    id: &'static str,
    name: &'static str,
    description: &'static str,
    category: &'static str,
}

struct SeedPhoto {
    id: &'static str,
    album_id: &'static str,
    title: &'static str,
    description: &'static str,
    image_data: &'static str,
}

const ALBUMS: &[SeedAlbum] = &[
    SeedAlbum {
        id: "album-eletrica-demo",
        name: "Instalação Residencial Completa",
        description: "Troca de fiação, quadro de força e iluminação LED.",
        category: "Elétrica",
    },
    SeedAlbum {
        id: "album-pintura-demo",
        name: "Renovação de Fachada",
        description: "Pintura externa com tinta emborrachada.",
        category: "Pintura",
    },
    SeedAlbum {
        id: "album-moveis-demo",
        name: "Montagem de Cozinha Planejada",
        description: "Montagem completa de armários e bancadas.",
        category: "Montagem de Móveis",
    },
];

const PHOTOS: &[SeedPhoto] = &[
    SeedPhoto {
        id: "foto-01",
        album_id: "album-eletrica-demo",
        title: "Quadro de Disjuntores",
        description: "Organização e identificação dos circuitos.",
        image_data: "data:image/png;base64,iVBORw0KGgoAAAANSUhEUgAAAAEAAAABCAYAAAAfFcSJAAAADUlEQVR42mP8z8BQDwAEhQGAhKmMIQAAAABJRU5ErkJggg==",
    },
    SeedPhoto {
        id: "foto-02",
        album_id: "album-eletrica-demo",
        title: "Iluminação de Sanca",
        description: "Fitas de LED instaladas no gesso.",
        image_data: "data:image/png;base64,iVBORw0KGgoAAAANSUhEUgAAAAEAAAABCAYAAAAfFcSJAAAADUlEQVR42mnk5+dQAwAEHgHB44w5sgAAAABJRU5ErkJggg==",
    },
    SeedPhoto {
        id: "foto-03",
        album_id: "album-pintura-demo",
        title: "Antes e Depois",
        description: "Detalhe do acabamento.",
        image_data: "data:image/png;base64,iVBORw0KGgoAAAANSUhEUgAAAAEAAAABCAYAAAAfFcSJAAAADUlEQVR42mP8/5+hHgAHggJ/PchI7wAAAABJRU5ErkJggg==",
    },
];

/// Counts of what a seed run wrote
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeedSummary {
    pub albums: usize,
    pub photos: usize,
}

/// Insert the demo data. Records with the same ids are replaced, so running
/// this twice leaves the store unchanged apart from timestamps.
pub async fn seed_demo_data(db: &Database) -> DatabaseResult<SeedSummary> {
    let base = Utc::now();

    for (offset, seed) in ALBUMS.iter().enumerate() {
        let album = Album {
            id: seed.id.to_string(),
            name: seed.name.to_string(),
            description: seed.description.to_string(),
            category: seed.category.to_string(),
            created_at: base + Duration::seconds(offset as i64),
        };
        db.albums.insert(&album).await?;
    }

    for (offset, seed) in PHOTOS.iter().enumerate() {
        let photo = Photo {
            id: seed.id.to_string(),
            album_id: seed.album_id.to_string(),
            title: seed.title.to_string(),
            description: seed.description.to_string(),
            image_data: seed.image_data.to_string(),
            created_at: base + Duration::seconds(offset as i64),
        };
        db.photos.insert(&photo).await?;
    }

    let summary = SeedSummary {
        albums: ALBUMS.len(),
        photos: PHOTOS.len(),
    };
    info!(
        "Seeded {} albums and {} photos",
        summary.albums, summary.photos
    );
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Category;

    #[test]
    fn test_seed_albums_use_known_categories() {
        for album in ALBUMS {
            assert!(Category::from_label(album.category).is_some(), "{}", album.category);
        }
        for photo in PHOTOS {
            assert!(ALBUMS.iter().any(|a| a.id == photo.album_id));
        }
    }

    #[tokio::test]
    async fn test_seed_is_idempotent() {
        let db = Database::in_memory().await.unwrap();

        let first = seed_demo_data(&db).await.unwrap();
        seed_demo_data(&db).await.unwrap();

        assert_eq!(first, SeedSummary { albums: 3, photos: 3 });
        assert_eq!(db.albums.list().await.unwrap().len(), 3);
        assert_eq!(db.photos.list(None).await.unwrap().len(), 3);
        assert_eq!(
            db.photos.list(Some("album-eletrica-demo")).await.unwrap().len(),
            2
        );
    }
}
