use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::{debug, info};

use crate::database::models::{timestamp_from_db, timestamp_to_db, NewPhoto, Photo, PhotoUpdate};
use crate::database::surrealdb::{SurrealConnection, PHOTOS_TABLE};
use crate::database::{DatabaseError, DatabaseResult};

#[derive(Debug, Clone, Serialize, Deserialize)]
struct PhotoDocument {
    album_id: String,
    title: String,
    description: String,
    image_data: String,
    created_at: String,
}

#[derive(Debug, Deserialize)]
struct PhotoRow {
    record_key: String,
    album_id: String,
    title: String,
    #[serde(default)]
    description: String,
    image_data: String,
    created_at: String,
}

impl PhotoRow {
    fn into_photo(self) -> DatabaseResult<Photo> {
        let created_at = timestamp_from_db(&self.created_at).ok_or_else(|| {
            DatabaseError::Corrupt(format!("photo {} has invalid created_at", self.record_key))
        })?;

        Ok(Photo {
            id: self.record_key,
            album_id: self.album_id,
            title: self.title,
            description: self.description,
            image_data: self.image_data,
            created_at,
        })
    }
}

#[derive(Debug, Deserialize)]
struct AlbumCount {
    album_id: String,
    total: usize,
}

const SELECT_FIELDS: &str =
    "record::id(id) AS record_key, album_id, title, description, image_data, created_at";

/// Photo repository
#[derive(Clone)]
pub struct PhotoRepository {
    conn: SurrealConnection,
}

impl PhotoRepository {
    pub fn new(conn: SurrealConnection) -> Self {
        Self { conn }
    }

    /// Photos oldest first, optionally restricted to one album
    pub async fn list(&self, album_id: Option<&str>) -> DatabaseResult<Vec<Photo>> {
        debug!("Listing photos (album filter: {:?})", album_id);

        let mut response = match album_id {
            Some(album_id) => {
                let sql = format!(
                    "SELECT {} FROM {} WHERE album_id = $album_id ORDER BY created_at ASC",
                    SELECT_FIELDS, PHOTOS_TABLE
                );
                self.conn
                    .db()
                    .query(sql)
                    .bind(("album_id", album_id.to_string()))
                    .await?
            }
            None => {
                let sql = format!(
                    "SELECT {} FROM {} ORDER BY created_at ASC",
                    SELECT_FIELDS, PHOTOS_TABLE
                );
                self.conn.db().query(sql).await?
            }
        };

        let rows: Vec<PhotoRow> = response.take(0)?;
        rows.into_iter().map(PhotoRow::into_photo).collect()
    }

    pub async fn find_by_id(&self, id: &str) -> DatabaseResult<Option<Photo>> {
        debug!("Finding photo: {}", id);

        let sql = format!("SELECT {} FROM type::thing($table, $id)", SELECT_FIELDS);
        let mut response = self
            .conn
            .db()
            .query(sql)
            .bind(("table", PHOTOS_TABLE))
            .bind(("id", id.to_string()))
            .await?;
        let rows: Vec<PhotoRow> = response.take(0)?;

        rows.into_iter().next().map(PhotoRow::into_photo).transpose()
    }

    pub async fn create(&self, photo: NewPhoto) -> DatabaseResult<Photo> {
        let photo = Photo::new(photo);
        self.insert(&photo).await?;
        info!("Stored photo {} in album {}", photo.id, photo.album_id);
        Ok(photo)
    }

    /// Store a photo under its own id, replacing any record with that id
    pub async fn insert(&self, photo: &Photo) -> DatabaseResult<()> {
        let document = PhotoDocument {
            album_id: photo.album_id.clone(),
            title: photo.title.clone(),
            description: photo.description.clone(),
            image_data: photo.image_data.clone(),
            created_at: timestamp_to_db(&photo.created_at),
        };

        self.conn
            .db()
            .query("UPSERT type::thing($table, $id) CONTENT $data")
            .bind(("table", PHOTOS_TABLE))
            .bind(("id", photo.id.clone()))
            .bind(("data", document))
            .await?
            .check()?;

        Ok(())
    }

    /// Change title and description. `None` when the photo does not exist.
    pub async fn update(&self, id: &str, update: PhotoUpdate) -> DatabaseResult<Option<Photo>> {
        let Some(mut photo) = self.find_by_id(id).await? else {
            return Ok(None);
        };

        photo.title = update.title;
        photo.description = update.description;
        self.insert(&photo).await?;

        info!("Updated photo {}", id);
        Ok(Some(photo))
    }

    /// `false` when the photo does not exist
    pub async fn delete(&self, id: &str) -> DatabaseResult<bool> {
        if self.find_by_id(id).await?.is_none() {
            return Ok(false);
        }

        self.conn
            .db()
            .query("DELETE type::thing($table, $id)")
            .bind(("table", PHOTOS_TABLE))
            .bind(("id", id.to_string()))
            .await?
            .check()?;

        info!("Deleted photo {}", id);
        Ok(true)
    }

    /// Number of photos per album id. Albums without photos are absent.
    pub async fn count_by_album(&self) -> DatabaseResult<HashMap<String, usize>> {
        let sql = format!(
            "SELECT album_id, count() AS total FROM {} GROUP BY album_id",
            PHOTOS_TABLE
        );
        let mut response = self.conn.db().query(sql).await?;
        let rows: Vec<AlbumCount> = response.take(0)?;

        Ok(rows.into_iter().map(|row| (row.album_id, row.total)).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::models::AlbumInput;
    use crate::database::Database;

    fn new_photo(album_id: &str, title: &str) -> NewPhoto {
        NewPhoto {
            album_id: album_id.to_string(),
            title: title.to_string(),
            description: String::new(),
            image_data: "data:image/png;base64,iVBORw0KGgo=".to_string(),
        }
    }

    async fn album(db: &Database, name: &str) -> String {
        db.albums
            .create(AlbumInput {
                name: name.to_string(),
                description: String::new(),
                category: "Pintura".to_string(),
            })
            .await
            .unwrap()
            .id
    }

    #[tokio::test]
    async fn test_photo_crud() {
        let db = Database::in_memory().await.unwrap();
        let album_id = album(&db, "Fachada").await;

        let photo = db.photos.create(new_photo(&album_id, "Antes")).await.unwrap();
        let found = db.photos.find_by_id(&photo.id).await.unwrap().unwrap();
        assert_eq!(found.title, "Antes");
        assert_eq!(found.image_data, photo.image_data);

        let updated = db
            .photos
            .update(
                &photo.id,
                PhotoUpdate {
                    title: "Depois".to_string(),
                    description: "Pintura nova".to_string(),
                },
            )
            .await
            .unwrap()
            .unwrap();
        assert_eq!(updated.title, "Depois");
        assert_eq!(updated.description, "Pintura nova");
        assert_eq!(updated.album_id, album_id);

        assert!(db.photos.delete(&photo.id).await.unwrap());
        assert!(!db.photos.delete(&photo.id).await.unwrap());
        assert!(db.photos.find_by_id(&photo.id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_list_filters_by_album() {
        let db = Database::in_memory().await.unwrap();
        let a = album(&db, "A").await;
        let b = album(&db, "B").await;

        db.photos.create(new_photo(&a, "a1")).await.unwrap();
        db.photos.create(new_photo(&b, "b1")).await.unwrap();
        db.photos.create(new_photo(&a, "a2")).await.unwrap();

        let in_a = db.photos.list(Some(&a)).await.unwrap();
        assert_eq!(
            in_a.iter().map(|p| p.title.as_str()).collect::<Vec<_>>(),
            vec!["a1", "a2"]
        );
        assert_eq!(db.photos.list(None).await.unwrap().len(), 3);
        assert!(db.photos.list(Some("missing")).await.unwrap().is_empty());

        let counts = db.photos.count_by_album().await.unwrap();
        assert_eq!(counts.get(&a), Some(&2));
        assert_eq!(counts.get(&b), Some(&1));
    }

    #[tokio::test]
    async fn test_update_missing_photo() {
        let db = Database::in_memory().await.unwrap();
        let result = db
            .photos
            .update(
                "missing",
                PhotoUpdate {
                    title: "x".to_string(),
                    description: String::new(),
                },
            )
            .await
            .unwrap();
        assert!(result.is_none());
    }
}
