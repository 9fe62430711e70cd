use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::database::models::{timestamp_from_db, timestamp_to_db, Album, AlbumInput};
use crate::database::surrealdb::{SurrealConnection, ALBUMS_TABLE, PHOTOS_TABLE};
use crate::database::{DatabaseError, DatabaseResult};

/// Album document as stored. The record key lives in the record id.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct AlbumDocument {
    name: String,
    description: String,
    category: String,
    created_at: String,
}

/// Album document with its record key projected out
#[derive(Debug, Deserialize)]
struct AlbumRow {
    record_key: String,
    name: String,
    description: String,
    category: String,
    created_at: String,
}

impl AlbumRow {
    fn into_album(self) -> DatabaseResult<Album> {
        let created_at = timestamp_from_db(&self.created_at).ok_or_else(|| {
            DatabaseError::Corrupt(format!("album {} has invalid created_at", self.record_key))
        })?;

        Ok(Album {
            id: self.record_key,
            name: self.name,
            description: self.description,
            category: self.category,
            created_at,
        })
    }
}

const SELECT_FIELDS: &str = "record::id(id) AS record_key, name, description, category, created_at";

/// Album repository
#[derive(Clone)]
pub struct AlbumRepository {
    conn: SurrealConnection,
}

impl AlbumRepository {
    pub fn new(conn: SurrealConnection) -> Self {
        Self { conn }
    }

    /// All albums, oldest first
    pub async fn list(&self) -> DatabaseResult<Vec<Album>> {
        debug!("Listing albums");

        let sql = format!(
            "SELECT {} FROM {} ORDER BY created_at ASC",
            SELECT_FIELDS, ALBUMS_TABLE
        );
        let mut response = self.conn.db().query(sql).await?;
        let rows: Vec<AlbumRow> = response.take(0)?;

        rows.into_iter().map(AlbumRow::into_album).collect()
    }

    pub async fn find_by_id(&self, id: &str) -> DatabaseResult<Option<Album>> {
        debug!("Finding album: {}", id);

        let sql = format!("SELECT {} FROM type::thing($table, $id)", SELECT_FIELDS);
        let mut response = self
            .conn
            .db()
            .query(sql)
            .bind(("table", ALBUMS_TABLE))
            .bind(("id", id.to_string()))
            .await?;
        let rows: Vec<AlbumRow> = response.take(0)?;

        rows.into_iter().next().map(AlbumRow::into_album).transpose()
    }

    pub async fn create(&self, input: AlbumInput) -> DatabaseResult<Album> {
        let album = Album::new(input);
        self.insert(&album).await?;
        info!("Created album {} ({})", album.id, album.name);
        Ok(album)
    }

    /// Store an album under its own id, replacing any record with that id
    pub async fn insert(&self, album: &Album) -> DatabaseResult<()> {
        let document = AlbumDocument {
            name: album.name.clone(),
            description: album.description.clone(),
            category: album.category.clone(),
            created_at: timestamp_to_db(&album.created_at),
        };

        self.conn
            .db()
            .query("UPSERT type::thing($table, $id) CONTENT $data")
            .bind(("table", ALBUMS_TABLE))
            .bind(("id", album.id.clone()))
            .bind(("data", document))
            .await?
            .check()?;

        Ok(())
    }

    /// Replace name, description and category. `None` when the album does not exist.
    pub async fn update(&self, id: &str, input: AlbumInput) -> DatabaseResult<Option<Album>> {
        let Some(existing) = self.find_by_id(id).await? else {
            return Ok(None);
        };

        let document = AlbumDocument {
            name: input.name,
            description: input.description,
            category: input.category,
            created_at: timestamp_to_db(&existing.created_at),
        };

        self.conn
            .db()
            .query("UPDATE type::thing($table, $id) CONTENT $data")
            .bind(("table", ALBUMS_TABLE))
            .bind(("id", id.to_string()))
            .bind(("data", document))
            .await?
            .check()?;

        info!("Updated album {}", id);
        self.find_by_id(id).await
    }

    /// Delete the album and every photo in it. `false` when the album does not exist.
    pub async fn delete(&self, id: &str) -> DatabaseResult<bool> {
        if self.find_by_id(id).await?.is_none() {
            return Ok(false);
        }

        let sql = format!(
            "BEGIN TRANSACTION; \
             DELETE type::thing($table, $id); \
             DELETE {} WHERE album_id = $id; \
             COMMIT TRANSACTION;",
            PHOTOS_TABLE
        );

        self.conn
            .db()
            .query(sql)
            .bind(("table", ALBUMS_TABLE))
            .bind(("id", id.to_string()))
            .await?
            .check()?;

        info!("Deleted album {} and its photos", id);
        Ok(true)
    }
}
