use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::catalog::Category;

/// Album as exposed by the API and the pages
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Album {
    pub id: String,
    pub name: String,
    pub description: String,
    pub category: String,
    pub created_at: DateTime<Utc>,
}

impl Album {
    pub fn new(input: AlbumInput) -> Self {
        Self {
            id: new_record_id(),
            name: input.name,
            description: input.description,
            category: input.category,
            created_at: Utc::now(),
        }
    }

    pub fn category(&self) -> Option<Category> {
        Category::from_label(&self.category)
    }
}

/// Create/update payload for albums
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AlbumInput {
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub category: String,
}

/// Photo record with its image inlined as a data URL
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Photo {
    pub id: String,
    pub album_id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub image_data: String,
    pub created_at: DateTime<Utc>,
}

/// Photo about to be stored
#[derive(Debug, Clone, PartialEq)]
pub struct NewPhoto {
    pub album_id: String,
    pub title: String,
    pub description: String,
    pub image_data: String,
}

impl Photo {
    pub fn new(photo: NewPhoto) -> Self {
        Self {
            id: new_record_id(),
            album_id: photo.album_id,
            title: photo.title,
            description: photo.description,
            image_data: photo.image_data,
            created_at: Utc::now(),
        }
    }
}

/// Editable photo metadata
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PhotoUpdate {
    pub title: String,
    #[serde(default)]
    pub description: String,
}

/// Account allowed into the admin panel
#[derive(Debug, Clone, PartialEq)]
pub struct User {
    pub id: String,
    pub email: String,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

pub fn new_record_id() -> String {
    Uuid::new_v4().to_string()
}

/// Timestamps are stored as fixed-width RFC 3339 strings so that
/// lexicographic order in the store matches chronological order.
pub fn timestamp_to_db(ts: &DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Micros, true)
}

pub fn timestamp_from_db(value: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value)
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_new_album_gets_fresh_id() {
        let input = AlbumInput {
            name: "Cozinha".to_string(),
            description: String::new(),
            category: "Montagem de Móveis".to_string(),
        };
        let a = Album::new(input.clone());
        let b = Album::new(input);

        assert_ne!(a.id, b.id);
        assert!(Uuid::parse_str(&a.id).is_ok());
        assert_eq!(a.category(), Some(Category::Montagem));
    }

    #[test]
    fn test_timestamp_format_is_sortable() {
        let early = Utc.with_ymd_and_hms(2024, 1, 9, 8, 0, 0).unwrap();
        let late = Utc.with_ymd_and_hms(2024, 1, 10, 8, 0, 0).unwrap();

        let (a, b) = (timestamp_to_db(&early), timestamp_to_db(&late));
        assert_eq!(a, "2024-01-09T08:00:00.000000Z");
        assert!(a < b);
        assert_eq!(timestamp_from_db(&a), Some(early));
        assert_eq!(timestamp_from_db("not a date"), None);
    }

    #[test]
    fn test_photo_description_defaults_to_empty() {
        let update: PhotoUpdate = serde_json::from_str(r#"{"title":"Quadro"}"#).unwrap();
        assert_eq!(update.description, "");
    }
}
