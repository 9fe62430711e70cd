//! Multipart photo uploads shared by the API and the admin pages

use axum::extract::multipart::{Multipart, MultipartError};
use axum::http::StatusCode;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use tracing::{debug, info};

use crate::database::models::{NewPhoto, Photo, PhotoUpdate};
use crate::database::Database;
use crate::error::{GalleryError, Result};
use crate::validation::InputValidator;

/// MIME types accepted for gallery images
pub const ALLOWED_IMAGE_TYPES: &[&str] = &[
    "image/jpeg",
    "image/png",
    "image/gif",
    "image/webp",
    "image/bmp",
];

/// Fields of an upload form, before validation
#[derive(Debug, Default)]
pub struct PhotoUploadForm {
    pub album_id: String,
    pub title: String,
    pub description: String,
    pub file: Option<Vec<u8>>,
    pub file_name: Option<String>,
}

impl PhotoUploadForm {
    /// Read `album_id`, `title`, `description` and `file` from the request
    pub async fn from_multipart(mut multipart: Multipart, max_bytes: usize) -> Result<Self> {
        let mut form = Self::default();

        while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
            let name = field.name().unwrap_or_default().to_string();
            match name.as_str() {
                "album_id" => form.album_id = field.text().await.map_err(multipart_error)?,
                "title" => form.title = field.text().await.map_err(multipart_error)?,
                "description" => form.description = field.text().await.map_err(multipart_error)?,
                "file" => {
                    form.file_name = field.file_name().map(str::to_string);
                    let bytes = field.bytes().await.map_err(multipart_error)?;
                    if bytes.len() > max_bytes {
                        return Err(GalleryError::payload_too_large(format!(
                            "File exceeds the {} byte limit",
                            max_bytes
                        )));
                    }
                    form.file = Some(bytes.to_vec());
                }
                other => debug!("Ignoring unexpected upload field: {}", other),
            }
        }

        Ok(form)
    }
}

fn multipart_error(err: MultipartError) -> GalleryError {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        GalleryError::payload_too_large("File too large")
    } else {
        GalleryError::bad_request(format!("Invalid multipart body: {}", err.body_text()))
    }
}

/// Detect the image type from its magic bytes and build a data URL
pub fn encode_image(bytes: &[u8]) -> Result<String> {
    if bytes.is_empty() {
        return Err(GalleryError::bad_request("File is empty"));
    }

    let mime = infer::get(bytes)
        .map(|kind| kind.mime_type())
        .filter(|mime| ALLOWED_IMAGE_TYPES.contains(mime))
        .ok_or_else(|| {
            GalleryError::bad_request("File must be a JPEG, PNG, GIF, WebP or BMP image")
        })?;

    Ok(format!("data:{};base64,{}", mime, STANDARD.encode(bytes)))
}

/// Validate an upload and store it in its album
pub async fn store_upload(db: &Database, form: PhotoUploadForm) -> Result<Photo> {
    let album_id = form.album_id.trim();
    if db.albums.find_by_id(album_id).await?.is_none() {
        return Err(GalleryError::not_found("Album not found"));
    }

    let metadata = InputValidator::validate_photo(&PhotoUpdate {
        title: form.title,
        description: form.description,
    })?;

    let bytes = form
        .file
        .ok_or_else(|| GalleryError::bad_request("File is required"))?;
    let image_data = encode_image(&bytes)?;

    let photo = db
        .photos
        .create(NewPhoto {
            album_id: album_id.to_string(),
            title: metadata.title,
            description: metadata.description,
            image_data,
        })
        .await?;

    info!(
        "Uploaded photo {} ({} bytes, {:?})",
        photo.id,
        bytes.len(),
        form.file_name
    );
    Ok(photo)
}
