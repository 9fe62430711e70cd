use axum::{
    extract::{multipart::MultipartRejection, Multipart, Path, State},
    response::Json,
    routing::{get, post},
    Router,
};
use serde::Deserialize;
use serde_json::Value;
use tracing::info;

use super::upload::{store_upload, PhotoUploadForm};
use super::{ApiForm, ApiQuery};
use crate::auth::AuthExtractor;
use crate::database::models::{Photo, PhotoUpdate};
use crate::error::{GalleryError, Result};
use crate::server::AppState;
use crate::validation::InputValidator;

#[derive(Debug, Deserialize)]
pub struct PhotoQuery {
    pub album_id: Option<String>,
}

pub fn photo_routes() -> Router<AppState> {
    Router::new()
        .route("/api/photos", get(list_photos))
        .route("/api/photos/upload", post(upload_photo))
        .route(
            "/api/photos/{id}",
            get(get_photo).put(update_photo).delete(delete_photo),
        )
}

async fn list_photos(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<PhotoQuery>,
) -> Result<Json<Vec<Photo>>> {
    let album_id = query.album_id.as_deref().filter(|id| !id.is_empty());
    Ok(Json(state.db.photos.list(album_id).await?))
}

async fn get_photo(State(state): State<AppState>, Path(id): Path<String>) -> Result<Json<Photo>> {
    state
        .db
        .photos
        .find_by_id(&id)
        .await?
        .map(Json)
        .ok_or_else(photo_not_found)
}

async fn upload_photo(
    AuthExtractor(user): AuthExtractor,
    State(state): State<AppState>,
    multipart: std::result::Result<Multipart, MultipartRejection>,
) -> Result<Json<Photo>> {
    let form =
        PhotoUploadForm::from_multipart(multipart?, state.config.server.max_upload_bytes).await?;
    let photo = store_upload(&state.db, form).await?;

    info!("{} uploaded photo {}", user.email, photo.id);
    Ok(Json(photo))
}

async fn update_photo(
    AuthExtractor(user): AuthExtractor,
    State(state): State<AppState>,
    Path(id): Path<String>,
    ApiForm(update): ApiForm<PhotoUpdate>,
) -> Result<Json<Photo>> {
    let update = InputValidator::validate_photo(&update)?;
    let photo = state
        .db
        .photos
        .update(&id, update)
        .await?
        .ok_or_else(photo_not_found)?;

    info!("{} updated photo {}", user.email, id);
    Ok(Json(photo))
}

async fn delete_photo(
    AuthExtractor(user): AuthExtractor,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Value>> {
    if !state.db.photos.delete(&id).await? {
        return Err(photo_not_found());
    }

    info!("{} deleted photo {}", user.email, id);
    Ok(super::message("Photo deleted successfully"))
}

fn photo_not_found() -> GalleryError {
    GalleryError::not_found("Photo not found")
}
