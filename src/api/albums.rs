use axum::{
    extract::{Path, State},
    response::Json,
    routing::get,
    Router,
};
use serde_json::Value;
use tracing::info;

use super::ApiJson;
use crate::auth::AuthExtractor;
use crate::database::models::{Album, AlbumInput};
use crate::error::{GalleryError, Result};
use crate::server::AppState;
use crate::validation::InputValidator;

pub fn album_routes() -> Router<AppState> {
    Router::new()
        .route("/api/albums", get(list_albums).post(create_album))
        .route(
            "/api/albums/{id}",
            get(get_album).put(update_album).delete(delete_album),
        )
}

async fn list_albums(State(state): State<AppState>) -> Result<Json<Vec<Album>>> {
    Ok(Json(state.db.albums.list().await?))
}

async fn get_album(State(state): State<AppState>, Path(id): Path<String>) -> Result<Json<Album>> {
    state
        .db
        .albums
        .find_by_id(&id)
        .await?
        .map(Json)
        .ok_or_else(album_not_found)
}

async fn create_album(
    AuthExtractor(user): AuthExtractor,
    State(state): State<AppState>,
    ApiJson(input): ApiJson<AlbumInput>,
) -> Result<Json<Album>> {
    let input = InputValidator::validate_album(&input)?;
    let album = state.db.albums.create(input).await?;

    info!("{} created album {}", user.email, album.id);
    Ok(Json(album))
}

async fn update_album(
    AuthExtractor(user): AuthExtractor,
    State(state): State<AppState>,
    Path(id): Path<String>,
    ApiJson(input): ApiJson<AlbumInput>,
) -> Result<Json<Album>> {
    let input = InputValidator::validate_album(&input)?;
    let album = state
        .db
        .albums
        .update(&id, input)
        .await?
        .ok_or_else(album_not_found)?;

    info!("{} updated album {}", user.email, id);
    Ok(Json(album))
}

async fn delete_album(
    AuthExtractor(user): AuthExtractor,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Value>> {
    if !state.db.albums.delete(&id).await? {
        return Err(album_not_found());
    }

    info!("{} deleted album {}", user.email, id);
    Ok(super::message("Album deleted successfully"))
}

fn album_not_found() -> GalleryError {
    GalleryError::not_found("Album not found")
}
