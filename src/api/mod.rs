//! JSON API under `/api`

pub mod albums;
pub mod auth;
pub mod categories;
pub mod photos;
pub mod upload;

use axum::{
    extract::{FromRequest, FromRequestParts},
    response::Json,
    routing::get,
    Router,
};
use serde_json::{json, Value};

use crate::error::GalleryError;
use crate::server::AppState;

/// `Json` whose rejection answers with a `{"detail"}` body
#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(GalleryError))]
pub struct ApiJson<T>(pub T);

/// Urlencoded form with JSON rejections
#[derive(FromRequest)]
#[from_request(via(axum::Form), rejection(GalleryError))]
pub struct ApiForm<T>(pub T);

/// Query string with JSON rejections
#[derive(FromRequestParts)]
#[from_request(via(axum::extract::Query), rejection(GalleryError))]
pub struct ApiQuery<T>(pub T);

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/api", get(root))
        .route("/api/", get(root))
        .merge(auth::auth_routes())
        .merge(categories::category_routes())
        .merge(albums::album_routes())
        .merge(photos::photo_routes())
}

async fn root() -> Json<Value> {
    Json(json!({ "message": "Oriani Multissoluções API" }))
}

/// Body of delete confirmations
pub(crate) fn message(text: &str) -> Json<Value> {
    Json(json!({ "message": text }))
}
