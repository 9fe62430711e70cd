use axum::{response::Json, routing::get, Router};
use serde_json::{json, Value};

use crate::catalog::Category;
use crate::server::AppState;

pub fn category_routes() -> Router<AppState> {
    Router::new().route("/api/categories", get(list_categories))
}

/// Category labels in display order
async fn list_categories() -> Json<Value> {
    Json(json!({ "categories": Category::labels() }))
}
