use axum::{extract::State, response::Json, routing::post, Router};
use tracing::info;

use super::ApiJson;
use crate::auth::{AuthService, AuthToken, Credentials};
use crate::error::Result;
use crate::server::AppState;

pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/api/auth/login", post(login))
        .route("/api/auth/register", post(register))
}

async fn login(
    State(auth): State<AuthService>,
    ApiJson(request): ApiJson<Credentials>,
) -> Result<Json<AuthToken>> {
    info!("Login attempt for {}", request.email);
    auth.login(&request).await.map(Json)
}

async fn register(
    State(auth): State<AuthService>,
    ApiJson(request): ApiJson<Credentials>,
) -> Result<Json<AuthToken>> {
    info!("Registration attempt for {}", request.email);
    auth.register(&request).await.map(Json)
}
