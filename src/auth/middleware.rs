use axum::{
    extract::{FromRef, FromRequestParts},
    http::{header::AUTHORIZATION, header::LOCATION, request::Parts, StatusCode},
    response::{IntoResponse, Response},
};
use axum_extra::extract::cookie::CookieJar;
use tracing::{debug, warn};

use super::models::AuthContext;
use super::service::AuthService;
use crate::error::GalleryError;

/// Cookie carrying the access token for the admin pages
pub const ACCESS_TOKEN_COOKIE: &str = "access_token";

const MAX_TOKEN_LENGTH: usize = 4096;

/// Pull the token from `Authorization: Bearer` or, failing that, the cookie
pub fn extract_token(parts: &Parts) -> Option<String> {
    let from_header = parts
        .headers
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.strip_prefix("Bearer "))
        .map(|t| t.trim().to_string());

    let token = from_header.or_else(|| {
        CookieJar::from_headers(&parts.headers)
            .get(ACCESS_TOKEN_COOKIE)
            .map(|c| c.value().to_string())
    })?;

    if token.is_empty() || token.len() > MAX_TOKEN_LENGTH {
        warn!("Invalid token format: length={}", token.len());
        return None;
    }
    Some(token)
}

async fn authenticate_parts<S>(parts: &Parts, state: &S) -> Result<AuthContext, GalleryError>
where
    AuthService: FromRef<S>,
{
    let token = extract_token(parts)
        .ok_or_else(|| GalleryError::authentication("Not authenticated"))?;

    let auth = AuthService::from_ref(state);
    let context = auth.authenticate(&token).await?;
    debug!("Authenticated request for {}", context.email);
    Ok(context)
}

/// API authentication. Rejects with 401 JSON.
#[derive(Debug, Clone)]
pub struct AuthExtractor(pub AuthContext);

impl<S> FromRequestParts<S> for AuthExtractor
where
    AuthService: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = GalleryError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        authenticate_parts(parts, state).await.map(AuthExtractor)
    }
}

/// Admin page session. Rejects by redirecting to the login page.
#[derive(Debug, Clone)]
pub struct AdminSession(pub AuthContext);

pub struct LoginRedirect;

impl IntoResponse for LoginRedirect {
    fn into_response(self) -> Response {
        (StatusCode::FOUND, [(LOCATION, "/login")]).into_response()
    }
}

impl<S> FromRequestParts<S> for AdminSession
where
    AuthService: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        match authenticate_parts(parts, state).await {
            Ok(context) => Ok(AdminSession(context)),
            Err(GalleryError::Authentication(_)) => Err(LoginRedirect.into_response()),
            Err(e) => Err(e.into_response()),
        }
    }
}
