use axum::{
    extract::multipart::MultipartRejection,
    extract::rejection::{FormRejection, JsonRejection, QueryRejection},
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;
use tracing::error;

use crate::database::DatabaseError;
use crate::validation::ValidationError;

pub type Result<T> = std::result::Result<T, GalleryError>;

#[derive(Error, Debug)]
pub enum GalleryError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("{0}")]
    Authentication(String),

    #[error("{0}")]
    Forbidden(String),

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Conflict(String),

    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    Validation(#[from] ValidationError),

    #[error("{0}")]
    PayloadTooLarge(String),

    /// Request body or query that axum could not extract
    #[error("{detail}")]
    Rejected { status: StatusCode, detail: String },

    #[error("Database error: {0}")]
    Database(#[from] DatabaseError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl GalleryError {
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    pub fn authentication(msg: impl Into<String>) -> Self {
        Self::Authentication(msg.into())
    }

    pub fn forbidden(msg: impl Into<String>) -> Self {
        Self::Forbidden(msg.into())
    }

    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    pub fn conflict(msg: impl Into<String>) -> Self {
        Self::Conflict(msg.into())
    }

    pub fn bad_request(msg: impl Into<String>) -> Self {
        Self::BadRequest(msg.into())
    }

    pub fn payload_too_large(msg: impl Into<String>) -> Self {
        Self::PayloadTooLarge(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            GalleryError::Authentication(_) => StatusCode::UNAUTHORIZED,
            GalleryError::Forbidden(_) => StatusCode::FORBIDDEN,
            GalleryError::NotFound(_) => StatusCode::NOT_FOUND,
            GalleryError::Conflict(_) => StatusCode::CONFLICT,
            GalleryError::BadRequest(_) => StatusCode::BAD_REQUEST,
            GalleryError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            GalleryError::PayloadTooLarge(_) => StatusCode::PAYLOAD_TOO_LARGE,
            GalleryError::Rejected { status, .. } => *status,
            GalleryError::Database(DatabaseError::NotFound) => StatusCode::NOT_FOUND,
            GalleryError::Database(DatabaseError::Duplicate) => StatusCode::CONFLICT,
            GalleryError::Config(_)
            | GalleryError::Database(_)
            | GalleryError::Io(_)
            | GalleryError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

macro_rules! impl_from_rejection {
    ($($rejection:ty),* $(,)?) => {
        $(
            impl From<$rejection> for GalleryError {
                fn from(rejection: $rejection) -> Self {
                    GalleryError::Rejected {
                        status: rejection.status(),
                        detail: rejection.body_text(),
                    }
                }
            }
        )*
    };
}

impl_from_rejection!(JsonRejection, FormRejection, QueryRejection, MultipartRejection);

impl IntoResponse for GalleryError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        // Storage failures are logged in full and reported generically.
        let detail = if status == StatusCode::INTERNAL_SERVER_ERROR {
            error!("Request failed: {}", self);
            match self {
                GalleryError::Config(msg) => msg,
                _ => "Internal server error".to_string(),
            }
        } else {
            self.to_string()
        };

        let mut response = (status, Json(json!({ "detail": detail }))).into_response();
        if status == StatusCode::UNAUTHORIZED {
            response
                .headers_mut()
                .insert(header::WWW_AUTHENTICATE, HeaderValue::from_static("Bearer"));
        }
        response
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(
            GalleryError::not_found("Album not found").status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            GalleryError::authentication("nope").status_code(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            GalleryError::Database(DatabaseError::Duplicate).status_code(),
            StatusCode::CONFLICT
        );
        assert_eq!(
            GalleryError::Database(DatabaseError::Query("boom".into())).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_unauthorized_response_carries_challenge() {
        let response =
            GalleryError::authentication("Could not validate credentials").into_response();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(
            response.headers().get(header::WWW_AUTHENTICATE).unwrap(),
            "Bearer"
        );
    }

    #[tokio::test]
    async fn test_json_rejection_becomes_json_detail() {
        use axum::{body::Body, extract::FromRequest, http::Request};
        use http_body_util::BodyExt;

        let request = Request::post("/")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(r#"{"name":"x"}"#))
            .unwrap();
        let rejection = Json::<crate::database::models::AlbumInput>::from_request(request, &())
            .await
            .unwrap_err();

        let response = GalleryError::from(rejection).into_response();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(response.headers()[header::CONTENT_TYPE], "application/json");

        let body = response.into_body().collect().await.unwrap().to_bytes();
        let body: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert!(body["detail"].as_str().unwrap().contains("category"));
    }

    #[test]
    fn test_not_found_message_is_detail() {
        let err = GalleryError::not_found("Photo not found");
        assert_eq!(err.to_string(), "Photo not found");
    }
}
