#![allow(dead_code)]

use axum::{
    body::Body,
    http::{header, Request, Response},
    Router,
};
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;

use oriani::{create_app, AppState, Config, Database};

pub const ADMIN_EMAIL: &str = "admin@oriani.com.br";
pub const ADMIN_PASSWORD: &str = "senha-do-admin";
pub const BOUNDARY: &str = "oriani-test-boundary";

/// Smallest byte string `infer` recognises as a PNG
pub const PNG_BYTES: &[u8] = b"\x89PNG\r\n\x1a\n\0\0\0\rIHDR\0\0\0\x01\0\0\0\x01\x08\x06\0\0\0";

pub struct TestApp {
    pub router: Router,
    pub db: Database,
}

pub fn test_config() -> Config {
    let mut config = Config::default();
    config.auth.jwt_secret = "integration-test-secret-key".to_string();
    config.auth.admin_email = Some(ADMIN_EMAIL.to_string());
    config.auth.admin_password = Some(ADMIN_PASSWORD.to_string());
    config
}

impl TestApp {
    pub async fn new() -> Self {
        Self::with_config(test_config()).await
    }

    pub async fn with_config(config: Config) -> Self {
        let db = Database::in_memory().await.unwrap();
        let state = AppState::new(config, db.clone()).unwrap();
        Self {
            router: create_app(state),
            db,
        }
    }

    pub async fn send(&self, request: Request<Body>) -> Response<Body> {
        self.router.clone().oneshot(request).await.unwrap()
    }

    pub async fn get(&self, uri: &str) -> Response<Body> {
        self.send(Request::get(uri).body(Body::empty()).unwrap()).await
    }

    /// Log in through the API and return the bearer token
    pub async fn admin_token(&self) -> String {
        let response = self
            .send(json_request(
                "POST",
                "/api/auth/login",
                None,
                &serde_json::json!({ "email": ADMIN_EMAIL, "password": ADMIN_PASSWORD }),
            ))
            .await;
        let body = body_json(response).await;
        body["access_token"].as_str().unwrap().to_string()
    }
}

pub fn json_request(method: &str, uri: &str, token: Option<&str>, body: &Value) -> Request<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json");
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

pub fn form_request(uri: &str, cookie: Option<&str>, body: &str) -> Request<Body> {
    let mut builder = Request::post(uri).header(
        header::CONTENT_TYPE,
        "application/x-www-form-urlencoded",
    );
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

/// multipart/form-data body with text fields and an optional `file` part
pub fn multipart_body(fields: &[(&str, &str)], file: Option<(&str, &[u8])>) -> Vec<u8> {
    let mut body = Vec::new();
    for (name, value) in fields {
        body.extend_from_slice(
            format!(
                "--{}\r\nContent-Disposition: form-data; name=\"{}\"\r\n\r\n{}\r\n",
                BOUNDARY, name, value
            )
            .as_bytes(),
        );
    }
    if let Some((file_name, bytes)) = file {
        body.extend_from_slice(
            format!(
                "--{}\r\nContent-Disposition: form-data; name=\"file\"; filename=\"{}\"\r\nContent-Type: application/octet-stream\r\n\r\n",
                BOUNDARY, file_name
            )
            .as_bytes(),
        );
        body.extend_from_slice(bytes);
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{}--\r\n", BOUNDARY).as_bytes());
    body
}

pub fn multipart_request(uri: &str, auth: Option<(&str, &str)>, body: Vec<u8>) -> Request<Body> {
    let mut builder = Request::post(uri).header(
        header::CONTENT_TYPE,
        format!("multipart/form-data; boundary={}", BOUNDARY),
    );
    if let Some((name, value)) = auth {
        builder = builder.header(name, value);
    }
    builder.body(Body::from(body)).unwrap()
}

pub async fn body_bytes(response: Response<Body>) -> Vec<u8> {
    response.into_body().collect().await.unwrap().to_bytes().to_vec()
}

pub async fn body_text(response: Response<Body>) -> String {
    String::from_utf8(body_bytes(response).await).unwrap()
}

pub async fn body_json(response: Response<Body>) -> Value {
    serde_json::from_slice(&body_bytes(response).await).unwrap()
}

pub fn location(response: &Response<Body>) -> String {
    response.headers()[header::LOCATION]
        .to_str()
        .unwrap()
        .to_string()
}
