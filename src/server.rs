use axum::{
    extract::{DefaultBodyLimit, FromRef, State},
    http::{
        header::{AUTHORIZATION, CONTENT_TYPE},
        HeaderValue, Method, StatusCode,
    },
    response::Json,
    routing::get,
    Router,
};
use serde_json::{json, Value};
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tokio::signal::ctrl_c;
#[cfg(unix)]
use tokio::signal::unix::{signal, SignalKind};
use tower::ServiceBuilder;
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    trace::TraceLayer,
};
use tracing::{error, info, warn};

use crate::api;
use crate::auth::{AuthService, JwtManager};
use crate::config::{Config, CorsConfig};
use crate::database::Database;
use crate::error::Result;
use crate::web;

/// Room for the non-file multipart fields on top of the upload limit
const FORM_OVERHEAD_BYTES: usize = 64 * 1024;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub db: Database,
    pub auth: AuthService,
}

impl AppState {
    pub fn new(config: Config, db: Database) -> Result<Self> {
        let jwt = Arc::new(JwtManager::from_config(&config.auth)?);
        let auth = AuthService::new(db.users.clone(), jwt, config.auth.clone());

        Ok(Self {
            config: Arc::new(config),
            db,
            auth,
        })
    }
}

impl FromRef<AppState> for AuthService {
    fn from_ref(state: &AppState) -> Self {
        state.auth.clone()
    }
}

pub struct Server {
    config: Arc<Config>,
    app: Router,
}

impl Server {
    pub fn new(state: AppState) -> Self {
        Self {
            config: state.config.clone(),
            app: create_app(state),
        }
    }

    pub async fn run(self) -> Result<()> {
        let addr = format!("{}:{}", self.config.server.host, self.config.server.port);

        info!("Oriani server starting on {}", addr);

        let listener = TcpListener::bind(&addr).await?;

        axum::serve(listener, self.app)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        info!("Server stopped");
        Ok(())
    }
}

pub fn create_app(state: AppState) -> Router {
    let body_limit = state.config.server.max_upload_bytes + FORM_OVERHEAD_BYTES;
    let cors = cors_layer(&state.config.cors);

    Router::new()
        .route("/health", get(health_check))
        .merge(api::routes())
        .merge(web::routes())
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors)
                .layer(DefaultBodyLimit::max(body_limit)),
        )
        .with_state(state)
}

fn cors_layer(config: &CorsConfig) -> CorsLayer {
    if config.allows_any_origin() {
        return CorsLayer::permissive();
    }

    let origins: Vec<HeaderValue> = config
        .allowed_origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                warn!("Ignoring invalid CORS origin: {}", origin);
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([AUTHORIZATION, CONTENT_TYPE])
        .allow_credentials(true)
        .max_age(Duration::from_secs(60 * 60))
}

// Health check endpoint
async fn health_check(State(state): State<AppState>) -> (StatusCode, Json<Value>) {
    let (status, database) = match state.db.health_check().await {
        Ok(()) => (StatusCode::OK, "ok".to_string()),
        Err(e) => {
            error!("Health check failed: {}", e);
            (StatusCode::SERVICE_UNAVAILABLE, e.to_string())
        }
    };

    (
        status,
        Json(json!({
            "status": if status == StatusCode::OK { "healthy" } else { "unhealthy" },
            "service": "oriani",
            "version": env!("CARGO_PKG_VERSION"),
            "checks": { "database": database },
            "timestamp": chrono::Utc::now().to_rfc3339()
        })),
    )
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = ctrl_c().await {
            error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
        info!("Received Ctrl+C, shutting down");
    };

    #[cfg(unix)]
    let terminate = async {
        match signal(SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
                info!("Received terminate signal, shutting down");
            }
            Err(e) => {
                error!("Failed to install signal handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cors_layer_skips_invalid_origins() {
        let config = CorsConfig {
            allowed_origins: vec!["https://oriani.com.br".to_string(), "bad\norigin".to_string()],
        };
        let _ = cors_layer(&config);
    }

    #[tokio::test]
    async fn test_app_state_rejects_weak_secret() {
        let db = Database::in_memory().await.unwrap();
        let mut config = Config::default();
        config.auth.jwt_secret = "short".to_string();
        assert!(AppState::new(config, db).is_err());
    }
}
