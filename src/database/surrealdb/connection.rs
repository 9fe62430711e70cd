use surrealdb::engine::any::{connect, Any};
use surrealdb::opt::auth::Root;
use surrealdb::{Error as SurrealError, Surreal};
use tokio::time::sleep;
use tracing::{debug, error, info, warn};

use super::config::SurrealConfig;

/// SurrealDB 连接错误
#[derive(Debug, thiserror::Error)]
pub enum SurrealConnectionError {
    #[error("Database connection error: {0}")]
    Connection(String),

    #[error("Authentication error: {0}")]
    Auth(String),

    #[error("Query execution error: {0}")]
    Query(String),

    #[error("Health check failed: {0}")]
    HealthCheck(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("SurrealDB error: {0}")]
    Surreal(#[from] SurrealError),
}

pub type SurrealResult<T> = Result<T, SurrealConnectionError>;

/// Handle to the document store.
///
/// `Surreal<Any>` multiplexes requests over one client, so the handle is
/// cloned into every repository instead of being pooled.
#[derive(Clone)]
pub struct SurrealConnection {
    db: Surreal<Any>,
    config: SurrealConfig,
}

impl SurrealConnection {
    /// 连接、认证并选择命名空间/数据库
    pub async fn connect(config: SurrealConfig) -> SurrealResult<Self> {
        config.protocol()?;
        debug!(
            "Connecting to SurrealDB: endpoint={}, namespace={}, database={}",
            config.endpoint, config.namespace, config.database
        );

        let db = Self::connect_with_retry(&config).await?;

        db.use_ns(config.namespace.clone())
            .use_db(config.database.clone())
            .await
            .map_err(|e| {
                SurrealConnectionError::Connection(format!(
                    "Failed to select namespace/database: {}",
                    e
                ))
            })?;

        info!("Connected to SurrealDB at {}", config.endpoint);
        Ok(Self { db, config })
    }

    async fn connect_with_retry(config: &SurrealConfig) -> SurrealResult<Surreal<Any>> {
        let mut attempts = 0;

        loop {
            match Self::try_connect(config).await {
                Ok(db) => return Ok(db),
                Err(e) => {
                    attempts += 1;
                    if attempts >= config.retry.max_attempts {
                        error!("Giving up on SurrealDB after {} attempts: {}", attempts, e);
                        return Err(e);
                    }

                    // 指数退避
                    let interval = config.retry_interval(attempts);
                    warn!(
                        "SurrealDB connection failed, retrying in {}ms (attempt {}/{}): {}",
                        interval.as_millis(),
                        attempts,
                        config.retry.max_attempts,
                        e
                    );
                    sleep(interval).await;
                }
            }
        }
    }

    async fn try_connect(config: &SurrealConfig) -> SurrealResult<Surreal<Any>> {
        let db = connect(config.endpoint.as_str())
            .await
            .map_err(|e| SurrealConnectionError::Connection(e.to_string()))?;

        if config.requires_auth() {
            if let (Some(username), Some(password)) = (&config.username, &config.password) {
                db.signin(Root {
                    username: username.as_str(),
                    password: password.as_str(),
                })
                .await
                .map_err(|e| SurrealConnectionError::Auth(e.to_string()))?;
            }
        }

        Ok(db)
    }

    pub fn db(&self) -> &Surreal<Any> {
        &self.db
    }

    pub fn config(&self) -> &SurrealConfig {
        &self.config
    }

    pub async fn health_check(&self) -> SurrealResult<()> {
        self.db
            .query("RETURN true")
            .await
            .and_then(|response| response.check())
            .map_err(|e| SurrealConnectionError::HealthCheck(e.to_string()))?;
        Ok(())
    }
}
