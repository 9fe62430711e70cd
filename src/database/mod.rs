pub mod migrations;
pub mod models;
pub mod repositories;
pub mod seed;
pub mod surrealdb;

pub use migrations::MigrationManager;
pub use repositories::*;

use tracing::info;

use self::surrealdb::{SurrealConfig, SurrealConnection, SurrealConnectionError};

/// Database error type
#[derive(Debug, thiserror::Error)]
pub enum DatabaseError {
    #[error("Database connection error: {0}")]
    Connection(String),

    #[error("Query execution error: {0}")]
    Query(String),

    #[error("Migration error: {0}")]
    Migration(String),

    #[error("Record not found")]
    NotFound,

    #[error("Duplicate record")]
    Duplicate,

    #[error("Corrupt record: {0}")]
    Corrupt(String),
}

impl From<SurrealConnectionError> for DatabaseError {
    fn from(err: SurrealConnectionError) -> Self {
        match err {
            SurrealConnectionError::Connection(msg)
            | SurrealConnectionError::Auth(msg)
            | SurrealConnectionError::HealthCheck(msg)
            | SurrealConnectionError::Config(msg) => DatabaseError::Connection(msg),
            SurrealConnectionError::Query(msg) => DatabaseError::Query(msg),
            SurrealConnectionError::Surreal(e) => e.into(),
        }
    }
}

impl From<::surrealdb::Error> for DatabaseError {
    fn from(err: ::surrealdb::Error) -> Self {
        let message = err.to_string();
        // Unique index violations surface as "already contains" errors
        if message.contains("already contains") || message.contains("already exists") {
            DatabaseError::Duplicate
        } else {
            DatabaseError::Query(message)
        }
    }
}

pub type DatabaseResult<T> = Result<T, DatabaseError>;

/// Connected store plus the repositories built on it
#[derive(Clone)]
pub struct Database {
    connection: SurrealConnection,
    pub albums: AlbumRepository,
    pub photos: PhotoRepository,
    pub users: UserRepository,
}

impl Database {
    /// Connect and run schema initialization when configured
    pub async fn connect(config: SurrealConfig) -> DatabaseResult<Self> {
        let run_initialization = config.run_initialization;
        let connection = SurrealConnection::connect(config).await?;

        if run_initialization {
            MigrationManager::run_migrations(connection.db()).await?;
        }

        info!("Database ready");
        Ok(Self::from_connection(connection))
    }

    /// Fresh in-memory store with schema applied
    pub async fn in_memory() -> DatabaseResult<Self> {
        Self::connect(SurrealConfig::memory()).await
    }

    pub fn from_connection(connection: SurrealConnection) -> Self {
        Self {
            albums: AlbumRepository::new(connection.clone()),
            photos: PhotoRepository::new(connection.clone()),
            users: UserRepository::new(connection.clone()),
            connection,
        }
    }

    pub async fn health_check(&self) -> DatabaseResult<()> {
        self.connection.health_check().await?;
        Ok(())
    }
}
