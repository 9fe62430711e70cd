use surrealdb::engine::any::Any;
use surrealdb::Surreal;
use tracing::info;

use super::connection::{SurrealConnectionError, SurrealResult};

pub const ALBUMS_TABLE: &str = "albums";
pub const PHOTOS_TABLE: &str = "photos";
pub const USERS_TABLE: &str = "users";

/// SurrealDB 数据库模式
pub struct SurrealSchema;

impl SurrealSchema {
    /// Define tables and indexes. Safe to run on every startup.
    pub async fn initialize(db: &Surreal<Any>) -> SurrealResult<()> {
        info!("Initializing SurrealDB schema...");

        Self::create_albums_table(db).await?;
        Self::create_photos_table(db).await?;
        Self::create_users_table(db).await?;

        info!("SurrealDB schema ready");
        Ok(())
    }

    async fn create_albums_table(db: &Surreal<Any>) -> SurrealResult<()> {
        let sql = r#"
        DEFINE TABLE IF NOT EXISTS albums SCHEMALESS;
        DEFINE INDEX IF NOT EXISTS idx_albums_category ON TABLE albums COLUMNS category;
        "#;

        Self::run(db, "albums", sql).await
    }

    async fn create_photos_table(db: &Surreal<Any>) -> SurrealResult<()> {
        let sql = r#"
        DEFINE TABLE IF NOT EXISTS photos SCHEMALESS;
        DEFINE INDEX IF NOT EXISTS idx_photos_album ON TABLE photos COLUMNS album_id;
        "#;

        Self::run(db, "photos", sql).await
    }

    async fn create_users_table(db: &Surreal<Any>) -> SurrealResult<()> {
        let sql = r#"
        DEFINE TABLE IF NOT EXISTS users SCHEMALESS;
        DEFINE INDEX IF NOT EXISTS idx_users_email ON TABLE users COLUMNS email UNIQUE;
        "#;

        Self::run(db, "users", sql).await
    }

    async fn run(db: &Surreal<Any>, table: &str, sql: &str) -> SurrealResult<()> {
        db.query(sql)
            .await
            .and_then(|response| response.check())
            .map_err(|e| {
                SurrealConnectionError::Query(format!("Failed to define table {}: {}", table, e))
            })?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::surrealdb::{SurrealConfig, SurrealConnection};

    #[tokio::test]
    async fn test_schema_initialization_is_idempotent() {
        let conn = SurrealConnection::connect(SurrealConfig::memory()).await.unwrap();
        SurrealSchema::initialize(conn.db()).await.unwrap();
        SurrealSchema::initialize(conn.db()).await.unwrap();
    }
}
