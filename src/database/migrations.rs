use surrealdb::engine::any::Any;
use surrealdb::Surreal;
use tracing::{error, info};

use super::surrealdb::{SurrealResult, SurrealSchema};

/// Schema version recorded by this build
pub const SCHEMA_VERSION: &str = "1.0.0";

/// SurrealDB 迁移管理器
pub struct MigrationManager;

impl MigrationManager {
    /// 运行数据库初始化
    pub async fn run_migrations(db: &Surreal<Any>) -> SurrealResult<()> {
        info!("Starting database migrations (schema {})...", SCHEMA_VERSION);

        match SurrealSchema::initialize(db).await {
            Ok(()) => {
                info!("Database migrations completed successfully");
                Ok(())
            }
            Err(e) => {
                error!("Database migrations failed: {}", e);
                Err(e)
            }
        }
    }
}
