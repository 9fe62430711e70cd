use tokio::task;
use tracing::warn;

use crate::error::{GalleryError, Result};

/// bcrypt runs on the blocking pool; a hash costs hundreds of milliseconds
pub async fn hash_password(password: &str) -> Result<String> {
    let password = password.to_string();
    task::spawn_blocking(move || bcrypt::hash(password, bcrypt::DEFAULT_COST))
        .await
        .map_err(|e| GalleryError::internal(format!("Password hashing task failed: {}", e)))?
        .map_err(|e| GalleryError::internal(format!("Password hashing failed: {}", e)))
}

/// A malformed stored hash counts as a mismatch
pub async fn verify_password(password: &str, hash: &str) -> bool {
    let password = password.to_string();
    let hash = hash.to_string();
    match task::spawn_blocking(move || bcrypt::verify(password, &hash)).await {
        Ok(Ok(matches)) => matches,
        Ok(Err(e)) => {
            warn!("Stored password hash could not be checked: {}", e);
            false
        }
        Err(e) => {
            warn!("Password verification task failed: {}", e);
            false
        }
    }
}
