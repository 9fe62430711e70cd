use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::database::models::{new_record_id, timestamp_from_db, timestamp_to_db, User};
use crate::database::surrealdb::{SurrealConnection, USERS_TABLE};
use crate::database::{DatabaseError, DatabaseResult};

#[derive(Debug, Clone, Serialize, Deserialize)]
struct UserDocument {
    email: String,
    password_hash: String,
    created_at: String,
}

#[derive(Debug, Deserialize)]
struct UserRow {
    record_key: String,
    email: String,
    password_hash: String,
    created_at: String,
}

impl UserRow {
    fn into_user(self) -> DatabaseResult<User> {
        let created_at = timestamp_from_db(&self.created_at).ok_or_else(|| {
            DatabaseError::Corrupt(format!("user {} has invalid created_at", self.record_key))
        })?;

        Ok(User {
            id: self.record_key,
            email: self.email,
            password_hash: self.password_hash,
            created_at,
        })
    }
}

/// User repository
#[derive(Clone)]
pub struct UserRepository {
    conn: SurrealConnection,
}

impl UserRepository {
    pub fn new(conn: SurrealConnection) -> Self {
        Self { conn }
    }

    /// Look a user up by (already normalized) email
    pub async fn find_by_email(&self, email: &str) -> DatabaseResult<Option<User>> {
        debug!("Finding user by email: {}", email);

        let sql = format!(
            "SELECT record::id(id) AS record_key, email, password_hash, created_at \
             FROM {} WHERE email = $email LIMIT 1",
            USERS_TABLE
        );
        let mut response = self
            .conn
            .db()
            .query(sql)
            .bind(("email", email.to_string()))
            .await?;
        let rows: Vec<UserRow> = response.take(0)?;

        rows.into_iter().next().map(UserRow::into_user).transpose()
    }

    /// Create a user. Fails with `Duplicate` when the email is taken.
    pub async fn create(&self, email: &str, password_hash: &str) -> DatabaseResult<User> {
        if self.find_by_email(email).await?.is_some() {
            return Err(DatabaseError::Duplicate);
        }

        let user = User {
            id: new_record_id(),
            email: email.to_string(),
            password_hash: password_hash.to_string(),
            created_at: Utc::now(),
        };
        let document = UserDocument {
            email: user.email.clone(),
            password_hash: user.password_hash.clone(),
            created_at: timestamp_to_db(&user.created_at),
        };

        // The unique email index still guards against concurrent registrations
        self.conn
            .db()
            .query("CREATE type::thing($table, $id) CONTENT $data")
            .bind(("table", USERS_TABLE))
            .bind(("id", user.id.clone()))
            .bind(("data", document))
            .await?
            .check()?;

        info!("Created user: {}", user.email);
        Ok(user)
    }

    pub async fn update_password(&self, id: &str, password_hash: &str) -> DatabaseResult<()> {
        self.conn
            .db()
            .query("UPDATE type::thing($table, $id) SET password_hash = $hash")
            .bind(("table", USERS_TABLE))
            .bind(("id", id.to_string()))
            .bind(("hash", password_hash.to_string()))
            .await?
            .check()?;

        info!("Updated password for user {}", id);
        Ok(())
    }
}
