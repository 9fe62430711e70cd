//! SurrealDB document store
//!
//! Connection management and schema definitions. The repositories in
//! `database::repositories` issue their own SurrealQL through the handle
//! exposed here.

pub mod config;
pub mod connection;
pub mod schema;

pub use config::{RetryConfig, SurrealConfig, SurrealProtocol};
pub use connection::{SurrealConnection, SurrealConnectionError, SurrealResult};
pub use schema::{SurrealSchema, ALBUMS_TABLE, PHOTOS_TABLE, USERS_TABLE};
