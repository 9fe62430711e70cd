// Repositories issuing SurrealQL directly against the shared connection
pub mod album_repository;
pub mod photo_repository;
pub mod user_repository;

pub use album_repository::AlbumRepository;
pub use photo_repository::PhotoRepository;
pub use user_repository::UserRepository;
