//! Photo sequences shown by the gallery pages

pub mod filter;
pub mod lightbox;

pub use filter::{latest, photos_in_category};
pub use lightbox::{Lightbox, LightboxState};
