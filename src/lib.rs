pub mod api;
pub mod auth;
pub mod budget;
pub mod catalog;
pub mod cli;
pub mod config;
pub mod database;
pub mod error;
pub mod gallery;
pub mod server;
pub mod validation;
pub mod web;

pub use config::Config;
pub use database::Database;
pub use error::{GalleryError, Result};
pub use server::{create_app, AppState, Server};
