//! Server-rendered pages: the public site and the admin panel

pub mod admin;
pub mod budget;
pub mod gallery;
pub mod html;
pub mod layout;
pub mod login;
pub mod pages;

use axum::{
    routing::{get, post},
    Router,
};

use crate::server::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(pages::home))
        .route("/servicos/{category}", get(pages::service_page))
        .route("/galeria", get(gallery::gallery_index))
        .route("/galeria/{category}", get(gallery::gallery_category))
        .route("/galeria/foto/{id}", get(gallery::lightbox_view))
        .route("/orcamento", get(budget::budget_form).post(budget::submit_budget))
        .route("/login", get(login::login_form).post(login::submit_login))
        .route("/logout", get(login::logout))
        .merge(admin_routes())
}

fn admin_routes() -> Router<AppState> {
    Router::new()
        .route("/admin", get(admin::dashboard))
        .route("/admin/album/create", post(admin::create_album))
        .route("/admin/album/edit/{id}", post(admin::edit_album))
        .route("/admin/album/delete/{id}", post(admin::delete_album))
        .route("/admin/photo/upload", post(admin::upload_photo))
        .route("/admin/photo/edit/{id}", post(admin::edit_photo))
        .route("/admin/photo/delete/{id}", post(admin::delete_photo))
}
