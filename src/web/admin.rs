use axum::{
    extract::{Multipart, Path, Query, State},
    response::{Html, IntoResponse, Response},
    Form,
};
use serde::Deserialize;
use tracing::{error, info};

use super::html::{escape, image_src, options, redirect, url_component};
use super::layout::{render_page, Nav, PageMeta};
use crate::api::upload::{store_upload, PhotoUploadForm};
use crate::auth::AdminSession;
use crate::catalog::Category;
use crate::database::models::{Album, AlbumInput, Photo, PhotoUpdate};
use crate::error::{GalleryError, Result};
use crate::server::AppState;
use crate::validation::InputValidator;

const ALBUM_NOT_FOUND: &str = "Álbum não encontrado";
const PHOTO_NOT_FOUND: &str = "Foto não encontrada";

#[derive(Debug, Default, Deserialize)]
pub struct AdminQuery {
    pub erro: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct AlbumForm {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub category: String,
}

impl From<AlbumForm> for AlbumInput {
    fn from(form: AlbumForm) -> Self {
        AlbumInput {
            name: form.name,
            description: form.description,
            category: form.category,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct PhotoForm {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
}

/// Back to the panel, carrying the failure message when there is one.
/// Server-side failures keep their error response.
fn back_to_admin(result: Result<()>) -> Response {
    match result {
        Ok(()) => redirect("/admin"),
        Err(e) if e.status_code().is_server_error() => {
            error!("Admin action failed: {}", e);
            e.into_response()
        }
        Err(e) => redirect(&format!("/admin?erro={}", url_component(&e.to_string()))),
    }
}

pub async fn dashboard(
    AdminSession(user): AdminSession,
    State(state): State<AppState>,
    Query(query): Query<AdminQuery>,
) -> Result<Html<String>> {
    let albums = state.db.albums.list().await?;
    let photos = state.db.photos.list(None).await?;
    let counts = state.db.photos.count_by_album().await?;

    let album_rows: String = albums
        .iter()
        .map(|album| render_album_row(album, counts.get(&album.id).copied().unwrap_or(0)))
        .collect();

    let photo_rows: String = photos
        .iter()
        .map(|photo| render_photo_row(photo, &albums))
        .collect();

    let alert = query
        .erro
        .as_deref()
        .filter(|msg| !msg.is_empty())
        .map(|msg| format!(r#"<div class="alert" role="alert">{}</div>"#, escape(msg)))
        .unwrap_or_default();

    let album_options = options(albums.iter().map(|a| (a.id.as_str(), a.name.as_str())), None);

    let content = format!(
        r#"<section><div class="container">
<p style="text-align:right">{email} &middot; <a href="/logout">Sair</a></p>
<h1>Painel Administrativo</h1>
{alert}
<h2>Novo álbum</h2>
<form class="stack" method="post" action="/admin/album/create">
<input type="text" name="name" placeholder="Nome do álbum" required>
<textarea name="description" rows="2" placeholder="Descrição"></textarea>
<select name="category">{category_options}</select>
<button class="btn" type="submit">Criar álbum</button>
</form>
<h2>Álbuns</h2>
<table>
<thead><tr><th>Álbum</th><th>Categoria</th><th>Fotos</th><th></th></tr></thead>
<tbody>{album_rows}</tbody>
</table>
<h2>Enviar foto</h2>
<form class="stack" method="post" action="/admin/photo/upload" enctype="multipart/form-data">
<select name="album_id" required>{album_options}</select>
<input type="text" name="title" placeholder="Título" required>
<textarea name="description" rows="2" placeholder="Descrição"></textarea>
<input type="file" name="file" accept="image/*" required>
<button class="btn" type="submit">Enviar</button>
</form>
<h2>Fotos</h2>
<table>
<thead><tr><th></th><th>Foto</th><th>Álbum</th><th></th></tr></thead>
<tbody>{photo_rows}</tbody>
</table>
</div></section>"#,
        email = escape(&user.email),
        alert = alert,
        category_options = category_options(None),
        album_rows = album_rows,
        album_options = album_options,
        photo_rows = photo_rows,
    );

    Ok(Html(render_page(
        &state.config.site,
        &PageMeta {
            title: "Painel Administrativo",
            description: "Gerenciamento de álbuns e fotos",
            keywords: None,
            nav: Nav::Admin,
        },
        &content,
    )))
}

fn category_options(selected: Option<&str>) -> String {
    options(Category::all().iter().map(|c| (c.label(), c.label())), selected)
}

fn render_album_row(album: &Album, photo_count: usize) -> String {
    let id = url_component(&album.id);
    format!(
        r#"<tr>
<td><form method="post" action="/admin/album/edit/{id}" class="stack">
<input type="text" name="name" value="{name}" required>
<textarea name="description" rows="2">{description}</textarea>
<select name="category">{categories}</select>
<button class="btn secondary" type="submit">Salvar</button>
</form></td>
<td>{category}</td>
<td>{photo_count}</td>
<td><form method="post" action="/admin/album/delete/{id}"><button class="btn danger" type="submit">Excluir</button></form></td>
</tr>"#,
        id = id,
        name = escape(&album.name),
        description = escape(&album.description),
        categories = category_options(Some(&album.category)),
        category = escape(&album.category),
        photo_count = photo_count,
    )
}

fn render_photo_row(photo: &Photo, albums: &[Album]) -> String {
    let album_name = albums
        .iter()
        .find(|a| a.id == photo.album_id)
        .map(|a| a.name.as_str())
        .unwrap_or("-");
    let id = url_component(&photo.id);

    format!(
        r#"<tr>
<td><img src="{src}" alt="{title}" width="64" height="64" style="object-fit:cover"></td>
<td><form method="post" action="/admin/photo/edit/{id}" class="stack">
<input type="text" name="title" value="{title}" required>
<textarea name="description" rows="2">{description}</textarea>
<button class="btn secondary" type="submit">Salvar</button>
</form></td>
<td>{album}</td>
<td><form method="post" action="/admin/photo/delete/{id}"><button class="btn danger" type="submit">Excluir</button></form></td>
</tr>"#,
        src = image_src(&photo.image_data),
        id = id,
        title = escape(&photo.title),
        description = escape(&photo.description),
        album = escape(album_name),
    )
}

pub async fn create_album(
    AdminSession(user): AdminSession,
    State(state): State<AppState>,
    Form(form): Form<AlbumForm>,
) -> Response {
    let result = async {
        let input = InputValidator::validate_album(&form.into())?;
        let album = state.db.albums.create(input).await?;
        info!("{} created album {}", user.email, album.id);
        Ok::<(), GalleryError>(())
    };
    back_to_admin(result.await)
}

pub async fn edit_album(
    AdminSession(user): AdminSession,
    State(state): State<AppState>,
    Path(id): Path<String>,
    Form(form): Form<AlbumForm>,
) -> Response {
    let result = async {
        let input = InputValidator::validate_album(&form.into())?;
        state
            .db
            .albums
            .update(&id, input)
            .await?
            .ok_or_else(|| GalleryError::not_found(ALBUM_NOT_FOUND))?;
        info!("{} updated album {}", user.email, id);
        Ok::<(), GalleryError>(())
    };
    back_to_admin(result.await)
}

pub async fn delete_album(
    AdminSession(user): AdminSession,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Response {
    let result = async {
        if !state.db.albums.delete(&id).await? {
            return Err(GalleryError::not_found(ALBUM_NOT_FOUND));
        }
        info!("{} deleted album {}", user.email, id);
        Ok::<(), GalleryError>(())
    };
    back_to_admin(result.await)
}

pub async fn upload_photo(
    AdminSession(user): AdminSession,
    State(state): State<AppState>,
    multipart: Multipart,
) -> Response {
    let result = async {
        let form =
            PhotoUploadForm::from_multipart(multipart, state.config.server.max_upload_bytes).await?;
        let photo = store_upload(&state.db, form).await?;
        info!("{} uploaded photo {}", user.email, photo.id);
        Ok::<(), GalleryError>(())
    };
    back_to_admin(result.await)
}

pub async fn edit_photo(
    AdminSession(user): AdminSession,
    State(state): State<AppState>,
    Path(id): Path<String>,
    Form(form): Form<PhotoForm>,
) -> Response {
    let result = async {
        let update = InputValidator::validate_photo(&PhotoUpdate {
            title: form.title,
            description: form.description,
        })?;
        state
            .db
            .photos
            .update(&id, update)
            .await?
            .ok_or_else(|| GalleryError::not_found(PHOTO_NOT_FOUND))?;
        info!("{} updated photo {}", user.email, id);
        Ok::<(), GalleryError>(())
    };
    back_to_admin(result.await)
}

pub async fn delete_photo(
    AdminSession(user): AdminSession,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Response {
    let result = async {
        if !state.db.photos.delete(&id).await? {
            return Err(GalleryError::not_found(PHOTO_NOT_FOUND));
        }
        info!("{} deleted photo {}", user.email, id);
        Ok::<(), GalleryError>(())
    };
    back_to_admin(result.await)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::{header::LOCATION, StatusCode};
    use crate::database::DatabaseError;

    #[test]
    fn test_back_to_admin_carries_client_errors() {
        let response = back_to_admin(Err(GalleryError::not_found(ALBUM_NOT_FOUND)));
        assert_eq!(response.status(), StatusCode::FOUND);
        assert_eq!(
            response.headers()[LOCATION],
            "/admin?erro=%C3%81lbum%20n%C3%A3o%20encontrado"
        );

        assert_eq!(back_to_admin(Ok(())).headers()[LOCATION], "/admin");
    }

    #[test]
    fn test_back_to_admin_keeps_server_errors() {
        let response = back_to_admin(Err(GalleryError::Database(DatabaseError::Query(
            "boom".to_string(),
        ))));
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_album_row_escapes_content() {
        let album = Album {
            id: "album-1".to_string(),
            name: "<b>Cozinha</b>".to_string(),
            description: String::new(),
            category: "Pintura".to_string(),
            created_at: chrono::Utc::now(),
        };
        let html = render_album_row(&album, 3);
        assert!(html.contains("&lt;b&gt;Cozinha&lt;/b&gt;"));
        assert!(html.contains(r#"<option value="Pintura" selected>Pintura</option>"#));
        assert!(html.contains("<td>3</td>"));
    }
}
