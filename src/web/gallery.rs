use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use serde::Deserialize;
use tracing::debug;

use super::html::{escape, image_src, url_component};
use super::layout::{render_page, Nav, PageMeta};
use crate::catalog::Category;
use crate::database::models::Photo;
use crate::error::Result;
use crate::gallery::{photos_in_category, Lightbox, LightboxState};
use crate::server::AppState;

pub const EMPTY_CATEGORY: &str = "Nenhuma foto encontrada nesta categoria.";

#[derive(Debug, Default, Deserialize)]
pub struct LightboxQuery {
    pub categoria: Option<String>,
}

/// Grid of photo tiles, each opening the lightbox within `category`
pub fn photo_grid(photos: &[Photo], category: Option<Category>) -> String {
    let query = category
        .map(|c| format!("?categoria={}", c.slug()))
        .unwrap_or_default();

    let tiles: String = photos
        .iter()
        .map(|photo| {
            format!(
                r#"<a class="photo" href="/galeria/foto/{id}{query}" title="{title}"><img src="{src}" alt="{title}" loading="lazy"></a>"#,
                id = url_component(&photo.id),
                query = query,
                title = escape(&photo.title),
                src = image_src(&photo.image_data),
            )
        })
        .collect();

    format!(r#"<div class="grid">{}</div>"#, tiles)
}

fn filter_chips(active: Option<Category>) -> String {
    let all_class = if active.is_none() { "chip active" } else { "chip" };
    let mut chips = format!(r#"<a class="{}" href="/galeria">Todas</a>"#, all_class);

    for category in Category::all() {
        let class = if active == Some(*category) { "chip active" } else { "chip" };
        chips.push_str(&format!(
            r#"<a class="{}" href="/galeria/{}">{}</a>"#,
            class,
            category.slug(),
            category.label()
        ));
    }

    format!(r#"<div class="chips">{}</div>"#, chips)
}

/// Photos for a gallery view, filtered by album category
async fn filtered_photos(state: &AppState, category: Option<Category>) -> Result<Vec<Photo>> {
    let photos = state.db.photos.list(None).await?;
    if category.is_none() {
        return Ok(photos);
    }
    let albums = state.db.albums.list().await?;
    Ok(photos_in_category(&photos, &albums, category))
}

pub async fn gallery_index(State(state): State<AppState>) -> Result<Html<String>> {
    render_gallery(&state, None).await.map(Html)
}

/// An unknown category shows an empty grid rather than a 404
pub async fn gallery_category(
    State(state): State<AppState>,
    Path(category): Path<String>,
) -> Result<Html<String>> {
    let parsed = Category::parse(&category);
    if parsed.is_none() {
        debug!("Unknown gallery category: {}", category);
        return Ok(Html(render_gallery_page(&state, &category, None, &[])));
    }

    render_gallery(&state, parsed).await.map(Html)
}

async fn render_gallery(state: &AppState, category: Option<Category>) -> Result<String> {
    let photos = filtered_photos(state, category).await?;
    let heading = category.map(|c| c.label()).unwrap_or_default();
    Ok(render_gallery_page(state, heading, category, &photos))
}

fn render_gallery_page(
    state: &AppState,
    heading: &str,
    category: Option<Category>,
    photos: &[Photo],
) -> String {
    let title = if heading.is_empty() {
        "Galeria Completa".to_string()
    } else {
        format!("Galeria - {}", heading)
    };

    let body = if photos.is_empty() {
        format!(r#"<p class="empty">{}</p>"#, EMPTY_CATEGORY)
    } else {
        photo_grid(photos, category)
    };

    let content = format!(
        r#"<section><div class="container">
<h1>{title}</h1>
<p>Confira nossos trabalhos realizados</p>
{chips}
{body}
</div></section>"#,
        title = escape(&title),
        chips = filter_chips(category),
        body = body,
    );

    render_page(
        &state.config.site,
        &PageMeta {
            title: &title,
            description: "Galeria de trabalhos realizados pela Oriani Multissoluções",
            keywords: None,
            nav: Nav::Gallery,
        },
        &content,
    )
}

/// One photo with circular previous/next links inside the filtered sequence
pub async fn lightbox_view(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(query): Query<LightboxQuery>,
) -> Result<Response> {
    let requested = query.categoria.as_deref().filter(|c| !c.is_empty());
    let category = requested.and_then(Category::parse);
    if requested.is_some() && category.is_none() {
        // An unknown category's grid is empty, so no photo is in its sequence
        debug!("Lightbox requested for unknown category: {:?}", requested);
        return Ok(not_found_page(&state));
    }
    let photos = filtered_photos(&state, category).await?;

    let mut lightbox = Lightbox::new(&photos);
    if !lightbox.open(&id) {
        return Ok(not_found_page(&state));
    }

    let (Some(current), Some((prev, next))) = (lightbox.current(), lightbox.neighbors()) else {
        return Ok(not_found_page(&state));
    };

    let query = category
        .map(|c| format!("?categoria={}", c.slug()))
        .unwrap_or_default();
    let close = category
        .map(|c| format!("/galeria/{}", c.slug()))
        .unwrap_or_else(|| "/galeria".to_string());

    let description = if current.description.is_empty() {
        String::new()
    } else {
        format!("<p>{}</p>", escape(&current.description))
    };

    let content = format!(
        r#"<div class="lightbox">
<img src="{src}" alt="{title}">
<h3>{title}</h3>
{description}
<p>{position} / {total}</p>
<nav>
<a class="btn secondary" href="/galeria/foto/{prev}{query}" rel="prev">&larr; Anterior</a>
<a class="btn secondary" href="{close}">Fechar</a>
<a class="btn secondary" href="/galeria/foto/{next}{query}" rel="next">Próxima &rarr;</a>
</nav>
</div>"#,
        src = image_src(&current.image_data),
        title = escape(&current.title),
        description = description,
        position = match lightbox.state() {
            LightboxState::Open(index) => index + 1,
            LightboxState::Closed => 0,
        },
        total = lightbox.len(),
        prev = url_component(&prev.id),
        next = url_component(&next.id),
        query = query,
        close = close,
    );

    let html = render_page(
        &state.config.site,
        &PageMeta {
            title: &current.title,
            description: "Galeria de trabalhos realizados pela Oriani Multissoluções",
            keywords: None,
            nav: Nav::Gallery,
        },
        &content,
    );
    Ok(Html(html).into_response())
}

pub fn not_found_page(state: &AppState) -> Response {
    let content = r#"<section><div class="container empty">
<h1>Página não encontrada</h1>
<p><a class="btn" href="/">Voltar ao início</a></p>
</div></section>"#;

    let html = render_page(
        &state.config.site,
        &PageMeta {
            title: "Página não encontrada",
            description: "Página não encontrada",
            keywords: None,
            nav: Nav::None,
        },
        content,
    );
    (StatusCode::NOT_FOUND, Html(html)).into_response()
}
