use axum::{
    extract::{Path, State},
    response::{Html, IntoResponse, Response},
};

use super::gallery::{not_found_page, photo_grid};
use super::html::escape;
use super::layout::{render_page, Nav, PageMeta};
use crate::catalog::Category;
use crate::error::Result;
use crate::gallery::{latest, photos_in_category};
use crate::server::AppState;

pub const HOME_PHOTO_COUNT: usize = 8;
pub const SERVICE_PHOTO_COUNT: usize = 6;

pub async fn home(State(state): State<AppState>) -> Result<Html<String>> {
    let photos = state.db.photos.list(None).await?;
    let recent = latest(&photos, HOME_PHOTO_COUNT);
    let site = &state.config.site;

    let cards: String = Category::all()
        .iter()
        .map(|c| {
            format!(
                r#"<a class="card" href="/servicos/{slug}"><h3>{label}</h3><p>{summary}</p><p>Saiba mais &rarr;</p></a>"#,
                slug = c.slug(),
                label = c.label(),
                summary = c.summary(),
            )
        })
        .collect();

    let gallery = if recent.is_empty() {
        r#"<p class="empty">Em breve, galeria de fotos dos nossos trabalhos!</p>"#.to_string()
    } else {
        format!(
            r#"{}<p style="text-align:center;margin-top:2rem"><a class="btn" href="/galeria">Ver Galeria Completa</a></p>"#,
            photo_grid(&recent, None)
        )
    };

    let content = format!(
        r#"<section class="hero"><div class="container">
<h1>Soluções Completas para sua Casa ou Empresa</h1>
<p>Serviços profissionais de manutenção, instalação e reformas. Qualidade e confiança em cada trabalho.</p>
<a class="btn" href="/orcamento">Solicite seu Orçamento Grátis</a>
</div></section>
<section id="servicos"><div class="container">
<h2>Nossos Serviços</h2>
<p style="text-align:center">Oferecemos uma ampla gama de serviços especializados para atender todas as suas necessidades</p>
<div class="grid">{cards}</div>
</div></section>
<section id="galeria"><div class="container">
<h2>Trabalhos Realizados</h2>
<p style="text-align:center">Confira alguns dos nossos projetos concluídos com excelência</p>
{gallery}
</div></section>
<section id="sobre"><div class="container">
<h2>Sobre a {business}</h2>
<p>Somos especialistas em serviços residenciais e comerciais, oferecendo soluções completas em elétrica, hidráulica, montagem de móveis, instalações e pintura.</p>
<p>Com anos de experiência no mercado, nossa missão é proporcionar serviços de qualidade com profissionalismo, pontualidade e preços justos.</p>
<div class="grid">
<div class="card"><h3>500+</h3><p>Clientes Satisfeitos</p></div>
<div class="card"><h3>5+</h3><p>Anos de Experiência</p></div>
<div class="card"><h3>100%</h3><p>Satisfação Garantida</p></div>
</div>
</div></section>
<section id="contato"><div class="container">
<h2>Entre em Contato</h2>
<p style="text-align:center">Solicite seu orçamento sem compromisso</p>
<div class="grid">
<div class="card"><h3>Telefone</h3><p>{phone}</p></div>
<div class="card"><h3>Email</h3><p>{email}</p></div>
<div class="card"><h3>Atendimento</h3><p>{city}</p></div>
</div>
</div></section>"#,
        cards = cards,
        gallery = gallery,
        business = escape(&site.business_name),
        phone = escape(&site.phone),
        email = escape(&site.email),
        city = escape(&site.city),
    );

    Ok(Html(render_page(
        site,
        &PageMeta {
            title: "Manutenção, Instalações e Reformas",
            description: "Serviços profissionais de elétrica, hidráulica, pintura, montagem de móveis e instalações",
            keywords: None,
            nav: Nav::Home,
        },
        &content,
    )))
}

/// Landing page for one service, with a few photos from its albums
pub async fn service_page(
    State(state): State<AppState>,
    Path(category): Path<String>,
) -> Result<Response> {
    let Some(category) = Category::parse(&category) else {
        return Ok(not_found_page(&state));
    };

    let content = category.content();
    let photos = state.db.photos.list(None).await?;
    let albums = state.db.albums.list().await?;
    let mut photos = photos_in_category(&photos, &albums, Some(category));
    photos.truncate(SERVICE_PHOTO_COUNT);

    let list = |items: &[&str]| -> String {
        items.iter().map(|item| format!("<li>{}</li>", escape(item))).collect()
    };

    let gallery = if photos.is_empty() {
        String::new()
    } else {
        format!(
            r#"<section><div class="container">
<h2>Trabalhos de {label}</h2>
{grid}
<p style="text-align:center;margin-top:2rem"><a class="btn secondary" href="/galeria/{slug}">Ver todos os trabalhos</a></p>
</div></section>"#,
            label = category.label(),
            grid = photo_grid(&photos, Some(category)),
            slug = category.slug(),
        )
    };

    let body = format!(
        r#"<section class="hero"><div class="container">
<h1>{title}</h1>
<p>{description}</p>
</div></section>
<section><div class="container">
<p>{long_description}</p>
<div class="grid">
<div class="card"><h3>Serviços oferecidos</h3><ul>{services}</ul></div>
<div class="card"><h3>Por que nos escolher</h3><ul>{benefits}</ul></div>
</div>
</div></section>
{gallery}
<section><div class="container" style="text-align:center">
<h2>Precisa de {label}?</h2>
<a class="btn" href="/orcamento">Solicitar Orçamento</a>
</div></section>"#,
        title = escape(content.title),
        description = escape(content.description),
        long_description = escape(content.long_description),
        services = list(content.services),
        benefits = list(content.benefits),
        gallery = gallery,
        label = category.label(),
    );

    let html = render_page(
        &state.config.site,
        &PageMeta {
            title: content.title,
            description: content.description,
            keywords: Some(content.keywords),
            nav: Nav::Services,
        },
        &body,
    );
    Ok(Html(html).into_response())
}
