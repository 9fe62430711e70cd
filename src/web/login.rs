use axum::{
    extract::State,
    response::{Html, IntoResponse, Response},
    Form,
};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use serde::Deserialize;
use tracing::{error, warn};

use super::html::{escape, redirect};
use super::layout::{render_page, Nav, PageMeta};
use crate::auth::{Credentials, ACCESS_TOKEN_COOKIE};
use crate::error::GalleryError;
use crate::server::AppState;

pub const LOGIN_FAILED: &str = "Email ou senha incorretos";

#[derive(Debug, Deserialize)]
pub struct LoginForm {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

pub async fn login_form(State(state): State<AppState>) -> Html<String> {
    Html(render_login_page(&state, "", None))
}

/// On success set the session cookie and go to the admin panel
pub async fn submit_login(
    State(state): State<AppState>,
    jar: CookieJar,
    Form(form): Form<LoginForm>,
) -> Response {
    let credentials = Credentials {
        email: form.email.clone(),
        password: form.password,
    };

    match state.auth.login(&credentials).await {
        Ok(token) => {
            let cookie = Cookie::build((ACCESS_TOKEN_COOKIE, token.access_token))
                .path("/")
                .http_only(true)
                .same_site(SameSite::Lax)
                .build();
            (jar.add(cookie), redirect("/admin")).into_response()
        }
        Err(GalleryError::Authentication(_)) => {
            warn!("Admin login failed for {}", form.email);
            Html(render_login_page(&state, &form.email, Some(LOGIN_FAILED))).into_response()
        }
        Err(e) => {
            error!("Login error: {}", e);
            let message = e.to_string();
            Html(render_login_page(&state, &form.email, Some(&message))).into_response()
        }
    }
}

pub async fn logout(jar: CookieJar) -> Response {
    let jar = jar.remove(Cookie::build(ACCESS_TOKEN_COOKIE).path("/"));
    (jar, redirect("/")).into_response()
}

fn render_login_page(state: &AppState, email: &str, error: Option<&str>) -> String {
    let alert = error
        .map(|msg| format!(r#"<div class="alert" role="alert">{}</div>"#, escape(msg)))
        .unwrap_or_default();

    let content = format!(
        r#"<section><div class="container">
<h1>Área Administrativa</h1>
{alert}
<form class="stack" method="post" action="/login">
<label>Email <input type="email" name="email" value="{email}" required></label>
<label>Senha <input type="password" name="password" required></label>
<button class="btn" type="submit">Entrar</button>
</form>
</div></section>"#,
        alert = alert,
        email = escape(email),
    );

    render_page(
        &state.config.site,
        &PageMeta {
            title: "Área Administrativa",
            description: "Acesso restrito",
            keywords: None,
            nav: Nav::Admin,
        },
        &content,
    )
}
