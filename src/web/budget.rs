use axum::{
    extract::State,
    response::{Html, IntoResponse, Response},
};
use axum_extra::extract::Form;
use serde::Deserialize;
use tracing::{info, warn};

use super::html::{escape, see_other};
use super::layout::{render_page, Nav, PageMeta};
use crate::budget::BudgetRequest;
use crate::catalog::Category;
use crate::server::AppState;

const NAME_REQUIRED: &str = "Por favor, informe seu nome";

/// Budget form fields. `servicos` repeats once per checked box.
#[derive(Debug, Default, Deserialize)]
pub struct BudgetForm {
    #[serde(default)]
    pub nome: String,
    #[serde(default)]
    pub servicos: Vec<String>,
    #[serde(default)]
    pub detalhes: String,
}

pub async fn budget_form(State(state): State<AppState>) -> Html<String> {
    Html(render_budget_page(&state, &BudgetForm::default(), None))
}

/// Redirect to WhatsApp with the composed message, or show the form again
pub async fn submit_budget(
    State(state): State<AppState>,
    Form(form): Form<BudgetForm>,
) -> Response {
    if form.nome.trim().is_empty() {
        return Html(render_budget_page(&state, &form, Some(NAME_REQUIRED))).into_response();
    }

    let result = BudgetRequest::from_form(&form.nome, &form.servicos, &form.detalhes)
        .and_then(|request| request.whatsapp_url(&state.config.site.whatsapp_number));

    match result {
        Ok(url) => {
            info!("Budget request composed for {} service(s)", form.servicos.len());
            see_other(&url)
        }
        Err(e) => {
            warn!("Budget form rejected: {}", e);
            let message = e.to_string();
            Html(render_budget_page(&state, &form, Some(&message))).into_response()
        }
    }
}

fn render_budget_page(state: &AppState, form: &BudgetForm, error: Option<&str>) -> String {
    let selected: Vec<Category> = form
        .servicos
        .iter()
        .filter_map(|s| Category::parse(s))
        .collect();

    let checkboxes: String = Category::all()
        .iter()
        .map(|c| {
            let checked = if selected.contains(c) { " checked" } else { "" };
            format!(
                r#"<label class="card"><input type="checkbox" name="servicos" value="{slug}"{checked}> <strong>{label}</strong><br><small>{summary}</small></label>"#,
                slug = c.slug(),
                checked = checked,
                label = c.label(),
                summary = c.summary(),
            )
        })
        .collect();

    let alert = error
        .map(|msg| format!(r#"<div class="alert" role="alert">{}</div>"#, escape(msg)))
        .unwrap_or_default();

    let content = format!(
        r#"<section><div class="container">
<h1>Solicite seu Orçamento</h1>
<p>Selecione os serviços que você precisa e entraremos em contato</p>
{alert}
<form class="stack" method="post" action="/orcamento">
<div class="grid">{checkboxes}</div>
<label>Seu nome <input type="text" name="nome" value="{nome}" placeholder="Digite seu nome" required></label>
<label>Detalhes do serviço <textarea name="detalhes" rows="4" placeholder="Ex: Preciso instalar 5 tomadas na sala e trocar o quadro de luz">{detalhes}</textarea></label>
<button class="btn" type="submit">Enviar pelo WhatsApp</button>
</form>
<h3>Por que escolher a Oriani?</h3>
<ul>
<li>Profissionais qualificados e experientes</li>
<li>Orçamento sem compromisso</li>
<li>Atendimento rápido e pontual</li>
<li>Garantia de qualidade nos serviços</li>
<li>Preços justos e transparentes</li>
</ul>
</div></section>"#,
        alert = alert,
        checkboxes = checkboxes,
        nome = escape(&form.nome),
        detalhes = escape(&form.detalhes),
    );

    render_page(
        &state.config.site,
        &PageMeta {
            title: "Solicite seu Orçamento",
            description: "Peça um orçamento sem compromisso pelo WhatsApp",
            keywords: None,
            nav: Nav::Budget,
        },
        &content,
    )
}
