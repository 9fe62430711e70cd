use crate::catalog::Category;
use crate::config::SiteConfig;

use super::html::escape;

/// Navigation entry highlighted in the header
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Nav {
    Home,
    Services,
    Gallery,
    Budget,
    Admin,
    None,
}

/// Page metadata for the `<head>`
pub struct PageMeta<'a> {
    pub title: &'a str,
    pub description: &'a str,
    pub keywords: Option<&'a str>,
    pub nav: Nav,
}

const STYLES: &str = r#"
*{box-sizing:border-box}body{margin:0;font-family:system-ui,-apple-system,"Segoe UI",Roboto,sans-serif;color:#1f2937;background:#fff}
a{color:inherit}.container{max-width:1120px;margin:0 auto;padding:0 1rem}
header{position:sticky;top:0;background:#fff;box-shadow:0 1px 4px rgba(0,0,0,.08);z-index:10}
header nav{display:flex;align-items:center;justify-content:space-between;padding:1rem 0;gap:1rem;flex-wrap:wrap}
.logo{font-weight:800;font-size:1.3rem;text-decoration:none;color:#f97316}
.menu a{margin:0 .6rem;text-decoration:none;color:#374151}.menu a.active{color:#f97316;font-weight:600}
.btn{display:inline-block;background:#f97316;color:#fff;padding:.7rem 1.4rem;border-radius:999px;text-decoration:none;border:0;cursor:pointer;font-weight:600}
.btn.secondary{background:#e5e7eb;color:#1f2937}.btn.danger{background:#dc2626}
.hero{background:linear-gradient(135deg,#fff7ed,#ffedd5);padding:5rem 0;text-align:center}
.hero h1{font-size:2.6rem;margin:0 0 1rem}.hero p{font-size:1.2rem;color:#4b5563}
section{padding:3.5rem 0}h2{text-align:center;font-size:2rem}
.grid{display:grid;gap:1.2rem;grid-template-columns:repeat(auto-fill,minmax(220px,1fr))}
.card{display:block;padding:1.5rem;border:1px solid #f3f4f6;border-radius:.8rem;box-shadow:0 2px 8px rgba(0,0,0,.06);text-decoration:none}
.photo{display:block;aspect-ratio:1;overflow:hidden;border-radius:.6rem;background:#f3f4f6}
.photo img{width:100%;height:100%;object-fit:cover}
.chips{display:flex;flex-wrap:wrap;gap:.5rem;justify-content:center;margin-bottom:2rem}
.chip{padding:.4rem 1rem;border-radius:999px;background:#f3f4f6;text-decoration:none}.chip.active{background:#f97316;color:#fff}
.empty{text-align:center;color:#6b7280;padding:3rem 0}
.lightbox{background:#111827;color:#fff;min-height:80vh;display:flex;flex-direction:column;align-items:center;justify-content:center;padding:2rem;gap:1rem}
.lightbox img{max-width:100%;max-height:70vh}.lightbox nav{display:flex;gap:1rem}
.alert{padding:.8rem 1rem;border-radius:.5rem;background:#fee2e2;color:#991b1b;margin-bottom:1rem}
form.stack{display:flex;flex-direction:column;gap:.8rem;max-width:560px}
input,select,textarea{padding:.6rem;border:1px solid #d1d5db;border-radius:.4rem;font:inherit}
table{width:100%;border-collapse:collapse}td,th{padding:.5rem;border-bottom:1px solid #e5e7eb;text-align:left;vertical-align:top}
footer{background:#111827;color:#d1d5db;padding:3rem 0 1.5rem}footer a{text-decoration:none}
footer .cols{display:grid;gap:2rem;grid-template-columns:repeat(auto-fit,minmax(200px,1fr))}
footer .copy{border-top:1px solid #374151;margin-top:2rem;padding-top:1rem;text-align:center;color:#9ca3af}
"#;

/// Wrap page content in the shared header and footer
pub fn render_page(site: &SiteConfig, meta: &PageMeta<'_>, content: &str) -> String {
    let keywords = meta
        .keywords
        .map(|k| format!(r#"<meta name="keywords" content="{}">"#, escape(k)))
        .unwrap_or_default();

    format!(
        r#"<!DOCTYPE html>
<html lang="pt-BR">
<head>
<meta charset="UTF-8">
<meta name="viewport" content="width=device-width, initial-scale=1.0">
<title>{title} | {business}</title>
<meta name="description" content="{description}">
{keywords}
<style>{STYLES}</style>
</head>
<body>
{header}
<main>
{content}
</main>
{footer}
</body>
</html>"#,
        title = escape(meta.title),
        business = escape(&site.business_name),
        description = escape(meta.description),
        header = render_header(site, meta.nav),
        footer = render_footer(site),
    )
}

fn render_header(site: &SiteConfig, active: Nav) -> String {
    let link = |nav: Nav, href: &str, label: &str| {
        let class = if nav == active { r#" class="active""# } else { "" };
        format!(r#"<a href="{}"{}>{}</a>"#, href, class, label)
    };

    format!(
        r#"<header><div class="container"><nav>
<a class="logo" href="/">{business}</a>
<div class="menu">{home}{services}{gallery}{budget}</div>
<a class="btn" href="/orcamento">Solicitar Orçamento</a>
</nav></div></header>"#,
        business = escape(&site.business_name),
        home = link(Nav::Home, "/", "Início"),
        services = link(Nav::Services, "/#servicos", "Serviços"),
        gallery = link(Nav::Gallery, "/galeria", "Galeria"),
        budget = link(Nav::Budget, "/orcamento", "Orçamento"),
    )
}

fn render_footer(site: &SiteConfig) -> String {
    let services: String = Category::all()
        .iter()
        .map(|c| format!(r#"<li><a href="/servicos/{}">{}</a></li>"#, c.slug(), c.label()))
        .collect();

    format!(
        r#"<footer><div class="container">
<div class="cols">
<div><strong>{business}</strong><p>Soluções completas para sua casa ou empresa</p></div>
<div><h4>Serviços</h4><ul>{services}</ul></div>
<div><h4>Contato</h4><p>{phone}<br>{email}<br>{city}</p></div>
</div>
<p class="copy">&copy; {business}. Todos os direitos reservados.</p>
</div></footer>"#,
        business = escape(&site.business_name),
        phone = escape(&site.phone),
        email = escape(&site.email),
        city = escape(&site.city),
    )
}
