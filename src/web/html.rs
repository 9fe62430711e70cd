//! Small helpers for building HTML with `format!`

use axum::http::{header::LOCATION, StatusCode};
use axum::response::{IntoResponse, Response};

/// Escape text for use in element content and quoted attribute values
pub fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Percent-encode a path segment or query value
pub fn url_component(s: &str) -> String {
    urlencoding::encode(s).into_owned()
}

/// `src` attribute value for a stored image. Only data URLs of images pass.
pub fn image_src(data_url: &str) -> String {
    if data_url.starts_with("data:image/") {
        escape(data_url)
    } else {
        String::new()
    }
}

/// 302 to `location`
pub fn redirect(location: &str) -> Response {
    redirect_with(StatusCode::FOUND, location)
}

/// 303 to `location`, used after form posts that leave the site
pub fn see_other(location: &str) -> Response {
    redirect_with(StatusCode::SEE_OTHER, location)
}

fn redirect_with(status: StatusCode, location: &str) -> Response {
    (status, [(LOCATION, location.to_string())]).into_response()
}

/// Render an option list, marking `selected` when it matches
pub fn options<'a, I>(values: I, selected: Option<&str>) -> String
where
    I: IntoIterator<Item = (&'a str, &'a str)>,
{
    values
        .into_iter()
        .map(|(value, label)| {
            let marker = if Some(value) == selected { " selected" } else { "" };
            format!(
                r#"<option value="{}"{}>{}</option>"#,
                escape(value),
                marker,
                escape(label)
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape() {
        assert_eq!(
            escape(r#"<script>alert("x & 'y'")</script>"#),
            "&lt;script&gt;alert(&quot;x &amp; &#39;y&#39;&quot;)&lt;/script&gt;"
        );
        assert_eq!(escape("Elétrica"), "Elétrica");
        // Already-escaped text is escaped again, not passed through
        assert_eq!(escape("&amp;"), "&amp;amp;");
    }

    #[test]
    fn test_image_src_only_allows_image_data_urls() {
        assert_eq!(image_src("data:image/png;base64,AAAA"), "data:image/png;base64,AAAA");
        assert_eq!(image_src("javascript:alert(1)"), "");
        assert_eq!(image_src(r#"data:image/png;base64,A"onload="x"#), "data:image/png;base64,A&quot;onload=&quot;x");
    }

    #[test]
    fn test_url_component() {
        assert_eq!(url_component("Montagem de Móveis"), "Montagem%20de%20M%C3%B3veis");
    }

    #[test]
    fn test_redirects() {
        let response = redirect("/admin");
        assert_eq!(response.status(), StatusCode::FOUND);
        assert_eq!(response.headers()[LOCATION], "/admin");

        assert_eq!(see_other("https://wa.me/1").status(), StatusCode::SEE_OTHER);
    }

    #[test]
    fn test_options_marks_selection() {
        let html = options([("a", "A"), ("b", "B")], Some("b"));
        assert_eq!(html, r#"<option value="a">A</option><option value="b" selected>B</option>"#);
    }
}
