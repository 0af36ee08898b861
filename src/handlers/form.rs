use axum::{extract::State, response::Html};
use std::sync::Arc;

use crate::utils::logging::*;
use crate::AppState;

const FICHA_TEMPLATE: &str = include_str!("../../templates/ficha.html");
const OPTIONS_PLACEHOLDER: &str = "{{OPCOES_EMPREENDIMENTOS}}";

/// GET / - Formulário da ficha com a lista de empreendimentos configurada
pub async fn render_form(State(state): State<Arc<AppState>>) -> Html<String> {
    log_request_received("/", "GET");
    Html(render_template(&state.settings.form.empreendimentos))
}

pub fn render_template(empreendimentos: &[String]) -> String {
    let options = empreendimentos
        .iter()
        .map(|opcao| {
            let escaped = escape_html(opcao);
            format!(r#"<option value="{0}">{0}</option>"#, escaped)
        })
        .collect::<Vec<_>>()
        .join("\n                ");

    FICHA_TEMPLATE.replace(OPTIONS_PLACEHOLDER, &options)
}

fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
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
