//! Server-side HTML for the predictor page.
//!
//! Every response is a full page: header, then either the input form plus an
//! optional output region, or a lone error when the model is unavailable.

use std::fmt::Write;

use adoption_inference::{FeatureVector, FormError, Prediction, FEATURE_LABELS, FEATURE_NAMES};

pub const PAGE_TITLE: &str = "Renewable Adoption Predictor";

/// What goes in the output region under the Predict button.
pub enum Outcome<'a> {
    Idle,
    Card(&'a Prediction),
    Failed(&'a FormError),
}

/// The form with `values` in the inputs.
pub fn form_page(values: &FeatureVector, outcome: Outcome<'_>) -> String {
    let mut body = String::new();
    body.push_str(r#"<form method="post" action="/predict">"#);
    body.push_str(r#"<div class="input-card"><h2>🔧 Input Parameters</h2><div class="grid">"#);
    for ((name, label), value) in FEATURE_NAMES
        .iter()
        .zip(FEATURE_LABELS.iter())
        .zip(values.to_array())
    {
        let _ = write!(
            body,
            r#"<label for="{name}">{label}<input type="number" id="{name}" name="{name}" "#
        );
        let _ = write!(body, r#"step="any" value="{value:.6}"></label>"#);
    }
    body.push_str("</div></div>");
    body.push_str(r#"<div class="actions"><button type="submit">🔍 Predict</button></div>"#);
    body.push_str("</form>");

    match outcome {
        Outcome::Idle => {}
        Outcome::Card(prediction) => body.push_str(&result_card(prediction)),
        Outcome::Failed(err) => body.push_str(&error_block(err)),
    }

    layout(&body)
}

/// The page shown when the model could not be loaded: no inputs, no button.
pub fn unavailable_page(err: &FormError) -> String {
    layout(&error_block(err))
}

pub fn result_card(prediction: &Prediction) -> String {
    let (class, icon) = if prediction.is_adoption() {
        ("result-card", "✅")
    } else {
        ("result-card-warn", "⚠️")
    };
    format!(
        r#"<div class="{class}"><h3>{icon} {}</h3></div>"#,
        escape(&prediction.text)
    )
}

pub fn error_block(err: &FormError) -> String {
    let mut out = format!(
        r#"<div class="error" role="alert">{}</div>"#,
        escape(&err.to_string())
    );
    if let Some(detail) = err.detail() {
        let _ = write!(out, r#"<pre class="error-detail">{}</pre>"#, escape(&detail));
    }
    out
}

fn layout(body: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>{PAGE_TITLE}</title>
<link rel="stylesheet" href="/static/style.css">
</head>
<body>
<main class="main">
<h1 class="title">⚡ Renewable Energy Adoption Predictor</h1>
<p class="subtitle">Enter 4 numeric inputs and get a simple Adoption / No Adoption output.</p>
{body}
<footer><hr><p>Built with ❤️ using actix-web</p></footer>
</main>
</body>
</html>
"#
    )
}

fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
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
