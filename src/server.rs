use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Form, Json, Router};
use serde::Deserialize;
use tracing::{error, info};

use crate::analytics::LogStats;
use crate::audit::AuditLog;
use crate::types::VerificationResult;
use crate::verification::Verifier;

#[derive(Clone)]
pub struct AppState {
    pub verifier: Arc<Verifier>,
    pub audit: Arc<AuditLog>,
}

#[derive(Deserialize)]
pub struct PredictForm {
    #[serde(default)]
    pub news: String,
}

#[derive(Deserialize)]
pub struct VerifyRequest {
    pub text: String,
}

async fn verify_and_record(state: &AppState, text: &str) -> VerificationResult {
    let result = state.verifier.verify(text).await;
    state.audit.record(result.verdict, text).await;
    result
}

pub async fn index(State(state): State<AppState>) -> Html<String> {
    let accuracy = state
        .verifier
        .classifier()
        .model_accuracy()
        .map_or("unavailable".to_string(), |a| format!("{:.2}%", a * 100.0));
    Html(page(&format!(
        r#"<form method="post" action="/predict">
<textarea name="news" rows="10" cols="80"></textarea>
<button type="submit">Check</button>
</form>
<p>Model accuracy: {accuracy}</p>"#
    )))
}

pub async fn predict(State(state): State<AppState>, Form(form): Form<PredictForm>) -> Html<String> {
    let result = verify_and_record(&state, &form.news).await;
    Html(page(&render_result(&result)))
}

#[axum::debug_handler]
pub async fn api_verify(State(state): State<AppState>, Json(req): Json<VerifyRequest>) -> Json<VerificationResult> {
    Json(verify_and_record(&state, &req.text).await)
}

pub async fn insights(State(state): State<AppState>) -> Response {
    match LogStats::from_path(state.audit.path()).await {
        Ok(stats) => Json(stats).into_response(),
        Err(e) => {
            error!(path = %state.audit.path().display(), error = %e, "failed to read audit log");
            (StatusCode::INTERNAL_SERVER_ERROR, "audit log unreadable").into_response()
        }
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/predict", post(predict))
        .route("/api/verify", post(api_verify))
        .route("/insights", get(insights))
        .with_state(state)
}

pub async fn run_server(state: AppState, addr: &str) -> anyhow::Result<()> {
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(addr = %listener.local_addr()?, "listening");
    axum::serve(listener, router(state)).await?;
    Ok(())
}

fn page(body: &str) -> String {
    format!("<!doctype html>\n<html><head><title>newsverdict</title></head><body>\n{body}\n</body></html>\n")
}

fn render_result(r: &VerificationResult) -> String {
    let mut html = format!(
        "<h1>{}</h1>\n<p>{}</p>\n<blockquote>{}</blockquote>\n",
        r.verdict,
        escape(&r.reason),
        escape(&r.text)
    );
    if r.red_flags.any() {
        let flags = [
            ("sensational language", r.red_flags.sensational_language),
            ("unreliable source", r.red_flags.unreliable_source),
            ("clickbait phrases", r.red_flags.clickbait_phrases),
            ("poor grammar", r.red_flags.poor_grammar),
        ];
        let raised: Vec<&str> = flags.iter().filter(|(_, on)| *on).map(|(name, _)| *name).collect();
        html.push_str(&format!("<p>Red flags: {}</p>\n", raised.join(", ")));
    }
    if !r.entity_verification.is_empty() {
        html.push_str("<ul>\n");
        for v in &r.entity_verification {
            html.push_str(&format!(
                "<li>{} {} / {}: {}",
                if v.verified() { "&#10003;" } else { "&#10007;" },
                escape(&v.person),
                escape(&v.location),
                escape(&v.reason)
            ));
            if let Some(links) = r.fact_check_links.get(&format!("{} {}", v.person, v.location)) {
                let anchors: Vec<String> = links
                    .iter()
                    .map(|(site, url)| format!(r#"<a href="{}">{}</a>"#, escape(url), escape(site)))
                    .collect();
                html.push_str(&format!(" ({})", anchors.join(" ")));
            }
            html.push_str("</li>\n");
        }
        html.push_str("</ul>\n");
    }
    html.push_str(r#"<p><a href="/">Check another</a></p>"#);
    html
}

fn escape(s: &str) -> String {
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
