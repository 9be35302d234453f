//! # HTTP Surface
//! Axum router and handlers. The analyze endpoint is the only one that
//! touches the analyzer handle; `/health` and `/` stay cheap and never
//! trigger model construction.

use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::Html,
    routing::{get, post},
    Json, Router,
};
use metrics::counter;
use serde::{Deserialize, Serialize};
use tower_http::cors::CorsLayer;
use tracing::{debug, error};

use crate::analyzer::{shared_analyzer, AnalyzerHandle};
use crate::report::SentimentReport;

/// Landing page served from disk when deployed alongside the binary.
const INDEX_PATH: &str = "static/index.html";

/// Inline fallback when no static page ships with the process.
const FALLBACK_INDEX: &str = r#"<html>
    <head><title>Review Sentiment</title></head>
    <body style="font-family: Arial; text-align: center; padding: 50px; background: linear-gradient(135deg, #667eea 0%, #764ba2 100%); color: white; min-height: 100vh; display: flex; align-items: center; justify-content: center; margin: 0;">
        <div>
            <h1 style="font-size: 4rem; margin-bottom: 1rem;">Review Sentiment</h1>
            <p style="font-size: 1.5rem;">An&aacute;lisis de Sentimientos de Rese&ntilde;as</p>
        </div>
    </body>
</html>
"#;

/// Shared app state used by Axum.
#[derive(Clone)]
pub struct AppState {
    pub analyzer: Arc<AnalyzerHandle>,
}

impl AppState {
    /// Default wiring: the process-wide lazily-built analyzer.
    pub fn from_env() -> Self {
        Self {
            analyzer: Arc::new(AnalyzerHandle::lazy(Box::new(shared_analyzer))),
        }
    }

    /// Explicit handle, used by tests to inject stub classifiers.
    pub fn with_handle(handle: AnalyzerHandle) -> Self {
        Self {
            analyzer: Arc::new(handle),
        }
    }
}

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/health", get(health))
        .route("/analyze-sentiment", post(analyze_sentiment))
        .layer(CorsLayer::very_permissive())
        .with_state(state)
}

#[derive(Deserialize)]
pub struct AnalyzeRequest {
    pub review_text: String,
}

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    service: &'static str,
}

async fn analyze_sentiment(
    State(state): State<AppState>,
    Json(body): Json<AnalyzeRequest>,
) -> Result<Json<SentimentReport>, (StatusCode, String)> {
    let analyzer = state.analyzer.get().map_err(|e| {
        error!(error = ?e, "sentiment analyzer unavailable");
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            "sentiment analyzer unavailable".to_string(),
        )
    })?;

    let id = anon_hash(&body.review_text);
    let report = analyzer.analyze(&body.review_text).await.map_err(|e| {
        error!(%id, error = ?e, "analysis failed");
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            "analysis failed".to_string(),
        )
    })?;

    counter!("reviews_analyzed_total").increment(1);
    debug!(
        %id,
        label = %report.sentiment_analysis.label,
        stars = report.sentiment_analysis.score_1_to_5,
        "review analyzed"
    );
    Ok(Json(report))
}

/// Liveness only. Must not touch the analyzer handle: probing platforms hit
/// this before any traffic and must not pay for model construction.
async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        service: "Sentiment Analyzer",
    })
}

async fn index() -> Html<String> {
    match tokio::fs::read_to_string(INDEX_PATH).await {
        Ok(page) => Html(page),
        Err(_) => Html(FALLBACK_INDEX.to_string()),
    }
}

/// Short anonymized id for log lines. Raw review text is never logged.
pub(crate) fn anon_hash(text: &str) -> String {
    use sha2::{Digest, Sha256};
    let mut hasher = Sha256::new();
    hasher.update(text.as_bytes());
    let digest = hasher.finalize();
    let mut out = String::with_capacity(12);
    for b in digest.iter().take(6) {
        use std::fmt::Write as _;
        let _ = write!(&mut out, "{:02x}", b);
    }
    out
}
