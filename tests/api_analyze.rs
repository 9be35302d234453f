// tests/api_analyze.rs

use std::sync::Arc;

use axum::{
    body::{to_bytes, Body},
    http::{Request, StatusCode},
    Router,
};
use tower::ServiceExt; // for `oneshot` (tower 0.5 with features=["util"])

use review_sentiment_service::{
    AnalyzerHandle, AppState, Classification, FixedClassifier, Probabilities, ReviewAnalyzer,
};

fn app_with_fixed(label: &str, probabilities: Probabilities) -> Router {
    let analyzer = Arc::new(ReviewAnalyzer::new(Arc::new(FixedClassifier::new(
        Classification {
            label: label.to_string(),
            probabilities,
        },
    ))));
    review_sentiment_service::create_router(AppState::with_handle(AnalyzerHandle::preloaded(
        analyzer,
    )))
}

fn analyze_request(body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/analyze-sentiment")
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

#[tokio::test]
async fn analyze_returns_the_exact_wire_shape() {
    let app = app_with_fixed(
        "POS",
        Probabilities {
            positive: 0.95,
            negative: 0.03,
            neutral: 0.02,
        },
    );

    let resp = app
        .oneshot(analyze_request(r#"{"review_text":"Genial"}"#))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    let bytes = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    let v: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(
        v,
        serde_json::json!({
            "review_data": {
                "text_original": "Genial",
                "text_processed": "Genial"
            },
            "sentiment_analysis": {
                "label": "POS",
                "score_1_to_5": 5,
                "probabilities": {
                    "positive": 95.0,
                    "negative": 3.0,
                    "neutral": 2.0
                }
            },
            "summary": {
                "puntuacion_estrellas": "5/5 ⭐",
                "polaridad_completa": {
                    "POS": "Positiva",
                    "NEG": "No Negativa",
                    "NEU": "No Neutral"
                }
            }
        })
    );
}

#[tokio::test]
async fn unknown_model_label_still_answers_with_neutral_rating() {
    let app = app_with_fixed(
        "SARCASM",
        Probabilities {
            positive: 0.99,
            negative: 0.0,
            neutral: 0.01,
        },
    );

    let resp = app
        .oneshot(analyze_request(r#"{"review_text":"claro, 'buenisimo'"}"#))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    let bytes = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    let v: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(v["sentiment_analysis"]["label"], "SARCASM");
    assert_eq!(v["sentiment_analysis"]["score_1_to_5"], 3);
    assert_eq!(v["summary"]["polaridad_completa"]["POS"], "No Positiva");
}

#[tokio::test]
async fn malformed_body_is_rejected_before_the_pipeline() {
    let app = app_with_fixed("NEU", Probabilities::default());

    // Wrong shape: valid JSON without review_text.
    let resp = app
        .clone()
        .oneshot(analyze_request(r#"{"texto":"hola"}"#))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);

    // Not JSON at all.
    let resp = app.oneshot(analyze_request("review_text=hola")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn empty_review_is_accepted() {
    let app = app_with_fixed(
        "NEU",
        Probabilities {
            positive: 0.1,
            negative: 0.1,
            neutral: 0.8,
        },
    );

    let resp = app
        .oneshot(analyze_request(r#"{"review_text":""}"#))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    let bytes = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    let v: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(v["review_data"]["text_original"], "");
    assert_eq!(v["sentiment_analysis"]["score_1_to_5"], 3);
}

#[tokio::test]
async fn lexicon_end_to_end_scores_a_spanish_review() {
    use review_sentiment_service::config::ClassifierConfig;
    use review_sentiment_service::lexicon::LexiconClassifier;

    let classifier = LexiconClassifier::from_config(&ClassifierConfig::default()).unwrap();
    let analyzer = Arc::new(ReviewAnalyzer::new(Arc::new(classifier)));
    let app = review_sentiment_service::create_router(AppState::with_handle(
        AnalyzerHandle::preloaded(analyzer),
    ));

    let resp = app
        .oneshot(analyze_request(
            r#"{"review_text":"Me encanta, excelente calidad y envío rápido @tienda 😍"}"#,
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    let bytes = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    let v: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(v["sentiment_analysis"]["label"], "POS");
    let stars = v["sentiment_analysis"]["score_1_to_5"].as_u64().unwrap();
    assert!(stars >= 4, "expected a positive rating, got {stars}");
    // Mentions are anonymized before the text reaches the model.
    let processed = v["review_data"]["text_processed"].as_str().unwrap();
    assert!(processed.contains("@usuario"), "processed: {processed}");
    assert!(!processed.contains("@tienda"), "processed: {processed}");
}

#[tokio::test]
async fn health_reports_the_fixed_payload() {
    let app = app_with_fixed("NEU", Probabilities::default());

    let resp = app
        .oneshot(
            Request::builder()
                .method("GET")
                .uri("/health")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    let bytes = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    let v: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(
        v,
        serde_json::json!({"status": "ok", "service": "Sentiment Analyzer"})
    );
}

#[tokio::test]
async fn index_serves_a_landing_page() {
    let app = app_with_fixed("NEU", Probabilities::default());

    let resp = app
        .oneshot(
            Request::builder()
                .method("GET")
                .uri("/")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    let bytes = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    let page = String::from_utf8(bytes.to_vec()).unwrap();
    assert!(page.contains("<html"), "body: {page}");
}
