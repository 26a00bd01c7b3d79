//! Integration tests for the REST API feature.

#![cfg(feature = "api")]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use tower::util::ServiceExt;

use plts_sizer::api::{AppState, router};
use plts_sizer::config::ScenarioConfig;
use plts_sizer::sizing::evaluate;

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn post_json(uri: &str, json: String) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(json))
        .unwrap()
}

async fn body_json(resp: axum::response::Response) -> serde_json::Value {
    let body = axum::body::to_bytes(resp.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&body).unwrap()
}

#[tokio::test]
async fn session_evaluation_matches_library() {
    let scenario = ScenarioConfig::home_hybrid();
    let expected = evaluate(&scenario.load_list(), &scenario.to_parameters().unwrap()).unwrap();
    let state = Arc::new(AppState::new(scenario));

    let resp = router(state).oneshot(get("/evaluation")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let json = body_json(resp).await;

    let sizing = expected.sizing.unwrap();
    assert_eq!(json["kind"], "hybrid");
    assert_eq!(json["sizing"]["panel"]["count"], sizing.panel.count);
    assert_eq!(json["sizing"]["investment"]["total"], sizing.investment.total);
    assert_eq!(json["sizing"]["controller"]["builtin"], true);
}

#[tokio::test]
async fn scenario_reflects_session_loads() {
    let state = Arc::new(AppState::new(ScenarioConfig::cabin_off_grid()));

    let resp = router(state.clone())
        .oneshot(post_json(
            "/loads",
            r#"{"name":"Radio","power_w":15,"hours_per_day":4}"#.to_string(),
        ))
        .await
        .unwrap();
    let json = body_json(resp).await;
    assert_eq!(json["accepted"], true);
    assert_eq!(json["count"], 5);

    let json = body_json(router(state).oneshot(get("/scenario")).await.unwrap()).await;
    let loads = json["loads"].as_array().unwrap();
    assert_eq!(loads.len(), 5);
    assert_eq!(loads[4]["name"], "Radio");
    assert_eq!(loads[4]["quantity"], 1);
    assert_eq!(json["system"]["kind"], "off_grid");
}

#[tokio::test]
async fn posted_scenario_is_evaluated_statelessly() {
    let state = Arc::new(AppState::new(ScenarioConfig::default()));
    let posted = serde_json::to_string(&ScenarioConfig::cabin_off_grid()).unwrap();

    let resp = router(state.clone())
        .oneshot(post_json("/evaluate", posted))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let json = body_json(resp).await;
    assert_eq!(json["kind"], "off_grid");
    assert!(json["sizing"]["payback_years"].is_null());
    assert!(json["sizing"]["battery"]["units"].as_u64().unwrap() >= 1);

    let json = body_json(router(state).oneshot(get("/loads")).await.unwrap()).await;
    assert_eq!(json.as_array().map(Vec::len), Some(0));
}

#[tokio::test]
async fn unknown_route_returns_404() {
    let state = Arc::new(AppState::new(ScenarioConfig::default()));
    let resp = router(state).oneshot(get("/nonexistent")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}
