use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::extract::{Path, State};
use axum::http::{header, Request, StatusCode};
use axum::response::Response;
use serde_json::{json, Value};
use tower::ServiceExt;

use super::common::*;
use crate::badges::router::{badge_router, describe_handler, evaluate_handler, EvaluationRequest};

async fn read_json_body(response: Response) -> Value {
    let body = to_bytes(response.into_body(), 1024 * 1024)
        .await
        .expect("body readable");
    serde_json::from_slice(&body).expect("json body")
}

fn evaluate_request(payload: &Value) -> Request<Body> {
    Request::post("/api/v1/badges/evaluate")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(
            serde_json::to_vec(payload).expect("payload serializes"),
        ))
        .expect("request builds")
}

#[tokio::test]
async fn catalog_route_lists_every_badge() {
    let router = badge_router(Arc::new(runner()));

    let response = router
        .oneshot(
            Request::get("/api/v1/badges")
                .body(Body::empty())
                .expect("request builds"),
        )
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json_body(response).await;
    let badges = payload["badges"].as_array().expect("badge list");
    assert_eq!(badges.len(), 28);
    assert_eq!(badges[0]["group"], "f1000_type");
}

#[tokio::test]
async fn describe_handler_returns_not_found_for_unknown_badge() {
    let response = describe_handler(
        State(Arc::new(runner())),
        Path("golden_goose".to_string()),
    )
    .await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let payload = read_json_body(response).await;
    assert_eq!(payload["error"], "unknown badge 'golden_goose'");
}

#[tokio::test]
async fn describe_route_returns_descriptor() {
    let router = badge_router(Arc::new(runner()));

    let response = router
        .oneshot(
            Request::get("/api/v1/badges/pacific_rim")
                .body(Body::empty())
                .expect("request builds"),
        )
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json_body(response).await;
    assert_eq!(payload["display_name"], "Pacific rim");
    assert_eq!(payload["is_for_products"], true);
}

#[tokio::test]
async fn evaluate_route_aggregates_raw_products() {
    let router = badge_router(Arc::new(runner()));
    let payload = json!({
        "id": "0000-0001-5109-3700",
        "products": [
            { "id": "p1", "altmetric_score": 50.0, "year": 2015, "countries": ["Japan"] },
            { "id": "p2", "altmetric_score": 5.0, "year": 2009 }
        ],
        "reference_scores": [1.0, 100.0],
        "today": "2026-02-14"
    });

    let response = router
        .oneshot(evaluate_request(&payload))
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::OK);
    let report = read_json_body(response).await;
    assert_eq!(report["person_id"], "0000-0001-5109-3700");
    assert_eq!(report["evaluated_on"], "2026-02-14");
    assert_eq!(report["badge_count"], 4);
    assert_eq!(report["score_percentile"], 0.5);

    let names: Vec<&str> = report["badges"]
        .as_array()
        .expect("badges")
        .iter()
        .filter_map(|badge| badge["name"].as_str())
        .collect();
    assert_eq!(
        names,
        vec!["big_in_japan", "clean_sweep", "baby_steps", "one_hit_wonder"]
    );
    assert_eq!(report["badges"][0]["product_ids"], json!(["p1"]));
}

#[tokio::test]
async fn evaluate_handler_rejects_unknown_country_codes() {
    let request: EvaluationRequest = serde_json::from_value(json!({
        "id": "0000-0001-5109-3700",
        "products": [
            {
                "id": "p1",
                "altmetric_score": 3.0,
                "year": 2015,
                "post_counts_by_country": { "ZZ": 2 }
            }
        ]
    }))
    .expect("request parses");

    let response = evaluate_handler(State(Arc::new(runner())), axum::Json(request)).await;

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let payload = read_json_body(response).await;
    assert_eq!(
        payload["error"],
        "no country reference entry for ISO code 'ZZ'"
    );
}

#[tokio::test]
async fn evaluate_route_accepts_bare_person_aggregate() {
    let router = badge_router(Arc::new(runner()));
    let mut aggregate = person(vec![
        with_countries(product("p1", 50.0, 2015), &["Japan"]),
        product("p2", 5.0, 2009),
    ]);
    let payload = serde_json::to_value(&aggregate).expect("aggregate serializes");

    let response = router
        .oneshot(evaluate_request(&payload))
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::OK);
    let report = read_json_body(response).await;
    assert_eq!(report["person_id"], "0000-0002-1825-0097");
    assert_eq!(report["badge_count"], 4);
    assert!(report.get("score_percentile").is_none());
}

#[test]
fn evaluation_request_keeps_report_inputs_beside_the_person() {
    let request: EvaluationRequest = serde_json::from_value(json!({
        "id": "0000-0001-5109-3700",
        "products": [],
        "reference_scores": [4.0, 2.0],
        "today": "2026-07-01"
    }))
    .expect("request parses");

    assert_eq!(request.reference_scores, vec![4.0, 2.0]);
    assert_eq!(request.today.map(|day| day.to_string()).as_deref(), Some("2026-07-01"));
    let person = request.person.into_person();
    assert_eq!(person.id.0, "0000-0001-5109-3700");
    assert!(person.products.is_empty());
}
