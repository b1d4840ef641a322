use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use chrono::{Local, NaiveDate};
use serde::Deserialize;
use serde_json::json;

use super::domain::{Person, Product};
use super::report::EvaluationReport;
use super::BadgeRunner;

/// Researcher payload: either a complete aggregate or raw products to aggregate.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum PersonPayload {
    Aggregate(Person),
    Products { id: String, products: Vec<Product> },
}

impl PersonPayload {
    pub fn into_person(self) -> Person {
        match self {
            PersonPayload::Aggregate(person) => person,
            PersonPayload::Products { id, products } => Person::aggregate(id, products),
        }
    }
}

/// Evaluation body: the person payload itself plus optional report inputs.
#[derive(Debug, Clone, Deserialize)]
pub struct EvaluationRequest {
    #[serde(flatten)]
    pub person: PersonPayload,
    #[serde(default)]
    pub reference_scores: Vec<f64>,
    #[serde(default)]
    pub today: Option<NaiveDate>,
}

/// Router exposing the badge legend and the evaluation endpoint.
pub fn badge_router(runner: Arc<BadgeRunner>) -> Router {
    Router::new()
        .route("/api/v1/badges", get(catalog_handler))
        .route("/api/v1/badges/evaluate", post(evaluate_handler))
        .route("/api/v1/badges/:name", get(describe_handler))
        .with_state(runner)
}

pub(crate) async fn catalog_handler(State(runner): State<Arc<BadgeRunner>>) -> Response {
    let badges = runner.catalog().list_all();
    (StatusCode::OK, axum::Json(json!({ "badges": badges }))).into_response()
}

pub(crate) async fn describe_handler(
    State(runner): State<Arc<BadgeRunner>>,
    Path(name): Path<String>,
) -> Response {
    match runner.catalog().describe(&name) {
        Some(descriptor) => (StatusCode::OK, axum::Json(descriptor)).into_response(),
        None => {
            let payload = json!({
                "error": format!("unknown badge '{name}'"),
            });
            (StatusCode::NOT_FOUND, axum::Json(payload)).into_response()
        }
    }
}

pub(crate) async fn evaluate_handler(
    State(runner): State<Arc<BadgeRunner>>,
    axum::Json(request): axum::Json<EvaluationRequest>,
) -> Response {
    let EvaluationRequest {
        person,
        reference_scores,
        today,
    } = request;

    let person = person.into_person();
    let today = today.unwrap_or_else(|| Local::now().date_naive());

    match EvaluationReport::build(&runner, &person, &reference_scores, today) {
        Ok(report) => (StatusCode::OK, axum::Json(report)).into_response(),
        Err(error) => {
            let payload = json!({
                "error": error.to_string(),
            });
            (StatusCode::UNPROCESSABLE_ENTITY, axum::Json(payload)).into_response()
        }
    }
}
