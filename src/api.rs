//! HTTP API for the form-style UI boundary
//!
//! Exposes the predefined city list for the form, the planning endpoint
//! returning a renderable plan, and the PDF export endpoint emitting a
//! downloadable byte stream.

use std::sync::Arc;

use axum::{
    extract::State,
    http::{header, StatusCode},
    response::{IntoResponse, Json},
    routing::{get, post},
    Router,
};
use tracing::error;

use crate::models::{TripPlan, TripRequest};
use crate::pdf::PdfExporter;
use crate::planner::TripPlanner;
use crate::TripPlannerError;

/// Shared handler state
#[derive(Clone)]
pub struct AppState {
    pub planner: Arc<TripPlanner>,
    pub exporter: Arc<PdfExporter>,
}

/// Build the API router
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/cities", get(get_cities))
        .route("/plan", post(create_plan))
        .route("/plan/pdf", post(create_plan_pdf))
        .with_state(state)
}

async fn get_cities(State(state): State<AppState>) -> Json<Vec<String>> {
    Json(state.planner.predefined_cities().to_vec())
}

async fn create_plan(
    State(state): State<AppState>,
    Json(request): Json<TripRequest>,
) -> Result<Json<TripPlan>, (StatusCode, String)> {
    let plan = state
        .planner
        .plan(&request)
        .await
        .map_err(error_response)?;
    Ok(Json(plan))
}

async fn create_plan_pdf(
    State(state): State<AppState>,
    Json(request): Json<TripRequest>,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    let plan = state
        .planner
        .plan(&request)
        .await
        .map_err(error_response)?;

    let bytes = state.exporter.export(&plan).map_err(error_response)?;

    Ok((
        [
            (header::CONTENT_TYPE, "application/pdf".to_string()),
            (
                header::CONTENT_DISPOSITION,
                "attachment; filename=\"trip_itinerary.pdf\"".to_string(),
            ),
        ],
        bytes,
    ))
}

/// Map application errors to HTTP responses with user-facing messages
fn error_response(err: TripPlannerError) -> (StatusCode, String) {
    error!(%err, "Request failed");
    let status = match &err {
        TripPlannerError::Validation { .. } => StatusCode::BAD_REQUEST,
        TripPlannerError::Llm { .. } => StatusCode::BAD_GATEWAY,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    };
    (status, err.user_message())
}
