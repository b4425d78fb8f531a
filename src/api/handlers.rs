//! HTTP request handlers for the salary engine API.

use axum::{
    Json, Router,
    extract::{Path, State, rejection::JsonRejection},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use chrono::NaiveDate;
use tracing::{info, warn};
use uuid::Uuid;

use crate::engine::ENGINE_VERSION;
use crate::models::{EmployeeId, RESULT_SCHEMA_VERSION};

use super::request::CalculationRequest;
use super::response::{ApiError, ApiErrorResponse};
use super::state::AppState;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/calculations", post(calculate_handler))
        .route("/results/:employee_id/:period_start", get(result_handler))
        .route("/health", get(health_handler))
        .with_state(state)
}

fn json_response<T: serde::Serialize>(status: StatusCode, body: T) -> Response {
    (status, [(header::CONTENT_TYPE, "application/json")], Json(body)).into_response()
}

fn error_response(error: ApiErrorResponse) -> Response {
    json_response(error.status, error.error)
}

/// Handler for POST /calculations.
///
/// Runs a department calculation and returns the full run, audit traces
/// included. The run itself is blocking and is moved off the async runtime.
async fn calculate_handler(
    State(state): State<AppState>,
    payload: Result<Json<CalculationRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing calculation request");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => {
            let error = match rejection {
                JsonRejection::JsonDataError(err) => {
                    let body_text = err.body_text();
                    warn!(correlation_id = %correlation_id, error = %body_text, "JSON data error");
                    if body_text.contains("missing field") {
                        ApiError::new("VALIDATION_ERROR", body_text)
                    } else {
                        ApiError::malformed_json(body_text)
                    }
                }
                JsonRejection::JsonSyntaxError(err) => {
                    warn!(correlation_id = %correlation_id, error = %err, "JSON syntax error");
                    ApiError::malformed_json(format!("Invalid JSON syntax: {}", err))
                }
                JsonRejection::MissingJsonContentType(_) => {
                    ApiError::new("MISSING_CONTENT_TYPE", "Content-Type must be application/json")
                }
                _ => ApiError::malformed_json("Failed to parse request body"),
            };
            return json_response(StatusCode::BAD_REQUEST, error);
        }
    };

    let period = match request.period() {
        Ok(period) => period,
        Err(err) => {
            warn!(correlation_id = %correlation_id, error = %err, "Invalid period");
            return error_response(err.into());
        }
    };

    let calculator = state.calculator();
    let department_id = request.department_id;
    let first_calculation = request.first_calculation;
    let outcome = tokio::task::spawn_blocking(move || {
        calculator.run_calculation(department_id, &period, first_calculation)
    })
    .await;

    match outcome {
        Ok(Ok(run)) => {
            info!(
                correlation_id = %correlation_id,
                run_id = %run.run_id,
                department_id,
                employees = run.employees.len(),
                duration_us = run.duration_us,
                "Calculation completed successfully"
            );
            json_response(StatusCode::OK, run)
        }
        Ok(Err(err)) => {
            warn!(correlation_id = %correlation_id, error = %err, "Calculation failed");
            error_response(err.into())
        }
        Err(join_error) => {
            warn!(correlation_id = %correlation_id, error = %join_error, "Calculation task failed");
            error_response(ApiErrorResponse::new(
                StatusCode::INTERNAL_SERVER_ERROR,
                ApiError::new("CALCULATION_ERROR", "Calculation task did not complete"),
            ))
        }
    }
}

/// Handler for GET /results/:employee_id/:period_start.
async fn result_handler(
    State(state): State<AppState>,
    Path((employee_id, period_start)): Path<(EmployeeId, NaiveDate)>,
) -> Response {
    match state.store().get_result(employee_id, period_start) {
        Ok(Some(result)) => json_response(StatusCode::OK, result),
        Ok(None) => json_response(
            StatusCode::NOT_FOUND,
            ApiError::result_not_found(employee_id, period_start),
        ),
        Err(err) => {
            warn!(employee_id, %period_start, error = %err, "Result lookup failed");
            error_response(err.into())
        }
    }
}

/// Handler for GET /health.
async fn health_handler() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "ok",
        "engine_version": ENGINE_VERSION,
        "result_schema_version": RESULT_SCHEMA_VERSION
    }))
}
