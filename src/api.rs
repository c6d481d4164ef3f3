//! HTTP surface for the student service.
//!
//! - `POST /students` – Create a record from `{name, age, email}`; responds `201` with the record.
//! - `GET /students` – List every record as a JSON array (`[]` when empty).
//! - `GET /students/{id}` – Fetch one record.
//! - `PUT /students/{id}` – Partially update a record; empty or zero fields are ignored.
//! - `DELETE /students/{id}` – Remove a record; responds `204`.
//! - `GET /students/{id}/summary` – Relay the upstream model's raw JSON summary of a record.
//!
//! Success bodies are JSON. Errors are short plain-text messages.

use crate::students::{StudentApi, StudentError, StudentId};
use crate::summary::SummaryError;
use axum::{
    Json, Router,
    body::Bytes,
    extract::{Path, State},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::sync::Arc;
use tower_http::trace::TraceLayer;

/// Build the HTTP router exposing the student API surface.
pub fn create_router<S>(service: Arc<S>) -> Router
where
    S: StudentApi + 'static,
{
    Router::new()
        .route(
            "/students",
            post(create_student::<S>).get(list_students::<S>),
        )
        .route(
            "/students/:id",
            get(get_student::<S>)
                .put(update_student::<S>)
                .delete(delete_student::<S>),
        )
        .route("/students/:id/summary", get(summarize_student::<S>))
        .layer(TraceLayer::new_for_http())
        .with_state(service)
}

/// Parse a path identifier. Anything non-numeric becomes `0`, which never matches a record.
fn parse_id(raw: &str) -> StudentId {
    raw.parse().unwrap_or(0)
}

/// Decode a JSON object body without insisting on a content type.
///
/// Arrays and scalars are rejected even where the target type could be built from them.
fn parse_body<T: DeserializeOwned>(body: &[u8]) -> Result<T, AppError> {
    let reject = |reason: &dyn std::fmt::Display| {
        tracing::debug!(%reason, "Rejected request body");
        AppError(StudentError::InvalidInput)
    };
    match serde_json::from_slice::<Value>(body) {
        Ok(object @ Value::Object(_)) => {
            serde_json::from_value(object).map_err(|error| reject(&error))
        }
        Ok(_) => Err(reject(&"body is not a JSON object")),
        Err(error) => Err(reject(&error)),
    }
}

/// Validate and store a new student record.
async fn create_student<S>(
    State(service): State<Arc<S>>,
    body: Bytes,
) -> Result<impl IntoResponse, AppError>
where
    S: StudentApi,
{
    let new_student = parse_body(&body)?;
    let student = service.create_student(new_student).await?;
    Ok((StatusCode::CREATED, Json(student)))
}

/// List every stored student record.
async fn list_students<S>(State(service): State<Arc<S>>) -> impl IntoResponse
where
    S: StudentApi,
{
    Json(service.list_students().await)
}

/// Fetch a single student record.
async fn get_student<S>(
    State(service): State<Arc<S>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError>
where
    S: StudentApi,
{
    Ok(Json(service.get_student(parse_id(&id)).await?))
}

/// Apply a partial update to an existing student record.
async fn update_student<S>(
    State(service): State<Arc<S>>,
    Path(id): Path<String>,
    body: Bytes,
) -> Result<impl IntoResponse, AppError>
where
    S: StudentApi,
{
    let patch = parse_body(&body)?;
    Ok(Json(service.update_student(parse_id(&id), patch).await?))
}

/// Remove a student record.
async fn delete_student<S>(
    State(service): State<Arc<S>>,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError>
where
    S: StudentApi,
{
    service.delete_student(parse_id(&id)).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Relay the upstream model's summary of a student record.
async fn summarize_student<S>(
    State(service): State<Arc<S>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError>
where
    S: StudentApi,
{
    let body = service.summarize_student(parse_id(&id)).await?;
    Ok(([(header::CONTENT_TYPE, "application/json")], body))
}

struct AppError(StudentError);

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match &self.0 {
            StudentError::InvalidInput | StudentError::InvalidData => {
                (StatusCode::BAD_REQUEST, self.0.to_string())
            }
            StudentError::NotFound(_) => (StatusCode::NOT_FOUND, self.0.to_string()),
            StudentError::Summary(SummaryError::Timeout(_)) => (
                StatusCode::GATEWAY_TIMEOUT,
                "Summary generation timed out".to_string(),
            ),
            StudentError::Summary(SummaryError::Transport(_)) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Error generating summary".to_string(),
            ),
            StudentError::Summary(SummaryError::ReadBody(_)) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Error reading summary response".to_string(),
            ),
        };
        (status, message).into_response()
    }
}

impl From<StudentError> for AppError {
    fn from(inner: StudentError) -> Self {
        Self(inner)
    }
}
