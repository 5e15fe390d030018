use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;
use serde_json::json;

use crate::property::PropertyDataSource;
use crate::retry::RetryPolicy;

use super::domain::SessionId;
use super::repository::SessionRepository;
use super::service::{SavingsService, SavingsServiceError};

/// Shared handler state: the service plus the boundary retry policy.
pub struct SessionRoutesState<R, S> {
    pub service: Arc<SavingsService<R, S>>,
    pub retry: RetryPolicy,
}

impl<R, S> Clone for SessionRoutesState<R, S> {
    fn clone(&self) -> Self {
        Self {
            service: Arc::clone(&self.service),
            retry: self.retry,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct LookupRequest {
    pub address: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoveFromPlanRequest {
    pub opportunity_id: String,
}

/// Router builder exposing lookup, session, plan, and tier endpoints.
pub fn session_router<R, S>(service: Arc<SavingsService<R, S>>, retry: RetryPolicy) -> Router
where
    R: SessionRepository + 'static,
    S: PropertyDataSource + 'static,
{
    Router::new()
        .route("/api/v1/properties/lookup", post(lookup_handler::<R, S>))
        .route(
            "/api/v1/sessions/:session_id",
            get(session_handler::<R, S>).delete(end_session_handler::<R, S>),
        )
        .route("/api/v1/sessions/:session_id/plan", get(plan_handler::<R, S>))
        .route(
            "/api/v1/sessions/:session_id/plan/remove",
            post(remove_handler::<R, S>),
        )
        .route(
            "/api/v1/sessions/:session_id/plan/reset",
            post(reset_handler::<R, S>),
        )
        .route(
            "/api/v1/sessions/:session_id/tiers",
            get(tiers_handler::<R, S>),
        )
        .with_state(SessionRoutesState { service, retry })
}

pub(crate) fn error_response(error: &SavingsServiceError) -> Response {
    let status = error.status_code();
    if status.is_server_error() {
        tracing::error!(%error, status = status.as_u16(), "request failed");
    } else {
        tracing::debug!(%error, status = status.as_u16(), "request rejected");
    }

    let payload = json!({
        "error": error.to_string(),
    });
    (status, Json(payload)).into_response()
}

pub(crate) async fn lookup_handler<R, S>(
    State(state): State<SessionRoutesState<R, S>>,
    Json(request): Json<LookupRequest>,
) -> Response
where
    R: SessionRepository + 'static,
    S: PropertyDataSource + 'static,
{
    let service = &state.service;
    let address = request.address.as_str();

    let outcome = state
        .retry
        .run("property_lookup", SavingsServiceError::is_retryable, move || {
            service.lookup(address)
        })
        .await;

    match outcome {
        Ok(session) => (StatusCode::CREATED, Json(session.view())).into_response(),
        Err(error) => error_response(&error),
    }
}

pub(crate) async fn session_handler<R, S>(
    State(state): State<SessionRoutesState<R, S>>,
    Path(session_id): Path<String>,
) -> Response
where
    R: SessionRepository + 'static,
    S: PropertyDataSource + 'static,
{
    match state.service.session(&SessionId(session_id)) {
        Ok(session) => (StatusCode::OK, Json(session.view())).into_response(),
        Err(error) => error_response(&error),
    }
}

pub(crate) async fn end_session_handler<R, S>(
    State(state): State<SessionRoutesState<R, S>>,
    Path(session_id): Path<String>,
) -> Response
where
    R: SessionRepository + 'static,
    S: PropertyDataSource + 'static,
{
    match state.service.end_session(&SessionId(session_id)) {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(error) => error_response(&error),
    }
}

pub(crate) async fn plan_handler<R, S>(
    State(state): State<SessionRoutesState<R, S>>,
    Path(session_id): Path<String>,
) -> Response
where
    R: SessionRepository + 'static,
    S: PropertyDataSource + 'static,
{
    match state.service.plan(&SessionId(session_id)) {
        Ok(plan) => (StatusCode::OK, Json(plan)).into_response(),
        Err(error) => error_response(&error),
    }
}

pub(crate) async fn remove_handler<R, S>(
    State(state): State<SessionRoutesState<R, S>>,
    Path(session_id): Path<String>,
    Json(request): Json<RemoveFromPlanRequest>,
) -> Response
where
    R: SessionRepository + 'static,
    S: PropertyDataSource + 'static,
{
    match state
        .service
        .remove_from_plan(&SessionId(session_id), &request.opportunity_id)
    {
        Ok(plan) => (StatusCode::OK, Json(plan)).into_response(),
        Err(error) => error_response(&error),
    }
}

pub(crate) async fn reset_handler<R, S>(
    State(state): State<SessionRoutesState<R, S>>,
    Path(session_id): Path<String>,
) -> Response
where
    R: SessionRepository + 'static,
    S: PropertyDataSource + 'static,
{
    match state.service.reset_plan(&SessionId(session_id)) {
        Ok(plan) => (StatusCode::OK, Json(plan)).into_response(),
        Err(error) => error_response(&error),
    }
}

pub(crate) async fn tiers_handler<R, S>(
    State(state): State<SessionRoutesState<R, S>>,
    Path(session_id): Path<String>,
) -> Response
where
    R: SessionRepository + 'static,
    S: PropertyDataSource + 'static,
{
    match state.service.tiers(&SessionId(session_id)) {
        Ok(breakdown) => (StatusCode::OK, Json(breakdown)).into_response(),
        Err(error) => error_response(&error),
    }
}
