use std::sync::Arc;

use axum::{
    extract::State,
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::post,
    Json, Router,
};
use serde::Deserialize;
use serde_json::json;

use crate::property::PropertyDataSource;
use crate::retry::RetryPolicy;
use crate::sessions::{SavingsService, SessionId, SessionRepository};

use super::delivery::REPORT_ATTACHMENT_NAME;
use super::service::{ReportError, ReportService};

pub struct ReportRoutesState<R, S> {
    pub savings: Arc<SavingsService<R, S>>,
    pub reports: Arc<ReportService>,
    pub retry: RetryPolicy,
}

impl<R, S> Clone for ReportRoutesState<R, S> {
    fn clone(&self) -> Self {
        Self {
            savings: Arc::clone(&self.savings),
            reports: Arc::clone(&self.reports),
            retry: self.retry,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PdfReportRequest {
    pub session_id: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmailReportRequest {
    pub session_id: String,
    pub email: String,
    #[serde(default)]
    pub opt_in_updates: bool,
}

/// Render and delivery failures the collaborators mark transient are retried
/// under `retry`; the session lookup itself runs once.
pub fn report_router<R, S>(
    savings: Arc<SavingsService<R, S>>,
    reports: Arc<ReportService>,
    retry: RetryPolicy,
) -> Router
where
    R: SessionRepository + 'static,
    S: PropertyDataSource + 'static,
{
    Router::new()
        .route("/api/v1/reports/pdf", post(pdf_handler::<R, S>))
        .route("/api/v1/reports/email", post(email_handler::<R, S>))
        .with_state(ReportRoutesState {
            savings,
            reports,
            retry,
        })
}

fn report_error_response(error: &ReportError) -> Response {
    let status = error.status_code();
    if status.is_server_error() {
        tracing::error!(%error, status = status.as_u16(), "report request failed");
    } else {
        tracing::debug!(%error, status = status.as_u16(), "report request rejected");
    }
    (status, Json(json!({ "error": error.to_string() }))).into_response()
}

pub(crate) async fn pdf_handler<R, S>(
    State(state): State<ReportRoutesState<R, S>>,
    Json(request): Json<PdfReportRequest>,
) -> Response
where
    R: SessionRepository + 'static,
    S: PropertyDataSource + 'static,
{
    let view = match state.savings.report_view(&SessionId(request.session_id)) {
        Ok(view) => view,
        Err(error) => return report_error_response(&error.into()),
    };

    let reports = &state.reports;
    let view = &view;
    let outcome = state
        .retry
        .run("report_render", ReportError::is_retryable, move || {
            reports.render_pdf(view)
        })
        .await;

    match outcome {
        Ok(pdf) => (
            StatusCode::OK,
            [
                (header::CONTENT_TYPE, mime::APPLICATION_PDF.to_string()),
                (
                    header::CONTENT_DISPOSITION,
                    format!("attachment; filename=\"{REPORT_ATTACHMENT_NAME}\""),
                ),
            ],
            pdf,
        )
            .into_response(),
        Err(error) => report_error_response(&error),
    }
}

pub(crate) async fn email_handler<R, S>(
    State(state): State<ReportRoutesState<R, S>>,
    Json(request): Json<EmailReportRequest>,
) -> Response
where
    R: SessionRepository + 'static,
    S: PropertyDataSource + 'static,
{
    let view = match state.savings.report_view(&SessionId(request.session_id)) {
        Ok(view) => view,
        Err(error) => return report_error_response(&error.into()),
    };

    let reports = &state.reports;
    let view = &view;
    let email = request.email.as_str();
    let opt_in = request.opt_in_updates;
    let outcome = state
        .retry
        .run("report_email", ReportError::is_retryable, move || {
            reports.email_report(view, email, opt_in)
        })
        .await;

    match outcome {
        Ok(receipt) => (StatusCode::OK, Json(receipt)).into_response(),
        Err(error) => report_error_response(&error),
    }
}
