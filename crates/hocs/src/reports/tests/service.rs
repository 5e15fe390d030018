use std::sync::Arc;

use axum::http::StatusCode;

use super::common::*;
use crate::reports::{ReportError, SubscriptionStore, UnconfiguredMailer};

#[tokio::test]
async fn render_pdf_delegates_to_renderer() {
    let harness = harness();

    let pdf = harness.service.render_pdf(&view()).await.expect("rendered");

    assert_eq!(pdf, PDF_BYTES);
    assert_eq!(harness.renderer.calls(), 1);
}

#[tokio::test]
async fn invalid_email_is_rejected_before_rendering() {
    let harness = harness();

    let error = harness
        .service
        .email_report(&view(), "not-an-email", true)
        .await
        .expect_err("invalid address");

    assert!(matches!(error, ReportError::InvalidEmail(_)));
    assert_eq!(error.status_code(), StatusCode::BAD_REQUEST);
    assert_eq!(harness.renderer.calls(), 0);
    assert!(harness.mailer.sent().is_empty());
    assert!(harness.subscriptions.is_empty());
}

#[tokio::test]
async fn opted_in_delivery_records_subscription() {
    let harness = harness();
    let view = view();

    let receipt = harness
        .service
        .email_report(&view, "  owner@example.com ", true)
        .await
        .expect("sent");

    assert_eq!(receipt.message, "Report sent successfully to owner@example.com");
    assert_eq!(receipt.email_id.as_deref(), Some("email-1"));
    assert!(receipt.subscribed);

    let sent = harness.mailer.sent();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].to, "owner@example.com");
    assert_eq!(sent[0].pdf, PDF_BYTES);
    assert_eq!(sent[0].session_id, view.session_id);

    let subscription = harness
        .subscriptions
        .get("owner@example.com")
        .expect("readable")
        .expect("subscribed");
    assert!(subscription.active);
    assert_eq!(subscription.session_id, view.session_id);
    assert_eq!(subscription.subscribed_at, view.generated_at);
}

#[tokio::test]
async fn delivery_without_opt_in_stores_nothing() {
    let harness = harness();

    let receipt = harness
        .service
        .email_report(&view(), "owner@example.com", false)
        .await
        .expect("sent");

    assert!(!receipt.subscribed);
    assert_eq!(harness.mailer.sent().len(), 1);
    assert!(harness.subscriptions.is_empty());
}

#[tokio::test]
async fn failed_delivery_leaves_no_subscription() {
    let (service, subscriptions) =
        service_with(Arc::new(StubRenderer::default()), Arc::new(RejectingMailer));

    let error = service
        .email_report(&view(), "owner@example.com", true)
        .await
        .expect_err("rejected");

    assert!(matches!(error, ReportError::Delivery(_)));
    assert_eq!(error.status_code(), StatusCode::BAD_GATEWAY);
    assert!(subscriptions.is_empty());
}

#[tokio::test]
async fn unconfigured_delivery_is_an_upstream_failure() {
    let (service, _subscriptions) =
        service_with(Arc::new(StubRenderer::default()), Arc::new(UnconfiguredMailer));

    let error = service
        .email_report(&view(), "owner@example.com", false)
        .await
        .expect_err("not configured");

    assert_eq!(error.status_code(), StatusCode::BAD_GATEWAY);
    assert!(error.to_string().contains("RESEND_API_KEY"));
}

#[tokio::test]
async fn render_failures_surface_as_bad_gateway() {
    let mailer = Arc::new(RecordingMailer::default());
    let (service, _subscriptions) = service_with(Arc::new(FailingRenderer), mailer.clone());

    let error = service
        .email_report(&view(), "owner@example.com", false)
        .await
        .expect_err("render failed");

    assert!(matches!(error, ReportError::Render(_)));
    assert_eq!(error.status_code(), StatusCode::BAD_GATEWAY);
    assert!(mailer.sent().is_empty());
}
