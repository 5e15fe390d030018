use std::sync::Arc;

use axum::http::StatusCode;
use serde::Serialize;

use crate::sessions::{RepositoryError, SavingsServiceError};

use super::delivery::{is_valid_email, DeliveryError, ReportEmail, ReportMailer};
use super::render::{RenderError, ReportRenderer};
use super::subscriptions::{Subscription, SubscriptionStore};
use super::view::ReportView;

#[derive(Debug, thiserror::Error)]
pub enum ReportError {
    #[error("'{0}' is not a valid email address")]
    InvalidEmail(String),
    #[error(transparent)]
    Session(#[from] SavingsServiceError),
    #[error(transparent)]
    Render(#[from] RenderError),
    #[error(transparent)]
    Delivery(#[from] DeliveryError),
    #[error("subscription could not be saved: {0}")]
    Subscription(#[from] RepositoryError),
}

impl ReportError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::InvalidEmail(_) => StatusCode::BAD_REQUEST,
            Self::Session(err) => err.status_code(),
            Self::Render(_) | Self::Delivery(_) => StatusCode::BAD_GATEWAY,
            Self::Subscription(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Render(err) => err.is_retryable(),
            Self::Delivery(err) => err.is_retryable(),
            Self::InvalidEmail(_) | Self::Session(_) | Self::Subscription(_) => false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeliveryReceipt {
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email_id: Option<String>,
    pub subscribed: bool,
}

/// Renders reports and hands them to the mailer.
#[derive(Clone)]
pub struct ReportService {
    renderer: Arc<dyn ReportRenderer>,
    mailer: Arc<dyn ReportMailer>,
    subscriptions: Arc<dyn SubscriptionStore>,
}

impl ReportService {
    pub fn new(
        renderer: Arc<dyn ReportRenderer>,
        mailer: Arc<dyn ReportMailer>,
        subscriptions: Arc<dyn SubscriptionStore>,
    ) -> Self {
        Self {
            renderer,
            mailer,
            subscriptions,
        }
    }

    pub async fn render_pdf(&self, view: &ReportView) -> Result<Vec<u8>, ReportError> {
        Ok(self.renderer.render(view).await?)
    }

    /// Validates the address, renders, sends, then records the opt-in.
    /// A failed send leaves no subscription behind.
    pub async fn email_report(
        &self,
        view: &ReportView,
        email: &str,
        opt_in: bool,
    ) -> Result<DeliveryReceipt, ReportError> {
        let email = email.trim();
        if !is_valid_email(email) {
            return Err(ReportError::InvalidEmail(email.to_string()));
        }

        let pdf = self.renderer.render(view).await?;
        let outgoing = ReportEmail {
            to: email.to_string(),
            session_id: view.session_id.clone(),
            pdf,
            opt_in,
            generated_at: view.generated_at,
        };
        let email_id = self.mailer.send(&outgoing).await?;

        if opt_in {
            self.subscriptions.upsert(Subscription {
                email: email.to_string(),
                session_id: view.session_id.clone(),
                subscribed_at: view.generated_at,
                active: true,
            })?;
            tracing::info!(session_id = %view.session_id, "update subscription recorded");
        }

        Ok(DeliveryReceipt {
            message: format!("Report sent successfully to {email}"),
            email_id: Some(email_id).filter(|id| !id.is_empty()),
            subscribed: opt_in,
        })
    }
}

impl std::fmt::Debug for ReportService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReportService").finish_non_exhaustive()
    }
}
