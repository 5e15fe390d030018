use async_trait::async_trait;
use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::config::ReportConfig;
use crate::sessions::SessionId;

pub const RESEND_EMAILS_ENDPOINT: &str = "https://api.resend.com/emails";
pub const REPORT_ATTACHMENT_NAME: &str = "HOCS_Action_Plan.pdf";
pub const REPORT_SUBJECT: &str = "Your HOCS Visibility-First Action Plan";

/// One outgoing report email.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportEmail {
    pub to: String,
    pub session_id: SessionId,
    pub pdf: Vec<u8>,
    pub opt_in: bool,
    pub generated_at: DateTime<Utc>,
}

#[derive(Debug, thiserror::Error)]
pub enum DeliveryError {
    #[error("email delivery is not configured; set RESEND_API_KEY")]
    NotConfigured,
    #[error("email transport failed: {0}")]
    Transport(String),
    #[error("email provider rejected the message ({status}): {body}")]
    Rejected { status: u16, body: String },
}

impl DeliveryError {
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Transport(_))
    }
}

impl From<reqwest::Error> for DeliveryError {
    fn from(value: reqwest::Error) -> Self {
        Self::Transport(value.to_string())
    }
}

/// Sends a rendered report. Returns the provider's message id.
#[async_trait]
pub trait ReportMailer: Send + Sync {
    async fn send(&self, email: &ReportEmail) -> Result<String, DeliveryError>;
}

/// Mailer backed by the Resend HTTP API.
#[derive(Debug, Clone)]
pub struct ResendMailer {
    client: reqwest::Client,
    api_key: String,
    from: String,
    endpoint: String,
}

#[derive(Debug, Deserialize)]
struct ResendResponse {
    #[serde(default)]
    id: Option<String>,
}

impl ResendMailer {
    pub fn new(api_key: impl Into<String>, from: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key: api_key.into(),
            from: from.into(),
            endpoint: RESEND_EMAILS_ENDPOINT.to_string(),
        }
    }

    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    /// `None` when no API key is configured.
    pub fn from_config(config: &ReportConfig) -> Option<Self> {
        config
            .resend_api_key
            .as_deref()
            .filter(|key| !key.trim().is_empty())
            .map(|key| Self::new(key, config.email_from.clone()))
    }

    pub(crate) fn payload(&self, email: &ReportEmail) -> Value {
        json!({
            "from": self.from,
            "to": [email.to],
            "subject": REPORT_SUBJECT,
            "html": email_body(email),
            "attachments": [{
                "filename": REPORT_ATTACHMENT_NAME,
                "content": STANDARD.encode(&email.pdf),
            }],
        })
    }
}

#[async_trait]
impl ReportMailer for ResendMailer {
    async fn send(&self, email: &ReportEmail) -> Result<String, DeliveryError> {
        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(&self.payload(email))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::warn!(status = status.as_u16(), "resend rejected report email");
            return Err(DeliveryError::Rejected {
                status: status.as_u16(),
                body,
            });
        }

        let receipt: ResendResponse = response.json().await?;
        let id = receipt.id.unwrap_or_default();
        tracing::info!(session_id = %email.session_id, email_id = %id, "report email sent");
        Ok(id)
    }
}

/// Stand-in used when no provider key is configured.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnconfiguredMailer;

#[async_trait]
impl ReportMailer for UnconfiguredMailer {
    async fn send(&self, _email: &ReportEmail) -> Result<String, DeliveryError> {
        Err(DeliveryError::NotConfigured)
    }
}

/// Loose shape check: something before the `@`, a dotted domain after it.
pub fn is_valid_email(email: &str) -> bool {
    if email.len() <= 5 || email.chars().any(char::is_whitespace) {
        return false;
    }
    let Some(at) = email.find('@') else {
        return false;
    };
    if at == 0 || at == email.len() - 1 {
        return false;
    }
    let domain = &email[at + 1..];
    !domain.contains('@')
        && domain.contains('.')
        && !domain.starts_with('.')
        && !domain.ends_with('.')
}

pub fn email_body(email: &ReportEmail) -> String {
    let subscribed = if email.opt_in {
        "<p><strong>You're subscribed!</strong> We'll let you know when new programs and \
         opportunities become available in your area.</p>"
    } else {
        ""
    };

    format!(
        r#"<html>
<body style="font-family: Arial, sans-serif; line-height: 1.6; color: #333;">
  <div style="max-width: 600px; margin: 0 auto; padding: 20px;">
    <h2 style="color: #1e40af;">Your HOCS Action Plan is Ready!</h2>
    <p>Thank you for using HOCS (Home Ownership Cost Savings).</p>
    <p>Your personalized action plan is attached. It will help you:</p>
    <ul>
      <li>See where your home's energy and water dollars go</li>
      <li>Start with free programs and professional assessments</li>
      <li>Decide on upgrades using your own usage data</li>
      <li>Put money into the upgrades with the best return first</li>
    </ul>
    <h3 style="color: #1e40af;">Getting Started</h3>
    <p>Begin with the <strong>free</strong> items to establish a baseline, then compare
    monthly bills as you work through the rest of the plan.</p>
    {subscribed}
    <p>Questions? Reply to this email and we'll be happy to help.</p>
    <p style="margin-top: 30px;">Best regards,<br><strong>The HOCS Team</strong></p>
    <hr style="border: none; border-top: 1px solid #ddd; margin: 30px 0;">
    <p style="font-size: 12px; color: #666;">
      Session ID: {session_id}<br>
      Generated: {generated}
    </p>
  </div>
</body>
</html>"#,
        session_id = email.session_id,
        generated = email.generated_at.format("%B %d, %Y at %I:%M %p UTC"),
    )
}
