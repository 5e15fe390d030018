use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::response::Response;
use chrono::{DateTime, TimeZone, Utc};
use serde_json::Value;

use crate::property::{PropertyRecord, WildfireZone};
use crate::reports::{
    DeliveryError, MemorySubscriptionStore, RenderError, ReportEmail, ReportMailer,
    ReportRenderer, ReportService, ReportView,
};
use crate::savings::OpportunityGenerator;
use crate::sessions::{Session, SessionId};

pub(super) const PDF_BYTES: &[u8] = b"%PDF-1.4 action plan";

pub(super) fn generated_at() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 3, 1, 12, 0, 0)
        .single()
        .expect("valid instant")
}

pub(super) fn property() -> PropertyRecord {
    PropertyRecord {
        address: "123 Main St, Pasadena, CA 91101".to_string(),
        year_built: 1965,
        square_feet: 1850,
        bedrooms: 3,
        bathrooms: 2.0,
        lot_size: 6500,
        last_sale_price: 850_000,
        assessed_value: 880_000,
        property_tax_estimate: 9_680,
        electric_provider: Some("Pasadena Water & Power".to_string()),
        gas_provider: Some("Southern California Gas Company".to_string()),
        water_provider: Some("Pasadena Water & Power".to_string()),
        wildfire_zone: WildfireZone::Medium,
        roof_age: 18,
        solar_feasibility_score: 85,
        permit_history: Vec::new(),
    }
}

pub(super) fn view() -> ReportView {
    let property = property();
    let opportunities = OpportunityGenerator::standard()
        .generate(&property)
        .expect("valid property");
    let session = Session {
        session_id: SessionId("report-session".to_string()),
        property,
        opportunities,
        plan: None,
        created_at: generated_at(),
        expires_at: generated_at() + chrono::Duration::hours(24),
    };
    ReportView::from_session(&session, generated_at())
}

#[derive(Default)]
pub(super) struct StubRenderer {
    calls: AtomicU32,
    crashes_left: AtomicU32,
}

impl StubRenderer {
    /// The first `crashes` renders fail the way a dying converter does.
    pub(super) fn crashing_first(crashes: u32) -> Self {
        Self {
            calls: AtomicU32::new(0),
            crashes_left: AtomicU32::new(crashes),
        }
    }

    pub(super) fn calls(&self) -> u32 {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ReportRenderer for StubRenderer {
    async fn render(&self, _view: &ReportView) -> Result<Vec<u8>, RenderError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let crashed = self
            .crashes_left
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |left| left.checked_sub(1))
            .is_ok();
        if crashed {
            return Err(RenderError::Conversion("converter exited with 1".to_string()));
        }
        Ok(PDF_BYTES.to_vec())
    }
}

pub(super) struct FailingRenderer;

#[async_trait]
impl ReportRenderer for FailingRenderer {
    async fn render(&self, _view: &ReportView) -> Result<Vec<u8>, RenderError> {
        Err(RenderError::Conversion("converter crashed".to_string()))
    }
}

#[derive(Default)]
pub(super) struct RecordingMailer {
    sent: Mutex<Vec<ReportEmail>>,
    attempts: AtomicU32,
    drops_left: AtomicU32,
}

impl RecordingMailer {
    /// The first `drops` sends fail with a transport error.
    pub(super) fn dropping_first(drops: u32) -> Self {
        Self {
            drops_left: AtomicU32::new(drops),
            ..Self::default()
        }
    }

    pub(super) fn sent(&self) -> Vec<ReportEmail> {
        self.sent.lock().expect("mailer lock").clone()
    }

    pub(super) fn attempts(&self) -> u32 {
        self.attempts.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ReportMailer for RecordingMailer {
    async fn send(&self, email: &ReportEmail) -> Result<String, DeliveryError> {
        self.attempts.fetch_add(1, Ordering::SeqCst);
        let dropped = self
            .drops_left
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |left| left.checked_sub(1))
            .is_ok();
        if dropped {
            return Err(DeliveryError::Transport("connection reset".to_string()));
        }

        let mut sent = self.sent.lock().expect("mailer lock");
        sent.push(email.clone());
        Ok(format!("email-{}", sent.len()))
    }
}

pub(super) struct RejectingMailer;

#[async_trait]
impl ReportMailer for RejectingMailer {
    async fn send(&self, _email: &ReportEmail) -> Result<String, DeliveryError> {
        Err(DeliveryError::Rejected {
            status: 422,
            body: "invalid from address".to_string(),
        })
    }
}

pub(super) struct Harness {
    pub(super) service: ReportService,
    pub(super) renderer: Arc<StubRenderer>,
    pub(super) mailer: Arc<RecordingMailer>,
    pub(super) subscriptions: Arc<MemorySubscriptionStore>,
}

pub(super) fn harness() -> Harness {
    let renderer = Arc::new(StubRenderer::default());
    let mailer = Arc::new(RecordingMailer::default());
    let subscriptions = Arc::new(MemorySubscriptionStore::new());
    let service = ReportService::new(renderer.clone(), mailer.clone(), subscriptions.clone());
    Harness {
        service,
        renderer,
        mailer,
        subscriptions,
    }
}

pub(super) fn service_with(
    renderer: Arc<dyn ReportRenderer>,
    mailer: Arc<dyn ReportMailer>,
) -> (ReportService, Arc<MemorySubscriptionStore>) {
    let subscriptions = Arc::new(MemorySubscriptionStore::new());
    let service = ReportService::new(renderer, mailer, subscriptions.clone());
    (service, subscriptions)
}

pub(super) async fn read_body(response: Response) -> Vec<u8> {
    axum::body::to_bytes(response.into_body(), 1024 * 1024)
        .await
        .expect("read body")
        .to_vec()
}

pub(super) async fn read_json_body(response: Response) -> Value {
    serde_json::from_slice(&read_body(response).await).expect("json payload")
}
