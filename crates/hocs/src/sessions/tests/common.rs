use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use axum::response::Response;
use chrono::{DateTime, TimeZone, Utc};
use serde_json::Value;

use crate::property::{
    LookupError, NormalizedAddress, PropertyDataSource, PropertyRecord, SyntheticPropertySource,
    WildfireZone,
};
use crate::sessions::{
    ManualClock, MemorySessionRepository, RepositoryError, SavingsService, Session, SessionId,
    SessionRepository, SessionStore,
};

pub(super) const TTL: Duration = Duration::from_secs(24 * 60 * 60);
pub(super) const PASADENA: &str = "123 Main St, Pasadena, CA 91101";

pub(super) fn start() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 3, 1, 12, 0, 0)
        .single()
        .expect("valid instant")
}

pub(super) fn property() -> PropertyRecord {
    PropertyRecord {
        address: PASADENA.to_string(),
        year_built: 1965,
        square_feet: 1850,
        bedrooms: 3,
        bathrooms: 2.0,
        lot_size: 6500,
        last_sale_price: 850_000,
        assessed_value: 780_000,
        property_tax_estimate: 8_580,
        electric_provider: Some("Pasadena Water & Power".to_string()),
        gas_provider: Some("Southern California Gas Company".to_string()),
        water_provider: Some("Pasadena Water & Power".to_string()),
        wildfire_zone: WildfireZone::Medium,
        roof_age: 18,
        solar_feasibility_score: 85,
        permit_history: Vec::new(),
    }
}

pub(super) fn build_store() -> (
    SessionStore<MemorySessionRepository>,
    Arc<MemorySessionRepository>,
    Arc<ManualClock>,
) {
    let repository = Arc::new(MemorySessionRepository::new());
    let clock = Arc::new(ManualClock::new(start()));
    let store = SessionStore::with_clock(repository.clone(), TTL, clock.clone());
    (store, repository, clock)
}

pub(super) fn build_service<S>(
    source: Arc<S>,
) -> (
    SavingsService<MemorySessionRepository, S>,
    Arc<MemorySessionRepository>,
    Arc<ManualClock>,
)
where
    S: PropertyDataSource + 'static,
{
    let (store, repository, clock) = build_store();
    let service = SavingsService::new(Arc::new(store), source);
    (service, repository, clock)
}

pub(super) fn synthetic_service() -> (
    SavingsService<MemorySessionRepository, SyntheticPropertySource>,
    Arc<MemorySessionRepository>,
    Arc<ManualClock>,
) {
    build_service(Arc::new(SyntheticPropertySource::new()))
}

/// Fails with an upstream error for the first `failures` calls.
pub(super) struct FlakySource {
    failures: u32,
    calls: AtomicU32,
    inner: SyntheticPropertySource,
}

impl FlakySource {
    pub(super) fn new(failures: u32) -> Self {
        Self {
            failures,
            calls: AtomicU32::new(0),
            inner: SyntheticPropertySource::new(),
        }
    }

    pub(super) fn calls(&self) -> u32 {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl PropertyDataSource for FlakySource {
    async fn fetch(&self, address: &NormalizedAddress) -> Result<PropertyRecord, LookupError> {
        let call = self.calls.fetch_add(1, Ordering::SeqCst);
        if call < self.failures {
            return Err(LookupError::Upstream("assessor feed timed out".to_string()));
        }
        self.inner.fetch(address).await
    }
}

/// Always answers with the same record regardless of address.
pub(super) struct FixedSource(pub(super) PropertyRecord);

#[async_trait]
impl PropertyDataSource for FixedSource {
    async fn fetch(&self, _address: &NormalizedAddress) -> Result<PropertyRecord, LookupError> {
        Ok(self.0.clone())
    }
}

#[derive(Default)]
pub(super) struct ConflictRepository {
    pub(super) inserts: AtomicU32,
}

impl SessionRepository for ConflictRepository {
    fn insert(&self, _session: Session) -> Result<Session, RepositoryError> {
        self.inserts.fetch_add(1, Ordering::SeqCst);
        Err(RepositoryError::Conflict)
    }

    fn update(&self, _session: Session) -> Result<(), RepositoryError> {
        Err(RepositoryError::NotFound)
    }

    fn fetch(&self, _id: &SessionId) -> Result<Option<Session>, RepositoryError> {
        Ok(None)
    }

    fn remove(&self, _id: &SessionId) -> Result<bool, RepositoryError> {
        Ok(false)
    }

    fn ping(&self) -> Result<(), RepositoryError> {
        Ok(())
    }
}

pub(super) struct UnavailableRepository;

impl SessionRepository for UnavailableRepository {
    fn insert(&self, _session: Session) -> Result<Session, RepositoryError> {
        Err(RepositoryError::Unavailable("session backend offline".to_string()))
    }

    fn update(&self, _session: Session) -> Result<(), RepositoryError> {
        Err(RepositoryError::Unavailable("session backend offline".to_string()))
    }

    fn fetch(&self, _id: &SessionId) -> Result<Option<Session>, RepositoryError> {
        Err(RepositoryError::Unavailable("session backend offline".to_string()))
    }

    fn remove(&self, _id: &SessionId) -> Result<bool, RepositoryError> {
        Err(RepositoryError::Unavailable("session backend offline".to_string()))
    }

    fn ping(&self) -> Result<(), RepositoryError> {
        Err(RepositoryError::Unavailable("session backend offline".to_string()))
    }
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 1024 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
