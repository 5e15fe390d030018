use std::sync::{Arc, Mutex};
use std::time::Duration;

use chrono::{DateTime, Utc};

use crate::property::PropertyRecord;
use crate::savings::SavingsOpportunity;

use super::domain::{Session, SessionId, SessionUpdate};
use super::repository::{RepositoryError, SessionRepository};

/// Time source for expiry decisions.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Clock that only moves when told to.
#[derive(Debug)]
pub struct ManualClock {
    now: Mutex<DateTime<Utc>>,
}

impl ManualClock {
    pub fn new(start: DateTime<Utc>) -> Self {
        Self {
            now: Mutex::new(start),
        }
    }

    pub fn set(&self, instant: DateTime<Utc>) {
        if let Ok(mut now) = self.now.lock() {
            *now = instant;
        }
    }

    pub fn advance(&self, by: chrono::Duration) {
        if let Ok(mut now) = self.now.lock() {
            *now += by;
        }
    }
}

impl Clock for ManualClock {
    fn now(&self) -> DateTime<Utc> {
        match self.now.lock() {
            Ok(now) => *now,
            Err(poisoned) => *poisoned.into_inner(),
        }
    }
}

const MAX_ID_ATTEMPTS: usize = 3;

/// Expiring session lifecycle on top of a [`SessionRepository`].
pub struct SessionStore<R> {
    repository: Arc<R>,
    clock: Arc<dyn Clock>,
    ttl: chrono::Duration,
}

impl<R> SessionStore<R>
where
    R: SessionRepository + 'static,
{
    pub fn new(repository: Arc<R>, ttl: Duration) -> Self {
        Self::with_clock(repository, ttl, Arc::new(SystemClock))
    }

    pub fn with_clock(repository: Arc<R>, ttl: Duration, clock: Arc<dyn Clock>) -> Self {
        let ttl =
            chrono::Duration::from_std(ttl).unwrap_or_else(|_| chrono::Duration::weeks(52 * 100));
        Self {
            repository,
            clock,
            ttl,
        }
    }

    pub fn now(&self) -> DateTime<Utc> {
        self.clock.now()
    }

    pub fn repository(&self) -> &Arc<R> {
        &self.repository
    }

    pub fn create(
        &self,
        property: PropertyRecord,
        opportunities: Vec<SavingsOpportunity>,
    ) -> Result<Session, SessionError> {
        let created_at = self.clock.now();
        let expires_at = created_at
            .checked_add_signed(self.ttl)
            .unwrap_or(DateTime::<Utc>::MAX_UTC);

        let mut attempt = 1;
        loop {
            let session = Session {
                session_id: SessionId::generate(),
                property: property.clone(),
                opportunities: opportunities.clone(),
                plan: None,
                created_at,
                expires_at,
            };

            match self.repository.insert(session) {
                Ok(stored) => {
                    tracing::info!(
                        session_id = %stored.session_id,
                        expires_at = %stored.expires_at,
                        opportunities = stored.opportunities.len(),
                        "session created"
                    );
                    return Ok(stored);
                }
                Err(RepositoryError::Conflict) if attempt < MAX_ID_ATTEMPTS => {
                    tracing::warn!(attempt, "session id collision, regenerating");
                    attempt += 1;
                }
                Err(error) => return Err(error.into()),
            }
        }
    }

    /// Fetches a live session. Expired records are removed and reported as missing.
    pub fn get(&self, id: &SessionId) -> Result<Session, SessionError> {
        let session = self
            .repository
            .fetch(id)?
            .ok_or_else(|| SessionError::NotFound(id.clone()))?;

        if session.is_valid_at(self.clock.now()) {
            return Ok(session);
        }

        self.repository.remove(id)?;
        tracing::info!(session_id = %id, expired_at = %session.expires_at, "session expired");
        Err(SessionError::NotFound(id.clone()))
    }

    /// Merges `update` into a live session. Expiry is never extended.
    pub fn update(&self, id: &SessionId, update: SessionUpdate) -> Result<Session, SessionError> {
        let mut session = self.get(id)?;
        update.apply(&mut session);

        match self.repository.update(session.clone()) {
            Ok(()) => Ok(session),
            Err(RepositoryError::NotFound) => Err(SessionError::NotFound(id.clone())),
            Err(error) => Err(error.into()),
        }
    }

    pub fn delete(&self, id: &SessionId) -> Result<(), SessionError> {
        if self.repository.remove(id)? {
            tracing::info!(session_id = %id, "session deleted");
        }
        Ok(())
    }

    pub fn ping(&self) -> Result<(), SessionError> {
        Ok(self.repository.ping()?)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SessionError {
    #[error("session '{0}' not found or expired")]
    NotFound(SessionId),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}
