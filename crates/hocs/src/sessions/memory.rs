use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};

use super::domain::{Session, SessionId};
use super::repository::{RepositoryError, SessionRepository};

/// Process-local session map.
#[derive(Debug, Default)]
pub struct MemorySessionRepository {
    sessions: RwLock<HashMap<SessionId, Session>>,
}

impl MemorySessionRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.sessions
            .read()
            .map(|sessions| sessions.len())
            .unwrap_or_default()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn poisoned<T>(_: PoisonError<T>) -> RepositoryError {
    RepositoryError::Unavailable("session map lock poisoned".to_string())
}

impl SessionRepository for MemorySessionRepository {
    fn insert(&self, session: Session) -> Result<Session, RepositoryError> {
        let mut sessions = self.sessions.write().map_err(poisoned)?;
        match sessions.entry(session.session_id.clone()) {
            Entry::Occupied(_) => Err(RepositoryError::Conflict),
            Entry::Vacant(slot) => Ok(slot.insert(session).clone()),
        }
    }

    fn update(&self, session: Session) -> Result<(), RepositoryError> {
        let mut sessions = self.sessions.write().map_err(poisoned)?;
        match sessions.get_mut(&session.session_id) {
            Some(existing) => {
                *existing = session;
                Ok(())
            }
            None => Err(RepositoryError::NotFound),
        }
    }

    fn fetch(&self, id: &SessionId) -> Result<Option<Session>, RepositoryError> {
        let sessions = self.sessions.read().map_err(poisoned)?;
        Ok(sessions.get(id).cloned())
    }

    fn remove(&self, id: &SessionId) -> Result<bool, RepositoryError> {
        let mut sessions = self.sessions.write().map_err(poisoned)?;
        Ok(sessions.remove(id).is_some())
    }

    fn ping(&self) -> Result<(), RepositoryError> {
        self.sessions.read().map(|_| ()).map_err(poisoned)
    }
}
