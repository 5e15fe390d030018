use super::domain::{Session, SessionId};

/// Storage abstraction so the store can be exercised in isolation.
pub trait SessionRepository: Send + Sync {
    /// Inserts a new session; an existing id is a [`RepositoryError::Conflict`].
    fn insert(&self, session: Session) -> Result<Session, RepositoryError>;
    fn update(&self, session: Session) -> Result<(), RepositoryError>;
    fn fetch(&self, id: &SessionId) -> Result<Option<Session>, RepositoryError>;
    /// Returns whether a record was removed.
    fn remove(&self, id: &SessionId) -> Result<bool, RepositoryError>;
    fn ping(&self) -> Result<(), RepositoryError>;
}

/// Error enumeration for repository failures.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RepositoryError {
    #[error("record already exists")]
    Conflict,
    #[error("record not found")]
    NotFound,
    #[error("repository unavailable: {0}")]
    Unavailable(String),
}
