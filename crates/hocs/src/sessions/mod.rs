//! Expiring lookup sessions and the HTTP surface built on them.
//!
//! A session holds the property record and generated opportunities for one
//! address. Plans are created lazily on first access and persisted back into
//! the session; expiry is checked on every read.

pub mod domain;
pub mod memory;
pub mod repository;
pub mod router;
pub mod service;
pub mod store;

#[cfg(test)]
mod tests;

pub use domain::{Session, SessionId, SessionUpdate, SessionView};
pub use memory::MemorySessionRepository;
pub use repository::{RepositoryError, SessionRepository};
pub use router::{session_router, LookupRequest, RemoveFromPlanRequest, SessionRoutesState};
pub use service::{SavingsService, SavingsServiceError};
pub use store::{Clock, ManualClock, SessionError, SessionStore, SystemClock};
