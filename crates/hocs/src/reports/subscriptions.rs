use std::collections::HashMap;
use std::sync::Mutex;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::sessions::{RepositoryError, SessionId};

/// Opt-in for program update emails, keyed by address.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Subscription {
    pub email: String,
    pub session_id: SessionId,
    pub subscribed_at: DateTime<Utc>,
    pub active: bool,
}

pub trait SubscriptionStore: Send + Sync {
    /// Inserts or replaces the subscription for `subscription.email`.
    fn upsert(&self, subscription: Subscription) -> Result<(), RepositoryError>;
    fn get(&self, email: &str) -> Result<Option<Subscription>, RepositoryError>;
}

#[derive(Debug, Default)]
pub struct MemorySubscriptionStore {
    subscriptions: Mutex<HashMap<String, Subscription>>,
}

impl MemorySubscriptionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.subscriptions.lock().map(|map| map.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn key(email: &str) -> String {
    email.trim().to_ascii_lowercase()
}

impl SubscriptionStore for MemorySubscriptionStore {
    fn upsert(&self, subscription: Subscription) -> Result<(), RepositoryError> {
        let mut subscriptions = self
            .subscriptions
            .lock()
            .map_err(|_| RepositoryError::Unavailable("subscription store poisoned".to_string()))?;
        subscriptions.insert(key(&subscription.email), subscription);
        Ok(())
    }

    fn get(&self, email: &str) -> Result<Option<Subscription>, RepositoryError> {
        let subscriptions = self
            .subscriptions
            .lock()
            .map_err(|_| RepositoryError::Unavailable("subscription store poisoned".to_string()))?;
        Ok(subscriptions.get(&key(email)).cloned())
    }
}
