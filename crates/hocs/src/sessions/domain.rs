use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::property::PropertyRecord;
use crate::savings::{PrioritizedPlan, SavingsOpportunity};

/// Opaque session token handed to the client.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionId(pub String);

impl SessionId {
    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for SessionId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// Server-side record of one analyzed address.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub session_id: SessionId,
    pub property: PropertyRecord,
    pub opportunities: Vec<SavingsOpportunity>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub plan: Option<PrioritizedPlan>,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

impl Session {
    pub fn is_valid_at(&self, now: DateTime<Utc>) -> bool {
        now < self.expires_at
    }

    pub fn view(&self) -> SessionView {
        SessionView {
            session_id: self.session_id.clone(),
            property: self.property.clone(),
            opportunities: self.opportunities.clone(),
            expires_at: self.expires_at,
        }
    }
}

/// Payload returned by lookup and session reads.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionView {
    pub session_id: SessionId,
    pub property: PropertyRecord,
    pub opportunities: Vec<SavingsOpportunity>,
    pub expires_at: DateTime<Utc>,
}

/// Partial update merged into a stored session. `None` leaves a field as is,
/// except that new opportunities without a plan discard the stored plan.
#[derive(Debug, Clone, Default)]
pub struct SessionUpdate {
    pub plan: Option<PrioritizedPlan>,
    pub opportunities: Option<Vec<SavingsOpportunity>>,
}

impl SessionUpdate {
    pub fn plan(plan: PrioritizedPlan) -> Self {
        Self {
            plan: Some(plan),
            opportunities: None,
        }
    }

    pub fn opportunities(opportunities: Vec<SavingsOpportunity>) -> Self {
        Self {
            plan: None,
            opportunities: Some(opportunities),
        }
    }

    pub(crate) fn apply(self, session: &mut Session) {
        if let Some(opportunities) = self.opportunities {
            // A plan built from the old set would point at stale ids; the
            // next plan read rebuilds it.
            session.plan = None;
            session.opportunities = opportunities;
        }
        if let Some(plan) = self.plan {
            session.plan = Some(plan);
        }
    }
}
