use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::property::PropertyRecord;
use crate::savings::{CostTierBreakdown, PrioritizedPlan, SavingsOpportunity};
use crate::sessions::{Session, SessionId};

/// Read model handed to renderers and mailers.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportView {
    pub session_id: SessionId,
    pub property: PropertyRecord,
    pub opportunities: Vec<SavingsOpportunity>,
    pub plan: PrioritizedPlan,
    pub tiers: CostTierBreakdown,
    /// Sum over every opportunity, not just the plan's top list.
    pub total_annual_savings: u32,
    pub generated_at: DateTime<Utc>,
}

impl ReportView {
    /// Uses the session's customized plan when one exists.
    pub fn from_session(session: &Session, generated_at: DateTime<Utc>) -> Self {
        let plan = session
            .plan
            .clone()
            .unwrap_or_else(|| PrioritizedPlan::recommend(&session.opportunities));

        Self {
            session_id: session.session_id.clone(),
            property: session.property.clone(),
            opportunities: session.opportunities.clone(),
            tiers: CostTierBreakdown::classify(&session.opportunities),
            total_annual_savings: session
                .opportunities
                .iter()
                .map(|opportunity| opportunity.annual_savings)
                .sum(),
            plan,
            generated_at,
        }
    }
}
