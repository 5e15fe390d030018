use serde::{Deserialize, Serialize};

use super::domain::SavingsOpportunity;
use super::tiers::rank;

pub const TOP_PLAN_SIZE: usize = 5;

/// Ranked split of a session's opportunities into a short list and the rest.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PrioritizedPlan {
    pub top_opportunities: Vec<SavingsOpportunity>,
    pub secondary_opportunities: Vec<SavingsOpportunity>,
    pub total_annual_savings: u32,
    pub customized: bool,
}

impl PrioritizedPlan {
    pub fn recommend(opportunities: &[SavingsOpportunity]) -> Self {
        let mut ranked = rank(opportunities);
        let secondary = ranked.split_off(ranked.len().min(TOP_PLAN_SIZE));

        let mut plan = Self {
            top_opportunities: ranked,
            secondary_opportunities: secondary,
            total_annual_savings: 0,
            customized: false,
        };
        plan.recompute_total();
        plan
    }

    /// Drops `opportunity_id` from the top list, promotes the best secondary
    /// item into the freed slot and parks the removed item at the end of the
    /// secondary list.
    pub fn remove(&mut self, opportunity_id: &str) -> Result<(), PlanError> {
        let position = match self
            .top_opportunities
            .iter()
            .position(|opportunity| opportunity.id == opportunity_id)
        {
            Some(position) => position,
            None if self.contains(opportunity_id) => {
                return Err(PlanError::NotInTop(opportunity_id.to_string()))
            }
            None => return Err(PlanError::UnknownOpportunity(opportunity_id.to_string())),
        };

        if self.secondary_opportunities.is_empty() {
            return Err(PlanError::NothingToPromote(opportunity_id.to_string()));
        }

        let promoted = self.secondary_opportunities.remove(0);
        let removed = std::mem::replace(&mut self.top_opportunities[position], promoted);
        self.secondary_opportunities.push(removed);

        self.customized = true;
        self.recompute_total();
        Ok(())
    }

    pub fn reset(&mut self, opportunities: &[SavingsOpportunity]) {
        *self = Self::recommend(opportunities);
    }

    pub fn contains(&self, opportunity_id: &str) -> bool {
        self.opportunities().any(|opportunity| opportunity.id == opportunity_id)
    }

    pub fn opportunities(&self) -> impl Iterator<Item = &SavingsOpportunity> {
        self.top_opportunities
            .iter()
            .chain(self.secondary_opportunities.iter())
    }

    pub fn len(&self) -> usize {
        self.top_opportunities.len() + self.secondary_opportunities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn recompute_total(&mut self) {
        self.total_annual_savings = self
            .top_opportunities
            .iter()
            .map(|opportunity| opportunity.annual_savings)
            .sum();
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PlanError {
    #[error("opportunity '{0}' is not in the top recommendations")]
    NotInTop(String),
    #[error("opportunity '{0}' is not part of this plan")]
    UnknownOpportunity(String),
    #[error("cannot remove '{0}': no other opportunity is available to take its place")]
    NothingToPromote(String),
}
