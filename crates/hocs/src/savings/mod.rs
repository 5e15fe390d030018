//! Opportunity generation, cost tiers and the prioritized plan.

pub mod domain;
pub mod generator;
pub mod plan;
pub mod rules;
pub mod tiers;

#[cfg(test)]
mod tests;

pub use domain::{
    CategoryStyle, Difficulty, InvertedCostRange, OfficialResource, OpportunityCategory, Rebate,
    ResourceKind, SavingsOpportunity, UnknownCategory, UpfrontCost,
};
pub use generator::OpportunityGenerator;
pub use plan::{PlanError, PrioritizedPlan, TOP_PLAN_SIZE};
pub use rules::{standard_rules, OpportunityRule, RuleContext};
pub use tiers::{impact_score, priority_score, rank, CostTier, CostTierBreakdown, TierGroup};
