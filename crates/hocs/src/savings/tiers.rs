use serde::{Deserialize, Serialize};

use super::domain::{SavingsOpportunity, UpfrontCost};

const LOW_COST_CEILING: u32 = 500;
const MEDIUM_COST_CEILING: u32 = 2500;
const SAVINGS_WEIGHT: f64 = 0.7;
const CONFIDENCE_WEIGHT: f64 = 0.3;

/// Bucket an opportunity falls into by its maximum upfront cost.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CostTier {
    Free,
    Low,
    Medium,
    High,
}

impl CostTier {
    pub const ALL: [Self; 4] = [Self::Free, Self::Low, Self::Medium, Self::High];

    pub fn classify(cost: &UpfrontCost) -> Self {
        match cost.max {
            0 => Self::Free,
            max if max <= LOW_COST_CEILING => Self::Low,
            max if max <= MEDIUM_COST_CEILING => Self::Medium,
            _ => Self::High,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Free => "No-Cost",
            Self::Low => "Low-Cost (up to $500)",
            Self::Medium => "Medium Investment ($500-$2,500)",
            Self::High => "Major Investment (over $2,500)",
        }
    }

    /// Ranking weight; cheaper tiers rank first.
    pub const fn weight(self) -> f64 {
        match self {
            Self::Free => 1000.0,
            Self::Low => 800.0,
            Self::Medium => 600.0,
            Self::High => 400.0,
        }
    }
}

/// Savings-and-confidence score that orders opportunities within one tier.
pub fn impact_score(opportunity: &SavingsOpportunity) -> f64 {
    SAVINGS_WEIGHT * f64::from(opportunity.annual_savings)
        + CONFIDENCE_WEIGHT * f64::from(opportunity.confidence_score)
}

/// Tier weight plus impact. Reported alongside the ranking; [`rank`] never
/// lets impact carry an item past a cheaper tier.
pub fn priority_score(opportunity: &SavingsOpportunity) -> f64 {
    CostTier::classify(&opportunity.upfront_cost).weight() + impact_score(opportunity)
}

/// Cheaper tiers first, then descending [`impact_score`]; full ties keep input order.
pub fn rank(opportunities: &[SavingsOpportunity]) -> Vec<SavingsOpportunity> {
    let mut keyed: Vec<(CostTier, f64, &SavingsOpportunity)> = opportunities
        .iter()
        .map(|opportunity| {
            (
                CostTier::classify(&opportunity.upfront_cost),
                impact_score(opportunity),
                opportunity,
            )
        })
        .collect();
    keyed.sort_by(|left, right| left.0.cmp(&right.0).then(right.1.total_cmp(&left.1)));
    keyed
        .into_iter()
        .map(|(_, _, opportunity)| opportunity.clone())
        .collect()
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TierGroup {
    pub tier: CostTier,
    pub label: &'static str,
    pub opportunities: Vec<SavingsOpportunity>,
    pub total_annual_savings: u32,
}

impl TierGroup {
    fn new(tier: CostTier, mut opportunities: Vec<SavingsOpportunity>) -> Self {
        match tier {
            CostTier::Free => {
                opportunities.sort_by(|left, right| right.annual_savings.cmp(&left.annual_savings))
            }
            _ => opportunities.sort_by_key(|opportunity| opportunity.upfront_cost.max),
        }

        let total_annual_savings = opportunities
            .iter()
            .map(|opportunity| opportunity.annual_savings)
            .sum();

        Self {
            tier,
            label: tier.label(),
            opportunities,
            total_annual_savings,
        }
    }

    pub fn len(&self) -> usize {
        self.opportunities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.opportunities.is_empty()
    }
}

/// Cost-tier grouping used by the diagnostic table and the report.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CostTierBreakdown {
    pub free: TierGroup,
    pub low: TierGroup,
    pub medium: TierGroup,
    pub high: TierGroup,
}

impl CostTierBreakdown {
    pub fn classify(opportunities: &[SavingsOpportunity]) -> Self {
        let bucket = |tier: CostTier| {
            let members = opportunities
                .iter()
                .filter(|opportunity| CostTier::classify(&opportunity.upfront_cost) == tier)
                .cloned()
                .collect();
            TierGroup::new(tier, members)
        };

        Self {
            free: bucket(CostTier::Free),
            low: bucket(CostTier::Low),
            medium: bucket(CostTier::Medium),
            high: bucket(CostTier::High),
        }
    }

    pub fn groups(&self) -> [&TierGroup; 4] {
        [&self.free, &self.low, &self.medium, &self.high]
    }

    pub fn group(&self, tier: CostTier) -> &TierGroup {
        match tier {
            CostTier::Free => &self.free,
            CostTier::Low => &self.low,
            CostTier::Medium => &self.medium,
            CostTier::High => &self.high,
        }
    }

    pub fn total_annual_savings(&self) -> u32 {
        self.groups()
            .iter()
            .map(|group| group.total_annual_savings)
            .sum()
    }
}
