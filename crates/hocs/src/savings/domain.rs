use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Closed set of opportunity categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OpportunityCategory {
    Energy,
    Solar,
    Water,
    Maintenance,
    PropertyTax,
    Insurance,
}

/// Display attributes for a category, shared by the API and the report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CategoryStyle {
    pub label: &'static str,
    pub accent: &'static str,
}

impl OpportunityCategory {
    pub const ALL: [Self; 6] = [
        Self::Energy,
        Self::Solar,
        Self::Water,
        Self::Maintenance,
        Self::PropertyTax,
        Self::Insurance,
    ];

    pub const fn key(self) -> &'static str {
        match self {
            Self::Energy => "energy",
            Self::Solar => "solar",
            Self::Water => "water",
            Self::Maintenance => "maintenance",
            Self::PropertyTax => "property-tax",
            Self::Insurance => "insurance",
        }
    }

    pub const fn style(self) -> CategoryStyle {
        match self {
            Self::Energy => CategoryStyle {
                label: "Energy Efficiency",
                accent: "#f59e0b",
            },
            Self::Solar => CategoryStyle {
                label: "Solar",
                accent: "#eab308",
            },
            Self::Water => CategoryStyle {
                label: "Water Conservation",
                accent: "#3b82f6",
            },
            Self::Maintenance => CategoryStyle {
                label: "Home Maintenance",
                accent: "#6b7280",
            },
            Self::PropertyTax => CategoryStyle {
                label: "Property Tax",
                accent: "#10b981",
            },
            Self::Insurance => CategoryStyle {
                label: "Insurance",
                accent: "#8b5cf6",
            },
        }
    }

    pub const fn label(self) -> &'static str {
        self.style().label
    }
}

impl fmt::Display for OpportunityCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for OpportunityCategory {
    type Err = UnknownCategory;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|category| category.key() == value)
            .ok_or_else(|| UnknownCategory(value.to_string()))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown opportunity category '{0}'")]
pub struct UnknownCategory(pub String);

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("upfront cost minimum ${min} exceeds maximum ${max}")]
pub struct InvertedCostRange {
    pub min: u32,
    pub max: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Difficulty {
    #[serde(rename = "DIY")]
    Diy,
    Professional,
    Specialist,
}

impl Difficulty {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Diy => "DIY",
            Self::Professional => "Professional",
            Self::Specialist => "Specialist",
        }
    }
}

/// Whole-dollar cost range with `min <= max`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "CostRange")]
pub struct UpfrontCost {
    pub min: u32,
    pub max: u32,
}

#[derive(Deserialize)]
struct CostRange {
    min: u32,
    max: u32,
}

impl TryFrom<CostRange> for UpfrontCost {
    type Error = InvertedCostRange;

    fn try_from(range: CostRange) -> Result<Self, Self::Error> {
        Self::try_new(range.min, range.max)
    }
}

impl UpfrontCost {
    pub const FREE: Self = Self { min: 0, max: 0 };

    /// Range for authored rule constants.
    ///
    /// # Panics
    ///
    /// Panics when `min > max`; use [`UpfrontCost::try_new`] for untrusted input.
    pub const fn new(min: u32, max: u32) -> Self {
        assert!(min <= max, "upfront cost minimum exceeds maximum");
        Self { min, max }
    }

    pub const fn try_new(min: u32, max: u32) -> Result<Self, InvertedCostRange> {
        if min > max {
            return Err(InvertedCostRange { min, max });
        }
        Ok(Self { min, max })
    }

    pub const fn validate(&self) -> Result<(), InvertedCostRange> {
        if self.min > self.max {
            return Err(InvertedCostRange {
                min: self.min,
                max: self.max,
            });
        }
        Ok(())
    }

    pub const fn is_free(&self) -> bool {
        self.max == 0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rebate {
    pub name: String,
    pub amount: u32,
    pub link: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResourceKind {
    Government,
    Utility,
    Program,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OfficialResource {
    pub name: String,
    pub url: String,
    #[serde(rename = "type")]
    pub kind: ResourceKind,
}

/// One actionable recommendation derived from a property record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavingsOpportunity {
    pub id: String,
    pub category: OpportunityCategory,
    pub name: String,
    pub annual_savings: u32,
    pub upfront_cost: UpfrontCost,
    pub rebates: Vec<Rebate>,
    pub payback_months: u16,
    pub difficulty: Difficulty,
    pub confidence_score: u8,
    pub benefits: Vec<String>,
    pub next_steps: Vec<String>,
    pub methodology: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub official_resources: Option<Vec<OfficialResource>>,
}

impl SavingsOpportunity {
    pub fn total_rebates(&self) -> u32 {
        self.rebates.iter().map(|rebate| rebate.amount).sum()
    }

    pub fn is_free(&self) -> bool {
        self.upfront_cost.is_free()
    }
}
