use serde::{Deserialize, Serialize};

pub const MAX_SOLAR_FEASIBILITY: u8 = 100;
const EARLIEST_YEAR_BUILT: u16 = 1700;
const LATEST_YEAR_BUILT: u16 = 2100;

/// Wildfire hazard severity zone reported for a parcel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WildfireZone {
    Low,
    Medium,
    High,
}

impl WildfireZone {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Low => "Low",
            Self::Medium => "Medium",
            Self::High => "High",
        }
    }
}

/// Normalized attributes for one analyzed address.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertyRecord {
    pub address: String,
    pub year_built: u16,
    pub square_feet: u32,
    pub bedrooms: u8,
    pub bathrooms: f32,
    pub lot_size: u32,
    pub last_sale_price: u64,
    pub assessed_value: u64,
    pub property_tax_estimate: u64,
    #[serde(default)]
    pub electric_provider: Option<String>,
    #[serde(default)]
    pub gas_provider: Option<String>,
    #[serde(default)]
    pub water_provider: Option<String>,
    pub wildfire_zone: WildfireZone,
    pub roof_age: u16,
    pub solar_feasibility_score: u8,
    #[serde(default)]
    pub permit_history: Vec<String>,
}

impl PropertyRecord {
    /// Checks the invariants the rule set relies on.
    pub fn validate(&self) -> Result<(), PropertyValidationError> {
        if self.address.trim().is_empty() {
            return Err(PropertyValidationError::MissingAddress);
        }

        if !(EARLIEST_YEAR_BUILT..=LATEST_YEAR_BUILT).contains(&self.year_built) {
            return Err(PropertyValidationError::YearBuiltOutOfRange(self.year_built));
        }

        if self.square_feet == 0 {
            return Err(PropertyValidationError::MissingSquareFeet);
        }

        if self.solar_feasibility_score > MAX_SOLAR_FEASIBILITY {
            return Err(PropertyValidationError::SolarScoreOutOfRange(
                self.solar_feasibility_score,
            ));
        }

        Ok(())
    }

    /// Providers the property is served by, in electric/gas/water order.
    pub fn providers(&self) -> impl Iterator<Item = &str> {
        [
            self.electric_provider.as_deref(),
            self.gas_provider.as_deref(),
            self.water_provider.as_deref(),
        ]
        .into_iter()
        .flatten()
    }
}

/// Reasons a property record cannot be analyzed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PropertyValidationError {
    #[error("property address is required")]
    MissingAddress,
    #[error("year built {0} is outside the supported range")]
    YearBuiltOutOfRange(u16),
    #[error("square footage is required")]
    MissingSquareFeet,
    #[error("solar feasibility score {0} must be between 0 and 100")]
    SolarScoreOutOfRange(u8),
}
