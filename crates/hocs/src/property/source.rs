use async_trait::async_trait;
use uuid::Uuid;

use super::address::{AddressError, NormalizedAddress};
use super::domain::{PropertyRecord, PropertyValidationError, WildfireZone};
use super::geography::{Gazetteer, UnsupportedArea};
use super::utilities::assign_utilities;

/// Boundary to whatever system supplies property attributes for an address.
#[async_trait]
pub trait PropertyDataSource: Send + Sync {
    async fn fetch(&self, address: &NormalizedAddress) -> Result<PropertyRecord, LookupError>;
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LookupError {
    #[error(transparent)]
    InvalidAddress(#[from] AddressError),
    #[error(transparent)]
    InvalidRecord(#[from] PropertyValidationError),
    #[error(transparent)]
    NotSupported(#[from] UnsupportedArea),
    #[error("property data source unavailable: {0}")]
    Upstream(String),
}

impl LookupError {
    /// Only transport-level failures are worth another attempt.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Upstream(_))
    }
}

const SYNTHETIC_NAMESPACE: Uuid = Uuid::from_u128(0x6f1c_2a7e_0b5d_4c1e_9a43_5d2e_8b71_c0de);

/// Builds plausible records from a digest of the normalized address so the
/// same address always yields the same property.
#[derive(Debug, Default, Clone)]
pub struct SyntheticPropertySource {
    gazetteer: Gazetteer,
}

impl SyntheticPropertySource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn synthesize(&self, address: &NormalizedAddress) -> Result<PropertyRecord, LookupError> {
        let location = self.gazetteer.locate(address)?;
        let utilities = assign_utilities(&location);

        let key = address.to_string().to_ascii_lowercase();
        let digest = Uuid::new_v5(&SYNTHETIC_NAMESPACE, key.as_bytes());
        let bytes = digest.as_bytes();
        let wide = |index: usize| u32::from(u16::from_be_bytes([bytes[index], bytes[index + 1]]));

        let year_built = 1920 + u16::from(bytes[0] % 100);
        let square_feet = 900 + wide(1) % 3100;
        let last_sale_price = (400 + u64::from(wide(7) % 1200)) * 1_000;
        let assessed_value = last_sale_price * (85 + u64::from(bytes[10] % 30)) / 100;
        let wildfire_zone = match bytes[11] % 3 {
            0 => WildfireZone::Low,
            1 => WildfireZone::Medium,
            _ => WildfireZone::High,
        };

        let mut permit_history = Vec::new();
        if bytes[14] % 2 == 0 {
            let year = 2005 + u16::from(bytes[14] % 15);
            permit_history.push(format!("{year} - Electrical panel upgrade"));
        }
        if bytes[15] % 3 == 0 {
            permit_history.push(format!("{} - Re-roof", 2000 + u16::from(bytes[15] % 20)));
        }

        let canonical = NormalizedAddress {
            city: location.city.to_string(),
            ..address.clone()
        };

        let record = PropertyRecord {
            address: canonical.to_string(),
            year_built,
            square_feet,
            bedrooms: 2 + bytes[3] % 4,
            bathrooms: 1.0 + f32::from(bytes[4] % 5) * 0.5,
            lot_size: 3_000 + wide(5) % 9_000,
            last_sale_price,
            assessed_value,
            property_tax_estimate: assessed_value * 11 / 1_000,
            electric_provider: Some(utilities.electric.name.to_string()),
            gas_provider: Some(utilities.gas.name.to_string()),
            water_provider: utilities.water.map(|water| water.name.to_string()),
            wildfire_zone,
            roof_age: u16::from(bytes[12] % 30),
            solar_feasibility_score: 40 + bytes[13] % 61,
            permit_history,
        };

        record.validate()?;
        Ok(record)
    }
}

#[async_trait]
impl PropertyDataSource for SyntheticPropertySource {
    async fn fetch(&self, address: &NormalizedAddress) -> Result<PropertyRecord, LookupError> {
        let record = self.synthesize(address)?;
        tracing::debug!(
            address = %record.address,
            year_built = record.year_built,
            "synthesized property record"
        );
        Ok(record)
    }
}
