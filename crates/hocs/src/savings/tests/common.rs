use crate::property::{PropertyRecord, WildfireZone};
use crate::savings::domain::{
    Difficulty, OpportunityCategory, SavingsOpportunity, UpfrontCost,
};

pub(super) fn property() -> PropertyRecord {
    PropertyRecord {
        address: "123 Main St, Pasadena, CA 91101".to_string(),
        year_built: 1965,
        square_feet: 1850,
        bedrooms: 3,
        bathrooms: 2.0,
        lot_size: 6500,
        last_sale_price: 850_000,
        assessed_value: 780_000,
        property_tax_estimate: 8_580,
        electric_provider: Some("Pasadena Water & Power".to_string()),
        gas_provider: Some("Southern California Gas Company".to_string()),
        water_provider: Some("Pasadena Water & Power".to_string()),
        wildfire_zone: WildfireZone::Medium,
        roof_age: 18,
        solar_feasibility_score: 85,
        permit_history: vec!["2015 - Electrical panel upgrade".to_string()],
    }
}

/// A newer, non-LA property that triggers none of the conditional rules.
pub(super) fn modern_property() -> PropertyRecord {
    PropertyRecord {
        address: "1 Market St, San Francisco, CA 94105".to_string(),
        year_built: 2005,
        roof_age: 5,
        solar_feasibility_score: 50,
        assessed_value: 900_000,
        last_sale_price: 1_000_000,
        electric_provider: Some("Pacific Gas and Electric".to_string()),
        gas_provider: Some("Pacific Gas and Electric".to_string()),
        water_provider: None,
        wildfire_zone: WildfireZone::Low,
        ..property()
    }
}

pub(super) fn opportunity(
    id: &str,
    annual_savings: u32,
    max_cost: u32,
    confidence_score: u8,
) -> SavingsOpportunity {
    SavingsOpportunity {
        id: id.to_string(),
        category: OpportunityCategory::Energy,
        name: format!("Opportunity {id}"),
        annual_savings,
        upfront_cost: UpfrontCost::new(0, max_cost),
        rebates: Vec::new(),
        payback_months: 0,
        difficulty: Difficulty::Diy,
        confidence_score,
        benefits: vec!["saves money".to_string()],
        next_steps: vec!["do it".to_string()],
        methodology: "fixture".to_string(),
        official_resources: None,
    }
}

/// Seven opportunities whose ranking is `a` through `g`.
pub(super) fn seven_opportunities() -> Vec<SavingsOpportunity> {
    vec![
        opportunity("e", 250, 300, 90),
        opportunity("a", 300, 0, 95),
        opportunity("g", 300, 8_000, 75),
        opportunity("b", 120, 0, 98),
        opportunity("f", 180, 225, 90),
        opportunity("c", 100, 0, 50),
        opportunity("d", 300, 120, 92),
    ]
}

pub(super) fn ids(opportunities: &[SavingsOpportunity]) -> Vec<&str> {
    opportunities
        .iter()
        .map(|opportunity| opportunity.id.as_str())
        .collect()
}
