use crate::property::utilities::is_la_county_municipal;
use crate::property::{PropertyRecord, WildfireZone};

use super::domain::{
    Difficulty, OfficialResource, OpportunityCategory, Rebate, ResourceKind, SavingsOpportunity,
    UpfrontCost,
};

/// Facts a rule template may read when filling in property-specific text.
#[derive(Debug, Clone, Copy)]
pub struct RuleContext<'a> {
    pub property: &'a PropertyRecord,
    pub la_county_municipal: bool,
}

impl<'a> RuleContext<'a> {
    pub fn new(property: &'a PropertyRecord) -> Self {
        Self {
            property,
            la_county_municipal: is_la_county_municipal(
                [
                    property.electric_provider.as_deref(),
                    property.water_provider.as_deref(),
                ]
                .into_iter()
                .flatten(),
            ),
        }
    }

    fn electric_provider(&self) -> &str {
        self.property
            .electric_provider
            .as_deref()
            .unwrap_or("your utility provider")
    }
}

/// One entry of the opportunity rule table.
pub struct OpportunityRule {
    pub id: &'static str,
    pub applies: fn(&PropertyRecord) -> bool,
    pub build: fn(&RuleContext<'_>) -> SavingsOpportunity,
}

impl std::fmt::Debug for OpportunityRule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpportunityRule").field("id", &self.id).finish()
    }
}

pub const ATTIC_INSULATION_BUILT_BEFORE: u16 = 1980;
pub const WINDOW_REPLACEMENT_BUILT_BEFORE: u16 = 1990;
pub const SOLAR_FEASIBILITY_THRESHOLD: u8 = 70;
pub const ROOF_AGE_THRESHOLD: u16 = 15;

/// The authored rule set, in emission order.
pub fn standard_rules() -> Vec<OpportunityRule> {
    vec![
        OpportunityRule {
            id: "energy-audit",
            applies: always,
            build: energy_audit,
        },
        OpportunityRule {
            id: "water-kit",
            applies: always,
            build: water_kit,
        },
        OpportunityRule {
            id: "led-lighting",
            applies: always,
            build: led_lighting,
        },
        OpportunityRule {
            id: "power-strips",
            applies: always,
            build: power_strips,
        },
        OpportunityRule {
            id: "weatherization",
            applies: always,
            build: weatherization,
        },
        OpportunityRule {
            id: "smart-thermostat",
            applies: always,
            build: smart_thermostat,
        },
        OpportunityRule {
            id: "turf-removal",
            applies: always,
            build: turf_removal,
        },
        OpportunityRule {
            id: "attic-insulation",
            applies: |property| property.year_built < ATTIC_INSULATION_BUILT_BEFORE,
            build: attic_insulation,
        },
        OpportunityRule {
            id: "solar-installation",
            applies: |property| property.solar_feasibility_score > SOLAR_FEASIBILITY_THRESHOLD,
            build: solar_installation,
        },
        OpportunityRule {
            id: "heat-pump-water-heater",
            applies: always,
            build: heat_pump_water_heater,
        },
        OpportunityRule {
            id: "window-replacement",
            applies: |property| property.year_built < WINDOW_REPLACEMENT_BUILT_BEFORE,
            build: window_replacement,
        },
        OpportunityRule {
            id: "roof-maintenance",
            applies: |property| property.roof_age > ROOF_AGE_THRESHOLD,
            build: roof_maintenance,
        },
        OpportunityRule {
            id: "insurance-review",
            applies: always,
            build: insurance_review,
        },
        OpportunityRule {
            id: "property-tax-review",
            applies: |property| property.assessed_value > property.last_sale_price,
            build: property_tax_review,
        },
    ]
}

fn always(_: &PropertyRecord) -> bool {
    true
}

fn texts(items: &[&str]) -> Vec<String> {
    items.iter().map(|item| item.to_string()).collect()
}

fn rebate(name: &str, amount: u32, link: &str) -> Rebate {
    Rebate {
        name: name.to_string(),
        amount,
        link: link.to_string(),
    }
}

fn resource(name: &str, url: &str, kind: ResourceKind) -> OfficialResource {
    OfficialResource {
        name: name.to_string(),
        url: url.to_string(),
        kind,
    }
}

const CEC_EFFICIENCY: &str =
    "https://www.energy.ca.gov/programs-and-topics/programs/energy-efficiency";
const CSD_WEATHERIZATION: &str = "https://www.csd.ca.gov/Pages/WeatherizationProgram.aspx";
const DOE_WEATHERIZATION: &str =
    "https://www.energy.gov/scep/wap/weatherization-assistance-program";
const CALWATER_CONSERVATION: &str = "https://www.calwater.com/conservation/";
const SOCALGAS_REBATES: &str = "https://socalgas.com/save-money-and-energy/rebates-and-incentives";
const FEDERAL_TAX_CREDITS: &str = "https://www.energystar.gov/about/federal_tax_credits";
const SOLAR_TAX_CREDIT: &str =
    "https://www.energy.gov/eere/solar/homeowners-guide-federal-tax-credit-solar-photovoltaics";
const BUILDING_STANDARDS: &str =
    "https://www.energy.ca.gov/programs-and-topics/programs/building-energy-efficiency-standards";

fn energy_audit(context: &RuleContext<'_>) -> SavingsOpportunity {
    let (next_steps, resources) = if context.la_county_municipal {
        (
            texts(&[
                "Contact your utility provider to schedule free audit",
                "Pasadena Water & Power: (626) 744-4005",
                "LADWP: (800) 342-5397",
                "Document current utility bills for comparison",
            ]),
            vec![
                resource(
                    "Pasadena Water & Power Energy Programs",
                    "https://www.cityofpasadena.net/water-and-power/energy-efficiency/",
                    ResourceKind::Utility,
                ),
                resource(
                    "LADWP Energy Efficiency Programs",
                    "https://www.ladwp.com/ladwp/faces/ladwp/residential/r-savemoney/r-sm-rebatesandprograms",
                    ResourceKind::Utility,
                ),
                resource("California Energy Commission", CEC_EFFICIENCY, ResourceKind::Government),
            ],
        )
    } else {
        (
            vec![
                format!("Contact {} to schedule free audit", context.electric_provider()),
                "Check your utility provider website for energy efficiency programs".to_string(),
                "Document current utility bills for comparison".to_string(),
                "Visit California Energy Commission for statewide programs".to_string(),
            ],
            vec![
                resource("California Energy Commission", CEC_EFFICIENCY, ResourceKind::Government),
                resource(
                    "Find Your Utility Provider Programs",
                    "https://www.cpuc.ca.gov/industries-and-topics/electrical-energy/electric-costs/energy-efficiency-ee",
                    ResourceKind::Government,
                ),
            ],
        )
    };

    SavingsOpportunity {
        id: "energy-audit".to_string(),
        category: OpportunityCategory::Energy,
        name: "Schedule Free Home Energy Audit".to_string(),
        annual_savings: 300,
        upfront_cost: UpfrontCost::FREE,
        rebates: Vec::new(),
        payback_months: 0,
        difficulty: Difficulty::Diy,
        confidence_score: 95,
        benefits: texts(&[
            "Identify energy waste and inefficiencies at no cost",
            "Get personalized recommendations from certified auditor",
            "Qualify for additional rebates and incentives",
            "Track baseline energy usage for future improvements",
        ]),
        next_steps,
        methodology: "Free energy audits identify an average of $300-500/year in savings opportunities. This is the foundation for measuring and managing your home's energy performance.".to_string(),
        official_resources: Some(resources),
    }
}

fn water_kit(context: &RuleContext<'_>) -> SavingsOpportunity {
    let (next_steps, methodology, resources) = if context.la_county_municipal {
        (
            texts(&[
                "Order free kit from SoCal Water$mart: bewaterwise.com",
                "Install fixtures and note installation date",
                "Compare next water bill to establish baseline savings",
                "Track monthly water usage to measure impact",
            ]),
            "Metropolitan Water District provides free conservation kits. Average household saves 120 gallons/month = $120/year. Track your water bills monthly to confirm the savings.",
            vec![
                resource(
                    "SoCal Water$mart (Metropolitan Water District)",
                    "https://www.bewaterwise.com/",
                    ResourceKind::Utility,
                ),
                resource(
                    "LA County Water Conservation",
                    "https://dpw.lacounty.gov/wwd/web/Conservation/",
                    ResourceKind::Government,
                ),
                resource("California Water Service", CALWATER_CONSERVATION, ResourceKind::Utility),
            ],
        )
    } else {
        (
            texts(&[
                "Contact your local water district for free conservation kits",
                "Check California Water Service for available programs",
                "Install fixtures and note installation date",
                "Track monthly water usage to measure impact",
            ]),
            "Many California water districts provide free conservation kits. Average household saves 120 gallons/month = $120/year. Track your water bills monthly to confirm the savings.",
            vec![
                resource("California Water Service", CALWATER_CONSERVATION, ResourceKind::Utility),
                resource(
                    "Save Our Water (Statewide)",
                    "https://saveourwater.com/",
                    ResourceKind::Government,
                ),
                resource(
                    "California Department of Water Resources",
                    "https://water.ca.gov/Programs/Water-Use-And-Efficiency",
                    ResourceKind::Government,
                ),
            ],
        )
    };

    SavingsOpportunity {
        id: "water-kit".to_string(),
        category: OpportunityCategory::Water,
        name: "Request Free Water Conservation Kit".to_string(),
        annual_savings: 120,
        upfront_cost: UpfrontCost::FREE,
        rebates: Vec::new(),
        payback_months: 0,
        difficulty: Difficulty::Diy,
        confidence_score: 98,
        benefits: texts(&[
            "Free kit includes low-flow showerheads and faucet aerators",
            "Reduce water usage by 20-30% immediately",
            "Easy DIY installation in under 30 minutes",
            "Start tracking water savings right away",
        ]),
        next_steps,
        methodology: methodology.to_string(),
        official_resources: Some(resources),
    }
}

fn led_lighting(_: &RuleContext<'_>) -> SavingsOpportunity {
    SavingsOpportunity {
        id: "led-lighting".to_string(),
        category: OpportunityCategory::Energy,
        name: "Convert to LED Lighting (Start with High-Use Areas)".to_string(),
        annual_savings: 150,
        upfront_cost: UpfrontCost::new(50, 150),
        rebates: Vec::new(),
        payback_months: 8,
        difficulty: Difficulty::Diy,
        confidence_score: 98,
        benefits: texts(&[
            "Reduce lighting costs by 75% in converted areas",
            "LED bulbs last 15-25 years vs 1-2 years for incandescent",
            "Instant energy savings you can measure on next bill",
            "No special tools or skills required",
        ]),
        next_steps: texts(&[
            "Identify 10 highest-use bulbs (kitchen, living room, outdoor)",
            "Purchase LED replacements in bulk for best price",
            "Note your current electric bill before conversion",
            "Track monthly electric bills to measure savings",
        ]),
        methodology: "Converting 10 high-use bulbs saves ~$150/year. Start small, measure impact, then expand.".to_string(),
        official_resources: Some(vec![
            resource(
                "ENERGY STAR Lighting Guide",
                "https://www.energystar.gov/products/lighting_fans",
                ResourceKind::Government,
            ),
            resource(
                "California Energy Commission - Lighting",
                "https://www.energy.ca.gov/programs-and-topics/programs/appliance-efficiency-program/lighting",
                ResourceKind::Government,
            ),
        ]),
    }
}

fn power_strips(_: &RuleContext<'_>) -> SavingsOpportunity {
    SavingsOpportunity {
        id: "power-strips".to_string(),
        category: OpportunityCategory::Energy,
        name: "Install Smart Power Strips to Eliminate Phantom Load".to_string(),
        annual_savings: 100,
        upfront_cost: UpfrontCost::new(60, 120),
        rebates: Vec::new(),
        payback_months: 9,
        difficulty: Difficulty::Diy,
        confidence_score: 92,
        benefits: texts(&[
            "Eliminate standby energy drain from idle devices",
            "Automatically cut power to unused devices",
            "Reduce electric bill by 5-10% with no behavior change",
            "Easy to measure impact on monthly bills",
        ]),
        next_steps: texts(&[
            "Identify entertainment centers and home office areas",
            "Purchase smart power strips with auto-shutoff",
            "Note current monthly electric usage",
            "Compare bills after 1 month to measure savings",
        ]),
        methodology: "Phantom load accounts for 5-10% of home electricity use. Smart power strips eliminate this waste. Average savings: $100/year.".to_string(),
        official_resources: Some(vec![
            resource(
                "U.S. Department of Energy - Standby Power",
                "https://www.energy.gov/energysaver/articles/standby-power-and-how-reduce-it",
                ResourceKind::Government,
            ),
            resource(
                "ENERGY STAR Smart Power Strips",
                "https://www.energystar.gov/products/smart_power_strips",
                ResourceKind::Government,
            ),
        ]),
    }
}

fn weatherization(context: &RuleContext<'_>) -> SavingsOpportunity {
    let (next_steps, methodology, resources) = if context.la_county_municipal {
        (
            texts(&[
                "Check eligibility at lacounty.gov/weatherization",
                "Gather income documentation for application",
                "Schedule home assessment if qualified",
                "Track utility bills before and after to measure impact",
            ]),
            "LA County Weatherization Program provides free upgrades to eligible households. Average savings: $400/year.",
            vec![
                resource(
                    "LA County Weatherization Program",
                    "https://dcba.lacounty.gov/weatherization/",
                    ResourceKind::Government,
                ),
                resource(
                    "California Department of Community Services - Weatherization",
                    CSD_WEATHERIZATION,
                    ResourceKind::Government,
                ),
                resource(
                    "U.S. Department of Energy - Weatherization",
                    DOE_WEATHERIZATION,
                    ResourceKind::Government,
                ),
            ],
        )
    } else {
        (
            texts(&[
                "Check eligibility at csd.ca.gov/weatherization",
                "Contact your local Community Action Agency",
                "Gather income documentation for application",
                "Track utility bills before and after to measure impact",
            ]),
            "California Weatherization Program provides free upgrades to eligible households statewide. Average savings: $400/year.",
            vec![
                resource(
                    "California Department of Community Services - Weatherization",
                    CSD_WEATHERIZATION,
                    ResourceKind::Government,
                ),
                resource(
                    "U.S. Department of Energy - Weatherization",
                    DOE_WEATHERIZATION,
                    ResourceKind::Government,
                ),
                resource(
                    "Find Your Local Community Action Agency",
                    "https://www.csd.ca.gov/Pages/LocalOffices.aspx",
                    ResourceKind::Government,
                ),
            ],
        )
    };

    SavingsOpportunity {
        id: "weatherization".to_string(),
        category: OpportunityCategory::Energy,
        name: "Apply for Free Weatherization Assistance Program".to_string(),
        annual_savings: 400,
        upfront_cost: UpfrontCost::FREE,
        rebates: Vec::new(),
        payback_months: 0,
        difficulty: Difficulty::Professional,
        confidence_score: 85,
        benefits: texts(&[
            "Free insulation, air sealing, and efficiency upgrades",
            "Income-qualified program (up to 200% of federal poverty level)",
            "Professional installation at no cost",
            "Reduce heating/cooling costs by 20-30%",
        ]),
        next_steps,
        methodology: methodology.to_string(),
        official_resources: Some(resources),
    }
}

fn smart_thermostat(_: &RuleContext<'_>) -> SavingsOpportunity {
    SavingsOpportunity {
        id: "smart-thermostat".to_string(),
        category: OpportunityCategory::Energy,
        name: "Install Smart Thermostat with Utility Rebate".to_string(),
        annual_savings: 180,
        upfront_cost: UpfrontCost::new(125, 225),
        rebates: vec![rebate("SoCalGas Smart Thermostat Rebate", 75, SOCALGAS_REBATES)],
        payback_months: 8,
        difficulty: Difficulty::Diy,
        confidence_score: 90,
        benefits: texts(&[
            "Reduce HVAC costs by 10-15% automatically",
            "Track energy usage in real-time via app",
            "Learning schedules optimize comfort and savings",
            "Qualify for $75 utility rebate",
        ]),
        next_steps: texts(&[
            "Check HVAC compatibility at nest.com or ecobee.com",
            "Apply for SoCalGas rebate before purchase",
            "Install thermostat and connect to app",
            "Monitor daily/weekly energy reports to track savings",
        ]),
        methodology: "Smart thermostats reduce HVAC costs by 12% average. Net cost after rebate: $125-150. Payback in 8-10 months.".to_string(),
        official_resources: Some(vec![
            resource("SoCalGas Rebates & Incentives", SOCALGAS_REBATES, ResourceKind::Utility),
            resource(
                "ENERGY STAR Smart Thermostats",
                "https://www.energystar.gov/products/smart_thermostats",
                ResourceKind::Government,
            ),
        ]),
    }
}

fn turf_removal(_: &RuleContext<'_>) -> SavingsOpportunity {
    SavingsOpportunity {
        id: "turf-removal".to_string(),
        category: OpportunityCategory::Water,
        name: "Turf Removal & Native Landscaping Rebate".to_string(),
        annual_savings: 300,
        upfront_cost: UpfrontCost::new(500, 1500),
        rebates: vec![rebate(
            "SoCal Water$mart Turf Replacement ($2/sqft)",
            1000,
            "https://socalwatersmart.com/turf-replacement",
        )],
        payback_months: 12,
        difficulty: Difficulty::Professional,
        confidence_score: 88,
        benefits: texts(&[
            "Receive $2 per square foot of turf removed (up to 5,000 sqft)",
            "Reduce outdoor water use by 50-70%",
            "Lower maintenance costs (no mowing, less watering)",
            "Drought-resistant landscaping increases property value",
        ]),
        next_steps: texts(&[
            "Measure lawn area to calculate rebate amount",
            "Pre-qualify at socalwatersmart.com before starting",
            "Get quotes from certified landscapers",
            "Track water bills monthly to measure savings",
        ]),
        methodology: "Outdoor watering accounts for 50% of residential water use. Average 500 sqft removal = $1,000 rebate. Saves $300/year in water costs.".to_string(),
        official_resources: Some(vec![
            resource(
                "SoCal Water$mart Turf Replacement Program",
                "https://socalwatersmart.com/turf-replacement/",
                ResourceKind::Program,
            ),
            resource(
                "Metropolitan Water District Rebates",
                "https://www.mwdh2o.com/rebates/",
                ResourceKind::Utility,
            ),
            resource(
                "California Water-Efficient Landscape Ordinance",
                "https://water.ca.gov/Programs/Water-Use-And-Efficiency/Urban-Water-Use-Efficiency/Model-Water-Efficient-Landscape-Ordinance",
                ResourceKind::Government,
            ),
        ]),
    }
}

fn attic_insulation(_: &RuleContext<'_>) -> SavingsOpportunity {
    SavingsOpportunity {
        id: "attic-insulation".to_string(),
        category: OpportunityCategory::Energy,
        name: "Attic Insulation Upgrade with Energy Rebate".to_string(),
        annual_savings: 420,
        upfront_cost: UpfrontCost::new(900, 2200),
        rebates: vec![rebate("SoCalGas Energy Savings Assistance", 300, SOCALGAS_REBATES)],
        payback_months: 28,
        difficulty: Difficulty::Professional,
        confidence_score: 85,
        benefits: texts(&[
            "Reduce heating/cooling costs by 20-30%",
            "Improve home comfort year-round",
            "Qualify for $300 utility rebate",
            "Measurable impact on monthly energy bills",
        ]),
        next_steps: texts(&[
            "Schedule free home energy audit first",
            "Get quotes from 3 certified insulation contractors",
            "Apply for SoCalGas rebate before installation",
            "Track monthly utility bills to measure ROI",
        ]),
        methodology: "Homes built before 1980 typically have R-11 or less insulation. Upgrading to R-38 saves $420/year average. Net cost after rebate: $600-1,900.".to_string(),
        official_resources: Some(vec![
            resource("SoCalGas Energy Efficiency Programs", SOCALGAS_REBATES, ResourceKind::Utility),
            resource(
                "California Energy Commission - Insulation",
                BUILDING_STANDARDS,
                ResourceKind::Government,
            ),
            resource(
                "U.S. Department of Energy - Insulation",
                "https://www.energy.gov/energysaver/insulation",
                ResourceKind::Government,
            ),
        ]),
    }
}

fn solar_installation(context: &RuleContext<'_>) -> SavingsOpportunity {
    SavingsOpportunity {
        id: "solar-installation".to_string(),
        category: OpportunityCategory::Solar,
        name: "Residential Solar with Federal Tax Credit".to_string(),
        annual_savings: 2400,
        upfront_cost: UpfrontCost::new(10_500, 17_500),
        rebates: vec![
            rebate("Federal Solar Tax Credit (30%)", 6000, SOLAR_TAX_CREDIT),
            rebate("CA SGIP Battery Storage Incentive", 1000, "https://www.selfgenca.com"),
        ],
        payback_months: 48,
        difficulty: Difficulty::Specialist,
        confidence_score: 88,
        benefits: texts(&[
            "Eliminate 80-90% of electric bills",
            "30% federal tax credit reduces net cost significantly",
            "Additional $1,000 for battery storage",
            "Monitor production and savings via app daily",
        ]),
        next_steps: texts(&[
            "Get 3 quotes from certified solar installers (energysage.com)",
            "Review 12 months of utility bills to size system correctly",
            "Apply for SGIP battery incentive (limited funds)",
            "Use monitoring app to track daily production and savings",
        ]),
        methodology: format!(
            "Solar feasibility score: {}/100. A 6kW system costs $15,000-25,000, or $10,500-17,500 after the 30% tax credit. Payback: 4-6 years.",
            context.property.solar_feasibility_score
        ),
        official_resources: Some(vec![
            resource(
                "U.S. Department of Energy - Solar Tax Credit",
                SOLAR_TAX_CREDIT,
                ResourceKind::Government,
            ),
            resource(
                "California SGIP (Self-Generation Incentive Program)",
                "https://www.selfgenca.com/",
                ResourceKind::Program,
            ),
            resource(
                "Go Solar California",
                "https://www.gosolarcalifornia.org/",
                ResourceKind::Government,
            ),
            resource(
                "EnergySage Solar Marketplace",
                "https://www.energysage.com/",
                ResourceKind::Program,
            ),
        ]),
    }
}

fn heat_pump_water_heater(_: &RuleContext<'_>) -> SavingsOpportunity {
    SavingsOpportunity {
        id: "heat-pump-water-heater".to_string(),
        category: OpportunityCategory::Energy,
        name: "Heat Pump Water Heater with Rebates".to_string(),
        annual_savings: 350,
        upfront_cost: UpfrontCost::new(1200, 2500),
        rebates: vec![
            rebate("SoCalGas Water Heater Rebate", 300, SOCALGAS_REBATES),
            rebate("Federal Energy Efficiency Tax Credit", 300, FEDERAL_TAX_CREDITS),
        ],
        payback_months: 36,
        difficulty: Difficulty::Professional,
        confidence_score: 82,
        benefits: texts(&[
            "Use 60% less energy than standard electric water heaters",
            "Qualify for $600 in combined rebates",
            "Longer lifespan (12-15 years vs 8-10 years)",
            "Track energy savings via utility bills",
        ]),
        next_steps: texts(&[
            "Check if current water heater is 8+ years old",
            "Get quotes from licensed plumbers",
            "Apply for rebates before installation",
            "Compare gas/electric bills monthly to measure savings",
        ]),
        methodology: "Water heating accounts for 18% of home energy use. Heat pump water heaters save $350/year average. Net cost after $600 rebates: $600-1,900.".to_string(),
        official_resources: Some(vec![
            resource("SoCalGas Water Heater Rebates", SOCALGAS_REBATES, ResourceKind::Utility),
            resource(
                "ENERGY STAR Water Heaters",
                "https://www.energystar.gov/products/water_heaters",
                ResourceKind::Government,
            ),
            resource(
                "Federal Tax Credits for Energy Efficiency",
                FEDERAL_TAX_CREDITS,
                ResourceKind::Government,
            ),
        ]),
    }
}

fn window_replacement(_: &RuleContext<'_>) -> SavingsOpportunity {
    SavingsOpportunity {
        id: "window-replacement".to_string(),
        category: OpportunityCategory::Energy,
        name: "Energy-Efficient Window Replacement".to_string(),
        annual_savings: 300,
        upfront_cost: UpfrontCost::new(3000, 8000),
        rebates: vec![rebate("Federal Energy Efficiency Tax Credit", 600, FEDERAL_TAX_CREDITS)],
        payback_months: 96,
        difficulty: Difficulty::Professional,
        confidence_score: 75,
        benefits: texts(&[
            "Reduce heating/cooling costs by 10-15%",
            "Improve home comfort and reduce drafts",
            "Qualify for $600 federal tax credit",
            "Increase home value and curb appeal",
        ]),
        next_steps: texts(&[
            "Prioritize windows with visible damage or drafts",
            "Get quotes for ENERGY STAR certified windows",
            "Consider phased approach (worst windows first)",
            "Track heating/cooling costs to measure impact",
        ]),
        methodology: "Homes built before 1990 typically have single-pane windows. Upgrading to double-pane saves $300/year. Net cost after tax credit: $2,400-7,400.".to_string(),
        official_resources: Some(vec![
            resource(
                "ENERGY STAR Windows & Doors",
                "https://www.energystar.gov/products/building_products/residential_windows_doors_and_skylights",
                ResourceKind::Government,
            ),
            resource(
                "Federal Tax Credits for Energy Efficiency",
                FEDERAL_TAX_CREDITS,
                ResourceKind::Government,
            ),
            resource(
                "California Energy Commission - Windows",
                BUILDING_STANDARDS,
                ResourceKind::Government,
            ),
        ]),
    }
}

fn roof_maintenance(context: &RuleContext<'_>) -> SavingsOpportunity {
    SavingsOpportunity {
        id: "roof-maintenance".to_string(),
        category: OpportunityCategory::Maintenance,
        name: "Roof Inspection and Preventive Maintenance".to_string(),
        annual_savings: 250,
        upfront_cost: UpfrontCost::new(300, 900),
        rebates: Vec::new(),
        payback_months: 24,
        difficulty: Difficulty::Professional,
        confidence_score: 80,
        benefits: texts(&[
            "Catch leaks before they damage insulation and framing",
            "Extend roof life and defer full replacement",
            "Keep insurance underwriting favorable",
        ]),
        next_steps: texts(&[
            "Schedule an inspection with a licensed roofing contractor",
            "Replace damaged shingles and flashing",
            "Clear gutters and roof debris before the rainy season",
            "Keep receipts to document maintenance for your insurer",
        ]),
        methodology: format!(
            "The roof is {} years old. Roofs past 15 years benefit from annual inspection; small repairs avoid an average of $250/year in water damage and energy loss.",
            context.property.roof_age
        ),
        official_resources: Some(vec![
            resource(
                "Contractors State License Board - Check a License",
                "https://www.cslb.ca.gov/",
                ResourceKind::Government,
            ),
            resource(
                "Ready for Wildfire - Home Hardening",
                "https://readyforwildfire.org/prepare-for-wildfire/get-ready/hardening-your-home/",
                ResourceKind::Government,
            ),
        ]),
    }
}

fn insurance_review(context: &RuleContext<'_>) -> SavingsOpportunity {
    let zone = context.property.wildfire_zone;
    let next_steps = match zone {
        WildfireZone::High => texts(&[
            "Document home-hardening work for Safer from Wildfires discounts",
            "Request quotes from at least 3 admitted carriers",
            "Ask about the California FAIR Plan if your carrier non-renews",
            "Pair FAIR Plan coverage with a difference-in-conditions policy",
        ]),
        WildfireZone::Medium => texts(&[
            "Request quotes from at least 3 admitted carriers",
            "Ask about Safer from Wildfires mitigation discounts",
            "Bundle home and auto policies",
            "Raise your deductible if you have emergency savings",
        ]),
        WildfireZone::Low => texts(&[
            "Request quotes from at least 3 admitted carriers",
            "Bundle home and auto policies",
            "Raise your deductible if you have emergency savings",
            "Review coverage limits against current rebuild cost",
        ]),
    };

    let mut resources = vec![resource(
        "California Department of Insurance",
        "https://www.insurance.ca.gov/",
        ResourceKind::Government,
    )];
    if zone != WildfireZone::Low {
        resources.push(resource(
            "Safer from Wildfires",
            "https://www.insurance.ca.gov/01-consumers/200-wrr/Safer-from-Wildfires.cfm",
            ResourceKind::Program,
        ));
    }
    if zone == WildfireZone::High {
        resources.push(resource(
            "California FAIR Plan",
            "https://www.cfpnet.com/",
            ResourceKind::Program,
        ));
    }

    SavingsOpportunity {
        id: "insurance-review".to_string(),
        category: OpportunityCategory::Insurance,
        name: "Review Homeowners Insurance Coverage and Discounts".to_string(),
        annual_savings: 350,
        upfront_cost: UpfrontCost::FREE,
        rebates: Vec::new(),
        payback_months: 0,
        difficulty: Difficulty::Diy,
        confidence_score: 80,
        benefits: texts(&[
            "Compare premiums without changing coverage",
            "Claim mitigation and bundling discounts",
            "Confirm limits match current rebuild costs",
        ]),
        next_steps,
        methodology: format!(
            "Wildfire zone: {}. Shopping coverage and claiming mitigation discounts saves an average of $350/year.",
            zone.label()
        ),
        official_resources: Some(resources),
    }
}

fn property_tax_review(context: &RuleContext<'_>) -> SavingsOpportunity {
    let resources = if context.la_county_municipal {
        vec![resource(
            "LA County Assessor - Decline in Value Review",
            "https://assessor.lacounty.gov/real-estate-toolkit/decline-in-value",
            ResourceKind::Government,
        )]
    } else {
        vec![resource(
            "California State Board of Equalization - Property Tax",
            "https://www.boe.ca.gov/proptaxes/",
            ResourceKind::Government,
        )]
    };

    SavingsOpportunity {
        id: "property-tax-review".to_string(),
        category: OpportunityCategory::PropertyTax,
        name: "Request Property Tax Assessment Review".to_string(),
        annual_savings: 400,
        upfront_cost: UpfrontCost::FREE,
        rebates: Vec::new(),
        payback_months: 0,
        difficulty: Difficulty::Diy,
        confidence_score: 70,
        benefits: texts(&[
            "Lower the assessed value used for your tax bill",
            "No fee to file with the county assessor",
        ]),
        next_steps: texts(&[
            "Pull recent comparable sales in your neighborhood",
            "File a decline-in-value review with the county assessor",
            "Appeal to the assessment appeals board if denied",
        ]),
        methodology: format!(
            "Assessed value ${} exceeds the last sale price ${}. A successful review typically saves about $400/year.",
            context.property.assessed_value, context.property.last_sale_price
        ),
        official_resources: Some(resources),
    }
}
