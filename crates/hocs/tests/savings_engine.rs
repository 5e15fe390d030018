use std::collections::HashSet;

use hocs::property::{NormalizedAddress, PropertyRecord, SyntheticPropertySource, WildfireZone};
use hocs::savings::{
    CostTier, CostTierBreakdown, OpportunityGenerator, PlanError, PrioritizedPlan,
    SavingsOpportunity, TOP_PLAN_SIZE,
};

const ADDRESSES: &[&str] = &[
    "123 Main St, Pasadena, CA 91101",
    "200 N Spring St, Los Angeles, CA 90012",
    "1 Dr Carlton B Goodlett Pl, San Francisco, CA 94102",
    "202 C St, San Diego, CA 92101",
    "915 I St, Sacramento, CA 95814",
    "1 Civic Center Plaza, Irvine, CA 92606",
    "2180 Milvia St, Berkeley, CA 94704",
];

fn synthesize(address: &str) -> PropertyRecord {
    let address = NormalizedAddress::parse(address).expect("address parses");
    SyntheticPropertySource::new()
        .synthesize(&address)
        .expect("supported city")
}

fn generate(property: &PropertyRecord) -> Vec<SavingsOpportunity> {
    OpportunityGenerator::standard()
        .generate(property)
        .expect("valid property")
}

fn assert_plan_invariants(plan: &PrioritizedPlan, universe: &[SavingsOpportunity]) {
    assert!(plan.top_opportunities.len() <= TOP_PLAN_SIZE);
    assert_eq!(
        plan.total_annual_savings,
        plan.top_opportunities
            .iter()
            .map(|opportunity| opportunity.annual_savings)
            .sum::<u32>()
    );

    let ids: Vec<&str> = plan.opportunities().map(|o| o.id.as_str()).collect();
    let distinct: HashSet<&str> = ids.iter().copied().collect();
    assert_eq!(ids.len(), distinct.len(), "no opportunity appears twice");
    assert_eq!(ids.len(), universe.len(), "plan covers every opportunity");
}

#[test]
fn synthesized_records_produce_well_formed_opportunities() {
    for address in ADDRESSES {
        let property = synthesize(address);
        property.validate().expect("synthesized records are valid");
        assert!(property.electric_provider.is_some(), "{address}");

        let opportunities = generate(&property);
        assert!(opportunities.len() >= 9, "unconditional rules always apply");

        let ids: HashSet<&str> = opportunities.iter().map(|o| o.id.as_str()).collect();
        assert_eq!(ids.len(), opportunities.len(), "ids are unique");

        for opportunity in &opportunities {
            assert!(opportunity.confidence_score <= 100);
            assert!(opportunity.upfront_cost.min <= opportunity.upfront_cost.max);
            assert!(!opportunity.next_steps.is_empty(), "{}", opportunity.id);
            assert!(!opportunity.methodology.is_empty(), "{}", opportunity.id);
        }
    }
}

#[test]
fn same_address_yields_same_result() {
    let first = synthesize("123 Main St, Pasadena, CA 91101");
    let second = synthesize("  123 Main St,  Pasadena, ca 91101 ");

    assert_eq!(first, second);
    assert_eq!(generate(&first), generate(&second));
}

#[test]
fn utilities_follow_service_territories() {
    let cases = [
        ("123 Main St, Pasadena, CA 91101", "Pasadena Water & Power"),
        ("202 C St, San Diego, CA 92101", "San Diego Gas & Electric"),
        ("915 I St, Sacramento, CA 95814", "Sacramento Municipal Utility District"),
    ];

    for (address, electric) in cases {
        assert_eq!(
            synthesize(address).electric_provider.as_deref(),
            Some(electric),
            "{address}"
        );
    }
}

#[test]
fn older_home_triggers_envelope_and_solar_rules() {
    let property = PropertyRecord {
        year_built: 1965,
        solar_feasibility_score: 85,
        roof_age: 18,
        wildfire_zone: WildfireZone::Medium,
        ..synthesize("123 Main St, Pasadena, CA 91101")
    };

    let ids: Vec<String> = generate(&property).into_iter().map(|o| o.id).collect();

    for expected in [
        "energy-audit",
        "water-kit",
        "led-lighting",
        "power-strips",
        "weatherization",
        "smart-thermostat",
        "turf-removal",
        "attic-insulation",
        "solar-installation",
        "heat-pump-water-heater",
        "window-replacement",
        "roof-maintenance",
        "insurance-review",
    ] {
        assert!(ids.iter().any(|id| id == expected), "missing {expected}");
    }
}

#[test]
fn tiers_partition_every_generated_opportunity() {
    for address in ADDRESSES {
        let opportunities = generate(&synthesize(address));
        let breakdown = CostTierBreakdown::classify(&opportunities);

        let mut seen = 0;
        for group in breakdown.groups() {
            for opportunity in &group.opportunities {
                assert_eq!(CostTier::classify(&opportunity.upfront_cost), group.tier);
            }
            seen += group.len();
        }
        assert_eq!(seen, opportunities.len());
        assert_eq!(
            breakdown.total_annual_savings(),
            opportunities.iter().map(|o| o.annual_savings).sum::<u32>()
        );
    }
}

#[test]
fn plan_holds_invariants_through_removals_and_reset() {
    let opportunities = generate(&synthesize("123 Main St, Pasadena, CA 91101"));
    let recommended = PrioritizedPlan::recommend(&opportunities);
    assert_plan_invariants(&recommended, &opportunities);

    let mut plan = recommended.clone();
    for _ in 0..(opportunities.len() * 2) {
        let first = plan.top_opportunities[0].id.clone();
        plan.remove(&first).expect("secondary list is never empty");

        assert!(plan.customized);
        assert_plan_invariants(&plan, &opportunities);
        assert_eq!(plan.top_opportunities.len(), TOP_PLAN_SIZE);
        assert!(!plan.top_opportunities.iter().any(|o| o.id == first));
        assert_eq!(
            plan.secondary_opportunities.last().map(|o| o.id.as_str()),
            Some(first.as_str())
        );
    }

    let stray = plan.secondary_opportunities[0].id.clone();
    assert!(matches!(plan.remove(&stray), Err(PlanError::NotInTop(_))));

    plan.reset(&opportunities);
    assert_eq!(plan, recommended);
}

#[test]
fn recommended_plan_walks_tiers_from_free_to_major() {
    let property = PropertyRecord {
        year_built: 1965,
        solar_feasibility_score: 85,
        roof_age: 18,
        ..synthesize("123 Main St, Pasadena, CA 91101")
    };
    let plan = PrioritizedPlan::recommend(&generate(&property));

    let tiers: Vec<CostTier> = plan
        .opportunities()
        .map(|opportunity| CostTier::classify(&opportunity.upfront_cost))
        .collect();
    assert!(
        tiers.windows(2).all(|pair| pair[0] <= pair[1]),
        "{tiers:?}"
    );
    assert!(plan.top_opportunities[0].is_free());

    let tail: Vec<&str> = plan
        .secondary_opportunities
        .iter()
        .rev()
        .take(2)
        .map(|opportunity| opportunity.id.as_str())
        .collect();
    assert_eq!(tail, vec!["window-replacement", "solar-installation"]);
}
