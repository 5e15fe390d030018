use std::collections::BTreeSet;

use super::common::*;
use crate::savings::{PlanError, PrioritizedPlan, SavingsOpportunity, TOP_PLAN_SIZE};

fn assert_partition(plan: &PrioritizedPlan, all: &[SavingsOpportunity]) {
    let expected: BTreeSet<&str> = all.iter().map(|opportunity| opportunity.id.as_str()).collect();
    let top: BTreeSet<&str> = ids(&plan.top_opportunities).into_iter().collect();
    let secondary: BTreeSet<&str> = ids(&plan.secondary_opportunities).into_iter().collect();

    assert!(top.is_disjoint(&secondary));
    assert_eq!(top.union(&secondary).copied().collect::<BTreeSet<_>>(), expected);
    assert_eq!(plan.top_opportunities.len(), TOP_PLAN_SIZE.min(all.len()));
    assert_eq!(
        plan.total_annual_savings,
        plan.top_opportunities
            .iter()
            .map(|opportunity| opportunity.annual_savings)
            .sum::<u32>()
    );
}

#[test]
fn recommend_takes_the_five_highest_ranked() {
    let all = seven_opportunities();
    let plan = PrioritizedPlan::recommend(&all);

    assert_eq!(ids(&plan.top_opportunities), vec!["a", "b", "c", "d", "e"]);
    assert_eq!(ids(&plan.secondary_opportunities), vec!["f", "g"]);
    assert_eq!(plan.total_annual_savings, 1070);
    assert!(!plan.customized);
    assert_partition(&plan, &all);
}

#[test]
fn small_sets_fit_entirely_in_the_top_list() {
    let all = vec![opportunity("only", 100, 0, 90), opportunity("other", 50, 200, 80)];
    let plan = PrioritizedPlan::recommend(&all);
    assert_eq!(plan.top_opportunities.len(), 2);
    assert!(plan.secondary_opportunities.is_empty());

    let empty = PrioritizedPlan::recommend(&[]);
    assert!(empty.is_empty());
    assert_eq!(empty.total_annual_savings, 0);
}

#[test]
fn remove_promotes_head_of_secondary_into_the_vacated_slot() {
    let all = seven_opportunities();
    let mut plan = PrioritizedPlan::recommend(&all);

    plan.remove("c").expect("c is in the top list");

    assert_eq!(ids(&plan.top_opportunities), vec!["a", "b", "f", "d", "e"]);
    assert_eq!(ids(&plan.secondary_opportunities), vec!["g", "c"]);
    assert_eq!(plan.total_annual_savings, 1150);
    assert!(plan.customized);
    assert_partition(&plan, &all);
}

#[test]
fn remove_rejects_secondary_and_unknown_ids() {
    let all = seven_opportunities();
    let mut plan = PrioritizedPlan::recommend(&all);
    let before = plan.clone();

    assert_eq!(plan.remove("g"), Err(PlanError::NotInTop("g".to_string())));
    assert_eq!(
        plan.remove("missing"),
        Err(PlanError::UnknownOpportunity("missing".to_string()))
    );
    assert_eq!(plan, before);
}

#[test]
fn remove_without_replacement_is_rejected() {
    let all = vec![
        opportunity("a", 300, 0, 95),
        opportunity("b", 120, 0, 98),
        opportunity("c", 100, 0, 50),
    ];
    let mut plan = PrioritizedPlan::recommend(&all);
    let before = plan.clone();

    assert_eq!(
        plan.remove("b"),
        Err(PlanError::NothingToPromote("b".to_string()))
    );
    assert_eq!(plan, before);
}

#[test]
fn invariants_hold_across_repeated_removals() {
    let all = seven_opportunities();
    let mut plan = PrioritizedPlan::recommend(&all);

    for _ in 0..10 {
        let head = plan.top_opportunities[0].id.clone();
        plan.remove(&head).expect("secondary is never empty");
        assert_partition(&plan, &all);
    }
}

#[test]
fn reset_restores_the_recommended_plan() {
    let all = seven_opportunities();
    let recommended = PrioritizedPlan::recommend(&all);

    let mut plan = recommended.clone();
    plan.remove("a").expect("removable");
    plan.remove("b").expect("removable");
    assert_ne!(plan, recommended);

    plan.reset(&all);
    assert_eq!(plan, recommended);
    assert!(!plan.customized);

    plan.reset(&all);
    assert_eq!(plan, recommended);
}

#[test]
fn serializes_with_client_field_names() {
    let plan = PrioritizedPlan::recommend(&seven_opportunities());
    let value = serde_json::to_value(&plan).expect("serializes");
    assert!(value["topOpportunities"].is_array());
    assert!(value["secondaryOpportunities"].is_array());
    assert_eq!(value["totalAnnualSavings"], 1070);
    assert_eq!(value["customized"], false);
}
