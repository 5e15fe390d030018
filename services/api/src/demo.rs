use clap::Args;
use hocs::config::SessionConfig;
use hocs::error::AppError;
use hocs::property::SyntheticPropertySource;
use hocs::reports::format_money;
use hocs::savings::{CostTierBreakdown, PrioritizedPlan};
use hocs::sessions::{MemorySessionRepository, SavingsService, Session, SessionStore};
use std::fmt::{self, Write as _};
use std::sync::Arc;

#[derive(Args, Debug)]
pub(crate) struct LookupArgs {
    /// Full California address, e.g. "123 Main St, Pasadena, CA 91101"
    #[arg(long)]
    pub(crate) address: String,
    /// Also print the recommended top-five plan
    #[arg(long)]
    pub(crate) plan: bool,
    /// Also print opportunities grouped by upfront cost
    #[arg(long)]
    pub(crate) tiers: bool,
}

pub(crate) async fn run_lookup(args: LookupArgs) -> Result<(), AppError> {
    let store = SessionStore::new(
        Arc::new(MemorySessionRepository::new()),
        SessionConfig::default().ttl,
    );
    let service = SavingsService::new(Arc::new(store), Arc::new(SyntheticPropertySource::new()));

    let session = service.lookup(&args.address).await?;
    let output = render_lookup(&session, args.plan, args.tiers).map_err(std::io::Error::other)?;
    print!("{output}");
    Ok(())
}

pub(crate) fn render_lookup(
    session: &Session,
    show_plan: bool,
    show_tiers: bool,
) -> Result<String, fmt::Error> {
    let property = &session.property;
    let mut out = String::new();

    writeln!(out, "HOCS savings lookup")?;
    writeln!(out, "Address: {}", property.address)?;
    writeln!(
        out,
        "Built {} · {} sq ft · {} bd / {} ba · roof {} yrs · solar {}/100 · wildfire {}",
        property.year_built,
        property.square_feet,
        property.bedrooms,
        property.bathrooms,
        property.roof_age,
        property.solar_feasibility_score,
        property.wildfire_zone.label(),
    )?;
    writeln!(
        out,
        "Assessed {} · last sale {} · tax est. {}",
        format_money(money(property.assessed_value)),
        format_money(money(property.last_sale_price)),
        format_money(money(property.property_tax_estimate)),
    )?;
    writeln!(
        out,
        "Utilities: electric {} · gas {} · water {}",
        property.electric_provider.as_deref().unwrap_or("unknown"),
        property.gas_provider.as_deref().unwrap_or("unknown"),
        property.water_provider.as_deref().unwrap_or("unknown"),
    )?;

    let total: u32 = session
        .opportunities
        .iter()
        .map(|opportunity| opportunity.annual_savings)
        .sum();
    writeln!(
        out,
        "\nOpportunities ({}, {} per year combined)",
        session.opportunities.len(),
        format_money(i64::from(total)),
    )?;
    for opportunity in &session.opportunities {
        writeln!(
            out,
            "- [{}] {}: {}/yr, upfront {}, payback {} months",
            opportunity.category.label(),
            opportunity.name,
            format_money(i64::from(opportunity.annual_savings)),
            upfront(opportunity.upfront_cost.min, opportunity.upfront_cost.max),
            opportunity.payback_months,
        )?;
    }

    if show_tiers {
        let breakdown = CostTierBreakdown::classify(&session.opportunities);
        writeln!(out, "\nBy upfront cost")?;
        for group in breakdown.groups() {
            if group.is_empty() {
                continue;
            }
            writeln!(
                out,
                "{} ({} items, {}/yr)",
                group.label,
                group.len(),
                format_money(i64::from(group.total_annual_savings)),
            )?;
            for opportunity in &group.opportunities {
                writeln!(out, "  - {}", opportunity.name)?;
            }
        }
    }

    if show_plan {
        let plan = session
            .plan
            .clone()
            .unwrap_or_else(|| PrioritizedPlan::recommend(&session.opportunities));
        writeln!(
            out,
            "\nRecommended plan ({}/yr)",
            format_money(i64::from(plan.total_annual_savings))
        )?;
        for (rank, opportunity) in plan.top_opportunities.iter().enumerate() {
            writeln!(
                out,
                "{}. {} ({}/yr)",
                rank + 1,
                opportunity.name,
                format_money(i64::from(opportunity.annual_savings)),
            )?;
        }
        if !plan.secondary_opportunities.is_empty() {
            writeln!(
                out,
                "Also consider: {}",
                plan.secondary_opportunities
                    .iter()
                    .map(|opportunity| opportunity.name.as_str())
                    .collect::<Vec<_>>()
                    .join("; ")
            )?;
        }
    }

    Ok(out)
}

fn money(amount: u64) -> i64 {
    i64::try_from(amount).unwrap_or(i64::MAX)
}

fn upfront(min: u32, max: u32) -> String {
    if max == 0 {
        "free".to_string()
    } else {
        format!(
            "{} to {}",
            format_money(i64::from(min)),
            format_money(i64::from(max))
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hocs::savings::OpportunityGenerator;
    use hocs::sessions::SessionId;

    fn session() -> Session {
        let source = SyntheticPropertySource::new();
        let address = hocs::property::NormalizedAddress::parse("123 Main St, Pasadena, CA 91101")
            .expect("address parses");
        let property = source.synthesize(&address).expect("supported city");
        let opportunities = OpportunityGenerator::standard()
            .generate(&property)
            .expect("valid record");
        let now = chrono::Utc::now();
        Session {
            session_id: SessionId::generate(),
            property,
            opportunities,
            plan: None,
            created_at: now,
            expires_at: now + chrono::Duration::hours(1),
        }
    }

    #[test]
    fn output_lists_every_opportunity() {
        let session = session();

        let output = render_lookup(&session, false, false).expect("rendered");

        assert!(output.contains("Address: 123 Main St, Pasadena, CA 91101"));
        for opportunity in &session.opportunities {
            assert!(output.contains(&opportunity.name), "{}", opportunity.name);
        }
        assert!(!output.contains("Recommended plan"));
        assert!(!output.contains("By upfront cost"));
    }

    #[test]
    fn optional_sections_follow_flags() {
        let session = session();

        let output = render_lookup(&session, true, true).expect("rendered");

        assert!(output.contains("Recommended plan"));
        assert!(output.contains("1. "));
        assert!(output.contains("By upfront cost"));
        assert!(output.contains("No-Cost"));
    }

    #[test]
    fn free_items_print_as_free() {
        assert_eq!(upfront(0, 0), "free");
        assert_eq!(upfront(125, 225), "$125 to $225");
    }
}
