use crate::property::{PropertyRecord, PropertyValidationError};

use super::domain::SavingsOpportunity;
use super::rules::{standard_rules, OpportunityRule, RuleContext};

/// Evaluates the rule table against a property record.
#[derive(Debug)]
pub struct OpportunityGenerator {
    rules: Vec<OpportunityRule>,
}

impl Default for OpportunityGenerator {
    fn default() -> Self {
        Self::standard()
    }
}

impl OpportunityGenerator {
    pub fn standard() -> Self {
        Self {
            rules: standard_rules(),
        }
    }

    pub fn rules(&self) -> &[OpportunityRule] {
        &self.rules
    }

    /// Emits one opportunity per matching rule, in table order. The record is
    /// validated before any rule runs.
    pub fn generate(
        &self,
        property: &PropertyRecord,
    ) -> Result<Vec<SavingsOpportunity>, PropertyValidationError> {
        property.validate()?;

        let context = RuleContext::new(property);
        let opportunities: Vec<SavingsOpportunity> = self
            .rules
            .iter()
            .filter(|rule| (rule.applies)(property))
            .map(|rule| (rule.build)(&context))
            .collect();

        tracing::debug!(
            address = %property.address,
            generated = opportunities.len(),
            la_county = context.la_county_municipal,
            "generated savings opportunities"
        );

        Ok(opportunities)
    }
}
