use std::sync::Arc;

use axum::http::StatusCode;

use crate::property::{LookupError, NormalizedAddress, PropertyDataSource};
use crate::reports::ReportView;
use crate::savings::{CostTierBreakdown, OpportunityGenerator, PlanError, PrioritizedPlan};

use super::domain::{Session, SessionId, SessionUpdate};
use super::repository::{RepositoryError, SessionRepository};
use super::store::{SessionError, SessionStore};

/// Service composing the property source, opportunity generator, and session store.
pub struct SavingsService<R, S> {
    store: Arc<SessionStore<R>>,
    source: Arc<S>,
    generator: Arc<OpportunityGenerator>,
}

impl<R, S> SavingsService<R, S>
where
    R: SessionRepository + 'static,
    S: PropertyDataSource + 'static,
{
    pub fn new(store: Arc<SessionStore<R>>, source: Arc<S>) -> Self {
        Self::with_generator(store, source, OpportunityGenerator::standard())
    }

    pub fn with_generator(
        store: Arc<SessionStore<R>>,
        source: Arc<S>,
        generator: OpportunityGenerator,
    ) -> Self {
        Self {
            store,
            source,
            generator: Arc::new(generator),
        }
    }

    pub fn store(&self) -> &Arc<SessionStore<R>> {
        &self.store
    }

    /// Address to persisted session. Nothing is stored unless every step succeeds.
    pub async fn lookup(&self, raw_address: &str) -> Result<Session, SavingsServiceError> {
        let address = NormalizedAddress::parse(raw_address).map_err(LookupError::from)?;
        let property = self.source.fetch(&address).await?;
        let opportunities = self
            .generator
            .generate(&property)
            .map_err(LookupError::from)?;

        let session = self.store.create(property, opportunities)?;
        tracing::info!(
            session_id = %session.session_id,
            address = %address,
            opportunities = session.opportunities.len(),
            "property lookup completed"
        );
        Ok(session)
    }

    pub fn session(&self, id: &SessionId) -> Result<Session, SavingsServiceError> {
        Ok(self.store.get(id)?)
    }

    pub fn end_session(&self, id: &SessionId) -> Result<(), SavingsServiceError> {
        Ok(self.store.delete(id)?)
    }

    /// Returns the stored plan, creating the recommended plan on first access.
    pub fn plan(&self, id: &SessionId) -> Result<PrioritizedPlan, SavingsServiceError> {
        let session = self.store.get(id)?;
        if let Some(plan) = session.plan {
            return Ok(plan);
        }

        let plan = PrioritizedPlan::recommend(&session.opportunities);
        self.store.update(id, SessionUpdate::plan(plan.clone()))?;
        tracing::debug!(session_id = %id, top = plan.top_opportunities.len(), "plan initialized");
        Ok(plan)
    }

    pub fn remove_from_plan(
        &self,
        id: &SessionId,
        opportunity_id: &str,
    ) -> Result<PrioritizedPlan, SavingsServiceError> {
        let session = self.store.get(id)?;
        let mut plan = session
            .plan
            .unwrap_or_else(|| PrioritizedPlan::recommend(&session.opportunities));

        plan.remove(opportunity_id)?;
        self.store.update(id, SessionUpdate::plan(plan.clone()))?;
        tracing::info!(
            session_id = %id,
            opportunity_id,
            total_annual_savings = plan.total_annual_savings,
            "opportunity removed from plan"
        );
        Ok(plan)
    }

    pub fn reset_plan(&self, id: &SessionId) -> Result<PrioritizedPlan, SavingsServiceError> {
        let session = self.store.get(id)?;
        let plan = PrioritizedPlan::recommend(&session.opportunities);
        self.store.update(id, SessionUpdate::plan(plan.clone()))?;
        tracing::info!(session_id = %id, "plan reset to recommendation");
        Ok(plan)
    }

    pub fn tiers(&self, id: &SessionId) -> Result<CostTierBreakdown, SavingsServiceError> {
        let session = self.store.get(id)?;
        Ok(CostTierBreakdown::classify(&session.opportunities))
    }

    pub fn report_view(&self, id: &SessionId) -> Result<ReportView, SavingsServiceError> {
        let session = self.store.get(id)?;
        Ok(ReportView::from_session(&session, self.store.now()))
    }

    /// Reports whether the session backend answers; backs the health endpoint.
    pub fn ping(&self) -> Result<(), SavingsServiceError> {
        Ok(self.store.ping()?)
    }
}

/// Error raised by the savings service.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SavingsServiceError {
    #[error(transparent)]
    Lookup(#[from] LookupError),
    #[error(transparent)]
    Session(#[from] SessionError),
    #[error(transparent)]
    Plan(#[from] PlanError),
}

impl SavingsServiceError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Lookup(LookupError::InvalidAddress(_) | LookupError::InvalidRecord(_)) => {
                StatusCode::BAD_REQUEST
            }
            Self::Lookup(LookupError::NotSupported(_)) => StatusCode::UNPROCESSABLE_ENTITY,
            Self::Lookup(LookupError::Upstream(_)) => StatusCode::BAD_GATEWAY,
            Self::Session(SessionError::NotFound(_))
            | Self::Session(SessionError::Repository(RepositoryError::NotFound)) => {
                StatusCode::NOT_FOUND
            }
            Self::Session(SessionError::Repository(_)) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Plan(_) => StatusCode::CONFLICT,
        }
    }

    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Lookup(error) if error.is_retryable())
    }
}
