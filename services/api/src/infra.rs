use hocs::config::AppConfig;
use hocs::error::AppError;
use hocs::property::SyntheticPropertySource;
use hocs::reports::{
    HtmlPdfRenderer, MemorySubscriptionStore, ReportMailer, ReportRenderer, ReportService,
    ResendMailer, UnconfiguredMailer,
};
use hocs::retry::RetryPolicy;
use hocs::sessions::{MemorySessionRepository, SavingsService, SessionStore};
use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use std::time::Duration;

pub(crate) type AppSavingsService =
    SavingsService<MemorySessionRepository, SyntheticPropertySource>;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
    pub(crate) savings: Arc<AppSavingsService>,
}

/// Everything the HTTP routes and the CLI need, wired from configuration.
#[derive(Clone)]
pub(crate) struct Services {
    pub(crate) savings: Arc<AppSavingsService>,
    pub(crate) reports: Arc<ReportService>,
    pub(crate) retry: RetryPolicy,
}

impl Services {
    pub(crate) fn from_config(config: &AppConfig) -> Result<Self, AppError> {
        let renderer = HtmlPdfRenderer::from_config(&config.reports)?;
        let mailer: Arc<dyn ReportMailer> = match ResendMailer::from_config(&config.reports) {
            Some(mailer) => Arc::new(mailer),
            None => {
                tracing::warn!("RESEND_API_KEY not set; report emails are disabled");
                Arc::new(UnconfiguredMailer)
            }
        };

        Ok(Self::new(
            config.sessions.ttl,
            RetryPolicy::from_config(&config.upstream),
            Arc::new(renderer),
            mailer,
        ))
    }

    pub(crate) fn new(
        ttl: Duration,
        retry: RetryPolicy,
        renderer: Arc<dyn ReportRenderer>,
        mailer: Arc<dyn ReportMailer>,
    ) -> Self {
        let store = SessionStore::new(Arc::new(MemorySessionRepository::new()), ttl);
        let savings = Arc::new(SavingsService::new(
            Arc::new(store),
            Arc::new(SyntheticPropertySource::new()),
        ));
        let reports = Arc::new(ReportService::new(
            renderer,
            mailer,
            Arc::new(MemorySubscriptionStore::new()),
        ));

        Self {
            savings,
            reports,
            retry,
        }
    }

    pub(crate) fn app_state(
        &self,
        readiness: Arc<AtomicBool>,
        metrics: PrometheusHandle,
    ) -> AppState {
        AppState {
            readiness,
            metrics: Arc::new(metrics),
            savings: Arc::clone(&self.savings),
        }
    }
}
