//! Action plan reports: the read model, PDF rendering, email delivery and
//! update subscriptions.

pub mod delivery;
pub mod render;
pub mod router;
pub mod service;
pub mod subscriptions;
pub mod view;

#[cfg(test)]
mod tests;

pub use delivery::{
    email_body, is_valid_email, DeliveryError, ReportEmail, ReportMailer, ResendMailer,
    UnconfiguredMailer,
};
pub use render::{format_money, HtmlPdfRenderer, RenderError, ReportRenderer};
pub use router::{report_router, EmailReportRequest, PdfReportRequest, ReportRoutesState};
pub use service::{DeliveryReceipt, ReportError, ReportService};
pub use subscriptions::{MemorySubscriptionStore, Subscription, SubscriptionStore};
pub use view::ReportView;
