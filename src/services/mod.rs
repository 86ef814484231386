pub mod analytics_service;
pub mod link_service;
pub mod redirect_service;

pub use analytics_service::{AnalyticsService, AnalyticsSummary, DailyClicks, TopLink};
pub use link_service::{CreateLinkRequest, CreatedLink, LinkService};
pub use redirect_service::{RedirectService, VisitContext};
