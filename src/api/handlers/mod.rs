pub mod health;
pub mod insight;
pub mod reports;

use crate::services::{InsightService, ReportService};

/// Shared by every handler; both services are cheap to clone.
#[derive(Clone)]
pub struct AppState {
    pub reports: ReportService,
    pub insights: InsightService,
}
