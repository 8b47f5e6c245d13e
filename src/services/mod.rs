pub mod insight;
pub mod reports;

pub use insight::InsightService;
pub use reports::ReportService;
