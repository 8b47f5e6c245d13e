pub mod insight;
pub mod reports;
