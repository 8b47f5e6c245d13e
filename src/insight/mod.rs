//! Turning a question about the stored summaries into a chart or card set.

pub mod display;
pub mod prompt;

pub use display::{parse_display_config, DisplayConfig};
pub use prompt::{build_messages, NOT_RELEVANT_TITLE};
