use crate::error::{AppError, Result};
use crate::insight::{build_messages, parse_display_config, DisplayConfig};
use crate::llm::ChatModel;
use crate::repositories::DocumentStore;
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, info};

/// Answers a free-text question about the molten metal summary with a chart
/// or card configuration produced by the model.
#[derive(Clone)]
pub struct InsightService {
    store: Arc<dyn DocumentStore>,
    model: Arc<dyn ChatModel>,
    collection: String,
}

impl InsightService {
    pub fn new(
        store: Arc<dyn DocumentStore>,
        model: Arc<dyn ChatModel>,
        collection: impl Into<String>,
    ) -> Self {
        Self {
            store,
            model,
            collection: collection.into(),
        }
    }

    pub async fn answer(&self, prompt: &str) -> Result<Value> {
        if prompt.trim().is_empty() {
            return Err(AppError::InvalidInput("prompt must not be empty".into()));
        }

        let data = self.store.find_all(&self.collection).await?;
        debug!(collection = %self.collection, records = data.len(), "loaded summary for insight");

        let messages = build_messages(prompt, &data)?;
        let text = self
            .model
            .complete(&messages)
            .await?
            .ok_or(AppError::UpstreamEmpty)?;

        let (value, config) = parse_display_config(&text)?;
        let display_type = match &config {
            DisplayConfig::Cards { .. } => "cards",
            DisplayConfig::Chart { .. } => "chart",
        };
        info!(
            display_type,
            not_relevant = config.is_not_relevant(),
            "insight generated"
        );

        Ok(value)
    }
}
