use super::DocumentStore;
use crate::error::Result;
use crate::models::EnergyEvent;
use serde_json::Value;
use std::sync::Arc;
use tracing::warn;

/// Read access to the raw energy event collection.
#[derive(Clone)]
pub struct EnergyRepository {
    store: Arc<dyn DocumentStore>,
    collection: String,
}

impl EnergyRepository {
    pub fn new(store: Arc<dyn DocumentStore>, collection: impl Into<String>) -> Self {
        Self {
            store,
            collection: collection.into(),
        }
    }

    /// Raw documents exactly as stored.
    pub async fn find_raw(&self) -> Result<Vec<Value>> {
        self.store.find_all(&self.collection).await
    }

    /// Raw documents read as events. Documents that are not JSON objects are
    /// skipped with a warning.
    pub async fn find_events(&self) -> Result<Vec<EnergyEvent>> {
        let docs = self.find_raw().await?;
        Ok(to_events(docs, &self.collection))
    }
}

fn to_events(docs: Vec<Value>, collection: &str) -> Vec<EnergyEvent> {
    let total = docs.len();
    let events: Vec<EnergyEvent> = docs
        .into_iter()
        .filter(Value::is_object)
        .filter_map(|doc| serde_json::from_value(doc).ok())
        .collect();

    if events.len() < total {
        warn!(
            collection,
            skipped = total - events.len(),
            "ignoring documents that are not energy events"
        );
    }
    events
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_to_events_skips_non_objects() {
        let docs = vec![
            json!({ "Department": "A" }),
            json!("stray string"),
            json!([1, 2, 3]),
            json!({ "Department": "B", "Consumption": "bad" }),
        ];

        let events = to_events(docs, "EnergyMonitoring");
        assert_eq!(events.len(), 2);
        assert_eq!(events[1].department.as_deref(), Some("B"));
        assert_eq!(events[1].consumption, None);
    }
}
