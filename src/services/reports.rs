use crate::aggregation::{
    self, department_cost, kwh_average, kwh_parts, molten_metal, pf_trend, time_zone,
    DailyPfTrend, DepartmentCost, KwhAverage, KwhParts, MoltenMetalConsumption, TimeZoneCost,
};
use crate::config::CollectionsConfig;
use crate::error::Result;
use crate::models::EnergyEvent;
use crate::repositories::{DocumentStore, EnergyRepository};
use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;
use tracing::{info, warn};

/// Runs one report: read raw events, build the summary, replace the summary
/// collection and hand the rows back for the response.
#[derive(Clone)]
pub struct ReportService {
    energy: EnergyRepository,
    store: Arc<dyn DocumentStore>,
    collections: CollectionsConfig,
}

impl ReportService {
    pub fn new(store: Arc<dyn DocumentStore>, collections: CollectionsConfig) -> Self {
        Self {
            energy: EnergyRepository::new(store.clone(), collections.raw.clone()),
            store,
            collections,
        }
    }

    pub async fn department_costs(&self) -> Result<Vec<DepartmentCost>> {
        self.refresh(&self.collections.department_costs, |events| {
            flag_unreadable_costs(events);
            department_cost::build(events)
        })
        .await
    }

    pub async fn kwh_averages(&self) -> Result<Vec<KwhAverage>> {
        self.refresh(&self.collections.kwh_averages, kwh_average::build)
            .await
    }

    pub async fn kwh_parts(&self) -> Result<Vec<KwhParts>> {
        self.refresh(&self.collections.kwh_parts, kwh_parts::build)
            .await
    }

    pub async fn molten_metal(&self) -> Result<Vec<MoltenMetalConsumption>> {
        self.refresh(&self.collections.molten_metal, molten_metal::build)
            .await
    }

    pub async fn time_zone_costs(&self) -> Result<Vec<TimeZoneCost>> {
        self.refresh(&self.collections.time_zone_costs, |events| {
            flag_unreadable_costs(events);
            time_zone::build(events)
        })
        .await
    }

    pub async fn pf_trends(&self) -> Result<Vec<DailyPfTrend>> {
        self.refresh(&self.collections.pf_trends, pf_trend::build)
            .await
    }

    /// The raw collection, untouched.
    pub async fn raw_records(&self) -> Result<Vec<Value>> {
        self.energy.find_raw().await
    }

    async fn refresh<R, F>(&self, collection: &str, build: F) -> Result<Vec<R>>
    where
        R: Serialize,
        F: FnOnce(&[EnergyEvent]) -> Vec<R>,
    {
        let events = self.energy.find_events().await?;
        let rows = build(&events);

        let docs = rows
            .iter()
            .map(serde_json::to_value)
            .collect::<std::result::Result<Vec<_>, _>>()?;
        self.store.replace_all(collection, &docs).await?;

        info!(
            collection,
            events = events.len(),
            rows = rows.len(),
            "summary collection refreshed"
        );
        Ok(rows)
    }
}

// Unreadable costs still count as zero; this only makes them visible.
fn flag_unreadable_costs(events: &[EnergyEvent]) {
    let unreadable = aggregation::unreadable_cost_count(events);
    if unreadable > 0 {
        warn!(
            unreadable,
            "cost of energy could not be read for some records; counted as 0"
        );
    }
}
