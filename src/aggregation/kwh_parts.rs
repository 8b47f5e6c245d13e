use super::{day_key, is_furnace};
use crate::models::EnergyEvent;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KwhParts {
    #[serde(rename = "_id")]
    pub date: Option<String>,
    #[serde(rename = "machineData")]
    pub machine_data: BTreeMap<String, f64>,
}

/// Daily KWH per part summed per machine, furnaces excluded.
///
/// Records without a machine id cannot become a `machineData` key and are
/// skipped.
pub fn build(events: &[EnergyEvent]) -> Vec<KwhParts> {
    let mut days: BTreeMap<Option<String>, BTreeMap<String, f64>> = BTreeMap::new();

    for event in events {
        let Some(machine) = event.machine_id.as_deref() else {
            continue;
        };
        if is_furnace(Some(machine)) {
            continue;
        }

        *days
            .entry(day_key(event.date.as_ref()))
            .or_default()
            .entry(machine.to_string())
            .or_default() += event.kwh_per_part.unwrap_or(0.0);
    }

    days.into_iter()
        .map(|(date, machine_data)| KwhParts { date, machine_data })
        .collect()
}
