use super::{cleaned_cost, day_key};
use crate::models::EnergyEvent;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Tariff zones, in output column order.
pub const ZONES: [&str; 4] = ["Zone A", "Zone B", "Zone C", "Zone D"];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeZoneCost {
    pub date: Option<String>,
    #[serde(rename = "zoneA")]
    pub zone_a: f64,
    #[serde(rename = "zoneB")]
    pub zone_b: f64,
    #[serde(rename = "zoneC")]
    pub zone_c: f64,
    #[serde(rename = "zoneD")]
    pub zone_d: f64,
}

/// Daily cost of energy split by tariff zone. Every zone is always present.
pub fn build(events: &[EnergyEvent]) -> Vec<TimeZoneCost> {
    let mut days: BTreeMap<Option<String>, [f64; 4]> = BTreeMap::new();

    for event in events {
        let totals = days.entry(day_key(event.date.as_ref())).or_default();
        let zone = event.zone.as_deref();
        if let Some(idx) = ZONES.iter().position(|z| Some(*z) == zone) {
            totals[idx] += cleaned_cost(event);
        }
    }

    days.into_iter()
        .map(|(date, [zone_a, zone_b, zone_c, zone_d])| TimeZoneCost {
            date,
            zone_a,
            zone_b,
            zone_c,
            zone_d,
        })
        .collect()
}
