use super::cleaned_cost;
use crate::models::EnergyEvent;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DepartmentCost {
    #[serde(rename = "_id")]
    pub department: Option<String>,
    #[serde(rename = "totalCost")]
    pub total_cost: f64,
}

/// Total cost of energy per department.
pub fn build(events: &[EnergyEvent]) -> Vec<DepartmentCost> {
    let mut totals: BTreeMap<Option<String>, f64> = BTreeMap::new();

    for event in events {
        *totals.entry(event.department.clone()).or_default() += cleaned_cost(event);
    }

    totals
        .into_iter()
        .map(|(department, total_cost)| DepartmentCost {
            department,
            total_cost,
        })
        .collect()
}
