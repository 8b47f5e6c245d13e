use super::day_key;
use crate::models::EnergyEvent;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MoltenMetalConsumption {
    pub date: Option<String>,
    pub sum_of_moltenmetal: f64,
    // Field name is part of the published contract.
    pub sum_of_consumtion: f64,
}

/// Daily totals of molten metal and consumption over every record.
pub fn build(events: &[EnergyEvent]) -> Vec<MoltenMetalConsumption> {
    let mut days: BTreeMap<Option<String>, (f64, f64)> = BTreeMap::new();

    for event in events {
        let (metal, consumption) = days.entry(day_key(event.date.as_ref())).or_default();
        *metal += event.molten_metal.unwrap_or(0.0);
        *consumption += event.consumption.unwrap_or(0.0);
    }

    days.into_iter()
        .map(|(date, (metal, consumption))| MoltenMetalConsumption {
            date,
            sum_of_moltenmetal: metal,
            sum_of_consumtion: consumption,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregation::test_support::events;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_sums_independently_per_day() {
        let events = events(json!([
            { "Date": "2024-01-02", "Molten Metal": 2.0, "Consumption": 100 },
            { "Date": "2024-01-01", "Molten Metal": 1.5, "Consumption": 40 },
            { "Date": "2024-01-01 14:00", "Molten Metal": 0.5 },
            { "Date": "2024-01-01", "Consumption": 60, "Machine ID": "IF1" }
        ]));

        assert_eq!(
            build(&events),
            vec![
                MoltenMetalConsumption {
                    date: Some("2024-01-01".into()),
                    sum_of_moltenmetal: 2.0,
                    sum_of_consumtion: 100.0,
                },
                MoltenMetalConsumption {
                    date: Some("2024-01-02".into()),
                    sum_of_moltenmetal: 2.0,
                    sum_of_consumtion: 100.0,
                },
            ]
        );
    }

    #[test]
    fn test_undated_records_form_a_leading_null_day() {
        let events = events(json!([
            { "Date": "2024-01-01", "Consumption": 5 },
            { "Date": "soon", "Consumption": 7 }
        ]));

        let rows = build(&events);
        assert_eq!(rows[0].date, None);
        assert_eq!(rows[0].sum_of_consumtion, 7.0);
        assert_eq!(rows[1].date.as_deref(), Some("2024-01-01"));
    }
}
