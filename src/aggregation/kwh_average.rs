use super::{day_key, FURNACE_MACHINES};
use crate::models::EnergyEvent;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KwhAverage {
    #[serde(rename = "Date")]
    pub date: Option<String>,
    #[serde(rename = "avg_of_IF1")]
    pub avg_if1: Option<f64>,
    #[serde(rename = "avg_of_IF2")]
    pub avg_if2: Option<f64>,
}

#[derive(Debug, Default, Clone, Copy)]
struct Mean {
    sum: f64,
    count: u32,
}

impl Mean {
    fn push(&mut self, value: Option<f64>) {
        if let Some(v) = value {
            self.sum += v;
            self.count += 1;
        }
    }

    fn value(&self) -> Option<f64> {
        (self.count > 0).then(|| self.sum / f64::from(self.count))
    }
}

/// Daily mean of KWH per tonne for each induction furnace.
///
/// A furnace without samples on a day reports `None` for that day rather
/// than zero.
pub fn build(events: &[EnergyEvent]) -> Vec<KwhAverage> {
    let [if1, if2] = FURNACE_MACHINES;
    let mut days: BTreeMap<Option<String>, (Mean, Mean)> = BTreeMap::new();

    for event in events {
        let machine = event.machine_id.as_deref();
        if machine != Some(if1) && machine != Some(if2) {
            continue;
        }

        let (first, second) = days.entry(day_key(event.date.as_ref())).or_default();
        if machine == Some(if1) {
            first.push(event.kwh_per_tonne);
        } else {
            second.push(event.kwh_per_tonne);
        }
    }

    days.into_iter()
        .map(|(date, (first, second))| KwhAverage {
            date,
            avg_if1: first.value(),
            avg_if2: second.value(),
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
    fn test_averages_each_furnace_separately() {
        let events = events(json!([
            { "Date": "2024-02-01", "Machine ID": "IF1", "KWH_Tonne": 10 },
            { "Date": "2024-02-01", "Machine ID": "IF2", "KWH_Tonne": 20 },
            { "Date": "2024-02-01", "Machine ID": "M3", "KWH_Tonne": 30 }
        ]));

        assert_eq!(
            build(&events),
            vec![KwhAverage {
                date: Some("2024-02-01".into()),
                avg_if1: Some(10.0),
                avg_if2: Some(20.0),
            }]
        );
    }

    #[test]
    fn test_mean_over_multiple_samples_sorted_by_day() {
        let events = events(json!([
            { "Date": "2024-02-02 08:00", "Machine ID": "IF1", "KWH_Tonne": 600 },
            { "Date": "2024-02-01 09:00", "Machine ID": "IF1", "KWH_Tonne": 500 },
            { "Date": "2024-02-01 10:00", "Machine ID": "IF1", "KWH_Tonne": 540 },
            { "Date": "2024-02-02 09:00", "Machine ID": "IF1", "KWH_Tonne": "n/a" }
        ]));

        assert_eq!(
            build(&events),
            vec![
                KwhAverage {
                    date: Some("2024-02-01".into()),
                    avg_if1: Some(520.0),
                    avg_if2: None,
                },
                KwhAverage {
                    date: Some("2024-02-02".into()),
                    avg_if1: Some(600.0),
                    avg_if2: None,
                },
            ]
        );
    }

    #[test]
    fn test_days_with_only_other_machines_are_absent() {
        let events = events(json!([
            { "Date": "2024-02-01", "Machine ID": "IF2", "KWH_Tonne": 5 },
            { "Date": "2024-02-03", "Machine ID": "M7", "KWH_Tonne": 9 }
        ]));

        let days: Vec<Option<String>> = build(&events).into_iter().map(|r| r.date).collect();
        assert_eq!(days, vec![Some("2024-02-01".to_string())]);
    }

    #[test]
    fn test_serialized_field_names() {
        let row = KwhAverage {
            date: Some("2024-02-01".into()),
            avg_if1: Some(10.0),
            avg_if2: None,
        };
        assert_eq!(
            serde_json::to_value(&row).unwrap(),
            json!({ "Date": "2024-02-01", "avg_of_IF1": 10.0, "avg_of_IF2": null })
        );
    }
}
