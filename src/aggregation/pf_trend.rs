use super::day_key;
use crate::models::{EnergyEvent, Hour};
use serde::ser::{Serialize, SerializeMap, Serializer};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize)]
pub struct HourSample {
    #[serde(rename = "P_F")]
    pub power_factor: Option<f64>,
    pub consumption: Option<f64>,
}

/// Samples of one machine keyed by hour, ordered numerically and serialized
/// as a map from hour label to sample.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HourlySamples(BTreeMap<Hour, HourSample>);

impl HourlySamples {
    #[cfg(test)]
    pub(crate) fn get(&self, label: &str) -> Option<&HourSample> {
        self.0
            .iter()
            .find(|(hour, _)| hour.label() == label)
            .map(|(_, sample)| sample)
    }

    #[cfg(test)]
    pub(crate) fn labels(&self) -> Vec<String> {
        self.0.keys().map(Hour::label).collect()
    }

    #[cfg(test)]
    pub(crate) fn len(&self) -> usize {
        self.0.len()
    }

    // First sample for an hour wins.
    fn record(&mut self, hour: &Hour, sample: HourSample) {
        self.0.entry(hour.clone()).or_insert(sample);
    }
}

impl Serialize for HourlySamples {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (hour, sample) in &self.0 {
            map.serialize_entry(&hour.label(), sample)?;
        }
        map.end()
    }
}

pub type MachineHours = BTreeMap<String, HourlySamples>;
pub type DepartmentMachines = BTreeMap<String, MachineHours>;

#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct DailyPfTrend {
    #[serde(rename = "Date")]
    pub date: Option<String>,
    #[serde(rename = "Departments")]
    pub departments: DepartmentMachines,
}

/// Power factor and consumption per day → department → machine → hour.
///
/// Records are stable-sorted by hour first, so when several records share a
/// (day, department, machine, hour) the earliest in input order is kept.
/// Records without a department, machine or hour have no place in the nested
/// maps and are skipped.
pub fn build(events: &[EnergyEvent]) -> Vec<DailyPfTrend> {
    let mut ordered: Vec<&EnergyEvent> = events.iter().collect();
    ordered.sort_by(|a, b| a.hours.cmp(&b.hours));

    let mut days: BTreeMap<Option<String>, DepartmentMachines> = BTreeMap::new();

    for event in ordered {
        let (Some(department), Some(machine), Some(hour)) =
            (&event.department, &event.machine_id, &event.hours)
        else {
            continue;
        };

        days.entry(day_key(event.date.as_ref()))
            .or_default()
            .entry(department.clone())
            .or_default()
            .entry(machine.clone())
            .or_default()
            .record(
                hour,
                HourSample {
                    power_factor: event.power_factor,
                    consumption: event.consumption,
                },
            );
    }

    days.into_iter()
        .map(|(date, departments)| DailyPfTrend { date, departments })
        .collect()
}
