//! Report builders.
//!
//! Each builder is a pure function from the full raw record set to the rows
//! of one summary collection. Grouping keys are kept in `BTreeMap`s so every
//! level of the output comes out sorted, with `null` keys first.

pub mod department_cost;
pub mod kwh_average;
pub mod kwh_parts;
pub mod molten_metal;
pub mod pf_trend;
pub mod time_zone;

pub use department_cost::DepartmentCost;
pub use kwh_average::KwhAverage;
pub use kwh_parts::KwhParts;
pub use molten_metal::MoltenMetalConsumption;
pub use pf_trend::{DailyPfTrend, HourSample, HourlySamples};
pub use time_zone::TimeZoneCost;

use crate::models::{EnergyEvent, EventDate};
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

/// Induction furnaces tracked per tonne; every other machine is tracked per part.
pub const FURNACE_MACHINES: [&str; 2] = ["IF1", "IF2"];

const NAIVE_DATETIME_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

pub fn is_furnace(machine_id: Option<&str>) -> bool {
    machine_id.is_some_and(|id| FURNACE_MACHINES.contains(&id))
}

/// UTC calendar day (`YYYY-MM-DD`) of an event date, `None` when the date is
/// missing or cannot be read as a timestamp.
pub fn day_key(date: Option<&EventDate>) -> Option<String> {
    let ts = match date? {
        EventDate::Text(raw) => parse_timestamp(raw)?,
        EventDate::EpochMillis(ms) => DateTime::<Utc>::from_timestamp_millis(*ms)?,
    };
    Some(ts.format("%Y-%m-%d").to_string())
}

fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let s = raw.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }

    for fmt in NAIVE_DATETIME_FORMATS {
        if let Ok(ndt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(ndt.and_utc());
        }
    }

    // Plain day, or a day followed by some intra-day marker.
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .or_else(|| {
            s.get(..10)
                .and_then(|prefix| NaiveDate::parse_from_str(prefix, "%Y-%m-%d").ok())
        })
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|ndt| ndt.and_utc())
}

/// Reads a currency formatted cost such as `"₹ 1,234.50"`.
///
/// Leading characters that cannot start a number (currency symbol, spaces)
/// are dropped and thousands separators removed.
pub fn parse_cost(raw: &str) -> Option<f64> {
    let trimmed = raw.trim();
    let start = trimmed.find(|c: char| c.is_ascii_digit() || matches!(c, '-' | '+' | '.'))?;
    let cleaned: String = trimmed[start..].chars().filter(|c| *c != ',').collect();
    cleaned
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
}

/// Cost contribution of one event. Unreadable costs count as zero.
pub fn cleaned_cost(event: &EnergyEvent) -> f64 {
    event
        .cost_of_energy
        .as_deref()
        .and_then(parse_cost)
        .unwrap_or(0.0)
}

/// Events carrying a cost string that [`parse_cost`] cannot read.
pub fn unreadable_cost_count(events: &[EnergyEvent]) -> usize {
    events
        .iter()
        .filter(|e| {
            e.cost_of_energy
                .as_deref()
                .is_some_and(|raw| parse_cost(raw).is_none())
        })
        .count()
}
