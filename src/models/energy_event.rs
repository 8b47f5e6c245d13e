use serde::{Deserialize, Deserializer};
use serde_json::Value;
use std::cmp::Ordering;

/// One raw energy measurement as written by the ingestion process.
///
/// Every field is optional and leniently typed: a value of the wrong JSON
/// type is treated as absent, the same way the aggregation operators skip
/// non-numeric values.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct EnergyEvent {
    #[serde(rename = "Date", default, deserialize_with = "event_date")]
    pub date: Option<EventDate>,
    #[serde(rename = "Department", default, deserialize_with = "text")]
    pub department: Option<String>,
    #[serde(rename = "Machine ID", default, deserialize_with = "text")]
    pub machine_id: Option<String>,
    #[serde(rename = "Hours", default, deserialize_with = "hour")]
    pub hours: Option<Hour>,
    #[serde(rename = "P#F", default, deserialize_with = "number")]
    pub power_factor: Option<f64>,
    #[serde(rename = "Consumption", default, deserialize_with = "number")]
    pub consumption: Option<f64>,
    #[serde(rename = "Cost of Energy", default, deserialize_with = "text")]
    pub cost_of_energy: Option<String>,
    #[serde(rename = "Molten Metal", default, deserialize_with = "number")]
    pub molten_metal: Option<f64>,
    #[serde(rename = "MSEB Zone", default, deserialize_with = "text")]
    pub zone: Option<String>,
    #[serde(rename = "KWH_Tonne", default, deserialize_with = "number")]
    pub kwh_per_tonne: Option<f64>,
    #[serde(rename = "KWH_part", default, deserialize_with = "number")]
    pub kwh_per_part: Option<f64>,
}

/// The `Date` field as stored: usually text, occasionally epoch milliseconds.
#[derive(Debug, Clone, PartialEq)]
pub enum EventDate {
    Text(String),
    EpochMillis(i64),
}

/// Hour of day. Numeric strings are normalised to numbers so `"7"` and `7`
/// land in the same hour bucket.
#[derive(Debug, Clone)]
pub enum Hour {
    Number(f64),
    Text(String),
}

impl Hour {
    pub fn from_json(value: &Value) -> Option<Self> {
        match value {
            Value::Number(n) => n.as_f64().filter(|v| v.is_finite()).map(Hour::number),
            Value::String(s) => {
                let trimmed = s.trim();
                match trimmed.parse::<f64>() {
                    Ok(v) if v.is_finite() => Some(Hour::number(v)),
                    _ => Some(Hour::Text(trimmed.to_string())),
                }
            }
            _ => None,
        }
    }

    // -0 and 0 are one hour.
    fn number(v: f64) -> Self {
        Hour::Number(if v == 0.0 { 0.0 } else { v })
    }

    /// Map key used in the trend report; whole hours render without a fraction.
    pub fn label(&self) -> String {
        match self {
            Hour::Number(v) if v.fract() == 0.0 && v.abs() < 1e15 => format!("{}", *v as i64),
            Hour::Number(v) => v.to_string(),
            Hour::Text(s) => s.clone(),
        }
    }
}

// Numbers order before text, mirroring the store's cross-type sort order.
impl Ord for Hour {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Hour::Number(a), Hour::Number(b)) => a.total_cmp(b),
            (Hour::Number(_), Hour::Text(_)) => Ordering::Less,
            (Hour::Text(_), Hour::Number(_)) => Ordering::Greater,
            (Hour::Text(a), Hour::Text(b)) => a.cmp(b),
        }
    }
}

impl PartialOrd for Hour {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for Hour {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Hour {}

fn number<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(value.as_f64())
}

fn text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    })
}

fn hour<'de, D>(deserializer: D) -> Result<Option<Hour>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(Hour::from_json(&value))
}

fn event_date<'de, D>(deserializer: D) -> Result<Option<EventDate>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::String(s) => Some(EventDate::Text(s)),
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().filter(|v| v.is_finite()).map(|v| v as i64))
            .map(EventDate::EpochMillis),
        _ => None,
    })
}
