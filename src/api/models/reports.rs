use serde::Serialize;
use serde_json::Value;

/// Department cost report envelope.
#[derive(Debug, Serialize)]
pub struct AggregatedCostsResponse<T> {
    #[serde(rename = "aggregatedCosts")]
    pub aggregated_costs: Vec<T>,
}

/// Envelope shared by the remaining summary reports.
#[derive(Debug, Serialize)]
pub struct AggregatedDataResponse<T> {
    #[serde(rename = "aggregatedData")]
    pub aggregated_data: Vec<T>,
}

impl<T> AggregatedDataResponse<T> {
    pub fn new(aggregated_data: Vec<T>) -> Self {
        Self { aggregated_data }
    }
}

#[derive(Debug, Serialize)]
pub struct RawDataResponse {
    pub data: Vec<Value>,
}
