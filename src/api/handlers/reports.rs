use crate::aggregation::{
    DailyPfTrend, DepartmentCost, KwhAverage, KwhParts, MoltenMetalConsumption, TimeZoneCost,
};
use crate::api::handlers::AppState;
use crate::api::models::reports::{AggregatedCostsResponse, AggregatedDataResponse, RawDataResponse};
use crate::error::AppError;
use axum::{extract::State, response::Json};

pub async fn get_department_costs(
    State(state): State<AppState>,
) -> Result<Json<AggregatedCostsResponse<DepartmentCost>>, AppError> {
    let rows = state.reports.department_costs().await?;
    Ok(Json(AggregatedCostsResponse {
        aggregated_costs: rows,
    }))
}

pub async fn get_kwh_averages(
    State(state): State<AppState>,
) -> Result<Json<AggregatedDataResponse<KwhAverage>>, AppError> {
    let rows = state.reports.kwh_averages().await?;
    Ok(Json(AggregatedDataResponse::new(rows)))
}

pub async fn get_kwh_parts(
    State(state): State<AppState>,
) -> Result<Json<AggregatedDataResponse<KwhParts>>, AppError> {
    let rows = state.reports.kwh_parts().await?;
    Ok(Json(AggregatedDataResponse::new(rows)))
}

pub async fn get_molten_metal(
    State(state): State<AppState>,
) -> Result<Json<AggregatedDataResponse<MoltenMetalConsumption>>, AppError> {
    let rows = state.reports.molten_metal().await?;
    Ok(Json(AggregatedDataResponse::new(rows)))
}

pub async fn get_time_zone_costs(
    State(state): State<AppState>,
) -> Result<Json<AggregatedDataResponse<TimeZoneCost>>, AppError> {
    let rows = state.reports.time_zone_costs().await?;
    Ok(Json(AggregatedDataResponse::new(rows)))
}

pub async fn get_pf_trends(
    State(state): State<AppState>,
) -> Result<Json<AggregatedDataResponse<DailyPfTrend>>, AppError> {
    let rows = state.reports.pf_trends().await?;
    Ok(Json(AggregatedDataResponse::new(rows)))
}

pub async fn get_raw_records(
    State(state): State<AppState>,
) -> Result<Json<RawDataResponse>, AppError> {
    let data = state.reports.raw_records().await?;
    Ok(Json(RawDataResponse { data }))
}
