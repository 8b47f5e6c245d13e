use crate::api::handlers::{health, insight, reports, AppState};
use axum::{
    extract::Request,
    routing::{get, post},
    Router,
};
use tower_http::trace::TraceLayer;
use tracing::Level;

pub fn create_router(state: AppState) -> Router {
    let public_routes = Router::new().route("/health", get(health::health));

    let api_routes = Router::new()
        .route(
            "/api/aggregate-energy-costs",
            get(reports::get_department_costs),
        )
        .route("/api/avgKWH", get(reports::get_kwh_averages))
        .route("/api/KWHParts", get(reports::get_kwh_parts))
        .route(
            "/api/ConsumptionMoltenMetal",
            get(reports::get_molten_metal),
        )
        .route("/api/TimeZone", get(reports::get_time_zone_costs))
        .route("/api/consumption", get(reports::get_pf_trends))
        .route("/api/energyMonitoring", get(reports::get_raw_records))
        .route("/api/chat-response", post(insight::create_insight));

    Router::new()
        .merge(public_routes)
        .merge(api_routes)
        .with_state(state)
        .layer(tower_http::cors::CorsLayer::permissive())
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(|request: &Request| {
                    tracing::span!(
                        Level::INFO,
                        "http_request",
                        method = %request.method(),
                        uri = %request.uri(),
                    )
                })
                .on_request(|_request: &Request, _span: &tracing::Span| {
                    tracing::event!(Level::DEBUG, "received request");
                })
                .on_response(
                    |response: &axum::response::Response,
                     latency: std::time::Duration,
                     _span: &tracing::Span| {
                        tracing::event!(
                            Level::INFO,
                            status = response.status().as_u16(),
                            latency = ?latency,
                            "request completed"
                        );
                    },
                )
                .on_failure(
                    |_error: tower_http::classify::ServerErrorsFailureClass,
                     _latency: std::time::Duration,
                     _span: &tracing::Span| {
                        tracing::event!(Level::ERROR, "request failed");
                    },
                ),
        )
}
