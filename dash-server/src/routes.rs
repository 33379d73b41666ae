use crate::error::{ApiError, ApiResult};
use crate::state::AppState;
use axum::extract::rejection::QueryRejection;
use axum::extract::{Query, State};
use axum::response::Html;
use axum::routing::get;
use axum::{Json, Router};
use launch_dash::dashboard::DashboardLayout;
use launch_dash::figure::Figure;
use launch_dash::utils::logging::LogEntry;
use launch_dash::view::{PayloadRange, SiteFilter};
use serde::{Deserialize, Serialize};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::debug;

const INDEX_HTML: &str = include_str!("../static/index.html");

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/api/layout", get(layout))
        .route("/api/figures/success-pie", get(success_pie))
        .route("/api/figures/payload-scatter", get(payload_scatter))
        .route("/health", get(health))
        .route("/debug/logs", get(recent_logs))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

async fn index() -> Html<&'static str> {
    Html(INDEX_HTML)
}

async fn layout(State(state): State<AppState>) -> Json<DashboardLayout> {
    Json(state.dashboard.layout())
}

#[derive(Debug, Deserialize)]
struct PieQuery {
    site: Option<String>,
}

async fn success_pie(
    State(state): State<AppState>,
    query: Result<Query<PieQuery>, QueryRejection>,
) -> ApiResult<Json<Figure>> {
    let Query(query) = query?;
    let site = SiteFilter::parse(query.site.as_deref().unwrap_or_default());

    debug!(target: "server", "success-pie site={}", site);
    Ok(Json(state.success_pie(site).await))
}

#[derive(Debug, Deserialize)]
struct ScatterQuery {
    site: Option<String>,
    low: Option<f64>,
    high: Option<f64>,
}

async fn payload_scatter(
    State(state): State<AppState>,
    query: Result<Query<ScatterQuery>, QueryRejection>,
) -> ApiResult<Json<Figure>> {
    let Query(query) = query?;
    let site = SiteFilter::parse(query.site.as_deref().unwrap_or_default());

    let defaults = state.dashboard.default_range();
    let range = PayloadRange::new(
        query.low.unwrap_or(defaults.low),
        query.high.unwrap_or(defaults.high),
    );
    if range.low.is_nan() || range.high.is_nan() {
        return Err(ApiError::bad_request("payload bounds must be numbers"));
    }

    debug!(target: "server", "payload-scatter site={} range={}", site, range);
    Ok(Json(state.payload_scatter(site, range).await))
}

#[derive(Debug, Serialize, Deserialize)]
struct Health {
    status: String,
    records: usize,
    sites: usize,
    cached_figures: usize,
}

async fn health(State(state): State<AppState>) -> Json<Health> {
    let dataset = state.dashboard.dataset();
    Json(Health {
        status: "ok".to_string(),
        records: dataset.len(),
        sites: dataset.sites().len(),
        cached_figures: state.cached_figures().await,
    })
}

#[derive(Debug, Deserialize)]
struct LogsQuery {
    count: Option<usize>,
}

async fn recent_logs(
    State(state): State<AppState>,
    query: Result<Query<LogsQuery>, QueryRejection>,
) -> ApiResult<Json<Vec<LogEntry>>> {
    let Query(query) = query?;
    Ok(Json(state.logs.get_recent(query.count.unwrap_or(100))))
}
