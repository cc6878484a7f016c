//! Route definitions for the Power Consumption Dashboard

use axum::{routing::get, Router};

use crate::{handlers, AppState};

/// Create API routes
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(handlers::health_check))
        .route("/click", get(handlers::resolve_click))
        .nest("/views", view_routes())
        .nest("/breakdown", breakdown_routes())
        .nest("/charts", chart_routes())
}

/// Aggregated views
fn view_routes() -> Router<AppState> {
    Router::new()
        .route("/daily", get(handlers::get_daily_view))
        .route("/hourly", get(handlers::get_hourly_view))
        .route("/monthly", get(handlers::get_monthly_view))
}

/// Month checklist breakdowns
fn breakdown_routes() -> Router<AppState> {
    Router::new()
        .route("/zones", get(handlers::get_zone_breakdown))
        .route("/months", get(handlers::get_monthly_breakdown))
}

/// Chart series
fn chart_routes() -> Router<AppState> {
    Router::new()
        .route("/line", get(handlers::get_line_chart))
        .route("/heatmap", get(handlers::get_heatmap))
        .route("/hourly-bar", get(handlers::get_hourly_bar))
        .route("/scatter", get(handlers::get_scatter))
        .route("/zone-scatter", get(handlers::get_zone_scatter))
        .route("/bubble", get(handlers::get_bubble_chart))
}
