//! Health check handlers

use axum::{extract::State, Json};
use chrono::NaiveDate;
use serde::Serialize;

use crate::AppState;

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub environment: String,
    pub readings: usize,
    pub days: usize,
    pub year: i32,
    pub coverage_start: NaiveDate,
    pub coverage_end: NaiveDate,
}

/// Health check endpoint handler
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let context = &state.context;
    let coverage = context.coverage();

    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        environment: state.config.environment.clone(),
        readings: context.reading_count(),
        days: context.daily().len(),
        year: context.year(),
        coverage_start: coverage.start,
        coverage_end: coverage.end,
    })
}
