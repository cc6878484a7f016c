//! HTTP handlers for the aggregated views

use axum::{
    extract::{Query, State},
    Json,
};
use chrono::NaiveDate;
use serde::Deserialize;
use shared::{DailyRow, DateRange, HourlyRow, MonthlyZoneRow};

use super::or_empty;
use crate::error::{AppError, AppResult};
use crate::AppState;

/// Optional bounds on the daily view
#[derive(Debug, Deserialize)]
pub struct DailyViewQuery {
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
}

/// Daily view, optionally restricted to an inclusive date range
pub async fn get_daily_view(
    State(state): State<AppState>,
    Query(query): Query<DailyViewQuery>,
) -> AppResult<Json<Vec<DailyRow>>> {
    let context = &state.context;
    if query.start.is_none() && query.end.is_none() {
        return Ok(Json(context.daily().to_vec()));
    }

    let coverage = context.coverage();
    let range = DateRange::new(
        query.start.unwrap_or(coverage.start),
        query.end.unwrap_or(coverage.end),
    );
    if range.start > range.end {
        return Err(AppError::invalid_parameter(
            "start",
            "start must not be after end",
        ));
    }

    let rows = or_empty("daily view", context.daily_in_range(range))?;
    Ok(Json(rows))
}

#[derive(Debug, Deserialize)]
pub struct HourlyViewQuery {
    pub date: NaiveDate,
}

/// Hourly rows of one day
pub async fn get_hourly_view(
    State(state): State<AppState>,
    Query(query): Query<HourlyViewQuery>,
) -> AppResult<Json<Vec<HourlyRow>>> {
    let rows = or_empty("hourly view", state.context.hourly_for_date(query.date))?;
    Ok(Json(rows))
}

/// Monthly-by-zone view
pub async fn get_monthly_view(State(state): State<AppState>) -> Json<Vec<MonthlyZoneRow>> {
    Json(state.context.monthly_by_zone().to_vec())
}
