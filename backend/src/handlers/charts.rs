//! HTTP handlers for chart series

use axum::{
    extract::{Query, State},
    Json,
};
use chrono::NaiveDate;
use serde::Deserialize;
use shared::series::{
    self, BubblePoint, HeatmapGrid, HourlyBar, LineSeries, ScatterSeries,
};
use shared::Measure;

use super::{measure_param, or_empty};
use crate::error::{AppError, AppResult};
use crate::AppState;

/// Consumption-over-time lines from the daily view
pub async fn get_line_chart(State(state): State<AppState>) -> Json<Vec<LineSeries>> {
    Json(series::line_series(state.context.daily()))
}

#[derive(Debug, Deserialize)]
pub struct HeatmapQuery {
    pub column: Option<String>,
}

/// Week x weekday heatmap of one column
pub async fn get_heatmap(
    State(state): State<AppState>,
    Query(query): Query<HeatmapQuery>,
) -> AppResult<Json<HeatmapGrid>> {
    let measure = measure_param(query.column.as_deref(), Measure::AllZones)?;
    Ok(Json(series::heatmap_grid(state.context.daily(), measure)))
}

#[derive(Debug, Deserialize)]
pub struct HourlyBarQuery {
    pub date: NaiveDate,
}

/// Hourly all-zones bars for one day
pub async fn get_hourly_bar(
    State(state): State<AppState>,
    Query(query): Query<HourlyBarQuery>,
) -> AppResult<Json<Vec<HourlyBar>>> {
    let hourly = or_empty("hourly bar", state.context.hourly_for_date(query.date))?;
    Ok(Json(series::hourly_bar(&hourly)))
}

/// Axis picks for the two-measure charts
#[derive(Debug, Deserialize)]
pub struct AxesQuery {
    pub x: Option<String>,
    pub y: Option<String>,
}

/// Hourly scatter of two measures
pub async fn get_scatter(
    State(state): State<AppState>,
    Query(query): Query<AxesQuery>,
) -> AppResult<Json<ScatterSeries>> {
    let x = measure_param(query.x.as_deref(), Measure::Humidity)?;
    let y = measure_param(query.y.as_deref(), Measure::WindSpeed)?;
    Ok(Json(series::scatter_points(state.context.hourly(), x, y)))
}

#[derive(Debug, Deserialize)]
pub struct ZoneScatterQuery {
    pub x: Option<String>,
}

/// One scatter series per zone against a weather measure.
///
/// `x` must be a weather covariate; the y axes are the zones themselves.
pub async fn get_zone_scatter(
    State(state): State<AppState>,
    Query(query): Query<ZoneScatterQuery>,
) -> AppResult<Json<Vec<ScatterSeries>>> {
    let x = measure_param(query.x.as_deref(), Measure::Temperature)?;
    if !x.is_weather() {
        return Err(AppError::invalid_parameter(
            "x",
            format!("{} is not a weather measure", x),
        ));
    }
    Ok(Json(series::zone_scatter(state.context.daily(), x)))
}

/// Bubble chart sized by all-zones consumption
pub async fn get_bubble_chart(
    State(state): State<AppState>,
    Query(query): Query<AxesQuery>,
) -> AppResult<Json<Vec<BubblePoint>>> {
    let x = measure_param(query.x.as_deref(), Measure::Humidity)?;
    let y = measure_param(query.y.as_deref(), Measure::WindSpeed)?;
    Ok(Json(series::bubble_points(state.context.daily(), x, y)))
}
