//! HTTP handlers for heatmap clicks and month-filtered breakdowns

use axum::{
    extract::{Query, State},
    Json,
};
use serde::Deserialize;
use shared::{
    validate_day_name, validate_week_number, ClickDrillDown, GridCoordinate, MonthSelection,
    MonthlyZoneShare, ZoneBreakdown,
};

use crate::error::AppResult;
use crate::AppState;

/// Heatmap click; both parts are optional because the chart fires with no
/// point before the first click.
#[derive(Debug, Deserialize)]
pub struct ClickQuery {
    pub week: Option<u32>,
    pub day: Option<String>,
}

impl ClickQuery {
    fn coordinate(&self) -> Option<GridCoordinate> {
        match (self.week, self.day.as_deref()) {
            (Some(week), Some(day)) => {
                let valid = validate_week_number(week).and_then(|_| validate_day_name(day));
                if let Err(reason) = valid {
                    tracing::debug!(week, day, reason, "Ignoring heatmap click");
                    return None;
                }
                Some(GridCoordinate::new(week, day))
            }
            _ => None,
        }
    }
}

/// Resolve a heatmap cell to its date and return that day's hourly rows.
///
/// Unresolvable clicks yield an empty drill-down, never an error.
pub async fn resolve_click(
    State(state): State<AppState>,
    Query(query): Query<ClickQuery>,
) -> Json<ClickDrillDown> {
    let coordinate = query.coordinate();
    Json(state.context.hourly_for_click(coordinate.as_ref()))
}

/// Comma-separated month names from the checklist
#[derive(Debug, Deserialize)]
pub struct MonthsQuery {
    #[serde(default)]
    pub months: String,
}

impl MonthsQuery {
    fn selection(&self) -> AppResult<MonthSelection> {
        Ok(MonthSelection::parse_list(&self.months)?)
    }
}

/// Share of each zone over the selected months
pub async fn get_zone_breakdown(
    State(state): State<AppState>,
    Query(query): Query<MonthsQuery>,
) -> AppResult<Json<ZoneBreakdown>> {
    let selection = query.selection()?;
    Ok(Json(state.context.zone_breakdown(&selection)))
}

/// Per-month zone shares, in calendar order
pub async fn get_monthly_breakdown(
    State(state): State<AppState>,
    Query(query): Query<MonthsQuery>,
) -> AppResult<Json<Vec<MonthlyZoneShare>>> {
    let selection = query.selection()?;
    Ok(Json(state.context.monthly_breakdown(&selection)))
}
