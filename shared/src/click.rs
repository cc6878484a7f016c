//! Heatmap click to calendar date
//!
//! A click on the weekly heatmap yields an ISO week number (x axis) and a
//! day name (y axis). Resolving it back to a date is the inverse of the
//! labeling done at ingestion, so both go through [`crate::calendar`].

use chrono::NaiveDate;
use serde_json::Value;

use crate::calendar::resolve_date_from_week_and_day;
use crate::types::GridCoordinate;

/// Extract the grid coordinate from a chart click payload of the form
/// `{"points": [{"x": <week>, "y": "<day name>"}]}`.
pub fn coordinate_from_click_payload(payload: &Value) -> Option<GridCoordinate> {
    let point = payload.get("points")?.as_array()?.first()?;
    let week = match point.get("x")? {
        Value::Number(n) => n.as_u64()?,
        Value::String(s) => s.trim().parse().ok()?,
        _ => return None,
    };
    let day_name = point.get("y")?.as_str()?;
    Some(GridCoordinate::new(u32::try_from(week).ok()?, day_name))
}

/// Resolve a grid coordinate to a date within the ISO year `year`.
///
/// An absent click, an unknown day name or an impossible week all mean
/// "nothing to drill into" and yield `None`.
pub fn resolve_click_to_date(year: i32, coordinate: Option<&GridCoordinate>) -> Option<NaiveDate> {
    let coordinate = coordinate?;
    match resolve_date_from_week_and_day(year, coordinate.week, &coordinate.day_name) {
        Ok(date) => {
            tracing::debug!(
                week = coordinate.week,
                day = %coordinate.day_name,
                %date,
                "Resolved heatmap click"
            );
            Some(date)
        }
        Err(e) => {
            tracing::warn!("Unresolvable heatmap click: {}", e);
            None
        }
    }
}
