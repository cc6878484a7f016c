//! HTTP handlers for the dashboard endpoints

mod charts;
mod health;
mod interactions;
mod views;

pub use charts::*;
pub use health::*;
pub use interactions::*;
pub use views::*;

use shared::{DashboardResult, Measure};

use crate::error::{AppError, AppResult};

/// Fallback for unmatched routes
pub async fn not_found() -> AppError {
    AppError::NotFound("Route".to_string())
}

/// Interaction queries render an empty chart instead of failing when their
/// filter matches nothing.
fn or_empty<T>(scope: &str, result: DashboardResult<Vec<T>>) -> AppResult<Vec<T>> {
    match result {
        Ok(rows) => Ok(rows),
        Err(err) if err.is_recoverable() => {
            tracing::debug!("{} matched no rows: {}", scope, err);
            Ok(Vec::new())
        }
        Err(err) => Err(err.into()),
    }
}

/// Parse an optional dropdown value, falling back to `default`
fn measure_param(value: Option<&str>, default: Measure) -> AppResult<Measure> {
    match value.map(str::trim).filter(|v| !v.is_empty()) {
        Some(raw) => Ok(raw.parse()?),
        None => Ok(default),
    }
}
