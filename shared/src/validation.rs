//! Validation utilities for readings and interaction inputs

use rust_decimal::Decimal;

use crate::calendar::{parse_day_name, parse_month_name};
use crate::models::RawReading;

// ============================================================================
// Reading Validations
// ============================================================================

/// Sanity check of a single reading.
///
/// Ingestion logs failures but keeps the row.
pub fn validate_reading(reading: &RawReading) -> Result<(), &'static str> {
    if reading.zone1 < Decimal::ZERO
        || reading.zone2 < Decimal::ZERO
        || reading.zone3 < Decimal::ZERO
    {
        return Err("Power consumption cannot be negative");
    }
    if reading.humidity < Decimal::ZERO || reading.humidity > Decimal::from(100) {
        return Err("Humidity must be between 0 and 100%");
    }
    if reading.wind_speed < Decimal::ZERO {
        return Err("Wind speed cannot be negative");
    }
    if reading.general_diffuse_flows < Decimal::ZERO || reading.diffuse_flows < Decimal::ZERO {
        return Err("Diffuse flows cannot be negative");
    }
    Ok(())
}

// ============================================================================
// Interaction Validations
// ============================================================================

/// Validate a heatmap week number
pub fn validate_week_number(week: u32) -> Result<(), &'static str> {
    if !(1..=53).contains(&week) {
        return Err("Week number must be between 1 and 53");
    }
    Ok(())
}

/// Validate an English day name
pub fn validate_day_name(name: &str) -> Result<(), &'static str> {
    if parse_day_name(name).is_none() {
        return Err("Unrecognized day name");
    }
    Ok(())
}

/// Validate a month checklist selection
pub fn validate_month_names<S: AsRef<str>>(names: &[S]) -> Result<(), &'static str> {
    if names.len() > 12 {
        return Err("At most twelve months can be selected");
    }
    if names.iter().any(|name| parse_month_name(name.as_ref()).is_none()) {
        return Err("Unrecognized month name");
    }
    Ok(())
}
