//! WebAssembly module for the Power Consumption Dashboard
//!
//! Provides client-side computation for:
//! - Heatmap click resolution
//! - ISO week labels
//! - Month-filtered zone breakdowns over the Daily view

use chrono::NaiveDate;
use wasm_bindgen::prelude::*;

use shared::calendar::{iso_week_number, resolve_date_from_week_and_day};
use shared::click::{coordinate_from_click_payload, resolve_click_to_date};
use shared::filter::{
    filter_by_months, monthly_zone_percentage_breakdown, zone_percentage_breakdown,
};
use shared::{validate_month_names, DailyRow, MonthSelection};

// Re-export shared types for use in JavaScript
pub use shared::models::*;
pub use shared::types::*;

/// Initialize the WASM module
#[wasm_bindgen(start)]
pub fn init() {
    web_sys::console::debug_1(&JsValue::from_str("power dashboard wasm loaded"));
}

fn js_error(message: String) -> JsValue {
    js_sys::Error::new(&message).into()
}

/// Date (`YYYY-MM-DD`) of a heatmap cell, or `undefined` when the week and
/// day do not name a real day of `year`
#[wasm_bindgen]
pub fn resolve_heatmap_click(year: i32, week: u32, day: &str) -> Option<String> {
    match resolve_date_from_week_and_day(year, week, day) {
        Ok(date) => Some(date.format("%Y-%m-%d").to_string()),
        Err(e) => {
            web_sys::console::warn_1(&JsValue::from_str(&e.to_string()));
            None
        }
    }
}

/// Same as [`resolve_heatmap_click`], straight from the chart's click event
/// JSON (`{"points": [{"x": week, "y": day}]}`)
#[wasm_bindgen]
pub fn resolve_click_payload(year: i32, payload_json: &str) -> Option<String> {
    let payload: serde_json::Value = serde_json::from_str(payload_json).ok()?;
    let coordinate = coordinate_from_click_payload(&payload);
    resolve_click_to_date(year, coordinate.as_ref()).map(|date| date.format("%Y-%m-%d").to_string())
}

/// ISO week number of a `YYYY-MM-DD` date
#[wasm_bindgen]
pub fn iso_week_of(date_str: &str) -> Result<u32, JsValue> {
    let date = NaiveDate::parse_from_str(date_str.trim(), "%Y-%m-%d")
        .map_err(|e| js_error(format!("Invalid date {}: {}", date_str, e)))?;
    Ok(iso_week_number(date))
}

fn filtered_daily(daily_json: &str, months_json: &str) -> Result<Vec<DailyRow>, JsValue> {
    let daily: Vec<DailyRow> = serde_json::from_str(daily_json)
        .map_err(|e| js_error(format!("Invalid daily view JSON: {}", e)))?;
    let months: Vec<String> = serde_json::from_str(months_json)
        .map_err(|e| js_error(format!("Invalid months JSON: {}", e)))?;
    validate_month_names(months.as_slice()).map_err(|e| js_error(e.to_string()))?;
    let selection = MonthSelection::from_names(&months).map_err(|e| js_error(e.to_string()))?;
    Ok(filter_by_months(&daily, &selection))
}

/// Zone shares over the selected months of a Daily view
#[wasm_bindgen]
pub fn zone_breakdown_json(daily_json: &str, months_json: &str) -> Result<String, JsValue> {
    let rows = filtered_daily(daily_json, months_json)?;
    serde_json::to_string(&zone_percentage_breakdown(&rows)).map_err(|e| js_error(e.to_string()))
}

/// Per-month zone shares of a Daily view, January first
#[wasm_bindgen]
pub fn monthly_breakdown_json(daily_json: &str, months_json: &str) -> Result<String, JsValue> {
    let rows = filtered_daily(daily_json, months_json)?;
    serde_json::to_string(&monthly_zone_percentage_breakdown(&rows))
        .map_err(|e| js_error(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;
    use shared::ingest::enrich;
    use shared::{Aggregator, RawReading, ZoneBreakdown};

    fn daily_json() -> String {
        let readings: Vec<_> = [(1, 10), (1, 11), (3, 6)]
            .into_iter()
            .map(|(month, day)| {
                let date = NaiveDate::from_ymd_opt(2017, month, day).unwrap();
                enrich(RawReading {
                    timestamp: date.and_hms_opt(12, 0, 0).unwrap(),
                    temperature: Decimal::from(18),
                    humidity: Decimal::from(55),
                    wind_speed: Decimal::ONE,
                    general_diffuse_flows: Decimal::ZERO,
                    diffuse_flows: Decimal::ZERO,
                    zone1: Decimal::from(25),
                    zone2: Decimal::from(25),
                    zone3: Decimal::from(50),
                })
            })
            .collect();
        let daily = Aggregator::default().daily(&readings).unwrap();
        serde_json::to_string(&daily).unwrap()
    }

    #[test]
    fn test_resolve_heatmap_click() {
        assert_eq!(resolve_heatmap_click(2017, 1, "Monday").as_deref(), Some("2017-01-02"));
        assert_eq!(resolve_heatmap_click(2017, 52, "sunday").as_deref(), Some("2017-12-31"));
    }

    #[test]
    fn test_resolve_click_payload() {
        let payload = r#"{"points": [{"x": 1, "y": "Monday"}]}"#;
        assert_eq!(resolve_click_payload(2017, payload).as_deref(), Some("2017-01-02"));
        assert_eq!(resolve_click_payload(2017, r#"{"points": []}"#), None);
        assert_eq!(resolve_click_payload(2017, "not json"), None);
    }

    #[test]
    fn test_iso_week_of() {
        assert_eq!(iso_week_of("2017-01-01").unwrap(), 52);
        assert_eq!(iso_week_of("2017-01-02").unwrap(), 1);
    }

    #[test]
    fn test_zone_breakdown_json() {
        let json = zone_breakdown_json(&daily_json(), r#"["January"]"#).unwrap();
        let breakdown: ZoneBreakdown = serde_json::from_str(&json).unwrap();

        assert!(breakdown.has_data);
        assert_eq!(breakdown.combined_total, Decimal::from(200));
        assert_eq!(breakdown.percentage(Zone::Zone3), Decimal::from(50));
    }

    #[test]
    fn test_monthly_breakdown_json_order() {
        let json = monthly_breakdown_json(&daily_json(), r#"["March","January"]"#).unwrap();
        let shares: Vec<MonthlyZoneShare> = serde_json::from_str(&json).unwrap();

        assert_eq!(shares.len(), 6);
        assert_eq!(shares[0].month, "January");
        assert_eq!(shares[3].month, "March");
    }

    #[test]
    fn test_empty_months_give_no_data() {
        let json = zone_breakdown_json(&daily_json(), "[]").unwrap();
        let breakdown: ZoneBreakdown = serde_json::from_str(&json).unwrap();
        assert!(!breakdown.has_data);
    }
}
