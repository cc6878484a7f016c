//! Dataset ingestion and calendar enrichment
//!
//! Reads the power consumption CSV (`Datetime, Temperature, Humidity,
//! WindSpeed, GeneralDiffuseFlows, DiffuseFlows, PowerConsumption_Zone1..3`)
//! into enriched readings. Any row missing a field or carrying an
//! unparseable value aborts the whole load: a partial dataset would silently
//! understate every total.

use std::fs::File;
use std::io::Read;
use std::path::Path;
use std::str::FromStr;

use chrono::{Datelike, NaiveDateTime, Timelike};
use rust_decimal::Decimal;
use serde::Deserialize;

use crate::calendar::{day_name, day_of_week_index, iso_week_number, month_name};
use crate::error::{DashboardError, DashboardResult};
use crate::models::{EnrichedReading, RawReading};
use crate::validation::validate_reading;

/// Timestamp layouts accepted in the `Datetime` column
const TIMESTAMP_FORMATS: &[&str] = &[
    "%m/%d/%Y %H:%M",
    "%m/%d/%Y %H:%M:%S",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M",
];

/// Largest magnitude accepted in a numeric column. Keeps every per-row total
/// and per-group sum of a year of readings well inside `Decimal` range.
const MAX_MAGNITUDE: i64 = 1_000_000_000_000_000;

/// A CSV row before validation; every field may be absent
#[derive(Debug, Deserialize)]
struct CsvRecord {
    #[serde(rename = "Datetime", alias = "datetime")]
    datetime: Option<String>,
    #[serde(rename = "Temperature", alias = "temperature")]
    temperature: Option<String>,
    #[serde(rename = "Humidity", alias = "humidity")]
    humidity: Option<String>,
    #[serde(rename = "WindSpeed", alias = "wind_speed")]
    wind_speed: Option<String>,
    #[serde(rename = "GeneralDiffuseFlows", alias = "general_diffuse_flows")]
    general_diffuse_flows: Option<String>,
    #[serde(rename = "DiffuseFlows", alias = "diffuse_flows")]
    diffuse_flows: Option<String>,
    #[serde(rename = "PowerConsumption_Zone1", alias = "Zone1")]
    zone1: Option<String>,
    #[serde(rename = "PowerConsumption_Zone2", alias = "Zone2")]
    zone2: Option<String>,
    #[serde(rename = "PowerConsumption_Zone3", alias = "Zone3")]
    zone3: Option<String>,
}

impl CsvRecord {
    fn into_raw(self, line: u64) -> DashboardResult<RawReading> {
        let datetime = required(&self.datetime, "Datetime", line)?;
        let timestamp = parse_timestamp(datetime).ok_or_else(|| DashboardError::MalformedRow {
            line,
            field: "Datetime".to_string(),
            reason: format!("has unrecognized timestamp '{}'", datetime),
        })?;

        Ok(RawReading {
            timestamp,
            temperature: decimal_field(&self.temperature, "Temperature", line)?,
            humidity: decimal_field(&self.humidity, "Humidity", line)?,
            wind_speed: decimal_field(&self.wind_speed, "WindSpeed", line)?,
            general_diffuse_flows: decimal_field(
                &self.general_diffuse_flows,
                "GeneralDiffuseFlows",
                line,
            )?,
            diffuse_flows: decimal_field(&self.diffuse_flows, "DiffuseFlows", line)?,
            zone1: decimal_field(&self.zone1, "PowerConsumption_Zone1", line)?,
            zone2: decimal_field(&self.zone2, "PowerConsumption_Zone2", line)?,
            zone3: decimal_field(&self.zone3, "PowerConsumption_Zone3", line)?,
        })
    }
}

fn required<'a>(value: &'a Option<String>, field: &str, line: u64) -> DashboardResult<&'a str> {
    match value.as_deref().map(str::trim) {
        Some(v) if !v.is_empty() => Ok(v),
        _ => Err(DashboardError::MalformedRow {
            line,
            field: field.to_string(),
            reason: "is missing".to_string(),
        }),
    }
}

fn decimal_field(value: &Option<String>, field: &str, line: u64) -> DashboardResult<Decimal> {
    let text = required(value, field, line)?;
    let number = Decimal::from_str(text)
        .or_else(|_| Decimal::from_scientific(text))
        .map_err(|_| DashboardError::MalformedRow {
            line,
            field: field.to_string(),
            reason: format!("is not a number: '{}'", text),
        })?;

    if number.abs() > Decimal::from(MAX_MAGNITUDE) {
        return Err(DashboardError::MalformedRow {
            line,
            field: field.to_string(),
            reason: format!("is out of range: '{}'", text),
        });
    }
    Ok(number)
}

/// Parse a `Datetime` cell in any of the accepted layouts
pub fn parse_timestamp(value: &str) -> Option<NaiveDateTime> {
    let value = value.trim();
    TIMESTAMP_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(value, format).ok())
}

/// Derive the calendar fields and the all-zones total of a reading
pub fn enrich(raw: RawReading) -> EnrichedReading {
    let date = raw.timestamp.date();
    let hour = raw.timestamp.hour();
    let all_zones = raw.all_zones();

    EnrichedReading {
        date,
        week: iso_week_number(date),
        day_of_week: day_of_week_index(date),
        day_name: day_name(date),
        month_number: date.month(),
        month_name: month_name(date),
        day_of_month: date.day(),
        day_of_year: date.ordinal(),
        hour,
        hour_no: hour + 1,
        all_zones,
        raw,
    }
}

/// Parse and enrich every row of a CSV source, in source order
pub fn ingest<R: Read>(source: R) -> DashboardResult<Vec<EnrichedReading>> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(source);
    let headers = reader.headers()?.clone();

    let mut readings = Vec::new();
    let mut suspicious = 0usize;
    let mut record = csv::StringRecord::new();

    while reader.read_record(&mut record)? {
        let line = record.position().map(|p| p.line()).unwrap_or_default();
        let parsed: CsvRecord =
            record
                .deserialize(Some(&headers))
                .map_err(|e| DashboardError::MalformedRow {
                    line,
                    field: "record".to_string(),
                    reason: e.to_string(),
                })?;
        let raw = parsed.into_raw(line)?;

        if let Err(reason) = validate_reading(&raw) {
            suspicious += 1;
            tracing::debug!(line, reason, "Suspicious reading kept");
        }

        readings.push(enrich(raw));
    }

    if suspicious > 0 {
        tracing::warn!(suspicious, "Dataset contains out-of-range readings");
    }
    tracing::info!(rows = readings.len(), "Dataset ingested");

    Ok(readings)
}

/// Ingest the dataset file at `path`
pub fn ingest_path(path: impl AsRef<Path>) -> DashboardResult<Vec<EnrichedReading>> {
    let path = path.as_ref();
    tracing::info!("Loading dataset from {}", path.display());
    let file = File::open(path)?;
    ingest(file)
}
