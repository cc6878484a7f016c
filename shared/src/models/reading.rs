//! Meter readings as loaded from the dataset

use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::types::Measure;

/// One sample of the source dataset (every 10 minutes in the reference data)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RawReading {
    pub timestamp: NaiveDateTime,
    /// Degrees Celsius
    pub temperature: Decimal,
    /// Relative humidity, percent
    pub humidity: Decimal,
    /// m/s
    pub wind_speed: Decimal,
    pub general_diffuse_flows: Decimal,
    pub diffuse_flows: Decimal,
    pub zone1: Decimal,
    pub zone2: Decimal,
    pub zone3: Decimal,
}

impl RawReading {
    /// Sum of the three zone draws at this timestamp
    pub fn all_zones(&self) -> Decimal {
        self.zone1.saturating_add(self.zone2).saturating_add(self.zone3)
    }
}

/// A raw reading plus the calendar fields every view groups on
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct EnrichedReading {
    #[serde(flatten)]
    pub raw: RawReading,
    pub date: NaiveDate,
    /// ISO-8601 week number
    pub week: u32,
    /// Monday = 0
    pub day_of_week: u32,
    pub day_name: &'static str,
    pub month_number: u32,
    pub month_name: &'static str,
    pub day_of_month: u32,
    pub day_of_year: u32,
    /// 0..=23
    pub hour: u32,
    /// 1..=24, for display
    pub hour_no: u32,
    pub all_zones: Decimal,
}

impl EnrichedReading {
    /// Value of a source column; `AllZones` is the per-sample total
    pub fn measure(&self, measure: Measure) -> Decimal {
        match measure {
            Measure::Temperature => self.raw.temperature,
            Measure::Humidity => self.raw.humidity,
            Measure::WindSpeed => self.raw.wind_speed,
            Measure::GeneralDiffuseFlows => self.raw.general_diffuse_flows,
            Measure::DiffuseFlows => self.raw.diffuse_flows,
            Measure::Zone1 => self.raw.zone1,
            Measure::Zone2 => self.raw.zone2,
            Measure::Zone3 => self.raw.zone3,
            Measure::AllZones => self.all_zones,
        }
    }
}
