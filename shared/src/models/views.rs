//! Typed rows of the aggregated views

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::types::{Measure, Zone};

/// Mean-reduced weather covariates of a group
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct WeatherSummary {
    pub temperature: Decimal,
    pub humidity: Decimal,
    pub wind_speed: Decimal,
    pub general_diffuse_flows: Decimal,
    pub diffuse_flows: Decimal,
}

/// Peak-reduced power measures of a group.
///
/// `all_zones` is always `zone1 + zone2 + zone3`. `coincident_peak` is the
/// largest per-sample total, which can be lower than `all_zones` when the
/// zones peak at different times.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct PowerSummary {
    pub zone1: Decimal,
    pub zone2: Decimal,
    pub zone3: Decimal,
    pub all_zones: Decimal,
    pub coincident_peak: Decimal,
}

impl PowerSummary {
    pub fn new(zone1: Decimal, zone2: Decimal, zone3: Decimal, coincident_peak: Decimal) -> Self {
        Self {
            zone1,
            zone2,
            zone3,
            all_zones: zone1.saturating_add(zone2).saturating_add(zone3),
            coincident_peak,
        }
    }

    pub fn zone(&self, zone: Zone) -> Decimal {
        match zone {
            Zone::Zone1 => self.zone1,
            Zone::Zone2 => self.zone2,
            Zone::Zone3 => self.zone3,
        }
    }
}

/// Accessors shared by every aggregated row type
pub trait ViewRow {
    fn date(&self) -> NaiveDate;
    fn month_number(&self) -> u32;
    fn month_name(&self) -> &str;
    fn weather(&self) -> &WeatherSummary;
    fn power(&self) -> &PowerSummary;

    /// Column lookup used for dropdown-driven axes
    fn measure(&self, measure: Measure) -> Decimal {
        let weather = self.weather();
        let power = self.power();
        match measure {
            Measure::Temperature => weather.temperature,
            Measure::Humidity => weather.humidity,
            Measure::WindSpeed => weather.wind_speed,
            Measure::GeneralDiffuseFlows => weather.general_diffuse_flows,
            Measure::DiffuseFlows => weather.diffuse_flows,
            Measure::Zone1 => power.zone1,
            Measure::Zone2 => power.zone2,
            Measure::Zone3 => power.zone3,
            Measure::AllZones => power.all_zones,
        }
    }
}

/// One calendar hour
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct HourlyRow {
    pub date: NaiveDate,
    pub week: u32,
    pub hour: u32,
    pub day_name: String,
    pub month_name: String,
    pub hour_no: u32,
    pub month_number: u32,
    pub day_of_month: u32,
    pub day_of_year: u32,
    pub day_of_week: u32,
    #[serde(flatten)]
    pub weather: WeatherSummary,
    #[serde(flatten)]
    pub power: PowerSummary,
    pub sample_count: usize,
}

/// One calendar day
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DailyRow {
    pub date: NaiveDate,
    pub week: u32,
    pub day_name: String,
    pub month_name: String,
    pub month_number: u32,
    pub day_of_month: u32,
    pub day_of_year: u32,
    pub day_of_week: u32,
    #[serde(flatten)]
    pub weather: WeatherSummary,
    #[serde(flatten)]
    pub power: PowerSummary,
    pub sample_count: usize,
}

/// Daily-grain row feeding the per-month zone breakdowns
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MonthlyZoneRow {
    pub date: NaiveDate,
    pub week: u32,
    pub day_name: String,
    pub month_name: String,
    pub month_number: u32,
    pub day_of_month: u32,
    pub day_of_year: u32,
    #[serde(flatten)]
    pub weather: WeatherSummary,
    #[serde(flatten)]
    pub power: PowerSummary,
    pub sample_count: usize,
}

macro_rules! impl_view_row {
    ($($row:ty),*) => {
        $(
            impl ViewRow for $row {
                fn date(&self) -> NaiveDate {
                    self.date
                }

                fn month_number(&self) -> u32 {
                    self.month_number
                }

                fn month_name(&self) -> &str {
                    &self.month_name
                }

                fn weather(&self) -> &WeatherSummary {
                    &self.weather
                }

                fn power(&self) -> &PowerSummary {
                    &self.power
                }
            }
        )*
    };
}

impl_view_row!(HourlyRow, DailyRow, MonthlyZoneRow);
