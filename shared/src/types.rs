//! Common types used across the dashboard

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::calendar::{month_name_from_number, parse_month_name};
use crate::error::{DashboardError, DashboardResult};

/// One of the three independently metered consumption zones
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Zone {
    Zone1,
    Zone2,
    Zone3,
}

impl Zone {
    pub const ALL: [Zone; 3] = [Zone::Zone1, Zone::Zone2, Zone::Zone3];

    /// Label used as the series/category name in charts
    pub fn label(&self) -> &'static str {
        match self {
            Zone::Zone1 => "Zone1",
            Zone::Zone2 => "Zone2",
            Zone::Zone3 => "Zone3",
        }
    }

    pub fn measure(&self) -> Measure {
        match self {
            Zone::Zone1 => Measure::Zone1,
            Zone::Zone2 => Measure::Zone2,
            Zone::Zone3 => Measure::Zone3,
        }
    }
}

impl fmt::Display for Zone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A column of an aggregated view, selectable from chart dropdowns
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Measure {
    Temperature,
    Humidity,
    WindSpeed,
    GeneralDiffuseFlows,
    DiffuseFlows,
    Zone1,
    Zone2,
    Zone3,
    AllZones,
}

impl Measure {
    /// Weather covariates, reduced with the mean
    pub const WEATHER: [Measure; 5] = [
        Measure::Temperature,
        Measure::Humidity,
        Measure::WindSpeed,
        Measure::GeneralDiffuseFlows,
        Measure::DiffuseFlows,
    ];

    /// Metered zone columns, reduced with the max
    pub const ZONES: [Measure; 3] = [Measure::Zone1, Measure::Zone2, Measure::Zone3];

    pub fn name(&self) -> &'static str {
        match self {
            Measure::Temperature => "Temperature",
            Measure::Humidity => "Humidity",
            Measure::WindSpeed => "WindSpeed",
            Measure::GeneralDiffuseFlows => "GeneralDiffuseFlows",
            Measure::DiffuseFlows => "DiffuseFlows",
            Measure::Zone1 => "Zone1",
            Measure::Zone2 => "Zone2",
            Measure::Zone3 => "Zone3",
            Measure::AllZones => "AllZones",
        }
    }

    /// Axis title with unit
    pub fn axis_title(&self) -> &'static str {
        match self {
            Measure::Temperature => "Temperature (°C)",
            Measure::Humidity => "Humidity (%)",
            Measure::WindSpeed => "Wind Speed (m/s)",
            Measure::GeneralDiffuseFlows => "General Diffuse Flows",
            Measure::DiffuseFlows => "Diffuse Flows",
            Measure::Zone1 => "Zone 1 Power Consumption (kW)",
            Measure::Zone2 => "Zone 2 Power Consumption (kW)",
            Measure::Zone3 => "Zone 3 Power Consumption (kW)",
            Measure::AllZones => "Power Consumption (kW)",
        }
    }

    pub fn is_weather(&self) -> bool {
        Self::WEATHER.contains(self)
    }
}

impl fmt::Display for Measure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Measure {
    type Err = DashboardError;

    /// Accepts dropdown values as well as the raw dataset column names
    /// (`PowerConsumption_Zone1`, `Wind Speed`, ...).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .chars()
            .filter(|c| !matches!(c, '_' | ' ' | '-'))
            .collect::<String>()
            .to_ascii_lowercase();
        let normalized = normalized
            .strip_prefix("powerconsumption")
            .unwrap_or(&normalized);

        match normalized {
            "temperature" => Ok(Measure::Temperature),
            "humidity" => Ok(Measure::Humidity),
            "windspeed" => Ok(Measure::WindSpeed),
            "generaldiffuseflows" => Ok(Measure::GeneralDiffuseFlows),
            "diffuseflows" => Ok(Measure::DiffuseFlows),
            "zone1" => Ok(Measure::Zone1),
            "zone2" => Ok(Measure::Zone2),
            "zone3" => Ok(Measure::Zone3),
            "allzones" => Ok(Measure::AllZones),
            _ => Err(DashboardError::UnknownMeasure(s.to_string())),
        }
    }
}

/// Set of months picked in the month checklist.
///
/// The empty selection means "nothing selected yet" and filters every row
/// out; it is not a shorthand for all months.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MonthSelection {
    months: BTreeSet<u32>,
}

impl MonthSelection {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn all() -> Self {
        Self {
            months: (1..=12).collect(),
        }
    }

    /// Build from English month names; any unknown name is an error
    pub fn from_names<I, S>(names: I) -> DashboardResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let months = names
            .into_iter()
            .map(|name| {
                let name = name.as_ref();
                parse_month_name(name).ok_or_else(|| DashboardError::UnknownMonth(name.to_string()))
            })
            .collect::<DashboardResult<BTreeSet<u32>>>()?;
        Ok(Self { months })
    }

    /// Parse a comma separated list such as `January,March`; blank means none
    pub fn parse_list(list: &str) -> DashboardResult<Self> {
        Self::from_names(list.split(',').map(str::trim).filter(|name| !name.is_empty()))
    }

    pub fn contains(&self, month_number: u32) -> bool {
        self.months.contains(&month_number)
    }

    pub fn is_empty(&self) -> bool {
        self.months.is_empty()
    }

    pub fn len(&self) -> usize {
        self.months.len()
    }

    /// Selected month names in calendar order
    pub fn month_names(&self) -> Vec<&'static str> {
        self.months
            .iter()
            .filter_map(|month| month_name_from_number(*month))
            .collect()
    }
}

/// (week number, day name) pair emitted by a heatmap click
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct GridCoordinate {
    pub week: u32,
    pub day_name: String,
}

impl GridCoordinate {
    pub fn new(week: u32, day_name: impl Into<String>) -> Self {
        Self {
            week,
            day_name: day_name.into(),
        }
    }
}

/// Inclusive date range for queries
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    pub fn single_day(date: NaiveDate) -> Self {
        Self {
            start: date,
            end: date,
        }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && date <= self.end
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_measure_parses_dropdown_and_column_names() {
        assert_eq!("Humidity".parse::<Measure>().unwrap(), Measure::Humidity);
        assert_eq!("WindSpeed".parse::<Measure>().unwrap(), Measure::WindSpeed);
        assert_eq!("wind_speed".parse::<Measure>().unwrap(), Measure::WindSpeed);
        assert_eq!(
            "PowerConsumption_Zone2".parse::<Measure>().unwrap(),
            Measure::Zone2
        );
        assert_eq!(
            "PowerConsumption_AllZones".parse::<Measure>().unwrap(),
            Measure::AllZones
        );
        assert!(matches!(
            "Pressure".parse::<Measure>(),
            Err(DashboardError::UnknownMeasure(_))
        ));
    }

    #[test]
    fn test_month_selection_from_names() {
        let selection = MonthSelection::from_names(["March", "january"]).unwrap();
        assert_eq!(selection.len(), 2);
        assert!(selection.contains(1));
        assert!(selection.contains(3));
        assert!(!selection.contains(2));
        assert_eq!(selection.month_names(), vec!["January", "March"]);
    }

    #[test]
    fn test_month_selection_rejects_unknown() {
        assert!(matches!(
            MonthSelection::from_names(["Janvier"]),
            Err(DashboardError::UnknownMonth(_))
        ));
    }

    #[test]
    fn test_month_selection_parse_list() {
        assert!(MonthSelection::parse_list("").unwrap().is_empty());
        assert!(MonthSelection::parse_list(" , ").unwrap().is_empty());
        let selection = MonthSelection::parse_list("June, July").unwrap();
        assert_eq!(selection.month_names(), vec!["June", "July"]);
        assert_eq!(MonthSelection::all().len(), 12);
    }

    #[test]
    fn test_date_range_contains() {
        let start = NaiveDate::from_ymd_opt(2017, 1, 1).unwrap();
        let end = NaiveDate::from_ymd_opt(2017, 1, 31).unwrap();
        let range = DateRange::new(start, end);
        assert!(range.contains(start));
        assert!(range.contains(end));
        assert!(!range.contains(NaiveDate::from_ymd_opt(2017, 2, 1).unwrap()));
    }
}
