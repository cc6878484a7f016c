//! Chart-ready data shapes derived from the aggregated views
//!
//! These are the payloads the chart adapters render. Nothing here knows
//! about colors or layout; each function only selects and reshapes columns.

use std::collections::BTreeMap;

use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::{DailyRow, HourlyRow, ViewRow};
use crate::types::{Measure, Zone};

/// Series drawn on the consumption-over-time line chart
pub const LINE_SERIES: [Measure; 4] = [
    Measure::Zone1,
    Measure::Zone2,
    Measure::Zone3,
    Measure::AllZones,
];

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DatedValue {
    pub date: NaiveDate,
    pub value: Decimal,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LineSeries {
    pub name: String,
    pub measure: Measure,
    pub points: Vec<DatedValue>,
}

/// Daily peaks per zone plus the all-zones line, one series each
pub fn line_series(daily: &[DailyRow]) -> Vec<LineSeries> {
    LINE_SERIES
        .into_iter()
        .map(|measure| LineSeries {
            name: measure.name().to_string(),
            measure,
            points: daily
                .iter()
                .map(|row| DatedValue {
                    date: row.date,
                    value: row.measure(measure),
                })
                .collect(),
        })
        .collect()
}

/// One day cell of the week x weekday heatmap
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct HeatmapCell {
    /// ISO year the week belongs to
    pub iso_year: i32,
    pub week: u32,
    pub day_name: String,
    pub day_of_week: u32,
    pub date: NaiveDate,
    pub month_name: String,
    pub value: Decimal,
}

/// Axis tick marking the first week of a month
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MonthTick {
    pub week: u32,
    pub month_name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct HeatmapGrid {
    pub measure: Measure,
    pub cells: Vec<HeatmapCell>,
    /// Calendar order
    pub month_ticks: Vec<MonthTick>,
}

/// Heatmap cells for `measure`, x = ISO week, y = day name.
///
/// Days at either end of a calendar year can belong to a neighboring ISO
/// year: 2017-01-01 is (2016, week 52, Sunday) and shares its (week, day)
/// cell with 2017-12-31. `iso_year` tells such cells apart; a click on the
/// shared cell resolves within the dashboard year.
///
/// Month ticks sit at the smallest week number seen in each month.
pub fn heatmap_grid(daily: &[DailyRow], measure: Measure) -> HeatmapGrid {
    let cells: Vec<HeatmapCell> = daily
        .iter()
        .map(|row| HeatmapCell {
            iso_year: row.date.iso_week().year(),
            week: row.week,
            day_name: row.day_name.clone(),
            day_of_week: row.day_of_week,
            date: row.date,
            month_name: row.month_name.clone(),
            value: row.measure(measure),
        })
        .collect();

    let mut first_weeks: BTreeMap<u32, (u32, &str)> = BTreeMap::new();
    for row in daily {
        first_weeks
            .entry(row.month_number)
            .and_modify(|(week, _)| *week = (*week).min(row.week))
            .or_insert((row.week, row.month_name.as_str()));
    }
    let month_ticks = first_weeks
        .into_values()
        .map(|(week, month_name)| MonthTick {
            week,
            month_name: month_name.to_string(),
        })
        .collect();

    HeatmapGrid {
        measure,
        cells,
        month_ticks,
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct HourlyBar {
    pub hour_no: u32,
    pub value: Decimal,
}

/// All-zones hourly peaks of one day, by 1-based hour number
pub fn hourly_bar(hourly: &[HourlyRow]) -> Vec<HourlyBar> {
    let mut bars: Vec<HourlyBar> = hourly
        .iter()
        .map(|row| HourlyBar {
            hour_no: row.hour_no,
            value: row.power.all_zones,
        })
        .collect();
    bars.sort_by_key(|bar| bar.hour_no);
    bars
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ScatterPoint {
    pub date: NaiveDate,
    pub x: Decimal,
    pub y: Decimal,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ScatterSeries {
    pub name: String,
    pub x_measure: Measure,
    pub y_measure: Measure,
    pub x_title: String,
    pub y_title: String,
    pub points: Vec<ScatterPoint>,
}

/// Dropdown-driven scatter over any view
pub fn scatter_points<R: ViewRow>(rows: &[R], x: Measure, y: Measure) -> ScatterSeries {
    ScatterSeries {
        name: format!("{} vs. {}", x, y),
        x_measure: x,
        y_measure: y,
        x_title: x.axis_title().to_string(),
        y_title: y.axis_title().to_string(),
        points: rows
            .iter()
            .map(|row| ScatterPoint {
                date: row.date(),
                x: row.measure(x),
                y: row.measure(y),
            })
            .collect(),
    }
}

/// One scatter series per zone against a weather covariate
pub fn zone_scatter(daily: &[DailyRow], x: Measure) -> Vec<ScatterSeries> {
    Zone::ALL
        .into_iter()
        .map(|zone| {
            let mut series = scatter_points(daily, x, zone.measure());
            series.name = zone.label().to_string();
            series
        })
        .collect()
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BubblePoint {
    pub date: NaiveDate,
    pub x: Decimal,
    pub y: Decimal,
    /// All-zones peak, drives both bubble size and color
    pub size: Decimal,
    pub humidity: Decimal,
    pub temperature: Decimal,
    pub wind_speed: Decimal,
    pub month_name: String,
}

pub fn bubble_points(daily: &[DailyRow], x: Measure, y: Measure) -> Vec<BubblePoint> {
    daily
        .iter()
        .map(|row| BubblePoint {
            date: row.date,
            x: row.measure(x),
            y: row.measure(y),
            size: row.power.all_zones,
            humidity: row.weather.humidity,
            temperature: row.weather.temperature,
            wind_speed: row.weather.wind_speed,
            month_name: row.month_name.clone(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregate::Aggregator;
    use crate::ingest::enrich;
    use crate::models::RawReading;

    fn readings() -> Vec<crate::models::EnrichedReading> {
        // 2017-01-01 (Sunday, ISO week 52) through 2017-02-06
        let start = NaiveDate::from_ymd_opt(2017, 1, 1).unwrap();
        (0..37)
            .map(|offset| {
                let date = start + chrono::Days::new(offset);
                enrich(RawReading {
                    timestamp: date.and_hms_opt(12, 0, 0).unwrap(),
                    temperature: Decimal::from(offset),
                    humidity: Decimal::from(60),
                    wind_speed: Decimal::ONE,
                    general_diffuse_flows: Decimal::ZERO,
                    diffuse_flows: Decimal::ZERO,
                    zone1: Decimal::from(10),
                    zone2: Decimal::from(20),
                    zone3: Decimal::from(30),
                })
            })
            .collect()
    }

    #[test]
    fn test_line_series_has_four_series() {
        let daily = Aggregator::default().daily(&readings()).unwrap();
        let series = line_series(&daily);
        assert_eq!(series.len(), 4);
        assert_eq!(series[3].name, "AllZones");
        assert!(series.iter().all(|s| s.points.len() == daily.len()));
        assert_eq!(series[3].points[0].value, Decimal::from(60));
    }

    #[test]
    fn test_heatmap_grid_month_ticks() {
        let daily = Aggregator::default().daily(&readings()).unwrap();
        let grid = heatmap_grid(&daily, Measure::AllZones);
        assert_eq!(grid.cells.len(), 37);
        assert_eq!(grid.cells[0].week, 52);
        assert_eq!(grid.cells[0].day_name, "Sunday");
        assert_eq!(grid.cells[0].iso_year, 2016);
        assert_eq!(grid.cells[1].iso_year, 2017);
        assert_eq!(grid.cells[1].week, 1);

        assert_eq!(grid.month_ticks.len(), 2);
        assert_eq!(grid.month_ticks[0].month_name, "January");
        assert_eq!(grid.month_ticks[0].week, 1);
        assert_eq!(grid.month_ticks[1].month_name, "February");
        assert_eq!(grid.month_ticks[1].week, 5);
    }

    #[test]
    fn test_scatter_and_zone_scatter() {
        let daily = Aggregator::default().daily(&readings()).unwrap();
        let series = scatter_points(&daily, Measure::Temperature, Measure::Zone2);
        assert_eq!(series.name, "Temperature vs. Zone2");
        assert_eq!(series.points[5].x, Decimal::from(5));
        assert_eq!(series.points[5].y, Decimal::from(20));
        assert_eq!(series.x_title, "Temperature (°C)");
        assert_eq!(series.y_title, "Zone 2 Power Consumption (kW)");

        let zones = zone_scatter(&daily, Measure::Humidity);
        assert_eq!(zones.len(), 3);
        assert_eq!(zones[2].name, "Zone3");
        assert_eq!(zones[2].points[0].y, Decimal::from(30));
    }

    #[test]
    fn test_bubble_points_sized_by_all_zones() {
        let daily = Aggregator::default().daily(&readings()).unwrap();
        let bubbles = bubble_points(&daily, Measure::Humidity, Measure::WindSpeed);
        assert_eq!(bubbles.len(), 37);
        assert_eq!(bubbles[0].size, Decimal::from(60));
        assert_eq!(bubbles[0].x, Decimal::from(60));
        assert_eq!(bubbles[0].month_name, "January");
    }
}
