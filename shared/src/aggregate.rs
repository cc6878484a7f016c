//! Group-and-reduce over enriched readings
//!
//! Every view is produced by the same primitive: partition the readings by a
//! key, then reduce each partition column by column according to a
//! [`ReductionPolicy`]. The dashboard policy averages the weather covariates
//! and keeps the peak of each zone, so a view row answers "what was the
//! highest load observed in this hour/day".
//!
//! Partitions live in a `BTreeMap`, so output rows come out sorted by key
//! (chronologically, since every key starts with the date) regardless of the
//! input order.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::error::{DashboardError, DashboardResult};
use crate::models::{
    DailyRow, EnrichedReading, HourlyRow, MonthlyZoneRow, PowerSummary, WeatherSummary,
};
use crate::types::Measure;

/// Source columns in accumulator order
const COLUMNS: [Measure; 8] = [
    Measure::Temperature,
    Measure::Humidity,
    Measure::WindSpeed,
    Measure::GeneralDiffuseFlows,
    Measure::DiffuseFlows,
    Measure::Zone1,
    Measure::Zone2,
    Measure::Zone3,
];

fn column_index(measure: Measure) -> Option<usize> {
    COLUMNS.iter().position(|column| *column == measure)
}

/// How a column collapses within a group
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reduction {
    Mean,
    Max,
}

/// Per-column reduction rules
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReductionPolicy {
    rules: [Reduction; 8],
}

impl ReductionPolicy {
    /// Mean for weather covariates, max for zone power
    pub const DASHBOARD: ReductionPolicy = ReductionPolicy {
        rules: [
            Reduction::Mean,
            Reduction::Mean,
            Reduction::Mean,
            Reduction::Mean,
            Reduction::Mean,
            Reduction::Max,
            Reduction::Max,
            Reduction::Max,
        ],
    };

    /// Override the rule of one source column. `AllZones` is derived from the
    /// zones and cannot be configured.
    pub fn with(mut self, measure: Measure, reduction: Reduction) -> Self {
        if let Some(index) = column_index(measure) {
            self.rules[index] = reduction;
        }
        self
    }

    pub fn reduction_for(&self, measure: Measure) -> Option<Reduction> {
        column_index(measure).map(|index| self.rules[index])
    }
}

impl Default for ReductionPolicy {
    fn default() -> Self {
        Self::DASHBOARD
    }
}

#[derive(Debug, Clone, Default)]
struct ColumnAccumulator {
    sum: Decimal,
    max: Option<Decimal>,
}

impl ColumnAccumulator {
    fn push(&mut self, value: Decimal) {
        self.sum = self.sum.saturating_add(value);
        self.max = Some(self.max.map_or(value, |max| max.max(value)));
    }

    fn finish(&self, reduction: Reduction, count: usize) -> Decimal {
        match reduction {
            Reduction::Mean if count > 0 => self.sum / Decimal::from(count),
            Reduction::Mean => Decimal::ZERO,
            Reduction::Max => self.max.unwrap_or(Decimal::ZERO),
        }
    }
}

#[derive(Debug, Clone, Default)]
struct GroupAccumulator {
    columns: [ColumnAccumulator; 8],
    coincident_peak: Option<Decimal>,
    count: usize,
}

impl GroupAccumulator {
    fn push(&mut self, reading: &EnrichedReading) {
        for (column, measure) in self.columns.iter_mut().zip(COLUMNS) {
            column.push(reading.measure(measure));
        }
        self.coincident_peak = Some(
            self.coincident_peak
                .map_or(reading.all_zones, |peak| peak.max(reading.all_zones)),
        );
        self.count += 1;
    }

    fn finish(&self, policy: &ReductionPolicy) -> Reduced {
        let value = |index: usize| self.columns[index].finish(policy.rules[index], self.count);

        Reduced {
            weather: WeatherSummary {
                temperature: value(0),
                humidity: value(1),
                wind_speed: value(2),
                general_diffuse_flows: value(3),
                diffuse_flows: value(4),
            },
            // all_zones is rebuilt from the reduced zones, never reduced on its own
            power: PowerSummary::new(
                value(5),
                value(6),
                value(7),
                self.coincident_peak.unwrap_or(Decimal::ZERO),
            ),
            sample_count: self.count,
        }
    }
}

/// Reduced measures of one group
#[derive(Debug, Clone, PartialEq)]
pub struct Reduced {
    pub weather: WeatherSummary,
    pub power: PowerSummary,
    pub sample_count: usize,
}

/// Hourly grouping key
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct HourlyKey {
    pub date: NaiveDate,
    pub hour: u32,
    pub week: u32,
    pub day_name: &'static str,
    pub month_name: &'static str,
    pub hour_no: u32,
    pub month_number: u32,
    pub day_of_month: u32,
    pub day_of_year: u32,
    pub day_of_week: u32,
}

impl HourlyKey {
    pub fn of(reading: &EnrichedReading) -> Self {
        Self {
            date: reading.date,
            hour: reading.hour,
            week: reading.week,
            day_name: reading.day_name,
            month_name: reading.month_name,
            hour_no: reading.hour_no,
            month_number: reading.month_number,
            day_of_month: reading.day_of_month,
            day_of_year: reading.day_of_year,
            day_of_week: reading.day_of_week,
        }
    }
}

/// Daily grouping key
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct DailyKey {
    pub date: NaiveDate,
    pub week: u32,
    pub day_name: &'static str,
    pub month_name: &'static str,
    pub month_number: u32,
    pub day_of_month: u32,
    pub day_of_year: u32,
    pub day_of_week: u32,
}

impl DailyKey {
    pub fn of(reading: &EnrichedReading) -> Self {
        Self {
            date: reading.date,
            week: reading.week,
            day_name: reading.day_name,
            month_name: reading.month_name,
            month_number: reading.month_number,
            day_of_month: reading.day_of_month,
            day_of_year: reading.day_of_year,
            day_of_week: reading.day_of_week,
        }
    }
}

/// Monthly-by-zone grouping key (daily grain, no weekday index)
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct MonthlyZoneKey {
    pub date: NaiveDate,
    pub week: u32,
    pub day_name: &'static str,
    pub month_name: &'static str,
    pub month_number: u32,
    pub day_of_month: u32,
    pub day_of_year: u32,
}

impl MonthlyZoneKey {
    pub fn of(reading: &EnrichedReading) -> Self {
        Self {
            date: reading.date,
            week: reading.week,
            day_name: reading.day_name,
            month_name: reading.month_name,
            month_number: reading.month_number,
            day_of_month: reading.day_of_month,
            day_of_year: reading.day_of_year,
        }
    }
}

/// Builds aggregated views under one reduction policy
#[derive(Debug, Clone, Default)]
pub struct Aggregator {
    policy: ReductionPolicy,
}

impl Aggregator {
    pub fn new(policy: ReductionPolicy) -> Self {
        Self { policy }
    }

    /// Partition `readings` by `key_fn` and reduce each partition.
    ///
    /// Fails with `EmptyGroup` when there is nothing to group.
    pub fn group_and_reduce<'a, I, K, F>(
        &self,
        readings: I,
        key_fn: F,
    ) -> DashboardResult<Vec<(K, Reduced)>>
    where
        I: IntoIterator<Item = &'a EnrichedReading>,
        K: Ord,
        F: Fn(&EnrichedReading) -> K,
    {
        let mut groups: BTreeMap<K, GroupAccumulator> = BTreeMap::new();
        for reading in readings {
            groups.entry(key_fn(reading)).or_default().push(reading);
        }

        if groups.is_empty() {
            return Err(DashboardError::EmptyGroup(
                "no readings to aggregate".to_string(),
            ));
        }

        Ok(groups
            .into_iter()
            .map(|(key, group)| (key, group.finish(&self.policy)))
            .collect())
    }

    /// One row per calendar hour present in the source
    pub fn hourly(&self, readings: &[EnrichedReading]) -> DashboardResult<Vec<HourlyRow>> {
        let groups = self.group_and_reduce(readings, HourlyKey::of)?;
        let rows: Vec<HourlyRow> = groups
            .into_iter()
            .map(|(key, reduced)| HourlyRow {
                date: key.date,
                week: key.week,
                hour: key.hour,
                day_name: key.day_name.to_string(),
                month_name: key.month_name.to_string(),
                hour_no: key.hour_no,
                month_number: key.month_number,
                day_of_month: key.day_of_month,
                day_of_year: key.day_of_year,
                day_of_week: key.day_of_week,
                weather: reduced.weather,
                power: reduced.power,
                sample_count: reduced.sample_count,
            })
            .collect();
        tracing::debug!(rows = rows.len(), "Hourly view aggregated");
        Ok(rows)
    }

    /// One row per calendar day
    pub fn daily(&self, readings: &[EnrichedReading]) -> DashboardResult<Vec<DailyRow>> {
        let groups = self.group_and_reduce(readings, DailyKey::of)?;
        let rows: Vec<DailyRow> = groups
            .into_iter()
            .map(|(key, reduced)| DailyRow {
                date: key.date,
                week: key.week,
                day_name: key.day_name.to_string(),
                month_name: key.month_name.to_string(),
                month_number: key.month_number,
                day_of_month: key.day_of_month,
                day_of_year: key.day_of_year,
                day_of_week: key.day_of_week,
                weather: reduced.weather,
                power: reduced.power,
                sample_count: reduced.sample_count,
            })
            .collect();
        tracing::debug!(rows = rows.len(), "Daily view aggregated");
        Ok(rows)
    }

    /// Daily-grain rows consumed by the month breakdowns
    pub fn monthly_by_zone(
        &self,
        readings: &[EnrichedReading],
    ) -> DashboardResult<Vec<MonthlyZoneRow>> {
        let groups = self.group_and_reduce(readings, MonthlyZoneKey::of)?;
        let rows: Vec<MonthlyZoneRow> = groups
            .into_iter()
            .map(|(key, reduced)| MonthlyZoneRow {
                date: key.date,
                week: key.week,
                day_name: key.day_name.to_string(),
                month_name: key.month_name.to_string(),
                month_number: key.month_number,
                day_of_month: key.day_of_month,
                day_of_year: key.day_of_year,
                weather: reduced.weather,
                power: reduced.power,
                sample_count: reduced.sample_count,
            })
            .collect();
        tracing::debug!(rows = rows.len(), "Monthly-by-zone view aggregated");
        Ok(rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ingest::enrich;
    use crate::models::RawReading;

    fn reading(day: u32, hour: u32, minute: u32, temp: i64, zones: [i64; 3]) -> EnrichedReading {
        enrich(RawReading {
            timestamp: NaiveDate::from_ymd_opt(2017, 1, day)
                .unwrap()
                .and_hms_opt(hour, minute, 0)
                .unwrap(),
            temperature: Decimal::from(temp),
            humidity: Decimal::from(50),
            wind_speed: Decimal::ONE,
            general_diffuse_flows: Decimal::ZERO,
            diffuse_flows: Decimal::ZERO,
            zone1: Decimal::from(zones[0]),
            zone2: Decimal::from(zones[1]),
            zone3: Decimal::from(zones[2]),
        })
    }

    #[test]
    fn test_hourly_mean_weather_max_power() {
        let readings = vec![
            reading(2, 10, 0, 10, [100, 10, 1]),
            reading(2, 10, 10, 20, [50, 40, 2]),
            reading(2, 10, 20, 30, [70, 20, 9]),
        ];
        let rows = Aggregator::default().hourly(&readings).unwrap();
        assert_eq!(rows.len(), 1);

        let row = &rows[0];
        assert_eq!(row.weather.temperature, Decimal::from(20));
        assert_eq!(row.power.zone1, Decimal::from(100));
        assert_eq!(row.power.zone2, Decimal::from(40));
        assert_eq!(row.power.zone3, Decimal::from(9));
        assert_eq!(row.power.all_zones, Decimal::from(149));
        // per-sample totals are 111, 92 and 99
        assert_eq!(row.power.coincident_peak, Decimal::from(111));
        assert_eq!(row.sample_count, 3);
        assert_eq!(row.hour_no, 11);
    }

    #[test]
    fn test_daily_groups_by_date_in_order() {
        let readings = vec![
            reading(3, 1, 0, 5, [1, 1, 1]),
            reading(2, 23, 50, 5, [2, 2, 2]),
            reading(2, 0, 0, 5, [3, 3, 3]),
        ];
        let rows = Aggregator::default().daily(&readings).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].date, NaiveDate::from_ymd_opt(2017, 1, 2).unwrap());
        assert_eq!(rows[0].power.zone1, Decimal::from(3));
        assert_eq!(rows[0].sample_count, 2);
        assert_eq!(rows[1].date, NaiveDate::from_ymd_opt(2017, 1, 3).unwrap());
        assert_eq!(rows[1].day_name, "Tuesday");
    }

    #[test]
    fn test_monthly_by_zone_matches_daily_grain() {
        let readings = vec![reading(2, 1, 0, 5, [1, 2, 3]), reading(5, 1, 0, 5, [4, 5, 6])];
        let aggregator = Aggregator::default();
        let daily = aggregator.daily(&readings).unwrap();
        let monthly = aggregator.monthly_by_zone(&readings).unwrap();
        assert_eq!(daily.len(), monthly.len());
        for (d, m) in daily.iter().zip(&monthly) {
            assert_eq!(d.date, m.date);
            assert_eq!(d.power, m.power);
        }
    }

    #[test]
    fn test_empty_input_is_empty_group() {
        let result = Aggregator::default().daily(&[]);
        assert!(matches!(result, Err(DashboardError::EmptyGroup(_))));
    }

    #[test]
    fn test_custom_policy_changes_only_configured_column() {
        let readings = vec![
            reading(2, 10, 0, 10, [100, 10, 1]),
            reading(2, 10, 10, 30, [50, 40, 2]),
        ];
        let policy = ReductionPolicy::DASHBOARD.with(Measure::Temperature, Reduction::Max);
        let rows = Aggregator::new(policy).hourly(&readings).unwrap();
        assert_eq!(rows[0].weather.temperature, Decimal::from(30));
        assert_eq!(rows[0].power.zone1, Decimal::from(100));
        assert_eq!(
            ReductionPolicy::DASHBOARD.reduction_for(Measure::Zone2),
            Some(Reduction::Max)
        );
        assert_eq!(ReductionPolicy::DASHBOARD.reduction_for(Measure::AllZones), None);
    }
}
