//! Dashboard context: every derived view, built once at startup
//!
//! The context owns the aggregated views and answers each interaction
//! (date drill-down, heatmap click, month checklist) against them. Queries
//! borrow the views and return new values; nothing is recomputed from the
//! raw readings after `build`.

use std::collections::BTreeMap;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::aggregate::Aggregator;
use crate::click::resolve_click_to_date;
use crate::error::{DashboardError, DashboardResult};
use crate::filter::{
    filter_by_months, monthly_zone_percentage_breakdown, zone_percentage_breakdown,
};
use crate::models::{
    DailyRow, EnrichedReading, HourlyRow, MonthlyZoneRow, MonthlyZoneShare, ZoneBreakdown,
};
use crate::types::{DateRange, GridCoordinate, MonthSelection};

/// Result of a heatmap click: the resolved date and its hourly rows
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ClickDrillDown {
    pub date: Option<NaiveDate>,
    pub hourly: Vec<HourlyRow>,
}

impl ClickDrillDown {
    pub fn empty() -> Self {
        Self {
            date: None,
            hourly: Vec::new(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct DashboardContext {
    year: i32,
    reading_count: usize,
    coverage: DateRange,
    hourly: Vec<HourlyRow>,
    daily: Vec<DailyRow>,
    monthly: Vec<MonthlyZoneRow>,
}

impl DashboardContext {
    /// Aggregate all views with the dashboard reduction policy
    pub fn build(readings: &[EnrichedReading]) -> DashboardResult<Self> {
        Self::build_with(readings, &Aggregator::default())
    }

    pub fn build_with(
        readings: &[EnrichedReading],
        aggregator: &Aggregator,
    ) -> DashboardResult<Self> {
        if readings.is_empty() {
            return Err(DashboardError::EmptyGroup("dataset has no readings".to_string()));
        }

        let hourly = aggregator.hourly(readings)?;
        let daily = aggregator.daily(readings)?;
        let monthly = aggregator.monthly_by_zone(readings)?;

        // daily is non-empty and sorted by date at this point
        let coverage = DateRange::new(daily[0].date, daily[daily.len() - 1].date);
        let year = dominant_year(&daily).unwrap_or_else(|| coverage.start.year());

        tracing::info!(
            readings = readings.len(),
            hourly = hourly.len(),
            daily = daily.len(),
            year,
            "Dashboard views built"
        );

        Ok(Self {
            year,
            reading_count: readings.len(),
            coverage,
            hourly,
            daily,
            monthly,
        })
    }

    /// Override the year used to resolve heatmap clicks
    pub fn with_year(mut self, year: i32) -> Self {
        self.year = year;
        self
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn reading_count(&self) -> usize {
        self.reading_count
    }

    /// First and last date present in the dataset
    pub fn coverage(&self) -> DateRange {
        self.coverage
    }

    pub fn hourly(&self) -> &[HourlyRow] {
        &self.hourly
    }

    pub fn daily(&self) -> &[DailyRow] {
        &self.daily
    }

    pub fn monthly_by_zone(&self) -> &[MonthlyZoneRow] {
        &self.monthly
    }

    /// Hourly rows of one date, ordered by hour
    pub fn hourly_for_date(&self, date: NaiveDate) -> DashboardResult<Vec<HourlyRow>> {
        let start = self.hourly.partition_point(|row| row.date < date);
        let end = self.hourly.partition_point(|row| row.date <= date);
        if start == end {
            return Err(DashboardError::EmptyGroup(format!("date {}", date)));
        }
        Ok(self.hourly[start..end].to_vec())
    }

    /// Daily rows inside an inclusive range
    pub fn daily_in_range(&self, range: DateRange) -> DashboardResult<Vec<DailyRow>> {
        let rows: Vec<DailyRow> = self
            .daily
            .iter()
            .filter(|row| range.contains(row.date))
            .cloned()
            .collect();
        if rows.is_empty() {
            return Err(DashboardError::EmptyGroup(format!(
                "range {} to {}",
                range.start, range.end
            )));
        }
        Ok(rows)
    }

    pub fn resolve_click(&self, coordinate: Option<&GridCoordinate>) -> Option<NaiveDate> {
        resolve_click_to_date(self.year, coordinate)
    }

    /// Resolve a heatmap click and fetch the hourly rows of that date.
    ///
    /// Unresolvable clicks and dates without data both degrade to an empty
    /// hourly list.
    pub fn hourly_for_click(&self, coordinate: Option<&GridCoordinate>) -> ClickDrillDown {
        let Some(date) = self.resolve_click(coordinate) else {
            return ClickDrillDown::empty();
        };

        match self.hourly_for_date(date) {
            Ok(hourly) => ClickDrillDown {
                date: Some(date),
                hourly,
            },
            Err(e) => {
                tracing::warn!("Heatmap click resolved outside the dataset: {}", e);
                ClickDrillDown {
                    date: Some(date),
                    hourly: Vec::new(),
                }
            }
        }
    }

    /// Month-filtered rows of the monthly-by-zone view
    pub fn monthly_rows_for(&self, selection: &MonthSelection) -> Vec<MonthlyZoneRow> {
        filter_by_months(&self.monthly, selection)
    }

    /// Zone shares over the selected months
    pub fn zone_breakdown(&self, selection: &MonthSelection) -> ZoneBreakdown {
        let rows = self.monthly_rows_for(selection);
        tracing::debug!(months = ?selection.month_names(), rows = rows.len(), "Zone breakdown");
        zone_percentage_breakdown(&rows)
    }

    /// Zone shares per selected month, in calendar order
    pub fn monthly_breakdown(&self, selection: &MonthSelection) -> Vec<MonthlyZoneShare> {
        let rows = self.monthly_rows_for(selection);
        tracing::debug!(
            months = ?selection.month_names(),
            rows = rows.len(),
            "Monthly breakdown"
        );
        monthly_zone_percentage_breakdown(&rows)
    }
}

/// Calendar year holding the most days
fn dominant_year(daily: &[DailyRow]) -> Option<i32> {
    let mut counts: BTreeMap<i32, usize> = BTreeMap::new();
    for row in daily {
        *counts.entry(row.date.year()).or_default() += 1;
    }
    counts
        .into_iter()
        .max_by_key(|(_, count)| *count)
        .map(|(year, _)| year)
}
