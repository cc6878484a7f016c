//! Calendar arithmetic shared by row labeling and click inversion
//!
//! Day indices follow the ISO-8601 convention: weeks start on Monday and
//! Monday is index 0. The aggregated views label their rows through this
//! module and the click resolver inverts through it, so a heatmap cell and
//! the date it drills into always agree.

use chrono::{Datelike, Days, NaiveDate, Weekday};

use crate::error::{DashboardError, DashboardResult};

/// English day names, indexed by `day_of_week_index`
pub const DAY_NAMES: [&str; 7] = [
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
    "Sunday",
];

/// English month names, January first
pub const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// ISO-8601 week number (1..=53)
pub fn iso_week_number(date: NaiveDate) -> u32 {
    date.iso_week().week()
}

/// Day of week with Monday = 0 and Sunday = 6
pub fn day_of_week_index(date: NaiveDate) -> u32 {
    date.weekday().num_days_from_monday()
}

pub fn day_name(date: NaiveDate) -> &'static str {
    DAY_NAMES[day_of_week_index(date) as usize]
}

pub fn month_name(date: NaiveDate) -> &'static str {
    MONTH_NAMES[date.month0() as usize]
}

/// Month name for a 1-based month number
pub fn month_name_from_number(month: u32) -> Option<&'static str> {
    let index = month.checked_sub(1)?;
    MONTH_NAMES.get(index as usize).copied()
}

/// Day index for an English day name (case-insensitive)
pub fn parse_day_name(name: &str) -> Option<u32> {
    let name = name.trim();
    DAY_NAMES
        .iter()
        .position(|day| day.eq_ignore_ascii_case(name))
        .map(|index| index as u32)
}

/// 1-based month number for an English month name (case-insensitive)
pub fn parse_month_name(name: &str) -> Option<u32> {
    let name = name.trim();
    MONTH_NAMES
        .iter()
        .position(|month| month.eq_ignore_ascii_case(name))
        .map(|index| index as u32 + 1)
}

/// Number of ISO weeks (52 or 53) in an ISO year
pub fn weeks_in_iso_year(year: i32) -> u32 {
    // 28 December always falls in the last ISO week of its year
    NaiveDate::from_ymd_opt(year, 12, 28)
        .map(iso_week_number)
        .unwrap_or(52)
}

/// Monday of ISO week 1, the anchor for week/day inversion
pub fn iso_week_one_monday(year: i32) -> Option<NaiveDate> {
    NaiveDate::from_isoywd_opt(year, 1, Weekday::Mon)
}

/// Concrete date for an ISO (year, week, day name) triple.
///
/// Offsets the Monday of ISO week 1 by `(week - 1) * 7 + day_index` days.
/// Week 53 is only accepted for ISO years that have one.
pub fn resolve_date_from_week_and_day(
    year: i32,
    week: u32,
    day_name: &str,
) -> DashboardResult<NaiveDate> {
    if !(1..=53).contains(&week) {
        return Err(DashboardError::InvalidDateComponents(format!(
            "week {} outside 1..=53",
            week
        )));
    }

    let day_index = parse_day_name(day_name).ok_or_else(|| {
        DashboardError::InvalidDateComponents(format!("unrecognized day name '{}'", day_name))
    })?;

    if week > weeks_in_iso_year(year) {
        return Err(DashboardError::InvalidDateComponents(format!(
            "ISO year {} has no week {}",
            year, week
        )));
    }

    let anchor = iso_week_one_monday(year).ok_or_else(|| {
        DashboardError::InvalidDateComponents(format!("year {} out of range", year))
    })?;

    let offset = u64::from((week - 1) * 7 + day_index);
    anchor.checked_add_days(Days::new(offset)).ok_or_else(|| {
        DashboardError::InvalidDateComponents(format!(
            "week {} {} of {} overflows the calendar",
            week, day_name, year
        ))
    })
}
