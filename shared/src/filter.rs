//! Month filtering and zone share breakdowns
//!
//! Every function takes a view by reference and returns a fresh value, so
//! the shared views stay untouched between interactions.

use std::collections::BTreeMap;

use rust_decimal::Decimal;

use crate::calendar::month_name_from_number;
use crate::models::{MonthlyZoneShare, ViewRow, ZoneBreakdown, ZoneShare};
use crate::types::{MonthSelection, Zone};

/// Rows whose month is selected. An empty selection keeps nothing.
pub fn filter_by_months<R: ViewRow + Clone>(view: &[R], selection: &MonthSelection) -> Vec<R> {
    view.iter()
        .filter(|row| selection.contains(row.month_number()))
        .cloned()
        .collect()
}

fn percentage(part: Decimal, total: Decimal) -> Decimal {
    if total.is_zero() {
        Decimal::ZERO
    } else {
        part / total * Decimal::ONE_HUNDRED
    }
}

fn sum_of(totals: &[Decimal]) -> Decimal {
    totals
        .iter()
        .fold(Decimal::ZERO, |acc, total| acc.saturating_add(*total))
}

fn zone_totals<'a, R: ViewRow + 'a>(rows: impl IntoIterator<Item = &'a R>) -> [Decimal; 3] {
    let mut totals = [Decimal::ZERO; 3];
    for row in rows {
        for (total, zone) in totals.iter_mut().zip(Zone::ALL) {
            *total = total.saturating_add(row.power().zone(zone));
        }
    }
    totals
}

/// Sum each zone's peak column over the view and express it as a share of
/// the combined sum. A zero combined sum reports zero percentages.
pub fn zone_percentage_breakdown<R: ViewRow>(view: &[R]) -> ZoneBreakdown {
    let totals = zone_totals(view);
    let combined_total = sum_of(&totals);

    let shares = Zone::ALL
        .into_iter()
        .zip(totals)
        .map(|(zone, total)| ZoneShare {
            zone,
            total_consumption: total,
            percentage_of_total: percentage(total, combined_total),
        })
        .collect();

    ZoneBreakdown {
        shares,
        combined_total,
        has_data: !combined_total.is_zero(),
    }
}

/// Zone shares per month, January first, zones in Zone1..Zone3 order
pub fn monthly_zone_percentage_breakdown<R: ViewRow>(view: &[R]) -> Vec<MonthlyZoneShare> {
    let mut by_month: BTreeMap<u32, Vec<&R>> = BTreeMap::new();
    for row in view {
        by_month.entry(row.month_number()).or_default().push(row);
    }

    by_month
        .into_iter()
        .flat_map(|(month_number, rows)| {
            let totals = zone_totals(rows);
            let month_total = sum_of(&totals);
            let month = month_name_from_number(month_number)
                .unwrap_or_default()
                .to_string();

            Zone::ALL
                .into_iter()
                .zip(totals)
                .map(move |(zone, consumption)| MonthlyZoneShare {
                    month: month.clone(),
                    month_number,
                    zone,
                    consumption,
                    percentage: percentage(consumption, month_total),
                })
        })
        .collect()
}
