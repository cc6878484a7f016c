//! Zone share results for the clustered and stacked bar charts

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::types::Zone;

/// Consumption of one zone and its share of the combined total
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ZoneShare {
    pub zone: Zone,
    pub total_consumption: Decimal,
    /// 0..=100
    pub percentage_of_total: Decimal,
}

/// Shares of all three zones over a filtered view
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ZoneBreakdown {
    /// Always Zone1, Zone2, Zone3
    pub shares: Vec<ZoneShare>,
    pub combined_total: Decimal,
    /// False when the combined total is zero; percentages are then all zero
    pub has_data: bool,
}

impl ZoneBreakdown {
    pub fn share(&self, zone: Zone) -> Option<&ZoneShare> {
        self.shares.iter().find(|share| share.zone == zone)
    }

    pub fn percentage(&self, zone: Zone) -> Decimal {
        self.share(zone)
            .map(|share| share.percentage_of_total)
            .unwrap_or(Decimal::ZERO)
    }
}

/// One stacked segment of the per-month chart
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MonthlyZoneShare {
    pub month: String,
    pub month_number: u32,
    pub zone: Zone,
    pub consumption: Decimal,
    pub percentage: Decimal,
}
