//! Typed records for readings, aggregated views and breakdowns

mod breakdown;
mod reading;
mod views;

pub use breakdown::*;
pub use reading::*;
pub use views::*;
