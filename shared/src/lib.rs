//! Core of the Power Consumption Dashboard
//!
//! Loads the per-10-minute power consumption dataset, derives the hourly,
//! daily and monthly-by-zone views, and maps chart interactions (heatmap
//! clicks, dropdowns, month checklists) onto queries over those views.
//! Shared between the backend server and the browser (via WASM).

pub mod aggregate;
pub mod calendar;
pub mod click;
pub mod context;
pub mod error;
pub mod filter;
pub mod ingest;
pub mod models;
pub mod series;
pub mod types;
pub mod validation;

pub use aggregate::{Aggregator, Reduction, ReductionPolicy};
pub use context::{ClickDrillDown, DashboardContext};
pub use error::{DashboardError, DashboardResult};
pub use models::*;
pub use types::*;
pub use validation::*;
