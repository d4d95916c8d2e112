//! Costing and financial projection engine for process plants.
//!
//! Everything here is a pure function of a borrowed [`ProjectData`]:
//! rollups turn per-tonne intensities into annual costs, [`totals`] folds
//! them into categories with overhead, contingency, tax and risk, and
//! [`finance`] lays the result over a multi-year cash-flow projection.
//!
//! [`ProjectData`]: costforge_schemas::model::ProjectData

pub mod builder;
pub mod defaults;
pub mod error;
pub mod finance;
pub mod rampup;
pub mod report;
pub mod rollup;
pub mod stage;
pub mod totals;

pub use builder::ProjectBuilder;
pub use error::{CostforgeError, Result};
pub use finance::{project_financials, project_financials_with, FinancialProjection};
pub use rampup::{compute_ramp_monthly, compute_ramp_monthly_with, ramp_averages};
pub use stage::stage_metadata;
pub use totals::{compare_scenarios, compute_totals, compute_totals_with, TotalsResult};
