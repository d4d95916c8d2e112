//! CAPEX scheduling, depreciation and the discounted cash-flow projection.

pub mod capex;
pub mod irr;
pub mod projection;

pub use capex::{
    capex_spend_by_offset, capex_spend_in_year, depreciation_schedule, projection_horizon,
    MAX_HORIZON_YEARS,
};
pub use irr::{npv_at, solve_irr, IrrEstimate};
pub use projection::{project_financials, project_financials_with, FinancialProjection, YearRow};
