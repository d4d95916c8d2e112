use super::{
    capex::{capex_spend_by_offset, capex_spend_in_year, depreciation_schedule, projection_horizon},
    irr::{solve_irr, IrrEstimate},
};
use crate::{
    rampup::twelve_months,
    totals::{compute_totals_with, resolve_active},
};
use costforge_schemas::{model::ProjectData, scenario::ScenarioMultipliers};
use serde::Serialize;
use tracing::debug;

/// One projection year. Outflows (capex, opex, depreciation, tax) are
/// recorded as negative amounts, the way they read in a cash-flow table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct YearRow {
    #[serde(rename = "Year")]
    pub year: u32,
    #[serde(rename = "CAPEX")]
    pub capex: f64,
    #[serde(rename = "Revenue")]
    pub revenue: f64,
    #[serde(rename = "OPEX")]
    pub opex: f64,
    #[serde(rename = "Depreciation")]
    pub depreciation: f64,
    #[serde(rename = "Tax")]
    pub tax: f64,
    #[serde(rename = "OCF")]
    pub ocf: f64,
    #[serde(rename = "FCF")]
    pub fcf: f64,
    #[serde(rename = "PV_FCF")]
    pub pv_fcf: f64,
    #[serde(rename = "Cum_FCF")]
    pub cumulative_fcf: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FinancialProjection {
    pub currency: String,
    pub tpy: f64,
    pub price: f64,
    pub npv: f64,
    /// Only solved when there is revenue and a non-zero cash-flow series.
    pub irr: Option<IrrEstimate>,
    pub payback_year: Option<u32>,
    pub year0_capex: f64,
    pub peak_opex: f64,
    pub peak_revenue: f64,
    pub discount_rate: f64,
    pub years: Vec<YearRow>,
}

impl FinancialProjection {
    pub fn fcf_series(&self) -> Vec<f64> {
        self.years.iter().map(|y| y.fcf).collect()
    }
}

/// Projection under the active scenario.
pub fn project_financials(data: &ProjectData) -> FinancialProjection {
    project_financials_with(data, &resolve_active(data))
}

pub fn project_financials_with(data: &ProjectData, m: &ScenarioMultipliers) -> FinancialProjection {
    let fin = &data.finance;
    let settings = &data.settings;
    let horizon = projection_horizon(fin);
    let price = fin.selling_price_per_t;
    let esc = settings.escalation_pct_per_year / 100.0;
    let tax_rate = settings.tax_pct / 100.0;
    let disc = data.project.discount_rate_pct / 100.0;

    let totals = compute_totals_with(data, m);
    let base_opex = totals.subtotal + totals.overhead + totals.tax;
    let tpy = totals.tpy;

    let price_ramp = twelve_months(&data.rampup.price_pct);
    let year1_price_factor = price_ramp.iter().sum::<f64>() / price_ramp.len() as f64 / 100.0;

    let schedule = capex_spend_by_offset(fin);
    let depreciation = depreciation_schedule(fin);

    let mut years = Vec::with_capacity(horizon as usize + 1);
    let mut cumulative = 0.0;
    for y in 0..=horizon {
        let growth = (1.0 + esc).powi(y as i32);
        let capex = capex_spend_in_year(&schedule, y);
        let opex = base_opex * growth;
        let revenue = if price > 0.0 && tpy > 0.0 {
            if y == 0 {
                price * tpy * year1_price_factor
            } else {
                price * tpy * growth
            }
        } else {
            0.0
        };
        let dep = if fin.include_depreciation {
            depreciation.get(y as usize).copied().unwrap_or(0.0)
        } else {
            0.0
        };

        let ebit = revenue - opex - dep;
        let tax = (ebit * tax_rate).max(0.0);
        let ocf = (revenue - opex) - tax + dep;
        let fcf = ocf - capex;
        let pv_fcf = fcf / (1.0 + disc).powi(y as i32);
        cumulative += fcf;

        years.push(YearRow {
            year: y,
            capex: -capex,
            revenue,
            opex: -opex,
            depreciation: -dep,
            tax: -tax,
            ocf,
            fcf,
            pv_fcf,
            cumulative_fcf: cumulative,
        });
    }

    let npv: f64 = years.iter().map(|r| r.pv_fcf).sum();
    let fcf: Vec<f64> = years.iter().map(|r| r.fcf).collect();
    let irr = if price > 0.0 && fcf.iter().map(|v| v.abs()).sum::<f64>() > 0.0 {
        Some(solve_irr(&fcf))
    } else {
        None
    };
    let payback_year = years
        .iter()
        .find(|r| r.cumulative_fcf >= 0.0)
        .map(|r| r.year);
    let year0_capex = capex_spend_in_year(&schedule, 0);
    let peak_opex = years.iter().map(|r| -r.opex).fold(f64::NEG_INFINITY, f64::max);
    let peak_revenue = years.iter().map(|r| r.revenue).fold(f64::NEG_INFINITY, f64::max);

    debug!(
        years = years.len(),
        npv,
        irr = irr.map(|e| e.rate),
        payback = payback_year,
        "financial projection"
    );

    FinancialProjection {
        currency: data.currency().to_string(),
        tpy,
        price,
        npv,
        irr,
        payback_year,
        year0_capex,
        peak_opex,
        peak_revenue,
        discount_rate: disc,
        years,
    }
}
