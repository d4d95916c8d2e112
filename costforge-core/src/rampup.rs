use crate::totals::{compute_totals_with, resolve_active};
use costforge_schemas::{
    category::CostCategory, model::ProjectData, rampup::RampUpProfile,
    scenario::ScenarioMultipliers,
};
use serde::Serialize;
use tracing::debug;

pub const MONTHS: usize = 12;

/// Normalizes a ramp curve to twelve months: empty means 100% throughout,
/// short curves repeat their last value, long ones are cut.
pub fn twelve_months(curve: &[f64]) -> [f64; MONTHS] {
    let mut out = [100.0; MONTHS];
    if let Some(&last) = curve.last() {
        for (i, slot) in out.iter_mut().enumerate() {
            *slot = curve.get(i).copied().unwrap_or(last);
        }
    }
    out
}

fn mean(curve: &[f64; MONTHS]) -> f64 {
    curve.iter().sum::<f64>() / MONTHS as f64
}

/// One month of first-year spend per ramped bucket.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RampMonth {
    #[serde(rename = "Month")]
    pub month: u32,
    #[serde(rename = "Utilities")]
    pub utilities: f64,
    #[serde(rename = "Logistics - Packaging")]
    pub logistics_packaging: f64,
    #[serde(rename = "Logistics - Transport")]
    pub logistics_transport: f64,
    #[serde(rename = "Other")]
    pub other: f64,
}

impl RampMonth {
    pub fn total(&self) -> f64 {
        self.utilities + self.logistics_packaging + self.logistics_transport + self.other
    }
}

/// Year-one average of each curve, in percent of steady state.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RampAverages {
    pub utilities: f64,
    pub logistics_packaging: f64,
    pub logistics_transport: f64,
    pub other: f64,
    pub price: f64,
}

pub fn ramp_averages(profile: &RampUpProfile) -> RampAverages {
    RampAverages {
        utilities: mean(&twelve_months(&profile.utilities_pct)),
        logistics_packaging: mean(&twelve_months(&profile.logistics_packaging_pct)),
        logistics_transport: mean(&twelve_months(&profile.logistics_transport_pct)),
        other: mean(&twelve_months(&profile.other_pct)),
        price: mean(&twelve_months(&profile.price_pct)),
    }
}

/// Monthly first-year costs under the active scenario.
pub fn compute_ramp_monthly(data: &ProjectData) -> Vec<RampMonth> {
    compute_ramp_monthly_with(data, &resolve_active(data))
}

/// Each month gets `annual / 12 * pct / 100`. Months are independent, so a
/// curve below 100 leaves a shortfall instead of shifting cost to later months.
pub fn compute_ramp_monthly_with(data: &ProjectData, m: &ScenarioMultipliers) -> Vec<RampMonth> {
    let totals = compute_totals_with(data, m);
    let b = &totals.breakdown;
    let other_annual: f64 = totals
        .by_category
        .iter()
        .filter(|(cat, _)| !matches!(cat, CostCategory::Utilities | CostCategory::Logistics))
        .map(|(_, v)| v)
        .sum();

    let ru = &data.rampup;
    let up = twelve_months(&ru.utilities_pct);
    let lp = twelve_months(&ru.logistics_packaging_pct);
    let lt = twelve_months(&ru.logistics_transport_pct);
    let op = twelve_months(&ru.other_pct);

    let monthly = |annual: f64, pct: f64| annual / MONTHS as f64 * pct / 100.0;
    let rows: Vec<RampMonth> = (0..MONTHS)
        .map(|i| RampMonth {
            month: i as u32 + 1,
            utilities: monthly(b.utilities_total, up[i]),
            logistics_packaging: monthly(b.log_packaging_total, lp[i]),
            logistics_transport: monthly(b.log_transport_total, lt[i]),
            other: monthly(other_annual, op[i]),
        })
        .collect();

    debug!(
        first_month = rows.first().map(RampMonth::total).unwrap_or(0.0),
        other_annual,
        "ramp-up allocation"
    );
    rows
}

#[cfg(test)]
mod tests {
    use super::*;
    use costforge_schemas::opex::LineItem;
    use costforge_schemas::process::UtilityRow;

    #[test]
    fn curves_are_padded_or_truncated_to_twelve() {
        assert_eq!(twelve_months(&[]), [100.0; 12]);
        let short = twelve_months(&[50.0, 80.0]);
        assert_eq!(short[0], 50.0);
        assert_eq!(short[1], 80.0);
        assert_eq!(short[11], 80.0);
        let long: Vec<f64> = (1..=15).map(f64::from).collect();
        assert_eq!(twelve_months(&long)[11], 12.0);
    }

    #[test]
    fn flat_curves_spread_the_annual_amount_evenly() {
        let mut data = ProjectData::default();
        data.process.throughput_tpy = 1200.0;
        data.process.utilities.push(UtilityRow {
            name: "Power".into(),
            intensity_per_t: 1.0,
            tariff_per_unit: 1.0,
            ..UtilityRow::default()
        });
        data.line_items.push(LineItem {
            quantity: 1.0,
            unit_cost: 2400.0,
            ..LineItem::default()
        });
        let rows = compute_ramp_monthly(&data);
        assert_eq!(rows.len(), 12);
        assert_eq!(rows[11].month, 12);
        let util: f64 = rows.iter().map(|r| r.utilities).sum();
        let other: f64 = rows.iter().map(|r| r.other).sum();
        assert!((util - 1200.0).abs() < 1e-9);
        assert!((other - 2400.0).abs() < 1e-9);
    }

    #[test]
    fn ramp_below_full_leaves_a_shortfall() {
        let mut data = ProjectData::default();
        data.line_items.push(LineItem {
            quantity: 1.0,
            unit_cost: 1200.0,
            ..LineItem::default()
        });
        data.rampup.other_pct = vec![50.0];
        let rows = compute_ramp_monthly(&data);
        assert!((rows[0].other - 50.0).abs() < 1e-9);
        let sum: f64 = rows.iter().map(|r| r.other).sum();
        assert!((sum - 600.0).abs() < 1e-9);
    }

    #[test]
    fn averages_use_the_padded_curves() {
        let profile = RampUpProfile {
            price_pct: vec![40.0, 100.0],
            ..RampUpProfile::default()
        };
        let avg = ramp_averages(&profile);
        assert!((avg.price - (40.0 + 11.0 * 100.0) / 12.0).abs() < 1e-12);
        assert_eq!(avg.utilities, 100.0);
    }
}
