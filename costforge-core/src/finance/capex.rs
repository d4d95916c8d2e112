use costforge_schemas::finance::FinanceInputs;
use std::collections::BTreeMap;
use tracing::warn;

/// Offset of the first curve entry relative to the in-service year.
pub const FIRST_OFFSET: i32 = -1;

/// Longest projection the engine lays out. Longer horizons are cut here.
pub const MAX_HORIZON_YEARS: u32 = 200;

/// The projection horizon, capped at [`MAX_HORIZON_YEARS`].
pub fn projection_horizon(fin: &FinanceInputs) -> u32 {
    if fin.horizon_years > MAX_HORIZON_YEARS {
        warn!(
            requested = fin.horizon_years,
            cap = MAX_HORIZON_YEARS,
            "horizon too long, projecting the capped horizon"
        );
    }
    fin.horizon_years.min(MAX_HORIZON_YEARS)
}

/// Total CAPEX split over curve offsets -1, 0, 1, ...
///
/// The curve is renormalized to 100%, so `[60, 35, 5]` and `[30, 17.5, 2.5]`
/// give the same schedule. A curve summing to zero is divided by 100 instead.
pub fn capex_spend_by_offset(fin: &FinanceInputs) -> BTreeMap<i32, f64> {
    let sum: f64 = fin.capex_curve_pct.iter().sum();
    let divisor = if sum == 0.0 { 100.0 } else { sum };
    let total: f64 = fin.capex_items.iter().map(|i| i.amount).sum();

    fin.capex_curve_pct
        .iter()
        .zip(FIRST_OFFSET..)
        .map(|(&pct, offset)| {
            let normalized = pct * 100.0 / divisor;
            (offset, total * normalized / 100.0)
        })
        .collect()
}

/// Spend landing in projection year `year`. Pre-construction offsets fold
/// into year 0.
pub fn capex_spend_in_year(schedule: &BTreeMap<i32, f64>, year: u32) -> f64 {
    schedule
        .iter()
        .filter(|&(&offset, _)| offset.max(0) as i64 == year as i64)
        .map(|(_, v)| v)
        .sum()
}

/// Straight-line depreciation per projection year `0..=horizon`, with the
/// horizon capped at [`MAX_HORIZON_YEARS`].
///
/// Every item depreciates from year 0 regardless of its in-service year, and
/// stops before the horizon year.
pub fn depreciation_schedule(fin: &FinanceInputs) -> Vec<f64> {
    let horizon = fin.horizon_years.min(MAX_HORIZON_YEARS) as usize;
    let mut dep = vec![0.0; horizon + 1];
    for item in &fin.capex_items {
        let life = item.depr_years.max(1);
        let annual = item.amount / life as f64;
        for slot in dep.iter_mut().take(horizon.min(life as usize)) {
            *slot += annual;
        }
    }
    dep
}
