use serde::Serialize;
use tracing::warn;

pub const RATE_LOW: f64 = -0.9;
pub const RATE_HIGH: f64 = 1.0;
pub const MAX_ITERATIONS: u32 = 80;
pub const TOLERANCE: f64 = 1e-7;

/// Net present value of `cash_flows[y]` discounted at `rate` for year `y`.
pub fn npv_at(cash_flows: &[f64], rate: f64) -> f64 {
    cash_flows
        .iter()
        .enumerate()
        .map(|(y, cf)| cf / (1.0 + rate).powi(y as i32))
        .sum()
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct IrrEstimate {
    pub rate: f64,
    pub iterations: u32,
    /// |NPV| dropped below the tolerance before the iteration cap.
    pub converged: bool,
    /// NPV changes sign over the search interval. When false the rate is
    /// only the end of a one-sided search and should not be trusted.
    pub bracketed: bool,
}

/// Bisection on `[RATE_LOW, RATE_HIGH]`.
///
/// A positive NPV raises the lower bound, which assumes the usual
/// outflow-then-inflow profile. The bracket is not required to hold; the
/// midpoint is returned either way and `bracketed` reports whether it did.
pub fn solve_irr(cash_flows: &[f64]) -> IrrEstimate {
    let npv_low = npv_at(cash_flows, RATE_LOW);
    let npv_high = npv_at(cash_flows, RATE_HIGH);
    let bracketed = npv_low == 0.0 || npv_high == 0.0 || (npv_low > 0.0) != (npv_high > 0.0);
    if !bracketed {
        warn!(npv_low, npv_high, "IRR search interval has no sign change");
    }

    let (mut low, mut high) = (RATE_LOW, RATE_HIGH);
    let mut iterations = 0;
    let mut converged = false;
    while iterations < MAX_ITERATIONS {
        iterations += 1;
        let mid = (low + high) / 2.0;
        let val = npv_at(cash_flows, mid);
        if val.abs() < TOLERANCE {
            converged = true;
            break;
        }
        if val > 0.0 {
            low = mid;
        } else {
            high = mid;
        }
    }

    IrrEstimate {
        rate: (low + high) / 2.0,
        iterations,
        converged,
        bracketed,
    }
}
