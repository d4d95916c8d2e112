use crate::lenient;
use serde::{Deserialize, Serialize};

/// First-year ramp-up curves: month 1..12 as a percentage of steady state.
///
/// Curves are stored as entered. An empty curve means "100% every month".
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct RampUpProfile {
    #[serde(default, deserialize_with = "lenient::numbers")]
    pub utilities_pct: Vec<f64>,
    #[serde(default, deserialize_with = "lenient::numbers")]
    pub logistics_packaging_pct: Vec<f64>,
    #[serde(default, deserialize_with = "lenient::numbers")]
    pub logistics_transport_pct: Vec<f64>,
    #[serde(default, deserialize_with = "lenient::numbers")]
    pub other_pct: Vec<f64>,
    #[serde(default, deserialize_with = "lenient::numbers")]
    pub price_pct: Vec<f64>,
    /// Carried for reference; not part of any total.
    #[serde(default, deserialize_with = "lenient::number")]
    pub startup_extra_cost_per_t: f64,
}
