use crate::lenient;
use serde::{Deserialize, Serialize};

fn one() -> f64 {
    1.0
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Scenario {
    #[serde(default, deserialize_with = "lenient::text")]
    pub id: String,
    #[serde(default, deserialize_with = "lenient::text")]
    pub name: String,
    /// Scales every unit cost.
    #[serde(default = "one", deserialize_with = "lenient::non_negative")]
    pub cost_multiplier: f64,
    /// Scales throughput and every quantity derived from it.
    #[serde(default = "one", deserialize_with = "lenient::non_negative")]
    pub quantity_multiplier: f64,
    /// Added to the base contingency percentage. May be negative.
    #[serde(default, deserialize_with = "lenient::number")]
    pub contingency_pct_delta: f64,
}

impl Scenario {
    pub fn new(id: &str, name: &str, cost: f64, quantity: f64, contingency_delta: f64) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            cost_multiplier: cost.max(0.0),
            quantity_multiplier: quantity.max(0.0),
            contingency_pct_delta: contingency_delta,
        }
    }

    pub fn multipliers(&self) -> ScenarioMultipliers {
        ScenarioMultipliers {
            cost: self.cost_multiplier,
            quantity: self.quantity_multiplier,
            contingency_pct_delta: self.contingency_pct_delta,
        }
    }

    /// Name for display, falling back to the id.
    pub fn label(&self) -> &str {
        if self.name.trim().is_empty() {
            &self.id
        } else {
            &self.name
        }
    }
}

/// The resolved multipliers every computation is evaluated under.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ScenarioMultipliers {
    pub cost: f64,
    pub quantity: f64,
    pub contingency_pct_delta: f64,
}

impl ScenarioMultipliers {
    pub const NEUTRAL: ScenarioMultipliers = ScenarioMultipliers {
        cost: 1.0,
        quantity: 1.0,
        contingency_pct_delta: 0.0,
    };
}

impl Default for ScenarioMultipliers {
    fn default() -> Self {
        Self::NEUTRAL
    }
}
