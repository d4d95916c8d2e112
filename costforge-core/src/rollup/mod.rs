//! Row processors that turn per-tonne inputs into annual cost lines.
//!
//! Each engine is independent and pure: it reads the project and the resolved
//! scenario multipliers and returns its rows plus bucket subtotals. The
//! totals aggregator is the only place where the buckets are combined.

pub mod extra;
pub mod process;
pub mod rubrics;

use costforge_schemas::category::CostCategory;
use serde::{Serialize, Serializer};

pub use extra::{compute_extra_costs, ExtraRollup, ExtraTotals};
pub use process::{compute_process_costs, ProcessRollup, ProcessTotals};
pub use rubrics::{compute_rubric_costs, RubricRollup, RubricTotals};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CostModule {
    Formulation,
    ProcessConsumable,
    Utility,
    Byproduct,
    Packaging,
    Transport,
    Waste,
    Rubric,
}

impl CostModule {
    pub fn as_str(&self) -> &'static str {
        match self {
            CostModule::Formulation => "Formulation (t/t)",
            CostModule::ProcessConsumable => "Process Consumable",
            CostModule::Utility => "Utility",
            CostModule::Byproduct => "Byproduct",
            CostModule::Packaging => "Packaging",
            CostModule::Transport => "Transport",
            CostModule::Waste => "Waste",
            CostModule::Rubric => "Rubric",
        }
    }
}

impl Serialize for CostModule {
    fn serialize<S: Serializer>(&self, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(self.as_str())
    }
}

/// One itemized annual cost line.
///
/// `annual_cost` is always `annual_qty * unit_cost`. Byproduct rows hold
/// their credit as a positive number; use [`CostRow::signed_cost`] when
/// summing rows.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CostRow {
    pub module: CostModule,
    pub name: String,
    /// Rubric basis label. Empty for other modules.
    pub basis: String,
    pub annual_qty: f64,
    pub qty_unit: String,
    pub unit_cost: f64,
    pub cost_unit: String,
    pub price_source: String,
    pub annual_cost: f64,
    pub category: CostCategory,
    pub taxable: bool,
    pub note: String,
}

impl CostRow {
    pub fn is_credit(&self) -> bool {
        self.module == CostModule::Byproduct
    }

    pub fn signed_cost(&self) -> f64 {
        if self.is_credit() {
            -self.annual_cost
        } else {
            self.annual_cost
        }
    }
}

/// `"kg/t"` -> `"kg/y"`. Blank specs use `fallback`.
pub(crate) fn per_year_unit(spec: &str, fallback: &str) -> String {
    let spec = if spec.trim().is_empty() { fallback } else { spec };
    let head = spec.split('/').next().unwrap_or_default();
    format!("{}/y", head)
}

/// Row cost-unit label, defaulting to `<currency>/<suffix>`.
pub(crate) fn cost_unit_or(label: &Option<String>, currency: &str, suffix: &str) -> String {
    label
        .clone()
        .unwrap_or_else(|| format!("{}/{}", currency, suffix))
}
