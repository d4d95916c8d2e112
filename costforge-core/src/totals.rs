//! Combines manual line items, the three rollup engines, overhead,
//! contingency, tax and risk into one cost picture.

use crate::rollup::{
    compute_extra_costs, compute_process_costs, compute_rubric_costs, ExtraRollup, ProcessRollup,
    RubricRollup,
};
use costforge_schemas::{
    category::CostCategory, model::ProjectData, scenario::ScenarioMultipliers,
};
use serde::Serialize;
use std::collections::BTreeMap;
use tracing::{debug, warn};

/// Annual amounts the ramp-up allocator spreads over the first year.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CostBreakdown {
    pub utilities_total: f64,
    pub log_packaging_total: f64,
    pub log_transport_total: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryTotal {
    pub category: String,
    pub annual_cost: f64,
    /// Share of the subtotal, in percent.
    pub share_pct: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TotalsResult {
    pub by_category: BTreeMap<CostCategory, f64>,
    pub subtotal: f64,
    pub overhead: f64,
    pub contingency: f64,
    pub tax: f64,
    pub risk_emv: f64,
    pub total: f64,
    /// Effective contingency after the scenario delta.
    pub contingency_pct: f64,
    pub taxable_base: f64,
    pub process: ProcessRollup,
    pub extra: ExtraRollup,
    pub rubrics: RubricRollup,
    pub breakdown: CostBreakdown,
    /// Effective throughput, t/y.
    pub tpy: f64,
}

impl TotalsResult {
    /// Total cost per tonne, or 0 when nothing is produced.
    pub fn unit_total_cost(&self) -> f64 {
        per_tonne(self.total, self.tpy)
    }

    pub fn category(&self, category: &CostCategory) -> f64 {
        self.by_category.get(category).copied().unwrap_or(0.0)
    }

    pub fn category_rows(&self) -> Vec<CategoryTotal> {
        self.by_category
            .iter()
            .map(|(cat, &cost)| CategoryTotal {
                category: cat.to_string(),
                annual_cost: cost,
                share_pct: if self.subtotal != 0.0 {
                    cost / self.subtotal * 100.0
                } else {
                    0.0
                },
            })
            .collect()
    }
}

/// Headline figures for one scenario, used to compare scenarios side by side.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScenarioSummary {
    pub id: String,
    pub name: String,
    pub total: f64,
    pub unit_cost: f64,
    pub subtotal: f64,
    pub overhead: f64,
    pub contingency: f64,
    pub tax: f64,
    pub risk_emv: f64,
}

fn per_tonne(amount: f64, tpy: f64) -> f64 {
    if tpy > 0.0 {
        amount / tpy
    } else {
        0.0
    }
}

/// Multipliers of the active scenario. A selector that names no defined
/// scenario resolves to neutral multipliers.
pub fn resolve_active(data: &ProjectData) -> ScenarioMultipliers {
    match data.active_scenario() {
        Some(s) => s.multipliers(),
        None => {
            if !data.active_scenario_id.is_empty() {
                warn!(
                    scenario = %data.active_scenario_id,
                    "active scenario not found, using neutral multipliers"
                );
            }
            ScenarioMultipliers::NEUTRAL
        }
    }
}

/// Totals under the active scenario.
pub fn compute_totals(data: &ProjectData) -> TotalsResult {
    compute_totals_with(data, &resolve_active(data))
}

pub fn compute_totals_with(data: &ProjectData, m: &ScenarioMultipliers) -> TotalsResult {
    let mut by_category: BTreeMap<CostCategory, f64> = BTreeMap::new();
    let mut subtotal_manual = 0.0;
    let mut taxable_manual = 0.0;

    for li in &data.line_items {
        let cost = li.quantity * m.quantity * li.unit_cost * m.cost;
        subtotal_manual += cost;
        *by_category.entry(li.category.clone()).or_insert(0.0) += cost;
        if li.taxable {
            taxable_manual += cost;
        }
    }

    let process = compute_process_costs(data, m);
    let extra = compute_extra_costs(data, m);
    let rubrics = compute_rubric_costs(data, m);

    let p = &process.totals;
    let e = &extra.totals;
    *by_category.entry(CostCategory::Formulation).or_insert(0.0) += p.formulation;
    *by_category.entry(CostCategory::Materials).or_insert(0.0) += p.materials;
    *by_category.entry(CostCategory::Utilities).or_insert(0.0) += p.utilities;
    *by_category.entry(CostCategory::Other).or_insert(0.0) += e.waste - p.byproduct_credits;
    *by_category.entry(CostCategory::Logistics).or_insert(0.0) += e.packaging + e.transport;
    for row in &rubrics.rows {
        *by_category.entry(row.category.clone()).or_insert(0.0) += row.annual_cost;
    }

    let taxable_base =
        taxable_manual + p.taxable_base + e.taxable_base + rubrics.totals.taxable_base;
    let subtotal =
        subtotal_manual + p.cost_sum() + e.cost_sum() + rubrics.totals.cost_sum();

    let settings = &data.settings;
    let overhead_base: f64 = by_category
        .iter()
        .filter(|(cat, _)| settings.overhead_base.contains(cat))
        .map(|(_, v)| v)
        .sum();
    let overhead = overhead_base * settings.overhead_pct / 100.0;

    let pre_tax = subtotal + overhead;
    let contingency_pct = settings.contingency_pct + m.contingency_pct_delta;
    let contingency = pre_tax * contingency_pct / 100.0;
    let tax = taxable_base * settings.tax_pct / 100.0;
    let risk_emv: f64 = data.risks.iter().map(|r| r.emv()).sum();
    let total = pre_tax + contingency + tax + risk_emv;

    let breakdown = CostBreakdown {
        utilities_total: p.utilities,
        log_packaging_total: e.packaging,
        log_transport_total: e.transport,
    };
    let tpy = process.tpy;

    debug!(subtotal, overhead, contingency, tax, risk_emv, total, "totals");

    TotalsResult {
        by_category,
        subtotal,
        overhead,
        contingency,
        tax,
        risk_emv,
        total,
        contingency_pct,
        taxable_base,
        process,
        extra,
        rubrics,
        breakdown,
        tpy,
    }
}

/// Evaluates every defined scenario without touching the active selector.
pub fn compare_scenarios(data: &ProjectData) -> Vec<ScenarioSummary> {
    data.scenarios
        .iter()
        .map(|s| {
            let t = compute_totals_with(data, &s.multipliers());
            ScenarioSummary {
                id: s.id.clone(),
                name: s.label().to_string(),
                total: t.total,
                unit_cost: t.unit_total_cost(),
                subtotal: t.subtotal,
                overhead: t.overhead,
                contingency: t.contingency,
                tax: t.tax,
                risk_emv: t.risk_emv,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use costforge_schemas::{
        opex::{LineItem, Risk},
        process::ByproductRow,
        scenario::Scenario,
        settings::Settings,
    };

    fn labor(qty: f64, cost: f64) -> LineItem {
        LineItem {
            category: CostCategory::Labor,
            quantity: qty,
            unit_cost: cost,
            ..LineItem::default()
        }
    }

    #[test]
    fn empty_project_has_zero_totals_and_fixed_keys() {
        let t = compute_totals(&ProjectData::default());
        assert_eq!(t.total, 0.0);
        assert_eq!(t.unit_total_cost(), 0.0);
        for cat in [
            CostCategory::Formulation,
            CostCategory::Materials,
            CostCategory::Utilities,
            CostCategory::Other,
            CostCategory::Logistics,
        ] {
            assert_eq!(t.by_category.get(&cat), Some(&0.0));
        }
    }

    #[test]
    fn overhead_contingency_tax_and_risk_stack_up() {
        let mut data = ProjectData::default();
        data.settings = Settings {
            tax_pct: 20.0,
            contingency_pct: 10.0,
            overhead_pct: 25.0,
            ..Settings::default()
        };
        let mut li = labor(200.0, 350.0);
        li.taxable = true;
        data.line_items.push(li);
        data.risks.push(Risk {
            probability: 0.3,
            impact_cost: 120_000.0,
            ..Risk::default()
        });

        let t = compute_totals(&data);
        assert!((t.subtotal - 70_000.0).abs() < 1e-9);
        assert!((t.overhead - 17_500.0).abs() < 1e-9);
        assert!((t.contingency - 8_750.0).abs() < 1e-9);
        assert!((t.tax - 14_000.0).abs() < 1e-9);
        assert!((t.risk_emv - 36_000.0).abs() < 1e-9);
        assert!((t.total - 146_250.0).abs() < 1e-9);
    }

    #[test]
    fn line_items_scale_with_both_multipliers() {
        let mut data = ProjectData::default();
        data.line_items.push(labor(10.0, 100.0));
        let m = ScenarioMultipliers {
            cost: 1.1,
            quantity: 1.05,
            contingency_pct_delta: 3.0,
        };
        let t = compute_totals_with(&data, &m);
        assert!((t.category(&CostCategory::Labor) - 1155.0).abs() < 1e-9);
        assert_eq!(t.contingency_pct, 3.0);
    }

    #[test]
    fn byproduct_credit_reduces_other() {
        let mut data = ProjectData::default();
        data.process.throughput_tpy = 1000.0;
        data.process.byproducts.push(ByproductRow {
            name: "Gypsum".into(),
            credit_per_t: 10.0,
            ..ByproductRow::default()
        });
        let t = compute_totals(&data);
        assert_eq!(t.category(&CostCategory::Other), -10_000.0);
        assert_eq!(t.subtotal, -10_000.0);
    }

    #[test]
    fn unknown_active_scenario_uses_neutral_multipliers() {
        let mut data = ProjectData::default();
        data.line_items.push(labor(1.0, 100.0));
        data.scenarios.push(Scenario::new("hi", "High", 2.0, 1.0, 0.0));
        data.active_scenario_id = "missing".into();
        assert_eq!(compute_totals(&data).subtotal, 100.0);
        data.active_scenario_id = "hi".into();
        assert_eq!(compute_totals(&data).subtotal, 200.0);
    }

    #[test]
    fn comparison_covers_every_scenario_without_changing_the_selector() {
        let mut data = ProjectData::default();
        data.process.throughput_tpy = 100.0;
        data.line_items.push(labor(1.0, 1000.0));
        data.scenarios = vec![
            Scenario::new("base", "Base", 1.0, 1.0, 0.0),
            Scenario::new("pess", "Pessimistic", 1.1, 1.05, 3.0),
        ];
        data.active_scenario_id = "base".into();
        let rows = compare_scenarios(&data);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].total, 1000.0);
        assert!((rows[1].subtotal - 1155.0).abs() < 1e-9);
        assert!((rows[1].contingency - 1155.0 * 0.03).abs() < 1e-9);
        assert!((rows[0].unit_cost - 10.0).abs() < 1e-12);
        assert_eq!(data.active_scenario_id, "base");
    }

    #[test]
    fn repeated_calls_are_identical() {
        let mut data = ProjectData::default();
        data.line_items.push(labor(3.0, 7.0));
        data.line_items.push(LineItem {
            category: CostCategory::Custom("QA".into()),
            quantity: 2.0,
            unit_cost: 5.0,
            ..LineItem::default()
        });
        assert_eq!(compute_totals(&data), compute_totals(&data));
    }
}
