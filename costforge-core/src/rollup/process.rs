use super::{cost_unit_or, per_year_unit, CostModule, CostRow};
use costforge_schemas::{
    category::CostCategory, model::ProjectData, scenario::ScenarioMultipliers,
};
use serde::Serialize;
use tracing::debug;

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ProcessTotals {
    pub materials: f64,
    pub utilities: f64,
    /// Positive credit; reduces cost.
    pub byproduct_credits: f64,
    pub formulation: f64,
    pub taxable_base: f64,
}

impl ProcessTotals {
    /// Net cost of the process buckets. The taxable base is a second view of
    /// the same money and is not added again.
    pub fn cost_sum(&self) -> f64 {
        self.formulation + self.materials + self.utilities - self.byproduct_credits
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ProcessRollup {
    pub rows: Vec<CostRow>,
    pub totals: ProcessTotals,
    /// Throughput after the quantity multiplier, t/y.
    pub tpy: f64,
}

/// Recipe, consumables, utilities and byproduct credits.
pub fn compute_process_costs(data: &ProjectData, m: &ScenarioMultipliers) -> ProcessRollup {
    let tpy = data.process.throughput_tpy * m.quantity;
    let cur = data.currency();
    let mut rows = Vec::new();
    let mut totals = ProcessTotals::default();

    for r in &data.recipe {
        let annual_qty = r.t_per_t * tpy;
        let unit_cost = r.unit_cost * m.cost;
        let cost = annual_qty * unit_cost;
        totals.formulation += cost;
        if r.taxable {
            totals.taxable_base += cost;
        }
        rows.push(CostRow {
            module: CostModule::Formulation,
            name: r.name.clone(),
            basis: String::new(),
            annual_qty,
            qty_unit: "t/y".to_string(),
            unit_cost,
            cost_unit: cost_unit_or(&r.cost_unit, cur, "t"),
            price_source: r.price_source.clone(),
            annual_cost: cost,
            category: CostCategory::Formulation,
            taxable: r.taxable,
            note: r.note.clone(),
        });
    }

    for mat in &data.process.materials {
        let annual_qty = mat.spec_per_t * tpy;
        let unit_cost = mat.unit_cost * m.cost;
        let cost = annual_qty * unit_cost;
        totals.materials += cost;
        if mat.taxable {
            totals.taxable_base += cost;
        }
        rows.push(CostRow {
            module: CostModule::ProcessConsumable,
            name: mat.name.clone(),
            basis: String::new(),
            annual_qty,
            qty_unit: per_year_unit(&mat.unit_spec, "kg/t"),
            unit_cost,
            cost_unit: cost_unit_or(&mat.cost_unit, cur, "unit"),
            price_source: mat.price_source.clone(),
            annual_cost: cost,
            category: CostCategory::Materials,
            taxable: mat.taxable,
            note: mat.note.clone(),
        });
    }

    for u in &data.process.utilities {
        let annual_qty = u.intensity_per_t * tpy;
        let tariff = u.tariff_per_unit * m.cost;
        let cost = annual_qty * tariff;
        totals.utilities += cost;
        if u.taxable {
            totals.taxable_base += cost;
        }
        rows.push(CostRow {
            module: CostModule::Utility,
            name: u.name.clone(),
            basis: String::new(),
            annual_qty,
            qty_unit: per_year_unit(&u.unit_intensity, "unit/t"),
            unit_cost: tariff,
            cost_unit: cost_unit_or(&u.tariff_unit, cur, "unit"),
            price_source: u.price_source.clone(),
            annual_cost: cost,
            category: CostCategory::Utilities,
            taxable: u.taxable,
            note: u.note.clone(),
        });
    }

    for b in &data.process.byproducts {
        let credit_per_t = b.credit_per_t * m.cost;
        let credit = credit_per_t * tpy;
        totals.byproduct_credits += credit;
        rows.push(CostRow {
            module: CostModule::Byproduct,
            name: b.name.clone(),
            basis: String::new(),
            annual_qty: tpy,
            qty_unit: "t/y".to_string(),
            unit_cost: credit_per_t,
            cost_unit: cost_unit_or(&b.unit, cur, "t"),
            price_source: "N/A".to_string(),
            annual_cost: credit,
            category: CostCategory::Other,
            taxable: false,
            note: b.note.clone(),
        });
    }

    debug!(
        rows = rows.len(),
        tpy,
        net_cost = totals.cost_sum(),
        "process rollup"
    );

    ProcessRollup { rows, totals, tpy }
}

#[cfg(test)]
mod tests {
    use super::*;
    use costforge_schemas::process::{ByproductRow, MaterialRow, RecipeRow, UtilityRow};

    fn data(tpy: f64) -> ProjectData {
        let mut data = ProjectData::default();
        data.process.throughput_tpy = tpy;
        data.recipe.push(RecipeRow {
            name: "Base ore".into(),
            t_per_t: 1.2,
            unit_cost: 400.0,
            ..RecipeRow::default()
        });
        data.process.materials.push(MaterialRow {
            name: "Reagent".into(),
            spec_per_t: 10.0,
            unit_cost: 5.0,
            ..MaterialRow::default()
        });
        data.process.utilities.push(UtilityRow {
            name: "Electricity".into(),
            intensity_per_t: 50.0,
            unit_intensity: "kWh/t".into(),
            tariff_per_unit: 1.0,
            ..UtilityRow::default()
        });
        data.process.byproducts.push(ByproductRow {
            name: "Gypsum".into(),
            credit_per_t: 10.0,
            ..ByproductRow::default()
        });
        data
    }

    #[test]
    fn buckets_follow_intensity_times_throughput() {
        let res = compute_process_costs(&data(1000.0), &ScenarioMultipliers::NEUTRAL);
        assert_eq!(res.rows.len(), 4);
        assert!((res.totals.formulation - 480_000.0).abs() < 1e-6);
        assert!((res.totals.materials - 50_000.0).abs() < 1e-6);
        assert!((res.totals.utilities - 50_000.0).abs() < 1e-6);
        assert!((res.totals.byproduct_credits - 10_000.0).abs() < 1e-6);
        // Only the recipe row is taxable by default.
        assert!((res.totals.taxable_base - 480_000.0).abs() < 1e-6);
        assert!((res.totals.cost_sum() - 570_000.0).abs() < 1e-6);
    }

    #[test]
    fn quantity_multiplier_scales_throughput_and_cost_multiplier_scales_prices() {
        let m = ScenarioMultipliers {
            cost: 1.1,
            quantity: 0.5,
            contingency_pct_delta: 0.0,
        };
        let res = compute_process_costs(&data(1000.0), &m);
        assert_eq!(res.tpy, 500.0);
        let util = &res.rows[2];
        assert_eq!(util.qty_unit, "kWh/y");
        assert!((util.annual_qty - 25_000.0).abs() < 1e-9);
        assert!((util.unit_cost - 1.1).abs() < 1e-12);
    }

    #[test]
    fn every_row_cost_is_quantity_times_unit_cost() {
        let res = compute_process_costs(&data(730.0), &ScenarioMultipliers::NEUTRAL);
        for row in &res.rows {
            assert!((row.annual_cost - row.annual_qty * row.unit_cost).abs() < 1e-6);
        }
    }

    #[test]
    fn byproduct_rows_are_untaxed_credits() {
        let res = compute_process_costs(&data(1000.0), &ScenarioMultipliers::NEUTRAL);
        let credit = res.rows.iter().find(|r| r.is_credit()).unwrap();
        assert!(!credit.taxable);
        assert_eq!(credit.category, CostCategory::Other);
        assert_eq!(credit.signed_cost(), -10_000.0);
        assert_eq!(credit.cost_unit, "MAD/t");
    }

    #[test]
    fn empty_process_yields_zero_totals() {
        let res = compute_process_costs(&ProjectData::default(), &ScenarioMultipliers::NEUTRAL);
        assert!(res.rows.is_empty());
        assert_eq!(res.totals, ProcessTotals::default());
    }
}
