use super::{cost_unit_or, CostModule, CostRow};
use costforge_schemas::{
    category::CostCategory, model::ProjectData, scenario::ScenarioMultipliers,
};
use serde::Serialize;
use tracing::debug;

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ExtraTotals {
    pub packaging: f64,
    pub transport: f64,
    pub waste: f64,
    pub taxable_base: f64,
}

impl ExtraTotals {
    pub fn cost_sum(&self) -> f64 {
        self.packaging + self.transport + self.waste
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ExtraRollup {
    pub rows: Vec<CostRow>,
    pub totals: ExtraTotals,
    pub tpy: f64,
}

/// Packaging, transport and waste disposal.
pub fn compute_extra_costs(data: &ProjectData, m: &ScenarioMultipliers) -> ExtraRollup {
    let tpy = data.process.throughput_tpy * m.quantity;
    let cur = data.currency();
    let mut rows = Vec::new();
    let mut totals = ExtraTotals::default();

    for p in &data.packaging {
        let units = p.units_per_t * tpy;
        let unit_cost = p.unit_cost * m.cost;
        let cost = units * unit_cost;
        totals.packaging += cost;
        if p.taxable {
            totals.taxable_base += cost;
        }
        rows.push(CostRow {
            module: CostModule::Packaging,
            name: p.name.clone(),
            basis: String::new(),
            annual_qty: units,
            qty_unit: "units/y".to_string(),
            unit_cost,
            cost_unit: cost_unit_or(&p.cost_unit, cur, "unit"),
            price_source: p.price_source.clone(),
            annual_cost: cost,
            category: CostCategory::Logistics,
            taxable: p.taxable,
            note: p.note.clone(),
        });
    }

    for leg in &data.logistics {
        let ton_km = leg.wet_t_per_t * leg.distance_km * tpy;
        let tariff = leg.tariff_per_tkm * m.cost;
        let cost = ton_km * tariff;
        totals.transport += cost;
        if leg.taxable {
            totals.taxable_base += cost;
        }
        rows.push(CostRow {
            module: CostModule::Transport,
            name: leg.name.clone(),
            basis: String::new(),
            annual_qty: ton_km,
            qty_unit: "t*km/y".to_string(),
            unit_cost: tariff,
            cost_unit: cost_unit_or(&leg.cost_unit, cur, "(t*km)"),
            price_source: leg.price_source.clone(),
            annual_cost: cost,
            category: CostCategory::Logistics,
            taxable: leg.taxable,
            note: leg.note.clone(),
        });
    }

    for w in &data.waste {
        let qty = w.kg_per_t * tpy;
        let unit_cost = w.disposal_cost_per_kg * m.cost;
        let cost = qty * unit_cost;
        totals.waste += cost;
        if w.taxable {
            totals.taxable_base += cost;
        }
        rows.push(CostRow {
            module: CostModule::Waste,
            name: w.name.clone(),
            basis: String::new(),
            annual_qty: qty,
            qty_unit: "kg/y".to_string(),
            unit_cost,
            cost_unit: cost_unit_or(&w.cost_unit, cur, "kg"),
            price_source: w.price_source.clone(),
            annual_cost: cost,
            category: CostCategory::Other,
            taxable: w.taxable,
            note: w.note.clone(),
        });
    }

    debug!(rows = rows.len(), tpy, cost = totals.cost_sum(), "extra module rollup");

    ExtraRollup { rows, totals, tpy }
}
