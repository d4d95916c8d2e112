use super::{cost_unit_or, CostModule, CostRow};
use costforge_schemas::{
    model::ProjectData, rubric::RubricBasis, scenario::ScenarioMultipliers,
};
use serde::Serialize;
use tracing::debug;

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RubricTotals {
    pub rubrics: f64,
    pub taxable_base: f64,
}

impl RubricTotals {
    pub fn cost_sum(&self) -> f64 {
        self.rubrics
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RubricRollup {
    pub rows: Vec<CostRow>,
    pub totals: RubricTotals,
    pub tpy: f64,
}

/// Custom rubrics. Each row lands in the category it is mapped to.
pub fn compute_rubric_costs(data: &ProjectData, m: &ScenarioMultipliers) -> RubricRollup {
    let tpy = data.process.throughput_tpy * m.quantity;
    let cur = data.currency();
    let mut rows = Vec::new();
    let mut totals = RubricTotals::default();

    for r in &data.rubrics {
        let (annual_qty, unit_cost) = match r.basis {
            RubricBasis::PerTonne => (r.quantity * tpy, r.unit_cost * m.cost),
            // The project amount lives in `quantity`; `unit_cost` is ignored.
            RubricBasis::FixedProject => (1.0, r.quantity * m.cost),
            RubricBasis::PerYear | RubricBasis::Unrecognized(_) => {
                (r.quantity, r.unit_cost * m.cost)
            }
        };
        let cost = annual_qty * unit_cost;
        totals.rubrics += cost;
        if r.taxable {
            totals.taxable_base += cost;
        }
        rows.push(CostRow {
            module: CostModule::Rubric,
            name: r.name.clone(),
            basis: r.basis.as_str().to_string(),
            annual_qty,
            qty_unit: "basis-dependent".to_string(),
            unit_cost,
            cost_unit: cost_unit_or(&r.cost_unit, cur, "unit"),
            price_source: r.price_source.clone(),
            annual_cost: cost,
            category: r.map_to_category.clone(),
            taxable: r.taxable,
            note: r.note.clone(),
        });
    }

    debug!(rows = rows.len(), cost = totals.rubrics, "rubric rollup");

    RubricRollup { rows, totals, tpy }
}

#[cfg(test)]
mod tests {
    use super::*;
    use costforge_schemas::{category::CostCategory, rubric::Rubric};

    fn rubric(basis: RubricBasis, quantity: f64, unit_cost: f64) -> Rubric {
        Rubric {
            name: "QA".into(),
            basis,
            quantity,
            unit_cost,
            map_to_category: CostCategory::Custom("Quality".into()),
            ..Rubric::default()
        }
    }

    fn with_rubrics(tpy: f64, rubrics: Vec<Rubric>) -> ProjectData {
        let mut data = ProjectData::default();
        data.process.throughput_tpy = tpy;
        data.rubrics = rubrics;
        data
    }

    #[test]
    fn per_tonne_scales_with_throughput() {
        let data = with_rubrics(2000.0, vec![rubric(RubricBasis::PerTonne, 0.5, 4.0)]);
        let res = compute_rubric_costs(&data, &ScenarioMultipliers::NEUTRAL);
        assert!((res.totals.rubrics - 4000.0).abs() < 1e-9);
        assert_eq!(res.rows[0].basis, "per_t");
    }

    #[test]
    fn fixed_project_reads_the_amount_from_quantity() {
        let data = with_rubrics(2000.0, vec![rubric(RubricBasis::FixedProject, 5000.0, 99.0)]);
        let m = ScenarioMultipliers {
            cost: 1.2,
            ..ScenarioMultipliers::NEUTRAL
        };
        let res = compute_rubric_costs(&data, &m);
        let row = &res.rows[0];
        assert_eq!(row.annual_qty, 1.0);
        assert!((row.unit_cost - 6000.0).abs() < 1e-9);
        assert!((row.annual_cost - 6000.0).abs() < 1e-9);
    }

    #[test]
    fn unknown_basis_behaves_like_per_year() {
        let data = with_rubrics(
            2000.0,
            vec![rubric(RubricBasis::Unrecognized("monthly".into()), 12.0, 100.0)],
        );
        let res = compute_rubric_costs(&data, &ScenarioMultipliers::NEUTRAL);
        assert!((res.totals.rubrics - 1200.0).abs() < 1e-9);
        assert_eq!(res.rows[0].basis, "monthly");
    }

    #[test]
    fn rows_keep_their_mapped_category() {
        let data = with_rubrics(1.0, vec![rubric(RubricBasis::PerYear, 1.0, 1.0)]);
        let res = compute_rubric_costs(&data, &ScenarioMultipliers::NEUTRAL);
        assert_eq!(res.rows[0].category, CostCategory::Custom("Quality".into()));
    }
}
