use costforge_core::{
    defaults::default_project,
    finance::{capex_spend_by_offset, capex_spend_in_year, npv_at, project_financials},
    rampup::compute_ramp_monthly,
    rollup::CostModule,
    totals::{compute_totals, compute_totals_with},
    ProjectBuilder,
};
use costforge_schemas::{
    category::CostCategory,
    finance::{CapexItem, FinanceInputs},
    model::ProjectData,
    opex::LineItem,
    process::ByproductRow,
    rubric::{Rubric, RubricBasis},
    scenario::ScenarioMultipliers,
    settings::Settings,
};

const EPS: f64 = 1e-6;

fn close(a: f64, b: f64) -> bool {
    (a - b).abs() <= EPS * (1.0 + a.abs().max(b.abs()))
}

fn rubric(name: &str, basis: RubricBasis, quantity: f64, unit_cost: f64) -> Rubric {
    Rubric {
        name: name.to_string(),
        basis,
        quantity,
        unit_cost,
        map_to_category: CostCategory::Custom(name.to_string()),
        ..Rubric::default()
    }
}

#[test]
fn zero_throughput_zeroes_per_tonne_rows_only() {
    let mut data = default_project();
    data.rubrics = vec![
        rubric("Sampling", RubricBasis::PerTonne, 2.0, 3.0),
        rubric("Insurance", RubricBasis::PerYear, 1.0, 40_000.0),
        rubric("Permits", RubricBasis::FixedProject, 5000.0, 0.0),
    ];
    data.process.throughput_tpy = 0.0;

    let t = compute_totals(&data);
    assert_eq!(t.tpy, 0.0);
    for row in t.process.rows.iter().chain(&t.extra.rows) {
        assert_eq!(row.annual_qty, 0.0, "{}", row.name);
        assert_eq!(row.annual_cost, 0.0, "{}", row.name);
    }
    let rubric_cost = |name: &str| {
        t.rubrics
            .rows
            .iter()
            .find(|r| r.module == CostModule::Rubric && r.name == name)
            .map(|r| r.annual_cost)
            .unwrap()
    };
    assert_eq!(rubric_cost("Sampling"), 0.0);
    assert_eq!(rubric_cost("Insurance"), 40_000.0);
    assert_eq!(rubric_cost("Permits"), 5000.0);
    assert_eq!(t.unit_total_cost(), 0.0);
    assert!(t.total.is_finite());
}

#[test]
fn cost_multiplier_scales_unit_costs_linearly() {
    let mut data = default_project();
    data.line_items.clear();
    data.risks.clear();
    let base = compute_totals_with(&data, &ScenarioMultipliers::NEUTRAL);

    for k in [0.5, 0.95, 1.1, 3.0] {
        let m = ScenarioMultipliers {
            cost: k,
            ..ScenarioMultipliers::NEUTRAL
        };
        let scaled = compute_totals_with(&data, &m);
        assert!(close(scaled.subtotal, base.subtotal * k));
        assert!(close(scaled.overhead, base.overhead * k));
        assert!(close(scaled.tax, base.tax * k));
        assert!(close(scaled.total, base.total * k));
        for (cat, v) in &base.by_category {
            assert!(close(scaled.category(cat), v * k), "{}", cat);
        }
    }
}

#[test]
fn only_taxable_rows_move_the_tax() {
    let mut data = default_project();
    let before = compute_totals(&data);

    data.process.utilities.clear();
    data.waste.clear();
    data.line_items.retain(|li| li.taxable);
    assert!(close(compute_totals(&data).tax, before.tax));

    data.line_items.push(LineItem {
        category: CostCategory::Services,
        quantity: 1.0,
        unit_cost: 12_345.0,
        taxable: true,
        ..LineItem::default()
    });
    let after = compute_totals(&data);
    assert!(close(after.tax - before.tax, 12_345.0 * 20.0 / 100.0));
}

#[test]
fn ramp_sums_match_the_annual_amount_only_at_full_rate() {
    let mut data = default_project();
    data.rampup.utilities_pct = vec![100.0; 12];
    let t = compute_totals(&data);
    let months = compute_ramp_monthly(&data);

    let utilities: f64 = months.iter().map(|m| m.utilities).sum();
    assert!(close(utilities, t.breakdown.utilities_total));

    let packaging: f64 = months.iter().map(|m| m.logistics_packaging).sum();
    assert!(packaging < t.breakdown.log_packaging_total);
    assert!(!close(packaging, t.breakdown.log_packaging_total));

    data.rampup.utilities_pct[11] = 99.0;
    let dipped: f64 = compute_ramp_monthly(&data).iter().map(|m| m.utilities).sum();
    assert!(!close(dipped, t.breakdown.utilities_total));
}

#[test]
fn capex_curve_is_renormalized() {
    let items = vec![CapexItem {
        amount: 7_000_000.0,
        ..CapexItem::default()
    }];
    let a = FinanceInputs {
        capex_items: items.clone(),
        capex_curve_pct: vec![60.0, 35.0, 5.0],
        ..FinanceInputs::default()
    };
    let b = FinanceInputs {
        capex_items: items,
        capex_curve_pct: vec![30.0, 17.5, 2.5],
        ..FinanceInputs::default()
    };
    let sa = capex_spend_by_offset(&a);
    let sb = capex_spend_by_offset(&b);
    for year in 0..=a.horizon_years {
        assert!(close(capex_spend_in_year(&sa, year), capex_spend_in_year(&sb, year)));
    }
    let spent: f64 = sa.values().sum();
    assert!(close(spent, 7_000_000.0));
}

fn irr_project() -> ProjectData {
    ProjectBuilder::new("IRR check")
        .with_throughput(1000.0)
        .with_discount_rate(10.0)
        .with_settings(Settings {
            tax_pct: 25.0,
            ..Settings::default()
        })
        .with_line_item(LineItem {
            description: "Flat operating cost".into(),
            quantity: 1.0,
            unit_cost: 50_000.0,
            ..LineItem::default()
        })
        .with_capex_item(CapexItem {
            name: "Plant".into(),
            amount: 500_000.0,
            year: 0,
            depr_years: 10,
            ..CapexItem::default()
        })
        .with_selling_price(100.0)
        .with_horizon(10)
        .build()
        .unwrap()
}

#[test]
fn projection_figures_are_internally_consistent() {
    let p = project_financials(&irr_project());
    assert_eq!(p.years.len(), 11);

    let fcf = p.fcf_series();
    let npv = npv_at(&fcf, 0.10);
    assert!((npv - p.npv).abs() <= 1e-6 * p.npv.abs().max(1.0));

    let irr = p.irr.expect("revenue-bearing project has an IRR");
    assert!(irr.bracketed);
    assert!(npv_at(&fcf, irr.rate).abs() < 1e-3);
    // Positive NPV at 10% puts the IRR above the discount rate.
    assert_eq!(p.npv > 0.0, irr.rate > 0.10);

    let mut cumulative = 0.0;
    let mut first_positive = None;
    for row in &p.years {
        cumulative += row.fcf;
        if first_positive.is_none() && cumulative >= 0.0 {
            first_positive = Some(row.year);
        }
    }
    assert_eq!(p.payback_year, first_positive);
    assert!(p.payback_year.is_some());
    assert!(close(p.year0_capex, 500_000.0));
}

#[test]
fn byproduct_credit_reduces_cost() {
    let mut without = default_project();
    without.process.throughput_tpy = 1000.0;
    without.settings.contingency_pct = 0.0;
    without.active_scenario_id = "base".into();

    let mut with = without.clone();
    with.process.byproducts.push(ByproductRow {
        name: "Gypsum".into(),
        credit_per_t: 10.0,
        ..ByproductRow::default()
    });

    let a = compute_totals(&without);
    let b = compute_totals(&with);
    assert!(close(a.subtotal - b.subtotal, 10_000.0));
    assert!(close(a.total - b.total, 10_000.0));
    assert!(close(
        a.category(&CostCategory::Other) - b.category(&CostCategory::Other),
        10_000.0
    ));
}

#[test]
fn fixed_project_rubric_ignores_throughput() {
    for tpy in [0.0, 1.0, 25_000.0] {
        for cm in [1.0, 1.1] {
            let mut data = ProjectData::default();
            data.process.throughput_tpy = tpy;
            data.rubrics.push(rubric("Permits", RubricBasis::FixedProject, 5000.0, 0.0));
            let m = ScenarioMultipliers {
                cost: cm,
                ..ScenarioMultipliers::NEUTRAL
            };
            let t = compute_totals_with(&data, &m);
            assert!(close(
                t.category(&CostCategory::Custom("Permits".into())),
                5000.0 * cm
            ));
        }
    }
}
