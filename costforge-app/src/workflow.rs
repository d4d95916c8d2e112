use crate::config;
use anyhow::{bail, Context, Result};
use costforge_core::{
    compare_scenarios, compute_ramp_monthly, compute_totals,
    defaults::{self, default_project},
    finance::FinancialProjection,
    project_financials, ramp_averages,
    rampup::{RampAverages, RampMonth},
    report,
    stage::{all_stages, StageMetadata},
    stage_metadata,
    totals::{ScenarioSummary, TotalsResult},
    ProjectBuilder,
};
use costforge_schemas::model::ProjectData;
use std::{
    fs,
    path::{Path, PathBuf},
};
use tracing::info;

/// Divisor and caption for a column of money figures, picked from the
/// largest figure so the whole table shares one unit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MoneyScale {
    pub factor: f64,
    pub caption: &'static str,
}

impl MoneyScale {
    pub fn for_amount(amount: f64) -> Self {
        let (factor, caption) = match amount.abs() {
            a if a >= 1e9 => (1e9, " (billions)"),
            a if a >= 1e6 => (1e6, " (millions)"),
            a if a >= 1e3 => (1e3, " (thousands)"),
            _ => (1.0, ""),
        };
        Self { factor, caption }
    }

    pub fn format(&self, currency: &str, amount: f64) -> String {
        format!("{} {}", currency, group_thousands(amount / self.factor))
    }
}

/// `1234567.891` -> `1,234,567.89`
pub fn group_thousands(x: f64) -> String {
    let fixed = format!("{:.2}", x.abs());
    let (int, frac) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));
    let mut grouped = String::with_capacity(int.len() + int.len() / 3);
    for (i, ch) in int.chars().enumerate() {
        if i > 0 && (int.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    let sign = if x < 0.0 && fixed != "0.00" { "-" } else { "" };
    format!("{}{}.{}", sign, grouped, frac)
}

/// Compact single figure with a K / M / B suffix.
pub fn scaled_money(currency: &str, x: f64) -> String {
    let (div, suffix) = match x.abs() {
        a if a >= 1e9 => (1e9, " B"),
        a if a >= 1e6 => (1e6, " M"),
        a if a >= 1e3 => (1e3, " K"),
        _ => (1.0, ""),
    };
    format!("{} {}{}", currency, group_thousands(x / div), suffix)
}

fn pct(x: f64) -> String {
    format!("{:.2}%", x * 100.0)
}

pub fn run_summary(data: &ProjectData, show_rows: bool) {
    let totals = compute_totals(data);
    print_summary_report(data, &totals, show_rows);
}

fn print_summary_report(data: &ProjectData, totals: &TotalsResult, show_rows: bool) {
    let cur = data.currency();
    let stage = stage_metadata(data.project.stage.as_str());
    let scale = MoneyScale::for_amount(totals.total);

    println!("\n--- [Cost Summary] {} ---", data.project.name);
    println!(
        "Stage: {} | Expected accuracy range: {} | Currency: {}",
        stage.stage,
        stage.accuracy_label(),
        cur
    );
    if let Some(s) = data.active_scenario() {
        println!("Scenario: {}", s.label());
    }
    println!("========================================");
    println!("Annual cost by category{}:", scale.caption);
    for row in totals.category_rows() {
        println!(
            "  - {:<22} {:>20}  ({:>6.1}%)",
            row.category,
            scale.format(cur, row.annual_cost),
            row.share_pct
        );
    }
    println!("  --------------------------------------");
    println!("  - {:<22} {:>20}", "Subtotal", scale.format(cur, totals.subtotal));
    println!("  - {:<22} {:>20}", "Overhead", scale.format(cur, totals.overhead));
    println!(
        "  - {:<22} {:>20}",
        format!("Contingency ({:.1}%)", totals.contingency_pct),
        scale.format(cur, totals.contingency)
    );
    println!("  - {:<22} {:>20}", "Tax", scale.format(cur, totals.tax));
    println!("  - {:<22} {:>20}", "Risk EMV", scale.format(cur, totals.risk_emv));
    println!("  --------------------------------------");
    println!("  - {:<22} {:>20}", "Total", scale.format(cur, totals.total));
    let (low, high) = stage.accuracy_range(totals.total);
    println!(
        "  - Range at this stage: {} .. {}",
        scaled_money(cur, low),
        scaled_money(cur, high)
    );
    println!(
        "  - Unit cost: {} per t at {} t/y",
        group_thousands(totals.unit_total_cost()),
        group_thousands(totals.tpy)
    );

    if show_rows {
        println!("\nItemized rows:");
        let rows = totals
            .process
            .rows
            .iter()
            .chain(&totals.extra.rows)
            .chain(&totals.rubrics.rows);
        for row in rows {
            println!(
                "  - [{}] {}: {} {} x {} {} = {}",
                row.module.as_str(),
                row.name,
                group_thousands(row.annual_qty),
                row.qty_unit,
                group_thousands(row.unit_cost),
                row.cost_unit,
                scaled_money(cur, row.signed_cost())
            );
        }
    }
    println!("========================================");
}

pub fn run_ramp(data: &ProjectData) {
    let months = compute_ramp_monthly(data);
    let averages = ramp_averages(&data.rampup);
    print_ramp(data.currency(), &months, &averages);
}

fn print_ramp(cur: &str, months: &[RampMonth], avg: &RampAverages) {
    println!("\n--- [Ramp-up, first year] ---");
    println!(
        "Average of steady state: utilities {:.1}% | packaging {:.1}% | transport {:.1}% | other {:.1}% | price {:.1}%",
        avg.utilities, avg.logistics_packaging, avg.logistics_transport, avg.other, avg.price
    );
    println!(
        "{:>5} {:>16} {:>16} {:>16} {:>16}",
        "Month", "Utilities", "Packaging", "Transport", "Other"
    );
    for m in months {
        println!(
            "{:>5} {:>16} {:>16} {:>16} {:>16}",
            m.month,
            group_thousands(m.utilities),
            group_thousands(m.logistics_packaging),
            group_thousands(m.logistics_transport),
            group_thousands(m.other)
        );
    }
    let total: f64 = months.iter().map(RampMonth::total).sum();
    println!("Year-one ramped spend: {}", scaled_money(cur, total));
}

pub fn run_finance(data: &ProjectData) {
    let projection = project_financials(data);
    print_finance(&projection);
}

fn irr_text(p: &FinancialProjection) -> String {
    match p.irr {
        None => "n/a".to_string(),
        Some(est) if !est.bracketed => format!("{} (no sign change in search range)", pct(est.rate)),
        Some(est) => pct(est.rate),
    }
}

fn print_finance(p: &FinancialProjection) {
    let cur = &p.currency;
    println!("\n--- [Financial Projection] ---");
    println!(
        "Throughput: {} t/y | Price: {} per t | Discount rate: {}",
        group_thousands(p.tpy),
        group_thousands(p.price),
        pct(p.discount_rate)
    );
    println!(
        "{:>4} {:>15} {:>15} {:>15} {:>15} {:>15} {:>15} {:>15}",
        "Year", "CAPEX", "Revenue", "OPEX", "Tax", "FCF", "PV FCF", "Cum FCF"
    );
    for y in &p.years {
        println!(
            "{:>4} {:>15} {:>15} {:>15} {:>15} {:>15} {:>15} {:>15}",
            y.year,
            group_thousands(y.capex),
            group_thousands(y.revenue),
            group_thousands(y.opex),
            group_thousands(y.tax),
            group_thousands(y.fcf),
            group_thousands(y.pv_fcf),
            group_thousands(y.cumulative_fcf)
        );
    }
    println!("========================================");
    let npv_label = if p.price > 0.0 { "NPV (FCF)" } else { "Net present cost" };
    println!("  - {:<18} {}", npv_label, scaled_money(cur, p.npv));
    println!("  - {:<18} {}", "IRR", irr_text(p));
    println!(
        "  - {:<18} {}",
        "Payback year",
        p.payback_year.map_or("n/a".to_string(), |y| y.to_string())
    );
    println!("  - {:<18} {}", "Year-0 CAPEX", scaled_money(cur, p.year0_capex));
    println!("  - {:<18} {}", "Peak OPEX", scaled_money(cur, p.peak_opex));
    println!("  - {:<18} {}", "Peak revenue", scaled_money(cur, p.peak_revenue));
}

pub fn run_scenarios(data: &ProjectData) {
    let rows = compare_scenarios(data);
    if rows.is_empty() {
        println!("No scenarios defined.");
        return;
    }
    println!("\n--- [Scenario Comparison] ---");
    println!(
        "{:<14} {:>18} {:>14} {:>18} {:>16} {:>16} {:>14}",
        "Scenario", "Total", "Unit / t", "Subtotal", "Overhead", "Contingency", "Tax"
    );
    let cur = data.currency();
    for r in &rows {
        let marker = if r.id == data.active_scenario_id { "*" } else { "" };
        println!(
            "{:<14} {:>18} {:>14} {:>18} {:>16} {:>16} {:>14}",
            format!("{}{}", r.name, marker),
            scaled_money(cur, r.total),
            group_thousands(r.unit_cost),
            scaled_money(cur, r.subtotal),
            scaled_money(cur, r.overhead),
            scaled_money(cur, r.contingency),
            scaled_money(cur, r.tax)
        );
    }
}

pub fn run_stage(name: Option<&str>) {
    let stages = match name {
        Some(n) => vec![stage_metadata(n)],
        None => all_stages(),
    };
    for s in &stages {
        print_stage(s);
    }
}

fn print_stage(s: &StageMetadata) {
    let v = &s.sections;
    let shown: Vec<&str> = [
        ("recipe", v.recipe),
        ("materials", v.materials),
        ("utilities", v.utilities),
        ("byproducts", v.byproducts),
        ("packaging", v.log_packaging),
        ("transport", v.log_transport),
        ("waste", v.waste),
        ("rubrics", v.rubrics),
        ("line items", v.line_items),
    ]
    .into_iter()
    .filter(|(_, on)| *on)
    .map(|(label, _)| label)
    .collect();
    println!(
        "{:<14} accuracy {:<14} contingency {:>4.0}%  sections: {}",
        s.stage.as_str(),
        s.accuracy_label(),
        s.default_contingency_pct,
        shown.join(", ")
    );
}

/// Markdown table of category totals for the report folder.
fn generate_category_table(cur: &str, totals: &TotalsResult) -> String {
    let mut table = format!("| Category | Annual cost ({}) | Share |\n", cur);
    table.push_str("|----------|------------------|-------|\n");
    for row in totals.category_rows() {
        table.push_str(&format!(
            "| {} | {} | {:.1}% |\n",
            row.category,
            group_thousands(row.annual_cost),
            row.share_pct
        ));
    }
    table
}

fn generate_scenario_table(cur: &str, rows: &[ScenarioSummary]) -> String {
    let mut table = String::from("| Scenario | Total | Unit cost / t |\n");
    table.push_str("|----------|-------|---------------|\n");
    for r in rows {
        table.push_str(&format!(
            "| {} | {} | {} |\n",
            r.name,
            scaled_money(cur, r.total),
            group_thousands(r.unit_cost)
        ));
    }
    table
}

pub fn summary_markdown(
    data: &ProjectData,
    totals: &TotalsResult,
    projection: &FinancialProjection,
    scenarios: &[ScenarioSummary],
) -> String {
    let cur = data.currency();
    let stage = stage_metadata(data.project.stage.as_str());
    let mut md = format!("# Cost summary: {}\n\n", data.project.name);
    md.push_str(&format!(
        "Stage: {} (expected accuracy {}). Currency: {}. Throughput: {} t/y.\n\n",
        stage.stage,
        stage.accuracy_label(),
        cur,
        group_thousands(totals.tpy)
    ));
    md.push_str("## Categories\n\n");
    md.push_str(&generate_category_table(cur, totals));
    md.push_str("\n## Totals\n\n");
    for (label, value) in [
        ("Subtotal", totals.subtotal),
        ("Overhead", totals.overhead),
        ("Contingency", totals.contingency),
        ("Tax", totals.tax),
        ("Risk EMV", totals.risk_emv),
        ("Total", totals.total),
    ] {
        md.push_str(&format!("- {}: {}\n", label, scaled_money(cur, value)));
    }
    md.push_str(&format!(
        "- Unit cost: {} per t\n",
        group_thousands(totals.unit_total_cost())
    ));
    md.push_str("\n## Projection\n\n");
    md.push_str(&format!("- NPV: {}\n", scaled_money(cur, projection.npv)));
    md.push_str(&format!("- IRR: {}\n", irr_text(projection)));
    md.push_str(&format!(
        "- Payback year: {}\n",
        projection
            .payback_year
            .map_or("n/a".to_string(), |y| y.to_string())
    ));
    if !scenarios.is_empty() {
        md.push_str("\n## Scenarios\n\n");
        md.push_str(&generate_scenario_table(cur, scenarios));
    }
    md
}

fn slug(name: &str) -> String {
    let s: String = name
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
        .collect();
    let s = s.trim_matches('_').to_string();
    if s.is_empty() {
        "project".to_string()
    } else {
        s
    }
}

/// Writes the CSV tables and `summary.md` into `<out_root>/<name>_<timestamp>`
/// and copies the project file alongside for traceability.
pub fn write_report(project_path: &Path, data: &ProjectData, out_root: &Path) -> Result<PathBuf> {
    let output_dir = out_root.join(format!(
        "{}_{}",
        slug(&data.project.name),
        chrono::Utc::now().format("%Y%m%d_%H%M%S")
    ));
    fs::create_dir_all(&output_dir)
        .with_context(|| format!("Failed to create output directory: {:?}", output_dir))?;

    if let Some(file_name) = project_path.file_name() {
        fs::copy(project_path, output_dir.join(file_name))
            .with_context(|| format!("Failed to copy project file {:?}", project_path))?;
    }

    let totals = compute_totals(data);
    let months = compute_ramp_monthly(data);
    let projection = project_financials(data);
    let scenarios = compare_scenarios(data);

    report::write_cost_rows(&output_dir.join("cost_rows.csv"), &totals)?;
    report::write_categories(&output_dir.join("categories.csv"), &totals)?;
    report::write_rampup(&output_dir.join("rampup.csv"), &months)?;
    report::write_projection(&output_dir.join("projection.csv"), &projection)?;
    report::write_scenarios(&output_dir.join("scenarios.csv"), &scenarios)?;
    fs::write(
        output_dir.join("summary.md"),
        summary_markdown(data, &totals, &projection, &scenarios),
    )?;

    info!("Report written to '{}'", output_dir.display());
    Ok(output_dir)
}

pub struct InitOptions<'a> {
    pub name: &'a str,
    pub preset: &'a str,
    pub currency: Option<&'a str>,
    pub price: Option<f64>,
    pub force: bool,
}

/// Writes a default project, with the chosen preset, to `path`.
pub fn run_init(path: &Path, opts: &InitOptions) -> Result<ProjectData> {
    if path.exists() && !opts.force {
        bail!("{:?} already exists; pass --force to overwrite", path);
    }
    let preset = match defaults::preset(opts.preset) {
        Some(p) => p,
        None => {
            let known: Vec<String> = defaults::presets().into_iter().map(|p| p.name).collect();
            bail!("Unknown preset '{}'. Available: {}", opts.preset, known.join(", "));
        }
    };

    let mut builder = ProjectBuilder::from_project(default_project())
        .named(opts.name)
        .with_preset(&preset);
    if let Some(cur) = opts.currency {
        builder = builder.with_currency(cur);
    }
    if let Some(price) = opts.price {
        builder = builder.with_selling_price(price);
    }
    let data = builder.build()?;

    config::save_project(path, &data)?;
    Ok(data)
}
