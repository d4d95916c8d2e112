//! Starting data for new projects: the default project and the process presets.

use costforge_schemas::{
    category::CostCategory,
    finance::{CapexItem, FinanceInputs},
    logistics::{PackagingRow, TransportRow, WasteRow},
    model::ProjectData,
    opex::{LaborRate, LineItem, Risk},
    process::{MaterialRow, ProcessModel, UtilityRow},
    project::ProjectInfo,
    rampup::RampUpProfile,
    rubric::Rubric,
    scenario::Scenario,
    settings::Settings,
};

pub const GENERIC_PROCESS: &str = "Generic Process";

/// A process template: everything that depends on what the plant makes.
#[derive(Debug, Clone, PartialEq)]
pub struct Preset {
    pub name: String,
    pub process: ProcessModel,
    pub logistics: Vec<TransportRow>,
    pub packaging: Vec<PackagingRow>,
    pub waste: Vec<WasteRow>,
    pub rampup: RampUpProfile,
    pub rubrics: Vec<Rubric>,
    pub capex_items: Vec<CapexItem>,
    pub capex_curve_pct: Vec<f64>,
}

impl Preset {
    /// Replaces the preset-owned sections of `data`. Project info, line
    /// items, scenarios and settings are left alone.
    pub fn apply(&self, data: &mut ProjectData) {
        data.preset_name = self.name.clone();
        data.process = self.process.clone();
        data.logistics = self.logistics.clone();
        data.packaging = self.packaging.clone();
        data.waste = self.waste.clone();
        data.rampup = self.rampup.clone();
        data.rubrics = self.rubrics.clone();
        data.finance.capex_items = self.capex_items.clone();
        data.finance.capex_curve_pct = self.capex_curve_pct.clone();
    }
}

fn benchmark() -> String {
    "Benchmark".to_string()
}

fn generic_process() -> Preset {
    Preset {
        name: GENERIC_PROCESS.to_string(),
        process: ProcessModel {
            product_name: "Final Product".to_string(),
            throughput_tpy: 10_000.0,
            materials: vec![MaterialRow {
                name: "Generic reagent".to_string(),
                spec_per_t: 10.0,
                unit_spec: "kg/t".to_string(),
                unit_cost: 5.0,
                cost_unit: Some("MAD/kg".to_string()),
                price_source: benchmark(),
                category: CostCategory::Materials,
                taxable: true,
                note: String::new(),
            }],
            utilities: vec![
                UtilityRow {
                    name: "Electricity".to_string(),
                    intensity_per_t: 50.0,
                    unit_intensity: "kWh/t".to_string(),
                    tariff_per_unit: 1.0,
                    tariff_unit: Some("MAD/kWh".to_string()),
                    price_source: benchmark(),
                    taxable: false,
                    note: String::new(),
                },
                UtilityRow {
                    name: "Steam".to_string(),
                    intensity_per_t: 0.0,
                    unit_intensity: "t/t".to_string(),
                    tariff_per_unit: 320.0,
                    tariff_unit: Some("MAD/t".to_string()),
                    price_source: benchmark(),
                    taxable: false,
                    note: String::new(),
                },
            ],
            byproducts: Vec::new(),
        },
        logistics: vec![TransportRow {
            name: "Plant -> Depot (transport)".to_string(),
            wet_t_per_t: 1.0,
            distance_km: 50.0,
            tariff_per_tkm: 0.6,
            cost_unit: Some("MAD/(t*km)".to_string()),
            price_source: benchmark(),
            taxable: true,
            note: String::new(),
        }],
        packaging: vec![PackagingRow {
            name: "Bulk bags (1 t)".to_string(),
            units_per_t: 1.0,
            unit_cost: 30.0,
            cost_unit: Some("MAD/unit".to_string()),
            price_source: benchmark(),
            taxable: true,
            note: String::new(),
        }],
        waste: vec![WasteRow {
            name: "Filter cake disposal".to_string(),
            kg_per_t: 5.0,
            disposal_cost_per_kg: 0.5,
            cost_unit: Some("MAD/kg".to_string()),
            price_source: benchmark(),
            taxable: false,
            note: String::new(),
        }],
        rampup: RampUpProfile {
            utilities_pct: vec![60., 70., 80., 85., 90., 95., 95., 97., 98., 99., 100., 100.],
            logistics_packaging_pct: vec![40., 55., 70., 80., 85., 90., 95., 97., 98., 99., 100., 100.],
            logistics_transport_pct: vec![30., 45., 65., 75., 85., 90., 95., 97., 98., 99., 100., 100.],
            other_pct: vec![40., 50., 60., 70., 80., 90., 95., 97., 98., 99., 100., 100.],
            price_pct: vec![100.0; 12],
            startup_extra_cost_per_t: 0.0,
        },
        rubrics: Vec::new(),
        capex_items: vec![
            capex("Process equipment", 5_000_000.0, CostCategory::Equipment),
            capex("Installation", 1_200_000.0, CostCategory::Installation),
            capex("EPCM", 800_000.0, CostCategory::Services),
        ],
        capex_curve_pct: vec![60.0, 35.0, 5.0],
    }
}

fn capex(name: &str, amount: f64, category: CostCategory) -> CapexItem {
    CapexItem {
        name: name.to_string(),
        amount,
        year: 0,
        depr_years: 10,
        category,
    }
}

pub fn presets() -> Vec<Preset> {
    vec![generic_process()]
}

pub fn preset(name: &str) -> Option<Preset> {
    presets().into_iter().find(|p| p.name.eq_ignore_ascii_case(name.trim()))
}

pub fn default_scenarios() -> Vec<Scenario> {
    vec![
        Scenario::new("base", "Base", 1.0, 1.0, 0.0),
        Scenario::new("optimistic", "Optimistic", 0.95, 0.95, -2.0),
        Scenario::new("pessimistic", "Pessimistic", 1.10, 1.05, 3.0),
    ]
}

pub fn default_settings() -> Settings {
    Settings {
        tax_pct: 20.0,
        contingency_pct: 25.0,
        overhead_pct: 25.0,
        escalation_pct_per_year: 3.0,
        ..Settings::default()
    }
}

/// A new project: one engineering line item, one risk, three reference
/// rates and the Generic Process preset, with the base scenario active.
pub fn default_project() -> ProjectData {
    let mut data = ProjectData {
        project: ProjectInfo::default(),
        line_items: vec![LineItem {
            id: "li1".to_string(),
            category: CostCategory::Labor,
            description: "Process engineer (200 h)".to_string(),
            unit: "h".to_string(),
            quantity: 200.0,
            unit_cost: 350.0,
            ..LineItem::default()
        }],
        rates: vec![
            rate("Process Engineer", 350.0),
            rate("Lab Technician", 150.0),
            rate("Project Manager", 400.0),
        ],
        risks: vec![Risk {
            id: "r1".to_string(),
            name: "Delay in reagent delivery".to_string(),
            probability: 0.3,
            impact_cost: 120_000.0,
        }],
        scenarios: default_scenarios(),
        settings: default_settings(),
        active_scenario_id: "base".to_string(),
        finance: FinanceInputs::default(),
        ..ProjectData::default()
    };
    generic_process().apply(&mut data);
    data
}

fn rate(name: &str, hourly: f64) -> LaborRate {
    LaborRate {
        name: name.to_string(),
        hourly,
    }
}
