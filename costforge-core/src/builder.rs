use crate::{
    defaults::Preset,
    error::{CostforgeError, Result},
};
use costforge_schemas::{
    finance::CapexItem,
    logistics::{PackagingRow, TransportRow, WasteRow},
    model::ProjectData,
    opex::{LaborRate, LineItem, Risk},
    process::{ByproductRow, MaterialRow, RecipeRow, UtilityRow},
    project::Stage,
    rubric::Rubric,
    scenario::Scenario,
    settings::Settings,
};
use std::collections::HashSet;

/// A fluent builder for assembling a `ProjectData`.
///
/// Starts empty, or from an existing project with [`ProjectBuilder::from_project`].
/// Row methods append; setters overwrite.
#[derive(Debug, Default)]
pub struct ProjectBuilder {
    data: ProjectData,
    active: Option<String>,
}

impl ProjectBuilder {
    pub fn new(name: &str) -> Self {
        let mut builder = Self::default();
        builder.data.project.name = name.to_string();
        builder
    }

    pub fn from_project(data: ProjectData) -> Self {
        Self { data, active: None }
    }

    pub fn named(mut self, name: &str) -> Self {
        self.data.project.name = name.to_string();
        self
    }

    pub fn with_stage(mut self, stage: Stage) -> Self {
        self.data.project.stage = stage;
        self
    }

    pub fn with_currency(mut self, currency: &str) -> Self {
        self.data.project.currency = currency.to_string();
        self
    }

    pub fn with_discount_rate(mut self, pct: f64) -> Self {
        self.data.project.discount_rate_pct = pct;
        self
    }

    /// Negative throughput is clamped to zero.
    pub fn with_throughput(mut self, tpy: f64) -> Self {
        self.data.process.throughput_tpy = tpy.max(0.0);
        self
    }

    /// Replaces the process-specific sections with the preset's.
    pub fn with_preset(mut self, preset: &Preset) -> Self {
        preset.apply(&mut self.data);
        self
    }

    pub fn with_recipe_row(mut self, row: RecipeRow) -> Self {
        self.data.recipe.push(row);
        self
    }

    pub fn with_material(mut self, row: MaterialRow) -> Self {
        self.data.process.materials.push(row);
        self
    }

    pub fn with_utility(mut self, row: UtilityRow) -> Self {
        self.data.process.utilities.push(row);
        self
    }

    pub fn with_byproduct(mut self, row: ByproductRow) -> Self {
        self.data.process.byproducts.push(row);
        self
    }

    pub fn with_packaging(mut self, row: PackagingRow) -> Self {
        self.data.packaging.push(row);
        self
    }

    pub fn with_transport(mut self, row: TransportRow) -> Self {
        self.data.logistics.push(row);
        self
    }

    pub fn with_waste(mut self, row: WasteRow) -> Self {
        self.data.waste.push(row);
        self
    }

    pub fn with_rubric(mut self, rubric: Rubric) -> Self {
        self.data.rubrics.push(rubric);
        self
    }

    pub fn with_line_item(mut self, item: LineItem) -> Self {
        self.data.line_items.push(item);
        self
    }

    pub fn with_rate(mut self, rate: LaborRate) -> Self {
        self.data.rates.push(rate);
        self
    }

    pub fn with_risk(mut self, risk: Risk) -> Self {
        self.data.risks.push(risk);
        self
    }

    pub fn with_scenario(mut self, scenario: Scenario) -> Self {
        self.data.scenarios.push(scenario);
        self
    }

    /// Selects the active scenario. It must be defined by the time `build` runs.
    pub fn active_scenario(mut self, id: &str) -> Self {
        self.active = Some(id.to_string());
        self
    }

    pub fn with_settings(mut self, settings: Settings) -> Self {
        self.data.settings = settings;
        self
    }

    pub fn with_selling_price(mut self, price_per_t: f64) -> Self {
        self.data.finance.selling_price_per_t = price_per_t;
        self
    }

    pub fn with_horizon(mut self, years: u32) -> Self {
        self.data.finance.horizon_years = years;
        self
    }

    pub fn with_capex_item(mut self, item: CapexItem) -> Self {
        self.data.finance.capex_items.push(item);
        self
    }

    pub fn with_capex_curve(mut self, curve: Vec<f64>) -> Self {
        self.data.finance.capex_curve_pct = curve;
        self
    }

    /// Consumes the builder and returns the project.
    ///
    /// # Errors
    ///
    /// `DuplicateScenario` if two scenarios share an id, `UnknownScenario` if
    /// an explicitly selected active scenario is not defined. Without an
    /// explicit selection the existing selector is kept, or the first
    /// scenario is activated when there is none.
    pub fn build(self) -> Result<ProjectData> {
        let mut data = self.data;

        {
            let mut seen = HashSet::new();
            for s in &data.scenarios {
                if !seen.insert(s.id.as_str()) {
                    return Err(CostforgeError::DuplicateScenario(s.id.clone()));
                }
            }
        }

        match self.active {
            Some(id) => {
                if data.scenario(&id).is_none() {
                    return Err(CostforgeError::UnknownScenario(id));
                }
                data.active_scenario_id = id;
            }
            None => {
                if data.active_scenario_id.is_empty() {
                    if let Some(first) = data.scenarios.first() {
                        data.active_scenario_id = first.id.clone();
                    }
                }
            }
        }

        Ok(data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::defaults::{default_project, preset, GENERIC_PROCESS};

    #[test]
    fn builds_a_minimal_project() {
        let data = ProjectBuilder::new("Pilot")
            .with_throughput(-5.0)
            .with_scenario(Scenario::new("base", "Base", 1.0, 1.0, 0.0))
            .build()
            .unwrap();
        assert_eq!(data.project.name, "Pilot");
        assert_eq!(data.process.throughput_tpy, 0.0);
        assert_eq!(data.active_scenario_id, "base");
    }

    #[test]
    fn duplicate_scenario_ids_are_rejected() {
        let res = ProjectBuilder::new("Dup")
            .with_scenario(Scenario::new("a", "A", 1.0, 1.0, 0.0))
            .with_scenario(Scenario::new("a", "Again", 1.2, 1.0, 0.0))
            .build();
        assert!(matches!(res, Err(CostforgeError::DuplicateScenario(id)) if id == "a"));
    }

    #[test]
    fn unknown_active_scenario_is_rejected() {
        let res = ProjectBuilder::new("X").active_scenario("ghost").build();
        assert!(matches!(res, Err(CostforgeError::UnknownScenario(_))));
    }

    #[test]
    fn starts_from_an_existing_project() {
        let generic = preset(GENERIC_PROCESS).unwrap();
        let data = ProjectBuilder::from_project(default_project())
            .named("Line 2")
            .with_preset(&generic)
            .with_selling_price(250.0)
            .active_scenario("pessimistic")
            .build()
            .unwrap();
        assert_eq!(data.project.name, "Line 2");
        assert_eq!(data.finance.selling_price_per_t, 250.0);
        assert_eq!(data.active_scenario_id, "pessimistic");
        assert_eq!(data.line_items.len(), 1);
    }
}
