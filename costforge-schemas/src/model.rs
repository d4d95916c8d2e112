use crate::{
    finance::FinanceInputs,
    lenient,
    logistics::{PackagingRow, TransportRow, WasteRow},
    opex::{LaborRate, LineItem, Risk},
    process::{ProcessModel, RecipeRow},
    project::ProjectInfo,
    rampup::RampUpProfile,
    rubric::Rubric,
    scenario::Scenario,
    settings::Settings,
};
use serde::{Deserialize, Serialize};

/// The complete costing model of one project.
///
/// Every computation borrows this immutably. Scenario selection is resolved
/// into [`ScenarioMultipliers`](crate::scenario::ScenarioMultipliers) up
/// front, so comparing scenarios never needs to flip `active_scenario_id`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectData {
    #[serde(default, deserialize_with = "lenient::or_default")]
    pub project: ProjectInfo,
    #[serde(default, deserialize_with = "lenient::or_default")]
    pub line_items: Vec<LineItem>,
    #[serde(default, deserialize_with = "lenient::or_default")]
    pub rates: Vec<LaborRate>,
    #[serde(default, deserialize_with = "lenient::or_default")]
    pub risks: Vec<Risk>,
    #[serde(default, deserialize_with = "lenient::or_default")]
    pub scenarios: Vec<Scenario>,
    #[serde(default, deserialize_with = "lenient::or_default")]
    pub settings: Settings,
    #[serde(default, deserialize_with = "lenient::text")]
    pub active_scenario_id: String,
    #[serde(default, deserialize_with = "lenient::text")]
    pub preset_name: String,
    #[serde(default, deserialize_with = "lenient::or_default")]
    pub process: ProcessModel,
    #[serde(default, deserialize_with = "lenient::or_default")]
    pub recipe: Vec<RecipeRow>,
    #[serde(default, deserialize_with = "lenient::or_default")]
    pub packaging: Vec<PackagingRow>,
    #[serde(default, deserialize_with = "lenient::or_default")]
    pub logistics: Vec<TransportRow>,
    #[serde(default, deserialize_with = "lenient::or_default")]
    pub waste: Vec<WasteRow>,
    #[serde(default, deserialize_with = "lenient::or_default")]
    pub rubrics: Vec<Rubric>,
    #[serde(default, deserialize_with = "lenient::or_default")]
    pub rampup: RampUpProfile,
    #[serde(default, deserialize_with = "lenient::or_default")]
    pub finance: FinanceInputs,
}

impl ProjectData {
    pub fn scenario(&self, id: &str) -> Option<&Scenario> {
        self.scenarios.iter().find(|s| s.id == id)
    }

    pub fn active_scenario(&self) -> Option<&Scenario> {
        self.scenario(&self.active_scenario_id)
    }

    pub fn currency(&self) -> &str {
        &self.project.currency
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn missing_active_scenario_is_not_found() {
        let data: ProjectData = serde_json::from_value(json!({
            "scenarios": [{ "id": "hi", "costMultiplier": 1.2 }],
            "activeScenarioId": "gone"
        }))
        .unwrap();
        assert!(data.active_scenario().is_none());
        assert_eq!(data.scenario("hi").map(|s| s.multipliers().cost), Some(1.2));
    }

    #[test]
    fn null_sections_are_treated_as_empty() {
        let data: ProjectData = serde_json::from_value(json!({
            "recipe": null,
            "process": null,
            "settings": null,
            "lineItems": null
        }))
        .unwrap();
        assert!(data.recipe.is_empty());
        assert!(data.line_items.is_empty());
        assert_eq!(data.process.throughput_tpy, 0.0);
        assert_eq!(data.settings, Settings::default());
    }

    #[test]
    fn a_string_where_a_list_belongs_is_rejected() {
        let res: Result<ProjectData, _> = serde_json::from_value(json!({ "recipe": "lime" }));
        assert!(res.is_err());
    }

    #[test]
    fn camel_case_keys_match_the_file_layout() {
        let yaml = r#"
project:
  name: Pilot
  stage: Design
  discountRatePct: 8
activeScenarioId: base
lineItems:
  - category: Labor
    quantity: 200
    unitCost: 350
"#;
        let data: ProjectData = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(data.project.discount_rate_pct, 8.0);
        assert_eq!(data.line_items[0].unit_cost, 350.0);
        assert_eq!(data.active_scenario_id, "base");
    }
}
