use crate::{category::CostCategory, lenient};
use serde::{Deserialize, Serialize};

pub(crate) fn yes() -> bool {
    true
}

pub(crate) fn benchmark() -> String {
    "Benchmark".to_string()
}

fn default_unit_spec() -> String {
    "kg/t".to_string()
}

fn default_unit_intensity() -> String {
    "unit/t".to_string()
}

fn materials_category() -> CostCategory {
    CostCategory::Materials
}

fn default_product() -> String {
    "Final Product".to_string()
}

/// Formulation (bill of materials) entry, in tonnes per tonne of product.
///
/// Older files carry `kg_per_t` instead of `t_per_t`. Those are converted
/// once while loading; nothing downstream sees the legacy field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "RecipeRecord")]
pub struct RecipeRow {
    pub name: String,
    pub t_per_t: f64,
    pub unit_cost: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cost_unit: Option<String>,
    pub price_source: String,
    pub taxable: bool,
    pub note: String,
}

#[derive(Deserialize)]
struct RecipeRecord {
    #[serde(default, deserialize_with = "lenient::text")]
    name: String,
    #[serde(default, deserialize_with = "lenient::optional_number")]
    t_per_t: Option<f64>,
    #[serde(default, deserialize_with = "lenient::optional_number")]
    kg_per_t: Option<f64>,
    #[serde(default, deserialize_with = "lenient::number")]
    unit_cost: f64,
    #[serde(default, deserialize_with = "lenient::optional_text")]
    cost_unit: Option<String>,
    #[serde(default = "benchmark", deserialize_with = "lenient::text")]
    price_source: String,
    #[serde(default = "yes", deserialize_with = "lenient::flag")]
    taxable: bool,
    #[serde(default, deserialize_with = "lenient::text")]
    note: String,
}

impl From<RecipeRecord> for RecipeRow {
    fn from(rec: RecipeRecord) -> Self {
        let t_per_t = match rec.t_per_t {
            Some(t) => t,
            None => rec.kg_per_t.unwrap_or(0.0) / 1000.0,
        };
        Self {
            name: rec.name,
            t_per_t,
            unit_cost: rec.unit_cost,
            cost_unit: rec.cost_unit,
            price_source: rec.price_source,
            taxable: rec.taxable,
            note: rec.note,
        }
    }
}

impl Default for RecipeRow {
    fn default() -> Self {
        Self {
            name: String::new(),
            t_per_t: 0.0,
            unit_cost: 0.0,
            cost_unit: None,
            price_source: benchmark(),
            taxable: true,
            note: String::new(),
        }
    }
}

/// Process consumable with a specific consumption per tonne of product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MaterialRow {
    #[serde(default, deserialize_with = "lenient::text")]
    pub name: String,
    #[serde(default, deserialize_with = "lenient::number")]
    pub spec_per_t: f64,
    #[serde(default = "default_unit_spec", deserialize_with = "lenient::text")]
    pub unit_spec: String,
    #[serde(default, deserialize_with = "lenient::number")]
    pub unit_cost: f64,
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "lenient::optional_text")]
    pub cost_unit: Option<String>,
    #[serde(default = "benchmark", deserialize_with = "lenient::text")]
    pub price_source: String,
    #[serde(default = "materials_category")]
    pub category: CostCategory,
    #[serde(default, deserialize_with = "lenient::flag")]
    pub taxable: bool,
    #[serde(default, deserialize_with = "lenient::text")]
    pub note: String,
}

impl Default for MaterialRow {
    fn default() -> Self {
        Self {
            name: String::new(),
            spec_per_t: 0.0,
            unit_spec: default_unit_spec(),
            unit_cost: 0.0,
            cost_unit: None,
            price_source: benchmark(),
            category: CostCategory::Materials,
            taxable: false,
            note: String::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UtilityRow {
    #[serde(default, deserialize_with = "lenient::text")]
    pub name: String,
    #[serde(default, deserialize_with = "lenient::number")]
    pub intensity_per_t: f64,
    #[serde(default = "default_unit_intensity", deserialize_with = "lenient::text")]
    pub unit_intensity: String,
    #[serde(default, deserialize_with = "lenient::number")]
    pub tariff_per_unit: f64,
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "lenient::optional_text")]
    pub tariff_unit: Option<String>,
    #[serde(default = "benchmark", deserialize_with = "lenient::text")]
    pub price_source: String,
    #[serde(default, deserialize_with = "lenient::flag")]
    pub taxable: bool,
    #[serde(default, deserialize_with = "lenient::text")]
    pub note: String,
}

impl Default for UtilityRow {
    fn default() -> Self {
        Self {
            name: String::new(),
            intensity_per_t: 0.0,
            unit_intensity: default_unit_intensity(),
            tariff_per_unit: 0.0,
            tariff_unit: None,
            price_source: benchmark(),
            taxable: false,
            note: String::new(),
        }
    }
}

/// Saleable or reusable side stream. Its value is a credit against cost.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ByproductRow {
    #[serde(default, deserialize_with = "lenient::text")]
    pub name: String,
    #[serde(default, deserialize_with = "lenient::number")]
    pub credit_per_t: f64,
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "lenient::optional_text")]
    pub unit: Option<String>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub note: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessModel {
    #[serde(default = "default_product", deserialize_with = "lenient::text")]
    pub product_name: String,
    /// Steady-state output in tonnes per year.
    #[serde(rename = "throughput_tpy", default, deserialize_with = "lenient::non_negative")]
    pub throughput_tpy: f64,
    #[serde(default, deserialize_with = "lenient::or_default")]
    pub materials: Vec<MaterialRow>,
    #[serde(default, deserialize_with = "lenient::or_default")]
    pub utilities: Vec<UtilityRow>,
    #[serde(default, deserialize_with = "lenient::or_default")]
    pub byproducts: Vec<ByproductRow>,
}

impl Default for ProcessModel {
    fn default() -> Self {
        Self {
            product_name: default_product(),
            throughput_tpy: 0.0,
            materials: Vec::new(),
            utilities: Vec::new(),
            byproducts: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn legacy_kg_per_t_is_migrated_on_load() {
        let row: RecipeRow =
            serde_json::from_value(json!({ "name": "Lime", "kg_per_t": 250, "unit_cost": 900 }))
                .unwrap();
        assert!((row.t_per_t - 0.25).abs() < 1e-12);
        assert!(row.taxable);
    }

    #[test]
    fn t_per_t_wins_over_legacy_field() {
        let row: RecipeRow =
            serde_json::from_value(json!({ "t_per_t": 0.4, "kg_per_t": 250 })).unwrap();
        assert_eq!(row.t_per_t, 0.4);
    }

    #[test]
    fn migrated_rows_serialize_without_the_legacy_field() {
        let row: RecipeRow = serde_json::from_value(json!({ "kg_per_t": 100 })).unwrap();
        let out = serde_json::to_value(&row).unwrap();
        assert!(out.get("kg_per_t").is_none());
        assert_eq!(out["t_per_t"], json!(0.1));
    }

    #[test]
    fn row_taxable_defaults_differ_by_kind() {
        let mat: MaterialRow = serde_json::from_value(json!({ "name": "Reagent" })).unwrap();
        let util: UtilityRow = serde_json::from_value(json!({ "name": "Power" })).unwrap();
        assert!(!mat.taxable);
        assert!(!util.taxable);
        assert_eq!(mat.unit_spec, "kg/t");
        assert_eq!(util.unit_intensity, "unit/t");
    }

    #[test]
    fn negative_throughput_is_clamped() {
        let p: ProcessModel =
            serde_json::from_value(json!({ "throughput_tpy": -50, "materials": null })).unwrap();
        assert_eq!(p.throughput_tpy, 0.0);
        assert!(p.materials.is_empty());
    }
}
