use crate::{category::CostCategory, lenient, process::benchmark};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// How a custom rubric's quantity is annualized.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum RubricBasis {
    /// Quantity per tonne of product.
    #[default]
    PerTonne,
    /// Quantity per year, independent of throughput.
    PerYear,
    /// A one-off project amount, carried in the quantity field.
    FixedProject,
    /// Anything else. Annualized like `PerYear`; the label is kept for display.
    Unrecognized(String),
}

impl RubricBasis {
    pub fn as_str(&self) -> &str {
        match self {
            RubricBasis::PerTonne => "per_t",
            RubricBasis::PerYear => "per_year",
            RubricBasis::FixedProject => "fixed_project",
            RubricBasis::Unrecognized(label) => label,
        }
    }
}

impl From<&str> for RubricBasis {
    fn from(label: &str) -> Self {
        let label = label.trim();
        match label.to_ascii_lowercase().as_str() {
            "" | "per_t" => RubricBasis::PerTonne,
            "per_year" => RubricBasis::PerYear,
            "fixed_project" => RubricBasis::FixedProject,
            _ => RubricBasis::Unrecognized(label.to_string()),
        }
    }
}

impl Serialize for RubricBasis {
    fn serialize<S: Serializer>(&self, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for RubricBasis {
    fn deserialize<D: Deserializer<'de>>(d: D) -> Result<Self, D::Error> {
        lenient::text(d).map(|label| RubricBasis::from(label.as_str()))
    }
}

/// User-defined cost line, rolled into a category of the user's choosing.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Rubric {
    #[serde(default, deserialize_with = "lenient::text")]
    pub name: String,
    #[serde(default)]
    pub basis: RubricBasis,
    #[serde(default, deserialize_with = "lenient::number")]
    pub quantity: f64,
    #[serde(default, deserialize_with = "lenient::number")]
    pub unit_cost: f64,
    #[serde(default)]
    pub map_to_category: CostCategory,
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "lenient::optional_text")]
    pub cost_unit: Option<String>,
    #[serde(default = "benchmark", deserialize_with = "lenient::text")]
    pub price_source: String,
    #[serde(default, deserialize_with = "lenient::flag")]
    pub taxable: bool,
    #[serde(default, deserialize_with = "lenient::text")]
    pub note: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn basis_is_normalized() {
        assert_eq!(RubricBasis::from(" PER_YEAR "), RubricBasis::PerYear);
        assert_eq!(RubricBasis::from(""), RubricBasis::PerTonne);
        assert_eq!(
            RubricBasis::from("monthly"),
            RubricBasis::Unrecognized("monthly".to_string())
        );
    }

    #[test]
    fn missing_basis_and_category_take_defaults() {
        let r: Rubric = serde_json::from_value(json!({ "name": "QA", "quantity": 2 })).unwrap();
        assert_eq!(r.basis, RubricBasis::PerTonne);
        assert_eq!(r.map_to_category, CostCategory::Other);
        assert!(!r.taxable);
    }
}
