use crate::lenient;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Cost rollup category.
///
/// The named variants are the ones the engine itself writes to. Anything a
/// user types that is not one of them is kept verbatim in `Custom`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub enum CostCategory {
    Labor,
    Materials,
    Utilities,
    Formulation,
    Logistics,
    Equipment,
    Installation,
    Services,
    #[default]
    Other,
    Custom(String),
}

impl CostCategory {
    pub fn as_str(&self) -> &str {
        match self {
            CostCategory::Labor => "Labor",
            CostCategory::Materials => "Materials",
            CostCategory::Utilities => "Utilities",
            CostCategory::Formulation => "Formulation",
            CostCategory::Logistics => "Logistics",
            CostCategory::Equipment => "Equipment",
            CostCategory::Installation => "Installation",
            CostCategory::Services => "Services",
            CostCategory::Other => "Other",
            CostCategory::Custom(label) => label,
        }
    }
}

impl From<&str> for CostCategory {
    fn from(label: &str) -> Self {
        match label.trim() {
            "Labor" => CostCategory::Labor,
            "Materials" => CostCategory::Materials,
            "Utilities" => CostCategory::Utilities,
            "Formulation" => CostCategory::Formulation,
            "Logistics" => CostCategory::Logistics,
            "Equipment" => CostCategory::Equipment,
            "Installation" => CostCategory::Installation,
            "Services" => CostCategory::Services,
            "Other" | "" => CostCategory::Other,
            custom => CostCategory::Custom(custom.to_string()),
        }
    }
}

impl From<String> for CostCategory {
    fn from(label: String) -> Self {
        CostCategory::from(label.as_str())
    }
}

impl fmt::Display for CostCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for CostCategory {
    fn serialize<S: Serializer>(&self, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for CostCategory {
    fn deserialize<D: Deserializer<'de>>(d: D) -> Result<Self, D::Error> {
        lenient::text(d).map(CostCategory::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_labels_map_to_variants() {
        assert_eq!(CostCategory::from("Logistics"), CostCategory::Logistics);
        assert_eq!(CostCategory::from(" Labor "), CostCategory::Labor);
        assert_eq!(CostCategory::from(""), CostCategory::Other);
    }

    #[test]
    fn custom_labels_survive_a_round_trip() {
        let cat = CostCategory::from("Lab analyses");
        assert_eq!(cat, CostCategory::Custom("Lab analyses".to_string()));
        assert_eq!(cat.to_string(), "Lab analyses");
    }

    #[test]
    fn labels_are_case_sensitive() {
        assert_eq!(
            CostCategory::from("logistics"),
            CostCategory::Custom("logistics".to_string())
        );
    }
}
