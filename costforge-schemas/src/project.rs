use crate::lenient;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Project maturity stage. Ordered from least to most defined.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub enum Stage {
    #[default]
    Feasibility,
    Design,
    Execution,
    Commissioning,
}

/// Which input sections a stage shows by default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SectionVisibility {
    pub recipe: bool,
    pub materials: bool,
    pub utilities: bool,
    pub byproducts: bool,
    pub log_packaging: bool,
    pub log_transport: bool,
    pub waste: bool,
    pub rubrics: bool,
    pub line_items: bool,
}

impl SectionVisibility {
    const ALL: SectionVisibility = SectionVisibility {
        recipe: true,
        materials: true,
        utilities: true,
        byproducts: true,
        log_packaging: true,
        log_transport: true,
        waste: true,
        rubrics: true,
        line_items: true,
    };
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct StageProfile {
    pub contingency_pct: f64,
    pub sections: SectionVisibility,
}

impl Stage {
    pub const ALL: [Stage; 4] = [
        Stage::Feasibility,
        Stage::Design,
        Stage::Execution,
        Stage::Commissioning,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Stage::Feasibility => "Feasibility",
            Stage::Design => "Design",
            Stage::Execution => "Execution",
            Stage::Commissioning => "Commissioning",
        }
    }

    pub fn parse(label: &str) -> Option<Stage> {
        let label = label.trim();
        Stage::ALL
            .into_iter()
            .find(|s| s.as_str().eq_ignore_ascii_case(label))
    }

    /// Unknown labels resolve to `Feasibility`.
    pub fn from_label(label: &str) -> Stage {
        Stage::parse(label).unwrap_or_default()
    }

    /// Expected estimate accuracy as (low %, high %).
    pub fn accuracy_band(&self) -> (f64, f64) {
        match self {
            Stage::Feasibility => (-30.0, 50.0),
            Stage::Design => (-20.0, 30.0),
            Stage::Execution => (-10.0, 15.0),
            Stage::Commissioning => (-10.0, 10.0),
        }
    }

    pub fn profile(&self) -> StageProfile {
        match self {
            Stage::Feasibility => StageProfile {
                contingency_pct: 28.0,
                sections: SectionVisibility {
                    utilities: false,
                    log_packaging: false,
                    log_transport: false,
                    ..SectionVisibility::ALL
                },
            },
            Stage::Design => StageProfile {
                contingency_pct: 20.0,
                sections: SectionVisibility::ALL,
            },
            Stage::Execution => StageProfile {
                contingency_pct: 12.0,
                sections: SectionVisibility::ALL,
            },
            Stage::Commissioning => StageProfile {
                contingency_pct: 7.0,
                sections: SectionVisibility::ALL,
            },
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for Stage {
    fn serialize<S: Serializer>(&self, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Stage {
    fn deserialize<D: Deserializer<'de>>(d: D) -> Result<Self, D::Error> {
        lenient::text(d).map(|label| Stage::from_label(&label))
    }
}

fn default_name() -> String {
    "New Project".to_string()
}

fn default_kind() -> String {
    "Process".to_string()
}

fn default_currency() -> String {
    "MAD".to_string()
}

fn default_discount_rate() -> f64 {
    10.0
}

fn default_duration() -> f64 {
    12.0
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectInfo {
    #[serde(default = "default_name", deserialize_with = "lenient::text")]
    pub name: String,
    #[serde(rename = "type", default = "default_kind", deserialize_with = "lenient::text")]
    pub kind: String,
    #[serde(default)]
    pub stage: Stage,
    /// Display label only. No conversion is ever applied.
    #[serde(default = "default_currency", deserialize_with = "lenient::text")]
    pub currency: String,
    #[serde(default = "default_discount_rate", deserialize_with = "lenient::number")]
    pub discount_rate_pct: f64,
    #[serde(default = "default_duration", deserialize_with = "lenient::number")]
    pub duration_months: f64,
    #[serde(default, deserialize_with = "lenient::text")]
    pub info: String,
}

impl Default for ProjectInfo {
    fn default() -> Self {
        Self {
            name: default_name(),
            kind: default_kind(),
            stage: Stage::default(),
            currency: default_currency(),
            discount_rate_pct: default_discount_rate(),
            duration_months: default_duration(),
            info: String::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stage_labels_parse_case_insensitively() {
        assert_eq!(Stage::parse("design"), Some(Stage::Design));
        assert_eq!(Stage::parse("Execution "), Some(Stage::Execution));
        assert_eq!(Stage::parse("Construction"), None);
        assert_eq!(Stage::from_label("Construction"), Stage::Feasibility);
    }

    #[test]
    fn stages_are_ordered() {
        assert!(Stage::Feasibility < Stage::Design);
        assert!(Stage::Execution < Stage::Commissioning);
    }

    #[test]
    fn feasibility_hides_utilities_and_logistics() {
        let sections = Stage::Feasibility.profile().sections;
        assert!(!sections.utilities);
        assert!(!sections.log_packaging);
        assert!(!sections.log_transport);
        assert!(sections.recipe && sections.waste && sections.line_items);
    }

    #[test]
    fn contingency_tightens_as_the_project_matures() {
        let pcts: Vec<f64> = Stage::ALL.iter().map(|s| s.profile().contingency_pct).collect();
        assert_eq!(pcts, vec![28.0, 20.0, 12.0, 7.0]);
    }
}
