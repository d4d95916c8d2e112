use costforge_schemas::project::{SectionVisibility, Stage};
use serde::Serialize;

/// What a project stage implies for estimate accuracy and default inputs.
/// Informational only; nothing in the cost engine enforces it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct StageMetadata {
    pub stage: Stage,
    pub accuracy_low_pct: f64,
    pub accuracy_high_pct: f64,
    pub default_contingency_pct: f64,
    pub sections: SectionVisibility,
}

impl StageMetadata {
    /// E.g. `-30% / +50%`.
    pub fn accuracy_label(&self) -> String {
        format!(
            "{}% / +{}%",
            self.accuracy_low_pct, self.accuracy_high_pct
        )
    }

    /// Range a point estimate falls in at this stage.
    pub fn accuracy_range(&self, estimate: f64) -> (f64, f64) {
        (
            estimate * (1.0 + self.accuracy_low_pct / 100.0),
            estimate * (1.0 + self.accuracy_high_pct / 100.0),
        )
    }
}

impl From<Stage> for StageMetadata {
    fn from(stage: Stage) -> Self {
        let (low, high) = stage.accuracy_band();
        let profile = stage.profile();
        Self {
            stage,
            accuracy_low_pct: low,
            accuracy_high_pct: high,
            default_contingency_pct: profile.contingency_pct,
            sections: profile.sections,
        }
    }
}

/// Metadata for a stage name. Unknown names fall back to Feasibility.
pub fn stage_metadata(name: &str) -> StageMetadata {
    Stage::from_label(name).into()
}

pub fn all_stages() -> Vec<StageMetadata> {
    Stage::ALL.into_iter().map(StageMetadata::from).collect()
}
