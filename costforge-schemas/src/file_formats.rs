use crate::model::ProjectData;
use serde::{Deserialize, Serialize};

pub const SCHEMA_VERSION: &str = "1.0";

fn schema_version() -> String {
    SCHEMA_VERSION.to_string()
}

/// On-disk envelope for a project, in YAML or JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectFile {
    #[serde(default = "schema_version")]
    pub schema_version: String,
    pub project: ProjectData,
}

impl ProjectFile {
    pub fn new(project: ProjectData) -> Self {
        Self {
            schema_version: schema_version(),
            project,
        }
    }
}
