use anyhow::{bail, Context, Result};
use costforge_schemas::{file_formats::ProjectFile, model::ProjectData};
use std::{fs, path::Path};
use tracing::{debug, info};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileFormat {
    Yaml,
    Json,
}

impl FileFormat {
    /// `.json` is JSON; everything else is read as YAML.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => FileFormat::Json,
            _ => FileFormat::Yaml,
        }
    }
}

/// Loads a project file.
///
/// Files written by `costforge` carry a `schema_version` envelope. A bare
/// project mapping without one is accepted too.
pub fn load_project(path: &Path) -> Result<ProjectData> {
    info!("Loading project from '{}'", path.display());
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read project file: {:?}", path))?;
    let data = parse_project(&content, FileFormat::from_path(path))
        .with_context(|| format!("Failed to parse project file: {:?}", path))?;
    debug!(
        name = %data.project.name,
        scenarios = data.scenarios.len(),
        line_items = data.line_items.len(),
        "project loaded"
    );
    Ok(data)
}

pub fn parse_project(content: &str, format: FileFormat) -> Result<ProjectData> {
    match format {
        FileFormat::Yaml => {
            let value: serde_yaml::Value = serde_yaml::from_str(content)?;
            if value.get("schema_version").is_some() {
                Ok(serde_yaml::from_value::<ProjectFile>(value)?.project)
            } else {
                Ok(serde_yaml::from_value(value)?)
            }
        }
        FileFormat::Json => {
            let value: serde_json::Value = serde_json::from_str(content)?;
            if value.get("schema_version").is_some() {
                Ok(serde_json::from_value::<ProjectFile>(value)?.project)
            } else {
                Ok(serde_json::from_value(value)?)
            }
        }
    }
}

pub fn save_project(path: &Path, data: &ProjectData) -> Result<()> {
    let file = ProjectFile::new(data.clone());
    let content = match FileFormat::from_path(path) {
        FileFormat::Yaml => serde_yaml::to_string(&file)?,
        FileFormat::Json => serde_json::to_string_pretty(&file)?,
    };
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {:?}", parent))?;
    }
    fs::write(path, content).with_context(|| format!("Failed to write project file: {:?}", path))?;
    info!("Project written to '{}'", path.display());
    Ok(())
}

/// Makes `scenario` the active one. Unlike the engine, which quietly falls
/// back to neutral multipliers, an explicit request for an unknown id fails.
pub fn select_scenario(mut data: ProjectData, scenario: Option<&str>) -> Result<ProjectData> {
    if let Some(id) = scenario {
        if data.scenario(id).is_none() {
            let known: Vec<&str> = data.scenarios.iter().map(|s| s.id.as_str()).collect();
            bail!("Unknown scenario '{}'. Defined: {}", id, known.join(", "));
        }
        data.active_scenario_id = id.to_string();
    }
    Ok(data)
}
