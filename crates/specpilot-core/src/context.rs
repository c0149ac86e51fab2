use crate::error::Result;
use crate::paths;
use chrono::{Datelike, Local};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

pub const DEFAULT_AUTHOR: &str = "Your Name";

// ---------------------------------------------------------------------------
// AnalysisResult
// ---------------------------------------------------------------------------

/// Summary produced by a codebase scan. Generation only reads the
/// architecture part; any other fields in the input are ignored.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    #[serde(default)]
    pub architecture: ArchitectureSummary,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArchitectureSummary {
    #[serde(default)]
    pub components: Vec<String>,
    /// Directory tree rendered as text.
    #[serde(default)]
    pub directories: String,
    /// File extension to file count.
    #[serde(default)]
    pub file_types: BTreeMap<String, u64>,
}

impl AnalysisResult {
    pub fn load(path: &Path) -> Result<Self> {
        let data = crate::io::read_to_string(path)?;
        Ok(serde_json::from_str(&data)?)
    }
}

// ---------------------------------------------------------------------------
// GenerationOptions
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct GenerationOptions {
    pub project_name: String,
    /// Expected to be checked against [`crate::types::Language`] by the
    /// caller; an unknown value only degrades the built-in templates.
    pub language: String,
    pub framework: Option<String>,
    pub target_dir: PathBuf,
    pub specs_name: String,
    pub author: Option<String>,
    pub description: Option<String>,
    pub analysis: Option<AnalysisResult>,
}

impl GenerationOptions {
    pub fn new(
        project_name: impl Into<String>,
        language: impl Into<String>,
        target_dir: impl Into<PathBuf>,
    ) -> Self {
        Self {
            project_name: project_name.into(),
            language: language.into(),
            framework: None,
            target_dir: target_dir.into(),
            specs_name: paths::DEFAULT_SPECS_DIR.to_string(),
            author: None,
            description: None,
            analysis: None,
        }
    }

    pub fn with_framework(mut self, framework: impl Into<String>) -> Self {
        self.framework = Some(framework.into());
        self
    }

    pub fn with_specs_name(mut self, specs_name: impl Into<String>) -> Self {
        self.specs_name = specs_name.into();
        self
    }

    pub fn with_analysis(mut self, analysis: AnalysisResult) -> Self {
        self.analysis = Some(analysis);
        self
    }

    pub fn spec_root(&self) -> PathBuf {
        paths::spec_root(&self.target_dir, &self.specs_name)
    }
}

// ---------------------------------------------------------------------------
// GenerationContext
// ---------------------------------------------------------------------------

/// Substitution environment shared by every template in one generation run.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationContext {
    pub project_name: String,
    pub language: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub framework: Option<String>,
    pub author: String,
    pub description: String,
    pub last_updated: String,
    pub current_date: String,
    pub current_year: i32,
    pub contributors: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub architecture: Option<ArchitectureSummary>,
}

impl GenerationContext {
    pub fn from_options(options: &GenerationOptions) -> Self {
        let framework = options
            .framework
            .as_ref()
            .map(|f| f.trim().to_string())
            .filter(|f| !f.is_empty());
        let author = options
            .author
            .clone()
            .filter(|a| !a.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_AUTHOR.to_string());
        let description = options
            .description
            .clone()
            .filter(|d| !d.trim().is_empty())
            .unwrap_or_else(|| default_description(&options.language, framework.as_deref()));

        let today = Local::now();
        let current_date = today.format("%Y-%m-%d").to_string();

        Self {
            project_name: options.project_name.clone(),
            language: options.language.clone(),
            framework,
            contributors: vec![author.clone()],
            author,
            description,
            last_updated: current_date.clone(),
            current_date,
            current_year: today.year(),
            architecture: options.analysis.as_ref().map(|a| a.architecture.clone()),
        }
    }
}

pub fn default_description(language: &str, framework: Option<&str>) -> String {
    match framework {
        Some(fw) => format!("A {language} project using {fw}"),
        None => format!("A {language} project"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_applied() {
        let opts = GenerationOptions::new("acme", "python", "/tmp/x");
        let ctx = GenerationContext::from_options(&opts);
        assert_eq!(ctx.author, DEFAULT_AUTHOR);
        assert_eq!(ctx.description, "A python project");
        assert_eq!(ctx.contributors, vec![DEFAULT_AUTHOR.to_string()]);
        assert_eq!(ctx.last_updated, ctx.current_date);
        assert_eq!(ctx.current_date.len(), 10);
        assert!(ctx.architecture.is_none());
    }

    #[test]
    fn description_mentions_framework() {
        let opts = GenerationOptions::new("acme", "typescript", "/tmp/x").with_framework("express");
        let ctx = GenerationContext::from_options(&opts);
        assert_eq!(ctx.description, "A typescript project using express");
    }

    #[test]
    fn blank_framework_is_dropped() {
        let opts = GenerationOptions::new("acme", "typescript", "/tmp/x").with_framework("  ");
        let ctx = GenerationContext::from_options(&opts);
        assert!(ctx.framework.is_none());
    }

    #[test]
    fn serializes_camel_case() {
        let opts = GenerationOptions::new("acme", "java", "/tmp/x");
        let value = serde_json::to_value(GenerationContext::from_options(&opts)).unwrap();
        assert_eq!(value["projectName"], "acme");
        assert!(value.get("lastUpdated").is_some());
        assert!(value.get("framework").is_none());
    }

    #[test]
    fn analysis_json_shape() {
        let json = r#"{
            "todos": [],
            "architecture": {
                "components": ["Parser", "Renderer"],
                "directories": "src/\n  lib.rs",
                "fileTypes": { ".rs": 12, ".md": 2 }
            }
        }"#;
        let analysis: AnalysisResult = serde_json::from_str(json).unwrap();
        assert_eq!(analysis.architecture.components, vec!["Parser", "Renderer"]);
        assert_eq!(analysis.architecture.file_types.get(".rs"), Some(&12));
    }
}
