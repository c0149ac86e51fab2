use crate::config::{ProjectConfig, RulesField};
use crate::defaults::{default_content, DEFAULT_LANGUAGE};
use crate::error::{Result, SpecError};
use crate::types::DocumentKind;
use crate::{io, paths};
use chrono::{Datelike, Local};
use serde::Serialize;
use std::fmt;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Prompts logs shorter than this (trimmed) are flagged as barely used.
pub const MIN_PROMPTS_LEN: usize = 100;

const ARCHITECTURE_SECTIONS: &[&str] = &["Overview", "Architecture", "Components", "Decisions"];

// ---------------------------------------------------------------------------
// Options and result
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, Default)]
pub struct ValidationOptions {
    pub fix: bool,
    pub verbose: bool,
}

/// Where each `mandatesVerified` point came from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MandateChecks {
    /// `project.yaml` lists a prompt-tracking mandate.
    pub project_config: bool,
    /// `prompts.md` mentions the mandate and AI interactions.
    pub prompts_log: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationResult {
    pub is_valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub spec_root: Option<PathBuf>,
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
    pub fixable: Vec<String>,
    pub files_checked: usize,
    pub mandates_verified: usize,
    pub mandate_checks: MandateChecks,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub fixes_applied: Vec<String>,
}

impl ValidationResult {
    fn error(&mut self, message: impl Into<String>) {
        self.errors.push(message.into());
    }

    fn warning(&mut self, message: impl Into<String>) {
        self.warnings.push(message.into());
    }

    fn fixable(&mut self, fix: Fix) {
        let id = fix.to_string();
        if !self.fixable.contains(&id) {
            self.fixable.push(id);
        }
    }
}

// ---------------------------------------------------------------------------
// Fix
// ---------------------------------------------------------------------------

/// A repair the validator knows how to apply. Identifiers on the wire are
/// `create-<filename>`, `add-mandates` and `create-prompts-entry`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fix {
    CreateFile(DocumentKind),
    AddMandates,
    CreatePromptsEntry,
}

impl fmt::Display for Fix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Fix::CreateFile(kind) => write!(f, "create-{}", kind.filename()),
            Fix::AddMandates => f.write_str("add-mandates"),
            Fix::CreatePromptsEntry => f.write_str("create-prompts-entry"),
        }
    }
}

impl std::str::FromStr for Fix {
    type Err = SpecError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "add-mandates" => Ok(Fix::AddMandates),
            "create-prompts-entry" => Ok(Fix::CreatePromptsEntry),
            other => other
                .strip_prefix("create-")
                .and_then(DocumentKind::from_filename)
                .map(Fix::CreateFile)
                .ok_or_else(|| SpecError::UnknownFix(s.to_string())),
        }
    }
}

// ---------------------------------------------------------------------------
// SpecValidator
// ---------------------------------------------------------------------------

#[derive(Debug, Default)]
pub struct SpecValidator;

impl SpecValidator {
    pub fn new() -> Self {
        Self
    }

    /// Check the spec tree under `project_dir`. Problems are collected in
    /// the result; the pass always runs to completion. With `fix`, an
    /// invalid tree with fixable problems is repaired and checked again.
    pub fn validate(&self, project_dir: &Path, options: ValidationOptions) -> Result<ValidationResult> {
        let result = self.check(project_dir, options.verbose);
        if !options.fix || result.is_valid || result.fixable.is_empty() {
            return Ok(result);
        }

        let applied = self.auto_fix(project_dir, &result.fixable);
        let mut revalidated = self.check(project_dir, options.verbose);
        revalidated.fixes_applied = applied;
        Ok(revalidated)
    }

    fn check(&self, project_dir: &Path, verbose: bool) -> ValidationResult {
        let mut result = ValidationResult::default();

        let Some(spec_root) = paths::find_spec_root(project_dir) else {
            result.error(format!("No spec directory found in {}", project_dir.display()));
            return result;
        };

        for kind in DocumentKind::required() {
            if paths::locate_document(&spec_root, *kind).is_some() {
                result.files_checked += 1;
            } else {
                result.error(format!("Missing required file: {}", kind.filename()));
                result.fixable(Fix::CreateFile(*kind));
            }
        }

        check_project_config(&spec_root, &mut result);
        check_prompts(&spec_root, &mut result);
        check_architecture(&spec_root, &mut result, verbose);
        check_requirements(&spec_root, &mut result, verbose);
        check_tasks(&spec_root, &mut result, verbose);

        result.mandates_verified =
            result.mandate_checks.project_config as usize + result.mandate_checks.prompts_log as usize;
        result.is_valid = result.errors.is_empty();
        result.spec_root = Some(spec_root);
        result
    }

    /// Apply each fix in order. Unknown identifiers and failing fixes are
    /// skipped. Returns the identifiers of the fixes that changed the tree.
    pub fn auto_fix(&self, project_dir: &Path, fixable: &[String]) -> Vec<String> {
        let Some(spec_root) = paths::find_spec_root(project_dir) else {
            return Vec::new();
        };

        let mut applied = Vec::new();
        for id in fixable {
            let fix: Fix = match id.parse() {
                Ok(fix) => fix,
                Err(e) => {
                    debug!(fix = %id, error = %e, "skipping fix");
                    continue;
                }
            };
            match self.apply_fix(&spec_root, fix) {
                Ok(true) => {
                    debug!(fix = %fix, "applied fix");
                    applied.push(fix.to_string());
                }
                Ok(false) => debug!(fix = %fix, "fix had nothing to do"),
                Err(e) => debug!(fix = %fix, error = %e, "fix failed"),
            }
        }
        applied
    }

    /// Apply a single fix to the tree at `spec_root`. Returns whether
    /// anything was written.
    pub fn apply_fix(&self, spec_root: &Path, fix: Fix) -> Result<bool> {
        let project_name = project_name_for(spec_root);
        match fix {
            Fix::CreateFile(kind) => {
                if paths::locate_document(spec_root, kind).is_some() {
                    return Ok(false);
                }
                let path = paths::creation_path(spec_root, kind);
                let content = default_content(kind, &project_name, DEFAULT_LANGUAGE);
                io::write_if_missing(&path, content.as_bytes())
            }
            Fix::AddMandates => {
                let path = paths::locate_document(spec_root, DocumentKind::ProjectConfig)
                    .ok_or_else(|| SpecError::DocumentNotFound(paths::PROJECT_CONFIG_FILE.to_string()))?;
                let mut config = ProjectConfig::load(&path)?;
                if config.add_canonical_mandates() == 0 {
                    return Ok(false);
                }
                config.save(&path)?;
                Ok(true)
            }
            Fix::CreatePromptsEntry => {
                let path = paths::locate_document(spec_root, DocumentKind::Prompts)
                    .unwrap_or_else(|| paths::creation_path(spec_root, DocumentKind::Prompts));
                let content = default_content(DocumentKind::Prompts, &project_name, DEFAULT_LANGUAGE);
                io::atomic_write(&path, content.as_bytes())?;
                Ok(true)
            }
        }
    }
}

/// Project name used in default content: the directory holding the spec root.
fn project_name_for(spec_root: &Path) -> String {
    spec_root
        .parent()
        .and_then(Path::file_name)
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "project-name".to_string())
}

// ---------------------------------------------------------------------------
// Document checks
// ---------------------------------------------------------------------------

fn check_project_config(spec_root: &Path, result: &mut ValidationResult) {
    let Some(path) = paths::locate_document(spec_root, DocumentKind::ProjectConfig) else {
        return;
    };
    let config = match io::read_to_string(&path).and_then(|data| ProjectConfig::parse(&data)) {
        Ok(config) => config,
        Err(SpecError::InvalidProjectConfig) => {
            result.error("project.yaml is empty or invalid");
            return;
        }
        Err(e) => {
            result.error(format!("Failed to parse project.yaml: {e}"));
            return;
        }
    };

    for field in config.missing_fields() {
        result.error(format!("project.yaml missing required field: {field}"));
    }

    let rules = config.rules();
    if !matches!(rules, RulesField::List(_)) {
        result.warning("project.yaml should have a rules section");
    }
    if rules.has_prompt_tracking_mandate() {
        result.mandate_checks.project_config = true;
    } else {
        result.error("Missing MANDATE for prompt tracking in project.yaml rules");
        result.fixable(Fix::AddMandates);
    }
}

fn check_prompts(spec_root: &Path, result: &mut ValidationResult) {
    let Some(path) = paths::locate_document(spec_root, DocumentKind::Prompts) else {
        result.error("prompts.md is missing - this violates the prompt tracking mandate");
        return;
    };
    let content = match io::read_to_string(&path) {
        Ok(content) => content,
        Err(e) => {
            result.error(format!("Failed to read prompts.md: {e}"));
            return;
        }
    };

    if content.trim().len() < MIN_PROMPTS_LEN {
        result.warning("prompts.md appears to have minimal content - ensure AI interactions are being tracked");
        result.fixable(Fix::CreatePromptsEntry);
    }
    if !content.contains(&Local::now().year().to_string()) {
        result.warning("prompts.md may not be up to date - ensure recent AI interactions are documented");
    }
    if content.contains("MANDATE") && content.contains("AI interaction") {
        result.mandate_checks.prompts_log = true;
    }
}

/// Read a document for a content heuristic. Read failures are reported as
/// warnings in verbose mode and otherwise ignored.
fn read_for_heuristic(
    spec_root: &Path,
    kind: DocumentKind,
    result: &mut ValidationResult,
    verbose: bool,
) -> Option<String> {
    let path = paths::locate_document(spec_root, kind)?;
    match io::read_to_string(&path) {
        Ok(content) => Some(content),
        Err(e) => {
            if verbose {
                result.warning(format!("Could not validate {} content: {e}", kind.filename()));
            }
            None
        }
    }
}

fn check_architecture(spec_root: &Path, result: &mut ValidationResult, verbose: bool) {
    let Some(content) = read_for_heuristic(spec_root, DocumentKind::Architecture, result, verbose)
    else {
        return;
    };
    let lower = content.to_lowercase();
    let missing: Vec<&str> = ARCHITECTURE_SECTIONS
        .iter()
        .copied()
        .filter(|section| !lower.contains(&section.to_lowercase()))
        .collect();
    if !missing.is_empty() {
        result.warning(format!("architecture.md missing sections: {}", missing.join(", ")));
    }
}

fn check_requirements(spec_root: &Path, result: &mut ValidationResult, verbose: bool) {
    let Some(content) = read_for_heuristic(spec_root, DocumentKind::Requirements, result, verbose)
    else {
        return;
    };
    if content.contains("[Placeholder") || content.contains("[To be") {
        result.warning("requirements.md contains placeholder text that should be updated");
    }
    if !content.contains("User Stories") && !content.contains("Functional Requirements") {
        result.warning("requirements.md should include user stories or functional requirements");
    }
}

fn check_tasks(spec_root: &Path, result: &mut ValidationResult, verbose: bool) {
    let Some(content) = read_for_heuristic(spec_root, DocumentKind::Tasks, result, verbose) else {
        return;
    };
    let tracks_status = ["In Progress", "in-progress", "Completed", "completed"]
        .iter()
        .any(|marker| content.contains(marker));
    if !tracks_status {
        result.warning("tasks.md should track task status (In Progress, Completed, etc.)");
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    /// A flat tree where every required file uses its default content.
    fn flat_tree() -> TempDir {
        let dir = TempDir::new().unwrap();
        let root = dir.path().join(".specs");
        for kind in DocumentKind::required() {
            let content = default_content(*kind, "demo", DEFAULT_LANGUAGE);
            io::atomic_write(&root.join(kind.filename()), content.as_bytes()).unwrap();
        }
        dir
    }

    #[test]
    fn fix_ids_round_trip() {
        for id in ["create-project.yaml", "create-tests.md", "add-mandates", "create-prompts-entry"] {
            assert_eq!(id.parse::<Fix>().unwrap().to_string(), id);
        }
        assert_eq!(
            "create-prompts.md".parse::<Fix>().unwrap(),
            Fix::CreateFile(DocumentKind::Prompts)
        );
        assert!("create-notes.md".parse::<Fix>().is_err());
        assert!("delete-everything".parse::<Fix>().is_err());
    }

    #[test]
    fn missing_spec_root_is_single_error() {
        let dir = TempDir::new().unwrap();
        let result = SpecValidator::new()
            .validate(dir.path(), ValidationOptions::default())
            .unwrap();
        assert!(!result.is_valid);
        assert_eq!(result.errors.len(), 1);
        assert!(result.errors[0].starts_with("No spec directory found"));
        assert_eq!(result.files_checked, 0);
    }

    #[test]
    fn flat_defaults_validate_cleanly() {
        let dir = flat_tree();
        let result = SpecValidator::new()
            .validate(dir.path(), ValidationOptions::default())
            .unwrap();
        assert!(result.is_valid, "errors: {:?}", result.errors);
        assert_eq!(result.files_checked, 9);
        assert_eq!(result.mandates_verified, 2);
        assert!(result.mandate_checks.project_config);
        assert!(result.mandate_checks.prompts_log);
        assert!(result.warnings.is_empty(), "warnings: {:?}", result.warnings);
    }

    #[test]
    fn missing_file_is_fixable() {
        let dir = flat_tree();
        std::fs::remove_file(dir.path().join(".specs/tests.md")).unwrap();
        let result = SpecValidator::new()
            .validate(dir.path(), ValidationOptions::default())
            .unwrap();
        assert!(!result.is_valid);
        assert_eq!(result.errors, vec!["Missing required file: tests.md"]);
        assert_eq!(result.fixable, vec!["create-tests.md"]);
        assert_eq!(result.files_checked, 8);
    }

    #[test]
    fn missing_fields_and_mandate() {
        let dir = flat_tree();
        std::fs::write(dir.path().join(".specs/project.yaml"), "name: demo\nrules:\n  - Be kind\n").unwrap();
        let result = SpecValidator::new()
            .validate(dir.path(), ValidationOptions::default())
            .unwrap();
        assert!(result.errors.contains(&"project.yaml missing required field: version".to_string()));
        assert!(result.errors.contains(&"project.yaml missing required field: language".to_string()));
        assert!(result
            .errors
            .contains(&"Missing MANDATE for prompt tracking in project.yaml rules".to_string()));
        assert_eq!(result.fixable, vec!["add-mandates"]);
        assert_eq!(result.mandates_verified, 1);
        assert!(!result.mandate_checks.project_config);
    }

    #[test]
    fn malformed_rules_warns() {
        let dir = flat_tree();
        std::fs::write(
            dir.path().join(".specs/project.yaml"),
            "name: demo\nversion: 1\nlanguage: java\nrules: MANDATE keep prompts.md\n",
        )
        .unwrap();
        let result = SpecValidator::new()
            .validate(dir.path(), ValidationOptions::default())
            .unwrap();
        assert!(result
            .warnings
            .contains(&"project.yaml should have a rules section".to_string()));
        assert!(result.fixable.contains(&"add-mandates".to_string()));
    }

    #[test]
    fn invalid_yaml_is_reported() {
        let dir = flat_tree();
        std::fs::write(dir.path().join(".specs/project.yaml"), "- a\n- list\n").unwrap();
        let result = SpecValidator::new()
            .validate(dir.path(), ValidationOptions::default())
            .unwrap();
        assert!(result.errors.contains(&"project.yaml is empty or invalid".to_string()));

        std::fs::write(dir.path().join(".specs/project.yaml"), "name: [oops").unwrap();
        let result = SpecValidator::new()
            .validate(dir.path(), ValidationOptions::default())
            .unwrap();
        assert!(result.errors.iter().any(|e| e.starts_with("Failed to parse project.yaml")));
    }

    #[test]
    fn prompts_heuristics() {
        let dir = flat_tree();
        std::fs::write(dir.path().join(".specs/prompts.md"), "# Prompts\n").unwrap();
        let result = SpecValidator::new()
            .validate(dir.path(), ValidationOptions::default())
            .unwrap();
        assert!(result.is_valid);
        assert_eq!(result.warnings.len(), 2);
        assert!(result.warnings[0].contains("minimal content"));
        assert!(result.warnings[1].contains("may not be up to date"));
        assert!(!result.mandate_checks.prompts_log);
        assert_eq!(result.fixable, vec!["create-prompts-entry"]);
    }

    #[test]
    fn missing_prompts_is_reported_twice() {
        let dir = flat_tree();
        std::fs::remove_file(dir.path().join(".specs/prompts.md")).unwrap();
        let result = SpecValidator::new()
            .validate(dir.path(), ValidationOptions::default())
            .unwrap();
        assert!(!result.is_valid);
        assert_eq!(
            result.errors,
            vec![
                "Missing required file: prompts.md",
                "prompts.md is missing - this violates the prompt tracking mandate",
            ]
        );
        assert_eq!(result.fixable, vec!["create-prompts.md"]);
        assert!(!result.mandate_checks.prompts_log);
    }

    #[test]
    fn prompts_entry_fix_replaces_existing_log() {
        let dir = flat_tree();
        let root = dir.path().join(".specs");
        std::fs::write(root.join("prompts.md"), "# Prompts\n\nhand-written notes\n").unwrap();

        let validator = SpecValidator::new();
        assert!(validator.apply_fix(&root, Fix::CreatePromptsEntry).unwrap());
        let content = std::fs::read_to_string(root.join("prompts.md")).unwrap();
        assert!(!content.contains("hand-written notes"));
        assert!(content.contains("MANDATE"));
        // Runs again even though the log is now populated.
        assert!(validator.apply_fix(&root, Fix::CreatePromptsEntry).unwrap());
    }

    #[test]
    fn content_warnings() {
        let dir = flat_tree();
        let root = dir.path().join(".specs");
        std::fs::write(root.join("architecture.md"), "# Overview\n").unwrap();
        std::fs::write(root.join("requirements.md"), "[To be written]\n").unwrap();
        std::fs::write(root.join("tasks.md"), "nothing tracked\n").unwrap();
        let result = SpecValidator::new()
            .validate(dir.path(), ValidationOptions::default())
            .unwrap();
        assert!(result.is_valid);
        assert!(result
            .warnings
            .contains(&"architecture.md missing sections: Architecture, Components, Decisions".to_string()));
        assert!(result
            .warnings
            .contains(&"requirements.md contains placeholder text that should be updated".to_string()));
        assert!(result
            .warnings
            .contains(&"requirements.md should include user stories or functional requirements".to_string()));
        assert!(result
            .warnings
            .contains(&"tasks.md should track task status (In Progress, Completed, etc.)".to_string()));
    }

    #[test]
    fn fix_repairs_and_revalidates() {
        let dir = flat_tree();
        let root = dir.path().join(".specs");
        std::fs::remove_file(root.join("docs.md")).unwrap();
        std::fs::write(root.join("project.yaml"), "name: demo\nversion: 1\nlanguage: java\n").unwrap();

        let result = SpecValidator::new()
            .validate(dir.path(), ValidationOptions { fix: true, verbose: false })
            .unwrap();
        assert!(result.is_valid, "errors: {:?}", result.errors);
        assert_eq!(result.fixes_applied, vec!["create-docs.md", "add-mandates"]);
        assert!(root.join("docs.md").is_file());
    }

    #[test]
    fn auto_fix_skips_unknown_and_failing() {
        let dir = flat_tree();
        let root = dir.path().join(".specs");
        std::fs::remove_file(root.join("project.yaml")).unwrap();
        let applied = SpecValidator::new().auto_fix(
            dir.path(),
            &["bogus".to_string(), "add-mandates".to_string()],
        );
        assert!(applied.is_empty());
    }

    #[test]
    fn create_file_is_idempotent() {
        let dir = flat_tree();
        let root = dir.path().join(".specs");
        std::fs::remove_file(root.join("context.md")).unwrap();
        let validator = SpecValidator::new();
        let fix = Fix::CreateFile(DocumentKind::Context);
        assert!(validator.apply_fix(&root, fix).unwrap());
        let first = std::fs::read_to_string(root.join("context.md")).unwrap();
        assert!(!validator.apply_fix(&root, fix).unwrap());
        assert_eq!(std::fs::read_to_string(root.join("context.md")).unwrap(), first);
    }

    #[test]
    fn create_file_goes_nested_when_tree_is_nested() {
        let dir = TempDir::new().unwrap();
        let root = dir.path().join(".specs");
        std::fs::create_dir_all(root.join("planning")).unwrap();
        assert!(SpecValidator::new()
            .apply_fix(&root, Fix::CreateFile(DocumentKind::Tasks))
            .unwrap());
        assert!(root.join("planning/tasks.md").is_file());
    }

    #[test]
    fn default_project_name_comes_from_directory() {
        assert_eq!(project_name_for(Path::new("/work/acme/.specs")), "acme");
    }
}
