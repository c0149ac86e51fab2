//! Record a natural-language description into an existing spec tree.
//!
//! The description lands in three places: the `## Project Overview` section
//! of `requirements.md`, a dated entry under `## Project Memory` in
//! `context.md`, and a prompt entry under `## Latest Entries` in
//! `prompts.md`. Documents that do not exist are left alone.

use crate::config::ProjectConfig;
use crate::context::GenerationOptions;
use crate::defaults::DEFAULT_LANGUAGE;
use crate::error::{Result, SpecError};
use crate::generator::SpecGenerator;
use crate::types::DocumentKind;
use crate::{io, paths};
use chrono::Local;
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::debug;

const OVERVIEW_HEADING: &str = "## Project Overview";
const MEMORY_HEADING: &str = "## Project Memory";
const LATEST_ENTRIES_HEADING: &str = "## Latest Entries";

#[derive(Debug, Clone, Copy, Default)]
pub struct SpecifyOptions {
    /// Replace the overview instead of extending it, and regenerate the
    /// tree from `project.yaml` with the new description first.
    pub update: bool,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SpecifyReport {
    pub spec_root: PathBuf,
    pub project_name: String,
    pub language: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub framework: Option<String>,
    pub updated: Vec<PathBuf>,
    pub regenerated: bool,
}

pub fn specify(project_dir: &Path, description: &str, options: SpecifyOptions) -> Result<SpecifyReport> {
    let description = description.trim();
    if description.is_empty() {
        return Err(SpecError::EmptyDescription);
    }

    let spec_root = paths::find_spec_root(project_dir)
        .ok_or_else(|| SpecError::SpecRootNotFound(project_dir.to_path_buf()))?;
    let config_path = paths::locate_document(&spec_root, DocumentKind::ProjectConfig)
        .ok_or_else(|| SpecError::DocumentNotFound(paths::PROJECT_CONFIG_FILE.to_string()))?;
    let config = ProjectConfig::load(&config_path)?;

    let project_name = config.name().unwrap_or_else(|| dir_name(project_dir));
    let language = config
        .language()
        .unwrap_or_else(|| DEFAULT_LANGUAGE.to_string());
    let framework = config.framework();

    if options.update {
        let specs_name = spec_root
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| paths::DEFAULT_SPECS_DIR.to_string());
        let mut gen_options = GenerationOptions::new(&project_name, &language, project_dir)
            .with_specs_name(specs_name);
        gen_options.framework = framework.clone();
        gen_options.description = Some(description.to_string());
        SpecGenerator::new().generate_specs(&gen_options)?;
    }

    let today = Local::now().format("%Y-%m-%d").to_string();
    let mut updated = Vec::new();

    if let Some(path) = paths::locate_document(&spec_root, DocumentKind::Requirements) {
        let content = io::read_to_string(&path)?;
        let next = if options.update || !content.contains(OVERVIEW_HEADING) {
            replace_section(&content, OVERVIEW_HEADING, description)
        } else {
            append_to_section(
                &content,
                OVERVIEW_HEADING,
                &format!("### Additional Context\n{description}"),
            )
        };
        io::atomic_write(&path, next.as_bytes())?;
        updated.push(path);
    }

    if let Some(path) = paths::locate_document(&spec_root, DocumentKind::Context) {
        let content = io::read_to_string(&path)?;
        let entry = format!(
            "### {today}: Specification update\n\
             - **Description**: {description}\n\
             - **Source**: specpilot specify"
        );
        io::atomic_write(&path, append_to_section(&content, MEMORY_HEADING, &entry).as_bytes())?;
        updated.push(path);
    }

    if let Some(path) = paths::locate_document(&spec_root, DocumentKind::Prompts) {
        let content = io::read_to_string(&path)?;
        let entry = format!(
            "### {today}: Specification update\n\
             - **Prompt**: \"{description}\"\n\
             - **Outcome**: requirements.md, context.md and prompts.md updated"
        );
        io::atomic_write(
            &path,
            append_to_section(&content, LATEST_ENTRIES_HEADING, &entry).as_bytes(),
        )?;
        updated.push(path);
    }

    for path in &updated {
        debug!(path = %path.display(), "recorded description");
    }

    Ok(SpecifyReport {
        spec_root,
        project_name,
        language,
        framework,
        updated,
        regenerated: options.update,
    })
}

fn dir_name(dir: &Path) -> String {
    dir.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "project".to_string())
}

// ---------------------------------------------------------------------------
// Section editing
// ---------------------------------------------------------------------------

/// Byte range of the body of the section opened by `heading`: from the line
/// after the heading up to the next `## ` heading or `---` rule.
fn section_body(content: &str, heading: &str) -> Option<(usize, usize)> {
    let mut offset = 0;
    let mut start = None;
    for line in content.split_inclusive('\n') {
        let bare = line.trim_end();
        match start {
            None if bare == heading => start = Some(offset + line.len()),
            Some(s) if bare.starts_with("## ") || bare == "---" => return Some((s, offset)),
            _ => {}
        }
        offset += line.len();
    }
    start.map(|s| (s, content.len()))
}

/// Add `entry` at the end of the section, creating the section at the end of
/// the document when it is missing.
fn append_to_section(content: &str, heading: &str, entry: &str) -> String {
    let Some((start, end)) = section_body(content, heading) else {
        return format!("{}\n\n{heading}\n{entry}\n", content.trim_end());
    };
    let body = content[start..end].trim_end();
    let mut out = String::with_capacity(content.len() + entry.len() + 4);
    out.push_str(&content[..start]);
    if !body.trim().is_empty() {
        out.push_str(body);
        out.push_str("\n\n");
    }
    out.push_str(entry);
    out.push_str("\n\n");
    out.push_str(&content[end..]);
    out
}

/// Replace the section body with `body`. A missing section is inserted
/// after the document title.
fn replace_section(content: &str, heading: &str, body: &str) -> String {
    if let Some((start, end)) = section_body(content, heading) {
        return format!("{}{body}\n\n{}", &content[..start], &content[end..]);
    }

    let mut offset = 0;
    for line in content.split_inclusive('\n') {
        offset += line.len();
        if line.starts_with("# ") {
            let mut out = String::from(&content[..offset]);
            if !line.ends_with('\n') {
                out.push('\n');
            }
            out.push_str(&format!("\n{heading}\n{body}\n\n"));
            out.push_str(content[offset..].trim_start_matches('\n'));
            return out;
        }
    }
    format!("{heading}\n{body}\n\n{content}")
}
