use super::{generation_options, print_generated, GenerateFlags};
use crate::output::print_json;
use anyhow::Context;
use specpilot_core::detect::{detect_project, ProjectInfo};
use specpilot_core::generator::SpecGenerator;
use specpilot_core::types::Language;
use specpilot_core::{paths, SpecError};
use std::path::{Path, PathBuf};
use tracing::info;

pub struct AddSpecsArgs {
    pub name: Option<String>,
    pub lang: Option<String>,
    pub framework: Option<String>,
    pub author: Option<String>,
    pub description: Option<String>,
    pub analysis: Option<PathBuf>,
}

/// Add a spec tree to an existing project. Flags win; anything left unset
/// is taken from the project manifest when one is found.
pub fn run(dir: &Path, args: AddSpecsArgs, json: bool) -> anyhow::Result<()> {
    if !dir.is_dir() {
        anyhow::bail!("project directory {} does not exist", dir.display());
    }
    let spec_root = paths::spec_root(dir, paths::DEFAULT_SPECS_DIR);
    if spec_root.exists() {
        return Err(SpecError::SpecRootExists(spec_root).into());
    }

    let detected = detect_project(dir)
        .with_context(|| format!("failed to read project manifest in {}", dir.display()))?;
    if let Some(info) = &detected {
        info!(manifest = info.manifest, language = %info.language, "detected project");
    }

    let lang = match (args.lang, &detected) {
        (Some(lang), _) => lang,
        (None, Some(info)) => info.language.as_str().to_string(),
        (None, None) => anyhow::bail!(
            "could not detect the project language in {}; pass --lang",
            dir.display()
        ),
    };
    // A detected framework only applies when the language matches.
    let same_language = |info: &&ProjectInfo| {
        lang.parse::<Language>().is_ok_and(|l| l == info.language)
    };
    let framework = args.framework.or_else(|| {
        detected
            .as_ref()
            .filter(same_language)
            .and_then(|info| info.framework)
            .map(|fw| fw.as_str().to_string())
    });

    let detected_name = detected.as_ref().and_then(|info| info.name.clone());
    let name = match args.name.or(detected_name) {
        Some(name) => name,
        None => dir
            .canonicalize()
            .ok()
            .and_then(|p| p.file_name().map(|n| n.to_string_lossy().into_owned()))
            .unwrap_or_else(|| "project".to_string()),
    };
    paths::validate_project_name(&name)?;

    let (author, description) = match &detected {
        Some(info) => (
            args.author.or_else(|| info.author.clone()),
            args.description.or_else(|| info.description.clone()),
        ),
        None => (args.author, args.description),
    };

    let options = generation_options(
        name.trim(),
        dir,
        GenerateFlags {
            lang,
            framework,
            author,
            description,
            analysis: args.analysis,
        },
    )?;
    let report = SpecGenerator::new()
        .generate_specs(&options)
        .context("failed to generate specs")?;

    if json {
        return print_json(&report);
    }

    if let Some(info) = &detected {
        println!("Detected {} ({})", info.manifest, info.language);
    }
    println!("Added specs for {} to {}", options.project_name, dir.display());
    print_generated(&report);
    Ok(())
}
