pub mod add_specs;
pub mod init;
pub mod list;
pub mod migrate;
pub mod specify;
pub mod validate;

use anyhow::Context;
use specpilot_core::context::{AnalysisResult, GenerationOptions};
use specpilot_core::generator::GenerationReport;
use specpilot_core::types::{Framework, Language};
use std::path::Path;
use tracing::warn;

/// Flags shared by `init` and `add-specs` once the target is known.
pub struct GenerateFlags {
    pub lang: String,
    pub framework: Option<String>,
    pub author: Option<String>,
    pub description: Option<String>,
    pub analysis: Option<std::path::PathBuf>,
}

/// Check `--lang`/`--framework` and fold the flags into generation options.
/// An unknown language is an error; a framework the language has no
/// templates for only warns and falls back to the generic templates.
pub fn generation_options(
    project_name: &str,
    target_dir: &Path,
    flags: GenerateFlags,
) -> anyhow::Result<GenerationOptions> {
    let language: Language = flags.lang.parse()?;

    let framework = flags.framework.map(|fw| match fw.parse::<Framework>() {
        Ok(f) if language.supports(f) => f.as_str().to_string(),
        _ => {
            warn!(
                language = %language,
                framework = %fw,
                "framework not supported for language, using generic templates"
            );
            fw
        }
    });

    let mut options = GenerationOptions::new(project_name, language.as_str(), target_dir);
    options.framework = framework;
    options.author = flags.author;
    options.description = flags.description;
    if let Some(path) = flags.analysis {
        let analysis = AnalysisResult::load(&path)
            .with_context(|| format!("failed to load analysis from {}", path.display()))?;
        options = options.with_analysis(analysis);
    }
    Ok(options)
}

pub fn print_generated(report: &GenerationReport) {
    println!("Spec directory: {}", report.spec_root.display());
    for path in &report.files {
        let rel = path.strip_prefix(&report.spec_root).unwrap_or(path);
        println!("  created: {}", rel.display());
    }
}
