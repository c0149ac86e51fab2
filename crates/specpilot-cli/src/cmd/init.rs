use super::{generation_options, print_generated, GenerateFlags};
use crate::output::print_json;
use anyhow::Context;
use specpilot_core::generator::SpecGenerator;
use specpilot_core::{io, paths};
use std::path::{Path, PathBuf};

pub struct InitArgs {
    pub name: String,
    pub lang: String,
    pub framework: Option<String>,
    pub specs_name: String,
    pub author: Option<String>,
    pub description: Option<String>,
    pub analysis: Option<PathBuf>,
}

pub fn run(dir: &Path, args: InitArgs, json: bool) -> anyhow::Result<()> {
    paths::validate_project_name(&args.name)?;
    let project_dir = dir.join(args.name.trim());

    let options = generation_options(
        args.name.trim(),
        &project_dir,
        GenerateFlags {
            lang: args.lang,
            framework: args.framework,
            author: args.author,
            description: args.description,
            analysis: args.analysis,
        },
    )?
    .with_specs_name(args.specs_name);

    io::ensure_dir(&project_dir)
        .with_context(|| format!("failed to create {}", project_dir.display()))?;
    let report = SpecGenerator::new()
        .generate_specs(&options)
        .with_context(|| format!("failed to generate specs for '{}'", options.project_name))?;

    if json {
        return print_json(&report);
    }

    println!("Initialized {} in {}", options.project_name, project_dir.display());
    print_generated(&report);
    println!("\nNext steps:");
    println!("  cd {}", project_dir.display());
    println!("  specpilot specify \"<what you want to build>\"");
    println!("  specpilot validate");
    Ok(())
}
