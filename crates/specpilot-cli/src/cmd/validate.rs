use crate::output::{print_json, print_list};
use anyhow::Context;
use specpilot_core::validator::{SpecValidator, ValidationOptions};
use std::path::Path;

pub fn run(root: &Path, fix: bool, verbose: bool, json: bool) -> anyhow::Result<()> {
    let result = SpecValidator::new()
        .validate(root, ValidationOptions { fix, verbose })
        .with_context(|| format!("failed to validate {}", root.display()))?;

    if json {
        print_json(&result)?;
    } else {
        print_list("Fixes applied", &result.fixes_applied);
        print_list("Errors", &result.errors);
        print_list("Warnings", &result.warnings);
        if !result.is_valid && !fix && !result.fixable.is_empty() {
            println!("Run with --fix to repair: {}", result.fixable.join(", "));
        }

        if verbose {
            println!("Files checked:     {}", result.files_checked);
            println!("Errors:            {}", result.errors.len());
            println!("Warnings:          {}", result.warnings.len());
            println!(
                "Mandates verified: {} (project.yaml: {}, prompts.md: {})",
                result.mandates_verified,
                yes_no(result.mandate_checks.project_config),
                yes_no(result.mandate_checks.prompts_log),
            );
        }

        if result.is_valid {
            println!("Specification is valid.");
        }
    }

    if !result.is_valid {
        anyhow::bail!("validation failed with {} error(s)", result.errors.len());
    }
    Ok(())
}

fn yes_no(b: bool) -> &'static str {
    if b {
        "yes"
    } else {
        "no"
    }
}
