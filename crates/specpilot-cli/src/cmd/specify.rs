use crate::output::print_json;
use anyhow::Context;
use specpilot_core::specify::{specify, SpecifyOptions};
use std::path::Path;

pub fn run(root: &Path, description: &str, update: bool, json: bool) -> anyhow::Result<()> {
    let report = specify(root, description, SpecifyOptions { update })
        .with_context(|| format!("failed to record description in {}", root.display()))?;

    if json {
        return print_json(&report);
    }

    if report.regenerated {
        println!(
            "Regenerated specs for {} ({})",
            report.project_name, report.language
        );
    }
    for path in &report.updated {
        let rel = path.strip_prefix(&report.spec_root).unwrap_or(path);
        println!("  updated: {}", rel.display());
    }
    Ok(())
}
