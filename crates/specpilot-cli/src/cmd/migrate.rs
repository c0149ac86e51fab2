use crate::output::{print_json, print_list};
use anyhow::Context;
use serde::Serialize;
use specpilot_core::migrator::{MigrationOptions, MigrationReason, MigrationResult, ProjectMigrator};
use specpilot_core::types::LayoutKind;
use std::path::{Path, PathBuf};

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct MigrateOutput {
    #[serde(skip_serializing_if = "Option::is_none")]
    backup: Option<PathBuf>,
    #[serde(flatten)]
    result: MigrationResult,
}

pub fn run(root: &Path, from: &str, to: &str, backup: bool, json: bool) -> anyhow::Result<()> {
    let from: LayoutKind = from.parse()?;
    let to: LayoutKind = to.parse()?;
    let migrator = ProjectMigrator::new();

    let check = migrator.check_migration_needed(root, from, to);
    match check.reason {
        MigrationReason::NoSource => {
            if !json {
                println!("Nothing to migrate from {}.", root.join(from.dir_name()).display());
                println!("Create a new spec tree with `specpilot add-specs` instead.");
            }
            anyhow::bail!("{}", check.message);
        }
        MigrationReason::AlreadyMigrated => {
            if json {
                return print_json(&check);
            }
            println!("{}", check.message);
            return Ok(());
        }
        MigrationReason::Ready => {}
    }

    let backup = if backup {
        let path = migrator
            .create_backup(root)
            .context("failed to create backup")?;
        if !json {
            println!("Backup created: {}", path.display());
        }
        Some(path)
    } else {
        None
    };

    let result = migrator
        .migrate(root, MigrationOptions { from, to })
        .with_context(|| format!("failed to migrate {from} to {to}"))?;

    if json {
        return print_json(&MigrateOutput { backup, result });
    }

    println!("Migrated {from} -> {to}");
    println!("  files migrated: {}", result.files_migrated);
    println!("  files merged:   {}", result.files_merged);
    println!("  files created:  {}", result.files_created);
    print_list("Warnings", &result.warnings);
    Ok(())
}
