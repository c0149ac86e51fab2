use crate::defaults::{default_content, DEFAULT_LANGUAGE};
use crate::error::{Result, SpecError};
use crate::types::{DocumentKind, LayoutKind};
use crate::{io, paths};
use chrono::Utc;
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use walkdir::WalkDir;

/// Legacy nested locations and the document each one becomes.
const NESTED_SOURCES: &[(&str, DocumentKind)] = &[
    ("config/project.yaml", DocumentKind::ProjectConfig),
    ("specs/architecture/architecture.md", DocumentKind::Architecture),
    ("specs/features/requirements.md", DocumentKind::Requirements),
    ("specs/technical/api.yaml", DocumentKind::Api),
    ("specs/technical/tests.md", DocumentKind::Tests),
    ("tools/tasks.md", DocumentKind::Tasks),
    ("docs/context.md", DocumentKind::Context),
    ("docs/prompts.md", DocumentKind::Prompts),
    ("docs/docs.md", DocumentKind::Docs),
];

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MigrationReason {
    NoSource,
    AlreadyMigrated,
    Ready,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MigrationCheck {
    pub needed: bool,
    pub reason: MigrationReason,
    pub message: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MigrationOptions {
    pub from: LayoutKind,
    pub to: LayoutKind,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MigrationResult {
    pub files_migrated: usize,
    pub files_merged: usize,
    pub files_created: usize,
    pub warnings: Vec<String>,
}

// ---------------------------------------------------------------------------
// ProjectMigrator
// ---------------------------------------------------------------------------

#[derive(Debug, Default)]
pub struct ProjectMigrator;

impl ProjectMigrator {
    pub fn new() -> Self {
        Self
    }

    pub fn check_migration_needed(
        &self,
        project_dir: &Path,
        from: LayoutKind,
        to: LayoutKind,
    ) -> MigrationCheck {
        let source = project_dir.join(from.dir_name());
        let target = project_dir.join(to.dir_name());

        if !source.is_dir() {
            return MigrationCheck {
                needed: false,
                reason: MigrationReason::NoSource,
                message: format!(
                    "Source structure \"{from}\" not found. The directory {} does not exist.",
                    source.display()
                ),
            };
        }
        if target.exists() {
            return MigrationCheck {
                needed: false,
                reason: MigrationReason::AlreadyMigrated,
                message: format!(
                    "Target structure \"{to}\" already exists at {}.",
                    target.display()
                ),
            };
        }
        MigrationCheck {
            needed: true,
            reason: MigrationReason::Ready,
            message: "Migration can proceed".to_string(),
        }
    }

    /// Convert the tree for `options.from` into the tree for `options.to`.
    /// Failures on individual files become warnings; a missing source or a
    /// migration onto the same layout is an error.
    pub fn migrate(&self, project_dir: &Path, options: MigrationOptions) -> Result<MigrationResult> {
        if options.from == options.to {
            return Err(SpecError::SameLayout(options.from.to_string()));
        }
        let source = project_dir.join(options.from.dir_name());
        let target = project_dir.join(options.to.dir_name());
        if !source.is_dir() {
            return Err(SpecError::MigrationSourceMissing(source));
        }
        io::ensure_dir(&target)?;

        let mut result = MigrationResult::default();
        match options.from {
            LayoutKind::Nested => {
                self.migrate_from_nested(&source, &target, &mut result);
                self.create_missing_files(project_dir, &target, &mut result)?;
            }
            LayoutKind::Flat => self.migrate_from_flat(&source, &target, &mut result),
        }
        Ok(result)
    }

    fn migrate_from_nested(&self, source: &Path, target: &Path, result: &mut MigrationResult) {
        for entry in WalkDir::new(source).min_depth(1).follow_links(false).sort_by_file_name() {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    let rel = e
                        .path()
                        .map_or_else(|| source.display().to_string(), |p| relative_path(p, source));
                    file_failed(&rel, &e, result);
                    continue;
                }
            };
            if !entry.file_type().is_file() {
                continue;
            }
            let rel = relative_path(entry.path(), source);
            let Some(kind) = map_nested_file(&rel) else {
                debug!(file = %rel, "no flat counterpart, skipping");
                continue;
            };

            let dest = paths::flat_document_path(target, kind);
            let merge = dest.exists();
            let outcome = if merge {
                io::append_with_separator(&dest, entry.path())
            } else {
                io::copy_file(entry.path(), &dest)
            };
            match outcome {
                Ok(()) if merge => result.files_merged += 1,
                Ok(()) => result.files_migrated += 1,
                Err(e) => file_failed(&rel, &e, result),
            }
        }
    }

    fn migrate_from_flat(&self, source: &Path, target: &Path, result: &mut MigrationResult) {
        for entry in WalkDir::new(source).min_depth(1).follow_links(false).sort_by_file_name() {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    let rel = e
                        .path()
                        .map_or_else(|| source.display().to_string(), |p| relative_path(p, source));
                    file_failed(&rel, &e, result);
                    continue;
                }
            };
            if !entry.file_type().is_file() {
                continue;
            }
            let rel = relative_path(entry.path(), source);
            let dest = target.join(&rel);
            if dest.exists() {
                result.warnings.push(format!("Target file {rel} already exists, skipping"));
                continue;
            }
            match io::copy_file(entry.path(), &dest) {
                Ok(()) => result.files_migrated += 1,
                Err(e) => file_failed(&rel, &e, result),
            }
        }
    }

    /// Back-fill required documents the source did not provide.
    fn create_missing_files(&self, project_dir: &Path, target: &Path, result: &mut MigrationResult) -> Result<()> {
        let project_name = project_dir
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "migrated-project".to_string());
        for kind in DocumentKind::required() {
            let path = paths::flat_document_path(target, *kind);
            let content = default_content(*kind, &project_name, DEFAULT_LANGUAGE);
            if io::write_if_missing(&path, content.as_bytes())? {
                result.files_created += 1;
            }
        }
        Ok(())
    }

    /// Copy everything in `project_dir` into a fresh `backup-<timestamp>`
    /// directory inside it. Earlier backups are not copied.
    pub fn create_backup(&self, project_dir: &Path) -> Result<PathBuf> {
        let stamp = Utc::now().format("%Y-%m-%dT%H-%M-%S-%3fZ");
        let backup = project_dir.join(format!("{}{stamp}", paths::BACKUP_PREFIX));
        let copied = io::copy_dir_filtered(project_dir, &backup, |name| {
            name.starts_with(paths::BACKUP_PREFIX)
        })?;
        debug!(path = %backup.display(), files = copied, "created backup");
        Ok(backup)
    }
}

/// A file that could not be read or written is recorded and skipped.
fn file_failed(rel: &str, error: &dyn std::fmt::Display, result: &mut MigrationResult) {
    warn!(file = %rel, error = %error, "migration of file failed");
    result.warnings.push(format!("Failed to migrate {rel}: {error}"));
}

/// Document a nested-layout file maps to: by full relative path first,
/// then by file name.
fn map_nested_file(rel: &str) -> Option<DocumentKind> {
    if let Some((_, kind)) = NESTED_SOURCES.iter().find(|(path, _)| *path == rel) {
        return Some(*kind);
    }
    let name = rel.rsplit('/').next().unwrap_or(rel);
    DocumentKind::from_filename(name).filter(|kind| kind.is_required())
}

/// `/`-separated path of `path` relative to `base`.
fn relative_path(path: &Path, base: &Path) -> String {
    let rel = path.strip_prefix(base).unwrap_or(path);
    rel.components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}
