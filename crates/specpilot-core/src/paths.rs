use crate::error::{Result, SpecError};
use crate::types::{DocumentKind, Subfolder};
use std::path::{Path, PathBuf};

// ---------------------------------------------------------------------------
// Directory constants
// ---------------------------------------------------------------------------

pub const DEFAULT_SPECS_DIR: &str = ".specs";
pub const LEGACY_SPECS_DIR: &str = ".project-spec";

/// Spec-root names checked, in order, when locating an existing tree.
pub const SPEC_ROOT_CANDIDATES: &[&str] = &[DEFAULT_SPECS_DIR, LEGACY_SPECS_DIR, "specs", "specifications"];

pub const BACKUP_PREFIX: &str = "backup-";

pub const PROJECT_CONFIG_FILE: &str = "project.yaml";

// ---------------------------------------------------------------------------
// Path helpers
// ---------------------------------------------------------------------------

pub fn spec_root(target_dir: &Path, specs_name: &str) -> PathBuf {
    target_dir.join(specs_name)
}

pub fn subfolder_dir(spec_root: &Path, subfolder: Subfolder) -> PathBuf {
    spec_root.join(subfolder.dir_name())
}

/// Canonical location of a document in a generated (nested) tree.
pub fn document_path(spec_root: &Path, kind: DocumentKind) -> PathBuf {
    spec_root.join(kind.relative_path())
}

/// Location of a document in a flat tree (every file at the root).
pub fn flat_document_path(spec_root: &Path, kind: DocumentKind) -> PathBuf {
    spec_root.join(kind.filename())
}

/// Find an existing document: nested location first, then flat.
pub fn locate_document(spec_root: &Path, kind: DocumentKind) -> Option<PathBuf> {
    let nested = document_path(spec_root, kind);
    if nested.is_file() {
        return Some(nested);
    }
    let flat = flat_document_path(spec_root, kind);
    if flat.is_file() {
        return Some(flat);
    }
    None
}

/// Whether the tree uses the subfolder layout. A tree with none of the
/// subfolders is treated as flat (e.g. the output of a migration).
pub fn is_nested_tree(spec_root: &Path) -> bool {
    Subfolder::all()
        .iter()
        .any(|s| subfolder_dir(spec_root, *s).is_dir())
}

/// Where a missing document should be created in this tree.
pub fn creation_path(spec_root: &Path, kind: DocumentKind) -> PathBuf {
    if is_nested_tree(spec_root) {
        document_path(spec_root, kind)
    } else {
        flat_document_path(spec_root, kind)
    }
}

/// Return the first existing spec root under `project_dir`.
pub fn find_spec_root(project_dir: &Path) -> Option<PathBuf> {
    SPEC_ROOT_CANDIDATES
        .iter()
        .map(|name| project_dir.join(name))
        .find(|p| p.is_dir())
}

// ---------------------------------------------------------------------------
// Name validation
// ---------------------------------------------------------------------------

/// Project names become directory names, so reject anything that could
/// escape the target directory. Control characters are rejected too since
/// the name is also written on single lines of the generated documents.
pub fn validate_project_name(name: &str) -> Result<()> {
    let trimmed = name.trim();
    if trimmed.is_empty()
        || trimmed.contains('/')
        || trimmed.contains('\\')
        || trimmed == "."
        || trimmed == ".."
        || trimmed.chars().any(char::is_control)
    {
        return Err(SpecError::InvalidProjectName(name.to_string()));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
