use specpilot_core::paths::SPEC_ROOT_CANDIDATES;
use std::path::{Path, PathBuf};

/// Resolve the project directory that holds (or should hold) the spec tree.
///
/// Priority:
/// 1. `--dir` flag / `SPECPILOT_DIR` env var (passed in as `explicit`)
/// 2. Walk upward from `cwd` looking for a spec directory
/// 3. Walk upward from `cwd` looking for `.git/`
/// 4. Fall back to `cwd`
pub fn resolve_root(explicit: Option<&Path>) -> PathBuf {
    if let Some(p) = explicit {
        return p.to_path_buf();
    }

    let cwd = current_dir();
    find_upward(&cwd, |dir| {
        SPEC_ROOT_CANDIDATES
            .iter()
            .any(|name| dir.join(name).is_dir())
    })
    .or_else(|| find_upward(&cwd, |dir| dir.join(".git").is_dir()))
    .unwrap_or(cwd)
}

/// Directory for commands that create a tree: the explicit one or `cwd`,
/// never a parent.
pub fn project_dir(explicit: Option<&Path>) -> PathBuf {
    explicit.map(Path::to_path_buf).unwrap_or_else(current_dir)
}

fn current_dir() -> PathBuf {
    std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."))
}

fn find_upward(start: &Path, found: impl Fn(&Path) -> bool) -> Option<PathBuf> {
    start.ancestors().find(|dir| found(dir)).map(Path::to_path_buf)
}
