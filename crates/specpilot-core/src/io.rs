use crate::error::{Result, SpecError};
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// Write `data` to `path` through a tempfile in the same directory, creating
/// parent directories as needed. The whole file is replaced.
pub fn atomic_write(path: &Path, data: &[u8]) -> Result<()> {
    if let Some(parent) = path.parent() {
        ensure_dir(parent)?;
    }
    let dir = path.parent().unwrap_or(Path::new("."));
    let mut tmp = NamedTempFile::new_in(dir).map_err(|e| SpecError::io(path, e))?;
    tmp.write_all(data).map_err(|e| SpecError::io(path, e))?;
    tmp.persist(path).map_err(|e| SpecError::io(path, e.error))?;
    Ok(())
}

/// Create a directory and all parents, idempotent.
pub fn ensure_dir(path: &Path) -> Result<()> {
    std::fs::create_dir_all(path).map_err(|e| SpecError::io(path, e))
}

/// Write a file only if it does not already exist. Returns true if written.
pub fn write_if_missing(path: &Path, data: &[u8]) -> Result<bool> {
    if path.exists() {
        return Ok(false);
    }
    atomic_write(path, data)?;
    Ok(true)
}

pub fn read_to_string(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).map_err(|e| SpecError::io(path, e))
}

/// Byte-for-byte copy, creating the destination's parent directories.
pub fn copy_file(from: &Path, to: &Path) -> Result<()> {
    if let Some(parent) = to.parent() {
        ensure_dir(parent)?;
    }
    std::fs::copy(from, to).map_err(|e| SpecError::io(from, e))?;
    Ok(())
}

/// Append `source` to `target` after a horizontal-rule separator.
pub fn append_with_separator(target: &Path, source: &Path) -> Result<()> {
    let source_content = read_to_string(source)?;
    let target_content = read_to_string(target)?;
    let merged = format!("{target_content}\n\n---\n\n{source_content}");
    atomic_write(target, merged.as_bytes())
}

/// Recursively copy the contents of `from` into `to`. Top-level entries for
/// which `skip` returns true are not copied. Returns the number of files
/// copied.
pub fn copy_dir_filtered(from: &Path, to: &Path, skip: impl Fn(&str) -> bool) -> Result<usize> {
    ensure_dir(to)?;
    let mut copied = 0;
    let walker = walkdir::WalkDir::new(from)
        .min_depth(1)
        .follow_links(false)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|e| {
            e.depth() != 1 || !skip(&e.file_name().to_string_lossy())
        });
    for entry in walker {
        let entry = entry?;
        let rel = relative_to(entry.path(), from);
        let dest = to.join(&rel);
        if entry.file_type().is_dir() {
            ensure_dir(&dest)?;
        } else if entry.file_type().is_file() {
            copy_file(entry.path(), &dest)?;
            copied += 1;
        }
    }
    Ok(copied)
}

fn relative_to(path: &Path, base: &Path) -> PathBuf {
    path.strip_prefix(base)
        .map(Path::to_path_buf)
        .unwrap_or_else(|_| path.to_path_buf())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn atomic_write_creates_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("project.yaml");
        atomic_write(&path, b"name: demo").unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "name: demo");
    }

    #[test]
    fn atomic_write_creates_parents() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("a/b/c/tasks.md");
        atomic_write(&path, b"data").unwrap();
        assert!(path.exists());
    }

    #[test]
    fn atomic_write_overwrites() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("docs.md");
        atomic_write(&path, b"first").unwrap();
        atomic_write(&path, b"second").unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "second");
    }

    #[test]
    fn write_if_missing_skips_existing() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("existing.txt");
        std::fs::write(&path, b"original").unwrap();
        let written = write_if_missing(&path, b"new").unwrap();
        assert!(!written);
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "original");
    }

    #[test]
    fn read_error_names_path() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("missing.md");
        let err = read_to_string(&path).unwrap_err();
        assert!(err.to_string().contains("missing.md"));
    }

    #[test]
    fn append_with_separator_concatenates() {
        let dir = TempDir::new().unwrap();
        let target = dir.path().join("target.md");
        let source = dir.path().join("source.md");
        std::fs::write(&target, "old").unwrap();
        std::fs::write(&source, "new").unwrap();
        append_with_separator(&target, &source).unwrap();
        assert_eq!(
            std::fs::read_to_string(&target).unwrap(),
            "old\n\n---\n\nnew"
        );
    }

    #[test]
    fn copy_dir_filtered_skips_top_level_matches() {
        let dir = TempDir::new().unwrap();
        let src = dir.path().join("src");
        std::fs::create_dir_all(src.join("nested")).unwrap();
        std::fs::create_dir_all(src.join("skipme")).unwrap();
        std::fs::write(src.join("a.txt"), "a").unwrap();
        std::fs::write(src.join("nested/b.txt"), "b").unwrap();
        std::fs::write(src.join("skipme/c.txt"), "c").unwrap();

        let dst = dir.path().join("dst");
        let copied = copy_dir_filtered(&src, &dst, |name| name == "skipme").unwrap();
        assert_eq!(copied, 2);
        assert!(dst.join("a.txt").exists());
        assert!(dst.join("nested/b.txt").exists());
        assert!(!dst.join("skipme").exists());
    }
}
