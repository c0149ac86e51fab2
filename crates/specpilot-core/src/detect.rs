//! Read project facts from the manifest already present in a directory.
//!
//! Manifests are tried in order: `package.json`, `pyproject.toml`,
//! `setup.py`, `requirements.txt`, then `pom.xml` / `build.gradle`. The first
//! one found wins; nothing found is `Ok(None)`.

use crate::error::Result;
use crate::io;
use crate::types::{Framework, Language};
use regex::Regex;
use serde::Serialize;
use serde_json::Value;
use std::path::Path;
use std::sync::OnceLock;

/// Dependency name to framework, checked in order. `next` comes before
/// `react` because every Next.js app also depends on React.
const NODE_FRAMEWORKS: &[(&str, Framework)] = &[
    ("next", Framework::Next),
    ("react", Framework::React),
    ("vue", Framework::Vue),
    ("@angular/core", Framework::Angular),
    ("@nestjs/core", Framework::Nest),
    ("express", Framework::Express),
];

const PYTHON_FRAMEWORKS: &[(&str, Framework)] = &[
    ("fastapi", Framework::FastApi),
    ("django", Framework::Django),
    ("flask", Framework::Flask),
    ("streamlit", Framework::Streamlit),
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectInfo {
    /// File the facts were read from.
    pub manifest: &'static str,
    pub name: Option<String>,
    pub version: Option<String>,
    pub language: Language,
    pub framework: Option<Framework>,
    pub author: Option<String>,
    pub description: Option<String>,
}

impl ProjectInfo {
    fn new(manifest: &'static str, language: Language) -> Self {
        Self {
            manifest,
            name: None,
            version: None,
            language,
            framework: None,
            author: None,
            description: None,
        }
    }
}

pub fn detect_project(dir: &Path) -> Result<Option<ProjectInfo>> {
    let read = |name: &str| -> Result<Option<String>> {
        let path = dir.join(name);
        if path.is_file() {
            io::read_to_string(&path).map(Some)
        } else {
            Ok(None)
        }
    };

    if let Some(data) = read("package.json")? {
        let typescript = dir.join("tsconfig.json").is_file();
        return from_package_json(&data, typescript).map(Some);
    }
    if let Some(data) = read("pyproject.toml")? {
        return from_pyproject(&data).map(Some);
    }
    if let Some(data) = read("setup.py")? {
        return Ok(Some(from_setup_py(&data)));
    }
    if let Some(data) = read("requirements.txt")? {
        let mut info = ProjectInfo::new("requirements.txt", Language::Python);
        info.framework = framework_in_text(&data, PYTHON_FRAMEWORKS);
        return Ok(Some(info));
    }
    for manifest in ["pom.xml", "build.gradle"] {
        if let Some(data) = read(manifest)? {
            let mut info = ProjectInfo::new(manifest, Language::Java);
            if data.contains("spring-boot") {
                info.framework = Some(Framework::SpringBoot);
            }
            return Ok(Some(info));
        }
    }
    Ok(None)
}

// ---------------------------------------------------------------------------
// Node
// ---------------------------------------------------------------------------

fn from_package_json(data: &str, has_tsconfig: bool) -> Result<ProjectInfo> {
    let pkg: Value = serde_json::from_str(data)?;
    let has_dep = |name: &str| {
        ["dependencies", "devDependencies"]
            .iter()
            .any(|section| pkg.get(section).and_then(|deps| deps.get(name)).is_some())
    };

    let language = if has_tsconfig || has_dep("typescript") {
        Language::TypeScript
    } else {
        Language::JavaScript
    };
    let mut info = ProjectInfo::new("package.json", language);
    // Scoped packages (`@org/app`) keep only the package part.
    info.name = json_str(&pkg, "name").map(|n| n.rsplit('/').next().unwrap_or(&n).to_string());
    info.version = json_str(&pkg, "version");
    info.description = json_str(&pkg, "description");
    info.author = match pkg.get("author") {
        Some(Value::String(s)) => non_empty(s),
        Some(Value::Object(obj)) => obj.get("name").and_then(Value::as_str).and_then(non_empty),
        _ => None,
    };
    info.framework = NODE_FRAMEWORKS
        .iter()
        .filter(|(_, fw)| language.supports(*fw))
        .find(|(dep, _)| has_dep(*dep))
        .map(|(_, fw)| *fw);
    Ok(info)
}

fn json_str(value: &Value, key: &str) -> Option<String> {
    value.get(key).and_then(Value::as_str).and_then(non_empty)
}

// ---------------------------------------------------------------------------
// Python
// ---------------------------------------------------------------------------

/// PEP 621 `[project]` first, then `[tool.poetry]`.
fn from_pyproject(data: &str) -> Result<ProjectInfo> {
    let doc: toml::Table = toml::from_str(data)?;
    let project = doc.get("project").and_then(toml::Value::as_table);
    let poetry = doc
        .get("tool")
        .and_then(|tool| tool.get("poetry"))
        .and_then(toml::Value::as_table);
    let tables = [project, poetry];

    let mut info = ProjectInfo::new("pyproject.toml", Language::Python);
    info.name = toml_str(&tables, "name");
    info.version = toml_str(&tables, "version");
    info.description = toml_str(&tables, "description");
    info.author = toml_field(&tables, "authors")
        .and_then(toml::Value::as_array)
        .and_then(|authors| authors.first())
        .and_then(|author| match author {
            toml::Value::String(s) => Some(strip_email(s)),
            toml::Value::Table(t) => t.get("name").and_then(toml::Value::as_str).map(str::to_string),
            _ => None,
        })
        .and_then(|a| non_empty(&a));
    info.framework = framework_in_text(data, PYTHON_FRAMEWORKS);
    Ok(info)
}

fn toml_field<'a>(tables: &[Option<&'a toml::Table>], key: &str) -> Option<&'a toml::Value> {
    tables.iter().flatten().find_map(|t| t.get(key))
}

fn toml_str(tables: &[Option<&toml::Table>], key: &str) -> Option<String> {
    toml_field(tables, key)
        .and_then(toml::Value::as_str)
        .and_then(non_empty)
}

static SETUP_FIELD_RE: OnceLock<Regex> = OnceLock::new();

fn from_setup_py(data: &str) -> ProjectInfo {
    let re = SETUP_FIELD_RE.get_or_init(|| {
        Regex::new(r#"\b(name|version|author|description)\s*=\s*["']([^"']*)["']"#)
            .expect("setup.py field pattern is valid")
    });

    let mut info = ProjectInfo::new("setup.py", Language::Python);
    for caps in re.captures_iter(data) {
        let slot = match &caps[1] {
            "name" => &mut info.name,
            "version" => &mut info.version,
            "author" => &mut info.author,
            _ => &mut info.description,
        };
        if slot.is_none() {
            *slot = non_empty(&caps[2]);
        }
    }
    info.framework = framework_in_text(data, PYTHON_FRAMEWORKS);
    info
}

// ---------------------------------------------------------------------------
// Shared
// ---------------------------------------------------------------------------

fn framework_in_text(text: &str, table: &[(&str, Framework)]) -> Option<Framework> {
    let lower = text.to_lowercase();
    table
        .iter()
        .find(|(needle, _)| lower.contains(*needle))
        .map(|(_, fw)| *fw)
}

/// `"Ada Lovelace <ada@example.com>"` -> `"Ada Lovelace"`.
fn strip_email(author: &str) -> String {
    author.split('<').next().unwrap_or(author).trim().to_string()
}

fn non_empty(s: &str) -> Option<String> {
    let s = s.trim();
    (!s.is_empty()).then(|| s.to_string())
}
