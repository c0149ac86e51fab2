use crate::error::SpecError;
use crate::paths;
use serde::{Deserialize, Serialize};
use std::fmt;

// ---------------------------------------------------------------------------
// Language
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    TypeScript,
    JavaScript,
    Python,
    Java,
}

impl Language {
    pub fn all() -> &'static [Language] {
        &[
            Language::TypeScript,
            Language::JavaScript,
            Language::Python,
            Language::Java,
        ]
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Language::TypeScript => "typescript",
            Language::JavaScript => "javascript",
            Language::Python => "python",
            Language::Java => "java",
        }
    }

    /// Frameworks offered for this language, in display order.
    pub fn frameworks(self) -> &'static [Framework] {
        match self {
            Language::TypeScript => &[
                Framework::React,
                Framework::Express,
                Framework::Next,
                Framework::Nest,
                Framework::Vue,
                Framework::Angular,
                Framework::Cli,
            ],
            Language::JavaScript => &[
                Framework::React,
                Framework::Express,
                Framework::Next,
                Framework::Vue,
            ],
            Language::Python => &[
                Framework::FastApi,
                Framework::Django,
                Framework::Flask,
                Framework::Streamlit,
                Framework::DataScience,
            ],
            Language::Java => &[
                Framework::SpringBoot,
                Framework::SpringMvc,
                Framework::Android,
            ],
        }
    }

    pub fn supports(self, framework: Framework) -> bool {
        self.frameworks().contains(&framework)
    }

    pub fn build_command(self) -> &'static str {
        match self {
            Language::TypeScript | Language::JavaScript => "npm run build",
            Language::Python => "python -m build",
            Language::Java => "mvn package",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Language {
    type Err = SpecError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "typescript" | "ts" => Ok(Language::TypeScript),
            "javascript" | "js" => Ok(Language::JavaScript),
            "python" | "py" => Ok(Language::Python),
            "java" => Ok(Language::Java),
            _ => Err(SpecError::UnknownLanguage(s.to_string())),
        }
    }
}

// ---------------------------------------------------------------------------
// Framework
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Framework {
    React,
    Express,
    Next,
    Nest,
    Vue,
    Angular,
    Cli,
    #[serde(rename = "fastapi")]
    FastApi,
    Django,
    Flask,
    Streamlit,
    DataScience,
    SpringBoot,
    SpringMvc,
    Android,
}

impl Framework {
    pub fn as_str(self) -> &'static str {
        match self {
            Framework::React => "react",
            Framework::Express => "express",
            Framework::Next => "next",
            Framework::Nest => "nest",
            Framework::Vue => "vue",
            Framework::Angular => "angular",
            Framework::Cli => "cli",
            Framework::FastApi => "fastapi",
            Framework::Django => "django",
            Framework::Flask => "flask",
            Framework::Streamlit => "streamlit",
            Framework::DataScience => "data-science",
            Framework::SpringBoot => "spring-boot",
            Framework::SpringMvc => "spring-mvc",
            Framework::Android => "android",
        }
    }

    /// Architecture style suggested in the framework-specific template.
    pub fn architecture_style(self) -> &'static str {
        match self {
            Framework::React | Framework::Vue | Framework::Angular => {
                "Component-based single-page application"
            }
            Framework::Next => "Full-stack application with server-side rendering",
            Framework::Express | Framework::Flask => "Layered REST API (routes, services, data access)",
            Framework::Nest | Framework::SpringBoot => "Modular service with dependency injection",
            Framework::FastApi => "Async REST API with typed request/response models",
            Framework::Django | Framework::SpringMvc => "Model-View-Controller web application",
            Framework::Streamlit => "Interactive data application",
            Framework::DataScience => "Notebook-driven data pipeline",
            Framework::Cli => "Command-line tool (argument parsing, commands, output)",
            Framework::Android => "Activity/ViewModel mobile application",
        }
    }

    pub fn runtime_dependencies(self) -> &'static [&'static str] {
        match self {
            Framework::React => &["react", "react-dom"],
            Framework::Express => &["express", "cors", "helmet"],
            Framework::Next => &["next", "react", "react-dom"],
            Framework::Nest => &["@nestjs/core", "@nestjs/common"],
            Framework::Vue => &["vue"],
            Framework::Angular => &["@angular/core"],
            Framework::Cli => &["commander"],
            Framework::FastApi => &["fastapi", "uvicorn"],
            Framework::Django => &["django"],
            Framework::Flask => &["flask"],
            Framework::Streamlit => &["streamlit"],
            Framework::DataScience => &["pandas", "scikit-learn", "jupyter"],
            Framework::SpringBoot => &["spring-boot-starter-web"],
            Framework::SpringMvc => &["spring-webmvc"],
            Framework::Android => &["androidx.appcompat"],
        }
    }

    pub fn development_dependencies(self) -> &'static [&'static str] {
        match self {
            Framework::React => &["@types/react", "@types/react-dom", "typescript", "vite"],
            Framework::Express => &[
                "@types/express",
                "@types/cors",
                "@types/helmet",
                "typescript",
                "ts-node",
            ],
            Framework::FastApi => &["pytest", "httpx"],
            Framework::Django => &["pytest-django"],
            _ => &[],
        }
    }
}

impl fmt::Display for Framework {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Framework {
    type Err = SpecError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "react" => Ok(Framework::React),
            "express" => Ok(Framework::Express),
            "next" | "nextjs" => Ok(Framework::Next),
            "nest" | "nestjs" => Ok(Framework::Nest),
            "vue" => Ok(Framework::Vue),
            "angular" => Ok(Framework::Angular),
            "cli" => Ok(Framework::Cli),
            "fastapi" => Ok(Framework::FastApi),
            "django" => Ok(Framework::Django),
            "flask" => Ok(Framework::Flask),
            "streamlit" => Ok(Framework::Streamlit),
            "data-science" => Ok(Framework::DataScience),
            "spring-boot" | "spring" => Ok(Framework::SpringBoot),
            "spring-mvc" => Ok(Framework::SpringMvc),
            "android" => Ok(Framework::Android),
            _ => Err(SpecError::UnknownFramework(s.to_string())),
        }
    }
}

// ---------------------------------------------------------------------------
// Subfolder
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Subfolder {
    Project,
    Architecture,
    Planning,
    Quality,
    Development,
}

impl Subfolder {
    pub fn all() -> &'static [Subfolder] {
        &[
            Subfolder::Project,
            Subfolder::Architecture,
            Subfolder::Planning,
            Subfolder::Quality,
            Subfolder::Development,
        ]
    }

    pub fn dir_name(self) -> &'static str {
        match self {
            Subfolder::Project => "project",
            Subfolder::Architecture => "architecture",
            Subfolder::Planning => "planning",
            Subfolder::Quality => "quality",
            Subfolder::Development => "development",
        }
    }
}

// ---------------------------------------------------------------------------
// DocumentKind
// ---------------------------------------------------------------------------

/// Every document the tool knows about. Filenames, locations and which
/// documents are required all come from here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentKind {
    Readme,
    ProjectConfig,
    Requirements,
    Architecture,
    Api,
    Tasks,
    Roadmap,
    Docs,
    Context,
    ProjectPlan,
    Prompts,
    Tests,
    SpecUpdateTemplate,
}

impl DocumentKind {
    /// Generation order. README goes first so an early failure still leaves
    /// a tree that explains itself.
    pub fn all() -> &'static [DocumentKind] {
        &[
            DocumentKind::Readme,
            DocumentKind::ProjectConfig,
            DocumentKind::Requirements,
            DocumentKind::Architecture,
            DocumentKind::Api,
            DocumentKind::Tasks,
            DocumentKind::Roadmap,
            DocumentKind::Docs,
            DocumentKind::Context,
            DocumentKind::ProjectPlan,
            DocumentKind::Prompts,
            DocumentKind::Tests,
            DocumentKind::SpecUpdateTemplate,
        ]
    }

    /// The documents every spec tree must contain, in validation order.
    pub fn required() -> &'static [DocumentKind] {
        &[
            DocumentKind::ProjectConfig,
            DocumentKind::Architecture,
            DocumentKind::Requirements,
            DocumentKind::Api,
            DocumentKind::Tests,
            DocumentKind::Tasks,
            DocumentKind::Context,
            DocumentKind::Prompts,
            DocumentKind::Docs,
        ]
    }

    pub fn required_filenames() -> Vec<&'static str> {
        Self::required().iter().map(|k| k.filename()).collect()
    }

    pub fn is_required(self) -> bool {
        Self::required().contains(&self)
    }

    pub fn filename(self) -> &'static str {
        match self {
            DocumentKind::Readme => "README.md",
            DocumentKind::ProjectConfig => paths::PROJECT_CONFIG_FILE,
            DocumentKind::Requirements => "requirements.md",
            DocumentKind::Architecture => "architecture.md",
            DocumentKind::Api => "api.yaml",
            DocumentKind::Tasks => "tasks.md",
            DocumentKind::Roadmap => "roadmap.md",
            DocumentKind::Docs => "docs.md",
            DocumentKind::Context => "context.md",
            DocumentKind::ProjectPlan => "project-plan.md",
            DocumentKind::Prompts => "prompts.md",
            DocumentKind::Tests => "tests.md",
            DocumentKind::SpecUpdateTemplate => "spec-update-template.md",
        }
    }

    /// Subfolder in a nested tree; `None` for documents kept at the root.
    pub fn subfolder(self) -> Option<Subfolder> {
        match self {
            DocumentKind::Readme | DocumentKind::SpecUpdateTemplate => None,
            DocumentKind::ProjectConfig
            | DocumentKind::Requirements
            | DocumentKind::ProjectPlan => Some(Subfolder::Project),
            DocumentKind::Architecture | DocumentKind::Api => Some(Subfolder::Architecture),
            DocumentKind::Tasks | DocumentKind::Roadmap => Some(Subfolder::Planning),
            DocumentKind::Tests => Some(Subfolder::Quality),
            DocumentKind::Docs | DocumentKind::Context | DocumentKind::Prompts => {
                Some(Subfolder::Development)
            }
        }
    }

    /// Path relative to the spec root, always `/`-separated.
    pub fn relative_path(self) -> String {
        match self.subfolder() {
            Some(sub) => format!("{}/{}", sub.dir_name(), self.filename()),
            None => self.filename().to_string(),
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            DocumentKind::Readme => "Specifications Overview",
            DocumentKind::ProjectConfig => "Project Configuration",
            DocumentKind::Requirements => "Requirements",
            DocumentKind::Architecture => "Architecture",
            DocumentKind::Api => "API Specification",
            DocumentKind::Tasks => "Tasks",
            DocumentKind::Roadmap => "Roadmap",
            DocumentKind::Docs => "Development Docs",
            DocumentKind::Context => "Development Context",
            DocumentKind::ProjectPlan => "Project Plan",
            DocumentKind::Prompts => "Prompts Log",
            DocumentKind::Tests => "Test Strategy",
            DocumentKind::SpecUpdateTemplate => "Spec Update Template",
        }
    }

    pub fn is_markdown(self) -> bool {
        self.filename().ends_with(".md")
    }

    pub fn from_filename(name: &str) -> Option<DocumentKind> {
        Self::all().iter().copied().find(|k| k.filename() == name)
    }
}

impl fmt::Display for DocumentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.filename())
    }
}

// ---------------------------------------------------------------------------
// LayoutKind
// ---------------------------------------------------------------------------

/// A named spec-directory convention the migrator converts between.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LayoutKind {
    /// Legacy nested tree (`.project-spec/config/...`, `.project-spec/specs/...`).
    Nested,
    /// Current tree rooted at `.specs`.
    Flat,
}

impl LayoutKind {
    pub fn dir_name(self) -> &'static str {
        match self {
            LayoutKind::Nested => paths::LEGACY_SPECS_DIR,
            LayoutKind::Flat => paths::DEFAULT_SPECS_DIR,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            LayoutKind::Nested => "complex",
            LayoutKind::Flat => "simple",
        }
    }
}

impl fmt::Display for LayoutKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for LayoutKind {
    type Err = SpecError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "complex" | "project-spec" => Ok(LayoutKind::Nested),
            "simple" => Ok(LayoutKind::Flat),
            _ => Err(SpecError::UnknownLayout(s.to_string())),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn document_paths_are_unique() {
        let paths: HashSet<String> = DocumentKind::all()
            .iter()
            .map(|k| k.relative_path())
            .collect();
        assert_eq!(paths.len(), DocumentKind::all().len());
    }

    #[test]
    fn required_documents() {
        assert_eq!(
            DocumentKind::required_filenames(),
            vec![
                "project.yaml",
                "architecture.md",
                "requirements.md",
                "api.yaml",
                "tests.md",
                "tasks.md",
                "context.md",
                "prompts.md",
                "docs.md",
            ]
        );
        assert!(!DocumentKind::Roadmap.is_required());
        assert!(DocumentKind::Prompts.is_required());
    }

    #[test]
    fn relative_paths() {
        assert_eq!(DocumentKind::ProjectConfig.relative_path(), "project/project.yaml");
        assert_eq!(DocumentKind::Prompts.relative_path(), "development/prompts.md");
        assert_eq!(DocumentKind::Tests.relative_path(), "quality/tests.md");
        assert_eq!(DocumentKind::SpecUpdateTemplate.relative_path(), "spec-update-template.md");
    }

    #[test]
    fn from_filename_roundtrip() {
        for kind in DocumentKind::all() {
            assert_eq!(DocumentKind::from_filename(kind.filename()), Some(*kind));
        }
        assert_eq!(DocumentKind::from_filename("notes.md"), None);
    }

    #[test]
    fn language_parse() {
        assert_eq!("typescript".parse::<Language>().unwrap(), Language::TypeScript);
        assert_eq!("Python".parse::<Language>().unwrap(), Language::Python);
        assert!("cobol".parse::<Language>().is_err());
    }

    #[test]
    fn framework_support_is_per_language() {
        assert!(Language::TypeScript.supports(Framework::Express));
        assert!(!Language::Python.supports(Framework::Express));
        assert!(Language::Java.supports(Framework::SpringBoot));
        assert_eq!("spring".parse::<Framework>().unwrap(), Framework::SpringBoot);
    }

    #[test]
    fn layout_names() {
        assert_eq!("complex".parse::<LayoutKind>().unwrap(), LayoutKind::Nested);
        assert_eq!("project-spec".parse::<LayoutKind>().unwrap(), LayoutKind::Nested);
        assert_eq!("simple".parse::<LayoutKind>().unwrap(), LayoutKind::Flat);
        assert!("flat-ish".parse::<LayoutKind>().is_err());
        assert_eq!(LayoutKind::Nested.dir_name(), ".project-spec");
        assert_eq!(LayoutKind::Flat.dir_name(), ".specs");
    }
}
