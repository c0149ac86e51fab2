use crate::types::{DocumentKind, Framework, Language};
use serde::Serialize;

/// One entry in the catalogue shown by `specpilot list`. Display only:
/// generation dispatches on language and framework directly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TemplateEntry {
    pub name: &'static str,
    pub language: Language,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub framework: Option<Framework>,
    pub description: &'static str,
    pub files: Vec<&'static str>,
}

pub struct TemplateRegistry {
    entries: Vec<TemplateEntry>,
}

impl Default for TemplateRegistry {
    fn default() -> Self {
        Self::new()
    }
}

const CATALOGUE: &[(&str, Language, Option<Framework>, &str)] = &[
    ("generic", Language::TypeScript, None, "Basic TypeScript project structure"),
    ("react", Language::TypeScript, Some(Framework::React), "React application with modern tooling"),
    ("express", Language::TypeScript, Some(Framework::Express), "REST API server setup"),
    ("next", Language::TypeScript, Some(Framework::Next), "Next.js full-stack application"),
    ("cli", Language::TypeScript, Some(Framework::Cli), "Command-line tool development"),
    ("generic", Language::JavaScript, None, "Basic JavaScript project structure"),
    ("generic", Language::Python, None, "Basic Python project structure"),
    ("fastapi", Language::Python, Some(Framework::FastApi), "Modern API development"),
    ("django", Language::Python, Some(Framework::Django), "Web application framework"),
    ("data-science", Language::Python, Some(Framework::DataScience), "Jupyter, pandas and scikit-learn setup"),
    ("generic", Language::Java, None, "Maven/Gradle project structure"),
    ("spring-boot", Language::Java, Some(Framework::SpringBoot), "Microservices development"),
];

impl TemplateRegistry {
    pub fn new() -> Self {
        let entries = CATALOGUE
            .iter()
            .map(|&(name, language, framework, description)| TemplateEntry {
                name,
                language,
                framework,
                description,
                files: DocumentKind::required_filenames(),
            })
            .collect();
        Self { entries }
    }

    /// All entries, or those for one language.
    pub fn templates(&self, language: Option<Language>) -> Vec<&TemplateEntry> {
        self.entries
            .iter()
            .filter(|e| language.map_or(true, |lang| e.language == lang))
            .collect()
    }

    /// The entry for a framework, or the generic entry when none is given.
    pub fn find(&self, language: Language, framework: Option<Framework>) -> Option<&TemplateEntry> {
        self.entries
            .iter()
            .find(|e| e.language == language && e.framework == framework)
    }
}
