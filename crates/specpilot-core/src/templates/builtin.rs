use super::front_matter;
use crate::rules::{CHRONOLOGY_MANDATE, PROMPT_TRACKING_MANDATE, RELEASE_CONSENT_MANDATE};
use crate::types::{DocumentKind, Framework, Language};

/// Documents whose template depends on the language and framework.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuiltinFile {
    ProjectConfig,
    Architecture,
}

impl BuiltinFile {
    pub fn for_kind(kind: DocumentKind) -> Option<BuiltinFile> {
        match kind {
            DocumentKind::ProjectConfig => Some(BuiltinFile::ProjectConfig),
            DocumentKind::Architecture => Some(BuiltinFile::Architecture),
            _ => None,
        }
    }
}

/// Who supplies a built-in template: the language alone, or a framework
/// that is known for that language.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TemplateProvider {
    Language(Language),
    Framework(Language, Framework),
}

impl TemplateProvider {
    /// `None` when the language is unknown. A framework that is unknown, or
    /// not offered for the language, falls back to the language provider.
    pub fn resolve(language: &str, framework: Option<&str>) -> Option<TemplateProvider> {
        let language: Language = language.parse().ok()?;
        let framework = framework
            .and_then(|f| f.parse::<Framework>().ok())
            .filter(|f| language.supports(*f));
        Some(match framework {
            Some(fw) => TemplateProvider::Framework(language, fw),
            None => TemplateProvider::Language(language),
        })
    }

    pub fn language(self) -> Language {
        match self {
            TemplateProvider::Language(lang) | TemplateProvider::Framework(lang, _) => lang,
        }
    }

    pub fn framework(self) -> Option<Framework> {
        match self {
            TemplateProvider::Language(_) => None,
            TemplateProvider::Framework(_, fw) => Some(fw),
        }
    }

    pub fn template(self, file: BuiltinFile) -> String {
        match file {
            BuiltinFile::ProjectConfig => project_yaml(self),
            BuiltinFile::Architecture => architecture_md(self),
        }
    }
}

/// Built-in template text, or an empty string when the language is unknown.
pub fn builtin_template(language: &str, framework: Option<&str>, file: BuiltinFile) -> String {
    match TemplateProvider::resolve(language, framework) {
        Some(provider) => provider.template(file),
        None => String::new(),
    }
}

// ---------------------------------------------------------------------------
// project.yaml
// ---------------------------------------------------------------------------

fn project_yaml(provider: TemplateProvider) -> String {
    let language = provider.language();
    let mut out = String::from("# Project configuration\n");
    out.push_str("name: {{yaml projectName}}\n");
    out.push_str("version: \"1.0.0\"\n");
    out.push_str(&format!("language: {language}\n"));
    if let Some(fw) = provider.framework() {
        out.push_str(&format!("framework: {fw}\n"));
    }
    out.push_str("description: {{yaml description}}\n");
    out.push_str("author: {{yaml author}}\n");

    out.push_str("\n# Project rules and AI context\nrules:\n");
    let rules = [
        format!("Follow {language} best practices and coding standards"),
        "Write comprehensive tests for all functionality".to_string(),
        "Document all public APIs and interfaces".to_string(),
        PROMPT_TRACKING_MANDATE.to_string(),
        CHRONOLOGY_MANDATE.to_string(),
        RELEASE_CONSENT_MANDATE.to_string(),
        "Use semantic versioning for releases".to_string(),
        "Keep dependencies up to date".to_string(),
    ];
    for rule in &rules {
        out.push_str(&format!("  - \"{rule}\"\n"));
    }

    out.push_str(
        r#"
# Development context for AI assistants
ai_context:
  - "This is a specification-driven development project"
  - "All changes should be documented in the matching .specs/ files"
  - "Follow the established architecture patterns"
  - "Maintain backwards compatibility when possible"

team:
  code_review_required: true
  testing_required: true
  documentation_required: true

build:
"#,
    );
    out.push_str(&format!("  command: \"{}\"\n", language.build_command()));

    out.push_str("\ndependencies:\n");
    let (runtime, development) = match provider.framework() {
        Some(fw) => (fw.runtime_dependencies(), fw.development_dependencies()),
        None => (&[][..], &[][..]),
    };
    push_yaml_list(&mut out, "runtime", runtime);
    push_yaml_list(&mut out, "development", development);
    out
}

fn push_yaml_list(out: &mut String, key: &str, items: &[&str]) {
    if items.is_empty() {
        out.push_str(&format!("  {key}: []\n"));
        return;
    }
    out.push_str(&format!("  {key}:\n"));
    for item in items {
        out.push_str(&format!("    - \"{item}\"\n"));
    }
}

// ---------------------------------------------------------------------------
// architecture.md
// ---------------------------------------------------------------------------

fn architecture_md(provider: TemplateProvider) -> String {
    let language = provider.language();
    let mut out = front_matter(DocumentKind::Architecture.title());
    out.push_str("# {{projectName}} Architecture\n\n## Overview\n");
    match provider.framework() {
        Some(fw) => out.push_str(&format!(
            "This document outlines the architecture and design decisions for {{{{projectName}}}}, \
             a {language} application built with {fw}.\n\n"
        )),
        None => out.push_str(&format!(
            "This document outlines the architecture and design decisions for {{{{projectName}}}}, \
             a {language} application.\n\n"
        )),
    }

    out.push_str("## Architecture Patterns\n");
    out.push_str(&format!("- **Language**: {language}\n"));
    match provider.framework() {
        Some(fw) => {
            out.push_str(&format!("- **Framework**: {fw}\n"));
            out.push_str(&format!("- **Architecture Style**: {}\n", fw.architecture_style()));
        }
        None => out.push_str(
            "- **Architecture Style**: _Pick one (layered, MVC, microservices, event-driven)_\n",
        ),
    }
    out.push_str("- **Data Flow**: _Describe how data moves through the system_\n\n");
    out.push_str(ARCHITECTURE_BODY);
    out
}

const ARCHITECTURE_BODY: &str = r#"## Core Components
{{#if architecture}}
{{#each architecture.components}}
- {{this}}
{{/each}}

### Directory Structure
```
{{architecture.directories}}
```

### File Types
| Extension | Files |
|-----------|-------|
{{#each architecture.fileTypes}}
| {{@key}} | {{this}} |
{{/each}}
{{else}}
_List the main components and their responsibilities. Re-run generation with
an analysis file to fill this section from the codebase._

### Application Structure
```
src/
├── components/     # Reusable components
├── services/       # Business logic
├── utils/          # Utility functions
└── tests/          # Test files
```
{{/if}}

## Design Decisions

### Decision 1: _Decision title_
- **Date**: {{currentDate}}
- **Context**: _Why this decision was needed_
- **Decision**: _What was decided_
- **Consequences**: _Positive and negative impacts_

## Security Considerations
_List security measures and constraints._

## Cross-References
- Requirements: ../project/requirements.md
- API: ./api.yaml
- Project config: ../project/project.yaml

---
*Last updated: {{lastUpdated}}*
"#;
