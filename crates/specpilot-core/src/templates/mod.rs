//! Template sources for every generated document.
//!
//! `project.yaml` and `architecture.md` vary by language and framework and
//! come from [`builtin`]; every other document has a fixed inline template.
//! All templates are Handlebars strings rendered against a
//! [`crate::context::GenerationContext`].

pub mod builtin;
pub mod inline;

pub use builtin::{builtin_template, BuiltinFile, TemplateProvider};

use crate::types::DocumentKind;

/// Front-matter block that opens every generated Markdown document.
pub fn front_matter(title: &str) -> String {
    let mut out = String::from("---\n");
    out.push_str(&format!("title: \"{title}\"\n"));
    out.push_str(FRONT_MATTER_FIELDS);
    out
}

const FRONT_MATTER_FIELDS: &str = r#"project: {{yaml projectName}}
language: {{yaml language}}
framework: {{#if framework}}{{yaml framework}}{{else}}"none"{{/if}}
lastUpdated: "{{lastUpdated}}"
sourceOfTruth: project/project.yaml
---

"#;

/// Template text for a document that is not language dependent. `None` for
/// the documents served by [`builtin_template`].
pub fn inline_template(kind: DocumentKind) -> Option<String> {
    let body = match kind {
        DocumentKind::ProjectConfig | DocumentKind::Architecture => return None,
        DocumentKind::Api => return Some(inline::API_YAML.to_string()),
        DocumentKind::Readme => inline::README,
        DocumentKind::Requirements => inline::REQUIREMENTS,
        DocumentKind::Tasks => inline::TASKS,
        DocumentKind::Roadmap => inline::ROADMAP,
        DocumentKind::Docs => inline::DOCS,
        DocumentKind::Context => inline::CONTEXT,
        DocumentKind::ProjectPlan => inline::PROJECT_PLAN,
        DocumentKind::Prompts => inline::PROMPTS,
        DocumentKind::Tests => inline::TESTS,
        DocumentKind::SpecUpdateTemplate => inline::SPEC_UPDATE_TEMPLATE,
    };
    Some(format!("{}{}", front_matter(kind.title()), body))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_non_builtin_kind_has_an_inline_template() {
        for kind in DocumentKind::all() {
            let inline = inline_template(*kind);
            let builtin = BuiltinFile::for_kind(*kind);
            assert!(
                inline.is_some() != builtin.is_some(),
                "{kind} must have exactly one template source"
            );
        }
    }

    #[test]
    fn markdown_templates_open_with_front_matter() {
        for kind in DocumentKind::all().iter().filter(|k| k.is_markdown()) {
            if let Some(template) = inline_template(*kind) {
                assert!(template.starts_with("---\ntitle: "), "{kind}");
                assert!(template.contains("sourceOfTruth: project/project.yaml"), "{kind}");
            }
        }
    }
}
