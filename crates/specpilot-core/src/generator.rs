use crate::context::{GenerationContext, GenerationOptions};
use crate::defaults::default_content;
use crate::error::Result;
use crate::template::TemplateEngine;
use crate::templates::{builtin_template, inline_template, BuiltinFile};
use crate::types::{DocumentKind, Subfolder};
use crate::{io, paths};
use serde::Serialize;
use std::path::PathBuf;
use tracing::{debug, warn};

/// Paths written by one generation run, in write order.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationReport {
    pub spec_root: PathBuf,
    pub files: Vec<PathBuf>,
}

pub struct SpecGenerator {
    engine: TemplateEngine,
}

impl Default for SpecGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl SpecGenerator {
    pub fn new() -> Self {
        Self::with_engine(TemplateEngine::new())
    }

    pub fn with_engine(engine: TemplateEngine) -> Self {
        Self { engine }
    }

    /// Create the spec tree under `target_dir/specs_name` and write every
    /// document. Existing files are overwritten. The first failure aborts
    /// the run; files written before it stay on disk.
    pub fn generate_specs(&self, options: &GenerationOptions) -> Result<GenerationReport> {
        let spec_root = options.spec_root();
        io::ensure_dir(&spec_root)?;
        for subfolder in Subfolder::all() {
            io::ensure_dir(&paths::subfolder_dir(&spec_root, *subfolder))?;
        }

        let ctx = GenerationContext::from_options(options);
        let mut files = Vec::with_capacity(DocumentKind::all().len());
        for kind in DocumentKind::all() {
            let content = self.render_document(*kind, &ctx)?;
            let path = paths::document_path(&spec_root, *kind);
            io::atomic_write(&path, content.as_bytes())?;
            debug!(path = %path.display(), "wrote spec document");
            files.push(path);
        }

        Ok(GenerationReport { spec_root, files })
    }

    /// Rendered text for one document.
    pub fn render_document(&self, kind: DocumentKind, ctx: &GenerationContext) -> Result<String> {
        let Some(file) = BuiltinFile::for_kind(kind) else {
            let template = inline_template(kind).unwrap_or_default();
            return self.engine.render_from_string(&template, ctx);
        };

        let template = builtin_template(&ctx.language, ctx.framework.as_deref(), file);
        if template.is_empty() {
            warn!(
                language = %ctx.language,
                file = kind.filename(),
                "no built-in template for language, writing default content"
            );
            return Ok(default_content(kind, &ctx.project_name, &ctx.language));
        }
        self.engine.render_from_string(&template, ctx)
    }
}
