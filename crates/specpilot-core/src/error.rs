use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SpecError {
    #[error("no spec directory found in {0}")]
    SpecRootNotFound(PathBuf),

    #[error("spec directory already exists: {0}")]
    SpecRootExists(PathBuf),

    #[error("source directory {0} does not exist")]
    MigrationSourceMissing(PathBuf),

    #[error("cannot migrate '{0}' onto itself")]
    SameLayout(String),

    #[error("unknown layout '{0}': expected one of complex, project-spec, simple")]
    UnknownLayout(String),

    #[error("unsupported language '{0}': expected one of typescript, javascript, python, java")]
    UnknownLanguage(String),

    #[error("unknown framework '{0}'")]
    UnknownFramework(String),

    #[error("invalid project name '{0}': must be non-empty and contain no path separators")]
    InvalidProjectName(String),

    #[error("unknown fix '{0}'")]
    UnknownFix(String),

    #[error("project.yaml is empty or invalid")]
    InvalidProjectConfig,

    #[error("description must not be empty")]
    EmptyDescription,

    #[error("document not found: {0}")]
    DocumentNotFound(String),

    #[error("{}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Walk(#[from] walkdir::Error),

    #[error(transparent)]
    Render(#[from] handlebars::RenderError),

    #[error(transparent)]
    Yaml(#[from] serde_yaml::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Toml(#[from] toml::de::Error),
}

impl SpecError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        SpecError::Io {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, SpecError>;
