mod cmd;
mod output;
mod root;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "specpilot",
    about = "Specification-driven development scaffolding: generate, validate and migrate .specs trees",
    version,
    propagate_version = true
)]
struct Cli {
    /// Output as JSON
    #[arg(long, global = true, short = 'j')]
    json: bool,

    /// Show detailed output and info-level logs
    #[arg(long, global = true, short = 'v')]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a new project directory with a generated spec tree
    Init {
        /// Project name (also the directory name)
        name: String,

        /// Language: typescript, javascript, python or java
        #[arg(long, short = 'l', default_value = "typescript")]
        lang: String,

        /// Framework (e.g. react, express, fastapi, spring-boot)
        #[arg(long, short = 'f')]
        framework: Option<String>,

        /// Parent directory for the new project
        #[arg(long, short = 'd', default_value = ".")]
        dir: PathBuf,

        /// Name of the spec directory
        #[arg(long, default_value = ".specs")]
        specs_name: String,

        /// Author recorded in the generated documents
        #[arg(long)]
        author: Option<String>,

        /// One-line project description
        #[arg(long)]
        description: Option<String>,

        /// Codebase analysis JSON used to fill architecture.md
        #[arg(long)]
        analysis: Option<PathBuf>,
    },

    /// Add a spec tree to an existing project
    AddSpecs {
        /// Project directory (default: current directory)
        #[arg(long, short = 'd', env = "SPECPILOT_DIR")]
        dir: Option<PathBuf>,

        /// Project name (default: directory name)
        #[arg(long)]
        name: Option<String>,

        /// Language (default: detected from package.json, pyproject.toml,
        /// setup.py, requirements.txt, pom.xml or build.gradle)
        #[arg(long, short = 'l')]
        lang: Option<String>,

        /// Framework (default: detected from the project's dependencies)
        #[arg(long, short = 'f')]
        framework: Option<String>,

        /// Author recorded in the generated documents
        #[arg(long)]
        author: Option<String>,

        /// One-line project description
        #[arg(long)]
        description: Option<String>,

        /// Codebase analysis JSON used to fill architecture.md
        #[arg(long)]
        analysis: Option<PathBuf>,
    },

    /// Check the spec tree for missing files and broken mandates
    Validate {
        /// Project directory (default: auto-detect upward from cwd)
        #[arg(long, short = 'd', env = "SPECPILOT_DIR")]
        dir: Option<PathBuf>,

        /// Apply automatic fixes and validate again
        #[arg(long)]
        fix: bool,
    },

    /// Convert a legacy spec layout into the current one
    Migrate {
        /// Project directory (default: auto-detect upward from cwd)
        #[arg(long, short = 'd', env = "SPECPILOT_DIR")]
        dir: Option<PathBuf>,

        /// Source layout: complex, project-spec or simple
        #[arg(long, default_value = "complex")]
        from: String,

        /// Target layout: complex, project-spec or simple
        #[arg(long, default_value = "simple")]
        to: String,

        /// Copy the project into backup-<timestamp>/ first
        #[arg(long)]
        backup: bool,
    },

    /// List the available templates
    List {
        /// Only show templates for this language
        #[arg(long, short = 'l')]
        lang: Option<String>,
    },

    /// Record a description of what to build into the spec tree
    Specify {
        /// What the project should do
        description: String,

        /// Project directory (default: auto-detect upward from cwd)
        #[arg(long, short = 'd', env = "SPECPILOT_DIR")]
        dir: Option<PathBuf>,

        /// Replace the overview and regenerate the tree from project.yaml
        #[arg(long)]
        update: bool,
    },
}

fn main() {
    let cli = Cli::parse();

    let default_level = if cli.verbose {
        tracing::Level::INFO
    } else {
        tracing::Level::WARN
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(default_level.into()),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let result = match cli.command {
        Commands::Init {
            name,
            lang,
            framework,
            dir,
            specs_name,
            author,
            description,
            analysis,
        } => cmd::init::run(
            &dir,
            cmd::init::InitArgs {
                name,
                lang,
                framework,
                specs_name,
                author,
                description,
                analysis,
            },
            cli.json,
        ),
        Commands::AddSpecs {
            dir,
            name,
            lang,
            framework,
            author,
            description,
            analysis,
        } => {
            let dir = root::project_dir(dir.as_deref());
            cmd::add_specs::run(
                &dir,
                cmd::add_specs::AddSpecsArgs {
                    name,
                    lang,
                    framework,
                    author,
                    description,
                    analysis,
                },
                cli.json,
            )
        }
        Commands::Validate { dir, fix } => {
            let root = root::resolve_root(dir.as_deref());
            cmd::validate::run(&root, fix, cli.verbose, cli.json)
        }
        Commands::Migrate {
            dir,
            from,
            to,
            backup,
        } => {
            let root = root::resolve_root(dir.as_deref());
            cmd::migrate::run(&root, &from, &to, backup, cli.json)
        }
        Commands::List { lang } => cmd::list::run(lang.as_deref(), cli.verbose, cli.json),
        Commands::Specify {
            description,
            dir,
            update,
        } => {
            let root = root::resolve_root(dir.as_deref());
            cmd::specify::run(&root, &description, update, cli.json)
        }
    };

    if let Err(e) = result {
        eprintln!("error: {e:#}");
        std::process::exit(1);
    }
}
