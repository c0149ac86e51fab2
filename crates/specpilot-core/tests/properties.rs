use specpilot_core::context::GenerationOptions;
use specpilot_core::generator::SpecGenerator;
use specpilot_core::migrator::{MigrationOptions, MigrationReason, ProjectMigrator};
use specpilot_core::types::{DocumentKind, LayoutKind};
use specpilot_core::validator::{SpecValidator, ValidationOptions};
use std::path::{Path, PathBuf};
use tempfile::TempDir;

fn generate(dir: &Path, name: &str, lang: &str, framework: Option<&str>) -> PathBuf {
    let mut options = GenerationOptions::new(name, lang, dir);
    if let Some(fw) = framework {
        options = options.with_framework(fw);
    }
    SpecGenerator::new().generate_specs(&options).unwrap().spec_root
}

fn read(path: impl AsRef<Path>) -> String {
    std::fs::read_to_string(path).unwrap()
}

#[test]
fn generation_writes_every_document_with_the_project_name() {
    let dir = TempDir::new().unwrap();
    let root = generate(dir.path(), "orbital-tracker", "typescript", None);

    for kind in DocumentKind::all() {
        let path = root.join(kind.relative_path());
        assert!(path.is_file(), "missing {}", kind.relative_path());
        assert!(read(&path).contains("orbital-tracker"), "{kind} lacks project name");
    }
}

#[test]
fn quotes_in_project_fields_keep_the_tree_valid() {
    let dir = TempDir::new().unwrap();
    let mut options = GenerationOptions::new(r#"say "hi""#, "typescript", dir.path());
    options.description = Some(r#"A "quoted" tool in C:\work"#.to_string());
    options.author = Some(r#"Jo "JJ" O\Neil"#.to_string());
    let root = SpecGenerator::new().generate_specs(&options).unwrap().spec_root;

    let config: serde_yaml::Value = serde_yaml::from_str(&read(root.join("project/project.yaml"))).unwrap();
    assert_eq!(config["name"].as_str(), Some(r#"say "hi""#));
    assert_eq!(config["description"].as_str(), Some(r#"A "quoted" tool in C:\work"#));
    assert_eq!(config["author"].as_str(), Some(r#"Jo "JJ" O\Neil"#));
    let api: serde_yaml::Value = serde_yaml::from_str(&read(root.join("architecture/api.yaml"))).unwrap();
    assert_eq!(api["info"]["title"].as_str(), Some(r#"say "hi" API"#));

    let result = SpecValidator::new()
        .validate(dir.path(), ValidationOptions::default())
        .unwrap();
    assert!(result.is_valid, "{:?}", result.errors);
}

#[test]
fn markdown_documents_carry_front_matter() {
    let dir = TempDir::new().unwrap();
    let root = generate(dir.path(), "demo", "java", Some("spring-boot"));

    for kind in DocumentKind::all().iter().filter(|k| k.is_markdown()) {
        let content = read(root.join(kind.relative_path()));
        assert!(content.starts_with("---\ntitle: "), "{kind}");
        assert!(content.contains("project: \"demo\""), "{kind}");
        assert!(content.contains("framework: \"spring-boot\""), "{kind}");
    }
}

#[test]
fn prompts_log_states_the_mandate() {
    let dir = TempDir::new().unwrap();
    let root = generate(dir.path(), "demo", "python", None);
    let prompts = read(root.join("development/prompts.md"));
    assert!(prompts.contains("MANDATE"));
    assert!(prompts.contains("AI interactions"));
}

#[test]
fn fresh_tree_validates_cleanly() {
    for (lang, fw) in [
        ("typescript", Some("react")),
        ("javascript", None),
        ("python", Some("fastapi")),
        ("java", Some("spring-boot")),
    ] {
        let dir = TempDir::new().unwrap();
        generate(dir.path(), "demo", lang, fw);
        let result = SpecValidator::new()
            .validate(dir.path(), ValidationOptions::default())
            .unwrap();
        assert!(result.is_valid, "{lang}: {:?}", result.errors);
        assert!(result.errors.is_empty());
        assert_eq!(result.mandates_verified, 2);
    }
}

#[test]
fn missing_config_is_reported_and_repaired() {
    let dir = TempDir::new().unwrap();
    let root = generate(dir.path(), "demo", "typescript", None);
    let config = root.join("project/project.yaml");
    std::fs::remove_file(&config).unwrap();

    let validator = SpecValidator::new();
    let result = validator
        .validate(dir.path(), ValidationOptions::default())
        .unwrap();
    assert!(!result.is_valid);
    assert!(result.errors.iter().any(|e| e.contains("project.yaml")));
    assert!(result.fixable.contains(&"create-project.yaml".to_string()));

    let applied = validator.auto_fix(dir.path(), &["create-project.yaml".to_string()]);
    assert_eq!(applied, vec!["create-project.yaml".to_string()]);
    let first = read(&config);
    let yaml: serde_yaml::Value = serde_yaml::from_str(&first).unwrap();
    for field in ["name", "version", "language"] {
        assert!(yaml.get(field).is_some(), "missing {field}");
    }

    let again = validator.auto_fix(dir.path(), &["create-project.yaml".to_string()]);
    assert!(again.is_empty());
    assert_eq!(read(&config), first);

    let result = validator
        .validate(dir.path(), ValidationOptions::default())
        .unwrap();
    assert!(result.is_valid, "{:?}", result.errors);
    assert!(result.mandate_checks.project_config);
}

#[test]
fn nested_config_merges_onto_existing_flat_config() {
    let dir = TempDir::new().unwrap();
    let legacy = dir.path().join(".project-spec/config");
    std::fs::create_dir_all(&legacy).unwrap();
    std::fs::write(legacy.join("project.yaml"), "name: legacy\n").unwrap();
    let flat = dir.path().join(".specs");
    std::fs::create_dir_all(&flat).unwrap();
    std::fs::write(flat.join("project.yaml"), "name: current\n").unwrap();

    let result = ProjectMigrator::new()
        .migrate(
            dir.path(),
            MigrationOptions {
                from: LayoutKind::Nested,
                to: LayoutKind::Flat,
            },
        )
        .unwrap();

    assert_eq!(result.files_merged, 1);
    assert_eq!(
        read(flat.join("project.yaml")),
        "name: current\n\n\n---\n\nname: legacy\n"
    );
}

#[test]
fn migration_check_without_source() {
    let dir = TempDir::new().unwrap();
    let check = ProjectMigrator::new().check_migration_needed(
        dir.path(),
        LayoutKind::Nested,
        LayoutKind::Flat,
    );
    assert!(!check.needed);
    assert_eq!(check.reason, MigrationReason::NoSource);
}

#[test]
fn framework_shapes_architecture() {
    let express = TempDir::new().unwrap();
    let root = generate(express.path(), "api", "typescript", Some("express"));
    let arch = read(root.join("architecture/architecture.md"));
    assert!(arch.to_lowercase().contains("express"));

    let plain = TempDir::new().unwrap();
    let root = generate(plain.path(), "api", "typescript", None);
    let arch = read(root.join("architecture/architecture.md"));
    assert!(!arch.to_lowercase().contains("express"));
}
