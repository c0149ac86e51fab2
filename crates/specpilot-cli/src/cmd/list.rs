use crate::output::{print_json, print_table};
use specpilot_core::registry::TemplateRegistry;
use specpilot_core::types::Language;

pub fn run(lang: Option<&str>, verbose: bool, json: bool) -> anyhow::Result<()> {
    let language = lang.map(str::parse::<Language>).transpose()?;
    let registry = TemplateRegistry::new();
    let entries = registry.templates(language);

    if json {
        return print_json(&entries);
    }

    if entries.is_empty() {
        println!("No templates.");
        return Ok(());
    }

    let mut headers = vec!["NAME", "LANGUAGE", "FRAMEWORK", "DESCRIPTION"];
    if verbose {
        headers.push("FILES");
    }
    let rows = entries
        .iter()
        .map(|e| {
            let mut row = vec![
                e.name.to_string(),
                e.language.to_string(),
                e.framework.map_or_else(|| "-".to_string(), |f| f.to_string()),
                e.description.to_string(),
            ];
            if verbose {
                row.push(e.files.join(", "));
            }
            row
        })
        .collect();
    print_table(&headers, rows);
    Ok(())
}
