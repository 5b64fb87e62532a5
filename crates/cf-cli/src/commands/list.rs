use std::path::Path;

use cf_build::EntityKind;
use comfy_table::{ContentArrangement, Table};

fn parse_kind(name: &str) -> Result<EntityKind, String> {
    let normalized = name.trim().to_lowercase().replace([' ', '-'], "_");
    serde_json::from_value(serde_json::Value::String(normalized))
        .map_err(|_| format!("unknown entity kind '{name}'"))
}

pub fn run(project: &Path, kind: Option<&str>) -> Result<(), String> {
    let project = super::load(project)?;
    let kind = kind.map(parse_kind).transpose()?;

    // Files only exist once every builder has migrated.
    project.to_mod().compile();

    let entities: Vec<_> = project
        .entities
        .iter()
        .filter(|e| kind.is_none_or(|k| e.kind == k))
        .collect();

    if entities.is_empty() {
        println!("  No entities found.");
        return Ok(());
    }

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Key", "Kind", "Type", "Files"]);

    for entity in &entities {
        let builder = entity.builder();
        let builder = builder.borrow();
        let primary = builder.primary_type().unwrap_or_else(|| "—".to_string());
        let files = match &entity.carried_by {
            Some(parent) => format!("(merged into '{parent}')"),
            None => builder
                .files()
                .iter()
                .map(|f| f.relative_path())
                .collect::<Vec<_>>()
                .join("\n"),
        };
        table.add_row(vec![
            entity.key.clone(),
            entity.kind.to_string(),
            primary,
            files,
        ]);
    }

    println!("{table}");
    println!();
    println!("  {}", super::plural(entities.len(), "entity", "entities"));

    Ok(())
}
