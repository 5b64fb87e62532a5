use std::collections::HashSet;
use std::path::Path;

use cf_core::FileContent;
use colored::Colorize;

use super::plural;

pub fn run(project: &Path) -> Result<(), String> {
    let project = super::load(project)?;
    let files = project.to_mod().compile();

    let mut warnings = Vec::new();
    for entity in &project.entities {
        if entity.primary_type().is_none() {
            warnings.push(format!(
                "{} '{}' has no primary type and contributes nothing",
                entity.kind, entity.key
            ));
        }
    }
    for (parent, child) in &project.ignored_binds {
        warnings.push(format!(
            "'{parent}' has no binding rule for '{child}'; the bind is ignored"
        ));
    }
    let mut seen = HashSet::new();
    for file in &files {
        let path = file.relative_path();
        if !seen.insert(path.clone()) {
            warnings.push(format!("two files are written to '{path}'"));
        }
    }

    let missing: Vec<_> = files
        .iter()
        .filter_map(|f| match &f.content {
            FileContent::Import(source) if !source.is_file() => Some(source),
            _ => None,
        })
        .collect();

    for warning in &warnings {
        eprintln!("  {} {warning}", "warning:".yellow().bold());
    }
    for source in &missing {
        eprintln!(
            "  {} import source not found: {}",
            "error:".red().bold(),
            source.display()
        );
    }
    if !missing.is_empty() {
        return Err(format!(
            "check failed: {}",
            plural(missing.len(), "missing import", "missing imports")
        ));
    }

    println!("  All checks passed for '{}'.", project.info.name);
    println!(
        "  {}, {}, {}",
        plural(project.entities.len(), "entity", "entities"),
        plural(files.len(), "file", "files"),
        plural(warnings.len(), "warning", "warnings")
    );

    Ok(())
}
