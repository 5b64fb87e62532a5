use std::path::Path;

use colored::Colorize;

use super::plural;

pub fn run(project: &Path, out: Option<&Path>, clean: bool) -> Result<(), String> {
    let project = super::load(project)?;
    let dist = out.map_or_else(|| project.default_dist(), Path::to_path_buf);

    let report = project
        .to_mod()
        .build(&dist, clean)
        .map_err(|e| e.to_string())?;

    println!(
        "  {} '{}' into {}",
        "Built".green().bold(),
        project.info.name,
        dist.display()
    );
    println!();
    println!(
        "  {}, {}",
        plural(project.entities.len(), "entity", "entities"),
        plural(report.files.len(), "file", "files")
    );
    println!("  manifest: {}", report.manifest.display());

    Ok(())
}
