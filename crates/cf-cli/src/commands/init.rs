use std::fs;
use std::path::Path;

use crate::project::DEFAULT_FILE;

pub fn run(name: &str) -> Result<(), String> {
    let dir = Path::new(name);

    if dir.exists() {
        return Err(format!("directory '{name}' already exists"));
    }

    fs::create_dir_all(dir).map_err(|e| format!("cannot create directory: {e}"))?;

    let stem = name.to_uppercase().replace(['-', ' '], "_");
    let project = format!(
        r#"# civforge project: one [mod] table, then one [[entity]] per builder.

[mod]
id = "{name}"
version = "1"
name = "{name}"
description = "A civforge mod"
authors = ""

[[entity]]
kind = "civilization"
key = "civ"
age = "AGE_ANTIQUITY"
bind = ["scout"]
civilization_type = "CIVILIZATION_{stem}"

[[entity.localizations]]
name = "{name}"
description = "A civilization of your creation"
city_names = ["{name}"]

[[entity]]
kind = "unit"
key = "scout"
age = "AGE_ANTIQUITY"
unit_type = "UNIT_{stem}_SCOUT"
"#
    );

    fs::write(dir.join(DEFAULT_FILE), project)
        .map_err(|e| format!("cannot write {DEFAULT_FILE}: {e}"))?;

    println!("Created project '{name}' in {name}/");
    println!("  {DEFAULT_FILE}  mod metadata and a template civilization");
    println!();
    println!("Get started:");
    println!("  cd {name}");
    println!("  cf check   # Compile and report problems");
    println!("  cf list    # List entities and their files");
    println!("  cf build   # Write the mod to dist/{name}");

    Ok(())
}
