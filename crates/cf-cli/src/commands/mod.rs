pub mod build;
pub mod check;
pub mod init;
pub mod list;

use std::path::Path;

use crate::project::Project;

/// Load a project, pointing at `cf init` when the default file is missing.
fn load(path: &Path) -> Result<Project, String> {
    if !path.exists() {
        return Err(format!(
            "project file '{}' not found (create one with `cf init <name>`)",
            path.display()
        ));
    }
    Project::load(path)
}

fn plural(count: usize, one: &str, many: &str) -> String {
    format!("{count} {}", if count == 1 { one } else { many })
}
