//! Path resolution and destination checks
//!
//! Resolves the user-supplied project directory into an absolute, normalized
//! path, and checks whether an existing destination can safely receive a new
//! project.

use std::path::{Path, PathBuf};

use console::style;

use crate::error::Result;

/// Files that do not block scaffolding into an existing directory
const HARMLESS_FILES: &[&str] = &[
    ".DS_Store",
    ".git",
    ".gitattributes",
    ".gitignore",
    ".gitlab-ci.yml",
    ".hg",
    ".hgcheck",
    ".hgignore",
    ".idea",
    ".npmignore",
    ".travis.yml",
    ".yarnrc.yml",
    "LICENSE",
    "Thumbs.db",
    "docs",
    "mkdocs.yml",
    "npm-debug.log",
    "yarn-debug.log",
    "yarn-error.log",
];

/// Resolve the project directory argument to an absolute path
///
/// The directory does not need to exist yet; `dunce` keeps Windows paths in
/// their familiar non-UNC form.
pub fn resolve_project_path(input: &str) -> Result<PathBuf> {
    let path = Path::new(input.trim());
    let absolute = if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir()?.join(path)
    };
    Ok(dunce::simplified(&absolute).to_path_buf())
}

/// Whether `root` is empty enough to scaffold `name` into
///
/// IntelliJ project files and a fixed allowlist of repository scaffolding
/// are tolerated; anything else is printed as a conflict and blocks the
/// installation.
pub fn is_folder_empty(root: &Path, name: &str) -> Result<bool> {
    let mut conflicts = Vec::new();

    for entry in std::fs::read_dir(root)? {
        let entry = entry?;
        let file_name = entry.file_name().to_string_lossy().to_string();
        if HARMLESS_FILES.contains(&file_name.as_str()) || file_name.ends_with(".iml") {
            continue;
        }
        let marker = if entry.file_type()?.is_dir() { "/" } else { "" };
        conflicts.push(format!("{}{}", file_name, marker));
    }

    if conflicts.is_empty() {
        return Ok(true);
    }

    println!(
        "The directory {} contains files that could conflict:",
        style(name).green()
    );
    println!();
    for conflict in &conflicts {
        println!("  {}", conflict);
    }
    println!();
    println!("Either try using a new directory name, or remove the files listed above.");
    println!();

    Ok(false)
}
