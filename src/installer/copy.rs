//! Template file copying
//!
//! Copies a filtered set of files from a template subtree into the
//! destination root, applying a per-file rename to the base filename and
//! preserving relative directory structure. Contents are copied verbatim;
//! textual substitutions happen in later stages.
//!
//! The copy is at-least-once and non-atomic: the first I/O failure aborts
//! the stage and any files already written are left in place.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;
use wax::{CandidatePath, Glob, Pattern};

use crate::error::{AppstampError, Result, copy_failed};
use crate::progress::ProgressDisplay;

/// Filename rewrites applied to the bare filename at copy time.
///
/// Dotfiles are stored in templates without the leading dot so tooling does
/// not pick them up from inside this repository; `README-template.md` is
/// stored under a name build bundlers will not strip. Adding a mapping is a
/// one-line change.
const FILE_RENAMES: &[(&str, &str)] = &[
    ("browserslistrc", ".browserslistrc"),
    ("env", ".env"),
    ("eslintignore", ".eslintignore"),
    ("eslintrc.js", ".eslintrc.js"),
    ("npmrc", ".npmrc"),
    ("gitignore", ".gitignore"),
    ("nvmrc", ".nvmrc"),
    ("prettierignore", ".prettierignore"),
    ("prettierrc", ".prettierrc"),
    ("README-template.md", "README.md"),
];

/// Rename a template filename to its installed form (case-sensitive lookup)
pub fn rename_template_file(name: &str) -> String {
    FILE_RENAMES
        .iter()
        .find(|(from, _)| *from == name)
        .map_or_else(|| name.to_string(), |(_, to)| (*to).to_string())
}

/// Options controlling a template copy
pub struct CopyOptions<'a> {
    /// Preserve relative directory structure under the destination root
    pub parents: bool,
    /// Template subtree to copy from
    pub cwd: &'a Path,
    /// Applied to the base filename only, never to directory segments
    pub rename: fn(&str) -> String,
}

/// One `(source → relative destination)` pair of the copy plan
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CopyEntry {
    pub source: PathBuf,
    pub dest_rel: PathBuf,
}

/// Enumerate files under `options.cwd` matching `patterns` and derive their
/// destination paths.
///
/// Destination paths are guaranteed unique and never escape the destination
/// root: the rename applies to the bare filename and must not introduce path
/// separators.
pub fn build_plan(patterns: &[&str], options: &CopyOptions<'_>) -> Result<Vec<CopyEntry>> {
    let globs = patterns
        .iter()
        .map(|pattern| {
            Glob::new(pattern).map_err(|e| AppstampError::IoError {
                message: format!("invalid glob pattern '{}': {}", pattern, e),
            })
        })
        .collect::<Result<Vec<_>>>()?;

    let mut plan = Vec::new();
    let mut seen = HashSet::new();

    for entry in WalkDir::new(options.cwd).sort_by_file_name() {
        let entry = entry.map_err(|e| copy_failed(options.cwd, e))?;
        if !entry.file_type().is_file() {
            continue;
        }

        let relative = entry
            .path()
            .strip_prefix(options.cwd)
            .unwrap_or(entry.path());
        // Normalize to forward slashes for platform-independent matching
        let relative_str = relative.to_string_lossy().replace('\\', "/");
        let candidate = CandidatePath::from(relative_str.as_str());
        if !globs.iter().any(|glob| glob.matched(&candidate).is_some()) {
            continue;
        }

        let file_name = entry.file_name().to_string_lossy();
        let renamed = (options.rename)(&file_name);
        if renamed.contains('/') || renamed.contains('\\') {
            return Err(copy_failed(
                entry.path(),
                format!("rename produced a path, not a filename: {}", renamed),
            ));
        }

        let dest_rel = if options.parents {
            relative
                .parent()
                .map_or_else(|| PathBuf::from(&renamed), |p| p.join(&renamed))
        } else {
            PathBuf::from(&renamed)
        };

        if !seen.insert(dest_rel.clone()) {
            return Err(copy_failed(
                entry.path(),
                format!("duplicate destination path: {}", dest_rel.display()),
            ));
        }

        plan.push(CopyEntry {
            source: entry.path().to_path_buf(),
            dest_rel,
        });
    }

    Ok(plan)
}

/// Copy all files matching `patterns` from `options.cwd` into `dest_root`
///
/// Returns the number of files copied.
pub async fn copy(patterns: &[&str], dest_root: &Path, options: CopyOptions<'_>) -> Result<u64> {
    let plan = build_plan(patterns, &options)?;

    let progress = ProgressDisplay::new(plan.len() as u64);
    match copy_entries(&plan, dest_root, &progress).await {
        Ok(copied) => {
            progress.finish();
            Ok(copied)
        }
        Err(e) => {
            progress.abandon();
            Err(e)
        }
    }
}

async fn copy_entries(
    plan: &[CopyEntry],
    dest_root: &Path,
    progress: &ProgressDisplay,
) -> Result<u64> {
    let mut copied = 0u64;

    for entry in plan {
        let dest = dest_root.join(&entry.dest_rel);
        if let Some(parent) = dest.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| copy_failed(parent, e))?;
        }
        tokio::fs::copy(&entry.source, &dest)
            .await
            .map_err(|e| copy_failed(&entry.source, e))?;
        progress.update_file(&entry.dest_rel.display().to_string());
        copied += 1;
    }

    Ok(copied)
}
