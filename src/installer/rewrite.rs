//! Import alias rewriting across a freshly copied project tree
//!
//! Templates ship with the default `@/*` path alias. When the user picks a
//! custom alias, two rewrites happen after the copy stage:
//!
//! 1. The compiler path-mapping config (`tsconfig.json` / `jsconfig.json`)
//!    gets its default mapping key replaced with the custom alias, and its
//!    mapping value pointed at `./src/*` when a `src/` layout is requested.
//! 2. Every other regular file (dotfiles included) has each literal `@/`
//!    occurrence replaced with the custom prefix.
//!
//! Body rewrites fan out concurrently, bounded by a semaphore so large
//! templates cannot exhaust file descriptors. These rewrites are only safe
//! on a fresh copy: callers must invoke them exactly once.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use walkdir::WalkDir;

use crate::error::{AppstampError, Result, alias_rewrite_failed};

/// Default import alias baked into templates
pub const DEFAULT_IMPORT_ALIAS: &str = "@/*";

/// Token replaced in file bodies (the default alias sans wildcard)
const DEFAULT_ALIAS_PREFIX: &str = "@/";

/// Compiler config files whose bodies must not be touched by the body pass
const PATH_CONFIG_FILES: &[&str] = &["tsconfig.json", "jsconfig.json"];

/// Maximum simultaneously in-flight file rewrites
const REWRITE_CONCURRENCY: usize = 8;

/// The custom alias as a file-body prefix: wildcard markers stripped
fn alias_prefix(alias: &str) -> String {
    alias.replace('*', "")
}

/// Rewrite the path-mapping key/value pair in the compiler config files
///
/// The mapping value moves to `./src/*` when the project uses a `src/`
/// layout; the mapping key becomes the custom alias. With the default alias
/// and a flat layout this is an identity rewrite, so callers skip it.
pub async fn rewrite_alias_config(root: &Path, alias: &str, src_dir: bool) -> Result<()> {
    for name in PATH_CONFIG_FILES {
        let path = root.join(name);
        if !path.is_file() {
            continue;
        }

        let content = tokio::fs::read_to_string(&path)
            .await
            .map_err(|e| alias_rewrite_failed(&path, e))?;

        let mapping_value = if src_dir {
            r#""@/*": ["./src/*"]"#
        } else {
            r#""@/*": ["./*"]"#
        };
        let rewritten = content
            .replace(r#""@/*": ["./*"]"#, mapping_value)
            .replace(r#""@/*":"#, &format!(r#""{}":"#, alias));

        tokio::fs::write(&path, rewritten)
            .await
            .map_err(|e| alias_rewrite_failed(&path, e))?;
    }

    Ok(())
}

/// Replace every literal default-alias occurrence in file bodies under `root`
///
/// Skips the compiler config files (handled by [`rewrite_alias_config`]) and
/// leaves non-UTF-8 files untouched. Any single read or write failure aborts
/// the whole step naming the file.
pub async fn rewrite_import_alias(root: &Path, alias: &str) -> Result<()> {
    let files: Vec<PathBuf> = WalkDir::new(root)
        .into_iter()
        .filter_map(std::result::Result::ok)
        .filter(|e| e.file_type().is_file())
        .filter(|e| {
            let relative = e.path().strip_prefix(root).unwrap_or(e.path());
            !PATH_CONFIG_FILES
                .iter()
                .any(|name| relative == Path::new(name))
        })
        .map(|e| e.path().to_path_buf())
        .collect();

    let prefix = Arc::new(alias_prefix(alias));
    let gate = Arc::new(Semaphore::new(REWRITE_CONCURRENCY));
    let mut tasks: JoinSet<Result<()>> = JoinSet::new();

    for path in files {
        let prefix = Arc::clone(&prefix);
        let gate = Arc::clone(&gate);
        tasks.spawn(async move {
            let _permit = gate.acquire().await.map_err(|e| AppstampError::IoError {
                message: e.to_string(),
            })?;
            rewrite_file_body(&path, &prefix).await
        });
    }

    while let Some(joined) = tasks.join_next().await {
        joined.map_err(|e| AppstampError::IoError {
            message: e.to_string(),
        })??;
    }

    Ok(())
}

async fn rewrite_file_body(path: &Path, prefix: &str) -> Result<()> {
    let bytes = tokio::fs::read(path)
        .await
        .map_err(|e| alias_rewrite_failed(path, e))?;

    // Binary content carries no alias tokens; copy stays verbatim.
    let Ok(content) = String::from_utf8(bytes) else {
        return Ok(());
    };

    if !content.contains(DEFAULT_ALIAS_PREFIX) {
        return Ok(());
    }

    let rewritten = content.replace(DEFAULT_ALIAS_PREFIX, prefix);
    tokio::fs::write(path, rewritten)
        .await
        .map_err(|e| alias_rewrite_failed(path, e))
}
