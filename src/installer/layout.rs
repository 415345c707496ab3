//! Optional `src/` directory relocation
//!
//! Some teams keep application sources under `src/` instead of the project
//! root. When requested, the known top-level source directories are moved
//! under a freshly created `src/`, and the entry-point file's
//! self-referential path literal is updated to match.

use std::path::Path;

use crate::error::{Result, file_read_failed, file_write_failed, layout_move_failed};
use crate::template::Template;

/// Top-level directories relocated under `src/` when present
pub const SRC_DIR_NAMES: &[&str] = &["app", "pages", "server", "styles"];

/// Move the known source directories under `root/src` and fix up the
/// entry-point path literal.
///
/// A directory missing from the template is tolerated; any other move
/// failure is fatal.
pub async fn relocate_to_src_dir(root: &Path, template: Template) -> Result<()> {
    let src_root = root.join("src");
    tokio::fs::create_dir_all(&src_root)
        .await
        .map_err(|e| file_write_failed(&src_root, e))?;

    for name in SRC_DIR_NAMES {
        let from = root.join(name);
        let to = src_root.join(name);
        if let Err(e) = tokio::fs::rename(&from, &to).await {
            if e.kind() == std::io::ErrorKind::NotFound {
                continue;
            }
            return Err(layout_move_failed(&from, e));
        }
    }

    rewrite_entry_point(root, template).await
}

/// Update the "Get started by editing ..." path literal in the entry point
/// to its new `src/`-prefixed location. A single fixed substitution, not a
/// general rewrite.
async fn rewrite_entry_point(root: &Path, template: Template) -> Result<()> {
    let (dir, stem, token) = if template.is_app_layout() {
        ("app", "page", "app/page")
    } else {
        ("pages", "index", "pages/index")
    };
    let entry = root
        .join("src")
        .join(dir)
        .join(format!("{}.{}", stem, template.mode.page_extension()));

    let content = tokio::fs::read_to_string(&entry)
        .await
        .map_err(|e| file_read_failed(&entry, e))?;

    tokio::fs::write(&entry, content.replace(token, &format!("src/{}", token)))
        .await
        .map_err(|e| file_write_failed(&entry, e))
}
