//! Template selection and filesystem resolution
//!
//! A template is identified by a kind (the project flavor) and a mode (typed
//! or untyped sources) and resolves to a subtree of the templates root:
//! `<templates_root>/<kind>/<mode>/**`. The pipeline treats the files inside
//! that subtree as opaque bytes apart from a fixed set of textual
//! substitutions.

use std::path::{Path, PathBuf};

use clap::ValueEnum;

use crate::error::{AppstampError, Result};

/// Environment variable overriding the built-in templates location
pub const TEMPLATES_DIR_ENV: &str = "APPSTAMP_TEMPLATES_DIR";

/// Project flavor shipped with the CLI
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum TemplateKind {
    /// Classic client + server layout
    Default,
    /// App-router layout
    App,
}

impl TemplateKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TemplateKind::Default => "default",
            TemplateKind::App => "app",
        }
    }
}

/// Source language variant of a template
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TemplateMode {
    /// TypeScript sources
    Ts,
    /// JavaScript sources
    Js,
}

impl TemplateMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            TemplateMode::Ts => "ts",
            TemplateMode::Js => "js",
        }
    }

    /// Extension used by the template's page/entry-point files
    pub fn page_extension(&self) -> &'static str {
        match self {
            TemplateMode::Ts => "tsx",
            TemplateMode::Js => "js",
        }
    }
}

/// A template selected once at invocation time
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Template {
    pub kind: TemplateKind,
    pub mode: TemplateMode,
}

impl Template {
    pub fn new(kind: TemplateKind, mode: TemplateMode) -> Self {
        Self { kind, mode }
    }

    /// Whether this template keeps its pages under `app/` rather than `pages/`
    pub fn is_app_layout(&self) -> bool {
        matches!(self.kind, TemplateKind::App)
    }

    /// Resolve the template subtree under `templates_root`
    ///
    /// Fails when the resolved directory does not exist, so the pipeline
    /// never starts copying from a missing source.
    pub fn resolve(&self, templates_root: &Path) -> Result<PathBuf> {
        let dir = templates_root
            .join(self.kind.as_str())
            .join(self.mode.as_str());
        if !dir.is_dir() {
            return Err(AppstampError::TemplateNotFound {
                path: dir.display().to_string(),
            });
        }
        Ok(dir)
    }
}

/// Locate the templates root directory
///
/// `APPSTAMP_TEMPLATES_DIR` wins when set; otherwise templates are expected
/// next to the installed binary.
pub fn templates_root() -> Result<PathBuf> {
    if let Ok(dir) = std::env::var(TEMPLATES_DIR_ENV) {
        return Ok(PathBuf::from(dir));
    }

    let exe = std::env::current_exe()?;
    let base = exe.parent().map(Path::to_path_buf).unwrap_or_default();
    Ok(base.join("templates"))
}
