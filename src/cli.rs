//! CLI definitions using clap derive API

use clap::builder::{Styles, styling::AnsiColor};
use clap::Parser;

use crate::package_manager::PackageManager;
use crate::template::{TemplateKind, TemplateMode};

/// appstamp - project scaffolding from maintained templates
#[derive(Parser, Debug)]
#[command(
    name = "appstamp",
    author,
    version,
    color = clap::ColorChoice::Always,
    styles = Styles::styled()
        .header(AnsiColor::Green.on_default().bold())
        .usage(AnsiColor::Green.on_default().bold())
        .literal(AnsiColor::Cyan.on_default().bold())
        .placeholder(AnsiColor::Cyan.on_default()),
    about = "Scaffold a production-ready web/server project from a template",
    long_about = "appstamp copies a maintained application template into a new directory, \
                  wires per-project configuration (import alias, directory layout, package \
                  manifest) and installs dependencies with your package manager.",
    after_help = "\x1b[1m\x1b[32mExamples:\x1b[0m\n    \
                  appstamp my-app\n    \
                  appstamp my-app --js\n    \
                  appstamp my-app --src-dir --import-alias \"~/*\"\n    \
                  appstamp my-app --template app --use-pnpm\n\n\
                  \x1b[1m\x1b[32mDocumentation:\x1b[0m\n    \
                  https://github.com/appstamp/appstamp"
)]
pub struct Cli {
    /// Directory to create the project in (also the project name)
    pub project_directory: Option<String>,

    /// Initialize as a TypeScript project (default)
    #[arg(long = "ts", visible_alias = "typescript", group = "language")]
    pub typescript: bool,

    /// Initialize as a JavaScript project
    #[arg(long = "js", visible_alias = "javascript", group = "language")]
    pub javascript: bool,

    /// Template flavor to install
    #[arg(long, value_enum, default_value = "default")]
    pub template: TemplateKind,

    /// Initialize with eslint config
    #[arg(long)]
    pub eslint: bool,

    /// Initialize inside a `src/` directory
    #[arg(long = "src-dir")]
    pub src_dir: bool,

    /// Import alias to configure (default "@/*")
    #[arg(long = "import-alias", value_name = "alias-to-configure")]
    pub import_alias: Option<String>,

    /// Bootstrap the application using npm
    #[arg(long = "use-npm", group = "pm")]
    pub use_npm: bool,

    /// Bootstrap the application using pnpm
    #[arg(long = "use-pnpm", group = "pm")]
    pub use_pnpm: bool,

    /// Bootstrap the application using Yarn
    #[arg(long = "use-yarn", group = "pm")]
    pub use_yarn: bool,

    /// Bootstrap the application using Bun
    #[arg(long = "use-bun", group = "pm")]
    pub use_bun: bool,

    /// Reset any stored preferences and exit
    #[arg(long = "reset-preferences")]
    pub reset_preferences: bool,
}

impl Cli {
    /// Source language variant selected by the `--ts`/`--js` flags
    pub fn mode(&self) -> TemplateMode {
        if self.javascript {
            TemplateMode::Js
        } else {
            TemplateMode::Ts
        }
    }

    /// Explicitly requested package manager, if any
    pub fn requested_package_manager(&self) -> Option<PackageManager> {
        if self.use_npm {
            Some(PackageManager::Npm)
        } else if self.use_pnpm {
            Some(PackageManager::Pnpm)
        } else if self.use_yarn {
            Some(PackageManager::Yarn)
        } else if self.use_bun {
            Some(PackageManager::Bun)
        } else {
            None
        }
    }
}
