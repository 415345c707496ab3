//! Package manager selection
//!
//! The generated project's dependencies are installed by an external
//! JavaScript package manager. The user can request one explicitly with a
//! `--use-*` flag; otherwise the manager that launched this process is
//! detected from `npm_config_user_agent`, falling back to npm.

use std::fmt;

/// Supported JavaScript package managers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PackageManager {
    Npm,
    Pnpm,
    Yarn,
    Bun,
}

impl PackageManager {
    /// Executable name resolved via `PATH`
    pub fn executable(&self) -> &'static str {
        match self {
            PackageManager::Npm => "npm",
            PackageManager::Pnpm => "pnpm",
            PackageManager::Yarn => "yarn",
            PackageManager::Bun => "bun",
        }
    }

    /// Detect the package manager from an `npm_config_user_agent` value
    ///
    /// Package managers set this variable for processes they spawn, so
    /// running `pnpm create ...` installs with pnpm without extra flags.
    pub fn from_user_agent(user_agent: Option<&str>) -> Self {
        match user_agent {
            Some(agent) if agent.starts_with("yarn") => PackageManager::Yarn,
            Some(agent) if agent.starts_with("pnpm") => PackageManager::Pnpm,
            Some(agent) if agent.starts_with("bun") => PackageManager::Bun,
            _ => PackageManager::Npm,
        }
    }

    /// Detect from the current process environment
    pub fn detect() -> Self {
        let agent = std::env::var("npm_config_user_agent").ok();
        Self::from_user_agent(agent.as_deref())
    }
}

impl fmt::Display for PackageManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.executable())
    }
}
