//! Dependency installation via an external package manager
//!
//! This is the single point where the pipeline yields control to an
//! uncontrolled external program. The child inherits our standard streams so
//! the user watches the installer's own output; its exit code is the only
//! signal consumed. A non-zero exit maps to a typed failure carrying the
//! reconstructed command line for diagnostic display. No retry, no output
//! parsing.

use std::ffi::OsStr;
use std::path::Path;

use console::style;
use tokio::process::Command;

use crate::error::{AppstampError, Result};
use crate::package_manager::PackageManager;

/// Environment overrides handed to the spawned installer
///
/// Carried as an explicit record rather than mutated process-global state so
/// the spawn site states exactly what the child sees.
#[derive(Debug, Clone)]
pub struct InstallerEnv {
    overrides: Vec<(String, String)>,
}

impl Default for InstallerEnv {
    fn default() -> Self {
        Self {
            overrides: vec![
                // Disable ad-blocker detection telemetry in sub-tools
                ("ADBLOCK".to_string(), "1".to_string()),
                // pnpm skips devDependencies when NODE_ENV is production
                ("NODE_ENV".to_string(), "development".to_string()),
                // Silence donation prompts from sub-tools
                ("DISABLE_OPENCOLLECTIVE".to_string(), "1".to_string()),
            ],
        }
    }
}

impl InstallerEnv {
    pub fn overrides(&self) -> impl Iterator<Item = (&str, &str)> {
        self.overrides
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

/// Arguments for the install subcommand, offline mode appended last
pub fn install_args(is_online: bool) -> Vec<&'static str> {
    let mut args = vec!["install"];
    if !is_online {
        args.push("--offline");
    }
    args
}

/// The full command line as shown in failure diagnostics
pub fn reconstruct_command(package_manager: PackageManager, args: &[&str]) -> String {
    format!("{} {}", package_manager.executable(), args.join(" "))
}

/// Run `<pm> install` in `root`, falling back to the local cache when offline
pub async fn install(
    package_manager: PackageManager,
    root: &Path,
    is_online: bool,
    env: &InstallerEnv,
) -> Result<()> {
    if !is_online {
        println!(
            "{}",
            style("You appear to be offline.\nFalling back to the local cache.").yellow()
        );
    }

    let args = install_args(is_online);
    let command = reconstruct_command(package_manager, &args);
    run_install_process(package_manager.executable(), &command, &args, root, env).await
}

/// Spawn the installer process and map its exit status
///
/// Split from [`install`] so tests can point `program` at a stub executable.
pub async fn run_install_process(
    program: impl AsRef<OsStr>,
    command: &str,
    args: &[&str],
    root: &Path,
    env: &InstallerEnv,
) -> Result<()> {
    let status = Command::new(program)
        .args(args)
        .current_dir(root)
        .envs(env.overrides())
        .status()
        .await
        .map_err(|e| AppstampError::IoError {
            message: format!("failed to spawn '{}': {}", command, e),
        })?;

    if !status.success() {
        return Err(AppstampError::InstallCommandFailed {
            command: command.to_string(),
        });
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_install_args_online() {
        assert_eq!(install_args(true), vec!["install"]);
    }

    #[test]
    fn test_install_args_offline() {
        assert_eq!(install_args(false), vec!["install", "--offline"]);
    }

    #[test]
    fn test_command_reconstruction() {
        assert_eq!(
            reconstruct_command(PackageManager::Yarn, &install_args(true)),
            "yarn install"
        );
        assert_eq!(
            reconstruct_command(PackageManager::Npm, &install_args(false)),
            "npm install --offline"
        );
    }

    #[test]
    fn test_default_env_overrides() {
        let env = InstallerEnv::default();
        let pairs: Vec<_> = env.overrides().collect();
        assert!(pairs.contains(&("ADBLOCK", "1")));
        assert!(pairs.contains(&("NODE_ENV", "development")));
        assert!(pairs.contains(&("DISABLE_OPENCOLLECTIVE", "1")));
    }

    #[cfg(unix)]
    mod process {
        use super::*;
        use std::os::unix::fs::PermissionsExt;
        use std::path::PathBuf;
        use tempfile::TempDir;

        fn stub_installer(dir: &TempDir, exit_code: i32) -> PathBuf {
            let path = dir.path().join("stub-pm");
            std::fs::write(&path, format!("#!/bin/sh\nexit {}\n", exit_code)).unwrap();
            std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();
            path
        }

        #[tokio::test]
        async fn test_zero_exit_maps_to_success() {
            let temp = TempDir::new().unwrap();
            let stub = stub_installer(&temp, 0);

            let result = run_install_process(
                &stub,
                "npm install",
                &install_args(true),
                temp.path(),
                &InstallerEnv::default(),
            )
            .await;
            assert!(result.is_ok());
        }

        #[tokio::test]
        async fn test_nonzero_exit_carries_reconstructed_command() {
            let temp = TempDir::new().unwrap();
            let stub = stub_installer(&temp, 1);

            let err = run_install_process(
                &stub,
                "npm install --offline",
                &install_args(false),
                temp.path(),
                &InstallerEnv::default(),
            )
            .await
            .unwrap_err();

            match err {
                AppstampError::InstallCommandFailed { command } => {
                    assert_eq!(command, "npm install --offline");
                }
                other => panic!("expected InstallCommandFailed, got {:?}", other),
            }
        }
    }
}
