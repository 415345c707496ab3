//! Common test utilities for appstamp integration tests

use std::path::PathBuf;

use tempfile::TempDir;

/// A sandboxed environment for driving the CLI end to end: its own
/// templates root, preference store, stub package manager and working
/// directory.
pub struct TestEnv {
    temp: TempDir,
}

#[allow(dead_code)]
impl TestEnv {
    pub fn new() -> Self {
        let temp = TempDir::new().expect("Failed to create temp directory");
        for dir in ["templates", "config", "bin", "work"] {
            std::fs::create_dir_all(temp.path().join(dir)).expect("Failed to create test dir");
        }
        Self { temp }
    }

    pub fn templates_dir(&self) -> PathBuf {
        self.temp.path().join("templates")
    }

    pub fn config_dir(&self) -> PathBuf {
        self.temp.path().join("config")
    }

    pub fn work_dir(&self) -> PathBuf {
        self.temp.path().join("work")
    }

    /// Path of the project the CLI will create under the working directory
    pub fn project_path(&self, name: &str) -> PathBuf {
        self.work_dir().join(name)
    }

    /// Write a file into a template subtree, e.g. `("default/ts", "gitignore", ...)`
    pub fn write_template_file(&self, subtree: &str, relative: &str, content: &str) {
        let path = self.templates_dir().join(subtree).join(relative);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).expect("Failed to create template parent dir");
        }
        std::fs::write(&path, content).expect("Failed to write template file");
    }

    /// Seed a minimal `default/ts` template covering the rename table and
    /// alias tokens
    pub fn seed_default_template(&self) {
        self.write_template_file("default/ts", "gitignore", "node_modules\ndist\n");
        self.write_template_file("default/ts", "npmrc", "engine-strict=true\n");
        self.write_template_file("default/ts", "README-template.md", "# My project\n");
        self.write_template_file("default/ts", "foo.ts", "export const foo = 1;\n");
        self.write_template_file(
            "default/ts",
            "tsconfig.json",
            "{\n  \"compilerOptions\": {\n    \"paths\": {\n      \"@/*\": [\"./*\"]\n    }\n  }\n}\n",
        );
        self.write_template_file(
            "default/ts",
            "pages/index.tsx",
            "import { api } from '@/api';\nimport { log } from '@/log';\n// edit pages/index\n",
        );
        self.write_template_file(
            "default/ts",
            "server/index.ts",
            "import { routes } from '@/routes';\n",
        );
    }

    /// Install a stub package manager named `npm` on the child's PATH that
    /// records its arguments and exits with `exit_code`
    #[cfg(unix)]
    pub fn stub_package_manager(&self, exit_code: i32) {
        self.stub_package_manager_named("npm", exit_code);
    }

    /// Install a stub executable under the given package manager name
    #[cfg(unix)]
    pub fn stub_package_manager_named(&self, name: &str, exit_code: i32) {
        use std::os::unix::fs::PermissionsExt;

        let log = self.temp.path().join("invocation.log");
        let script = self.temp.path().join("bin").join(name);
        std::fs::write(
            &script,
            format!("#!/bin/sh\necho \"$@\" >> \"{}\"\nexit {}\n", log.display(), exit_code),
        )
        .expect("Failed to write stub package manager");
        std::fs::set_permissions(&script, std::fs::Permissions::from_mode(0o755))
            .expect("Failed to mark stub executable");
    }

    /// Arguments the stub package manager was invoked with
    pub fn recorded_invocation(&self) -> String {
        std::fs::read_to_string(self.temp.path().join("invocation.log"))
            .expect("stub package manager was never invoked")
            .trim()
            .to_string()
    }

    /// A CLI invocation wired to this environment
    pub fn command(&self) -> assert_cmd::Command {
        let mut cmd =
            assert_cmd::Command::cargo_bin("appstamp").expect("Failed to locate appstamp binary");

        let bin = self.temp.path().join("bin");
        let path = std::env::var_os("PATH").unwrap_or_default();
        let mut paths: Vec<PathBuf> = vec![bin];
        paths.extend(std::env::split_paths(&path));
        let joined = std::env::join_paths(paths).expect("Failed to join PATH");

        cmd.current_dir(self.work_dir())
            .env("APPSTAMP_TEMPLATES_DIR", self.templates_dir())
            .env("APPSTAMP_CONFIG_DIR", self.config_dir())
            .env("PATH", joined)
            // Keep detection deterministic: the stub is installed as `npm`
            .env_remove("npm_config_user_agent");
        cmd
    }
}
