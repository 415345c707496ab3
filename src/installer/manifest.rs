//! Package manifest synthesis
//!
//! Builds the generated project's `package.json` as an in-memory document
//! and serializes it deterministically: keys keep construction order,
//! two-space indentation, platform line ending at end of file. An empty
//! dependency group is omitted from the output entirely.
//!
//! Script commands and dependency version ranges are fixed tables; nothing
//! in them derives from user input.

use std::path::{Path, PathBuf};

use serde::Serialize;
use serde_json::{Map, Value, json};

use crate::error::{Result, manifest_write_failed};
use crate::template::TemplateMode;

/// Name of the manifest file written into the project root
pub const MANIFEST_FILE: &str = "package.json";

/// Build/test/lint scripts installed into every generated project
const SCRIPTS: &[(&str, &str)] = &[
    ("dev", "yarn build-server && yarn start"),
    ("build", "yarn build-client:release && yarn build-server"),
    ("build-client", "webpack"),
    ("build-client:release", "webpack --env production"),
    (
        "clean:server",
        "rimraf dist/server && rimraf dist/webpack.config.js",
    ),
    (
        "build-server",
        "yarn clean:server && yarn tsc -p tsconfig.server.json",
    ),
    ("start", "node dist/server"),
    ("test", "jest --watch"),
    (
        "test:ci",
        "yarn jest --bail --silent --no-watchman --colors --config=jest.config.js",
    ),
    ("test:once", "jest --no-watch"),
    ("lint", "eslint . --cache --quiet --ext .js,.ts,.tsx,.json"),
    ("format", "prettier --write src/**/*.ts{,x}"),
    ("typecheck", "tsc --noEmit --pretty"),
    ("pre-commit", "lint-staged"),
    ("pre-push", "lint-prepush"),
];

/// Runtime dependencies, version-pinned
const DEPENDENCIES: &[(&str, &str)] = &[
    ("axios", "1.4.0"),
    ("cors", "^2.8.5"),
    ("dotenv", "^16.3.1"),
    ("express", "^4.18.2"),
    ("express-static-gzip", "^2.1.7"),
    ("handlebars", "^4.7.7"),
    ("http-proxy", "^1.18.1"),
    ("winston", "^3.10.0"),
];

/// Development dependencies shared by both template modes
const DEV_DEPENDENCIES: &[(&str, &str)] = &[
    ("@babel/core", "^7.22.10"),
    ("@babel/preset-env", "^7.22.10"),
    ("@babel/preset-react", "^7.22.5"),
    ("babel-loader", "^9.1.2"),
    ("clean-webpack-plugin", "^4.0.0"),
    ("compression-webpack-plugin", "^10.0.0"),
    ("css-loader", "^6.7.3"),
    ("jest", "^29.3.1"),
    ("react", "18.2.0"),
    ("react-dom", "^18.2.0"),
    ("react-router-dom", "^5.3.3"),
    ("rimraf", "^5.0.1"),
    ("style-loader", "^3.3.3"),
    ("styled-components", "^5.3.11"),
    ("webpack", "5.88.2"),
    ("webpack-cli", "5.1.4"),
    ("webpack-dev-middleware", "6.1.1"),
    ("webpack-hot-middleware", "2.25.4"),
];

/// Extra development dependencies for typed templates
const TS_DEV_DEPENDENCIES: &[(&str, &str)] = &[
    ("@babel/preset-typescript", "^7.22.5"),
    ("@types/cors", "^2.8.13"),
    ("@types/express", "^4.17.15"),
    ("@types/jest", "^29.2.5"),
    ("@types/node", "^18.11.18"),
    ("@types/react", "18.0.26"),
    ("@types/react-dom", "^18.0.10"),
    ("fork-ts-checker-webpack-plugin", "8.0.0"),
    ("typescript", "^4.9.5"),
];

/// Extra development dependencies when linting is enabled
const LINT_DEV_DEPENDENCIES: &[(&str, &str)] = &[
    ("@typescript-eslint/eslint-plugin", "^5.56.0"),
    ("@typescript-eslint/parser", "^5.56.0"),
    ("eslint", "^8.36.0"),
    ("eslint-config-prettier", "^9.0.0"),
    ("eslint-plugin-import", "^2.27.5"),
    ("eslint-plugin-jest", "^27.2.1"),
    ("eslint-plugin-react", "^7.32.2"),
    ("eslint-plugin-react-hooks", "^4.6.0"),
    ("lint-prepush", "^2.1.0"),
    ("lint-staged", "^14.0.0"),
    ("prettier", "^3.0.0"),
];

fn table_to_map(table: &[(&str, &str)]) -> Map<String, Value> {
    table
        .iter()
        .map(|(name, value)| ((*name).to_string(), Value::String((*value).to_string())))
        .collect()
}

/// Structured representation of the generated package descriptor
#[derive(Debug, Serialize)]
pub struct ManifestDocument {
    name: String,
    version: String,
    private: bool,
    scripts: Map<String, Value>,
    #[serde(rename = "lint-staged")]
    lint_staged: Value,
    #[serde(rename = "lint-prepush")]
    lint_prepush: Value,
    #[serde(skip_serializing_if = "Map::is_empty")]
    dependencies: Map<String, Value>,
    #[serde(rename = "devDependencies", skip_serializing_if = "Map::is_empty")]
    dev_dependencies: Map<String, Value>,
}

impl ManifestDocument {
    /// Build a manifest from explicit dependency tables
    pub fn new(
        app_name: &str,
        dependencies: &[(&str, &str)],
        dev_dependencies: &[(&str, &str)],
    ) -> Self {
        Self {
            name: app_name.to_string(),
            version: "0.1.0".to_string(),
            private: true,
            scripts: table_to_map(SCRIPTS),
            lint_staged: json!({
                "src/**/*.{js,ts,tsx,json}": "prettier --write",
            }),
            lint_prepush: json!({
                "verbose": false,
                "tasks": {
                    "src/**/*.{js,ts,tsx,json}": {
                        "concurrent": [
                            "yarn eslint --cache --quiet --ext .js,.ts,.tsx,.json",
                            "bash -c tsc",
                            "yarn jest --bail --no-watchman --colors --silent --config=jest.config.js --findRelatedTests",
                        ],
                    },
                },
            }),
            dependencies: table_to_map(dependencies),
            dev_dependencies: table_to_map(dev_dependencies),
        }
    }

    /// Assemble the manifest for a template from the fixed tables
    ///
    /// Typed templates pull in type definitions and the TypeScript compiler;
    /// linting adds the eslint/prettier toolchain.
    pub fn for_template(app_name: &str, mode: TemplateMode, eslint: bool) -> Self {
        let mut dev_dependencies: Vec<(&str, &str)> = DEV_DEPENDENCIES.to_vec();
        if mode == TemplateMode::Ts {
            dev_dependencies.extend_from_slice(TS_DEV_DEPENDENCIES);
        }
        if eslint {
            dev_dependencies.extend_from_slice(LINT_DEV_DEPENDENCIES);
        }

        Self::new(app_name, DEPENDENCIES, &dev_dependencies)
    }

    /// Runtime dependency names, in serialized order
    pub fn dependency_names(&self) -> impl Iterator<Item = &str> {
        self.dependencies.keys().map(String::as_str)
    }

    /// Development dependency names, in serialized order
    pub fn dev_dependency_names(&self) -> impl Iterator<Item = &str> {
        self.dev_dependencies.keys().map(String::as_str)
    }

    pub fn has_dev_dependencies(&self) -> bool {
        !self.dev_dependencies.is_empty()
    }

    /// Serialize with two-space indentation and a trailing platform line ending
    pub fn to_manifest_string(&self) -> Result<String> {
        let eol = if cfg!(windows) { "\r\n" } else { "\n" };
        let body = serde_json::to_string_pretty(self)
            .map_err(|e| manifest_write_failed(Path::new(MANIFEST_FILE), e))?;
        Ok(format!("{}{}", body, eol))
    }

    /// Write the serialized manifest to `root/package.json`, overwriting any
    /// existing file without confirmation.
    pub async fn write(&self, root: &Path) -> Result<PathBuf> {
        let path = root.join(MANIFEST_FILE);
        let content = self.to_manifest_string()?;
        tokio::fs::write(&path, content)
            .await
            .map_err(|e| manifest_write_failed(&path, e))?;
        Ok(path)
    }
}
