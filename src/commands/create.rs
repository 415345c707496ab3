//! Project creation command
//!
//! The single user-facing flow:
//! 1. Resolve (or prompt for) the project directory and validate its name
//! 2. Verify the destination is empty or does not exist
//! 3. Fill unset options from persisted preferences
//! 4. Run the template installation pipeline
//! 5. Persist the chosen options as future defaults

use std::path::Path;

use console::style;

use crate::cli::Cli;
use crate::error::{AppstampError, Result};
use crate::installer::{self, InstallRequest};
use crate::installer::rewrite::DEFAULT_IMPORT_ALIAS;
use crate::online;
use crate::package_manager::PackageManager;
use crate::path_utils;
use crate::preferences::Preferences;
use crate::template::{self, Template};
use crate::validate::validate_npm_name;

pub async fn run(cli: Cli) -> Result<()> {
    let mut preferences = Preferences::load()?;

    if cli.reset_preferences {
        preferences.clear()?;
        println!("Preferences reset successfully");
        return Ok(());
    }

    let project_input = match cli.project_directory.as_deref().map(str::trim) {
        Some(path) if !path.is_empty() => path.to_string(),
        _ => prompt_project_directory()?,
    };

    let root = path_utils::resolve_project_path(&project_input)?;
    let app_name = root
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or(project_input);

    let validation = validate_npm_name(&app_name);
    if !validation.valid {
        eprintln!(
            "Could not create a project called {} because of npm naming restrictions:",
            style(format!("\"{}\"", app_name)).red()
        );
        for problem in &validation.problems {
            eprintln!("    {} {}", style("*").red().bold(), problem);
        }
        return Err(AppstampError::InvalidProjectName {
            name: app_name,
            problems: validation.problems,
        });
    }

    if root.exists() && !path_utils::is_folder_empty(&root, &app_name)? {
        return Err(AppstampError::DestinationNotEmpty {
            path: root.display().to_string(),
        });
    }
    tokio::fs::create_dir_all(&root).await?;

    // Flags win; persisted preferences fill in whatever was not given
    let src_dir = cli.src_dir || preferences.get_bool("srcDir").unwrap_or(false);
    let eslint = cli.eslint || preferences.get_bool("eslint").unwrap_or(false);
    let import_alias = cli
        .import_alias
        .clone()
        .or_else(|| preferences.get_str("importAlias").map(str::to_string))
        .unwrap_or_else(|| DEFAULT_IMPORT_ALIAS.to_string());

    let package_manager = cli
        .requested_package_manager()
        .unwrap_or_else(PackageManager::detect);

    let request = InstallRequest {
        app_name: app_name.clone(),
        root: root.clone(),
        is_online: online::is_online().await,
        template: Template::new(cli.template, cli.mode()),
        src_dir,
        import_alias: import_alias.clone(),
        eslint,
        package_manager,
    };

    installer::install_template(&request, &template::templates_root()?).await?;

    preferences.set("srcDir", src_dir);
    preferences.set("eslint", eslint);
    preferences.set("importAlias", import_alias.as_str());
    preferences.save()?;

    println!();
    println!(
        "{} Created {} at {}",
        style("Success!").green().bold(),
        style(&app_name).cyan(),
        root.display()
    );
    Ok(())
}

fn prompt_project_directory() -> Result<String> {
    let answer = inquire::Text::new("What is your project named?")
        .with_default("my-app")
        .with_validator(|input: &str| {
            let name = Path::new(input.trim())
                .file_name()
                .map_or_else(|| input.trim().to_string(), |n| n.to_string_lossy().to_string());
            let validation = validate_npm_name(&name);
            if validation.valid {
                Ok(inquire::validator::Validation::Valid)
            } else {
                let problem = validation.problems.first().cloned().unwrap_or_default();
                Ok(inquire::validator::Validation::Invalid(
                    format!("Invalid project name: {}", problem).into(),
                ))
            }
        })
        .prompt()?;
    Ok(answer.trim().to_string())
}
