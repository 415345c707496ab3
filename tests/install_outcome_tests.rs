//! End-to-end tests for dependency install outcome mapping

mod common;

use common::TestEnv;
use predicates::prelude::*;

#[cfg(unix)]
#[test]
fn installer_exit_zero_yields_success() {
    let env = TestEnv::new();
    env.seed_default_template();
    env.stub_package_manager(0);

    env.command()
        .arg("my-app")
        .assert()
        .success()
        .stdout(predicate::str::contains("Success!"));

    // The stub received the install subcommand
    assert!(env.recorded_invocation().starts_with("install"));
}

#[cfg(unix)]
#[test]
fn installer_nonzero_exit_reports_failing_command() {
    let env = TestEnv::new();
    env.seed_default_template();
    env.stub_package_manager(1);

    env.command()
        .arg("my-app")
        .assert()
        .failure()
        .stdout(
            predicate::str::contains("Aborting installation.")
                .and(predicate::str::contains("npm install"))
                .and(predicate::str::contains("has failed.")),
        );
}

#[cfg(unix)]
#[test]
fn explicit_package_manager_flag_is_respected() {
    let env = TestEnv::new();
    env.seed_default_template();
    env.stub_package_manager_named("yarn", 0);

    env.command()
        .args(["my-app", "--use-yarn"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Using yarn."));

    assert!(env.recorded_invocation().starts_with("install"));
}
