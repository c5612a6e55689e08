//! End-to-end tests of the `eero` binary.
//!
//! Every test points the configuration search at a fresh temporary
//! directory so the developer's own config never leaks in.

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

/// An `eero` command isolated from the user's environment.
fn eero(home: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("eero").unwrap();
    cmd.env("HOME", home.path())
        .env("XDG_CONFIG_HOME", home.path().join("xdg"))
        .env_remove("EERO_CONFIG")
        .env_remove("EERO_LOG");
    cmd
}

#[test]
fn version_flag() {
    let home = TempDir::new().unwrap();
    eero(&home)
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::starts_with("eero "));
}

#[test]
fn help_lists_commands_and_exit_codes() {
    let home = TempDir::new().unwrap();
    eero(&home)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("network"))
        .stdout(predicate::str::contains("troubleshoot"))
        .stdout(predicate::str::contains("Exit codes"));
}

#[test]
fn subcommand_help_is_scoped() {
    let home = TempDir::new().unwrap();
    eero(&home)
        .args(["device", "block", "-h"])
        .assert()
        .success()
        .stdout(predicate::str::contains("DEVICES"));
}

#[test]
fn output_option_position_is_free() {
    let home = TempDir::new().unwrap();
    for args in [
        &["--output", "json", "network", "list"][..],
        &["network", "list", "--output", "json"],
        &["network", "--output", "json", "list"],
    ] {
        eero(&home)
            .args(args)
            .assert()
            .success()
            .stdout(predicate::str::contains("\"command\": \"network.list\""));
    }
}

#[test]
fn usage_errors_exit_two() {
    let home = TempDir::new().unwrap();
    eero(&home)
        .args(["network", "lst"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("did you mean 'list'"))
        .stderr(predicate::str::contains("Run 'eero network --help' for usage."));

    eero(&home)
        .args(["network", "list", "--output", "xml"])
        .assert()
        .code(2)
        .stdout(predicate::str::is_empty());

    eero(&home)
        .args(["troubleshoot", "ping"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("--target"));
}

#[test]
fn group_without_subcommand_prints_help() {
    let home = TempDir::new().unwrap();
    eero(&home)
        .arg("eero")
        .assert()
        .code(2)
        .stderr(predicate::str::contains("requires a subcommand"))
        .stderr(predicate::str::contains("reboot"));
}

#[test]
fn non_interactive_reboot_is_blocked() {
    let home = TempDir::new().unwrap();
    eero(&home)
        .args(["eero", "reboot", "Living Room", "--non-interactive"])
        .assert()
        .code(8)
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("--force"));
}

#[test]
fn declined_prompt_aborts_cleanly() {
    let home = TempDir::new().unwrap();
    eero(&home)
        .args(["device", "block", "tv"])
        .write_stdin("n\n")
        .assert()
        .success()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("Proceed with block devices on tv?"))
        .stderr(predicate::str::contains("Aborted."));
}

#[test]
fn typed_phrase_confirms() {
    let home = TempDir::new().unwrap();
    eero(&home)
        .args(["-o", "json", "eero", "reboot", "Office"])
        .write_stdin("REBOOT\n")
        .assert()
        .success()
        .stderr(predicate::str::contains("To confirm, type REBOOT"))
        .stdout(predicate::str::contains("\"eero.reboot\""));
}

#[test]
fn force_skips_prompt() {
    let home = TempDir::new().unwrap();
    eero(&home)
        .args(["network", "reboot", "--yes", "--non-interactive", "-o", "json"])
        .assert()
        .success()
        .stderr(predicate::str::contains("To confirm").not());
}

#[test]
fn explicit_config_sets_defaults() {
    let home = TempDir::new().unwrap();
    let path = home.path().join("custom.toml");
    std::fs::write(
        &path,
        "default_output = \"json\"\npreferred_network_id = \"net-9\"\nnon_interactive = true\n",
    )
    .unwrap();

    eero(&home)
        .env("EERO_CONFIG", &path)
        .args(["network", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"network\": \"net-9\""));

    // non_interactive from config still blocks; --interactive would prompt.
    eero(&home)
        .env("EERO_CONFIG", &path)
        .args(["auth", "clear"])
        .assert()
        .code(8);
    eero(&home)
        .env("EERO_CONFIG", &path)
        .args(["auth", "clear", "--interactive"])
        .write_stdin("y\n")
        .assert()
        .success();
}

#[test]
fn missing_explicit_config_is_an_error() {
    let home = TempDir::new().unwrap();
    eero(&home)
        .env("EERO_CONFIG", home.path().join("absent.toml"))
        .args(["network", "list"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("failed to load configuration"));
}

#[test]
fn legacy_config_warns() {
    let home = TempDir::new().unwrap();
    let dir = home.path().join(".config/eeroctl");
    std::fs::create_dir_all(&dir).unwrap();
    std::fs::write(dir.join("config.json"), r#"{"default_output": "yaml"}"#).unwrap();

    eero(&home)
        .args(["network", "list"])
        .assert()
        .success()
        .stderr(predicate::str::contains("legacy config"))
        .stdout(predicate::str::contains("command: network.list"));
}

#[test]
fn completion_script() {
    let home = TempDir::new().unwrap();
    eero(&home)
        .args(["completion", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("troubleshoot"));

    eero(&home).args(["completion", "tcsh"]).assert().code(2);
}
