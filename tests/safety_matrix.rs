//! Safety rail matrix over the real command tree.
//!
//! Each test drives a command through [`Engine::execute`] with a mock
//! backend and a scripted confirmer, and checks both the outcome and whether
//! the backend was reached.
//!
//! # Test Categories
//!
//! 1. **Read-only commands** - never prompt
//! 2. **Confirm commands** - yes/no prompt
//! 3. **Typed-phrase commands** - exact phrase required
//! 4. **Backend failures** - domain errors map to outcomes

use eeroctl::cli::commands;
use eeroctl::core::catalog::Catalog;
use eeroctl::core::config::Config;
use eeroctl::domain::mock::{FailOn, MockBackend};
use eeroctl::domain::DomainError;
use eeroctl::engine::{Engine, ExitCode, Invocation, Parsed, RunOutcome, RunReport, Session};
use eeroctl::ui::prompts::ScriptedConfirmer;
use serde_json::json;

// =============================================================================
// Fixtures
// =============================================================================

fn catalog() -> Catalog {
    commands::catalog(&Config::default()).unwrap()
}

fn parse(catalog: &Catalog, args: &[&str]) -> Parsed {
    let tokens: Vec<String> = args.iter().map(|s| s.to_string()).collect();
    match Engine::new(catalog).parse(&tokens).unwrap() {
        Invocation::Run(parsed) => parsed,
        other => panic!("unexpected invocation: {:?}", other),
    }
}

fn run(
    args: &[&str],
    backend: &MockBackend,
    confirmer: &mut ScriptedConfirmer,
) -> RunReport {
    let catalog = catalog();
    let parsed = parse(&catalog, args);
    Engine::new(&catalog).execute(&parsed, &mut Session::new(backend, confirmer))
}

// =============================================================================
// Read-only commands
// =============================================================================

#[test]
fn read_only_commands_never_prompt() {
    for args in [
        &["network", "list"][..],
        &["network", "list", "--non-interactive"],
        &["eero", "show", "Office"],
        &["activity", "history", "--period", "week"],
    ] {
        let backend = MockBackend::new();
        let mut confirmer = ScriptedConfirmer::silent();
        let report = run(args, &backend, &mut confirmer);
        assert_eq!(report.outcome, RunOutcome::Success, "{:?}", args);
        assert!(!confirmer.was_prompted());
        assert_eq!(backend.calls().len(), 1);
    }
}

// =============================================================================
// Confirm commands
// =============================================================================

#[test]
fn confirm_command_matrix() {
    // (extra args, answers, expected outcome, backend reached)
    let cases: [(&[&str], &[&str], RunOutcome, bool); 6] = [
        (&[], &["y"], RunOutcome::Success, true),
        (&[], &["n"], RunOutcome::Aborted, false),
        (&[], &[], RunOutcome::Aborted, false),
        (&["--force"], &[], RunOutcome::Success, true),
        (&["--non-interactive"], &[], RunOutcome::SafetyRailTriggered, false),
        (&["--non-interactive", "-y"], &[], RunOutcome::Success, true),
    ];

    for (extra, answers, expected, reached) in cases {
        let mut args = vec!["device", "block", "tv"];
        args.extend_from_slice(extra);
        let backend = MockBackend::new();
        let mut confirmer = ScriptedConfirmer::new(answers.iter().copied());
        let report = run(&args, &backend, &mut confirmer);

        assert_eq!(report.outcome, expected, "{:?}", args);
        assert_eq!(!backend.calls().is_empty(), reached, "{:?}", args);
        let prompted = !extra.iter().any(|a| *a == "--force" || *a == "-y" || *a == "--non-interactive");
        assert_eq!(confirmer.was_prompted(), prompted, "{:?}", args);
    }
}

#[test]
fn confirm_prompt_names_action_and_target() {
    let backend = MockBackend::new();
    let mut confirmer = ScriptedConfirmer::new(["yes"]);
    run(&["profile", "pause", "Kids"], &backend, &mut confirmer);
    assert_eq!(confirmer.prompts(), &["Proceed with pause profile on Kids?".to_string()]);
}

#[test]
fn declined_reports_aborted_with_exit_zero() {
    let backend = MockBackend::new();
    let mut confirmer = ScriptedConfirmer::new(["no"]);
    let report = run(&["auth", "clear"], &backend, &mut confirmer);
    assert_eq!(report.outcome, RunOutcome::Aborted);
    assert_eq!(report.exit_code(), ExitCode::Success);
    assert_eq!(report.message.as_deref(), Some("Aborted."));
}

// =============================================================================
// Typed-phrase commands
// =============================================================================

#[test]
fn eero_reboot_non_interactive_is_blocked() {
    let backend = MockBackend::new();
    let mut confirmer = ScriptedConfirmer::silent();
    let report = run(
        &["eero", "reboot", "Living Room", "--non-interactive"],
        &backend,
        &mut confirmer,
    );
    assert_eq!(report.outcome, RunOutcome::SafetyRailTriggered);
    assert_eq!(report.exit_code().code(), 8);
    assert!(!confirmer.was_prompted());
    assert!(backend.calls().is_empty());
}

#[test]
fn typed_phrase_must_match_exactly() {
    for (answer, expected) in [
        ("REBOOT", RunOutcome::Success),
        ("reboot", RunOutcome::Aborted),
        (" REBOOT", RunOutcome::Aborted),
        ("y", RunOutcome::Aborted),
    ] {
        let backend = MockBackend::new();
        let mut confirmer = ScriptedConfirmer::new([answer]);
        let report = run(&["eero", "reboot", "Office"], &backend, &mut confirmer);
        assert_eq!(report.outcome, expected, "answer {:?}", answer);
    }
}

#[test]
fn network_reboot_uses_derived_phrase() {
    let backend = MockBackend::new();
    let mut confirmer = ScriptedConfirmer::new(["REBOOTNETWORK"]);
    let report = run(&["network", "reboot", "-n", "home"], &backend, &mut confirmer);
    assert_eq!(report.outcome, RunOutcome::Success);
    assert!(confirmer.prompts()[0].contains("reboot network home"));
    assert!(confirmer.prompts()[0].contains("REBOOTNETWORK"));
}

#[test]
fn later_no_force_restores_prompting() {
    let backend = MockBackend::new();
    let mut confirmer = ScriptedConfirmer::new(["REBOOT"]);
    let report = run(
        &["eero", "--force", "reboot", "Office", "--no-force"],
        &backend,
        &mut confirmer,
    );
    assert_eq!(report.outcome, RunOutcome::Success);
    assert!(confirmer.was_prompted());
}

// =============================================================================
// Backend failures
// =============================================================================

#[test]
fn domain_errors_map_to_outcomes() {
    let cases = [
        (DomainError::AuthRequired("expired".into()), RunOutcome::AuthRequired),
        (DomainError::NotFound("eero".into()), RunOutcome::NotFound),
        (DomainError::RateLimited, RunOutcome::Timeout),
        (DomainError::PremiumRequired("activity".into()), RunOutcome::PremiumRequired),
    ];
    for (error, expected) in cases {
        let backend = MockBackend::new().fail_on(FailOn::Any(error));
        let mut confirmer = ScriptedConfirmer::silent();
        let report = run(&["activity", "summary"], &backend, &mut confirmer);
        assert_eq!(report.outcome, expected);
        assert!(report.message.is_some());
        assert!(report.output.is_none());
    }
}

#[test]
fn partial_output_maps_to_partial_success() {
    let backend = MockBackend::new().respond_partial("device.block", json!({"blocked": ["tv"]}));
    let mut confirmer = ScriptedConfirmer::silent();
    let report = run(&["device", "block", "tv", "radio", "-y"], &backend, &mut confirmer);
    assert_eq!(report.outcome, RunOutcome::PartialSuccess);
    assert_eq!(report.exit_code().code(), 10);

    let call = &backend.calls()[0];
    assert_eq!(call.args("devices"), ["tv", "radio"]);
}
