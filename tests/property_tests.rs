//! Property-based tests for option resolution and exit codes.
//!
//! These tests use proptest to verify invariants hold across
//! randomly generated command lines.

use proptest::prelude::*;

use eeroctl::cli::commands;
use eeroctl::core::catalog::Catalog;
use eeroctl::core::config::Config;
use eeroctl::core::options::OutputFormat;
use eeroctl::engine::{Engine, ExitCode, Invocation, RunOutcome};

fn catalog() -> Catalog {
    commands::catalog(&Config::default()).unwrap()
}

/// Strategy for an output format name.
fn format_name() -> impl Strategy<Value = String> {
    prop::sample::select(OutputFormat::names())
}

/// Strategy for `--output` placements along `network dns show`.
///
/// Each entry is (depth, format); depth 0 is before `network`, 3 is after
/// `show`.
fn placements() -> impl Strategy<Value = Vec<(usize, String)>> {
    prop::collection::vec((0usize..4, format_name()), 0..6)
}

/// Build the command line for a set of placements.
fn command_line(placements: &[(usize, String)]) -> Vec<String> {
    let words = ["network", "dns", "show"];
    let mut tokens = Vec::new();
    for depth in 0..4 {
        for (d, format) in placements {
            if *d == depth {
                tokens.push("--output".to_string());
                tokens.push(format.clone());
            }
        }
        if let Some(word) = words.get(depth) {
            tokens.push(word.to_string());
        }
    }
    tokens
}

/// Deepest placement wins; at equal depth, the last one.
fn expected(placements: &[(usize, String)]) -> OutputFormat {
    let mut best: Option<&(usize, String)> = None;
    for p in placements {
        if best.map_or(true, |b| p.0 >= b.0) {
            best = Some(p);
        }
    }
    best.and_then(|(_, f)| OutputFormat::parse(f))
        .unwrap_or_default()
}

proptest! {
    #[test]
    fn deepest_then_last_occurrence_wins(placements in placements()) {
        let catalog = catalog();
        let tokens = command_line(&placements);
        let Ok(Invocation::Run(parsed)) = Engine::new(&catalog).parse(&tokens) else {
            panic!("{:?} did not parse", tokens);
        };
        prop_assert_eq!(&catalog.tree().node(parsed.command).path, "network.dns.show");
        prop_assert_eq!(parsed.options.output_format(), expected(&placements));
    }

    #[test]
    fn walker_never_panics(tokens in prop::collection::vec("[-a-z=]{0,12}", 0..8)) {
        let catalog = catalog();
        let _ = Engine::new(&catalog).parse(&tokens);
    }

    #[test]
    fn resolution_is_deterministic(placements in placements()) {
        let catalog = catalog();
        let tokens = command_line(&placements);
        let engine = Engine::new(&catalog);
        prop_assert_eq!(engine.parse(&tokens), engine.parse(&tokens));
    }

    #[test]
    fn exit_codes_are_a_pure_function(index in 0usize..RunOutcome::ALL.len()) {
        let outcome = RunOutcome::ALL[index];
        prop_assert_eq!(outcome.exit_code(), outcome.exit_code());
        prop_assert!(ExitCode::ALL.contains(&outcome.exit_code()));
    }
}

#[test]
fn exit_code_table_is_fixed() {
    let table: Vec<(RunOutcome, u8)> = vec![
        (RunOutcome::Success, 0),
        (RunOutcome::UsageError, 2),
        (RunOutcome::AuthRequired, 3),
        (RunOutcome::Forbidden, 4),
        (RunOutcome::NotFound, 5),
        (RunOutcome::Conflict, 6),
        (RunOutcome::Timeout, 7),
        (RunOutcome::SafetyRailTriggered, 8),
        (RunOutcome::PartialSuccess, 10),
        (RunOutcome::Failure, 1),
    ];
    for (outcome, code) in table {
        assert_eq!(outcome.exit_code().code(), code, "{:?}", outcome);
    }
}
