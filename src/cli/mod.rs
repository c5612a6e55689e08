//! cli
//!
//! Command-line interface layer for eeroctl.
//!
//! # Responsibilities
//!
//! - Load configuration and build the command catalog
//! - Hand argument tokens to the [`crate::engine`]
//! - Print help, version, rendered output and errors
//! - Map the run outcome to the process exit code
//!
//! # Architecture
//!
//! The CLI layer is thin. The engine decides what runs; this module only
//! wires terminal collaborators into it. Nothing here talks to a network.

pub mod commands;
pub mod help;

use std::io;
use std::process;

use anyhow::{Context, Result};
use tracing::debug;

use crate::core::config::Config;
use crate::core::options::names;
use crate::domain::echo::EchoBackend;
use crate::engine::{Engine, ExitCode, Invocation, Parsed, RunOutcome, Session, UsageError};
use crate::logging::{self, LogConfig};
use crate::ui::output::{self, Formatter, PlainFormatter, Verbosity};
use crate::ui::prompts::TerminalConfirmer;

use self::help::Shell;

/// Run the CLI application.
///
/// This is the main entry point called from `main.rs`.
pub fn run() -> process::ExitCode {
    let args: Vec<String> = std::env::args().skip(1).collect();
    match try_run(&args) {
        Ok(code) => code.into(),
        Err(e) => {
            output::error(format!("{:#}", e));
            ExitCode::GenericError.into()
        }
    }
}

/// Run with explicit argument tokens (program name excluded).
///
/// # Errors
///
/// Returns an error for faults outside the command itself: unreadable
/// configuration or inconsistent command definitions.
pub fn try_run(args: &[String]) -> Result<ExitCode> {
    let loaded = Config::load().context("failed to load configuration")?;
    let catalog = commands::catalog(&loaded.config).context("invalid command definitions")?;
    let engine = Engine::new(&catalog);

    let parsed = match engine.parse(args) {
        Ok(Invocation::Run(parsed)) => parsed,
        Ok(Invocation::Help { node }) => {
            output::data(&help::render(&catalog, node));
            return Ok(ExitCode::Success);
        }
        Ok(Invocation::Version) => {
            println!("eero {}", env!("CARGO_PKG_VERSION"));
            return Ok(ExitCode::Success);
        }
        Err(failure) => {
            let tree = catalog.tree();
            if let UsageError::NotExecutable { .. } = failure.error {
                eprint!("{}", help::render(&catalog, failure.node));
            }
            output::error(&failure.error);
            output::hint(format!(
                "Run '{} --help' for usage.",
                tree.display_path(failure.node)
            ));
            return Ok(RunOutcome::UsageError.exit_code());
        }
    };

    let options = &parsed.options;
    let verbosity = Verbosity::from_flags(options.flag(names::QUIET), options.flag(names::DEBUG));
    logging::init(LogConfig {
        debug: options.flag(names::DEBUG),
        color: !options.flag(names::NO_COLOR),
    });
    for warning in &loaded.warnings {
        output::warn(&warning.message, verbosity);
    }
    if let Some(path) = loaded.config.loaded_from() {
        debug!(path = %path.display(), "configuration loaded");
    }

    if catalog.tree().node(parsed.command).path == commands::COMPLETION {
        return completion(&catalog, &parsed);
    }

    let backend = EchoBackend;
    let mut confirmer = TerminalConfirmer::stdio();
    let report = engine.execute(&parsed, &mut Session::new(&backend, &mut confirmer));

    if let Some(out) = &report.output {
        match PlainFormatter.render(out, options.output_format()) {
            Ok(rendered) => output::data(&rendered),
            Err(e) => {
                output::error(e);
                return Ok(ExitCode::GenericError);
            }
        }
    }
    if let Some(message) = &report.message {
        match report.outcome {
            RunOutcome::Aborted => output::note(message, verbosity),
            _ => output::error(message),
        }
    }
    if report.outcome == RunOutcome::PartialSuccess {
        output::warn("some operations did not complete", verbosity);
    }

    Ok(report.exit_code())
}

fn completion(catalog: &crate::core::catalog::Catalog, parsed: &Parsed) -> Result<ExitCode> {
    let shell = parsed
        .args
        .get("shell")
        .and_then(|values| values.first())
        .and_then(|name| <Shell as clap::ValueEnum>::from_str(name, false).ok())
        .context("missing shell")?;
    help::completion(catalog, shell, &mut io::stdout());
    Ok(ExitCode::Success)
}
