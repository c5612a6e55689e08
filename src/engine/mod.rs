//! engine
//!
//! Turns argument tokens into one guarded domain action.
//!
//! # Architecture
//!
//! ```text
//! tokens -> walk -> resolve -> [help/version] -> bind -> safety rail -> backend
//! ```
//!
//! 1. **Walk**: select the command node and collect option occurrences
//! 2. **Resolve**: merge occurrences into one value per option
//! 3. **Bind**: check positionals and required options against the node
//! 4. **Safety rail**: proceed, block or prompt for destructive commands
//! 5. **Invoke**: run the action on the backend, once
//!
//! Steps 1-3 happen in [`Engine::parse`]; 4-5 in [`Engine::execute`].
//!
//! # Invariants
//!
//! - Usage errors are reported before any domain action runs
//! - A blocked or declined command never reaches the backend
//! - Exactly one backend invocation completes before the outcome is known
//!
//! # Example
//!
//! ```
//! use eeroctl::core::catalog::Catalog;
//! use eeroctl::core::options::OptionSpec;
//! use eeroctl::core::tree::{ArgSpec, CommandDef};
//! use eeroctl::domain::mock::MockBackend;
//! use eeroctl::engine::outcome::RunOutcome;
//! use eeroctl::engine::{Engine, Invocation, Session};
//! use eeroctl::ui::prompts::ScriptedConfirmer;
//!
//! let root = CommandDef::group("eero", "test")
//!     .option(OptionSpec::flag("force"))
//!     .option(OptionSpec::flag("non-interactive"))
//!     .child(
//!         CommandDef::command("reboot", "Reboot")
//!             .arg(ArgSpec::required("eero", "Node"))
//!             .typed_phrase("REBOOT"),
//!     );
//! let catalog = Catalog::new(root).unwrap();
//! let engine = Engine::new(&catalog);
//!
//! let tokens: Vec<String> = ["reboot", "Living Room", "--non-interactive"]
//!     .iter()
//!     .map(|s| s.to_string())
//!     .collect();
//! let Invocation::Run(parsed) = engine.parse(&tokens).unwrap() else {
//!     panic!("expected a runnable command");
//! };
//!
//! let backend = MockBackend::new();
//! let mut confirmer = ScriptedConfirmer::silent();
//! let report = engine.execute(&parsed, &mut Session::new(&backend, &mut confirmer));
//!
//! assert_eq!(report.outcome, RunOutcome::SafetyRailTriggered);
//! assert!(backend.calls().is_empty());
//! ```

pub mod outcome;
pub mod resolve;
pub mod safety;
pub mod walk;

pub use outcome::{ExitCode, RunOutcome};
pub use resolve::{resolve, ResolvedOptions};
pub use safety::{ConfirmationOutcome, SafetyRail, SafetyState};
pub use walk::{bind, walk, BoundArgs, OptionOccurrence, ParseFailure, UsageError, Walk};

use tracing::{debug, info};

use crate::core::catalog::Catalog;
use crate::core::options::names;
use crate::core::tree::NodeId;
use crate::domain::{ActionOutput, ActionRequest, Backend};
use crate::ui::prompts::Confirmer;

/// Target named in prompts when nothing more specific is known.
pub const DEFAULT_TARGET: &str = "the current network";

/// What the command line asks for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Invocation {
    /// Run a command.
    Run(Parsed),
    /// Show help for a node.
    Help { node: NodeId },
    /// Show version information.
    Version,
}

/// A fully parsed and bound command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Parsed {
    pub command: NodeId,
    pub options: ResolvedOptions,
    pub args: BoundArgs,
    /// Positionals in command-line order.
    pub positionals: Vec<String>,
}

/// Collaborators for one execution.
pub struct Session<'a> {
    pub backend: &'a dyn Backend,
    pub confirmer: &'a mut dyn Confirmer,
}

impl<'a> Session<'a> {
    pub fn new(backend: &'a dyn Backend, confirmer: &'a mut dyn Confirmer) -> Self {
        Self { backend, confirmer }
    }
}

/// Result of executing a command.
#[derive(Debug, Clone, PartialEq)]
pub struct RunReport {
    pub outcome: RunOutcome,
    /// Backend output, when the action ran and succeeded.
    pub output: Option<ActionOutput>,
    /// Message for the operator (errors, blocks, aborts).
    pub message: Option<String>,
}

impl RunReport {
    fn message(outcome: RunOutcome, message: impl Into<String>) -> Self {
        Self {
            outcome,
            output: None,
            message: Some(message.into()),
        }
    }

    pub fn exit_code(&self) -> ExitCode {
        self.outcome.exit_code()
    }
}

/// Parses and executes commands against one catalog.
#[derive(Debug, Clone, Copy)]
pub struct Engine<'c> {
    catalog: &'c Catalog,
}

impl<'c> Engine<'c> {
    pub fn new(catalog: &'c Catalog) -> Self {
        Self { catalog }
    }

    pub fn catalog(&self) -> &'c Catalog {
        self.catalog
    }

    /// Walk, resolve and bind `tokens`.
    ///
    /// `--help` and `--version` short-circuit before binding, so
    /// `network --help` is help for the group rather than a usage error.
    ///
    /// # Errors
    ///
    /// Returns a [`ParseFailure`] naming the node the error belongs to.
    pub fn parse(&self, tokens: &[String]) -> Result<Invocation, ParseFailure> {
        let walked = walk::walk(self.catalog, tokens)?;
        let options = resolve::resolve(self.catalog.registry(), &walked.occurrences);

        if options.flag(names::HELP) {
            return Ok(Invocation::Help {
                node: walked.command,
            });
        }
        if options.flag(names::VERSION) {
            return Ok(Invocation::Version);
        }

        let args = walk::bind(self.catalog, walked.command, &walked.positionals, &options)
            .map_err(|error| ParseFailure {
                node: walked.command,
                error,
            })?;

        Ok(Invocation::Run(Parsed {
            command: walked.command,
            options,
            args,
            positionals: walked.positionals,
        }))
    }

    /// Run the safety rail and, if cleared, the backend action.
    pub fn execute(&self, parsed: &Parsed, session: &mut Session<'_>) -> RunReport {
        let tree = self.catalog.tree();
        let node = tree.node(parsed.command);
        let label = tree.display_path(parsed.command);

        let target = prompt_target(parsed);
        let mut rail = SafetyRail::new(&node.risk, &node.action, &target);
        let decision = rail.evaluate(
            parsed.options.flag(names::FORCE),
            parsed.options.flag(names::NON_INTERACTIVE),
            &mut *session.confirmer,
        );

        match decision {
            ConfirmationOutcome::BlockedNonInteractive => {
                info!(command = %label, "blocked by safety rail");
                return RunReport::message(
                    RunOutcome::SafetyRailTriggered,
                    format!(
                        "'{}' requires confirmation; use --force to run it non-interactively",
                        label
                    ),
                );
            }
            ConfirmationOutcome::Declined => {
                info!(command = %label, "declined by operator");
                return RunReport::message(RunOutcome::Aborted, "Aborted.");
            }
            ConfirmationOutcome::Proceed | ConfirmationOutcome::Confirmed => {}
        }

        let request = ActionRequest {
            command: node.path.clone(),
            options: parsed.options.clone(),
            args: parsed.args.clone(),
        };

        let runtime = match tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
        {
            Ok(rt) => rt,
            Err(e) => {
                return RunReport::message(
                    RunOutcome::Failure,
                    format!("failed to start runtime: {}", e),
                )
            }
        };

        debug!(command = %request.command, backend = session.backend.name(), "invoking backend");
        match runtime.block_on(session.backend.invoke(&request)) {
            Ok(output) => {
                let outcome = if output.partial {
                    RunOutcome::PartialSuccess
                } else {
                    RunOutcome::Success
                };
                debug!(?outcome, "backend finished");
                RunReport {
                    outcome,
                    output: Some(output),
                    message: None,
                }
            }
            Err(e) => {
                let outcome = RunOutcome::from(&e);
                debug!(?outcome, error = %e, "backend failed");
                RunReport::message(outcome, e.to_string())
            }
        }
    }
}

/// First positional, else the resolved network, else the current network.
fn prompt_target(parsed: &Parsed) -> String {
    parsed
        .positionals
        .first()
        .map(String::as_str)
        .or_else(|| parsed.options.text(names::NETWORK_ID))
        .unwrap_or(DEFAULT_TARGET)
        .to_string()
}
