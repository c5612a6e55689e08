//! eeroctl - A noun-first CLI for eero mesh Wi-Fi networks
//!
//! eeroctl manages networks, mesh nodes, devices and profiles from the
//! command line. Its core is a command-option resolution engine: options may
//! appear at any depth of the command path, destructive commands pass a
//! confirmation safety rail, and every outcome maps to a stable exit code.
//!
//! # Architecture
//!
//! The codebase follows a layered architecture:
//!
//! - [`cli`] - Command-line interface layer (config, catalog, printing)
//! - [`engine`] - Walk → Resolve → Bind → Safety rail → Invoke
//! - [`core`] - Option registry, command tree, configuration
//! - [`domain`] - Backend abstraction for eero actions
//! - [`ui`] - Prompts and output formatting
//! - [`logging`] - Diagnostic logging setup
//!
//! # Correctness Invariants
//!
//! 1. Every option token maps to exactly one option
//! 2. Deeper occurrences of an option win; at equal depth the last one wins
//! 3. A destructive command never runs unconfirmed
//! 4. Exit codes depend only on the run outcome

pub mod cli;
pub mod core;
pub mod domain;
pub mod engine;
pub mod logging;
pub mod ui;
