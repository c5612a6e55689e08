//! core
//!
//! Static command definitions: options, the command tree, and configuration.
//!
//! # Modules
//!
//! - [`options`] - Option specs, values, and output formats
//! - [`registry`] - Token lookup over every recognized option
//! - [`tree`] - Command definitions and the flattened command tree
//! - [`catalog`] - Validated registry + tree, built once at startup
//! - [`config`] - Configuration schema and loading
//!
//! # Design Principles
//!
//! - Definitions are checked once, when the catalog is built
//! - Everything here is immutable after construction

pub mod catalog;
pub mod config;
pub mod options;
pub mod registry;
pub mod tree;
