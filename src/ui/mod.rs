//! ui
//!
//! User interaction utilities.
//!
//! # Modules
//!
//! - [`prompts`] - Confirmations for the safety rail
//! - [`output`] - Output formatting and display
//!
//! # Design
//!
//! All output and prompts go through this module. Rendered data goes to
//! stdout; prompts, notes and errors go to stderr.

pub mod output;
pub mod prompts;
