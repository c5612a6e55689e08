//! domain
//!
//! The boundary between the command engine and the eero API.
//!
//! # Modules
//!
//! - `traits`: Core `Backend` trait, requests, outputs and errors
//! - [`echo`]: Backend that reports what it would do
//! - [`mock`]: Mock implementation for deterministic testing

pub mod echo;
pub mod mock;
mod traits;

pub use traits::*;
