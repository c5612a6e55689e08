//! domain::traits
//!
//! The backend trait and its request/response types.
//!
//! # Design
//!
//! The `Backend` trait is async because domain actions talk to the eero API.
//! A backend only sees commands that have already been parsed, bound and
//! cleared by the safety rail; it never prompts and never decides exit codes.
//!
//! # Example
//!
//! ```ignore
//! use eeroctl::domain::{ActionRequest, Backend, DomainError};
//!
//! async fn reboot(backend: &dyn Backend, request: &ActionRequest) -> Result<(), DomainError> {
//!     let output = backend.invoke(request).await?;
//!     println!("{}", output.payload);
//!     Ok(())
//! }
//! ```

use async_trait::async_trait;
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

use crate::core::options::names;
use crate::engine::resolve::ResolvedOptions;
use crate::engine::walk::BoundArgs;

/// Errors from domain actions.
///
/// Each variant maps to one exit code; see [`crate::engine::outcome`].
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum DomainError {
    /// No usable session; the operator must log in.
    #[error("authentication required: {0}")]
    AuthRequired(String),

    #[error("permission denied: {0}")]
    Forbidden(String),

    #[error("not found: {0}")]
    NotFound(String),

    /// The request conflicts with the current state.
    #[error("conflict: {0}")]
    Conflict(String),

    #[error("timed out: {0}")]
    Timeout(String),

    #[error("rate limited, try again later")]
    RateLimited,

    /// The feature needs an eero Plus subscription.
    #[error("eero Plus subscription required: {0}")]
    PremiumRequired(String),

    /// The feature is not available on this network or hardware.
    #[error("feature unavailable: {0}")]
    FeatureUnavailable(String),

    /// API returned an error status.
    #[error("API error: {status} - {message}")]
    Api {
        /// HTTP status code
        status: u16,
        /// Error message from the API
        message: String,
    },

    #[error("{0}")]
    Other(String),
}

impl DomainError {
    /// Classify an API error status.
    ///
    /// 401, 403, 404, 409 and 429 have their own variants; anything else stays
    /// a generic [`DomainError::Api`].
    pub fn from_status(status: u16, message: impl Into<String>) -> Self {
        let message = message.into();
        match status {
            401 => DomainError::AuthRequired(message),
            403 => DomainError::Forbidden(message),
            404 => DomainError::NotFound(message),
            409 => DomainError::Conflict(message),
            429 => DomainError::RateLimited,
            _ => DomainError::Api { status, message },
        }
    }
}

/// A cleared command, ready for the backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ActionRequest {
    /// Dotted command path (`eero.reboot`).
    pub command: String,
    pub options: ResolvedOptions,
    /// Positionals bound to argument names.
    pub args: BoundArgs,
}

impl ActionRequest {
    /// First value of a positional argument.
    pub fn arg(&self, name: &str) -> Option<&str> {
        self.args
            .get(name)
            .and_then(|v| v.first())
            .map(String::as_str)
    }

    /// All values of a (variadic) positional argument.
    pub fn args(&self, name: &str) -> &[String] {
        self.args.get(name).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Network selected by `--network-id` or configuration.
    pub fn network_id(&self) -> Option<&str> {
        self.options.text(names::NETWORK_ID)
    }
}

/// Result of a domain action.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ActionOutput {
    pub payload: Value,
    /// Some items of a batch command failed.
    pub partial: bool,
}

impl ActionOutput {
    pub fn new(payload: Value) -> Self {
        Self {
            payload,
            partial: false,
        }
    }

    /// Output of a batch command where some items failed.
    pub fn partial(payload: Value) -> Self {
        Self {
            payload,
            partial: true,
        }
    }
}

/// Executes domain actions.
#[async_trait]
pub trait Backend: Send + Sync {
    /// Backend name, for logging.
    fn name(&self) -> &'static str;

    /// Run the action selected by `request.command`.
    async fn invoke(&self, request: &ActionRequest) -> Result<ActionOutput, DomainError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_classification() {
        assert_eq!(
            DomainError::from_status(401, "expired"),
            DomainError::AuthRequired("expired".into())
        );
        assert_eq!(
            DomainError::from_status(403, "x"),
            DomainError::Forbidden("x".into())
        );
        assert_eq!(
            DomainError::from_status(404, "x"),
            DomainError::NotFound("x".into())
        );
        assert_eq!(
            DomainError::from_status(409, "x"),
            DomainError::Conflict("x".into())
        );
        assert_eq!(DomainError::from_status(429, "x"), DomainError::RateLimited);
        assert_eq!(
            DomainError::from_status(500, "boom"),
            DomainError::Api {
                status: 500,
                message: "boom".into()
            }
        );
    }
}
