//! engine::outcome
//!
//! Run outcomes and their process exit codes.
//!
//! # Invariants
//!
//! - The mapping is a pure function of the outcome; output format and
//!   verbosity never change it
//! - Exit code 9 is reserved and never produced
//!
//! # Example
//!
//! ```
//! use eeroctl::engine::outcome::{ExitCode, RunOutcome};
//!
//! assert_eq!(RunOutcome::SafetyRailTriggered.exit_code(), ExitCode::SafetyRail);
//! assert_eq!(ExitCode::SafetyRail.code(), 8);
//! assert_eq!(RunOutcome::Aborted.exit_code().code(), 0);
//! ```

use std::fmt;

use crate::domain::DomainError;

/// How an invocation ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RunOutcome {
    Success,
    UsageError,
    AuthRequired,
    Forbidden,
    NotFound,
    Conflict,
    Timeout,
    SafetyRailTriggered,
    PartialSuccess,
    PremiumRequired,
    FeatureUnavailable,
    /// The operator declined a confirmation.
    Aborted,
    /// Uncategorized internal fault.
    Failure,
}

impl RunOutcome {
    pub const ALL: [RunOutcome; 13] = [
        RunOutcome::Success,
        RunOutcome::UsageError,
        RunOutcome::AuthRequired,
        RunOutcome::Forbidden,
        RunOutcome::NotFound,
        RunOutcome::Conflict,
        RunOutcome::Timeout,
        RunOutcome::SafetyRailTriggered,
        RunOutcome::PartialSuccess,
        RunOutcome::PremiumRequired,
        RunOutcome::FeatureUnavailable,
        RunOutcome::Aborted,
        RunOutcome::Failure,
    ];

    pub fn exit_code(self) -> ExitCode {
        match self {
            RunOutcome::Success | RunOutcome::Aborted => ExitCode::Success,
            RunOutcome::UsageError => ExitCode::Usage,
            RunOutcome::AuthRequired => ExitCode::AuthRequired,
            RunOutcome::Forbidden => ExitCode::Forbidden,
            RunOutcome::NotFound => ExitCode::NotFound,
            RunOutcome::Conflict => ExitCode::Conflict,
            RunOutcome::Timeout => ExitCode::Timeout,
            RunOutcome::SafetyRailTriggered => ExitCode::SafetyRail,
            RunOutcome::PartialSuccess => ExitCode::PartialSuccess,
            RunOutcome::PremiumRequired => ExitCode::PremiumRequired,
            RunOutcome::FeatureUnavailable => ExitCode::FeatureUnavailable,
            RunOutcome::Failure => ExitCode::GenericError,
        }
    }
}

impl From<&DomainError> for RunOutcome {
    fn from(e: &DomainError) -> Self {
        match e {
            DomainError::AuthRequired(_) => RunOutcome::AuthRequired,
            DomainError::Forbidden(_) => RunOutcome::Forbidden,
            DomainError::NotFound(_) => RunOutcome::NotFound,
            DomainError::Conflict(_) => RunOutcome::Conflict,
            DomainError::Timeout(_) | DomainError::RateLimited => RunOutcome::Timeout,
            DomainError::PremiumRequired(_) => RunOutcome::PremiumRequired,
            DomainError::FeatureUnavailable(_) => RunOutcome::FeatureUnavailable,
            DomainError::Api { .. } | DomainError::Other(_) => RunOutcome::Failure,
        }
    }
}

/// Process exit codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u8)]
pub enum ExitCode {
    Success = 0,
    GenericError = 1,
    Usage = 2,
    AuthRequired = 3,
    Forbidden = 4,
    NotFound = 5,
    Conflict = 6,
    Timeout = 7,
    SafetyRail = 8,
    PartialSuccess = 10,
    PremiumRequired = 11,
    FeatureUnavailable = 12,
}

impl ExitCode {
    /// Every code, in numeric order.
    pub const ALL: [ExitCode; 12] = [
        ExitCode::Success,
        ExitCode::GenericError,
        ExitCode::Usage,
        ExitCode::AuthRequired,
        ExitCode::Forbidden,
        ExitCode::NotFound,
        ExitCode::Conflict,
        ExitCode::Timeout,
        ExitCode::SafetyRail,
        ExitCode::PartialSuccess,
        ExitCode::PremiumRequired,
        ExitCode::FeatureUnavailable,
    ];

    pub fn code(self) -> u8 {
        self as u8
    }

    pub fn description(self) -> &'static str {
        match self {
            ExitCode::Success => "Success",
            ExitCode::GenericError => "Generic error",
            ExitCode::Usage => "Usage error (invalid arguments)",
            ExitCode::AuthRequired => "Authentication required",
            ExitCode::Forbidden => "Forbidden (insufficient permissions)",
            ExitCode::NotFound => "Resource not found",
            ExitCode::Conflict => "Conflict (state conflict)",
            ExitCode::Timeout => "Timeout or rate limited",
            ExitCode::SafetyRail => "Safety rail triggered (confirmation required)",
            ExitCode::PartialSuccess => "Partial success (some operations failed)",
            ExitCode::PremiumRequired => "eero Plus subscription required",
            ExitCode::FeatureUnavailable => "Feature unavailable on this network",
        }
    }

    /// The exit code table, one line per code.
    pub fn table() -> String {
        Self::ALL
            .iter()
            .map(|c| format!("  {:>2}  {}", c.code(), c.description()))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl fmt::Display for ExitCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.code(), self.description())
    }
}

impl From<ExitCode> for std::process::ExitCode {
    fn from(code: ExitCode) -> Self {
        std::process::ExitCode::from(code.code())
    }
}
