//! engine::safety
//!
//! The safety rail guarding destructive commands.
//!
//! # Design
//!
//! ```text
//! Idle -> Evaluating -> Proceed     (force)
//!                    -> Blocked     (non-interactive, no force)
//!                    -> Confirmed   (operator said yes / typed the phrase)
//!                    -> Declined    (anything else)
//! ```
//!
//! `force` is checked before `non-interactive`, so `--force --non-interactive`
//! proceeds. A command with no risk skips evaluation and proceeds directly.
//!
//! # Invariants
//!
//! - A blocked evaluation never touches the confirmer
//! - Only `Proceed` and `Confirmed` permit the action
//! - A prompt failure is a decline, never a confirmation

use tracing::{debug, warn};

use crate::core::tree::Risk;
use crate::ui::prompts::Confirmer;

/// States of one safety-rail evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SafetyState {
    Idle,
    Evaluating,
    Proceed,
    Blocked,
    Declined,
    Confirmed,
}

impl SafetyState {
    pub fn is_terminal(self) -> bool {
        !matches!(self, SafetyState::Idle | SafetyState::Evaluating)
    }
}

/// Result of a safety-rail evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfirmationOutcome {
    Proceed,
    BlockedNonInteractive,
    Declined,
    Confirmed,
}

impl ConfirmationOutcome {
    /// Whether the guarded action may run.
    pub fn permits_action(self) -> bool {
        matches!(
            self,
            ConfirmationOutcome::Proceed | ConfirmationOutcome::Confirmed
        )
    }
}

/// One evaluation of the safety rail for a command.
///
/// # Example
///
/// ```
/// use eeroctl::core::tree::Risk;
/// use eeroctl::engine::safety::{ConfirmationOutcome, SafetyRail, SafetyState};
/// use eeroctl::ui::prompts::ScriptedConfirmer;
///
/// let risk = Risk::TypedPhrase("REBOOT".into());
/// let mut rail = SafetyRail::new(&risk, "reboot", "Living Room");
/// let mut confirmer = ScriptedConfirmer::silent();
///
/// let outcome = rail.evaluate(false, true, &mut confirmer);
/// assert_eq!(outcome, ConfirmationOutcome::BlockedNonInteractive);
/// assert_eq!(rail.state(), SafetyState::Blocked);
/// assert!(!confirmer.was_prompted());
/// ```
#[derive(Debug)]
pub struct SafetyRail<'a> {
    risk: &'a Risk,
    action: &'a str,
    target: &'a str,
    state: SafetyState,
}

impl<'a> SafetyRail<'a> {
    pub fn new(risk: &'a Risk, action: &'a str, target: &'a str) -> Self {
        Self {
            risk,
            action,
            target,
            state: SafetyState::Idle,
        }
    }

    pub fn state(&self) -> SafetyState {
        self.state
    }

    /// Yes/no prompt text.
    pub fn confirm_prompt(&self) -> String {
        format!("Proceed with {} on {}?", self.action, self.target)
    }

    /// Warning shown before asking for the typed phrase.
    pub fn phrase_prompt(&self, phrase: &str) -> String {
        format!(
            "You are about to {} {}. This may cause disruption.\nTo confirm, type {}",
            self.action, self.target, phrase
        )
    }

    /// Decide whether the action may run.
    pub fn evaluate(
        &mut self,
        force: bool,
        non_interactive: bool,
        confirmer: &mut dyn Confirmer,
    ) -> ConfirmationOutcome {
        if !self.risk.is_destructive() {
            self.state = SafetyState::Proceed;
            return ConfirmationOutcome::Proceed;
        }

        self.state = SafetyState::Evaluating;
        debug!(
            action = self.action,
            target = self.target,
            risk = self.risk.name(),
            force,
            non_interactive,
            "evaluating safety rail"
        );

        let outcome = if force {
            ConfirmationOutcome::Proceed
        } else if non_interactive {
            ConfirmationOutcome::BlockedNonInteractive
        } else {
            let answer = match self.risk {
                Risk::TypedPhrase(phrase) => {
                    confirmer.confirm_phrase(&self.phrase_prompt(phrase), phrase)
                }
                _ => confirmer.confirm(&self.confirm_prompt()),
            };
            match answer {
                Ok(true) => ConfirmationOutcome::Confirmed,
                Ok(false) => ConfirmationOutcome::Declined,
                Err(e) => {
                    warn!(error = %e, "confirmation prompt failed");
                    ConfirmationOutcome::Declined
                }
            }
        };

        self.state = match outcome {
            ConfirmationOutcome::Proceed => SafetyState::Proceed,
            ConfirmationOutcome::BlockedNonInteractive => SafetyState::Blocked,
            ConfirmationOutcome::Declined => SafetyState::Declined,
            ConfirmationOutcome::Confirmed => SafetyState::Confirmed,
        };
        debug!(state = ?self.state, "safety rail settled");
        outcome
    }
}
