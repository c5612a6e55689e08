//! ui::prompts
//!
//! Interactive confirmations.
//!
//! # Design
//!
//! Prompts are written to stderr so stdout stays clean for rendered output.
//! End of input is always a "no": a closed stdin never confirms anything.
//! The safety rail talks to prompts only through [`Confirmer`], so tests can
//! script the operator with [`ScriptedConfirmer`].

use std::collections::VecDeque;
use std::io::{self, BufRead, Write};

use thiserror::Error;

/// Errors from prompts.
#[derive(Debug, Error)]
pub enum PromptError {
    #[error("prompt cancelled by user")]
    Cancelled,

    #[error("IO error: {0}")]
    IoError(String),
}

impl From<io::Error> for PromptError {
    fn from(e: io::Error) -> Self {
        PromptError::IoError(e.to_string())
    }
}

/// Source of operator confirmations.
pub trait Confirmer {
    /// Ask a yes/no question. `Ok(true)` means yes.
    fn confirm(&mut self, prompt: &str) -> Result<bool, PromptError>;

    /// Show `prompt` and require the operator to type `expected` exactly.
    fn confirm_phrase(&mut self, prompt: &str, expected: &str) -> Result<bool, PromptError>;
}

/// Confirmer reading answers from a line-based input.
pub struct TerminalConfirmer<R, W> {
    input: R,
    output: W,
}

impl TerminalConfirmer<io::StdinLock<'static>, io::Stderr> {
    /// Prompt on stderr, read answers from stdin.
    pub fn stdio() -> Self {
        Self::new(io::stdin().lock(), io::stderr())
    }
}

impl<R: BufRead, W: Write> TerminalConfirmer<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Read one line without its line ending; `None` at end of input.
    fn read_line(&mut self) -> Result<Option<String>, PromptError> {
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        let trimmed = line.strip_suffix('\n').unwrap_or(&line);
        let trimmed = trimmed.strip_suffix('\r').unwrap_or(trimmed);
        Ok(Some(trimmed.to_string()))
    }
}

impl<R: BufRead, W: Write> Confirmer for TerminalConfirmer<R, W> {
    fn confirm(&mut self, prompt: &str) -> Result<bool, PromptError> {
        write!(self.output, "{} [y/N]: ", prompt)?;
        self.output.flush()?;

        let Some(answer) = self.read_line()? else {
            writeln!(self.output)?;
            return Ok(false);
        };
        Ok(matches!(
            answer.trim().to_ascii_lowercase().as_str(),
            "y" | "yes"
        ))
    }

    fn confirm_phrase(&mut self, prompt: &str, expected: &str) -> Result<bool, PromptError> {
        writeln!(self.output, "{}", prompt)?;
        write!(self.output, "Confirmation: ")?;
        self.output.flush()?;

        match self.read_line()? {
            Some(answer) => Ok(answer == expected),
            None => {
                writeln!(self.output)?;
                Ok(false)
            }
        }
    }
}

/// Confirmer that replays canned answers and records every prompt.
///
/// A prompt with no answer left is treated like end of input.
#[derive(Debug, Default)]
pub struct ScriptedConfirmer {
    answers: VecDeque<String>,
    prompts: Vec<String>,
}

impl ScriptedConfirmer {
    pub fn new<I, S>(answers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            answers: answers.into_iter().map(Into::into).collect(),
            prompts: Vec::new(),
        }
    }

    /// A confirmer that must never be asked anything.
    pub fn silent() -> Self {
        Self::default()
    }

    /// Prompts shown so far, in order.
    pub fn prompts(&self) -> &[String] {
        &self.prompts
    }

    pub fn was_prompted(&self) -> bool {
        !self.prompts.is_empty()
    }
}

impl Confirmer for ScriptedConfirmer {
    fn confirm(&mut self, prompt: &str) -> Result<bool, PromptError> {
        self.prompts.push(prompt.to_string());
        Ok(self
            .answers
            .pop_front()
            .is_some_and(|a| matches!(a.trim().to_ascii_lowercase().as_str(), "y" | "yes")))
    }

    fn confirm_phrase(&mut self, prompt: &str, expected: &str) -> Result<bool, PromptError> {
        self.prompts.push(prompt.to_string());
        Ok(self.answers.pop_front().is_some_and(|a| a == expected))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn terminal(input: &str) -> TerminalConfirmer<&[u8], Vec<u8>> {
        TerminalConfirmer::new(input.as_bytes(), Vec::new())
    }

    #[test]
    fn yes_variants_confirm() {
        assert!(terminal("y\n").confirm("Proceed?").unwrap());
        assert!(terminal("YES\n").confirm("Proceed?").unwrap());
        assert!(!terminal("n\n").confirm("Proceed?").unwrap());
        assert!(!terminal("\n").confirm("Proceed?").unwrap());
    }

    #[test]
    fn eof_declines() {
        assert!(!terminal("").confirm("Proceed?").unwrap());
        assert!(!terminal("").confirm_phrase("Type it", "REBOOT").unwrap());
    }

    #[test]
    fn phrase_must_match_exactly() {
        assert!(terminal("REBOOT\n").confirm_phrase("x", "REBOOT").unwrap());
        assert!(terminal("REBOOT\r\n").confirm_phrase("x", "REBOOT").unwrap());
        assert!(!terminal("reboot\n").confirm_phrase("x", "REBOOT").unwrap());
        assert!(!terminal(" REBOOT\n").confirm_phrase("x", "REBOOT").unwrap());
        assert!(!terminal("\n").confirm_phrase("x", "REBOOT").unwrap());
    }

    #[test]
    fn prompt_goes_to_output() {
        let mut confirmer = terminal("y\n");
        confirmer.confirm("Proceed with reboot on node-1?").unwrap();
        let shown = String::from_utf8(confirmer.output).unwrap();
        assert!(shown.starts_with("Proceed with reboot on node-1? [y/N]"));
    }

    #[test]
    fn scripted_records_prompts() {
        let mut confirmer = ScriptedConfirmer::new(["yes", "WRONG"]);
        assert!(confirmer.confirm("first").unwrap());
        assert!(!confirmer.confirm_phrase("second", "RIGHT").unwrap());
        assert!(!confirmer.confirm("third").unwrap());
        assert_eq!(confirmer.prompts(), ["first", "second", "third"]);
    }
}
