//! core::options
//!
//! Option specifications and values.
//!
//! # Design
//!
//! An [`OptionSpec`] is the static description of one recognized option: its
//! canonical name, the tokens that select it, the kind of value it takes and
//! the value it resolves to when never supplied. Specs are plain data; the
//! [`crate::core::registry`] enforces uniqueness across all of them.
//!
//! # Example
//!
//! ```
//! use eeroctl::core::options::{OptionSpec, OptionValue, ValueKind};
//!
//! let force = OptionSpec::flag("force")
//!     .alias("--yes")
//!     .short('y')
//!     .negation("--no-force")
//!     .help("Skip confirmation prompts");
//!
//! assert_eq!(force.aliases, vec!["--force", "--yes", "-y"]);
//! assert_eq!(force.kind, ValueKind::Flag);
//! assert_eq!(force.default, OptionValue::Flag(false));
//! ```

use std::fmt;

use clap::ValueEnum;
use serde::Serialize;

/// Canonical names of the options every command accepts.
pub mod names {
    /// Output format (`--output`, `-o`).
    pub const OUTPUT: &str = "output";
    /// Network to operate on (`--network-id`, `-n`).
    pub const NETWORK_ID: &str = "network-id";
    /// Never prompt; fail when confirmation would be required.
    pub const NON_INTERACTIVE: &str = "non-interactive";
    /// Skip confirmation prompts (`--force`, `--yes`, `-y`).
    pub const FORCE: &str = "force";
    /// Suppress non-essential output.
    pub const QUIET: &str = "quiet";
    /// Disable colored output.
    pub const NO_COLOR: &str = "no-color";
    /// Enable debug logging.
    pub const DEBUG: &str = "debug";
    /// Show help for the selected command.
    pub const HELP: &str = "help";
    /// Show version information.
    pub const VERSION: &str = "version";
}

/// The kind of value an option takes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValueKind {
    /// Boolean flag; takes no value token.
    Flag,
    /// One of a fixed set of strings.
    Choice(Vec<String>),
    /// Free-form string.
    Text,
    /// Signed integer.
    Integer,
}

impl ValueKind {
    /// Whether a value token must follow the option token.
    pub fn takes_value(&self) -> bool {
        !matches!(self, ValueKind::Flag)
    }

    pub fn name(&self) -> &'static str {
        match self {
            ValueKind::Flag => "flag",
            ValueKind::Choice(_) => "choice",
            ValueKind::Text => "text",
            ValueKind::Integer => "integer",
        }
    }

    /// Short description used in error messages.
    pub fn describe(&self) -> String {
        match self {
            ValueKind::Flag => "no value".to_string(),
            ValueKind::Choice(choices) => format!("one of: {}", choices.join(", ")),
            ValueKind::Text => "a string".to_string(),
            ValueKind::Integer => "an integer".to_string(),
        }
    }
}

/// A concrete option value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum OptionValue {
    Flag(bool),
    Text(String),
    Integer(i64),
    /// No value and no meaningful default.
    Unset,
}

impl OptionValue {
    pub fn as_flag(&self) -> Option<bool> {
        match self {
            OptionValue::Flag(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            OptionValue::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_integer(&self) -> Option<i64> {
        match self {
            OptionValue::Integer(n) => Some(*n),
            _ => None,
        }
    }
}

impl fmt::Display for OptionValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OptionValue::Flag(b) => write!(f, "{}", b),
            OptionValue::Text(s) => write!(f, "{}", s),
            OptionValue::Integer(n) => write!(f, "{}", n),
            OptionValue::Unset => write!(f, "<unset>"),
        }
    }
}

/// Static description of one recognized option.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptionSpec {
    /// Canonical name (e.g. `output`).
    pub name: String,
    /// Tokens selecting the option (e.g. `--output`, `-o`).
    pub aliases: Vec<String>,
    /// Tokens that set a flag to false (e.g. `--no-force`).
    pub negations: Vec<String>,
    /// Value kind.
    pub kind: ValueKind,
    /// Value when never supplied.
    pub default: OptionValue,
    /// One-line description for help output.
    pub description: String,
}

impl OptionSpec {
    fn new(name: &str, kind: ValueKind, default: OptionValue) -> Self {
        Self {
            name: name.to_string(),
            aliases: vec![format!("--{}", name)],
            negations: Vec::new(),
            kind,
            default,
            description: String::new(),
        }
    }

    /// A boolean flag defaulting to false.
    pub fn flag(name: &str) -> Self {
        Self::new(name, ValueKind::Flag, OptionValue::Flag(false))
    }

    /// An enumerated option with a default choice.
    pub fn choice(name: &str, choices: &[&str], default: &str) -> Self {
        Self::new(
            name,
            ValueKind::Choice(choices.iter().map(|c| c.to_string()).collect()),
            OptionValue::Text(default.to_string()),
        )
    }

    /// A free-form string option with no default.
    pub fn text(name: &str) -> Self {
        Self::new(name, ValueKind::Text, OptionValue::Unset)
    }

    /// An integer option with a default.
    pub fn integer(name: &str, default: i64) -> Self {
        Self::new(name, ValueKind::Integer, OptionValue::Integer(default))
    }

    /// Add a long alias (`--yes`).
    pub fn alias(mut self, token: &str) -> Self {
        self.aliases.push(token.to_string());
        self
    }

    /// Add a short alias (`-y`).
    pub fn short(mut self, c: char) -> Self {
        self.aliases.push(format!("-{}", c));
        self
    }

    /// Add a token that sets this flag to false.
    pub fn negation(mut self, token: &str) -> Self {
        self.negations.push(token.to_string());
        self
    }

    pub fn help(mut self, description: &str) -> Self {
        self.description = description.to_string();
        self
    }

    /// Replace the default value.
    pub fn default_value(mut self, value: OptionValue) -> Self {
        self.default = value;
        self
    }

    /// Every token that selects this option, aliases first.
    pub fn tokens(&self) -> impl Iterator<Item = &str> {
        self.aliases
            .iter()
            .chain(self.negations.iter())
            .map(String::as_str)
    }

    /// The preferred token for messages (first long alias).
    pub fn display_token(&self) -> &str {
        self.aliases
            .iter()
            .find(|a| a.starts_with("--"))
            .or_else(|| self.aliases.first())
            .map(String::as_str)
            .unwrap_or(self.name.as_str())
    }
}

/// Output formats understood by the formatter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Table,
    List,
    Json,
    Yaml,
    Text,
}

impl OutputFormat {
    /// All format names, in declaration order.
    pub fn names() -> Vec<String> {
        Self::value_variants()
            .iter()
            .filter_map(|v| v.to_possible_value())
            .map(|v| v.get_name().to_string())
            .collect()
    }

    /// Parse a format name (case-sensitive).
    pub fn parse(name: &str) -> Option<Self> {
        <Self as ValueEnum>::from_str(name, false).ok()
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.to_possible_value() {
            Some(v) => write!(f, "{}", v.get_name()),
            None => write!(f, "{:?}", self),
        }
    }
}
