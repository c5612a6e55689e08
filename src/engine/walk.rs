//! engine::walk
//!
//! The token walker: turns raw arguments into a selected command, a list of
//! option occurrences and the leftover positionals.
//!
//! # Design
//!
//! Each token is checked in a fixed order:
//!
//! 1. `--` ends option processing; everything after it is positional.
//! 2. An option token legal at the current node (declared there or at any
//!    ancestor) is consumed together with its value, and recorded at the
//!    current depth.
//! 3. A child name of the current node descends one level.
//! 4. Anything else is a positional argument for the selected leaf.
//!
//! Every token is looked up in the registry first, whether or not it starts
//! with a dash, so declared aliases like `q` are options too. Only dashed
//! tokens that match nothing are reported as unknown options. The catalog
//! guarantees option tokens and child names never collide.
//!
//! # Invariants
//!
//! - The walk never consults values of earlier occurrences
//! - Occurrence positions are token indices and strictly increase
//! - Positionals only accumulate at action nodes

use std::collections::BTreeMap;

use strsim::levenshtein;
use thiserror::Error;
use tracing::{debug, trace};

use super::resolve::ResolvedOptions;
use crate::core::catalog::Catalog;
use crate::core::options::{OptionSpec, OptionValue, ValueKind};
use crate::core::registry::OptionId;
use crate::core::tree::NodeId;

/// A command line that cannot be parsed or bound.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum UsageError {
    #[error("option '{option}' requires a value")]
    MissingValue { option: String },

    #[error("invalid value '{value}' for '{option}': expected {expected}")]
    InvalidValue {
        option: String,
        value: String,
        expected: String,
    },

    #[error("no such option: '{option}'{}", hint(.suggestion))]
    UnknownOption {
        option: String,
        suggestion: Option<String>,
    },

    #[error("option '{option}' is not valid for '{command}'")]
    OptionNotAllowed { option: String, command: String },

    #[error("option '{option}' does not take a value")]
    UnexpectedValue { option: String },

    #[error("no such command '{name}' under '{command}'{}", hint(.suggestion))]
    UnknownCommand {
        name: String,
        command: String,
        suggestion: Option<String>,
    },

    #[error("'{command}' requires a subcommand")]
    NotExecutable { command: String },

    #[error("missing argument '{argument}' for '{command}'")]
    MissingArgument { argument: String, command: String },

    #[error("unexpected extra argument '{value}' for '{command}'")]
    UnexpectedArgument { value: String, command: String },

    #[error("invalid value '{value}' for argument '{argument}': expected one of: {expected}")]
    InvalidArgument {
        argument: String,
        value: String,
        expected: String,
    },

    #[error("missing required option '{option}' for '{command}'")]
    MissingRequiredOption { option: String, command: String },
}

fn hint(suggestion: &Option<String>) -> String {
    match suggestion {
        Some(s) => format!(" (did you mean '{}'?)", s),
        None => String::new(),
    }
}

/// A usage error together with the node the walk had reached.
///
/// The node lets the caller point at the right `--help`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseFailure {
    pub node: NodeId,
    pub error: UsageError,
}

/// One occurrence of an option on the command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptionOccurrence {
    pub option: OptionId,
    pub value: OptionValue,
    /// Tree levels traversed when the occurrence was read (root = 0).
    pub depth: usize,
    /// Index of the option token in the argument list.
    pub position: usize,
}

/// Result of walking the argument tokens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Walk {
    /// The node the walk ended on.
    pub command: NodeId,
    pub occurrences: Vec<OptionOccurrence>,
    pub positionals: Vec<String>,
}

/// Positional arguments bound to argument names.
pub type BoundArgs = BTreeMap<String, Vec<String>>;

/// Walk `tokens` through the catalog.
///
/// # Errors
///
/// Returns a [`ParseFailure`] on the first token that cannot be placed.
///
/// # Example
///
/// ```
/// use eeroctl::core::catalog::Catalog;
/// use eeroctl::core::options::OptionSpec;
/// use eeroctl::core::tree::CommandDef;
/// use eeroctl::engine::walk::walk;
///
/// let root = CommandDef::group("eero", "test")
///     .option(OptionSpec::choice("output", &["table", "json"], "table"))
///     .child(CommandDef::group("network", "Networks").child(CommandDef::command("list", "List")));
/// let catalog = Catalog::new(root).unwrap();
///
/// let tokens: Vec<String> = ["network", "--output", "json", "list"]
///     .iter()
///     .map(|s| s.to_string())
///     .collect();
/// let walk = walk(&catalog, &tokens).unwrap();
///
/// assert_eq!(catalog.tree().node(walk.command).path, "network.list");
/// assert_eq!(walk.occurrences[0].depth, 1);
/// ```
pub fn walk(catalog: &Catalog, tokens: &[String]) -> Result<Walk, ParseFailure> {
    let tree = catalog.tree();
    let registry = catalog.registry();

    let mut node = NodeId::ROOT;
    let mut depth = 0;
    let mut occurrences = Vec::new();
    let mut positionals = Vec::new();
    let mut options_done = false;

    let fail = |node: NodeId, error: UsageError| ParseFailure { node, error };

    let mut i = 0;
    while i < tokens.len() {
        let position = i;
        let token = tokens[i].as_str();
        i += 1;

        if options_done {
            positionals.push(token.to_string());
            continue;
        }
        if token == "--" {
            options_done = true;
            continue;
        }

        let (name, inline) = split_inline(token);
        let hit = registry.lookup(name);
        if hit.is_none() && looks_like_option(token) {
            return Err(fail(
                node,
                UsageError::UnknownOption {
                    option: name.to_string(),
                    suggestion: registry.suggest(name).map(str::to_string),
                },
            ));
        }
        if let Some(hit) = hit {
            let spec = registry.spec(hit.id);
            if !catalog.is_legal(node, hit.id) {
                return Err(fail(
                    node,
                    UsageError::OptionNotAllowed {
                        option: name.to_string(),
                        command: tree.display_path(node),
                    },
                ));
            }

            let value = if spec.kind.takes_value() {
                let raw = match inline {
                    Some(v) => v.to_string(),
                    None => match tokens.get(i) {
                        Some(next) if !is_option_token(catalog, next) => {
                            i += 1;
                            next.clone()
                        }
                        _ => {
                            return Err(fail(
                                node,
                                UsageError::MissingValue {
                                    option: name.to_string(),
                                },
                            ))
                        }
                    },
                };
                parse_value(spec, name, &raw).map_err(|e| fail(node, e))?
            } else {
                if inline.is_some() {
                    return Err(fail(
                        node,
                        UsageError::UnexpectedValue {
                            option: name.to_string(),
                        },
                    ));
                }
                OptionValue::Flag(!hit.negated)
            };

            trace!(option = %spec.name, %value, depth, position, "option occurrence");
            occurrences.push(OptionOccurrence {
                option: hit.id,
                value,
                depth,
                position,
            });
            continue;
        }

        if let Some(child) = tree.child(node, token) {
            node = child;
            depth += 1;
            trace!(command = %tree.display_path(node), depth, "descend");
            continue;
        }

        if !tree.node(node).is_executable() {
            let children = tree.node(node).children.iter().map(|&c| tree.node(c).name.as_str());
            return Err(fail(
                node,
                UsageError::UnknownCommand {
                    name: token.to_string(),
                    command: tree.display_path(node),
                    suggestion: closest(token, children),
                },
            ));
        }
        positionals.push(token.to_string());
    }

    debug!(
        command = %tree.display_path(node),
        occurrences = occurrences.len(),
        positionals = positionals.len(),
        "walk complete"
    );
    Ok(Walk {
        command: node,
        occurrences,
        positionals,
    })
}

/// Check the selected command can run with the given positionals and options.
///
/// # Errors
///
/// Returns a [`UsageError`] for a group node, a missing or extra positional,
/// a positional outside its choices, or a required option never supplied.
pub fn bind(
    catalog: &Catalog,
    command: NodeId,
    positionals: &[String],
    resolved: &ResolvedOptions,
) -> Result<BoundArgs, UsageError> {
    let tree = catalog.tree();
    let node = tree.node(command);
    let label = tree.display_path(command);

    if !node.is_executable() {
        return Err(UsageError::NotExecutable { command: label });
    }

    let mut bound = BoundArgs::new();
    let mut rest = positionals.iter();
    for arg in &node.args {
        let values: Vec<String> = if arg.variadic {
            rest.by_ref().cloned().collect()
        } else {
            rest.next().cloned().into_iter().collect()
        };
        if values.is_empty() {
            if arg.required {
                return Err(UsageError::MissingArgument {
                    argument: arg.name.clone(),
                    command: label,
                });
            }
            continue;
        }
        if let Some(choices) = &arg.choices {
            if let Some(bad) = values.iter().find(|v| !choices.contains(v)) {
                return Err(UsageError::InvalidArgument {
                    argument: arg.name.clone(),
                    value: bad.clone(),
                    expected: choices.join(", "),
                });
            }
        }
        bound.insert(arg.name.clone(), values);
    }
    if let Some(extra) = rest.next() {
        return Err(UsageError::UnexpectedArgument {
            value: extra.clone(),
            command: label,
        });
    }

    for &required in &node.required_options {
        let spec = catalog.registry().spec(required);
        if !resolved.is_explicit(&spec.name) {
            return Err(UsageError::MissingRequiredOption {
                option: spec.display_token().to_string(),
                command: label,
            });
        }
    }

    Ok(bound)
}

/// Whether a token should be treated as an option.
///
/// `-` alone and negative numbers are positionals.
fn looks_like_option(token: &str) -> bool {
    token.len() > 1 && token.starts_with('-') && !is_negative_number(token)
}

fn is_negative_number(token: &str) -> bool {
    let Some(rest) = token.strip_prefix('-') else {
        return false;
    };
    rest.chars().any(|c| c.is_ascii_digit()) && rest.chars().all(|c| c.is_ascii_digit() || c == '.')
}

/// Split `--name=value`; short options never carry inline values.
fn split_inline(token: &str) -> (&str, Option<&str>) {
    if token.starts_with("--") {
        if let Some((name, value)) = token.split_once('=') {
            return (name, Some(value));
        }
    }
    (token, None)
}

/// A following token that is itself an option cannot be a value.
fn is_option_token(catalog: &Catalog, token: &str) -> bool {
    token == "--" || catalog.registry().lookup(split_inline(token).0).is_some()
}

fn parse_value(spec: &OptionSpec, token: &str, raw: &str) -> Result<OptionValue, UsageError> {
    let invalid = || UsageError::InvalidValue {
        option: token.to_string(),
        value: raw.to_string(),
        expected: spec.kind.describe(),
    };
    match &spec.kind {
        ValueKind::Flag => Ok(OptionValue::Flag(true)),
        ValueKind::Choice(choices) => {
            if choices.iter().any(|c| c == raw) {
                Ok(OptionValue::Text(raw.to_string()))
            } else {
                Err(invalid())
            }
        }
        ValueKind::Text => Ok(OptionValue::Text(raw.to_string())),
        ValueKind::Integer => raw
            .parse::<i64>()
            .map(OptionValue::Integer)
            .map_err(|_| invalid()),
    }
}

fn closest<'a>(token: &str, candidates: impl Iterator<Item = &'a str>) -> Option<String> {
    candidates
        .map(|c| (levenshtein(token, c), c))
        .filter(|(d, _)| *d <= 2)
        .min_by_key(|(d, _)| *d)
        .map(|(_, c)| c.to_string())
}
