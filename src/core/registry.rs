//! core::registry
//!
//! The option registry: every recognized option, indexed by token.
//!
//! # Invariants
//!
//! - Canonical names, aliases and negations are globally unique
//! - A canonical name declared by several nodes has one definition
//! - The registry is immutable once built
//!
//! # Example
//!
//! ```
//! use eeroctl::core::catalog::Catalog;
//! use eeroctl::core::options::OptionSpec;
//! use eeroctl::core::tree::CommandDef;
//!
//! let root = CommandDef::group("eero", "test")
//!     .option(OptionSpec::flag("force").short('y').negation("--no-force"))
//!     .child(CommandDef::command("list", "List"));
//! let catalog = Catalog::new(root).unwrap();
//!
//! let hit = catalog.registry().lookup("--no-force").unwrap();
//! assert!(hit.negated);
//! assert_eq!(catalog.registry().spec(hit.id).name, "force");
//! assert!(catalog.registry().lookup("--bogus").is_none());
//! ```

use std::collections::{BTreeMap, HashMap};
use std::mem;

use strsim::levenshtein;

use super::catalog::DefinitionError;
use super::options::{OptionSpec, OptionValue, ValueKind};
use super::tree::CommandNode;

/// Index of an option in the registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct OptionId(pub(crate) usize);

/// Result of looking up a token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TokenMatch {
    pub id: OptionId,
    /// The token was a negation (`--no-force`).
    pub negated: bool,
}

/// Immutable catalog of recognized options.
#[derive(Debug, Clone)]
pub struct OptionRegistry {
    specs: Vec<OptionSpec>,
    by_name: HashMap<String, OptionId>,
    by_token: BTreeMap<String, TokenMatch>,
}

impl OptionRegistry {
    /// Find the option selected by `token`.
    pub fn lookup(&self, token: &str) -> Option<TokenMatch> {
        self.by_token.get(token).copied()
    }

    /// Options declared at `node`.
    pub fn specs_for<'a>(&'a self, node: &'a CommandNode) -> impl Iterator<Item = &'a OptionSpec> {
        node.options.iter().map(move |&id| self.spec(id))
    }

    pub fn spec(&self, id: OptionId) -> &OptionSpec {
        &self.specs[id.0]
    }

    /// Find an option by canonical name.
    pub fn id(&self, name: &str) -> Option<OptionId> {
        self.by_name.get(name).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (OptionId, &OptionSpec)> {
        self.specs.iter().enumerate().map(|(i, s)| (OptionId(i), s))
    }

    pub fn len(&self) -> usize {
        self.specs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.specs.is_empty()
    }

    /// Closest registered token within edit distance 2.
    pub fn suggest(&self, token: &str) -> Option<&str> {
        let mut best: Option<(&str, usize)> = None;
        for candidate in self.by_token.keys() {
            let distance = levenshtein(token, candidate);
            if distance > 2 {
                continue;
            }
            match best {
                Some((_, d)) if d <= distance => {}
                _ => best = Some((candidate, distance)),
            }
        }
        best.map(|(c, _)| c)
    }
}

/// Accumulates option declarations while the tree is flattened.
#[derive(Debug, Default)]
pub(crate) struct RegistryBuilder {
    specs: Vec<OptionSpec>,
    declared_at: Vec<String>,
    by_name: HashMap<String, OptionId>,
    by_token: BTreeMap<String, TokenMatch>,
}

impl RegistryBuilder {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Register `spec` as declared at `command`.
    ///
    /// Redeclaring an identical spec returns the existing id.
    pub(crate) fn register(
        &mut self,
        spec: OptionSpec,
        command: &str,
    ) -> Result<OptionId, DefinitionError> {
        if let Some(&id) = self.by_name.get(&spec.name) {
            let existing = &self.specs[id.0];
            if mem::discriminant(&existing.kind) != mem::discriminant(&spec.kind) {
                return Err(DefinitionError::KindMismatch {
                    option: spec.name,
                    first: self.declared_at[id.0].clone(),
                    first_kind: existing.kind.name(),
                    second: command.to_string(),
                    second_kind: spec.kind.name(),
                });
            }
            if existing != &spec {
                return Err(DefinitionError::ConflictingDefinition {
                    option: spec.name,
                    first: self.declared_at[id.0].clone(),
                    second: command.to_string(),
                });
            }
            return Ok(id);
        }

        validate_spec(&spec)?;

        let id = OptionId(self.specs.len());
        let mut seen: Vec<&str> = Vec::new();
        for token in spec.tokens() {
            if let Some(other) = self.by_token.get(token) {
                return Err(DefinitionError::DuplicateToken {
                    token: token.to_string(),
                    first: self.specs[other.id.0].name.clone(),
                    second: spec.name.clone(),
                });
            }
            if seen.contains(&token) {
                return Err(DefinitionError::DuplicateToken {
                    token: token.to_string(),
                    first: spec.name.clone(),
                    second: spec.name.clone(),
                });
            }
            seen.push(token);
        }

        for alias in &spec.aliases {
            self.by_token.insert(
                alias.clone(),
                TokenMatch {
                    id,
                    negated: false,
                },
            );
        }
        for negation in &spec.negations {
            self.by_token
                .insert(negation.clone(), TokenMatch { id, negated: true });
        }
        self.by_name.insert(spec.name.clone(), id);
        self.declared_at.push(command.to_string());
        self.specs.push(spec);
        Ok(id)
    }

    pub(crate) fn name_of(&self, id: OptionId) -> Option<&str> {
        self.specs.get(id.0).map(|s| s.name.as_str())
    }

    pub(crate) fn build(self) -> OptionRegistry {
        OptionRegistry {
            specs: self.specs,
            by_name: self.by_name,
            by_token: self.by_token,
        }
    }
}

fn validate_spec(spec: &OptionSpec) -> Result<(), DefinitionError> {
    if spec.name.is_empty() || spec.name.chars().any(char::is_whitespace) {
        return Err(DefinitionError::InvalidName(spec.name.clone()));
    }
    if spec.aliases.is_empty() {
        return Err(DefinitionError::InvalidName(spec.name.clone()));
    }
    if let Some(bad) = spec
        .tokens()
        .find(|t| t.is_empty() || t.chars().any(char::is_whitespace) || t.contains('='))
    {
        return Err(DefinitionError::InvalidName(bad.to_string()));
    }
    if !spec.negations.is_empty() && spec.kind.takes_value() {
        return Err(DefinitionError::NegatedValueOption {
            option: spec.name.clone(),
        });
    }

    let default_ok = match (&spec.kind, &spec.default) {
        (ValueKind::Flag, OptionValue::Flag(_)) => true,
        (ValueKind::Choice(choices), OptionValue::Text(v)) => choices.contains(v),
        (ValueKind::Text, OptionValue::Text(_) | OptionValue::Unset) => true,
        (ValueKind::Integer, OptionValue::Integer(_) | OptionValue::Unset) => true,
        _ => false,
    };
    if !default_ok {
        return Err(DefinitionError::InvalidDefault {
            option: spec.name.clone(),
        });
    }
    Ok(())
}
