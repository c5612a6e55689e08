//! engine::resolve
//!
//! The precedence resolver.
//!
//! # Invariants
//!
//! - The occurrence with the greatest depth wins
//! - At equal depth, the later occurrence (by token position) wins
//! - Every registered option has exactly one value; unsupplied options take
//!   their registry default
//!
//! Input order alone never decides between different depths:
//! `network list --output json` and `--output json network list` differ in
//! order but the deeper occurrence wins either way.

use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;
use tracing::debug;

use super::walk::OptionOccurrence;
use crate::core::options::{names, OptionValue, OutputFormat};
use crate::core::registry::OptionRegistry;

/// Final value of every registered option for one invocation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedOptions {
    #[serde(flatten)]
    values: BTreeMap<String, OptionValue>,
    #[serde(skip)]
    explicit: BTreeSet<String>,
}

impl ResolvedOptions {
    pub fn get(&self, name: &str) -> Option<&OptionValue> {
        self.values.get(name)
    }

    /// Value of a flag; `false` for unknown or non-flag options.
    pub fn flag(&self, name: &str) -> bool {
        self.get(name).and_then(OptionValue::as_flag).unwrap_or(false)
    }

    pub fn text(&self, name: &str) -> Option<&str> {
        self.get(name).and_then(OptionValue::as_text)
    }

    pub fn integer(&self, name: &str) -> Option<i64> {
        self.get(name).and_then(OptionValue::as_integer)
    }

    /// The resolved `output` option as a format.
    pub fn output_format(&self) -> OutputFormat {
        self.text(names::OUTPUT)
            .and_then(OutputFormat::parse)
            .unwrap_or_default()
    }

    /// Whether the option was given on the command line.
    pub fn is_explicit(&self, name: &str) -> bool {
        self.explicit.contains(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &OptionValue)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Options given on the command line, with their winning values.
    pub fn explicit(&self) -> BTreeMap<&str, &OptionValue> {
        self.values
            .iter()
            .filter(|(k, _)| self.explicit.contains(k.as_str()))
            .map(|(k, v)| (k.as_str(), v))
            .collect()
    }
}

/// Merge occurrences into one value per registered option.
///
/// # Example
///
/// ```
/// use eeroctl::core::catalog::Catalog;
/// use eeroctl::core::options::OptionSpec;
/// use eeroctl::core::tree::CommandDef;
/// use eeroctl::engine::resolve::resolve;
/// use eeroctl::engine::walk::walk;
///
/// let root = CommandDef::group("eero", "test")
///     .option(OptionSpec::choice("output", &["table", "json"], "table"))
///     .child(CommandDef::group("device", "Devices").child(CommandDef::command("list", "List")));
/// let catalog = Catalog::new(root).unwrap();
///
/// let tokens: Vec<String> = ["--output", "table", "device", "list", "--output", "json"]
///     .iter()
///     .map(|s| s.to_string())
///     .collect();
/// let walk = walk(&catalog, &tokens).unwrap();
/// let resolved = resolve(catalog.registry(), &walk.occurrences);
///
/// assert_eq!(resolved.text("output"), Some("json"));
/// ```
pub fn resolve(registry: &OptionRegistry, occurrences: &[OptionOccurrence]) -> ResolvedOptions {
    let mut winners: BTreeMap<usize, &OptionOccurrence> = BTreeMap::new();
    for occurrence in occurrences {
        let key = occurrence.option.0;
        match winners.get(&key) {
            Some(best) if (best.depth, best.position) > (occurrence.depth, occurrence.position) => {}
            _ => {
                winners.insert(key, occurrence);
            }
        }
    }

    let mut values = BTreeMap::new();
    let mut explicit = BTreeSet::new();
    for (id, spec) in registry.iter() {
        match winners.get(&id.0) {
            Some(winner) => {
                debug!(
                    option = %spec.name,
                    value = %winner.value,
                    depth = winner.depth,
                    position = winner.position,
                    "resolved"
                );
                values.insert(spec.name.clone(), winner.value.clone());
                explicit.insert(spec.name.clone());
            }
            None => {
                values.insert(spec.name.clone(), spec.default.clone());
            }
        }
    }

    ResolvedOptions { values, explicit }
}
