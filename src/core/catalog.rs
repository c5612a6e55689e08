//! core::catalog
//!
//! Builds the immutable option registry and command tree from a definition.
//!
//! # Design
//!
//! [`Catalog::new`] is the single place where definitions are checked. Every
//! failure here is a programming error in the command definitions, so the
//! binary treats it as fatal at startup; nothing is left to runtime
//! disambiguation.
//!
//! # Example
//!
//! ```
//! use eeroctl::core::catalog::{Catalog, DefinitionError};
//! use eeroctl::core::options::OptionSpec;
//! use eeroctl::core::tree::CommandDef;
//!
//! // An option token that names a subcommand can never be parsed unambiguously.
//! let root = CommandDef::group("eero", "test")
//!     .option(OptionSpec::flag("list").alias("list"))
//!     .child(CommandDef::command("list", "List"));
//!
//! assert!(matches!(
//!     Catalog::new(root),
//!     Err(DefinitionError::TokenShadowsCommand { .. })
//! ));
//! ```

use thiserror::Error;

use super::options::OptionSpec;
use super::registry::{OptionId, OptionRegistry, RegistryBuilder};
use super::tree::{default_phrase, CommandDef, CommandNode, CommandTree, NodeId, Risk, RiskDef};

/// Errors in command or option definitions.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DefinitionError {
    #[error("option token '{token}' is declared by both '{first}' and '{second}'")]
    DuplicateToken {
        token: String,
        first: String,
        second: String,
    },

    #[error("option '{option}' is a {first_kind} at '{first}' but a {second_kind} at '{second}'")]
    KindMismatch {
        option: String,
        first: String,
        first_kind: &'static str,
        second: String,
        second_kind: &'static str,
    },

    #[error("option '{option}' is redeclared at '{second}' differently than at '{first}'")]
    ConflictingDefinition {
        option: String,
        first: String,
        second: String,
    },

    #[error("option '{option}' takes a value and cannot be negated")]
    NegatedValueOption { option: String },

    #[error("option '{option}' has a default that does not match its value kind")]
    InvalidDefault { option: String },

    #[error("option token '{token}' collides with a subcommand of '{command}'")]
    TokenShadowsCommand { token: String, command: String },

    #[error("command '{name}' is declared twice under '{parent}'")]
    DuplicateCommand { name: String, parent: String },

    #[error("invalid name '{0}'")]
    InvalidName(String),

    #[error("invalid positional arguments for '{command}': {reason}")]
    InvalidArguments { command: String, reason: String },

    #[error("confirmation phrase for '{command}' is empty")]
    EmptyPhrase { command: String },
}

/// The option registry and command tree, validated together.
#[derive(Debug, Clone)]
pub struct Catalog {
    registry: OptionRegistry,
    tree: CommandTree,
}

impl Catalog {
    /// Flatten and validate a command definition.
    ///
    /// # Errors
    ///
    /// Returns a [`DefinitionError`] for duplicate or colliding tokens,
    /// inconsistent redeclarations, malformed names or argument lists.
    pub fn new(root: CommandDef) -> Result<Self, DefinitionError> {
        let mut builder = RegistryBuilder::new();
        let mut nodes: Vec<CommandNode> = Vec::new();
        flatten(root, None, 0, "", &mut nodes, &mut builder)?;

        let catalog = Self {
            registry: builder.build(),
            tree: CommandTree { nodes },
        };
        catalog.check_collisions()?;
        Ok(catalog)
    }

    pub fn registry(&self) -> &OptionRegistry {
        &self.registry
    }

    pub fn tree(&self) -> &CommandTree {
        &self.tree
    }

    /// Whether `option` may appear once the walk has reached `node`.
    ///
    /// Options declared at a node are legal there and at every descendant.
    pub fn is_legal(&self, node: NodeId, option: OptionId) -> bool {
        self.tree
            .ancestors(node)
            .any(|n| self.tree.node(n).options.contains(&option))
    }

    /// Options legal at `node`, root declarations first.
    pub fn legal_options(&self, node: NodeId) -> Vec<OptionId> {
        let mut path: Vec<NodeId> = self.tree.ancestors(node).collect();
        path.reverse();
        path.into_iter()
            .flat_map(|n| self.tree.node(n).options.iter().copied())
            .collect()
    }

    fn check_collisions(&self) -> Result<(), DefinitionError> {
        for (id, node) in self.tree.iter() {
            for &child in &node.children {
                let name = &self.tree.node(child).name;
                if let Some(hit) = self.registry.lookup(name) {
                    if self.is_legal(id, hit.id) {
                        return Err(DefinitionError::TokenShadowsCommand {
                            token: name.clone(),
                            command: self.tree.display_path(id),
                        });
                    }
                }
            }
        }
        Ok(())
    }
}

fn flatten(
    def: CommandDef,
    parent: Option<NodeId>,
    depth: usize,
    parent_path: &str,
    nodes: &mut Vec<CommandNode>,
    registry: &mut RegistryBuilder,
) -> Result<NodeId, DefinitionError> {
    let CommandDef {
        name,
        about,
        children,
        options,
        required_options,
        args,
        risk,
        verb,
    } = def;

    if name.is_empty() || name.starts_with('-') || name.contains('.') {
        return Err(DefinitionError::InvalidName(name));
    }
    if name.chars().any(char::is_whitespace) {
        return Err(DefinitionError::InvalidName(name));
    }

    let path = match parent {
        None => String::new(),
        Some(_) if parent_path.is_empty() => name.clone(),
        Some(_) => format!("{}.{}", parent_path, name),
    };
    let label = if path.is_empty() { name.clone() } else { path.replace('.', " ") };

    check_args(&args, &label)?;

    let option_ids = options
        .into_iter()
        .map(|spec: OptionSpec| registry.register(spec, &label))
        .collect::<Result<Vec<_>, _>>()?;
    let required_ids = required_options
        .iter()
        .map(|n| {
            registry_lookup(&option_ids, registry, n)
                .ok_or_else(|| DefinitionError::InvalidName(n.clone()))
        })
        .collect::<Result<Vec<_>, _>>()?;

    let action = verb.unwrap_or_else(|| name.clone());
    let risk = match risk {
        RiskDef::None => Risk::None,
        RiskDef::Confirm => Risk::Confirm,
        RiskDef::Phrase(p) => Risk::TypedPhrase(p),
        RiskDef::Derived => Risk::TypedPhrase(default_phrase(&action)),
    };
    if let Risk::TypedPhrase(p) = &risk {
        if p.trim().is_empty() {
            return Err(DefinitionError::EmptyPhrase { command: label });
        }
    }

    let id = NodeId(nodes.len());
    nodes.push(CommandNode {
        name,
        about,
        parent,
        children: Vec::new(),
        options: option_ids,
        required_options: required_ids,
        args,
        risk,
        action,
        depth,
        path: path.clone(),
    });

    let mut child_ids = Vec::with_capacity(children.len());
    for child in children {
        let child_name = child.name.clone();
        if child_ids
            .iter()
            .any(|&c: &NodeId| nodes[c.0].name == child_name)
        {
            return Err(DefinitionError::DuplicateCommand {
                name: child_name,
                parent: label,
            });
        }
        child_ids.push(flatten(child, Some(id), depth + 1, &path, nodes, registry)?);
    }
    nodes[id.0].children = child_ids;

    Ok(id)
}

fn registry_lookup(ids: &[OptionId], registry: &RegistryBuilder, name: &str) -> Option<OptionId> {
    ids.iter().copied().find(|&id| registry.name_of(id) == Some(name))
}

fn check_args(args: &[crate::core::tree::ArgSpec], command: &str) -> Result<(), DefinitionError> {
    let mut seen_optional = false;
    for (i, arg) in args.iter().enumerate() {
        if arg.variadic && i + 1 != args.len() {
            return Err(DefinitionError::InvalidArguments {
                command: command.to_string(),
                reason: format!("variadic argument '{}' must be last", arg.name),
            });
        }
        if arg.required && seen_optional {
            return Err(DefinitionError::InvalidArguments {
                command: command.to_string(),
                reason: format!("required argument '{}' follows an optional one", arg.name),
            });
        }
        seen_optional |= !arg.required;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::tree::ArgSpec;

    fn sample() -> CommandDef {
        CommandDef::group("eero", "root")
            .option(OptionSpec::choice("output", &["table", "json"], "table").short('o'))
            .child(
                CommandDef::group("network", "Networks")
                    .child(CommandDef::command("list", "List networks"))
                    .child(
                        CommandDef::command("rename", "Rename")
                            .required_option(OptionSpec::text("name"))
                            .confirm(),
                    ),
            )
            .child(
                CommandDef::command("reboot", "Reboot")
                    .arg(ArgSpec::required("eero", "Node"))
                    .verb("reboot eero")
                    .high_risk(),
            )
    }

    #[test]
    fn flattens_paths_and_depths() {
        let catalog = Catalog::new(sample()).unwrap();
        let tree = catalog.tree();
        let list = tree.find("network.list").unwrap();
        assert_eq!(tree.node(list).depth, 2);
        assert_eq!(tree.node(list).path, "network.list");
        assert_eq!(tree.display_path(list), "eero network list");
        assert!(tree.node(list).is_executable());
        assert!(!tree.node(tree.find("network").unwrap()).is_executable());
        assert_eq!(tree.find("network.bogus"), None);
    }

    #[test]
    fn root_options_are_legal_everywhere() {
        let catalog = Catalog::new(sample()).unwrap();
        let output = catalog.registry().id("output").unwrap();
        let name = catalog.registry().id("name").unwrap();
        let list = catalog.tree().find("network.list").unwrap();
        let rename = catalog.tree().find("network.rename").unwrap();
        assert!(catalog.is_legal(list, output));
        assert!(!catalog.is_legal(list, name));
        assert!(catalog.is_legal(rename, name));
        assert_eq!(catalog.legal_options(rename), vec![output, name]);
        assert_eq!(catalog.tree().node(rename).required_options, vec![name]);
    }

    #[test]
    fn derived_phrase_uses_verb() {
        let catalog = Catalog::new(sample()).unwrap();
        let reboot = catalog.tree().find("reboot").unwrap();
        assert_eq!(
            catalog.tree().node(reboot).risk,
            Risk::TypedPhrase("REBOOTEERO".into())
        );
    }

    #[test]
    fn duplicate_children_are_rejected() {
        let root = CommandDef::group("eero", "root")
            .child(CommandDef::command("list", "a"))
            .child(CommandDef::command("list", "b"));
        assert!(matches!(
            Catalog::new(root),
            Err(DefinitionError::DuplicateCommand { .. })
        ));
    }

    #[test]
    fn short_alias_shadowing_child_is_rejected() {
        let root = CommandDef::group("eero", "root")
            .option(OptionSpec::flag("quiet").alias("q"))
            .child(CommandDef::group("device", "Devices").child(CommandDef::command("q", "x")));
        let err = Catalog::new(root).unwrap_err();
        assert_eq!(
            err,
            DefinitionError::TokenShadowsCommand {
                token: "q".into(),
                command: "eero device".into(),
            }
        );
    }

    #[test]
    fn variadic_must_be_last() {
        let root = CommandDef::group("eero", "root").child(
            CommandDef::command("block", "x")
                .arg(ArgSpec::required("devices", "d").variadic())
                .arg(ArgSpec::required("extra", "e")),
        );
        assert!(matches!(
            Catalog::new(root),
            Err(DefinitionError::InvalidArguments { .. })
        ));
    }
}
