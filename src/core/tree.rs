//! core::tree
//!
//! The noun-first command tree.
//!
//! # Design
//!
//! Commands are declared as a nested [`CommandDef`] value and flattened by
//! [`crate::core::catalog::Catalog::new`] into an arena of [`CommandNode`]s
//! indexed by [`NodeId`]. The root is always `NodeId::ROOT`; every other node
//! is reachable by exactly one path of names.
//!
//! A node with no children is an action node and is the only kind of node a
//! command line may select. Group nodes exist to organize nouns.
//!
//! # Invariants
//!
//! - Risk classification is fixed when the tree is built
//! - Child names are unique under a parent
//! - Required positionals precede optional ones; a variadic positional is last

use super::options::OptionSpec;
use super::registry::OptionId;

/// Index of a node in the [`CommandTree`] arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub(crate) usize);

impl NodeId {
    /// The root node.
    pub const ROOT: NodeId = NodeId(0);

    pub fn index(self) -> usize {
        self.0
    }
}

/// Risk classification of a command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Risk {
    /// No confirmation needed.
    None,
    /// Simple yes/no confirmation.
    Confirm,
    /// The operator must type the exact phrase.
    TypedPhrase(String),
}

impl Risk {
    /// Whether the safety rail guards this command.
    pub fn is_destructive(&self) -> bool {
        !matches!(self, Risk::None)
    }

    pub fn name(&self) -> &'static str {
        match self {
            Risk::None => "none",
            Risk::Confirm => "confirm",
            Risk::TypedPhrase(_) => "typed-phrase",
        }
    }
}

/// Derive a confirmation phrase from an action label.
///
/// `"reboot network"` becomes `"REBOOTNETWORK"`.
pub fn default_phrase(action: &str) -> String {
    action
        .chars()
        .filter(|c| !c.is_whitespace())
        .flat_map(char::to_uppercase)
        .collect()
}

/// A positional argument accepted by an action node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArgSpec {
    pub name: String,
    pub help: String,
    pub required: bool,
    /// Consumes every remaining positional.
    pub variadic: bool,
    /// Fixed set of accepted values, if any.
    pub choices: Option<Vec<String>>,
}

impl ArgSpec {
    pub fn required(name: &str, help: &str) -> Self {
        Self {
            name: name.to_string(),
            help: help.to_string(),
            required: true,
            variadic: false,
            choices: None,
        }
    }

    pub fn optional(name: &str, help: &str) -> Self {
        Self {
            required: false,
            ..Self::required(name, help)
        }
    }

    pub fn variadic(mut self) -> Self {
        self.variadic = true;
        self
    }

    pub fn choices(mut self, choices: &[&str]) -> Self {
        self.choices = Some(choices.iter().map(|c| c.to_string()).collect());
        self
    }
}

#[derive(Debug, Clone)]
pub(crate) enum RiskDef {
    None,
    Confirm,
    Phrase(String),
    /// Phrase derived from the action label.
    Derived,
}

/// Declarative definition of a command and its subtree.
///
/// # Example
///
/// ```
/// use eeroctl::core::options::OptionSpec;
/// use eeroctl::core::tree::{ArgSpec, CommandDef};
///
/// let eero = CommandDef::group("eero", "Manage eero mesh nodes")
///     .child(CommandDef::command("list", "List all mesh nodes"))
///     .child(
///         CommandDef::command("reboot", "Reboot a node")
///             .arg(ArgSpec::required("eero", "Node ID, serial, or name"))
///             .typed_phrase("REBOOT"),
///     );
/// # let _ = eero;
/// ```
#[derive(Debug, Clone)]
pub struct CommandDef {
    pub(crate) name: String,
    pub(crate) about: String,
    pub(crate) children: Vec<CommandDef>,
    pub(crate) options: Vec<OptionSpec>,
    pub(crate) required_options: Vec<String>,
    pub(crate) args: Vec<ArgSpec>,
    pub(crate) risk: RiskDef,
    pub(crate) verb: Option<String>,
}

impl CommandDef {
    fn new(name: &str, about: &str) -> Self {
        Self {
            name: name.to_string(),
            about: about.to_string(),
            children: Vec::new(),
            options: Vec::new(),
            required_options: Vec::new(),
            args: Vec::new(),
            risk: RiskDef::None,
            verb: None,
        }
    }

    /// A noun grouping further commands.
    pub fn group(name: &str, about: &str) -> Self {
        Self::new(name, about)
    }

    /// An action command.
    pub fn command(name: &str, about: &str) -> Self {
        Self::new(name, about)
    }

    pub fn child(mut self, child: CommandDef) -> Self {
        self.children.push(child);
        self
    }

    /// Accept an option at this node and its descendants.
    pub fn option(mut self, spec: OptionSpec) -> Self {
        self.options.push(spec);
        self
    }

    /// Accept an option that must be supplied when this command runs.
    pub fn required_option(mut self, spec: OptionSpec) -> Self {
        self.required_options.push(spec.name.clone());
        self.options.push(spec);
        self
    }

    pub fn arg(mut self, arg: ArgSpec) -> Self {
        self.args.push(arg);
        self
    }

    /// Guard with a yes/no confirmation.
    pub fn confirm(mut self) -> Self {
        self.risk = RiskDef::Confirm;
        self
    }

    /// Guard with a typed confirmation phrase.
    pub fn typed_phrase(mut self, phrase: &str) -> Self {
        self.risk = RiskDef::Phrase(phrase.to_string());
        self
    }

    /// Guard with a typed phrase derived from the action label.
    pub fn high_risk(mut self) -> Self {
        self.risk = RiskDef::Derived;
        self
    }

    /// Label used in prompts ("reboot network"); defaults to the name.
    pub fn verb(mut self, verb: &str) -> Self {
        self.verb = Some(verb.to_string());
        self
    }
}

/// A flattened command node.
#[derive(Debug, Clone)]
pub struct CommandNode {
    pub name: String,
    pub about: String,
    pub parent: Option<NodeId>,
    pub children: Vec<NodeId>,
    /// Options declared at this node.
    pub options: Vec<OptionId>,
    pub required_options: Vec<OptionId>,
    pub args: Vec<ArgSpec>,
    pub risk: Risk,
    /// Action label used in prompts.
    pub action: String,
    /// Levels below the root.
    pub depth: usize,
    /// Dotted path without the root (`network.list`); empty for the root.
    pub path: String,
}

impl CommandNode {
    /// Whether the node can be selected as the command to run.
    pub fn is_executable(&self) -> bool {
        self.children.is_empty()
    }

    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }
}

/// Arena of command nodes.
#[derive(Debug, Clone)]
pub struct CommandTree {
    pub(crate) nodes: Vec<CommandNode>,
}

impl CommandTree {
    pub fn root(&self) -> &CommandNode {
        &self.nodes[NodeId::ROOT.0]
    }

    pub fn node(&self, id: NodeId) -> &CommandNode {
        &self.nodes[id.0]
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Find the child of `parent` with the given name.
    pub fn child(&self, parent: NodeId, name: &str) -> Option<NodeId> {
        self.node(parent)
            .children
            .iter()
            .copied()
            .find(|&c| self.node(c).name == name)
    }

    /// Iterate from `id` up to and including the root.
    pub fn ancestors(&self, id: NodeId) -> Ancestors<'_> {
        Ancestors {
            tree: self,
            next: Some(id),
        }
    }

    /// Look up a node by dotted path (`network.list`).
    pub fn find(&self, path: &str) -> Option<NodeId> {
        if path.is_empty() {
            return Some(NodeId::ROOT);
        }
        path.split('.')
            .try_fold(NodeId::ROOT, |node, name| self.child(node, name))
    }

    /// Space-separated path including the program name (`eero network list`).
    pub fn display_path(&self, id: NodeId) -> String {
        let mut names: Vec<&str> = self
            .ancestors(id)
            .map(|n| self.node(n).name.as_str())
            .collect();
        names.reverse();
        names.join(" ")
    }

    pub fn iter(&self) -> impl Iterator<Item = (NodeId, &CommandNode)> {
        self.nodes.iter().enumerate().map(|(i, n)| (NodeId(i), n))
    }
}

/// Iterator over a node and its ancestors.
pub struct Ancestors<'a> {
    tree: &'a CommandTree,
    next: Option<NodeId>,
}

impl Iterator for Ancestors<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let current = self.next?;
        self.next = self.tree.node(current).parent;
        Some(current)
    }
}
