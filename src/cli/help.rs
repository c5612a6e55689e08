//! cli::help
//!
//! Help and completion rendering from the command tree.
//!
//! # Design
//!
//! The engine does its own parsing; clap is used only as a renderer. The
//! tree is mirrored into a `clap::Command` (same names, options and
//! positionals) and clap formats help pages and completion scripts from it.
//! The mirror is never asked to parse a command line.

use clap::builder::PossibleValuesParser;
use clap::{value_parser, Arg, ArgAction, Command, ValueEnum};
use clap_complete::generate;

use crate::core::catalog::Catalog;
use crate::core::options::{OptionSpec, OptionValue, ValueKind};
use crate::core::tree::{ArgSpec, NodeId};
use crate::engine::ExitCode;

/// Shells supported by `eero completion`.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    #[value(name = "powershell")]
    PowerShell,
}

impl Shell {
    fn generator(self) -> clap_complete::Shell {
        match self {
            Shell::Bash => clap_complete::Shell::Bash,
            Shell::Zsh => clap_complete::Shell::Zsh,
            Shell::Fish => clap_complete::Shell::Fish,
            Shell::PowerShell => clap_complete::Shell::PowerShell,
        }
    }

    /// Names accepted on the command line.
    pub fn names() -> Vec<String> {
        Self::value_variants()
            .iter()
            .filter_map(|v| v.to_possible_value())
            .map(|v| v.get_name().to_string())
            .collect()
    }
}

/// Mirror the whole tree as a clap command.
pub fn command(catalog: &Catalog) -> Command {
    build(catalog, NodeId::ROOT)
        .version(env!("CARGO_PKG_VERSION"))
        .after_help(format!("Exit codes:\n{}", ExitCode::table()))
}

/// Render the help page of `node`.
pub fn render(catalog: &Catalog, node: NodeId) -> String {
    let mut root = command(catalog);
    root.build();

    let tree = catalog.tree();
    let mut path: Vec<NodeId> = tree.ancestors(node).collect();
    path.reverse();

    let mut current = root;
    for id in path.into_iter().skip(1) {
        let name = tree.node(id).name.as_str();
        match current.find_subcommand(name) {
            Some(sub) => current = sub.clone(),
            None => break,
        }
    }
    current.render_help().to_string()
}

/// Write a completion script for `shell`.
pub fn completion(catalog: &Catalog, shell: Shell, out: &mut dyn std::io::Write) {
    let mut cmd = command(catalog);
    let name = cmd.get_name().to_string();
    generate(shell.generator(), &mut cmd, name, out);
}

fn build(catalog: &Catalog, id: NodeId) -> Command {
    let tree = catalog.tree();
    let node = tree.node(id);

    let mut cmd = Command::new(node.name.clone())
        .about(node.about.clone())
        .disable_help_flag(true)
        .disable_version_flag(true)
        .disable_help_subcommand(true);

    let global = !node.is_executable();
    for &option in &node.options {
        for arg in option_args(catalog.registry().spec(option), global) {
            cmd = cmd.arg(arg);
        }
    }
    for spec in &node.args {
        cmd = cmd.arg(positional(spec));
    }
    for &child in &node.children {
        cmd = cmd.subcommand(build(catalog, child));
    }
    cmd
}

fn option_args(spec: &OptionSpec, global: bool) -> Vec<Arg> {
    let mut arg = Arg::new(spec.name.clone())
        .help(spec.description.clone())
        .global(global);

    let mut has_long = false;
    for alias in &spec.aliases {
        if let Some(long) = alias.strip_prefix("--") {
            arg = if has_long {
                arg.visible_alias(long.to_string())
            } else {
                arg.long(long.to_string())
            };
            has_long = true;
        } else if let Some(short) = single_short(alias) {
            arg = arg.short(short);
        }
    }

    arg = match &spec.kind {
        ValueKind::Flag => arg.action(ArgAction::SetTrue),
        ValueKind::Choice(choices) => arg
            .action(ArgAction::Set)
            .value_parser(PossibleValuesParser::new(choices.clone())),
        ValueKind::Text => arg
            .action(ArgAction::Set)
            .value_name(spec.name.to_uppercase().replace('-', "_")),
        ValueKind::Integer => arg
            .action(ArgAction::Set)
            .value_name("N")
            .value_parser(value_parser!(i64)),
    };
    if spec.kind.takes_value() {
        if let OptionValue::Text(_) | OptionValue::Integer(_) = &spec.default {
            arg = arg.default_value(spec.default.to_string());
        }
    }

    let mut args = vec![arg];
    for negation in &spec.negations {
        if let Some(long) = negation.strip_prefix("--") {
            args.push(
                Arg::new(format!("{}:negated:{}", spec.name, long))
                    .long(long.to_string())
                    .help(format!("Turn off {}", spec.display_token()))
                    .action(ArgAction::SetTrue)
                    .global(global),
            );
        }
    }
    args
}

fn positional(spec: &ArgSpec) -> Arg {
    let mut arg = Arg::new(format!("arg:{}", spec.name))
        .value_name(spec.name.to_uppercase())
        .help(spec.help.clone())
        .required(spec.required);
    if spec.variadic {
        arg = arg.num_args(1..).action(ArgAction::Append);
    }
    if let Some(choices) = &spec.choices {
        arg = arg.value_parser(PossibleValuesParser::new(choices.clone()));
    }
    arg
}

fn single_short(token: &str) -> Option<char> {
    let rest = token.strip_prefix('-')?;
    let mut chars = rest.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) if c != '-' => Some(c),
        _ => None,
    }
}
