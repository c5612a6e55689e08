//! cli::commands
//!
//! The `eero` command tree.
//!
//! # Architecture
//!
//! Each noun module returns the [`CommandDef`] for its subtree. This module
//! adds the global options and builds the [`Catalog`]. Commands carry no
//! behavior here: every action node except `completion` is executed by the
//! backend, keyed by its dotted path.
//!
//! Options shared by several commands are built by one constructor so every
//! declaration is identical; the registry rejects redeclarations that differ.

mod activity;
mod auth;
mod device;
mod eero;
mod network;
mod profile;
mod troubleshoot;

use crate::cli::help::Shell;
use crate::core::catalog::{Catalog, DefinitionError};
use crate::core::config::Config;
use crate::core::options::{names, OptionSpec, OptionValue, OutputFormat};
use crate::core::tree::{ArgSpec, CommandDef};

/// Dotted path of the builtin completion command.
pub const COMPLETION: &str = "completion";

/// Build the catalog, taking option defaults from `config`.
///
/// # Errors
///
/// Returns a [`DefinitionError`] if the definitions are inconsistent.
pub fn catalog(config: &Config) -> Result<Catalog, DefinitionError> {
    Catalog::new(definition(config))
}

/// The full command definition.
pub fn definition(config: &Config) -> CommandDef {
    let mut root = CommandDef::group("eero", "Manage an eero mesh Wi-Fi network");
    for option in global_options(config) {
        root = root.option(option);
    }
    root.child(auth::definition())
        .child(network::definition())
        .child(eero::definition())
        .child(device::definition())
        .child(profile::definition())
        .child(activity::definition())
        .child(troubleshoot::definition())
        .child(completion())
}

/// Options accepted at every level of the tree.
fn global_options(config: &Config) -> Vec<OptionSpec> {
    let formats = OutputFormat::names();
    let formats: Vec<&str> = formats.iter().map(String::as_str).collect();
    let default_output = config.default_output().to_string();

    let network = OptionSpec::text(names::NETWORK_ID)
        .short('n')
        .help("Network ID to operate on");
    let network = match config.preferred_network_id() {
        Some(id) => network.default_value(OptionValue::Text(id.to_string())),
        None => network,
    };

    vec![
        OptionSpec::choice(names::OUTPUT, &formats, &default_output)
            .short('o')
            .help("Output format"),
        network,
        OptionSpec::flag(names::NON_INTERACTIVE)
            .negation("--interactive")
            .default_value(OptionValue::Flag(config.non_interactive()))
            .help("Never prompt; fail if confirmation would be required"),
        OptionSpec::flag(names::FORCE)
            .alias("--yes")
            .short('y')
            .negation("--no-force")
            .help("Skip confirmation prompts"),
        OptionSpec::flag(names::QUIET)
            .short('q')
            .negation("--no-quiet")
            .help("Suppress non-essential output"),
        OptionSpec::flag(names::NO_COLOR)
            .negation("--color")
            .default_value(OptionValue::Flag(config.no_color()))
            .help("Disable colored output"),
        OptionSpec::flag(names::DEBUG)
            .negation("--no-debug")
            .help("Enable debug logging"),
        OptionSpec::flag(names::HELP).short('h').help("Show help"),
        OptionSpec::flag(names::VERSION)
            .short('V')
            .help("Show version information"),
    ]
}

fn completion() -> CommandDef {
    let shells = Shell::names();
    let shells: Vec<&str> = shells.iter().map(String::as_str).collect();
    CommandDef::command(COMPLETION, "Generate a shell completion script")
        .arg(ArgSpec::required("shell", "Target shell").choices(&shells))
}

// Shared local options.

pub(crate) fn name_option() -> OptionSpec {
    OptionSpec::text("name").help("New name")
}

pub(crate) fn target_option() -> OptionSpec {
    OptionSpec::text("target")
        .short('t')
        .help("Target host or IP")
}

pub(crate) fn from_option() -> OptionSpec {
    OptionSpec::text("from").help("eero node to run from (ID or name)")
}

/// A feature group with confirmed `enable` and `disable` actions.
pub(crate) fn toggle(name: &str, about: &str, feature: &str) -> CommandDef {
    CommandDef::group(name, about)
        .child(
            CommandDef::command("enable", &format!("Enable {}", feature))
                .verb(&format!("enable {}", feature))
                .confirm(),
        )
        .child(
            CommandDef::command("disable", &format!("Disable {}", feature))
                .verb(&format!("disable {}", feature))
                .confirm(),
        )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::tree::Risk;

    fn catalog_with(config: Config) -> Catalog {
        catalog(&config).unwrap()
    }

    #[test]
    fn definitions_are_consistent() {
        let catalog = catalog_with(Config::default());
        assert!(catalog.tree().len() > 50);
        assert!(catalog.registry().lookup("--yes").is_some());
        assert!(catalog.registry().lookup("--interactive").unwrap().negated);
    }

    #[test]
    fn every_command_is_described() {
        let catalog = catalog_with(Config::default());
        for (_, node) in catalog.tree().iter() {
            assert!(!node.about.is_empty(), "{}", node.path);
        }
        for (_, spec) in catalog.registry().iter() {
            assert!(!spec.description.is_empty(), "{}", spec.name);
        }
    }

    #[test]
    fn reboot_risks() {
        let catalog = catalog_with(Config::default());
        let tree = catalog.tree();
        let eero_reboot = tree.node(tree.find("eero.reboot").unwrap());
        assert_eq!(eero_reboot.risk, Risk::TypedPhrase("REBOOT".into()));
        let network_reboot = tree.node(tree.find("network.reboot").unwrap());
        assert_eq!(network_reboot.risk, Risk::TypedPhrase("REBOOTNETWORK".into()));
        let list = tree.node(tree.find("network.list").unwrap());
        assert_eq!(list.risk, Risk::None);
    }

    #[test]
    fn config_supplies_defaults() {
        let mut config = Config::default();
        config.global = crate::core::config::GlobalConfig {
            default_output: Some("json".into()),
            preferred_network_id: Some("net-42".into()),
            non_interactive: Some(true),
            no_color: None,
        };
        let catalog = catalog_with(config);
        let registry = catalog.registry();
        let spec = |name: &str| registry.spec(registry.id(name).unwrap()).default.clone();
        assert_eq!(spec("output"), OptionValue::Text("json".into()));
        assert_eq!(spec("network-id"), OptionValue::Text("net-42".into()));
        assert_eq!(spec("non-interactive"), OptionValue::Flag(true));
        assert_eq!(spec("no-color"), OptionValue::Flag(false));
    }
}
