//! `eero auth ...`

use crate::core::options::OptionSpec;
use crate::core::tree::CommandDef;

pub(super) fn definition() -> CommandDef {
    CommandDef::group("auth", "Manage authentication")
        .child(
            CommandDef::command("login", "Log in to the eero account").option(
                OptionSpec::flag("no-keyring").help("Don't store the session token in the keyring"),
            ),
        )
        .child(CommandDef::command("logout", "End the current session"))
        .child(
            CommandDef::command("clear", "Remove all stored credentials")
                .verb("clear stored credentials")
                .confirm(),
        )
        .child(CommandDef::command("status", "Show authentication status"))
}
