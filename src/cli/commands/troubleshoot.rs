//! `eero troubleshoot ...`

use super::{from_option, target_option};
use crate::core::tree::CommandDef;

pub(super) fn definition() -> CommandDef {
    CommandDef::group("troubleshoot", "Network diagnostics")
        .child(CommandDef::command("connectivity", "Check network connectivity"))
        .child(
            CommandDef::command("ping", "Ping a host from the network")
                .required_option(target_option())
                .option(from_option()),
        )
        .child(
            CommandDef::command("trace", "Trace the route to a host")
                .required_option(target_option())
                .option(from_option()),
        )
        .child(CommandDef::command("doctor", "Run a full network health check"))
}
