//! `eero activity ...` (Eero Plus)

use crate::core::options::OptionSpec;
use crate::core::tree::CommandDef;

pub(super) fn definition() -> CommandDef {
    CommandDef::group("activity", "Network activity data (Eero Plus)")
        .child(CommandDef::command("summary", "Show the activity summary"))
        .child(CommandDef::command("clients", "Show per-client activity"))
        .child(
            CommandDef::command("history", "Show historical activity").option(
                OptionSpec::choice("period", &["hour", "day", "week", "month"], "day")
                    .help("Time period"),
            ),
        )
        .child(CommandDef::command("categories", "Show activity by category"))
}
