//! `eero profile ...`

use crate::core::options::OptionSpec;
use crate::core::tree::{ArgSpec, CommandDef};

fn profile_arg() -> ArgSpec {
    ArgSpec::required("profile", "Profile ID or name")
}

fn apps_arg() -> ArgSpec {
    ArgSpec::required("apps", "Application identifiers").variadic()
}

pub(super) fn definition() -> CommandDef {
    CommandDef::group("profile", "Manage profiles (parental controls)")
        .child(CommandDef::command("list", "List all profiles"))
        .child(CommandDef::command("show", "Show profile details").arg(profile_arg()))
        .child(
            CommandDef::command("pause", "Pause internet access for a profile")
                .arg(profile_arg())
                .option(
                    OptionSpec::text("duration")
                        .short('d')
                        .help("Duration (e.g. 30m, 1h)"),
                )
                .verb("pause profile")
                .confirm(),
        )
        .child(CommandDef::command("unpause", "Resume internet access").arg(profile_arg()))
        .child(
            CommandDef::group("apps", "Blocked applications (Eero Plus)")
                .child(CommandDef::command("list", "List blocked applications").arg(profile_arg()))
                .child(
                    CommandDef::command("block", "Block applications")
                        .arg(profile_arg())
                        .arg(apps_arg())
                        .verb("block applications")
                        .confirm(),
                )
                .child(
                    CommandDef::command("unblock", "Unblock applications")
                        .arg(profile_arg())
                        .arg(apps_arg()),
                ),
        )
        .child(
            CommandDef::group("schedule", "Internet access schedule")
                .child(CommandDef::command("show", "Show the schedule").arg(profile_arg()))
                .child(
                    CommandDef::command("set", "Set a blocking schedule")
                        .arg(profile_arg())
                        .required_option(OptionSpec::text("start").help("Start time (HH:MM)"))
                        .required_option(OptionSpec::text("end").help("End time (HH:MM)"))
                        .option(
                            OptionSpec::text("days").help("Days, comma-separated (e.g. mon,tue,wed)"),
                        )
                        .verb("set schedule")
                        .confirm(),
                )
                .child(
                    CommandDef::command("clear", "Clear the schedule")
                        .arg(profile_arg())
                        .verb("clear schedule")
                        .confirm(),
                ),
        )
}
