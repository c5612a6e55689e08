//! `eero device ...`

use super::name_option;
use crate::core::options::OptionSpec;
use crate::core::tree::{ArgSpec, CommandDef};

fn device_arg() -> ArgSpec {
    ArgSpec::required("device", "Device ID, MAC, or name")
}

fn devices_arg() -> ArgSpec {
    ArgSpec::required("devices", "Device IDs, MACs, or names").variadic()
}

pub(super) fn definition() -> CommandDef {
    CommandDef::group("device", "Manage connected devices")
        .child(CommandDef::command("list", "List all connected devices"))
        .child(CommandDef::command("show", "Show device details").arg(device_arg()))
        .child(
            CommandDef::command("rename", "Set a device nickname")
                .arg(device_arg())
                .required_option(name_option())
                .verb("rename device"),
        )
        .child(
            CommandDef::command("block", "Block devices from the network")
                .arg(devices_arg())
                .verb("block devices")
                .confirm(),
        )
        .child(
            CommandDef::command("unblock", "Unblock devices")
                .arg(devices_arg())
                .verb("unblock devices")
                .confirm(),
        )
        .child(
            CommandDef::group("priority", "Manage device bandwidth priority")
                .child(CommandDef::command("show", "Show priority status").arg(device_arg()))
                .child(
                    CommandDef::command("on", "Prioritize a device")
                        .arg(device_arg())
                        .option(
                            OptionSpec::integer("minutes", 0)
                                .short('m')
                                .help("Duration in minutes (0 = indefinite)"),
                        ),
                )
                .child(CommandDef::command("off", "Remove device priority").arg(device_arg())),
        )
}
