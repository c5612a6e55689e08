//! `eero eero ...`

use crate::core::options::OptionSpec;
use crate::core::tree::{ArgSpec, CommandDef};

fn node_arg() -> ArgSpec {
    ArgSpec::required("eero", "eero ID, serial, or location name")
}

fn brightness() -> CommandDef {
    CommandDef::command("brightness", "Set brightness (0-100)")
        .arg(node_arg())
        .arg(ArgSpec::required("value", "Brightness percentage"))
}

pub(super) fn definition() -> CommandDef {
    CommandDef::group("eero", "Manage eero mesh nodes")
        .child(CommandDef::command("list", "List all mesh nodes"))
        .child(CommandDef::command("show", "Show node details").arg(node_arg()))
        .child(
            CommandDef::command("reboot", "Reboot a mesh node")
                .arg(node_arg())
                .typed_phrase("REBOOT"),
        )
        .child(
            CommandDef::group("led", "Manage status LEDs")
                .child(CommandDef::command("show", "Show LED status").arg(node_arg()))
                .child(CommandDef::command("on", "Turn the LED on").arg(node_arg()))
                .child(CommandDef::command("off", "Turn the LED off").arg(node_arg()))
                .child(brightness()),
        )
        .child(
            CommandDef::group("nightlight", "Manage the nightlight (eero Beacon)")
                .child(CommandDef::command("show", "Show nightlight settings").arg(node_arg()))
                .child(CommandDef::command("on", "Turn the nightlight on").arg(node_arg()))
                .child(CommandDef::command("off", "Turn the nightlight off").arg(node_arg()))
                .child(brightness())
                .child(
                    CommandDef::command("schedule", "Set the nightlight schedule")
                        .arg(node_arg())
                        .required_option(OptionSpec::text("on-time").help("Time to turn on (HH:MM)"))
                        .required_option(
                            OptionSpec::text("off-time").help("Time to turn off (HH:MM)"),
                        ),
                ),
        )
        .child(
            CommandDef::group("updates", "Firmware updates")
                .child(CommandDef::command("show", "Show update status"))
                .child(CommandDef::command("check", "Check for available updates")),
        )
}
