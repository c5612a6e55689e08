//! `eero network ...`

use super::{name_option, toggle};
use crate::core::options::{OptionSpec, OptionValue};
use crate::core::tree::{ArgSpec, CommandDef};

const DNS_MODES: &[&str] = &["auto", "cloudflare", "google", "opendns", "custom"];

pub(super) fn definition() -> CommandDef {
    CommandDef::group("network", "Manage network settings")
        .child(CommandDef::command("list", "List all networks"))
        .child(
            CommandDef::command("use", "Set the preferred network")
                .arg(ArgSpec::required("network_id", "Network ID")),
        )
        .child(CommandDef::command("show", "Show network details"))
        .child(
            CommandDef::command("rename", "Rename the network (SSID)")
                .required_option(name_option())
                .verb("rename network")
                .confirm(),
        )
        .child(CommandDef::command("premium", "Show Eero Plus subscription status"))
        .child(
            CommandDef::command("reboot", "Reboot every eero on the network")
                .verb("reboot network")
                .high_risk(),
        )
        .child(dns())
        .child(security())
        .child(sqm())
        .child(guest())
        .child(backup())
        .child(
            CommandDef::group("speedtest", "Run and view speed tests")
                .child(CommandDef::command("run", "Run a new speed test"))
                .child(CommandDef::command("show", "Show the last speed test result")),
        )
        .child(
            CommandDef::group("forwards", "Manage port forwards")
                .child(CommandDef::command("list", "List port forwards"))
                .child(
                    CommandDef::command("show", "Show a port forward")
                        .arg(ArgSpec::required("forward_id", "Port forward ID")),
                ),
        )
        .child(
            CommandDef::group("dhcp", "View DHCP reservations and leases")
                .child(CommandDef::command("reservations", "List DHCP reservations"))
                .child(CommandDef::command("leases", "List current DHCP leases")),
        )
        .child(CommandDef::command("routing", "Show routing information"))
        .child(
            CommandDef::group("thread", "Thread network settings")
                .child(CommandDef::command("show", "Show Thread network details")),
        )
        .child(support())
}

fn dns() -> CommandDef {
    CommandDef::group("dns", "Manage DNS settings")
        .child(CommandDef::command("show", "Show DNS settings"))
        .child(
            CommandDef::group("mode", "DNS mode").child(
                CommandDef::command("set", "Set the DNS mode")
                    .arg(ArgSpec::required("mode", "DNS provider").choices(DNS_MODES))
                    .option(
                        OptionSpec::text("servers")
                            .short('s')
                            .help("Custom DNS servers, comma-separated (for 'custom' mode)"),
                    )
                    .verb("change DNS mode")
                    .confirm(),
            ),
        )
        .child(toggle("caching", "Local DNS caching", "DNS caching"))
}

fn security() -> CommandDef {
    CommandDef::group("security", "Manage security settings")
        .child(CommandDef::command("show", "Show security settings"))
        .child(toggle("wpa3", "WPA3 encryption", "WPA3"))
        .child(toggle("band-steering", "Band steering", "band steering"))
        .child(toggle("upnp", "UPnP port mapping", "UPnP"))
        .child(toggle("ipv6", "IPv6 support", "IPv6"))
        .child(toggle("thread", "Thread radio", "Thread"))
}

fn sqm() -> CommandDef {
    let bandwidth = |name: &str, help: &str| {
        OptionSpec::integer(name, 0)
            .default_value(OptionValue::Unset)
            .help(help)
    };
    CommandDef::group("sqm", "Smart Queue Management (QoS)")
        .child(CommandDef::command("show", "Show SQM settings"))
        .child(
            CommandDef::command("enable", "Enable SQM")
                .verb("enable SQM")
                .confirm(),
        )
        .child(
            CommandDef::command("disable", "Disable SQM")
                .verb("disable SQM")
                .confirm(),
        )
        .child(
            CommandDef::command("set", "Set SQM bandwidth limits")
                .option(bandwidth("upload", "Upload bandwidth limit (Mbps)").short('u'))
                .option(bandwidth("download", "Download bandwidth limit (Mbps)"))
                .verb("change SQM limits")
                .confirm(),
        )
}

fn guest() -> CommandDef {
    CommandDef::group("guest", "Manage the guest network")
        .child(CommandDef::command("show", "Show guest network settings"))
        .child(
            CommandDef::command("enable", "Enable the guest network")
                .verb("enable guest network")
                .confirm(),
        )
        .child(
            CommandDef::command("disable", "Disable the guest network")
                .verb("disable guest network")
                .confirm(),
        )
        .child(
            CommandDef::command("set", "Configure the guest network")
                .option(name_option())
                .option(OptionSpec::text("password").help("Guest network password"))
                .verb("change guest network")
                .confirm(),
        )
}

fn backup() -> CommandDef {
    CommandDef::group("backup", "Backup network (Eero Plus)")
        .child(CommandDef::command("show", "Show backup network settings"))
        .child(
            CommandDef::command("enable", "Enable the backup network")
                .verb("enable backup network")
                .confirm(),
        )
        .child(
            CommandDef::command("disable", "Disable the backup network")
                .verb("disable backup network")
                .confirm(),
        )
        .child(CommandDef::command("status", "Show backup connection status"))
}

fn support() -> CommandDef {
    CommandDef::group("support", "Support information")
        .child(CommandDef::command("show", "Show support contact details"))
        .child(
            CommandDef::group("bundle", "Support diagnostics bundle").child(
                CommandDef::command("export", "Export a support bundle to a file")
                    .required_option(OptionSpec::text("out").help("Output file path"))
                    .verb("export support bundle")
                    .confirm(),
            ),
        )
}
