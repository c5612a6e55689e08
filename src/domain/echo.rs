//! domain::echo
//!
//! Backend that describes the request instead of performing it.
//!
//! The binary uses it until an API client is wired in; the output shows
//! exactly which command, network, arguments and options a real client
//! would receive.

use async_trait::async_trait;
use serde_json::json;
use tracing::info;

use super::traits::{ActionOutput, ActionRequest, Backend, DomainError};

#[derive(Debug, Clone, Copy, Default)]
pub struct EchoBackend;

#[async_trait]
impl Backend for EchoBackend {
    fn name(&self) -> &'static str {
        "echo"
    }

    async fn invoke(&self, request: &ActionRequest) -> Result<ActionOutput, DomainError> {
        info!(command = %request.command, "echo backend invoked");
        Ok(ActionOutput::new(json!({
            "command": request.command,
            "network": request.network_id(),
            "arguments": request.args,
            "options": request.options.explicit(),
        })))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::catalog::Catalog;
    use crate::core::options::OptionSpec;
    use crate::core::tree::{ArgSpec, CommandDef};
    use crate::engine::resolve::resolve;
    use crate::engine::walk::{bind, walk};

    #[test]
    fn describes_request() {
        let root = CommandDef::group("eero", "root")
            .option(OptionSpec::text("network-id").short('n'))
            .child(
                CommandDef::group("eero", "Nodes")
                    .child(CommandDef::command("reboot", "Reboot").arg(ArgSpec::required("eero", "Node"))),
            );
        let catalog = Catalog::new(root).unwrap();
        let tokens: Vec<String> = ["-n", "net-7", "eero", "reboot", "Living Room"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        let w = walk(&catalog, &tokens).unwrap();
        let options = resolve(catalog.registry(), &w.occurrences);
        let args = bind(&catalog, w.command, &w.positionals, &options).unwrap();
        let request = ActionRequest {
            command: catalog.tree().node(w.command).path.clone(),
            options,
            args,
        };

        let output = tokio_test::block_on(EchoBackend.invoke(&request)).unwrap();
        assert_eq!(output.payload["command"], "eero.reboot");
        assert_eq!(output.payload["network"], "net-7");
        assert_eq!(output.payload["arguments"]["eero"][0], "Living Room");
        assert_eq!(output.payload["options"]["network-id"], "net-7");
    }
}
