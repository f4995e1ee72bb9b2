use std::sync::Arc;

use anyhow::Result;
use pingora::prelude::*;
use pingora::server::Server;

use crate::config::VestibuleConfig;
use crate::gateway::VestibuleGateway;
use vestibule_core::FileServer;

/// Run the Pingora server with the given configuration.
pub fn run(config: VestibuleConfig) -> Result<()> {
    let mut server = Server::new(None)?;
    server.bootstrap();

    let settings = config.file_server_settings()?;
    let files = FileServer::new(settings)?;

    tracing::info!(
        listen = %config.server.listen,
        root = %config.files.root.display(),
        "starting vestibule"
    );

    let gateway = VestibuleGateway {
        files: Arc::new(files),
    };

    let mut svc = http_proxy_service(&server.configuration, gateway);
    svc.add_tcp(&config.server.listen);

    server.add_service(svc);
    server.run_forever();
}
