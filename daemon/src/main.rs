mod config;
mod corrector;
mod debounce;
mod protocol;
mod server;
mod session;

use anyhow::Result;
use config::DaemonConfig;
use corrector::CorrectorRouter;
use server::SuggestionServer;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("info".parse()?))
        .init();

    let config = DaemonConfig::load()?;
    info!(
        socket = %config.server.socket_path.display(),
        endpoint = %config.backend.endpoint,
        check_enabled = config.check.enable,
        trigger_delay_ms = config.check.trigger_delay_ms,
        min_chars = config.check.min_chars,
        dismiss_grace_ms = config.check.dismiss_grace_ms,
        request_timeout_ms = config.backend.request_timeout_ms,
        association = ?config.overlay.association,
        anchor = ?config.overlay.anchor,
        indicator = config.indicator.enable,
        "loaded grammarlite config"
    );
    let corrector = CorrectorRouter::new(&config.backend, &config.check)?;
    let server = SuggestionServer::new(config, corrector);
    server.run().await
}
