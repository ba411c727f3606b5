//! Serve command - run the HTTP API

use crate::cli::app::Context;

/// Start the HTTP server with config overrides from the command line
#[cfg(feature = "server")]
pub fn serve(
    host: Option<String>,
    port: Option<u16>,
    workers: Option<usize>,
    ctx: &Context,
) -> anyhow::Result<()> {
    let mut config = ctx.config.server.clone();
    if let Some(host) = host {
        config.host = host;
    }
    if let Some(port) = port {
        config.port = port;
    }
    if let Some(workers) = workers {
        config.workers = workers;
    }

    log::info!("Serving boards from {:?}", ctx.tracker.store().path());
    crate::server::tiny_http::serve(std::sync::Arc::clone(&ctx.tracker), &config)
}

/// Built without the `server` feature
#[cfg(not(feature = "server"))]
pub fn serve(
    _host: Option<String>,
    _port: Option<u16>,
    _workers: Option<usize>,
    _ctx: &Context,
) -> anyhow::Result<()> {
    anyhow::bail!("sprintboard was built without the `server` feature")
}
