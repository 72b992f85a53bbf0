//! Server mode
//!
//! Starts the HTTP listener that serves the metrics registry.

use actix_web::{App, HttpServer, middleware::Compress, web};
use prometheus::Registry;
use tracing::info;

use crate::api::services::metrics_routes;
use crate::config::ServerConfig;
use crate::errors::{ExporterError, Result};

/// Bind the listener and serve until shutdown.
///
/// A bind failure is returned as [`ExporterError::Bind`].
pub async fn run_server(config: &ServerConfig, registry: Registry) -> Result<()> {
    let address = config.socket_address();

    let server = HttpServer::new(move || {
        App::new()
            .wrap(Compress::default())
            .app_data(web::Data::new(registry.clone()))
            .configure(metrics_routes)
    })
    .workers(config.workers)
    .bind(&address)
    .map_err(|e| ExporterError::bind(format!("Cannot listen on {}: {}", address, e)))?;

    info!("Serving metrics at http://{}", address);
    server.run().await?;
    info!("Server stopped");
    Ok(())
}
