//! Prometheus metrics endpoint
//!
//! Every GET/HEAD path on the listener returns the registry in Prometheus
//! text format.

use actix_web::{HttpResponse, Responder, web};
use prometheus::Registry;
use tracing::{error, trace};

use crate::metrics::export;

const CONTENT_TYPE: &str = "text/plain; version=0.0.4; charset=utf-8";

/// Metrics service handler
pub struct MetricsService;

impl MetricsService {
    /// Handle metrics export request
    ///
    /// Collection does blocking file reads, so it runs on the blocking pool.
    pub async fn metrics(registry: web::Data<Registry>) -> impl Responder {
        trace!("Received scrape request");
        let registry = registry.get_ref().clone();

        match web::block(move || export(&registry)).await {
            Ok(Ok(output)) => HttpResponse::Ok().content_type(CONTENT_TYPE).body(output),
            Ok(Err(e)) => {
                error!("Failed to export metrics: {}", e);
                HttpResponse::InternalServerError()
                    .content_type("text/plain")
                    .body(e.to_string())
            }
            Err(e) => {
                error!("Metrics collection task failed: {}", e);
                HttpResponse::InternalServerError()
                    .content_type("text/plain")
                    .body("metrics collection failed")
            }
        }
    }
}

/// Routes serving the registry on every path
pub fn metrics_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/{tail:.*}")
            .route(web::get().to(MetricsService::metrics))
            .route(web::head().to(MetricsService::metrics)),
    );
}
