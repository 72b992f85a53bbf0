//! HTTP scrape endpoint tests

use std::fs;
use std::path::Path;

use actix_web::http::{Method, StatusCode};
use actix_web::http::header::CONTENT_TYPE;
use actix_web::test::{self, TestRequest};
use actix_web::{App, web};
use container_exporter::api::services::metrics_routes;
use container_exporter::metrics::{DEFAULT_READ_TIMEOUT, Direction, SourcePaths, container_metrics};
use prometheus::Registry;
use tempfile::TempDir;

fn write(path: &Path, content: &str) {
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

fn fake_registry() -> (TempDir, Registry) {
    let root = TempDir::new().unwrap();
    let paths = SourcePaths::under(root.path());
    write(&paths.memory_usage(), "4096\n");
    write(&paths.cpu_usage(), "500000000\n");
    write(&paths.interface_bytes("eth0", Direction::Transmit), "500\n");
    write(&paths.interface_bytes("eth0", Direction::Receive), "600\n");

    let registry = container_metrics(&paths, DEFAULT_READ_TIMEOUT)
        .unwrap()
        .into_registry()
        .unwrap();
    (root, registry)
}

#[actix_rt::test]
async fn test_root_path_serves_metrics() {
    let (_root, registry) = fake_registry();
    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(registry))
            .configure(metrics_routes),
    )
    .await;

    let resp = test::call_service(&app, TestRequest::get().uri("/").to_request()).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let content_type = resp
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string();
    assert!(content_type.starts_with("text/plain; version=0.0.4"));

    let body = test::read_body(resp).await;
    let body = String::from_utf8(body.to_vec()).unwrap();
    assert!(body.contains("container_memory_usage_bytes 4096"), "{}", body);
    assert!(body.contains("container_cpu_usage_seconds_total 0.5"), "{}", body);
    assert!(
        body.contains("container_network_receive_bytes_total{interface=\"eth0\"} 600"),
        "{}",
        body
    );
}

#[actix_rt::test]
async fn test_any_path_serves_metrics() {
    let (_root, registry) = fake_registry();
    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(registry))
            .configure(metrics_routes),
    )
    .await;

    let req = TestRequest::get().uri("/metrics").to_request();
    let body = test::call_and_read_body(&app, req).await;
    let body = String::from_utf8(body.to_vec()).unwrap();
    assert!(body.contains("container_network_transmit_bytes_total"), "{}", body);
}

#[actix_rt::test]
async fn test_head_request_succeeds() {
    let (_root, registry) = fake_registry();
    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(registry))
            .configure(metrics_routes),
    )
    .await;

    let req = TestRequest::default()
        .method(Method::HEAD)
        .uri("/")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
}

#[actix_rt::test]
async fn test_post_is_not_served() {
    let (_root, registry) = fake_registry();
    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(registry))
            .configure(metrics_routes),
    )
    .await;

    let resp = test::call_service(&app, TestRequest::post().uri("/").to_request()).await;
    assert_eq!(resp.status(), StatusCode::METHOD_NOT_ALLOWED);
}
