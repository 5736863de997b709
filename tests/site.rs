use actix_web::http::{header, StatusCode};
use actix_web::{test, App};
use serde_json::{json, Value};

use bookit_web::config::Config;
use bookit_web::site;

fn config_for(dir: &std::path::Path) -> Config {
    Config {
        api_base_url: "http://backend.test/api".to_string(),
        static_dir: dir.to_path_buf(),
        ..Config::default()
    }
}

#[actix_web::test]
async fn config_json_exposes_backend_url() {
    let dir = tempfile::tempdir().unwrap();
    let config = config_for(dir.path());
    let app = test::init_service(App::new().configure(|cfg| site::configure(cfg, &config))).await;

    let req = test::TestRequest::get().uri("/config.json").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body, json!({ "apiBaseUrl": "http://backend.test/api" }));
}

#[actix_web::test]
async fn root_redirects_to_home() {
    let dir = tempfile::tempdir().unwrap();
    let config = config_for(dir.path());
    let app = test::init_service(App::new().configure(|cfg| site::configure(cfg, &config))).await;

    let req = test::TestRequest::get().uri("/").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::FOUND);
    assert_eq!(resp.headers().get(header::LOCATION).unwrap(), "/home");
}

#[actix_web::test]
async fn serves_exported_pages() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::create_dir(dir.path().join("home")).unwrap();
    std::fs::write(dir.path().join("home/index.html"), "<h1>BookIt</h1>").unwrap();
    let config = config_for(dir.path());
    let app = test::init_service(App::new().configure(|cfg| site::configure(cfg, &config))).await;

    let req = test::TestRequest::get().uri("/home/index.html").to_request();
    let resp = test::call_service(&app, req).await;
    assert!(resp.status().is_success());
    let body = test::read_body(resp).await;
    assert_eq!(&body[..], b"<h1>BookIt</h1>");

    let req = test::TestRequest::get().uri("/missing.html").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}
