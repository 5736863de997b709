mod common;

use serde_json::{json, Value};
use tokio_test::assert_ok;

use bookit_web::api::restaurant::SearchQuery;
use bookit_web::api::ClientError;
use bookit_web::forms::{LoginForm, SignupForm};
use bookit_web::models::Role;
use bookit_web::routes::Route;
use bookit_web::session::SessionStore;
use bookit_web::storage::{FileStorage, LocalStorage, TOKEN_KEY, USER_KEY};
use common::{session, FakeBackend};

#[actix_web::test]
async fn every_request_carries_request_id_and_token() {
    let backend = FakeBackend::start().await;
    backend.reply("GET /api/restaurants/available-tables", 200, json!([]));

    assert_ok!(backend.api().available_restaurants().await);
    let anonymous = backend.last("GET /api/restaurants/available-tables").unwrap();
    assert!(anonymous.authorization.is_none());

    let authed = backend.api().with_token("abc");
    assert_ok!(authed.available_restaurants().await);
    assert_ok!(authed.available_restaurants().await);

    let requests = backend.requests();
    assert_eq!(requests[1].authorization.as_deref(), Some("Bearer abc"));

    let ids: Vec<String> = requests.iter().filter_map(|r| r.request_id.clone()).collect();
    assert_eq!(ids.len(), 3);
    assert_ne!(ids[1], ids[2]);
    assert!(uuid::Uuid::parse_str(&ids[0]).is_ok());
}

#[actix_web::test]
async fn error_body_message_is_surfaced() {
    let backend = FakeBackend::start().await;
    backend.reply("GET /api/restaurants/9", 404, json!({ "message": "Restaurant not found" }));
    backend.reply("GET /api/restaurants/10", 500, json!({ "error": "Internal Server Error" }));

    let err = backend.api().get_restaurant("9").await.unwrap_err();
    assert_eq!(err.status(), Some(404));
    assert_eq!(err.server_message(), Some("Restaurant not found"));

    let err = backend.api().get_restaurant("10").await.unwrap_err();
    assert_eq!(err.server_message(), Some("Internal Server Error"));
}

#[actix_web::test]
async fn malformed_body_is_a_decode_error() {
    let backend = FakeBackend::start().await;
    backend.reply("GET /api/restaurants/9", 200, json!({ "unexpected": true, "photos": 3 }));

    let err = backend.api().get_restaurant("9").await.unwrap_err();
    assert!(matches!(err, ClientError::Decode { .. }));
}

#[actix_web::test]
async fn unreachable_backend_is_a_transport_error() {
    let backend = FakeBackend::start().await;
    let api = backend.api();
    backend.stop().await;

    let err = api.available_restaurants().await.unwrap_err();
    assert!(matches!(err, ClientError::Transport { .. }));
}

#[actix_web::test]
async fn search_sends_only_filled_params() {
    let backend = FakeBackend::start().await;
    backend.reply("GET /api/restaurants/search", 200, json!([]));

    let query = SearchQuery::default().with_free_text("sushi 95112");
    assert_ok!(backend.api().search_restaurants(&query).await);

    let request = backend.last("GET /api/restaurants/search").unwrap();
    assert_eq!(request.query_param("location").as_deref(), Some("San Jose"));
    assert_eq!(request.query_param("people").as_deref(), Some("1"));
    assert_eq!(request.query_param("name").as_deref(), Some("sushi"));
    assert_eq!(request.query_param("zipCode").as_deref(), Some("95112"));

    let plain = SearchQuery::default();
    assert_ok!(backend.api().search_restaurants(&plain).await);
    let request = backend.last("GET /api/restaurants/search").unwrap();
    assert_eq!(request.query_param("name"), None);
    assert_eq!(request.query_param("zipCode"), None);
}

#[actix_web::test]
async fn login_persists_session_across_reload() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("local-storage.json");

    let backend = FakeBackend::start().await;
    let mut signed_in = serde_json::to_value(session(Role::Manager)).unwrap();
    signed_in["id"] = json!(42);
    backend.reply("POST /api/auth/signin", 200, signed_in);

    let store = SessionStore::restored(FileStorage::open(&path).unwrap());
    let mut form = LoginForm {
        contact: "ana@example.com".into(),
        password: "secret".into(),
        ..LoginForm::default()
    };
    assert_eq!(form.submit(&backend.api(), &store).await.unwrap(), Route::Manager);

    let body: Value = serde_json::from_slice(&backend.last("POST /api/auth/signin").unwrap().body).unwrap();
    assert_eq!(body, json!({ "email": "ana@example.com", "password": "secret" }));

    // recarga: otro almacén sobre el mismo fichero
    let storage = FileStorage::open(&path).unwrap();
    assert_eq!(storage.get_item(TOKEN_KEY).unwrap().as_deref(), Some("jwt-42"));
    assert!(storage.get_item(USER_KEY).unwrap().is_some());

    let reloaded = SessionStore::restored(storage);
    let reader = reloaded.reader();
    assert!(reader.is_logged_in());
    assert_eq!(reader.role(), Some(Role::Manager));
    assert_eq!(reader.user().unwrap().user_id, "42");
}

#[actix_web::test]
async fn failed_login_shows_backend_message() {
    let backend = FakeBackend::start().await;
    backend.reply("POST /api/auth/signin", 401, json!({ "message": "Invalid credentials" }));

    let store = common::anonymous();
    let mut form = LoginForm::default();
    assert!(form.submit(&backend.api(), &store).await.is_err());
    assert_eq!(form.error.as_deref(), Some("Invalid credentials"));
    assert!(!store.reader().is_logged_in());
}

#[actix_web::test]
async fn signup_sends_role_and_leads_to_login() {
    let backend = FakeBackend::start().await;
    backend.reply("POST /api/auth/signup", 200, Value::Null);

    let mut form = SignupForm {
        name: "Ana".into(),
        email: "ana@example.com".into(),
        password: "pw".into(),
        confirm_password: "pw".into(),
        role: Role::Manager,
        ..SignupForm::default()
    };
    assert_eq!(form.submit(&backend.api()).await.unwrap(), Route::Login);

    let body: Value = serde_json::from_slice(&backend.last("POST /api/auth/signup").unwrap().body).unwrap();
    assert_eq!(body["role"], "ROLE_MANAGER");
}
