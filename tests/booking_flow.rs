mod common;

use std::time::Duration;

use serde_json::json;

use bookit_web::booking::{
    BookingFlow, BookingParams, CreateError, MountOutcome, Phase, Recovery, CANCEL_FAILED,
    CONFIRM_FAILED, LOGIN_REQUIRED, MISSING_PARAMETERS, TIME_SLOT_UNAVAILABLE,
};
use bookit_web::models::{BookingStatus, Role};
use bookit_web::routes::Route;
use bookit_web::session::SessionStore;
use bookit_web::storage::{LocalStorage, MemoryStorage, USER_KEY};
use common::{booking_json, logged_in, session, FakeBackend};

const CREATE: &str = "POST /api/bookings/create";
const CONFIRM: &str = "PUT /api/bookings/b-1/confirm";
const CANCEL: &str = "DELETE /api/bookings/b-1";
const DELAY: Duration = Duration::from_millis(2000);

fn params() -> Result<BookingParams, CreateError> {
    BookingParams::from_pairs([
        ("restaurantId", "12"),
        ("dateTime", "2025-04-28T17:30:00"),
        ("people", "2"),
    ])
}

#[actix_web::test]
async fn missing_parameters_fail_without_request() {
    let backend = FakeBackend::start().await;
    let store = logged_in(Role::Customer);

    let incomplete = BookingParams::from_pairs([("restaurantId", "12"), ("people", "2")]);
    let mut flow = BookingFlow::new(backend.api(), store.reader(), incomplete, DELAY);

    assert_eq!(flow.mount().await, MountOutcome::Finished(Phase::Error));
    assert_eq!(flow.state().error(), Some(MISSING_PARAMETERS));
    assert_eq!(backend.total_hits(), 0);
}

#[actix_web::test]
async fn loading_session_does_not_fire_create() {
    let backend = FakeBackend::start().await;
    backend.reply(CREATE, 200, booking_json("b-1", "pending"));

    let storage = MemoryStorage::new();
    storage
        .set_item(USER_KEY, &serde_json::to_string(&session(Role::Customer)).unwrap())
        .unwrap();
    let store = SessionStore::new(storage);

    let mut flow = BookingFlow::new(backend.api(), store.reader(), params(), DELAY);
    assert_eq!(flow.mount().await, MountOutcome::AwaitingSession);
    assert_eq!(flow.phase(), Phase::Idle);
    assert_eq!(flow.login_prompt(), None);
    assert_eq!(backend.hits(CREATE), 0);

    store.restore();
    assert_eq!(flow.mount().await, MountOutcome::Finished(Phase::Pending));
    assert_eq!(backend.hits(CREATE), 1);
}

#[actix_web::test]
async fn anonymous_user_is_asked_to_log_in() {
    let backend = FakeBackend::start().await;
    let store = common::anonymous();

    let mut flow = BookingFlow::new(backend.api(), store.reader(), params(), DELAY);
    assert_eq!(flow.mount().await, MountOutcome::AwaitingSession);
    assert_eq!(flow.login_prompt(), Some(LOGIN_REQUIRED));
    assert_eq!(backend.total_hits(), 0);
}

#[actix_web::test]
async fn mount_when_ready_waits_for_restore() {
    let backend = FakeBackend::start().await;
    backend.reply(CREATE, 200, booking_json("b-1", "pending"));

    let storage = MemoryStorage::new();
    storage
        .set_item(USER_KEY, &serde_json::to_string(&session(Role::Customer)).unwrap())
        .unwrap();
    let store = SessionStore::new(storage);
    let reader = store.reader();

    let mount = actix_web::rt::spawn(async move {
        let mut flow = BookingFlow::new(backend.api(), reader, params(), DELAY);
        let outcome = flow.mount_when_ready().await;
        (outcome, backend)
    });

    tokio::task::yield_now().await;
    store.restore();

    let (outcome, backend) = mount.await.unwrap();
    assert_eq!(outcome, MountOutcome::Finished(Phase::Pending));
    assert_eq!(backend.hits(CREATE), 1);
}

#[actix_web::test]
async fn mounting_twice_creates_once() {
    let backend = FakeBackend::start().await;
    backend.reply(CREATE, 200, booking_json("b-1", "pending"));
    let store = logged_in(Role::Customer);

    let mut flow = BookingFlow::new(backend.api(), store.reader(), params(), DELAY);
    assert_eq!(flow.mount().await, MountOutcome::Finished(Phase::Pending));
    assert_eq!(flow.mount().await, MountOutcome::AlreadyStarted);
    assert_eq!(backend.hits(CREATE), 1);
}

#[actix_web::test]
async fn create_sends_user_and_slot_in_query() {
    let backend = FakeBackend::start().await;
    backend.reply(CREATE, 200, booking_json("b-1", "pending"));
    let store = logged_in(Role::Customer);

    let mut flow = BookingFlow::new(backend.api(), store.reader(), params(), DELAY);
    flow.mount().await;

    let request = backend.last(CREATE).unwrap();
    assert_eq!(request.query_param("restaurantId").as_deref(), Some("12"));
    assert_eq!(request.query_param("userId").as_deref(), Some("42"));
    assert_eq!(request.query_param("dateTime").as_deref(), Some("2025-04-28T17:30:00"));
    assert_eq!(request.query_param("people").as_deref(), Some("2"));
    assert_eq!(request.authorization.as_deref(), Some("Bearer jwt-42"));
}

#[actix_web::test]
async fn unavailable_slot_maps_to_sentinel() {
    let backend = FakeBackend::start().await;
    backend.reply(CREATE, 400, json!({ "message": "Time slot not available" }));
    let store = logged_in(Role::Customer);

    let mut flow = BookingFlow::new(backend.api(), store.reader(), params(), DELAY);
    assert_eq!(flow.mount().await, MountOutcome::Finished(Phase::Error));
    assert_eq!(flow.state().error(), Some(TIME_SLOT_UNAVAILABLE));

    let bookit_web::booking::FlowState::Failed(error) = flow.state() else {
        panic!("expected failed state");
    };
    assert_eq!(
        error.recovery(flow.restaurant_id()),
        Recovery::ChooseAnotherTime(Route::Restaurant("12".into()))
    );
}

#[actix_web::test]
async fn other_create_failures_show_server_message() {
    let backend = FakeBackend::start().await;
    backend.reply(CREATE, 409, json!({ "message": "Restaurant closed" }));
    let store = logged_in(Role::Customer);

    let mut flow = BookingFlow::new(backend.api(), store.reader(), params(), DELAY);
    flow.mount().await;
    assert_eq!(flow.state().error(), Some("Restaurant closed"));
}

#[actix_web::test]
async fn confirm_replaces_booking_and_schedules_redirect() {
    let backend = FakeBackend::start().await;
    backend.reply(CREATE, 200, booking_json("b-1", "pending"));
    let mut confirmed = booking_json("b-1", "confirmed");
    confirmed["totalCustomers"] = json!(3);
    backend.reply(CONFIRM, 200, confirmed);
    let store = logged_in(Role::Customer);

    let mut flow = BookingFlow::new(backend.api(), store.reader(), params(), DELAY);
    flow.mount().await;
    assert!(flow.state().can_confirm());

    assert_eq!(flow.confirm().await, Ok(Phase::Confirmed));
    let booking = flow.state().booking().unwrap();
    assert_eq!(booking.status, BookingStatus::Confirmed);
    assert_eq!(booking.total_customers, 3);
    assert!(!flow.state().can_confirm());

    let redirect = flow.state().redirect().unwrap();
    assert_eq!(redirect.route, Route::Home);
    assert_eq!(redirect.after, DELAY);

    let request = backend.last(CONFIRM).unwrap();
    assert_eq!(request.query_param("type").as_deref(), Some("EMAIL"));

    // confirmar otra vez no está permitido
    assert!(flow.confirm().await.is_err());
    assert_eq!(backend.hits(CONFIRM), 1);
}

#[actix_web::test]
async fn failed_confirm_keeps_pending_booking() {
    let backend = FakeBackend::start().await;
    backend.reply(CREATE, 200, booking_json("b-1", "pending"));
    backend.reply(CONFIRM, 500, json!({ "message": "mail server down" }));
    let store = logged_in(Role::Customer);

    let mut flow = BookingFlow::new(backend.api(), store.reader(), params(), DELAY);
    flow.mount().await;

    assert_eq!(flow.confirm().await, Ok(Phase::Pending));
    assert_eq!(flow.state().error(), Some(CONFIRM_FAILED));
    assert_eq!(flow.state().booking().unwrap().status, BookingStatus::Pending);
    assert!(flow.state().redirect().is_none());
}

#[actix_web::test]
async fn cancel_goes_through_prompt() {
    let backend = FakeBackend::start().await;
    backend.reply(CREATE, 200, booking_json("b-1", "pending"));
    backend.reply(CANCEL, 200, serde_json::Value::Null);
    let store = logged_in(Role::Customer);

    let mut flow = BookingFlow::new(backend.api(), store.reader(), params(), DELAY);
    flow.mount().await;

    assert_eq!(flow.request_cancel(), Ok(Phase::CancelPrompt));
    assert_eq!(flow.dismiss_cancel(), Ok(Phase::Pending));
    assert_eq!(backend.hits(CANCEL), 0);

    flow.request_cancel().unwrap();
    assert_eq!(flow.confirm_cancel().await, Ok(Phase::Cancelled));
    assert_eq!(backend.hits(CANCEL), 1);
    assert_eq!(flow.state().redirect().unwrap().route, Route::Home);
}

#[actix_web::test]
async fn failed_cancel_leaves_booking_in_place() {
    let backend = FakeBackend::start().await;
    backend.reply(CREATE, 200, booking_json("b-1", "pending"));
    backend.reply(CANCEL, 500, serde_json::Value::Null);
    let store = logged_in(Role::Customer);

    let mut flow = BookingFlow::new(backend.api(), store.reader(), params(), DELAY);
    flow.mount().await;
    flow.request_cancel().unwrap();

    assert_eq!(flow.confirm_cancel().await, Ok(Phase::Pending));
    assert_eq!(flow.state().error(), Some(CANCEL_FAILED));
    assert_eq!(flow.state().booking().unwrap().id, "b-1");
}
