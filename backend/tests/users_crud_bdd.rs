//! Behavioural tests for the users CRUD endpoints.
//!
//! Scenarios drive a real Actix server over HTTP, backed by the in-memory
//! user store.

#[path = "support/users_harness.rs"]
mod harness;

use actix_web::http::Method;
use harness::{Payload, WorldFixture, perform_request};
use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};
use serde_json::{Value, json};

#[fixture]
fn world() -> WorldFixture {
    harness::world()
}

fn created_path(world: &WorldFixture) -> String {
    let ctx = world.world();
    let id = ctx.borrow().created_id.clone().expect("created user id");
    format!("/users/{id}")
}

fn create_ada(world: &WorldFixture) {
    let shared_world = world.world();
    perform_request(
        &shared_world,
        Method::POST,
        "/users",
        Payload::Json(json!({"name": "A", "age": 5, "email": "a@x.com"})),
    );
    let mut ctx = shared_world.borrow_mut();
    let id = ctx
        .last_json()
        .get("id")
        .and_then(Value::as_str)
        .map(str::to_owned);
    ctx.created_id = id;
}

#[given("a running users server")]
fn a_running_users_server(world: &WorldFixture) {
    let _ = world;
}

#[given("a stored user named A aged 5 with email a@x.com")]
fn a_stored_user(world: &WorldFixture) {
    create_ada(world);
    assert_eq!(world.world().borrow().last_status, Some(201));
}

#[when("the client lists users")]
fn the_client_lists_users(world: &WorldFixture) {
    perform_request(&world.world(), Method::GET, "/users", Payload::None);
}

#[when("the client creates a user named A aged 5 with email a@x.com")]
fn the_client_creates_a_user(world: &WorldFixture) {
    create_ada(world);
}

#[when("the client fetches the created user")]
fn the_client_fetches_the_created_user(world: &WorldFixture) {
    let path = created_path(world);
    perform_request(&world.world(), Method::GET, &path, Payload::None);
}

#[when("the client sets the created user's age to 6")]
fn the_client_sets_the_created_users_age(world: &WorldFixture) {
    let path = created_path(world);
    perform_request(
        &world.world(),
        Method::PUT,
        &path,
        Payload::Json(json!({"age": 6})),
    );
}

#[when("the client sets the age of user 999 to 1")]
fn the_client_updates_an_unknown_user(world: &WorldFixture) {
    perform_request(
        &world.world(),
        Method::PUT,
        "/users/999",
        Payload::Json(json!({"age": 1})),
    );
}

#[when("the client deletes the created user")]
fn the_client_deletes_the_created_user(world: &WorldFixture) {
    let path = created_path(world);
    perform_request(&world.world(), Method::DELETE, &path, Payload::None);
}

#[when("the client posts a malformed user body")]
fn the_client_posts_a_malformed_body(world: &WorldFixture) {
    perform_request(
        &world.world(),
        Method::POST,
        "/users",
        Payload::Raw("{\"name\": "),
    );
}

#[when("the client probes readiness")]
fn the_client_probes_readiness(world: &WorldFixture) {
    perform_request(&world.world(), Method::GET, "/health/ready", Payload::None);
}

#[then("the response status is 200")]
fn the_response_status_is_200(world: &WorldFixture) {
    assert_eq!(world.world().borrow().last_status, Some(200));
}

#[then("the response status is 201")]
fn the_response_status_is_201(world: &WorldFixture) {
    assert_eq!(world.world().borrow().last_status, Some(201));
}

#[then("the response status is 400")]
fn the_response_status_is_400(world: &WorldFixture) {
    assert_eq!(world.world().borrow().last_status, Some(400));
}

#[then("the response status is 404")]
fn the_response_status_is_404(world: &WorldFixture) {
    assert_eq!(world.world().borrow().last_status, Some(404));
}

#[then("the response is the plain text \"No users found\"")]
fn the_response_is_no_users_found(world: &WorldFixture) {
    assert_plain_text(world);
    let ctx = world.world();
    assert_eq!(ctx.borrow().last_body.as_deref(), Some("No users found"));
}

#[then("the response is the plain text \"No user found\"")]
fn the_response_is_no_user_found(world: &WorldFixture) {
    assert_plain_text(world);
    let ctx = world.world();
    assert_eq!(ctx.borrow().last_body.as_deref(), Some("No user found"));
}

fn assert_plain_text(world: &WorldFixture) {
    let ctx = world.world();
    let ctx = ctx.borrow();
    let content_type = ctx.last_content_type.as_deref().unwrap_or_default();
    assert!(content_type.starts_with("text/plain"), "{content_type}");
}

#[then("the response body is plain text")]
fn the_response_body_is_plain_text(world: &WorldFixture) {
    assert_plain_text(world);
}

#[then("the response carries a trace id")]
fn the_response_carries_a_trace_id(world: &WorldFixture) {
    let ctx = world.world();
    let ctx = ctx.borrow();
    let trace_id = ctx.last_trace_id.as_deref().expect("trace-id header");
    assert!(!trace_id.is_empty());
}

#[then("the created user has a fresh identifier and all three fields")]
fn the_created_user_has_identifier_and_fields(world: &WorldFixture) {
    let ctx = world.world();
    let ctx = ctx.borrow();
    let id = ctx.created_id.as_deref().expect("created id");
    assert!(!id.is_empty());
    let body = ctx.last_json();
    assert_eq!(body.get("name").and_then(Value::as_str), Some("A"));
    assert_eq!(body.get("age").and_then(Value::as_u64), Some(5));
    assert_eq!(body.get("email").and_then(Value::as_str), Some("a@x.com"));
}

fn assert_describes_user(world: &WorldFixture, age: u64) {
    let ctx = world.world();
    let ctx = ctx.borrow();
    let body = ctx.last_json();
    assert_eq!(
        body.get("id").and_then(Value::as_str),
        ctx.created_id.as_deref()
    );
    assert_eq!(body.get("name").and_then(Value::as_str), Some("A"));
    assert_eq!(body.get("age").and_then(Value::as_u64), Some(age));
    assert_eq!(body.get("email").and_then(Value::as_str), Some("a@x.com"));
}

#[then("the response describes user A aged 5 with email a@x.com")]
fn the_response_describes_user_aged_5(world: &WorldFixture) {
    assert_describes_user(world, 5);
}

#[then("the response describes user A aged 6 with email a@x.com")]
fn the_response_describes_user_aged_6(world: &WorldFixture) {
    assert_describes_user(world, 6);
}

#[then("the response lists exactly one user aged 5")]
fn the_response_lists_one_user(world: &WorldFixture) {
    let ctx = world.world();
    let ctx = ctx.borrow();
    assert_eq!(ctx.last_status, Some(200));
    let body = ctx.last_json();
    let users = body.as_array().expect("user array");
    assert_eq!(users.len(), 1);
    assert_eq!(users[0].get("age").and_then(Value::as_u64), Some(5));
}

#[scenario(
    path = "tests/features/users_crud.feature",
    name = "Listing an empty store reports no users"
)]
fn listing_an_empty_store_reports_no_users(world: WorldFixture) {
    drop(world);
}

#[scenario(
    path = "tests/features/users_crud.feature",
    name = "A created user can be read back"
)]
fn a_created_user_can_be_read_back(world: WorldFixture) {
    drop(world);
}

#[scenario(
    path = "tests/features/users_crud.feature",
    name = "A partial update keeps untouched fields"
)]
fn a_partial_update_keeps_untouched_fields(world: WorldFixture) {
    drop(world);
}

#[scenario(
    path = "tests/features/users_crud.feature",
    name = "Updating an unknown user leaves the store unchanged"
)]
fn updating_an_unknown_user_leaves_the_store_unchanged(world: WorldFixture) {
    drop(world);
}

#[scenario(
    path = "tests/features/users_crud.feature",
    name = "Deleting twice reports not found the second time"
)]
fn deleting_twice_reports_not_found(world: WorldFixture) {
    drop(world);
}

#[scenario(
    path = "tests/features/users_crud.feature",
    name = "An unparseable body is rejected"
)]
fn an_unparseable_body_is_rejected(world: WorldFixture) {
    drop(world);
}

#[scenario(
    path = "tests/features/users_crud.feature",
    name = "The readiness probe reports a started server"
)]
fn the_readiness_probe_reports_a_started_server(world: WorldFixture) {
    drop(world);
}
