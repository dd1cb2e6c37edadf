//! Tests for users API handlers.

use super::*;
use crate::outbound::memory::InMemoryUserRepository;
use actix_web::dev::{Service, ServiceResponse};
use actix_web::http::{Method, StatusCode};
use actix_web::{App, test as actix_test, web};
use rstest::{fixture, rstest};
use rstest_bdd_macros::{given, then};
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;

#[fixture]
fn state() -> HttpState {
    HttpState::from_repository(Arc::new(InMemoryUserRepository::new()))
}

fn test_app(
    state: HttpState,
) -> App<
    impl actix_web::dev::ServiceFactory<
        actix_web::dev::ServiceRequest,
        Config = (),
        Response = actix_web::dev::ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    App::new()
        .app_data(web::Data::new(state))
        .configure(configure)
}

async fn send(
    app: &impl Service<actix_http::Request, Response = ServiceResponse, Error = actix_web::Error>,
    method: Method,
    uri: &str,
    body: Option<&str>,
) -> ServiceResponse {
    let mut request = actix_test::TestRequest::default().method(method).uri(uri);
    if let Some(body) = body {
        request = request.set_payload(body.to_owned());
    }
    actix_test::call_service(app, request.to_request()).await
}

async fn body_text(response: ServiceResponse) -> String {
    let bytes = actix_test::read_body(response).await;
    String::from_utf8(bytes.to_vec()).expect("utf-8 body")
}

/// Create a user and return the path from its `Location` header.
async fn create(
    app: &impl Service<actix_http::Request, Response = ServiceResponse, Error = actix_web::Error>,
    name: &str,
    email: &str,
) -> String {
    let body = serde_json::json!({ "name": name, "email": email }).to_string();
    let response = send(app, Method::POST, "/users", Some(&body)).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    response
        .headers()
        .get(header::LOCATION)
        .and_then(|value| value.to_str().ok())
        .expect("location header")
        .to_owned()
}

async fn list(
    app: &impl Service<actix_http::Request, Response = ServiceResponse, Error = actix_web::Error>,
) -> Vec<User> {
    let response = send(app, Method::GET, "/users", None).await;
    assert_eq!(response.status(), StatusCode::OK);
    actix_test::read_body_json(response).await
}

#[rstest]
#[actix_web::test]
async fn listing_an_empty_table_returns_empty_array(state: HttpState) {
    let app = actix_test::init_service(test_app(state)).await;

    let response = send(&app, Method::GET, "/users", None).await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_text(response).await, "[]");
}

#[rstest]
#[actix_web::test]
async fn create_reports_success_and_location(state: HttpState) {
    let app = actix_test::init_service(test_app(state)).await;

    let response = send(
        &app,
        Method::POST,
        "/users",
        Some(r#"{"name":"Ada","email":"ada@example.com"}"#),
    )
    .await;

    assert_eq!(response.status(), StatusCode::CREATED);
    assert_eq!(
        response
            .headers()
            .get(header::LOCATION)
            .and_then(|value| value.to_str().ok()),
        Some("/users/1")
    );
    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(body, serde_json::json!({ "message": "User created successfully" }));
}

#[rstest]
#[actix_web::test]
async fn created_user_is_fetchable(state: HttpState) {
    let app = actix_test::init_service(test_app(state)).await;
    let location = create(&app, "Ada", "ada@example.com").await;

    let response = send(&app, Method::GET, &location, None).await;

    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(
        body,
        serde_json::json!({ "id": 1, "name": "Ada", "email": "ada@example.com" })
    );
}

#[rstest]
#[actix_web::test]
async fn duplicate_email_fails_and_keeps_first_user(state: HttpState) {
    let app = actix_test::init_service(test_app(state)).await;
    create(&app, "Ada", "ada@example.com").await;

    let response = send(
        &app,
        Method::POST,
        "/users",
        Some(r#"{"name":"Imposter","email":"ada@example.com"}"#),
    )
    .await;

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let text = body_text(response).await;
    assert!(text.starts_with("Could not create user: "), "body: {text}");
    assert!(text.contains("UNIQUE constraint failed"), "body: {text}");

    let users = list(&app).await;
    assert_eq!(users.len(), 1);
    assert_eq!(users[0].name().as_str(), "Ada");
}

#[rstest]
#[case(Method::GET)]
#[case(Method::PUT)]
#[case(Method::DELETE)]
#[actix_web::test]
async fn missing_user_is_not_found(state: HttpState, #[case] method: Method) {
    let app = actix_test::init_service(test_app(state)).await;

    let response = send(
        &app,
        method,
        "/users/999999",
        Some(r#"{"name":"Ghost","email":"ghost@example.com"}"#),
    )
    .await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_text(response).await, "User not found");
}

#[rstest]
#[case(Method::GET)]
#[case(Method::PUT)]
#[case(Method::DELETE)]
#[case(Method::PATCH)]
#[case(Method::POST)]
#[actix_web::test]
async fn non_numeric_id_is_bad_request_for_every_method(
    state: HttpState,
    #[case] method: Method,
) {
    let app = actix_test::init_service(test_app(state)).await;

    let response = send(&app, method, "/users/abc", None).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_text(response).await, "Invalid user ID");
}

#[rstest]
#[case("/users/")]
#[case("/users/1.5")]
#[case("/users/1/extra")]
#[case("/users/99999999999999999999")]
#[actix_web::test]
async fn malformed_id_segments_are_bad_request(state: HttpState, #[case] uri: &str) {
    let app = actix_test::init_service(test_app(state)).await;

    let response = send(&app, Method::GET, uri, None).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[rstest]
#[case(Method::PATCH, "/users")]
#[case(Method::PUT, "/users")]
#[case(Method::DELETE, "/users")]
#[case(Method::PATCH, "/users/1")]
#[case(Method::POST, "/users/1")]
#[actix_web::test]
async fn unsupported_methods_are_rejected(
    state: HttpState,
    #[case] method: Method,
    #[case] uri: &str,
) {
    let app = actix_test::init_service(test_app(state)).await;

    let response = send(&app, method, uri, None).await;

    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
    assert_eq!(body_text(response).await, "Method not allowed");
}

#[rstest]
#[actix_web::test]
async fn update_then_fetch_reflects_new_values(state: HttpState) {
    let app = actix_test::init_service(test_app(state)).await;
    let location = create(&app, "Ada", "ada@example.com").await;

    let response = send(
        &app,
        Method::PUT,
        &location,
        Some(r#"{"name":"Ada King","email":"countess@example.com"}"#),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);
    assert!(body_text(response).await.is_empty());

    let fetched = send(&app, Method::GET, &location, None).await;
    let body: Value = actix_test::read_body_json(fetched).await;
    assert_eq!(
        body,
        serde_json::json!({ "id": 1, "name": "Ada King", "email": "countess@example.com" })
    );
}

#[rstest]
#[case(r#"{"id":1,"name":"Ada King","email":"ada@example.com"}"#, StatusCode::NO_CONTENT)]
#[case(r#"{"id":2,"name":"Ada King","email":"ada@example.com"}"#, StatusCode::BAD_REQUEST)]
#[actix_web::test]
async fn body_id_must_match_path(
    state: HttpState,
    #[case] body: &str,
    #[case] expected: StatusCode,
) {
    let app = actix_test::init_service(test_app(state)).await;
    create(&app, "Ada", "ada@example.com").await;

    let response = send(&app, Method::PUT, "/users/1", Some(body)).await;

    assert_eq!(response.status(), expected);
}

#[rstest]
#[actix_web::test]
async fn delete_then_fetch_is_not_found(state: HttpState) {
    let app = actix_test::init_service(test_app(state)).await;
    let location = create(&app, "Ada", "ada@example.com").await;

    let deleted = send(&app, Method::DELETE, &location, None).await;
    assert_eq!(deleted.status(), StatusCode::NO_CONTENT);

    let fetched = send(&app, Method::GET, &location, None).await;
    assert_eq!(fetched.status(), StatusCode::NOT_FOUND);
}

#[rstest]
#[case("not json", "Invalid request payload: ")]
#[case(r#"{"name":"Ada"}"#, "Name and email are required")]
#[case(r#"{"email":"ada@example.com"}"#, "Name and email are required")]
#[case(r#"{"name":"  ","email":"ada@example.com"}"#, "Name and email are required")]
#[actix_web::test]
async fn invalid_create_bodies_are_rejected_without_mutation(
    state: HttpState,
    #[case] body: &str,
    #[case] message_prefix: &str,
) {
    let app = actix_test::init_service(test_app(state)).await;

    let response = send(&app, Method::POST, "/users", Some(body)).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let text = body_text(response).await;
    assert!(text.starts_with(message_prefix), "body: {text}");
    assert!(list(&app).await.is_empty());
}

#[rstest]
#[case("not json", "Invalid request payload")]
#[case(r#"{"name":"Ada King"}"#, "Name and email are required")]
#[actix_web::test]
async fn invalid_update_bodies_are_rejected_without_mutation(
    state: HttpState,
    #[case] body: &str,
    #[case] message: &str,
) {
    let app = actix_test::init_service(test_app(state)).await;
    let location = create(&app, "Ada", "ada@example.com").await;

    let response = send(&app, Method::PUT, &location, Some(body)).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_text(response).await, message);
    let users = list(&app).await;
    assert_eq!(users[0].name().as_str(), "Ada");
}

#[given("a service whose request budget is already spent")]
fn a_service_whose_request_budget_is_already_spent(state: HttpState) -> HttpState {
    state.with_request_timeout(Duration::ZERO)
}

#[then("the store call fails as an internal error")]
fn the_store_call_fails_as_an_internal_error(outcome: (StatusCode, String)) {
    let (status, body) = outcome;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, "Could not get users");
}

#[rstest]
#[actix_web::test]
async fn elapsed_deadline_surfaces_as_internal_error(state: HttpState) {
    let state = a_service_whose_request_budget_is_already_spent(state);
    let app = actix_test::init_service(test_app(state)).await;

    // When a client lists users
    let response = send(&app, Method::GET, "/users", None).await;
    let status = response.status();
    let body = body_text(response).await;

    the_store_call_fails_as_an_internal_error((status, body));
}
