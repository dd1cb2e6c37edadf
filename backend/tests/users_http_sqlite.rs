//! End-to-end HTTP tests running the users routes over a real SQLite file.

use std::sync::Arc;

use actix_web::dev::{Service, ServiceResponse};
use actix_web::http::{Method, StatusCode, header};
use actix_web::{App, test, web};
use rstest::rstest;
use serde_json::{Value, json};
use tempfile::TempDir;
use users_service::Trace;
use users_service::inbound::http::state::HttpState;
use users_service::inbound::http::users;
use users_service::outbound::persistence::{
    DbPool, PoolConfig, SqlxUserRepository, ensure_users_table,
};

async fn sqlite_state() -> (HttpState, TempDir) {
    let dir = tempfile::tempdir().expect("temporary directory");
    let url = format!("sqlite://{}", dir.path().join("users.sqlite").display());
    let pool = DbPool::new(PoolConfig::new(url)).await.expect("sqlite pool");
    ensure_users_table(&pool).await.expect("users table");
    let state = HttpState::from_repository(Arc::new(SqlxUserRepository::new(pool)));
    (state, dir)
}

async fn send(
    app: &impl Service<actix_http::Request, Response = ServiceResponse, Error = actix_web::Error>,
    method: Method,
    uri: &str,
    body: Option<Value>,
) -> ServiceResponse {
    let mut request = test::TestRequest::default().method(method).uri(uri);
    if let Some(body) = body {
        request = request.set_payload(body.to_string());
    }
    test::call_service(app, request.to_request()).await
}

#[rstest]
#[actix_web::test]
async fn full_lifecycle_over_sqlite() {
    let (state, _dir) = sqlite_state().await;
    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(state))
            .wrap(Trace)
            .configure(users::configure),
    )
    .await;

    let created = send(
        &app,
        Method::POST,
        "/users",
        Some(json!({ "name": "Ada", "email": "ada@example.com" })),
    )
    .await;
    assert_eq!(created.status(), StatusCode::CREATED);
    assert!(created.headers().contains_key("trace-id"));
    let location = created
        .headers()
        .get(header::LOCATION)
        .and_then(|value| value.to_str().ok())
        .expect("location header")
        .to_owned();

    let duplicate = send(
        &app,
        Method::POST,
        "/users",
        Some(json!({ "name": "Imposter", "email": "ada@example.com" })),
    )
    .await;
    assert_eq!(duplicate.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let text = String::from_utf8(test::read_body(duplicate).await.to_vec()).expect("utf-8");
    assert_eq!(text, "Could not create user: UNIQUE constraint failed: users.email");

    let updated = send(
        &app,
        Method::PUT,
        &location,
        Some(json!({ "name": "Ada King", "email": "countess@example.com" })),
    )
    .await;
    assert_eq!(updated.status(), StatusCode::NO_CONTENT);

    let fetched = send(&app, Method::GET, &location, None).await;
    assert_eq!(fetched.status(), StatusCode::OK);
    let body: Value = test::read_body_json(fetched).await;
    assert_eq!(
        body,
        json!({ "id": 1, "name": "Ada King", "email": "countess@example.com" })
    );

    let deleted = send(&app, Method::DELETE, &location, None).await;
    assert_eq!(deleted.status(), StatusCode::NO_CONTENT);

    let gone = send(&app, Method::GET, &location, None).await;
    assert_eq!(gone.status(), StatusCode::NOT_FOUND);

    let listed = send(&app, Method::GET, "/users", None).await;
    let body: Value = test::read_body_json(listed).await;
    assert_eq!(body, json!([]));
}

#[rstest]
#[actix_web::test]
async fn listing_tolerates_rows_with_blank_names() {
    let dir = tempfile::tempdir().expect("temporary directory");
    let url = format!("sqlite://{}", dir.path().join("users.sqlite").display());
    let pool = DbPool::new(PoolConfig::new(url)).await.expect("sqlite pool");
    ensure_users_table(&pool).await.expect("users table");
    sqlx::query("INSERT INTO users (name, email) VALUES ('Ada', 'ada@x'), ('', 'blank@x')")
        .execute(pool.inner())
        .await
        .expect("raw insert");
    let state = HttpState::from_repository(Arc::new(SqlxUserRepository::new(pool)));
    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(state))
            .configure(users::configure),
    )
    .await;

    let listed = send(&app, Method::GET, "/users", None).await;

    assert_eq!(listed.status(), StatusCode::OK);
    let body: Value = test::read_body_json(listed).await;
    assert_eq!(
        body,
        json!([
            { "id": 1, "name": "Ada", "email": "ada@x" },
            { "id": 2, "name": "", "email": "blank@x" }
        ])
    );
}
