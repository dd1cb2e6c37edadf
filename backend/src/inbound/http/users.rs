//! Users API handlers.
//!
//! ```text
//! GET    /users       list every user
//! POST   /users       {"name":"Ada","email":"ada@example.com"}
//! GET    /users/{id}  fetch one user
//! PUT    /users/{id}  {"name":"Ada","email":"ada@example.com"}
//! DELETE /users/{id}  remove one user
//! ```
//!
//! Routes are registered as resources rather than attribute macros so any
//! other method on these paths answers 405. The id segment is parsed before
//! the method is considered, so `PATCH /users/abc` is a 400.

use actix_web::http::header;
use actix_web::{HttpRequest, HttpResponse, web};
use serde::Deserialize;
use serde_json::json;

use crate::domain::{Error, RequestDeadline, User, UserDraft, UserId};
use crate::inbound::http::ApiResult;
use crate::inbound::http::state::HttpState;

const INVALID_USER_ID: &str = "Invalid user ID";
const INVALID_PAYLOAD: &str = "Invalid request payload";
const FIELDS_REQUIRED: &str = "Name and email are required";
const ID_MISMATCH: &str = "User ID in body does not match path";
const METHOD_NOT_ALLOWED: &str = "Method not allowed";

/// Request body accepted by create and update.
///
/// Missing fields decode as empty and are rejected by validation, so a body
/// of `{}` reports the missing fields rather than a decode failure.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct UserPayload {
    /// Ignored on create; must match the path on update when present.
    pub id: Option<i64>,
    pub name: String,
    pub email: String,
}

impl UserPayload {
    fn into_draft(self) -> Result<UserDraft, Error> {
        UserDraft::try_from_strings(self.name, self.email)
            .map_err(|_| Error::invalid_request(FIELDS_REQUIRED))
    }
}

/// Register the `/users` resources on an app or scope.
///
/// # Examples
/// ```
/// use actix_web::App;
/// use users_service::inbound::http::users;
///
/// let _app = App::new().configure(users::configure);
/// ```
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/users")
            .route(web::get().to(list_users))
            .route(web::post().to(create_user))
            .default_service(web::to(collection_method_not_allowed)),
    )
    .service(
        web::resource("/users/{id:.*}")
            .route(web::get().to(get_user))
            .route(web::put().to(update_user))
            .route(web::delete().to(delete_user))
            .default_service(web::to(member_method_not_allowed)),
    );
}

fn parse_user_id(raw: &str) -> Result<UserId, Error> {
    raw.parse().map_err(|_| Error::invalid_request(INVALID_USER_ID))
}

fn path_user_id(req: &HttpRequest) -> Result<UserId, Error> {
    parse_user_id(req.match_info().get("id").unwrap_or_default())
}

/// List every stored user ordered by id.
pub async fn list_users(
    deadline: RequestDeadline,
    state: web::Data<HttpState>,
) -> ApiResult<web::Json<Vec<User>>> {
    let users = state.users_query.list_users(&deadline).await?;
    Ok(web::Json(users))
}

/// Create a user and point at it via `Location`.
pub async fn create_user(
    deadline: RequestDeadline,
    state: web::Data<HttpState>,
    body: web::Bytes,
) -> ApiResult<HttpResponse> {
    let payload: UserPayload = serde_json::from_slice(&body)
        .map_err(|err| Error::invalid_request(format!("{INVALID_PAYLOAD}: {err}")))?;
    let draft = payload.into_draft()?;
    let user = state.users_command.create_user(draft, &deadline).await?;
    Ok(HttpResponse::Created()
        .insert_header((header::LOCATION, format!("/users/{}", user.id())))
        .json(json!({ "message": "User created successfully" })))
}

/// Fetch a single user.
pub async fn get_user(
    deadline: RequestDeadline,
    state: web::Data<HttpState>,
    req: HttpRequest,
) -> ApiResult<web::Json<User>> {
    let id = path_user_id(&req)?;
    let user = state.users_query.get_user(id, &deadline).await?;
    Ok(web::Json(user))
}

/// Replace the name and email of an existing user.
pub async fn update_user(
    deadline: RequestDeadline,
    state: web::Data<HttpState>,
    req: HttpRequest,
    body: web::Bytes,
) -> ApiResult<HttpResponse> {
    let id = path_user_id(&req)?;
    let payload: UserPayload =
        serde_json::from_slice(&body).map_err(|_| Error::invalid_request(INVALID_PAYLOAD))?;
    if payload.id.is_some_and(|body_id| body_id != id.get()) {
        return Err(Error::invalid_request(ID_MISMATCH));
    }
    let user = payload.into_draft()?.with_id(id);
    state.users_command.update_user(user, &deadline).await?;
    Ok(HttpResponse::NoContent().finish())
}

/// Remove a user.
pub async fn delete_user(
    deadline: RequestDeadline,
    state: web::Data<HttpState>,
    req: HttpRequest,
) -> ApiResult<HttpResponse> {
    let id = path_user_id(&req)?;
    state.users_command.delete_user(id, &deadline).await?;
    Ok(HttpResponse::NoContent().finish())
}

async fn collection_method_not_allowed() -> ApiResult<HttpResponse> {
    Err(Error::method_not_allowed(METHOD_NOT_ALLOWED))
}

async fn member_method_not_allowed(req: HttpRequest) -> ApiResult<HttpResponse> {
    path_user_id(&req)?;
    Err(Error::method_not_allowed(METHOD_NOT_ALLOWED))
}

#[cfg(test)]
mod tests;
