//! Users API handlers.
//!
//! ```text
//! GET    /users
//! GET    /users/{id}
//! POST   /users       {"name":"Ada","age":36,"email":"ada@example.com"}
//! PUT    /users/{id}  {"age":37}
//! DELETE /users/{id}
//! ```
//!
//! Success bodies are JSON; failures are answered in plain text by the
//! `ResponseError` implementation in [`crate::inbound::http::error`].

use actix_web::{HttpRequest, HttpResponse, delete, error::JsonPayloadError, get, post, put, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{Age, Error, NO_USER_FOUND, NewUser, User, UserId, UserPatch};
use crate::inbound::http::ApiResult;
use crate::inbound::http::state::HttpState;

/// Request body for `POST /users` and `PUT /users/{id}`.
///
/// Every field is optional. Unknown fields are ignored. On update, absent
/// fields leave the stored value unchanged.
#[derive(Debug, Default, Clone, PartialEq, Deserialize, Serialize, ToSchema)]
pub struct UserRequest {
    #[schema(example = "Ada")]
    pub name: Option<String>,
    #[schema(value_type = Option<f64>, example = 36)]
    pub age: Option<Age>,
    #[schema(example = "ada@example.com")]
    pub email: Option<String>,
}

impl From<UserRequest> for NewUser {
    fn from(value: UserRequest) -> Self {
        Self {
            name: value.name,
            age: value.age,
            email: value.email,
        }
    }
}

impl From<UserRequest> for UserPatch {
    fn from(value: UserRequest) -> Self {
        Self {
            name: value.name,
            age: value.age,
            email: value.email,
        }
    }
}

/// Response payload for a stored user. Unset fields are omitted.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize, ToSchema)]
pub struct UserResponse {
    #[schema(example = "65a1f0c2b3d4e5f601234567")]
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<f64>)]
    pub age: Option<Age>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id().to_string(),
            name: user.name,
            age: user.age,
            email: user.email,
        }
    }
}

/// Register the user routes and the JSON body configuration.
///
/// # Examples
/// ```
/// use std::sync::Arc;
///
/// use actix_web::{App, web};
/// use users_api::inbound::http::state::HttpState;
/// use users_api::inbound::http::users;
/// use users_api::outbound::memory::InMemoryUserRepository;
///
/// let state = HttpState::from_repository(Arc::new(InMemoryUserRepository::new()));
/// let _app = App::new()
///     .app_data(web::Data::new(state))
///     .configure(users::configure);
/// ```
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(json_config())
        .service(list_users)
        .service(create_user)
        .service(get_user)
        .service(update_user)
        .service(delete_user);
}

fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(json_error_handler)
}

fn json_error_handler(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    Error::invalid_request(format!("Invalid request body: {err}")).into()
}

// Identifiers that fail validation cannot belong to any record.
fn parse_id(raw: String) -> Result<UserId, Error> {
    UserId::new(raw).map_err(|_| Error::not_found(NO_USER_FOUND))
}

/// List every stored user in insertion order.
#[utoipa::path(
    get,
    path = "/users",
    responses(
        (status = 200, description = "Users", body = [UserResponse]),
        (status = 404, description = "No users stored", body = String, content_type = "text/plain"),
        (status = 500, description = "Store failure", body = String, content_type = "text/plain")
    ),
    tags = ["users"],
    operation_id = "listUsers"
)]
#[get("/users")]
pub async fn list_users(state: web::Data<HttpState>) -> ApiResult<web::Json<Vec<UserResponse>>> {
    let users = state.users.list_users().await?;
    Ok(web::Json(users.into_iter().map(UserResponse::from).collect()))
}

/// Fetch a single user.
#[utoipa::path(
    get,
    path = "/users/{id}",
    params(("id" = String, Path, description = "User identifier")),
    responses(
        (status = 200, description = "User", body = UserResponse),
        (status = 404, description = "Unknown user", body = String, content_type = "text/plain"),
        (status = 500, description = "Store failure", body = String, content_type = "text/plain")
    ),
    tags = ["users"],
    operation_id = "getUser"
)]
#[get("/users/{id}")]
pub async fn get_user(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<UserResponse>> {
    let id = parse_id(path.into_inner())?;
    let user = state.users.fetch_user(&id).await?;
    Ok(web::Json(UserResponse::from(user)))
}

/// Create a user; the store assigns its identifier.
#[utoipa::path(
    post,
    path = "/users",
    request_body = UserRequest,
    responses(
        (status = 201, description = "Created user", body = UserResponse),
        (status = 400, description = "Unparseable body", body = String, content_type = "text/plain"),
        (status = 500, description = "Store failure", body = String, content_type = "text/plain")
    ),
    tags = ["users"],
    operation_id = "createUser"
)]
#[post("/users")]
pub async fn create_user(
    state: web::Data<HttpState>,
    payload: web::Json<UserRequest>,
) -> ApiResult<HttpResponse> {
    let user = state
        .users_command
        .create_user(NewUser::from(payload.into_inner()))
        .await?;
    Ok(HttpResponse::Created().json(UserResponse::from(user)))
}

/// Merge the supplied fields into a stored user.
#[utoipa::path(
    put,
    path = "/users/{id}",
    params(("id" = String, Path, description = "User identifier")),
    request_body = UserRequest,
    responses(
        (status = 200, description = "Updated user", body = UserResponse),
        (status = 400, description = "Unparseable body", body = String, content_type = "text/plain"),
        (status = 404, description = "Unknown user", body = String, content_type = "text/plain"),
        (status = 500, description = "Store failure", body = String, content_type = "text/plain")
    ),
    tags = ["users"],
    operation_id = "updateUser"
)]
#[put("/users/{id}")]
pub async fn update_user(
    state: web::Data<HttpState>,
    path: web::Path<String>,
    payload: web::Json<UserRequest>,
) -> ApiResult<web::Json<UserResponse>> {
    let id = parse_id(path.into_inner())?;
    let user = state
        .users_command
        .update_user(&id, UserPatch::from(payload.into_inner()))
        .await?;
    Ok(web::Json(UserResponse::from(user)))
}

/// Remove a user, answering with the record as it was before removal.
#[utoipa::path(
    delete,
    path = "/users/{id}",
    params(("id" = String, Path, description = "User identifier")),
    responses(
        (status = 200, description = "Removed user", body = UserResponse),
        (status = 404, description = "Unknown user", body = String, content_type = "text/plain"),
        (status = 500, description = "Store failure", body = String, content_type = "text/plain")
    ),
    tags = ["users"],
    operation_id = "deleteUser"
)]
#[delete("/users/{id}")]
pub async fn delete_user(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<UserResponse>> {
    let id = parse_id(path.into_inner())?;
    let user = state.users_command.delete_user(&id).await?;
    Ok(web::Json(UserResponse::from(user)))
}
