//! Users API handlers.
//!
//! ```text
//! GET    /api/users        list every user
//! GET    /api/users/{id}   fetch one user
//! POST   /api/users        create a user
//! PUT    /api/users/{id}   update a user
//! DELETE /api/users/{id}   delete a user
//! ```

use actix_web::{HttpResponse, delete, get, post, put, web};
use serde::{Deserialize, Serialize};
use tracing::error;
use utoipa::ToSchema;

use crate::domain::{
    DomainError, User, UserId, UserPayload, UserStore, ValidationErrors, validate_creation,
    validate_update,
};
use crate::inbound::http::ApiResult;
use crate::inbound::http::error::ErrorResponse;

/// Collection listing for `GET /api/users`.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct UserListResponse {
    pub success: bool,
    pub count: usize,
    pub data: Vec<User>,
}

/// Single-record envelope shared by read, create, and update responses.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct UserResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub data: User,
}

/// Confirmation envelope for `DELETE /api/users/{id}`.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct DeletedResponse {
    pub success: bool,
    pub message: String,
}

/// List every user as currently persisted.
///
/// An empty collection is also returned when the snapshot is unreadable;
/// the store logs a warning in that case.
#[utoipa::path(
    get,
    path = "/api/users",
    responses(
        (status = 200, description = "All users", body = UserListResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tags = ["users"],
    operation_id = "listUsers"
)]
#[get("/users")]
pub async fn list_users(store: web::Data<UserStore>) -> ApiResult<web::Json<UserListResponse>> {
    let data = store.list_all();
    Ok(web::Json(UserListResponse {
        success: true,
        count: data.len(),
        data,
    }))
}

/// Fetch one user by id.
#[utoipa::path(
    get,
    path = "/api/users/{id}",
    params(("id" = String, Path, description = "Numeric user id")),
    responses(
        (status = 200, description = "The user", body = UserResponse),
        (status = 400, description = "Invalid user ID", body = ErrorResponse),
        (status = 404, description = "User not found", body = ErrorResponse)
    ),
    tags = ["users"],
    operation_id = "getUser"
)]
#[get("/users/{id}")]
pub async fn get_user(
    store: web::Data<UserStore>,
    path: web::Path<String>,
) -> ApiResult<web::Json<UserResponse>> {
    let id = parse_user_id(&path)?;
    let user = store
        .find_by_id(id)
        .ok_or_else(|| DomainError::not_found("User not found"))?;
    Ok(web::Json(UserResponse {
        success: true,
        message: None,
        data: user,
    }))
}

/// Create a user from loosely typed fields.
///
/// Validation collects every rule failure before rejecting, so a single
/// response itemizes all problems with the payload.
#[utoipa::path(
    post,
    path = "/api/users",
    request_body = UserPayload,
    responses(
        (status = 201, description = "User created", body = UserResponse),
        (status = 400, description = "Validation failed", body = ErrorResponse),
        (status = 500, description = "Persistence failure", body = ErrorResponse)
    ),
    tags = ["users"],
    operation_id = "createUser"
)]
#[post("/users")]
pub async fn create_user(
    store: web::Data<UserStore>,
    payload: web::Json<UserPayload>,
) -> ApiResult<HttpResponse> {
    let fields =
        validate_creation(&store, &payload).map_err(|errors| validation_failed(&errors))?;
    let user = store.insert(fields).map_err(|err| {
        error!(error = %err, "user insert failed");
        DomainError::internal("Failed to create user")
    })?;
    Ok(HttpResponse::Created().json(UserResponse {
        success: true,
        message: Some("User created successfully".to_owned()),
        data: user,
    }))
}

/// Update a user by id, merging only the supplied fields.
#[utoipa::path(
    put,
    path = "/api/users/{id}",
    params(("id" = String, Path, description = "Numeric user id")),
    request_body = UserPayload,
    responses(
        (status = 200, description = "User updated", body = UserResponse),
        (status = 400, description = "Invalid user ID or validation failed", body = ErrorResponse),
        (status = 404, description = "User not found", body = ErrorResponse),
        (status = 500, description = "Persistence failure", body = ErrorResponse)
    ),
    tags = ["users"],
    operation_id = "updateUser"
)]
#[put("/users/{id}")]
pub async fn update_user(
    store: web::Data<UserStore>,
    path: web::Path<String>,
    payload: web::Json<UserPayload>,
) -> ApiResult<HttpResponse> {
    let id = parse_user_id(&path)?;
    let patch = validate_update(&store, id, &payload).map_err(|errors| {
        if errors.is_not_found() {
            DomainError::not_found("User not found")
        } else {
            validation_failed(&errors)
        }
    })?;
    let user = store
        .replace(id, patch)
        .map_err(|err| {
            error!(error = %err, "user update failed");
            DomainError::internal("Error updating user")
        })?
        // The record can vanish between validation and the write cycle.
        .ok_or_else(|| DomainError::not_found("User not found or update failed"))?;
    Ok(HttpResponse::Ok().json(UserResponse {
        success: true,
        message: Some("User updated successfully".to_owned()),
        data: user,
    }))
}

/// Delete a user by id.
#[utoipa::path(
    delete,
    path = "/api/users/{id}",
    params(("id" = String, Path, description = "Numeric user id")),
    responses(
        (status = 200, description = "User deleted", body = DeletedResponse),
        (status = 400, description = "Invalid user ID", body = ErrorResponse),
        (status = 404, description = "User not found", body = ErrorResponse),
        (status = 500, description = "Persistence failure", body = ErrorResponse)
    ),
    tags = ["users"],
    operation_id = "deleteUser"
)]
#[delete("/users/{id}")]
pub async fn delete_user(
    store: web::Data<UserStore>,
    path: web::Path<String>,
) -> ApiResult<web::Json<DeletedResponse>> {
    let id = parse_user_id(&path)?;
    let removed = store.remove(id).map_err(|err| {
        error!(error = %err, "user delete failed");
        DomainError::internal("Error deleting user")
    })?;
    if !removed {
        return Err(DomainError::not_found("User not found").into());
    }
    Ok(web::Json(DeletedResponse {
        success: true,
        message: "User deleted successfully".to_owned(),
    }))
}

fn parse_user_id(raw: &str) -> Result<UserId, DomainError> {
    raw.parse()
        .map_err(|_| DomainError::invalid_request("Invalid user ID"))
}

fn validation_failed(errors: &ValidationErrors) -> DomainError {
    DomainError::invalid_request("Validation failed").with_errors(errors.messages())
}
