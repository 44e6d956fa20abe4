//! OpenAPI documentation for the REST API.

use utoipa::OpenApi;

use crate::domain::user::{User, UserId, UserPayload};
use crate::domain::ErrorCode;
use crate::inbound::http::error::ErrorResponse;
use crate::inbound::http::users::{DeletedResponse, UserListResponse, UserResponse};

/// OpenAPI document aggregating every exposed endpoint.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "User Management API",
        description = "Minimal user CRUD over a whole-file JSON snapshot."
    ),
    servers((url = "/", description = "Relative to the deployment base URL")),
    paths(
        crate::inbound::http::index::service_index,
        crate::inbound::http::users::list_users,
        crate::inbound::http::users::get_user,
        crate::inbound::http::users::create_user,
        crate::inbound::http::users::update_user,
        crate::inbound::http::users::delete_user,
    ),
    components(schemas(
        User,
        UserId,
        UserPayload,
        ErrorCode,
        ErrorResponse,
        UserListResponse,
        UserResponse,
        DeletedResponse,
    ))
)]
pub struct ApiDoc;
