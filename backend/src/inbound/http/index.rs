//! Service index served at the root path.

use actix_web::{get, web};
use serde_json::{Value, json};

/// Human-oriented index of the exposed endpoints.
#[utoipa::path(
    get,
    path = "/",
    responses((status = 200, description = "Service index")),
    tags = ["meta"],
    operation_id = "serviceIndex"
)]
#[get("/")]
pub async fn service_index() -> web::Json<Value> {
    web::Json(json!({
        "message": "User Management API",
        "version": env!("CARGO_PKG_VERSION"),
        "endpoints": {
            "GET /api/users": "Get all users",
            "GET /api/users/:id": "Get a specific user by ID",
            "POST /api/users": "Create a new user",
            "PUT /api/users/:id": "Update a user by ID",
            "DELETE /api/users/:id": "Delete a user by ID"
        }
    }))
}
