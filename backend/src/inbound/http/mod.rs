//! HTTP inbound adapter exposing the REST endpoints.

pub mod error;
pub mod index;
pub mod users;

pub use error::{ApiError, ApiResult};
