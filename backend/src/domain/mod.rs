//! Domain layer: user records, the snapshot store, and validation rules.
//!
//! These types are transport agnostic. The inbound HTTP adapter maps them
//! onto status codes and response envelopes; outbound adapters implement
//! the [`ports::StoreBackend`] port.

pub mod error;
pub mod ports;
pub mod store;
pub mod user;
pub mod validation;

pub use self::error::{DomainError, ErrorCode};
pub use self::ports::{StoreBackend, StoreError};
pub use self::store::UserStore;
pub use self::user::{NewUser, User, UserId, UserPatch, UserPayload};
pub use self::validation::{
    ValidationError, ValidationErrors, validate_creation, validate_update,
};
