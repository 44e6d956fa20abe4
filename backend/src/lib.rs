//! User-management REST service backed by a whole-file JSON snapshot.
//!
//! Layout follows a hexagonal split: [`domain`] holds the user records,
//! the snapshot store, and the validation rules; [`outbound`] the
//! persistence adapters; [`inbound`] the REST handlers; and [`server`]
//! the app assembly shared by `main` and the test suites.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod outbound;
pub mod server;

/// Public OpenAPI surface used by tooling.
pub use doc::ApiDoc;
