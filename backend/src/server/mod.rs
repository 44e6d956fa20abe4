//! HTTP server assembly shared by `main` and the test suites.

pub mod config;

pub use config::ServerConfig;

use actix_web::web;

use crate::inbound::http::{error, index, users};

/// Register every route and extractor setting on an actix app.
///
/// `main` and the tests pass this to `App::configure` so integration tests
/// exercise the exact production routing table. The caller supplies the
/// [`UserStore`](crate::domain::UserStore) via `app_data`.
pub fn routes(cfg: &mut web::ServiceConfig) {
    cfg.app_data(error::json_config())
        .service(index::service_index)
        .service(
            web::scope("/api")
                .service(users::list_users)
                .service(users::get_user)
                .service(users::create_user)
                .service(users::update_user)
                .service(users::delete_user),
        )
        .default_service(web::route().to(error::endpoint_not_found));
}
