//! Service entry-point: wires configuration, tracing, the JSON snapshot
//! store, and the REST endpoints.

use std::sync::Arc;

use actix_web::{App, HttpServer, web};
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use backend::domain::UserStore;
use backend::outbound::persistence::JsonFileStore;
use backend::server::{self, ServerConfig};

/// Application bootstrap.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let config = ServerConfig::from_env();
    let snapshot = JsonFileStore::new(config.users_file.clone());
    let store = web::Data::new(UserStore::new(Arc::new(snapshot)));

    info!(
        addr = %config.bind_addr,
        snapshot = %config.users_file.display(),
        "user service starting"
    );

    HttpServer::new(move || App::new().app_data(store.clone()).configure(server::routes))
        .bind(config.bind_addr)?
        .run()
        .await
}
