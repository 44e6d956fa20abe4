//! Environment-driven server configuration.

use std::env;
use std::net::{Ipv4Addr, SocketAddr};
use std::path::PathBuf;

/// Listen port used when `PORT` is unset or unparseable.
pub const DEFAULT_PORT: u16 = 3000;

/// Snapshot path used when `USERS_FILE` is unset.
pub const DEFAULT_USERS_FILE: &str = "users.json";

/// Startup configuration for the HTTP server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    /// Address the server binds to (all interfaces).
    pub bind_addr: SocketAddr,
    /// Location of the JSON user snapshot.
    pub users_file: PathBuf,
}

impl ServerConfig {
    /// Read configuration from `PORT` and `USERS_FILE`, falling back to
    /// defaults.
    pub fn from_env() -> Self {
        Self::from_vars(
            env::var("PORT").ok().as_deref(),
            env::var("USERS_FILE").ok().as_deref(),
        )
    }

    fn from_vars(port: Option<&str>, users_file: Option<&str>) -> Self {
        let port = port
            .and_then(|raw| raw.parse().ok())
            .unwrap_or(DEFAULT_PORT);
        let users_file = users_file.map_or_else(|| PathBuf::from(DEFAULT_USERS_FILE), PathBuf::from);
        Self {
            bind_addr: SocketAddr::from((Ipv4Addr::UNSPECIFIED, port)),
            users_file,
        }
    }
}
