//! HTTP server configuration object.

use std::net::SocketAddr;

use actix_web::cookie::{Key, SameSite};

use super::ServerSettings;
use super::settings::SettingsError;

/// Resolved configuration for creating the HTTP server.
pub struct ServerConfig {
    pub(crate) key: Key,
    pub(crate) cookie_secure: bool,
    pub(crate) same_site: SameSite,
    pub(crate) bind_addr: SocketAddr,
}

impl ServerConfig {
    #[must_use]
    pub fn new(key: Key, cookie_secure: bool, same_site: SameSite, bind_addr: SocketAddr) -> Self {
        Self {
            key,
            cookie_secure,
            same_site,
            bind_addr,
        }
    }

    /// Resolve session and binding values from loaded settings.
    pub fn from_settings(settings: &ServerSettings) -> Result<Self, SettingsError> {
        Ok(Self::new(
            settings.session_key()?,
            settings.cookie_secure(),
            settings.same_site()?,
            settings.bind_addr()?,
        ))
    }
}
