//! Server settings loaded via OrthoConfig.

use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use actix_web::cookie::{Key, SameSite};
use ortho_config::OrthoConfig;
use serde::Deserialize;
use thiserror::Error;
use tracing::warn;
use zeroize::Zeroize;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
const SESSION_KEY_DEFAULT_PATH: &str = "/var/run/secrets/session_key";
const SESSION_KEY_MIN_LEN: usize = 64;

/// Errors raised while resolving server settings.
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("invalid bind address '{value}': {source}")]
    BindAddr {
        value: String,
        #[source]
        source: std::net::AddrParseError,
    },
    #[error("invalid SameSite policy '{0}'; expected Strict|Lax|None")]
    SameSite(String),
    #[error("failed to read session key at {path}: {source}")]
    KeyRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("session key at {path} too short: need >= {min_len} bytes, got {length}")]
    KeyTooShort {
        path: PathBuf,
        length: usize,
        min_len: usize,
    },
}

/// Configuration values for the HTTP server.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "PANTRY")]
pub struct ServerSettings {
    /// Socket address to listen on, e.g. `127.0.0.1:8080`.
    pub bind_addr: Option<String>,
    /// PostgreSQL URL; in-memory stores are used when absent.
    pub database_url: Option<String>,
    /// Maximum pooled database connections.
    pub pool_max_size: Option<u32>,
    /// File holding the session signing key.
    pub session_key_file: Option<PathBuf>,
    /// Fall back to a generated session key when the key file is unreadable.
    #[ortho_config(default = false)]
    pub allow_ephemeral_session_key: bool,
    /// Mark the session cookie `Secure`; defaults to `true`.
    pub cookie_secure: Option<bool>,
    /// `SameSite` policy for the session cookie; defaults to `Lax`.
    pub same_site: Option<String>,
}

impl ServerSettings {
    pub fn bind_addr(&self) -> Result<SocketAddr, SettingsError> {
        let value = self.bind_addr.as_deref().unwrap_or(DEFAULT_BIND_ADDR);
        value.parse().map_err(|source| SettingsError::BindAddr {
            value: value.to_owned(),
            source,
        })
    }

    /// Database URL with blank values treated as unset.
    pub fn database_url(&self) -> Option<&str> {
        self.database_url
            .as_deref()
            .map(str::trim)
            .filter(|url| !url.is_empty())
    }

    pub fn cookie_secure(&self) -> bool {
        self.cookie_secure.unwrap_or(true)
    }

    pub fn same_site(&self) -> Result<SameSite, SettingsError> {
        match self.same_site.as_deref().map(str::trim) {
            None => Ok(SameSite::Lax),
            Some(value) if value.eq_ignore_ascii_case("strict") => Ok(SameSite::Strict),
            Some(value) if value.eq_ignore_ascii_case("lax") => Ok(SameSite::Lax),
            Some(value) if value.eq_ignore_ascii_case("none") => Ok(SameSite::None),
            Some(other) => Err(SettingsError::SameSite(other.to_owned())),
        }
    }

    fn session_key_path(&self) -> PathBuf {
        self.session_key_file
            .clone()
            .unwrap_or_else(|| PathBuf::from(SESSION_KEY_DEFAULT_PATH))
    }

    /// Load the session signing key.
    ///
    /// Debug builds, or an explicit `allow_ephemeral_session_key`, fall back
    /// to a generated key when the file cannot be read. Generated keys do not
    /// survive restarts, so every session is invalidated.
    pub fn session_key(&self) -> Result<Key, SettingsError> {
        let path = self.session_key_path();
        match read_key(&path) {
            Ok(key) => Ok(key),
            Err(err) if cfg!(debug_assertions) || self.allow_ephemeral_session_key => {
                warn!(path = %path.display(), error = %err, "using temporary session key (dev only)");
                Ok(Key::generate())
            }
            Err(err) => Err(err),
        }
    }
}

fn read_key(path: &Path) -> Result<Key, SettingsError> {
    let mut bytes = std::fs::read(path).map_err(|source| SettingsError::KeyRead {
        path: path.to_path_buf(),
        source,
    })?;
    let length = bytes.len();
    let key = if length < SESSION_KEY_MIN_LEN {
        Err(SettingsError::KeyTooShort {
            path: path.to_path_buf(),
            length,
            min_len: SESSION_KEY_MIN_LEN,
        })
    } else {
        Ok(Key::derive_from(&bytes))
    };
    bytes.zeroize();
    key
}
