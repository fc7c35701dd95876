//! Diesel-backed `LoginService` adapter over the `users` table.
//!
//! Passwords are stored as hex-encoded SHA-256 digests.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use sha2::{Digest, Sha256};
use tracing::{debug, info};

use crate::domain::ports::LoginService;
use crate::domain::{Error, LoginCredentials, UserId};

use super::error_mapping::{StoreFailure, map_diesel_error, map_pool_error};
use super::models::{NewUserRow, UserRow};
use super::pool::DbPool;
use super::schema::users;

/// Login service checking credentials against stored accounts.
#[derive(Clone)]
pub struct DieselLoginService {
    pool: DbPool,
}

impl DieselLoginService {
    /// Create a new service with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// Create the account unless the username is already taken.
    ///
    /// Returns the id of the stored account, which is `id` only when the
    /// account was created by this call. Existing passwords are left as-is.
    pub async fn ensure_account(
        &self,
        credentials: &LoginCredentials,
        id: &UserId,
    ) -> Result<UserId, Error> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|err| map_store_failure(map_pool_error(err)))?;
        let digest = password_digest(credentials.password());

        let inserted = diesel::insert_into(users::table)
            .values(&NewUserRow {
                id: *id.as_uuid(),
                username: credentials.username(),
                password_digest: &digest,
            })
            .on_conflict(users::username)
            .do_nothing()
            .execute(&mut conn)
            .await
            .map_err(|err| map_store_failure(map_diesel_error(err)))?;

        let stored: uuid::Uuid = users::table
            .filter(users::username.eq(credentials.username()))
            .select(users::id)
            .first(&mut conn)
            .await
            .map_err(|err| map_store_failure(map_diesel_error(err)))?;

        if inserted > 0 {
            info!(username = credentials.username(), "account created");
        }
        Ok(UserId::from_uuid(stored))
    }
}

/// Hex-encoded SHA-256 digest of `password`.
pub(crate) fn password_digest(password: &str) -> String {
    hex::encode(Sha256::digest(password.as_bytes()))
}

fn map_store_failure(failure: StoreFailure) -> Error {
    match failure {
        StoreFailure::Connection(message) => Error::service_unavailable(message),
        StoreFailure::Query(message) => Error::internal(message),
        StoreFailure::UniqueViolation => Error::conflict("account already exists"),
    }
}

fn verify(row: Option<UserRow>, password: &str) -> Result<UserId, Error> {
    match row {
        Some(row) if row.password_digest == password_digest(password) => {
            Ok(UserId::from_uuid(row.id))
        }
        Some(_) => {
            debug!("password mismatch");
            Err(Error::unauthorized("invalid credentials"))
        }
        None => {
            debug!("unknown username");
            Err(Error::unauthorized("invalid credentials"))
        }
    }
}

#[async_trait]
impl LoginService for DieselLoginService {
    async fn authenticate(&self, credentials: &LoginCredentials) -> Result<UserId, Error> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|err| map_store_failure(map_pool_error(err)))?;

        let row: Option<UserRow> = users::table
            .filter(users::username.eq(credentials.username()))
            .select(UserRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(|err| map_store_failure(map_diesel_error(err)))?;

        verify(row, credentials.password())
    }
}
