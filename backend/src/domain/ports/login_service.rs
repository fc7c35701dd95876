//! Driving port for login.
//!
//! HTTP handlers authenticate through this port without knowing where
//! accounts live, so handler tests can substitute a deterministic double.

use async_trait::async_trait;

use crate::domain::{Error, LoginCredentials, UserId};

/// Identifier of the development account served by [`FixtureLoginService`].
pub const FIXTURE_USER_ID: &str = "123e4567-e89b-12d3-a456-426614174000";

/// Domain use-case port for authentication.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LoginService: Send + Sync {
    /// Validate credentials and return the authenticated user id.
    async fn authenticate(&self, credentials: &LoginCredentials) -> Result<UserId, Error>;
}

/// Single-account authenticator used when no database is configured.
///
/// `admin` / `password` authenticates as [`FIXTURE_USER_ID`].
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureLoginService;

#[async_trait]
impl LoginService for FixtureLoginService {
    async fn authenticate(&self, credentials: &LoginCredentials) -> Result<UserId, Error> {
        if credentials.username() == "admin" && credentials.password() == "password" {
            UserId::new(FIXTURE_USER_ID)
                .map_err(|err| Error::internal(format!("invalid fixture user id: {err}")))
        } else {
            Err(Error::unauthorized("invalid credentials"))
        }
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use crate::domain::ErrorCode;
    use rstest::rstest;

    #[rstest]
    #[case("admin", "password", true)]
    #[case("admin", "Password", false)]
    #[case("guest", "password", false)]
    #[tokio::test]
    async fn only_the_fixture_account_authenticates(
        #[case] username: &str,
        #[case] password: &str,
        #[case] should_succeed: bool,
    ) {
        let creds =
            LoginCredentials::try_from_parts(username, password).expect("credentials shape");
        match (should_succeed, FixtureLoginService.authenticate(&creds).await) {
            (true, Ok(id)) => assert_eq!(id.as_ref(), FIXTURE_USER_ID),
            (false, Err(err)) => assert_eq!(err.code(), ErrorCode::Unauthorized),
            (_, other) => panic!("unexpected login outcome: {other:?}"),
        }
    }
}
