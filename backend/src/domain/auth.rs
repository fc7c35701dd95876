//! Sign-in credentials for the session login.
//!
//! Usernames share the `users.username` column bound; passwords are held in
//! zeroizing storage and compared only by the login adapters.

use zeroize::Zeroizing;

/// Longest username an account can carry.
pub const USERNAME_MAX_CHARS: usize = 150;

/// Why a login payload could not become [`LoginCredentials`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LoginValidationError {
    #[error("username must not be empty")]
    EmptyUsername,
    #[error("username must be at most {max} characters")]
    UsernameTooLong { max: usize },
    #[error("password must not be empty")]
    EmptyPassword,
}

impl LoginValidationError {
    /// Field the failure belongs to, as named in the request body.
    pub fn field(&self) -> &'static str {
        match self {
            Self::EmptyUsername | Self::UsernameTooLong { .. } => "username",
            Self::EmptyPassword => "password",
        }
    }
}

/// Username and password offered at `POST /login/`.
///
/// The username is trimmed before the checks; the password is kept verbatim,
/// surrounding spaces included.
///
/// # Examples
/// ```
/// use pantry::domain::{LoginCredentials, LoginValidationError};
///
/// let creds = LoginCredentials::try_from_parts("  admin\n", "password").unwrap();
/// assert_eq!(creds.username(), "admin");
///
/// let blank = LoginCredentials::try_from_parts("admin", "");
/// assert_eq!(blank, Err(LoginValidationError::EmptyPassword));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginCredentials {
    username: String,
    password: Zeroizing<String>,
}

impl LoginCredentials {
    pub fn try_from_parts(username: &str, password: &str) -> Result<Self, LoginValidationError> {
        let username = match username.trim() {
            "" => return Err(LoginValidationError::EmptyUsername),
            name if name.chars().count() > USERNAME_MAX_CHARS => {
                return Err(LoginValidationError::UsernameTooLong {
                    max: USERNAME_MAX_CHARS,
                });
            }
            name => name.to_owned(),
        };
        if password.is_empty() {
            return Err(LoginValidationError::EmptyPassword);
        }
        Ok(Self {
            username,
            password: Zeroizing::new(password.to_owned()),
        })
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    /// Raw password; never log it.
    pub fn password(&self) -> &str {
        &self.password
    }
}
