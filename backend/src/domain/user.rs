//! User identity as seen by this service.
//!
//! Accounts are owned by the authentication collaborator; shopping lists only
//! ever hold the stable [`UserId`].

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Validation errors returned by [`UserId::new`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserValidationError {
    EmptyId,
    InvalidId,
}

impl fmt::Display for UserValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyId => write!(f, "user id must not be empty"),
            Self::InvalidId => write!(f, "user id must be a valid UUID"),
        }
    }
}

impl std::error::Error for UserValidationError {}

/// Stable user identifier stored as a UUID.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct UserId(Uuid, String);

impl UserId {
    /// Validate and construct a [`UserId`] from borrowed input.
    pub fn new(id: impl AsRef<str>) -> Result<Self, UserValidationError> {
        Self::from_owned(id.as_ref().to_owned())
    }

    /// Wrap an already-parsed UUID, typically read back from storage.
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid, uuid.to_string())
    }

    /// Generate a new random [`UserId`].
    pub fn random() -> Self {
        Self::from_uuid(Uuid::new_v4())
    }

    fn from_owned(id: String) -> Result<Self, UserValidationError> {
        if id.is_empty() {
            return Err(UserValidationError::EmptyId);
        }
        if id.trim() != id {
            return Err(UserValidationError::InvalidId);
        }

        let parsed = Uuid::parse_str(&id).map_err(|_| UserValidationError::InvalidId)?;
        Ok(Self(parsed, id))
    }

    /// Access the underlying UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl AsRef<str> for UserId {
    fn as_ref(&self) -> &str {
        self.1.as_str()
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

impl From<UserId> for String {
    fn from(value: UserId) -> Self {
        let UserId(_, raw) = value;
        raw
    }
}

impl TryFrom<String> for UserId {
    type Error = UserValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::from_owned(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("", UserValidationError::EmptyId)]
    #[case("not-a-uuid", UserValidationError::InvalidId)]
    #[case(" 3fa85f64-5717-4562-b3fc-2c963f66afa6", UserValidationError::InvalidId)]
    fn rejects_invalid_ids(#[case] raw: &str, #[case] expected: UserValidationError) {
        assert_eq!(UserId::new(raw), Err(expected));
    }

    #[rstest]
    fn serde_uses_plain_string() {
        let id = UserId::new("3fa85f64-5717-4562-b3fc-2c963f66afa6").expect("valid id");
        let json = serde_json::to_string(&id).expect("serialise id");
        assert_eq!(json, "\"3fa85f64-5717-4562-b3fc-2c963f66afa6\"");
        let decoded: UserId = serde_json::from_str(&json).expect("deserialise id");
        assert_eq!(decoded, id);
    }

    #[rstest]
    fn from_uuid_matches_parsed_form() {
        let uuid = Uuid::new_v4();
        let id = UserId::from_uuid(uuid);
        assert_eq!(UserId::new(uuid.to_string()), Ok(id));
    }
}
