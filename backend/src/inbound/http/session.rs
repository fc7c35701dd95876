//! Session access for HTTP handlers.
//!
//! Wraps the Actix cookie session so handlers only deal with the
//! authenticated [`UserId`].

use actix_session::Session;
use actix_web::{FromRequest, HttpRequest, dev::Payload};
use futures_util::future::LocalBoxFuture;
use tracing::warn;

use crate::domain::{Error, UserId};

pub(crate) const USER_ID_KEY: &str = "user_id";

/// Handler extractor exposing the signed-in user.
#[derive(Clone)]
pub struct SessionContext(Session);

impl SessionContext {
    pub fn new(session: Session) -> Self {
        Self(session)
    }

    /// Store the authenticated user's id, rotating the session key.
    pub fn persist_user(&self, user_id: &UserId) -> Result<(), Error> {
        self.0.renew();
        self.0
            .insert(USER_ID_KEY, user_id.as_ref())
            .map_err(|error| Error::internal(format!("failed to persist session: {error}")))
    }

    /// The user id held by the session, if any.
    ///
    /// A value that no longer parses is treated as an anonymous session.
    pub fn user_id(&self) -> Result<Option<UserId>, Error> {
        let raw = self
            .0
            .get::<String>(USER_ID_KEY)
            .map_err(|error| Error::internal(format!("failed to read session: {error}")))?;
        Ok(raw.and_then(|raw| {
            UserId::new(raw)
                .inspect_err(|error| warn!(%error, "ignoring invalid user id in session"))
                .ok()
        }))
    }

    /// Require a signed-in user, failing with `401 Unauthorized`.
    pub fn require_user_id(&self) -> Result<UserId, Error> {
        self.user_id()?
            .ok_or_else(|| Error::unauthorized("login required"))
    }
}

impl FromRequest for SessionContext {
    type Error = actix_web::Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        let fut = Session::from_request(req, payload);
        Box::pin(async move { fut.await.map(SessionContext::new) })
    }
}
