use axum::{
    async_trait,
    extract::{FromRef, FromRequestParts},
    http::request::Parts,
};
use axum_extra::extract::CookieJar;
use tracing::warn;

use crate::error::ApiError;

use super::session::{SessionError, SessionKeys, SESSION_COOKIE};

/// Subject (normalized email) of a verified session cookie. Putting this in
/// a handler's signature is what makes the route protected.
pub struct SessionUser(pub String);

#[async_trait]
impl<S> FromRequestParts<S> for SessionUser
where
    S: Send + Sync,
    SessionKeys: FromRef<S>,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let keys = SessionKeys::from_ref(state);
        let jar = CookieJar::from_headers(&parts.headers);
        let cookie = jar
            .get(SESSION_COOKIE)
            .ok_or(ApiError::Session(SessionError::Missing))?;

        let subject = keys.verify(cookie.value()).map_err(|_| {
            warn!("invalid or expired session cookie");
            ApiError::Session(SessionError::Invalid)
        })?;

        Ok(SessionUser(subject))
    }
}
