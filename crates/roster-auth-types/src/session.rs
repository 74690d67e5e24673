//! Session-cookie extractors.

use std::sync::Arc;

use axum::extract::{FromRef, FromRequestParts};
use axum_extra::extract::cookie::CookieJar;
use http::HeaderMap;
use http::request::Parts;
use roster_core::error::AppError;
use roster_domain::id::{AdminId, UserId};

use crate::cookie::session_cookie_name;
use crate::token::{Principal, SessionInfo, validate_session_token};

/// HMAC secret used to sign and verify session tokens.
///
/// Services expose it from their state through [`FromRef`].
#[derive(Clone)]
pub struct SessionSecret(Arc<str>);

impl SessionSecret {
    pub fn new(secret: impl Into<Arc<str>>) -> Self {
        Self(secret.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Debug for SessionSecret {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("SessionSecret(..)")
    }
}

/// Resolve the session cookie for `principal`.
///
/// 401 when the cookie is missing or the token does not validate, 403 when the
/// token was issued for the other principal.
fn authenticate(
    headers: &HeaderMap,
    secret: &SessionSecret,
    principal: Principal,
) -> Result<SessionInfo, AppError> {
    let jar = CookieJar::from_headers(headers);
    let token = jar
        .get(session_cookie_name(principal))
        .map(|c| c.value().to_owned())
        .filter(|v| !v.is_empty())
        .ok_or(AppError::Unauthorized)?;

    let info = validate_session_token(&token, secret.as_str()).map_err(|e| {
        tracing::debug!(error = %e, "rejected session token");
        AppError::Unauthorized
    })?;

    if info.principal != principal {
        return Err(AppError::Forbidden);
    }
    Ok(info)
}

/// Signed-in user, taken from the user session cookie.
#[derive(Debug, Clone)]
pub struct UserSession {
    pub user_id: UserId,
    pub expires_at: u64,
}

/// Signed-in admin, taken from the admin session cookie.
#[derive(Debug, Clone)]
pub struct AdminSession {
    pub admin_id: AdminId,
    pub expires_at: u64,
}

impl<S> FromRequestParts<S> for UserSession
where
    SessionSecret: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = AppError;

    // Extract synchronously and return a 'static future; `async fn` here trips
    // E0195 against axum-core's `impl Future + Send` signature.
    fn from_request_parts(
        parts: &mut Parts,
        state: &S,
    ) -> impl std::future::Future<Output = Result<Self, Self::Rejection>> + Send {
        let secret = SessionSecret::from_ref(state);
        let result = authenticate(&parts.headers, &secret, Principal::User).map(|info| Self {
            user_id: UserId(info.subject),
            expires_at: info.expires_at,
        });
        async move { result }
    }
}

impl<S> FromRequestParts<S> for AdminSession
where
    SessionSecret: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = AppError;

    fn from_request_parts(
        parts: &mut Parts,
        state: &S,
    ) -> impl std::future::Future<Output = Result<Self, Self::Rejection>> + Send {
        let secret = SessionSecret::from_ref(state);
        let result = authenticate(&parts.headers, &secret, Principal::Admin).map(|info| Self {
            admin_id: AdminId(info.subject),
            expires_at: info.expires_at,
        });
        async move { result }
    }
}
