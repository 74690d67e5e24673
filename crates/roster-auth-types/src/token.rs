//! Session-token issuing and validation (HS256 JWT).

use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Which kind of account a session belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Principal {
    User,
    Admin,
}

/// Identity extracted from a validated session token.
#[derive(Debug, Clone)]
pub struct SessionInfo {
    pub subject: Uuid,
    pub principal: Principal,
    pub expires_at: u64,
}

/// Errors returned by [`issue_session_token`] and [`validate_session_token`].
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("invalid signature")]
    InvalidSignature,
    #[error("token expired")]
    Expired,
    #[error("malformed token")]
    Malformed,
    #[error("failed to sign token")]
    Signing(#[source] jsonwebtoken::errors::Error),
}

/// JWT claims payload.
///
/// | Field | JWT claim | Meaning |
/// |-------|-----------|---------|
/// | `sub` | `sub` | user or admin id (UUID string) |
/// | `principal` | custom | `user` or `admin` |
/// | `exp` | `exp` | seconds since epoch |
#[derive(Debug, Serialize, Deserialize)]
pub struct SessionClaims {
    pub sub: String,
    pub principal: Principal,
    pub exp: u64,
}

/// Sign a session token for `subject`, valid for `ttl_secs`.
///
/// Returns the token and its expiry (seconds since epoch).
pub fn issue_session_token(
    principal: Principal,
    subject: Uuid,
    secret: &str,
    ttl_secs: u64,
) -> Result<(String, u64), AuthError> {
    let exp = jsonwebtoken::get_current_timestamp() + ttl_secs;
    let claims = SessionClaims {
        sub: subject.to_string(),
        principal,
        exp,
    };
    let token = encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(AuthError::Signing)?;
    Ok((token, exp))
}

/// Decode and validate a JWT, returning raw claims.
///
/// Validation: HS256, exp checked, required claims: `exp` + `sub`.
/// Default leeway = 60s.
fn decode_jwt(token: &str, secret: &str) -> Result<SessionClaims, AuthError> {
    let mut validation = Validation::new(jsonwebtoken::Algorithm::HS256);
    validation.validate_exp = true;
    validation.required_spec_claims.clear();
    validation.set_required_spec_claims(&["exp", "sub"]);

    let data = decode::<SessionClaims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &validation,
    )
    .map_err(|e| match e.kind() {
        jsonwebtoken::errors::ErrorKind::ExpiredSignature => AuthError::Expired,
        jsonwebtoken::errors::ErrorKind::InvalidSignature => AuthError::InvalidSignature,
        _ => AuthError::Malformed,
    })?;

    Ok(data.claims)
}

/// Validate a session-cookie value, returning the parsed identity.
pub fn validate_session_token(token: &str, secret: &str) -> Result<SessionInfo, AuthError> {
    let claims = decode_jwt(token, secret)?;
    let subject = claims
        .sub
        .parse::<Uuid>()
        .map_err(|_| AuthError::Malformed)?;
    Ok(SessionInfo {
        subject,
        principal: claims.principal,
        expires_at: claims.exp,
    })
}
