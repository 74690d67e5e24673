//! Cookie builders for session tokens.
//!
//! Users and admins each get their own cookie so both can be signed in from
//! the same browser.

use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use time::Duration;

use crate::token::Principal;

/// Cookie name for a user session.
pub const ROSTER_USER_SESSION: &str = "roster_user_session";

/// Cookie name for an admin session.
pub const ROSTER_ADMIN_SESSION: &str = "roster_admin_session";

/// Session lifetime in seconds (2 weeks). Used for both the JWT `exp` and
/// the cookie Max-Age.
pub const SESSION_TOKEN_EXP: u64 = 1_209_600;

/// Cookie name carrying sessions for `principal`.
pub fn session_cookie_name(principal: Principal) -> &'static str {
    match principal {
        Principal::User => ROSTER_USER_SESSION,
        Principal::Admin => ROSTER_ADMIN_SESSION,
    }
}

fn build(principal: Principal, value: String, domain: String, max_age: Duration) -> Cookie<'static> {
    Cookie::build((session_cookie_name(principal), value))
        .path("/")
        .domain(domain)
        .max_age(max_age)
        .http_only(true)
        .secure(true)
        .same_site(SameSite::Lax)
        .build()
}

/// Set the session cookie for `principal` on the jar.
///
/// ```
/// use axum_extra::extract::cookie::CookieJar;
/// use roster_auth_types::cookie::{set_session_cookie, ROSTER_USER_SESSION};
/// use roster_auth_types::token::Principal;
///
/// let jar = CookieJar::new();
/// let jar = set_session_cookie(jar, Principal::User, "token".to_string(), "example.com".to_string());
/// let cookie = jar.get(ROSTER_USER_SESSION).unwrap();
/// assert_eq!(cookie.path(), Some("/"));
/// assert_eq!(cookie.domain(), Some("example.com"));
/// assert_eq!(cookie.max_age(), Some(time::Duration::seconds(1_209_600)));
/// assert!(cookie.http_only().unwrap_or(false));
/// assert!(cookie.secure().unwrap_or(false));
/// ```
pub fn set_session_cookie(
    jar: CookieJar,
    principal: Principal,
    value: String,
    domain: String,
) -> CookieJar {
    jar.add(build(
        principal,
        value,
        domain,
        Duration::seconds(SESSION_TOKEN_EXP as i64),
    ))
}

/// Clear the session cookie for `principal` by setting Max-Age to 0.
///
/// ```
/// use axum_extra::extract::cookie::CookieJar;
/// use roster_auth_types::cookie::{
///     clear_session_cookie, set_session_cookie, ROSTER_ADMIN_SESSION, ROSTER_USER_SESSION,
/// };
/// use roster_auth_types::token::Principal;
///
/// let jar = CookieJar::new();
/// let jar = set_session_cookie(jar, Principal::User, "u".to_string(), "example.com".to_string());
/// let jar = set_session_cookie(jar, Principal::Admin, "a".to_string(), "example.com".to_string());
/// let jar = clear_session_cookie(jar, Principal::User, "example.com".to_string());
/// assert_eq!(jar.get(ROSTER_USER_SESSION).unwrap().max_age(), Some(time::Duration::ZERO));
/// assert_eq!(jar.get(ROSTER_ADMIN_SESSION).unwrap().value(), "a");
/// ```
pub fn clear_session_cookie(jar: CookieJar, principal: Principal, domain: String) -> CookieJar {
    jar.add(build(principal, String::new(), domain, Duration::ZERO))
}
