//! Session-cookie helpers for integration tests.

use http::{HeaderValue, header};
use roster_auth_types::cookie::session_cookie_name;
use roster_auth_types::token::{Principal, issue_session_token};
use uuid::Uuid;

/// Secret shared between test state and [`MockSession`].
pub const TEST_SESSION_SECRET: &str = "roster-test-session-secret";

/// Issues session cookies as if the subject had signed in.
pub struct MockSession {
    pub principal: Principal,
    pub subject: Uuid,
}

impl MockSession {
    pub fn user(user_id: Uuid) -> Self {
        Self {
            principal: Principal::User,
            subject: user_id,
        }
    }

    pub fn admin(admin_id: Uuid) -> Self {
        Self {
            principal: Principal::Admin,
            subject: admin_id,
        }
    }

    /// `name=value` pair for a `Cookie` request header.
    pub fn cookie(&self) -> String {
        let (token, _) =
            issue_session_token(self.principal, self.subject, TEST_SESSION_SECRET, 3600)
                .unwrap_or_else(|e| panic!("failed to sign test session: {e}"));
        format!("{}={token}", session_cookie_name(self.principal))
    }

    pub fn header(&self) -> (header::HeaderName, HeaderValue) {
        let value = HeaderValue::from_str(&self.cookie())
            .unwrap_or_else(|e| panic!("invalid cookie header: {e}"));
        (header::COOKIE, value)
    }
}
