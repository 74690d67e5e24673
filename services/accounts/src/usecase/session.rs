use roster_auth_types::cookie::SESSION_TOKEN_EXP;
use roster_auth_types::session::SessionSecret;
use roster_auth_types::token::{Principal, issue_session_token};
use uuid::Uuid;

use crate::domain::repository::{DUMMY_PASSWORD_HASH, PasswordHasher, UserRepository};
use crate::domain::types::{User, normalize_email};
use crate::error::AccountsServiceError;

/// Signed session token handed back to the handler for the cookie.
#[derive(Debug, Clone)]
pub struct IssuedSession {
    pub token: String,
    pub expires_at: u64,
}

pub(crate) fn issue(
    principal: Principal,
    subject: Uuid,
    secret: &SessionSecret,
) -> Result<IssuedSession, AccountsServiceError> {
    let (token, expires_at) =
        issue_session_token(principal, subject, secret.as_str(), SESSION_TOKEN_EXP)
            .map_err(|e| anyhow::Error::new(e).context("issue session token"))?;
    Ok(IssuedSession { token, expires_at })
}

// ── SignIn ───────────────────────────────────────────────────────────────────

pub struct SignInInput {
    pub email: String,
    pub password: String,
}

pub struct SignInOutput {
    pub user: User,
    pub session: IssuedSession,
}

pub struct SignInUseCase<U, H>
where
    U: UserRepository,
    H: PasswordHasher,
{
    pub users: U,
    pub hasher: H,
    pub secret: SessionSecret,
}

impl<U, H> SignInUseCase<U, H>
where
    U: UserRepository,
    H: PasswordHasher,
{
    pub async fn execute(&self, input: SignInInput) -> Result<SignInOutput, AccountsServiceError> {
        let Some(user) = self
            .users
            .find_by_email(&normalize_email(&input.email))
            .await?
        else {
            self.hasher.verify(&input.password, DUMMY_PASSWORD_HASH)?;
            return Err(AccountsServiceError::InvalidCredentials);
        };

        if !self
            .hasher
            .verify(&input.password, &user.encrypted_password)?
        {
            return Err(AccountsServiceError::InvalidCredentials);
        }
        // Only reported once the password matched.
        if !user.is_confirmed() {
            return Err(AccountsServiceError::Unconfirmed);
        }

        let session = issue(Principal::User, user.id.0, &self.secret)?;
        tracing::info!(user_id = %user.id, "user signed in");
        Ok(SignInOutput { user, session })
    }
}
