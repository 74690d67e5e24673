use chrono::{Duration, Utc};

use roster_domain::validation::{PASSWORD_RULES, UserCandidate, run_rules};

use crate::domain::repository::{PasswordHasher, UserRepository};
use crate::domain::types::{RESET_PASSWORD_INSTRUCTIONS, normalize_email};
use crate::error::AccountsServiceError;
use crate::usecase::token::{generate_token, mail_event};

// ── RequestPasswordReset ─────────────────────────────────────────────────────

pub struct RequestPasswordResetUseCase<U: UserRepository> {
    pub users: U,
}

impl<U: UserRepository> RequestPasswordResetUseCase<U> {
    pub async fn execute(&self, email: &str) -> Result<(), AccountsServiceError> {
        let mut user = self
            .users
            .find_by_email(&normalize_email(email))
            .await?
            .ok_or(AccountsServiceError::UserNotFound)?;

        let now = Utc::now();
        let token = generate_token();
        user.reset_password_token = Some(token.clone());
        user.reset_password_sent_at = Some(now);
        user.updated_at = now;

        let event = mail_event(RESET_PASSWORD_INSTRUCTIONS, &user, &token);
        self.users.update_with_outbox(&user, &event).await
    }
}

// ── ResetPassword ────────────────────────────────────────────────────────────

pub struct ResetPasswordInput {
    pub reset_password_token: String,
    pub password: Option<String>,
    pub password_confirmation: Option<String>,
}

pub struct ResetPasswordUseCase<U, H>
where
    U: UserRepository,
    H: PasswordHasher,
{
    pub users: U,
    pub hasher: H,
    /// How long a reset token stays usable after it was sent.
    pub ttl: Duration,
}

impl<U, H> ResetPasswordUseCase<U, H>
where
    U: UserRepository,
    H: PasswordHasher,
{
    pub async fn execute(&self, input: ResetPasswordInput) -> Result<(), AccountsServiceError> {
        if input.reset_password_token.is_empty() {
            return Err(AccountsServiceError::InvalidResetToken);
        }
        let mut user = self
            .users
            .find_by_reset_password_token(&input.reset_password_token)
            .await?
            .ok_or(AccountsServiceError::InvalidResetToken)?;

        let now = Utc::now();
        if !user.reset_password_period_valid(self.ttl, now) {
            return Err(AccountsServiceError::InvalidResetToken);
        }

        // A missing password is "being changed to nothing", which the rules reject.
        let password = input.password.unwrap_or_default();
        let candidate = UserCandidate {
            existing_id: Some(user.id),
            password: Some(password),
            password_confirmation: input.password_confirmation,
            ..UserCandidate::default()
        };
        run_rules(PASSWORD_RULES, &candidate).into_result()?;

        let password = candidate.password.unwrap_or_default();
        user.encrypted_password = self.hasher.hash(&password)?;
        user.reset_password_token = None;
        user.reset_password_sent_at = None;
        user.updated_at = now;
        self.users.update(&user).await?;
        tracing::info!(user_id = %user.id, "password reset");
        Ok(())
    }
}
