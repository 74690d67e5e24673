use chrono::{Duration, Utc};

use crate::domain::repository::UserRepository;
use crate::domain::types::{CONFIRMATION_INSTRUCTIONS, User, normalize_email};
use crate::error::AccountsServiceError;
use crate::usecase::token::{generate_token, mail_event};

// ── Confirm ──────────────────────────────────────────────────────────────────

pub struct ConfirmUseCase<U: UserRepository> {
    pub users: U,
    /// How long a confirmation token stays usable after it was sent.
    pub ttl: Duration,
}

impl<U: UserRepository> ConfirmUseCase<U> {
    pub async fn execute(&self, token: &str) -> Result<User, AccountsServiceError> {
        if token.is_empty() {
            return Err(AccountsServiceError::InvalidConfirmationToken);
        }
        let mut user = self
            .users
            .find_by_confirmation_token(token)
            .await?
            .ok_or(AccountsServiceError::InvalidConfirmationToken)?;

        if user.is_confirmed() {
            return Err(AccountsServiceError::AlreadyConfirmed);
        }
        let now = Utc::now();
        if !user.confirmation_period_valid(self.ttl, now) {
            return Err(AccountsServiceError::InvalidConfirmationToken);
        }

        // The token stays on the row so a reused link resolves to `AlreadyConfirmed`.
        user.confirmed_at = Some(now);
        user.updated_at = now;
        self.users.update(&user).await?;
        tracing::info!(user_id = %user.id, "user confirmed");
        Ok(user)
    }
}

// ── ResendConfirmation ───────────────────────────────────────────────────────

pub struct ResendConfirmationUseCase<U: UserRepository> {
    pub users: U,
}

impl<U: UserRepository> ResendConfirmationUseCase<U> {
    pub async fn execute(&self, email: &str) -> Result<(), AccountsServiceError> {
        let mut user = self
            .users
            .find_by_email(&normalize_email(email))
            .await?
            .ok_or(AccountsServiceError::UserNotFound)?;

        if user.is_confirmed() {
            return Err(AccountsServiceError::AlreadyConfirmed);
        }

        let now = Utc::now();
        let token = generate_token();
        user.confirmation_token = Some(token.clone());
        user.confirmation_sent_at = Some(now);
        user.updated_at = now;

        let event = mail_event(CONFIRMATION_INSTRUCTIONS, &user, &token);
        self.users.update_with_outbox(&user, &event).await
    }
}
