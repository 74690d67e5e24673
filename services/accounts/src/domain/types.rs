use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use roster_domain::id::{AdminId, CompanyId, UserId};
use roster_domain::user::{Gender, UserRole};

/// Tenant that owns users.
#[derive(Debug, Clone)]
pub struct Company {
    pub id: CompanyId,
    pub name: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Persisted user account. `encrypted_password` is an argon2 PHC string.
#[derive(Debug, Clone)]
pub struct User {
    pub id: UserId,
    pub company_id: CompanyId,
    pub email: String,
    pub name: String,
    pub age: Option<i32>,
    pub gender: Option<Gender>,
    pub role: UserRole,
    pub encrypted_password: String,
    pub confirmation_token: Option<String>,
    pub confirmation_sent_at: Option<DateTime<Utc>>,
    pub confirmed_at: Option<DateTime<Utc>>,
    pub reset_password_token: Option<String>,
    pub reset_password_sent_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    pub fn is_confirmed(&self) -> bool {
        self.confirmed_at.is_some()
    }

    /// The confirmation token was sent less than `ttl` ago.
    pub fn confirmation_period_valid(&self, ttl: Duration, now: DateTime<Utc>) -> bool {
        self.confirmation_sent_at.is_some_and(|sent| sent + ttl > now)
    }

    /// The reset token was sent less than `ttl` ago.
    pub fn reset_password_period_valid(&self, ttl: Duration, now: DateTime<Utc>) -> bool {
        self.reset_password_sent_at
            .is_some_and(|sent| sent + ttl > now)
    }
}

/// Back-office account, separate from [`User`].
#[derive(Debug, Clone)]
pub struct Admin {
    pub id: AdminId,
    pub email: String,
    pub encrypted_password: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Outbox event for async mail delivery.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutboxEvent {
    pub id: Uuid,
    /// Recipient of the mail.
    pub user_id: UserId,
    pub kind: String,
    pub payload: serde_json::Value,
    pub idempotency_key: String,
}

/// Outbox kind for account confirmation mail.
pub const CONFIRMATION_INSTRUCTIONS: &str = "confirmation_instructions";

/// Outbox kind for password reset mail.
pub const RESET_PASSWORD_INSTRUCTIONS: &str = "reset_password_instructions";

/// Length of confirmation and reset tokens.
pub const ACCOUNT_TOKEN_LEN: usize = 20;

/// Devise-style email normalisation: surrounding whitespace stripped, lowercased.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}
