#![allow(async_fn_in_trait)]

use roster_domain::allocator::PresenceOracle;
use roster_domain::id::{AdminId, CompanyId, UserId};
use roster_domain::validation::EmailOracle;

use crate::domain::types::{Admin, Company, OutboxEvent, User};
use crate::error::AccountsServiceError;

/// Repository for companies. `exists` backs the id allocator.
pub trait CompanyRepository:
    PresenceOracle<Error = AccountsServiceError> + Send + Sync
{
    async fn find_by_id(&self, id: &CompanyId) -> Result<Option<Company>, AccountsServiceError>;
}

/// Repository for users. `taken_by_other` backs the email uniqueness rule.
///
/// Writes that hit the unique indexes on `users.email` or `companies.id` fail
/// with a field-keyed `Validation` error rather than `Internal`.
pub trait UserRepository: EmailOracle<Error = AccountsServiceError> + Send + Sync {
    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, AccountsServiceError>;

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AccountsServiceError>;

    async fn find_by_confirmation_token(
        &self,
        token: &str,
    ) -> Result<Option<User>, AccountsServiceError>;

    async fn find_by_reset_password_token(
        &self,
        token: &str,
    ) -> Result<Option<User>, AccountsServiceError>;

    /// Insert a company, its first user and the confirmation mail event atomically.
    async fn register(
        &self,
        company: &Company,
        user: &User,
        event: &OutboxEvent,
    ) -> Result<(), AccountsServiceError>;

    /// Overwrite every mutable column of an existing user.
    async fn update(&self, user: &User) -> Result<(), AccountsServiceError>;

    /// [`update`](Self::update) plus an outbox event in the same transaction.
    async fn update_with_outbox(
        &self,
        user: &User,
        event: &OutboxEvent,
    ) -> Result<(), AccountsServiceError>;

    /// Delete a user. Returns `true` if a row was deleted.
    async fn delete(&self, id: UserId) -> Result<bool, AccountsServiceError>;
}

/// Repository for back-office admins.
pub trait AdminRepository: Send + Sync {
    async fn find_by_id(&self, id: AdminId) -> Result<Option<Admin>, AccountsServiceError>;

    async fn find_by_email(&self, email: &str) -> Result<Option<Admin>, AccountsServiceError>;

    async fn create(&self, admin: &Admin) -> Result<(), AccountsServiceError>;
}

/// Argon2id PHC string with the hasher's parameters that no password matches.
/// Sign-in verifies against it when the email is unknown, so a miss costs the
/// same as a wrong password.
pub const DUMMY_PASSWORD_HASH: &str =
    "$argon2id$v=19$m=19456,t=2,p=1$+vPIh2GfRSctI2zQbAUGdw$fJ4soSR1EP8t8fdTHtgOsdJpgX9kr2QOnbN+WdTr3SY";

/// Password hashing collaborator. Plaintext never leaves this call.
pub trait PasswordHasher: Send + Sync {
    fn hash(&self, password: &str) -> Result<String, AccountsServiceError>;

    fn verify(&self, password: &str, encrypted: &str) -> Result<bool, AccountsServiceError>;
}
