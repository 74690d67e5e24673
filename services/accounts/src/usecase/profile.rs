use chrono::Utc;

use roster_domain::id::UserId;
use roster_domain::user::RawEnumValue;
use roster_domain::validation::{UserCandidate, validate_user_with};

use crate::domain::repository::{CompanyRepository, PasswordHasher, UserRepository};
use crate::domain::types::{Company, User, normalize_email};
use crate::error::AccountsServiceError;
use crate::usecase::registration::resolve_gender;

// ── GetProfile ───────────────────────────────────────────────────────────────

pub struct GetProfileUseCase<U: UserRepository> {
    pub users: U,
}

impl<U: UserRepository> GetProfileUseCase<U> {
    pub async fn execute(&self, user_id: UserId) -> Result<User, AccountsServiceError> {
        self.users
            .find_by_id(user_id)
            .await?
            .ok_or(AccountsServiceError::UserNotFound)
    }
}

// ── UpdateProfile ────────────────────────────────────────────────────────────

/// Absent fields keep their stored value. A blank password means "unchanged".
/// `age` and `gender` use `Some(None)` to clear the stored value.
#[derive(Default)]
pub struct UpdateProfileInput {
    pub email: Option<String>,
    pub name: Option<String>,
    pub age: Option<Option<i32>>,
    pub gender: Option<Option<RawEnumValue>>,
    pub password: Option<String>,
    pub password_confirmation: Option<String>,
}

pub struct UpdateProfileUseCase<U, H>
where
    U: UserRepository,
    H: PasswordHasher,
{
    pub users: U,
    pub hasher: H,
}

impl<U, H> UpdateProfileUseCase<U, H>
where
    U: UserRepository,
    H: PasswordHasher,
{
    pub async fn execute(
        &self,
        user_id: UserId,
        input: UpdateProfileInput,
    ) -> Result<User, AccountsServiceError> {
        let mut user = self
            .users
            .find_by_id(user_id)
            .await?
            .ok_or(AccountsServiceError::UserNotFound)?;

        let password = input.password.filter(|p| !p.is_empty());
        let password_confirmation = password.as_ref().and(input.password_confirmation);
        let candidate = UserCandidate {
            existing_id: Some(user.id),
            email: Some(
                input
                    .email
                    .as_deref()
                    .map(normalize_email)
                    .unwrap_or_else(|| user.email.clone()),
            ),
            name: Some(input.name.unwrap_or_else(|| user.name.clone())),
            age: input.age.unwrap_or(user.age),
            password,
            password_confirmation,
        };

        let mut violations = validate_user_with(&candidate, &self.users).await?;
        let gender = match &input.gender {
            Some(raw) => resolve_gender(raw.as_ref(), &mut violations),
            None => user.gender,
        };
        violations.into_result()?;

        if let Some(email) = candidate.email {
            user.email = email;
        }
        if let Some(name) = candidate.name {
            user.name = name;
        }
        user.age = candidate.age;
        user.gender = gender;
        if let Some(password) = candidate.password {
            user.encrypted_password = self.hasher.hash(&password)?;
        }
        user.updated_at = Utc::now();

        self.users.update(&user).await?;
        Ok(user)
    }
}

// ── DeleteProfile ────────────────────────────────────────────────────────────

pub struct DeleteProfileUseCase<U: UserRepository> {
    pub users: U,
}

impl<U: UserRepository> DeleteProfileUseCase<U> {
    pub async fn execute(&self, user_id: UserId) -> Result<(), AccountsServiceError> {
        if !self.users.delete(user_id).await? {
            return Err(AccountsServiceError::UserNotFound);
        }
        tracing::info!(user_id = %user_id, "user deleted");
        Ok(())
    }
}

// ── Dashboard ────────────────────────────────────────────────────────────────

pub struct Dashboard {
    pub user: User,
    pub company: Company,
}

pub struct DashboardUseCase<U, C>
where
    U: UserRepository,
    C: CompanyRepository,
{
    pub users: U,
    pub companies: C,
}

impl<U, C> DashboardUseCase<U, C>
where
    U: UserRepository,
    C: CompanyRepository,
{
    pub async fn execute(&self, user_id: UserId) -> Result<Dashboard, AccountsServiceError> {
        let user = self
            .users
            .find_by_id(user_id)
            .await?
            .ok_or(AccountsServiceError::UserNotFound)?;
        let company = self
            .companies
            .find_by_id(&user.company_id)
            .await?
            .ok_or_else(|| {
                anyhow::anyhow!("user {} references missing company {}", user.id, user.company_id)
            })?;
        Ok(Dashboard { user, company })
    }
}
