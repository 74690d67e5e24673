use chrono::Utc;
use uuid::Uuid;

use roster_auth_types::session::SessionSecret;
use roster_auth_types::token::Principal;
use roster_domain::id::AdminId;
use roster_domain::validation::{
    Field, Rule, UserCandidate, Violation, ViolationKind, Violations, email_format, email_required,
    password_confirmation, password_format, password_length, password_required, run_rules,
};

use crate::domain::repository::{AdminRepository, DUMMY_PASSWORD_HASH, PasswordHasher};
use crate::domain::types::{Admin, normalize_email};
use crate::error::AccountsServiceError;
use crate::usecase::session::{IssuedSession, issue};

/// Rules for admin accounts: email and password only.
const ADMIN_RULES: &[Rule] = &[
    email_required,
    email_format,
    password_required,
    password_length,
    password_format,
    password_confirmation,
];

// ── CreateAdmin ──────────────────────────────────────────────────────────────

pub struct CreateAdminInput {
    pub email: String,
    pub password: String,
    pub password_confirmation: Option<String>,
}

pub struct CreateAdminUseCase<A, H>
where
    A: AdminRepository,
    H: PasswordHasher,
{
    pub admins: A,
    pub hasher: H,
}

impl<A, H> CreateAdminUseCase<A, H>
where
    A: AdminRepository,
    H: PasswordHasher,
{
    pub async fn execute(&self, input: CreateAdminInput) -> Result<Admin, AccountsServiceError> {
        let email = normalize_email(&input.email);
        let candidate = UserCandidate {
            email: Some(email.clone()),
            password: Some(input.password),
            password_confirmation: input.password_confirmation,
            ..UserCandidate::default()
        };
        let mut violations: Violations = run_rules(ADMIN_RULES, &candidate);
        if !email.is_empty() && self.admins.find_by_email(&email).await?.is_some() {
            violations.push(Violation::new(Field::Email, ViolationKind::Taken));
        }
        violations.into_result()?;

        let password = candidate.password.unwrap_or_default();
        let now = Utc::now();
        let admin = Admin {
            id: AdminId(Uuid::now_v7()),
            email,
            encrypted_password: self.hasher.hash(&password)?,
            created_at: now,
            updated_at: now,
        };
        self.admins.create(&admin).await?;
        tracing::info!(admin_id = %admin.id, "admin created");
        Ok(admin)
    }
}

// ── AdminSignIn ──────────────────────────────────────────────────────────────

pub struct AdminSignInInput {
    pub email: String,
    pub password: String,
}

pub struct AdminSignInOutput {
    pub admin: Admin,
    pub session: IssuedSession,
}

pub struct AdminSignInUseCase<A, H>
where
    A: AdminRepository,
    H: PasswordHasher,
{
    pub admins: A,
    pub hasher: H,
    pub secret: SessionSecret,
}

impl<A, H> AdminSignInUseCase<A, H>
where
    A: AdminRepository,
    H: PasswordHasher,
{
    pub async fn execute(
        &self,
        input: AdminSignInInput,
    ) -> Result<AdminSignInOutput, AccountsServiceError> {
        let Some(admin) = self
            .admins
            .find_by_email(&normalize_email(&input.email))
            .await?
        else {
            self.hasher.verify(&input.password, DUMMY_PASSWORD_HASH)?;
            return Err(AccountsServiceError::InvalidCredentials);
        };

        if !self
            .hasher
            .verify(&input.password, &admin.encrypted_password)?
        {
            return Err(AccountsServiceError::InvalidCredentials);
        }

        let session = issue(Principal::Admin, admin.id.0, &self.secret)?;
        tracing::info!(admin_id = %admin.id, "admin signed in");
        Ok(AdminSignInOutput { admin, session })
    }
}

// ── GetAdmin ─────────────────────────────────────────────────────────────────

pub struct GetAdminUseCase<A: AdminRepository> {
    pub admins: A,
}

impl<A: AdminRepository> GetAdminUseCase<A> {
    pub async fn execute(&self, admin_id: AdminId) -> Result<Admin, AccountsServiceError> {
        self.admins
            .find_by_id(admin_id)
            .await?
            .ok_or(AccountsServiceError::AdminNotFound)
    }
}
