use chrono::Utc;
use uuid::Uuid;

use roster_domain::allocator::allocate_company_id;
use roster_domain::id::UserId;
use roster_domain::user::{Gender, RawEnumValue, UserRole};
use roster_domain::validation::{
    Field, UserCandidate, Violation, ViolationKind, Violations, validate_user_with,
};

use crate::domain::repository::{CompanyRepository, PasswordHasher, UserRepository};
use crate::domain::types::{CONFIRMATION_INSTRUCTIONS, Company, User, normalize_email};
use crate::error::AccountsServiceError;
use crate::usecase::token::{generate_token, mail_event};

/// Resolve a raw gender value, recording an inclusion violation for unknown values.
pub(crate) fn resolve_gender(
    raw: Option<&RawEnumValue>,
    violations: &mut Violations,
) -> Option<Gender> {
    let raw = raw?;
    let gender = raw.to_gender();
    if gender.is_none() {
        violations.push(Violation::new(Field::Gender, ViolationKind::Inclusion));
    }
    gender
}

// ── Register ─────────────────────────────────────────────────────────────────

pub struct RegisterInput {
    pub email: Option<String>,
    pub name: Option<String>,
    pub age: Option<i32>,
    pub gender: Option<RawEnumValue>,
    pub password: Option<String>,
    pub password_confirmation: Option<String>,
    pub company_name: Option<String>,
}

pub struct RegisterOutput {
    pub user: User,
    pub company: Company,
}

/// Sign-up: validates the user, allocates a company id and stores both,
/// together with the confirmation mail event.
pub struct RegisterUseCase<C, U, H>
where
    C: CompanyRepository,
    U: UserRepository,
    H: PasswordHasher,
{
    pub companies: C,
    pub users: U,
    pub hasher: H,
}

impl<C, U, H> RegisterUseCase<C, U, H>
where
    C: CompanyRepository,
    U: UserRepository,
    H: PasswordHasher,
{
    pub async fn execute(&self, input: RegisterInput) -> Result<RegisterOutput, AccountsServiceError> {
        let candidate = UserCandidate {
            existing_id: None,
            email: input.email.as_deref().map(normalize_email),
            name: input.name,
            age: input.age,
            password: input.password,
            password_confirmation: input.password_confirmation,
        };

        let mut violations = validate_user_with(&candidate, &self.users).await?;
        let gender = resolve_gender(input.gender.as_ref(), &mut violations);
        violations.into_result()?;

        // Validation guarantees these are present.
        let (Some(email), Some(name), Some(password)) =
            (candidate.email, candidate.name, candidate.password)
        else {
            return Err(anyhow::anyhow!("validated candidate is missing required fields").into());
        };

        let company_id = allocate_company_id("", &self.companies).await?;
        let encrypted_password = self.hasher.hash(&password)?;

        let now = Utc::now();
        let company = Company {
            id: company_id,
            name: input.company_name.filter(|n| !n.trim().is_empty()),
            created_at: now,
            updated_at: now,
        };
        let token = generate_token();
        let user = User {
            id: UserId(Uuid::now_v7()),
            company_id: company.id.clone(),
            email,
            name,
            age: candidate.age,
            gender,
            role: UserRole::default(),
            encrypted_password,
            confirmation_token: Some(token.clone()),
            confirmation_sent_at: Some(now),
            confirmed_at: None,
            reset_password_token: None,
            reset_password_sent_at: None,
            created_at: now,
            updated_at: now,
        };
        let event = mail_event(CONFIRMATION_INSTRUCTIONS, &user, &token);

        self.users.register(&company, &user, &event).await?;
        tracing::info!(
            user_id = %user.id,
            company_id = %company.id,
            "user registered"
        );
        Ok(RegisterOutput { user, company })
    }
}
