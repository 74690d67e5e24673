use anyhow::Context as _;
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, DatabaseConnection,
    DatabaseTransaction, DbErr, EntityTrait, PaginatorTrait, QueryFilter, SqlErr,
    TransactionError, TransactionTrait,
};

use roster_accounts_schema::{admins, companies, outbox_events, users};
use roster_domain::allocator::PresenceOracle;
use roster_domain::id::{AdminId, CompanyId, UserId};
use roster_domain::user::{Gender, UserRole};
use roster_domain::validation::{EmailOracle, Field, ViolationKind, Violations};

use crate::domain::repository::{AdminRepository, CompanyRepository, UserRepository};
use crate::domain::types::{Admin, Company, OutboxEvent, User};
use crate::error::AccountsServiceError;

// ── Constraint translation ───────────────────────────────────────────────────

/// Unique indexes whose violation is reported as a "taken" field error.
/// Names match the migrations (`companies_pkey` and `admins_email_key` are
/// the Postgres defaults).
const UNIQUE_FIELDS: &[(&str, Field)] = &[
    ("idx_users_email", Field::Email),
    ("admins_email_key", Field::Email),
    ("companies_pkey", Field::CompanyId),
];

/// Field owning the constraint named in a unique-violation message.
fn field_for_unique_violation(message: &str) -> Option<Field> {
    UNIQUE_FIELDS
        .iter()
        .find(|(constraint, _)| message.contains(&format!("\"{constraint}\"")))
        .map(|(_, field)| *field)
}

fn taken_field(err: &DbErr) -> Option<Field> {
    match err.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(message)) => field_for_unique_violation(&message),
        _ => None,
    }
}

/// Map a write error: known unique violations become field-keyed violations,
/// everything else is internal.
fn write_error(err: DbErr, context: &'static str) -> AccountsServiceError {
    match taken_field(&err) {
        Some(field) => {
            tracing::warn!(field = field.as_str(), "unique constraint raced past pre-check");
            AccountsServiceError::Validation(Violations::single(field, ViolationKind::Taken))
        }
        None => AccountsServiceError::Internal(anyhow::Error::new(err).context(context)),
    }
}

fn transaction_error(err: TransactionError<DbErr>, context: &'static str) -> AccountsServiceError {
    match err {
        TransactionError::Connection(e) | TransactionError::Transaction(e) => write_error(e, context),
    }
}

// ── Company repository ───────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbCompanyRepository {
    pub db: DatabaseConnection,
}

impl PresenceOracle for DbCompanyRepository {
    type Error = AccountsServiceError;

    async fn exists(&self, id: &str) -> Result<bool, AccountsServiceError> {
        let count = companies::Entity::find_by_id(id.to_owned())
            .count(&self.db)
            .await
            .context("check company id presence")?;
        Ok(count > 0)
    }
}

impl CompanyRepository for DbCompanyRepository {
    async fn find_by_id(&self, id: &CompanyId) -> Result<Option<Company>, AccountsServiceError> {
        let model = companies::Entity::find_by_id(id.as_str().to_owned())
            .one(&self.db)
            .await
            .context("find company by id")?;
        Ok(model.map(company_from_model))
    }
}

fn company_from_model(model: companies::Model) -> Company {
    Company {
        id: CompanyId::new(model.id),
        name: model.name,
        created_at: model.created_at,
        updated_at: model.updated_at,
    }
}

// ── User repository ──────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbUserRepository {
    pub db: DatabaseConnection,
}

impl EmailOracle for DbUserRepository {
    type Error = AccountsServiceError;

    async fn taken_by_other(
        &self,
        email: &str,
        except: Option<UserId>,
    ) -> Result<bool, AccountsServiceError> {
        let mut query = users::Entity::find().filter(users::Column::Email.eq(email));
        if let Some(id) = except {
            query = query.filter(users::Column::Id.ne(id.0));
        }
        let count = query
            .count(&self.db)
            .await
            .context("check email presence")?;
        Ok(count > 0)
    }
}

impl UserRepository for DbUserRepository {
    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, AccountsServiceError> {
        let model = users::Entity::find_by_id(id.0)
            .one(&self.db)
            .await
            .context("find user by id")?;
        model.map(user_from_model).transpose()
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AccountsServiceError> {
        let model = users::Entity::find()
            .filter(users::Column::Email.eq(email))
            .one(&self.db)
            .await
            .context("find user by email")?;
        model.map(user_from_model).transpose()
    }

    async fn find_by_confirmation_token(
        &self,
        token: &str,
    ) -> Result<Option<User>, AccountsServiceError> {
        let model = users::Entity::find()
            .filter(users::Column::ConfirmationToken.eq(token))
            .one(&self.db)
            .await
            .context("find user by confirmation token")?;
        model.map(user_from_model).transpose()
    }

    async fn find_by_reset_password_token(
        &self,
        token: &str,
    ) -> Result<Option<User>, AccountsServiceError> {
        let model = users::Entity::find()
            .filter(users::Column::ResetPasswordToken.eq(token))
            .one(&self.db)
            .await
            .context("find user by reset password token")?;
        model.map(user_from_model).transpose()
    }

    async fn register(
        &self,
        company: &Company,
        user: &User,
        event: &OutboxEvent,
    ) -> Result<(), AccountsServiceError> {
        let company = company.clone();
        let user = user.clone();
        let event = event.clone();
        self.db
            .transaction::<_, (), DbErr>(|txn| {
                Box::pin(async move {
                    insert_company(txn, &company).await?;
                    user_active_model(&user).insert(txn).await?;
                    insert_outbox_event(txn, &event).await?;
                    Ok(())
                })
            })
            .await
            .map_err(|e| transaction_error(e, "register user with company"))
    }

    async fn update(&self, user: &User) -> Result<(), AccountsServiceError> {
        user_active_model(user)
            .update(&self.db)
            .await
            .map_err(|e| write_error(e, "update user"))?;
        Ok(())
    }

    async fn update_with_outbox(
        &self,
        user: &User,
        event: &OutboxEvent,
    ) -> Result<(), AccountsServiceError> {
        let user = user.clone();
        let event = event.clone();
        self.db
            .transaction::<_, (), DbErr>(|txn| {
                Box::pin(async move {
                    user_active_model(&user).update(txn).await?;
                    insert_outbox_event(txn, &event).await?;
                    Ok(())
                })
            })
            .await
            .map_err(|e| transaction_error(e, "update user with outbox"))
    }

    async fn delete(&self, id: UserId) -> Result<bool, AccountsServiceError> {
        let result = users::Entity::delete_by_id(id.0)
            .exec(&self.db)
            .await
            .context("delete user")?;
        Ok(result.rows_affected > 0)
    }
}

async fn insert_company(txn: &DatabaseTransaction, company: &Company) -> Result<(), DbErr> {
    companies::ActiveModel {
        id: Set(company.id.as_str().to_owned()),
        name: Set(company.name.clone()),
        created_at: Set(company.created_at),
        updated_at: Set(company.updated_at),
    }
    .insert(txn)
    .await?;
    Ok(())
}

async fn insert_outbox_event(
    txn: &DatabaseTransaction,
    event: &OutboxEvent,
) -> Result<(), DbErr> {
    let now = chrono::Utc::now();
    outbox_events::ActiveModel {
        id: Set(event.id),
        user_id: Set(event.user_id.0),
        kind: Set(event.kind.clone()),
        payload: Set(event.payload.clone()),
        idempotency_key: Set(event.idempotency_key.clone()),
        attempts: Set(0),
        last_error: Set(None),
        created_at: Set(now),
        next_attempt_at: Set(now),
        processed_at: Set(None),
        failed_at: Set(None),
    }
    .insert(txn)
    .await?;
    Ok(())
}

fn user_active_model(user: &User) -> users::ActiveModel {
    users::ActiveModel {
        id: Set(user.id.0),
        company_id: Set(user.company_id.as_str().to_owned()),
        email: Set(user.email.clone()),
        name: Set(user.name.clone()),
        age: Set(user.age),
        gender: Set(user.gender.map(|g| i16::from(g.as_u8()))),
        role: Set(i16::from(user.role.as_u8())),
        encrypted_password: Set(user.encrypted_password.clone()),
        confirmation_token: Set(user.confirmation_token.clone()),
        confirmation_sent_at: Set(user.confirmation_sent_at),
        confirmed_at: Set(user.confirmed_at),
        reset_password_token: Set(user.reset_password_token.clone()),
        reset_password_sent_at: Set(user.reset_password_sent_at),
        created_at: Set(user.created_at),
        updated_at: Set(user.updated_at),
    }
}

/// Stored enum codes outside the closed sets mean the row was written by
/// something other than this service.
fn user_from_model(model: users::Model) -> Result<User, AccountsServiceError> {
    let gender = match model.gender {
        Some(code) => Some(
            u8::try_from(code)
                .ok()
                .and_then(Gender::from_u8)
                .with_context(|| format!("user {} has unknown gender code {code}", model.id))?,
        ),
        None => None,
    };
    let role = u8::try_from(model.role)
        .ok()
        .and_then(UserRole::from_u8)
        .with_context(|| format!("user {} has unknown role code {}", model.id, model.role))?;

    Ok(User {
        id: UserId(model.id),
        company_id: CompanyId::new(model.company_id),
        email: model.email,
        name: model.name,
        age: model.age,
        gender,
        role,
        encrypted_password: model.encrypted_password,
        confirmation_token: model.confirmation_token,
        confirmation_sent_at: model.confirmation_sent_at,
        confirmed_at: model.confirmed_at,
        reset_password_token: model.reset_password_token,
        reset_password_sent_at: model.reset_password_sent_at,
        created_at: model.created_at,
        updated_at: model.updated_at,
    })
}

// ── Admin repository ─────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbAdminRepository {
    pub db: DatabaseConnection,
}

impl AdminRepository for DbAdminRepository {
    async fn find_by_id(&self, id: AdminId) -> Result<Option<Admin>, AccountsServiceError> {
        let model = admins::Entity::find_by_id(id.0)
            .one(&self.db)
            .await
            .context("find admin by id")?;
        Ok(model.map(admin_from_model))
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<Admin>, AccountsServiceError> {
        let model = admins::Entity::find()
            .filter(admins::Column::Email.eq(email))
            .one(&self.db)
            .await
            .context("find admin by email")?;
        Ok(model.map(admin_from_model))
    }

    async fn create(&self, admin: &Admin) -> Result<(), AccountsServiceError> {
        admins::ActiveModel {
            id: Set(admin.id.0),
            email: Set(admin.email.clone()),
            encrypted_password: Set(admin.encrypted_password.clone()),
            created_at: Set(admin.created_at),
            updated_at: Set(admin.updated_at),
        }
        .insert(&self.db)
        .await
        .map_err(|e| write_error(e, "create admin"))?;
        Ok(())
    }
}

fn admin_from_model(model: admins::Model) -> Admin {
    Admin {
        id: AdminId(model.id),
        email: model.email,
        encrypted_password: model.encrypted_password,
        created_at: model.created_at,
        updated_at: model.updated_at,
    }
}
