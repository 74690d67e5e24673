use axum::extract::FromRef;
use chrono::Duration;
use sea_orm::DatabaseConnection;

use roster_auth_types::session::SessionSecret;
use roster_domain::messages::MessageCatalog;

use crate::infra::db::{DbAdminRepository, DbCompanyRepository, DbUserRepository};
use crate::infra::password::Argon2PasswordHasher;

/// Shared application state passed to every handler via axum `State`.
#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    pub session_secret: SessionSecret,
    pub cookie_domain: String,
    pub catalog: MessageCatalog,
    pub confirmation_ttl: Duration,
    pub reset_password_ttl: Duration,
}

impl AppState {
    pub fn company_repo(&self) -> DbCompanyRepository {
        DbCompanyRepository {
            db: self.db.clone(),
        }
    }

    pub fn user_repo(&self) -> DbUserRepository {
        DbUserRepository {
            db: self.db.clone(),
        }
    }

    pub fn admin_repo(&self) -> DbAdminRepository {
        DbAdminRepository {
            db: self.db.clone(),
        }
    }

    pub fn password_hasher(&self) -> Argon2PasswordHasher {
        Argon2PasswordHasher
    }
}

impl FromRef<AppState> for SessionSecret {
    fn from_ref(state: &AppState) -> Self {
        state.session_secret.clone()
    }
}
