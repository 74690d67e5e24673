use serde::Serialize;

use roster_domain::user::{Gender, UserRole};

use crate::domain::types::{Admin, Company, User};

/// User as returned to clients. No password or token material.
#[derive(Serialize)]
pub struct UserResponse {
    pub id: String,
    pub company_id: String,
    pub email: String,
    pub name: String,
    pub age: Option<i32>,
    pub gender: Option<Gender>,
    pub role: UserRole,
    #[serde(serialize_with = "roster_core::serde::to_rfc3339_ms_opt")]
    pub confirmed_at: Option<chrono::DateTime<chrono::Utc>>,
    #[serde(serialize_with = "roster_core::serde::to_rfc3339_ms")]
    pub created_at: chrono::DateTime<chrono::Utc>,
    #[serde(serialize_with = "roster_core::serde::to_rfc3339_ms")]
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id.to_string(),
            company_id: user.company_id.into_inner(),
            email: user.email,
            name: user.name,
            age: user.age,
            gender: user.gender,
            role: user.role,
            confirmed_at: user.confirmed_at,
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

#[derive(Serialize)]
pub struct CompanyResponse {
    pub id: String,
    pub name: Option<String>,
    #[serde(serialize_with = "roster_core::serde::to_rfc3339_ms")]
    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl From<Company> for CompanyResponse {
    fn from(company: Company) -> Self {
        Self {
            id: company.id.into_inner(),
            name: company.name,
            created_at: company.created_at,
        }
    }
}

#[derive(Serialize)]
pub struct AdminResponse {
    pub id: String,
    pub email: String,
    #[serde(serialize_with = "roster_core::serde::to_rfc3339_ms")]
    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl From<Admin> for AdminResponse {
    fn from(admin: Admin) -> Self {
        Self {
            id: admin.id.to_string(),
            email: admin.email,
            created_at: admin.created_at,
        }
    }
}

/// User together with the company that owns it.
#[derive(Serialize)]
pub struct UserWithCompanyResponse {
    pub user: UserResponse,
    pub company: CompanyResponse,
}
