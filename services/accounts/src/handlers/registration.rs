use axum::{Json, extract::State, http::StatusCode};
use serde::Deserialize;

use roster_domain::user::RawEnumValue;

use crate::error::AccountsServiceError;
use crate::handlers::response::UserWithCompanyResponse;
use crate::state::AppState;
use crate::usecase::registration::{RegisterInput, RegisterUseCase};

// ── POST /users ──────────────────────────────────────────────────────────────

#[derive(Deserialize, Default)]
pub struct CompanyParams {
    pub name: Option<String>,
}

#[derive(Deserialize)]
pub struct RegisterRequest {
    pub email: Option<String>,
    pub name: Option<String>,
    pub age: Option<i32>,
    pub gender: Option<RawEnumValue>,
    pub password: Option<String>,
    pub password_confirmation: Option<String>,
    #[serde(default)]
    pub company: CompanyParams,
}

pub async fn register(
    State(state): State<AppState>,
    Json(body): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<UserWithCompanyResponse>), AccountsServiceError> {
    let usecase = RegisterUseCase {
        companies: state.company_repo(),
        users: state.user_repo(),
        hasher: state.password_hasher(),
    };
    let out = usecase
        .execute(RegisterInput {
            email: body.email,
            name: body.name,
            age: body.age,
            gender: body.gender,
            password: body.password,
            password_confirmation: body.password_confirmation,
            company_name: body.company.name,
        })
        .await?;
    Ok((
        StatusCode::CREATED,
        Json(UserWithCompanyResponse {
            user: out.user.into(),
            company: out.company.into(),
        }),
    ))
}
