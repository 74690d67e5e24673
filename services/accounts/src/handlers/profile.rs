use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use axum_extra::extract::CookieJar;
use serde::Deserialize;

use roster_auth_types::cookie::clear_session_cookie;
use roster_auth_types::session::UserSession;
use roster_auth_types::token::Principal;
use roster_core::serde::nullable;
use roster_domain::user::RawEnumValue;

use crate::error::AccountsServiceError;
use crate::handlers::response::{UserResponse, UserWithCompanyResponse};
use crate::state::AppState;
use crate::usecase::profile::{
    DashboardUseCase, DeleteProfileUseCase, GetProfileUseCase, UpdateProfileInput,
    UpdateProfileUseCase,
};

// ── GET /users/profile ───────────────────────────────────────────────────────

pub async fn get_profile(
    session: UserSession,
    State(state): State<AppState>,
) -> Result<Json<UserResponse>, AccountsServiceError> {
    let usecase = GetProfileUseCase {
        users: state.user_repo(),
    };
    let user = usecase.execute(session.user_id).await?;
    Ok(Json(user.into()))
}

// ── PATCH /users/profile ─────────────────────────────────────────────────────

/// `age` and `gender` may be sent as `null` to clear them.
#[derive(Deserialize)]
pub struct UpdateProfileRequest {
    pub email: Option<String>,
    pub name: Option<String>,
    #[serde(default, deserialize_with = "nullable")]
    pub age: Option<Option<i32>>,
    #[serde(default, deserialize_with = "nullable")]
    pub gender: Option<Option<RawEnumValue>>,
    pub password: Option<String>,
    pub password_confirmation: Option<String>,
}

pub async fn update_profile(
    session: UserSession,
    State(state): State<AppState>,
    Json(body): Json<UpdateProfileRequest>,
) -> Result<Json<UserResponse>, AccountsServiceError> {
    let usecase = UpdateProfileUseCase {
        users: state.user_repo(),
        hasher: state.password_hasher(),
    };
    let user = usecase
        .execute(
            session.user_id,
            UpdateProfileInput {
                email: body.email,
                name: body.name,
                age: body.age,
                gender: body.gender,
                password: body.password,
                password_confirmation: body.password_confirmation,
            },
        )
        .await?;
    Ok(Json(user.into()))
}

// ── DELETE /users/profile ────────────────────────────────────────────────────

pub async fn delete_profile(
    session: UserSession,
    State(state): State<AppState>,
    jar: CookieJar,
) -> Result<impl IntoResponse, AccountsServiceError> {
    let usecase = DeleteProfileUseCase {
        users: state.user_repo(),
    };
    usecase.execute(session.user_id).await?;
    let jar = clear_session_cookie(jar, Principal::User, state.cookie_domain.clone());
    Ok((StatusCode::NO_CONTENT, jar))
}

// ── GET /users/dash_boards ───────────────────────────────────────────────────

pub async fn dashboard(
    session: UserSession,
    State(state): State<AppState>,
) -> Result<Json<UserWithCompanyResponse>, AccountsServiceError> {
    let usecase = DashboardUseCase {
        users: state.user_repo(),
        companies: state.company_repo(),
    };
    let out = usecase.execute(session.user_id).await?;
    Ok(Json(UserWithCompanyResponse {
        user: out.user.into(),
        company: out.company.into(),
    }))
}
