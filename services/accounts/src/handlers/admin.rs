use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use axum_extra::extract::CookieJar;
use serde::Deserialize;

use roster_auth_types::cookie::{clear_session_cookie, set_session_cookie};
use roster_auth_types::session::AdminSession;
use roster_auth_types::token::Principal;

use crate::error::AccountsServiceError;
use crate::handlers::response::AdminResponse;
use crate::state::AppState;
use crate::usecase::admin::{AdminSignInInput, AdminSignInUseCase, GetAdminUseCase};

// ── POST /admins/sign_in ─────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct AdminSignInRequest {
    pub email: String,
    pub password: String,
}

pub async fn admin_sign_in(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(body): Json<AdminSignInRequest>,
) -> Result<impl IntoResponse, AccountsServiceError> {
    let usecase = AdminSignInUseCase {
        admins: state.admin_repo(),
        hasher: state.password_hasher(),
        secret: state.session_secret.clone(),
    };
    let out = usecase
        .execute(AdminSignInInput {
            email: body.email,
            password: body.password,
        })
        .await?;

    let jar = set_session_cookie(
        jar,
        Principal::Admin,
        out.session.token,
        state.cookie_domain.clone(),
    );
    Ok((StatusCode::CREATED, jar, Json(AdminResponse::from(out.admin))))
}

// ── DELETE /admins/sign_out ──────────────────────────────────────────────────

pub async fn admin_sign_out(State(state): State<AppState>, jar: CookieJar) -> impl IntoResponse {
    let jar = clear_session_cookie(jar, Principal::Admin, state.cookie_domain.clone());
    (StatusCode::NO_CONTENT, jar)
}

// ── GET /admin_user/me ───────────────────────────────────────────────────────

pub async fn get_admin_me(
    session: AdminSession,
    State(state): State<AppState>,
) -> Result<Json<AdminResponse>, AccountsServiceError> {
    let usecase = GetAdminUseCase {
        admins: state.admin_repo(),
    };
    let admin = usecase.execute(session.admin_id).await?;
    Ok(Json(admin.into()))
}
