use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use axum_extra::extract::CookieJar;
use serde::Deserialize;

use roster_auth_types::cookie::{clear_session_cookie, set_session_cookie};
use roster_auth_types::token::Principal;

use crate::error::AccountsServiceError;
use crate::handlers::response::UserResponse;
use crate::state::AppState;
use crate::usecase::session::{SignInInput, SignInUseCase};

// ── POST /users/sign_in ──────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct SignInRequest {
    pub email: String,
    pub password: String,
}

pub async fn sign_in(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(body): Json<SignInRequest>,
) -> Result<impl IntoResponse, AccountsServiceError> {
    let usecase = SignInUseCase {
        users: state.user_repo(),
        hasher: state.password_hasher(),
        secret: state.session_secret.clone(),
    };
    let out = usecase
        .execute(SignInInput {
            email: body.email,
            password: body.password,
        })
        .await?;

    let jar = set_session_cookie(
        jar,
        Principal::User,
        out.session.token,
        state.cookie_domain.clone(),
    );
    Ok((StatusCode::CREATED, jar, Json(UserResponse::from(out.user))))
}

// ── DELETE /users/sign_out ───────────────────────────────────────────────────

pub async fn sign_out(State(state): State<AppState>, jar: CookieJar) -> impl IntoResponse {
    let jar = clear_session_cookie(jar, Principal::User, state.cookie_domain.clone());
    (StatusCode::NO_CONTENT, jar)
}
