use axum::{Json, extract::State, http::StatusCode};
use serde::Deserialize;

use crate::error::AccountsServiceError;
use crate::state::AppState;
use crate::usecase::password::{
    RequestPasswordResetUseCase, ResetPasswordInput, ResetPasswordUseCase,
};

// ── POST /users/password ─────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct RequestPasswordResetRequest {
    pub email: String,
}

pub async fn request_password_reset(
    State(state): State<AppState>,
    Json(body): Json<RequestPasswordResetRequest>,
) -> Result<StatusCode, AccountsServiceError> {
    let usecase = RequestPasswordResetUseCase {
        users: state.user_repo(),
    };
    usecase.execute(&body.email).await?;
    Ok(StatusCode::ACCEPTED)
}

// ── PUT /users/password ──────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct ResetPasswordRequest {
    #[serde(default)]
    pub reset_password_token: String,
    pub password: Option<String>,
    pub password_confirmation: Option<String>,
}

pub async fn reset_password(
    State(state): State<AppState>,
    Json(body): Json<ResetPasswordRequest>,
) -> Result<StatusCode, AccountsServiceError> {
    let usecase = ResetPasswordUseCase {
        users: state.user_repo(),
        hasher: state.password_hasher(),
        ttl: state.reset_password_ttl,
    };
    usecase
        .execute(ResetPasswordInput {
            reset_password_token: body.reset_password_token,
            password: body.password,
            password_confirmation: body.password_confirmation,
        })
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
