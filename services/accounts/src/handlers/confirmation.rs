use axum::{
    Json,
    extract::{Query, State},
    http::StatusCode,
};
use serde::Deserialize;

use crate::error::AccountsServiceError;
use crate::handlers::response::UserResponse;
use crate::state::AppState;
use crate::usecase::confirmation::{ConfirmUseCase, ResendConfirmationUseCase};

// ── GET /users/confirmation ──────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct ConfirmQuery {
    #[serde(default)]
    pub confirmation_token: String,
}

pub async fn confirm(
    State(state): State<AppState>,
    Query(query): Query<ConfirmQuery>,
) -> Result<Json<UserResponse>, AccountsServiceError> {
    let usecase = ConfirmUseCase {
        users: state.user_repo(),
        ttl: state.confirmation_ttl,
    };
    let user = usecase.execute(&query.confirmation_token).await?;
    Ok(Json(user.into()))
}

// ── POST /users/confirmation ─────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct ResendConfirmationRequest {
    pub email: String,
}

pub async fn resend_confirmation(
    State(state): State<AppState>,
    Json(body): Json<ResendConfirmationRequest>,
) -> Result<StatusCode, AccountsServiceError> {
    let usecase = ResendConfirmationUseCase {
        users: state.user_repo(),
    };
    usecase.execute(&body.email).await?;
    Ok(StatusCode::ACCEPTED)
}
