use axum::extract::State;
use axum::http::{HeaderValue, StatusCode, header};
use axum::response::{IntoResponse, Response};

use roster_domain::allocator::AllocationError;
use roster_domain::messages::MessageCatalog;
use roster_domain::validation::Violations;

/// Accounts service error variants.
#[derive(Debug, thiserror::Error)]
pub enum AccountsServiceError {
    #[error("validation failed")]
    Validation(Violations),
    #[error("could not allocate a company id")]
    IdAllocationExhausted,
    #[error("invalid email or password")]
    InvalidCredentials,
    #[error("account is not confirmed")]
    Unconfirmed,
    #[error("invalid confirmation token")]
    InvalidConfirmationToken,
    #[error("account is already confirmed")]
    AlreadyConfirmed,
    #[error("invalid reset password token")]
    InvalidResetToken,
    #[error("user not found")]
    UserNotFound,
    #[error("admin not found")]
    AdminNotFound,
    #[error("internal error")]
    Internal(#[from] anyhow::Error),
}

impl AccountsServiceError {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Validation(_) => "VALIDATION_FAILED",
            Self::IdAllocationExhausted => "ID_ALLOCATION_EXHAUSTED",
            Self::InvalidCredentials => "INVALID_CREDENTIALS",
            Self::Unconfirmed => "UNCONFIRMED",
            Self::InvalidConfirmationToken => "INVALID_CONFIRMATION_TOKEN",
            Self::AlreadyConfirmed => "ALREADY_CONFIRMED",
            Self::InvalidResetToken => "INVALID_RESET_TOKEN",
            Self::UserNotFound => "USER_NOT_FOUND",
            Self::AdminNotFound => "ADMIN_NOT_FOUND",
            Self::Internal(_) => "INTERNAL",
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            Self::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            Self::IdAllocationExhausted => StatusCode::SERVICE_UNAVAILABLE,
            Self::InvalidCredentials => StatusCode::UNAUTHORIZED,
            Self::Unconfirmed => StatusCode::FORBIDDEN,
            Self::InvalidConfirmationToken | Self::InvalidResetToken => StatusCode::BAD_REQUEST,
            Self::AlreadyConfirmed => StatusCode::CONFLICT,
            Self::UserNotFound | Self::AdminNotFound => StatusCode::NOT_FOUND,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<Violations> for AccountsServiceError {
    fn from(violations: Violations) -> Self {
        Self::Validation(violations)
    }
}

impl From<AllocationError<AccountsServiceError>> for AccountsServiceError {
    fn from(err: AllocationError<AccountsServiceError>) -> Self {
        match err {
            AllocationError::Exhausted { .. } => Self::IdAllocationExhausted,
            AllocationError::Oracle(inner) => inner,
        }
    }
}

fn validation_response(violations: &Violations, catalog: &MessageCatalog) -> Response {
    let body = serde_json::json!({
        "kind": "VALIDATION_FAILED",
        "message": "validation failed",
        "errors": violations.render(catalog),
    });
    let mut resp = (StatusCode::UNPROCESSABLE_ENTITY, axum::Json(body)).into_response();
    resp.extensions_mut().insert(violations.clone());
    resp
}

impl IntoResponse for AccountsServiceError {
    fn into_response(self) -> Response {
        // Rendered with the default catalog here; `localize_violations` swaps in the
        // configured locale.
        if let Self::Validation(ref violations) = self {
            return validation_response(violations, &MessageCatalog::default());
        }

        let status = self.status();
        match &self {
            Self::Internal(e) => {
                tracing::error!(error = %e, kind = "INTERNAL", "internal error");
            }
            Self::IdAllocationExhausted => {
                tracing::error!(kind = self.kind(), "company id allocation exhausted");
            }
            _ => {}
        }
        let body = serde_json::json!({
            "kind": self.kind(),
            "message": self.to_string(),
        });
        let mut resp = (status, axum::Json(body)).into_response();
        if status == StatusCode::SERVICE_UNAVAILABLE {
            resp.headers_mut()
                .insert(header::RETRY_AFTER, HeaderValue::from_static("1"));
        }
        resp
    }
}

/// Response mapper that re-renders validation errors with the configured catalog.
pub async fn localize_violations(
    State(catalog): State<MessageCatalog>,
    mut response: Response,
) -> Response {
    match response.extensions_mut().remove::<Violations>() {
        Some(violations) => validation_response(&violations, &catalog),
        None => response,
    }
}
