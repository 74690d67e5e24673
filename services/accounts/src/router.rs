use axum::{
    Router,
    middleware::map_response_with_state,
    routing::{delete, get, post},
};

use roster_core::health::healthz;
use roster_core::middleware::{propagate_request_id_layer, request_id_layer, trace_layer};

use crate::error::localize_violations;
use crate::handlers::{
    admin::{admin_sign_in, admin_sign_out, get_admin_me},
    confirmation::{confirm, resend_confirmation},
    health::readyz,
    password::{request_password_reset, reset_password},
    profile::{dashboard, delete_profile, get_profile, update_profile},
    registration::register,
    session::{sign_in, sign_out},
};
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        // Health
        .route("/healthz", get(healthz))
        .route("/readyz", get(readyz))
        // Registration
        .route("/users", post(register))
        // Confirmation
        .route("/users/confirmation", get(confirm).post(resend_confirmation))
        // User session
        .route("/users/sign_in", post(sign_in))
        .route("/users/sign_out", delete(sign_out))
        // Password recovery
        .route(
            "/users/password",
            post(request_password_reset).put(reset_password),
        )
        // Profile
        .route(
            "/users/profile",
            get(get_profile).patch(update_profile).delete(delete_profile),
        )
        .route("/users/dash_boards", get(dashboard))
        // Admin
        .route("/admins/sign_in", post(admin_sign_in))
        .route("/admins/sign_out", delete(admin_sign_out))
        .route("/admin_user/me", get(get_admin_me))
        .layer(map_response_with_state(state.catalog, localize_violations))
        .layer(propagate_request_id_layer())
        .layer(trace_layer())
        .layer(request_id_layer())
        .with_state(state)
}
