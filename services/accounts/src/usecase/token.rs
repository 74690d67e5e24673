use rand::RngExt;
use serde_json::json;
use uuid::Uuid;

use crate::domain::types::{ACCOUNT_TOKEN_LEN, OutboxEvent, User};

/// URL-safe alphabet for confirmation and reset tokens.
const CHARSET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789-_";

/// Random token for confirmation or password-reset links.
pub fn generate_token() -> String {
    let mut rng = rand::rng();
    (0..ACCOUNT_TOKEN_LEN)
        .map(|_| CHARSET[rng.random_range(0..CHARSET.len())] as char)
        .collect()
}

/// Outbox event asking the mailer to send `kind` to `user` with `token`.
///
/// The idempotency key includes the token, so a resend produces a new event.
pub(crate) fn mail_event(kind: &str, user: &User, token: &str) -> OutboxEvent {
    OutboxEvent {
        id: Uuid::now_v7(),
        user_id: user.id,
        kind: kind.to_owned(),
        payload: json!({
            "user_id": user.id.to_string(),
            "email": user.email,
            "name": user.name,
            "token": token,
        }),
        idempotency_key: format!("{kind}:{}:{token}", user.id),
    }
}
