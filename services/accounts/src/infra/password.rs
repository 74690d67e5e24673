use anyhow::anyhow;
use argon2::Argon2;
use argon2::password_hash::{
    self, PasswordHash, PasswordHasher as _, PasswordVerifier as _, SaltString,
};
use rand::RngExt;

use crate::domain::repository::PasswordHasher;
use crate::error::AccountsServiceError;

/// Argon2id with the crate's default parameters, stored as a PHC string.
#[derive(Clone, Default)]
pub struct Argon2PasswordHasher;

impl PasswordHasher for Argon2PasswordHasher {
    fn hash(&self, password: &str) -> Result<String, AccountsServiceError> {
        let mut rng = rand::rng();
        let salt_bytes: [u8; password_hash::Salt::RECOMMENDED_LENGTH] = rng.random();
        let salt = SaltString::encode_b64(&salt_bytes).map_err(|e| anyhow!("encode salt: {e}"))?;
        let hash = Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .map_err(|e| anyhow!("hash password: {e}"))?;
        Ok(hash.to_string())
    }

    fn verify(&self, password: &str, encrypted: &str) -> Result<bool, AccountsServiceError> {
        let parsed =
            PasswordHash::new(encrypted).map_err(|e| anyhow!("parse stored password hash: {e}"))?;
        match Argon2::default().verify_password(password.as_bytes(), &parsed) {
            Ok(()) => Ok(true),
            Err(password_hash::Error::Password) => Ok(false),
            Err(e) => Err(anyhow!("verify password: {e}").into()),
        }
    }
}
