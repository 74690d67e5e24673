//! Sequenced factories for valid user data.

use std::sync::atomic::{AtomicUsize, Ordering};

use roster_domain::user::Gender;
use roster_domain::validation::UserCandidate;

/// A password that satisfies every password rule.
pub const VALID_PASSWORD: &str = "aaaaAAAA1111";

static SEQUENCE: AtomicUsize = AtomicUsize::new(1);

/// Next value of the process-wide factory sequence.
pub fn next_sequence() -> usize {
    SEQUENCE.fetch_add(1, Ordering::Relaxed)
}

/// Attributes of a valid, unsaved user.
#[derive(Debug, Clone)]
pub struct UserFixture {
    pub email: String,
    pub name: String,
    pub age: i32,
    pub gender: Gender,
    pub password: String,
}

impl UserFixture {
    /// Unique fixture: `NAME{n}`, `TEST{n}@example.com`, age 20, female.
    pub fn build() -> Self {
        Self::numbered(next_sequence())
    }

    pub fn numbered(n: usize) -> Self {
        Self {
            email: format!("TEST{n}@example.com"),
            name: format!("NAME{n}"),
            age: 20,
            gender: Gender::Female,
            password: VALID_PASSWORD.to_owned(),
        }
    }

    /// Candidate for a new user with matching password confirmation.
    pub fn candidate(&self) -> UserCandidate {
        UserCandidate {
            existing_id: None,
            email: Some(self.email.clone()),
            name: Some(self.name.clone()),
            age: Some(self.age),
            password: Some(self.password.clone()),
            password_confirmation: Some(self.password.clone()),
        }
    }
}
