use chrono::{Duration, Utc};

use roster_accounts::domain::types::RESET_PASSWORD_INSTRUCTIONS;
use roster_accounts::error::AccountsServiceError;
use roster_accounts::usecase::password::{
    RequestPasswordResetUseCase, ResetPasswordInput, ResetPasswordUseCase,
};
use roster_domain::validation::{Field, ViolationKind};
use roster_testing::factory::UserFixture;

use crate::helpers::{MockUserRepo, PlainHasher, test_user};

const NEW_PASSWORD: &str = "bbbbBBBB2222";

fn reset(users: MockUserRepo) -> ResetPasswordUseCase<MockUserRepo, PlainHasher> {
    ResetPasswordUseCase {
        users,
        hasher: PlainHasher,
        ttl: Duration::hours(6),
    }
}

fn with_reset_token(fixture: &UserFixture, token: &str, sent_ago: Duration) -> MockUserRepo {
    let mut user = test_user(fixture);
    user.reset_password_token = Some(token.to_owned());
    user.reset_password_sent_at = Some(Utc::now() - sent_ago);
    MockUserRepo::new(vec![user])
}

fn reset_input(token: &str, password: Option<&str>) -> ResetPasswordInput {
    ResetPasswordInput {
        reset_password_token: token.to_owned(),
        password: password.map(str::to_owned),
        password_confirmation: password.map(str::to_owned),
    }
}

#[tokio::test]
async fn should_store_reset_token_and_queue_mail() {
    let fixture = UserFixture::build();
    let users = MockUserRepo::new(vec![test_user(&fixture)]);
    let users_handle = users.users_handle();
    let events_handle = users.events_handle();

    RequestPasswordResetUseCase { users }
        .execute(&fixture.email.to_uppercase())
        .await
        .unwrap();

    let stored = users_handle.lock().unwrap()[0].clone();
    let token = stored.reset_password_token.unwrap();
    assert!(stored.reset_password_sent_at.is_some());

    let events = events_handle.lock().unwrap();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].kind, RESET_PASSWORD_INSTRUCTIONS);
    assert_eq!(events[0].payload["token"], token.as_str());
}

#[tokio::test]
async fn should_return_not_found_for_unknown_email() {
    let result = RequestPasswordResetUseCase {
        users: MockUserRepo::empty(),
    }
    .execute("nobody@example.com")
    .await;
    assert!(matches!(result, Err(AccountsServiceError::UserNotFound)));
}

#[tokio::test]
async fn should_reset_password_with_valid_token() {
    let fixture = UserFixture::build();
    let users = with_reset_token(&fixture, "reset-tok", Duration::hours(1));
    let handle = users.users_handle();

    reset(users)
        .execute(reset_input("reset-tok", Some(NEW_PASSWORD)))
        .await
        .unwrap();

    let stored = handle.lock().unwrap()[0].clone();
    assert_eq!(stored.encrypted_password, format!("plain:{NEW_PASSWORD}"));
    assert!(stored.reset_password_token.is_none(), "token is single-use");
    assert!(stored.reset_password_sent_at.is_none());
}

#[tokio::test]
async fn should_reject_expired_reset_token() {
    let fixture = UserFixture::build();
    let users = with_reset_token(&fixture, "reset-tok", Duration::hours(7));
    let handle = users.users_handle();

    let result = reset(users)
        .execute(reset_input("reset-tok", Some(NEW_PASSWORD)))
        .await;
    assert!(matches!(result, Err(AccountsServiceError::InvalidResetToken)));
    assert_eq!(
        handle.lock().unwrap()[0].encrypted_password,
        format!("plain:{}", fixture.password)
    );
}

#[tokio::test]
async fn should_reject_unknown_or_empty_reset_token() {
    let fixture = UserFixture::build();
    let uc = reset(with_reset_token(&fixture, "reset-tok", Duration::hours(1)));

    assert!(matches!(
        uc.execute(reset_input("other", Some(NEW_PASSWORD))).await,
        Err(AccountsServiceError::InvalidResetToken)
    ));
    assert!(matches!(
        uc.execute(reset_input("", Some(NEW_PASSWORD))).await,
        Err(AccountsServiceError::InvalidResetToken)
    ));
}

#[tokio::test]
async fn should_validate_new_password() {
    let fixture = UserFixture::build();
    let uc = reset(with_reset_token(&fixture, "reset-tok", Duration::hours(1)));

    let Err(AccountsServiceError::Validation(missing)) =
        uc.execute(reset_input("reset-tok", None)).await
    else {
        panic!("expected Validation error for missing password");
    };
    assert!(missing.contains(Field::Password, ViolationKind::Required));

    let Err(AccountsServiceError::Validation(weak)) =
        uc.execute(reset_input("reset-tok", Some("alllowercase1"))).await
    else {
        panic!("expected Validation error for weak password");
    };
    assert!(weak.contains(Field::Password, ViolationKind::PasswordComplexity));

    let mismatched = ResetPasswordInput {
        reset_password_token: "reset-tok".to_owned(),
        password: Some(NEW_PASSWORD.to_owned()),
        password_confirmation: Some("ccccCCCC3333".to_owned()),
    };
    let Err(AccountsServiceError::Validation(v)) = uc.execute(mismatched).await else {
        panic!("expected Validation error for mismatched confirmation");
    };
    assert!(v.contains(Field::PasswordConfirmation, ViolationKind::Confirmation));
}
