use chrono::Duration;

use roster_accounts::domain::types::CONFIRMATION_INSTRUCTIONS;
use roster_accounts::error::AccountsServiceError;
use roster_accounts::usecase::confirmation::{ConfirmUseCase, ResendConfirmationUseCase};
use roster_testing::factory::UserFixture;

use crate::helpers::{MockUserRepo, test_user, unconfirmed_user};

const TTL_HOURS: i64 = 72;

fn confirm(users: MockUserRepo) -> ConfirmUseCase<MockUserRepo> {
    ConfirmUseCase {
        users,
        ttl: Duration::hours(TTL_HOURS),
    }
}

#[tokio::test]
async fn should_confirm_with_valid_token() {
    let fixture = UserFixture::build();
    let user = unconfirmed_user(&fixture, "tok-valid", Duration::hours(1));
    let users = MockUserRepo::new(vec![user.clone()]);
    let handle = users.users_handle();

    let confirmed = confirm(users).execute("tok-valid").await.unwrap();
    assert_eq!(confirmed.id, user.id);
    assert!(confirmed.is_confirmed());

    let stored = handle.lock().unwrap()[0].clone();
    assert!(stored.confirmed_at.is_some());
}

#[tokio::test]
async fn should_report_already_confirmed_when_link_is_reused() {
    let fixture = UserFixture::build();
    let user = unconfirmed_user(&fixture, "tok-reused", Duration::hours(1));
    let uc = confirm(MockUserRepo::new(vec![user]));

    uc.execute("tok-reused").await.unwrap();
    let result = uc.execute("tok-reused").await;
    assert!(
        matches!(result, Err(AccountsServiceError::AlreadyConfirmed)),
        "expected AlreadyConfirmed"
    );
}

#[tokio::test]
async fn should_reject_unknown_or_empty_token() {
    let fixture = UserFixture::build();
    let users = MockUserRepo::new(vec![unconfirmed_user(&fixture, "tok", Duration::hours(1))]);
    let uc = confirm(users);

    assert!(matches!(
        uc.execute("other").await,
        Err(AccountsServiceError::InvalidConfirmationToken)
    ));
    assert!(matches!(
        uc.execute("").await,
        Err(AccountsServiceError::InvalidConfirmationToken)
    ));
}

#[tokio::test]
async fn should_reject_expired_token() {
    let fixture = UserFixture::build();
    let user = unconfirmed_user(&fixture, "tok-old", Duration::hours(TTL_HOURS + 1));
    let users = MockUserRepo::new(vec![user]);
    let handle = users.users_handle();

    let result = confirm(users).execute("tok-old").await;
    assert!(matches!(
        result,
        Err(AccountsServiceError::InvalidConfirmationToken)
    ));
    assert!(handle.lock().unwrap()[0].confirmed_at.is_none());
}

#[tokio::test]
async fn should_resend_with_fresh_token() {
    let fixture = UserFixture::build();
    let user = unconfirmed_user(&fixture, "tok-first", Duration::hours(80));
    let users = MockUserRepo::new(vec![user]);
    let users_handle = users.users_handle();
    let events_handle = users.events_handle();

    ResendConfirmationUseCase { users }
        .execute(&fixture.email)
        .await
        .unwrap();

    let stored = users_handle.lock().unwrap()[0].clone();
    let token = stored.confirmation_token.clone().unwrap();
    assert_ne!(token, "tok-first");

    let events = events_handle.lock().unwrap();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].kind, CONFIRMATION_INSTRUCTIONS);
    assert_eq!(events[0].payload["token"], token.as_str());

    // The new token is inside its validity window again.
    drop(events);
    let users = MockUserRepo::new(vec![stored]);
    assert!(confirm(users).execute(&token).await.is_ok());
}

#[tokio::test]
async fn should_not_resend_to_confirmed_user() {
    let fixture = UserFixture::build();
    let users = MockUserRepo::new(vec![test_user(&fixture)]);
    let events_handle = users.events_handle();

    let result = ResendConfirmationUseCase { users }
        .execute(&fixture.email)
        .await;
    assert!(matches!(result, Err(AccountsServiceError::AlreadyConfirmed)));
    assert!(events_handle.lock().unwrap().is_empty());
}

#[tokio::test]
async fn should_return_not_found_when_resending_to_unknown_email() {
    let result = ResendConfirmationUseCase {
        users: MockUserRepo::empty(),
    }
    .execute("nobody@example.com")
    .await;
    assert!(matches!(result, Err(AccountsServiceError::UserNotFound)));
}
