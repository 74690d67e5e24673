use uuid::Uuid;

use roster_accounts::domain::repository::DUMMY_PASSWORD_HASH;
use roster_accounts::error::AccountsServiceError;
use roster_accounts::usecase::admin::{
    AdminSignInInput, AdminSignInUseCase, CreateAdminInput, CreateAdminUseCase, GetAdminUseCase,
};
use roster_auth_types::session::SessionSecret;
use roster_auth_types::token::{Principal, validate_session_token};
use roster_domain::id::AdminId;
use roster_domain::validation::{Field, ViolationKind};
use roster_testing::factory::VALID_PASSWORD;
use roster_testing::session::TEST_SESSION_SECRET;

use crate::helpers::{MockAdminRepo, PlainHasher, RecordingHasher, test_admin};

#[tokio::test]
async fn should_create_admin_with_hashed_password() {
    let admins = MockAdminRepo::empty();
    let handle = admins.admins_handle();
    let uc = CreateAdminUseCase {
        admins,
        hasher: PlainHasher,
    };

    let admin = uc
        .execute(CreateAdminInput {
            email: " Ops@Example.com ".to_owned(),
            password: VALID_PASSWORD.to_owned(),
            password_confirmation: None,
        })
        .await
        .unwrap();

    assert_eq!(admin.email, "ops@example.com");
    assert_eq!(admin.encrypted_password, format!("plain:{VALID_PASSWORD}"));
    assert_eq!(handle.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn should_reject_duplicate_admin_email() {
    let uc = CreateAdminUseCase {
        admins: MockAdminRepo::new(vec![test_admin("ops@example.com", VALID_PASSWORD)]),
        hasher: PlainHasher,
    };

    let result = uc
        .execute(CreateAdminInput {
            email: "ops@example.com".to_owned(),
            password: "weak".to_owned(),
            password_confirmation: None,
        })
        .await;

    let Err(AccountsServiceError::Validation(v)) = result else {
        panic!("expected Validation error");
    };
    assert!(v.contains(Field::Email, ViolationKind::Taken));
    assert!(v.contains(Field::Password, ViolationKind::TooShort { min: 12 }));
}

#[tokio::test]
async fn should_issue_admin_session() {
    let admin = test_admin("ops@example.com", VALID_PASSWORD);
    let uc = AdminSignInUseCase {
        admins: MockAdminRepo::new(vec![admin.clone()]),
        hasher: PlainHasher,
        secret: SessionSecret::new(TEST_SESSION_SECRET),
    };

    let out = uc
        .execute(AdminSignInInput {
            email: "OPS@example.com".to_owned(),
            password: VALID_PASSWORD.to_owned(),
        })
        .await
        .unwrap();

    let info = validate_session_token(&out.session.token, TEST_SESSION_SECRET).unwrap();
    assert_eq!(info.principal, Principal::Admin);
    assert_eq!(info.subject, admin.id.0);
}

#[tokio::test]
async fn should_reject_admin_with_wrong_password() {
    let uc = AdminSignInUseCase {
        admins: MockAdminRepo::new(vec![test_admin("ops@example.com", VALID_PASSWORD)]),
        hasher: PlainHasher,
        secret: SessionSecret::new(TEST_SESSION_SECRET),
    };

    let result = uc
        .execute(AdminSignInInput {
            email: "ops@example.com".to_owned(),
            password: "bbbbBBBB2222".to_owned(),
        })
        .await;
    assert!(matches!(result, Err(AccountsServiceError::InvalidCredentials)));
}

#[tokio::test]
async fn should_run_password_check_for_unknown_admin_email() {
    let hasher = RecordingHasher::default();
    let verified = hasher.verified_handle();
    let uc = AdminSignInUseCase {
        admins: MockAdminRepo::empty(),
        hasher,
        secret: SessionSecret::new(TEST_SESSION_SECRET),
    };

    let result = uc
        .execute(AdminSignInInput {
            email: "ghost@example.com".to_owned(),
            password: VALID_PASSWORD.to_owned(),
        })
        .await;
    assert!(matches!(result, Err(AccountsServiceError::InvalidCredentials)));
    assert_eq!(*verified.lock().unwrap(), vec![DUMMY_PASSWORD_HASH.to_owned()]);
}

#[tokio::test]
async fn should_get_admin_or_not_found() {
    let admin = test_admin("ops@example.com", VALID_PASSWORD);
    let uc = GetAdminUseCase {
        admins: MockAdminRepo::new(vec![admin.clone()]),
    };

    assert_eq!(uc.execute(admin.id).await.unwrap().email, "ops@example.com");
    assert!(matches!(
        uc.execute(AdminId(Uuid::now_v7())).await,
        Err(AccountsServiceError::AdminNotFound)
    ));
}
