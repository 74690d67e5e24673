use axum::response::IntoResponse;
use http::StatusCode;

use roster_accounts::domain::types::CONFIRMATION_INSTRUCTIONS;
use roster_accounts::error::AccountsServiceError;
use roster_accounts::usecase::registration::{RegisterInput, RegisterUseCase};
use roster_domain::user::{Gender, RawEnumValue, UserRole};
use roster_domain::validation::{Field, ViolationKind};
use roster_testing::factory::UserFixture;

use crate::helpers::{MockCompanyRepo, MockUserRepo, PlainHasher, test_user};

fn input(fixture: &UserFixture) -> RegisterInput {
    RegisterInput {
        email: Some(fixture.email.clone()),
        name: Some(fixture.name.clone()),
        age: Some(fixture.age),
        gender: Some(RawEnumValue::Name("female".to_owned())),
        password: Some(fixture.password.clone()),
        password_confirmation: Some(fixture.password.clone()),
        company_name: Some("Acme".to_owned()),
    }
}

fn usecase(users: MockUserRepo) -> RegisterUseCase<MockCompanyRepo, MockUserRepo, PlainHasher> {
    RegisterUseCase {
        companies: MockCompanyRepo::new(users.companies_handle()),
        users,
        hasher: PlainHasher,
    }
}

#[tokio::test]
async fn should_register_user_with_new_company() {
    let fixture = UserFixture::build();
    let users = MockUserRepo::empty();
    let users_handle = users.users_handle();
    let events_handle = users.events_handle();
    let companies_handle = users.companies_handle();

    let out = usecase(users).execute(input(&fixture)).await.unwrap();

    assert_eq!(out.user.email, fixture.email.to_lowercase());
    assert_eq!(out.user.company_id, out.company.id);
    assert_eq!(out.user.gender, Some(Gender::Female));
    assert_eq!(out.user.role, UserRole::Another);
    assert_eq!(out.user.encrypted_password, format!("plain:{}", fixture.password));
    assert!(!out.user.is_confirmed());
    assert!(!out.company.id.as_str().is_empty());
    assert_eq!(out.company.name.as_deref(), Some("Acme"));

    assert_eq!(users_handle.lock().unwrap().len(), 1);
    assert_eq!(companies_handle.lock().unwrap().len(), 1);

    let events = events_handle.lock().unwrap();
    assert_eq!(events.len(), 1, "expected one confirmation mail event");
    let token = out.user.confirmation_token.as_deref().unwrap();
    assert_eq!(events[0].kind, CONFIRMATION_INSTRUCTIONS);
    assert_eq!(events[0].user_id, out.user.id);
    assert_eq!(events[0].payload["token"], token);
    assert_eq!(events[0].payload["email"], out.user.email);
}

#[tokio::test]
async fn should_accept_gender_code() {
    let fixture = UserFixture::build();
    let mut input = input(&fixture);
    input.gender = Some(RawEnumValue::Code(0));

    let out = usecase(MockUserRepo::empty()).execute(input).await.unwrap();
    assert_eq!(out.user.gender, Some(Gender::Male));
}

#[tokio::test]
async fn should_reject_unknown_gender() {
    let fixture = UserFixture::build();
    let mut input = input(&fixture);
    input.gender = Some(RawEnumValue::Code(7));

    let result = usecase(MockUserRepo::empty()).execute(input).await;
    match result {
        Err(AccountsServiceError::Validation(v)) => {
            assert!(v.contains(Field::Gender, ViolationKind::Inclusion));
        }
        other => panic!("expected Validation, got {:?}", other.map(|o| o.user.id)),
    }
}

#[tokio::test]
async fn should_reject_email_taken_in_any_case() {
    let fixture = UserFixture::build();
    let existing = test_user(&fixture);
    let users = MockUserRepo::new(vec![existing]);
    let users_handle = users.users_handle();

    let mut input = input(&fixture);
    input.email = Some(format!("  {}  ", fixture.email.to_uppercase()));

    let result = usecase(users).execute(input).await;
    match result {
        Err(AccountsServiceError::Validation(v)) => {
            assert!(v.contains(Field::Email, ViolationKind::Taken));
        }
        other => panic!("expected Validation, got {:?}", other.map(|o| o.user.id)),
    }
    assert_eq!(users_handle.lock().unwrap().len(), 1, "nothing should be stored");
}

#[tokio::test]
async fn should_report_raced_unique_violation_as_taken_field() {
    let fixture = UserFixture::build();
    let users = MockUserRepo::conflicting_on(Field::Email);
    let users_handle = users.users_handle();

    let err = match usecase(users).execute(input(&fixture)).await {
        Err(err) => err,
        Ok(out) => panic!("expected Validation, got user {}", out.user.id),
    };
    match &err {
        AccountsServiceError::Validation(v) => {
            assert!(v.contains(Field::Email, ViolationKind::Taken));
        }
        other => panic!("expected Validation, got {other:?}"),
    }
    assert_eq!(err.into_response().status(), StatusCode::UNPROCESSABLE_ENTITY);
    assert!(users_handle.lock().unwrap().is_empty());
}

#[tokio::test]
async fn should_collect_every_violation_at_once() {
    let input = RegisterInput {
        email: Some("not-an-email".to_owned()),
        name: Some("a name that is too long".to_owned()),
        age: Some(9),
        gender: None,
        password: Some("short".to_owned()),
        password_confirmation: Some("different".to_owned()),
        company_name: None,
    };

    let result = usecase(MockUserRepo::empty()).execute(input).await;
    let Err(AccountsServiceError::Validation(v)) = result else {
        panic!("expected Validation error");
    };
    assert!(v.contains(Field::Email, ViolationKind::InvalidFormat));
    assert!(v.contains(Field::Name, ViolationKind::TooLong { max: 10 }));
    assert!(v.contains(Field::Age, ViolationKind::GreaterThanOrEqualTo { count: 10 }));
    assert!(v.contains(Field::Password, ViolationKind::TooShort { min: 12 }));
    assert!(v.contains(Field::Password, ViolationKind::PasswordComplexity));
    assert!(v.contains(Field::PasswordConfirmation, ViolationKind::Confirmation));
}

#[tokio::test]
async fn should_require_fields() {
    let input = RegisterInput {
        email: None,
        name: None,
        age: None,
        gender: None,
        password: None,
        password_confirmation: None,
        company_name: None,
    };

    let result = usecase(MockUserRepo::empty()).execute(input).await;
    let Err(AccountsServiceError::Validation(v)) = result else {
        panic!("expected Validation error");
    };
    assert!(v.contains(Field::Email, ViolationKind::Required));
    assert!(v.contains(Field::Name, ViolationKind::Required));
    assert!(v.contains(Field::Password, ViolationKind::Required));
    assert!(!v.has_field(Field::Age), "age is optional");
}

#[tokio::test]
async fn should_fail_retryably_when_no_company_id_is_free() {
    let fixture = UserFixture::build();
    let users = MockUserRepo::empty();
    let users_handle = users.users_handle();
    let uc = RegisterUseCase {
        companies: MockCompanyRepo::saturated(),
        users,
        hasher: PlainHasher,
    };

    let result = uc.execute(input(&fixture)).await;
    assert!(
        matches!(result, Err(AccountsServiceError::IdAllocationExhausted)),
        "expected IdAllocationExhausted"
    );
    assert!(users_handle.lock().unwrap().is_empty());
}
