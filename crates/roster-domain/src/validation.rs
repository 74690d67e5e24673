//! Field validation for user records.
//!
//! Each rule is an independent function from a [`UserCandidate`] to the
//! violations it finds. [`validate_user`] runs every rule in [`USER_RULES`] and
//! concatenates the results, so one failing field never hides another.
//! Email uniqueness needs a store lookup and is run separately through an
//! [`EmailOracle`] by [`validate_user_with`].

#![allow(async_fn_in_trait)]

use std::collections::BTreeMap;
use std::sync::OnceLock;

use regex::Regex;

use crate::id::UserId;
use crate::messages::MessageCatalog;

/// Maximum length of a user name, in characters.
pub const NAME_MAX_LEN: usize = 10;
/// Minimum length of a password, in characters.
pub const PASSWORD_MIN_LEN: usize = 12;
/// Smallest accepted age.
pub const AGE_MIN: i32 = 10;

/// A validated field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Field {
    Email,
    Name,
    Age,
    Password,
    PasswordConfirmation,
    Gender,
    Role,
    CompanyId,
}

impl Field {
    /// Key used in field-keyed error maps.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Email => "email",
            Self::Name => "name",
            Self::Age => "age",
            Self::Password => "password",
            Self::PasswordConfirmation => "password_confirmation",
            Self::Gender => "gender",
            Self::Role => "role",
            Self::CompanyId => "company_id",
        }
    }
}

/// What a failed rule complains about.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViolationKind {
    Required,
    InvalidFormat,
    Taken,
    TooLong { max: usize },
    TooShort { min: usize },
    GreaterThanOrEqualTo { count: i32 },
    PasswordComplexity,
    Confirmation,
    Inclusion,
}

/// A failed validation rule on one field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Violation {
    pub field: Field,
    pub kind: ViolationKind,
}

impl Violation {
    pub fn new(field: Field, kind: ViolationKind) -> Self {
        Self { field, kind }
    }
}

/// Ordered collection of violations.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Violations(Vec<Violation>);

impl Violations {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn single(field: Field, kind: ViolationKind) -> Self {
        Self(vec![Violation::new(field, kind)])
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn push(&mut self, violation: Violation) {
        self.0.push(violation);
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Violation> {
        self.0.iter()
    }

    pub fn contains(&self, field: Field, kind: ViolationKind) -> bool {
        self.0.iter().any(|v| v.field == field && v.kind == kind)
    }

    pub fn has_field(&self, field: Field) -> bool {
        self.0.iter().any(|v| v.field == field)
    }

    /// `Ok(())` when empty, otherwise `Err(self)`.
    pub fn into_result(self) -> Result<(), Self> {
        if self.is_empty() { Ok(()) } else { Err(self) }
    }

    /// Render as `field -> [full messages]` using the given catalog.
    pub fn render(&self, catalog: &MessageCatalog) -> BTreeMap<&'static str, Vec<String>> {
        let mut map: BTreeMap<&'static str, Vec<String>> = BTreeMap::new();
        for violation in &self.0 {
            map.entry(violation.field.as_str())
                .or_default()
                .push(catalog.full_message(violation));
        }
        map
    }
}

impl FromIterator<Violation> for Violations {
    fn from_iter<I: IntoIterator<Item = Violation>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl Extend<Violation> for Violations {
    fn extend<I: IntoIterator<Item = Violation>>(&mut self, iter: I) {
        self.0.extend(iter);
    }
}

impl IntoIterator for Violations {
    type Item = Violation;
    type IntoIter = std::vec::IntoIter<Violation>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

/// Field values of a user about to be created or updated.
///
/// `existing_id` is `None` for a new record. `password` is `None` when the
/// password is not being set; that is only a violation for new records.
#[derive(Debug, Clone, Default)]
pub struct UserCandidate {
    pub existing_id: Option<UserId>,
    pub email: Option<String>,
    pub name: Option<String>,
    pub age: Option<i32>,
    pub password: Option<String>,
    pub password_confirmation: Option<String>,
}

impl UserCandidate {
    pub fn is_new(&self) -> bool {
        self.existing_id.is_none()
    }
}

/// A single synchronous validation rule.
pub type Rule = fn(&UserCandidate) -> Vec<Violation>;

/// Every synchronous rule, in evaluation order.
pub const USER_RULES: &[Rule] = &[
    email_required,
    email_format,
    name_required,
    name_length,
    age_range,
    password_required,
    password_length,
    password_format,
    password_confirmation,
];

/// Rules that apply when only the password is being replaced.
pub const PASSWORD_RULES: &[Rule] = &[
    password_required,
    password_length,
    password_format,
    password_confirmation,
];

/// Answers "does a different user already use this email?".
pub trait EmailOracle {
    type Error;

    async fn taken_by_other(
        &self,
        email: &str,
        except: Option<UserId>,
    ) -> Result<bool, Self::Error>;
}

/// Run `rules` against `candidate` and concatenate their violations.
pub fn run_rules(rules: &[Rule], candidate: &UserCandidate) -> Violations {
    rules.iter().flat_map(|rule| rule(candidate)).collect()
}

/// Run every synchronous rule.
pub fn validate_user(candidate: &UserCandidate) -> Violations {
    run_rules(USER_RULES, candidate)
}

/// Run every synchronous rule plus email uniqueness.
pub async fn validate_user_with<O>(
    candidate: &UserCandidate,
    oracle: &O,
) -> Result<Violations, O::Error>
where
    O: EmailOracle,
{
    let mut violations = validate_user(candidate);
    violations.extend(email_uniqueness(candidate, oracle).await?);
    Ok(violations)
}

/// Uniqueness is checked for any non-blank email, whether or not its format is valid.
pub async fn email_uniqueness<O>(
    candidate: &UserCandidate,
    oracle: &O,
) -> Result<Vec<Violation>, O::Error>
where
    O: EmailOracle,
{
    let Some(email) = present(&candidate.email) else {
        return Ok(vec![]);
    };
    if oracle.taken_by_other(email, candidate.existing_id).await? {
        Ok(vec![Violation::new(Field::Email, ViolationKind::Taken)])
    } else {
        Ok(vec![])
    }
}

// ── Rules ────────────────────────────────────────────────────────────────────

pub fn email_required(candidate: &UserCandidate) -> Vec<Violation> {
    required(Field::Email, &candidate.email)
}

pub fn email_format(candidate: &UserCandidate) -> Vec<Violation> {
    match present(&candidate.email) {
        Some(email) if !is_valid_email(email) => {
            vec![Violation::new(Field::Email, ViolationKind::InvalidFormat)]
        }
        _ => vec![],
    }
}

pub fn name_required(candidate: &UserCandidate) -> Vec<Violation> {
    required(Field::Name, &candidate.name)
}

/// Blank names are reported by [`name_required`] only.
pub fn name_length(candidate: &UserCandidate) -> Vec<Violation> {
    match present(&candidate.name) {
        Some(name) if name.chars().count() > NAME_MAX_LEN => vec![Violation::new(
            Field::Name,
            ViolationKind::TooLong { max: NAME_MAX_LEN },
        )],
        _ => vec![],
    }
}

pub fn age_range(candidate: &UserCandidate) -> Vec<Violation> {
    match candidate.age {
        Some(age) if age < AGE_MIN => vec![Violation::new(
            Field::Age,
            ViolationKind::GreaterThanOrEqualTo { count: AGE_MIN },
        )],
        _ => vec![],
    }
}

pub fn password_required(candidate: &UserCandidate) -> Vec<Violation> {
    let missing = match &candidate.password {
        None => candidate.is_new(),
        Some(password) => password.is_empty(),
    };
    if missing {
        vec![Violation::new(Field::Password, ViolationKind::Required)]
    } else {
        vec![]
    }
}

pub fn password_length(candidate: &UserCandidate) -> Vec<Violation> {
    match candidate.password.as_deref() {
        Some(password) if !password.is_empty() && password.chars().count() < PASSWORD_MIN_LEN => {
            vec![Violation::new(
                Field::Password,
                ViolationKind::TooShort {
                    min: PASSWORD_MIN_LEN,
                },
            )]
        }
        _ => vec![],
    }
}

pub fn password_format(candidate: &UserCandidate) -> Vec<Violation> {
    match candidate.password.as_deref() {
        Some(password) if !password.is_empty() && !is_complex_password(password) => vec![
            Violation::new(Field::Password, ViolationKind::PasswordComplexity),
        ],
        _ => vec![],
    }
}

/// Only checked when a confirmation was supplied.
pub fn password_confirmation(candidate: &UserCandidate) -> Vec<Violation> {
    match (&candidate.password, &candidate.password_confirmation) {
        (Some(password), Some(confirmation)) if password != confirmation => vec![Violation::new(
            Field::PasswordConfirmation,
            ViolationKind::Confirmation,
        )],
        _ => vec![],
    }
}

// ── Predicates ───────────────────────────────────────────────────────────────

static EMAIL_RE: OnceLock<Regex> = OnceLock::new();
static PASSWORD_CHARSET_RE: OnceLock<Regex> = OnceLock::new();

fn email_regex() -> &'static Regex {
    EMAIL_RE.get_or_init(|| {
        let pattern = r"^[A-Za-z0-9_+\-.]+@[A-Za-z0-9\-.]+\.[A-Za-z]+$";
        Regex::new(pattern).unwrap_or_else(|error| panic!("email regex failed to compile: {error}"))
    })
}

fn password_charset_regex() -> &'static Regex {
    PASSWORD_CHARSET_RE.get_or_init(|| {
        // Class membership is checked separately; this only restricts the alphabet.
        Regex::new("^[A-Za-z0-9]+$")
            .unwrap_or_else(|error| panic!("password regex failed to compile: {error}"))
    })
}

/// ASCII-only `local@domain.tld`; the TLD is letters only.
pub fn is_valid_email(email: &str) -> bool {
    email_regex().is_match(email)
}

/// Only ASCII letters and digits, with at least one lowercase, one uppercase and one digit.
pub fn is_complex_password(password: &str) -> bool {
    password_charset_regex().is_match(password)
        && password.chars().any(|c| c.is_ascii_lowercase())
        && password.chars().any(|c| c.is_ascii_uppercase())
        && password.chars().any(|c| c.is_ascii_digit())
}

fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.trim().is_empty())
}

fn required(field: Field, value: &Option<String>) -> Vec<Violation> {
    if present(value).is_none() {
        vec![Violation::new(field, ViolationKind::Required)]
    } else {
        vec![]
    }
}
