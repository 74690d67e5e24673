//! Message catalog for validation violations.

use std::fmt;
use std::str::FromStr;

use serde::Deserialize;

use crate::validation::{Field, Violation, ViolationKind};

/// Language used when rendering violation messages.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    #[default]
    Ja,
    En,
}

#[derive(Debug, thiserror::Error)]
#[error("unsupported locale: {0}")]
pub struct UnknownLocale(String);

impl FromStr for Locale {
    type Err = UnknownLocale;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "ja" => Ok(Self::Ja),
            "en" => Ok(Self::En),
            _ => Err(UnknownLocale(s.to_owned())),
        }
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ja => f.write_str("ja"),
            Self::En => f.write_str("en"),
        }
    }
}

/// Renders [`Violation`]s as human-readable text.
#[derive(Debug, Clone, Copy, Default)]
pub struct MessageCatalog {
    locale: Locale,
}

impl MessageCatalog {
    pub fn new(locale: Locale) -> Self {
        Self { locale }
    }

    pub fn locale(&self) -> Locale {
        self.locale
    }

    /// Display name of a field.
    pub fn attribute(&self, field: Field) -> &'static str {
        match (self.locale, field) {
            (Locale::Ja, Field::Email) => "Eメール",
            (Locale::Ja, Field::Name) => "Name",
            (Locale::Ja, Field::Age) => "Age",
            (Locale::Ja, Field::Password) => "パスワード",
            (Locale::Ja, Field::PasswordConfirmation) => "パスワード（確認用）",
            (Locale::Ja, Field::Gender) => "Gender",
            (Locale::Ja, Field::Role) => "Role",
            (Locale::Ja, Field::CompanyId) => "Company",
            (Locale::En, Field::Email) => "Email",
            (Locale::En, Field::Name) => "Name",
            (Locale::En, Field::Age) => "Age",
            (Locale::En, Field::Password) => "Password",
            (Locale::En, Field::PasswordConfirmation) => "Password confirmation",
            (Locale::En, Field::Gender) => "Gender",
            (Locale::En, Field::Role) => "Role",
            (Locale::En, Field::CompanyId) => "Company",
        }
    }

    /// Message without the field name.
    pub fn message(&self, kind: ViolationKind) -> String {
        match self.locale {
            Locale::Ja => match kind {
                ViolationKind::Required => "を入力してください".to_owned(),
                ViolationKind::InvalidFormat => "は不正な値です".to_owned(),
                ViolationKind::Taken => "はすでに存在します".to_owned(),
                ViolationKind::TooLong { max } => format!("は{max}文字以内で入力してください"),
                ViolationKind::TooShort { min } => format!("は{min}文字以上で入力してください"),
                ViolationKind::GreaterThanOrEqualTo { count } => {
                    format!("は{count}以上の値にしてください")
                }
                ViolationKind::PasswordComplexity => {
                    "は半角12文字以上で英大文字・小文字・数字それぞれ１文字以上含む必要があります"
                        .to_owned()
                }
                ViolationKind::Confirmation => "とパスワードの入力が一致しません".to_owned(),
                ViolationKind::Inclusion => "は一覧にありません".to_owned(),
            },
            Locale::En => match kind {
                ViolationKind::Required => "can't be blank".to_owned(),
                ViolationKind::InvalidFormat => "is invalid".to_owned(),
                ViolationKind::Taken => "has already been taken".to_owned(),
                ViolationKind::TooLong { max } => {
                    format!("is too long (maximum is {max} characters)")
                }
                ViolationKind::TooShort { min } => {
                    format!("is too short (minimum is {min} characters)")
                }
                ViolationKind::GreaterThanOrEqualTo { count } => {
                    format!("must be greater than or equal to {count}")
                }
                ViolationKind::PasswordComplexity => "must be at least 12 ASCII characters \
                    and contain an uppercase letter, a lowercase letter and a digit"
                    .to_owned(),
                ViolationKind::Confirmation => "doesn't match Password".to_owned(),
                ViolationKind::Inclusion => "is not included in the list".to_owned(),
            },
        }
    }

    /// Field name followed by the message, e.g. `Eメールを入力してください`.
    pub fn full_message(&self, violation: &Violation) -> String {
        let attribute = self.attribute(violation.field);
        let message = self.message(violation.kind);
        match self.locale {
            Locale::Ja => format!("{attribute}{message}"),
            Locale::En => format!("{attribute} {message}"),
        }
    }
}
