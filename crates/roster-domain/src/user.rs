//! User domain types.

use serde::{Deserialize, Deserializer, Serialize};

/// Self-declared gender of a user.
///
/// Wire format: `u8` (0 = Male, 1 = Female, 2 = Other).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Gender {
    Male = 0,
    Female = 1,
    Other = 2,
}

impl Gender {
    /// Convert from `u8` wire value. Returns `None` for unknown values.
    pub fn from_u8(v: u8) -> Option<Self> {
        match v {
            0 => Some(Self::Male),
            1 => Some(Self::Female),
            2 => Some(Self::Other),
            _ => None,
        }
    }

    /// Convert from the enum's symbolic name (`"male"`, `"female"`, `"other"`).
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "male" => Some(Self::Male),
            "female" => Some(Self::Female),
            "other" => Some(Self::Other),
            _ => None,
        }
    }

    /// Convert to `u8` wire value.
    pub fn as_u8(self) -> u8 {
        self as u8
    }
}

/// Role column carried on every user row.
///
/// Wire format: `u8` (0 = Another, 1 = Admin). Independent of the back-office
/// admin principal, which is a separate account type.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UserRole {
    #[default]
    Another = 0,
    Admin = 1,
}

impl UserRole {
    /// Convert from `u8` wire value. Returns `None` for unknown values.
    pub fn from_u8(v: u8) -> Option<Self> {
        match v {
            0 => Some(Self::Another),
            1 => Some(Self::Admin),
            _ => None,
        }
    }

    /// Convert from the enum's symbolic name (`"another"`, `"admin"`).
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "another" => Some(Self::Another),
            "admin" => Some(Self::Admin),
            _ => None,
        }
    }

    /// Convert to `u8` wire value.
    pub fn as_u8(self) -> u8 {
        self as u8
    }
}

/// An enum value as it arrives from a client: the integer code, the symbolic
/// name, or anything else. Resolved against the closed set before it reaches
/// an entity, so every shape ends up as a field violation rather than a
/// body rejection.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum RawEnumValue {
    Code(i64),
    Name(String),
    Unrecognized(Unrecognized),
}

/// Any JSON value that is neither an `i64` nor a string: booleans, floats,
/// integers past `i64`, arrays, objects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Unrecognized;

impl<'de> Deserialize<'de> for Unrecognized {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        serde::de::IgnoredAny::deserialize(deserializer).map(|_| Self)
    }
}

impl RawEnumValue {
    pub fn to_gender(&self) -> Option<Gender> {
        match self {
            Self::Code(code) => u8::try_from(*code).ok().and_then(Gender::from_u8),
            Self::Name(name) => Gender::from_name(name),
            Self::Unrecognized(_) => None,
        }
    }

    pub fn to_role(&self) -> Option<UserRole> {
        match self {
            Self::Code(code) => u8::try_from(*code).ok().and_then(UserRole::from_u8),
            Self::Name(name) => UserRole::from_name(name),
            Self::Unrecognized(_) => None,
        }
    }
}
