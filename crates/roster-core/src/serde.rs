// Module name shadows the `serde` crate; use `::serde` for the external crate.
use ::serde::{Deserialize, Deserializer, Serializer};
use chrono::{DateTime, SecondsFormat, Utc};

/// Serialize `DateTime<Utc>` as RFC 3339 with 3-digit fractional seconds.
pub fn to_rfc3339_ms<S>(dt: &DateTime<Utc>, s: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    s.serialize_str(&dt.to_rfc3339_opts(SecondsFormat::Millis, true))
}

/// Same as [`to_rfc3339_ms`] for optional timestamps; `None` serializes as `null`.
pub fn to_rfc3339_ms_opt<S>(dt: &Option<DateTime<Utc>>, s: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    match dt {
        Some(dt) => to_rfc3339_ms(dt, s),
        None => s.serialize_none(),
    }
}

/// Tell an explicit `null` apart from an absent field. Use with
/// `#[serde(default, deserialize_with = "nullable")]`: absent is `None`,
/// `null` is `Some(None)`.
pub fn nullable<'de, D, T>(d: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(d).map(Some)
}
