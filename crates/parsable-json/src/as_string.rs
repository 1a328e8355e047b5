//! Field helpers for `#[serde(with = "...")]`.
//!
//! ```
//! use parsable_json::as_string;
//! use serde::{Deserialize, Serialize};
//! use std::net::IpAddr;
//!
//! #[derive(Serialize, Deserialize)]
//! struct Peer {
//!     #[serde(with = "as_string")]
//!     port: u16,
//!     #[serde(with = "as_string::option")]
//!     addr: Option<IpAddr>,
//! }
//!
//! let peer: Peer = serde_json::from_str(r#"{"port":"8080","addr":null}"#).unwrap();
//! assert_eq!(peer.port, 8080);
//! assert!(peer.addr.is_none());
//! ```

use serde::{Deserializer, Serializer};

use crate::adapter::{ParsableAdapter, StrVisitor};
use crate::parsable::Parsable;

/// Write a required value as a string token.
pub fn serialize<T, S>(value: &T, serializer: S) -> Result<S::Ok, S::Error>
where
    T: Parsable,
    S: Serializer,
{
    ParsableAdapter::<T>::new().serialize(Some(value), serializer)
}

/// Read a required value. `null` is rejected, there being no universal zero
/// value in Rust; see [`or_default`] and [`option`] for slots that accept it.
pub fn deserialize<'de, T, D>(deserializer: D) -> Result<T, D::Error>
where
    T: Parsable,
    D: Deserializer<'de>,
{
    deserializer.deserialize_str(StrVisitor::<T>::new())
}

/// `Option<T>` fields: `null` and `None` map onto each other.
pub mod option {
    use super::*;

    pub fn serialize<T, S>(value: &Option<T>, serializer: S) -> Result<S::Ok, S::Error>
    where
        T: Parsable,
        S: Serializer,
    {
        ParsableAdapter::<T>::new().serialize(value.as_ref(), serializer)
    }

    pub fn deserialize<'de, T, D>(deserializer: D) -> Result<Option<T>, D::Error>
    where
        T: Parsable,
        D: Deserializer<'de>,
    {
        ParsableAdapter::<T>::new().deserialize(deserializer)
    }
}

/// `T: Default` fields: `null` reads as `T::default()`.
pub mod or_default {
    use super::*;

    pub fn serialize<T, S>(value: &T, serializer: S) -> Result<S::Ok, S::Error>
    where
        T: Parsable,
        S: Serializer,
    {
        super::serialize(value, serializer)
    }

    pub fn deserialize<'de, T, D>(deserializer: D) -> Result<T, D::Error>
    where
        T: Parsable + Default,
        D: Deserializer<'de>,
    {
        ParsableAdapter::<T>::new()
            .deserialize(deserializer)
            .map(Option::unwrap_or_default)
    }
}

/// `Vec<T>` fields: a JSON array of strings, order preserved.
pub mod vec {
    use serde::Deserialize;

    use super::*;
    use crate::adapter::Formatted;
    use crate::parsed::Parsed;

    pub fn serialize<T, S>(values: &[T], serializer: S) -> Result<S::Ok, S::Error>
    where
        T: Parsable,
        S: Serializer,
    {
        serializer.collect_seq(values.iter().map(|value| Formatted(Some(value))))
    }

    pub fn deserialize<'de, T, D>(deserializer: D) -> Result<Vec<T>, D::Error>
    where
        T: Parsable,
        D: Deserializer<'de>,
    {
        let parsed = Vec::<Parsed<T>>::deserialize(deserializer)?;
        Ok(parsed.into_iter().map(Parsed::into_inner).collect())
    }
}
