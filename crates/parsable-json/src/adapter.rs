//! Serde adapter that carries any [`Parsable`] value as a JSON string scalar.

use std::any::TypeId;
use std::fmt;
use std::marker::PhantomData;

use serde::de::{self, Deserializer, Visitor};
use serde::ser::{Serialize, Serializer};

use crate::errors::{BoxError, Error, ParseError, Result};
use crate::parsable::{type_name, Parsable};

/// Stateless converter between `T` and its textual wire form.
///
/// The wire form is always a single JSON string (the value's `format()`
/// output) or `null` for absence. Holds no data, so one instance can be
/// shared freely across threads whatever `T` is.
pub struct ParsableAdapter<T> {
    _marker: PhantomData<fn() -> T>,
}

impl<T> ParsableAdapter<T> {
    pub const fn new() -> Self {
        Self {
            _marker: PhantomData,
        }
    }
}

impl<T> Clone for ParsableAdapter<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for ParsableAdapter<T> {}

impl<T> Default for ParsableAdapter<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> fmt::Debug for ParsableAdapter<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ParsableAdapter<{}>", type_name::<T>())
    }
}

impl<T: Parsable> ParsableAdapter<T> {
    /// Parse `text` with `T`'s own rules and no format provider.
    ///
    /// A delegate error that is already a `serde_json::Error` comes back as
    /// [`Error::Json`] untouched; anything else is wrapped in a
    /// [`ParseError`] naming the text and the type.
    pub fn parse_str(&self, text: &str) -> Result<T> {
        T::parse(text, None).map_err(|err| {
            tracing::debug!(
                target_type = %type_name::<T>(),
                input_len = text.len(),
                "textual value rejected"
            );
            wrap_parse_error::<T>(text, err)
        })
    }

    /// Write `value` as a string token, or `null` when absent.
    pub fn serialize<S>(&self, value: Option<&T>, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match value {
            Some(value) => serializer.serialize_str(&value.format()),
            None => serializer.serialize_none(),
        }
    }

    /// Read a string token into `T`; `null` reads as `None`.
    ///
    /// Tokens of any other shape fail with the deserializer's own
    /// `invalid_type` error.
    pub fn deserialize<'de, D>(&self, deserializer: D) -> std::result::Result<Option<T>, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_option(OptionVisitor::<T>::new())
    }
}

impl<T: 'static> ParsableAdapter<T> {
    /// Whether this adapter converts values of the `candidate` type.
    ///
    /// Rust has no subtyping between nominal types, so this is exact type
    /// identity with `T`.
    pub fn can_handle(&self, candidate: TypeId) -> bool {
        candidate == TypeId::of::<T>()
    }

    pub fn can_handle_type<U: ?Sized + 'static>(&self) -> bool {
        self.can_handle(TypeId::of::<U>())
    }
}

fn wrap_parse_error<T: Parsable>(text: &str, err: T::Err) -> Error {
    let boxed: BoxError = Box::new(err);
    match boxed.downcast::<serde_json::Error>() {
        Ok(native) => Error::Json(*native),
        Err(other) => ParseError::new(text, type_name::<T>(), other).into(),
    }
}

/// Reads exactly one string token and parses it as `T`.
pub(crate) struct StrVisitor<T>(PhantomData<fn() -> T>);

impl<T> StrVisitor<T> {
    pub(crate) const fn new() -> Self {
        Self(PhantomData)
    }
}

impl<'de, T: Parsable> Visitor<'de> for StrVisitor<T> {
    type Value = T;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "a string holding a {}", type_name::<T>())
    }

    fn visit_str<E>(self, v: &str) -> std::result::Result<T, E>
    where
        E: de::Error,
    {
        ParsableAdapter::<T>::new().parse_str(v).map_err(E::custom)
    }
}

struct OptionVisitor<T>(PhantomData<fn() -> T>);

impl<T> OptionVisitor<T> {
    const fn new() -> Self {
        Self(PhantomData)
    }
}

impl<'de, T: Parsable> Visitor<'de> for OptionVisitor<T> {
    type Value = Option<T>;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "a string holding a {} or null", type_name::<T>())
    }

    fn visit_none<E>(self) -> std::result::Result<Self::Value, E>
    where
        E: de::Error,
    {
        Ok(None)
    }

    fn visit_unit<E>(self) -> std::result::Result<Self::Value, E>
    where
        E: de::Error,
    {
        Ok(None)
    }

    fn visit_some<D>(self, deserializer: D) -> std::result::Result<Self::Value, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_str(StrVisitor::<T>::new()).map(Some)
    }

    fn visit_str<E>(self, v: &str) -> std::result::Result<Self::Value, E>
    where
        E: de::Error,
    {
        StrVisitor::<T>::new().visit_str(v).map(Some)
    }
}

/// Borrowed view that serializes through [`ParsableAdapter`].
pub(crate) struct Formatted<'a, T>(pub(crate) Option<&'a T>);

impl<T: Parsable> Serialize for Formatted<'_, T> {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        ParsableAdapter::<T>::new().serialize(self.0, serializer)
    }
}
